use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::models::Table;

fn reader(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;
    Ok(rdr)
}

/// Read a headed CSV file into an untyped table. Blank cells become missing cells.
pub fn read_table(path: &Path) -> Result<Table> {
    let mut rdr = reader(path)?;
    let columns = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    let mut table = Table::new(columns);

    for record in rdr.records() {
        let record = record?;
        let cells = record
            .iter()
            .map(|field| Some(field.to_string()).filter(|f| !f.is_empty()))
            .collect();
        table.push_row(cells);
    }

    Ok(table)
}

/// Header row plus typed records, for seeding a database.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<(Vec<String>, Vec<T>)> {
    let mut rdr = reader(path)?;
    let headers = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    let records = rdr
        .deserialize()
        .collect::<std::result::Result<Vec<T>, _>>()?;
    Ok((headers, records))
}
