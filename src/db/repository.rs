use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{params, OpenFlags};
use tokio_rusqlite::Connection;

use crate::error::Result;
use crate::models::{PurchaseRecord, Roaster, Table};

use super::schema::{BEANS_TABLE, ROASTERS_TABLE, SCHEMA};

/// SQLite-backed store for the bean and roaster tables.
pub struct Repository {
    conn: Connection,
}

impl Repository {
    /// Open (or create) a database and make sure the tables exist.
    pub async fn create(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path).await?;

        conn.call(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await?;

        Ok(Self { conn })
    }

    /// Open an existing database without creating or modifying it.
    pub async fn open_read_only(db_path: &Path) -> Result<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(db_path, flags).await?;
        Ok(Self { conn })
    }

    /// `SELECT *` from a table, every value rendered as text.
    ///
    /// `table` must already have passed the allow-list.
    pub async fn select_all(&self, table: &str) -> Result<Table> {
        let sql = format!("SELECT * FROM \"{table}\"");
        let table = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&sql)?;
                let columns: Vec<String> =
                    stmt.column_names().iter().map(|c| c.to_string()).collect();
                let width = columns.len();
                let mut table = Table::new(columns);

                let mut rows = stmt.query([])?;
                while let Some(row) = rows.next()? {
                    let mut cells = Vec::with_capacity(width);
                    for idx in 0..width {
                        cells.push(value_to_text(row.get_ref(idx)?));
                    }
                    table.push_row(cells);
                }
                Ok(table)
            })
            .await?;
        Ok(table)
    }

    pub async fn list_tables(&self) -> Result<Vec<String>> {
        let tables = self
            .conn
            .call(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
                )?;
                let names = stmt
                    .query_map([], |row| row.get::<_, String>(0))?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(names)
            })
            .await?;
        Ok(tables)
    }

    // Seeding

    /// Replace every roaster row, returning the resulting row count.
    pub async fn replace_roasters(&self, roasters: Vec<Roaster>) -> Result<i64> {
        let count = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                tx.execute(&format!("DELETE FROM {ROASTERS_TABLE}"), [])?;
                {
                    let mut stmt = tx.prepare(&format!(
                        "INSERT INTO {ROASTERS_TABLE} (name, city, state, website) VALUES (?1, ?2, ?3, ?4)"
                    ))?;
                    for roaster in &roasters {
                        stmt.execute(params![
                            roaster.name.trim(),
                            roaster.city,
                            roaster.state,
                            roaster.website
                        ])?;
                    }
                }
                let count: i64 =
                    tx.query_row(&format!("SELECT COUNT(*) FROM {ROASTERS_TABLE}"), [], |row| {
                        row.get(0)
                    })?;
                tx.commit()?;
                Ok(count)
            })
            .await?;
        Ok(count)
    }

    /// Replace every purchase row, returning the resulting row count.
    pub async fn replace_purchases(&self, purchases: Vec<PurchaseRecord>) -> Result<i64> {
        let count = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                tx.execute(&format!("DELETE FROM {BEANS_TABLE}"), [])?;
                {
                    let mut stmt = tx.prepare(&format!(
                        r#"INSERT INTO {BEANS_TABLE} (purchase_date, roaster, blend_name, roast_level, roast_date,
                                                     weight_grams, tasting_notes, origin_country, processing_method)
                           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"#
                    ))?;
                    for p in &purchases {
                        stmt.execute(params![
                            p.purchase_date,
                            p.roaster,
                            p.blend_name,
                            p.roast_level,
                            p.roast_date,
                            p.weight_grams,
                            p.tasting_notes,
                            p.origin_country,
                            p.processing_method,
                        ])?;
                    }
                }
                let count: i64 =
                    tx.query_row(&format!("SELECT COUNT(*) FROM {BEANS_TABLE}"), [], |row| {
                        row.get(0)
                    })?;
                tx.commit()?;
                Ok(count)
            })
            .await?;
        Ok(count)
    }
}

fn value_to_text(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(_) => None,
    }
}
