use serde::Serialize;

use crate::models::Table;

pub const ROAST_LEVEL_LABEL: &str = "Roast Level";

/// Logical fields the aggregations need, independent of how a source spelled them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    PurchaseDate,
    Weight,
    RoastLevel,
    Roaster,
    BlendName,
    RoasterName,
    City,
    State,
    Website,
}

impl CanonicalField {
    /// Header candidates in priority order; the first one present wins.
    pub fn candidates(&self) -> &'static [&'static str] {
        match self {
            CanonicalField::PurchaseDate => {
                &["Date", "date", "Purchase Date", "Bought Date", "purchase_date"]
            }
            CanonicalField::Weight => &[
                "Weight (g)",
                "Net Weight (g)",
                "Net Weight",
                "Weight",
                "weight_g",
                "weight_grams",
            ],
            CanonicalField::RoastLevel => &[ROAST_LEVEL_LABEL, "Roast", "roast_level"],
            CanonicalField::Roaster => &["Roaster", "roaster"],
            CanonicalField::BlendName => &["Blend Name", "blend_name"],
            CanonicalField::RoasterName => &["Roaster", "Name", "name"],
            CanonicalField::City => &["City", "city"],
            CanonicalField::State => &["State", "state"],
            CanonicalField::Website => &["Website", "website"],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CanonicalField::PurchaseDate => "purchase date",
            CanonicalField::Weight => "weight",
            CanonicalField::RoastLevel => "roast level",
            CanonicalField::Roaster => "roaster",
            CanonicalField::BlendName => "blend name",
            CanonicalField::RoasterName => "roaster name",
            CanonicalField::City => "city",
            CanonicalField::State => "state",
            CanonicalField::Website => "website",
        }
    }
}

/// Name of the first candidate column present in `table`, if any.
pub fn detect<'t>(table: &'t Table, field: CanonicalField) -> Option<&'t str> {
    detect_index(table, field).map(|idx| table.columns[idx].as_str())
}

pub fn detect_index(table: &Table, field: CanonicalField) -> Option<usize> {
    field
        .candidates()
        .iter()
        .find_map(|candidate| table.column(candidate))
}

/// Rename `roast_level`-style headers to the display label.
///
/// Only the first match is renamed, and only when the label is not already
/// taken, so grouping always finds a single `Roast Level` column.
pub fn normalize(mut table: Table) -> Table {
    if table.column(ROAST_LEVEL_LABEL).is_some() {
        return table;
    }
    let roast_col = table
        .columns
        .iter()
        .position(|c| c.to_lowercase() == "roast_level");
    if let Some(idx) = roast_col {
        tracing::debug!("Renaming column {:?} to {:?}", table.columns[idx], ROAST_LEVEL_LABEL);
        table.rename_column(idx, ROAST_LEVEL_LABEL);
    }
    table
}
