pub const BEANS_TABLE: &str = "fact_coffee_beans";
pub const ROASTERS_TABLE: &str = "dim_roaster";

pub const SCHEMA: &str = r#"
-- roaster dimension
CREATE TABLE IF NOT EXISTS dim_roaster (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    city TEXT,
    state TEXT,
    website TEXT
);

CREATE INDEX IF NOT EXISTS idx_dim_roaster_name ON dim_roaster(name);

-- one row per coffee bag purchase
CREATE TABLE IF NOT EXISTS fact_coffee_beans (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    purchase_date TEXT,
    roaster TEXT,
    blend_name TEXT,
    roast_level TEXT,
    roast_date TEXT,
    weight_grams REAL,
    tasting_notes TEXT,
    origin_country TEXT,
    processing_method TEXT
);

CREATE INDEX IF NOT EXISTS idx_fact_coffee_beans_purchase_date ON fact_coffee_beans(purchase_date);
"#;
