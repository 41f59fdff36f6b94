/// A table the dashboard is allowed to read, split into schema and name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualifiedTable {
    pub schema: &'static str,
    pub name: &'static str,
}

impl QualifiedTable {
    /// `"schema"."name"`, for servers that have schemas.
    pub fn quoted(&self) -> String {
        format!("\"{}\".\"{}\"", self.schema, self.name)
    }
}

const fn qt(schema: &'static str, name: &'static str) -> QualifiedTable {
    QualifiedTable { schema, name }
}

const ALLOWED_TABLES: &[(&str, QualifiedTable)] = &[
    // Roasters
    ("staging.roasters_raw", qt("staging", "roasters_raw")),
    ("roasters_raw", qt("staging", "roasters_raw")),
    ("warehouse.dim_roaster", qt("warehouse", "dim_roaster")),
    ("dim_roaster", qt("warehouse", "dim_roaster")),
    ("coffee_roasters", qt("warehouse", "dim_roaster")),
    // Beans
    ("staging.beans_raw", qt("staging", "beans_raw")),
    ("beans_raw", qt("staging", "beans_raw")),
    ("warehouse.fact_coffee_beans", qt("warehouse", "fact_coffee_beans")),
    ("fact_coffee_beans", qt("warehouse", "fact_coffee_beans")),
    ("coffee_beans", qt("warehouse", "fact_coffee_beans")),
];

/// Resolve a user-supplied table identifier against the allow-list.
///
/// Exact (case-insensitive) keys win; a bare name also matches the table
/// part of any dotted key. Everything else is rejected.
pub fn resolve_table(key: &str) -> Option<QualifiedTable> {
    let normalized = key.trim().to_lowercase();
    if let Some((_, table)) = ALLOWED_TABLES.iter().find(|(k, _)| *k == normalized) {
        return Some(*table);
    }
    if normalized.contains('.') {
        return None;
    }
    ALLOWED_TABLES
        .iter()
        .filter_map(|(k, table)| k.split_once('.').map(|(_, name)| (name, table)))
        .find(|(name, _)| *name == normalized)
        .map(|(_, table)| *table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_short_and_qualified_names() {
        let beans = qt("warehouse", "fact_coffee_beans");
        assert_eq!(resolve_table("warehouse.fact_coffee_beans"), Some(beans));
        assert_eq!(resolve_table("fact_coffee_beans"), Some(beans));
        assert_eq!(resolve_table("coffee_beans"), Some(beans));
        assert_eq!(resolve_table("  Warehouse.Dim_Roaster "), Some(qt("warehouse", "dim_roaster")));
        assert_eq!(resolve_table("roasters_raw"), Some(qt("staging", "roasters_raw")));
    }

    #[test]
    fn rejects_tables_outside_the_allow_list() {
        assert_eq!(resolve_table("users"), None);
        assert_eq!(resolve_table("public.fact_coffee_beans"), None);
        assert_eq!(resolve_table("warehouse.fact_coffee_beans; DROP TABLE x"), None);
        assert_eq!(resolve_table(""), None);
    }

    #[test]
    fn quotes_schema_and_name() {
        assert_eq!(qt("warehouse", "dim_roaster").quoted(), "\"warehouse\".\"dim_roaster\"");
    }
}
