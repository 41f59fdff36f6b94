use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;
use crate::db::{self, resolve_table, DatabaseTarget};
use crate::error::{AppError, Result};
use crate::models::Table;

mod csv;

pub use self::csv::{read_records, read_table};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Purchases,
    Roasters,
}

impl TableKind {
    pub fn label(&self) -> &'static str {
        match self {
            TableKind::Purchases => "purchases",
            TableKind::Roasters => "roasters",
        }
    }
}

/// One way of producing a table. Strategies are tried in order.
#[derive(Debug, Clone)]
pub enum SourceStrategy {
    Database { target: DatabaseTarget, table: String },
    Csv(PathBuf),
}

impl SourceStrategy {
    async fn fetch(&self, timeout: Duration) -> Result<Table> {
        match self {
            SourceStrategy::Database { target, table } => {
                let resolved =
                    resolve_table(table).ok_or_else(|| AppError::TableNotAllowed(table.clone()))?;
                db::select_all(target, &resolved, timeout).await
            }
            SourceStrategy::Csv(path) => read_table(path),
        }
    }

    fn describe(&self) -> String {
        match self {
            SourceStrategy::Database { target, table } => format!("{table} on {}", target.describe()),
            SourceStrategy::Csv(path) => format!("csv {}", path.display()),
        }
    }
}

/// Loads the purchase and roaster tables: database first, CSV as fallback,
/// an empty table when nothing works.
#[derive(Debug, Clone)]
pub struct RecordSource {
    purchases: Vec<SourceStrategy>,
    roasters: Vec<SourceStrategy>,
    timeout: Duration,
}

impl RecordSource {
    pub fn new(
        purchases: Vec<SourceStrategy>,
        roasters: Vec<SourceStrategy>,
        timeout: Duration,
    ) -> Self {
        Self {
            purchases,
            roasters,
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let target = config
            .connection_string()
            .and_then(|url| match DatabaseTarget::parse(&url) {
                Ok(target) => Some(target),
                Err(e) => {
                    tracing::warn!("Ignoring database configuration: {}", e);
                    None
                }
            });

        let chain = |table: &str, csv_path: &str| {
            let mut strategies = Vec::new();
            if let Some(target) = &target {
                strategies.push(SourceStrategy::Database {
                    target: target.clone(),
                    table: table.to_string(),
                });
            }
            strategies.push(SourceStrategy::Csv(PathBuf::from(csv_path)));
            strategies
        };

        Self::new(
            chain(&config.beans_table, &config.beans_csv),
            chain(&config.roasters_table, &config.roasters_csv),
            config.db_timeout(),
        )
    }

    /// Only read CSV files.
    #[cfg(test)]
    pub fn csv_only(purchases: &std::path::Path, roasters: &std::path::Path) -> Self {
        Self::new(
            vec![SourceStrategy::Csv(purchases.to_path_buf())],
            vec![SourceStrategy::Csv(roasters.to_path_buf())],
            Duration::from_secs(5),
        )
    }

    pub fn strategies(&self, kind: TableKind) -> &[SourceStrategy] {
        match kind {
            TableKind::Purchases => &self.purchases,
            TableKind::Roasters => &self.roasters,
        }
    }

    /// First strategy that yields a table wins. Never fails.
    pub async fn load(&self, kind: TableKind) -> Table {
        for strategy in self.strategies(kind) {
            match strategy.fetch(self.timeout).await {
                Ok(table) => {
                    tracing::debug!(
                        "Loaded {} {} rows from {}",
                        table.len(),
                        kind.label(),
                        strategy.describe()
                    );
                    return table;
                }
                Err(e) => {
                    tracing::warn!(
                        "Could not load {} from {}: {}",
                        kind.label(),
                        strategy.describe(),
                        e
                    );
                }
            }
        }
        tracing::warn!("No source available for {}, using an empty table", kind.label());
        Table::empty()
    }
}
