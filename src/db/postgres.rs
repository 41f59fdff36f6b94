use tokio_postgres::{Client, NoTls, SimpleQueryMessage};

use crate::error::Result;
use crate::models::Table;

use super::tables::QualifiedTable;

/// Read-only access to the warehouse tables on a Postgres server.
pub struct PostgresStore {
    client: Client,
}

impl PostgresStore {
    pub async fn connect(url: &str) -> Result<Self> {
        let (client, connection) = tokio_postgres::connect(url, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::warn!("Postgres connection closed with error: {}", e);
            }
        });

        Ok(Self { client })
    }

    /// `SELECT *` over the simple-query protocol, so every value arrives as text.
    pub async fn select_all(&self, table: &QualifiedTable) -> Result<Table> {
        let sql = format!("SELECT * FROM {}", table.quoted());
        let messages = self.client.simple_query(&sql).await?;
        Ok(table_from_messages(messages))
    }

    pub async fn list_tables(&self) -> Result<Vec<String>> {
        let messages = self
            .client
            .simple_query(
                r#"SELECT table_schema, table_name
                   FROM information_schema.tables
                   WHERE table_schema NOT IN ('pg_catalog', 'information_schema')
                   ORDER BY table_schema, table_name"#,
            )
            .await?;

        let tables = messages
            .into_iter()
            .filter_map(|msg| match msg {
                SimpleQueryMessage::Row(row) => {
                    let schema = row.get(0).unwrap_or_default();
                    let name = row.get(1).unwrap_or_default();
                    Some(format!("{schema}.{name}"))
                }
                _ => None,
            })
            .collect();
        Ok(tables)
    }
}

fn table_from_messages(messages: Vec<SimpleQueryMessage>) -> Table {
    let mut table = Table::empty();
    for msg in messages {
        if let SimpleQueryMessage::Row(row) = msg {
            if table.columns.is_empty() {
                table.columns = row.columns().iter().map(|c| c.name().to_string()).collect();
            }
            let cells = (0..row.len()).map(|idx| row.get(idx).map(String::from)).collect();
            table.push_row(cells);
        }
    }
    table
}
