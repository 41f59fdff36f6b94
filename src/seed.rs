use std::path::Path;

use crate::db::Repository;
use crate::error::{AppError, Result};
use crate::models::{PurchaseRecord, Roaster, PURCHASE_COLUMNS, ROASTER_COLUMNS};
use crate::source::read_records;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub roasters: i64,
    pub purchases: i64,
}

/// Build (or rebuild) a SQLite database from the bean and roaster CSV files.
///
/// Both tables are replaced wholesale. The CSV headers must use the canonical
/// column names.
pub async fn seed_database(db_path: &Path, beans_csv: &Path, roasters_csv: &Path) -> Result<SeedReport> {
    let (roaster_headers, roasters) = read_records::<Roaster>(roasters_csv)?;
    require_columns(roasters_csv, &roaster_headers, &ROASTER_COLUMNS[..1])?;

    let (bean_headers, purchases) = read_records::<PurchaseRecord>(beans_csv)?;
    require_columns(beans_csv, &bean_headers, &PURCHASE_COLUMNS)?;

    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let repo = Repository::create(db_path).await?;

    let roasters = repo.replace_roasters(roasters).await?;
    tracing::info!("Loaded roasters into database. Total roasters: {}", roasters);

    let purchases = repo.replace_purchases(purchases).await?;
    tracing::info!("Loaded coffee beans into database. Total beans: {}", purchases);

    Ok(SeedReport {
        roasters,
        purchases,
    })
}

fn require_columns(path: &Path, headers: &[String], required: &[&str]) -> Result<()> {
    let missing: Vec<&str> = required
        .iter()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .copied()
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(AppError::Config(format!(
        "{} is missing column(s): {}",
        path.display(),
        missing.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;
    use std::time::Duration;

    use super::*;
    use crate::dashboard::{Dashboard, DashboardOptions};
    use crate::db::DatabaseTarget;
    use crate::geo::StaticLookup;
    use crate::source::{RecordSource, SourceStrategy};

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::File::create(&path)
            .unwrap()
            .write_all(contents.as_bytes())
            .unwrap();
        path
    }

    const BEANS: &str = "purchase_date,roaster,blend_name,roast_level,roast_date,weight_grams,tasting_notes,origin_country,processing_method\n\
        2024-01-01, Acme Roasters ,Morning Blend,Light,2023-12-20,340,\"fruity\",Ethiopia,Washed\n\
        2024-02-15,Acme Roasters,Evening Blend,Dark,2024-02-01,454,\"smoky\",Brazil,Natural\n";

    #[tokio::test]
    async fn seeded_database_feeds_the_dashboard() {
        let dir = tempfile::tempdir().unwrap();
        let beans = write_file(dir.path(), "beans.csv", BEANS);
        let roasters = write_file(
            dir.path(),
            "roasters.csv",
            "name,city,state,website\nAcme Roasters,Berkeley,CA,https://acme.example\n",
        );
        let db_path = dir.path().join("data").join("coffee_canary.db");

        let report = seed_database(&db_path, &beans, &roasters).await.unwrap();
        assert_eq!(report, SeedReport { roasters: 1, purchases: 2 });

        let target = DatabaseTarget::Sqlite(db_path);
        let db = |table: &str| SourceStrategy::Database {
            target: target.clone(),
            table: table.to_string(),
        };
        let source = RecordSource::new(
            vec![db("coffee_beans")],
            vec![db("coffee_roasters")],
            Duration::from_secs(5),
        );
        let dash = Dashboard::build(&source, &StaticLookup::builtin(), DashboardOptions::default()).await;

        let top = &dash.roaster_distribution.data().unwrap()[0];
        assert_eq!((top.roaster.as_str(), top.count), ("Acme Roasters", 2));
        let series = dash.cumulative_weight.data().unwrap();
        assert_eq!(series.last().unwrap().cumulative_weight_grams, 794.0);
        assert_eq!(dash.roaster_locations.data().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unreadable_weight_is_stored_as_null() {
        let dir = tempfile::tempdir().unwrap();
        let beans = write_file(
            dir.path(),
            "beans.csv",
            "purchase_date,roaster,blend_name,roast_level,roast_date,weight_grams,tasting_notes,origin_country,processing_method\n\
             2024-01-01,Acme Roasters,Morning Blend,Light,2023-12-20,340,,Ethiopia,Washed\n\
             2024-02-01,Acme Roasters,Evening Blend,Dark,2024-01-25,12oz,,Brazil,Natural\n",
        );
        let roasters = write_file(dir.path(), "roasters.csv", "name\nAcme Roasters\n");
        let db_path = dir.path().join("coffee.db");

        let report = seed_database(&db_path, &beans, &roasters).await.unwrap();
        assert_eq!(report.purchases, 2);

        let repo = Repository::open_read_only(&db_path).await.unwrap();
        let table = repo.select_all("fact_coffee_beans").await.unwrap();
        let weight = table.column("weight_grams").unwrap();
        assert_eq!(table.get(0, weight), Some("340"));
        assert_eq!(table.get(1, weight), None);

        let series = crate::aggregate::cumulative_weight(&table);
        assert_eq!(series.data().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rejects_csv_without_required_columns() {
        let dir = tempfile::tempdir().unwrap();
        let beans = write_file(dir.path(), "beans.csv", "Date,Roaster\n2024-01-01,Acme\n");
        let roasters = write_file(dir.path(), "roasters.csv", "name\nAcme\n");

        let err = seed_database(&dir.path().join("x.db"), &beans, &roasters)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("purchase_date")));
        assert!(!dir.path().join("x.db").exists());
    }

    #[tokio::test]
    async fn missing_csv_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = seed_database(
            &dir.path().join("x.db"),
            &dir.path().join("beans.csv"),
            &dir.path().join("roasters.csv"),
        )
        .await;
        assert!(result.is_err());
    }
}
