use super::ExchangeError;
use crate::model::Product;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::info;

/// Pretty-printed JSON array of the catalog. An empty catalog is refused.
pub fn render_catalog(products: &[Product]) -> Result<String, ExchangeError> {
    if products.is_empty() {
        return Err(ExchangeError::EmptyCatalog);
    }
    serde_json::to_string_pretty(products).map_err(ExchangeError::Encode)
}

/// `<prefix>-backup-<unix millis>.json`
pub fn backup_file_name(prefix: &str, at: DateTime<Utc>) -> String {
    format!("{prefix}-backup-{}.json", at.timestamp_millis())
}

/// Renders the catalog and writes it as a new backup file in `dir`.
///
/// Returns the path written. Nothing touches the disk when the catalog is empty.
pub async fn write_backup(
    dir: &Path,
    prefix: &str,
    products: &[Product],
    at: DateTime<Utc>,
) -> Result<PathBuf, ExchangeError> {
    let contents = render_catalog(products)?;
    let path = dir.join(backup_file_name(prefix, at));
    let io_error = |source| ExchangeError::Io {
        path: path.clone(),
        source,
    };

    tokio::fs::create_dir_all(dir).await.map_err(io_error)?;
    tokio::fs::write(&path, contents).await.map_err(io_error)?;

    info!(path = %path.display(), count = products.len(), "Catalog exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::parse_catalog;
    use chrono::TimeZone;

    fn sample() -> Vec<Product> {
        vec![
            Product::new("1", "Tea", 3.0).with_category("Drinks"),
            Product::new("2", "Dates", 30.0).with_original_price(40.0),
        ]
    }

    #[test]
    fn empty_catalog_is_refused() {
        assert!(matches!(render_catalog(&[]), Err(ExchangeError::EmptyCatalog)));
    }

    #[test]
    fn export_then_import_reproduces_catalog() {
        let products = sample();
        let text = render_catalog(&products).unwrap();
        assert!(text.contains("\n  "));
        assert_eq!(parse_catalog(&text).unwrap(), products);
    }

    #[test]
    fn file_name_uses_unix_millis() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(backup_file_name("zad", at), "zad-backup-1700000000123.json");
    }

    #[tokio::test]
    async fn test_write_backup_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let at = Utc.timestamp_millis_opt(42).unwrap();
        let path = write_backup(dir.path(), "shop", &sample(), at).await.unwrap();

        assert_eq!(path, dir.path().join("shop-backup-42.json"));
        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(parse_catalog(&written).unwrap(), sample());
    }

    #[tokio::test]
    async fn test_empty_catalog_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_backup(dir.path(), "shop", &[], Utc::now()).await.unwrap_err();
        assert!(matches!(err, ExchangeError::EmptyCatalog));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
