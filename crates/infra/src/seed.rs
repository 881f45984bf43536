//! Static mock datasets used in place of a real backend.

use std::path::Path;

use uniformops_inventory::{School, ingest};

use crate::read_model::{InMemorySchoolStore, StoreError};

const MOCK_SCHOOLS: &str = include_str!("../data/mock_schools.json");

/// The built-in mock dataset, validated through the ingestion boundary.
pub fn mock_schools() -> Result<Vec<School>, StoreError> {
    parse_schools(MOCK_SCHOOLS)
}

/// Parse a JSON array of school documents.
pub fn parse_schools(text: &str) -> Result<Vec<School>, StoreError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    Ok(ingest::schools_from_value(&value)?)
}

/// Read and validate a dataset file.
pub async fn load_schools(path: &Path) -> Result<Vec<School>, StoreError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
    let schools = parse_schools(&text)?;
    tracing::info!(path = %path.display(), schools = schools.len(), "loaded school dataset");
    Ok(schools)
}

/// Build a store from `path`, or from the mock dataset when `None`.
pub async fn seeded_store(path: Option<&Path>) -> Result<InMemorySchoolStore, StoreError> {
    let schools = match path {
        Some(p) => load_schools(p).await?,
        None => {
            let schools = mock_schools()?;
            tracing::info!(schools = schools.len(), "using built-in mock dataset");
            schools
        }
    };
    Ok(InMemorySchoolStore::with_schools(schools))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use uniformops_core::DomainError;
    use uniformops_inventory::{StockStatus, summarize};

    use crate::read_model::SchoolRepository;

    #[test]
    fn mock_dataset_is_valid() {
        let schools = mock_schools().unwrap();
        assert_eq!(schools.len(), 3);
        assert_eq!(schools[0].name, "Hillcrest Primary School");
        assert_eq!(schools[1].category.as_deref(), Some("Secondary"));

        // Numeric waist sizes are ingested as strings.
        let trousers = schools[1].inventory.get("Trousers").unwrap();
        assert_eq!(trousers.variants[0].sizes[0].size, "28");
    }

    #[test]
    fn mock_dataset_has_stock_problems_to_show() {
        let schools = mock_schools().unwrap();
        assert_eq!(summarize(&schools[0]).status, StockStatus::OutOfStock);
        assert_eq!(summarize(&schools[2]).status, StockStatus::InStock);
    }

    #[test]
    fn malformed_dataset_surfaces_domain_error() {
        let err = parse_schools(r#"[{"id": "0190c1a2-7b3e-7c41-9a10-3f5d2e8b1a01", "name": "X", "inventory": {"Shirts": []}}]"#)
            .unwrap_err();
        assert!(matches!(err, StoreError::Domain(DomainError::InvalidShape(_))));

        let err = parse_schools("not json").unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)));
    }

    #[tokio::test]
    async fn seeds_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "0190c1a2-7b3e-7c41-9a10-3f5d2e8b1a09", "name": "Lakeside", "inventory": {{}}}}]"#
        )
        .unwrap();

        let store = seeded_store(Some(file.path())).await.unwrap();
        let schools = store.list_schools().await.unwrap();
        assert_eq!(schools.len(), 1);
        assert_eq!(schools[0].name, "Lakeside");
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let err = load_schools(Path::new("/definitely/not/here.json")).await.unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[tokio::test]
    async fn defaults_to_mock_dataset() {
        let store = seeded_store(None).await.unwrap();
        assert_eq!(store.list_schools().await.unwrap().len(), 3);
    }
}
