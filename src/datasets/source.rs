//! Concrete data sources

use super::{DataSource, DatasetError, TabularRecord};
use serde_json::json;
use std::path::PathBuf;
use tracing::debug;

/// Rows held in memory
pub struct StaticSource {
    rows: Vec<TabularRecord>,
}

impl StaticSource {
    pub fn new(rows: Vec<TabularRecord>) -> Self {
        Self { rows }
    }

    /// The built-in sample patient table
    pub fn patients() -> Self {
        let rows = [
            json!({"id": "A123", "name": "Kim", "age": 43}),
            json!({"id": "B456", "name": "Lee", "age": 37}),
        ]
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect();
        Self::new(rows)
    }
}

impl DataSource for StaticSource {
    fn rows(&self) -> Result<Vec<TabularRecord>, DatasetError> {
        Ok(self.rows.clone())
    }
}

/// JSON array of records, read from disk on every call so edits show up
/// without a restart
pub struct JsonFileSource {
    path: PathBuf,
    max_rows: usize,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>, max_rows: usize) -> Self {
        Self {
            path: path.into(),
            max_rows,
        }
    }
}

impl DataSource for JsonFileSource {
    fn rows(&self) -> Result<Vec<TabularRecord>, DatasetError> {
        let path = self.path.display().to_string();

        let content = std::fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                DatasetError::NotFound(path.clone())
            } else {
                DatasetError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;

        let mut rows: Vec<TabularRecord> = serde_json::from_str(&content)
            .map_err(|source| DatasetError::Malformed { path: path.clone(), source })?;
        rows.truncate(self.max_rows);

        debug!("Read {} rows from {}", rows.len(), path);
        Ok(rows)
    }
}
