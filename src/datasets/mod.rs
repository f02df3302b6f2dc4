//! Tabular datasets exposed as resources
//!
//! Records are opaque key/value maps. The gateway only projects fields and
//! does case-insensitive substring filtering; it never assumes a schema.

mod source;

pub use source::{JsonFileSource, StaticSource};

use crate::config::DatasetSettings;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Resource name of the employee dataset
pub const EMPLOYEES: &str = "demo.emp";
/// Resource name of the sample patient dataset
pub const PATIENTS: &str = "demo.patients";

/// One row of a dataset
pub type TabularRecord = BTreeMap<String, Value>;

/// Failure to produce the rows of a dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset file not found: {0}")]
    NotFound(String),

    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed dataset {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Something that can produce the rows of one dataset
pub trait DataSource: Send + Sync {
    fn rows(&self) -> Result<Vec<TabularRecord>, DatasetError>;
}

/// A named dataset
#[derive(Clone)]
pub struct Dataset {
    pub name: String,
    pub description: String,
    source: Arc<dyn DataSource>,
}

impl Dataset {
    pub fn rows(&self) -> Result<Vec<TabularRecord>, DatasetError> {
        self.source.rows()
    }
}

/// Registry of datasets by resource name, in registration order
#[derive(Clone, Default)]
pub struct DatasetRegistry {
    datasets: Vec<Dataset>,
}

impl DatasetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard resources: employees from disk, patients in memory
    pub fn from_settings(settings: &DatasetSettings) -> Self {
        let mut registry = Self::new();
        registry.register(
            EMPLOYEES,
            "humc employee list",
            Arc::new(JsonFileSource::new(&settings.employees_path, settings.max_rows)),
        );
        registry.register(PATIENTS, "sample patients", Arc::new(StaticSource::patients()));
        registry
    }

    /// Register a dataset; a later registration under the same name wins
    pub fn register(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        source: Arc<dyn DataSource>,
    ) {
        let dataset = Dataset {
            name: name.into(),
            description: description.into(),
            source,
        };
        self.datasets.retain(|d| d.name != dataset.name);
        self.datasets.push(dataset);
    }

    pub fn get(&self, name: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dataset> {
        self.datasets.iter()
    }
}

/// Text of a cell for matching; `None` for null cells
pub fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Keep only the listed fields of each record
pub fn project(rows: Vec<TabularRecord>, fields: &[String]) -> Vec<TabularRecord> {
    rows.into_iter()
        .map(|row| {
            row.into_iter()
                .filter(|(k, _)| fields.contains(k))
                .collect()
        })
        .collect()
}

/// Records where any of `fields` (or any field when `None`) contains `needle`,
/// ignoring case
pub fn filter_rows(
    rows: Vec<TabularRecord>,
    needle: &str,
    fields: Option<&[String]>,
) -> Vec<TabularRecord> {
    let needle = needle.to_lowercase();

    rows.into_iter()
        .filter(|row| {
            let hit = |value: &Value| {
                cell_text(value).map_or(false, |text| text.to_lowercase().contains(&needle))
            };
            match fields {
                Some(fields) => fields.iter().filter_map(|f| row.get(f)).any(hit),
                None => row.values().any(hit),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> TabularRecord {
        serde_json::from_value(value).unwrap()
    }

    fn employees() -> Vec<TabularRecord> {
        vec![
            record(json!({"성명": "김민수", "부서": "영상의학과", "사번": 1001})),
            record(json!({"성명": "이영희", "부서": "김민수 팀", "사번": 1002})),
            record(json!({"성명": "박지성", "부서": null, "사번": 1003})),
        ]
    }

    #[test]
    fn test_filter_all_fields() {
        let rows = filter_rows(employees(), "김민수", None);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_filter_selected_fields() {
        let fields = vec!["성명".to_string()];
        let rows = filter_rows(employees(), "김민수", Some(fields.as_slice()));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["사번"], 1001);
    }

    #[test]
    fn test_filter_numbers_and_case() {
        assert_eq!(filter_rows(employees(), "1003", None).len(), 1);

        let rows = vec![record(json!({"name": "Kim"}))];
        assert_eq!(filter_rows(rows, "KIM", None).len(), 1);
    }

    #[test]
    fn test_project() {
        let fields = vec!["성명".to_string(), "없는필드".to_string()];
        let rows = project(employees(), &fields);
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[0]["성명"], "김민수");
    }

    #[test]
    fn test_standard_registry() {
        let registry = DatasetRegistry::from_settings(&DatasetSettings::default());
        let names: Vec<_> = registry.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec![EMPLOYEES, PATIENTS]);
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = DatasetRegistry::new();
        registry.register("demo.patients", "old", Arc::new(StaticSource::new(vec![])));
        registry.register("demo.patients", "sample patients", Arc::new(StaticSource::patients()));

        let dataset = registry.get("demo.patients").unwrap();
        assert_eq!(dataset.description, "sample patients");
        assert_eq!(dataset.rows().unwrap().len(), 2);
        assert_eq!(registry.iter().count(), 1);
        assert!(registry.get("demo.emp").is_none());
    }
}
