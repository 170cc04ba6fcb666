//! Dataset metadata (`/api/views/{id}.json`)

use serde::{Deserialize, Serialize};

/// Socrata column types that hold numbers but arrive as JSON strings.
const NUMERIC_TYPES: &[&str] = &["number", "money", "double", "percent"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetMetadata {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Unix seconds
    #[serde(default)]
    pub rows_updated_at: Option<i64>,
    #[serde(default)]
    pub columns: Vec<ColumnMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMetadata {
    /// Human readable name
    pub name: String,
    /// Key used in resource records
    pub field_name: String,
    pub data_type_name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl ColumnMetadata {
    pub fn is_numeric(&self) -> bool {
        NUMERIC_TYPES.contains(&self.data_type_name.as_str())
    }
}

impl DatasetMetadata {
    pub fn column(&self, field_name: &str) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| c.field_name == field_name)
    }

    pub fn numeric_fields(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.is_numeric())
            .map(|c| c.field_name.as_str())
            .collect()
    }
}
