//! Records and result sets as delivered by the remote

use crate::error::{Result, SodaError};
use serde_json::Value;

/// One row: field name to value, in the order the remote sent the fields.
pub type Record = serde_json::Map<String, Value>;

/// Ordered records returned by one fetch.
///
/// The remote may cap the number of rows it returns without saying so, so a
/// `ResultSet` is not necessarily the whole dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    records: Vec<Record>,
}

impl ResultSet {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Decodes a response body. Anything other than a JSON array of objects
    /// is a [`SodaError::DecodeError`].
    pub fn from_json(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(SodaError::DecodeError(format!(
                    "expected a JSON array of records, got {}",
                    json_kind(&other)
                )))
            }
        };

        let records = items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| match item {
                Value::Object(record) => Ok(record),
                other => Err(SodaError::DecodeError(format!(
                    "record {} is {}, expected an object",
                    idx,
                    json_kind(&other)
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Keeps the first `len` records.
    pub fn truncate(&mut self, len: usize) {
        self.records.truncate(len);
    }

    /// Appends the records of another page.
    pub fn extend(&mut self, other: ResultSet) {
        self.records.extend(other.records);
    }

    /// Field names across all records, in first-seen order.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for record in &self.records {
            for key in record.keys() {
                if !names.contains(&key.as_str()) {
                    names.push(key.as_str());
                }
            }
        }
        names
    }

    /// Values of one field, `None` where a record lacks it.
    pub fn column(&self, field: &str) -> Vec<Option<&Value>> {
        self.records.iter().map(|r| r.get(field)).collect()
    }
}

impl IntoIterator for ResultSet {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
