//! ResultSet to DataFrame conversion and column typing

use polars::prelude::*;
use serde_json::Value;
use soda_sources::{DatasetMetadata, ResourceClient, ResultSet, SoqlQuery};
use tracing::debug;

use crate::error::{FrameError, FrameResult};

/// Inferred column kind: the narrowest type every non-null value fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Boolean,
    Float,
    Text,
}

fn infer_kind(values: &[Option<&Value>]) -> ColumnKind {
    let mut non_null = values.iter().flatten().filter(|v| !v.is_null()).peekable();
    if non_null.peek().is_none() {
        return ColumnKind::Text;
    }

    let mut all_bool = true;
    let mut all_number = true;
    for value in non_null {
        all_bool &= value.is_boolean();
        all_number &= value.is_number();
    }

    if all_bool {
        ColumnKind::Boolean
    } else if all_number {
        ColumnKind::Float
    } else {
        ColumnKind::Text
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Convert a [`ResultSet`] into a DataFrame
///
/// Columns are the union of all record fields in first-seen order. A record
/// missing a field gets a null there. Columns where every value is a JSON
/// bool become Boolean, all numbers become Float64, anything else is String
/// (nested values are kept as their JSON text).
///
/// # Example
/// ```rust
/// use soda_frame::to_dataframe;
/// use soda_sources::ResultSet;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let rows = ResultSet::from_json(r#"[{"recipient":"A","amount":"100"},{"recipient":"B"}]"#)?;
/// let df = to_dataframe(&rows)?;
/// assert_eq!(df.shape(), (2, 2));
/// # Ok(())
/// # }
/// ```
pub fn to_dataframe(rows: &ResultSet) -> FrameResult<DataFrame> {
    let fields = rows.field_names();
    let mut columns: Vec<Column> = Vec::with_capacity(fields.len());

    for field in fields {
        let values = rows.column(field);
        let name: PlSmallStr = field.into();

        let series = match infer_kind(&values) {
            ColumnKind::Boolean => {
                let data: Vec<Option<bool>> =
                    values.iter().map(|v| v.and_then(Value::as_bool)).collect();
                Series::new(name, data)
            }
            ColumnKind::Float => {
                let data: Vec<Option<f64>> =
                    values.iter().map(|v| v.and_then(Value::as_f64)).collect();
                Series::new(name, data)
            }
            ColumnKind::Text => {
                let data: Vec<Option<String>> =
                    values.iter().map(|v| v.and_then(text_of)).collect();
                Series::new(name, data)
            }
        };
        columns.push(series.into());
    }

    let df = DataFrame::new(columns)?;
    debug!("Materialized {} rows x {} columns", df.height(), df.width());
    Ok(df)
}

/// Fetch `dataset` and materialize it in one step.
pub async fn fetch_frame(
    client: &ResourceClient,
    dataset: &str,
    query: &SoqlQuery,
) -> FrameResult<DataFrame> {
    let rows = client.fetch(dataset, query).await?;
    to_dataframe(&rows)
}

/// Parse a column as Float64
///
/// Socrata serializes numbers as strings. A value that does not parse is an
/// error rather than a silent null.
pub fn cast_float(df: &DataFrame, column: &str) -> FrameResult<DataFrame> {
    let current = df
        .column(column)
        .map_err(|_| FrameError::MissingColumn(column.to_string()))?;

    if current.dtype() == &DataType::Float64 {
        return Ok(df.clone());
    }

    let cast = current
        .as_materialized_series()
        .strict_cast(&DataType::Float64)
        .map_err(|e| FrameError::InvalidColumn {
            column: column.to_string(),
            reason: e.to_string(),
        })?;

    let mut result = df.clone();
    result.with_column(cast)?;
    Ok(result)
}

/// Cast every column the dataset metadata declares numeric.
///
/// Declared columns absent from the frame are skipped.
pub fn cast_numeric_columns(df: &DataFrame, metadata: &DatasetMetadata) -> FrameResult<DataFrame> {
    let mut result = df.clone();
    for field in metadata.numeric_fields() {
        if result.get_column_index(field).is_some() {
            result = cast_float(&result, field)?;
        }
    }
    Ok(result)
}
