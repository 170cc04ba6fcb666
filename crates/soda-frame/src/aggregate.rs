//! Per-group summaries
//!
//! The classic "who got the most" table: group rows by a key column and
//! report the total, average and row count of a numeric column.

use polars::prelude::*;

use crate::error::{FrameError, FrameResult};

/// Summarize `value_col` per distinct `key_col`
///
/// Output columns: `key_col`, `sum`, `mean`, `size`. `sum` and `mean` are
/// rounded to whole numbers, `size` counts every row in the group (nulls
/// included). Rows are sorted by `sum` descending, ties broken by key.
///
/// `value_col` must already be numeric; see [`crate::cast_float`].
///
/// # Example
/// ```rust,no_run
/// use polars::prelude::*;
/// use soda_frame::summarize_by;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let df = DataFrame::new(vec![
///     Series::new("recipient".into(), vec!["A", "B", "A"]).into(),
///     Series::new("amount".into(), vec![100.0, 50.0, 20.0]).into(),
/// ])?;
///
/// let by_recipient = summarize_by(&df, "recipient", "amount")?;
/// println!("{}", by_recipient.head(Some(5)));
/// # Ok(())
/// # }
/// ```
pub fn summarize_by(df: &DataFrame, key_col: &str, value_col: &str) -> FrameResult<DataFrame> {
    if df.get_column_index(key_col).is_none() {
        return Err(FrameError::MissingColumn(key_col.to_string()));
    }
    let value_dtype = df
        .column(value_col)
        .map_err(|_| FrameError::MissingColumn(value_col.to_string()))?
        .dtype();
    if !(value_dtype.is_float() || value_dtype.is_integer()) {
        return Err(FrameError::InvalidColumn {
            column: value_col.to_string(),
            reason: format!("expected a numeric column, found {}", value_dtype),
        });
    }

    let summary = df
        .clone()
        .lazy()
        .group_by([col(key_col)])
        .agg([
            col(value_col).sum().alias("sum"),
            col(value_col).mean().alias("mean"),
            col(value_col).len().alias("size"),
        ])
        .with_columns([col("sum").round(0), col("mean").round(0)])
        .sort(
            [PlSmallStr::from("sum"), PlSmallStr::from(key_col)],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .collect()?;

    Ok(summary)
}
