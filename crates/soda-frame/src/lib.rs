//! Socrata result sets as Polars DataFrames
//!
//! Turns the records returned by [`soda_sources`] into a [`DataFrame`] and
//! provides the handful of aggregations used when exploring open data:
//!
//! - **Materialization**: [`to_dataframe`], [`fetch_frame`]
//! - **Typing**: [`cast_float`], [`cast_numeric_columns`] (Socrata ships
//!   numbers as strings)
//! - **Group summaries**: [`summarize_by`] (sum / mean / size per key)
//! - **Pattern shares**: [`match_share`], [`compare_match_shares`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use soda_frame::{cast_float, summarize_by, to_dataframe};
//! use soda_sources::ResultSet;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let rows = ResultSet::from_json(r#"[{"recipient":"A","amount":"100"}]"#)?;
//! let df = cast_float(&to_dataframe(&rows)?, "amount")?;
//! let by_recipient = summarize_by(&df, "recipient", "amount")?;
//! # Ok(())
//! # }
//! ```
//!
//! [`DataFrame`]: polars::prelude::DataFrame

mod aggregate;
mod error;
mod frame;
mod matching;

pub use aggregate::summarize_by;
pub use error::{FrameError, FrameResult};
pub use frame::{cast_float, cast_numeric_columns, fetch_frame, to_dataframe};
pub use matching::{compare_match_shares, match_share, MatchShare};
