//! Share of rows whose text matches a pattern
//!
//! Used to compare two datasets that describe the same thing with
//! different column names, e.g. how many 311 complaints mention trees.

use polars::prelude::*;
use regex::Regex;

use crate::error::{FrameError, FrameResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchShare {
    pub matched: u64,
    pub unmatched: u64,
    /// Null cells; not part of the share
    pub missing: u64,
}

impl MatchShare {
    /// `matched / (matched + unmatched)`, 0.0 when there is nothing to compare
    pub fn matched_share(&self) -> f64 {
        let total = self.matched + self.unmatched;
        if total == 0 {
            0.0
        } else {
            self.matched as f64 / total as f64
        }
    }
}

fn count_matches(df: &DataFrame, column: &str, re: &Regex) -> FrameResult<MatchShare> {
    let series = df
        .column(column)
        .map_err(|_| FrameError::MissingColumn(column.to_string()))?
        .as_materialized_series();
    let text = series.str().map_err(|_| FrameError::InvalidColumn {
        column: column.to_string(),
        reason: format!("expected a text column, found {}", series.dtype()),
    })?;

    let mut share = MatchShare::default();
    for value in text.into_iter() {
        match value {
            Some(s) if re.is_match(s) => share.matched += 1,
            Some(_) => share.unmatched += 1,
            None => share.missing += 1,
        }
    }
    Ok(share)
}

/// Count rows of `column` matching the regex `pattern`
pub fn match_share(df: &DataFrame, column: &str, pattern: &str) -> FrameResult<MatchShare> {
    let re = Regex::new(pattern)?;
    count_matches(df, column, &re)
}

/// Compare match shares across labelled frames
///
/// Each source is `(label, frame, text column)`. Output columns: `source`,
/// `matched`, `unmatched`, `share` (rounded to two decimals), one row per
/// source in input order.
pub fn compare_match_shares(
    sources: &[(&str, &DataFrame, &str)],
    pattern: &str,
) -> FrameResult<DataFrame> {
    let re = Regex::new(pattern)?;

    let mut labels = Vec::with_capacity(sources.len());
    let mut matched = Vec::with_capacity(sources.len());
    let mut unmatched = Vec::with_capacity(sources.len());
    let mut shares = Vec::with_capacity(sources.len());

    for (label, df, column) in sources {
        let share = count_matches(df, column, &re)?;
        labels.push(label.to_string());
        matched.push(share.matched);
        unmatched.push(share.unmatched);
        shares.push((share.matched_share() * 100.0).round() / 100.0);
    }

    Ok(DataFrame::new(vec![
        Series::new("source".into(), labels).into(),
        Series::new("matched".into(), matched).into(),
        Series::new("unmatched".into(), unmatched).into(),
        Series::new("share".into(), shares).into(),
    ])?)
}
