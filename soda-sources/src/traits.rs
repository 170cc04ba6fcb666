//! Trait definitions for record sources

use crate::error::Result;
use crate::query::SoqlQuery;
use crate::record::ResultSet;
use std::future::Future;
use std::pin::Pin;

/// Anything that can answer a single fetch for a dataset.
///
/// Pagination is written against this trait rather than the HTTP client.
pub trait RecordSource: Send + Sync {
    fn fetch_page<'a>(
        &'a self,
        dataset: &'a str,
        query: &'a SoqlQuery,
    ) -> Pin<Box<dyn Future<Output = Result<ResultSet>> + Send + 'a>>;
}
