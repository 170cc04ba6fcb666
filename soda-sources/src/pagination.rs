//! Offset pagination over a [`RecordSource`]
//!
//! `fetch` issues exactly one request and the remote may cut the result
//! short. These helpers walk `$limit`/`$offset` pages until a short page.

use crate::error::{Result, SodaError};
use crate::query::SoqlQuery;
use crate::record::ResultSet;
use crate::traits::RecordSource;
use async_stream::stream;
use futures::stream::{Stream, StreamExt};
use std::pin::Pin;
use tracing::{debug, info, warn};

/// Page size Socrata applies when no `$limit` is given.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Streams pages of `page_size` rows.
///
/// Starts at the query's `$offset` (or 0). A `$limit` on the query caps the
/// total number of rows across all pages. A page longer than requested is cut
/// to the requested length. Stops after the first short page, or after
/// yielding the first error.
pub fn paginate<'a, S>(
    source: &'a S,
    dataset: &'a str,
    query: &SoqlQuery,
    page_size: usize,
) -> Pin<Box<dyn Stream<Item = Result<ResultSet>> + Send + 'a>>
where
    S: RecordSource + ?Sized,
{
    let base = query.clone();

    let s = stream! {
        if page_size == 0 {
            yield Err(SodaError::ConfigError("page_size must be > 0".to_string()));
        } else {
            let mut offset = base.offset.unwrap_or(0);
            let mut remaining = base.limit;
            let mut page_count = 0usize;

            loop {
                let want = remaining.map_or(page_size, |r| r.min(page_size));
                if want == 0 {
                    debug!("Row cap reached after {} pages", page_count);
                    break;
                }

                let page_query = base.clone().limit(want).offset(offset);
                match source.fetch_page(dataset, &page_query).await {
                    Ok(mut page) => {
                        if page.len() > want {
                            warn!("{}: asked for {} rows, got {} - dropping the extra", dataset, want, page.len());
                            page.truncate(want);
                        }

                        let rows = page.len();
                        if rows == 0 {
                            debug!("Empty page at offset {} - done", offset);
                            break;
                        }

                        page_count += 1;
                        info!("{}: page {} with {} rows at offset {}", dataset, page_count, rows, offset);
                        yield Ok(page);

                        if rows < want {
                            debug!("Last page - got {} rows < {}", rows, want);
                            break;
                        }

                        offset += rows;
                        remaining = remaining.map(|r| r.saturating_sub(rows));
                    }
                    Err(e) => {
                        yield Err(e);
                        break;
                    }
                }
            }
        }
    };

    Box::pin(s)
}

/// Drains a page stream into one `ResultSet`, failing on the first error.
pub async fn collect_pages<S>(mut pages: S) -> Result<ResultSet>
where
    S: Stream<Item = Result<ResultSet>> + Unpin,
{
    let mut all = ResultSet::default();
    while let Some(page) = pages.next().await {
        all.extend(page?);
    }
    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use serde_json::json;
    use std::future::Future;
    use std::sync::Mutex;

    /// In-memory dataset that honours `$limit`/`$offset`.
    struct FakeSource {
        rows: Vec<Record>,
        seen: Mutex<Vec<(Option<usize>, Option<usize>)>>,
        fail_at_offset: Option<usize>,
    }

    impl FakeSource {
        fn with_rows(n: usize) -> Self {
            let rows = (0..n)
                .map(|i| match json!({ "row": i.to_string() }) {
                    serde_json::Value::Object(m) => m,
                    _ => unreachable!(),
                })
                .collect();
            Self {
                rows,
                seen: Mutex::new(Vec::new()),
                fail_at_offset: None,
            }
        }

        fn requests(&self) -> Vec<(Option<usize>, Option<usize>)> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl RecordSource for FakeSource {
        fn fetch_page<'a>(
            &'a self,
            _dataset: &'a str,
            query: &'a SoqlQuery,
        ) -> Pin<Box<dyn Future<Output = Result<ResultSet>> + Send + 'a>> {
            Box::pin(async move {
                self.seen.lock().unwrap().push((query.limit, query.offset));
                let offset = query.offset.unwrap_or(0);
                if self.fail_at_offset == Some(offset) {
                    return Err(SodaError::RemoteError {
                        status: 500,
                        body: "boom".to_string(),
                    });
                }
                let end = (offset + query.limit.unwrap_or(DEFAULT_PAGE_SIZE)).min(self.rows.len());
                let start = offset.min(end);
                Ok(ResultSet::new(self.rows[start..end].to_vec()))
            })
        }
    }

    fn row_ids(rows: &ResultSet) -> Vec<String> {
        rows.iter()
            .map(|r| r["row"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_walks_pages_until_short_page() {
        let source = FakeSource::with_rows(25);
        let all = collect_pages(paginate(&source, "abcd-1234", &SoqlQuery::new(), 10))
            .await
            .unwrap();

        assert_eq!(all.len(), 25);
        assert_eq!(row_ids(&all)[0], "0");
        assert_eq!(row_ids(&all)[24], "24");
        assert_eq!(
            source.requests(),
            vec![(Some(10), Some(0)), (Some(10), Some(10)), (Some(10), Some(20))]
        );
    }

    #[tokio::test]
    async fn test_exact_multiple_ends_on_empty_page() {
        let source = FakeSource::with_rows(20);
        let pages: Vec<_> = paginate(&source, "abcd-1234", &SoqlQuery::new(), 10)
            .collect()
            .await;

        assert_eq!(pages.len(), 2);
        assert_eq!(source.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_query_limit_caps_total_rows() {
        let source = FakeSource::with_rows(100);
        let query = SoqlQuery::new().offset(5).limit(12);
        let all = collect_pages(paginate(&source, "abcd-1234", &query, 5))
            .await
            .unwrap();

        assert_eq!(all.len(), 12);
        assert_eq!(row_ids(&all).first().map(String::as_str), Some("5"));
        assert_eq!(
            source.requests(),
            vec![(Some(5), Some(5)), (Some(5), Some(10)), (Some(2), Some(15))]
        );
    }

    #[tokio::test]
    async fn test_error_is_yielded_then_stream_ends() {
        let mut source = FakeSource::with_rows(30);
        source.fail_at_offset = Some(10);

        let pages: Vec<_> = paginate(&source, "abcd-1234", &SoqlQuery::new(), 10)
            .collect()
            .await;
        assert_eq!(pages.len(), 2);
        assert!(pages[0].is_ok());
        assert_eq!(pages[1].as_ref().unwrap_err().status(), Some(500));

        let err = collect_pages(paginate(&source, "abcd-1234", &SoqlQuery::new(), 10))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    /// Answers every request with the same rows, whatever `$limit` says.
    struct IgnoresLimit {
        rows: Vec<Record>,
    }

    impl RecordSource for IgnoresLimit {
        fn fetch_page<'a>(
            &'a self,
            _dataset: &'a str,
            _query: &'a SoqlQuery,
        ) -> Pin<Box<dyn Future<Output = Result<ResultSet>> + Send + 'a>> {
            Box::pin(async move { Ok(ResultSet::new(self.rows.clone())) })
        }
    }

    #[tokio::test]
    async fn test_oversized_pages_respect_row_cap() {
        let source = IgnoresLimit {
            rows: FakeSource::with_rows(10).rows,
        };

        let all = collect_pages(paginate(&source, "abcd-1234", &SoqlQuery::new().limit(3), 5))
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(row_ids(&all), vec!["0", "1", "2"]);

        let all = collect_pages(paginate(&source, "abcd-1234", &SoqlQuery::new().limit(12), 5))
            .await
            .unwrap();
        assert_eq!(all.len(), 12);
    }

    #[tokio::test]
    async fn test_zero_page_size_is_rejected() {
        let source = FakeSource::with_rows(3);
        let err = collect_pages(paginate(&source, "abcd-1234", &SoqlQuery::new(), 0))
            .await
            .unwrap_err();
        assert!(matches!(err, SodaError::ConfigError(_)));
        assert!(source.requests().is_empty());
    }
}
