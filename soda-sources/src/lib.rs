//! Socrata Open Data (SODA) Sources
//! ================================
//!
//! Read-only access to Socrata-hosted datasets:
//! - one-request fetches of `/resource/{id}.json` with optional app token
//! - SoQL options (`$select`, `$where`, `$limit`, ...) and equality filters
//! - opt-in bounded retry and client-side rate limiting
//! - opt-in offset pagination for datasets larger than one response
//! - dataset metadata lookups
//! - a blocking facade for synchronous callers
//!
//! ```rust,no_run
//! use soda_sources::{Endpoint, ResourceClient, SoqlQuery};
//!
//! # async fn run() -> soda_sources::Result<()> {
//! let client = ResourceClient::with_defaults(Endpoint::from_env("opendata.socrata.com"))?;
//! let rows = client.fetch("f92i-ik66", &SoqlQuery::new().limit(10)).await?;
//! println!("{} rows", rows.len());
//! # Ok(())
//! # }
//! ```

pub mod blocking;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod metadata;
pub mod pagination;
pub mod query;
pub mod rate_limiter;
pub mod record;
pub mod retry;
pub mod traits;

pub use client::{ClientConfig, ResourceClient, APP_TOKEN_HEADER, DEFAULT_URI_PREFIX};
pub use endpoint::{Endpoint, APP_TOKEN_ENV};
pub use error::{Result, SodaError};
pub use metadata::{ColumnMetadata, DatasetMetadata};
pub use pagination::{collect_pages, paginate, DEFAULT_PAGE_SIZE};
pub use query::SoqlQuery;
pub use rate_limiter::{RateLimiter, RateLimiterConfig};
pub use record::{Record, ResultSet};
pub use retry::RetryPolicy;
pub use traits::RecordSource;
