//! Synchronous facade over [`crate::ResourceClient`]
//!
//! Each call blocks the current thread on a private current-thread runtime.
//! Do not call these from inside an async context.

use crate::client::{ClientConfig, ResourceClient as AsyncResourceClient};
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::metadata::DatasetMetadata;
use crate::query::SoqlQuery;
use crate::record::ResultSet;
use tokio::runtime::{Builder, Runtime};

pub struct ResourceClient {
    inner: AsyncResourceClient,
    runtime: Runtime,
}

impl ResourceClient {
    pub fn new(endpoint: Endpoint, config: ClientConfig) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let inner = {
            let _guard = runtime.enter();
            AsyncResourceClient::new(endpoint, config)?
        };
        Ok(Self { inner, runtime })
    }

    pub fn with_defaults(endpoint: Endpoint) -> Result<Self> {
        Self::new(endpoint, ClientConfig::default())
    }

    pub fn host(&self) -> &str {
        self.inner.host()
    }

    pub fn has_token(&self) -> bool {
        self.inner.has_token()
    }

    pub fn uri_prefix(&self) -> &str {
        self.inner.uri_prefix()
    }

    /// The wrapped async client
    pub fn inner(&self) -> &AsyncResourceClient {
        &self.inner
    }

    pub fn fetch(&self, dataset: &str, query: &SoqlQuery) -> Result<ResultSet> {
        self.runtime.block_on(self.inner.fetch(dataset, query))
    }

    pub fn fetch_metadata(&self, dataset: &str) -> Result<DatasetMetadata> {
        self.runtime.block_on(self.inner.fetch_metadata(dataset))
    }

    pub fn fetch_all(&self, dataset: &str, query: &SoqlQuery, page_size: usize) -> Result<ResultSet> {
        self.runtime
            .block_on(self.inner.fetch_all(dataset, query, page_size))
    }
}

impl std::fmt::Debug for ResourceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("blocking::ResourceClient")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}
