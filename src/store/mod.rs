//! Record store adapters module

pub mod http;
pub mod types;

use crate::error::Result;
use async_trait::async_trait;
use types::{Bill, Product};

pub use http::HttpRecordStore;

/// Read operations against the remote product/bill store.
///
/// Both calls authenticate with an opaque bearer token supplied per call.
/// Failures are transport or authorization errors; callers that feed the
/// aggregator degrade a failed collection to empty instead of aborting.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch the current product list
    async fn list_products(&self, auth_token: &str) -> Result<Vec<Product>>;

    /// Fetch the bill history
    async fn list_bills(&self, auth_token: &str) -> Result<Vec<Bill>>;
}
