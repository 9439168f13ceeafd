//! Organization store port definition.

use async_trait::async_trait;

use crate::domain::entities::{AwsCredentials, OrganizationId, SparseRecord};
use crate::domain::errors::StoreError;

/// Port for the remote organization table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrganizationStorePort: Send + Sync {
    /// Scans up to `limit` items in storage order.
    async fn scan(
        &self,
        credentials: &AwsCredentials,
        limit: u32,
    ) -> Result<Vec<SparseRecord>, StoreError>;

    /// Fetches one item by key.
    async fn get(
        &self,
        credentials: &AwsCredentials,
        id: &OrganizationId,
    ) -> Result<Option<SparseRecord>, StoreError>;

    /// Inserts or replaces an item by key.
    async fn put(&self, credentials: &AwsCredentials, item: &SparseRecord)
    -> Result<(), StoreError>;
}
