//! Fail-soft organization CRUD.
//!
//! Every failure is logged and turned into an empty or absent result; views
//! never see store errors and nothing is retried.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::application::services::StoreContext;
use crate::domain::entities::{Organization, OrganizationId, sort_by_name};
use crate::domain::errors::StoreError;
use crate::domain::ports::OrganizationStorePort;

/// Maximum number of items fetched for the organization list.
pub const DEFAULT_SCAN_LIMIT: u32 = 50;

/// Organization reads and writes over a store port.
pub struct OrganizationService {
    store: Arc<dyn OrganizationStorePort>,
    context: Arc<StoreContext>,
    scan_limit: u32,
}

impl OrganizationService {
    /// Creates a service using [`DEFAULT_SCAN_LIMIT`].
    #[must_use]
    pub fn new(store: Arc<dyn OrganizationStorePort>, context: Arc<StoreContext>) -> Self {
        Self {
            store,
            context,
            scan_limit: DEFAULT_SCAN_LIMIT,
        }
    }

    /// Overrides the scan limit.
    #[must_use]
    pub const fn with_scan_limit(mut self, scan_limit: u32) -> Self {
        self.scan_limit = scan_limit;
        self
    }

    /// Lists up to the scan limit of organizations, sorted by name.
    ///
    /// The limit applies to the scan, before sorting. Returns an empty list
    /// on failure.
    pub async fn list_organizations(&self) -> Vec<Organization> {
        match self.try_list().await {
            Ok(organizations) => {
                info!(count = organizations.len(), "Organizations loaded");
                organizations
            }
            Err(e) => {
                error!(error = %e, "Failed to list organizations");
                Vec::new()
            }
        }
    }

    /// Fetches one organization. Returns `None` when absent or on failure.
    pub async fn get_organization(&self, id: &OrganizationId) -> Option<Organization> {
        match self.try_get(id).await {
            Ok(Some(organization)) => Some(organization),
            Ok(None) => {
                warn!(id = %id, "Organization not found");
                None
            }
            Err(e) => {
                error!(id = %id, error = %e, "Failed to fetch organization");
                None
            }
        }
    }

    /// Upserts `organization`, leaving out empty fields. Failures are logged.
    pub async fn save_organization(&self, organization: &Organization) {
        match self.try_save(organization).await {
            Ok(()) => info!(id = %organization.id, "Organization saved"),
            Err(e) => error!(id = %organization.id, error = %e, "Failed to save organization"),
        }
    }

    async fn try_list(&self) -> Result<Vec<Organization>, StoreError> {
        let credentials = self.context.credentials().await?;
        debug!(limit = self.scan_limit, "Scanning organizations");
        let items = self.store.scan(credentials, self.scan_limit).await?;

        let mut organizations: Vec<_> = items.iter().map(Organization::from_sparse).collect();
        sort_by_name(&mut organizations);
        Ok(organizations)
    }

    async fn try_get(&self, id: &OrganizationId) -> Result<Option<Organization>, StoreError> {
        let credentials = self.context.credentials().await?;
        debug!(id = %id, "Fetching organization");
        let item = self.store.get(credentials, id).await?;
        Ok(item.as_ref().map(Organization::from_sparse))
    }

    async fn try_save(&self, organization: &Organization) -> Result<(), StoreError> {
        let credentials = self.context.credentials().await?;
        let item = organization.to_sparse();
        debug!(id = %organization.id, attributes = item.len(), "Saving organization");
        self.store.put(credentials, &item).await
    }
}
