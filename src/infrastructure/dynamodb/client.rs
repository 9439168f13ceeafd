//! DynamoDB client for the organization table.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::retry::RetryConfig;
use aws_sdk_dynamodb::config::timeout::TimeoutConfig;
use aws_sdk_dynamodb::config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::types::AttributeValue;
use tracing::{debug, warn};
use url::Url;

use super::item::{item_to_record, record_to_item};
use crate::domain::entities::{AwsCredentials, Organization, OrganizationId, SparseRecord};
use crate::domain::errors::StoreError;
use crate::domain::ports::OrganizationStorePort;

/// Table holding organization records.
pub const DEFAULT_TABLE_NAME: &str = "theatredb.organizations";

const PROVIDER_NAME: &str = "theatredb";
const OPERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// DynamoDB client bound to one table.
///
/// The SDK client is rebuilt only when the credentials passed in change.
pub struct DynamoDbClient {
    region: String,
    endpoint: Option<Url>,
    table_name: String,
    cached: Mutex<Option<(AwsCredentials, Client)>>,
}

impl DynamoDbClient {
    /// Creates a client for the regional AWS endpoint.
    #[must_use]
    pub fn new(region: &str, table_name: impl Into<String>) -> Self {
        Self {
            region: region.to_string(),
            endpoint: None,
            table_name: table_name.into(),
            cached: Mutex::new(None),
        }
    }

    /// Creates a client for a custom endpoint, e.g. a local DynamoDB.
    ///
    /// # Errors
    /// Returns error if the endpoint is not a valid URL.
    pub fn with_endpoint(
        endpoint: &str,
        region: &str,
        table_name: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| StoreError::unexpected(format!("invalid endpoint {endpoint}: {e}")))?;
        Ok(Self {
            endpoint: Some(endpoint),
            ..Self::new(region, table_name)
        })
    }

    /// Table this client reads and writes.
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Endpoint override, if any.
    #[must_use]
    pub fn endpoint(&self) -> Option<&Url> {
        self.endpoint.as_ref()
    }

    /// Region requests are signed for.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    fn client(&self, credentials: &AwsCredentials) -> Client {
        let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((_, client)) = cached.as_ref().filter(|(known, _)| known == credentials) {
            return client.clone();
        }

        debug!(access_key = %credentials, region = %self.region, "Building store client");
        let client = Client::from_conf(self.sdk_config(credentials));
        *cached = Some((credentials.clone(), client.clone()));
        client
    }

    fn sdk_config(&self, credentials: &AwsCredentials) -> aws_sdk_dynamodb::Config {
        let provider = Credentials::new(
            credentials.access_key_id(),
            credentials.secret_access_key(),
            credentials.session_token().map(str::to_string),
            None,
            PROVIDER_NAME,
        );
        let mut builder = aws_sdk_dynamodb::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .credentials_provider(provider)
            .retry_config(RetryConfig::disabled())
            .timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(OPERATION_TIMEOUT)
                    .build(),
            );
        if let Some(endpoint) = &self.endpoint {
            builder = builder.endpoint_url(endpoint.as_str());
        }
        builder.build()
    }
}

/// Maps an SDK failure onto the store's error kinds.
fn map_sdk_error<E>(operation: &str, err: SdkError<E>) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    warn!(operation, error = %DisplayErrorContext(&err), "Store request failed");
    let status = err.raw_response().map(|raw| raw.status());

    match err {
        SdkError::TimeoutError(_) => StoreError::network("request timed out"),
        SdkError::DispatchFailure(failure) => {
            if failure.is_timeout() {
                StoreError::network("request timed out")
            } else if failure.is_io() {
                StoreError::network("failed to connect to store")
            } else {
                StoreError::network(
                    failure
                        .as_connector_error()
                        .map_or_else(|| "request dispatch failed".to_string(), ToString::to_string),
                )
            }
        }
        response @ SdkError::ResponseError(_) => StoreError::malformed(
            response
                .into_source()
                .map_or_else(|err| err.to_string(), |source| source.to_string()),
        ),
        SdkError::ServiceError(service) => {
            let err = service.into_err();
            match status {
                // Undecodable success bodies surface as unhandled service errors.
                Some(status) if status.is_success() => {
                    StoreError::malformed(DisplayErrorContext(&err).to_string())
                }
                _ => StoreError::service(
                    status.map_or(0, |s| s.as_u16()),
                    err.code().unwrap_or("Unknown"),
                    err.message().unwrap_or_default(),
                ),
            }
        }
        other => StoreError::unexpected(DisplayErrorContext(&other).to_string()),
    }
}

#[async_trait]
impl OrganizationStorePort for DynamoDbClient {
    async fn scan(
        &self,
        credentials: &AwsCredentials,
        limit: u32,
    ) -> Result<Vec<SparseRecord>, StoreError> {
        let output = self
            .client(credentials)
            .scan()
            .table_name(&self.table_name)
            .limit(i32::try_from(limit).unwrap_or(i32::MAX))
            .send()
            .await
            .map_err(|e| map_sdk_error("Scan", e))?;

        debug!(count = output.items().len(), "Scan complete");
        Ok(output.items().iter().map(item_to_record).collect())
    }

    async fn get(
        &self,
        credentials: &AwsCredentials,
        id: &OrganizationId,
    ) -> Result<Option<SparseRecord>, StoreError> {
        if id.is_empty() {
            return Err(StoreError::missing_key(Organization::KEY_ATTRIBUTE));
        }

        let output = self
            .client(credentials)
            .get_item()
            .table_name(&self.table_name)
            .key(
                Organization::KEY_ATTRIBUTE,
                AttributeValue::S(id.as_str().to_string()),
            )
            .send()
            .await
            .map_err(|e| map_sdk_error("GetItem", e))?;

        Ok(output.item().map(item_to_record))
    }

    async fn put(
        &self,
        credentials: &AwsCredentials,
        item: &SparseRecord,
    ) -> Result<(), StoreError> {
        if !item.contains(Organization::KEY_ATTRIBUTE) {
            return Err(StoreError::missing_key(Organization::KEY_ATTRIBUTE));
        }

        self.client(credentials)
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(record_to_item(item)))
            .send()
            .await
            .map_err(|e| map_sdk_error("PutItem", e))?;
        Ok(())
    }
}
