//! Server host for transport-agnostic API exposure
//!
//! `ServerHost` holds the state behind the configuration endpoints and runs
//! the two service operations, submit and list, independently of HTTP. The
//! REST exposure only translates requests and results.

use crate::config::MailConfig;
use crate::core::{
    ApiError, ConfigurationDraft, ConfigurationListing, ConfigurationStore, Pagination,
    StoredConfiguration, parse_configuration,
};
use crate::notify::{BranchEmail, Mailer};
use std::sync::Arc;

/// Title of every listing response
pub const LISTING_TITLE: &str = "Configurations";

/// Host context containing the service state
///
/// # Example
///
/// ```rust,ignore
/// let host = ServerHost::new(
///     Arc::new(InMemoryConfigurationStore::new()),
///     Arc::new(LogMailer),
///     MailConfig::default(),
/// );
///
/// let app = RestExposure::build_router(Arc::new(host));
/// ```
pub struct ServerHost {
    /// Where validated configurations are persisted
    pub store: Arc<dyn ConfigurationStore>,

    /// Delivers the branch notification after each insert
    pub mailer: Arc<dyn Mailer>,

    /// Sender and branch addressing for notifications
    pub mail: MailConfig,
}

impl ServerHost {
    pub fn new(
        store: Arc<dyn ConfigurationStore>,
        mailer: Arc<dyn Mailer>,
        mail: MailConfig,
    ) -> Self {
        Self {
            store,
            mailer,
            mail,
        }
    }

    /// Validate, persist and announce a submitted draft
    ///
    /// Nothing is stored when validation fails. A failed notification is
    /// logged and does not affect the result.
    pub async fn submit_configuration(
        &self,
        draft: &ConfigurationDraft,
    ) -> Result<StoredConfiguration, ApiError> {
        let configuration = parse_configuration(draft).map_err(|errors| {
            tracing::debug!(fields = errors.len(), "configuration rejected");
            ApiError::Validation(errors)
        })?;

        let record = self
            .store
            .insert(configuration)
            .await
            .map_err(ApiError::Storage)?;

        tracing::info!(
            id = %record.id,
            branch = %record.configuration.branch,
            "configuration stored"
        );

        self.notify_branch(&record).await;

        Ok(record)
    }

    /// One page of stored configurations, oldest first
    pub async fn list_configurations(
        &self,
        page: usize,
        page_size: usize,
    ) -> Result<ConfigurationListing, ApiError> {
        let total = self.store.count().await.map_err(ApiError::Storage)?;
        let pagination = Pagination::new(page, page_size, total);

        let configurations = self
            .store
            .page(pagination.offset, pagination.page_size)
            .await
            .map_err(ApiError::Storage)?;

        Ok(ConfigurationListing {
            title: LISTING_TITLE.to_string(),
            configurations,
            pagination,
        })
    }

    async fn notify_branch(&self, record: &StoredConfiguration) {
        let email = BranchEmail::for_configuration(record, &self.mail);

        if let Err(e) = self.mailer.send(&email).await {
            tracing::error!(
                id = %record.id,
                to = %email.to,
                error = %e,
                "branch notification failed"
            );
        }
    }
}
