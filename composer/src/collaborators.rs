//! Interfaces of the services the composer drives.
//!
//! The composer receives every collaborator explicitly through
//! [`Collaborators`]; nothing is looked up from ambient state.

use std::sync::Arc;

use feed_composer_protocol::AnalyticsEvent;
use feed_composer_protocol::ContentEvent;
use feed_composer_protocol::CreateMessageParams;
use feed_composer_protocol::FeedStatus;
use feed_composer_protocol::NewUpload;
use feed_composer_protocol::UploadId;
use feed_composer_protocol::UploadRestrictions;

/// Publishes text messages to a workspace feed.
#[async_trait::async_trait]
pub trait PublishApi: Send + Sync {
    async fn create_message(&self, params: CreateMessageParams) -> anyhow::Result<()>;

    /// Record lifecycle telemetry. The call is not awaited, but an error
    /// raised while issuing it counts as a failed send.
    fn record_content_event(&self, event: ContentEvent) -> anyhow::Result<()>;
}

/// Stages files and uploads them as one batch.
#[async_trait::async_trait]
pub trait UploadClient: Send + Sync {
    /// Register a file for the next batch. `None` means no id was assigned.
    fn add_file(&self, upload: NewUpload) -> Option<UploadId>;

    fn remove_file(&self, id: &UploadId);

    /// Upload every registered file.
    async fn upload(&self) -> anyhow::Result<()>;

    fn set_options(&self, restrictions: UploadRestrictions);
}

/// The feed surrounding the composer.
pub trait FeedView: Send + Sync {
    /// Show a transient banner, or clear it with `None`.
    fn set_status(&self, status: Option<FeedStatus>);

    fn scroll_to_bottom(&self);
}

pub trait Analytics: Send + Sync {
    fn track(&self, event: AnalyticsEvent);
}

#[derive(Clone)]
pub struct Collaborators {
    pub publish: Arc<dyn PublishApi>,
    pub upload: Arc<dyn UploadClient>,
    pub feed: Arc<dyn FeedView>,
    pub analytics: Arc<dyn Analytics>,
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
