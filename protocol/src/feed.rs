//! Payloads exchanged with the feed backend, the feed view and analytics.

use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;

use crate::ContentId;
use crate::GroupId;

/// The feed a composer is currently attached to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedContext {
    pub workspace_id: String,
    pub feed_id: String,
    pub preferred_language: Option<String>,
    /// Messages posted to a silent feed are delivered without audio playback.
    #[serde(default)]
    pub is_silent: bool,
    /// Limited workspace members cannot use templates or fleet messages.
    #[serde(default)]
    pub limited_member: bool,
}

/// Arguments of a publish-to-feed call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageParams {
    pub workspace_id: String,
    pub feed_id: String,
    pub content_id: ContentId,
    pub group_id: GroupId,
    pub text: String,
    pub preferred_language: Option<String>,
    pub is_silent: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ContentStep {
    ClientUploading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ContentStatus {
    Started,
    Finished,
    Failed,
}

/// Lifecycle telemetry for one send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentEvent {
    pub workspace_id: String,
    pub content_id: ContentId,
    pub step: ContentStep,
    pub status: ContentStatus,
    pub feed_id: String,
    pub context: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Info,
    Error,
}

/// Transient banner shown above the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedStatus {
    pub message: String,
    pub severity: Severity,
}

impl FeedStatus {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Info,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalyticsEvent {
    MessageSend,
    OpenFleetMessage { workspace_id: String },
}
