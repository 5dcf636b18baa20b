//! Submission lifecycle.
//!
//! `Idle -> Sending -> Idle`. Leaving `Sending` always goes through
//! [`Composer::reset`], which runs synchronously whether the send succeeded
//! or failed.

use derive_more::IsVariant;
use feed_composer_protocol::AnalyticsEvent;
use feed_composer_protocol::ContentEvent;
use feed_composer_protocol::ContentId;
use feed_composer_protocol::ContentStatus;
use feed_composer_protocol::ContentStep;
use feed_composer_protocol::CreateMessageParams;
use feed_composer_protocol::FeedStatus;
use feed_composer_protocol::GroupId;
use feed_composer_protocol::UploadRestrictions;

use super::Composer;
use crate::error::ComposerError;
use crate::error::Result;

const SENDING_STATUS: &str = "Sending message...";
const FAILED_STATUS: &str = "Failed to send message";

#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum SubmissionState {
    Idle,
    Sending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    /// The draft failed the guard or the composer is disabled. Nothing changed.
    Rejected,
}

impl Composer {
    /// Send the draft text and the staged attachments as one group.
    ///
    /// The text is published before the attachments start uploading. On
    /// failure the composer still resets, then returns the error.
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        if self.is_disabled() || !self.can_send() {
            return Ok(SubmitOutcome::Rejected);
        }

        self.state = SubmissionState::Sending;
        let content_id = ContentId::new();
        let text = self.text.current().to_string();
        tracing::debug!(
            %content_id,
            group_id = %self.group_id,
            chars = self.char_count(),
            attachments = self.attachments.len(),
            "sending message"
        );

        match self.send(content_id, &text).await {
            Ok(()) => {
                self.collaborators.feed.set_status(None);
                self.collaborators.feed.scroll_to_bottom();
                self.reset();
                Ok(SubmitOutcome::Sent)
            }
            Err(err) => {
                tracing::warn!(%content_id, "failed to send message: {err:#}");
                self.collaborators
                    .feed
                    .set_status(Some(FeedStatus::error(FAILED_STATUS)));
                let failed = self.content_event(
                    content_id,
                    ContentStatus::Failed,
                    &text,
                    Some(format!("{err:#}")),
                );
                if let Err(record_err) = self.collaborators.publish.record_content_event(failed) {
                    tracing::warn!(%content_id, "failed to record send failure: {record_err:#}");
                }
                self.reset();
                Err(ComposerError::Send { source: err })
            }
        }
    }

    async fn send(&self, content_id: ContentId, text: &str) -> anyhow::Result<()> {
        let publish = &self.collaborators.publish;
        self.collaborators
            .feed
            .set_status(Some(FeedStatus::info(SENDING_STATUS)));

        if !text.is_empty() {
            self.collaborators
                .analytics
                .track(AnalyticsEvent::MessageSend);
            publish.record_content_event(self.content_event(
                content_id,
                ContentStatus::Started,
                text,
                None,
            ))?;
            publish
                .create_message(CreateMessageParams {
                    workspace_id: self.feed.workspace_id.clone(),
                    feed_id: self.feed.feed_id.clone(),
                    content_id,
                    group_id: self.group_id,
                    text: text.to_string(),
                    preferred_language: self.feed.preferred_language.clone(),
                    is_silent: self.feed.is_silent,
                })
                .await?;
            publish.record_content_event(self.content_event(
                content_id,
                ContentStatus::Finished,
                text,
                None,
            ))?;
        }

        if !self.attachments.is_empty() {
            self.collaborators.upload.upload().await?;
        }
        Ok(())
    }

    /// Return to an empty draft with a fresh group.
    fn reset(&mut self) {
        self.state = SubmissionState::Idle;
        self.text.clear();
        self.attachments.clear();
        self.collaborators
            .upload
            .set_options(UploadRestrictions::SINGLE_FILE);
        self.group_id = GroupId::new();
        self.request_focus();
    }

    fn content_event(
        &self,
        content_id: ContentId,
        status: ContentStatus,
        text: &str,
        error: Option<String>,
    ) -> ContentEvent {
        ContentEvent {
            workspace_id: self.feed.workspace_id.clone(),
            content_id,
            step: ContentStep::ClientUploading,
            status,
            feed_id: self.feed.feed_id.clone(),
            context: format!("tts_message, characterLength: {}", text.chars().count()),
            error,
        }
    }
}
