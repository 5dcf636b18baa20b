//! The composer is the message-composition state machine that sits under a
//! feed.
//!
//! It is responsible for:
//!
//! - Editing the text buffer through an undo/redo history ([`TextHistory`]).
//! - Staging pasted, dropped and picked files ([`AttachmentList`]).
//! - Turning paste and drop transfers into text splices or staged files.
//! - Submitting the text and the staged files as one group, then resetting.
//!
//! # Key Event Routing
//!
//! [`Composer::handle_key_event`] checks the undo/redo chords first
//! (<kbd>Ctrl</kbd>/<kbd>Cmd</kbd>+<kbd>Z</kbd> and
//! <kbd>Ctrl</kbd>/<kbd>Cmd</kbd>+<kbd>Shift</kbd>+<kbd>Z</kbd>). Only then
//! does <kbd>Enter</kbd> submit. <kbd>Shift</kbd>+<kbd>Enter</kbd> is left
//! to the text control so it can insert a newline.
//!
//! # Disabled Mode
//!
//! While a submission is in flight, or while the host sets
//! `disable_controls`, every mutating operation is ignored. Reset at the end
//! of a submission is the only transition that still runs.
//!
//! # Presentation
//!
//! Focus and caret placement belong to whichever layer owns the text control.
//! The composer asks for them through [`ComposerEvent`]s instead of touching
//! the control.

mod ingest;
mod submission;

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use feed_composer_protocol::AnalyticsEvent;
use feed_composer_protocol::FeedContext;
use feed_composer_protocol::FileBlob;
use feed_composer_protocol::GroupId;

use crate::attachments::Attachment;
use crate::attachments::AttachmentList;
use crate::collaborators::Collaborators;
use crate::composer_event::ComposerEvent;
use crate::composer_event::ComposerEventSender;
use crate::config::ComposerConfig;
use crate::error::Result;
use crate::text_history::TextHistory;

pub use ingest::DroppedItem;
pub use ingest::PasteOutcome;
pub use submission::SubmissionState;
pub use submission::SubmitOutcome;

/// Result of routing a key press through the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Enter was consumed; the submission either ran or was rejected.
    Submit(SubmitOutcome),
    Undo,
    Redo,
    /// The key is not the composer's to handle.
    Ignored,
}

pub struct Composer {
    config: ComposerConfig,
    accepted_mime_types: Vec<String>,
    collaborators: Collaborators,
    events: ComposerEventSender,
    feed: FeedContext,
    text: TextHistory,
    attachments: AttachmentList,
    group_id: GroupId,
    state: SubmissionState,
    /// Set by the host to lock the composer independently of submissions.
    disable_controls: bool,
}

impl Composer {
    pub fn new(
        config: ComposerConfig,
        feed: FeedContext,
        collaborators: Collaborators,
        events: ComposerEventSender,
    ) -> Self {
        Self {
            accepted_mime_types: config.accepted_mime_types(),
            text: TextHistory::new(config.history_depth),
            config,
            collaborators,
            events,
            feed,
            attachments: AttachmentList::default(),
            group_id: GroupId::new(),
            state: SubmissionState::Idle,
            disable_controls: false,
        }
    }

    pub fn text(&self) -> &str {
        self.text.current()
    }

    pub fn attachments(&self) -> &AttachmentList {
        &self.attachments
    }

    pub fn group_id(&self) -> GroupId {
        self.group_id
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_sending()
    }

    /// Whether mutating operations are currently ignored.
    pub fn is_disabled(&self) -> bool {
        self.is_busy() || self.disable_controls
    }

    pub fn set_disable_controls(&mut self, disabled: bool) {
        self.disable_controls = disabled;
    }

    pub fn feed_context(&self) -> &FeedContext {
        &self.feed
    }

    /// Point the composer at another feed. Applies to the next submission.
    pub fn set_feed_context(&mut self, feed: FeedContext) {
        self.feed = feed;
    }

    pub fn char_count(&self) -> usize {
        self.text.current().chars().count()
    }

    pub fn max_chars(&self) -> usize {
        self.config.max_chars
    }

    pub fn exceeded_char_limit(&self) -> bool {
        self.char_count() > self.config.max_chars
    }

    /// Whether the current draft passes the submission guard.
    pub fn can_send(&self) -> bool {
        (self.char_count() > 0 || !self.attachments.is_empty()) && !self.exceeded_char_limit()
    }

    pub fn can_undo(&self) -> bool {
        self.text.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.text.can_redo()
    }

    /// Replace the text, recording one undo step.
    pub fn set_text(&mut self, text: impl Into<String>) {
        if self.is_disabled() {
            return;
        }
        self.text.set(text);
    }

    pub fn undo(&mut self) -> bool {
        !self.is_disabled() && self.text.undo()
    }

    pub fn redo(&mut self) -> bool {
        !self.is_disabled() && self.text.redo()
    }

    /// Stage a file chosen through a file picker.
    pub fn add_file(&mut self, file: FileBlob) -> Option<&Attachment> {
        if self.is_disabled() {
            return None;
        }
        Some(self.stage_file(file))
    }

    /// Remove the staged attachment at `index`, cancelling its upload.
    pub fn remove_attachment(&mut self, index: usize) -> Option<Attachment> {
        if self.is_disabled() {
            return None;
        }
        self.attachments
            .remove(index, self.collaborators.upload.as_ref())
    }

    /// Whether templates and fleet messages are offered to this member.
    pub fn can_use_member_tools(&self) -> bool {
        !self.feed.limited_member
    }

    pub fn open_templates(&self) {
        if self.is_disabled() || !self.can_use_member_tools() {
            return;
        }
        self.events.send(ComposerEvent::OpenTemplates);
    }

    /// Prefill the text with a template picked by the user.
    pub fn apply_template(&mut self, template: impl Into<String>) {
        if self.is_disabled() {
            return;
        }
        self.text.set(template);
        self.request_focus();
    }

    pub fn open_fleet_message(&self) {
        if self.is_disabled() || !self.can_use_member_tools() {
            return;
        }
        self.collaborators
            .analytics
            .track(AnalyticsEvent::OpenFleetMessage {
                workspace_id: self.feed.workspace_id.clone(),
            });
        self.events.send(ComposerEvent::OpenFleetMessage);
    }

    /// The host navigated elsewhere; drop the draft text.
    pub fn on_location_change(&mut self) {
        self.text.clear();
    }

    /// Handle a key press from the text control.
    pub async fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<KeyOutcome> {
        if self.is_disabled() || key_event.kind == KeyEventKind::Release {
            return Ok(KeyOutcome::Ignored);
        }

        match key_event {
            KeyEvent {
                code: KeyCode::Char(c),
                modifiers,
                ..
            } if c.eq_ignore_ascii_case(&'z')
                && modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER) =>
            {
                let applied = if modifiers.contains(KeyModifiers::SHIFT) {
                    self.text.redo().then_some(KeyOutcome::Redo)
                } else {
                    self.text.undo().then_some(KeyOutcome::Undo)
                };
                Ok(applied.unwrap_or(KeyOutcome::Ignored))
            }
            KeyEvent {
                code: KeyCode::Enter,
                modifiers,
                ..
            } if !modifiers.contains(KeyModifiers::SHIFT) => {
                Ok(KeyOutcome::Submit(self.submit().await?))
            }
            _ => Ok(KeyOutcome::Ignored),
        }
    }

    fn stage_file(&mut self, file: FileBlob) -> &Attachment {
        self.attachments
            .add(file, self.group_id, self.collaborators.upload.as_ref())
    }

    fn request_focus(&self) {
        self.events.send(ComposerEvent::RequestFocus {
            delay: self.config.focus_delay,
        });
    }
}
