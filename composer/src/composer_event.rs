//! Presentation-level requests emitted by the composer.
//!
//! The composer never touches the text control directly; whichever layer owns
//! the control drains these events and applies them.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerEvent {
    /// Move keyboard focus back to the text input once `delay` has elapsed.
    RequestFocus { delay: Duration },

    /// Place the caret at the given character offset of the current text.
    SetCaret(usize),

    /// Show the template picker. The picked template comes back through
    /// [`crate::Composer::apply_template`].
    OpenTemplates,

    OpenFleetMessage,
}

#[derive(Clone, Debug)]
pub struct ComposerEventSender {
    composer_event_tx: UnboundedSender<ComposerEvent>,
}

impl ComposerEventSender {
    pub fn new(composer_event_tx: UnboundedSender<ComposerEvent>) -> Self {
        Self { composer_event_tx }
    }

    /// Send an event to the presentation layer. If the receiver is gone, the
    /// error is logged and dropped.
    pub fn send(&self, event: ComposerEvent) {
        if let Err(e) = self.composer_event_tx.send(event) {
            tracing::error!("failed to send composer event: {e}");
        }
    }
}
