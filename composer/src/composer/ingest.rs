//! Paste and drop ingestion.
//!
//! Both entry points lift the upload client's single-file cap once, before
//! looking at any item, then route each item: accepted files are staged,
//! text is merged into the draft, anything else is dropped silently.

use std::future::Future;

use feed_composer_protocol::IngestedItem;
use feed_composer_protocol::ItemKind;
use feed_composer_protocol::ItemPayload;
use feed_composer_protocol::TEXT_PLAIN;
use feed_composer_protocol::TextSelection;
use feed_composer_protocol::UploadRestrictions;
use futures::FutureExt;
use futures::future::BoxFuture;

use super::Composer;
use crate::composer_event::ComposerEvent;

/// Whether the platform's own paste handling should be suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteOutcome {
    Handled,
    /// The composer is disabled and left the paste alone.
    Ignored,
}

/// A dropped item whose contents are only available asynchronously.
pub struct DroppedItem {
    pub kind: ItemKind,
    pub mime_type: String,
    payload: BoxFuture<'static, anyhow::Result<ItemPayload>>,
}

impl DroppedItem {
    pub fn new<F>(kind: ItemKind, mime_type: impl Into<String>, payload: F) -> Self
    where
        F: Future<Output = anyhow::Result<ItemPayload>> + Send + 'static,
    {
        Self {
            kind,
            mime_type: mime_type.into(),
            payload: payload.boxed(),
        }
    }

    /// An item whose payload is already in memory.
    pub fn ready(item: IngestedItem) -> Self {
        let IngestedItem {
            kind,
            mime_type,
            payload,
        } = item;
        Self::new(kind, mime_type, async move { Ok::<_, anyhow::Error>(payload) })
    }
}

impl std::fmt::Debug for DroppedItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DroppedItem")
            .field("kind", &self.kind)
            .field("mime_type", &self.mime_type)
            .finish_non_exhaustive()
    }
}

impl Composer {
    /// Integrate a clipboard paste.
    ///
    /// Plain text replaces `selection` in the current draft and the caret is
    /// moved right after the inserted text. Later text items of the same paste
    /// land at the moved caret.
    pub fn handle_paste(
        &mut self,
        items: Vec<IngestedItem>,
        selection: TextSelection,
    ) -> PasteOutcome {
        if self.is_disabled() {
            return PasteOutcome::Ignored;
        }

        if !items.is_empty() {
            self.collaborators
                .upload
                .set_options(UploadRestrictions::UNLIMITED);
        }

        let mut selection = selection;
        for item in items {
            match (item.kind, item.payload) {
                (ItemKind::File, ItemPayload::File { file }) if self.accepts(&item.mime_type) => {
                    self.stage_file(file);
                }
                (ItemKind::Text, ItemPayload::Text { text }) if item.mime_type == TEXT_PLAIN => {
                    let (spliced, caret) = splice(self.text.current(), selection, &text);
                    self.text.set(spliced);
                    self.events.send(ComposerEvent::SetCaret(caret));
                    selection = TextSelection::caret(caret);
                }
                (kind, _) => {
                    tracing::trace!(?kind, mime_type = %item.mime_type, "ignoring pasted item");
                }
            }
        }
        PasteOutcome::Handled
    }

    /// Integrate a drag-and-drop transfer.
    ///
    /// Payloads resolve concurrently and are applied in item order. Text is
    /// appended to the draft since a drop carries no caret.
    pub async fn handle_drop(&mut self, items: Vec<DroppedItem>) {
        if self.is_disabled() || items.is_empty() {
            return;
        }

        self.collaborators
            .upload
            .set_options(UploadRestrictions::UNLIMITED);

        let pending = items.into_iter().filter_map(|item| {
            let wanted = match item.kind {
                ItemKind::File => self.accepts(&item.mime_type),
                ItemKind::Text => true,
            };
            if !wanted {
                tracing::trace!(mime_type = %item.mime_type, "ignoring dropped file");
                return None;
            }
            let DroppedItem {
                kind,
                mime_type,
                payload,
            } = item;
            Some(payload.map(move |resolved| (kind, mime_type, resolved)))
        });
        let resolved = futures::future::join_all(pending).await;

        for (kind, mime_type, payload) in resolved {
            match (kind, payload) {
                (ItemKind::File, Ok(ItemPayload::File { file })) => {
                    self.stage_file(file);
                }
                (ItemKind::Text, Ok(ItemPayload::Text { text })) => {
                    let appended = format!("{}{text}", self.text.current());
                    self.text.set(appended);
                }
                (_, Ok(_)) => {
                    tracing::trace!(
                        ?kind,
                        %mime_type,
                        "dropped item payload does not match its kind"
                    );
                }
                (_, Err(err)) => {
                    tracing::warn!(?kind, %mime_type, "failed to read dropped item: {err:#}");
                }
            }
        }
    }

    fn accepts(&self, mime_type: &str) -> bool {
        self.accepted_mime_types
            .iter()
            .any(|accepted| accepted == mime_type)
    }
}

/// Replace the characters of `text` covered by `selection` with `inserted`.
/// Returns the new text and the caret offset right after the insertion.
fn splice(text: &str, selection: TextSelection, inserted: &str) -> (String, usize) {
    let char_len = text.chars().count();
    let start = selection.start.min(char_len);
    let end = selection.end.clamp(start, char_len);

    let start_byte = byte_offset(text, start);
    let end_byte = byte_offset(text, end);
    let mut out = String::with_capacity(text.len() - (end_byte - start_byte) + inserted.len());
    out.push_str(&text[..start_byte]);
    out.push_str(inserted);
    out.push_str(&text[end_byte..]);

    (out, start + inserted.chars().count())
}

fn byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(idx, _)| idx)
}
