use std::sync::Arc;

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use feed_composer::Composer;
use feed_composer::ComposerEvent;
use feed_composer::DroppedItem;
use feed_composer::KeyOutcome;
use feed_composer::SubmitOutcome;
use feed_composer_protocol::FileBlob;
use feed_composer_protocol::IngestedItem;
use feed_composer_protocol::TextSelection;
use serde_json::Value;
use serde_json::json;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::console::Console;
use crate::script::ScriptCommand;

/// Applies script commands to a composer and reports what happened.
pub struct Driver {
    composer: Composer,
    console: Arc<Console>,
    composer_events: UnboundedReceiver<ComposerEvent>,
}

impl Driver {
    pub fn new(
        composer: Composer,
        console: Arc<Console>,
        composer_events: UnboundedReceiver<ComposerEvent>,
    ) -> Self {
        Self {
            composer,
            console,
            composer_events,
        }
    }

    pub async fn run(&mut self, commands: Vec<ScriptCommand>) {
        for command in commands {
            tracing::debug!(?command, "running script command");
            self.apply(command).await;
            self.drain_composer_events();
        }
    }

    async fn apply(&mut self, command: ScriptCommand) {
        match command {
            ScriptCommand::Type(text) => self.composer.set_text(text),
            ScriptCommand::PasteText { start, end, text } => {
                let outcome = self.composer.handle_paste(
                    vec![IngestedItem::plain_text(text)],
                    TextSelection { start, end },
                );
                tracing::debug!(?outcome, "paste handled");
            }
            ScriptCommand::PasteFile { mime_type, name } => {
                let file = placeholder_file(name, mime_type);
                self.composer
                    .handle_paste(vec![IngestedItem::file(file)], TextSelection::caret(0));
            }
            ScriptCommand::DropText(text) => {
                self.composer
                    .handle_drop(vec![DroppedItem::ready(IngestedItem::plain_text(text))])
                    .await;
            }
            ScriptCommand::DropFile { mime_type, name } => {
                let file = placeholder_file(name, mime_type);
                self.composer
                    .handle_drop(vec![DroppedItem::ready(IngestedItem::file(file))])
                    .await;
            }
            ScriptCommand::Remove(index) => {
                if self.composer.remove_attachment(index).is_none() {
                    tracing::info!(index, "nothing removed");
                }
            }
            ScriptCommand::Undo => {
                self.key(KeyEvent::new(KeyCode::Char('z'), KeyModifiers::CONTROL))
                    .await;
            }
            ScriptCommand::Redo => {
                self.key(KeyEvent::new(
                    KeyCode::Char('z'),
                    KeyModifiers::CONTROL | KeyModifiers::SHIFT,
                ))
                .await;
            }
            ScriptCommand::Template(text) => {
                self.composer.open_templates();
                self.composer.apply_template(text);
            }
            ScriptCommand::Enter => {
                self.key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
                    .await;
            }
            ScriptCommand::ShiftEnter => {
                self.key(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT))
                    .await;
            }
            ScriptCommand::Submit => match self.composer.submit().await {
                Ok(outcome) => self.report_submit(outcome),
                Err(err) => self.report_error(&err),
            },
            ScriptCommand::Navigate => self.composer.on_location_change(),
            ScriptCommand::FailNextPublish => self.console.fail_next_publish(),
            ScriptCommand::FailNextUpload => self.console.fail_next_upload(),
            ScriptCommand::State => self.console.emit(self.state()),
        }
    }

    async fn key(&mut self, key_event: KeyEvent) {
        match self.composer.handle_key_event(key_event).await {
            Ok(KeyOutcome::Submit(outcome)) => self.report_submit(outcome),
            Ok(outcome) => tracing::debug!(?outcome, "key handled"),
            Err(err) => self.report_error(&err),
        }
    }

    fn report_submit(&self, outcome: SubmitOutcome) {
        let outcome = match outcome {
            SubmitOutcome::Sent => "sent",
            SubmitOutcome::Rejected => "rejected",
        };
        self.console.emit(json!({ "submit": outcome }));
    }

    fn report_error(&self, err: &feed_composer::ComposerError) {
        tracing::error!("{err}");
        self.console.emit(json!({ "error": err.to_string() }));
    }

    fn drain_composer_events(&mut self) {
        while let Ok(event) = self.composer_events.try_recv() {
            let value = match event {
                ComposerEvent::RequestFocus { delay } => {
                    let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
                    json!({ "event": "request_focus", "delayMs": delay_ms })
                }
                ComposerEvent::SetCaret(caret) => json!({ "event": "set_caret", "caret": caret }),
                ComposerEvent::OpenTemplates => json!({ "event": "open_templates" }),
                ComposerEvent::OpenFleetMessage => json!({ "event": "open_fleet_message" }),
            };
            self.console.emit(value);
        }
    }

    fn state(&self) -> Value {
        let attachments: Vec<Value> = self
            .composer
            .attachments()
            .iter()
            .map(|attachment| {
                json!({
                    "name": attachment.display_name(),
                    "mimeType": attachment.mime_type(),
                    "uploadId": attachment.upload_id,
                })
            })
            .collect();
        json!({
            "state": {
                "text": self.composer.text(),
                "chars": self.composer.char_count(),
                "maxChars": self.composer.max_chars(),
                "canSend": self.composer.can_send(),
                "canUndo": self.composer.can_undo(),
                "canRedo": self.composer.can_redo(),
                "busy": self.composer.state().is_sending(),
                "feedId": self.composer.feed_context().feed_id,
                "memberTools": self.composer.can_use_member_tools(),
                "groupId": self.composer.group_id(),
                "attachments": attachments,
            }
        })
    }
}

/// The driver has no real files; the name stands in for the contents.
fn placeholder_file(name: String, mime_type: String) -> FileBlob {
    let data = name.as_bytes().to_vec();
    FileBlob::new(name, mime_type, data)
}
