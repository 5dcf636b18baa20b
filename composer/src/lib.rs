//! Message composer for a feed: draft text with undo/redo, staged
//! attachments, paste and drop ingestion, and grouped submission.

#![deny(clippy::print_stdout, clippy::print_stderr)]

mod attachments;
mod collaborators;
mod composer;
mod composer_event;
mod config;
mod error;
mod text_history;

#[cfg(test)]
mod test_support;

pub use attachments::Attachment;
pub use attachments::AttachmentList;
pub use attachments::UPLOAD_SOURCE;
pub use collaborators::Analytics;
pub use collaborators::Collaborators;
pub use collaborators::FeedView;
pub use collaborators::PublishApi;
pub use collaborators::UploadClient;
pub use composer::Composer;
pub use composer::DroppedItem;
pub use composer::KeyOutcome;
pub use composer::PasteOutcome;
pub use composer::SubmissionState;
pub use composer::SubmitOutcome;
pub use composer_event::ComposerEvent;
pub use composer_event::ComposerEventSender;
pub use config::ComposerConfig;
pub use config::DEFAULT_MAX_CHARS;
pub use config::DEFAULT_MIME_TYPES;
pub use config::default_config_path;
pub use config::load_composer_config;
pub use error::ComposerError;
pub use error::Result;
pub use text_history::DEFAULT_MAX_ENTRIES;
pub use text_history::TextHistory;
