mod feed;
mod ids;
mod ingest;
mod upload;

pub use feed::AnalyticsEvent;
pub use feed::ContentEvent;
pub use feed::ContentStatus;
pub use feed::ContentStep;
pub use feed::CreateMessageParams;
pub use feed::FeedContext;
pub use feed::FeedStatus;
pub use feed::Severity;
pub use ids::ContentId;
pub use ids::GroupId;
pub use ingest::FileBlob;
pub use ingest::IngestedItem;
pub use ingest::ItemKind;
pub use ingest::ItemPayload;
pub use ingest::TEXT_PLAIN;
pub use ingest::TextSelection;
pub use upload::NewUpload;
pub use upload::UploadId;
pub use upload::UploadMeta;
pub use upload::UploadRestrictions;
