//! Collaborators that report every call as a JSON line instead of talking to
//! a backend.

use std::io::Write;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use feed_composer::Analytics;
use feed_composer::FeedView;
use feed_composer::PublishApi;
use feed_composer::UploadClient;
use feed_composer_protocol::AnalyticsEvent;
use feed_composer_protocol::ContentEvent;
use feed_composer_protocol::CreateMessageParams;
use feed_composer_protocol::FeedStatus;
use feed_composer_protocol::NewUpload;
use feed_composer_protocol::UploadId;
use feed_composer_protocol::UploadRestrictions;
use serde_json::Value;
use serde_json::json;

enum Sink {
    Stdout,
    Capture(Vec<String>),
}

pub struct Console {
    sink: Mutex<Sink>,
    fail_next_publish: AtomicBool,
    fail_next_upload: AtomicBool,
    issued_upload_ids: AtomicUsize,
}

impl Console {
    pub fn stdout() -> Self {
        Self::with_sink(Sink::Stdout)
    }

    #[cfg(test)]
    pub fn capture() -> Self {
        Self::with_sink(Sink::Capture(Vec::new()))
    }

    fn with_sink(sink: Sink) -> Self {
        Self {
            sink: Mutex::new(sink),
            fail_next_publish: AtomicBool::new(false),
            fail_next_upload: AtomicBool::new(false),
            issued_upload_ids: AtomicUsize::new(0),
        }
    }

    pub fn fail_next_publish(&self) {
        self.fail_next_publish.store(true, Ordering::SeqCst);
    }

    pub fn fail_next_upload(&self) {
        self.fail_next_upload.store(true, Ordering::SeqCst);
    }

    /// Write one JSON line.
    pub fn emit(&self, value: Value) {
        let line = value.to_string();
        match &mut *self.lock() {
            Sink::Stdout => {
                let mut stdout = std::io::stdout().lock();
                if let Err(err) = writeln!(stdout, "{line}") {
                    tracing::error!("failed to write to stdout: {err}");
                }
            }
            Sink::Capture(lines) => lines.push(line),
        }
    }

    #[cfg(test)]
    pub fn lines(&self) -> Vec<Value> {
        match &*self.lock() {
            Sink::Stdout => Vec::new(),
            Sink::Capture(lines) => lines
                .iter()
                .filter_map(|line| serde_json::from_str(line).ok())
                .collect(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Sink> {
        self.sink.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl PublishApi for Console {
    async fn create_message(&self, params: CreateMessageParams) -> anyhow::Result<()> {
        self.emit(json!({ "call": "create_message", "params": params }));
        if self.fail_next_publish.swap(false, Ordering::SeqCst) {
            anyhow::bail!("publish rejected by console backend");
        }
        Ok(())
    }

    fn record_content_event(&self, event: ContentEvent) -> anyhow::Result<()> {
        self.emit(json!({ "call": "content_event", "event": event }));
        Ok(())
    }
}

#[async_trait::async_trait]
impl UploadClient for Console {
    fn add_file(&self, upload: NewUpload) -> Option<UploadId> {
        let issued = self.issued_upload_ids.fetch_add(1, Ordering::SeqCst) + 1;
        let id = UploadId::new(format!("upload-{issued}"));
        self.emit(json!({
            "call": "add_file",
            "id": id,
            "source": upload.source,
            "groupId": upload.meta.group_id,
            "name": upload.file.name,
            "mimeType": upload.file.mime_type,
        }));
        Some(id)
    }

    fn remove_file(&self, id: &UploadId) {
        self.emit(json!({ "call": "remove_file", "id": id }));
    }

    async fn upload(&self) -> anyhow::Result<()> {
        self.emit(json!({ "call": "upload" }));
        if self.fail_next_upload.swap(false, Ordering::SeqCst) {
            anyhow::bail!("upload rejected by console backend");
        }
        Ok(())
    }

    fn set_options(&self, restrictions: UploadRestrictions) {
        self.emit(json!({ "call": "set_options", "restrictions": restrictions }));
    }
}

impl FeedView for Console {
    fn set_status(&self, status: Option<FeedStatus>) {
        self.emit(json!({ "call": "set_status", "status": status }));
    }

    fn scroll_to_bottom(&self) {
        self.emit(json!({ "call": "scroll_to_bottom" }));
    }
}

impl Analytics for Console {
    fn track(&self, event: AnalyticsEvent) {
        self.emit(json!({ "call": "track", "event": event }));
    }
}
