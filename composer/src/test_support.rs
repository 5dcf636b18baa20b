//! Recording fakes for every collaborator, shared by the unit tests.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use feed_composer_protocol::AnalyticsEvent;
use feed_composer_protocol::ContentEvent;
use feed_composer_protocol::ContentStatus;
use feed_composer_protocol::CreateMessageParams;
use feed_composer_protocol::FeedContext;
use feed_composer_protocol::FeedStatus;
use feed_composer_protocol::NewUpload;
use feed_composer_protocol::UploadId;
use feed_composer_protocol::UploadRestrictions;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::unbounded_channel;

use crate::collaborators::Analytics;
use crate::collaborators::Collaborators;
use crate::collaborators::FeedView;
use crate::collaborators::PublishApi;
use crate::collaborators::UploadClient;
use crate::composer::Composer;
use crate::composer_event::ComposerEvent;
use crate::composer_event::ComposerEventSender;
use crate::config::ComposerConfig;

/// A composer on `workspace-1/feed-1` with the default configuration, wired
/// to `recorder`.
pub(crate) fn test_composer(
    recorder: &Arc<Recorder>,
) -> (Composer, UnboundedReceiver<ComposerEvent>) {
    let (tx, rx) = unbounded_channel();
    let feed = FeedContext {
        workspace_id: "workspace-1".to_string(),
        feed_id: "feed-1".to_string(),
        preferred_language: Some("en".to_string()),
        is_silent: false,
        limited_member: false,
    };
    let composer = Composer::new(
        ComposerConfig::default(),
        feed,
        recorder.collaborators(),
        ComposerEventSender::new(tx),
    );
    (composer, rx)
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    CreateMessage(CreateMessageParams),
    ContentEvent(ContentEvent),
    AddFile(NewUpload),
    RemoveFile(UploadId),
    Upload,
    SetOptions(UploadRestrictions),
    SetStatus(Option<FeedStatus>),
    ScrollToBottom,
    Track(AnalyticsEvent),
}

/// One object standing in for every collaborator, so the relative order of
/// all calls can be asserted on a single timeline.
#[derive(Default)]
pub(crate) struct Recorder {
    calls: Mutex<Vec<Call>>,
    issued_upload_ids: Mutex<usize>,
    withhold_upload_ids: bool,
    fail_create: Mutex<Option<String>>,
    fail_upload: Mutex<Option<String>>,
    fail_content_event: Mutex<Option<ContentStatus>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Recorder {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn without_upload_ids() -> Arc<Self> {
        Arc::new(Self {
            withhold_upload_ids: true,
            ..Self::default()
        })
    }

    pub(crate) fn collaborators(self: &Arc<Self>) -> Collaborators {
        Collaborators {
            publish: Arc::clone(self) as Arc<dyn PublishApi>,
            upload: Arc::clone(self) as Arc<dyn UploadClient>,
            feed: Arc::clone(self) as Arc<dyn FeedView>,
            analytics: Arc::clone(self) as Arc<dyn Analytics>,
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    pub(crate) fn clear_calls(&self) {
        lock(&self.calls).clear();
    }

    pub(crate) fn fail_next_create(&self, message: &str) {
        *lock(&self.fail_create) = Some(message.to_string());
    }

    pub(crate) fn fail_next_upload(&self, message: &str) {
        *lock(&self.fail_upload) = Some(message.to_string());
    }

    pub(crate) fn fail_content_event(&self, status: ContentStatus) {
        *lock(&self.fail_content_event) = Some(status);
    }

    pub(crate) fn created_messages(&self) -> Vec<CreateMessageParams> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::CreateMessage(params) => Some(params),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn content_events(&self) -> Vec<ContentEvent> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::ContentEvent(event) => Some(event),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|call| matches(call))
            .count()
    }

    fn record(&self, call: Call) {
        lock(&self.calls).push(call);
    }
}

#[async_trait::async_trait]
impl PublishApi for Recorder {
    async fn create_message(&self, params: CreateMessageParams) -> anyhow::Result<()> {
        self.record(Call::CreateMessage(params));
        match lock(&self.fail_create).take() {
            Some(message) => Err(anyhow::anyhow!(message)),
            None => Ok(()),
        }
    }

    fn record_content_event(&self, event: ContentEvent) -> anyhow::Result<()> {
        let status = event.status;
        self.record(Call::ContentEvent(event));
        if *lock(&self.fail_content_event) == Some(status) {
            anyhow::bail!("telemetry rejected {status} event");
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl UploadClient for Recorder {
    fn add_file(&self, upload: NewUpload) -> Option<UploadId> {
        self.record(Call::AddFile(upload));
        if self.withhold_upload_ids {
            return None;
        }
        let mut issued = lock(&self.issued_upload_ids);
        *issued += 1;
        Some(UploadId::new(format!("upload-{issued}")))
    }

    fn remove_file(&self, id: &UploadId) {
        self.record(Call::RemoveFile(id.clone()));
    }

    async fn upload(&self) -> anyhow::Result<()> {
        self.record(Call::Upload);
        match lock(&self.fail_upload).take() {
            Some(message) => Err(anyhow::anyhow!(message)),
            None => Ok(()),
        }
    }

    fn set_options(&self, restrictions: UploadRestrictions) {
        self.record(Call::SetOptions(restrictions));
    }
}

impl FeedView for Recorder {
    fn set_status(&self, status: Option<FeedStatus>) {
        self.record(Call::SetStatus(status));
    }

    fn scroll_to_bottom(&self) {
        self.record(Call::ScrollToBottom);
    }
}

impl Analytics for Recorder {
    fn track(&self, event: AnalyticsEvent) {
        self.record(Call::Track(event));
    }
}
