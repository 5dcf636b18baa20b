use feed_composer_protocol::FileBlob;
use feed_composer_protocol::GroupId;
use feed_composer_protocol::NewUpload;
use feed_composer_protocol::UploadId;
use feed_composer_protocol::UploadMeta;
use uuid::Uuid;

use crate::collaborators::UploadClient;

/// Tag attached to every upload registered by the composer.
pub const UPLOAD_SOURCE: &str = "composer";

/// A file accepted into the composer but not yet uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Preview handle for the presentation layer.
    pub local_url: String,
    pub file: FileBlob,
    /// Unassigned when the upload client declined to hand out an id.
    pub upload_id: UploadId,
}

impl Attachment {
    pub fn display_name(&self) -> &str {
        &self.file.name
    }

    pub fn mime_type(&self) -> &str {
        &self.file.mime_type
    }
}

/// Staged attachments in insertion order, which is also send order.
#[derive(Debug, Default)]
pub struct AttachmentList {
    items: Vec<Attachment>,
}

impl AttachmentList {
    /// Stage `file` and register it with the upload client under `group_id`.
    pub fn add(
        &mut self,
        file: FileBlob,
        group_id: GroupId,
        uploads: &dyn UploadClient,
    ) -> &Attachment {
        let local_url = format!("blob:{}", Uuid::now_v7());
        let upload_id = uploads
            .add_file(NewUpload {
                source: UPLOAD_SOURCE.to_string(),
                meta: UploadMeta { group_id },
                local_url: local_url.clone(),
                file: file.clone(),
            })
            .unwrap_or_else(UploadId::unassigned);
        tracing::debug!(
            name = %file.name,
            mime_type = %file.mime_type,
            %upload_id,
            "staged attachment"
        );

        let index = self.items.len();
        self.items.push(Attachment {
            local_url,
            file,
            upload_id,
        });
        &self.items[index]
    }

    /// Remove the attachment at `index` and cancel its upload if it has an id.
    /// Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize, uploads: &dyn UploadClient) -> Option<Attachment> {
        if index >= self.items.len() {
            tracing::trace!(
                index,
                len = self.items.len(),
                "ignoring out-of-range removal"
            );
            return None;
        }
        let removed = self.items.remove(index);
        if removed.upload_id.is_assigned() {
            uploads.remove_file(&removed.upload_id);
        }
        Some(removed)
    }

    /// Forget every staged attachment without cancelling uploads.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attachment> {
        self.items.iter()
    }
}
