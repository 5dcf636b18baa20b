use serde::Deserialize;
use serde::Serialize;

use crate::FileBlob;
use crate::GroupId;

/// Identifier the upload client assigns to a registered file.
///
/// An empty id means the client declined to assign one; such uploads cannot be
/// cancelled individually.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UploadId(String);

impl UploadId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn unassigned() -> Self {
        Self(String::new())
    }

    pub fn is_assigned(&self) -> bool {
        !self.0.is_empty()
    }
}

impl std::fmt::Display for UploadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadMeta {
    pub group_id: GroupId,
}

/// Registration request for the upload client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUpload {
    /// Tag naming the surface that registered the file.
    pub source: String,
    pub meta: UploadMeta,
    pub local_url: String,
    pub file: FileBlob,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRestrictions {
    /// `None` lifts the cap entirely.
    pub max_number_of_files: Option<u32>,
}

impl UploadRestrictions {
    pub const SINGLE_FILE: Self = Self {
        max_number_of_files: Some(1),
    };

    pub const UNLIMITED: Self = Self {
        max_number_of_files: None,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_upload_id_is_unassigned() {
        assert!(!UploadId::unassigned().is_assigned());
        assert!(!UploadId::new("").is_assigned());
        assert!(UploadId::new("uppy-123").is_assigned());
    }

    #[test]
    fn unlimited_restrictions_serialize_null_cap() -> anyhow::Result<()> {
        let json = serde_json::to_string(&UploadRestrictions::UNLIMITED)?;
        assert_eq!(json, r#"{"maxNumberOfFiles":null}"#);
        Ok(())
    }
}
