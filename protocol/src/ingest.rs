use serde::Deserialize;
use serde::Serialize;

pub const TEXT_PLAIN: &str = "text/plain";

/// Whether a pasted or dropped item carries a file or a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    File,
    Text,
}

/// A raw file handed to the composer by paste, drop or a file picker.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileBlob {
    pub name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl FileBlob {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data,
        }
    }
}

impl std::fmt::Debug for FileBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileBlob")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.data.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemPayload {
    File { file: FileBlob },
    Text { text: String },
}

/// One entry of a clipboard or drag-and-drop data transfer, normalized away
/// from any platform event shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestedItem {
    pub kind: ItemKind,
    pub mime_type: String,
    pub payload: ItemPayload,
}

impl IngestedItem {
    pub fn file(file: FileBlob) -> Self {
        Self {
            kind: ItemKind::File,
            mime_type: file.mime_type.clone(),
            payload: ItemPayload::File { file },
        }
    }

    pub fn plain_text(text: impl Into<String>) -> Self {
        Self::text(TEXT_PLAIN, text)
    }

    pub fn text(mime_type: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: ItemKind::Text,
            mime_type: mime_type.into(),
            payload: ItemPayload::Text { text: text.into() },
        }
    }
}

/// Selection of the text control at the moment of a paste, in characters.
///
/// `start == end` is a bare caret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSelection {
    pub start: usize,
    pub end: usize,
}

impl TextSelection {
    pub fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }
}

impl From<std::ops::Range<usize>> for TextSelection {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}
