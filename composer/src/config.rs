use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use toml_edit::DocumentMut;
use toml_edit::Item as TomlItem;

use crate::text_history::DEFAULT_MAX_ENTRIES;

/// Accepted attachment types when no allow-list is configured.
pub const DEFAULT_MIME_TYPES: [&str; 4] = [
    "image/jpeg",
    "image/png",
    "image/svg+xml",
    "application/pdf",
];

pub const DEFAULT_MAX_CHARS: usize = 5000;

const DEFAULT_FOCUS_DELAY_MS: u64 = 50;

/// MIME families the composer is willing to stage at all.
const ACCEPTED_MIME_FAMILIES: [&str; 3] = ["image", "application", "text"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerConfig {
    /// Raw allow-list from configuration. Empty selects [`DEFAULT_MIME_TYPES`].
    pub allowed_mime_types: Vec<String>,
    pub max_chars: usize,
    pub history_depth: usize,
    pub focus_delay: Duration,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            allowed_mime_types: Vec::new(),
            max_chars: DEFAULT_MAX_CHARS,
            history_depth: DEFAULT_MAX_ENTRIES,
            focus_delay: Duration::from_millis(DEFAULT_FOCUS_DELAY_MS),
        }
    }
}

impl ComposerConfig {
    /// The MIME types paste and drop will stage.
    pub fn accepted_mime_types(&self) -> Vec<String> {
        if self.allowed_mime_types.is_empty() {
            return DEFAULT_MIME_TYPES.iter().map(ToString::to_string).collect();
        }
        self.allowed_mime_types
            .iter()
            .filter(|mime| {
                ACCEPTED_MIME_FAMILIES
                    .iter()
                    .any(|family| mime.starts_with(family))
            })
            .cloned()
            .collect()
    }
}

/// `~/.feed-composer/config.toml`, when a home directory exists.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".feed-composer").join("config.toml"))
}

/// Load configuration from `path`. A missing file yields the defaults.
pub fn load_composer_config(path: &Path) -> io::Result<ComposerConfig> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(ComposerConfig::default()),
        Err(err) => {
            return Err(io::Error::new(
                err.kind(),
                format!("Failed to read config file {}: {err}", path.display()),
            ));
        }
    };

    let doc = contents.parse::<DocumentMut>().map_err(|err| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Error parsing config file {}: {err}", path.display()),
        )
    })?;

    let mut config = ComposerConfig::default();
    apply_config_doc(&mut config, &doc)?;
    Ok(config)
}

fn apply_config_doc(config: &mut ComposerConfig, doc: &DocumentMut) -> io::Result<()> {
    if let Some(item) = doc.get("allowed_mime_types") {
        config.allowed_mime_types = read_string_array(item, "allowed_mime_types")?;
    }
    if let Some(item) = doc.get("max_chars") {
        config.max_chars = read_positive_int(item, "max_chars")?;
    }
    if let Some(item) = doc.get("history_depth") {
        config.history_depth = read_positive_int(item, "history_depth")?;
    }
    if let Some(item) = doc.get("focus_delay_ms") {
        let millis = read_positive_int(item, "focus_delay_ms")?;
        config.focus_delay = Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX));
    }
    Ok(())
}

fn invalid_field(field: &str, expected: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("config field `{field}` must be {expected}"),
    )
}

fn read_positive_int(item: &TomlItem, field: &str) -> io::Result<usize> {
    item.as_integer()
        .and_then(|value| usize::try_from(value).ok())
        .filter(|value| *value > 0)
        .ok_or_else(|| invalid_field(field, "a positive integer"))
}

/// Every element must be a string; one bad element rejects the whole field.
fn read_string_array(item: &TomlItem, field: &str) -> io::Result<Vec<String>> {
    item.as_array()
        .and_then(|array| {
            array
                .iter()
                .map(|value| value.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
        })
        .ok_or_else(|| invalid_field(field, "an array of strings"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).expect("write config");
        (dir, path)
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_composer_config(&dir.path().join("absent.toml")).expect("load");
        assert_eq!(config, ComposerConfig::default());
        assert_eq!(
            config.accepted_mime_types(),
            vec!["image/jpeg", "image/png", "image/svg+xml", "application/pdf"]
        );
    }

    #[test]
    fn configured_allow_list_is_filtered_to_known_families() {
        let (_dir, path) = write_config(
            r#"
allowed_mime_types = ["image/gif", "video/mp4", "text/csv", "application/zip", "audio/ogg"]
max_chars = 280
focus_delay_ms = 10
"#,
        );
        let config = load_composer_config(&path).expect("load");
        assert_eq!(config.max_chars, 280);
        assert_eq!(config.focus_delay, Duration::from_millis(10));
        assert_eq!(config.history_depth, DEFAULT_MAX_ENTRIES);
        assert_eq!(
            config.accepted_mime_types(),
            vec!["image/gif", "text/csv", "application/zip"]
        );
    }

    #[test]
    fn wrong_field_type_is_invalid_data() {
        let (_dir, path) = write_config("max_chars = \"lots\"\n");
        let err = load_composer_config(&path).expect_err("should reject");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("max_chars"), "{err}");
    }

    #[test]
    fn zero_history_depth_is_rejected() {
        let (_dir, path) = write_config("history_depth = 0\n");
        let err = load_composer_config(&path).expect_err("should reject");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn mixed_allow_list_is_rejected() {
        let (_dir, path) = write_config("allowed_mime_types = [\"image/png\", 3]\n");
        let err = load_composer_config(&path).expect_err("should reject");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("allowed_mime_types"), "{err}");
    }

    #[test]
    fn malformed_toml_is_invalid_data() {
        let (_dir, path) = write_config("allowed_mime_types = [\n");
        let err = load_composer_config(&path).expect_err("should reject");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
