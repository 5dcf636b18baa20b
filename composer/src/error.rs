pub type Result<T> = std::result::Result<T, ComposerError>;

#[derive(Debug, thiserror::Error)]
pub enum ComposerError {
    /// Publishing the text, recording its lifecycle, or uploading the staged
    /// files failed. The composer has already been reset when this is returned.
    #[error("failed to send message: {source}")]
    Send {
        #[source]
        source: anyhow::Error,
    },
}
