/// Errors that can occur across the vigil pipeline.
///
/// Each variant wraps a specific error domain. Library crates use this type
/// directly; the binary crate converts to a `miette` diagnostic at the boundary.
///
/// # Examples
///
/// ```
/// use vigil_core::VigilError;
///
/// let err = VigilError::Config("missing API base URL".into());
/// assert!(err.to_string().contains("missing API base URL"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum VigilError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Git operation failure.
    #[error("git error: {0}")]
    Git(String),

    /// The commit has no parent to compare against (root commit).
    #[error("commit {0} has no parent")]
    NoParent(String),

    /// LLM API or response error.
    #[error("LLM error: {0}")]
    Llm(String),

    /// Webhook delivery failure.
    #[error("webhook error: {0}")]
    Webhook(String),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
