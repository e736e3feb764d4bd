use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::VigilError;

/// Top-level configuration loaded from `.vigil.toml`.
///
/// Supports layered resolution: CLI flags > env vars > local config > defaults.
///
/// # Examples
///
/// ```
/// use vigil_core::VigilConfig;
///
/// let config = VigilConfig::default();
/// assert!(config.review.skip_merge_commits);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VigilConfig {
    /// LLM provider settings.
    #[serde(default)]
    pub llm: LlmConfig,
    /// Review behavior settings.
    #[serde(default)]
    pub review: ReviewConfig,
}

impl VigilConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`VigilError::Io`] if the file cannot be read, or
    /// [`VigilError::Toml`] if the content is not valid TOML.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use vigil_core::VigilConfig;
    /// use std::path::Path;
    ///
    /// let config = VigilConfig::from_file(Path::new(".vigil.toml")).unwrap();
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, VigilError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`VigilError::Toml`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use vigil_core::VigilConfig;
    ///
    /// let toml = r#"
    /// [llm]
    /// low_model = "gpt-4o-mini"
    /// "#;
    /// let config = VigilConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.llm.low_model, "gpt-4o-mini");
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, VigilError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Overlay `VIGIL_*` environment variables onto the configuration.
    ///
    /// Recognized variables: `VIGIL_BASE_URL`, `VIGIL_API_KEY`,
    /// `VIGIL_LOW_MODEL`, `VIGIL_HIGH_MODEL`. Empty values are ignored.
    pub fn apply_env(&mut self) {
        self.overlay(|key| std::env::var(key).ok());
    }

    fn overlay<F>(&mut self, get: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let set = |slot: &mut Option<String>, key: &str| {
            if let Some(v) = get(key) {
                if !v.is_empty() {
                    *slot = Some(v);
                }
            }
        };
        set(&mut self.llm.base_url, "VIGIL_BASE_URL");
        set(&mut self.llm.api_key, "VIGIL_API_KEY");
        if let Some(v) = get("VIGIL_LOW_MODEL") {
            if !v.is_empty() {
                self.llm.low_model = v;
            }
        }
        if let Some(v) = get("VIGIL_HIGH_MODEL") {
            if !v.is_empty() {
                self.llm.high_model = v;
            }
        }
    }
}

/// LLM provider configuration.
///
/// The pipeline uses two models against one OpenAI-compatible endpoint:
/// a cheap "low" model for triage and a stronger "high" model for the
/// critical review.
///
/// # Examples
///
/// ```
/// use vigil_core::LlmConfig;
///
/// let config = LlmConfig::default();
/// assert!(config.low_model.is_empty());
/// assert!(config.base_url.is_none());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Custom base URL for API requests (default: the OpenAI endpoint).
    pub base_url: Option<String>,
    /// API key for the provider.
    pub api_key: Option<String>,
    /// Model used for the triage call. Falls back to the empty string.
    #[serde(default)]
    pub low_model: String,
    /// Model used for the critical-review call. Falls back to the empty string.
    #[serde(default)]
    pub high_model: String,
}

/// Review behavior configuration.
///
/// # Examples
///
/// ```
/// use vigil_core::ReviewConfig;
///
/// let config = ReviewConfig::default();
/// assert!(config.webhook.is_none());
/// assert!(config.skip_merge_commits);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewConfig {
    /// Webhook URL to POST the final report to.
    pub webhook: Option<String>,
    /// System instruction prepended to the critical-review prompt.
    pub system_prompt: Option<String>,
    /// Skip merge commits when gathering history metadata (default: true).
    #[serde(default = "default_skip_merge_commits")]
    pub skip_merge_commits: bool,
}

fn default_skip_merge_commits() -> bool {
    true
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            webhook: None,
            system_prompt: None,
            skip_merge_commits: default_skip_merge_commits(),
        }
    }
}
