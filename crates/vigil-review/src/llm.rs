use std::time::Duration;

use serde::{Deserialize, Serialize};
use vigil_core::{LlmConfig, VigilError};

/// A message in a chat conversation with the LLM.
///
/// # Examples
///
/// ```
/// use vigil_review::llm::{ChatMessage, Role};
///
/// let msg = ChatMessage {
///     role: Role::User,
///     content: "Review this commit".into(),
/// };
/// assert!(matches!(msg.role, Role::User));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// Role of the message sender.
    pub role: Role,
    /// Text content of the message.
    pub content: String,
}

impl ChatMessage {
    /// Shorthand for a user-role message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Role in the chat conversation.
///
/// # Examples
///
/// ```
/// use vigil_review::llm::Role;
///
/// let role = Role::User;
/// assert_eq!(serde_json::to_string(&role).unwrap(), "\"user\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System-level instructions.
    System,
    /// User input.
    User,
    /// Assistant response.
    Assistant,
}

/// OpenAI-compatible chat completions client.
///
/// Works with any provider that exposes the `/v1/chat/completions`
/// endpoint. One client serves both pipeline stages; the model is chosen
/// per call, so the cheap triage model and the strong review model share
/// the connection pool.
///
/// # Examples
///
/// ```
/// use vigil_core::LlmConfig;
/// use vigil_review::llm::LlmClient;
///
/// let config = LlmConfig {
///     low_model: "gpt-4o-mini".into(),
///     high_model: "gpt-4o".into(),
///     ..LlmConfig::default()
/// };
/// let client = LlmClient::new(&config).unwrap();
/// assert_eq!(client.low_model(), "gpt-4o-mini");
/// ```
pub struct LlmClient {
    client: reqwest::Client,
    config: LlmConfig,
}

impl LlmClient {
    /// Create a new LLM client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`VigilError::Llm`] if the HTTP client cannot be built.
    pub fn new(config: &LlmConfig) -> Result<Self, VigilError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| VigilError::Llm(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Model used for the triage call.
    pub fn low_model(&self) -> &str {
        &self.config.low_model
    }

    /// Model used for the critical-review call.
    pub fn high_model(&self) -> &str {
        &self.config.high_model
    }

    /// Send a chat completion request to `model` and return the text response.
    ///
    /// # Errors
    ///
    /// Returns [`VigilError::Llm`] on HTTP errors or response parsing
    /// failures. Both pipeline stages treat this as fatal — an empty
    /// triage list or empty review is never useful output.
    pub async fn chat(&self, model: &str, messages: Vec<ChatMessage>) -> Result<String, VigilError> {
        let base_url = self
            .config
            .base_url
            .as_deref()
            .unwrap_or("https://api.openai.com");
        let url = format!("{base_url}/v1/chat/completions");

        let body = serde_json::json!({
            "model": model,
            "messages": messages,
        });

        let mut request = self.client.post(&url);
        if let Some(api_key) = &self.config.api_key {
            request = request.header("Authorization", format!("Bearer {api_key}"));
        }
        request = request.header("Content-Type", "application/json");

        let response = request
            .json(&body)
            .send()
            .await
            .map_err(|e| VigilError::Llm(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(VigilError::Llm(format!(
                "LLM API error {status}: {body_text}"
            )));
        }

        let response_body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| VigilError::Llm(format!("failed to parse response: {e}")))?;

        let content = response_body
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .ok_or_else(|| {
                VigilError::Llm(format!("unexpected response structure: {response_body}"))
            })?;

        Ok(content.to_string())
    }
}
