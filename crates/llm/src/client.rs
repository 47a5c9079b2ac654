//! LLM client abstraction and request/response types.

use rfp_core::ServiceResult;
use serde::{Deserialize, Serialize};

/// One chat message sent to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role (e.g., "user")
    pub role: String,

    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Create a user-role message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// LLM completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    /// Model or deployment identifier
    pub model: String,

    /// Conversation sent to the model
    pub messages: Vec<ChatMessage>,
}

impl LlmRequest {
    /// Create a request carrying a single user message.
    pub fn new(prompt: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::user(prompt)],
        }
    }
}

/// LLM completion response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    /// Text of the first returned choice, if the service produced one
    pub content: Option<String>,

    /// Model that generated the response
    pub model: String,

    /// Usage statistics
    #[serde(default)]
    pub usage: LlmUsage,
}

/// Token usage statistics.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct LlmUsage {
    /// Tokens in the prompt
    #[serde(default)]
    pub prompt_tokens: u32,

    /// Tokens in the completion
    #[serde(default)]
    pub completion_tokens: u32,

    /// Total tokens used
    #[serde(default)]
    pub total_tokens: u32,
}

impl LlmUsage {
    /// Create usage stats from prompt and completion token counts.
    ///
    /// Counts come from the wire, so the total saturates instead of overflowing.
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }
}

/// Trait for generation service providers.
///
/// Implementations perform exactly one outbound call per method and never
/// retry; timeouts belong to the transport.
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    /// Get the provider name (e.g., "azure-openai").
    fn provider_name(&self) -> &str;

    /// Verify that the service is reachable and accepts the credential.
    async fn probe(&self) -> ServiceResult<()>;

    /// Perform a non-streaming chat completion.
    async fn complete(&self, request: &LlmRequest) -> ServiceResult<LlmResponse>;
}
