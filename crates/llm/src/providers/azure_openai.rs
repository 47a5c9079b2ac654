//! Azure OpenAI provider.
//!
//! Chat completions API:
//! https://learn.microsoft.com/azure/ai-services/openai/reference

use crate::client::{ChatMessage, LlmClient, LlmRequest, LlmResponse, LlmUsage};
use rfp_core::error::ensure_success;
use rfp_core::{OpenAiConfig, ServiceError, ServiceResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Chat completions request body.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

/// Chat completions response body. Every field is optional on the wire.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

/// Azure OpenAI client bound to one deployment.
pub struct AzureOpenAiClient {
    /// Resource endpoint without trailing slash
    endpoint: String,
    api_key: String,
    deployment: String,
    api_version: String,

    /// HTTP client
    client: reqwest::Client,
}

impl AzureOpenAiClient {
    /// Create a client from connection settings.
    ///
    /// No request is sent; only the HTTP client is built.
    pub fn new(config: &OpenAiConfig, timeout: Duration) -> ServiceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Client(e.to_string()))?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            deployment: config.deployment.clone(),
            api_version: config.api_version.clone(),
            client,
        })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, self.deployment, self.api_version
        )
    }

    fn models_url(&self) -> String {
        format!(
            "{}/openai/models?api-version={}",
            self.endpoint, self.api_version
        )
    }

    /// Convert the wire response, keeping only the first choice.
    fn convert_response(&self, response: ChatCompletionResponse, model: &str) -> LlmResponse {
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content);

        let usage = response
            .usage
            .map(|u| LlmUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        LlmResponse {
            content,
            model: response.model.unwrap_or_else(|| model.to_string()),
            usage,
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for AzureOpenAiClient {
    fn provider_name(&self) -> &str {
        "azure-openai"
    }

    async fn probe(&self) -> ServiceResult<()> {
        tracing::debug!("Probing Azure OpenAI at {}", self.endpoint);

        let response = self
            .client
            .get(self.models_url())
            .header("api-key", &self.api_key)
            .send()
            .await?;

        ensure_success(response).await?;
        Ok(())
    }

    async fn complete(&self, request: &LlmRequest) -> ServiceResult<LlmResponse> {
        tracing::info!(
            "Sending completion request to Azure OpenAI deployment '{}'",
            self.deployment
        );
        tracing::debug!("Request carries {} message(s)", request.messages.len());

        let body = ChatCompletionRequest {
            model: &request.model,
            messages: &request.messages,
        };

        let response = self
            .client
            .post(self.completions_url())
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let completion: ChatCompletionResponse = ensure_success(response).await?.json().await?;

        tracing::info!("Received completion from Azure OpenAI");
        tracing::debug!("Response: {:?}", completion);

        Ok(self.convert_response(completion, &request.model))
    }
}
