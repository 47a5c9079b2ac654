//! The analyzer facade.

use crate::sources::render_sources;
use crate::types::Analysis;
use rfp_core::{AppConfig, AppError, AppResult, ServiceError};
use rfp_llm::{AzureOpenAiClient, LlmClient, LlmRequest};
use rfp_prompt::build_prompt;
use rfp_search::{AzureSearchClient, ResultRecord, SearchClient, SearchRequest};
use std::sync::Arc;
use std::time::Duration;

/// Search and grounded generation over one index and one model deployment.
///
/// Every operation is a single request/response round trip. Nothing is
/// retried and no state survives between calls.
#[derive(Clone)]
pub struct Analyzer {
    search: Arc<dyn SearchClient>,
    llm: Arc<dyn LlmClient>,
    model: String,
}

impl Analyzer {
    /// Connect to the Azure services named in `config`.
    ///
    /// Fails with `AppError::Config` before any network traffic if a required
    /// setting is missing, then probes both services: a rejected credential
    /// fails with `AppError::Auth`, any other setup fault with `AppError::Init`.
    pub async fn connect(config: &AppConfig) -> AppResult<Self> {
        config.validate()?;

        let timeout = Duration::from_secs(config.timeout_secs);
        let search = AzureSearchClient::new(&config.search, timeout).map_err(AppError::Init)?;
        let llm = AzureOpenAiClient::new(&config.openai, timeout).map_err(AppError::Init)?;

        Self::probe_and_build(config, Arc::new(search), Arc::new(llm)).await
    }

    /// Connect using caller-supplied service handles.
    ///
    /// Validation and probing behave exactly as in [`Analyzer::connect`].
    pub async fn connect_with(
        config: &AppConfig,
        search: Arc<dyn SearchClient>,
        llm: Arc<dyn LlmClient>,
    ) -> AppResult<Self> {
        config.validate()?;
        Self::probe_and_build(config, search, llm).await
    }

    async fn probe_and_build(
        config: &AppConfig,
        search: Arc<dyn SearchClient>,
        llm: Arc<dyn LlmClient>,
    ) -> AppResult<Self> {
        search.probe().await.map_err(|e| {
            tracing::warn!("Search service probe failed: {}", e);
            AppError::from_setup(e)
        })?;
        llm.probe().await.map_err(|e| {
            tracing::warn!("Generation service probe failed: {}", e);
            AppError::from_setup(e)
        })?;

        tracing::info!(
            "Analyzer ready ({} index: {}, {} model: {})",
            search.provider_name(),
            search.index_name(),
            llm.provider_name(),
            config.openai.deployment
        );

        Ok(Self {
            search,
            llm,
            model: config.openai.deployment.clone(),
        })
    }

    /// Model deployment used for generation.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Index used for retrieval.
    pub fn index_name(&self) -> &str {
        self.search.index_name()
    }

    /// Fetch up to `limit` records for `query`, in the service's ranking order.
    ///
    /// `fields` defaults to the canonical seven fields. The query is passed
    /// through unchanged, even when empty. No match is an empty result.
    pub async fn retrieve(
        &self,
        query: &str,
        limit: u32,
        fields: Option<&[String]>,
    ) -> AppResult<Vec<ResultRecord>> {
        let mut request = SearchRequest::new(query, limit);
        if let Some(fields) = fields {
            request = request.with_select(fields.to_vec());
        }

        tracing::info!(
            "Searching index '{}' (top {})",
            self.search.index_name(),
            limit
        );

        let mut records = self.search.search(&request).await.map_err(|e| {
            tracing::error!("Search failed: {}", e);
            AppError::Search(e)
        })?;

        records.truncate(limit as usize);
        tracing::info!("Retrieved {} document(s)", records.len());

        Ok(records)
    }

    /// Render records into the source text the model reads.
    pub fn render(&self, records: &[ResultRecord]) -> String {
        render_sources(records)
    }

    /// Ask the model to answer `instruction` from `records` only.
    ///
    /// Records may come from [`Analyzer::retrieve`], from elsewhere, or both.
    /// Exactly one user message is sent. A response without completion text
    /// is an error, never an empty answer.
    pub async fn generate(&self, records: &[ResultRecord], instruction: &str) -> AppResult<String> {
        let sources = render_sources(records);
        let prompt = build_prompt(instruction, &sources)?;

        tracing::debug!(
            "Prompt {} built from {} record(s), {} source chars",
            prompt.metadata.template_id,
            records.len(),
            prompt.metadata.sources_chars
        );

        let request = LlmRequest::new(prompt.user, &self.model);
        let response = self.llm.complete(&request).await.map_err(|e| {
            tracing::error!("Generation failed: {}", e);
            AppError::Generation(e)
        })?;

        tracing::debug!(
            "Token usage - Prompt: {}, Completion: {}, Total: {}",
            response.usage.prompt_tokens,
            response.usage.completion_tokens,
            response.usage.total_tokens
        );

        response
            .content
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| {
                tracing::error!("Generation returned no completion text");
                AppError::Generation(ServiceError::EmptyCompletion)
            })
    }

    /// Retrieve for `query`, then answer `query` from what was retrieved.
    pub async fn search_and_generate(&self, query: &str, limit: u32) -> AppResult<Analysis> {
        let documents = self.retrieve(query, limit, None).await?;
        let response = self.generate(&documents, query).await?;

        Ok(Analysis {
            documents,
            response,
        })
    }
}
