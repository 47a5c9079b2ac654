//! Generation service client for the RFP Analyzer.
//!
//! The `LlmClient` trait is the seam between the analyzer and the hosted
//! model. `AzureOpenAiClient` implements it over the Azure OpenAI chat
//! completions REST API.
//!
//! # Example
//! ```no_run
//! use rfp_core::OpenAiConfig;
//! use rfp_llm::{AzureOpenAiClient, LlmClient, LlmRequest};
//! use std::time::Duration;
//!
//! # async fn example(config: OpenAiConfig) -> Result<(), Box<dyn std::error::Error>> {
//! let client = AzureOpenAiClient::new(&config, Duration::from_secs(60))?;
//! let request = LlmRequest::new("Summarize the RFP", &config.deployment);
//! let response = client.complete(&request).await?;
//! println!("{}", response.content.unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod providers;

// Re-export main types
pub use client::{ChatMessage, LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use providers::AzureOpenAiClient;
