//! Ask command handler.
//!
//! Searches the index for the question, then answers it from the results.

use super::{print_json, print_report};
use clap::Args;
use rfp_core::{config::AppConfig, AppResult};
use rfp_rag::{Analyzer, DEFAULT_QUERY, DEFAULT_TOP};

/// Search, then answer from the retrieved documents
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask (defaults to the standard RFP summary question)
    pub query: Option<String>,

    /// Number of documents to ground the answer on (1-50)
    #[arg(short, long, default_value_t = DEFAULT_TOP, value_parser = clap::value_parser!(u32).range(1..=50))]
    pub top: u32,

    /// Output documents and answer as JSON
    #[arg(long)]
    pub json: bool,
}

impl Default for AskCommand {
    fn default() -> Self {
        Self {
            query: None,
            top: DEFAULT_TOP,
            json: false,
        }
    }
}

impl AskCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let query = self.query.as_deref().unwrap_or(DEFAULT_QUERY);

        let analyzer = Analyzer::connect(config).await?;
        let analysis = analyzer.search_and_generate(query, self.top).await?;

        if self.json {
            print_json(&analysis)?;
        } else {
            let sources = analyzer.render(&analysis.documents);
            print_report(analysis.documents.len(), &sources, &analysis.response);
        }

        Ok(())
    }
}
