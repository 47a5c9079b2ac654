//! Search command handler.
//!
//! Retrieval only. The model is never called, so this is the cheap first half
//! of the two-phase workflow; `--json` output feeds `rfp generate --records`.

use super::print_json;
use clap::Args;
use rfp_core::{config::AppConfig, AppResult};
use rfp_rag::{render_sources, Analyzer, DEFAULT_TOP};

/// Search the index and print the matching records
#[derive(Args, Debug)]
pub struct SearchCommand {
    /// Free-text query (may be empty)
    pub query: String,

    /// Maximum number of documents to return (1-50)
    #[arg(short, long, default_value_t = DEFAULT_TOP, value_parser = clap::value_parser!(u32).range(1..=50))]
    pub top: u32,

    /// Comma-separated fields to fetch instead of the default set
    #[arg(short, long, value_delimiter = ',')]
    pub select: Option<Vec<String>>,

    /// Output records as a JSON array
    #[arg(long)]
    pub json: bool,
}

impl SearchCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing search command");
        tracing::debug!("Search command options: {:?}", self);

        let analyzer = Analyzer::connect(config).await?;
        let records = analyzer
            .retrieve(&self.query, self.top, self.select.as_deref())
            .await?;

        if self.json {
            print_json(&records)?;
        } else {
            println!("Found {} documents matching the query.", records.len());
            if !records.is_empty() {
                println!();
                println!("{}", render_sources(&records));
            }
        }

        Ok(())
    }
}
