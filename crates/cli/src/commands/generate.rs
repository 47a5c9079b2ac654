//! Generate command handler.
//!
//! Answers over records the caller already holds: the JSON output of an
//! earlier `search` or `ask`, plain-text documents from disk, or both. The
//! index is never queried.

use super::{print_json, print_report};
use clap::Args;
use rfp_core::{config::AppConfig, AppError, AppResult};
use rfp_rag::{Analysis, Analyzer, ResultRecord, DEFAULT_QUERY};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Answer from supplied records and documents without searching
#[derive(Args, Debug)]
pub struct GenerateCommand {
    /// Instruction for the model (defaults to the standard RFP summary question)
    #[arg(short, long)]
    pub instruction: Option<String>,

    /// JSON file holding records (`search --json` or `ask --json` output)
    #[arg(short, long)]
    pub records: Option<PathBuf>,

    /// Plain-text document to include as a source (repeatable)
    #[arg(short, long)]
    pub document: Vec<PathBuf>,

    /// Output documents and answer as JSON
    #[arg(long)]
    pub json: bool,
}

/// Accepted shapes of a records file.
#[derive(Deserialize)]
#[serde(untagged)]
enum RecordsFile {
    Records(Vec<ResultRecord>),
    Analysis { documents: Vec<ResultRecord> },
}

impl RecordsFile {
    fn into_records(self) -> Vec<ResultRecord> {
        match self {
            RecordsFile::Records(records) => records,
            RecordsFile::Analysis { documents } => documents,
        }
    }
}

impl GenerateCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing generate command");
        tracing::debug!("Generate command options: {:?}", self);

        let records = self.collect_records()?;
        let instruction = self.instruction.as_deref().unwrap_or(DEFAULT_QUERY);

        let analyzer = Analyzer::connect(config).await?;
        let response = analyzer.generate(&records, instruction).await?;

        if self.json {
            print_json(&Analysis {
                documents: records,
                response,
            })?;
        } else {
            let sources = analyzer.render(&records);
            print_report(records.len(), &sources, &response);
        }

        Ok(())
    }

    /// Records file entries first, then each document in argument order.
    fn collect_records(&self) -> AppResult<Vec<ResultRecord>> {
        let mut records = match &self.records {
            Some(path) => load_records(path)?,
            None => Vec::new(),
        };

        for path in &self.document {
            records.push(load_document(path)?);
        }

        tracing::info!("Generating over {} record(s)", records.len());
        Ok(records)
    }
}

fn load_records(path: &Path) -> AppResult<Vec<ResultRecord>> {
    let content = std::fs::read_to_string(path)?;
    let file: RecordsFile = serde_json::from_str(&content).map_err(|e| {
        AppError::Serialization(format!("Invalid records file {:?}: {}", path, e))
    })?;

    Ok(file.into_records())
}

fn load_document(path: &Path) -> AppResult<ResultRecord> {
    let text = std::fs::read_to_string(path)?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    tracing::debug!("Loaded document {} ({} chars)", name, text.chars().count());
    Ok(ResultRecord::document(name, text))
}
