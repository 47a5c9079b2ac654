//! Retrieval-augmented answering over RFP documents.
//!
//! `Analyzer` is a facade over two external services: a search index that
//! returns ranked RFP excerpts and a hosted model that writes an answer
//! grounded in them. Retrieval and generation are separate calls so that a
//! caller can inspect or edit the documents before paying for generation.

pub mod analyzer;
pub mod sources;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use analyzer::Analyzer;
pub use rfp_search::{ResultRecord, Skillsets, DEFAULT_SELECT};
pub use sources::render_sources;
pub use types::{Analysis, DEFAULT_QUERY, DEFAULT_TOP};
