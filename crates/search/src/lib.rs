//! Search service client for the RFP Analyzer.
//!
//! This crate owns the shape of a search hit (`ResultRecord`) and the
//! `SearchClient` seam. `AzureSearchClient` implements it over the Azure AI
//! Search REST API. Ranking is entirely the service's business: results are
//! returned in the order the service sends them.

pub mod client;
pub mod providers;
pub mod types;

// Re-export main types
pub use client::{SearchClient, SearchRequest};
pub use providers::AzureSearchClient;
pub use types::{fields, value_text, ResultRecord, Skillsets, DEFAULT_SELECT};
