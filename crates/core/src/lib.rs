//! RFP Analyzer Core Library
//!
//! This crate provides the foundational utilities shared by the analyzer crates:
//! - Error handling (`AppError`, `ServiceError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, OpenAiConfig, SearchConfig};
pub use error::{AppError, AppResult, ServiceError, ServiceResult};
