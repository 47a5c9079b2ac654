//! Grounded prompt construction for the RFP Analyzer.
//!
//! The instruction template is fixed. It has two substitution points, the
//! caller's query and the rendered sources, always filled in that order and
//! never truncated.

pub mod builder;
pub mod template;
pub mod types;

// Re-export main types
pub use builder::build_prompt;
pub use template::{GROUNDED_PROMPT, GROUNDED_PROMPT_ID};
pub use types::{BuiltPrompt, BuiltPromptMetadata};
