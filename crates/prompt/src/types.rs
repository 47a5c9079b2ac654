//! Prompt types.

use serde::{Deserialize, Serialize};

/// A filled prompt ready to be sent as the single user message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPrompt {
    /// User message text
    pub user: String,

    /// Metadata about the built prompt
    pub metadata: BuiltPromptMetadata,
}

/// Metadata about a built prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPromptMetadata {
    /// Template the prompt was built from
    #[serde(rename = "templateId")]
    pub template_id: String,

    /// Characters of query text substituted
    #[serde(rename = "queryChars")]
    pub query_chars: usize,

    /// Characters of rendered sources substituted
    #[serde(rename = "sourcesChars")]
    pub sources_chars: usize,
}

impl BuiltPrompt {
    /// Create a new built prompt.
    pub fn new(user: String, template_id: &str, query: &str, sources: &str) -> Self {
        Self {
            user,
            metadata: BuiltPromptMetadata {
                template_id: template_id.to_string(),
                query_chars: query.chars().count(),
                sources_chars: sources.chars().count(),
            },
        }
    }
}
