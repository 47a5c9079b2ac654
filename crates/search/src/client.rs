//! Search client abstraction and request type.

use crate::types::{ResultRecord, DEFAULT_SELECT};
use rfp_core::ServiceResult;
use serde::{Deserialize, Serialize};

/// One search call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text query, passed through unchanged (may be empty)
    pub query: String,

    /// Maximum number of hits to return
    pub top: u32,

    /// Fields to fetch for each hit
    pub select: Vec<String>,
}

impl SearchRequest {
    /// Create a request fetching the default field set.
    pub fn new(query: impl Into<String>, top: u32) -> Self {
        Self {
            query: query.into(),
            top,
            select: DEFAULT_SELECT.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Replace the selected fields.
    pub fn with_select(mut self, select: Vec<String>) -> Self {
        self.select = select;
        self
    }
}

/// Trait for search service providers.
#[async_trait::async_trait]
pub trait SearchClient: Send + Sync {
    /// Get the provider name (e.g., "azure-search").
    fn provider_name(&self) -> &str;

    /// Index this client is bound to.
    fn index_name(&self) -> &str;

    /// Verify that the index is reachable and accepts the credential.
    async fn probe(&self) -> ServiceResult<()>;

    /// Run one query and return every hit, in service order.
    async fn search(&self, request: &SearchRequest) -> ServiceResult<Vec<ResultRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_select() {
        let request = SearchRequest::new("cloud migration", 5);
        assert_eq!(request.top, 5);
        assert_eq!(request.select.len(), 7);
        assert_eq!(request.select[0], "projectName");
        assert_eq!(request.select[6], "chunk");
    }

    #[test]
    fn test_with_select() {
        let request =
            SearchRequest::new("", 3).with_select(vec!["projectName".to_string()]);
        assert_eq!(request.select, vec!["projectName".to_string()]);
        assert!(request.query.is_empty());
    }
}
