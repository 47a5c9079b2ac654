//! Azure AI Search provider.
//!
//! Documents search API:
//! https://learn.microsoft.com/rest/api/searchservice/documents/search-post

use crate::client::{SearchClient, SearchRequest};
use crate::types::ResultRecord;
use rfp_core::error::ensure_success;
use rfp_core::{SearchConfig, ServiceError, ServiceResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Search request body.
#[derive(Debug, Serialize)]
struct SearchBody<'a> {
    search: &'a str,
    top: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    select: Option<String>,
}

/// Search response body.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    value: Vec<ResultRecord>,
}

/// Azure AI Search client bound to one index.
pub struct AzureSearchClient {
    /// Service endpoint without trailing slash
    endpoint: String,
    api_key: String,
    index_name: String,
    api_version: String,

    /// HTTP client
    client: reqwest::Client,
}

impl AzureSearchClient {
    /// Create a client from connection settings.
    ///
    /// No request is sent; only the HTTP client is built.
    pub fn new(config: &SearchConfig, timeout: Duration) -> ServiceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Client(e.to_string()))?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            index_name: config.index_name.clone(),
            api_version: config.api_version.clone(),
            client,
        })
    }

    fn search_url(&self) -> String {
        format!(
            "{}/indexes/{}/docs/search?api-version={}",
            self.endpoint, self.index_name, self.api_version
        )
    }

    fn count_url(&self) -> String {
        format!(
            "{}/indexes/{}/docs/$count?api-version={}",
            self.endpoint, self.index_name, self.api_version
        )
    }

    fn to_body<'a>(&self, request: &'a SearchRequest) -> SearchBody<'a> {
        SearchBody {
            search: &request.query,
            top: request.top,
            select: (!request.select.is_empty()).then(|| request.select.join(",")),
        }
    }
}

#[async_trait::async_trait]
impl SearchClient for AzureSearchClient {
    fn provider_name(&self) -> &str {
        "azure-search"
    }

    fn index_name(&self) -> &str {
        &self.index_name
    }

    async fn probe(&self) -> ServiceResult<()> {
        tracing::debug!("Probing index '{}' at {}", self.index_name, self.endpoint);

        let response = self
            .client
            .get(self.count_url())
            .header("api-key", &self.api_key)
            .send()
            .await?;

        ensure_success(response).await?;
        Ok(())
    }

    async fn search(&self, request: &SearchRequest) -> ServiceResult<Vec<ResultRecord>> {
        tracing::debug!("Search request: {:?}", request);

        let response = self
            .client
            .post(self.search_url())
            .header("api-key", &self.api_key)
            .json(&self.to_body(request))
            .send()
            .await?;

        let body: SearchResponse = ensure_success(response).await?.json().await?;

        tracing::debug!(
            "Index '{}' returned {} document(s)",
            self.index_name,
            body.value.len()
        );

        Ok(body.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fields;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(endpoint: &str) -> SearchConfig {
        SearchConfig {
            endpoint: endpoint.to_string(),
            api_key: "query-key".to_string(),
            index_name: "rfp-index".to_string(),
            api_version: "2023-11-01".to_string(),
        }
    }

    fn client_for(server: &MockServer) -> AzureSearchClient {
        AzureSearchClient::new(&config_for(&server.uri()), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_urls() {
        let client = AzureSearchClient::new(
            &config_for("https://svc.search.windows.net/"),
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(
            client.search_url(),
            "https://svc.search.windows.net/indexes/rfp-index/docs/search?api-version=2023-11-01"
        );
        assert_eq!(
            client.count_url(),
            "https://svc.search.windows.net/indexes/rfp-index/docs/$count?api-version=2023-11-01"
        );
        assert_eq!(client.index_name(), "rfp-index");
    }

    #[test]
    fn test_empty_select_is_omitted() {
        let client =
            AzureSearchClient::new(&config_for("https://svc"), Duration::from_secs(5)).unwrap();
        let request = SearchRequest::new("q", 2).with_select(Vec::new());

        let body = serde_json::to_value(client.to_body(&request)).unwrap();
        assert_eq!(body, json!({"search": "q", "top": 2}));
    }

    #[tokio::test]
    async fn test_search_preserves_service_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/indexes/rfp-index/docs/search"))
            .and(header("api-key", "query-key"))
            .and(body_json(json!({
                "search": "클라우드 전환",
                "top": 3,
                "select": "projectName,functionalRequirements,nonFunctionalRequirements,technicalRequirements,importance,skillsets,chunk"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "value": [
                    {"@search.score": 1.2, "projectName": "B"},
                    {"@search.score": 3.4, "projectName": "A"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let records = client_for(&server)
            .search(&SearchRequest::new("클라우드 전환", 3))
            .await
            .unwrap();

        let names: Vec<String> = records.iter().map(|r| r.text(fields::PROJECT_NAME)).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(records[1].score(), Some(3.4));
    }

    #[tokio::test]
    async fn test_no_match_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": []})))
            .mount(&server)
            .await;

        let records = client_for(&server)
            .search(&SearchRequest::new("", 5))
            .await
            .unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_bad_query_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("Invalid expression"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .search(&SearchRequest::new("(", 5))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ServiceError::Status {
                status: 400,
                body: "Invalid expression".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_missing_value_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .search(&SearchRequest::new("q", 5))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Malformed(_)), "{:?}", err);
    }

    #[tokio::test]
    async fn test_probe_uses_count_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/indexes/rfp-index/docs/$count"))
            .and(header("api-key", "query-key"))
            .respond_with(ResponseTemplate::new(200).set_body_string("42"))
            .expect(1)
            .mount(&server)
            .await;

        assert!(client_for(&server).probe().await.is_ok());
    }

    #[tokio::test]
    async fn test_probe_forbidden_is_auth() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        assert!(client_for(&server).probe().await.unwrap_err().is_auth());
    }
}
