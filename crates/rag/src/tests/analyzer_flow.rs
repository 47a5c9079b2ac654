//! End-to-end analyzer behavior: construction, retrieval, generation.

use super::mocks::{valid_config, MockLlm, MockSearch};
use crate::{render_sources, Analyzer, ResultRecord, DEFAULT_TOP};
use rfp_core::{AppConfig, AppError, ServiceError};
use serde_json::json;
use std::error::Error as _;
use std::sync::Arc;

fn record(value: serde_json::Value) -> ResultRecord {
    serde_json::from_value(value).unwrap()
}

fn blank(config: &mut AppConfig, key: &str) {
    let slot = match key {
        "AZURE_SEARCH_ENDPOINT" => &mut config.search.endpoint,
        "AZURE_SEARCH_API_KEY" => &mut config.search.api_key,
        "AZURE_SEARCH_INDEX" => &mut config.search.index_name,
        "AZURE_OPENAI_ENDPOINT" => &mut config.openai.endpoint,
        "AZURE_OPENAI_API_KEY" => &mut config.openai.api_key,
        "AZURE_DEPLOYMENT_MODEL" => &mut config.openai.deployment,
        other => panic!("unknown setting {}", other),
    };
    slot.clear();
}

async fn analyzer(search: &Arc<MockSearch>, llm: &Arc<MockLlm>) -> Analyzer {
    Analyzer::connect_with(&valid_config(), search.clone(), llm.clone())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_any_empty_setting_fails_before_network() {
    let keys = [
        "AZURE_SEARCH_ENDPOINT",
        "AZURE_SEARCH_API_KEY",
        "AZURE_SEARCH_INDEX",
        "AZURE_OPENAI_ENDPOINT",
        "AZURE_OPENAI_API_KEY",
        "AZURE_DEPLOYMENT_MODEL",
    ];

    for key in keys {
        let mut config = valid_config();
        blank(&mut config, key);

        let search = Arc::new(MockSearch::returning(Vec::new()));
        let llm = Arc::new(MockLlm::answering(Some("unused")));

        match Analyzer::connect_with(&config, search.clone(), llm.clone()).await {
            Err(AppError::Config(msg)) => assert!(msg.contains(key), "{}", msg),
            Err(other) => panic!("Expected config error for {}, got {:?}", key, other),
            Ok(_) => panic!("Expected config error for {}", key),
        }

        assert_eq!(search.probes() + search.searches(), 0, "{}", key);
        assert_eq!(llm.probes() + llm.completions(), 0, "{}", key);
    }
}

#[tokio::test]
async fn test_connect_with_real_clients_rejects_incomplete_config() {
    let mut config = valid_config();
    config.openai.api_key = "  ".to_string();

    assert!(matches!(
        Analyzer::connect(&config).await,
        Err(AppError::Config(_))
    ));
}

#[tokio::test]
async fn test_rejected_credential_is_auth_error() {
    let search = Arc::new(
        MockSearch::returning(Vec::new()).with_probe(Err(ServiceError::from_status(401, "denied"))),
    );
    let llm = Arc::new(MockLlm::answering(Some("unused")));

    let err = Analyzer::connect_with(&valid_config(), search.clone(), llm.clone())
        .await
        .err()
        .expect("construction should fail");

    assert!(matches!(err, AppError::Auth(_)), "{:?}", err);
    assert_eq!(search.probes(), 1);
    assert_eq!(llm.probes(), 0);
}

#[tokio::test]
async fn test_unreachable_service_is_init_error() {
    let search = Arc::new(MockSearch::returning(Vec::new()));
    let llm = Arc::new(
        MockLlm::answering(Some("unused"))
            .with_probe(Err(ServiceError::Connect("connection refused".to_string()))),
    );

    let err = Analyzer::connect_with(&valid_config(), search.clone(), llm.clone())
        .await
        .err()
        .expect("construction should fail");

    assert!(matches!(err, AppError::Init(ServiceError::Connect(_))), "{:?}", err);
    assert_eq!(search.probes(), 1);
    assert_eq!(llm.probes(), 1);
}

#[tokio::test]
async fn test_successful_connect_probes_each_service_once() {
    let search = Arc::new(MockSearch::returning(Vec::new()));
    let llm = Arc::new(MockLlm::answering(Some("ok")));

    let analyzer = analyzer(&search, &llm).await;

    assert_eq!(search.probes(), 1);
    assert_eq!(llm.probes(), 1);
    assert_eq!(search.searches(), 0);
    assert_eq!(llm.completions(), 0);
    assert_eq!(analyzer.model(), "gpt-4o");
    assert_eq!(analyzer.index_name(), "mock-index");
}

#[tokio::test]
async fn test_retrieve_passes_request_through_and_keeps_order() {
    let hits = vec![
        record(json!({"@search.score": 0.4, "projectName": "low"})),
        record(json!({"@search.score": 2.0, "projectName": "high"})),
    ];
    let search = Arc::new(MockSearch::returning(hits.clone()));
    let llm = Arc::new(MockLlm::answering(Some("unused")));
    let analyzer = analyzer(&search, &llm).await;

    let fields = vec!["projectName".to_string(), "chunk".to_string()];
    let records = analyzer.retrieve("", 7, Some(&fields)).await.unwrap();

    assert_eq!(records, hits);
    let requests = search.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].query, "");
    assert_eq!(requests[0].top, 7);
    assert_eq!(requests[0].select, fields);
    assert_eq!(llm.completions(), 0);
}

#[tokio::test]
async fn test_retrieve_never_exceeds_limit() {
    let hits: Vec<ResultRecord> = (0..8)
        .map(|i| ResultRecord::new().with_field("projectName", format!("P{}", i)))
        .collect();
    let search = Arc::new(MockSearch::returning(hits));
    let llm = Arc::new(MockLlm::answering(Some("unused")));
    let analyzer = analyzer(&search, &llm).await;

    let records = analyzer.retrieve("cloud", 3, None).await.unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[2].text("projectName"), "P2");
    assert_eq!(search.requests.lock().unwrap()[0].select.len(), 7);
}

#[tokio::test]
async fn test_search_failure_is_wrapped_with_cause() {
    let search = Arc::new(MockSearch::failing(Err(ServiceError::from_status(
        400,
        "Invalid expression",
    ))));
    let llm = Arc::new(MockLlm::answering(Some("unused")));
    let analyzer = analyzer(&search, &llm).await;

    let err = analyzer.retrieve("(", 5, None).await.unwrap_err();

    assert!(err.to_string().starts_with("Error during search"));
    let cause = err.source().unwrap().downcast_ref::<ServiceError>().unwrap();
    assert!(matches!(cause, ServiceError::Status { status: 400, .. }));
    assert_eq!(search.searches(), 1);
}

// Scenario A: varied skillset shapes
#[tokio::test]
async fn test_varied_skillsets_render_three_blocks() {
    let hits = vec![
        record(json!({"projectName": "A", "skillsets": "Java"})),
        record(json!({"projectName": "B", "skillsets": ["React", "TypeScript"]})),
        record(json!({"projectName": "C"})),
    ];
    let search = Arc::new(MockSearch::returning(hits));
    let llm = Arc::new(MockLlm::answering(Some("unused")));
    let analyzer = analyzer(&search, &llm).await;

    let records = analyzer.retrieve("frontend", DEFAULT_TOP, None).await.unwrap();
    let rendered = analyzer.render(&records);

    let blocks: Vec<&str> = rendered.split("\n\n").collect();
    assert_eq!(blocks.len(), 3);
    assert!(blocks[0].contains("스킬셋: Java\n"));
    assert!(blocks[1].contains("스킬셋: React, TypeScript\n"));
    assert!(blocks[2].contains("스킬셋: \n"));
}

// Scenario B: generation timeout
#[tokio::test]
async fn test_generation_timeout_is_wrapped_and_not_retried() {
    let search = Arc::new(MockSearch::returning(Vec::new()));
    let llm = Arc::new(MockLlm::failing(Err(ServiceError::Timeout(
        "operation timed out".to_string(),
    ))));
    let analyzer = analyzer(&search, &llm).await;

    let docs = vec![ResultRecord::document("rfp.txt", "사업기간: 6개월")];
    let err = analyzer.generate(&docs, "사업기간은?").await.unwrap_err();

    assert!(matches!(err, AppError::Generation(_)), "{:?}", err);
    let cause = err.source().unwrap().downcast_ref::<ServiceError>().unwrap();
    assert_eq!(
        cause,
        &ServiceError::Timeout("operation timed out".to_string())
    );
    assert_eq!(llm.completions(), 1);
    assert_eq!(search.searches(), 0);
}

// Scenario C: no match is not an error
#[tokio::test]
async fn test_empty_query_with_no_results_still_answers() {
    let search = Arc::new(MockSearch::returning(Vec::new()));
    let llm = Arc::new(MockLlm::answering(Some("정보가 충분하지 않습니다")));
    let analyzer = analyzer(&search, &llm).await;

    let (documents, response) = analyzer
        .search_and_generate("", 5)
        .await
        .unwrap()
        .into_parts();

    assert!(documents.is_empty());
    assert_eq!(response, "정보가 충분하지 않습니다");
    assert_eq!(search.searches(), 1);
    assert_eq!(llm.completions(), 1);
    assert!(llm.last_request().messages[0]
        .content
        .ends_with("Query: \nSources:\n\n"));
}

#[tokio::test]
async fn test_generate_sends_exactly_one_user_message() {
    let search = Arc::new(MockSearch::returning(Vec::new()));
    let llm = Arc::new(MockLlm::answering(Some("요약")));
    let analyzer = analyzer(&search, &llm).await;

    let docs = vec![
        record(json!({"projectName": "검색 결과", "skillsets": ["SAP"], "importance": 0.7})),
        ResultRecord::document("upload.txt", "PT발표일: 2024-06-10"),
    ];
    let answer = analyzer.generate(&docs, "PT발표일은?").await.unwrap();
    assert_eq!(answer, "요약");

    let request = llm.last_request();
    assert_eq!(request.model, "gpt-4o");
    assert_eq!(request.messages.len(), 1);
    assert_eq!(request.messages[0].role, "user");

    let prompt = &request.messages[0].content;
    let rendered = render_sources(&docs);
    let query_at = prompt.find("Query: PT발표일은?\n").unwrap();
    let sources_at = prompt.find("Sources:\n").unwrap();
    let rendered_at = prompt.find(&rendered).unwrap();
    assert!(query_at < sources_at && sources_at < rendered_at);
    assert!(prompt.contains("프로젝트명: upload.txt\n"));
}

#[tokio::test]
async fn test_missing_completion_text_is_generation_error() {
    for content in [None, Some(""), Some("  \n ")] {
        let search = Arc::new(MockSearch::returning(Vec::new()));
        let llm = Arc::new(MockLlm::answering(content));
        let analyzer = analyzer(&search, &llm).await;

        let err = analyzer.generate(&[], "질문").await.unwrap_err();
        assert!(
            matches!(err, AppError::Generation(ServiceError::EmptyCompletion)),
            "{:?}",
            err
        );
        assert_eq!(llm.completions(), 1);
    }
}

#[tokio::test]
async fn test_search_failure_skips_generation() {
    let search = Arc::new(MockSearch::failing(Err(ServiceError::Timeout(
        "slow index".to_string(),
    ))));
    let llm = Arc::new(MockLlm::answering(Some("unused")));
    let analyzer = analyzer(&search, &llm).await;

    let err = analyzer.search_and_generate("q", 5).await.unwrap_err();

    assert!(matches!(err, AppError::Search(ServiceError::Timeout(_))));
    assert_eq!(llm.completions(), 0);
}
