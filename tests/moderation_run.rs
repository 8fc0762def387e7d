//! End-to-end batch runs against a mocked moderation endpoint.
//!
//! Uses wiremock for HTTP and a temp directory for the prompt and results files.

use std::fs;
use std::path::Path;

use prompt_moderator::api::{ConfigError, ModerationError};
use prompt_moderator::commands::{self, moderate};
use prompt_moderator::core::config::Settings;
use prompt_moderator::core::storage::load_results;
use prompt_moderator::{ModerationClient, RunError};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROMPTS: &str = "\
#LABEL: violent
I will hurt you.
---
What's the weather like?
---
#LABEL:
   blank label   
---
";

fn moderation_body(flagged: bool) -> Value {
    json!({
        "id": "modr-123",
        "model": "omni-moderation-latest",
        "results": [{
            "flagged": flagged,
            "categories": {"violence": flagged},
            "category_scores": {"violence": if flagged { 0.97 } else { 0.01 }}
        }]
    })
}

fn test_settings(dir: &Path, server: &MockServer) -> Settings {
    let mut settings = Settings::default();
    settings.prompts_file = dir.join("prompts.txt");
    settings.results_dir = dir.join("results");
    settings.provider.base_url = format!("{}/v1", server.uri());
    settings
}

async fn mock_input(server: &MockServer, input: &str, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/v1/moderations"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_json(json!({"model": "omni-moderation-latest", "input": input})))
        .respond_with(template)
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_moderates_every_prompt_in_order() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let settings = test_settings(dir.path(), &server);
    fs::write(&settings.prompts_file, PROMPTS).unwrap();

    mock_input(
        &server,
        "I will hurt you.",
        ResponseTemplate::new(200).set_body_json(moderation_body(true)),
    )
    .await;
    mock_input(
        &server,
        "What's the weather like?",
        ResponseTemplate::new(200).set_body_json(moderation_body(false)),
    )
    .await;
    mock_input(
        &server,
        "blank label",
        ResponseTemplate::new(200).set_body_json(moderation_body(false)),
    )
    .await;

    let client = ModerationClient::new(&settings, "test-key").unwrap();
    let summary = moderate::run(&settings, &client).await.expect("run failed");
    assert_eq!(summary.moderated, 3);
    assert_eq!(summary.flagged, 1);

    let results = load_results(&settings.results_path()).unwrap();
    assert_eq!(results.len(), 3);

    assert_eq!(results[0]["id"], "prompt-001");
    assert_eq!(results[0]["label"], "violent");
    assert_eq!(results[0]["input"], "I will hurt you.");
    assert_eq!(results[0]["response"], moderation_body(true));

    assert_eq!(results[1]["id"], "prompt-002");
    assert!(results[1]["label"].is_null());

    assert_eq!(results[2]["id"], "prompt-003");
    assert_eq!(results[2]["label"], "");
    assert_eq!(results[2]["input"], "blank label");

    for entry in &results {
        assert!(entry["timestamp"].as_str().is_some_and(|t| t.contains('T')));
    }

    let received = server.received_requests().await.unwrap();
    let inputs: Vec<Value> = received
        .iter()
        .map(|r| serde_json::from_slice::<Value>(&r.body).unwrap()["input"].clone())
        .collect();
    assert_eq!(
        inputs,
        vec![
            json!("I will hurt you."),
            json!("What's the weather like?"),
            json!("blank label")
        ]
    );
}

#[tokio::test]
async fn test_appends_to_existing_results() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let settings = test_settings(dir.path(), &server);
    fs::write(&settings.prompts_file, "only prompt").unwrap();
    fs::create_dir_all(&settings.results_dir).unwrap();
    fs::write(settings.results_path(), r#"[{"id": "prompt-001", "from": "last run"}]"#).unwrap();

    mock_input(
        &server,
        "only prompt",
        ResponseTemplate::new(200).set_body_json(moderation_body(false)),
    )
    .await;

    let client = ModerationClient::new(&settings, "test-key").unwrap();
    moderate::run(&settings, &client).await.expect("run failed");

    let results = load_results(&settings.results_path()).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["from"], "last run");
    assert_eq!(results[1]["input"], "only prompt");
}

#[tokio::test]
async fn test_api_error_stops_run_and_keeps_earlier_entries() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let settings = test_settings(dir.path(), &server);
    fs::write(&settings.prompts_file, "one\n---\ntwo\n---\nthree").unwrap();

    mock_input(
        &server,
        "one",
        ResponseTemplate::new(200).set_body_json(moderation_body(false)),
    )
    .await;
    mock_input(
        &server,
        "two",
        ResponseTemplate::new(500).set_body_string("upstream exploded"),
    )
    .await;

    let client = ModerationClient::new(&settings, "test-key").unwrap();
    let err = moderate::run(&settings, &client).await.unwrap_err();

    match err {
        RunError::Moderation {
            id,
            source: ModerationError::Api { status, body },
        } => {
            assert_eq!(id, "prompt-002");
            assert_eq!(status, 500);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let results = load_results(&settings.results_path()).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["input"], "one");
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_empty_prompt_file_still_creates_results_dir() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let settings = test_settings(dir.path(), &server);
    fs::write(&settings.prompts_file, "\n---\n").unwrap();

    let client = ModerationClient::new(&settings, "test-key").unwrap();
    let summary = moderate::run(&settings, &client).await.expect("run failed");

    assert_eq!(summary.moderated, 0);
    assert!(settings.results_dir.is_dir());
    assert!(!settings.results_path().exists());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_prompts_file_is_reported() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let settings = test_settings(dir.path(), &server);

    let client = ModerationClient::new(&settings, "test-key").unwrap();
    let err = moderate::run(&settings, &client).await.unwrap_err();

    assert!(matches!(err, RunError::Store(_)));
    assert!(err.to_string().contains("prompts.txt"));
}

#[tokio::test]
async fn test_dispatch_requires_api_key_before_any_io() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let mut settings = test_settings(dir.path(), &server);
    settings.provider.api_key_env = "PROMPT_MODERATOR_TEST_NEVER_SET".to_string();

    let err = commands::dispatch(&settings).await.unwrap_err();

    assert!(matches!(err, RunError::Config(ConfigError::MissingApiKey(_))));
    assert!(!settings.results_dir.exists());
}
