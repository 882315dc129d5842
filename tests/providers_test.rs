//! Adapter tests against a local mock HTTP server.

use std::time::Duration;

use serde_json::json;
use transcript_refiner::models::ProviderConfig;
use transcript_refiner::{
    AppConfig, GenerationFallbackChain, HuggingFaceClient, OllamaClient, OllamaConfig,
    ProviderAdapter, RefineError, RefineMode, RefinementMethod, Refiner, Sentiment, Transcript,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn hf_template(server: &MockServer) -> String {
    format!("{}/models/{{model}}", server.uri())
}

fn hf_client(token: Option<&str>) -> HuggingFaceClient {
    HuggingFaceClient::new(token.map(str::to_string), Duration::from_secs(5)).unwrap()
}

fn ollama_client(server: &MockServer) -> OllamaClient {
    OllamaClient::new(OllamaConfig {
        endpoint: format!("{}/api/generate", server.uri()),
        model: "llama3.2:3b".to_string(),
        temperature: 0.2,
        max_tokens: 128,
    })
    .unwrap()
}

#[tokio::test]
async fn test_hf_sends_bearer_token_when_authenticated() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gated-model"))
        .and(header("authorization", "Bearer hf_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"generated_text": "ok"}])))
        .expect(1)
        .mount(&server)
        .await;

    let config = ProviderConfig::from_template(&hf_template(&server), "gated-model", true);
    let body = hf_client(Some("hf_test"))
        .call(&config, &json!({"inputs": "x"}))
        .await;
    assert_eq!(body, Some(json!([{"generated_text": "ok"}])));
}

#[tokio::test]
async fn test_hf_anonymous_call_omits_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/public-model"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"labels": [], "scores": []})))
        .mount(&server)
        .await;

    let config = ProviderConfig::from_template(&hf_template(&server), "public-model", false);
    assert!(hf_client(Some("hf_test")).call(&config, &json!({})).await.is_some());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_hf_failures_are_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/busy"))
        .respond_with(ResponseTemplate::new(503).set_body_string("model is loading"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/models/garbled"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let client = hf_client(Some("hf_test"));
    let template = hf_template(&server);
    for model in ["busy", "garbled"] {
        let config = ProviderConfig::from_template(&template, model, true);
        assert!(client.call(&config, &json!({})).await.is_none(), "{model}");
    }

    // Auth requested without a token never reaches the server
    assert!(client.has_token());
    assert!(!hf_client(None).has_token());
    let requests_before = server.received_requests().await.unwrap().len();
    let config = ProviderConfig::from_template(&template, "busy", true);
    assert!(hf_client(None).call(&config, &json!({})).await.is_none());
    assert_eq!(server.received_requests().await.unwrap().len(), requests_before);
}

#[tokio::test]
async fn test_chain_over_http_returns_empty_when_all_fail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/model-a"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/models/model-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = hf_client(Some("hf_test"));
    let candidates = vec!["model-a".to_string(), "model-2".to_string()];
    let mut chain = GenerationFallbackChain::new(&client, candidates, &hf_template(&server));

    assert_eq!(chain.generate("Hello").await, "");
    // Both candidates are tried with and without the token
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 4);
    assert!(!requests[3].headers.contains_key("authorization"));
    assert!(requests[3].url.path().ends_with("/model-2"));
}

#[tokio::test]
async fn test_chain_over_http_uses_second_candidate() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/model-a"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/models/model-b"))
        .and(body_partial_json(json!({"inputs": "<s>[INST] Hello [/INST]"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"generated_text": "<s>[INST] Hello [/INST] Hi there"}])),
        )
        .mount(&server)
        .await;

    let client = hf_client(Some("hf_test"));
    let candidates = vec!["model-a".to_string(), "model-b".to_string()];
    let mut chain = GenerationFallbackChain::new(&client, candidates, &hf_template(&server));

    assert_eq!(chain.generate("Hello").await, "Hi there");
    assert_eq!(chain.winning_model(), Some("model-b"));
}

#[tokio::test]
async fn test_ollama_generate_trims_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({
            "model": "llama3.2:3b",
            "prompt": "hello world",
            "stream": false,
            "options": {"num_predict": 128}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "  Hello, world.  "})))
        .expect(1)
        .mount(&server)
        .await;

    let text = ollama_client(&server)
        .generate("  hello \n world ", 0.2, 128, transcript_refiner::llm::ResponseFormat::Text)
        .await
        .unwrap();
    assert_eq!(text, "Hello, world.");
}

#[tokio::test]
async fn test_ollama_json_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({"format": "json", "options": {"temperature": 0.0}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "not json at all"})))
        .mount(&server)
        .await;

    let err = ollama_client(&server).generate_json("give me json").await.unwrap_err();
    assert!(matches!(err, RefineError::Parse { .. }));
}

#[tokio::test]
async fn test_ollama_server_error_is_transport() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = ollama_client(&server);
    let err = client.generate("x", 0.2, 16, transcript_refiner::llm::ResponseFormat::Text).await;
    assert!(matches!(err, Err(RefineError::Transport { .. })));
    assert!(client.refine("x", transcript_refiner::Language::English).await.is_err());
}

#[tokio::test]
async fn test_refiner_ollama_mode_with_bad_insights() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({"format": "json"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "{broken"})))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "We resolved the outage within an hour. Everyone was informed."
        })))
        .mount(&server)
        .await;

    let config = AppConfig {
        refine_mode: RefineMode::Ollama,
        ollama_host: server.uri(),
        language: "en".to_string(),
        ..Default::default()
    };
    let refiner = Refiner::new(config).unwrap();
    let report = refiner
        .process(&Transcript::from_text("umm we uh fixed the outage fast"), None, None)
        .await;

    assert_eq!(report.refinement_method, RefinementMethod::Ollama);
    assert_eq!(
        report.refinement.cleaned_text,
        "We resolved the outage within an hour. Everyone was informed."
    );
    assert_eq!(report.refinement.sentiment, Sentiment::Neutral);
    assert_eq!(report.refinement.key_points.len(), 2);
}

#[tokio::test]
async fn test_refiner_ollama_mode_unreachable_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let config = AppConfig {
        refine_mode: RefineMode::Ollama,
        ollama_host: server.uri(),
        language: "en".to_string(),
        ..Default::default()
    };
    let refiner = Refiner::new(config).unwrap();
    let (text, method) = refiner.refine_text("umm we we shipped it on time").await;
    assert_eq!(method, RefinementMethod::LocalFallback);
    assert_eq!(text, "We shipped it on time.");
}
