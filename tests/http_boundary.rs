use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use hypegen::{
    router, AppState, CompletionGateway, CompletionRequest, GenerationOrchestrator, HypePipeline,
    ModelName, Platform, PromptBuilder, ProviderError, ProviderErrorCode, ResolvedTranscript,
    TranscriptError, TranscriptResolver, VideoId,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

const VALID: &str = r#"[{"topic":"t","hook":"h","description":"d","tags":["x","y"]},{"topic":"t2","hook":"h2","description":"d2","tags":[]},{"topic":"t3","hook":"h3","description":"d3","tags":["z"]}]"#;

struct FixedGateway(Result<Option<String>, ProviderError>);

#[async_trait]
impl CompletionGateway for FixedGateway {
    async fn complete(&self, _: &CompletionRequest) -> Result<Option<String>, ProviderError> {
        self.0.clone()
    }
}

struct FixedTranscript(Result<ResolvedTranscript, TranscriptError>);

#[async_trait]
impl TranscriptResolver for FixedTranscript {
    async fn resolve(&self, _: &VideoId) -> Result<ResolvedTranscript, TranscriptError> {
        self.0.clone()
    }
}

fn transcript_ok() -> Result<ResolvedTranscript, TranscriptError> {
    Ok(ResolvedTranscript {
        transcript: "today we ship the thing".to_string(),
        title: Some("Launch Day".to_string()),
    })
}

fn app(
    completion: Result<Option<String>, ProviderError>,
    transcript: Result<ResolvedTranscript, TranscriptError>,
) -> axum::Router {
    let orchestrator = GenerationOrchestrator::new(
        Arc::new(FixedGateway(completion)),
        Arc::new(PromptBuilder::new().unwrap()),
        ModelName::new("gpt-4o").unwrap(),
        Duration::from_secs(60),
    );
    let pipeline = HypePipeline::new(
        orchestrator,
        Arc::new(FixedTranscript(transcript)),
        Platform::DEFAULT_SET.to_vec(),
    );
    router(AppState::new(pipeline))
}

fn healthy_app() -> axum::Router {
    app(Ok(Some(VALID.to_string())), transcript_ok())
}

async fn post_raw(app: axum::Router, uri: &str, body: impl Into<Body>) -> (StatusCode, String) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn post(app: axum::Router, uri: &str, body: impl Into<Body>) -> (StatusCode, Value) {
    let (status, text) = post_raw(app, uri, body).await;
    (status, serde_json::from_str(&text).unwrap())
}

fn video_body() -> String {
    json!({ "url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ", "vibe": "Excited" }).to_string()
}

#[tokio::test]
async fn test_video_flow_succeeds() {
    let (status, text) = post_raw(healthy_app(), "/generate", video_body()).await;

    assert_eq!(status, StatusCode::OK);
    assert!(text.starts_with(r#"{"success":true,"data":{"twitter":["#));
    let instagram = text.find(r#""instagram":"#).unwrap();
    let tiktok = text.find(r#""tiktok":"#).unwrap();
    assert!(instagram < tiktok);

    let body: Value = serde_json::from_str(&text).unwrap();
    assert!(body.get("error").is_none());
    assert_eq!(body["data"].as_object().unwrap().len(), 3);
    assert_eq!(body["data"]["tiktok"][1]["hook"], json!("h2"));
    assert_eq!(body["data"]["twitter"][1]["tags"], json!([]));
    assert_eq!(body["data"]["twitter"][0]["tags"], json!(["x", "y"]));
}

#[tokio::test]
async fn test_topic_flow_on_api_prefix() {
    let body = json!({
        "contentType": "Stream VOD",
        "topic": "Speedrun",
        "highlight": "world record",
        "vibe": "Urgent"
    });

    let (status, body) = post(healthy_app(), "/api/generate", body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
}

#[tokio::test]
async fn test_bad_requests_are_400() {
    let cases = [
        "{not json".to_string(),
        "[]".to_string(),
        json!({ "vibe": "Funny" }).to_string(),
        json!({ "url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ" }).to_string(),
        json!({ "url": "https://example.com/video", "vibe": "Funny" }).to_string(),
        json!({ "topic": "t", "highlight": "h", "vibe": "Funny" }).to_string(),
        json!({ "topic": "t", "highlight": 3, "contentType": "c", "vibe": "Funny" }).to_string(),
    ];

    for body in cases {
        let (status, envelope) = post(healthy_app(), "/generate", body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {}", body);
        assert_eq!(envelope["success"], json!(false));
        assert!(envelope["error"].as_str().is_some_and(|e| !e.is_empty()));
        assert!(envelope.get("data").is_none());
    }
}

#[tokio::test]
async fn test_missing_transcript_is_404() {
    let video = VideoId::parse("dQw4w9WgXcQ").unwrap();
    for error in [
        TranscriptError::Disabled { video_id: video.to_string() },
        TranscriptError::NotFound { video_id: video.to_string() },
    ] {
        let app = app(Ok(Some(VALID.to_string())), Err(error));
        let (status, body) = post(app, "/generate", video_body()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], json!(false));
    }
}

#[tokio::test]
async fn test_transcript_upstream_failure_is_502() {
    let app = app(
        Ok(Some(VALID.to_string())),
        Err(TranscriptError::Network("connection refused".to_string())),
    );

    let (status, body) = post(app, "/generate", video_body()).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn test_provider_status_is_passed_through() {
    let app = app(
        Err(ProviderError::new(
            ProviderErrorCode::InvalidApiKey,
            Some(401),
            "Incorrect API key provided",
        )),
        transcript_ok(),
    );

    let (status, body) = post(app, "/generate", video_body()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body["error"],
        json!("Completion provider error (invalid_api_key): Incorrect API key provided")
    );
}

#[tokio::test]
async fn test_provider_error_without_status_is_500() {
    let app = app(Err(ProviderError::network("dns lookup failed")), transcript_ok());

    let (status, _) = post(app, "/generate", video_body()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_invalid_model_output_is_500_without_raw_text() {
    let app = app(
        Ok(Some("Sure! Here are your tweets: not json".to_string())),
        transcript_ok(),
    );

    let (status, body) = post(app, "/generate", video_body()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Invalid JSON format received from LLM for "));
    assert!(!error.contains("Here are your tweets"));
}

#[tokio::test]
async fn test_malformed_variation_is_500_without_model_text() {
    let leaky = r#"[{"topic":"t","hook":"h","description":"d","tags":"SECRET MODEL PROSE"},{"topic":"t2","hook":"h2","description":"d2","tags":[]},{"topic":"t3","hook":"h3","description":"d3","tags":[]}]"#;
    let app = app(Ok(Some(leaky.to_string())), transcript_ok());

    let (status, text) = post_raw(app, "/generate", video_body()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!text.contains("SECRET MODEL PROSE"));
    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["success"], json!(false));
    assert!(body["error"]
        .as_str()
        .unwrap()
        .ends_with("Variation at index 0 is malformed."));
}

#[tokio::test]
async fn test_oversized_body_gets_json_400() {
    let body = json!({
        "contentType": "Stream VOD",
        "topic": "x".repeat(70 * 1024),
        "highlight": "world record",
        "vibe": "Urgent"
    });

    let (status, text) = post_raw(healthy_app(), "/generate", body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let envelope: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(envelope["success"], json!(false));
    assert!(envelope["error"].as_str().is_some_and(|e| !e.is_empty()));
    assert!(envelope.get("data").is_none());
}

#[tokio::test]
async fn test_health_and_unknown_routes() {
    let response = healthy_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(serde_json::from_slice::<Value>(&bytes).unwrap(), json!({ "status": "ok" }));

    let (status, body) = post(healthy_app(), "/nowhere", "{}").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "error": "Not found" }));
}
