//! Router-level tests for the refresh trigger and the read endpoint
//!
//! Run with: cargo test -p velara-api --test api_routes

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tower::util::ServiceExt;
use velara_api::{build_router, AppState};
use velara_core::{ArticleCollection, ProviderDescriptor};
use velara_providers::{PromptSet, ProviderClient, ProviderError, ProviderFailure};
use velara_services::{
    ArticleStore, GenerationOrchestrator, MemoryArticleStore, RefreshJob, StoreError,
};

const SECRET: &str = "test-cron-secret";

/// Provider double: models listed in `decks` answer with a valid deck, the rest fail
struct FakeProvider {
    decks: Vec<&'static str>,
    calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    fn answering(decks: &[&'static str]) -> Arc<Self> {
        Arc::new(Self {
            decks: decks.to_vec(),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProviderClient for FakeProvider {
    async fn generate(
        &self,
        model_id: &str,
        _system_prompt: &str,
        _user_prompt: &str,
    ) -> Result<String, ProviderError> {
        self.calls.lock().unwrap().push(model_id.to_string());

        if !self.decks.iter().any(|m| *m == model_id) {
            return Err(ProviderError::new(
                model_id,
                ProviderFailure::ApiError {
                    status: 503,
                    message: "model overloaded".to_string(),
                },
            ));
        }

        Ok(json!({
            "news": [
                {"id": 1, "headline": "The Death of the Junior Developer", "tag": "EVO.001",
                 "readTime": "04:15", "summary": "The ladder collapsed.",
                 "content": "One.\n\nTwo.", "visualColor": "bg-[#ccff00]"},
                {"id": 2, "headline": "Synthetic Truth", "tag": "TRUTH.002",
                 "summary": "Trust nothing on a screen.", "visualColor": "bg-[#ff4d00]",
                 "sourceUrl": "https://example.com/mirror-2"},
                {"id": 3, "headline": "Intelligence as a Utility", "summary": "Hoard questions."}
            ]
        })
        .to_string())
    }
}

/// Store whose every operation fails
struct BrokenStore;

#[async_trait]
impl ArticleStore for BrokenStore {
    async fn get(&self) -> Result<Option<ArticleCollection>, StoreError> {
        Err(StoreError::LockError)
    }

    async fn put(&self, _collection: &ArticleCollection) -> Result<(), StoreError> {
        Err(StoreError::LockError)
    }

    async fn last_updated(&self) -> Result<Option<DateTime<Utc>>, StoreError> {
        Err(StoreError::LockError)
    }
}

/// Store holding a row that no longer decodes
struct CorruptStore;

#[async_trait]
impl ArticleStore for CorruptStore {
    async fn get(&self) -> Result<Option<ArticleCollection>, StoreError> {
        Err(StoreError::Corrupt("expected 3 articles, got 1".to_string()))
    }

    async fn put(&self, _collection: &ArticleCollection) -> Result<(), StoreError> {
        Ok(())
    }

    async fn last_updated(&self) -> Result<Option<DateTime<Utc>>, StoreError> {
        Ok(Some(Utc::now()))
    }
}

fn app_with(provider: Arc<FakeProvider>, store: Arc<dyn ArticleStore>) -> Router {
    let job = RefreshJob::new(
        GenerationOrchestrator::new(provider),
        store.clone(),
        vec![
            ProviderDescriptor::new("openai/o3-deep-research"),
            ProviderDescriptor::new("perplexity/sonar-pro-search"),
        ],
        PromptSet::default(),
        Some(SECRET.to_string()),
    );
    build_router(AppState::new(Arc::new(job), store))
}

fn cron_request(method: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri("/api/cron");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

#[tokio::test]
async fn test_news_is_empty_array_before_first_refresh() {
    let app = app_with(FakeProvider::answering(&[]), Arc::new(MemoryArticleStore::new()));

    let response = app.oneshot(get("/api/news")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"[]");
}

#[tokio::test]
async fn test_refresh_rejects_bad_credentials() {
    let provider = FakeProvider::answering(&["openai/o3-deep-research"]);
    let app = app_with(provider.clone(), Arc::new(MemoryArticleStore::new()));

    for token in [None, Some("wrong-secret")] {
        let response = app.clone().oneshot(cron_request("GET", token)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_bytes(response).await, b"Unauthorized");
    }

    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn test_refresh_then_read_round_trip() {
    let provider = FakeProvider::answering(&["perplexity/sonar-pro-search"]);
    let app = app_with(provider.clone(), Arc::new(MemoryArticleStore::new()));

    let response = app
        .clone()
        .oneshot(cron_request("GET", Some(SECRET)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let refreshed: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(refreshed["success"], true);
    assert_eq!(refreshed["providerUsed"], "perplexity/sonar-pro-search");
    assert_eq!(
        provider.calls(),
        vec!["openai/o3-deep-research", "perplexity/sonar-pro-search"]
    );

    let response = app.oneshot(get("/api/news")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CACHE_CONTROL],
        "s-maxage=60, stale-while-revalidate=300"
    );
    let served = body_bytes(response).await;

    let written: ArticleCollection = serde_json::from_value(refreshed["articles"].clone()).unwrap();
    assert_eq!(served, serde_json::to_vec(&written).unwrap());

    let served: Value = serde_json::from_slice(&served).unwrap();
    assert_eq!(served, refreshed["articles"]);
    assert_eq!(served[1]["sourceUrl"], "https://example.com/mirror-2");
    assert!(served[2].get("visualColor").is_none());
}

#[tokio::test]
async fn test_refresh_accepts_post() {
    let app = app_with(
        FakeProvider::answering(&["openai/o3-deep-research"]),
        Arc::new(MemoryArticleStore::new()),
    );

    let response = app.oneshot(cron_request("POST", Some(SECRET))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_total_failure_reports_attempts_and_keeps_store_empty() {
    let provider = FakeProvider::answering(&[]);
    let app = app_with(provider.clone(), Arc::new(MemoryArticleStore::new()));

    let response = app
        .clone()
        .oneshot(cron_request("GET", Some(SECRET)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["error"], "All models failed to generate news");
    assert!(body["lastError"]
        .as_str()
        .unwrap()
        .contains("perplexity/sonar-pro-search"));

    let attempts = body["attempts"].as_array().unwrap();
    assert_eq!(attempts.len(), 2);
    assert_eq!(attempts[0]["modelId"], "openai/o3-deep-research");
    assert_eq!(attempts[1]["modelId"], "perplexity/sonar-pro-search");

    let response = app.oneshot(get("/api/news")).await.unwrap();
    assert_eq!(body_bytes(response).await, b"[]");
}

#[tokio::test]
async fn test_store_failure_on_read_is_500() {
    let app = app_with(FakeProvider::answering(&[]), Arc::new(BrokenStore));

    let response = app.oneshot(get("/api/news")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["error"], "Failed to fetch news");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_store_failure_on_refresh_is_500() {
    let app = app_with(
        FakeProvider::answering(&["openai/o3-deep-research"]),
        Arc::new(BrokenStore),
    );

    let response = app.oneshot(cron_request("GET", Some(SECRET))).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["error"], "Failed to store news");
}

#[tokio::test]
async fn test_health_reports_deck_state() {
    let store = Arc::new(MemoryArticleStore::new());
    let app = app_with(FakeProvider::answering(&["openai/o3-deep-research"]), store);

    let response = app.clone().oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["hasDeck"], false);
    assert!(body["updatedAt"].is_null());

    app.clone()
        .oneshot(cron_request("GET", Some(SECRET)))
        .await
        .unwrap();

    let response = app.clone().oneshot(get("/api/health")).await.unwrap();
    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["hasDeck"], true);
    assert!(body["updatedAt"].is_string());

    let response = app.oneshot(get("/api/health/live")).await.unwrap();
    assert_eq!(body_bytes(response).await, b"OK");
}

#[tokio::test]
async fn test_health_unavailable_when_store_is_down() {
    let app = app_with(FakeProvider::answering(&[]), Arc::new(BrokenStore));

    let response = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_health_agrees_with_news_on_corrupt_deck() {
    let app = app_with(FakeProvider::answering(&[]), Arc::new(CorruptStore));

    let response = app.clone().oneshot(get("/api/news")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["status"], "unavailable");
}
