use axum::body::{Body, to_bytes};
use axum::http::Request;
use tower::ServiceExt;

use super::*;
use crate::config::AppConfig;

fn test_state() -> AppState {
    AppState::new(AppConfig {
        port: 3000,
        project_id: "proj-1".into(),
        public_key: "pk-1".into(),
        auth_url: "https://auth.example.test".into(),
        api_url: "https://api.example.test".into(),
    })
}

#[tokio::test]
async fn config_endpoint_returns_public_config() {
    let resp = api_routes(test_state())
        .oneshot(Request::get(CONFIG_ENDPOINT).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let config: ClientConfig = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(config, test_state().config.public_config());
}

#[tokio::test]
async fn healthz_is_ok() {
    let resp = api_routes(test_state())
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_api_path_is_not_found() {
    let resp = api_routes(test_state())
        .oneshot(Request::get("/api/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
