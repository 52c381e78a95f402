use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use serde_json::Value;
use std::sync::Arc;
use titan_gateway::{
    bedrock::ModelInvoker,
    config::{Config, ValidationMode},
    gateway::Gateway,
    server::{self, AppState},
};

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.logs.level = "debug".to_string();
    config.bedrock.api_key = Some("test-api-key".to_string());
    config
}

pub fn create_test_app(backend: Arc<dyn ModelInvoker>) -> Router {
    create_test_app_with_mode(backend, ValidationMode::Lenient)
}

pub fn create_test_app_with_mode(backend: Arc<dyn ModelInvoker>, mode: ValidationMode) -> Router {
    let mut config = create_test_config();
    config.normalizer.mode = mode;
    server::router(AppState::new(Gateway::new(backend, &config)))
}

pub fn post_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 9090
  logs:
    level: "debug"

bedrock:
  region: "eu-central-1"
  api_key: "test-api-key"
  model_id: "amazon.titan-text-express-v1"
  timeout_secs: 5

normalizer:
  mode: "strict"
"#;

/// Configuration with only the sections a deployment usually overrides
pub const MINIMAL_CONFIG_YAML: &str = r#"
bedrock:
  endpoint: "http://localhost:4566"
"#;

/// Invalid configuration YAML for testing error cases
pub const INVALID_CONFIG_YAML: &str = r#"
server:
  port: "not-a-number"
"#;

pub const INVALID_MODE_YAML: &str = r#"
normalizer:
  mode: "paranoid"
"#;
