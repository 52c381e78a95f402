use super::types::HealthResponse;
use crate::{
    Error,
    gateway::{ComposedResponse, Gateway, composer},
};
use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Json, Response},
};
use std::{any::Any, sync::Arc};
use tracing::{debug, error};

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
}

impl AppState {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }
}

/// Accepts any body: API-gateway events and malformed payloads must reach the
/// normalizer instead of being rejected by an extractor.
pub async fn inference(State(state): State<AppState>, body: Bytes) -> ComposedResponse {
    debug!("Received inference request ({} bytes)", body.len());
    state.gateway.handle(&body).await
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model_id: state.gateway.model_id().to_string(),
    })
}

pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!("Handler panicked: {}", detail);

    composer::failure(&Error::internal(detail)).into_response()
}
