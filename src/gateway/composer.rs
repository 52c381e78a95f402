use super::types::{InferenceRequest, InferenceResult};
use crate::{Error, bedrock::TextGenerationConfig};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SUCCESS_MESSAGE: &str = "Amazon Titan Response";

/// Uniform body returned for every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseEnvelope {
    Success {
        message: String,
        input_prompt: Value,
        parameters_used: TextGenerationConfig,
        model_response: Value,
    },
    Failure {
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComposedResponse {
    pub status: StatusCode,
    pub envelope: ResponseEnvelope,
}

impl ComposedResponse {
    pub fn is_success(&self) -> bool {
        matches!(self.envelope, ResponseEnvelope::Success { .. })
    }
}

pub fn success(request: &InferenceRequest, result: InferenceResult) -> ComposedResponse {
    ComposedResponse {
        status: StatusCode::OK,
        envelope: ResponseEnvelope::Success {
            message: SUCCESS_MESSAGE.to_string(),
            input_prompt: request.prompt.clone(),
            parameters_used: request.config.clone(),
            model_response: result.raw_model_payload,
        },
    }
}

pub fn failure(error: &Error) -> ComposedResponse {
    ComposedResponse {
        status: error.status_code(),
        envelope: ResponseEnvelope::Failure {
            error: error.to_string(),
        },
    }
}

pub fn compose(
    request: &InferenceRequest,
    outcome: crate::Result<InferenceResult>,
) -> ComposedResponse {
    match outcome {
        Ok(result) => success(request, result),
        Err(e) => failure(&e),
    }
}

impl IntoResponse for ComposedResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}
