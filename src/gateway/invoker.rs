use super::types::{InferenceRequest, InferenceResult};
use crate::{
    Result,
    bedrock::{InvokeModelRequest, ModelInvoker, TitanTextRequest},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Issues the one backend call a request is allowed.
#[derive(Clone)]
pub struct Invoker {
    backend: Arc<dyn ModelInvoker>,
    model_id: String,
}

impl Invoker {
    pub fn new(backend: Arc<dyn ModelInvoker>, model_id: impl Into<String>) -> Self {
        Self {
            backend,
            model_id: model_id.into(),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub async fn invoke(&self, request: &InferenceRequest) -> Result<InferenceResult> {
        let envelope = TitanTextRequest {
            input_text: &request.prompt,
            text_generation_config: &request.config,
        };
        let body = serde_json::to_vec(&envelope)?;

        let response = self
            .backend
            .invoke_model(InvokeModelRequest::json(&self.model_id, body))
            .await?;

        let payload: Value = serde_json::from_slice(&response.body)?;
        let result = InferenceResult::from_payload(payload);

        debug!(
            "Model {} returned {}",
            self.model_id,
            if result.output_text.is_some() {
                "output text"
            } else {
                "no output text"
            }
        );

        Ok(result)
    }
}
