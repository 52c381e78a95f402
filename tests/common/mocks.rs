use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use titan_gateway::{
    Error, Result,
    bedrock::{InvokeModelRequest, InvokeModelResponse, ModelInvoker},
};

/// Backend stub that answers with the prompt it was sent and echoes the
/// decoded request under `echo`.
#[derive(Debug, Default)]
pub struct EchoBackend {
    pub requests: Arc<Mutex<Vec<InvokeModelRequest>>>,
}

impl EchoBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_requests(&self) -> Vec<InvokeModelRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelInvoker for EchoBackend {
    async fn invoke_model(&self, request: InvokeModelRequest) -> Result<InvokeModelResponse> {
        self.requests.lock().unwrap().push(request.clone());

        let sent: Value = serde_json::from_slice(&request.body)?;
        let response = json!({
            "inputTextTokenCount": 4,
            "results": [{
                "tokenCount": 1,
                "outputText": sent["inputText"].clone(),
                "completionReason": "FINISH"
            }],
            "echo": sent
        });

        Ok(InvokeModelResponse {
            content_type: Some(request.accept),
            body: serde_json::to_vec(&response)?,
        })
    }
}

/// Backend stub that always fails with the given error.
#[derive(Debug)]
pub struct FailingBackend {
    pub status: u16,
    pub message: String,
}

impl FailingBackend {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

#[async_trait]
impl ModelInvoker for FailingBackend {
    async fn invoke_model(&self, _request: InvokeModelRequest) -> Result<InvokeModelResponse> {
        Err(Error::backend(self.status, self.message.clone()))
    }
}

/// Backend stub returning a fixed, possibly non-JSON, body.
#[derive(Debug)]
pub struct FixedBackend {
    pub body: Vec<u8>,
}

#[async_trait]
impl ModelInvoker for FixedBackend {
    async fn invoke_model(&self, _request: InvokeModelRequest) -> Result<InvokeModelResponse> {
        Ok(InvokeModelResponse {
            content_type: None,
            body: self.body.clone(),
        })
    }
}

#[derive(Debug)]
pub struct PanickingBackend;

#[async_trait]
impl ModelInvoker for PanickingBackend {
    async fn invoke_model(&self, _request: InvokeModelRequest) -> Result<InvokeModelResponse> {
        panic!("backend exploded");
    }
}
