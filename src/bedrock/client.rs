use super::types::*;
use crate::{Error, Result, config::BedrockConfig};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;
use tracing::debug;

/// The single "invoke model" operation of a Bedrock-style runtime.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    async fn invoke_model(&self, request: InvokeModelRequest) -> Result<InvokeModelResponse>;
}

pub struct BedrockClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl BedrockClient {
    pub fn new(config: &BedrockConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint_url(),
            api_key: config.api_key.clone().filter(|key| !key.is_empty()),
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else {
            Error::Network(err)
        }
    }
}

#[async_trait]
impl ModelInvoker for BedrockClient {
    async fn invoke_model(&self, request: InvokeModelRequest) -> Result<InvokeModelResponse> {
        let url = format!("{}/model/{}/invoke", self.endpoint, request.model_id);
        debug!(
            "Invoking model {} with {} byte body",
            request.model_id,
            request.body.len()
        );

        let mut builder = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, &request.content_type)
            .header(ACCEPT, &request.accept)
            .body(request.body);

        if let Some(ref api_key) = self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?
            .to_vec();

        debug!("Model responded with {} ({} bytes)", status, body.len());

        if !status.is_success() {
            let message = backend_error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
            return Err(Error::backend(status.as_u16(), message));
        }

        Ok(InvokeModelResponse { content_type, body })
    }
}

/// Bedrock reports failures as `{"message": "..."}`; some proxies use `Message`.
fn backend_error_message(body: &[u8]) -> Option<String> {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        if let Some(message) = value
            .get("message")
            .or_else(|| value.get("Message"))
            .and_then(|m| m.as_str())
        {
            return Some(message.to_string());
        }
    }

    let text = String::from_utf8_lossy(body).trim().to_string();
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_client_uses_regional_endpoint() {
        let config = BedrockConfig {
            region: "eu-west-1".to_string(),
            ..Default::default()
        };

        let client = BedrockClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://bedrock-runtime.eu-west-1.amazonaws.com"
        );
    }

    #[test]
    fn test_client_with_custom_endpoint() {
        let config = BedrockConfig {
            endpoint: Some("http://localhost:4566/".to_string()),
            ..Default::default()
        };

        let client = BedrockClient::new(&config).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:4566");
    }

    #[test]
    fn test_empty_api_key_is_ignored() {
        let config = BedrockConfig {
            api_key: Some(String::new()),
            ..Default::default()
        };

        let client = BedrockClient::new(&config).unwrap();
        assert!(client.api_key.is_none());
    }

    #[test]
    fn test_backend_error_message_from_json() {
        let body = br#"{"message": "The security token included in the request is invalid."}"#;
        assert_eq!(
            backend_error_message(body).as_deref(),
            Some("The security token included in the request is invalid.")
        );

        let body = br#"{"Message": "Rate exceeded"}"#;
        assert_eq!(backend_error_message(body).as_deref(), Some("Rate exceeded"));
    }

    #[test]
    fn test_backend_error_message_falls_back_to_text() {
        assert_eq!(
            backend_error_message(b"upstream unavailable\n").as_deref(),
            Some("upstream unavailable")
        );
        assert_eq!(backend_error_message(b""), None);
    }
}
