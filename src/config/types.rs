use crate::{Error, Result, bedrock::TITAN_MODEL_ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub bedrock: BedrockConfig,
    #[serde(default)]
    pub normalizer: NormalizerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BedrockConfig {
    #[serde(default = "default_region")]
    pub region: String,
    /// Overrides the regional `bedrock-runtime` endpoint (proxies, local stubs).
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Bedrock API key, sent as a bearer token.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model_id")]
    pub model_id: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizerConfig {
    #[serde(default)]
    pub mode: ValidationMode,
}

/// How the gateway treats payloads it cannot make sense of.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Malformed payloads silently become the default request.
    #[default]
    Lenient,
    /// Malformed payloads and out-of-range parameters are rejected with 400.
    Strict,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.bedrock.model_id.trim().is_empty() {
            return Err(Error::config("bedrock.model_id must not be empty"));
        }
        if self.bedrock.timeout_secs == 0 {
            return Err(Error::config("bedrock.timeout_secs must be greater than zero"));
        }
        Ok(())
    }
}

impl BedrockConfig {
    pub fn endpoint_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://bedrock-runtime.{}.amazonaws.com", self.region),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logs: LogsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for BedrockConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint: None,
            api_key: None,
            model_id: default_model_id(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_model_id() -> String {
    TITAN_MODEL_ID.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}
