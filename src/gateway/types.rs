use crate::{Error, Result, bedrock::TextGenerationConfig};
use serde_json::{Value, json};

pub const DEFAULT_PROMPT: &str = "What is the meaning of life?";
pub const DEFAULT_MAX_TOKEN_COUNT: u64 = 200;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_TOP_P: f64 = 0.9;

pub const MAX_TOKEN_COUNT_LIMIT: i64 = 8192;

/// Shown to readers of a response whose payload has no `results[0].outputText`.
pub const MISSING_OUTPUT_PLACEHOLDER: &str = "No response text";

/// Fully populated request for one backend call.
///
/// Present values are kept exactly as the caller sent them, so `prompt` and
/// the generation knobs are opaque JSON values rather than coerced scalars.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceRequest {
    pub prompt: Value,
    pub config: TextGenerationConfig,
}

impl Default for InferenceRequest {
    fn default() -> Self {
        Self {
            prompt: Value::from(DEFAULT_PROMPT),
            config: TextGenerationConfig::default(),
        }
    }
}

impl Default for TextGenerationConfig {
    fn default() -> Self {
        Self {
            max_token_count: json!(DEFAULT_MAX_TOKEN_COUNT),
            temperature: json!(DEFAULT_TEMPERATURE),
            top_p: json!(DEFAULT_TOP_P),
        }
    }
}

impl InferenceRequest {
    /// Prompt length in characters, for logging; zero for a non-string prompt.
    pub fn prompt_len(&self) -> usize {
        self.prompt.as_str().map_or(0, |p| p.chars().count())
    }

    /// Type and bounds check applied only in strict mode; lenient mode
    /// forwards values as-is.
    pub fn validate(&self) -> Result<()> {
        let config = &self.config;

        if !self.prompt.is_string() {
            return Err(Error::invalid_input(format!(
                "prompt must be a string, got {}",
                self.prompt
            )));
        }
        match config.max_token_count.as_i64() {
            Some(count) if (1..=MAX_TOKEN_COUNT_LIMIT).contains(&count) => {}
            _ => {
                return Err(Error::invalid_input(format!(
                    "maxTokenCount must be an integer between 1 and {}, got {}",
                    MAX_TOKEN_COUNT_LIMIT, config.max_token_count
                )));
            }
        }
        check_unit_interval("temperature", &config.temperature)?;
        check_unit_interval("topP", &config.top_p)?;

        Ok(())
    }
}

fn check_unit_interval(name: &str, value: &Value) -> Result<()> {
    match value.as_f64() {
        Some(v) if (0.0..=1.0).contains(&v) => Ok(()),
        _ => Err(Error::invalid_input(format!(
            "{} must be a number between 0 and 1, got {}",
            name, value
        ))),
    }
}

/// Decoded output of one successful backend call.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceResult {
    pub output_text: Option<String>,
    pub raw_model_payload: Value,
}

impl InferenceResult {
    pub fn from_payload(raw_model_payload: Value) -> Self {
        let output_text = raw_model_payload
            .get("results")
            .and_then(|results| results.get(0))
            .and_then(|first| first.get("outputText"))
            .and_then(Value::as_str)
            .map(str::to_owned);

        Self {
            output_text,
            raw_model_payload,
        }
    }

    pub fn output_text_or_placeholder(&self) -> &str {
        self.output_text
            .as_deref()
            .unwrap_or(MISSING_OUTPUT_PLACEHOLDER)
    }
}
