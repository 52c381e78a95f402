use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const TITAN_MODEL_ID: &str = "amazon.titan-tg1-large";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Generation knobs forwarded to Titan unmodified.
///
/// Values are kept as sent (`1` stays `1`, `"50"` stays a string); Titan is
/// the one that judges them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextGenerationConfig {
    pub max_token_count: Value,
    pub temperature: Value,
    pub top_p: Value,
}

/// Body of a Titan text `InvokeModel` call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitanTextRequest<'a> {
    pub input_text: &'a Value,
    pub text_generation_config: &'a TextGenerationConfig,
}

/// Raw `InvokeModel` call, independent of the model family.
#[derive(Debug, Clone, PartialEq)]
pub struct InvokeModelRequest {
    pub model_id: String,
    pub content_type: String,
    pub accept: String,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvokeModelResponse {
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl InvokeModelRequest {
    pub fn json(model_id: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            model_id: model_id.into(),
            content_type: CONTENT_TYPE_JSON.to_string(),
            accept: CONTENT_TYPE_JSON.to_string(),
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_titan_request_wire_shape() {
        let prompt = json!("Hello");
        let config = TextGenerationConfig {
            max_token_count: json!(10),
            temperature: json!(0.5),
            top_p: json!(0.8),
        };
        let request = TitanTextRequest {
            input_text: &prompt,
            text_generation_config: &config,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "inputText": "Hello",
                "textGenerationConfig": {
                    "maxTokenCount": 10,
                    "temperature": 0.5,
                    "topP": 0.8
                }
            })
        );
    }

    #[test]
    fn test_json_request_uses_fixed_content_types() {
        let request = InvokeModelRequest::json(TITAN_MODEL_ID, b"{}".to_vec());
        assert_eq!(request.model_id, "amazon.titan-tg1-large");
        assert_eq!(request.content_type, "application/json");
        assert_eq!(request.accept, "application/json");
    }
}
