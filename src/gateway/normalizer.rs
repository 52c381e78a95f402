//! Turns an inbound payload of unknown shape into a complete [`InferenceRequest`].
//!
//! Payloads arrive either as the request object itself or wrapped in an
//! API-gateway style event whose `body` holds the object or its JSON encoding.

use super::types::*;
use crate::{Error, Result, bedrock::TextGenerationConfig};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Lenient normalization: anything unusable yields the default request.
pub fn normalize(payload: &[u8]) -> InferenceRequest {
    parse(payload).unwrap_or_else(|e| {
        warn!("Malformed payload, falling back to defaults: {}", e);
        InferenceRequest::default()
    })
}

/// Same as [`normalize`] for an already decoded event.
pub fn normalize_event(event: Value) -> InferenceRequest {
    parse_event(event).unwrap_or_else(|e| {
        warn!("Malformed event, falling back to defaults: {}", e);
        InferenceRequest::default()
    })
}

/// Strict counterpart of [`normalize`]; malformed payloads are an error.
pub fn parse(payload: &[u8]) -> Result<InferenceRequest> {
    if payload.iter().all(u8::is_ascii_whitespace) {
        debug!("Empty payload, using defaults");
        return Ok(InferenceRequest::default());
    }

    let event: Value = serde_json::from_slice(payload)
        .map_err(|e| Error::invalid_input(format!("payload is not valid JSON: {}", e)))?;
    debug!("Received event: {}", event);

    parse_event(event)
}

/// Only an undecodable body or a body that is not a mapping is an error;
/// present fields are taken verbatim, whatever their JSON type.
pub fn parse_event(event: Value) -> Result<InferenceRequest> {
    let mut fields = match unwrap_body(event)? {
        Value::Object(map) => map,
        other => {
            return Err(Error::invalid_input(format!(
                "expected a JSON object, got {}",
                kind(&other)
            )));
        }
    };

    let defaults = TextGenerationConfig::default();
    Ok(InferenceRequest {
        prompt: take(&mut fields, "prompt").unwrap_or_else(|| Value::from(DEFAULT_PROMPT)),
        config: TextGenerationConfig {
            max_token_count: take(&mut fields, "maxTokenCount")
                .unwrap_or(defaults.max_token_count),
            temperature: take(&mut fields, "temperature").unwrap_or(defaults.temperature),
            top_p: take(&mut fields, "topP").unwrap_or(defaults.top_p),
        },
    })
}

/// A recognized key holding `null` counts as missing.
fn take(fields: &mut Map<String, Value>, key: &str) -> Option<Value> {
    fields.remove(key).filter(|value| !value.is_null())
}

fn unwrap_body(event: Value) -> Result<Value> {
    match event {
        // A JSON-encoded event gets one more pass, so an encoded
        // `{"body": "..."}` is unwrapped like a plain one.
        Value::String(encoded) => unwrap_event(decode(&encoded)?),
        other => unwrap_event(other),
    }
}

fn unwrap_event(event: Value) -> Result<Value> {
    match event {
        Value::Null => Ok(Value::Object(Map::new())),
        Value::Object(mut map) => match map.remove("body") {
            None => Ok(Value::Object(map)),
            Some(Value::Null) => Ok(Value::Object(Map::new())),
            Some(Value::String(encoded)) => decode(&encoded),
            Some(body) => Ok(body),
        },
        other => Ok(other),
    }
}

fn decode(encoded: &str) -> Result<Value> {
    serde_json::from_str(encoded)
        .map_err(|e| Error::invalid_input(format!("body is not valid JSON: {}", e)))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
