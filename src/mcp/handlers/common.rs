use crate::core::error::ScoutError;
use crate::mcp::{McpCallResponse, McpContent};
use crate::types::{ErrorResponse, ResultEnvelope};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::Value;

pub type HandlerResult = Result<Json<McpCallResponse>, (StatusCode, Json<ErrorResponse>)>;

/// Required string argument. Missing or mistyped arguments come back as an
/// `InvalidInput` envelope so callers always receive one.
pub fn required_str<'a>(arguments: &'a Value, key: &str) -> Result<&'a str, ResultEnvelope> {
    match arguments.get(key) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(ResultEnvelope::failure(&ScoutError::InvalidInput(format!(
            "'{}' must be a string, got {}",
            key,
            json_type_name(other)
        )))),
        None => Err(ResultEnvelope::failure(&ScoutError::InvalidInput(format!(
            "missing required parameter: {}",
            key
        )))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Pretty-printed envelope as the single text item; `is_error` mirrors `!success`.
pub fn envelope_response(envelope: &ResultEnvelope) -> HandlerResult {
    let text = serde_json::to_string_pretty(envelope).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("failed to serialize result: {}", e),
            }),
        )
    })?;

    Ok(Json(McpCallResponse {
        content: vec![McpContent {
            content_type: "text".to_string(),
            text,
        }],
        is_error: !envelope.success,
    }))
}
