use serde_json::Value;

pub mod inference_api;
pub mod local;

/// Text of an `error` field on an object body, if present.
///
/// The inference API reports failures as `{"error": "..."}` and sometimes as
/// `{"error": ["...", "..."]}` for input validation.
pub(crate) fn error_field_text(body: &Value) -> Option<String> {
    let error = body.as_object()?.get("error")?;
    let text = match error {
        Value::String(message) => message.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(message) => message.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    };
    Some(text)
}

pub(crate) fn sanitize_token(token: Option<String>) -> Option<String> {
    token.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

pub(crate) fn normalize_endpoint(endpoint: impl Into<String>, default: &str) -> String {
    let value = endpoint.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return default.to_string();
    }

    trimmed.trim_end_matches('/').to_string()
}
