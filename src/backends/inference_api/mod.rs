use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::backends::{error_field_text, normalize_endpoint, sanitize_token};
use crate::core::error::{BackendError, ConfigError};
use crate::core::traits::TranslationBackend;
use crate::core::types::{BackendId, Candidate, Mode};
use crate::transport::http::{HttpTransport, RetryPolicy};

pub const INFERENCE_API_DEFAULT_URL: &str =
    "https://api-inference.huggingface.co/models/google-t5/t5-base";
pub const INFERENCE_API_TOKEN_ENV: &str = "HF_API_TOKEN";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

/// Remote mode: the hosted inference API for the T5 model.
pub struct InferenceApiBackend {
    transport: HttpTransport,
    endpoint: String,
    api_token: Option<String>,
}

impl InferenceApiBackend {
    pub fn new(api_token: Option<String>) -> Result<Self, ConfigError> {
        Self::with_endpoint(api_token, INFERENCE_API_DEFAULT_URL)
    }

    pub fn with_endpoint(
        api_token: Option<String>,
        endpoint: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let transport = HttpTransport::new(DEFAULT_TIMEOUT_MS, RetryPolicy::default())?;
        Ok(Self::with_transport(api_token, endpoint, transport))
    }

    pub fn with_transport(
        api_token: Option<String>,
        endpoint: impl Into<String>,
        transport: HttpTransport,
    ) -> Self {
        Self {
            transport,
            endpoint: normalize_endpoint(endpoint, INFERENCE_API_DEFAULT_URL),
            api_token: sanitize_token(api_token),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn resolve_api_token(&self) -> Option<String> {
        if let Some(token) = self.api_token.as_ref().cloned() {
            return Some(token);
        }

        sanitize_token(std::env::var(INFERENCE_API_TOKEN_ENV).ok())
    }
}

#[async_trait]
impl TranslationBackend for InferenceApiBackend {
    fn id(&self) -> BackendId {
        BackendId::InferenceApi
    }

    fn mode(&self) -> Mode {
        Mode::Remote
    }

    async fn translate(&self, input: &str) -> Result<Vec<Candidate>, BackendError> {
        let api_token = self.resolve_api_token();
        if api_token.is_none() {
            warn!(
                backend = %self.id(),
                "no API token; set {INFERENCE_API_TOKEN_ENV} to authenticate"
            );
        }

        let body: Value = self
            .transport
            .post_json(
                self.id(),
                &self.endpoint,
                &InferenceRequest { inputs: input },
                api_token.as_deref(),
            )
            .await
            .map_err(remote_error_from_status)?;

        decode_inference_body(body)
    }
}

/// Promotes a status error whose body carries an `error` field to `Remote`.
fn remote_error_from_status(error: BackendError) -> BackendError {
    match error {
        BackendError::Status {
            backend,
            status_code,
            request_id,
            message,
        } => match serde_json::from_str::<Value>(&message)
            .ok()
            .as_ref()
            .and_then(error_field_text)
        {
            Some(text) => BackendError::Remote {
                backend,
                status_code: Some(status_code),
                message: text,
            },
            None => BackendError::Status {
                backend,
                status_code,
                request_id,
                message,
            },
        },
        other => other,
    }
}

fn decode_inference_body(body: Value) -> Result<Vec<Candidate>, BackendError> {
    if let Some(message) = error_field_text(&body) {
        return Err(BackendError::Remote {
            backend: BackendId::InferenceApi,
            status_code: None,
            message,
        });
    }

    serde_json::from_value::<Vec<Candidate>>(body).map_err(|error| BackendError::Serialization {
        backend: BackendId::InferenceApi,
        request_id: None,
        message: format!("unexpected inference response: {error}"),
    })
}
