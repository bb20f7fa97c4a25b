use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::backends::{error_field_text, normalize_endpoint};
use crate::core::error::{BackendError, ConfigError};
use crate::core::traits::{LocalModel, TranslationBackend};
use crate::core::types::{BackendId, Candidate, DEFAULT_MAX_LENGTH, Mode};
use crate::transport::http::{HttpTransport, RetryPolicy};

pub const PIPELINE_SERVER_DEFAULT_URL: &str = "http://127.0.0.1:8080/translate";
const DEFAULT_TIMEOUT_MS: u64 = 60_000;

/// Local mode: runs an injected model with a bounded output length.
pub struct LocalBackend {
    model: Arc<dyn LocalModel>,
    max_length: u32,
}

impl LocalBackend {
    pub fn new(model: Arc<dyn LocalModel>) -> Self {
        Self {
            model,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }

    pub fn with_max_length(model: Arc<dyn LocalModel>, max_length: u32) -> Result<Self, ConfigError> {
        if max_length == 0 {
            return Err(ConfigError::InvalidMaxLength { max_length });
        }

        Ok(Self { model, max_length })
    }

    pub fn max_length(&self) -> u32 {
        self.max_length
    }
}

#[async_trait]
impl TranslationBackend for LocalBackend {
    fn id(&self) -> BackendId {
        BackendId::LocalModel
    }

    fn mode(&self) -> Mode {
        Mode::Local
    }

    async fn translate(&self, input: &str) -> Result<Vec<Candidate>, BackendError> {
        self.model.generate(input, self.max_length).await
    }
}

#[derive(Debug, Serialize)]
struct PipelineRequest<'a> {
    inputs: &'a str,
    parameters: PipelineParameters,
}

#[derive(Debug, Serialize)]
struct PipelineParameters {
    max_length: u32,
}

/// `LocalModel` served by a translation pipeline process on this host.
///
/// The server keeps the weights loaded; each call posts
/// `{"inputs": ..., "parameters": {"max_length": N}}` and reads back the
/// candidate list.
pub struct PipelineServerModel {
    transport: HttpTransport,
    endpoint: String,
}

impl PipelineServerModel {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_endpoint(PIPELINE_SERVER_DEFAULT_URL)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, ConfigError> {
        let transport = HttpTransport::new(DEFAULT_TIMEOUT_MS, RetryPolicy::default())?;
        Ok(Self::with_transport(endpoint, transport))
    }

    pub fn with_transport(endpoint: impl Into<String>, transport: HttpTransport) -> Self {
        Self {
            transport,
            endpoint: normalize_endpoint(endpoint, PIPELINE_SERVER_DEFAULT_URL),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LocalModel for PipelineServerModel {
    async fn generate(
        &self,
        input: &str,
        max_length: u32,
    ) -> Result<Vec<Candidate>, BackendError> {
        let request = PipelineRequest {
            inputs: input,
            parameters: PipelineParameters { max_length },
        };

        let body: Value = self
            .transport
            .post_json(BackendId::LocalModel, &self.endpoint, &request, None)
            .await?;

        if let Some(message) = error_field_text(&body) {
            return Err(BackendError::Model {
                backend: BackendId::LocalModel,
                message,
            });
        }

        serde_json::from_value::<Vec<Candidate>>(body).map_err(|error| {
            BackendError::Serialization {
                backend: BackendId::LocalModel,
                request_id: None,
                message: format!("unexpected pipeline response: {error}"),
            }
        })
    }
}
