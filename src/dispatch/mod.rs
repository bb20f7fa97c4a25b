use std::sync::Arc;

use tracing::{debug, warn};

use crate::backends::inference_api::InferenceApiBackend;
use crate::backends::local::{LocalBackend, PipelineServerModel};
use crate::config::TranslatorConfig;
use crate::core::error::{BackendError, ConfigError, TranslateError};
use crate::core::traits::TranslationBackend;
use crate::core::types::{LanguageRequest, Mode, Translation};
use crate::languages::{build_model_input, resolve_language};
use crate::transport::http::HttpTransport;

/// Routes translation requests to the backend for the requested mode.
///
/// Holds no per-call state; share it behind an `Arc` for concurrent use.
pub struct Translator {
    local: Option<Arc<dyn TranslationBackend>>,
    remote: Option<Arc<dyn TranslationBackend>>,
}

pub struct TranslatorBuilder {
    local: Option<Arc<dyn TranslationBackend>>,
    remote: Option<Arc<dyn TranslationBackend>>,
}

impl Translator {
    pub fn builder() -> TranslatorBuilder {
        TranslatorBuilder {
            local: None,
            remote: None,
        }
    }

    /// Local pipeline server and inference API, sharing one transport.
    pub fn from_config(config: &TranslatorConfig) -> Result<Self, ConfigError> {
        let transport = HttpTransport::new(config.timeout_ms, config.retry_policy())?;

        let model = PipelineServerModel::with_transport(&config.local_url, transport.clone());
        let local = LocalBackend::with_max_length(Arc::new(model), config.max_length)?;
        let remote =
            InferenceApiBackend::with_transport(config.api_token.clone(), &config.api_url, transport);

        Ok(Self::builder()
            .with_backend(Arc::new(local))
            .with_backend(Arc::new(remote))
            .build())
    }

    pub fn has_backend(&self, mode: Mode) -> bool {
        self.backend_for(mode).is_some()
    }

    pub async fn translate(&self, request: &LanguageRequest) -> Result<Translation, TranslateError> {
        let result = self.dispatch(request).await;

        match &result {
            Ok(translation) => debug!(
                mode = %request.mode,
                language = %translation.language,
                "translation succeeded"
            ),
            Err(error) => warn!(
                mode = %request.mode,
                language = %request.target_language,
                error = %error,
                "translation failed"
            ),
        }

        result
    }

    pub async fn translate_text(
        &self,
        text: &str,
        language: &str,
        mode: Mode,
    ) -> Result<Translation, TranslateError> {
        self.translate(&LanguageRequest::new(text, language, mode))
            .await
    }

    /// String-in, string-out form of `translate` for display surfaces.
    ///
    /// An unrecognized mode label wins over an unsupported language.
    pub async fn translate_display(&self, text: &str, language: &str, mode_label: &str) -> String {
        let mode = match mode_label.parse::<Mode>() {
            Ok(mode) => mode,
            Err(error) => {
                warn!(mode = mode_label, "unrecognized mode label");
                return error.display_text();
            }
        };

        match self.translate_text(text, language, mode).await {
            Ok(translation) => translation.text,
            Err(error) => error.display_text(),
        }
    }

    async fn dispatch(&self, request: &LanguageRequest) -> Result<Translation, TranslateError> {
        let language = resolve_language(&request.target_language).ok_or_else(|| {
            TranslateError::UnsupportedLanguage {
                language: request.target_language.clone(),
            }
        })?;

        let backend = self
            .backend_for(request.mode)
            .ok_or(TranslateError::BackendNotConfigured { mode: request.mode })?;

        let input = build_model_input(language, &request.source_text);
        let candidates = backend.translate(&input).await?;

        let first = candidates
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::Protocol {
                backend: backend.id(),
                request_id: None,
                message: "response contained no translation candidates".to_string(),
            })?;

        Ok(Translation {
            text: first.translation_text,
            language,
            mode: request.mode,
        })
    }

    fn backend_for(&self, mode: Mode) -> Option<&Arc<dyn TranslationBackend>> {
        match mode {
            Mode::Local => self.local.as_ref(),
            Mode::Remote => self.remote.as_ref(),
        }
    }
}

impl TranslatorBuilder {
    /// Registers `backend` under the mode it declares; a later registration
    /// for the same mode replaces the earlier one.
    pub fn with_backend(mut self, backend: Arc<dyn TranslationBackend>) -> Self {
        match backend.mode() {
            Mode::Local => self.local = Some(backend),
            Mode::Remote => self.remote = Some(backend),
        }
        self
    }

    pub fn build(self) -> Translator {
        Translator {
            local: self.local,
            remote: self.remote,
        }
    }
}
