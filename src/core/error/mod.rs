use crate::core::types::{BackendId, Mode};
use thiserror::Error;

/// Display text returned when the target language has no instruction prefix.
pub const UNSUPPORTED_LANGUAGE_MESSAGE: &str = "Sorry, this language is not supported.";

/// Display text returned when the mode label is not recognized.
pub const INVALID_MODE_MESSAGE: &str = "Invalid model type selected.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid timeout: {timeout_ms} ms")]
    InvalidTimeout { timeout_ms: u64 },
    #[error("invalid retry policy: {reason}")]
    InvalidRetryPolicy { reason: String },
    #[error("invalid max length: {max_length}")]
    InvalidMaxLength { max_length: u32 },
    #[error("invalid setting {key}: {reason}")]
    InvalidSetting { key: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error(
        "remote service error{context}: {message}",
        context = format_context(Some(.backend), None, *.status_code)
    )]
    Remote {
        backend: BackendId,
        status_code: Option<u16>,
        message: String,
    },
    #[error(
        "backend timed out after {timeout_ms} ms{context}",
        context = format_context(Some(.backend), None, None)
    )]
    Timeout { backend: BackendId, timeout_ms: u64 },
    #[error(
        "backend transport error{context}: {message}",
        context = format_context(Some(.backend), .request_id.as_deref(), None)
    )]
    Transport {
        backend: BackendId,
        request_id: Option<String>,
        message: String,
    },
    #[error(
        "backend status error{context}: {message}",
        context = format_context(Some(.backend), .request_id.as_deref(), Some(*.status_code))
    )]
    Status {
        backend: BackendId,
        status_code: u16,
        request_id: Option<String>,
        message: String,
    },
    #[error(
        "backend protocol error{context}: {message}",
        context = format_context(Some(.backend), .request_id.as_deref(), None)
    )]
    Protocol {
        backend: BackendId,
        request_id: Option<String>,
        message: String,
    },
    #[error(
        "backend serialization error{context}: {message}",
        context = format_context(Some(.backend), .request_id.as_deref(), None)
    )]
    Serialization {
        backend: BackendId,
        request_id: Option<String>,
        message: String,
    },
    #[error(
        "local model error{context}: {message}",
        context = format_context(Some(.backend), None, None)
    )]
    Model { backend: BackendId, message: String },
}

impl BackendError {
    pub fn backend(&self) -> &BackendId {
        match self {
            Self::Remote { backend, .. }
            | Self::Timeout { backend, .. }
            | Self::Transport { backend, .. }
            | Self::Status { backend, .. }
            | Self::Protocol { backend, .. }
            | Self::Serialization { backend, .. }
            | Self::Model { backend, .. } => backend,
        }
    }

    /// True when the request never produced a usable response from the peer.
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Transport { .. })
    }
}

/// Outcome of a dispatcher call that did not produce a translation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    #[error("unsupported target language: {language}")]
    UnsupportedLanguage { language: String },
    #[error("invalid translation mode: {mode}")]
    InvalidMode { mode: String },
    #[error("no backend configured for mode {mode}")]
    BackendNotConfigured { mode: Mode },
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl TranslateError {
    /// Text shown in place of a translation.
    ///
    /// The two input-validation outcomes keep their fixed sentinel strings and
    /// a remote `error` field is passed through verbatim, so a form that only
    /// displays strings behaves the same as before errors were typed.
    pub fn display_text(&self) -> String {
        match self {
            Self::UnsupportedLanguage { .. } => UNSUPPORTED_LANGUAGE_MESSAGE.to_string(),
            Self::InvalidMode { .. } => INVALID_MODE_MESSAGE.to_string(),
            Self::Backend(BackendError::Remote { message, .. }) => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_transport_failure(&self) -> bool {
        matches!(self, Self::Backend(error) if error.is_transport_failure())
    }
}

fn format_context(
    backend: Option<&BackendId>,
    request_id: Option<&str>,
    status_code: Option<u16>,
) -> String {
    let mut context = Vec::new();

    if let Some(backend) = backend {
        context.push(format!("backend={backend}"));
    }
    if let Some(request_id) = request_id {
        context.push(format!("request_id={request_id}"));
    }
    if let Some(status_code) = status_code {
        context.push(format!("status_code={status_code}"));
    }

    if context.is_empty() {
        String::new()
    } else {
        format!(" [{}]", context.join(", "))
    }
}
