use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::TranslateError;
use crate::languages::TargetLanguage;

/// Maximum number of tokens the local model may generate per call.
pub const DEFAULT_MAX_LENGTH: u32 = 128;

/// Which collaborator performs the translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Local,
    Remote,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Remote, Mode::Local];

    /// Label shown in the mode selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::Local => "Local-Based",
            Self::Remote => "API-Based",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "local-based" | "local" => Some(Self::Local),
            "api-based" | "api" | "remote" => Some(Self::Remote),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = TranslateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_label(value).ok_or_else(|| TranslateError::InvalidMode {
            mode: value.to_string(),
        })
    }
}

/// Stable backend identifier for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BackendId {
    LocalModel,
    InferenceApi,
    Other(String),
}

impl fmt::Display for BackendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LocalModel => f.write_str("local_model"),
            Self::InferenceApi => f.write_str("inference_api"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// One translation request as entered in the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageRequest {
    pub source_text: String,
    pub target_language: String,
    pub mode: Mode,
}

impl LanguageRequest {
    pub fn new(
        source_text: impl Into<String>,
        target_language: impl Into<String>,
        mode: Mode,
    ) -> Self {
        Self {
            source_text: source_text.into(),
            target_language: target_language.into(),
            mode,
        }
    }
}

/// One element of a model response; only the first is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub translation_text: String,
}

impl Candidate {
    pub fn new(translation_text: impl Into<String>) -> Self {
        Self {
            translation_text: translation_text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub language: TargetLanguage,
    pub mode: Mode,
}
