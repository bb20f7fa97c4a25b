//! Environment-driven settings for the translator and its backends.

use std::str::FromStr;

use crate::backends::inference_api::{INFERENCE_API_DEFAULT_URL, INFERENCE_API_TOKEN_ENV};
use crate::backends::local::PIPELINE_SERVER_DEFAULT_URL;
use crate::backends::sanitize_token;
use crate::core::error::ConfigError;
use crate::core::types::DEFAULT_MAX_LENGTH;
use crate::transport::http::RetryPolicy;

pub const API_URL_ENV: &str = "T5_TRANSLATOR_API_URL";
pub const LOCAL_URL_ENV: &str = "T5_TRANSLATOR_LOCAL_URL";
pub const TIMEOUT_MS_ENV: &str = "T5_TRANSLATOR_TIMEOUT_MS";
pub const MAX_ATTEMPTS_ENV: &str = "T5_TRANSLATOR_MAX_ATTEMPTS";
pub const MAX_LENGTH_ENV: &str = "T5_TRANSLATOR_MAX_LENGTH";

const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorConfig {
    pub api_token: Option<String>,
    pub api_url: String,
    pub local_url: String,
    pub timeout_ms: u64,
    pub max_attempts: u32,
    pub max_length: u32,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            api_url: INFERENCE_API_DEFAULT_URL.to_string(),
            local_url: PIPELINE_SERVER_DEFAULT_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_attempts: RetryPolicy::default().max_attempts,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

impl TranslatorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup; unset or blank keys keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            lookup(key).and_then(|value| {
                let trimmed = value.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
        };

        Ok(Self {
            api_token: sanitize_token(lookup(INFERENCE_API_TOKEN_ENV)),
            api_url: non_empty(API_URL_ENV).unwrap_or(defaults.api_url),
            local_url: non_empty(LOCAL_URL_ENV).unwrap_or(defaults.local_url),
            timeout_ms: parse_setting(TIMEOUT_MS_ENV, non_empty(TIMEOUT_MS_ENV))?
                .unwrap_or(defaults.timeout_ms),
            max_attempts: parse_setting(MAX_ATTEMPTS_ENV, non_empty(MAX_ATTEMPTS_ENV))?
                .unwrap_or(defaults.max_attempts),
            max_length: parse_setting(MAX_LENGTH_ENV, non_empty(MAX_LENGTH_ENV))?
                .unwrap_or(defaults.max_length),
        })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            ..RetryPolicy::default()
        }
    }
}

fn parse_setting<T: FromStr>(key: &str, value: Option<String>) -> Result<Option<T>, ConfigError> {
    value
        .map(|raw| {
            raw.parse::<T>().map_err(|_| ConfigError::InvalidSetting {
                key: key.to_string(),
                reason: format!("expected an unsigned integer, got {raw:?}"),
            })
        })
        .transpose()
}
