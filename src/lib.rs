//! English to French, German, or Romanian translation with a prefix-conditioned
//! T5 model, run either through a local model or the hosted inference API.

pub mod backends;
pub mod config;
pub mod core;
pub mod dispatch;
pub mod languages;
pub mod selftest;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::core::error::{
    BackendError, ConfigError, INVALID_MODE_MESSAGE, TranslateError, UNSUPPORTED_LANGUAGE_MESSAGE,
};
pub use crate::core::types::*;
pub use dispatch::{Translator, TranslatorBuilder};
pub use languages::{TargetLanguage, available_languages};
