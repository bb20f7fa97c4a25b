use async_trait::async_trait;

use crate::core::error::BackendError;
use crate::core::types::{BackendId, Candidate, Mode};

/// Backend contract used by the dispatcher.
///
/// A backend receives the already prefixed model input and returns the
/// model's candidate list in order. Backends hold no per-call state and must
/// be safe to share across tasks.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Stable backend identifier for diagnostics.
    fn id(&self) -> BackendId;

    /// Mode this backend serves in the dispatcher.
    fn mode(&self) -> Mode;

    /// Runs one translation of a prefixed input.
    async fn translate(&self, input: &str) -> Result<Vec<Candidate>, BackendError>;
}

/// Local model collaborator.
///
/// Loading and initialization belong to the caller; an instance is built
/// once and shared read-only for the life of the process.
#[async_trait]
pub trait LocalModel: Send + Sync {
    /// Generates candidates for a prefixed input, bounded to `max_length`
    /// output tokens.
    async fn generate(&self, input: &str, max_length: u32)
    -> Result<Vec<Candidate>, BackendError>;
}
