use std::path::PathBuf;

use thiserror::Error;

/// Error taxonomy for the Q&A core.
///
/// Construction-time variants (`Configuration`, `IndexNotFound`) are fatal to
/// startup; per-request variants (`EmbeddingService`, `GenerationService`) are
/// caught by the orchestrator and never reach the end user raw.
#[derive(Debug, Error)]
pub enum RagError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("index unit not found at {0}: run `mentorbot index` to build it")]
    IndexNotFound(PathBuf),

    /// Embedding dimension inconsistency or malformed/desynced persisted
    /// data. Distinct from `IndexNotFound` so operators know to rebuild
    /// rather than merely re-create files.
    #[error("corrupted index: {0}")]
    DimensionMismatch(String),

    #[error("embedding service error: {0}")]
    EmbeddingService(String),

    #[error("generation service error: {0}")]
    GenerationService(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
