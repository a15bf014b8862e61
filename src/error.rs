use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenealogyError>;

/// Errors raised while loading or walking a generator record.
#[derive(Debug, Error)]
pub enum GenealogyError {
    #[error("ParticleDb is not initialized")]
    NotInitialized,

    #[error("ParticleInfo not found for particle ID {0}")]
    UnknownParticle(i32),

    #[error("corrupt genealogy: ancestor chain of particle {index} exceeds {steps} steps")]
    CorruptGenealogy { index: usize, steps: usize },

    #[error("column '{column}' has {found} entries, expected {expected}")]
    LengthMismatch {
        column: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("particle {index} points to mother {mother} outside the record (len {len})")]
    ParentOutOfRange { index: usize, mother: i32, len: usize },

    #[error("event {event} (line {line}) appears more than once")]
    DuplicateEvent { event: u64, line: usize },

    #[error("particle table line {line}: {reason}")]
    ParticleTable { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
