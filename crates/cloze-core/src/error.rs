use thiserror::Error;

/// Top-level error type for the Cloze system.
///
/// Each variant wraps a subsystem-specific error. Subsystem crates construct
/// the variant for their domain so that the `?` operator works seamlessly
/// across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClozeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Annotation error: {0}")]
    Annotation(String),

    #[error("Exercise error: {0}")]
    Exercise(String),

    #[error("Transcription error: {0}")]
    Transcription(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for ClozeError {
    fn from(err: toml::de::Error) -> Self {
        ClozeError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for ClozeError {
    fn from(err: toml::ser::Error) -> Self {
        ClozeError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ClozeError {
    fn from(err: serde_json::Error) -> Self {
        ClozeError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Cloze operations.
pub type Result<T> = std::result::Result<T, ClozeError>;
