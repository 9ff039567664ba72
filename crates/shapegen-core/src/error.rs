//! Error types for symbol resolution

use crate::ShapeId;
use thiserror::Error;

/// Result type alias for generation operations
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Error type for generation operations
///
/// Every variant aborts the generation run. Symbol resolution for a model is
/// all-or-nothing, so there is no partial-result mode.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// A shape refers to an id that is absent from the model
    #[error("shape not found: {target} (referenced by {referrer})")]
    DanglingReference { referrer: ShapeId, target: ShapeId },

    /// A looked-up shape is absent from the model
    #[error("shape not found: {0}")]
    ShapeNotFound(ShapeId),

    /// The configured service is absent from the model
    #[error("service shape not found in model: {0}")]
    MissingService(ShapeId),

    /// A shape exists but has the wrong kind for the lookup
    #[error("expected {id} to be a {expected} shape, found {actual}")]
    UnexpectedShapeKind {
        id: ShapeId,
        expected: &'static str,
        actual: &'static str,
    },

    /// The shape carries traits the type mapper has no rule for
    #[error("unsupported trait combination on {shape}: {detail}")]
    UnsupportedTraitCombination { shape: ShapeId, detail: String },

    /// Resolution re-entered a shape that is still being resolved
    #[error("recursive shape reference through {0}")]
    RecursiveShape(ShapeId),

    /// Two distinct shapes resolved to the same generated identifier
    #[error("symbol {namespace}.{name} is produced by both {first} and {second}")]
    SymbolCollision {
        namespace: String,
        name: String,
        first: ShapeId,
        second: ShapeId,
    },

    /// Text could not be parsed as a shape id
    #[error("invalid shape id: {0}")]
    InvalidShapeId(String),

    /// Settings are missing or malformed
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// The model document could not be decoded
    #[error("model parse error: {0}")]
    ModelParse(String),

    /// No registered protocol generator matches the service
    #[error("no protocol generator supports service {service}")]
    UnsupportedProtocol { service: ShapeId },

    /// A file writer could not be obtained or used
    #[error("writer error: {0}")]
    Writer(String),

    /// I/O failure while reading settings or models
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of generation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Invalid upstream model or settings; fix at the source
    Configuration,
    /// A shape uses traits the mapping table does not cover
    UnsupportedTrait,
    /// Failure while handing output to a writer
    Emission,
}

impl GenerationError {
    /// Returns the failure category for this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            GenerationError::DanglingReference { .. }
            | GenerationError::ShapeNotFound(_)
            | GenerationError::MissingService(_)
            | GenerationError::UnexpectedShapeKind { .. }
            | GenerationError::RecursiveShape(_)
            | GenerationError::SymbolCollision { .. }
            | GenerationError::InvalidShapeId(_)
            | GenerationError::ConfigError(_)
            | GenerationError::ModelParse(_) => ErrorCategory::Configuration,
            GenerationError::UnsupportedTraitCombination { .. }
            | GenerationError::UnsupportedProtocol { .. } => ErrorCategory::UnsupportedTrait,
            GenerationError::Writer(_) | GenerationError::Io(_) => ErrorCategory::Emission,
        }
    }

    /// The shape this error is about, when there is one
    pub fn shape(&self) -> Option<&ShapeId> {
        match self {
            GenerationError::DanglingReference { target, .. } => Some(target),
            GenerationError::ShapeNotFound(id)
            | GenerationError::MissingService(id)
            | GenerationError::RecursiveShape(id) => Some(id),
            GenerationError::UnexpectedShapeKind { id, .. } => Some(id),
            GenerationError::UnsupportedTraitCombination { shape, .. } => Some(shape),
            GenerationError::SymbolCollision { second, .. } => Some(second),
            GenerationError::UnsupportedProtocol { service } => Some(service),
            _ => None,
        }
    }

    /// Shorthand for [`GenerationError::UnsupportedTraitCombination`]
    pub fn unsupported(shape: &ShapeId, detail: impl Into<String>) -> Self {
        GenerationError::UnsupportedTraitCombination {
            shape: shape.clone(),
            detail: detail.into(),
        }
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(err: serde_json::Error) -> Self {
        GenerationError::ModelParse(err.to_string())
    }
}

impl From<toml::de::Error> for GenerationError {
    fn from(err: toml::de::Error) -> Self {
        GenerationError::ConfigError(err.to_string())
    }
}
