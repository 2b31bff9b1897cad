//! Error types with actionable diagnostics.
//!
//! All errors include contextual information to help users resolve issues
//! without needing to consult external documentation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cribar operations.
pub type Result<T> = std::result::Result<T, CribarError>;

/// Errors that can occur while loading artifacts or running the engine.
///
/// Each variant includes actionable context. Note what is deliberately NOT
/// an error: an empty choice set (the question gets the worst sentinel
/// score), an answer outside the choice set (the collector is re-invoked),
/// and a question missing from the dependency forest (treated as childless).
#[derive(Error, Debug)]
pub enum CribarError {
    /// Input artifact not found at the expected path.
    #[error("Artifact not found: {path}\n  → Check the path, or regenerate the mapping files")]
    ArtifactNotFound { path: PathBuf },

    /// Input artifact has invalid syntax or shape.
    #[error("Failed to parse {path}:\n  {message}\n  → Check the JSON structure against the expected artifact shape")]
    ArtifactParsing { path: PathBuf, message: String },

    /// Dataset table is malformed.
    #[error("Malformed dataset: {message}\n  → Re-run the cleaning step that produces the dataset artifact")]
    DatasetShape { message: String },

    /// A question code was referenced but is unknown to the dataset or catalog.
    #[error("Unknown question code: '{question}'\n  → The code must appear in the question catalog and the dataset columns")]
    UnknownQuestion { question: String },

    /// The dependency forest contains a cycle.
    #[error("Cyclic dependency detected at question '{question}'\n  → The dependency forest must be acyclic; fix the parent→children mapping")]
    CyclicDependency { question: String },

    /// A configuration parameter is out of its valid domain.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl CribarError {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Get the error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ArtifactNotFound { .. } => "E001",
            Self::ArtifactParsing { .. } => "E002",
            Self::DatasetShape { .. } => "E003",
            Self::UnknownQuestion { .. } => "E010",
            Self::CyclicDependency { .. } => "E011",
            Self::InvalidParameter(_) => "E020",
            Self::Io { .. } => "E050",
        }
    }
}
