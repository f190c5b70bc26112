//! Error types for source processing and the filesystem pipeline

use crate::kotlin::ParseError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while processing a single annotated source
#[derive(Debug, Error)]
pub enum ProcessError {
    /// A label that consumes its node's string value was placed on a node
    /// whose expression is not a plain string literal
    #[error("the @{label} annotation requires a string literal expression, found {found}")]
    NonLiteralExpression { label: String, found: String },

    /// `@Code.Block` was placed on something other than a `run { ... }` call
    #[error("@Code.Block must annotate a call to 'run' with a trailing lambda, found {found}")]
    InvalidCodeBlockTarget { found: String },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Failure while running the pipeline over a source tree
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        source: io::Error,
    },

    #[error("{}: {}", .path.display(), .source)]
    Process {
        path: PathBuf,
        source: ProcessError,
    },

    #[error("{} is outside the configured sources directory", .path.display())]
    OutsideSourceTree { path: PathBuf },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
