use crate::config::ConfigError;
use crate::registration::marker::MarkerError;
use crate::registration::types::Location;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a generator run
///
/// Every variant is fatal. No output file is written or replaced once one of
/// these has been returned.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("cannot read input {path}: {source}")]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed marker at {}:{line}:{}: {reason}", .path.display(), .reason.column())]
    MalformedMarker {
        path: PathBuf,
        line: usize,
        reason: MarkerError,
    },

    #[error("cannot write output {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("duplicate registration '{name}' at {second} (first registered at {first})")]
    DuplicateRegistration {
        name: String,
        first: Location,
        second: Location,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl GenerateError {
    /// Short name of the error kind for diagnostics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            GenerateError::InputUnreadable { .. } => "input-unreadable",
            GenerateError::MalformedMarker { .. } => "malformed-marker",
            GenerateError::OutputWrite { .. } => "output-write",
            GenerateError::DuplicateRegistration { .. } => "duplicate-registration",
            GenerateError::Config(_) => "config",
        }
    }
}
