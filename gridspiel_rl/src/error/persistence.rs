use std::path::PathBuf;
use thiserror::Error;

/// Failure when saving or loading agent files.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PersistenceError{
    #[error("Agent file not found: {path:?}")]
    NotFound{
        path: PathBuf
    },
    #[error("Expected agent of type {expected}, file contains {found}")]
    InvalidAgentType{
        expected: String,
        found: String,
    },
    #[error("Unsupported agent file extension \"{extension}\" (use json, ron or bin)")]
    UnsupportedFormat{
        extension: String
    },
    #[error("I/O error on {path:?}: {explanation}")]
    IO{
        path: PathBuf,
        explanation: String,
    },
    #[error("Failed encoding agent to {format}: {explanation}")]
    Encode{
        format: String,
        explanation: String,
    },
    #[error("Failed decoding agent from {format}: {explanation}")]
    Decode{
        format: String,
        explanation: String,
    },
}

impl PersistenceError{
    pub(crate) fn io(path: impl Into<PathBuf>, error: std::io::Error) -> Self{
        let path = path.into();
        match error.kind(){
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::IO { path, explanation: format!("{error}") }
        }
    }
}
