use thiserror::Error;
use crate::error::GridspielError;

/// Violations of reset/step protocol of [`Environment`](crate::env::Environment).
#[derive(Debug, Clone, PartialEq, Error)]
#[cfg_attr(feature = "speedy", derive(speedy::Writable, speedy::Readable))]
pub enum ProtocolError{
    #[error("Episode is finished, environment must be reset before stepping")]
    EpisodeFinished,
    #[error("Environment was stepped before first reset")]
    NotStarted,
    #[error("Expected {expected} actions, got {got}")]
    ActionCount{
        expected: usize,
        got: usize,
    },
    #[error("Chance node could not be resolved: {context}")]
    ChanceResolution{
        context: String,
    },
}

impl From<ProtocolError> for GridspielError{
    fn from(source: ProtocolError) -> Self {
        GridspielError::Protocol { source }
    }
}
