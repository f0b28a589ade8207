use thiserror::Error;
use crate::error::{GameError, ProtocolError};

/// Top level crate error, constructed from more specific error.
#[derive(Debug, Clone, PartialEq, Error)]
#[cfg_attr(feature = "speedy", derive(speedy::Writable, speedy::Readable))]
pub enum GridspielError{
    /// Error reported by game engine.
    #[error("Game error: {source}")]
    Game{
        #[source]
        source: GameError
    },
    /// Error reported by game engine on request of specific player.
    #[error("Player {player} caused game error: {source}")]
    GameP{
        #[source]
        source: GameError,
        player: usize,
    },
    /// Environment used out of reset/step protocol.
    #[error("Protocol error: {source}")]
    Protocol{
        #[source]
        source: ProtocolError
    },
    /// Error originating in [`nom`](nom) crate.
    #[error("Error in nom parser: {explanation:}")]
    Nom{
        explanation: String
    },
    /// Standard Input/Output error.
    #[error("Error in I/O operation: {explanation:}")]
    IO{
        explanation: String
    },
    /// Special error for bots to generate when no action is available.
    #[error("Impossible action: {context}")]
    NoActionAvailable{
        context: String
    },
    /// Requested kind of player is not supported.
    #[error("Unsupported: {explanation}")]
    Unsupported{
        explanation: String
    },
    /// Human player asked to finish the game.
    #[error("Player requested quit")]
    Quit,
    /// Custom error to return if error does not fit any other category.
    #[error("Custom: {0}")]
    Custom(String),
}

impl From<GameError> for GridspielError{
    fn from(source: GameError) -> Self {
        GridspielError::Game { source }
    }
}

impl From<std::io::Error> for GridspielError{
    fn from(value: std::io::Error) -> Self {
        GridspielError::IO { explanation: format!("{value}") }
    }
}

impl GridspielError{
    /// Returns `true` when error is caused by human player asking to leave.
    pub fn is_quit(&self) -> bool{
        matches!(self, GridspielError::Quit)
    }
}
