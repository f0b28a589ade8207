mod persistence;
pub use persistence::*;

use thiserror::Error;
use gridspiel_core::error::{GameError, GridspielError};
use gridspiel_core::game::PlayerId;

/// Error of learning agents, wraps [`GridspielError`] from core crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridspielRlError{
    /// Variant - [`GridspielError`]
    #[error("Basic gridspiel error: {source}")]
    Gridspiel{
        #[source]
        source: GridspielError
    },
    #[error("Agent file error: {source}")]
    Persistence{
        #[source]
        source: PersistenceError
    },
    #[error("Player {player} has no legal actions in state {info_state}")]
    NoLegalActions{
        player: PlayerId,
        info_state: String,
    },
    #[error("Time step has no observation for player {player}")]
    MissingObservation{
        player: PlayerId
    },
    #[error("Failed sampling action: {explanation}")]
    Sampling{
        explanation: String
    },
    #[error("Joint action solver failed: {explanation}")]
    Solver{
        explanation: String
    },
    #[error("Invalid agent configuration: {explanation}")]
    InvalidConfig{
        explanation: String
    },
}

impl From<GridspielError> for GridspielRlError{
    fn from(source: GridspielError) -> Self {
        Self::Gridspiel { source }
    }
}

impl From<GameError> for GridspielRlError{
    fn from(value: GameError) -> Self {
        Self::Gridspiel { source: value.into() }
    }
}

impl From<PersistenceError> for GridspielRlError{
    fn from(source: PersistenceError) -> Self {
        Self::Persistence { source }
    }
}

impl From<GridspielRlError> for GridspielError{
    fn from(value: GridspielRlError) -> Self {
        match value{
            GridspielRlError::Gridspiel { source } => source,
            any => GridspielError::Custom(format!("{any}"))
        }
    }
}
