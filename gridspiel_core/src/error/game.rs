use thiserror::Error;
use crate::game::{Action, PlayerId, Turn};

/// Error reported by game engine when request can not be served.
#[derive(Debug, Clone, PartialEq, Error)]
#[cfg_attr(feature = "speedy", derive(speedy::Writable, speedy::Readable))]
pub enum GameError{
    #[error("Game \"{game}\" is not registered")]
    UnknownGame{
        game: String
    },
    #[error("Parameter \"{name}\" is not accepted by game \"{game}\"")]
    UnknownParameter{
        game: String,
        name: String,
    },
    #[error("Parameter \"{name}\" is expected to be {expected}, but value is {value}")]
    ParameterType{
        name: String,
        expected: String,
        value: String,
    },
    #[error("Invalid value of parameter \"{name}\": {explanation}")]
    InvalidParameter{
        name: String,
        explanation: String,
    },
    #[error("Failed parsing game string \"{input}\": {explanation}")]
    GameString{
        input: String,
        explanation: String,
    },
    #[error("Action {action} is illegal for player {player}")]
    IllegalAction{
        player: PlayerId,
        action: Action,
    },
    #[error("Chance outcome {outcome} is not possible in this state")]
    IllegalChanceOutcome{
        outcome: Action,
    },
    #[error("Expected {expected} actions in joint action, got {got}")]
    JointActionSize{
        expected: usize,
        got: usize,
    },
    #[error("Player {player} is out of range, game is for {num_players} players")]
    PlayerOutOfRange{
        player: PlayerId,
        num_players: usize,
    },
    #[error("Operation {operation} is not allowed when turn is {turn}")]
    WrongTurn{
        operation: String,
        turn: Turn,
    },
    #[error("Game \"{game}\" does not provide {feature}")]
    NotProvided{
        game: String,
        feature: String,
    },
}
