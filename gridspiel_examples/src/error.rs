use std::path::PathBuf;
use thiserror::Error;

/// Errors of example programs' shared helpers.
#[derive(Debug, Error)]
pub enum ExampleError{
    #[error("Unknown player specification \"{spec}\", expected human, random, mcts or qlearner:<path>")]
    UnknownPlayer{
        spec: String
    },
    #[error("Player specification \"{spec}\" requires agent path: qlearner:<path>")]
    MissingAgentPath{
        spec: String
    },
    #[error("Expected {expected} player types, got {got}")]
    PlayerCount{
        expected: usize,
        got: usize,
    },
    #[error("Failed writing {path:?}: {explanation}")]
    Output{
        path: PathBuf,
        explanation: String,
    },
}
