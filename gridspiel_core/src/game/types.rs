use std::fmt::{Display, Formatter};
use crate::game::GameParameters;

/// Index of player (seat) in game.
pub type PlayerId = usize;
/// Action identifier, in range `0..num_distinct_actions` for players and
/// `0..max_chance_outcomes` for chance nodes.
pub type Action = usize;

/// Describes who is to act in the current state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "speedy", derive(speedy::Writable, speedy::Readable))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Turn{
    /// Single player is to act (sequential node).
    Player(PlayerId),
    /// All players act at the same time.
    Simultaneous,
    /// Nature samples outcome from [`chance_outcomes`](crate::game::GameState::chance_outcomes).
    Chance,
    /// Game is finished.
    Terminal,
}

impl Turn{
    pub fn player(&self) -> Option<PlayerId>{
        match self{
            Turn::Player(p) => Some(*p),
            _ => None
        }
    }
}

impl Display for Turn{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self{
            Turn::Player(p) => write!(f, "player {p}"),
            Turn::Simultaneous => write!(f, "simultaneous"),
            Turn::Chance => write!(f, "chance"),
            Turn::Terminal => write!(f, "terminal"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Dynamics{
    Sequential,
    Simultaneous,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChanceMode{
    Deterministic,
    ExplicitStochastic,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Information{
    PerfectInformation,
    ImperfectInformation,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Utility{
    ZeroSum,
    ConstantSum,
    GeneralSum,
    /// Every player receives the same rewards.
    Identical,
}

/// Static description of game registered in engine.
#[derive(Debug, Clone, PartialEq)]
pub struct GameType{
    pub short_name: String,
    pub long_name: String,
    pub dynamics: Dynamics,
    pub chance_mode: ChanceMode,
    pub information: Information,
    pub utility: Utility,
    pub min_num_players: usize,
    pub max_num_players: usize,
    pub provides_information_state_string: bool,
    pub provides_observation_string: bool,
    /// Accepted parameters with their default values.
    pub parameter_specification: GameParameters,
}
