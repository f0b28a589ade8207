use crate::game::{Action, PlayerId, Turn};

/// Position of time step in episode.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepType{
    First,
    Mid,
    Last,
}

/// What every player observes after transition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observations{
    /// Information state (or observation) string, one per player.
    pub info_state: Vec<String>,
    /// Legal actions, one list per player.
    pub legal_actions: Vec<Vec<Action>>,
    pub current_player: Turn,
}

/// Result of [`reset`](crate::env::Environment::reset) or [`step`](crate::env::Environment::step).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeStep{
    pub observations: Observations,
    /// Rewards of last transition, `None` in first step of episode.
    pub rewards: Option<Vec<f64>>,
    pub discounts: Option<Vec<f64>>,
    pub step_type: StepType,
}

impl TimeStep{
    pub fn first(&self) -> bool{
        self.step_type == StepType::First
    }

    pub fn mid(&self) -> bool{
        self.step_type == StepType::Mid
    }

    pub fn last(&self) -> bool{
        self.step_type == StepType::Last
    }

    /// Reward of player, `0.0` when there are no rewards yet.
    pub fn reward(&self, player: PlayerId) -> f64{
        self.rewards.as_ref().and_then(|r| r.get(player).copied()).unwrap_or(0.0)
    }

    /// Sum of rewards of all players.
    pub fn total_reward(&self) -> f64{
        self.rewards.as_ref().map(|r| r.iter().sum()).unwrap_or(0.0)
    }

    pub fn discount(&self, player: PlayerId) -> f64{
        self.discounts.as_ref().and_then(|d| d.get(player).copied()).unwrap_or(1.0)
    }

    pub fn current_player(&self) -> Option<PlayerId>{
        self.observations.current_player.player()
    }

    pub fn is_simultaneous(&self) -> bool{
        self.observations.current_player == Turn::Simultaneous
    }

    pub fn info_state(&self, player: PlayerId) -> Option<&str>{
        self.observations.info_state.get(player).map(|s| s.as_str())
    }

    pub fn legal_actions(&self, player: PlayerId) -> &[Action]{
        self.observations.legal_actions.get(player).map(|v| v.as_slice()).unwrap_or(&[])
    }
}
