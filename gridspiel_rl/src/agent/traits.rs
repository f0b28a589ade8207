use gridspiel_core::env::TimeStep;
use gridspiel_core::game::{Action, PlayerId};
use crate::error::GridspielRlError;

/// Result of agent step: selected action (none at the end of episode) and
/// probabilities of every action the agent could take.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepOutput{
    pub action: Option<Action>,
    pub probs: Vec<f64>,
}

impl StepOutput{
    pub fn none() -> Self{
        Self::default()
    }
}

/// Agent interacting with [`Environment`](gridspiel_core::env::Environment) through time steps.
pub trait RlAgent{
    fn player_id(&self) -> PlayerId;

    /// Observes time step, learns (unless `is_evaluation`) and selects action if it is
    /// agent's turn.
    fn step(&mut self, time_step: &TimeStep, is_evaluation: bool) -> Result<StepOutput, GridspielRlError>;
}

impl<A: RlAgent + ?Sized> RlAgent for Box<A>{
    fn player_id(&self) -> PlayerId {
        self.as_ref().player_id()
    }

    fn step(&mut self, time_step: &TimeStep, is_evaluation: bool) -> Result<StepOutput, GridspielRlError> {
        self.as_mut().step(time_step, is_evaluation)
    }
}

/// Key of Q-table: observation of player or, for centralized agents, observations of all players.
pub fn state_key(time_step: &TimeStep, player: PlayerId, centralized: bool) -> Result<String, GridspielRlError>{
    if centralized{
        Ok(time_step.observations.info_state.join(" | "))
    } else {
        time_step.info_state(player)
            .map(|s| s.to_string())
            .ok_or(GridspielRlError::MissingObservation { player })
    }
}

/// Checks if agent of `player` should select action in this time step.
pub fn is_acting(time_step: &TimeStep, player: PlayerId) -> bool{
    !time_step.last() && (time_step.is_simultaneous() || time_step.current_player() == Some(player))
}
