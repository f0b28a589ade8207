use gridspiel_core::agent::Bot;
use gridspiel_core::error::GridspielError;
use gridspiel_core::game::{Action, GameState, PlayerId};
use crate::agent::{QLearner, RlAgent};
use crate::policy::{read_state_key, StateKeyMode};

/// Bot playing with Q-table of trained [`QLearner`].
///
/// In greedy mode the best known action is always chosen, otherwise learner's current
/// epsilon is used for exploration.
#[derive(Debug, Clone)]
pub struct QLearnerBot{
    player_id: PlayerId,
    agent: QLearner,
    greedy: bool,
    key_mode: StateKeyMode,
}

impl QLearnerBot{
    pub fn new(player_id: PlayerId, agent: QLearner, greedy: bool) -> Self{
        Self{player_id, agent, greedy, key_mode: StateKeyMode::default()}
    }

    pub fn agent(&self) -> &QLearner{
        &self.agent
    }

    pub fn key_mode(&self) -> StateKeyMode{
        self.key_mode
    }

    fn epsilon(&self) -> f64{
        if self.greedy {0.0} else {self.agent.epsilon()}
    }
}

impl Bot for QLearnerBot{
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn name(&self) -> String {
        format!("QLearner (trained as player {})", RlAgent::player_id(&self.agent))
    }

    fn step(&mut self, state: &dyn GameState) -> Result<Action, GridspielError> {
        let legal = state.legal_actions(self.player_id);
        if legal.is_empty(){
            return Err(GridspielError::NoActionAvailable {
                context: format!("QLearner bot of player {}", self.player_id)
            })
        }
        let key = read_state_key(state, self.player_id, &mut self.key_mode)?;
        let probs = self.agent.action_probabilities(&key, &legal, self.epsilon());
        #[cfg(feature = "log_trace")]
        log::trace!("QLearner bot {} probabilities {:?} for key {:?}", self.player_id, probs, key);
        self.agent.sample(&legal, &probs).map_err(GridspielError::from)
    }
}
