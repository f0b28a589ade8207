use gridspiel_core::error::GameError;
use gridspiel_core::game::{Action, GameState, PlayerId};
use crate::agent::{QLearner, RlAgent};
use crate::policy::{read_state_key, StateKeyMode};

/// Action distribution of trained [`QLearner`] queried directly from game states.
#[derive(Debug, Clone)]
pub struct QLearnerPolicy{
    agent: QLearner,
    greedy: bool,
    key_mode: StateKeyMode,
}

impl QLearnerPolicy{
    pub fn new(agent: QLearner, greedy: bool) -> Self{
        Self{agent, greedy, key_mode: StateKeyMode::default()}
    }

    /// Pairs (action, probability) for `player`.
    ///
    /// Players other than the one the agent was trained for get uniform distribution over legal
    /// actions, for agent's player epsilon-greedy probabilities of legal actions are returned
    /// (actions with zero probability are skipped).
    pub fn action_probabilities(&mut self, state: &dyn GameState, player: PlayerId) -> Result<Vec<(Action, f64)>, GameError>{
        let legal = state.legal_actions(player);
        if legal.is_empty(){
            return Ok(Vec::new())
        }
        if player != self.agent.player_id(){
            let p = 1.0 / legal.len() as f64;
            return Ok(legal.into_iter().map(|a| (a, p)).collect())
        }
        let key = read_state_key(state, player, &mut self.key_mode)?;
        let epsilon = if self.greedy {0.0} else {self.agent.epsilon()};
        let probs = self.agent.action_probabilities(&key, &legal, epsilon);
        Ok(legal.into_iter()
            .filter_map(|a| probs.get(a).copied().filter(|p| *p > 0.0).map(|p| (a, p)))
            .collect())
    }
}

#[cfg(test)]
mod tests{
    use gridspiel_core::demo::DemoGame;
    use gridspiel_core::game::Game;
    use crate::agent::{QLearner, QTable};
    use crate::policy::QLearnerPolicy;
    use crate::schedule::EpsilonSchedule;

    #[test]
    fn probabilities_for_own_and_other_player(){
        let game = DemoGame::new(1, false);
        let state = game.new_initial_state();
        let mut q = QTable::new();
        q.insert(state.information_state_string(1).unwrap(), vec![3.0, 1.0]);
        let agent = QLearner::new(1, 2)
            .with_q_table(q)
            .with_epsilon_schedule(EpsilonSchedule::constant(0.5));

        let mut greedy = QLearnerPolicy::new(agent.clone(), true);
        assert_eq!(greedy.action_probabilities(state.as_ref(), 1).unwrap(), vec![(0, 1.0)]);
        assert_eq!(greedy.action_probabilities(state.as_ref(), 0).unwrap(), vec![(0, 0.5), (1, 0.5)]);

        let mut exploring = QLearnerPolicy::new(agent, false);
        assert_eq!(exploring.action_probabilities(state.as_ref(), 1).unwrap(), vec![(0, 0.75), (1, 0.25)]);
    }
}
