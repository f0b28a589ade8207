use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use gridspiel_core::env::TimeStep;
use gridspiel_core::game::PlayerId;
use crate::agent::{is_acting, RlAgent, StepOutput};
use crate::error::GridspielRlError;

/// Agent selecting uniformly among legal actions, it does not learn.
#[derive(Debug)]
pub struct RandomAgent{
    player_id: PlayerId,
    num_actions: usize,
    rng: StdRng,
}

impl RandomAgent{
    pub fn new(player_id: PlayerId, num_actions: usize) -> Self{
        Self{player_id, num_actions, rng: StdRng::from_os_rng()}
    }

    pub fn with_seed(player_id: PlayerId, num_actions: usize, seed: u64) -> Self{
        Self{player_id, num_actions, rng: StdRng::seed_from_u64(seed)}
    }
}

impl RlAgent for RandomAgent{
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn step(&mut self, time_step: &TimeStep, _is_evaluation: bool) -> Result<StepOutput, GridspielRlError> {
        if !is_acting(time_step, self.player_id){
            return Ok(StepOutput::none())
        }
        let legal = time_step.legal_actions(self.player_id);
        let action = *legal.choose(&mut self.rng).ok_or_else(|| GridspielRlError::NoLegalActions {
            player: self.player_id,
            info_state: time_step.info_state(self.player_id).unwrap_or_default().to_string(),
        })?;
        let mut probs = vec![0.0; self.num_actions];
        for a in legal{
            if let Some(p) = probs.get_mut(*a){
                *p = 1.0 / legal.len() as f64;
            }
        }
        Ok(StepOutput{action: Some(action), probs})
    }
}

#[cfg(test)]
mod tests{
    use gridspiel_core::env::{Observations, StepType, TimeStep};
    use gridspiel_core::game::Turn;
    use crate::agent::{RandomAgent, RlAgent};

    fn time_step(step_type: StepType) -> TimeStep{
        TimeStep{
            observations: Observations{
                info_state: vec!["a".into(), "b".into()],
                legal_actions: vec![vec![0, 2], vec![1]],
                current_player: Turn::Simultaneous,
            },
            rewards: None,
            discounts: None,
            step_type,
        }
    }

    #[test]
    fn uniform_over_legal(){
        let mut agent = RandomAgent::with_seed(0, 3, 5);
        let out = agent.step(&time_step(StepType::First), false).unwrap();
        assert!(matches!(out.action, Some(0) | Some(2)));
        assert_eq!(out.probs, vec![0.5, 0.0, 0.5]);
        let last = agent.step(&time_step(StepType::Last), false).unwrap();
        assert_eq!(last.action, None);
    }
}
