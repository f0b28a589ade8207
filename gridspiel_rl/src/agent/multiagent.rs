use std::collections::HashMap;
use rand::rngs::StdRng;
use rand::SeedableRng;
use gridspiel_core::env::TimeStep;
use gridspiel_core::game::{Action, PlayerId};
use crate::agent::{is_acting, sample_action, state_key, StepOutput};
use crate::error::GridspielRlError;
use crate::schedule::{EpsilonSchedule, Schedule, SharedSchedule};
use crate::solver::{joint_index, JointActionSolver, PayoffTensor};

/// Joint action Q-learning.
///
/// Agent keeps Q-table over joint actions for every player. In each state the stage game
/// built from these tables is solved by [`JointActionSolver`], the agent plays its part of the
/// solution and learns values of other players from their rewards.
pub struct MultiagentQLearner<S: JointActionSolver>{
    player_id: PlayerId,
    num_actions: Vec<usize>,
    solver: S,
    step_size: f64,
    discount_factor: f64,
    epsilon_schedule: SharedSchedule,
    epsilon: f64,
    q_values: Vec<HashMap<String, Vec<f64>>>,
    prev_info_state: Option<String>,
    last_loss: Option<f64>,
    rng: StdRng,
}

impl<S: JointActionSolver> MultiagentQLearner<S>{
    /// `num_actions` holds number of actions of every player.
    pub fn new(player_id: PlayerId, num_actions: Vec<usize>, solver: S) -> Result<Self, GridspielRlError>{
        if player_id >= num_actions.len(){
            return Err(GridspielRlError::InvalidConfig {
                explanation: format!("player {player_id} is not one of {} players", num_actions.len())
            })
        }
        let epsilon_schedule = SharedSchedule::new(EpsilonSchedule::default());
        Ok(Self{
            player_id,
            q_values: vec![HashMap::new(); num_actions.len()],
            num_actions,
            solver,
            step_size: 0.1,
            discount_factor: 1.0,
            epsilon: epsilon_schedule.value(),
            epsilon_schedule,
            prev_info_state: None,
            last_loss: None,
            rng: StdRng::from_os_rng(),
        })
    }

    pub fn with_step_size(mut self, step_size: f64) -> Self{
        self.step_size = step_size;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self{
        self.discount_factor = discount_factor;
        self
    }

    /// Learner with its own schedule.
    pub fn with_epsilon_schedule(self, schedule: EpsilonSchedule) -> Self{
        self.with_shared_epsilon_schedule(SharedSchedule::new(schedule))
    }

    /// Learner advancing schedule together with other holders of `schedule`.
    pub fn with_shared_epsilon_schedule(mut self, schedule: SharedSchedule) -> Self{
        self.epsilon = schedule.value();
        self.epsilon_schedule = schedule;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self{
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn player_id(&self) -> PlayerId{
        self.player_id
    }

    pub fn num_players(&self) -> usize{
        self.num_actions.len()
    }

    pub fn epsilon(&self) -> f64{
        self.epsilon
    }

    pub fn last_loss(&self) -> Option<f64>{
        self.last_loss
    }

    pub fn q_table_len(&self) -> usize{
        self.q_values.first().map(|q| q.len()).unwrap_or(0)
    }

    /// Value of joint action for `player` in state `key`.
    pub fn joint_q_value(&self, player: PlayerId, key: &str, joint_actions: &[Action]) -> Option<f64>{
        let index = joint_index(&self.num_actions, joint_actions)?;
        self.q_values.get(player)?.get(key)?.get(index).copied()
    }

    fn num_joint_actions(&self) -> usize{
        self.num_actions.iter().product()
    }

    fn payoff_tensor(&self, key: &str) -> Result<PayoffTensor, GridspielRlError>{
        let size = self.num_joint_actions();
        let payoffs = self.q_values.iter()
            .map(|q| q.get(key).cloned().unwrap_or_else(|| vec![0.0; size]))
            .collect();
        PayoffTensor::from_payoffs(self.num_actions.clone(), payoffs)
    }

    /// Mixes uniform exploration over legal actions with solver's marginal of this player.
    fn epsilon_greedy(&mut self, key: &str, legal_actions: &[Action], epsilon: f64) -> Result<(Action, Vec<f64>), GridspielRlError>{
        let own_actions = self.num_actions[self.player_id];
        let solution = self.solver.solve(&self.payoff_tensor(key)?)?;
        let marginal = solution.marginals.get(self.player_id).cloned().unwrap_or_default();
        let mut probs = vec![0.0; own_actions];
        for a in legal_actions{
            if let Some(p) = probs.get_mut(*a){
                *p = epsilon / legal_actions.len() as f64
                    + (1.0 - epsilon) * marginal.get(*a).copied().unwrap_or(0.0);
            }
        }
        let total: f64 = probs.iter().sum();
        if total > 0.0{
            probs.iter_mut().for_each(|p| *p /= total);
        } else {
            for a in legal_actions{
                if let Some(p) = probs.get_mut(*a){
                    *p = 1.0 / legal_actions.len() as f64;
                }
            }
        }
        let action = sample_action(&mut self.rng, legal_actions, &probs)?;
        Ok((action, probs))
    }

    fn learn(&mut self, time_step: &TimeStep, key: &str, prev_key: &str, joint_actions: &[Action]) -> Result<(), GridspielRlError>{
        let index = joint_index(&self.num_actions, joint_actions).ok_or_else(|| GridspielRlError::InvalidConfig {
            explanation: format!("joint action {joint_actions:?} does not fit {:?}", self.num_actions)
        })?;
        let next_values = match time_step.last(){
            true => vec![0.0; self.num_players()],
            false => self.solver.solve(&self.payoff_tensor(key)?)?.values,
        };
        let size = self.num_joint_actions();
        let mut own_loss = None;
        for (n, table) in self.q_values.iter_mut().enumerate(){
            let mut target = time_step.reward(n);
            if !time_step.last(){
                target += self.discount_factor * next_values.get(n).copied().unwrap_or(0.0);
            }
            let row = table.entry(prev_key.to_string()).or_insert_with(|| vec![0.0; size]);
            let loss = target - row[index];
            row[index] += self.step_size * loss;
            if n == self.player_id{
                own_loss = Some(loss);
            }
        }
        self.last_loss = own_loss;
        self.epsilon = self.epsilon_schedule.step();
        Ok(())
    }

    /// Observes time step together with joint action that led to it (none in first step).
    ///
    /// State key is built from observations of all players.
    pub fn step(&mut self, time_step: &TimeStep, joint_actions: Option<&[Action]>, is_evaluation: bool) -> Result<StepOutput, GridspielRlError>{
        let key = state_key(time_step, self.player_id, true)?;
        let mut output = StepOutput::none();
        if is_acting(time_step, self.player_id){
            let legal = time_step.legal_actions(self.player_id).to_vec();
            if legal.is_empty(){
                return Err(GridspielRlError::NoLegalActions { player: self.player_id, info_state: key })
            }
            let epsilon = if is_evaluation {0.0} else {self.epsilon};
            let (action, probs) = self.epsilon_greedy(&key, &legal, epsilon)?;
            output = StepOutput{action: Some(action), probs};
        }

        if !is_evaluation{
            if let (Some(prev_key), Some(actions)) = (self.prev_info_state.take(), joint_actions){
                self.learn(time_step, &key, &prev_key, actions)?;
            }
            if time_step.last(){
                self.prev_info_state = None;
                return Ok(StepOutput::none())
            }
            self.prev_info_state = Some(key);
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests{
    use gridspiel_core::env::{Observations, StepType, TimeStep};
    use gridspiel_core::game::Turn;
    use crate::agent::MultiagentQLearner;
    use crate::schedule::EpsilonSchedule;
    use crate::solver::CorrelatedEqSolver;

    fn time_step(state: &str, rewards: Option<Vec<f64>>, step_type: StepType) -> TimeStep{
        let last = step_type == StepType::Last;
        TimeStep{
            observations: Observations{
                info_state: vec![state.into(), state.into()],
                legal_actions: if last {vec![vec![], vec![]]} else {vec![vec![0, 1], vec![0, 1]]},
                current_player: if last {Turn::Terminal} else {Turn::Simultaneous},
            },
            rewards,
            discounts: None,
            step_type,
        }
    }

    #[test]
    fn learns_joint_values(){
        let mut agent = MultiagentQLearner::new(1, vec![2, 2], CorrelatedEqSolver::new(false)).unwrap()
            .with_step_size(0.5)
            .with_epsilon_schedule(EpsilonSchedule::linear(0.5, 0.1, 4))
            .with_seed(9);
        let out = agent.step(&time_step("s", None, StepType::First), None, false).unwrap();
        assert_eq!(out.probs.len(), 2);
        assert!((out.probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);

        agent.step(&time_step("t", Some(vec![2.0, 4.0]), StepType::Mid), Some(&[1, 0][..]), false).unwrap();
        assert_eq!(agent.joint_q_value(0, "s | s", &[1, 0]), Some(1.0));
        assert_eq!(agent.joint_q_value(1, "s | s", &[1, 0]), Some(2.0));
        assert_eq!(agent.joint_q_value(1, "s | s", &[0, 0]), Some(0.0));
        assert_eq!(agent.last_loss(), Some(4.0));
        assert!((agent.epsilon() - 0.4).abs() < 1e-12);

        let end = agent.step(&time_step("end", Some(vec![1.0, 1.0]), StepType::Last), Some(&[0, 0][..]), false).unwrap();
        assert_eq!(end.action, None);
        assert_eq!(agent.joint_q_value(0, "t | t", &[0, 0]), Some(0.5));
    }

    #[test]
    fn greedy_follows_equilibrium(){
        let mut agent = MultiagentQLearner::new(0, vec![2, 2], CorrelatedEqSolver::default()).unwrap()
            .with_step_size(1.0)
            .with_seed(4);
        agent.step(&time_step("s", None, StepType::First), None, false).unwrap();
        agent.step(&time_step("s", Some(vec![5.0, 5.0]), StepType::Mid), Some(&[1, 1][..]), false).unwrap();
        let out = agent.step(&time_step("s", None, StepType::Mid), None, true).unwrap();
        assert_eq!(out.action, Some(1));
        assert!((out.probs[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_unknown_player(){
        assert!(MultiagentQLearner::new(2, vec![2, 2], CorrelatedEqSolver::default()).is_err());
    }
}
