use std::collections::HashMap;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use gridspiel_core::env::TimeStep;
use gridspiel_core::game::{Action, PlayerId};
use crate::agent::{is_acting, state_key, RlAgent, StepOutput};
use crate::error::GridspielRlError;
use crate::schedule::{EpsilonSchedule, Schedule, SharedSchedule};

/// Sparse mapping from state key to action values, unseen entries are valued 0.
pub type QTable = HashMap<String, Vec<f64>>;

/// Epsilon-greedy distribution over `num_actions`: every legal action gets `epsilon / |legal|`,
/// legal actions with maximal value share the remaining `1 - epsilon`.
pub fn epsilon_greedy_probs(q_values: Option<&[f64]>, legal_actions: &[Action], epsilon: f64, num_actions: usize) -> Vec<f64>{
    let mut probs = vec![0.0; num_actions];
    if legal_actions.is_empty(){
        return probs
    }
    let q = |a: Action| q_values.and_then(|v| v.get(a).copied()).unwrap_or(0.0);
    let greedy_q = legal_actions.iter().map(|a| q(*a)).fold(f64::NEG_INFINITY, f64::max);
    let greedy: Vec<Action> = legal_actions.iter().copied().filter(|a| q(*a) == greedy_q).collect();
    for a in legal_actions{
        if let Some(p) = probs.get_mut(*a){
            *p += epsilon / legal_actions.len() as f64;
        }
    }
    for a in greedy.iter(){
        if let Some(p) = probs.get_mut(*a){
            *p += (1.0 - epsilon) / greedy.len() as f64;
        }
    }
    probs
}

/// Samples legal action according to `probs`.
pub fn sample_action(rng: &mut StdRng, legal_actions: &[Action], probs: &[f64]) -> Result<Action, GridspielRlError>{
    legal_actions.choose_weighted(rng, |a| probs.get(*a).copied().unwrap_or(0.0))
        .copied()
        .map_err(|e| GridspielRlError::Sampling { explanation: format!("{e}") })
}

/// Independent tabular Q-learning agent.
///
/// After every transition the value of previous (state, action) pair is moved towards
/// `r + gamma * max_a' Q[s', a']` (just `r` when episode has ended).
///
/// Clones keep advancing the epsilon schedule of the original learner.
#[derive(Debug, Clone)]
pub struct QLearner{
    player_id: PlayerId,
    num_actions: usize,
    step_size: f64,
    discount_factor: f64,
    centralized: bool,
    epsilon_schedule: SharedSchedule,
    epsilon: f64,
    q_values: QTable,
    prev_info_state: Option<String>,
    prev_action: Option<Action>,
    last_loss: Option<f64>,
    rng: StdRng,
}

impl QLearner{
    /// Learner with step size 0.1, constant epsilon 0.2 and discount factor 1.
    pub fn new(player_id: PlayerId, num_actions: usize) -> Self{
        let epsilon_schedule = SharedSchedule::new(EpsilonSchedule::default());
        Self{
            player_id,
            num_actions,
            step_size: 0.1,
            discount_factor: 1.0,
            centralized: false,
            epsilon: epsilon_schedule.value(),
            epsilon_schedule,
            q_values: QTable::new(),
            prev_info_state: None,
            prev_action: None,
            last_loss: None,
            rng: StdRng::from_os_rng(),
        }
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

    /// Uses joint observation of all players as state key.
    pub fn with_centralized(mut self, centralized: bool) -> Self{
        self.centralized = centralized;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self{
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_q_table(mut self, q_values: QTable) -> Self{
        self.q_values = q_values;
        self
    }

    pub fn num_actions(&self) -> usize{
        self.num_actions
    }

    pub fn step_size(&self) -> f64{
        self.step_size
    }

    pub fn discount_factor(&self) -> f64{
        self.discount_factor
    }

    pub fn is_centralized(&self) -> bool{
        self.centralized
    }

    pub fn epsilon(&self) -> f64{
        self.epsilon
    }

    /// Current position of learner's schedule.
    pub fn epsilon_schedule(&self) -> EpsilonSchedule{
        self.epsilon_schedule.snapshot()
    }

    /// Handle to learner's schedule, for sharing it with other learners.
    pub fn shared_epsilon_schedule(&self) -> &SharedSchedule{
        &self.epsilon_schedule
    }

    /// Temporal difference error of last update.
    pub fn last_loss(&self) -> Option<f64>{
        self.last_loss
    }

    pub fn q_table(&self) -> &QTable{
        &self.q_values
    }

    pub fn q_table_len(&self) -> usize{
        self.q_values.len()
    }

    pub fn q_values(&self, key: &str) -> Option<&[f64]>{
        self.q_values.get(key).map(|v| v.as_slice())
    }

    /// Changes number of actions, stored rows are truncated or padded with zeros.
    pub fn resize_actions(&mut self, num_actions: usize){
        self.num_actions = num_actions;
        for row in self.q_values.values_mut(){
            row.resize(num_actions, 0.0);
        }
    }

    /// Epsilon-greedy probabilities of actions in state `key`, table is not modified.
    pub fn action_probabilities(&self, key: &str, legal_actions: &[Action], epsilon: f64) -> Vec<f64>{
        epsilon_greedy_probs(self.q_values(key), legal_actions, epsilon, self.num_actions)
    }

    /// Samples action using agent's random generator.
    pub fn sample(&mut self, legal_actions: &[Action], probs: &[f64]) -> Result<Action, GridspielRlError>{
        sample_action(&mut self.rng, legal_actions, probs)
    }

    fn row(&mut self, key: &str) -> &mut Vec<f64>{
        let num_actions = self.num_actions;
        self.q_values.entry(key.to_string()).or_insert_with(|| vec![0.0; num_actions])
    }

    fn max_legal_value(&mut self, key: &str, legal_actions: &[Action]) -> f64{
        let row = self.row(key);
        legal_actions.iter()
            .filter_map(|a| row.get(*a).copied())
            .fold(None, |acc: Option<f64>, q| Some(acc.map_or(q, |m| m.max(q))))
            .unwrap_or(0.0)
    }

    fn learn(&mut self, time_step: &TimeStep, key: &str, prev_key: &str, prev_action: Action){
        let mut target = time_step.reward(self.player_id);
        if !time_step.last(){
            let legal = time_step.legal_actions(self.player_id).to_vec();
            target += self.discount_factor * self.max_legal_value(key, &legal);
        }
        let step_size = self.step_size;
        let loss = self.row(prev_key).get_mut(prev_action).map(|q| {
            let loss = target - *q;
            *q += step_size * loss;
            loss
        });
        if loss.is_some(){
            self.last_loss = loss;
        }
        self.epsilon = self.epsilon_schedule.step();
        #[cfg(feature = "log_trace")]
        log::trace!("Player {} updated Q[{prev_key:?}][{prev_action}] towards {target}", self.player_id);
    }
}

impl RlAgent for QLearner{
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn step(&mut self, time_step: &TimeStep, is_evaluation: bool) -> Result<StepOutput, GridspielRlError> {
        let key = state_key(time_step, self.player_id, self.centralized)?;

        let mut output = StepOutput::none();
        if is_acting(time_step, self.player_id){
            let legal = time_step.legal_actions(self.player_id);
            if legal.is_empty(){
                return Err(GridspielRlError::NoLegalActions { player: self.player_id, info_state: key })
            }
            let epsilon = if is_evaluation {0.0} else {self.epsilon};
            self.row(&key);
            let probs = self.action_probabilities(&key, legal, epsilon);
            let action = self.sample(legal, &probs)?;
            output = StepOutput{action: Some(action), probs};
        }

        if !is_evaluation{
            if let (Some(prev_key), Some(prev_action)) = (self.prev_info_state.take(), self.prev_action){
                self.learn(time_step, &key, &prev_key, prev_action);
            }
            if time_step.last(){
                self.prev_info_state = None;
                self.prev_action = None;
                return Ok(StepOutput::none())
            }
            self.prev_info_state = Some(key);
            self.prev_action = output.action;
        }
        Ok(output)
    }
}
