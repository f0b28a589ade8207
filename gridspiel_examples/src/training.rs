use std::sync::Arc;
use gridspiel_core::env::{Environment, TimeStep};
use gridspiel_core::game::{Action, Game};
use gridspiel_rl::agent::{QLearner, RlAgent};
use gridspiel_rl::error::GridspielRlError;
use gridspiel_rl::schedule::SharedSchedule;

/// Summary of single episode.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeResult{
    pub returns: Vec<f64>,
    /// Sum of rewards of all players.
    pub total_reward: f64,
    pub length: usize,
}

impl EpisodeResult{
    pub fn is_success(&self) -> bool{
        self.total_reward > 0.0
    }
}

/// Average reward and share of successful episodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation{
    pub average_reward: f64,
    pub average_length: f64,
    pub success_rate: f64,
}

impl Evaluation{
    pub fn from_results(results: &[EpisodeResult]) -> Self{
        if results.is_empty(){
            return Self{average_reward: 0.0, average_length: 0.0, success_rate: 0.0}
        }
        let n = results.len() as f64;
        Self{
            average_reward: results.iter().map(|r| r.total_reward).sum::<f64>() / n,
            average_length: results.iter().map(|r| r.length as f64).sum::<f64>() / n,
            success_rate: results.iter().filter(|r| r.is_success()).count() as f64 / n,
        }
    }
}

pub fn mean(values: &[f64]) -> f64{
    match values.len(){
        0 => 0.0,
        n => values.iter().sum::<f64>() / n as f64
    }
}

/// Rewards and lengths of training episodes.
#[derive(Debug, Clone, Default)]
pub struct TrainingLog{
    pub rewards: Vec<f64>,
    pub lengths: Vec<usize>,
    successes: usize,
}

impl TrainingLog{
    pub fn new() -> Self{
        Self::default()
    }

    pub fn push(&mut self, result: &EpisodeResult){
        self.rewards.push(result.total_reward);
        self.lengths.push(result.length);
        if result.is_success(){
            self.successes += 1;
        }
    }

    pub fn len(&self) -> usize{
        self.rewards.len()
    }

    pub fn is_empty(&self) -> bool{
        self.rewards.is_empty()
    }

    pub fn successes(&self) -> usize{
        self.successes
    }

    /// Share of successful episodes since start.
    pub fn success_rate(&self) -> f64{
        match self.len(){
            0 => 0.0,
            n => self.successes as f64 / n as f64
        }
    }

    fn recent<T>(values: &[T], window: usize) -> &[T]{
        &values[values.len().saturating_sub(window)..]
    }

    pub fn recent_reward(&self, window: usize) -> f64{
        mean(Self::recent(&self.rewards, window))
    }

    pub fn recent_length(&self, window: usize) -> f64{
        let lengths: Vec<f64> = Self::recent(&self.lengths, window).iter().map(|l| *l as f64).collect();
        mean(&lengths)
    }

    pub fn recent_success_rate(&self, window: usize) -> f64{
        let recent = Self::recent(&self.rewards, window);
        match recent.len(){
            0 => 0.0,
            n => recent.iter().filter(|r| **r > 0.0).count() as f64 / n as f64
        }
    }
}

/// Environment seeded when `seed` is given.
pub fn environment(game: Arc<dyn Game>, seed: Option<u64>) -> Environment{
    match seed{
        Some(s) => Environment::with_seed(game, s),
        None => Environment::new(game),
    }
}

/// One learner per player, each configured by `configure` and seeded from `seed` when given.
///
/// All learners advance one shared epsilon schedule, the one `configure` sets up.
pub fn independent_learners(env: &Environment, seed: Option<u64>, configure: impl Fn(QLearner) -> QLearner) -> Vec<QLearner>{
    let schedule = SharedSchedule::new(configure(QLearner::new(0, env.num_actions())).epsilon_schedule());
    (0..env.num_players()).map(|p| {
        let agent = configure(QLearner::new(p, env.num_actions()))
            .with_shared_epsilon_schedule(schedule.clone());
        match seed{
            Some(s) => agent.with_seed(s.wrapping_add(p as u64 + 1)),
            None => agent,
        }
    }).collect()
}

/// Action of agent that is expected to act in this time step.
pub fn require_action<A: RlAgent + ?Sized>(agent: &mut A, time_step: &TimeStep, is_evaluation: bool) -> Result<Action, GridspielRlError>{
    let player = agent.player_id();
    agent.step(time_step, is_evaluation)?.action.ok_or_else(|| GridspielRlError::NoLegalActions {
        player,
        info_state: time_step.info_state(player).unwrap_or_default().to_string(),
    })
}

/// Selects actions to submit to environment.
///
/// At simultaneous nodes every agent acts, at sequential nodes only the agent of current player
/// is asked. Agent at index `i` plays as player `i`.
pub fn collect_actions<A: RlAgent>(agents: &mut [A], time_step: &TimeStep, is_evaluation: bool) -> Result<Vec<Action>, GridspielRlError>{
    match time_step.current_player(){
        Some(p) => {
            let agent = agents.get_mut(p).ok_or(GridspielRlError::InvalidConfig {
                explanation: format!("no agent for player {p}")
            })?;
            Ok(vec![require_action(agent, time_step, is_evaluation)?])
        },
        None => agents.iter_mut()
            .map(|agent| require_action(agent, time_step, is_evaluation))
            .collect()
    }
}

/// Plays one episode. When training, every agent observes the final time step.
pub fn run_episode<A: RlAgent>(env: &mut Environment, agents: &mut [A], is_evaluation: bool) -> Result<EpisodeResult, GridspielRlError>{
    let mut time_step = env.reset()?;
    let mut returns = vec![0.0; env.num_players()];
    let mut length = 0;
    while !time_step.last(){
        let actions = collect_actions(agents, &time_step, is_evaluation)?;
        time_step = env.step(&actions)?;
        for (p, r) in returns.iter_mut().enumerate(){
            *r += time_step.reward(p);
        }
        length += 1;
    }
    if !is_evaluation{
        for agent in agents.iter_mut(){
            agent.step(&time_step, false)?;
        }
    }
    log::trace!("Episode finished after {} steps with returns {:?}", length, returns);
    let total_reward = returns.iter().sum();
    Ok(EpisodeResult{returns, total_reward, length})
}

/// Runs `episodes` greedy episodes without learning.
pub fn evaluate<A: RlAgent>(env: &mut Environment, agents: &mut [A], episodes: usize) -> Result<Evaluation, GridspielRlError>{
    let results = (0..episodes)
        .map(|_| run_episode(env, agents, true))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Evaluation::from_results(&results))
}

#[cfg(test)]
mod tests{
    use std::sync::Arc;
    use gridspiel_core::demo::DemoGame;
    use gridspiel_core::env::Environment;
    use gridspiel_rl::agent::{QLearner, RandomAgent, RlAgent};
    use gridspiel_rl::schedule::EpsilonSchedule;
    use crate::training::*;

    #[test]
    fn simultaneous_training_episode(){
        let mut env = Environment::with_seed(Arc::new(DemoGame::new(3, false)), 1);
        let mut agents: Vec<QLearner> = (0..2).map(|p| QLearner::new(p, env.num_actions()).with_seed(p as u64)).collect();
        let result = run_episode(&mut env, &mut agents, false).unwrap();
        assert_eq!(result.length, 3);
        assert_eq!(result.returns.len(), 2);
        assert!((result.total_reward - result.returns.iter().sum::<f64>()).abs() < 1e-12);
        assert!(agents.iter().all(|a| a.q_table_len() > 0));
    }

    #[test]
    fn sequential_episode_asks_current_player(){
        let mut env = Environment::with_seed(Arc::new(DemoGame::new(2, true)), 2);
        let mut agents: Vec<Box<dyn RlAgent>> = vec![
            Box::new(RandomAgent::with_seed(0, env.num_actions(), 3)),
            Box::new(RandomAgent::with_seed(1, env.num_actions(), 4)),
        ];
        let result = run_episode(&mut env, &mut agents, true).unwrap();
        assert_eq!(result.length, 4);
        let evaluation = evaluate(&mut env, &mut agents, 5).unwrap();
        assert!((0.0..=1.0).contains(&evaluation.success_rate));
    }

    #[test]
    fn evaluation_of_results(){
        let results = vec![
            EpisodeResult{returns: vec![1.0, 1.0], total_reward: 2.0, length: 1},
            EpisodeResult{returns: vec![-1.0, -1.0], total_reward: -2.0, length: 3},
        ];
        let evaluation = Evaluation::from_results(&results);
        assert_eq!(evaluation.average_reward, 0.0);
        assert_eq!(evaluation.success_rate, 0.5);
        assert_eq!(evaluation.average_length, 2.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn training_log_windows(){
        let mut log = TrainingLog::new();
        for (reward, length) in [(-1.0, 10), (5.0, 4), (3.0, 2)]{
            log.push(&EpisodeResult{returns: vec![reward], total_reward: reward, length});
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.recent_reward(2), 4.0);
        assert_eq!(log.recent_length(2), 3.0);
        assert_eq!(log.recent_success_rate(10), 2.0 / 3.0);
        assert_eq!(log.success_rate(), 2.0 / 3.0);
    }

    #[test]
    fn learners_for_every_player(){
        let env = environment(Arc::new(DemoGame::new(1, false)), Some(7));
        let agents = independent_learners(&env, Some(7), |a| a.with_discount_factor(0.9));
        assert_eq!(agents.len(), 2);
        assert_eq!(agents[1].player_id(), 1);
        assert_eq!(agents[0].discount_factor(), 0.9);
    }

    #[test]
    fn learners_decay_one_schedule(){
        let mut env = environment(Arc::new(DemoGame::new(3, false)), Some(4));
        let mut agents = independent_learners(&env, Some(4), |a| a
            .with_epsilon_schedule(EpsilonSchedule::linear(0.5, 0.1, 6)));
        assert!(agents[0].shared_epsilon_schedule().is_shared_with(agents[1].shared_epsilon_schedule()));
        run_episode(&mut env, &mut agents, false).unwrap();
        // each learner updates after two mid steps and the terminal step
        assert_eq!(agents[0].epsilon_schedule().steps_taken(), 6);
        assert!((agents[1].epsilon() - 0.1).abs() < 1e-12);
    }
}
