use std::sync::Arc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::env::{Observations, StepType, TimeStep};
use crate::error::{GridspielError, ProtocolError};
use crate::game::{Action, Game, GameState, Turn};

/// Which string represents state of player in [`Observations`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ObservationKind{
    InformationState,
    Observation,
}

/// Reinforcement learning environment over game from engine.
///
/// Chance nodes are never exposed: after every reset and step chance outcomes are sampled
/// until decision or terminal node is reached.
pub struct Environment{
    game: Arc<dyn Game>,
    state: Option<Box<dyn GameState>>,
    rng: StdRng,
    observation_kind: ObservationKind,
    discount: f64,
    should_reset: bool,
}

impl Environment{
    pub fn new(game: Arc<dyn Game>) -> Self{
        Self::build(game, StdRng::from_os_rng())
    }

    pub fn with_seed(game: Arc<dyn Game>, seed: u64) -> Self{
        Self::build(game, StdRng::seed_from_u64(seed))
    }

    fn build(game: Arc<dyn Game>, rng: StdRng) -> Self{
        let observation_kind = match game.game_type().provides_information_state_string{
            true => ObservationKind::InformationState,
            false => ObservationKind::Observation,
        };
        Self{game, state: None, rng, observation_kind, discount: 1.0, should_reset: true}
    }

    pub fn with_observation_kind(mut self, kind: ObservationKind) -> Self{
        self.observation_kind = kind;
        self
    }

    pub fn with_discount(mut self, discount: f64) -> Self{
        self.discount = discount;
        self
    }

    pub fn game(&self) -> &Arc<dyn Game>{
        &self.game
    }

    pub fn num_players(&self) -> usize{
        self.game.num_players()
    }

    pub fn num_actions(&self) -> usize{
        self.game.num_distinct_actions()
    }

    pub fn observation_kind(&self) -> ObservationKind{
        self.observation_kind
    }

    /// Current state, `None` before first reset.
    pub fn state(&self) -> Option<&dyn GameState>{
        self.state.as_deref()
    }

    /// Starts new episode.
    pub fn reset(&mut self) -> Result<TimeStep, GridspielError>{
        let mut state = self.game.new_initial_state();
        self.sample_chance(state.as_mut())?;
        self.should_reset = state.is_terminal();
        let time_step = self.observe(state.as_ref(), StepType::First, None)?;
        #[cfg(feature = "log_trace")]
        log::trace!("Environment reset, initial state:\n{}", state);
        self.state = Some(state);
        Ok(time_step)
    }

    /// Applies actions and returns resulting time step.
    ///
    /// At simultaneous node `actions` must contain action of every player.
    /// At sequential node it may contain only the action of the player to move or
    /// a full joint action from which the current player's one is taken.
    pub fn step(&mut self, actions: &[Action]) -> Result<TimeStep, GridspielError>{
        if self.should_reset{
            return match self.state{
                None => Err(ProtocolError::NotStarted.into()),
                Some(_) => Err(ProtocolError::EpisodeFinished.into())
            }
        }
        let mut state = self.state.take().ok_or(ProtocolError::NotStarted)?;
        // chance left unresolved by failed step is retried before new actions
        if let Err(e) = self.sample_chance(state.as_mut()){
            self.state = Some(state);
            return Err(e)
        }
        let num_players = self.game.num_players();
        let applied = match state.turn(){
            Turn::Simultaneous => {
                if actions.len() != num_players{
                    Err(ProtocolError::ActionCount { expected: num_players, got: actions.len() }.into())
                } else {
                    state.apply_actions(actions).map_err(GridspielError::from)
                }
            }
            Turn::Player(p) => {
                let action = match actions.len(){
                    1 => Ok(actions[0]),
                    n if n == num_players => Ok(actions[p]),
                    n => Err(GridspielError::from(ProtocolError::ActionCount { expected: 1, got: n }))
                };
                action.and_then(|a| state.apply_action(a)
                    .map_err(|source| GridspielError::GameP { source, player: p }))
            }
            Turn::Chance | Turn::Terminal => Err(ProtocolError::EpisodeFinished.into()),
        };
        if let Err(e) = applied.and_then(|_| self.sample_chance(state.as_mut())){
            self.state = Some(state);
            return Err(e)
        }

        let step_type = match state.is_terminal(){
            true => StepType::Last,
            false => StepType::Mid,
        };
        self.should_reset = state.is_terminal();
        let time_step = self.observe(state.as_ref(), step_type, Some(state.rewards()))?;
        #[cfg(feature = "log_trace")]
        log::trace!("Environment stepped with {:?}, rewards: {:?}", actions, time_step.rewards);
        self.state = Some(state);
        Ok(time_step)
    }

    fn sample_chance(&mut self, state: &mut dyn GameState) -> Result<(), GridspielError>{
        while state.is_chance_node(){
            let outcomes = state.chance_outcomes();
            let x: f64 = self.rng.random();
            let mut cumulative = 0.0;
            let mut selected = outcomes.last().map(|(a, _)| *a);
            for (outcome, p) in outcomes.iter(){
                cumulative += p;
                if x < cumulative{
                    selected = Some(*outcome);
                    break;
                }
            }
            let outcome = selected.ok_or_else(|| ProtocolError::ChanceResolution {
                context: format!("no chance outcomes in state:\n{state}")
            })?;
            #[cfg(feature = "log_trace")]
            log::trace!("Sampled chance outcome: {}", state.chance_outcome_to_string(outcome));
            state.apply_action(outcome)?;
        }
        Ok(())
    }

    fn observe(&self, state: &dyn GameState, step_type: StepType, rewards: Option<Vec<f64>>) -> Result<TimeStep, GridspielError>{
        let num_players = self.game.num_players();
        let info_state = (0..num_players).map(|p| match self.observation_kind{
            ObservationKind::InformationState => state.information_state_string(p),
            ObservationKind::Observation => state.observation_string(p),
        }).collect::<Result<Vec<String>, _>>()?;
        let discounts = match step_type{
            StepType::Last => vec![0.0; num_players],
            _ => vec![self.discount; num_players],
        };
        Ok(TimeStep{
            observations: Observations{
                info_state,
                legal_actions: state.legal_actions_all(),
                current_player: state.turn(),
            },
            rewards,
            discounts: Some(discounts),
            step_type,
        })
    }
}

#[cfg(test)]
mod tests{
    use std::fmt::{Display, Formatter};
    use std::sync::Arc;
    use crate::demo::{DemoGame, DEMO_LEFT, DEMO_RIGHT};
    use crate::env::{Environment, ObservationKind, StepType};
    use crate::error::{GameError, GridspielError, ProtocolError};
    use crate::game::{Action, Game, GameParameters, GameState, GameType, PlayerId, Turn};

    /// Demo game whose chance nodes list no outcomes.
    #[derive(Debug)]
    struct StuckChanceGame(DemoGame);

    #[derive(Debug, Clone)]
    struct StuckChanceState(Box<dyn GameState>);

    impl Game for StuckChanceGame{
        fn game_type(&self) -> &GameType { self.0.game_type() }
        fn parameters(&self) -> &GameParameters { self.0.parameters() }
        fn num_players(&self) -> usize { self.0.num_players() }
        fn num_distinct_actions(&self) -> usize { self.0.num_distinct_actions() }
        fn max_game_length(&self) -> usize { self.0.max_game_length() }
        fn min_utility(&self) -> f64 { self.0.min_utility() }
        fn max_utility(&self) -> f64 { self.0.max_utility() }
        fn new_initial_state(&self) -> Box<dyn GameState> {
            Box::new(StuckChanceState(self.0.new_initial_state()))
        }
    }

    impl Display for StuckChanceState{
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    impl GameState for StuckChanceState{
        fn turn(&self) -> Turn { self.0.turn() }
        fn num_players(&self) -> usize { self.0.num_players() }
        fn legal_actions(&self, player: PlayerId) -> Vec<Action> { self.0.legal_actions(player) }
        fn action_to_string(&self, player: PlayerId, action: Action) -> String { self.0.action_to_string(player, action) }
        fn apply_action(&mut self, action: Action) -> Result<(), GameError> { self.0.apply_action(action) }
        fn apply_actions(&mut self, actions: &[Action]) -> Result<(), GameError> { self.0.apply_actions(actions) }
        fn rewards(&self) -> Vec<f64> { self.0.rewards() }
        fn returns(&self) -> Vec<f64> { self.0.returns() }
        fn information_state_string(&self, player: PlayerId) -> Result<String, GameError> { self.0.information_state_string(player) }
        fn observation_string(&self, player: PlayerId) -> Result<String, GameError> { self.0.observation_string(player) }
        fn move_number(&self) -> usize { self.0.move_number() }
        fn clone_box(&self) -> Box<dyn GameState> { Box::new(self.clone()) }
    }

    #[test]
    fn simultaneous_episode(){
        let mut env = Environment::with_seed(Arc::new(DemoGame::new(2, false)), 42);
        assert_eq!(env.observation_kind(), ObservationKind::InformationState);
        assert_eq!(env.step(&[0, 0]), Err(GridspielError::Protocol { source: ProtocolError::NotStarted }));
        let ts = env.reset().unwrap();
        assert!(ts.first());
        assert!(ts.rewards.is_none());
        assert_eq!(ts.observations.current_player, Turn::Simultaneous);
        assert_eq!(ts.info_state(1), Some("P1 Round 0/2"));

        assert!(env.step(&[DEMO_LEFT]).is_err());
        let ts = env.step(&[DEMO_LEFT, DEMO_LEFT]).unwrap();
        assert_eq!(ts.step_type, StepType::Mid);
        assert!(ts.reward(0) == 1.0 || ts.reward(0) == 1.5);
        assert_eq!(ts.observations.current_player, Turn::Simultaneous);

        let ts = env.step(&[DEMO_LEFT, DEMO_RIGHT]).unwrap();
        assert!(ts.last());
        assert_eq!(ts.discount(0), 0.0);
        assert!(ts.legal_actions(0).is_empty());
        assert_eq!(env.step(&[0, 0]), Err(GridspielError::Protocol { source: ProtocolError::EpisodeFinished }));
        assert!(env.reset().unwrap().first());
    }

    #[test]
    fn sequential_accepts_single_or_joint(){
        let mut env = Environment::with_seed(Arc::new(DemoGame::new(1, true)), 1)
            .with_observation_kind(ObservationKind::Observation);
        let ts = env.reset().unwrap();
        assert_eq!(ts.current_player(), Some(0));
        let ts = env.step(&[DEMO_RIGHT]).unwrap();
        assert_eq!(ts.current_player(), Some(1));
        let ts = env.step(&[DEMO_LEFT, DEMO_RIGHT]).unwrap();
        assert!(ts.last());
        assert!(ts.total_reward() >= 2.0);
    }

    #[test]
    fn illegal_action_keeps_state(){
        let mut env = Environment::with_seed(Arc::new(DemoGame::new(1, false)), 3);
        env.reset().unwrap();
        assert!(env.step(&[5, 0]).is_err());
        assert!(env.step(&[0, 0]).is_ok());
    }

    #[test]
    fn failed_chance_resolution_keeps_state(){
        let mut env = Environment::with_seed(Arc::new(StuckChanceGame(DemoGame::new(2, false))), 5);
        env.reset().unwrap();
        let first = env.step(&[DEMO_LEFT, DEMO_LEFT]);
        assert!(matches!(first, Err(GridspielError::Protocol { source: ProtocolError::ChanceResolution { .. } })));
        assert_eq!(env.state().map(|s| s.turn()), Some(Turn::Chance));
        let second = env.step(&[DEMO_LEFT, DEMO_LEFT]);
        assert!(matches!(second, Err(GridspielError::Protocol { source: ProtocolError::ChanceResolution { .. } })));
        assert!(env.reset().unwrap().first());
    }
}
