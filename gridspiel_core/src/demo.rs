//! Minimal coordination game used in demonstrations and tests.
//!
//! Two players choose `Left` or `Right` for given number of rounds. When choices match
//! both get reward `1.0`. Every round ends with chance node granting bonus `0.5` to both
//! players with probability `0.5`.
use std::fmt::{Display, Formatter};
use crate::error::GameError;
use crate::game::{
    check_player,
    Action,
    ChanceMode,
    Dynamics,
    Game,
    GameParameters,
    GameState,
    GameType,
    Information,
    PlayerId,
    Turn,
    Utility
};

pub const DEMO_LEFT: Action = 0;
pub const DEMO_RIGHT: Action = 1;
const CHANCE_NOTHING: Action = 0;
const CHANCE_BONUS: Action = 1;

#[derive(Debug, Clone)]
pub struct DemoGame{
    game_type: GameType,
    parameters: GameParameters,
    rounds: usize,
    sequential: bool,
}

impl DemoGame{
    pub fn new(rounds: usize, sequential: bool) -> Self{
        let game_type = GameType{
            short_name: "demo_coordination".into(),
            long_name: "Demo Coordination Game".into(),
            dynamics: if sequential {Dynamics::Sequential} else {Dynamics::Simultaneous},
            chance_mode: ChanceMode::ExplicitStochastic,
            information: Information::ImperfectInformation,
            utility: Utility::Identical,
            min_num_players: 2,
            max_num_players: 2,
            provides_information_state_string: true,
            provides_observation_string: true,
            parameter_specification: GameParameters::new()
                .with("rounds", 3)
                .with("sequential", false),
        };
        let parameters = GameParameters::new()
            .with("rounds", rounds)
            .with("sequential", sequential);
        Self{game_type, parameters, rounds, sequential}
    }
}

impl Game for DemoGame{
    fn game_type(&self) -> &GameType {
        &self.game_type
    }

    fn parameters(&self) -> &GameParameters {
        &self.parameters
    }

    fn num_players(&self) -> usize {
        2
    }

    fn num_distinct_actions(&self) -> usize {
        2
    }

    fn max_chance_outcomes(&self) -> usize {
        2
    }

    fn max_game_length(&self) -> usize {
        self.rounds * 2
    }

    fn min_utility(&self) -> f64 {
        0.0
    }

    fn max_utility(&self) -> f64 {
        1.5 * self.rounds as f64
    }

    fn new_initial_state(&self) -> Box<dyn GameState> {
        Box::new(DemoState{
            rounds: self.rounds,
            sequential: self.sequential,
            round: 0,
            pending: Vec::new(),
            last_joint: None,
            chance_pending: false,
            rewards: vec![0.0; 2],
            returns: vec![0.0; 2],
            moves: 0,
        })
    }
}

#[derive(Debug, Clone)]
pub struct DemoState{
    rounds: usize,
    sequential: bool,
    round: usize,
    pending: Vec<Action>,
    last_joint: Option<(Action, Action)>,
    chance_pending: bool,
    rewards: Vec<f64>,
    returns: Vec<f64>,
    moves: usize,
}

impl DemoState{
    fn resolve_joint(&mut self, a0: Action, a1: Action){
        let r = if a0 == a1 {1.0} else {0.0};
        self.rewards = vec![r, r];
        for ret in self.returns.iter_mut(){
            *ret += r;
        }
        self.last_joint = Some((a0, a1));
        self.pending.clear();
        self.chance_pending = true;
    }

    fn check_action(&self, player: PlayerId, action: Action) -> Result<(), GameError>{
        if action > DEMO_RIGHT{
            return Err(GameError::IllegalAction { player, action })
        }
        Ok(())
    }
}

impl Display for DemoState{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Round {}/{}", self.round, self.rounds)?;
        if let Some((a0, a1)) = self.last_joint{
            write!(f, ", last: {a0} {a1}")?;
        }
        Ok(())
    }
}

impl GameState for DemoState{
    fn turn(&self) -> Turn {
        if self.chance_pending{
            Turn::Chance
        } else if self.round >= self.rounds{
            Turn::Terminal
        } else if self.sequential{
            Turn::Player(self.pending.len())
        } else {
            Turn::Simultaneous
        }
    }

    fn num_players(&self) -> usize {
        2
    }

    fn legal_actions(&self, player: PlayerId) -> Vec<Action> {
        match self.turn(){
            Turn::Simultaneous if player < 2 => vec![DEMO_LEFT, DEMO_RIGHT],
            Turn::Player(p) if p == player => vec![DEMO_LEFT, DEMO_RIGHT],
            _ => Vec::new()
        }
    }

    fn action_to_string(&self, _player: PlayerId, action: Action) -> String {
        match action{
            DEMO_LEFT => "Left".into(),
            DEMO_RIGHT => "Right".into(),
            other => format!("Invalid({other})")
        }
    }

    fn chance_outcomes(&self) -> Vec<(Action, f64)> {
        if self.chance_pending{
            vec![(CHANCE_NOTHING, 0.5), (CHANCE_BONUS, 0.5)]
        } else {
            Vec::new()
        }
    }

    fn apply_action(&mut self, action: Action) -> Result<(), GameError> {
        match self.turn(){
            Turn::Chance => {
                match action{
                    CHANCE_NOTHING => {}
                    CHANCE_BONUS => {
                        for (rew, ret) in self.rewards.iter_mut().zip(self.returns.iter_mut()){
                            *rew += 0.5;
                            *ret += 0.5;
                        }
                    }
                    outcome => return Err(GameError::IllegalChanceOutcome { outcome })
                }
                self.chance_pending = false;
                self.round += 1;
            }
            Turn::Player(p) => {
                self.check_action(p, action)?;
                self.rewards = vec![0.0; 2];
                self.pending.push(action);
                if self.pending.len() == 2{
                    self.resolve_joint(self.pending[0], self.pending[1]);
                }
            }
            turn => return Err(GameError::WrongTurn { operation: "apply_action".into(), turn })
        }
        self.moves += 1;
        Ok(())
    }

    fn apply_actions(&mut self, actions: &[Action]) -> Result<(), GameError> {
        let turn = self.turn();
        if turn != Turn::Simultaneous{
            return Err(GameError::WrongTurn { operation: "apply_actions".into(), turn })
        }
        if actions.len() != 2{
            return Err(GameError::JointActionSize { expected: 2, got: actions.len() })
        }
        for (p, a) in actions.iter().enumerate(){
            self.check_action(p, *a)?;
        }
        self.resolve_joint(actions[0], actions[1]);
        self.moves += 1;
        Ok(())
    }

    fn rewards(&self) -> Vec<f64> {
        self.rewards.clone()
    }

    fn returns(&self) -> Vec<f64> {
        self.returns.clone()
    }

    fn information_state_string(&self, player: PlayerId) -> Result<String, GameError> {
        check_player(player, 2)?;
        Ok(format!("P{player} {self}"))
    }

    fn observation_string(&self, player: PlayerId) -> Result<String, GameError> {
        check_player(player, 2)?;
        Ok(self.to_string())
    }

    fn move_number(&self) -> usize {
        self.moves
    }

    fn clone_box(&self) -> Box<dyn GameState> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests{
    use crate::demo::{DemoGame, DEMO_LEFT, DEMO_RIGHT};
    use crate::game::{Game, Turn};

    #[test]
    fn simultaneous_round_then_chance(){
        let game = DemoGame::new(1, false);
        let mut state = game.new_initial_state();
        assert_eq!(state.turn(), Turn::Simultaneous);
        state.apply_actions(&[DEMO_LEFT, DEMO_LEFT]).unwrap();
        assert_eq!(state.turn(), Turn::Chance);
        assert_eq!(state.rewards(), vec![1.0, 1.0]);
        state.apply_action(1).unwrap();
        assert_eq!(state.turn(), Turn::Terminal);
        assert_eq!(state.returns(), vec![1.5, 1.5]);
    }

    #[test]
    fn sequential_turns(){
        let game = DemoGame::new(1, true);
        let mut state = game.new_initial_state();
        assert_eq!(state.turn(), Turn::Player(0));
        assert!(state.legal_actions(1).is_empty());
        state.apply_action(DEMO_LEFT).unwrap();
        assert_eq!(state.turn(), Turn::Player(1));
        state.apply_action(DEMO_RIGHT).unwrap();
        assert_eq!(state.turn(), Turn::Chance);
        assert_eq!(state.rewards(), vec![0.0, 0.0]);
        assert!(state.apply_actions(&[0, 0]).is_err());
    }
}
