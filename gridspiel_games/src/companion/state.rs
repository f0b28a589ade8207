use std::fmt::{Debug, Display, Formatter};
use gridspiel_core::error::GameError;
use gridspiel_core::game::{check_player, Action, GameState, PlayerId, Turn};
use crate::companion::{
    AgentData,
    Color,
    CompanionAction,
    Direction,
    Grid,
    Position,
    DEATH_PENALTY,
    NUM_ACTIONS,
    STEP_REWARD,
    SUCCESS_REWARD
};

/// Rules that distinguish companion variants: initial layout and success condition.
pub trait CompanionRules: Clone + Debug + Send + Sync + 'static{
    /// Short name used in game registry.
    fn short_name(&self) -> &'static str;
    /// Name shown in state header.
    fn environment_name(&self) -> &'static str;
    fn long_name(&self) -> &'static str;
    /// Builds initial grid.
    fn setup(&self, rows: usize, cols: usize, num_agents: usize) -> Grid;
    /// Success condition checked after every timestep.
    fn is_success(&self, grid: &Grid) -> bool;
}

/// Parameters shared by all companion variants.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CompanionConfig{
    pub rows: usize,
    pub cols: usize,
    pub horizon: usize,
    pub num_agents: usize,
}

impl Default for CompanionConfig{
    fn default() -> Self {
        Self{rows: 8, cols: 8, horizon: 100, num_agents: 2}
    }
}

/// State of companion game. All agents act simultaneously in every timestep.
#[derive(Clone, Debug)]
pub struct CompanionState<R: CompanionRules>{
    rules: R,
    config: CompanionConfig,
    grid: Grid,
    timestep: usize,
    rewards: Vec<f64>,
    returns: Vec<f64>,
    success: bool,
}

/// Places agent with palette color facing north.
pub(crate) fn place_agent(grid: &mut Grid, id: usize, position: Position){
    grid.add_agent(AgentData::new(id, position, Direction::North, Color::for_agent(id)));
}

impl<R: CompanionRules> CompanionState<R>{
    pub fn new(rules: R, config: CompanionConfig) -> Self{
        let grid = rules.setup(config.rows, config.cols, config.num_agents);
        Self{
            rules,
            config,
            grid,
            timestep: 0,
            rewards: vec![0.0; config.num_agents],
            returns: vec![0.0; config.num_agents],
            success: false,
        }
    }

    pub fn grid(&self) -> &Grid{
        &self.grid
    }

    pub fn timestep(&self) -> usize{
        self.timestep
    }

    pub fn horizon(&self) -> usize{
        self.config.horizon
    }

    pub fn rules(&self) -> &R{
        &self.rules
    }

    fn process_timestep(&mut self, actions: &[CompanionAction]){
        self.rewards.iter_mut().for_each(|r| *r = STEP_REWARD);

        let mut moves = self.grid.predict_moves(actions);
        self.grid.resolve_collisions(&mut moves);
        self.grid.apply_moves(&moves);
        self.grid.process_interactions(actions);

        for dead in self.grid.dead_agents(){
            if let Some(r) = self.rewards.get_mut(dead){
                *r = DEATH_PENALTY;
            }
            #[cfg(feature = "log_debug")]
            log::debug!("Agent {dead} died in lava at timestep {}", self.timestep);
        }
        self.grid.remove_dead_agents();

        self.success = self.rules.is_success(&self.grid);
        if self.success{
            self.rewards.iter_mut().for_each(|r| *r += SUCCESS_REWARD);
        }
        for (ret, rew) in self.returns.iter_mut().zip(self.rewards.iter()){
            *ret += *rew;
        }
        self.timestep += 1;
    }
}

impl<R: CompanionRules> Display for CompanionState<R>{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} State:", self.rules.environment_name())?;
        writeln!(f, "Timestep: {}/{}", self.timestep, self.config.horizon)?;
        writeln!(f, "Terminal: {}", self.is_terminal())?;
        let returns: Vec<String> = self.returns.iter().map(|r| format!("{r}")).collect();
        writeln!(f, "Returns: [{}]", returns.join(", "))?;
        writeln!(f)?;
        write!(f, "{}", self.grid)
    }
}

impl<R: CompanionRules> GameState for CompanionState<R>{
    fn turn(&self) -> Turn {
        if self.success || self.timestep >= self.config.horizon{
            Turn::Terminal
        } else {
            Turn::Simultaneous
        }
    }

    fn num_players(&self) -> usize {
        self.config.num_agents
    }

    fn legal_actions(&self, player: PlayerId) -> Vec<Action> {
        if self.is_terminal() || player >= self.config.num_agents{
            return Vec::new()
        }
        (0..NUM_ACTIONS).collect()
    }

    fn action_to_string(&self, _player: PlayerId, action: Action) -> String {
        if action < NUM_ACTIONS{
            CompanionAction::from_action(action).to_string()
        } else {
            "Invalid action".into()
        }
    }

    fn apply_action(&mut self, _action: Action) -> Result<(), GameError> {
        Err(GameError::WrongTurn { operation: "apply_action".into(), turn: self.turn() })
    }

    fn apply_actions(&mut self, actions: &[Action]) -> Result<(), GameError> {
        let turn = self.turn();
        if turn != Turn::Simultaneous{
            return Err(GameError::WrongTurn { operation: "apply_actions".into(), turn })
        }
        if actions.len() != self.config.num_agents{
            return Err(GameError::JointActionSize { expected: self.config.num_agents, got: actions.len() })
        }
        if let Some((player, action)) = actions.iter().enumerate().find(|(_, a)| **a >= NUM_ACTIONS){
            return Err(GameError::IllegalAction { player, action: *action })
        }
        let typed: Vec<CompanionAction> = actions.iter().map(|a| CompanionAction::from_action(*a)).collect();
        self.process_timestep(&typed);
        Ok(())
    }

    fn rewards(&self) -> Vec<f64> {
        self.rewards.clone()
    }

    fn returns(&self) -> Vec<f64> {
        self.returns.clone()
    }

    fn information_state_string(&self, player: PlayerId) -> Result<String, GameError> {
        check_player(player, self.config.num_agents)?;
        Ok(self.to_string())
    }

    fn observation_string(&self, player: PlayerId) -> Result<String, GameError> {
        check_player(player, self.config.num_agents)?;
        Ok(self.to_string())
    }

    fn move_number(&self) -> usize {
        self.timestep
    }

    fn clone_box(&self) -> Box<dyn GameState> {
        Box::new(self.clone())
    }
}
