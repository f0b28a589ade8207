use gridspiel_core::error::GameError;
use gridspiel_core::game::{
    ChanceMode,
    Dynamics,
    Game,
    GameParameters,
    GameState,
    GameType,
    Information,
    Utility
};
use crate::companion::{
    CompanionConfig,
    CompanionRules,
    CompanionState,
    SimpleRules,
    SynchroRules,
    DEATH_PENALTY,
    MAX_AGENTS,
    NUM_ACTIONS,
    STEP_REWARD,
    SUCCESS_REWARD
};

/// Companion game parametrised by variant rules.
///
/// Accepted parameters: `rows`, `cols`, `horizon` and `num_agents` (1 to 25).
#[derive(Debug, Clone)]
pub struct CompanionGame<R: CompanionRules>{
    rules: R,
    config: CompanionConfig,
    game_type: GameType,
    parameters: GameParameters,
}

pub type CompanionSimpleGame = CompanionGame<SimpleRules>;
pub type CompanionSynchroGame = CompanionGame<SynchroRules>;

fn parameter_specification() -> GameParameters{
    let default = CompanionConfig::default();
    GameParameters::new()
        .with("rows", default.rows)
        .with("cols", default.cols)
        .with("horizon", default.horizon)
        .with("num_agents", default.num_agents)
}

/// Static description of companion variant.
pub fn companion_game_type<R: CompanionRules>(rules: &R) -> GameType{
    GameType{
        short_name: rules.short_name().into(),
        long_name: rules.long_name().into(),
        dynamics: Dynamics::Simultaneous,
        chance_mode: ChanceMode::Deterministic,
        information: Information::PerfectInformation,
        utility: Utility::Identical,
        min_num_players: 1,
        max_num_players: MAX_AGENTS,
        provides_information_state_string: true,
        provides_observation_string: true,
        parameter_specification: parameter_specification(),
    }
}

impl<R: CompanionRules + Default> CompanionGame<R>{
    pub fn new(params: &GameParameters) -> Result<Self, GameError>{
        Self::with_rules(R::default(), params)
    }
}

impl<R: CompanionRules> CompanionGame<R>{
    pub fn with_rules(rules: R, params: &GameParameters) -> Result<Self, GameError>{
        let game_type = companion_game_type(&rules);
        params.validate(&game_type.short_name, &game_type.parameter_specification)?;
        let default = CompanionConfig::default();
        let config = CompanionConfig{
            rows: params.int_in_range("rows", default.rows as i64, 1, i32::MAX as i64)? as usize,
            cols: params.int_in_range("cols", default.cols as i64, 1, i32::MAX as i64)? as usize,
            horizon: params.int_in_range("horizon", default.horizon as i64, 1, i64::MAX)? as usize,
            num_agents: params.int_in_range("num_agents", default.num_agents as i64, 1, MAX_AGENTS as i64)? as usize,
        };
        #[cfg(feature = "log_debug")]
        log::debug!("Loaded {} with {:?}", game_type.short_name, config);
        Ok(Self{rules, config, game_type, parameters: params.clone()})
    }

    pub fn config(&self) -> &CompanionConfig{
        &self.config
    }

    pub fn rules(&self) -> &R{
        &self.rules
    }
}

impl<R: CompanionRules> Game for CompanionGame<R>{
    fn game_type(&self) -> &GameType {
        &self.game_type
    }

    fn parameters(&self) -> &GameParameters {
        &self.parameters
    }

    fn num_players(&self) -> usize {
        self.config.num_agents
    }

    fn num_distinct_actions(&self) -> usize {
        NUM_ACTIONS
    }

    fn max_game_length(&self) -> usize {
        self.config.horizon
    }

    /// Dying in lava after spending every timestep walking.
    fn min_utility(&self) -> f64 {
        DEATH_PENALTY + STEP_REWARD * self.config.horizon as f64
    }

    fn max_utility(&self) -> f64 {
        SUCCESS_REWARD + STEP_REWARD
    }

    fn new_initial_state(&self) -> Box<dyn GameState> {
        Box::new(CompanionState::new(self.rules.clone(), self.config))
    }
}

#[cfg(test)]
mod tests{
    use gridspiel_core::error::GameError;
    use gridspiel_core::game::{Dynamics, Game, GameParameters, Utility};
    use crate::companion::{CompanionSimpleGame, CompanionSynchroGame};

    #[test]
    fn type_and_utilities(){
        let game = CompanionSynchroGame::new(&GameParameters::new().with("horizon", 50)).unwrap();
        assert_eq!(game.game_type().short_name, "companion_synchro");
        assert_eq!(game.game_type().dynamics, Dynamics::Simultaneous);
        assert_eq!(game.game_type().utility, Utility::Identical);
        assert_eq!(game.game_type().max_num_players, 25);
        assert_eq!(game.min_utility(), -150.0);
        assert_eq!(game.max_utility(), 99.0);
        assert_eq!(game.max_game_length(), 50);
        assert_eq!(game.game_string(), "companion_synchro(horizon=50)");
    }

    #[test]
    fn invalid_parameters(){
        let too_many = GameParameters::new().with("num_agents", 26);
        assert!(matches!(CompanionSimpleGame::new(&too_many), Err(GameError::InvalidParameter { .. })));
        let zero = GameParameters::new().with("rows", 0);
        assert!(CompanionSimpleGame::new(&zero).is_err());
        let unknown = GameParameters::new().with("players", 2);
        assert!(matches!(CompanionSimpleGame::new(&unknown), Err(GameError::UnknownParameter { .. })));
        let wrong_type = GameParameters::new().with("rows", "eight");
        assert!(matches!(CompanionSimpleGame::new(&wrong_type), Err(GameError::ParameterType { .. })));
    }
}
