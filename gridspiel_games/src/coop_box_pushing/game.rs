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
use crate::coop_box_pushing::{
    curriculum_layout,
    BoxLayout,
    BoxPushingConfig,
    BoxPushingState,
    BIG_BOX_REWARD,
    BUMP_PENALTY,
    DELAY_PENALTY,
    MAX_CURRICULUM_LEVEL,
    NUM_ACTIONS,
    SMALL_BOX_REWARD
};

pub const COOP_BOX_PUSHING: &str = "coop_box_pushing";

/// Cooperative box pushing: two agents, simultaneous moves with stochastic execution.
///
/// Parameters: `fully_observable` (false), `horizon` (100), `curriculum_level` (0 to 10, 10 is
/// the original layout).
#[derive(Debug, Clone)]
pub struct CoopBoxPushingGame{
    config: BoxPushingConfig,
    layout: BoxLayout,
    game_type: GameType,
    parameters: GameParameters,
}

pub fn coop_box_pushing_game_type() -> GameType{
    GameType{
        short_name: COOP_BOX_PUSHING.into(),
        long_name: "Cooperative Box Pushing".into(),
        dynamics: Dynamics::Simultaneous,
        chance_mode: ChanceMode::ExplicitStochastic,
        information: Information::ImperfectInformation,
        utility: Utility::Identical,
        min_num_players: 2,
        max_num_players: 2,
        provides_information_state_string: false,
        provides_observation_string: true,
        parameter_specification: GameParameters::new()
            .with("fully_observable", false)
            .with("horizon", 100)
            .with("curriculum_level", MAX_CURRICULUM_LEVEL),
    }
}

impl CoopBoxPushingGame{
    pub fn new(params: &GameParameters) -> Result<Self, GameError>{
        let game_type = coop_box_pushing_game_type();
        params.validate(COOP_BOX_PUSHING, &game_type.parameter_specification)?;
        let config = BoxPushingConfig{
            fully_observable: params.bool("fully_observable", false)?,
            horizon: params.int_in_range("horizon", 100, 1, i64::MAX)? as usize,
        };
        let level = params.int_in_range("curriculum_level", MAX_CURRICULUM_LEVEL as i64, 0, MAX_CURRICULUM_LEVEL as i64)?;
        let layout = curriculum_layout(level as usize)?;
        #[cfg(feature = "log_debug")]
        log::debug!("Loaded {COOP_BOX_PUSHING} {}, {:?}", layout.description, config);
        Ok(Self{config, layout, game_type, parameters: params.clone()})
    }

    pub fn layout(&self) -> &BoxLayout{
        &self.layout
    }

    pub fn config(&self) -> &BoxPushingConfig{
        &self.config
    }
}

impl Game for CoopBoxPushingGame{
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
        NUM_ACTIONS
    }

    /// Success draws for both agents and initiative draw.
    fn max_chance_outcomes(&self) -> usize {
        4
    }

    fn max_game_length(&self) -> usize {
        self.config.horizon
    }

    /// Both agents bump in every round.
    fn min_utility(&self) -> f64 {
        (DELAY_PENALTY + 2.0 * BUMP_PENALTY) * self.config.horizon as f64
    }

    fn max_utility(&self) -> f64 {
        BIG_BOX_REWARD + 2.0 * SMALL_BOX_REWARD
    }

    fn new_initial_state(&self) -> Box<dyn GameState> {
        Box::new(BoxPushingState::new(self.config, &self.layout))
    }
}
