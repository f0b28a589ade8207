use gridspiel_core::error::GameError;
use gridspiel_core::game::{GameState, PlayerId};

/// Source of Q-table key read from game state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum StateKeyMode{
    /// Information state string of player.
    #[default]
    InformationState,
    /// Observation string of player, used when game has no information state.
    Observation,
    /// Rendered state, prefixed with seat at simultaneous nodes.
    StateText,
}

/// Reads key of player's state. When game does not provide requested string the mode is
/// permanently switched to the next one (information state, observation, state text).
pub fn read_state_key(state: &dyn GameState, player: PlayerId, mode: &mut StateKeyMode) -> Result<String, GameError>{
    loop{
        let result = match *mode{
            StateKeyMode::InformationState => state.information_state_string(player),
            StateKeyMode::Observation => state.observation_string(player),
            StateKeyMode::StateText => return Ok(match state.is_simultaneous_node(){
                true => format!("P{player}:{state}"),
                false => format!("{state}"),
            })
        };
        match result{
            Err(GameError::NotProvided { .. }) => {
                *mode = match *mode{
                    StateKeyMode::InformationState => StateKeyMode::Observation,
                    _ => StateKeyMode::StateText,
                };
                #[cfg(feature = "log_debug")]
                log::debug!("Player {player} switches state key to {:?}", mode);
            }
            other => return other
        }
    }
}

#[cfg(test)]
mod tests{
    use std::fmt::{Display, Formatter};
    use gridspiel_core::demo::{DemoGame, DEMO_LEFT};
    use gridspiel_core::error::GameError;
    use gridspiel_core::game::{Action, Game, GameState, PlayerId, Turn};
    use crate::policy::{read_state_key, StateKeyMode};

    /// Demo state hiding both information state and observation strings.
    #[derive(Debug, Clone)]
    struct OpaqueState(Box<dyn GameState>);

    fn not_provided(feature: &str) -> GameError{
        GameError::NotProvided { game: "demo_coordination".into(), feature: feature.into() }
    }

    impl Display for OpaqueState{
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    impl GameState for OpaqueState{
        fn turn(&self) -> Turn { self.0.turn() }
        fn num_players(&self) -> usize { self.0.num_players() }
        fn legal_actions(&self, player: PlayerId) -> Vec<Action> { self.0.legal_actions(player) }
        fn action_to_string(&self, player: PlayerId, action: Action) -> String { self.0.action_to_string(player, action) }
        fn apply_action(&mut self, action: Action) -> Result<(), GameError> { self.0.apply_action(action) }
        fn apply_actions(&mut self, actions: &[Action]) -> Result<(), GameError> { self.0.apply_actions(actions) }
        fn rewards(&self) -> Vec<f64> { self.0.rewards() }
        fn returns(&self) -> Vec<f64> { self.0.returns() }
        fn information_state_string(&self, _player: PlayerId) -> Result<String, GameError> {
            Err(not_provided("information state string"))
        }
        fn observation_string(&self, _player: PlayerId) -> Result<String, GameError> {
            Err(not_provided("observation string"))
        }
        fn move_number(&self) -> usize { self.0.move_number() }
        fn clone_box(&self) -> Box<dyn GameState> { Box::new(self.clone()) }
    }

    #[test]
    fn state_text_key_is_prefixed_at_simultaneous_nodes(){
        let state = OpaqueState(DemoGame::new(2, false).new_initial_state());
        let mut mode = StateKeyMode::default();
        assert_eq!(read_state_key(&state, 1, &mut mode).unwrap(), format!("P1:{state}"));
        assert_eq!(mode, StateKeyMode::StateText);
    }

    #[test]
    fn state_text_key_at_sequential_nodes(){
        let mut state = OpaqueState(DemoGame::new(2, true).new_initial_state());
        state.apply_action(DEMO_LEFT).unwrap();
        let mut mode = StateKeyMode::Observation;
        assert_eq!(read_state_key(&state, 1, &mut mode).unwrap(), format!("{state}"));
        assert_eq!(mode, StateKeyMode::StateText);
    }

    #[test]
    fn observation_key_when_only_observation_is_provided(){
        let game = gridspiel_games::load_game_from_str("coop_box_pushing(fully_observable=true)").unwrap();
        let state = game.new_initial_state();
        let mut mode = StateKeyMode::default();
        let key = read_state_key(state.as_ref(), 0, &mut mode).unwrap();
        assert_eq!(key, state.observation_string(0).unwrap());
        assert_eq!(mode, StateKeyMode::Observation);
    }
}
