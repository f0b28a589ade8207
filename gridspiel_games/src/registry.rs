use std::sync::Arc;
use gridspiel_core::error::GameError;
use gridspiel_core::game::{parse_game_string, Game, GameParameters, GameType};
use crate::companion::{companion_game_type, CompanionSimpleGame, CompanionSynchroGame, SimpleRules, SynchroRules};
use crate::coop_box_pushing::{coop_box_pushing_game_type, CoopBoxPushingGame};

/// Types of every game that can be loaded.
pub fn registered_games() -> Vec<GameType>{
    vec![
        coop_box_pushing_game_type(),
        companion_game_type(&SimpleRules),
        companion_game_type(&SynchroRules),
    ]
}

/// Loads game by its short name.
pub fn load_game(name: &str, params: &GameParameters) -> Result<Arc<dyn Game>, GameError>{
    #[cfg(feature = "log_info")]
    log::info!("Loading game {name} with parameters ({params})");
    let game: Arc<dyn Game> = match name{
        "coop_box_pushing" => Arc::new(CoopBoxPushingGame::new(params)?),
        "companion_simple" => Arc::new(CompanionSimpleGame::new(params)?),
        "companion_synchro" => Arc::new(CompanionSynchroGame::new(params)?),
        other => return Err(GameError::UnknownGame { game: other.to_string() })
    };
    Ok(game)
}

/// Loads game from string like `companion_simple(rows=6,cols=6)`.
pub fn load_game_from_str(game_string: &str) -> Result<Arc<dyn Game>, GameError>{
    let (name, params) = parse_game_string(game_string)?;
    load_game(&name, &params)
}

#[cfg(test)]
mod tests{
    use gridspiel_core::error::GameError;
    use gridspiel_core::game::GameParameters;
    use crate::{load_game, load_game_from_str, registered_games};

    #[test]
    fn load_registered(){
        for game_type in registered_games(){
            let game = load_game(&game_type.short_name, &GameParameters::new()).unwrap();
            assert_eq!(game.game_type(), &game_type);
        }
    }

    #[test]
    fn load_from_string(){
        let game = load_game_from_str("companion_synchro(rows=6,cols=6,num_agents=3)").unwrap();
        assert_eq!(game.num_players(), 3);
        assert_eq!(game.game_string(), "companion_synchro(cols=6,num_agents=3,rows=6)");
        let game = load_game_from_str("coop_box_pushing(fully_observable=true,horizon=50)").unwrap();
        assert_eq!(game.max_game_length(), 50);
    }

    #[test]
    fn unknown_game_and_bad_parameters(){
        assert!(matches!(load_game("tic_tac_toe", &GameParameters::new()), Err(GameError::UnknownGame { .. })));
        assert!(load_game_from_str("coop_box_pushing(curriculum_level=12)").is_err());
        assert!(load_game_from_str("coop_box_pushing(").is_err());
    }
}
