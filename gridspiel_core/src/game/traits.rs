use std::fmt::{Debug, Display};
use crate::error::GameError;
use crate::game::{Action, GameParameters, GameType, PlayerId, Turn};

/// Game loaded from engine. It is factory of initial states and holds
/// static information about the game.
pub trait Game: Debug + Send + Sync{
    fn game_type(&self) -> &GameType;
    /// Parameters the game was loaded with (including defaults).
    fn parameters(&self) -> &GameParameters;
    fn num_players(&self) -> usize;
    fn num_distinct_actions(&self) -> usize;
    fn max_chance_outcomes(&self) -> usize{
        0
    }
    /// Upper bound of number of player moves in one episode.
    fn max_game_length(&self) -> usize;
    fn min_utility(&self) -> f64;
    fn max_utility(&self) -> f64;
    fn new_initial_state(&self) -> Box<dyn GameState>;

    /// Game string that loads the same game again.
    fn game_string(&self) -> String{
        let params = self.parameters();
        if params.is_empty(){
            self.game_type().short_name.clone()
        } else {
            format!("{}({})", self.game_type().short_name, params)
        }
    }
}

/// State of game. Requests that are illegal in current state are answered with
/// [`GameError`].
///
/// [`Display`] is used as human readable rendering of state.
pub trait GameState: Debug + Display + Send{

    fn turn(&self) -> Turn;

    fn num_players(&self) -> usize;

    /// Legal actions of player, empty when player is not to act.
    fn legal_actions(&self, player: PlayerId) -> Vec<Action>;

    fn action_to_string(&self, player: PlayerId, action: Action) -> String;

    /// Pairs (outcome, probability) at chance node, empty elsewhere.
    fn chance_outcomes(&self) -> Vec<(Action, f64)>{
        Vec::new()
    }

    fn chance_outcome_to_string(&self, outcome: Action) -> String{
        format!("Chance outcome {outcome}")
    }

    /// Applies action of player to act (sequential node) or chance outcome (chance node).
    fn apply_action(&mut self, action: Action) -> Result<(), GameError>;

    /// Applies joint action at simultaneous node, one action per player.
    fn apply_actions(&mut self, actions: &[Action]) -> Result<(), GameError>;

    /// Rewards from last transition.
    fn rewards(&self) -> Vec<f64>;

    /// Rewards accumulated since start of episode.
    fn returns(&self) -> Vec<f64>;

    fn information_state_string(&self, player: PlayerId) -> Result<String, GameError>;

    fn observation_string(&self, player: PlayerId) -> Result<String, GameError>;

    /// Number of transitions (including chance) applied so far.
    fn move_number(&self) -> usize;

    fn clone_box(&self) -> Box<dyn GameState>;

    fn is_terminal(&self) -> bool{
        self.turn() == Turn::Terminal
    }

    fn is_chance_node(&self) -> bool{
        self.turn() == Turn::Chance
    }

    fn is_simultaneous_node(&self) -> bool{
        self.turn() == Turn::Simultaneous
    }

    fn current_player(&self) -> Option<PlayerId>{
        self.turn().player()
    }

    /// Legal actions for every player.
    fn legal_actions_all(&self) -> Vec<Vec<Action>>{
        (0..self.num_players()).map(|p| self.legal_actions(p)).collect()
    }
}

impl Clone for Box<dyn GameState>{
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Fails with [`GameError::PlayerOutOfRange`] if `player` is not seated in game.
pub fn check_player(player: PlayerId, num_players: usize) -> Result<(), GameError>{
    if player >= num_players{
        return Err(GameError::PlayerOutOfRange { player, num_players })
    }
    Ok(())
}
