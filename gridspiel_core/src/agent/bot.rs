use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use crate::error::GridspielError;
use crate::game::{Action, GameState, PlayerId};

/// Trait for players that take a seat at the table and select actions directly from game state.
pub trait Bot{
    /// Seat of the bot.
    fn player_id(&self) -> PlayerId;

    /// Name used when presenting players.
    fn name(&self) -> String;

    /// Selects action for [`player_id`](Bot::player_id) in given state.
    /// If at least one action is possible result should be `Ok(action)`.
    /// When no action is possible suggested error is [`GridspielError::NoActionAvailable`].
    fn step(&mut self, state: &dyn GameState) -> Result<Action, GridspielError>;

    /// Called when new episode starts.
    fn restart_at(&mut self, _state: &dyn GameState){}
}

impl<B: Bot + ?Sized> Bot for Box<B>{
    fn player_id(&self) -> PlayerId {
        self.as_ref().player_id()
    }

    fn name(&self) -> String {
        self.as_ref().name()
    }

    fn step(&mut self, state: &dyn GameState) -> Result<Action, GridspielError> {
        self.as_mut().step(state)
    }

    fn restart_at(&mut self, state: &dyn GameState) {
        self.as_mut().restart_at(state)
    }
}


/// Bot selecting uniformly at random from legal actions.
#[derive(Debug, Clone)]
pub struct RandomBot{
    player_id: PlayerId,
    rng: StdRng,
}

impl RandomBot{
    pub fn new(player_id: PlayerId) -> Self{
        Self{player_id, rng: StdRng::from_os_rng()}
    }

    pub fn with_seed(player_id: PlayerId, seed: u64) -> Self{
        Self{player_id, rng: StdRng::seed_from_u64(seed)}
    }
}

impl Bot for RandomBot{
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn name(&self) -> String {
        "Random".into()
    }

    fn step(&mut self, state: &dyn GameState) -> Result<Action, GridspielError> {
        let legal = state.legal_actions(self.player_id);
        legal.choose(&mut self.rng).copied().ok_or_else(|| GridspielError::NoActionAvailable {
            context: format!("Random bot of player {}", self.player_id)
        })
    }
}

#[cfg(test)]
mod tests{
    use crate::agent::{Bot, RandomBot};
    use crate::demo::DemoGame;
    use crate::error::GridspielError;
    use crate::game::Game;

    #[test]
    fn random_bot_selects_legal(){
        let game = DemoGame::new(2, true);
        let mut state = game.new_initial_state();
        let mut bot0 = RandomBot::with_seed(0, 7);
        let mut bot1 = RandomBot::with_seed(1, 7);
        for _ in 0..20{
            let a = bot0.step(state.as_ref()).unwrap();
            assert!(state.legal_actions(0).contains(&a));
        }
        assert!(matches!(bot1.step(state.as_ref()), Err(GridspielError::NoActionAvailable {..})));
        let a = bot0.step(state.as_ref()).unwrap();
        state.apply_action(a).unwrap();
        assert!(bot1.step(state.as_ref()).is_ok());
    }
}
