use std::path::PathBuf;
use std::str::FromStr;
use gridspiel_core::agent::manual_control::{ArrowKeyBot, HumanBot, KeyMap};
use gridspiel_core::agent::{Bot, RandomBot};
use gridspiel_core::error::GridspielError;
use gridspiel_core::game::{Game, PlayerId};
use gridspiel_rl::error::GridspielRlError;
use gridspiel_rl::persistence::load_qlearner;
use gridspiel_rl::policy::QLearnerBot;
use crate::error::ExampleError;

/// Who takes a seat at the table, parsed from command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerSpec{
    Human,
    Random,
    Mcts,
    QLearner(PathBuf),
}

impl FromStr for PlayerSpec{
    type Err = ExampleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, rest) = match s.split_once(':'){
            Some((k, r)) => (k, Some(r)),
            None => (s, None)
        };
        match (kind.trim().to_lowercase().as_str(), rest){
            ("human", _) => Ok(PlayerSpec::Human),
            ("random", _) => Ok(PlayerSpec::Random),
            ("mcts", _) => Ok(PlayerSpec::Mcts),
            ("qlearner", Some(path)) if !path.is_empty() => Ok(PlayerSpec::QLearner(PathBuf::from(path))),
            ("qlearner", _) => Err(ExampleError::MissingAgentPath { spec: s.into() }),
            _ => Err(ExampleError::UnknownPlayer { spec: s.into() })
        }
    }
}

/// How human players enter actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumanInput{
    /// Numbered or named actions typed in line.
    Line,
    /// Compass key map for grid games, optionally reading arrow keys.
    Keys{arrow_keys: bool},
}

impl PlayerSpec{
    /// Creates bot for seat `player`.
    ///
    /// Loaded learner trained for other seat is still used, with a warning.
    pub fn build_bot(&self, player: PlayerId, game: &dyn Game, human_input: HumanInput, seed: Option<u64>) -> Result<Box<dyn Bot>, GridspielRlError>{
        match self{
            PlayerSpec::Human => Ok(match human_input{
                HumanInput::Line => Box::new(HumanBot::new(player).echo_state(false)),
                HumanInput::Keys{arrow_keys} => Box::new(ArrowKeyBot::new(player, KeyMap::compass(), arrow_keys)),
            }),
            PlayerSpec::Random => Ok(match seed{
                Some(s) => Box::new(RandomBot::with_seed(player, s.wrapping_add(player as u64))),
                None => Box::new(RandomBot::new(player)),
            }),
            PlayerSpec::Mcts => Err(GridspielError::Unsupported {
                explanation: "MCTS bots are not available, use human, random or qlearner:<path>".into()
            }.into()),
            PlayerSpec::QLearner(path) => {
                let agent = load_qlearner(path, Some(game.num_distinct_actions()))?;
                let trained_for = gridspiel_rl::agent::RlAgent::player_id(&agent);
                if trained_for != player{
                    log::warn!("Agent was trained for player {trained_for}, but using for player {player}");
                }
                Ok(Box::new(QLearnerBot::new(player, agent, true)))
            }
        }
    }
}

/// Parses comma separated player list, number of entries must match `num_players`.
pub fn parse_player_list(list: &[String], num_players: usize) -> Result<Vec<PlayerSpec>, ExampleError>{
    if list.len() != num_players{
        return Err(ExampleError::PlayerCount { expected: num_players, got: list.len() })
    }
    list.iter().map(|s| s.parse()).collect()
}

#[cfg(test)]
mod tests{
    use std::path::PathBuf;
    use gridspiel_core::demo::DemoGame;
    use crate::error::ExampleError;
    use crate::players::*;

    #[test]
    fn parse_specs(){
        assert_eq!("human".parse::<PlayerSpec>().unwrap(), PlayerSpec::Human);
        assert_eq!("Random".parse::<PlayerSpec>().unwrap(), PlayerSpec::Random);
        assert_eq!("qlearner:agents/a.json".parse::<PlayerSpec>().unwrap(),
            PlayerSpec::QLearner(PathBuf::from("agents/a.json")));
        assert!(matches!("qlearner".parse::<PlayerSpec>(), Err(ExampleError::MissingAgentPath { .. })));
        assert!(matches!("alphazero".parse::<PlayerSpec>(), Err(ExampleError::UnknownPlayer { .. })));
    }

    #[test]
    fn player_list_length(){
        let list = vec!["human".to_string(), "random".to_string()];
        assert_eq!(parse_player_list(&list, 2).unwrap().len(), 2);
        assert!(matches!(parse_player_list(&list, 3), Err(ExampleError::PlayerCount { expected: 3, got: 2 })));
    }

    #[test]
    fn mcts_and_missing_agent_are_rejected(){
        let game = DemoGame::new(1, false);
        assert!(PlayerSpec::Mcts.build_bot(0, &game, HumanInput::Line, None).is_err());
        let missing = PlayerSpec::QLearner(PathBuf::from("/nonexistent/agent.json"));
        assert!(missing.build_bot(0, &game, HumanInput::Line, None).is_err());
        let random = PlayerSpec::Random.build_bot(1, &game, HumanInput::Line, Some(3)).unwrap();
        assert_eq!(random.player_id(), 1);
    }
}
