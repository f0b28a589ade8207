use nom::branch::alt;
use nom::bytes::complete::{tag, tag_no_case};
use nom::character::complete::space1;
use nom::combinator::rest;
use nom::IResult;
use nom::Parser;
use crate::game::{Action, GameState, PlayerId};
use crate::util::{blank, StrParsed};


/// Action as typed by human: numeric identifier or name of action.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionInput{
    Id(Action),
    Name(String),
}

impl StrParsed for ActionInput{
    fn parse_from_str(input: &str) -> IResult<&str, Self> {
        if let Ok((rest, id)) = (usize::parse_from_str, blank).map(|(id, _)| id).parse(input){
            return Ok((rest, ActionInput::Id(id)))
        }
        let (remaining, name) = rest(input)?;
        let name = name.trim();
        if name.is_empty(){
            return IResult::Err(nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::NonEmpty)))
        }
        Ok((remaining, ActionInput::Name(name.to_string())))
    }
}

impl ActionInput{
    /// Resolves input against legal actions of player. Names are compared case-insensitively.
    pub fn resolve(&self, state: &dyn GameState, player: PlayerId, legal: &[Action]) -> Option<Action>{
        match self{
            ActionInput::Id(id) => legal.iter().find(|a| **a == *id).copied(),
            ActionInput::Name(name) => legal.iter()
                .find(|a| state.action_to_string(player, **a).eq_ignore_ascii_case(name))
                .copied()
        }
    }
}

/// Command typed by human player on his turn.
#[derive(Clone, Debug, PartialEq)]
pub enum TurnCommand{
    Quit,
    Play(ActionInput),
    Show,
    ListActions,
}


impl StrParsed for TurnCommand{
    fn parse_from_str(input: &str) -> IResult<&str, Self> {
        let input = input.trim();

        if let Ok((action_str, (_, _))) = (
            alt((tag("do"), tag("action"), tag("play"), tag::<&str, &str, nom::error::Error<&str>>("a"))),
            space1
        ).parse(input){
            ActionInput::parse_from_str(action_str)
                .map(|(rest, action)| (rest, Self::Play(action)))
        }

        else if let Ok((rest, _)) = (
            alt((tag("show"), tag("state"), tag("information"), tag::<&str, &str, nom::error::Error<&str>>("info"))),
            blank
        ).parse(input){
            Ok((rest, Self::Show))
        }

        else if let Ok((rest, _)) = (
            alt((tag("help"), tag("list"), tag("legal"), tag::<&str, &str, nom::error::Error<&str>>("?"))),
            blank
        ).parse(input){
            Ok((rest, Self::ListActions))
        }

        else if let Ok((rest, _)) = (
            alt((tag_no_case("exit"), tag_no_case("quit"), tag_no_case::<&str, &str, nom::error::Error<&str>>("q"))),
            blank
        ).parse(input){
            Ok((rest, Self::Quit))
        }
        else {
            ActionInput::parse_from_str(input)
                .map(|(rest, action)| (rest, Self::Play(action)))
        }
    }
}

#[cfg(test)]
mod tests{
    use crate::agent::manual_control::{ActionInput, TurnCommand};
    use crate::demo::{DemoGame, DEMO_LEFT, DEMO_RIGHT};
    use crate::game::Game;
    use crate::util::StrParsed;

    #[test]
    fn parse_interactive_command(){
        let mut tc = TurnCommand::parse_from_str("quit  ").unwrap().1;
        assert_eq!(tc, TurnCommand::Quit);
        tc = TurnCommand::parse_from_str("play     2\n").unwrap().1;
        assert_eq!(tc, TurnCommand::Play(ActionInput::Id(2)));
        tc = TurnCommand::parse_from_str("3").unwrap().1;
        assert_eq!(tc, TurnCommand::Play(ActionInput::Id(3)));
        tc = TurnCommand::parse_from_str("do turn left").unwrap().1;
        assert_eq!(tc, TurnCommand::Play(ActionInput::Name("turn left".into())));
        tc = TurnCommand::parse_from_str("info").unwrap().1;
        assert_eq!(tc, TurnCommand::Show);
        tc = TurnCommand::parse_from_str("?").unwrap().1;
        assert_eq!(tc, TurnCommand::ListActions);
        tc = TurnCommand::parse_from_str("Stay").unwrap().1;
        assert_eq!(tc, TurnCommand::Play(ActionInput::Name("Stay".into())));
        assert!(TurnCommand::parse_from_str("   ").is_err());
    }

    #[test]
    fn resolve_against_legal_actions(){
        let game = DemoGame::new(1, false);
        let state = game.new_initial_state();
        let legal = state.legal_actions(0);
        assert_eq!(ActionInput::Id(1).resolve(state.as_ref(), 0, &legal), Some(DEMO_RIGHT));
        assert_eq!(ActionInput::Id(7).resolve(state.as_ref(), 0, &legal), None);
        assert_eq!(ActionInput::Name("left".into()).resolve(state.as_ref(), 0, &legal), Some(DEMO_LEFT));
        assert_eq!(ActionInput::Name("up".into()).resolve(state.as_ref(), 0, &legal), None);
    }
}
