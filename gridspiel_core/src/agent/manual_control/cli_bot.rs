use std::io;
use std::io::{BufRead, BufReader};
use crate::agent::Bot;
use crate::agent::manual_control::TurnCommand;
use crate::error::GridspielError;
use crate::game::{Action, GameState, PlayerId};
use crate::util::StrParsed;


/// Bot that asks human on standard input for every action.
///
/// Accepted input is either number or name of action, optionally preceded by `play`.
/// Other commands: `show` prints state, `help` lists legal actions, `quit` leaves the game.
pub struct HumanBot{
    player_id: PlayerId,
    input: Box<dyn BufRead + Send>,
    echo_state: bool,
}

impl HumanBot{
    pub fn new(player_id: PlayerId) -> Self{
        Self{
            player_id,
            input: Box::new(BufReader::new(io::stdin())),
            echo_state: false,
        }
    }

    /// Reads commands from provided reader instead of standard input.
    pub fn with_input<R: BufRead + Send + 'static>(player_id: PlayerId, input: R) -> Self{
        Self{
            player_id,
            input: Box::new(input),
            echo_state: false,
        }
    }

    /// Print state before asking for action.
    pub fn echo_state(mut self, echo: bool) -> Self{
        self.echo_state = echo;
        self
    }

    fn print_legal_actions(&self, state: &dyn GameState, legal: &[Action]){
        println!("Legal actions for player {}:", self.player_id);
        for action in legal{
            println!("  {}: {}", action, state.action_to_string(self.player_id, *action));
        }
    }

    /// Selecting action interactively. Prompts player and parses his input into action,
    /// repeating until legal action is given.
    pub fn interactive_action_select(&mut self, state: &dyn GameState) -> Result<Action, GridspielError>{
        let legal = state.legal_actions(self.player_id);
        if legal.is_empty(){
            return Err(GridspielError::NoActionAvailable {
                context: format!("Human player {} has no legal action", self.player_id)
            })
        }
        #[cfg(feature = "log_debug")]
        log::debug!("Player {} asked for action, legal: {:?}", self.player_id, legal);
        if self.echo_state{
            println!("{state}");
        }
        self.print_legal_actions(state, &legal);
        let mut buffer = String::new();
        loop{
            println!("Player: {} >", self.player_id);
            buffer.clear();
            let read = self.input.read_line(&mut buffer)
                .map_err(|e| GridspielError::IO {explanation: format!("{e}")})?;
            if read == 0{
                #[cfg(feature = "log_warn")]
                log::warn!("Input closed for human player {}", self.player_id);
                return Err(GridspielError::Quit)
            }
            if buffer.trim().is_empty(){
                self.print_legal_actions(state, &legal);
                continue;
            }

            match TurnCommand::parse_from_str(&buffer[..]){
                Ok((_rest, command)) => match command{
                    TurnCommand::Quit => {
                        return Err(GridspielError::Quit)
                    }
                    TurnCommand::Play(input) => {
                        match input.resolve(state, self.player_id, &legal){
                            Some(action) => return Ok(action),
                            None => println!("Action {input:?} is not legal, try again")
                        }
                    }
                    TurnCommand::Show => {
                        println!("{state}");
                    }
                    TurnCommand::ListActions => {
                        self.print_legal_actions(state, &legal);
                    }
                }
                Err(e) => {
                    println!("Failed parsing input: {} with error: {e:}", buffer.trim())
                }
            }
        }
    }
}

impl Bot for HumanBot{
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn name(&self) -> String {
        "Human".into()
    }

    fn step(&mut self, state: &dyn GameState) -> Result<Action, GridspielError> {
        self.interactive_action_select(state)
    }
}

#[cfg(test)]
mod tests{
    use std::io::Cursor;
    use crate::agent::Bot;
    use crate::agent::manual_control::HumanBot;
    use crate::demo::{DemoGame, DEMO_RIGHT};
    use crate::error::GridspielError;
    use crate::game::Game;

    #[test]
    fn human_retries_until_legal(){
        let game = DemoGame::new(1, false);
        let state = game.new_initial_state();
        let input = Cursor::new("\n7\nwhat is this\nshow\nplay right\n");
        let mut bot = HumanBot::with_input(1, input);
        assert_eq!(bot.step(state.as_ref()), Ok(DEMO_RIGHT));
    }

    #[test]
    fn human_quits(){
        let game = DemoGame::new(1, false);
        let state = game.new_initial_state();
        let mut bot = HumanBot::with_input(0, Cursor::new("quit\n"));
        assert_eq!(bot.step(state.as_ref()), Err(GridspielError::Quit));
        let mut bot = HumanBot::with_input(0, Cursor::new(""));
        assert_eq!(bot.step(state.as_ref()), Err(GridspielError::Quit));
    }
}
