use dialoguer::console::{Key, Term};
use dialoguer::Input;
use crate::agent::Bot;
use crate::error::GridspielError;
use crate::game::{Action, GameState, PlayerId};

/// Single key press, terminal independent.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyPress{
    Up,
    Down,
    Left,
    Right,
    Space,
    Enter,
    Char(char),
    Other,
}

impl From<Key> for KeyPress{
    fn from(value: Key) -> Self {
        match value{
            Key::ArrowUp => KeyPress::Up,
            Key::ArrowDown => KeyPress::Down,
            Key::ArrowLeft => KeyPress::Left,
            Key::ArrowRight => KeyPress::Right,
            Key::Enter => KeyPress::Enter,
            Key::Char(' ') => KeyPress::Space,
            Key::Char(c) => KeyPress::Char(c),
            _ => KeyPress::Other,
        }
    }
}

/// Result of interpreting key press or typed text.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyDecision{
    Action(Action),
    Quit,
    ShowHelp,
    Ignored,
}

/// Binding of keys and typed aliases to actions.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyMap{
    keys: Vec<(KeyPress, Action)>,
    aliases: Vec<(String, Action)>,
}

impl KeyMap{
    pub fn new(keys: Vec<(KeyPress, Action)>, aliases: Vec<(&str, Action)>) -> Self{
        Self{
            keys,
            aliases: aliases.into_iter().map(|(s, a)| (s.to_string(), a)).collect()
        }
    }

    /// Layout for games with actions `North, East, South, West, Interact, Stay` (ids `0..6`).
    ///
    /// Arrows move, `Space` interacts, `Enter` stays. Typed aliases: `n/N/1`, `e/E/2`, `s/S/3`,
    /// `w/W/4`, `i/I/5`, `x/X/6/.`.
    pub fn compass() -> Self{
        Self::new(
            vec![
                (KeyPress::Up, 0),
                (KeyPress::Right, 1),
                (KeyPress::Down, 2),
                (KeyPress::Left, 3),
                (KeyPress::Space, 4),
                (KeyPress::Enter, 5),
            ],
            vec![
                ("n", 0), ("N", 0), ("1", 0),
                ("e", 1), ("E", 1), ("2", 1),
                ("s", 2), ("S", 2), ("3", 2),
                ("w", 3), ("W", 3), ("4", 3),
                ("i", 4), ("I", 4), ("5", 4),
                ("x", 5), ("X", 5), ("6", 5), (".", 5),
            ]
        )
    }

    pub fn decide_key(&self, key: KeyPress, legal: &[Action]) -> KeyDecision{
        match key{
            KeyPress::Char('q') | KeyPress::Char('Q') | KeyPress::Char('\u{3}') => KeyDecision::Quit,
            KeyPress::Char('?') | KeyPress::Char('h') => KeyDecision::ShowHelp,
            k => match self.keys.iter().find(|(bound, _)| *bound == k){
                Some((_, action)) if legal.contains(action) => KeyDecision::Action(*action),
                _ => KeyDecision::Ignored
            }
        }
    }

    /// Interprets typed line: alias or action name.
    pub fn decide_text(&self, text: &str, state: &dyn GameState, player: PlayerId, legal: &[Action]) -> KeyDecision{
        let text = text.trim();
        if text.is_empty(){
            return KeyDecision::ShowHelp
        }
        if text.eq_ignore_ascii_case("q") || text.eq_ignore_ascii_case("quit"){
            return KeyDecision::Quit
        }
        let candidate = self.aliases.iter().find(|(alias, _)| alias == text).map(|(_, a)| *a)
            .or_else(|| legal.iter()
                .find(|a| state.action_to_string(player, **a).eq_ignore_ascii_case(text))
                .copied());
        match candidate{
            Some(a) if legal.contains(&a) => KeyDecision::Action(a),
            _ => KeyDecision::Ignored
        }
    }

    /// Shortcuts bound to action, for presenting legal actions.
    pub fn shortcuts(&self, action: Action) -> Vec<String>{
        self.aliases.iter().filter(|(_, a)| *a == action).map(|(s, _)| s.clone()).collect()
    }
}

/// Human bot for grid games reading arrow keys from terminal.
///
/// When standard output is not a terminal or arrow keys are disabled, the bot falls back to
/// typed input with aliases.
pub struct ArrowKeyBot{
    player_id: PlayerId,
    keymap: KeyMap,
    arrow_keys: bool,
    term: Term,
}

impl ArrowKeyBot{
    pub fn new(player_id: PlayerId, keymap: KeyMap, arrow_keys: bool) -> Self{
        Self{player_id, keymap, arrow_keys, term: Term::stdout()}
    }

    fn print_help(&self, state: &dyn GameState, legal: &[Action]){
        println!("Legal actions for player {}:", self.player_id);
        for action in legal{
            let shortcuts = self.keymap.shortcuts(*action);
            println!("  {}: {} [{}]", action, state.action_to_string(self.player_id, *action), shortcuts.join("/"));
        }
        if self.arrow_keys{
            println!("Arrows move, Space interacts, Enter stays, q quits");
        }
    }

    fn read_key_action(&self, state: &dyn GameState, legal: &[Action]) -> Result<Action, GridspielError>{
        println!("Player {} - press key (? for help):", self.player_id);
        loop{
            let key = self.term.read_key()
                .map_err(|e| GridspielError::IO {explanation: format!("{e}")})?;
            match self.keymap.decide_key(KeyPress::from(key), legal){
                KeyDecision::Action(a) => {
                    println!("Player {} -> {}", self.player_id, state.action_to_string(self.player_id, a));
                    return Ok(a)
                },
                KeyDecision::Quit => return Err(GridspielError::Quit),
                KeyDecision::ShowHelp => self.print_help(state, legal),
                KeyDecision::Ignored => {}
            }
        }
    }

    fn read_typed_action(&self, state: &dyn GameState, legal: &[Action]) -> Result<Action, GridspielError>{
        loop{
            let text: String = Input::new()
                .with_prompt(format!("Player {} action", self.player_id))
                .allow_empty(true)
                .interact_text()
                .map_err(|e| GridspielError::IO {explanation: format!("{e}")})?;
            match self.keymap.decide_text(&text, state, self.player_id, legal){
                KeyDecision::Action(a) => return Ok(a),
                KeyDecision::Quit => return Err(GridspielError::Quit),
                KeyDecision::ShowHelp => self.print_help(state, legal),
                KeyDecision::Ignored => {
                    println!("Invalid action \"{}\"", text.trim());
                    self.print_help(state, legal);
                }
            }
        }
    }
}

impl Bot for ArrowKeyBot{
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn name(&self) -> String {
        "Human".into()
    }

    fn step(&mut self, state: &dyn GameState) -> Result<Action, GridspielError> {
        let legal = state.legal_actions(self.player_id);
        if legal.is_empty(){
            return Err(GridspielError::NoActionAvailable {
                context: format!("Human player {} has no legal action", self.player_id)
            })
        }
        if self.arrow_keys && self.term.is_term(){
            self.read_key_action(state, &legal)
        } else {
            self.read_typed_action(state, &legal)
        }
    }
}

#[cfg(test)]
mod tests{
    use crate::agent::manual_control::{KeyDecision, KeyMap, KeyPress};
    use crate::demo::DemoGame;
    use crate::game::Game;

    #[test]
    fn arrows_map_to_compass_actions(){
        let keymap = KeyMap::compass();
        let legal: Vec<usize> = (0..6).collect();
        assert_eq!(keymap.decide_key(KeyPress::Up, &legal), KeyDecision::Action(0));
        assert_eq!(keymap.decide_key(KeyPress::Right, &legal), KeyDecision::Action(1));
        assert_eq!(keymap.decide_key(KeyPress::Down, &legal), KeyDecision::Action(2));
        assert_eq!(keymap.decide_key(KeyPress::Left, &legal), KeyDecision::Action(3));
        assert_eq!(keymap.decide_key(KeyPress::Space, &legal), KeyDecision::Action(4));
        assert_eq!(keymap.decide_key(KeyPress::Enter, &legal), KeyDecision::Action(5));
        assert_eq!(keymap.decide_key(KeyPress::Char('q'), &legal), KeyDecision::Quit);
        assert_eq!(keymap.decide_key(KeyPress::Char('z'), &legal), KeyDecision::Ignored);
        assert_eq!(keymap.decide_key(KeyPress::Up, &[5]), KeyDecision::Ignored);
    }

    #[test]
    fn typed_aliases_and_names(){
        let keymap = KeyMap::compass();
        let game = DemoGame::new(1, false);
        let state = game.new_initial_state();
        let legal = state.legal_actions(0);
        assert_eq!(keymap.decide_text("n", state.as_ref(), 0, &legal), KeyDecision::Action(0));
        assert_eq!(keymap.decide_text("2", state.as_ref(), 0, &legal), KeyDecision::Action(1));
        assert_eq!(keymap.decide_text("right", state.as_ref(), 0, &legal), KeyDecision::Action(1));
        assert_eq!(keymap.decide_text("x", state.as_ref(), 0, &legal), KeyDecision::Ignored);
        assert_eq!(keymap.decide_text("", state.as_ref(), 0, &legal), KeyDecision::ShowHelp);
        assert_eq!(keymap.decide_text("quit", state.as_ref(), 0, &legal), KeyDecision::Quit);
        assert_eq!(keymap.shortcuts(5), vec!["x", "X", "6", "."]);
    }
}
