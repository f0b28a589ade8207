use colored::{Color as TermColor, Colorize};
use enum_map::{enum_map, Enum, EnumMap};
use gridspiel_core::game::GameState;
use gridspiel_games::companion::{Color, CompanionRules, CompanionState, Position};

/// Difference of returns below which two player game is a tie.
pub const TIE_TOLERANCE: f64 = 0.01;

/// Terminal color of agent with companion palette color.
pub fn agent_term_color(color: Color) -> TermColor{
    match color{
        Color::Red => TermColor::BrightRed,
        Color::Blue => TermColor::BrightBlue,
        Color::Green => TermColor::BrightGreen,
        Color::Yellow => TermColor::BrightYellow,
        Color::Purple => TermColor::BrightMagenta,
        Color::Orange => TermColor::Yellow,
        Color::Cyan => TermColor::BrightCyan,
        Color::Pink => TermColor::Magenta,
    }
}

/// Colors grid symbol. Agent glyphs and counts are colored only when `agent` is known.
pub fn colorize_symbol(symbol: char, agent: Option<Color>, use_colors: bool) -> String{
    let plain = symbol.to_string();
    if !use_colors{
        return plain
    }
    if let Some(color) = agent.filter(|_| "^>v<".contains(symbol) || symbol.is_ascii_digit()){
        return plain.color(agent_term_color(color)).to_string()
    }
    match symbol{
        'G' => plain.bright_green().to_string(),
        '~' => plain.bright_red().to_string(),
        '#' => plain.bright_black().to_string(),
        'S' => plain.bright_cyan().to_string(),
        '*' => plain.bright_yellow().to_string(),
        '+' => plain.yellow().to_string(),
        '/' => plain.green().to_string(),
        '.' => plain.dimmed().to_string(),
        _ => plain,
    }
}

fn colorize_header_line(line: &str) -> Option<String>{
    if line.ends_with(" State:"){
        Some(line.bold().cyan().to_string())
    } else if line.contains("Returns:"){
        Some(line.bright_yellow().to_string())
    } else {
        None
    }
}

/// Colors any grid-like text: header and returns lines are highlighted, lines holding grid
/// symbols are colored symbol by symbol.
pub fn colorize_text(text: &str, use_colors: bool) -> String{
    if !use_colors{
        return text.to_string()
    }
    text.split('\n').map(|line| {
        if let Some(colored) = colorize_header_line(line){
            colored
        } else if line.chars().any(|c| "^>v<G~#S*+/.".contains(c)){
            line.chars().map(|c| colorize_symbol(c, None, true)).collect()
        } else {
            line.to_string()
        }
    }).collect::<Vec<_>>().join("\n")
}

/// Renders companion state with agents painted in their own colors.
///
/// A cell shared by several agents shows their count in the color of the first one.
pub fn render_companion<R: CompanionRules>(state: &CompanionState<R>, use_colors: bool) -> String{
    if !use_colors{
        return state.to_string()
    }
    let grid = state.grid();
    let mut lines = Vec::new();
    lines.push(format!("{} State:", state.rules().environment_name()).bold().cyan().to_string());
    lines.push(format!("Timestep: {}/{}", state.timestep(), state.horizon()));
    lines.push(format!("Terminal: {}", state.is_terminal()));
    let returns: Vec<String> = state.returns().iter().map(|r| format!("{r}")).collect();
    lines.push(format!("Returns: [{}]", returns.join(", ")).bright_yellow().to_string());
    lines.push(String::new());
    for row in 0..grid.rows(){
        let mut line = String::new();
        for col in 0..grid.cols(){
            let position = Position::new(row, col);
            let ids = grid.agent_ids_at(position);
            let first_color = ids.first().and_then(|id| grid.agent(*id)).map(|a| a.color);
            let symbol = match ids.len(){
                0 | 1 => grid.symbol_at(position),
                n => char::from_digit((n % 10) as u32, 10).unwrap_or('+'),
            };
            line.push_str(&colorize_symbol(symbol, first_color, true));
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// Result of finished two player game.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Enum)]
pub enum Outcome{
    Player0Wins,
    Player1Wins,
    Tie,
}

impl Outcome{
    /// Outcome of two player game, `None` for other number of players.
    pub fn from_returns(returns: &[f64]) -> Option<Self>{
        match returns{
            [r0, r1] if (r0 - r1).abs() < TIE_TOLERANCE => Some(Outcome::Tie),
            [r0, r1] if r0 > r1 => Some(Outcome::Player0Wins),
            [_, _] => Some(Outcome::Player1Wins),
            _ => None
        }
    }
}

/// Counts outcomes over many games.
#[derive(Debug, Clone)]
pub struct OutcomeTally{
    counts: EnumMap<Outcome, usize>,
    returns_sum: Vec<f64>,
    games: usize,
}

impl OutcomeTally{
    pub fn new(num_players: usize) -> Self{
        Self{
            counts: enum_map! {_ => 0},
            returns_sum: vec![0.0; num_players],
            games: 0,
        }
    }

    pub fn record(&mut self, returns: &[f64]){
        if let Some(outcome) = Outcome::from_returns(returns){
            self.counts[outcome] += 1;
        }
        for (sum, r) in self.returns_sum.iter_mut().zip(returns){
            *sum += r;
        }
        self.games += 1;
    }

    pub fn count(&self, outcome: Outcome) -> usize{
        self.counts[outcome]
    }

    pub fn games(&self) -> usize{
        self.games
    }

    pub fn average_returns(&self) -> Vec<f64>{
        match self.games{
            0 => vec![0.0; self.returns_sum.len()],
            n => self.returns_sum.iter().map(|s| s / n as f64).collect()
        }
    }

    pub fn summary(&self) -> String{
        let averages: Vec<String> = self.average_returns().iter().enumerate()
            .map(|(p, r)| format!("P{p}={r:.2}"))
            .collect();
        format!("Games played: {}\nPlayer 0 wins: {}\nPlayer 1 wins: {}\nTies: {}\nAverage returns: {}",
            self.games,
            self.count(Outcome::Player0Wins),
            self.count(Outcome::Player1Wins),
            self.count(Outcome::Tie),
            averages.join(", "))
    }
}

/// Verdict line for finished game, `None` when game is not two player.
pub fn verdict(returns: &[f64]) -> Option<String>{
    let total: f64 = returns.iter().sum();
    Outcome::from_returns(returns).map(|outcome| match outcome{
        Outcome::Tie if total > 0.0 => "Successful cooperation!".to_string(),
        Outcome::Tie => "Tie game".to_string(),
        Outcome::Player0Wins => "Player 0 wins!".to_string(),
        Outcome::Player1Wins => "Player 1 wins!".to_string(),
    })
}

/// Winner line for game with any number of players: the best scoring players are named.
pub fn leaders_verdict(returns: &[f64]) -> String{
    let best = returns.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let leaders: Vec<usize> = returns.iter().enumerate()
        .filter(|(_, r)| (**r - best).abs() < TIE_TOLERANCE)
        .map(|(p, _)| p)
        .collect();
    match leaders.as_slice(){
        [] => "No players".to_string(),
        [p] => format!("Winner: Player {p} with score {best}!"),
        all if all.len() == returns.len() => format!("It's a tie! All players scored {best}"),
        some => {
            let names: Vec<String> = some.iter().map(|p| format!("Player {p}")).collect();
            format!("Tie between {} with score {best}!", names.join(", "))
        }
    }
}

/// Prints states of any game played in terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameVisualiser{
    pub use_colors: bool,
}

impl GameVisualiser{
    pub fn new(use_colors: bool) -> Self{
        Self{use_colors}
    }

    pub fn state_report(&self, state: &dyn GameState, move_count: usize, last_actions: &[String]) -> String{
        let rule = "=".repeat(60);
        let mut out = vec![rule.clone(), format!("Move {move_count}"), rule];
        out.push(colorize_text(&state.to_string(), self.use_colors));
        if !last_actions.is_empty(){
            out.push(format!("Last actions: {}", last_actions.join(", ")));
        }
        if !state.is_terminal(){
            match state.current_player(){
                Some(p) => out.push(format!("Current player: {p}")),
                None if state.is_simultaneous_node() => out.push("Simultaneous move (all players act)".into()),
                None => {}
            }
        }
        out.push("-".repeat(60));
        out.join("\n")
    }

    pub fn result_report(&self, state: &dyn GameState) -> String{
        let returns = state.returns();
        let banner = match self.use_colors{
            true => "GAME OVER".bold().to_string(),
            false => "GAME OVER".to_string(),
        };
        let mut out = vec![String::new(), banner, String::new(), "Final state:".into()];
        out.push(colorize_text(&state.to_string(), self.use_colors));
        out.push("Results:".into());
        for (p, r) in returns.iter().enumerate(){
            out.push(format!("Player {p}: {r:.2}"));
        }
        out.push(format!("Total utility: {:.2}", returns.iter().sum::<f64>()));
        if let Some(v) = verdict(&returns){
            out.push(v);
        }
        out.join("\n")
    }

    pub fn display_state(&self, state: &dyn GameState, move_count: usize, last_actions: &[String]){
        println!("{}", self.state_report(state, move_count, last_actions));
    }

    pub fn display_result(&self, state: &dyn GameState){
        println!("{}", self.result_report(state));
    }
}

#[cfg(test)]
mod tests{
    use gridspiel_core::demo::DemoGame;
    use gridspiel_core::game::Game;
    use gridspiel_games::companion::{CompanionConfig, CompanionState, SimpleRules};
    use crate::render::*;

    #[test]
    fn verdicts(){
        assert_eq!(verdict(&[50.0, 50.005]).as_deref(), Some("Successful cooperation!"));
        assert_eq!(verdict(&[-3.0, -3.0]).as_deref(), Some("Tie game"));
        assert_eq!(verdict(&[2.0, 1.0]).as_deref(), Some("Player 0 wins!"));
        assert_eq!(verdict(&[0.0, 1.0]).as_deref(), Some("Player 1 wins!"));
        assert_eq!(verdict(&[1.0, 1.0, 1.0]), None);
    }

    #[test]
    fn leaders(){
        assert_eq!(leaders_verdict(&[-5.0, 3.0, 1.0]), "Winner: Player 1 with score 3!");
        assert_eq!(leaders_verdict(&[2.0, 2.0]), "It's a tie! All players scored 2");
        assert_eq!(leaders_verdict(&[2.0, -1.0, 2.0]), "Tie between Player 0, Player 2 with score 2!");
        assert_eq!(leaders_verdict(&[]), "No players");
    }

    #[test]
    fn tally_counts_outcomes(){
        let mut tally = OutcomeTally::new(2);
        tally.record(&[1.0, 0.0]);
        tally.record(&[1.0, 1.0]);
        tally.record(&[0.0, 3.0]);
        tally.record(&[2.0, 2.0]);
        assert_eq!(tally.games(), 4);
        assert_eq!(tally.count(Outcome::Tie), 2);
        assert_eq!(tally.count(Outcome::Player0Wins), 1);
        assert_eq!(tally.average_returns(), vec![1.0, 1.5]);
        assert!(tally.summary().contains("Average returns: P0=1.00, P1=1.50"));
    }

    #[test]
    fn plain_rendering_is_state_text(){
        let state = CompanionState::new(SimpleRules, CompanionConfig{rows: 6, cols: 6, horizon: 10, num_agents: 2});
        assert_eq!(render_companion(&state, false), state.to_string());
        assert_eq!(colorize_text("ab\n.#", false), "ab\n.#");
    }

    #[test]
    fn colored_rendering_keeps_symbols(){
        colored::control::set_override(true);
        let state = CompanionState::new(SimpleRules, CompanionConfig{rows: 6, cols: 6, horizon: 10, num_agents: 2});
        let text = render_companion(&state, true);
        assert!(text.contains("\u{1b}["));
        assert!(text.contains('G'));
        assert_eq!(text.lines().count(), 5 + 6);
        assert_eq!(colorize_symbol('x', None, true), "x");
    }

    #[test]
    fn visualiser_reports(){
        let game = DemoGame::new(1, false);
        let state = game.new_initial_state();
        let report = GameVisualiser::new(false).state_report(state.as_ref(), 0, &[]);
        assert!(report.contains("Move 0"));
        assert!(report.contains("Simultaneous move"));
    }
}
