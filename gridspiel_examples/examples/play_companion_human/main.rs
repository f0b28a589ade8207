mod options;

use clap::Parser;
use colored::Colorize;
use gridspiel_core::agent::Bot;
use gridspiel_core::game::{Game, GameParameters, GameState};
use gridspiel_examples::players::{parse_player_list, HumanInput, PlayerSpec};
use gridspiel_examples::render::{agent_term_color, leaders_verdict, render_companion};
use gridspiel_examples::setup::setup_logger;
use gridspiel_games::companion::{Color, CompanionGame, CompanionRules, CompanionState, SimpleRules, SynchroRules};
use crate::options::{CompanionHumanOptions, CompanionVariant};

fn player_label(player: usize, use_colors: bool) -> String{
    let label = format!("Player {player}");
    match use_colors{
        true => label.color(agent_term_color(Color::for_agent(player))).to_string(),
        false => label,
    }
}

fn print_action_help(){
    println!("\n{}", "Action Guide:".bold());
    println!("  Movement: North/South/East/West (N/S/E/W, 1/2/3/4, arrow keys)");
    println!("  Interact: interact with objects (I/i, 5, Space)");
    println!("  Stay: do nothing this turn (X/x, ., 6, Enter)");
    println!("  Press Enter on empty line to see available actions\n");
    println!("{}", "Symbol Legend:".bold());
    println!("  ^>v< - single player (facing direction)  2,3,4 - several players (count)");
    println!("  G - Goal  # - Wall  ~ - Lava  S - Synchro  * - Items  +/ - closed/open door  . - Empty\n");
}

fn play<R: CompanionRules>(rules: R, options: &CompanionHumanOptions, specs: &[PlayerSpec]) -> anyhow::Result<()>{
    let params = GameParameters::new()
        .with("rows", options.rows)
        .with("cols", options.cols)
        .with("num_agents", options.num_agents)
        .with("horizon", options.horizon);
    let game = CompanionGame::with_rules(rules.clone(), &params)?;
    let use_colors = !options.no_colors;

    let rule = "=".repeat(50);
    println!("\n{rule}");
    println!("Playing: {}", game.game_type().long_name.bold());
    println!("Parameters: {}", game.parameters());
    println!("Players: {}", game.num_players());
    println!("Max game length: {}", game.max_game_length());
    println!("{rule}\n");

    let human_input = HumanInput::Keys{arrow_keys: !options.no_arrow_keys};
    let mut bots: Vec<Box<dyn Bot>> = Vec::with_capacity(specs.len());
    for (player, spec) in specs.iter().enumerate(){
        bots.push(spec.build_bot(player, &game, human_input, options.seed)?);
        println!("{}: {:?}", player_label(player, use_colors), spec);
    }
    print_action_help();

    let mut state = CompanionState::new(rules, *game.config());
    for bot in bots.iter_mut(){
        bot.restart_at(&state);
    }
    let mut turn = 0;
    while !state.is_terminal(){
        turn += 1;
        println!("\n{}", format!("--- Turn {turn} ---").bold().blue());
        println!("Game State:\n{}", render_companion(&state, use_colors));

        let mut actions = Vec::with_capacity(bots.len());
        for (player, bot) in bots.iter_mut().enumerate(){
            let legal = state.legal_actions(player);
            let Some(first_legal) = legal.first().copied() else {
                actions.push(0);
                continue
            };
            println!("\n{} turn:", player_label(player, use_colors));
            let action = match bot.step(&state){
                Ok(a) if legal.contains(&a) => a,
                Ok(a) => {
                    println!("   Invalid action {a}, using first legal action");
                    first_legal
                }
                Err(e) if e.is_quit() => {
                    println!("Game aborted by {}", player_label(player, use_colors));
                    return Ok(())
                }
                Err(e) => {
                    log::warn!("Player {player} failed to choose action: {e}");
                    println!("   No action chosen, using first legal action");
                    first_legal
                }
            };
            println!("   Chose: {}", state.action_to_string(player, action));
            actions.push(action);
        }
        state.apply_actions(&actions)?;
    }

    println!("\n{rule}");
    println!("{}", "GAME OVER!".bold().bright_yellow());
    println!("\nFinal state:\n{}", render_companion(&state, use_colors));
    let returns = state.returns();
    println!("\nFinal scores: {returns:?}");
    println!("{}", leaders_verdict(&returns));
    println!("{rule}\n");
    Ok(())
}

fn main() -> anyhow::Result<()>{
    let options = CompanionHumanOptions::parse();
    setup_logger(options.log_level, options.log_level_core, options.log_level_rl, options.log_file.as_deref())?;

    if options.num_agents < 1{
        anyhow::bail!("num-agents must be at least 1");
    }
    let specs = parse_player_list(&options.players, options.num_agents as usize)
        .map_err(|e| anyhow::anyhow!("{e}. Use: --players {}", vec!["human"; options.num_agents as usize].join(",")))?;

    match options.game{
        CompanionVariant::Simple => play(SimpleRules, &options, &specs),
        CompanionVariant::Synchro => play(SynchroRules, &options, &specs),
    }
}
