mod options;

use std::sync::Arc;
use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use gridspiel_core::agent::Bot;
use gridspiel_core::error::GridspielError;
use gridspiel_core::game::{Game, GameState, Turn};
use gridspiel_examples::players::{HumanInput, PlayerSpec};
use gridspiel_examples::render::{GameVisualiser, OutcomeTally};
use gridspiel_examples::setup::setup_logger;
use gridspiel_games::load_game_from_str;
use crate::options::PlayInteractiveOptions;

/// Plays one game to the end, returns final state.
fn play_game(
    game: &Arc<dyn Game>,
    bots: &mut [Box<dyn Bot>],
    rng: &mut StdRng,
    visualiser: &GameVisualiser,
    verbose: bool
) -> Result<Box<dyn GameState>, GridspielError>{
    let mut state = game.new_initial_state();
    for bot in bots.iter_mut(){
        bot.restart_at(state.as_ref());
    }
    let mut move_count = 0;
    if verbose{
        println!("\nStarting game: {}", game.game_type().short_name);
        println!("Players: {}", game.num_players());
        for (i, bot) in bots.iter().enumerate(){
            println!("Player {i}: {}", bot.name());
        }
        visualiser.display_state(state.as_ref(), move_count, &[]);
    }

    while !state.is_terminal(){
        move_count += 1;
        let mut last_actions = Vec::new();
        match state.turn(){
            Turn::Chance => {
                let outcomes = state.chance_outcomes();
                let (action, _) = *outcomes.choose_weighted(rng, |o| o.1)
                    .map_err(|e| GridspielError::Custom(format!("Sampling chance outcome: {e}")))?;
                if verbose{
                    println!("Chance chose: {action} ({})", state.chance_outcome_to_string(action));
                }
                state.apply_action(action)?;
                last_actions.push(format!("Chance: {action}"));
            }
            Turn::Simultaneous => {
                let mut actions = Vec::with_capacity(bots.len());
                for (player, bot) in bots.iter_mut().enumerate(){
                    if verbose{
                        println!("\nPlayer {player}'s turn:");
                    }
                    let action = bot.step(state.as_ref())?;
                    let name = state.action_to_string(player, action);
                    if verbose{
                        println!("Player {player} chose: {action} ({name})");
                    }
                    last_actions.push(format!("P{player}: {name}"));
                    actions.push(action);
                }
                state.apply_actions(&actions)?;
            }
            Turn::Player(player) => {
                if verbose{
                    println!("\nPlayer {player}'s turn:");
                }
                let bot = bots.get_mut(player).ok_or_else(|| GridspielError::NoActionAvailable {
                    context: format!("No bot seated as player {player}")
                })?;
                let action = bot.step(state.as_ref())?;
                let name = state.action_to_string(player, action);
                if verbose{
                    println!("Player {player} chose: {action} ({name})");
                }
                last_actions.push(format!("P{player}: {name}"));
                state.apply_action(action).map_err(|source| GridspielError::GameP { source, player })?;
            }
            Turn::Terminal => break,
        }
        if verbose{
            visualiser.display_state(state.as_ref(), move_count, &last_actions);
        }
    }
    if verbose{
        visualiser.display_result(state.as_ref());
    }
    Ok(state)
}

fn main() -> anyhow::Result<()>{
    let options = PlayInteractiveOptions::parse();
    setup_logger(options.log_level, options.log_level_core, options.log_level_rl, options.log_file.as_deref())?;

    let game = load_game_from_str(&options.game)?;
    println!("Loaded game: {}", game.game_type().short_name);
    if game.num_players() != 2{
        println!("Warning: This program is designed for 2-player games, but {} has {} players",
            options.game, game.num_players());
    }

    let mut rng = match options.seed{
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };
    let specs: Vec<PlayerSpec> = (0..game.num_players())
        .map(|p| match p{
            0 => options.player0.clone(),
            1 => options.player1.clone(),
            _ => PlayerSpec::Random,
        })
        .collect();
    let mut bots = specs.iter().enumerate()
        .map(|(p, spec)| spec.build_bot(p, game.as_ref(), HumanInput::Line, options.seed))
        .collect::<Result<Vec<_>, _>>()?;

    let visualiser = GameVisualiser::new(!options.no_colors);
    let mut tally = OutcomeTally::new(game.num_players());
    for game_number in 0..options.num_games{
        if options.num_games > 1{
            println!("\n{} GAME {} {}", "=".repeat(20), game_number + 1, "=".repeat(20));
        }
        match play_game(&game, &mut bots, &mut rng, &visualiser, !options.quiet){
            Ok(state) => tally.record(&state.returns()),
            Err(e) if e.is_quit() => {
                println!("Game aborted by player");
                break
            }
            Err(e) => return Err(e.into()),
        }
    }

    if options.num_games > 1{
        println!("\n{} SUMMARY {}", "=".repeat(20), "=".repeat(20));
        println!("{}", tally.summary());
    }
    Ok(())
}
