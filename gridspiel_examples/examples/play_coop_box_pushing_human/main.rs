mod options;

use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use gridspiel_core::agent::Bot;
use gridspiel_core::agent::manual_control::HumanBot;
use gridspiel_core::error::GridspielError;
use gridspiel_core::game::{GameParameters, Turn};
use gridspiel_examples::curriculum::difficulty_banner;
use gridspiel_games::coop_box_pushing::{curriculum_layout, COOP_BOX_PUSHING};
use gridspiel_games::load_game;
use gridspiel_examples::setup::setup_logger;
use crate::options::BoxPushingHumanOptions;

fn main() -> anyhow::Result<()>{
    let options = BoxPushingHumanOptions::parse();
    setup_logger(options.log_level, options.log_level_core, options.log_level_rl, options.log_file.as_deref())?;
    let level = options.curriculum_level as usize;

    println!("Starting Cooperative Box Pushing - Curriculum Level {level}");
    println!("{}", difficulty_banner(level));
    println!("{}", curriculum_layout(level)?.description);

    let params = GameParameters::new()
        .with("fully_observable", true)
        .with("horizon", options.horizon)
        .with("curriculum_level", level);
    let game = load_game(COOP_BOX_PUSHING, &params)?;
    let mut rng = match options.seed{
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };
    let mut humans: Vec<HumanBot> = (0..game.num_players()).map(HumanBot::new).collect();

    println!("Welcome to Cooperative Box Pushing!");
    println!("Goal: Both players work together to push boxes to the top row.");
    println!("Game has {} players", game.num_players());

    let mut state = game.new_initial_state();
    println!("\nInitial state:\n{state}");
    let mut move_count = 0;
    while !state.is_terminal(){
        match state.turn(){
            Turn::Chance => {
                let outcomes = state.chance_outcomes();
                let (outcome, _) = *outcomes.choose_weighted(&mut rng, |o| o.1)?;
                log::debug!("Chance outcome: {}", state.chance_outcome_to_string(outcome));
                state.apply_action(outcome)?;
            }
            Turn::Simultaneous => {
                move_count += 1;
                println!("\n=== Move {move_count} ===");
                println!("Current state:\n{state}");
                println!("Both players choose actions simultaneously!");
                let mut actions = Vec::with_capacity(humans.len());
                for (player, human) in humans.iter_mut().enumerate(){
                    println!("\nPlayer {player}'s turn:");
                    match human.step(state.as_ref()){
                        Ok(a) => actions.push(a),
                        Err(GridspielError::Quit) => {
                            println!("Game aborted");
                            return Ok(())
                        }
                        Err(e) => return Err(e.into()),
                    }
                }
                let names: Vec<String> = actions.iter().enumerate()
                    .map(|(p, a)| state.action_to_string(p, *a))
                    .collect();
                println!("\nApplying actions: {names:?}");
                state.apply_actions(&actions)?;
            }
            Turn::Player(player) => {
                let action = humans[player].step(state.as_ref())?;
                println!("Player {player} chose: {}", state.action_to_string(player, action));
                state.apply_action(action)?;
            }
            Turn::Terminal => break,
        }
    }

    println!("\n=== GAME OVER ===");
    println!("Final state:\n{state}");
    let returns = state.returns();
    println!("\nResults:");
    for (player, r) in returns.iter().enumerate(){
        println!("Player {player} utility: {r:.2}");
    }
    let total: f64 = returns.iter().sum();
    println!("Total cooperative reward: {total:.2}");
    if total > 0.0{
        println!("Success! You completed the cooperative task!");
    } else {
        println!("Try again to improve your cooperation!");
    }
    Ok(())
}
