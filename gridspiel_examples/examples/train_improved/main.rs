mod options;

use clap::Parser;
use gridspiel_core::env::Environment;
use gridspiel_rl::agent::{QLearner, RandomAgent, RlAgent};
use gridspiel_rl::error::GridspielRlError;
use gridspiel_rl::persistence::save_multiple_agents;
use gridspiel_examples::series::{EvaluationPoint, TrainingSeries};
use gridspiel_examples::setup::setup_logger;
use gridspiel_examples::training::{collect_actions, environment, evaluate, independent_learners, run_episode, TrainingLog};
use gridspiel_games::load_game_from_str;
use crate::options::ImprovedOptions;

fn demo_play(env: &mut Environment, agents: &mut [QLearner], max_steps: usize) -> Result<(), GridspielRlError>{
    println!("\n=== Demo Play ===");
    let mut time_step = env.reset()?;
    if let Some(state) = env.state(){
        println!("Initial state:\n{state}");
    }
    let mut step = 0;
    while !time_step.last() && step < max_steps{
        println!("\nStep {}", step + 1);
        let actions = collect_actions(agents, &time_step, true)?;
        match time_step.current_player(){
            Some(p) => println!("Player {p} chooses action {}", actions[0]),
            None => for (p, a) in actions.iter().enumerate(){
                println!("Player {p} chooses action {a}");
            }
        }
        time_step = env.step(&actions)?;
        step += 1;
        println!("Rewards: {:?}", time_step.rewards.as_deref().unwrap_or_default());
    }
    if let Some(state) = env.state(){
        println!("\nState after demo:\n{state}");
    }
    println!("Final rewards: {:?}", time_step.rewards.as_deref().unwrap_or_default());
    println!("Demo complete!");
    Ok(())
}

fn main() -> anyhow::Result<()>{
    let options = ImprovedOptions::parse();
    setup_logger(options.log_level, options.log_level_core, options.log_level_rl, options.log_file.as_deref())?;

    let game = load_game_from_str(&options.game)?;
    let game_name = game.game_type().short_name.clone();
    let mut env = environment(game.clone(), options.seed);
    let mut agents = independent_learners(&env, options.seed, |a| a);

    println!("{} - Improved Q-Learning Training", game.game_type().long_name);
    println!("{}", "=".repeat(60));
    println!("Training episodes: {}", options.episodes);
    if !options.no_save{
        println!("Will save agents to: {:?}", options.save_path);
    }

    let report_every = (options.episodes / 5).max(400);
    println!("Starting training for {} episodes...", options.episodes);
    println!("Game has {} players", env.num_players());
    let mut log = TrainingLog::new();
    for episode in 0..options.episodes{
        if episode % report_every == 0{
            println!("Episodes: {episode}");
        }
        let result = run_episode(&mut env, &mut agents, false)?;
        log.push(&result);
        if (episode + 1) % report_every == 0{
            println!("Episode {}/{}", episode + 1, options.episodes);
            println!("  Average reward (last {report_every}): {:.3}", log.recent_reward(report_every));
            println!("  Average length (last {report_every}): {:.1}", log.recent_length(report_every));
            println!("  Success rate: {:.3}", log.success_rate());
            println!("  Current epsilon: {:.3}", agents[0].epsilon());
            println!();
        }
    }
    println!("Training Done!");

    println!("\nEvaluating trained agents for {} episodes...", options.eval_episodes);
    let evaluation = evaluate(&mut env, &mut agents, options.eval_episodes)?;
    println!("Evaluation Results:");
    println!("  Average reward: {:.3}", evaluation.average_reward);
    println!("  Average episode length: {:.1}", evaluation.average_length);
    println!("  Success rate: {:.3}", evaluation.success_rate);

    let mut random_agents: Vec<RandomAgent> = (0..env.num_players())
        .map(|p| match options.seed{
            Some(s) => RandomAgent::with_seed(p, env.num_actions(), s.wrapping_add(100 + p as u64)),
            None => RandomAgent::new(p, env.num_actions()),
        })
        .collect();
    let baseline = evaluate(&mut env, &mut random_agents, options.eval_episodes)?;
    println!("Random agents for comparison: average reward {:.3}, success rate {:.3}",
        baseline.average_reward, baseline.success_rate);

    if !options.no_save{
        println!("\nSaving trained agents...");
        match save_multiple_agents(&agents, &options.save_path, &game_name){
            Ok(paths) => {
                println!("Agents saved successfully:");
                for path in paths.iter(){
                    println!("  {}", path.display());
                }
                if let [first, second, ..] = paths.as_slice(){
                    println!("\nTo play against these agents, use:");
                    println!("cargo run --example play_interactive -- --game \"{}\" --player0 human --player1 qlearner:{}", options.game, second.display());
                    println!("cargo run --example play_interactive -- --game \"{}\" --player0 qlearner:{} --player1 qlearner:{}", options.game, first.display(), second.display());
                }
            }
            Err(e) => {
                log::error!("Error saving agents: {e}");
                println!("Error saving agents: {e}");
            }
        }
    }

    demo_play(&mut env, &mut agents, options.demo_steps)?;

    println!("\nTraining completed!");
    println!("Final success rate: {:.3}", evaluation.success_rate);
    println!("Total training successes: {}", log.successes());
    for agent in agents.iter(){
        log::debug!("Player {} learned {} states", agent.player_id(), agent.q_table_len());
    }

    let mut series = TrainingSeries::new(game.game_string());
    series.push_rewards("total reward", &log.rewards);
    series.evaluations.push(EvaluationPoint{
        episode: options.episodes,
        average_reward: evaluation.average_reward,
        success_rate: evaluation.success_rate,
    });
    series.write_outputs(options.series.as_deref(), options.plot.as_deref())?;
    Ok(())
}
