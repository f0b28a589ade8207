mod options;

use clap::Parser;
use gridspiel_core::game::GameParameters;
use gridspiel_examples::series::{EvaluationPoint, TrainingSeries};
use gridspiel_examples::setup::setup_logger;
use gridspiel_examples::training::{environment, evaluate, independent_learners, run_episode, TrainingLog};
use gridspiel_games::coop_box_pushing::COOP_BOX_PUSHING;
use gridspiel_games::load_game;
use gridspiel_rl::schedule::EpsilonSchedule;
use crate::options::SimpleQOptions;

fn main() -> anyhow::Result<()>{
    let options = SimpleQOptions::parse();
    setup_logger(options.log_level, options.log_level_core, options.log_level_rl, options.log_file.as_deref())?;

    let params = GameParameters::new()
        .with("fully_observable", true)
        .with("horizon", 100)
        .with("curriculum_level", options.curriculum_level);
    let game = load_game(COOP_BOX_PUSHING, &params)?;
    let mut env = environment(game.clone(), options.seed);
    let mut agents = independent_learners(&env, options.seed, |a| a
        .with_step_size(0.1)
        .with_epsilon_schedule(EpsilonSchedule::linear(0.5, 0.01, 5000))
        .with_discount_factor(0.99));

    println!("Cooperative Box Pushing - Independent Q-Learning Training");
    println!("{}", "=".repeat(60));
    println!("Starting training for {} episodes...", options.episodes);
    println!("Game has {} players", env.num_players());

    let report_every = options.report_every.max(1);
    let mut log = TrainingLog::new();
    for episode in 0..options.episodes{
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

    println!("\nEvaluating agents for {} episodes...", options.eval_episodes);
    let evaluation = evaluate(&mut env, &mut agents, options.eval_episodes)?;
    println!("Evaluation Results:");
    println!("  Average reward: {:.3}", evaluation.average_reward);
    println!("  Average episode length: {:.1}", evaluation.average_length);
    println!("  Success rate: {:.3}", evaluation.success_rate);
    for agent in agents.iter(){
        log::info!("Q-table of player {} holds {} states", gridspiel_rl::agent::RlAgent::player_id(agent), agent.q_table_len());
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
