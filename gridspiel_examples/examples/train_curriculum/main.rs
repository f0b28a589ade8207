mod options;

use std::time::Instant;
use clap::Parser;
use gridspiel_core::env::Environment;
use gridspiel_core::game::GameParameters;
use gridspiel_examples::curriculum::{level_range, level_save_dir, mastery_fraction, mastery_threshold,
    should_continue, summary_table, LevelResult};
use gridspiel_examples::series::{EvaluationPoint, TrainingSeries};
use gridspiel_examples::setup::setup_logger;
use gridspiel_examples::training::{environment, evaluate, independent_learners, run_episode, TrainingLog};
use gridspiel_games::coop_box_pushing::{curriculum_layout, COOP_BOX_PUSHING};
use gridspiel_games::load_game;
use gridspiel_rl::agent::QLearner;
use gridspiel_rl::error::GridspielRlError;
use gridspiel_rl::persistence::save_qlearner;
use gridspiel_rl::schedule::EpsilonSchedule;
use crate::options::CurriculumOptions;

const EVALUATION_INTERVAL: usize = 100;
const LEVEL_EVALUATION_EPISODES: usize = 100;

fn level_environment(level: usize, seed: Option<u64>) -> Result<Environment, GridspielRlError>{
    let params = GameParameters::new()
        .with("fully_observable", true)
        .with("horizon", 100)
        .with("curriculum_level", level);
    let game = load_game(COOP_BOX_PUSHING, &params)?;
    Ok(environment(game, seed.map(|s| s.wrapping_add(level as u64 * 1000))))
}

/// Trains until agents master level or episode limit is reached.
/// Returns whether level was mastered and number of episodes played.
fn train_level(env: &mut Environment, agents: &mut [QLearner], level: usize, max_episodes: usize, log: &mut TrainingLog)
    -> Result<(bool, usize), GridspielRlError>{
    let target = mastery_threshold(level);
    for episode in 0..max_episodes{
        let result = run_episode(env, agents, false)?;
        log.push(&result);
        if (episode + 1) % EVALUATION_INTERVAL == 0{
            let average = log.recent_reward(EVALUATION_INTERVAL);
            println!("Episode {:4}: Avg Reward: {:6.2}, Success Rate: {:.3}, Epsilon: {:.3}",
                episode + 1, average, log.recent_success_rate(EVALUATION_INTERVAL), agents[0].epsilon());
            if average >= target{
                println!("\nLevel {level} mastered! Average reward {average:.2} >= target {target:.2}");
                return Ok((true, episode + 1))
            }
        }
    }
    println!("\nLevel {level} training completed. Final success rate: {:.3}", log.success_rate());
    Ok((false, max_episodes))
}

fn save_level(agents: &[QLearner], save_path: &str, level: usize){
    let dir = level_save_dir(save_path, level);
    let saved = agents.iter().enumerate()
        .try_for_each(|(i, agent)| save_qlearner(agent, dir.join(format!("agent_{i}.json"))));
    match saved{
        Ok(()) => println!("  Agents saved to: {}", dir.display()),
        Err(e) => {
            log::warn!("Could not save agents of level {level}: {e}");
            println!("  Could not save agents: {e}");
        }
    }
}

fn main() -> anyhow::Result<()>{
    let options = CurriculumOptions::parse();
    setup_logger(options.log_level, options.log_level_core, options.log_level_rl, options.log_file.as_deref())?;

    let levels = level_range(options.start_level, options.max_level);
    let max_level = *levels.end();
    let mut env = level_environment(*levels.start(), options.seed)?;
    let mut agents = independent_learners(&env, options.seed, |a| a
        .with_step_size(0.1)
        .with_epsilon_schedule(EpsilonSchedule::linear(0.2, 0.01, 10000))
        .with_discount_factor(0.99));

    println!("Environment and agents created successfully!");
    println!("Number of players: {}", env.num_players());
    println!("Number of actions: {}", env.num_actions());
    println!("Starting Curriculum Learning for Cooperative Box Pushing");
    println!("Training levels {} to {}", levels.start(), max_level);
    println!("Max episodes per level: {}", options.episodes_per_level);

    let mut results = Vec::new();
    let mut series = TrainingSeries::new(format!("{COOP_BOX_PUSHING} curriculum"));
    let mut episodes_total = 0;
    for level in levels{
        if !results.is_empty(){
            env = level_environment(level, options.seed)?;
        }
        let layout = curriculum_layout(level)?;
        println!("\n{}", "=".repeat(60));
        println!("Training {}", layout.description);
        println!("Target success threshold: {:.1}%", mastery_fraction(level) * 100.0);
        println!("{}", "=".repeat(60));

        let start = Instant::now();
        let mut log = TrainingLog::new();
        let (mastered, episodes_used) = train_level(&mut env, &mut agents, level, options.episodes_per_level, &mut log)?;
        let training_seconds = start.elapsed().as_secs_f64();

        let evaluation = evaluate(&mut env, &mut agents, LEVEL_EVALUATION_EPISODES)?;
        let result = LevelResult{
            level,
            episodes_used,
            mastered,
            training_seconds,
            average_reward: evaluation.average_reward,
            success_rate: evaluation.success_rate,
            epsilon: agents[0].epsilon(),
        };

        println!("\nLevel {level} Summary:");
        println!("  Episodes used: {episodes_used}");
        println!("  Mastered: {}", if mastered {"yes"} else {"no"});
        println!("  Final avg reward: {:.2}", result.average_reward);
        println!("  Final success rate: {:.3}", result.success_rate);
        println!("  Training time: {training_seconds:.1}s");

        if !options.no_save{
            save_level(&agents, &options.save_path, level);
        }

        episodes_total += episodes_used;
        series.push_rewards(&format!("level {level}"), &log.rewards);
        series.evaluations.push(EvaluationPoint{
            episode: episodes_total,
            average_reward: result.average_reward,
            success_rate: result.success_rate,
        });

        let proceed = should_continue(&result, max_level);
        results.push(result);
        if !proceed{
            println!("\nStopping curriculum training - level {level} not mastered");
            break;
        }
    }

    println!("\n{}", "=".repeat(80));
    println!("CURRICULUM TRAINING COMPLETED");
    println!("{}", "=".repeat(80));
    println!("{}", summary_table(&results));

    series.write_outputs(options.series.as_deref(), options.plot.as_deref())?;
    Ok(())
}
