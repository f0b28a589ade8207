mod options;

use clap::Parser;
use gridspiel_core::env::{Environment, TimeStep};
use gridspiel_core::game::{Action, GameParameters};
use gridspiel_examples::series::{EvaluationPoint, TrainingSeries};
use gridspiel_examples::setup::setup_logger;
use gridspiel_examples::training::{environment, require_action, EpisodeResult, Evaluation, TrainingLog};
use gridspiel_games::coop_box_pushing::COOP_BOX_PUSHING;
use gridspiel_games::load_game;
use gridspiel_rl::agent::{MultiagentQLearner, QLearner, RlAgent};
use gridspiel_rl::error::GridspielRlError;
use gridspiel_rl::schedule::{EpsilonSchedule, SharedSchedule};
use gridspiel_rl::solver::CorrelatedEqSolver;
use crate::options::CorrelatedOptions;

type JointLearner = MultiagentQLearner<CorrelatedEqSolver>;

fn joint_action(learner: &mut JointLearner, time_step: &TimeStep, previous: Option<&[Action]>, is_evaluation: bool)
    -> Result<Action, GridspielRlError>{
    let player = learner.player_id();
    learner.step(time_step, previous, is_evaluation)?.action.ok_or_else(|| GridspielRlError::NoLegalActions {
        player,
        info_state: time_step.info_state(player).unwrap_or_default().to_string(),
    })
}

/// Episode in which joint learner is shown the joint action that led to every time step.
fn run_mixed_episode(env: &mut Environment, independent: &mut QLearner, joint: &mut JointLearner, is_evaluation: bool)
    -> Result<EpisodeResult, GridspielRlError>{
    let mut time_step = env.reset()?;
    let mut returns = vec![0.0; env.num_players()];
    let mut previous: Option<Vec<Action>> = None;
    let mut length = 0;
    while !time_step.last(){
        let actions = vec![
            require_action(independent, &time_step, is_evaluation)?,
            joint_action(joint, &time_step, previous.as_deref(), is_evaluation)?,
        ];
        time_step = env.step(&actions)?;
        for (p, r) in returns.iter_mut().enumerate(){
            *r += time_step.reward(p);
        }
        previous = Some(actions);
        length += 1;
    }
    if !is_evaluation{
        independent.step(&time_step, false)?;
        joint.step(&time_step, previous.as_deref(), false)?;
    }
    let total_reward = returns.iter().sum();
    Ok(EpisodeResult{returns, total_reward, length})
}

fn main() -> anyhow::Result<()>{
    let options = CorrelatedOptions::parse();
    setup_logger(options.log_level, options.log_level_core, options.log_level_rl, options.log_file.as_deref())?;

    let params = GameParameters::new()
        .with("fully_observable", true)
        .with("horizon", 100);
    let game = load_game(COOP_BOX_PUSHING, &params)?;
    let mut env = environment(game.clone(), options.seed);
    let num_actions = env.num_actions();
    let schedule = SharedSchedule::new(EpsilonSchedule::linear(0.5, 0.01, 2000));

    let mut independent = QLearner::new(0, num_actions)
        .with_step_size(0.1)
        .with_shared_epsilon_schedule(schedule.clone())
        .with_discount_factor(0.99);
    let mut joint = MultiagentQLearner::new(1, vec![num_actions, num_actions], CorrelatedEqSolver::new(options.coarse))?
        .with_step_size(0.1)
        .with_shared_epsilon_schedule(schedule)
        .with_discount_factor(0.99);
    if let Some(seed) = options.seed{
        independent = independent.with_seed(seed.wrapping_add(1));
        joint = joint.with_seed(seed.wrapping_add(2));
    }

    println!("Cooperative Box Pushing - Correlated Q-Learning Training");
    println!("{}", "=".repeat(60));
    println!("Starting training for {} episodes...", options.episodes);
    println!("Game has {} players", env.num_players());
    println!("Agent 0: QLearner, Agent 1: MultiagentQLearner with {} solver",
        if options.coarse {"coarse correlated equilibrium"} else {"correlated equilibrium"});

    let report_every = options.report_every.max(1);
    let mut log = TrainingLog::new();
    for episode in 0..options.episodes{
        let result = run_mixed_episode(&mut env, &mut independent, &mut joint, false)?;
        log.push(&result);
        if (episode + 1) % report_every == 0{
            println!("Episode {}/{}", episode + 1, options.episodes);
            println!("  Average reward (last {report_every}): {:.3}", log.recent_reward(report_every));
            println!("  Average length (last {report_every}): {:.1}", log.recent_length(report_every));
            println!("  Success rate: {:.3}", log.success_rate());
            println!("  Current epsilon: {:.3}", independent.epsilon());
            println!();
        }
        if let Some(loss) = joint.last_loss(){
            log::trace!("Episode {episode}: joint learner loss {loss:.4}");
        }
    }

    println!("\nEvaluating agents for {} episodes...", options.eval_episodes);
    let results = (0..options.eval_episodes)
        .map(|_| run_mixed_episode(&mut env, &mut independent, &mut joint, true))
        .collect::<Result<Vec<_>, _>>()?;
    let evaluation = Evaluation::from_results(&results);
    println!("Evaluation Results:");
    println!("  Average reward: {:.3}", evaluation.average_reward);
    println!("  Average episode length: {:.1}", evaluation.average_length);
    println!("  Success rate: {:.3}", evaluation.success_rate);

    println!("\nTraining completed!");
    println!("Final success rate: {:.3}", evaluation.success_rate);
    println!("Total training successes: {}", log.successes());
    log::info!("Independent learner holds {} states, joint learner {} states",
        independent.q_table_len(), joint.q_table_len());

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
