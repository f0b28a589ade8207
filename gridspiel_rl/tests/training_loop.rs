use gridspiel_core::env::Environment;
use gridspiel_games::load_game_from_str;
use gridspiel_rl::agent::{MultiagentQLearner, QLearner, RlAgent};
use gridspiel_rl::schedule::EpsilonSchedule;
use gridspiel_rl::solver::CorrelatedEqSolver;

#[test]
fn independent_learners_on_box_pushing(){
    let game = load_game_from_str("coop_box_pushing(curriculum_level=0,horizon=20)").unwrap();
    let mut env = Environment::with_seed(game, 3);
    let num_actions = env.num_actions();
    let mut agents: Vec<QLearner> = (0..2).map(|p| QLearner::new(p, num_actions)
        .with_epsilon_schedule(EpsilonSchedule::linear(0.5, 0.05, 500))
        .with_discount_factor(0.99)
        .with_seed(p as u64 + 10)
    ).collect();

    for _ in 0..50{
        let mut ts = env.reset().unwrap();
        while !ts.last(){
            let actions: Vec<usize> = agents.iter_mut()
                .map(|a| a.step(&ts, false).unwrap().action.unwrap())
                .collect();
            ts = env.step(&actions).unwrap();
        }
        for agent in agents.iter_mut(){
            assert_eq!(agent.step(&ts, false).unwrap().action, None);
        }
    }
    for agent in agents.iter(){
        assert!(agent.q_table_len() >= 1);
        assert!(agent.epsilon() < 0.5);
        assert!(agent.last_loss().is_some());
    }
}

#[test]
fn joint_action_learner_with_independent_partner(){
    let game = load_game_from_str("coop_box_pushing(curriculum_level=0,horizon=10)").unwrap();
    let mut env = Environment::with_seed(game, 5);
    let num_actions = env.num_actions();
    let mut independent = QLearner::new(0, num_actions).with_seed(1);
    let mut joint = MultiagentQLearner::new(1, vec![num_actions; 2], CorrelatedEqSolver::new(false)).unwrap()
        .with_epsilon_schedule(EpsilonSchedule::linear(0.5, 0.01, 100))
        .with_seed(2);

    for _ in 0..10{
        let mut ts = env.reset().unwrap();
        let mut previous: Option<Vec<usize>> = None;
        while !ts.last(){
            let a0 = independent.step(&ts, false).unwrap().action.unwrap();
            let a1 = joint.step(&ts, previous.as_deref(), false).unwrap().action.unwrap();
            let actions = vec![a0, a1];
            ts = env.step(&actions).unwrap();
            previous = Some(actions);
        }
        independent.step(&ts, false).unwrap();
        joint.step(&ts, previous.as_deref(), false).unwrap();
    }
    assert!(joint.q_table_len() >= 1);
    assert!(joint.epsilon() < 0.5);
}
