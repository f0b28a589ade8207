use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use gridspiel_core::env::{Environment, ObservationKind, StepType};
use gridspiel_games::load_game_from_str;

fn play_random_episodes(game_string: &str, episodes: usize){
    let game = load_game_from_str(game_string).unwrap();
    let max_length = game.max_game_length();
    let mut env = Environment::with_seed(game, 7);
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..episodes{
        let mut ts = env.reset().unwrap();
        let mut steps = 0;
        while ts.step_type != StepType::Last{
            let actions: Vec<usize> = (0..env.num_players())
                .map(|p| *ts.legal_actions(p).choose(&mut rng).unwrap())
                .collect();
            ts = env.step(&actions).unwrap();
            let rewards = ts.rewards.clone().unwrap();
            assert!(rewards.windows(2).all(|w| (w[0] - w[1]).abs() < 1e-9 || game_string.starts_with("companion")));
            steps += 1;
            assert!(steps <= max_length);
        }
        assert!(env.step(&vec![0; env.num_players()]).is_err());
    }
}

#[test]
fn box_pushing_random_play(){
    play_random_episodes("coop_box_pushing(horizon=30)", 5);
    play_random_episodes("coop_box_pushing(curriculum_level=0,fully_observable=true)", 5);
}

#[test]
fn companion_random_play(){
    play_random_episodes("companion_simple(rows=5,cols=5,horizon=40)", 5);
    play_random_episodes("companion_synchro(num_agents=4,horizon=40)", 5);
}

#[test]
fn observation_kind_follows_game(){
    let env = Environment::new(load_game_from_str("coop_box_pushing").unwrap());
    assert_eq!(env.observation_kind(), ObservationKind::Observation);
    let env = Environment::new(load_game_from_str("companion_simple").unwrap());
    assert_eq!(env.observation_kind(), ObservationKind::InformationState);
}
