use std::path::PathBuf;
use gridspiel_games::coop_box_pushing::MAX_CURRICULUM_LEVEL;

/// Highest total reward of box pushing episode summed over both players.
pub const MAX_EPISODE_REWARD: f64 = 220.0;

/// Part of [`MAX_EPISODE_REWARD`] agents must average to master level.
pub fn mastery_fraction(level: usize) -> f64{
    match level{
        0..=3 => 0.4,
        4..=6 => 0.5,
        7..=8 => 0.6,
        _ => 0.7,
    }
}

pub fn mastery_threshold(level: usize) -> f64{
    mastery_fraction(level) * MAX_EPISODE_REWARD
}

/// Short description of how hard level is for human players.
pub fn difficulty_banner(level: usize) -> &'static str{
    match level{
        0 => "EASIEST: Agents close to goal, optimal positions",
        1..=3 => "EASY: Close to goal with position/orientation variations",
        4..=6 => "MEDIUM: Increasing distance from goal",
        7..=9 => "HARD: Far from goal with suboptimal positions",
        _ => "HARDEST: Original challenging configuration",
    }
}

/// Directory of agents saved after training `level`.
pub fn level_save_dir(save_path: &str, level: usize) -> PathBuf{
    PathBuf::from(format!("{save_path}_level_{level}"))
}

/// Clamps requested range of levels to available ones.
pub fn level_range(start: usize, max: usize) -> std::ops::RangeInclusive<usize>{
    let max = max.min(MAX_CURRICULUM_LEVEL);
    start.min(max)..=max
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevelResult{
    pub level: usize,
    pub episodes_used: usize,
    pub mastered: bool,
    pub training_seconds: f64,
    pub average_reward: f64,
    pub success_rate: f64,
    pub epsilon: f64,
}

impl LevelResult{
    pub fn summary_line(&self) -> String{
        format!("Level {:2}: {} Episodes: {:4}, Reward: {:6.2}, Success: {:.3}",
            self.level,
            if self.mastered {"mastered "} else {"unmastered"},
            self.episodes_used,
            self.average_reward,
            self.success_rate)
    }
}

pub fn summary_table(results: &[LevelResult]) -> String{
    results.iter().map(|r| r.summary_line()).collect::<Vec<_>>().join("\n")
}

/// Decides whether curriculum moves on after level.
pub fn should_continue(result: &LevelResult, max_level: usize) -> bool{
    result.mastered || result.level >= max_level
}

#[cfg(test)]
mod tests{
    use crate::curriculum::*;

    #[test]
    fn thresholds_follow_level_groups(){
        assert_eq!(mastery_threshold(0), 88.0);
        assert_eq!(mastery_threshold(4), 110.0);
        assert!((mastery_threshold(8) - 132.0).abs() < 1e-9);
        assert!((mastery_threshold(10) - 154.0).abs() < 1e-9);
    }

    #[test]
    fn ranges_and_paths(){
        assert_eq!(level_range(2, 20), 2..=10);
        assert_eq!(level_range(12, 20), 10..=10);
        assert_eq!(level_save_dir("agents", 3), PathBuf::from("agents_level_3"));
        assert!(difficulty_banner(0).starts_with("EASIEST"));
        assert!(difficulty_banner(6).starts_with("MEDIUM"));
        assert!(difficulty_banner(10).starts_with("HARDEST"));
    }

    #[test]
    fn summary(){
        let result = LevelResult{
            level: 3, episodes_used: 400, mastered: false, training_seconds: 1.0,
            average_reward: 12.5, success_rate: 0.25, epsilon: 0.1
        };
        assert_eq!(result.summary_line(), "Level  3: unmastered Episodes:  400, Reward:  12.50, Success: 0.250");
        assert!(!should_continue(&result, 10));
        assert!(should_continue(&result, 3));
        assert_eq!(summary_table(&[result.clone(), result]).lines().count(), 2);
    }
}
