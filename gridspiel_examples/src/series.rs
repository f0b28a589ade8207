use std::fs::File;
use std::path::Path;
use plotters::style::{BLUE, GREEN, RED};
use serde::{Deserialize, Serialize};
use crate::error::ExampleError;
use crate::plots::{moving_average, plot_many_series, Series};

/// Window of moving average drawn next to raw rewards.
pub const PLOT_AVERAGE_WINDOW: usize = 100;

/// Reward of every training episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardSeries{
    pub label: String,
    pub rewards: Vec<f64>,
}

/// Result of periodic evaluation during training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationPoint{
    pub episode: usize,
    pub average_reward: f64,
    pub success_rate: f64,
}

/// Everything training program may dump after run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrainingSeries{
    pub game: String,
    pub series: Vec<RewardSeries>,
    pub evaluations: Vec<EvaluationPoint>,
}

impl TrainingSeries{
    pub fn new(game: impl Into<String>) -> Self{
        Self{game: game.into(), series: Vec::new(), evaluations: Vec::new()}
    }

    /// Adds episode rewards under `label`, appending when label is already present.
    pub fn push_rewards(&mut self, label: &str, rewards: &[f64]){
        match self.series.iter_mut().find(|s| s.label == label){
            Some(s) => s.rewards.extend_from_slice(rewards),
            None => self.series.push(RewardSeries{label: label.into(), rewards: rewards.to_vec()}),
        }
    }

    pub fn save_json(&self, path: &Path) -> Result<(), ExampleError>{
        let file = File::create(path).map_err(|e| ExampleError::Output {
            path: path.into(), explanation: e.to_string()
        })?;
        serde_json::to_writer(file, self).map_err(|e| ExampleError::Output {
            path: path.into(), explanation: e.to_string()
        })?;
        log::info!("Saved training series to {:?}", path);
        Ok(())
    }

    /// Draws moving average of every reward series.
    pub fn save_plot(&self, path: &Path) -> Result<(), ExampleError>{
        let colors = [RED, BLUE, GREEN];
        let series: Vec<Series> = self.series.iter().enumerate()
            .map(|(i, s)| Series::new(
                moving_average(&s.rewards, PLOT_AVERAGE_WINDOW),
                format!("{} (average of {PLOT_AVERAGE_WINDOW})", s.label),
                colors[i % colors.len()]
            ))
            .collect();
        plot_many_series(path, &self.game, &series, "Episode", "Reward")
            .map_err(|e| ExampleError::Output { path: path.into(), explanation: e.to_string() })?;
        log::info!("Saved reward plot to {:?}", path);
        Ok(())
    }

    /// Writes outputs requested in command line.
    pub fn write_outputs(&self, series_file: Option<&Path>, plot_file: Option<&Path>) -> Result<(), ExampleError>{
        if let Some(path) = series_file{
            self.save_json(path)?;
        }
        if let Some(path) = plot_file{
            self.save_plot(path)?;
        }
        Ok(())
    }
}
