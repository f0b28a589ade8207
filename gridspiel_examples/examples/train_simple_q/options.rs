use std::path::PathBuf;
use clap::Parser;
use log::LevelFilter;

#[derive(Parser)]
#[command(author, version, about = "Independent Q-learning on fully observable cooperative box pushing", long_about = None)]
pub struct SimpleQOptions{

    #[arg(short = 'v', long = "log-level", default_value = "info")]
    pub log_level: LevelFilter,

    #[arg(long = "log-level-core", default_value = "OFF")]
    pub log_level_core: LevelFilter,

    #[arg(long = "log-level-rl", default_value = "OFF")]
    pub log_level_rl: LevelFilter,

    #[arg(short = 'o', long = "logfile")]
    pub log_file: Option<PathBuf>,

    #[arg(short = 'e', long = "episodes", default_value = "1000")]
    pub episodes: usize,

    #[arg(short = 'r', long = "report-every", default_value = "200")]
    pub report_every: usize,

    #[arg(short = 't', long = "eval-episodes", default_value = "100")]
    pub eval_episodes: usize,

    #[arg(short = 'l', long = "curriculum-level", default_value = "10")]
    pub curriculum_level: usize,

    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,

    /// Reward curve (SVG)
    #[arg(long = "plot")]
    pub plot: Option<PathBuf>,

    /// Episode rewards (JSON)
    #[arg(long = "series")]
    pub series: Option<PathBuf>,
}
