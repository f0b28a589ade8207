use std::path::PathBuf;
use clap::Parser;
use log::LevelFilter;

#[derive(Parser)]
#[command(author, version, about = "Train default Q-learners, save them for interactive play", long_about = None)]
pub struct ImprovedOptions{

    #[arg(short = 'v', long = "log-level", default_value = "info")]
    pub log_level: LevelFilter,

    #[arg(long = "log-level-core", default_value = "OFF")]
    pub log_level_core: LevelFilter,

    #[arg(long = "log-level-rl", default_value = "OFF")]
    pub log_level_rl: LevelFilter,

    #[arg(short = 'o', long = "logfile")]
    pub log_file: Option<PathBuf>,

    /// Game string of trained game
    #[arg(short = 'g', long = "game", default_value = "coop_box_pushing(fully_observable=true,horizon=100)")]
    pub game: String,

    #[arg(short = 'e', long = "episodes", default_value = "2000")]
    pub episodes: usize,

    #[arg(short = 't', long = "eval-episodes", default_value = "100")]
    pub eval_episodes: usize,

    /// Directory for trained agents
    #[arg(short = 'p', long = "save-path", default_value = "agents")]
    pub save_path: PathBuf,

    #[arg(long = "no-save")]
    pub no_save: bool,

    #[arg(short = 'd', long = "demo-steps", default_value = "20")]
    pub demo_steps: usize,

    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,

    /// Reward curve (SVG)
    #[arg(long = "plot")]
    pub plot: Option<PathBuf>,

    /// Episode rewards (JSON)
    #[arg(long = "series")]
    pub series: Option<PathBuf>,
}
