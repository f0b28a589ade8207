use std::path::PathBuf;
use clap::Parser;
use log::LevelFilter;

#[derive(Parser)]
#[command(author, version, about = "Train Q-learners through increasingly difficult box pushing layouts", long_about = None)]
pub struct CurriculumOptions{

    #[arg(short = 'v', long = "log-level", default_value = "info")]
    pub log_level: LevelFilter,

    #[arg(long = "log-level-core", default_value = "OFF")]
    pub log_level_core: LevelFilter,

    #[arg(long = "log-level-rl", default_value = "OFF")]
    pub log_level_rl: LevelFilter,

    #[arg(short = 'o', long = "logfile")]
    pub log_file: Option<PathBuf>,

    /// First curriculum level (0-10)
    #[arg(long = "start-level", default_value = "0")]
    pub start_level: usize,

    /// Last curriculum level (0-10)
    #[arg(long = "max-level", default_value = "10")]
    pub max_level: usize,

    /// Episode limit of every level
    #[arg(short = 'e', long = "episodes-per-level", default_value = "1000")]
    pub episodes_per_level: usize,

    /// Prefix of directories with agents saved after each level
    #[arg(short = 'p', long = "save-path", default_value = "curriculum_agents")]
    pub save_path: String,

    #[arg(long = "no-save")]
    pub no_save: bool,

    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,

    /// Reward curves of levels (SVG)
    #[arg(long = "plot")]
    pub plot: Option<PathBuf>,

    /// Episode rewards of levels (JSON)
    #[arg(long = "series")]
    pub series: Option<PathBuf>,
}
