use std::path::PathBuf;
use clap::Parser;
use log::LevelFilter;

#[derive(Parser)]
#[command(author, version, about = "Play cooperative box pushing as two human players", long_about = None)]
pub struct BoxPushingHumanOptions{

    #[arg(short = 'v', long = "log-level", default_value = "warn")]
    pub log_level: LevelFilter,

    #[arg(long = "log-level-core", default_value = "OFF")]
    pub log_level_core: LevelFilter,

    #[arg(long = "log-level-rl", default_value = "OFF")]
    pub log_level_rl: LevelFilter,

    #[arg(short = 'o', long = "logfile")]
    pub log_file: Option<PathBuf>,

    /// Curriculum difficulty level (0 easiest, 10 original)
    #[arg(short = 'l', long = "curriculum-level", default_value = "10", value_parser = clap::value_parser!(u8).range(0..=10))]
    pub curriculum_level: u8,

    #[arg(short = 'H', long = "horizon", default_value = "100")]
    pub horizon: i64,

    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,
}
