use std::path::PathBuf;
use clap::{Parser, ValueEnum};
use log::LevelFilter;

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum CompanionVariant{
    #[value(name = "companion_simple")]
    Simple,
    #[value(name = "companion_synchro")]
    Synchro,
}

#[derive(Parser)]
#[command(author, version, about = "Play companion grid games with human and random players", long_about = None)]
pub struct CompanionHumanOptions{

    #[arg(short = 'v', long = "log-level", default_value = "warn")]
    pub log_level: LevelFilter,

    #[arg(long = "log-level-core", default_value = "OFF")]
    pub log_level_core: LevelFilter,

    #[arg(long = "log-level-rl", default_value = "OFF")]
    pub log_level_rl: LevelFilter,

    #[arg(short = 'o', long = "logfile")]
    pub log_file: Option<PathBuf>,

    #[arg(short = 'g', long = "game", value_enum, default_value = "companion_simple")]
    pub game: CompanionVariant,

    #[arg(short = 'r', long = "rows", default_value = "6")]
    pub rows: i64,

    #[arg(short = 'c', long = "cols", default_value = "6")]
    pub cols: i64,

    #[arg(short = 'a', long = "num-agents", default_value = "2")]
    pub num_agents: i64,

    #[arg(short = 'H', long = "horizon", default_value = "50")]
    pub horizon: i64,

    /// Player types (human, random), one per agent
    #[arg(short = 'p', long = "players", value_delimiter = ',', default_value = "human,human")]
    pub players: Vec<String>,

    #[arg(long = "no-colors")]
    pub no_colors: bool,

    #[arg(long = "no-arrow-keys")]
    pub no_arrow_keys: bool,

    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,
}
