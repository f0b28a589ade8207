use std::path::PathBuf;
use clap::{Parser, Subcommand};
use log::LevelFilter;

#[derive(Subcommand)]
pub enum AgentCommand{
    /// List agent files found in directory
    List{
        dir: PathBuf,
    },
    /// Show summary of single agent file
    Info{
        path: PathBuf,
    },
    /// Rewrite agent file in format given by extension of destination (json, ron, bin)
    Convert{
        source: PathBuf,
        destination: PathBuf,
    },
}

#[derive(Parser)]
#[command(author, version, about = "Inspect and convert saved Q-learning agents", long_about = None)]
pub struct ManageOptions{

    #[arg(short = 'v', long = "log-level", default_value = "info")]
    pub log_level: LevelFilter,

    #[arg(long = "log-level-rl", default_value = "OFF")]
    pub log_level_rl: LevelFilter,

    #[arg(short = 'o', long = "logfile")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: AgentCommand,
}
