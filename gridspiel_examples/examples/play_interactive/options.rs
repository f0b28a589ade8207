use std::path::PathBuf;
use clap::Parser;
use log::LevelFilter;
use gridspiel_examples::players::PlayerSpec;

#[derive(Parser)]
#[command(author, version, about = "Play registered game with human, random or trained players", long_about = None)]
pub struct PlayInteractiveOptions{

    #[arg(short = 'v', long = "log-level", default_value = "warn")]
    pub log_level: LevelFilter,

    #[arg(long = "log-level-core", default_value = "OFF")]
    pub log_level_core: LevelFilter,

    #[arg(long = "log-level-rl", default_value = "OFF")]
    pub log_level_rl: LevelFilter,

    #[arg(short = 'o', long = "logfile")]
    pub log_file: Option<PathBuf>,

    /// Game string, e.g. `coop_box_pushing(curriculum_level=0)`
    #[arg(short = 'g', long = "game")]
    pub game: String,

    /// human, random, mcts or qlearner:<path>
    #[arg(long = "player0")]
    pub player0: PlayerSpec,

    #[arg(long = "player1")]
    pub player1: PlayerSpec,

    /// Print only results
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    #[arg(short = 'n', long = "num-games", default_value = "1")]
    pub num_games: usize,

    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,

    #[arg(long = "no-colors")]
    pub no_colors: bool,
}
