mod options;

use std::path::Path;
use clap::Parser;
use log::LevelFilter;
use gridspiel_examples::setup::setup_logger;
use gridspiel_rl::persistence::{convert_agent_file, get_agent_info, list_saved_agents, AgentInfo};
use crate::options::{AgentCommand, ManageOptions};

fn print_info(path: &Path, info: &AgentInfo){
    println!("{}", path.display());
    println!("  Type: {}", info.agent_type);
    println!("  Player ID: {}", info.player_id);
    println!("  Actions: {}", info.num_actions);
    println!("  Q-table size: {} states", info.q_table_size);
    println!("  Epsilon: {:.4}", info.epsilon);
    println!("  File size: {} bytes", info.file_size);
}

fn main() -> anyhow::Result<()>{
    let options = ManageOptions::parse();
    setup_logger(options.log_level, LevelFilter::Off, options.log_level_rl, options.log_file.as_deref())?;

    match &options.command{
        AgentCommand::List{dir} => {
            let agents = list_saved_agents(dir)?;
            if agents.is_empty(){
                println!("No saved agents in {}", dir.display());
            }
            for (path, info) in agents.iter(){
                print_info(path, info);
            }
        },
        AgentCommand::Info{path} => {
            let info = get_agent_info(path)?;
            print_info(path, &info);
        },
        AgentCommand::Convert{source, destination} => {
            convert_agent_file(source, destination)?;
            println!("Converted {} to {}", source.display(), destination.display());
        }
    }
    Ok(())
}
