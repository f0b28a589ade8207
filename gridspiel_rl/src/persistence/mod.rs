//! Saving trained tabular agents to files and loading them back.
//!
//! Format follows file extension: `.json` (default), `.ron` or `.bin` (speedy).
mod record;
mod format;

pub use record::*;
pub use format::*;

use std::fs;
use std::path::{Path, PathBuf};
use crate::agent::{QLearner, RlAgent};
use crate::error::PersistenceError;

fn write_agent(record: &SavedAgent, path: &Path) -> Result<(), PersistenceError>{
    let format = AgentFormat::from_path(path)?;
    let bytes = format.encode(record)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()){
        fs::create_dir_all(parent).map_err(|e| PersistenceError::io(parent, e))?;
    }
    fs::write(path, bytes).map_err(|e| PersistenceError::io(path, e))
}

/// Reads agent record without checking its type.
pub fn read_agent(path: &Path) -> Result<SavedAgent, PersistenceError>{
    let format = AgentFormat::from_path(path)?;
    let bytes = fs::read(path).map_err(|e| PersistenceError::io(path, e))?;
    format.decode(&bytes)
}

/// Saves learner, parent directories are created when missing.
pub fn save_qlearner(agent: &QLearner, path: impl AsRef<Path>) -> Result<(), PersistenceError>{
    let path = path.as_ref();
    write_agent(&SavedAgent::from(agent), path)?;
    #[cfg(feature = "log_info")]
    log::info!("Saved QLearner of player {} ({} states) to {:?}", agent.player_id(), agent.q_table_len(), path);
    Ok(())
}

/// Loads learner. When `num_actions` is given and differs from saved one, Q-table rows are resized.
pub fn load_qlearner(path: impl AsRef<Path>, num_actions: Option<usize>) -> Result<QLearner, PersistenceError>{
    let path = path.as_ref();
    let record = read_agent(path)?;
    if record.agent_type != QLEARNER_AGENT_TYPE{
        return Err(PersistenceError::InvalidAgentType {
            expected: QLEARNER_AGENT_TYPE.into(),
            found: record.agent_type
        })
    }
    let mut agent = record.to_qlearner();
    if let Some(n) = num_actions.filter(|n| *n != agent.num_actions()){
        #[cfg(feature = "log_warn")]
        log::warn!("Agent in {:?} has {} actions, resizing to {}", path, agent.num_actions(), n);
        agent.resize_actions(n);
    }
    #[cfg(feature = "log_info")]
    log::info!("Loaded QLearner of player {} ({} states) from {:?}", agent.player_id(), agent.q_table_len(), path);
    Ok(agent)
}

/// File name of agent saved by [`save_multiple_agents`].
pub fn agent_file_name(game_name: &str, player: usize, format: AgentFormat) -> String{
    format!("{game_name}_player{player}_qlearner.{}", format.extension())
}

/// Saves every agent to `dir` under [`agent_file_name`], returns written paths.
pub fn save_multiple_agents(agents: &[QLearner], dir: impl AsRef<Path>, game_name: &str) -> Result<Vec<PathBuf>, PersistenceError>{
    let dir = dir.as_ref();
    agents.iter().map(|agent| {
        let path = dir.join(agent_file_name(game_name, agent.player_id(), AgentFormat::Json));
        save_qlearner(agent, &path).map(|_| path)
    }).collect()
}

/// Loads agents of players `0..num_players` saved by [`save_multiple_agents`].
pub fn load_multiple_agents(dir: impl AsRef<Path>, game_name: &str, num_players: usize, num_actions: Option<usize>) -> Result<Vec<QLearner>, PersistenceError>{
    let dir = dir.as_ref();
    (0..num_players)
        .map(|p| load_qlearner(dir.join(agent_file_name(game_name, p, AgentFormat::Json)), num_actions))
        .collect()
}

/// Summary of agent file.
pub fn get_agent_info(path: impl AsRef<Path>) -> Result<AgentInfo, PersistenceError>{
    let path = path.as_ref();
    let record = read_agent(path)?;
    let file_size = fs::metadata(path).map_err(|e| PersistenceError::io(path, e))?.len();
    Ok(AgentInfo{
        agent_type: record.agent_type,
        player_id: record.player_id as usize,
        num_actions: record.num_actions as usize,
        q_table_size: record.q_values.len(),
        epsilon: record.epsilon,
        file_size,
    })
}

/// Info of every agent file in `dir` (sorted by path). Files that can not be read are skipped,
/// missing directory gives empty list.
pub fn list_saved_agents(dir: impl AsRef<Path>) -> Result<Vec<(PathBuf, AgentInfo)>, PersistenceError>{
    let dir = dir.as_ref();
    if !dir.is_dir(){
        return Ok(Vec::new())
    }
    let entries = fs::read_dir(dir).map_err(|e| PersistenceError::io(dir, e))?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some() && AgentFormat::from_path(p).is_ok())
        .collect();
    paths.sort();
    let mut infos = Vec::with_capacity(paths.len());
    for path in paths{
        match get_agent_info(&path){
            Ok(info) => infos.push((path, info)),
            Err(_e) => {
                #[cfg(feature = "log_warn")]
                log::warn!("Skipping {:?}: {}", path, _e);
            }
        }
    }
    Ok(infos)
}

/// Rewrites agent file in format of `destination` extension.
pub fn convert_agent_file(source: impl AsRef<Path>, destination: impl AsRef<Path>) -> Result<(), PersistenceError>{
    let record = read_agent(source.as_ref())?;
    write_agent(&record, destination.as_ref())
}
