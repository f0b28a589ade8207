use std::fmt::{Display, Formatter};
use std::path::Path;
use speedy::{LittleEndian, Readable, Writable};
use crate::error::PersistenceError;
use crate::persistence::SavedAgent;

/// Encoding of agent file, selected by file extension.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum AgentFormat{
    #[default]
    Json,
    Ron,
    Bin,
}

impl AgentFormat{
    pub fn extension(&self) -> &'static str{
        match self{
            AgentFormat::Json => "json",
            AgentFormat::Ron => "ron",
            AgentFormat::Bin => "bin",
        }
    }

    /// Format of path, paths without extension are json.
    pub fn from_path(path: &Path) -> Result<Self, PersistenceError>{
        match path.extension().and_then(|e| e.to_str()){
            None => Ok(AgentFormat::Json),
            Some(ext) => match ext.to_lowercase().as_str(){
                "json" => Ok(AgentFormat::Json),
                "ron" => Ok(AgentFormat::Ron),
                "bin" => Ok(AgentFormat::Bin),
                other => Err(PersistenceError::UnsupportedFormat { extension: other.to_string() })
            }
        }
    }

    pub fn encode(&self, agent: &SavedAgent) -> Result<Vec<u8>, PersistenceError>{
        let encode_error = |e: String| PersistenceError::Encode { format: self.to_string(), explanation: e };
        match self{
            AgentFormat::Json => serde_json::to_vec_pretty(agent).map_err(|e| encode_error(format!("{e}"))),
            AgentFormat::Ron => ron::ser::to_string_pretty(agent, ron::ser::PrettyConfig::default())
                .map(String::into_bytes)
                .map_err(|e| encode_error(format!("{e}"))),
            AgentFormat::Bin => agent.write_to_vec_with_ctx(LittleEndian::default())
                .map_err(|e| encode_error(format!("{e}"))),
        }
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<SavedAgent, PersistenceError>{
        let decode_error = |e: String| PersistenceError::Decode { format: self.to_string(), explanation: e };
        match self{
            AgentFormat::Json => serde_json::from_slice(bytes).map_err(|e| decode_error(format!("{e}"))),
            AgentFormat::Ron => {
                let text = std::str::from_utf8(bytes).map_err(|e| decode_error(format!("{e}")))?;
                ron::from_str(text).map_err(|e| decode_error(format!("{e}")))
            }
            AgentFormat::Bin => SavedAgent::read_from_buffer_copying_data_with_ctx(LittleEndian::default(), bytes)
                .map_err(|e| decode_error(format!("{e}"))),
        }
    }
}

impl Display for AgentFormat{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}
