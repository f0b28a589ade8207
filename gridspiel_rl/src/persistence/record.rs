use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::agent::{QLearner, QTable, RlAgent};
use crate::schedule::{EpsilonSchedule, Schedule};

pub const QLEARNER_AGENT_TYPE: &str = "QLearner";

/// Content of agent file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, speedy::Writable, speedy::Readable)]
pub struct SavedAgent{
    pub agent_type: String,
    pub q_values: BTreeMap<String, Vec<f64>>,
    pub player_id: u64,
    pub num_actions: u64,
    pub step_size: f64,
    pub discount_factor: f64,
    pub centralized: bool,
    pub epsilon: f64,
    pub epsilon_schedule_value: f64,
    pub epsilon_schedule_steps: u64,
}

impl From<&QLearner> for SavedAgent{
    fn from(agent: &QLearner) -> Self {
        Self{
            agent_type: QLEARNER_AGENT_TYPE.into(),
            q_values: agent.q_table().iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            player_id: agent.player_id() as u64,
            num_actions: agent.num_actions() as u64,
            step_size: agent.step_size(),
            discount_factor: agent.discount_factor(),
            centralized: agent.is_centralized(),
            epsilon: agent.epsilon(),
            epsilon_schedule_value: agent.epsilon_schedule().value(),
            epsilon_schedule_steps: agent.epsilon_schedule().steps_taken(),
        }
    }
}

impl SavedAgent{
    /// Rebuilds learner, exploration continues with constant schedule at saved epsilon.
    pub fn to_qlearner(&self) -> QLearner{
        let q_values: QTable = self.q_values.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        QLearner::new(self.player_id as usize, self.num_actions as usize)
            .with_step_size(self.step_size)
            .with_discount_factor(self.discount_factor)
            .with_centralized(self.centralized)
            .with_epsilon_schedule(EpsilonSchedule::constant(self.epsilon))
            .with_q_table(q_values)
    }
}

/// Summary of agent file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentInfo{
    pub agent_type: String,
    pub player_id: usize,
    pub num_actions: usize,
    pub q_table_size: usize,
    pub epsilon: f64,
    pub file_size: u64,
}
