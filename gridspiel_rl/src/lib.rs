//! # gridspiel_rl
//!
//! Tabular learning for games served by `gridspiel_core` engine interface.
//!
//! Agents ([`QLearner`](agent::QLearner), [`MultiagentQLearner`](agent::MultiagentQLearner),
//! [`RandomAgent`](agent::RandomAgent)) talk to [`Environment`](gridspiel_core::env::Environment)
//! through time steps. Trained learners can be saved with [`persistence`] and later seated at
//! the table as [`QLearnerBot`](policy::QLearnerBot).

/// Learning agents.
pub mod agent;
/// Exploration schedules.
pub mod schedule;
/// Stage game solvers for joint action learning.
pub mod solver;
/// Trained learners used as bots and policies.
pub mod policy;
pub mod persistence;
pub mod error;
