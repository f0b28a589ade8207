//! # gridspiel_games
//!
//! Cooperative grid games served through the engine interface of `gridspiel_core`:
//! cooperative box pushing (with curriculum layouts) and the companion family
//! (`companion_simple`, `companion_synchro`).
//!
//! Games are normally obtained through [`load_game`] or [`load_game_from_str`].

/// Cooperative box pushing for two agents.
pub mod coop_box_pushing;
/// Companion grid worlds for up to 25 agents.
pub mod companion;
mod registry;

pub use registry::*;
