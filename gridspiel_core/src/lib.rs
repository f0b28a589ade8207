//! # gridspiel
//!
//!
//! Core crate of the workspace driving cooperative grid games: the request/response interface
//! of the game engine, bots able to take a seat at the table (random, human from terminal),
//! and the reinforcement learning environment used by training loops.
//!
//! ## Games
//! Game implementations live in `gridspiel_games`, learning agents in `gridspiel_rl`.
//! Runnable programs are in `gridspiel_examples`.
//! ## Licence: MIT

/// Engine interface: game and state traits, game types and parameters.
pub mod game;
/// Bots (players) that select actions from game states.
pub mod agent;
/// Reinforcement learning environment wrapping game state with reset/step loop.
pub mod env;
/// Structures used for error handling in framework.
pub mod error;
/// Parsing helpers.
pub mod util;
/// Module with demonstration constructions
pub mod demo;

pub mod reexport{
    pub use nom;
    pub use dialoguer;
}
