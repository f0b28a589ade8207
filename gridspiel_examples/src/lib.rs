//! Shared parts of `gridspiel` example programs: logger setup, terminal rendering,
//! training loops over [`Environment`](gridspiel_core::env::Environment), curriculum
//! bookkeeping, reward plots and series dumps.

pub mod setup;
pub mod render;
pub mod training;
pub mod curriculum;
pub mod plots;
pub mod series;
pub mod players;
pub mod error;
