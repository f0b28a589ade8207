//! Companion family of grid worlds: agents move simultaneously on grid with walls, lava,
//! doors and keys. Variants differ in layout and success condition.
mod types;
mod grid;
mod state;
mod simple;
mod synchro;
mod game;

pub use types::*;
pub use grid::*;
pub use state::*;
pub use simple::*;
pub use synchro::*;
pub use game::*;
