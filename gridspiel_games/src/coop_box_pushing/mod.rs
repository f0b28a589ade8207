//! Two agents push boxes to the top row of 8x8 field. Small boxes can be pushed alone,
//! the big box only by both agents together.
mod types;
mod layout;
mod state;
mod game;

pub use types::*;
pub use layout::*;
pub use state::*;
pub use game::*;
