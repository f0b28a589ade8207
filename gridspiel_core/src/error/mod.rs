mod game;
mod gridspiel;
mod protocol;

pub use game::*;
pub use gridspiel::*;
pub use protocol::*;
