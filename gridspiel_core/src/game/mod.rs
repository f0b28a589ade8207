mod types;
mod parameters;
mod game_string;
mod traits;

pub use types::*;
pub use parameters::*;
pub use game_string::*;
pub use traits::*;
