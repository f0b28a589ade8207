mod command;
mod cli_bot;
mod key_bot;

pub use command::*;
pub use cli_bot::*;
pub use key_bot::*;
