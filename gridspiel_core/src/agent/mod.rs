mod bot;
/// Bots controlled by human from terminal.
pub mod manual_control;

pub use bot::*;
