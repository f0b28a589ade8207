mod time_step;
mod environment;

pub use time_step::*;
pub use environment::*;
