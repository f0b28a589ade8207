//! Adapters exposing trained tabular learner as seat at the table.
mod key;
mod bot;
mod tabular_policy;

pub use key::*;
pub use bot::*;
pub use tabular_policy::*;
