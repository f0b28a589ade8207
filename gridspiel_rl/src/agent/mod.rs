mod traits;
mod random;
mod q_learner;
mod multiagent;

pub use traits::*;
pub use random::*;
pub use q_learner::*;
pub use multiagent::*;
