//! Move-selection policies for computer-controlled players.

mod agent;
mod random;

pub use agent::Agent;
pub use random::RandomAgent;
