use crate::game::{Board, Move, Side};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::agent::Agent;

/// An agent that selects uniformly at random from legal moves.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible agent: the same seed yields the same sequence of choices.
    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, _board: &Board, _side: Side, legal: &[Move]) -> Option<Move> {
        if legal.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..legal.len());
        Some(legal[idx])
    }

    fn name(&self) -> &str {
        "Random"
    }
}
