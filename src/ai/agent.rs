use crate::game::{Board, Move, Side};

/// A move-selection policy for an automated player.
pub trait Agent {
    /// Choose one of `legal` for `side` to play on `board`.
    /// Returns `None` only when `legal` is empty.
    fn select_move(&mut self, board: &Board, side: Side, legal: &[Move]) -> Option<Move>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
