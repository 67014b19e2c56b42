use super::moves::Square;

/// Whether the player to move is in the middle of a multi-jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainState {
    /// No capture pending; any of the player's pieces may move
    #[default]
    Idle,
    /// The last move was a capture landing here and further jumps exist
    Active(Square),
}

impl ChainState {
    pub fn is_active(&self) -> bool {
        matches!(self, ChainState::Active(_))
    }

    /// Square of the piece that must keep jumping
    pub fn square(&self) -> Option<Square> {
        match self {
            ChainState::Idle => None,
            ChainState::Active(square) => Some(*square),
        }
    }

    /// True when a move from `from` would abandon the active chain
    pub fn abandons(&self, from: Square) -> bool {
        matches!(self, ChainState::Active(square) if *square != from)
    }
}
