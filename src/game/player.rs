use super::board::Cell;

/// Longest accepted player name, in characters.
pub const MAX_NAME_LEN: usize = 20;

/// Name used when a player is created with a blank name.
pub const DEFAULT_NAME: &str = "Unknown";

/// Name given to the computer opponent when none is supplied.
pub const COMPUTER_NAME: &str = "Computer";

/// The two colours of pieces. X starts at the bottom and moves toward row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    X,
    O,
}

impl Side {
    /// Get the other side
    pub fn other(self) -> Side {
        match self {
            Side::X => Side::O,
            Side::O => Side::X,
        }
    }

    /// Row delta of a man's forward step
    pub fn forward(self) -> i32 {
        match self {
            Side::X => -1,
            Side::O => 1,
        }
    }

    /// Row on which this side's men are crowned
    pub fn promotion_row(self, board_size: usize) -> i32 {
        match self {
            Side::X => 0,
            Side::O => board_size as i32 - 1,
        }
    }

    pub fn man(self) -> Cell {
        Cell::man(self)
    }

    pub fn king(self) -> Cell {
        Cell::king(self)
    }

    /// Display label, e.g. `PlayerX`
    pub fn label(self) -> &'static str {
        match self {
            Side::X => "PlayerX",
            Side::O => "PlayerO",
        }
    }
}

/// Seat of a player in the session. The first player plays X and moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerId {
    First,
    Second,
}

impl PlayerId {
    pub fn other(self) -> PlayerId {
        match self {
            PlayerId::First => PlayerId::Second,
            PlayerId::Second => PlayerId::First,
        }
    }

    pub fn side(self) -> Side {
        match self {
            PlayerId::First => Side::X,
            PlayerId::Second => Side::O,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    side: Side,
    score: i32,
}

impl Player {
    /// Create a player with zero score. Blank names become [`DEFAULT_NAME`].
    pub fn new(name: &str, side: Side) -> Self {
        let name = if name.trim().is_empty() {
            DEFAULT_NAME.to_string()
        } else {
            name.to_string()
        };
        Player {
            name,
            side,
            score: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Cumulative score across rounds
    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn increase_score_by(&mut self, points: i32) {
        self.score += points;
    }
}

/// Accepts names that are non-blank, at most [`MAX_NAME_LEN`] characters and
/// contain no spaces.
pub fn is_valid_player_name(name: &str) -> bool {
    !name.trim().is_empty() && name.chars().count() <= MAX_NAME_LEN && !name.contains(' ')
}
