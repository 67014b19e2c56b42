use std::fmt;

/// A board coordinate. Rows and columns are zero-based; signed so that
/// off-board neighbours can be represented while probing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: i32,
    pub col: i32,
}

impl Square {
    pub const fn new(row: i32, col: i32) -> Self {
        Square { row, col }
    }

    pub fn offset(self, d_row: i32, d_col: i32) -> Square {
        Square::new(self.row + d_row, self.col + d_col)
    }

    /// Two-character notation: uppercase row letter then lowercase column
    /// letter, e.g. `(1, 2)` is `"Bc"`.
    pub fn notation(self) -> String {
        let row = char::from_u32('A' as u32 + self.row as u32).unwrap_or('?');
        let col = char::from_u32('a' as u32 + self.col as u32).unwrap_or('?');
        format!("{}{}", row, col)
    }

    /// Parse two-character notation against a board of `board_size`.
    /// Returns `None` for the wrong length or an off-board result.
    pub fn parse(text: &str, board_size: usize) -> Option<Square> {
        let mut chars = text.chars();
        let (row_char, col_char) = match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(c), None) => (r, c),
            _ => return None,
        };

        let row = row_char as u32 as i64 - 'A' as u32 as i64;
        let col = col_char as u32 as i64 - 'a' as u32 as i64;
        let size = board_size as i64;
        if row < 0 || row >= size || col < 0 || col >= size {
            return None;
        }
        Some(Square::new(row as i32, col as i32))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation())
    }
}

/// A single step or jump from one square to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub const fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }

    pub fn from_coords(from_row: i32, from_col: i32, to_row: i32, to_col: i32) -> Self {
        Move::new(Square::new(from_row, from_col), Square::new(to_row, to_col))
    }

    /// True when the move spans two rows, i.e. it captures
    pub fn is_jump(&self) -> bool {
        (self.from.row - self.to.row).abs() == 2
    }

    /// Square jumped over; only meaningful for jumps
    pub fn midpoint(&self) -> Square {
        Square::new(
            (self.from.row + self.to.row) / 2,
            (self.from.col + self.to.col) / 2,
        )
    }

    /// `FROM>TO` notation, e.g. `"Fa>Eb"`
    pub fn notation(&self) -> String {
        format!("{}>{}", self.from.notation(), self.to.notation())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation())
    }
}

/// Split free-text input of the form `FROM>TO` into its two halves.
///
/// Both halves must be exactly two characters; board bounds are not checked
/// here.
pub fn parse_move_input(input: &str) -> Option<(String, String)> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let mut parts = input.split('>');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(from), Some(to), None) if from.chars().count() == 2 && to.chars().count() == 2 => {
            Some((from.to_string(), to.to_string()))
        }
        _ => None,
    }
}
