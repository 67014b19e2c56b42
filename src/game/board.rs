use std::fmt;

use super::player::Side;
use crate::error::SessionError;

/// Board sizes a game may be played on.
pub const VALID_BOARD_SIZES: [usize; 3] = [6, 8, 10];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rank {
    Man,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    XMan,
    XKing,
    OMan,
    OKing,
}

impl Cell {
    pub fn man(side: Side) -> Cell {
        match side {
            Side::X => Cell::XMan,
            Side::O => Cell::OMan,
        }
    }

    pub fn king(side: Side) -> Cell {
        match side {
            Side::X => Cell::XKing,
            Side::O => Cell::OKing,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Side owning the piece, `None` for an empty cell
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::XMan | Cell::XKing => Some(Side::X),
            Cell::OMan | Cell::OKing => Some(Side::O),
        }
    }

    pub fn rank(self) -> Option<Rank> {
        match self {
            Cell::Empty => None,
            Cell::XMan | Cell::OMan => Some(Rank::Man),
            Cell::XKing | Cell::OKing => Some(Rank::King),
        }
    }

    pub fn is_king(self) -> bool {
        self.rank() == Some(Rank::King)
    }

    /// The king of the same side; kings and empty cells are unchanged
    pub fn promoted(self) -> Cell {
        match self.side() {
            Some(side) => side.king(),
            None => Cell::Empty,
        }
    }

    /// Glyph used by text renderings of the board
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::XMan => 'X',
            Cell::OMan => 'O',
            Cell::XKing => 'K',
            Cell::OKing => 'U',
        }
    }

    /// Inverse of [`Cell::symbol`]; `.` is accepted as empty too
    pub fn from_symbol(symbol: char) -> Option<Cell> {
        match symbol {
            ' ' | '.' => Some(Cell::Empty),
            'X' => Some(Cell::XMan),
            'O' => Some(Cell::OMan),
            'K' => Some(Cell::XKing),
            'U' => Some(Cell::OKing),
            _ => None,
        }
    }
}

/// Piece totals per side and rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PieceCounts {
    pub x_men: usize,
    pub x_kings: usize,
    pub o_men: usize,
    pub o_kings: usize,
}

impl PieceCounts {
    pub fn men(&self, side: Side) -> usize {
        match side {
            Side::X => self.x_men,
            Side::O => self.o_men,
        }
    }

    pub fn kings(&self, side: Side) -> usize {
        match side {
            Side::X => self.x_kings,
            Side::O => self.o_kings,
        }
    }
}

/// Square grid of cells. Only dark squares (`(row + col)` odd) ever hold pieces.
///
/// A board built with an unsupported size has `size() == 0` and no cells;
/// every read on it yields [`Cell::Empty`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a board in the starting position, or the invalid zero-sized
    /// board if `size` is not one of [`VALID_BOARD_SIZES`].
    pub fn new(size: usize) -> Self {
        if !Self::is_valid_size(size) {
            return Board::invalid();
        }

        let mut board = Board::empty(size);
        let upper_region_end = size / 2 - 1;
        let lower_region_start = size / 2 + 1;

        for row in 0..size {
            for col in 0..size {
                if (row + col) % 2 == 0 {
                    continue;
                }
                let cell = if row < upper_region_end {
                    Cell::OMan
                } else if row >= lower_region_start {
                    Cell::XMan
                } else {
                    Cell::Empty
                };
                board.cells[row * size + col] = cell;
            }
        }

        board
    }

    /// Like [`Board::new`] but reports an unsupported size as an error.
    pub fn try_new(size: usize) -> Result<Self, SessionError> {
        if Self::is_valid_size(size) {
            Ok(Self::new(size))
        } else {
            Err(SessionError::InvalidBoardSize(size))
        }
    }

    /// A board of the given size with no pieces on it.
    pub fn empty(size: usize) -> Self {
        if !Self::is_valid_size(size) {
            return Board::invalid();
        }
        Board {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    fn invalid() -> Self {
        Board {
            size: 0,
            cells: Vec::new(),
        }
    }

    /// Build a board from a text diagram, one string per row, using the
    /// glyphs of [`Cell::symbol`] (`.` or space for empty squares).
    pub fn from_rows(size: usize, rows: &[&str]) -> Result<Self, SessionError> {
        let mut board = Self::empty(size);
        if !board.is_valid() {
            return Err(SessionError::InvalidBoardSize(size));
        }
        if rows.len() != size {
            return Err(SessionError::InvalidDiagram(format!(
                "expected {} rows, got {}",
                size,
                rows.len()
            )));
        }

        for (row, line) in rows.iter().enumerate() {
            let glyphs: Vec<char> = line.chars().collect();
            if glyphs.len() != size {
                return Err(SessionError::InvalidDiagram(format!(
                    "row {} has {} columns, expected {}",
                    row,
                    glyphs.len(),
                    size
                )));
            }
            for (col, &glyph) in glyphs.iter().enumerate() {
                let cell = Cell::from_symbol(glyph).ok_or_else(|| {
                    SessionError::InvalidDiagram(format!("unknown glyph '{}'", glyph))
                })?;
                if !cell.is_empty() && (row + col) % 2 == 0 {
                    return Err(SessionError::InvalidDiagram(format!(
                        "piece on light square ({}, {})",
                        row, col
                    )));
                }
                board.cells[row * size + col] = cell;
            }
        }

        Ok(board)
    }

    pub fn is_valid_size(size: usize) -> bool {
        VALID_BOARD_SIZES.contains(&size)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// False for the zero-sized board produced by an unsupported size
    pub fn is_valid(&self) -> bool {
        self.size != 0
    }

    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        let size = self.size as i32;
        row >= 0 && row < size && col >= 0 && col < size
    }

    /// Cell at `(row, col)`; out-of-range positions read as empty.
    pub fn get(&self, row: i32, col: i32) -> Cell {
        if self.in_bounds(row, col) {
            self.cells[row as usize * self.size + col as usize]
        } else {
            Cell::Empty
        }
    }

    /// Overwrite a cell. Out-of-range positions are ignored.
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) {
        if self.in_bounds(row, col) {
            self.cells[row as usize * self.size + col as usize] = cell;
        }
    }

    pub fn count_pieces(&self) -> PieceCounts {
        let mut counts = PieceCounts::default();
        for cell in &self.cells {
            match cell {
                Cell::XMan => counts.x_men += 1,
                Cell::XKing => counts.x_kings += 1,
                Cell::OMan => counts.o_men += 1,
                Cell::OKing => counts.o_kings += 1,
                Cell::Empty => {}
            }
        }
        counts
    }

    /// Squares holding a piece of `side`, in row-major order
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = (i32, i32)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, cell)| cell.side() == Some(side))
            .map(move |(idx, _)| ((idx / size) as i32, (idx % size) as i32))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(8)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return writeln!(f, "<invalid board>");
        }

        write!(f, "  ")?;
        for col in 0..self.size {
            write!(f, "  {} ", (b'a' + col as u8) as char)?;
        }
        writeln!(f)?;

        let separator = format!("  {}=", "====".repeat(self.size));
        writeln!(f, "{}", separator)?;
        for row in 0..self.size {
            write!(f, "{} |", (b'A' + row as u8) as char)?;
            for col in 0..self.size {
                write!(f, " {} |", self.cells[row * self.size + col].symbol())?;
            }
            writeln!(f)?;
            writeln!(f, "{}", separator)?;
        }
        Ok(())
    }
}
