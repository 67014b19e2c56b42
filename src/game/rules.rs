//! Move legality and enumeration. Everything here is a pure function of the
//! board; turn order and capture chains are tracked by the session.

use super::board::{Board, Cell};
use super::moves::{Move, Square};
use super::player::Side;

/// Diagonal directions in canonical order: up-left, up-right, down-left,
/// down-right.
pub const DIRECTIONS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Kings go either way; men only toward the opponent's edge.
fn direction_allowed(piece: Cell, d_row: i32) -> bool {
    match piece.side() {
        None => false,
        Some(_) if piece.is_king() => true,
        Some(side) => d_row.signum() == side.forward(),
    }
}

/// A one-square diagonal step onto an empty square, in a direction the
/// piece's rank allows.
pub fn is_simple_move_legal(board: &Board, from: Square, to: Square) -> bool {
    if !board.in_bounds(to.row, to.col) || !board.get(to.row, to.col).is_empty() {
        return false;
    }

    let piece = board.get(from.row, from.col);
    let d_row = to.row - from.row;
    let d_col = to.col - from.col;

    d_row.abs() == 1 && d_col.abs() == 1 && direction_allowed(piece, d_row)
}

/// A two-square diagonal jump over an opposing piece onto an empty square.
pub fn is_jump_legal(board: &Board, from: Square, mid: Square, to: Square) -> bool {
    if !board.in_bounds(mid.row, mid.col) || !board.in_bounds(to.row, to.col) {
        return false;
    }
    if !board.get(to.row, to.col).is_empty() {
        return false;
    }

    let piece = board.get(from.row, from.col);
    let jumped = board.get(mid.row, mid.col);
    let is_opponent = match (piece.side(), jumped.side()) {
        (Some(mover), Some(other)) => mover != other,
        _ => false,
    };

    let d_row = to.row - from.row;
    let d_col = to.col - from.col;

    is_opponent
        && d_row.abs() == 2
        && d_col.abs() == 2
        && mid == Move::new(from, to).midpoint()
        && direction_allowed(piece, d_row)
}

/// Either a legal simple move or a legal jump over the midpoint.
pub fn is_move_legal(board: &Board, mv: Move) -> bool {
    is_simple_move_legal(board, mv.from, mv.to) || is_jump_legal(board, mv.from, mv.midpoint(), mv.to)
}

/// Legal jumps for the piece on `square`, in canonical direction order.
pub fn jumps_from(board: &Board, square: Square) -> Vec<Move> {
    DIRECTIONS
        .iter()
        .filter_map(|&(d_row, d_col)| {
            let mid = square.offset(d_row, d_col);
            let to = square.offset(2 * d_row, 2 * d_col);
            is_jump_legal(board, square, mid, to).then(|| Move::new(square, to))
        })
        .collect()
}

/// Legal simple moves for the piece on `square`, ignoring mandatory capture.
pub fn steps_from(board: &Board, square: Square) -> Vec<Move> {
    DIRECTIONS
        .iter()
        .filter_map(|&(d_row, d_col)| {
            let to = square.offset(d_row, d_col);
            is_simple_move_legal(board, square, to).then(|| Move::new(square, to))
        })
        .collect()
}

/// All jumps available to `side`, row-major over its pieces.
pub fn captures_for(board: &Board, side: Side) -> Vec<Move> {
    board
        .pieces(side)
        .flat_map(|(row, col)| jumps_from(board, Square::new(row, col)))
        .collect()
}

fn steps_for(board: &Board, side: Side) -> Vec<Move> {
    board
        .pieces(side)
        .flat_map(|(row, col)| steps_from(board, Square::new(row, col)))
        .collect()
}

/// All simple moves available to `side`; empty whenever a capture exists.
pub fn simple_moves_for(board: &Board, side: Side) -> Vec<Move> {
    if must_capture(board, side) {
        return Vec::new();
    }
    steps_for(board, side)
}

/// The moves `side` may play: its captures if it has any, else its simple moves.
pub fn legal_moves_for(board: &Board, side: Side) -> Vec<Move> {
    let captures = captures_for(board, side);
    if !captures.is_empty() {
        return captures;
    }
    steps_for(board, side)
}

pub fn must_capture(board: &Board, side: Side) -> bool {
    board
        .pieces(side)
        .any(|(row, col)| !jumps_from(board, Square::new(row, col)).is_empty())
}
