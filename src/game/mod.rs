//! Core checkers logic: board model, move notation, rule engine, capture
//! chains, and the turn-by-turn session controller.

mod board;
mod chain;
mod moves;
mod player;
pub mod rules;
mod session;

pub use board::{Board, Cell, PieceCounts, Rank, VALID_BOARD_SIZES};
pub use chain::ChainState;
pub use moves::{parse_move_input, Move, Square};
pub use player::{is_valid_player_name, Player, PlayerId, Side, COMPUTER_NAME, DEFAULT_NAME, MAX_NAME_LEN};
pub use session::{GameOutcome, MoveResult, Session};
