use tracing::{debug, info};

use super::board::{Board, Cell};
use super::chain::ChainState;
use super::moves::{Move, Square};
use super::player::{Player, PlayerId, COMPUTER_NAME};
use super::rules;
use crate::ai::{Agent, RandomAgent};
use crate::config::GameConfig;
use crate::error::ConfigError;

/// Outcome of submitting a move. Every rejected submission leaves the board
/// and turn untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveResult {
    /// Move played and the turn passed to the opponent
    Success,
    /// A square was not two characters or named a square off the board
    InvalidFormat,
    /// The move breaks movement or jump rules
    InvalidMove,
    /// A capture is available, so simple moves are not allowed
    MustCapture,
    /// The capture chain in progress must be continued
    MustCaptureAgain,
    /// Capture played; the same piece has to jump again
    AdditionalCaptureRequired,
}

impl MoveResult {
    /// True when the board changed
    pub fn is_played(self) -> bool {
        matches!(self, MoveResult::Success | MoveResult::AdditionalCaptureRequired)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(PlayerId),
    Tie,
}

/// One game between two players: the board, whose turn it is, any capture
/// chain in progress, and the players' cumulative scores.
///
/// Callers drive it sequentially; nothing here blocks or spawns.
pub struct Session {
    board: Board,
    players: [Player; 2],
    current: PlayerId,
    vs_computer: bool,
    chain: ChainState,
    previous_move: Option<Move>,
    forfeit: bool,
    agent: Box<dyn Agent>,
}

impl Session {
    /// Create a session whose computer moves are drawn from OS entropy.
    pub fn new(board_size: usize, player1_name: &str, player2_name: &str, vs_computer: bool) -> Self {
        Self::with_agent(
            board_size,
            player1_name,
            player2_name,
            vs_computer,
            Box::new(RandomAgent::new()),
        )
    }

    /// Create a session with an explicit move-selection policy for
    /// [`Session::submit_computer_move`].
    pub fn with_agent(
        board_size: usize,
        player1_name: &str,
        player2_name: &str,
        vs_computer: bool,
        agent: Box<dyn Agent>,
    ) -> Self {
        let player2_name = if vs_computer && player2_name.trim().is_empty() {
            COMPUTER_NAME
        } else {
            player2_name
        };

        Session {
            board: Board::new(board_size),
            players: [
                Player::new(player1_name, PlayerId::First.side()),
                Player::new(player2_name, PlayerId::Second.side()),
            ],
            current: PlayerId::First,
            vs_computer,
            chain: ChainState::Idle,
            previous_move: None,
            forfeit: false,
            agent,
        }
    }

    /// Validate `config` and build a session from it, seeding the computer's
    /// random source when a seed is configured.
    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let agent = match config.seed {
            Some(seed) => RandomAgent::with_seed(seed),
            None => RandomAgent::new(),
        };
        Ok(Self::with_agent(
            config.board_size,
            &config.player1_name,
            &config.player2_name,
            config.vs_computer,
            Box::new(agent),
        ))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Replace the board, e.g. to set up a position. Any capture chain is
    /// dropped; the turn is kept.
    pub fn set_board(&mut self, board: Board) {
        self.board = board;
        self.chain = ChainState::Idle;
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        match id {
            PlayerId::First => &self.players[0],
            PlayerId::Second => &self.players[1],
        }
    }

    fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        match id {
            PlayerId::First => &mut self.players[0],
            PlayerId::Second => &mut self.players[1],
        }
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn current_player_id(&self) -> PlayerId {
        self.current
    }

    pub fn current_player(&self) -> &Player {
        self.player(self.current)
    }

    /// Only the second player, and only in single-player mode
    pub fn is_computer_controlled(&self, id: PlayerId) -> bool {
        self.vs_computer && id == PlayerId::Second
    }

    pub fn is_forfeit(&self) -> bool {
        self.forfeit
    }

    pub fn chain_state(&self) -> ChainState {
        self.chain
    }

    /// Last move that completed a turn
    pub fn previous_move(&self) -> Option<Move> {
        self.previous_move
    }

    /// Moves the current player may play, honouring mandatory capture
    pub fn legal_moves(&self) -> Vec<Move> {
        rules::legal_moves_for(&self.board, self.current.side())
    }

    /// Material on the board: 1 per man, 4 per king.
    pub fn score(&self, id: PlayerId) -> i32 {
        let counts = self.board.count_pieces();
        let side = id.side();
        counts.men(side) as i32 + 4 * counts.kings(side) as i32
    }

    /// Play `from` → `to` for the current player, both in two-character
    /// notation.
    pub fn submit_move(&mut self, from: &str, to: &str) -> MoveResult {
        let size = self.board.size();
        let (from, to) = match (Square::parse(from, size), Square::parse(to, size)) {
            (Some(from), Some(to)) => (from, to),
            _ => return MoveResult::InvalidFormat,
        };

        let mv = Move::new(from, to);
        let side = self.current.side();
        let owns_piece = self.board.get(from.row, from.col).side() == Some(side);
        let is_legal = owns_piece && rules::is_move_legal(&self.board, mv);

        if self.chain.abandons(from) {
            let result = if is_legal {
                MoveResult::MustCaptureAgain
            } else {
                MoveResult::InvalidMove
            };
            debug!(mv = %mv, ?result, "rejected move away from capture chain");
            return result;
        }

        if !is_legal {
            debug!(mv = %mv, "rejected illegal move");
            return MoveResult::InvalidMove;
        }

        if !mv.is_jump() && rules::must_capture(&self.board, side) {
            let result = if self.chain.is_active() {
                MoveResult::MustCaptureAgain
            } else {
                MoveResult::MustCapture
            };
            debug!(mv = %mv, ?result, "rejected simple move while a capture is available");
            return result;
        }

        self.execute(mv);

        if mv.is_jump() && !rules::jumps_from(&self.board, to).is_empty() {
            self.chain = ChainState::Active(to);
            debug!(mv = %mv, "capture chain continues");
            return MoveResult::AdditionalCaptureRequired;
        }

        self.chain = ChainState::Idle;
        self.previous_move = Some(mv);
        self.current = self.current.other();
        MoveResult::Success
    }

    /// Relocate the piece, remove a jumped piece, crown on the far rank.
    fn execute(&mut self, mv: Move) {
        let piece = self.board.get(mv.from.row, mv.from.col);

        self.board.set(mv.to.row, mv.to.col, piece);
        self.board.set(mv.from.row, mv.from.col, Cell::Empty);
        if mv.is_jump() {
            let mid = mv.midpoint();
            self.board.set(mid.row, mid.col, Cell::Empty);
        }

        let promoted = match piece.side() {
            Some(side) if !piece.is_king() && mv.to.row == side.promotion_row(self.board.size()) => {
                self.board.set(mv.to.row, mv.to.col, piece.promoted());
                true
            }
            _ => false,
        };

        debug!(mv = %mv, capture = mv.is_jump(), promoted, "move executed");
    }

    /// Let the agent choose a move for the current player and submit it as
    /// if typed. Mid-chain, only jumps by the chained piece are considered.
    /// Returns [`MoveResult::InvalidMove`] when there is nothing to play.
    pub fn submit_computer_move(&mut self) -> MoveResult {
        let side = self.current.side();
        let candidates = match self.chain.square() {
            Some(square) => rules::jumps_from(&self.board, square),
            None => rules::legal_moves_for(&self.board, side),
        };

        let Some(mv) = self.agent.select_move(&self.board, side, &candidates) else {
            debug!(?side, "computer has no move to play");
            return MoveResult::InvalidMove;
        };

        debug!(agent = self.agent.name(), mv = %mv, "computer selected move");
        self.submit_move(&mv.from.notation(), &mv.to.notation())
    }

    /// Check for the end of the game. Returns `None` while play continues.
    ///
    /// A win adds `winner score - loser score` to the winner's cumulative
    /// score each time it is reported.
    pub fn is_game_over(&mut self) -> Option<GameOutcome> {
        let counts = self.board.count_pieces();
        if counts.x_kings == 1 && counts.o_kings == 1 && counts.x_men == 0 && counts.o_men == 0 {
            info!("game over: lone kings, tie");
            return Some(GameOutcome::Tie);
        }

        let first_moves = rules::legal_moves_for(&self.board, PlayerId::First.side());
        let second_moves = rules::legal_moves_for(&self.board, PlayerId::Second.side());

        let (winner, loser) = match (first_moves.is_empty(), second_moves.is_empty()) {
            (true, true) => {
                info!("game over: neither player can move, tie");
                return Some(GameOutcome::Tie);
            }
            (true, false) => (PlayerId::Second, PlayerId::First),
            (false, true) => (PlayerId::First, PlayerId::Second),
            (false, false) => return None,
        };

        if rules::must_capture(&self.board, winner.side()) {
            return None;
        }

        let delta = self.score(winner) - self.score(loser);
        self.player_mut(winner).increase_score_by(delta);
        info!(
            winner = self.player(winner).name(),
            delta,
            total = self.player(winner).score(),
            "game over: opponent has no moves"
        );
        Some(GameOutcome::Winner(winner))
    }

    /// End the game in the opponent's favour. The opponent gains the absolute
    /// material difference. Returns the winner.
    pub fn handle_forfeit(&mut self, forfeiting: PlayerId) -> PlayerId {
        let opponent = forfeiting.other();
        let delta = (self.score(opponent) - self.score(forfeiting)).abs();

        self.player_mut(opponent).increase_score_by(delta);
        self.forfeit = true;
        info!(
            forfeiting = self.player(forfeiting).name(),
            winner = self.player(opponent).name(),
            delta,
            "player forfeited"
        );
        opponent
    }

    /// Start a fresh round on a new board. Cumulative scores are kept.
    pub fn reset_game(&mut self, board_size: usize) {
        self.board = Board::new(board_size);
        self.current = PlayerId::First;
        self.forfeit = false;
        self.chain = ChainState::Idle;
        self.previous_move = None;
        info!(board_size, "game reset");
    }

    /// e.g. `"Alice's move was (PlayerX): Fb>Ea"`, once a turn has completed
    pub fn last_move_summary(&self) -> Option<String> {
        let mv = self.previous_move?;
        let last = self.player(self.current.other());
        Some(format!(
            "{}'s move was ({}): {}",
            last.name(),
            last.side().label(),
            mv.notation()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, PieceCounts, Side, VALID_BOARD_SIZES};

    fn session_with(size: usize, rows: &[&str]) -> Session {
        let mut session = Session::with_agent(
            size,
            "Alice",
            "Bob",
            false,
            Box::new(RandomAgent::with_seed(0)),
        );
        session.set_board(Board::from_rows(size, rows).unwrap());
        session
    }

    #[test]
    fn test_new_session() {
        let session = Session::new(8, "Alice", "Bob", true);
        assert_eq!(session.board().size(), 8);
        assert_eq!(session.current_player_id(), PlayerId::First);
        assert_eq!(session.current_player().name(), "Alice");
        assert_eq!(session.current_player().side(), Side::X);
        assert_eq!(session.player(PlayerId::Second).side(), Side::O);
        assert!(session.is_computer_controlled(PlayerId::Second));
        assert!(!session.is_computer_controlled(PlayerId::First));
        assert!(!session.is_forfeit());
        assert_eq!(session.chain_state(), ChainState::Idle);
        assert_eq!(session.last_move_summary(), None);
    }

    #[test]
    fn test_computer_gets_default_name() {
        let session = Session::new(8, "Alice", "  ", true);
        assert_eq!(session.player(PlayerId::Second).name(), COMPUTER_NAME);

        let session = Session::new(8, "Alice", "", false);
        assert_eq!(session.player(PlayerId::Second).name(), "Unknown");
        assert!(!session.is_computer_controlled(PlayerId::Second));
    }

    #[test]
    fn test_simple_move_passes_turn() {
        let mut session = Session::new(8, "Alice", "Bob", false);
        assert_eq!(session.submit_move("Fa", "Eb"), MoveResult::Success);
        assert_eq!(session.board().get(5, 0), Cell::Empty);
        assert_eq!(session.board().get(4, 1), Cell::XMan);
        assert_eq!(session.current_player_id(), PlayerId::Second);
        assert_eq!(
            session.last_move_summary().as_deref(),
            Some("Alice's move was (PlayerX): Fa>Eb")
        );
    }

    #[test]
    fn test_invalid_format() {
        let mut session = Session::new(8, "Alice", "Bob", false);
        let before = session.board().clone();
        assert_eq!(session.submit_move("F", "Ea"), MoveResult::InvalidFormat);
        assert_eq!(session.submit_move("Fb", "Eaa"), MoveResult::InvalidFormat);
        assert_eq!(session.submit_move("Fb", "Ia"), MoveResult::InvalidFormat);
        assert_eq!(session.submit_move("fB", "Ea"), MoveResult::InvalidFormat);
        assert_eq!(session.board(), &before);
        assert_eq!(session.current_player_id(), PlayerId::First);
    }

    #[test]
    fn test_invalid_moves_change_nothing() {
        let mut session = Session::new(8, "Alice", "Bob", false);
        let before = session.board().clone();
        // Straight ahead
        assert_eq!(session.submit_move("Fa", "Ea"), MoveResult::InvalidMove);
        // Backwards onto an occupied square
        assert_eq!(session.submit_move("Fa", "Gb"), MoveResult::InvalidMove);
        // Empty source
        assert_eq!(session.submit_move("Eb", "Da"), MoveResult::InvalidMove);
        // Opponent's piece
        assert_eq!(session.submit_move("Cb", "Da"), MoveResult::InvalidMove);
        assert_eq!(session.board(), &before);
        assert_eq!(session.current_player_id(), PlayerId::First);
    }

    #[test]
    fn test_invalid_board_rejects_everything() {
        let mut session = Session::new(7, "Alice", "Bob", false);
        assert!(!session.board().is_valid());
        assert_eq!(session.submit_move("Aa", "Bb"), MoveResult::InvalidFormat);
        assert_eq!(session.submit_computer_move(), MoveResult::InvalidMove);
    }

    #[test]
    fn test_mandatory_capture() {
        // O to move with a jump available at (3,2) over (4,3)
        let mut session = session_with(
            8,
            &[
                "........", //
                "O.......", //
                "........", //
                "..O.....", //
                "...X....", //
                "........", //
                "........", //
                "....X...", //
            ],
        );
        session.current = PlayerId::Second;
        let before = session.board().clone();

        assert_eq!(session.submit_move("Ba", "Cb"), MoveResult::MustCapture);
        assert_eq!(session.board(), &before);
        assert_eq!(session.current_player_id(), PlayerId::Second);

        assert_eq!(session.submit_move("Dc", "Fe"), MoveResult::Success);
        assert_eq!(session.board().get(4, 3), Cell::Empty);
        assert_eq!(session.board().get(5, 4), Cell::OMan);
        assert_eq!(session.current_player_id(), PlayerId::First);
    }

    #[test]
    fn test_capture_chain() {
        let mut session = session_with(
            8,
            &[
                "........", //
                "........", //
                "...O....", //
                "........", //
                ".....O..", //
                "......X.", //
                "........", //
                "........", //
            ],
        );

        // (5,6) jumps (4,5) to (3,4); from there (2,3) can be taken
        assert_eq!(session.submit_move("Fg", "De"), MoveResult::AdditionalCaptureRequired);
        assert_eq!(session.chain_state(), ChainState::Active(Square::new(3, 4)));
        assert_eq!(session.current_player_id(), PlayerId::First);
        assert_eq!(session.board().get(4, 5), Cell::Empty);
        assert_eq!(session.last_move_summary(), None);

        assert_eq!(session.submit_move("De", "Bc"), MoveResult::Success);
        assert_eq!(session.board().get(2, 3), Cell::Empty);
        assert_eq!(session.board().get(1, 2), Cell::XMan);
        assert_eq!(session.chain_state(), ChainState::Idle);
        assert_eq!(session.current_player_id(), PlayerId::Second);
        assert_eq!(
            session.last_move_summary().as_deref(),
            Some("Alice's move was (PlayerX): De>Bc")
        );
    }

    #[test]
    fn test_chain_cannot_be_abandoned() {
        let mut session = session_with(
            8,
            &[
                "........", //
                "........", //
                "...O....", //
                "........", //
                ".....O..", //
                "X.....X.", //
                "........", //
                "........", //
            ],
        );

        assert_eq!(session.submit_move("Fg", "De"), MoveResult::AdditionalCaptureRequired);
        let mid_chain = session.board().clone();

        // A legal move by another piece
        assert_eq!(session.submit_move("Fa", "Eb"), MoveResult::MustCaptureAgain);
        // An illegal move by another piece
        assert_eq!(session.submit_move("Fa", "Da"), MoveResult::InvalidMove);
        // The chained piece trying a simple step
        assert_eq!(session.submit_move("De", "Cf"), MoveResult::MustCaptureAgain);
        assert_eq!(session.board(), &mid_chain);
        assert_eq!(session.current_player_id(), PlayerId::First);
        assert!(session.chain_state().is_active());
    }

    #[test]
    fn test_promotion_and_king_moves() {
        let mut session = session_with(
            6,
            &[
                "......", //
                "X.....", //
                "......", //
                "......", //
                "...O..", //
                "......", //
            ],
        );

        assert_eq!(session.submit_move("Ba", "Ab"), MoveResult::Success);
        assert_eq!(session.board().get(0, 1), Cell::XKing);

        // O moves, then the new king steps backwards
        assert_eq!(session.submit_move("Ed", "Fe"), MoveResult::Success);
        assert_eq!(session.board().get(5, 4), Cell::OKing);
        assert_eq!(session.submit_move("Ab", "Bc"), MoveResult::Success);
        assert_eq!(session.board().get(1, 2), Cell::XKing);
    }

    #[test]
    fn test_promotion_by_jump() {
        let mut session = session_with(
            6,
            &[
                "...O..", //
                "..O...", //
                "...X..", //
                "......", //
                "......", //
                "......", //
            ],
        );

        assert_eq!(session.submit_move("Cd", "Ab"), MoveResult::Success);
        assert_eq!(session.board().get(0, 1), Cell::XKing);
        assert_eq!(session.board().get(1, 2), Cell::Empty);
    }

    #[test]
    fn test_computer_move_plays_legal_move() {
        let mut session = Session::with_agent(8, "Alice", "", true, Box::new(RandomAgent::with_seed(9)));
        assert_eq!(session.submit_move("Fa", "Eb"), MoveResult::Success);

        let legal = session.legal_moves();
        let before = session.board().clone();
        assert_eq!(session.submit_computer_move(), MoveResult::Success);
        let mv = session.previous_move().unwrap();
        assert!(legal.contains(&mv));
        assert_eq!(before.get(mv.from.row, mv.from.col), Cell::OMan);
        assert_eq!(session.board().get(mv.to.row, mv.to.col), Cell::OMan);
        assert_eq!(session.current_player_id(), PlayerId::First);
    }

    #[test]
    fn test_computer_continues_chain_with_same_piece() {
        let mut session = session_with(
            8,
            &[
                "........", //
                "........", //
                "...O....", //
                "........", //
                ".....O..", //
                "X.....X.", //
                "........", //
                "........", //
            ],
        );

        assert_eq!(session.submit_move("Fg", "De"), MoveResult::AdditionalCaptureRequired);
        assert_eq!(session.submit_computer_move(), MoveResult::Success);
        assert_eq!(session.previous_move(), Some(Move::from_coords(3, 4, 1, 2)));
    }

    #[test]
    fn test_computer_matches_human_submission() {
        let mut by_computer = Session::with_agent(8, "A", "B", false, Box::new(RandomAgent::with_seed(3)));
        let result = by_computer.submit_computer_move();
        let mv = by_computer.previous_move().unwrap();

        let mut by_human = Session::new(8, "A", "B", false);
        assert_eq!(by_human.submit_move(&mv.from.notation(), &mv.to.notation()), result);
        assert_eq!(by_human.board(), by_computer.board());
        assert_eq!(by_human.current_player_id(), by_computer.current_player_id());
    }

    #[test]
    fn test_score_is_material() {
        let session = session_with(
            8,
            &[
                ".O.U....", //
                "........", //
                "........", //
                "........", //
                "........", //
                "........", //
                "........", //
                "K.X.X...", //
            ],
        );
        assert_eq!(session.score(PlayerId::First), 6);
        assert_eq!(session.score(PlayerId::Second), 5);
    }

    #[test]
    fn test_lone_kings_tie() {
        let mut session = session_with(
            8,
            &[
                "........", //
                "........", //
                "...K....", //
                "........", //
                "........", //
                "......U.", //
                "........", //
                "........", //
            ],
        );
        assert_eq!(session.is_game_over(), Some(GameOutcome::Tie));
        assert_eq!(session.player(PlayerId::First).score(), 0);
        assert_eq!(session.player(PlayerId::Second).score(), 0);
    }

    #[test]
    fn test_game_continues_from_start() {
        let mut session = Session::new(10, "A", "B", false);
        assert_eq!(session.is_game_over(), None);
    }

    #[test]
    fn test_win_when_opponent_has_no_pieces() {
        let mut session = session_with(
            6,
            &[
                "......", //
                "......", //
                "...K..", //
                "......", //
                ".X....", //
                "......", //
            ],
        );
        assert_eq!(session.is_game_over(), Some(GameOutcome::Winner(PlayerId::First)));
        assert_eq!(session.player(PlayerId::First).score(), 5);
        assert_eq!(session.player(PlayerId::Second).score(), 0);
    }

    #[test]
    fn test_win_when_opponent_is_blocked() {
        // O's only man is hemmed in and X's jump landings are occupied
        let mut session = session_with(
            6,
            &[
                "......", //
                "......", //
                "......", //
                "X.X...", //
                ".O....", //
                "X.X...", //
            ],
        );
        assert!(rules::legal_moves_for(session.board(), Side::O).is_empty());
        assert!(!rules::must_capture(session.board(), Side::X));
        assert_eq!(session.is_game_over(), Some(GameOutcome::Winner(PlayerId::First)));
        assert_eq!(session.player(PlayerId::First).score(), 3);
    }

    #[test]
    fn test_win_award_is_signed_and_repeats() {
        // O is walled in with more material; X wins with a negative delta
        let mut session = session_with(
            6,
            &[
                "......", //
                "X.....", //
                "......", //
                "O.O.O.", //
                ".O.O.O", //
                "X.X.X.", //
            ],
        );
        assert!(rules::legal_moves_for(session.board(), Side::O).is_empty());
        assert!(!rules::must_capture(session.board(), Side::X));
        assert_eq!(session.score(PlayerId::First), 4);
        assert_eq!(session.score(PlayerId::Second), 6);

        assert_eq!(session.is_game_over(), Some(GameOutcome::Winner(PlayerId::First)));
        assert_eq!(session.player(PlayerId::First).score(), -2);
        assert_eq!(session.is_game_over(), Some(GameOutcome::Winner(PlayerId::First)));
        assert_eq!(session.player(PlayerId::First).score(), -4);
        assert_eq!(session.player(PlayerId::Second).score(), 0);
    }

    #[test]
    fn test_no_win_while_winner_must_capture() {
        // O is blocked but X has a capture pending
        let mut session = session_with(
            6,
            &[
                "......", //
                "......", //
                "......", //
                "......", //
                ".O....", //
                "X.X...", //
            ],
        );
        assert!(rules::legal_moves_for(session.board(), Side::O).is_empty());
        assert!(rules::must_capture(session.board(), Side::X));
        assert_eq!(session.is_game_over(), None);
    }

    #[test]
    fn test_mutual_stalemate_is_tie() {
        let mut session = session_with(
            6,
            &[
                ".X....", //
                "......", //
                "......", //
                "......", //
                "......", //
                "O.....", //
            ],
        );
        assert_eq!(session.is_game_over(), Some(GameOutcome::Tie));
    }

    #[test]
    fn test_forfeit_awards_absolute_difference() {
        // X: 2 kings + 2 men = 10, O: 3 kings + 2 men = 14
        let mut session = session_with(
            8,
            &[
                ".U.U.U..", //
                "O.O.....", //
                "........", //
                "........", //
                "........", //
                "........", //
                "X.X.....", //
                "K.K.....", //
            ],
        );
        assert_eq!(session.score(PlayerId::First), 10);
        assert_eq!(session.score(PlayerId::Second), 14);

        let winner = session.handle_forfeit(PlayerId::First);
        assert_eq!(winner, PlayerId::Second);
        assert_eq!(session.player(PlayerId::Second).score(), 4);
        assert!(session.is_forfeit());

        // Forfeiting the stronger side still awards a positive amount
        let winner = session.handle_forfeit(PlayerId::Second);
        assert_eq!(winner, PlayerId::First);
        assert_eq!(session.player(PlayerId::First).score(), 4);
        assert!(session.is_forfeit());
    }

    #[test]
    fn test_reset_keeps_scores() {
        let mut session = Session::new(8, "Alice", "Bob", false);
        assert_eq!(session.submit_move("Fa", "Eb"), MoveResult::Success);
        session.handle_forfeit(PlayerId::Second);
        let score = session.player(PlayerId::First).score();

        session.reset_game(6);
        assert_eq!(session.board(), &Board::new(6));
        assert_eq!(session.current_player_id(), PlayerId::First);
        assert!(!session.is_forfeit());
        assert_eq!(session.chain_state(), ChainState::Idle);
        assert_eq!(session.previous_move(), None);
        assert_eq!(session.last_move_summary(), None);
        assert_eq!(session.player(PlayerId::First).score(), score);
    }

    #[test]
    fn test_from_config() {
        let config = GameConfig {
            board_size: 10,
            player1_name: "Alice".to_string(),
            player2_name: String::new(),
            vs_computer: true,
            seed: Some(5),
            computer_delay_ms: 0,
        };
        let session = Session::from_config(&config).unwrap();
        assert_eq!(session.board().size(), 10);
        assert_eq!(session.player(PlayerId::Second).name(), COMPUTER_NAME);

        let bad = GameConfig {
            board_size: 9,
            ..config
        };
        assert!(Session::from_config(&bad).is_err());
    }

    #[test]
    fn test_random_games_keep_board_invariants() {
        fn side_totals(counts: &PieceCounts, side: Side) -> (usize, usize) {
            (counts.men(side) + counts.kings(side), counts.kings(side))
        }

        for seed in 0..30u64 {
            let size = VALID_BOARD_SIZES[seed as usize % VALID_BOARD_SIZES.len()];
            let mut session =
                Session::with_agent(size, "A", "B", true, Box::new(RandomAgent::with_seed(seed)));

            for _ in 0..400 {
                let legal = session.legal_moves();
                if legal.is_empty() {
                    break;
                }
                // Mandatory capture: never a mix of jumps and steps
                if legal.iter().any(Move::is_jump) {
                    assert!(legal.iter().all(Move::is_jump));
                }

                let side = session.current_player().side();
                let before = session.board().count_pieces();
                let result = session.submit_computer_move();
                assert!(result.is_played(), "seed {}: {:?}", seed, result);
                let after = session.board().count_pieces();

                // The mover keeps every piece and never loses a king
                let (mover_before, kings_before) = side_totals(&before, side);
                let (mover_after, kings_after) = side_totals(&after, side);
                assert_eq!(mover_before, mover_after);
                assert!(kings_after >= kings_before);

                let (opp_before, _) = side_totals(&before, side.other());
                let (opp_after, _) = side_totals(&after, side.other());
                assert!(opp_before - opp_after <= 1);

                let board = session.board();
                for row in 0..size as i32 {
                    for col in 0..size as i32 {
                        let cell = board.get(row, col);
                        if (row + col) % 2 == 0 {
                            assert_eq!(cell, Cell::Empty);
                        }
                    }
                }
                for col in 0..size as i32 {
                    assert_ne!(board.get(0, col), Cell::XMan);
                    assert_ne!(board.get(size as i32 - 1, col), Cell::OMan);
                }

                if result == MoveResult::Success && session.is_game_over().is_some() {
                    break;
                }
            }
        }
    }
}
