use crate::{
    TopOutError,
    core::{
        board::{Action, Board, MoveResult},
        piece::{Piece, PieceKind},
    },
};

use super::{
    game_stats::GameStats,
    piece_buffer::{PieceBuffer, PieceSeed},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// A board fed by a piece buffer, with statistics.
///
/// Every time the falling piece settles, the placement is recorded in
/// [`GameStats`] and the next piece is spawned at the board's spawn origin. The
/// session ends when a placement reaches above the board or when the next piece
/// cannot spawn.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Action, GameSession};
///
/// let mut session = GameSession::new(10, 20);
/// session.apply(Action::Drop).unwrap();
///
/// assert_eq!(session.stats().completed_pieces(), 1);
/// assert!(session.board().has_falling_piece());
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    piece_buffer: PieceBuffer,
    seed: PieceSeed,
    stats: GameStats,
    session_state: SessionState,
}

impl GameSession {
    /// Starts a session on an empty `width` x `height` board with a random seed.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`Board::new`].
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_seed(width, height, rand::random())
    }

    /// Like [`Self::new`], but with a fixed piece sequence.
    #[must_use]
    pub fn with_seed(width: usize, height: usize, seed: PieceSeed) -> Self {
        let mut this = Self {
            board: Board::new(width, height),
            piece_buffer: PieceBuffer::with_seed(seed),
            seed,
            stats: GameStats::new(),
            session_state: SessionState::Playing,
        };
        // A board too narrow for the first piece ends the session immediately.
        if let Err(err) = this.spawn_next() {
            tracing::debug!(%err, width, height, "session over before the first move");
        }
        this
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.seed
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    pub fn next_pieces(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.piece_buffer.next_pieces()
    }

    /// Draws the next piece and spawns it at the spawn origin.
    ///
    /// Any current falling piece is replaced. On collision the session is over.
    pub fn spawn_next(&mut self) -> Result<(), TopOutError> {
        let kind = self.piece_buffer.pop_next();
        let origin = self.board.spawn_origin(kind);
        self.board.spawn(Piece::new(kind), origin).map_err(|e| {
            self.session_state = SessionState::GameOver;
            TopOutError::NewPieceCollision(e)
        })
    }

    /// Applies `action` to the falling piece.
    ///
    /// When the command settles the piece, the placement is counted and the next
    /// piece spawns. Once the session is over there is no falling piece, so every
    /// command reports [`MoveResult::NoPiece`].
    pub fn apply(&mut self, action: Action) -> Result<MoveResult, TopOutError> {
        let result = self.board.apply(action);
        if result.is_place() {
            self.stats.complete_piece_drop(self.board.rows_cleared());
            if self.board.is_topped_out() {
                self.session_state = SessionState::GameOver;
                return Err(TopOutError::LockedAboveBoard);
            }
            self.spawn_next()?;
        }
        Ok(result)
    }
}
