//! Move selection across all four orientations.

use blockfall_engine::{Action, Board, GameSession, GameStats, MoveResult};

use crate::{
    placement_evaluator::{Coefficients, LinearEvaluator, PlacementEvaluator},
    placement_search::{REJECTION_FLOOR, best_placement},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("no falling piece to search placements for")]
pub struct NoActivePieceError;

/// Chooses the next command for the falling piece.
///
/// [`Brain::next_move`] runs the single-orientation search for each of the four
/// orientations on a probe copy of the board, rotating the probe clockwise between
/// trials. If the best orientation needs rotating, the answer is a single
/// [`Action::Clockwise`] and the caller asks again once it has been applied.
///
/// # Example
///
/// ```
/// use blockfall_brain::Brain;
/// use blockfall_engine::GameSession;
///
/// let brain = Brain::default();
/// let mut session = GameSession::new(10, 20);
/// let stats = brain.play_session(&mut session, Some(10));
/// assert_eq!(stats.completed_pieces(), 10);
/// ```
#[derive(Debug)]
pub struct Brain<'a> {
    evaluator: Box<dyn PlacementEvaluator + 'a>,
}

impl Default for Brain<'_> {
    fn default() -> Self {
        Self::with_coefficients(Coefficients::default())
    }
}

impl<'a> Brain<'a> {
    #[must_use]
    pub fn new(evaluator: Box<dyn PlacementEvaluator + 'a>) -> Self {
        Self { evaluator }
    }

    /// Brain scoring boards with [`LinearEvaluator`].
    #[must_use]
    pub fn with_coefficients(coefficients: Coefficients) -> Self {
        Self::new(Box::new(LinearEvaluator::new(coefficients)))
    }

    /// Returns the next command to apply to `board`'s falling piece.
    ///
    /// Orientations are compared with strict `>` from the rejection floor, so the
    /// current orientation wins ties and is kept when every board is rejected.
    /// `board` itself is never modified.
    pub fn next_move(&self, board: &Board) -> Result<Action, NoActivePieceError> {
        if !board.has_falling_piece() {
            return Err(NoActivePieceError);
        }

        let mut probe = board.clone();
        let mut choice = None;
        let mut best_score = REJECTION_FLOOR;
        for rotations in 0..4 {
            let Some(found) = best_placement(&probe, &*self.evaluator) else {
                break;
            };
            let first_action = found.candidate.first_action;
            if choice.is_none() {
                choice = Some((rotations, first_action));
            }
            if found.score > best_score {
                best_score = found.score;
                choice = Some((rotations, first_action));
            }
            // A refused rotation leaves the probe as it was, so later trials
            // would only repeat this one.
            if rotations < 3 && probe.apply(Action::Clockwise) != MoveResult::Success {
                break;
            }
        }

        let (rotations, first_action) = choice.ok_or(NoActivePieceError)?;
        let action = if rotations > 0 {
            Action::Clockwise
        } else {
            first_action
        };
        tracing::debug!(rotations, score = best_score, %action, "chose move");
        Ok(action)
    }

    /// Plays `session` until the game is over or `max_pieces` pieces have settled.
    ///
    /// A piece that has not settled after `4 * (width + 4)` commands is dropped
    /// where it is.
    pub fn play_session<'s>(
        &self,
        session: &'s mut GameSession,
        max_pieces: Option<usize>,
    ) -> &'s GameStats {
        let stall_limit = 4 * (session.board().width() + 4);
        let mut steps = 0;
        while session.session_state().is_playing() {
            if max_pieces.is_some_and(|max| session.stats().completed_pieces() >= max) {
                break;
            }
            let action = match self.next_move(session.board()) {
                Ok(action) if steps < stall_limit => action,
                Ok(_) => {
                    tracing::debug!(steps, "piece stalled, dropping in place");
                    Action::Drop
                }
                Err(NoActivePieceError) => break,
            };
            match session.apply(action) {
                Ok(MoveResult::Place) => {
                    steps = 0;
                    tracing::debug!(
                        pieces = session.stats().completed_pieces(),
                        rows = session.board().rows_cleared(),
                        "piece settled"
                    );
                }
                Ok(_) => steps += 1,
                Err(e) => {
                    tracing::debug!(%e, pieces = session.stats().completed_pieces(), "game over");
                    break;
                }
            }
        }
        session.stats()
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{Piece, PieceKind, PieceSeed};

    use super::*;

    fn gap_board() -> Board {
        // Only column 0 of the bottom row is empty.
        let mut board = Board::from_ascii(20, ".IIIIIIIII").unwrap();
        let origin = board.spawn_origin(PieceKind::I);
        board.spawn(Piece::new(PieceKind::I), origin).unwrap();
        board
    }

    #[test]
    fn test_no_piece() {
        let brain = Brain::default();
        assert_eq!(
            brain.next_move(&Board::new(10, 20)),
            Err(NoActivePieceError)
        );
    }

    #[test]
    fn test_rotates_one_step_at_a_time() {
        let brain = Brain::default();
        let mut board = gap_board();
        let before = board.clone();

        assert_eq!(brain.next_move(&board), Ok(Action::Clockwise));
        assert_eq!(board, before);
        assert_eq!(board.last_action(), None);

        board.apply(Action::Clockwise);
        assert_eq!(brain.next_move(&board), Ok(Action::Left));
    }

    #[test]
    fn test_following_the_brain_fills_the_gap() {
        let brain = Brain::default();
        let mut board = gap_board();
        let mut result = MoveResult::Success;
        for _ in 0..20 {
            result = board.apply(brain.next_move(&board).unwrap());
            if result.is_place() {
                break;
            }
        }
        assert_eq!(result, MoveResult::Place);
        assert_eq!(board.rows_cleared(), 1);
        assert_eq!(board.column_height(0), 3);
        assert_eq!(board.max_height(), 3);
    }

    #[test]
    fn test_custom_evaluator() {
        #[derive(Debug)]
        struct Rejecting;

        impl PlacementEvaluator for Rejecting {
            fn evaluate(&self, _board: &Board) -> f64 {
                -1.0
            }
        }

        let brain = Brain::new(Box::new(Rejecting));
        assert_eq!(brain.next_move(&gap_board()), Ok(Action::Drop));
    }

    #[test]
    fn test_play_session_respects_piece_limit() {
        let seed: PieceSeed = "5eed5eed5eed5eed5eed5eed5eed5eed".parse().unwrap();
        let brain = Brain::default();

        let mut session = GameSession::with_seed(10, 20, seed);
        assert_eq!(brain.play_session(&mut session, Some(0)).completed_pieces(), 0);

        let stats = brain.play_session(&mut session, Some(40)).clone();
        assert_eq!(stats.completed_pieces(), 40);
        assert!(session.session_state().is_playing());

        let mut replay = GameSession::with_seed(10, 20, seed);
        assert_eq!(brain.play_session(&mut replay, Some(40)), &stats);
        assert_eq!(replay.board(), session.board());
    }
}
