//! Single-orientation placement search.
//!
//! For the falling piece's current rotation, the candidates are, in order:
//!
//! 1. dropping in place (first action [`Action::Drop`])
//! 2. every column reachable by repeated [`Action::Left`], dropped there
//! 3. every column reachable by repeated [`Action::Right`], dropped there
//!
//! Each candidate records the board after the drop and the first action on the
//! path to it. Dropping in place is always enumerable, so the candidate list is
//! never empty while a piece is falling.

use blockfall_engine::{Action, Board, MoveResult};

use crate::placement_evaluator::PlacementEvaluator;

/// Scores at or below this value are never preferred over the first candidate.
pub const REJECTION_FLOOR: f64 = 0.0;

/// A reachable final board and the first action towards it.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub board: Board,
    pub first_action: Action,
}

/// The winning candidate of a search together with its score.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    /// Score of the winning board, or [`REJECTION_FLOOR`] if no board beat it.
    pub score: f64,
}

/// Lists every drop reachable by lateral moves in the current rotation.
///
/// Returns an empty list when `board` has no falling piece.
#[must_use]
pub fn enumerate_placements(board: &Board) -> Vec<Candidate> {
    if !board.has_falling_piece() {
        return Vec::new();
    }

    let mut candidates = vec![Candidate {
        board: board.test_move(Action::Drop),
        first_action: Action::Drop,
    }];
    for direction in [Action::Left, Action::Right] {
        let mut probe = board.test_move(direction);
        while probe.last_result() == Some(MoveResult::Success) {
            candidates.push(Candidate {
                board: probe.test_move(Action::Drop),
                first_action: direction,
            });
            probe.apply(direction);
        }
    }
    candidates
}

/// Picks the best candidate for the current rotation.
///
/// Scores are compared with strict `>` starting from [`REJECTION_FLOOR`], so ties
/// go to the candidate found first and, if nothing beats the floor, dropping in
/// place wins. Returns `None` only when there is no falling piece.
#[must_use]
pub fn best_placement(board: &Board, evaluator: &dyn PlacementEvaluator) -> Option<ScoredCandidate> {
    let candidates = enumerate_placements(board);
    let mut best_index = 0;
    let mut best_score = REJECTION_FLOOR;
    for (i, candidate) in candidates.iter().enumerate() {
        let score = evaluator.evaluate(&candidate.board);
        if score > best_score {
            best_index = i;
            best_score = score;
        }
    }
    let candidate = candidates.into_iter().nth(best_index)?;
    Some(ScoredCandidate {
        candidate,
        score: best_score,
    })
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{Piece, PieceKind, Point};

    use super::*;
    use crate::placement_evaluator::{Coefficients, LinearEvaluator};

    fn board_with(piece: Piece, origin: Point, art: Option<&str>) -> Board {
        let mut board = match art {
            Some(art) => Board::from_ascii(20, art).unwrap(),
            None => Board::new(10, 20),
        };
        board.spawn(piece, origin).unwrap();
        board
    }

    #[derive(Debug)]
    struct Constant(f64);

    impl PlacementEvaluator for Constant {
        fn evaluate(&self, _board: &Board) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_enumerates_every_column_once() {
        let board = board_with(Piece::new(PieceKind::O), Point::new(4, 18), None);
        let candidates = enumerate_placements(&board);
        // O is two wide: origins 0..=8 on a 10 wide board.
        assert_eq!(candidates.len(), 9);

        let actions: Vec<_> = candidates.iter().map(|c| c.first_action).collect();
        assert_eq!(actions[0], Action::Drop);
        assert!(actions[1..5].iter().all(|a| *a == Action::Left));
        assert!(actions[5..].iter().all(|a| *a == Action::Right));

        for candidate in &candidates {
            assert!(!candidate.board.has_falling_piece());
            assert_eq!(candidate.board.last_result(), Some(MoveResult::Place));
        }
        // Drop in place leaves the O in columns 4 and 5.
        assert_eq!(candidates[0].board.column_height(4), 2);
        // The last left candidate reaches the wall.
        assert_eq!(candidates[4].board.column_height(0), 2);
        assert_eq!(candidates[8].board.column_height(9), 2);
    }

    #[test]
    fn test_search_leaves_board_untouched() {
        let board = board_with(Piece::new(PieceKind::T), Point::new(3, 17), None);
        let before = board.clone();
        let _ = best_placement(&board, &LinearEvaluator::default());
        assert_eq!(board, before);
        assert_eq!(board.last_action(), None);
    }

    #[test]
    fn test_no_piece() {
        let board = Board::new(10, 20);
        assert!(enumerate_placements(&board).is_empty());
        assert!(best_placement(&board, &LinearEvaluator::default()).is_none());
    }

    #[test]
    fn test_ties_go_to_first_found() {
        let board = board_with(Piece::new(PieceKind::O), Point::new(4, 18), None);
        let best = best_placement(&board, &Constant(5.0)).unwrap();
        assert_eq!(best.candidate.first_action, Action::Drop);
        assert_eq!(best.score, 5.0);
    }

    #[test]
    fn test_rejected_everywhere_drops_in_place() {
        let board = board_with(Piece::new(PieceKind::O), Point::new(4, 18), None);
        let best = best_placement(&board, &Constant(-1.0)).unwrap();
        assert_eq!(best.candidate.first_action, Action::Drop);
        assert_eq!(best.score, REJECTION_FLOOR);
    }

    #[test]
    fn test_prefers_filling_the_gap() {
        // Vertical I above column 5; the only gap in the bottom row is column 0.
        let vertical = Piece::new(PieceKind::I).rotated_clockwise();
        let board = board_with(vertical, Point::new(3, 16), Some(".IIIIIIIII"));
        let best = best_placement(&board, &LinearEvaluator::new(Coefficients::default())).unwrap();
        assert_eq!(best.candidate.first_action, Action::Left);
        assert_eq!(best.candidate.board.rows_cleared(), 1);
        assert_eq!(best.candidate.board.column_height(0), 3);
    }
}
