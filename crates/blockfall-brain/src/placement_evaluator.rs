//! Scoring of candidate boards.
//!
//! A placement is judged by the board it leaves behind. [`score`] is a linear
//! combination of [`BoardMetrics`] plus a constant offset, with a hard reject for
//! boards whose stack comes within [`HEIGHT_MARGIN`] rows of the top:
//!
//! ```text
//! height_sum·c0 + rows_cleared·c1 + holes·c2 + bumpiness·c3 + SCORE_OFFSET
//! ```
//!
//! The offset keeps every accepted score above the search's rejection floor of
//! `0.0`, so only rejected boards fall below it.

use std::fmt;

use blockfall_engine::Board;
use serde::{Deserialize, Serialize};

use crate::board_metrics::BoardMetrics;

/// Score given to boards whose stack is too close to the top.
pub const REJECT_SCORE: f64 = -10_000.0;

/// Bias added to every accepted score.
pub const SCORE_OFFSET: f64 = 100_000.0;

/// Boards with `max_height > height - HEIGHT_MARGIN` are rejected.
pub const HEIGHT_MARGIN: usize = 4;

/// Assigns a score to the board left by a candidate placement. Higher is better.
pub trait PlacementEvaluator: fmt::Debug + Send + Sync {
    fn evaluate(&self, board: &Board) -> f64;
}

/// Weights of the linear evaluator.
///
/// Height, holes and bumpiness are usually weighted negatively and cleared rows
/// positively, but any sign is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Coefficients {
    pub height_sum: f64,
    pub rows_cleared: f64,
    pub holes: f64,
    pub bumpiness: f64,
}

impl Default for Coefficients {
    fn default() -> Self {
        Self {
            height_sum: -0.510_066,
            rows_cleared: 0.760_666,
            holes: -0.356_63,
            bumpiness: -0.184_483,
        }
    }
}

impl From<[f64; 4]> for Coefficients {
    fn from([height_sum, rows_cleared, holes, bumpiness]: [f64; 4]) -> Self {
        Self {
            height_sum,
            rows_cleared,
            holes,
            bumpiness,
        }
    }
}

#[expect(clippy::cast_precision_loss)]
fn weighted(coefficient: f64, value: usize) -> f64 {
    coefficient * value as f64
}

/// Scores `board` with the linear heuristic.
///
/// # Example
///
/// ```
/// use blockfall_brain::{Coefficients, REJECT_SCORE, SCORE_OFFSET, score};
/// use blockfall_engine::Board;
///
/// let coefficients = Coefficients::default();
/// assert_eq!(score(&Board::new(10, 20), &coefficients), SCORE_OFFSET);
///
/// let tall = Board::from_ascii(5, "O...\nO...").unwrap();
/// assert_eq!(score(&tall, &coefficients), REJECT_SCORE);
/// ```
#[must_use]
pub fn score(board: &Board, coefficients: &Coefficients) -> f64 {
    if board.max_height() + HEIGHT_MARGIN > board.height() {
        return REJECT_SCORE;
    }
    let metrics = BoardMetrics::from_board(board);
    weighted(coefficients.height_sum, metrics.height_sum)
        + weighted(coefficients.rows_cleared, metrics.rows_cleared)
        + weighted(coefficients.holes, metrics.holes)
        + weighted(coefficients.bumpiness, metrics.bumpiness)
        + SCORE_OFFSET
}

/// [`PlacementEvaluator`] backed by [`score`].
#[derive(Debug, Clone, Default)]
pub struct LinearEvaluator {
    coefficients: Coefficients,
}

impl LinearEvaluator {
    #[must_use]
    pub fn new(coefficients: Coefficients) -> Self {
        Self { coefficients }
    }

    #[must_use]
    pub fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }
}

impl PlacementEvaluator for LinearEvaluator {
    fn evaluate(&self, board: &Board) -> f64 {
        score(board, &self.coefficients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Column 0 three cells tall, no holes.
    fn tall_board() -> Board {
        Board::from_ascii(20, "J.........\nJ.........\nJ.........").unwrap()
    }

    // Column 0 two cells tall, hole at the bottom.
    fn holey_board() -> Board {
        Board::from_ascii(20, "J.........\n..........").unwrap()
    }

    #[test]
    fn test_exact_linear_score() {
        let coefficients = Coefficients::from([1.0, 2.0, 3.0, 4.0]);
        // height_sum 2, holes 1, bumpiness 2
        assert_eq!(score(&holey_board(), &coefficients), 100_013.0);
    }

    #[test]
    fn test_ranking_follows_coefficient_signs() {
        let hates_holes = Coefficients::from([-1.0, 0.0, -10.0, 0.0]);
        assert!(score(&tall_board(), &hates_holes) > score(&holey_board(), &hates_holes));

        let hates_height = Coefficients::from([-10.0, 0.0, -1.0, 0.0]);
        assert!(score(&holey_board(), &hates_height) > score(&tall_board(), &hates_height));
    }

    #[test]
    fn test_height_guard() {
        let mut art = String::new();
        for _ in 0..16 {
            art.push_str("IIIIIIIII.\n");
        }
        let legal = Board::from_ascii(20, &art).unwrap();
        assert_eq!(legal.max_height(), 16);

        art.insert_str(0, "I.........\n");
        let rejected = Board::from_ascii(20, &art).unwrap();
        assert_eq!(rejected.max_height(), 17);

        let coefficients = Coefficients::default();
        assert_eq!(score(&rejected, &coefficients), REJECT_SCORE);
        assert!(score(&legal, &coefficients) > 0.0);
        assert!(score(&legal, &coefficients) > score(&rejected, &coefficients));
    }

    #[test]
    fn test_rows_cleared_are_rewarded() {
        use blockfall_engine::{Action, Piece, PieceKind, Point};

        let mut board = Board::from_ascii(20, "III.IIIIII").unwrap();
        let vertical = Piece::new(PieceKind::I).rotated_clockwise();
        board.spawn(vertical, Point::new(1, 10)).unwrap();
        board.apply(Action::Drop);
        assert_eq!(board.rows_cleared(), 1);

        let coefficients = Coefficients::from([0.0, 5.0, 0.0, 0.0]);
        assert_eq!(score(&board, &coefficients), SCORE_OFFSET + 5.0);
    }

    #[test]
    fn test_evaluator_delegates_to_score() {
        let evaluator = LinearEvaluator::new(Coefficients::from([1.0, 2.0, 3.0, 4.0]));
        assert_eq!(evaluator.evaluate(&holey_board()), 100_013.0);
        assert_eq!(
            LinearEvaluator::default().coefficients(),
            &Coefficients::default()
        );
    }

    #[test]
    fn test_coefficients_json() {
        let json = r#"{"height_sum":-1.0,"rows_cleared":2.0,"holes":-3.0,"bumpiness":-4.0}"#;
        let coefficients: Coefficients = serde_json::from_str(json).unwrap();
        assert_eq!(coefficients, Coefficients::from([-1.0, 2.0, -3.0, -4.0]));
    }
}
