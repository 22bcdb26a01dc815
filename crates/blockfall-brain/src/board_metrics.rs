//! Heuristic inputs measured on a board.

use blockfall_engine::Board;
use serde::Serialize;

/// Measurements of a board that the linear evaluator weighs.
///
/// All values are taken from the settled cells; the falling piece is ignored.
///
/// ```
/// use blockfall_brain::BoardMetrics;
/// use blockfall_engine::Board;
///
/// let board = Board::from_ascii(
///     10,
///     "
///     T.........
///     .T......OO
///     ",
/// )
/// .unwrap();
/// let metrics = BoardMetrics::from_board(&board);
/// assert_eq!(metrics.height_sum, 5);
/// assert_eq!(metrics.holes, 1);
/// assert_eq!(metrics.bumpiness, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoardMetrics {
    /// Sum of all column heights.
    pub height_sum: usize,
    /// Rows removed by the last command.
    pub rows_cleared: usize,
    /// Empty cells strictly below the top settled cell of their column.
    pub holes: usize,
    /// Sum of height differences between adjacent columns.
    pub bumpiness: usize,
    pub max_height: usize,
}

impl BoardMetrics {
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        let heights = board.column_heights();
        Self {
            height_sum: heights.iter().sum(),
            rows_cleared: board.rows_cleared(),
            holes: count_holes(board),
            bumpiness: heights.windows(2).map(|w| w[0].abs_diff(w[1])).sum(),
            max_height: board.max_height(),
        }
    }
}

fn count_holes(board: &Board) -> usize {
    (0..board.width())
        .map(|x| {
            (0..board.column_height(x))
                .filter(|&y| board.grid(x, y).is_none())
                .count()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board() {
        let metrics = BoardMetrics::from_board(&Board::new(10, 20));
        assert_eq!(
            metrics,
            BoardMetrics {
                height_sum: 0,
                rows_cleared: 0,
                holes: 0,
                bumpiness: 0,
                max_height: 0,
            }
        );
    }

    #[test]
    fn test_stacked_holes_in_one_column() {
        let board = Board::from_ascii(
            8,
            "
            I...
            ....
            I...
            ....
            ",
        )
        .unwrap();
        let metrics = BoardMetrics::from_board(&board);
        assert_eq!(metrics.height_sum, 4);
        assert_eq!(metrics.holes, 2);
        assert_eq!(metrics.bumpiness, 4);
        assert_eq!(metrics.max_height, 4);
    }
}
