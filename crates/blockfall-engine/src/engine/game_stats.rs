use serde::Serialize;

/// Points awarded per placement, indexed by the number of rows it cleared.
const SCORE_TABLE: [usize; 5] = [0, 100, 300, 500, 800];

/// Running totals for a game session.
///
/// Placements that clear more than four rows at once (possible only on boards
/// built from fixtures) score and count as four-row clears.
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(0);
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.completed_pieces(), 2);
/// assert_eq!(stats.total_cleared_rows(), 4);
/// assert_eq!(stats.row_cleared_counter(), &[1, 0, 0, 0, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_rows: usize,
    row_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_rows: 0,
            row_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Number of pieces settled into the grid.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_rows(&self) -> usize {
        self.total_cleared_rows
    }

    /// Histogram of placements by rows cleared: `[0]` counts placements that
    /// cleared nothing, `[4]` counts four-row clears.
    #[must_use]
    pub const fn row_cleared_counter(&self) -> &[usize; 5] {
        &self.row_cleared_counter
    }

    /// Records one placement that cleared `cleared_rows` rows.
    pub fn complete_piece_drop(&mut self, cleared_rows: usize) {
        let bucket = cleared_rows.min(SCORE_TABLE.len() - 1);
        self.completed_pieces += 1;
        self.total_cleared_rows += cleared_rows;
        self.row_cleared_counter[bucket] += 1;
        self.score += SCORE_TABLE[bucket];
    }
}
