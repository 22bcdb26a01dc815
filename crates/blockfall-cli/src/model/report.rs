use std::fmt;

use blockfall_brain::{BoardMetrics, HEIGHT_MARGIN};
use blockfall_engine::{Board, GameSession, GameStats, PieceSeed};
use serde::Serialize;

/// Outcome of an `auto-play` run.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub model: String,
    pub width: usize,
    pub height: usize,
    pub seed: PieceSeed,
    pub game_over: bool,
    pub stats: GameStats,
    /// Final board, top row first.
    pub board: Vec<String>,
}

impl SessionReport {
    pub fn new(model: &str, session: &GameSession) -> Self {
        let board = session.board();
        Self {
            model: model.to_owned(),
            width: board.width(),
            height: board.height(),
            seed: session.seed(),
            game_over: session.session_state().is_game_over(),
            stats: session.stats().clone(),
            board: board_rows(board),
        }
    }
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.board {
            writeln!(f, "{row}")?;
        }
        writeln!(f)?;
        writeln!(f, "model:      {}", self.model)?;
        writeln!(f, "board:      {}x{}", self.width, self.height)?;
        writeln!(f, "seed:       {}", self.seed)?;
        let state = if self.game_over { "game over" } else { "stopped" };
        writeln!(f, "state:      {state}")?;
        writeln!(f, "pieces:     {}", self.stats.completed_pieces())?;
        writeln!(f, "rows:       {}", self.stats.total_cleared_rows())?;
        writeln!(f, "score:      {}", self.stats.score())?;
        let [zero, single, double, triple, quad] = self.stats.row_cleared_counter();
        write!(
            f,
            "clears:     0:{zero} 1:{single} 2:{double} 3:{triple} 4:{quad}"
        )
    }
}

/// Outcome of an `evaluate` run.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub metrics: BoardMetrics,
    pub score: f64,
    pub rejected: bool,
}

impl EvaluationReport {
    pub fn new(board: &Board, score: f64) -> Self {
        Self {
            metrics: BoardMetrics::from_board(board),
            score,
            rejected: board.max_height() + HEIGHT_MARGIN > board.height(),
        }
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let BoardMetrics {
            height_sum,
            rows_cleared,
            holes,
            bumpiness,
            max_height,
        } = self.metrics;
        writeln!(f, "height sum:   {height_sum}")?;
        writeln!(f, "max height:   {max_height}")?;
        writeln!(f, "rows cleared: {rows_cleared}")?;
        writeln!(f, "holes:        {holes}")?;
        writeln!(f, "bumpiness:    {bumpiness}")?;
        write!(f, "score:        {}", self.score)?;
        if self.rejected {
            write!(f, " (rejected: stack too close to the top)")?;
        }
        Ok(())
    }
}

fn board_rows(board: &Board) -> Vec<String> {
    board.to_string().lines().map(str::to_owned).collect()
}
