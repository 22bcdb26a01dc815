//! Board state machine for a falling-block puzzle game.
//!
//! - [`core`] - Geometry, piece shapes, rotation with wall kicks and the [`Board`]
//! - [`engine`] - Piece supply, statistics and multi-piece [`GameSession`]s
//!
//! Coordinates point up: `(0, 0)` is the bottom-left cell of the board.
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Action, Board, MoveResult, Piece, PieceKind};
//!
//! let mut board = Board::new(10, 20);
//! let origin = board.spawn_origin(PieceKind::T);
//! board.spawn(Piece::new(PieceKind::T), origin).unwrap();
//!
//! assert_eq!(board.apply(Action::Left), MoveResult::Success);
//! assert_eq!(board.apply(Action::Drop), MoveResult::Place);
//! assert_eq!(board.max_height(), 2);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece colliding when spawning falling piece")]
pub struct PieceCollisionError;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum TopOutError {
    #[display("piece settled above the top of the board")]
    LockedAboveBoard,
    #[display("next piece colliding at spawn")]
    NewPieceCollision(PieceCollisionError),
}
