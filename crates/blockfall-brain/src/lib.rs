//! Heuristic move search for the blockfall board.
//!
//! The brain looks one piece ahead: it enumerates every board the falling piece
//! can settle into by lateral moves (per orientation), scores each board with a
//! [`PlacementEvaluator`], and answers with the first command on the way to the
//! best one.
//!
//! # Architecture
//!
//! ```text
//! Brain (orientation choice, one command per call)
//!     ↓ uses
//! Placement Search (lateral reach in the current orientation)
//!     ↓ uses
//! Placement Evaluator (score the resulting board)
//!     ↓ uses
//! Board Metrics (height sum, holes, bumpiness, cleared rows)
//! ```
//!
//! # Example
//!
//! ```
//! use blockfall_brain::{Brain, Coefficients};
//! use blockfall_engine::{Board, Piece, PieceKind};
//!
//! let mut board = Board::new(10, 20);
//! let origin = board.spawn_origin(PieceKind::O);
//! board.spawn(Piece::new(PieceKind::O), origin).unwrap();
//!
//! let brain = Brain::with_coefficients(Coefficients::default());
//! let action = brain.next_move(&board).unwrap();
//! board.apply(action);
//! ```

pub use self::{board_metrics::*, brain::*, placement_evaluator::*, placement_search::*};

pub mod board_metrics;
pub mod brain;
pub mod placement_evaluator;
pub mod placement_search;
