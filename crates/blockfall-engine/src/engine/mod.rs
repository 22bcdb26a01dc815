//! Game sessions built on top of the board.
//!
//! - [`GameSession`] - Board plus piece supply plus statistics, one placement at a time
//! - [`GameStats`] - Score, settled pieces and row-clear histogram
//! - [`PieceBuffer`] - 7-bag piece generation system
//! - [`PieceSeed`] - Seed for deterministic piece generation
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`]; the first piece spawns at the top centre
//! 2. Apply [`Action`](crate::Action)s to the falling piece
//! 3. When the piece settles, full rows are cleared and the next piece spawns
//! 4. Repeat until the next piece cannot spawn

pub use self::{game_session::*, game_stats::*, piece_buffer::*};

mod game_session;
mod game_stats;
mod piece_buffer;
