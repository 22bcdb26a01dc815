pub use self::{ascii::*, board::*, piece::*, point::*, rotation::*};

pub(crate) mod ascii;
pub(crate) mod board;
pub(crate) mod piece;
pub(crate) mod point;
pub(crate) mod rotation;
