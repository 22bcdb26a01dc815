use std::fmt;

/// Integer grid coordinate or offset.
///
/// The board uses a y-up coordinate system: `(0, 0)` is the bottom-left cell,
/// x grows to the right and y grows upward. The same type is used for piece cell
/// offsets inside a bounding box, piece origins and wall-kick offsets, so origins
/// may legitimately be negative (an I piece lying on the floor has its origin two
/// rows below the board).
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Add,
    derive_more::Sub,
    derive_more::AddAssign,
)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Self = Self::new(0, 0);

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn left(self) -> Self {
        Self::new(self.x - 1, self.y)
    }

    #[must_use]
    pub const fn right(self) -> Self {
        Self::new(self.x + 1, self.y)
    }

    #[must_use]
    pub const fn down(self) -> Self {
        Self::new(self.x, self.y - 1)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
