use serde::{Deserialize, Serialize};

use super::{
    point::Point,
    rotation::{RotationDirection, RotationRule},
};

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece (stick).
    I = 0,
    /// O-piece (square).
    O = 1,
    /// S-piece.
    S = 2,
    /// Z-piece.
    Z = 3,
    /// J-piece.
    J = 4,
    /// L-piece.
    L = 5,
    /// T-piece.
    T = 6,
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
        PieceKind::T,
    ];

    /// Side length of the square bounding box the piece rotates in.
    #[must_use]
    pub const fn box_size(self) -> usize {
        match self {
            PieceKind::I => 4,
            PieceKind::O => 2,
            PieceKind::S | PieceKind::Z | PieceKind::J | PieceKind::L | PieceKind::T => 3,
        }
    }

    /// Cell transform used to rotate this kind inside its bounding box.
    #[must_use]
    pub const fn rotation_rule(self) -> RotationRule {
        match self {
            PieceKind::I => RotationRule::new(3),
            PieceKind::O => RotationRule::new(1),
            PieceKind::S | PieceKind::Z | PieceKind::J | PieceKind::L | PieceKind::T => {
                RotationRule::new(2)
            }
        }
    }

    /// Shape of this kind in the given rotation state.
    #[must_use]
    pub const fn shape(self, rotation: PieceRotation) -> &'static PieceShape {
        &PIECE_SHAPES[self as usize][rotation.as_usize()]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::T => 'T',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('I'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'T' => Some(PieceKind::T),
            _ => None,
        }
    }
}

/// Rotation state of a piece.
///
/// - `0`: spawn orientation
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 270° clockwise (90° counterclockwise)
///
/// Rotation operations wrap around modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceRotation(u8);

impl PieceRotation {
    /// Returns the rotation state `n`, or `None` if `n > 3`.
    #[must_use]
    pub const fn new(n: u8) -> Option<Self> {
        if n < 4 { Some(Self(n)) } else { None }
    }

    #[must_use]
    pub const fn rotated_right(self) -> Self {
        PieceRotation((self.0 + 1) % 4)
    }

    #[must_use]
    pub const fn rotated_left(self) -> Self {
        PieceRotation((self.0 + 3) % 4)
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    pub(crate) const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// One rotation state of a piece kind.
///
/// Holds the four occupied cells as offsets inside the bounding box and the
/// piece's *skirt*: for every column of the bounding box, the offset of the
/// lowest occupied cell (or `None` when this rotation leaves the column empty).
/// The skirt is what the board consults to decide whether a piece can move down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceShape {
    cells: [Point; 4],
    skirt: [Option<i32>; 4],
    size: usize,
}

impl PieceShape {
    const fn new(size: usize, cells: [Point; 4]) -> Self {
        let mut skirt = [None; 4];
        let mut i = 0;
        while i < cells.len() {
            let Point { x, y } = cells[i];
            assert!(x >= 0 && y >= 0);
            #[expect(clippy::cast_sign_loss)]
            let column = x as usize;
            assert!(column < size);
            skirt[column] = match skirt[column] {
                Some(lowest) if lowest <= y => Some(lowest),
                _ => Some(y),
            };
            i += 1;
        }
        Self { cells, skirt, size }
    }

    /// Occupied cells, relative to the bottom-left corner of the bounding box.
    #[must_use]
    pub const fn cells(&self) -> &[Point; 4] {
        &self.cells
    }

    /// Lowest occupied row per bounding-box column; the length equals [`Self::size`].
    #[must_use]
    pub fn skirt(&self) -> &[Option<i32>] {
        &self.skirt[..self.size]
    }

    /// Offsets of the lowest cell in every non-empty column.
    pub fn skirt_cells(&self) -> impl Iterator<Item = Point> + '_ {
        (0..)
            .zip(self.skirt())
            .filter_map(|(x, lowest)| lowest.map(|y| Point::new(x, y)))
    }

    /// Side length of the bounding box.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }
}

const fn shape_rotations(kind: PieceKind, spawn: [(i32, i32); 4]) -> [PieceShape; 4] {
    let size = kind.box_size();
    let rule = kind.rotation_rule();
    let mut cells = [Point::ZERO; 4];
    let mut i = 0;
    while i < 4 {
        cells[i] = Point::new(spawn[i].0, spawn[i].1);
        i += 1;
    }

    let mut shapes = [PieceShape::new(size, cells); 4];
    let mut r = 1;
    while r < 4 {
        let mut i = 0;
        while i < 4 {
            cells[i] = rule.clockwise(cells[i]);
            i += 1;
        }
        shapes[r] = PieceShape::new(size, cells);
        r += 1;
    }
    shapes
}

// Spawn shapes, y up, indexed like `PieceKind`.
const PIECE_SHAPES: [[PieceShape; 4]; PieceKind::LEN] = [
    shape_rotations(PieceKind::I, [(0, 2), (1, 2), (2, 2), (3, 2)]),
    shape_rotations(PieceKind::O, [(0, 0), (0, 1), (1, 0), (1, 1)]),
    shape_rotations(PieceKind::S, [(0, 1), (1, 1), (1, 2), (2, 2)]),
    shape_rotations(PieceKind::Z, [(0, 2), (1, 2), (1, 1), (2, 1)]),
    shape_rotations(PieceKind::J, [(0, 1), (1, 1), (2, 1), (0, 2)]),
    shape_rotations(PieceKind::L, [(0, 1), (1, 1), (2, 1), (2, 2)]),
    shape_rotations(PieceKind::T, [(0, 1), (1, 1), (2, 1), (1, 2)]),
];

/// A piece kind in a specific rotation state.
///
/// Pieces are immutable values: rotating returns a new `Piece`. Cells and skirt
/// come from a table computed at compile time, so every operation is O(1).
/// The piece carries no position; the board tracks the origin of the falling piece.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, PieceKind};
///
/// let piece = Piece::new(PieceKind::T);
/// let rotated = piece.rotated_clockwise();
/// assert_eq!(rotated.rotation().value(), 1);
/// assert_eq!(rotated.rotated_counterclockwise(), piece);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    rotation: PieceRotation,
}

impl Piece {
    /// Creates a piece of the given kind in its spawn orientation.
    #[must_use]
    pub const fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: PieceRotation(0),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub const fn shape(&self) -> &'static PieceShape {
        self.kind.shape(self.rotation)
    }

    #[must_use]
    pub const fn cells(&self) -> &'static [Point; 4] {
        self.shape().cells()
    }

    #[must_use]
    pub fn skirt(&self) -> &'static [Option<i32>] {
        self.shape().skirt()
    }

    /// Bounding-box width (equal to its height).
    #[must_use]
    pub const fn width(&self) -> usize {
        self.kind.box_size()
    }

    /// Absolute board positions of the piece's cells when its origin is at `origin`.
    pub fn occupied_positions(&self, origin: Point) -> impl Iterator<Item = Point> + use<> {
        self.cells().iter().map(move |&cell| origin + cell)
    }

    #[must_use]
    pub const fn rotated_clockwise(&self) -> Self {
        Self {
            kind: self.kind,
            rotation: self.rotation.rotated_right(),
        }
    }

    #[must_use]
    pub const fn rotated_counterclockwise(&self) -> Self {
        Self {
            kind: self.kind,
            rotation: self.rotation.rotated_left(),
        }
    }

    #[must_use]
    pub const fn rotated(&self, direction: RotationDirection) -> Self {
        match direction {
            RotationDirection::Clockwise => self.rotated_clockwise(),
            RotationDirection::CounterClockwise => self.rotated_counterclockwise(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn cell_set(piece: Piece) -> BTreeSet<(i32, i32)> {
        piece.cells().iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn test_rotation_round_trip() {
        for kind in PieceKind::ALL {
            let mut piece = Piece::new(kind);
            for _ in 0..4 {
                assert_eq!(piece.rotated_clockwise().rotated_counterclockwise(), piece);
                assert_eq!(piece.rotated_counterclockwise().rotated_clockwise(), piece);
                let expected = (*piece.cells()).map(|p| kind.rotation_rule().clockwise(p));
                assert_eq!(*piece.rotated_clockwise().cells(), expected);
                piece = piece.rotated_clockwise();
            }
            assert_eq!(piece, Piece::new(kind));
        }
    }

    #[test]
    fn test_counterclockwise_table_matches_rule() {
        for kind in PieceKind::ALL {
            let rule = kind.rotation_rule();
            let mut piece = Piece::new(kind);
            for _ in 0..4 {
                let rotated = piece.rotated_counterclockwise();
                assert_eq!(
                    cell_set(rotated),
                    piece
                        .cells()
                        .iter()
                        .map(|&p| rule.counterclockwise(p))
                        .map(|p| (p.x, p.y))
                        .collect()
                );
                piece = rotated;
            }
        }
    }

    #[test]
    fn test_rotation_state_cycles() {
        let piece = Piece::new(PieceKind::O);
        assert_eq!(piece.rotated_clockwise().rotation().value(), 1);
        assert_eq!(piece.rotated_counterclockwise().rotation().value(), 3);
        // The square keeps its footprint, but the state still advances.
        assert_eq!(cell_set(piece), cell_set(piece.rotated_clockwise()));
        assert_ne!(piece, piece.rotated_clockwise());
    }

    #[test]
    fn test_cells_stay_in_bounding_box() {
        for kind in PieceKind::ALL {
            let size = i32::try_from(kind.box_size()).unwrap();
            let mut piece = Piece::new(kind);
            for _ in 0..4 {
                assert_eq!(cell_set(piece).len(), 4);
                for p in piece.cells() {
                    assert!((0..size).contains(&p.x) && (0..size).contains(&p.y));
                }
                piece = piece.rotated_clockwise();
            }
        }
    }

    #[test]
    fn test_skirt() {
        let i = Piece::new(PieceKind::I);
        assert_eq!(i.skirt(), &[Some(2), Some(2), Some(2), Some(2)]);
        let vertical = i.rotated_clockwise();
        assert_eq!(vertical.skirt(), &[None, None, Some(0), None]);

        let t = Piece::new(PieceKind::T);
        assert_eq!(t.skirt(), &[Some(1), Some(1), Some(1)]);
        // T pointing right: stem in column 1, nub in column 2.
        assert_eq!(t.rotated_clockwise().skirt(), &[None, Some(0), Some(1)]);

        let s = Piece::new(PieceKind::S);
        assert_eq!(s.skirt(), &[Some(1), Some(1), Some(2)]);

        let o = Piece::new(PieceKind::O);
        assert_eq!(o.skirt(), &[Some(0), Some(0)]);
    }

    #[test]
    fn test_skirt_cells() {
        let vertical = Piece::new(PieceKind::I).rotated_clockwise();
        let cells: Vec<_> = vertical.shape().skirt_cells().collect();
        assert_eq!(cells, vec![Point::new(2, 0)]);
    }

    #[test]
    fn test_occupied_positions() {
        let piece = Piece::new(PieceKind::I);
        let positions: Vec<_> = piece.occupied_positions(Point::new(3, 16)).collect();
        assert_eq!(
            positions,
            vec![
                Point::new(3, 18),
                Point::new(4, 18),
                Point::new(5, 18),
                Point::new(6, 18)
            ]
        );
    }

    #[test]
    fn test_piece_kind_char_conversion() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('x'), None);
    }

    #[test]
    fn test_piece_rotation_new() {
        assert_eq!(PieceRotation::new(3).map(PieceRotation::value), Some(3));
        assert_eq!(PieceRotation::new(4), None);
    }
}
