use serde::{Deserialize, Serialize};

use super::{
    piece::{PieceKind, PieceRotation},
    point::Point,
};

/// Number of wall-kick offsets tried for a single rotation.
pub const KICK_ATTEMPTS: usize = 5;

/// Direction of a rotation command.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::IsVariant,
)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    pub const ALL: [Self; 2] = [Self::Clockwise, Self::CounterClockwise];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Clockwise => 0,
            Self::CounterClockwise => 1,
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }
}

/// Cell transform used to rotate a piece inside its bounding box.
///
/// A rotation is a quarter turn about the centre of the bounding box:
///
/// - clockwise: `(x, y) -> (y, -x + pivot)`
/// - counterclockwise: `(x, y) -> (-y + pivot, x)`
///
/// where `pivot` is the bounding-box size minus one (1 for O, 3 for I, 2 for
/// everything else). The two transforms are exact inverses of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationRule {
    pivot: i32,
}

impl RotationRule {
    #[must_use]
    pub const fn new(pivot: i32) -> Self {
        Self { pivot }
    }

    #[must_use]
    pub const fn clockwise(self, p: Point) -> Point {
        Point::new(p.y, -p.x + self.pivot)
    }

    #[must_use]
    pub const fn counterclockwise(self, p: Point) -> Point {
        Point::new(-p.y + self.pivot, p.x)
    }

    #[must_use]
    pub const fn apply(self, direction: RotationDirection, p: Point) -> Point {
        match direction {
            RotationDirection::Clockwise => self.clockwise(p),
            RotationDirection::CounterClockwise => self.counterclockwise(p),
        }
    }
}

/// Wall-kick offsets indexed by `[source rotation state][attempt]`.
pub type WallKickTable = [[Point; KICK_ATTEMPTS]; 4];

const fn kick_table(rows: [[(i32, i32); KICK_ATTEMPTS]; 4]) -> WallKickTable {
    let mut table = [[Point::ZERO; KICK_ATTEMPTS]; 4];
    let mut r = 0;
    while r < 4 {
        let mut i = 0;
        while i < KICK_ATTEMPTS {
            table[r][i] = Point::new(rows[r][i].0, rows[r][i].1);
            i += 1;
        }
        r += 1;
    }
    table
}

// SRS offsets with y pointing up. Row N is the table for rotating away from state N.

/// Clockwise kicks for every piece except I.
pub const STANDARD_CLOCKWISE_KICKS: WallKickTable = kick_table([
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
]);

/// Counterclockwise kicks for every piece except I.
pub const STANDARD_COUNTERCLOCKWISE_KICKS: WallKickTable = kick_table([
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
]);

/// Clockwise kicks for the I piece.
pub const I_CLOCKWISE_KICKS: WallKickTable = kick_table([
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
]);

/// Counterclockwise kicks for the I piece.
pub const I_COUNTERCLOCKWISE_KICKS: WallKickTable = kick_table([
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
]);

/// Returns the kick table used when rotating `kind` in `direction`.
#[must_use]
pub const fn wall_kick_table(kind: PieceKind, direction: RotationDirection) -> &'static WallKickTable {
    match (kind, direction) {
        (PieceKind::I, RotationDirection::Clockwise) => &I_CLOCKWISE_KICKS,
        (PieceKind::I, RotationDirection::CounterClockwise) => &I_COUNTERCLOCKWISE_KICKS,
        (_, RotationDirection::Clockwise) => &STANDARD_CLOCKWISE_KICKS,
        (_, RotationDirection::CounterClockwise) => &STANDARD_COUNTERCLOCKWISE_KICKS,
    }
}

/// Returns the offsets to try, in order, when rotating a piece of `kind` away from `rotation`.
#[must_use]
pub const fn wall_kicks(
    kind: PieceKind,
    rotation: PieceRotation,
    direction: RotationDirection,
) -> &'static [Point; KICK_ATTEMPTS] {
    &wall_kick_table(kind, direction)[rotation.as_usize()]
}

/// A successful wall-kick attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallKick {
    index: usize,
    offset: Point,
}

impl WallKick {
    #[must_use]
    pub const fn new(index: usize, offset: Point) -> Self {
        Self { index, offset }
    }

    /// Attempt number within the kick table (0 means no kick was needed).
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }

    /// Offset added to the piece origin.
    #[must_use]
    pub const fn offset(self) -> Point {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_are_inverse() {
        for pivot in 1..=3 {
            let rule = RotationRule::new(pivot);
            for x in 0..=pivot {
                for y in 0..=pivot {
                    let p = Point::new(x, y);
                    assert_eq!(rule.counterclockwise(rule.clockwise(p)), p);
                    assert_eq!(rule.clockwise(rule.counterclockwise(p)), p);
                }
            }
        }
    }

    #[test]
    fn test_four_quarter_turns_are_identity() {
        let rule = RotationRule::new(2);
        let p = Point::new(0, 1);
        let mut q = p;
        for _ in 0..4 {
            q = rule.apply(RotationDirection::Clockwise, q);
        }
        assert_eq!(q, p);
    }

    #[test]
    fn test_first_attempt_never_kicks() {
        for table in [
            &STANDARD_CLOCKWISE_KICKS,
            &STANDARD_COUNTERCLOCKWISE_KICKS,
            &I_CLOCKWISE_KICKS,
            &I_COUNTERCLOCKWISE_KICKS,
        ] {
            for row in table {
                assert_eq!(row[0], Point::ZERO);
            }
        }
    }

    #[test]
    fn test_counterclockwise_kicks_undo_clockwise_kicks() {
        // Rotating 0 -> 1 clockwise and then 1 -> 0 counterclockwise uses negated offsets.
        for (cw, ccw) in [
            (&STANDARD_CLOCKWISE_KICKS, &STANDARD_COUNTERCLOCKWISE_KICKS),
            (&I_CLOCKWISE_KICKS, &I_COUNTERCLOCKWISE_KICKS),
        ] {
            for from in 0..4 {
                let to = (from + 1) % 4;
                for i in 0..KICK_ATTEMPTS {
                    assert_eq!(cw[from][i] + ccw[to][i], Point::ZERO);
                }
            }
        }
    }

    #[test]
    fn test_table_selection() {
        let r0 = PieceRotation::default();
        assert_eq!(
            wall_kicks(PieceKind::I, r0, RotationDirection::Clockwise)[1],
            Point::new(-2, 0)
        );
        assert_eq!(
            wall_kicks(PieceKind::T, r0, RotationDirection::Clockwise)[1],
            Point::new(-1, 0)
        );
        assert_eq!(
            wall_kicks(PieceKind::O, r0, RotationDirection::CounterClockwise)[1],
            Point::new(1, 0)
        );
    }

    #[test]
    fn test_direction_helpers() {
        assert_eq!(RotationDirection::Clockwise.index(), 0);
        assert_eq!(RotationDirection::CounterClockwise.index(), 1);
        assert!(RotationDirection::Clockwise.opposite().is_counter_clockwise());
    }
}
