use std::{fmt, sync::Arc};

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::PieceCollisionError;

use super::{
    piece::{Piece, PieceKind},
    point::Point,
    rotation::{KICK_ATTEMPTS, RotationDirection, WallKick, wall_kicks},
};

/// Command applied to the falling piece.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::Display,
)]
pub enum Action {
    Left,
    Right,
    Down,
    Drop,
    Clockwise,
    CounterClockwise,
    Nothing,
}

impl Action {
    pub const ALL: [Self; 7] = [
        Action::Left,
        Action::Right,
        Action::Down,
        Action::Drop,
        Action::Clockwise,
        Action::CounterClockwise,
        Action::Nothing,
    ];

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl From<RotationDirection> for Action {
    fn from(direction: RotationDirection) -> Self {
        match direction {
            RotationDirection::Clockwise => Action::Clockwise,
            RotationDirection::CounterClockwise => Action::CounterClockwise,
        }
    }
}

/// Outcome of [`Board::apply`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
    Serialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum MoveResult {
    /// The command was carried out and the piece is still falling.
    Success,
    /// A lateral move or rotation was blocked by a wall or settled cells. Nothing changed.
    OutOfBounds,
    /// The piece could not move down any further and was merged into the grid.
    Place,
    /// There is no falling piece to command.
    NoPiece,
}

/// Small set of [`Action`]s.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionSet(u8);

impl ActionSet {
    pub const EMPTY: Self = Self(0);
    pub const ALL: Self = Self((1 << Action::ALL.len()) - 1);

    pub fn insert(&mut self, action: Action) {
        self.0 |= action.bit();
    }

    #[must_use]
    pub const fn contains(self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = Action> {
        Action::ALL.into_iter().filter(move |a| self.contains(*a))
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<T: IntoIterator<Item = Action>>(iter: T) -> Self {
        let mut set = Self::EMPTY;
        for action in iter {
            set.insert(action);
        }
        set
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FallingPiece {
    piece: Piece,
    origin: Point,
}

/// The playfield: settled cells, the falling piece and derived metrics.
///
/// Coordinates are y-up, `(0, 0)` being the bottom-left cell. Settled cells live in
/// `[0, width) × [0, height)`; the falling piece is tracked separately as a piece
/// value plus an origin and is never part of the grid until it is placed.
///
/// Every command goes through [`Board::apply`], which moves, rotates or places the
/// falling piece, clears full rows and recomputes column heights, row widths and
/// the maximum height from scratch.
///
/// Settled cells are shared copy-on-write between clones, so [`Board::test_move`]
/// only copies the grid when the simulated command actually writes to it.
///
/// Two boards are equal when they have the same dimensions, the same settled cells
/// and the same falling piece at the same origin. Diagnostics such as the last
/// action or the recorded wall-kick indices are not compared.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Action, Board, MoveResult, Piece, PieceKind};
///
/// let mut board = Board::new(10, 20);
/// let origin = board.spawn_origin(PieceKind::I);
/// board.spawn(Piece::new(PieceKind::I), origin).unwrap();
///
/// assert_eq!(board.apply(Action::Drop), MoveResult::Place);
/// assert_eq!(board.column_height(3), 1);
/// assert_eq!(board.column_height(7), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Arc<Vec<Option<PieceKind>>>,
    falling: Option<FallingPiece>,
    last_action: Option<Action>,
    last_result: Option<MoveResult>,
    rows_cleared: usize,
    column_heights: Vec<usize>,
    row_widths: Vec<usize>,
    max_height: usize,
    wall_kick_index: [usize; 2],
    topped_out: bool,
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.falling == other.falling
            && (Arc::ptr_eq(&self.cells, &other.cells) || self.cells == other.cells)
    }
}

impl Eq for Board {}

fn coord(v: usize) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

impl Board {
    /// Creates an empty board.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or does not fit in an `i32`.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::from_cells(width, height, vec![None; width * height])
    }

    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<Option<PieceKind>>) -> Self {
        assert!(width > 0 && height > 0, "board dimensions must be positive");
        assert!(i32::try_from(width).is_ok() && i32::try_from(height).is_ok());
        assert_eq!(cells.len(), width * height);
        let mut board = Self {
            width,
            height,
            cells: Arc::new(cells),
            falling: None,
            last_action: None,
            last_result: None,
            rows_cleared: 0,
            column_heights: vec![0; width],
            row_widths: vec![0; height],
            max_height: 0,
            wall_kick_index: [0; 2],
            topped_out: false,
        };
        board.recompute_metrics();
        board
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Conventional spawn origin: horizontally centred, bounding box touching the top.
    #[must_use]
    pub fn spawn_origin(&self, kind: PieceKind) -> Point {
        let size = kind.box_size();
        Point::new(
            coord(self.width.saturating_sub(size) / 2),
            coord(self.height) - coord(size),
        )
    }

    /// Introduces a new falling piece at `origin`, replacing any current one.
    ///
    /// Fails without changing the board when the piece does not fit there, which is
    /// how a game loop detects that the stack has reached the spawn area.
    pub fn spawn(&mut self, piece: Piece, origin: Point) -> Result<(), PieceCollisionError> {
        if self.is_colliding(piece, origin) {
            tracing::debug!(kind = ?piece.kind(), %origin, "spawn blocked");
            return Err(PieceCollisionError);
        }
        self.falling = Some(FallingPiece { piece, origin });
        Ok(())
    }

    /// Returns true if `piece` at `origin` overlaps a wall, the floor or a settled cell.
    ///
    /// There is no ceiling: cells at or above `height` only collide with the walls.
    #[must_use]
    pub fn is_colliding(&self, piece: Piece, origin: Point) -> bool {
        !self.fits(piece, origin)
    }

    fn fits(&self, piece: Piece, origin: Point) -> bool {
        let width = coord(self.width);
        piece
            .occupied_positions(origin)
            .all(|p| (0..width).contains(&p.x) && p.y >= 0 && !self.is_occupied(p))
    }

    fn cell_index(&self, p: Point) -> Option<usize> {
        let x = usize::try_from(p.x).ok().filter(|x| *x < self.width)?;
        let y = usize::try_from(p.y).ok().filter(|y| *y < self.height)?;
        Some(y * self.width + x)
    }

    fn is_occupied(&self, p: Point) -> bool {
        self.cell_index(p).is_some_and(|i| self.cells[i].is_some())
    }

    /// Applies a command to the falling piece.
    ///
    /// Without a falling piece this returns [`MoveResult::NoPiece`] and leaves the
    /// board untouched. Otherwise full rows are cleared and every metric is
    /// recomputed after the command, whatever its outcome.
    pub fn apply(&mut self, action: Action) -> MoveResult {
        let Some(falling) = self.falling else {
            return MoveResult::NoPiece;
        };

        let result = match action {
            Action::Left => self.shift(falling, falling.origin.left()),
            Action::Right => self.shift(falling, falling.origin.right()),
            Action::Down => self.step_down(falling),
            Action::Drop => self.hard_drop(falling),
            Action::Clockwise => self.rotate(falling, RotationDirection::Clockwise),
            Action::CounterClockwise => self.rotate(falling, RotationDirection::CounterClockwise),
            Action::Nothing => MoveResult::Success,
        };

        self.last_action = Some(action);
        self.last_result = Some(result);
        self.rows_cleared = self.clear_full_rows();
        self.recompute_metrics();
        result
    }

    /// Returns a copy of this board with `action` applied. `self` is not modified.
    #[must_use]
    pub fn test_move(&self, action: Action) -> Board {
        let mut board = self.clone();
        board.apply(action);
        board
    }

    fn shift(&mut self, falling: FallingPiece, origin: Point) -> MoveResult {
        if !self.fits(falling.piece, origin) {
            return MoveResult::OutOfBounds;
        }
        self.falling = Some(FallingPiece { origin, ..falling });
        MoveResult::Success
    }

    fn step_down(&mut self, falling: FallingPiece) -> MoveResult {
        if self.can_move_down(falling) {
            self.falling = Some(FallingPiece {
                origin: falling.origin.down(),
                ..falling
            });
            MoveResult::Success
        } else {
            self.place(falling);
            MoveResult::Place
        }
    }

    fn hard_drop(&mut self, mut falling: FallingPiece) -> MoveResult {
        while self.can_move_down(falling) {
            falling.origin = falling.origin.down();
        }
        self.place(falling);
        MoveResult::Place
    }

    fn rotate(&mut self, falling: FallingPiece, direction: RotationDirection) -> MoveResult {
        let Some(kick) = self.wall_kick_for(falling, direction) else {
            self.wall_kick_index[direction.index()] = KICK_ATTEMPTS - 1;
            return MoveResult::OutOfBounds;
        };
        tracing::trace!(?direction, index = kick.index(), offset = %kick.offset(), "rotated");
        self.wall_kick_index[direction.index()] = kick.index();
        self.falling = Some(FallingPiece {
            piece: falling.piece.rotated(direction),
            origin: falling.origin + kick.offset(),
        });
        MoveResult::Success
    }

    // Only the lowest cell of each column can land on something.
    fn can_move_down(&self, falling: FallingPiece) -> bool {
        falling.piece.shape().skirt_cells().all(|cell| {
            let p = falling.origin + cell;
            p.y > 0 && !self.is_occupied(p.down())
        })
    }

    fn wall_kick_for(
        &self,
        falling: FallingPiece,
        direction: RotationDirection,
    ) -> Option<WallKick> {
        let rotated = falling.piece.rotated(direction);
        wall_kicks(falling.piece.kind(), falling.piece.rotation(), direction)
            .iter()
            .enumerate()
            .find(|(_, offset)| self.fits(rotated, falling.origin + **offset))
            .map(|(index, offset)| WallKick::new(index, *offset))
    }

    /// Returns the wall kick a rotation in `direction` would use right now.
    ///
    /// This is the lowest-indexed legal attempt, or `None` if the rotation would be
    /// refused (or there is no falling piece).
    #[must_use]
    pub fn find_wall_kick(&self, direction: RotationDirection) -> Option<WallKick> {
        self.falling
            .and_then(|falling| self.wall_kick_for(falling, direction))
    }

    /// Returns the actions that would not succeed from the current state.
    ///
    /// Lateral moves and rotations are included when they would be refused, `Down`
    /// and `Drop` when the next step would place the piece. With no falling piece
    /// every action is blocked.
    #[must_use]
    pub fn blocked_actions(&self) -> ActionSet {
        let Some(falling) = self.falling else {
            return ActionSet::ALL;
        };
        let mut blocked = ActionSet::EMPTY;
        if !self.fits(falling.piece, falling.origin.left()) {
            blocked.insert(Action::Left);
        }
        if !self.fits(falling.piece, falling.origin.right()) {
            blocked.insert(Action::Right);
        }
        if !self.can_move_down(falling) {
            blocked.insert(Action::Down);
            blocked.insert(Action::Drop);
        }
        for direction in RotationDirection::ALL {
            if self.wall_kick_for(falling, direction).is_none() {
                blocked.insert(direction.into());
            }
        }
        blocked
    }

    /// Origin the falling piece would settle at if dropped now.
    #[must_use]
    pub fn drop_origin(&self) -> Option<Point> {
        let mut falling = self.falling?;
        while self.can_move_down(falling) {
            falling.origin = falling.origin.down();
        }
        Some(falling.origin)
    }

    fn place(&mut self, falling: FallingPiece) {
        let indices: ArrayVec<Option<usize>, 4> = falling
            .piece
            .occupied_positions(falling.origin)
            .map(|p| self.cell_index(p))
            .collect();
        let cells = Arc::make_mut(&mut self.cells);
        for index in indices {
            match index {
                Some(i) => cells[i] = Some(falling.piece.kind()),
                None => self.topped_out = true,
            }
        }
        self.falling = None;
        tracing::trace!(
            kind = ?falling.piece.kind(),
            origin = %falling.origin,
            topped_out = self.topped_out,
            "placed piece"
        );
    }

    fn row_cells(&self, y: usize) -> &[Option<PieceKind>] {
        &self.cells[y * self.width..][..self.width]
    }

    fn clear_full_rows(&mut self) -> usize {
        let (width, height) = (self.width, self.height);
        let mut cleared = 0;
        let mut y = 0;
        while y < height {
            if self.row_cells(y).iter().all(Option::is_some) {
                let cells = Arc::make_mut(&mut self.cells);
                cells.drain(y * width..(y + 1) * width);
                cells.resize(width * height, None);
                cleared += 1;
                // The row that slid into `y` may be full as well.
                continue;
            }
            y += 1;
        }
        if cleared > 0 {
            tracing::trace!(rows = cleared, "cleared full rows");
        }
        cleared
    }

    fn recompute_metrics(&mut self) {
        let (width, height) = (self.width, self.height);
        self.column_heights.clear();
        self.column_heights.resize(width, 0);
        self.row_widths.clear();
        self.row_widths.resize(height, 0);
        for y in 0..height {
            for x in 0..width {
                if self.cells[y * width + x].is_some() {
                    self.row_widths[y] += 1;
                    self.column_heights[x] = y + 1;
                }
            }
        }
        self.max_height = self.column_heights.iter().copied().max().unwrap_or(0);
    }

    /// Settled cell at `(x, y)`; the falling piece is never reported.
    ///
    /// Returns `None` for empty cells and for coordinates outside the board.
    #[must_use]
    pub fn grid(&self, x: usize, y: usize) -> Option<PieceKind> {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            None
        }
    }

    /// One plus the highest settled cell in column `x`, or 0 if the column is empty.
    #[must_use]
    pub fn column_height(&self, x: usize) -> usize {
        self.column_heights[x]
    }

    #[must_use]
    pub fn column_heights(&self) -> &[usize] {
        &self.column_heights
    }

    #[must_use]
    pub fn max_height(&self) -> usize {
        self.max_height
    }

    /// Number of settled cells in row `y`.
    #[must_use]
    pub fn row_width(&self, y: usize) -> usize {
        self.row_widths[y]
    }

    /// Rows removed by the most recent command.
    #[must_use]
    pub fn rows_cleared(&self) -> usize {
        self.rows_cleared
    }

    #[must_use]
    pub fn falling_piece(&self) -> Option<Piece> {
        self.falling.map(|f| f.piece)
    }

    #[must_use]
    pub fn falling_origin(&self) -> Option<Point> {
        self.falling.map(|f| f.origin)
    }

    #[must_use]
    pub fn has_falling_piece(&self) -> bool {
        self.falling.is_some()
    }

    #[must_use]
    pub fn last_action(&self) -> Option<Action> {
        self.last_action
    }

    #[must_use]
    pub fn last_result(&self) -> Option<MoveResult> {
        self.last_result
    }

    /// Kick attempt used by the last rotation in `direction`.
    ///
    /// After a refused rotation this is the final attempt index.
    #[must_use]
    pub fn wall_kick_index(&self, direction: RotationDirection) -> usize {
        self.wall_kick_index[direction.index()]
    }

    /// Whether any placed piece had cells at or above `height`.
    #[must_use]
    pub fn is_topped_out(&self) -> bool {
        self.topped_out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let falling: ArrayVec<Point, 4> = self
            .falling
            .map(|fp| fp.piece.occupied_positions(fp.origin).collect())
            .unwrap_or_default();
        for y in (0..self.height).rev() {
            for (x, cell) in self.row_cells(y).iter().enumerate() {
                let ch = if falling.contains(&Point::new(coord(x), coord(y))) {
                    '@'
                } else {
                    cell.map_or('.', PieceKind::as_char)
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
