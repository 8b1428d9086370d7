//! Board geometry and cell occupancy
//!
//! The board is a `width x height` grid of cells. The outer ring is wall;
//! beads only ever sit on interior cells:
//! - x in [1, width - 2]
//! - y in [1, height - 2]

use glam::IVec2;

use super::state::BeadId;

/// A rectangular board whose outer ring is wall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
}

impl Board {
    /// Create a board. Dimensions below 3 leave no interior and are clamped.
    pub fn new(width: i32, height: i32) -> Self {
        debug_assert!(width >= 3 && height >= 3, "board must have an interior");
        Self {
            width: width.max(3),
            height: height.max(3),
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Top-left interior cell
    #[inline]
    pub fn min_open(&self) -> IVec2 {
        IVec2::ONE
    }

    /// Bottom-right interior cell
    #[inline]
    pub fn max_open(&self) -> IVec2 {
        IVec2::new(self.width - 2, self.height - 2)
    }

    /// Cell lies anywhere on the board (wall or open)
    #[inline]
    pub fn contains(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    /// Cell lies on the outer wall ring
    pub fn is_wall(&self, cell: IVec2) -> bool {
        self.contains(cell)
            && (cell.x == 0 || cell.y == 0 || cell.x == self.width - 1 || cell.y == self.height - 1)
    }

    /// Cell lies strictly inside the wall ring
    pub fn is_interior(&self, cell: IVec2) -> bool {
        let (lo, hi) = (self.min_open(), self.max_open());
        cell.x >= lo.x && cell.x <= hi.x && cell.y >= lo.y && cell.y <= hi.y
    }

    /// Row-major index of a cell
    #[inline]
    pub fn index(&self, cell: IVec2) -> Option<usize> {
        self.contains(cell)
            .then(|| (cell.y * self.width + cell.x) as usize)
    }

    /// Total number of cells
    #[inline]
    pub fn area(&self) -> usize {
        (self.width * self.height) as usize
    }

    /// Every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = IVec2> + use<> {
        let (w, h) = (self.width, self.height);
        (0..h).flat_map(move |y| (0..w).map(move |x| IVec2::new(x, y)))
    }

    /// The four corner cells, clockwise from top-left
    pub fn corners(&self) -> [IVec2; 4] {
        let (r, b) = (self.width - 1, self.height - 1);
        [
            IVec2::new(0, 0),
            IVec2::new(r, 0),
            IVec2::new(r, b),
            IVec2::new(0, b),
        ]
    }
}

/// Which bead (if any) sits on each cell
///
/// Only active beads are recorded, at most one per cell.
#[derive(Debug, Clone)]
pub struct Occupancy {
    board: Board,
    cells: Vec<Option<BeadId>>,
}

impl Occupancy {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            cells: vec![None; board.area()],
        }
    }

    pub fn get(&self, cell: IVec2) -> Option<BeadId> {
        self.board.index(cell).and_then(|i| self.cells[i])
    }

    pub fn set(&mut self, cell: IVec2, id: BeadId) {
        if let Some(i) = self.board.index(cell) {
            self.cells[i] = Some(id);
        }
    }

    /// Clear a cell, but only if it still belongs to `id`
    pub fn release(&mut self, cell: IVec2, id: BeadId) {
        if let Some(i) = self.board.index(cell) {
            if self.cells[i] == Some(id) {
                self.cells[i] = None;
            }
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Number of occupied cells
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}
