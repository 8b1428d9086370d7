//! Render sink
//!
//! The simulation and UI paint the screen one cell at a time through
//! [`CellSink`]. [`FrameBuffer`] is the in-memory sink the renderer reads.

use glam::IVec2;

use crate::sim::Rgb;

/// Anything that can colour a grid cell
pub trait CellSink {
    fn set_cell_color(&mut self, cell: IVec2, color: Rgb);
}

/// Row-major grid of cell colours
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: i32,
    height: i32,
    cells: Vec<Rgb>,
}

impl FrameBuffer {
    pub fn new(width: i32, height: i32) -> Self {
        let (width, height) = (width.max(0), height.max(0));
        Self {
            width,
            height,
            cells: vec![Rgb::BLACK; (width * height) as usize],
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

    fn index(&self, cell: IVec2) -> Option<usize> {
        (cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height)
            .then(|| (cell.y * self.width + cell.x) as usize)
    }

    pub fn get(&self, cell: IVec2) -> Option<Rgb> {
        self.index(cell).map(|i| self.cells[i])
    }

    pub fn fill(&mut self, color: Rgb) {
        self.cells.fill(color);
    }

    /// Cells with their colours, row-major
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, Rgb)> + '_ {
        let w = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| (IVec2::new(i as i32 % w, i as i32 / w), c))
    }
}

impl CellSink for FrameBuffer {
    /// Writes outside the buffer are dropped
    fn set_cell_color(&mut self, cell: IVec2, color: Rgb) {
        if let Some(i) = self.index(cell) {
            self.cells[i] = color;
        }
    }
}
