//! Pointer input mapping
//!
//! The screen grid is drawn as square cells, centred in the canvas. These
//! helpers convert canvas pixel positions back to grid cells.

use glam::{IVec2, Vec2};

/// Square-celled grid laid out inside a canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenGrid {
    pub cols: i32,
    pub rows: i32,
}

impl ScreenGrid {
    pub fn new(cols: i32, rows: i32) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    /// Side length of one cell in pixels for a `canvas` of the given size
    pub fn cell_size(&self, canvas: Vec2) -> f32 {
        (canvas.x / self.cols as f32).min(canvas.y / self.rows as f32)
    }

    /// Top-left pixel of the grid (grid is centred)
    pub fn origin(&self, canvas: Vec2) -> Vec2 {
        let size = self.cell_size(canvas);
        let used = Vec2::new(self.cols as f32, self.rows as f32) * size;
        (canvas - used) * 0.5
    }

    /// Pixel rectangle (min, max) covered by a cell
    pub fn cell_rect(&self, canvas: Vec2, cell: IVec2) -> (Vec2, Vec2) {
        let size = self.cell_size(canvas);
        let min = self.origin(canvas) + cell.as_vec2() * size;
        (min, min + Vec2::splat(size))
    }
}

/// Cell under a pointer at `pos` (canvas pixels), if it is on the grid
pub fn pointer_to_cell(grid: &ScreenGrid, canvas: Vec2, pos: Vec2) -> Option<IVec2> {
    let size = grid.cell_size(canvas);
    if size <= 0.0 {
        return None;
    }
    let local = (pos - grid.origin(canvas)) / size;
    if local.x < 0.0 || local.y < 0.0 {
        return None;
    }
    let cell = local.floor().as_ivec2();
    (cell.x < grid.cols && cell.y < grid.rows).then_some(cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_canvas() {
        let grid = ScreenGrid::new(10, 10);
        let canvas = Vec2::new(100.0, 100.0);
        assert_eq!(grid.cell_size(canvas), 10.0);
        assert_eq!(pointer_to_cell(&grid, canvas, Vec2::new(0.0, 0.0)), Some(IVec2::ZERO));
        assert_eq!(
            pointer_to_cell(&grid, canvas, Vec2::new(55.0, 99.9)),
            Some(IVec2::new(5, 9))
        );
        assert_eq!(pointer_to_cell(&grid, canvas, Vec2::new(100.0, 5.0)), None);
    }

    #[test]
    fn test_letterboxed_canvas() {
        // 21x25 grid in a wide canvas: width is letterboxed
        let grid = ScreenGrid::new(21, 25);
        let canvas = Vec2::new(1000.0, 500.0);
        assert_eq!(grid.cell_size(canvas), 20.0);
        let origin = grid.origin(canvas);
        assert_eq!(origin, Vec2::new(290.0, 0.0));

        assert_eq!(pointer_to_cell(&grid, canvas, Vec2::new(100.0, 100.0)), None);
        assert_eq!(
            pointer_to_cell(&grid, canvas, Vec2::new(295.0, 5.0)),
            Some(IVec2::ZERO)
        );
        assert_eq!(
            pointer_to_cell(&grid, canvas, Vec2::new(709.0, 499.0)),
            Some(IVec2::new(20, 24))
        );
    }

    #[test]
    fn test_cell_rect() {
        let grid = ScreenGrid::new(4, 2);
        let canvas = Vec2::new(40.0, 20.0);
        let (min, max) = grid.cell_rect(canvas, IVec2::new(1, 1));
        assert_eq!(min, Vec2::new(10.0, 10.0));
        assert_eq!(max, Vec2::new(20.0, 20.0));
    }
}
