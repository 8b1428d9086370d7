//! Shape generation for the cell grid

use glam::Vec2;

use super::vertex::Vertex;
use crate::platform::{FrameBuffer, ScreenGrid};
use crate::sim::Rgb;

/// Fraction of a cell left as a gap around each bead square
pub const CELL_GAP: f32 = 0.08;

/// Two triangles covering the rectangle `min..max`
pub fn quad(min: Vec2, max: Vec2, color: Rgb) -> [Vertex; 6] {
    let tl = Vertex::at(min, color);
    let tr = Vertex::at(Vec2::new(max.x, min.y), color);
    let bl = Vertex::at(Vec2::new(min.x, max.y), color);
    let br = Vertex::at(max, color);
    [tl, bl, tr, tr, bl, br]
}

/// Quads for every cell of `fb`, in canvas pixels
pub fn grid_quads(fb: &FrameBuffer, grid: &ScreenGrid, canvas: Vec2) -> Vec<Vertex> {
    let inset = grid.cell_size(canvas) * CELL_GAP * 0.5;
    let mut vertices = Vec::with_capacity((fb.width() * fb.height()) as usize * 6);

    for (cell, color) in fb.iter() {
        let (min, max) = grid.cell_rect(canvas, cell);
        vertices.extend(quad(min + Vec2::splat(inset), max - Vec2::splat(inset), color));
    }

    vertices
}

/// Canvas pixel (y down) to normalized device coordinates (y up)
pub fn pixel_to_ndc(pos: Vec2, canvas: Vec2) -> Vec2 {
    if canvas.x <= 0.0 || canvas.y <= 0.0 {
        return Vec2::ZERO;
    }
    let unit = pos / canvas;
    Vec2::new(unit.x * 2.0 - 1.0, 1.0 - unit.y * 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::CellSink;
    use glam::IVec2;

    #[test]
    fn test_quad_covers_rect() {
        let q = quad(Vec2::ZERO, Vec2::new(4.0, 2.0), Rgb::WHITE);
        let min = q.iter().fold(Vec2::MAX, |m, v| m.min(v.pos()));
        let max = q.iter().fold(Vec2::MIN, |m, v| m.max(v.pos()));
        assert_eq!(min, Vec2::ZERO);
        assert_eq!(max, Vec2::new(4.0, 2.0));
    }

    #[test]
    fn test_grid_quads_one_quad_per_cell() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.set_cell_color(IVec2::new(2, 1), Rgb::WHITE);
        let grid = ScreenGrid::new(fb.width(), fb.height());
        let canvas = Vec2::new(300.0, 200.0);
        let verts = grid_quads(&fb, &grid, canvas);
        assert_eq!(verts.len(), 6 * 6);

        // last quad is the white cell, inset inside its 100px square
        let last = &verts[30..];
        assert!(last.iter().all(|v| v.color == Rgb::WHITE.to_rgba_f32()));
        let (min, max) = grid.cell_rect(canvas, IVec2::new(2, 1));
        let center = (min + max) * 0.5;
        assert_eq!(center, Vec2::new(250.0, 150.0));
        for v in last {
            let d = (v.pos() - center).abs();
            assert!(d.x < 50.0 && d.y < 50.0);
            assert!(d.x > 45.0 && d.y > 45.0);
        }
    }

    #[test]
    fn test_pixel_to_ndc() {
        let canvas = Vec2::new(200.0, 100.0);
        assert_eq!(pixel_to_ndc(Vec2::ZERO, canvas), Vec2::new(-1.0, 1.0));
        assert_eq!(pixel_to_ndc(canvas, canvas), Vec2::new(1.0, -1.0));
        assert_eq!(pixel_to_ndc(Vec2::new(100.0, 50.0), canvas), Vec2::ZERO);
        assert_eq!(pixel_to_ndc(Vec2::ONE, Vec2::ZERO), Vec2::ZERO);
    }
}
