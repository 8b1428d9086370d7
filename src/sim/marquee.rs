//! Border marquee
//!
//! Four lights chase each other clockwise around the wall ring, one cell per
//! tick. Purely decorative; they never interact with beads.

use glam::IVec2;

use super::board::Board;
use crate::consts::MARQUEE_LIGHTS;

/// A single light on the wall ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarqueeLight {
    pub pos: IVec2,
    pub dir: IVec2,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marquee {
    lights: [MarqueeLight; MARQUEE_LIGHTS],
}

/// Clockwise heading to take when standing on a corner
fn corner_heading(board: &Board, pos: IVec2) -> Option<IVec2> {
    let [tl, tr, br, bl] = board.corners();
    match pos {
        p if p == tl => Some(IVec2::new(1, 0)),
        p if p == tr => Some(IVec2::new(0, 1)),
        p if p == br => Some(IVec2::new(-1, 0)),
        p if p == bl => Some(IVec2::new(0, -1)),
        _ => None,
    }
}

impl Marquee {
    /// One light on each corner
    pub fn new(board: &Board) -> Self {
        let lights = board.corners().map(|pos| MarqueeLight {
            pos,
            dir: corner_heading(board, pos).unwrap_or(IVec2::X),
        });
        Self { lights }
    }

    /// Move every light one cell along the ring
    pub fn advance(&mut self, board: &Board) {
        for light in &mut self.lights {
            if let Some(dir) = corner_heading(board, light.pos) {
                light.dir = dir;
            }
            light.pos += light.dir;
        }
    }

    pub fn lights(&self) -> &[MarqueeLight] {
        &self.lights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_corners() {
        let board = Board::new(6, 4);
        let marquee = Marquee::new(&board);
        let positions: Vec<IVec2> = marquee.lights().iter().map(|l| l.pos).collect();
        assert_eq!(positions, board.corners().to_vec());
    }

    #[test]
    fn test_stays_on_wall_ring() {
        let board = Board::new(7, 5);
        let mut marquee = Marquee::new(&board);
        for _ in 0..100 {
            marquee.advance(&board);
            for light in marquee.lights() {
                assert!(board.is_wall(light.pos), "light left the ring at {:?}", light.pos);
            }
        }
    }

    #[test]
    fn test_full_lap_returns_home() {
        let board = Board::new(7, 5);
        let lap = 2 * (board.width() - 1) + 2 * (board.height() - 1);
        let mut marquee = Marquee::new(&board);
        let start = marquee.clone();
        for _ in 0..lap {
            marquee.advance(&board);
        }
        let a: Vec<IVec2> = marquee.lights().iter().map(|l| l.pos).collect();
        let b: Vec<IVec2> = start.lights().iter().map(|l| l.pos).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_turns_clockwise_at_corner() {
        let board = Board::new(5, 5);
        let mut marquee = Marquee::new(&board);
        // top-left light runs along the top edge
        for _ in 0..4 {
            marquee.advance(&board);
        }
        assert_eq!(marquee.lights()[0].pos, IVec2::new(4, 0));
        marquee.advance(&board);
        assert_eq!(marquee.lights()[0].pos, IVec2::new(4, 1));
    }
}
