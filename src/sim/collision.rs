//! Wall reflection and bead-on-bead collision lookup
//!
//! Beads move one cell per tick. A move that would leave the open area is
//! clamped back onto the nearest open cell and the offending velocity
//! component is negated. Each axis is handled independently, so a corner hit
//! reflects both.

use glam::IVec2;

use super::board::{Board, Occupancy};
use super::state::BeadId;

/// A side of the wall ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wall {
    Left,
    Right,
    Top,
    Bottom,
}

impl Wall {
    pub const ALL: [Wall; 4] = [Wall::Left, Wall::Right, Wall::Top, Wall::Bottom];

    /// Index into a four-tone sound set
    pub fn tone_index(self) -> usize {
        match self {
            Wall::Left => 0,
            Wall::Right => 1,
            Wall::Top => 2,
            Wall::Bottom => 3,
        }
    }
}

/// Result of moving a bead one step against the walls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallBounce {
    /// Destination cell (always open)
    pub pos: IVec2,
    /// Velocity after any reflection
    pub vel: IVec2,
    /// Wall hit on the x axis
    pub x_wall: Option<Wall>,
    /// Wall hit on the y axis
    pub y_wall: Option<Wall>,
}

impl WallBounce {
    /// Walls hit this step, x axis first
    pub fn walls(&self) -> impl Iterator<Item = Wall> + use<> {
        self.x_wall.into_iter().chain(self.y_wall)
    }
}

/// Clamp one axis into `[lo, hi]`, negating the velocity on a hit
#[inline]
fn reflect_axis(next: i32, vel: i32, lo: i32, hi: i32) -> (i32, i32, Option<bool>) {
    if next < lo {
        (lo, -vel, Some(false))
    } else if next > hi {
        (hi, -vel, Some(true))
    } else {
        (next, vel, None)
    }
}

/// Advance `pos` by `vel`, reflecting off the wall ring
pub fn reflect_off_walls(board: &Board, pos: IVec2, vel: IVec2) -> WallBounce {
    let next = pos + vel;
    let (lo, hi) = (board.min_open(), board.max_open());

    let (x, dx, x_hit) = reflect_axis(next.x, vel.x, lo.x, hi.x);
    let (y, dy, y_hit) = reflect_axis(next.y, vel.y, lo.y, hi.y);

    WallBounce {
        pos: IVec2::new(x, y),
        vel: IVec2::new(dx, dy),
        x_wall: x_hit.map(|high| if high { Wall::Right } else { Wall::Left }),
        y_wall: y_hit.map(|high| if high { Wall::Bottom } else { Wall::Top }),
    }
}

/// Another active bead sitting on `cell`, if any
#[inline]
pub fn find_occupant(occupancy: &Occupancy, cell: IVec2, mover: BeadId) -> Option<BeadId> {
    occupancy.get(cell).filter(|&other| other != mover)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::new(21, 21)
    }

    #[test]
    fn test_open_move() {
        let b = reflect_off_walls(&board(), IVec2::new(5, 5), IVec2::new(1, -1));
        assert_eq!(b.pos, IVec2::new(6, 4));
        assert_eq!(b.vel, IVec2::new(1, -1));
        assert_eq!(b.walls().count(), 0);
    }

    #[test]
    fn test_left_wall_reflects_in_place() {
        let b = reflect_off_walls(&board(), IVec2::new(1, 5), IVec2::new(-1, 0));
        assert_eq!(b.pos, IVec2::new(1, 5));
        assert_eq!(b.vel, IVec2::new(1, 0));
        assert_eq!(b.walls().collect::<Vec<_>>(), vec![Wall::Left]);
    }

    #[test]
    fn test_right_and_bottom_walls() {
        let b = reflect_off_walls(&board(), IVec2::new(19, 10), IVec2::new(1, 1));
        assert_eq!(b.pos, IVec2::new(19, 11));
        assert_eq!(b.vel, IVec2::new(-1, 1));
        assert_eq!(b.x_wall, Some(Wall::Right));
        assert_eq!(b.y_wall, None);

        let b = reflect_off_walls(&board(), IVec2::new(4, 19), IVec2::new(0, 1));
        assert_eq!(b.pos, IVec2::new(4, 19));
        assert_eq!(b.vel, IVec2::new(0, -1));
        assert_eq!(b.y_wall, Some(Wall::Bottom));
    }

    #[test]
    fn test_corner_reflects_both_axes() {
        let b = reflect_off_walls(&board(), IVec2::new(1, 1), IVec2::new(-1, -1));
        assert_eq!(b.pos, IVec2::new(1, 1));
        assert_eq!(b.vel, IVec2::new(1, 1));
        assert_eq!(b.walls().collect::<Vec<_>>(), vec![Wall::Left, Wall::Top]);
    }

    #[test]
    fn test_smallest_board_keeps_bead_on_single_cell() {
        let tiny = Board::new(3, 3);
        let b = reflect_off_walls(&tiny, IVec2::new(1, 1), IVec2::new(1, 0));
        assert_eq!(b.pos, IVec2::new(1, 1));
        assert_eq!(b.vel, IVec2::new(-1, 0));
        assert_eq!(b.x_wall, Some(Wall::Right));
    }

    #[test]
    fn test_tone_indices_distinct() {
        let mut seen: Vec<usize> = Wall::ALL.iter().map(|w| w.tone_index()).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }
}
