//! Screen layout, control panel and status line
//!
//! The screen is the board with a three-row control panel underneath and a
//! closing wall row at the bottom:
//!
//! ```text
//! row 0 .. h-1   board (wall ring + open area)
//! row h          [ ]  . . . . . .  [↖][↑][↗]  [+]
//! row h+1        [ ]  reset strip  [←][?][→]  [#] sound meter
//! row h+2        [ ]  . . . . . .  [↙][↓][↘]  [-]
//! row h+3        wall
//! ```

use glam::IVec2;

use crate::consts::{SCREEN_EXTRA_ROWS, SOUND_SETS};
use crate::platform::CellSink;
use crate::sim::{Board, LaunchDirection, Simulation};

/// Colours used on screen
pub mod palette {
    use crate::sim::Rgb;

    pub const FLOOR: Rgb = Rgb::from_hex(0x022026);
    pub const WALL: Rgb = Rgb::from_hex(0x4BA6A6);
    pub const MARQUEE: Rgb = Rgb::from_hex(0xF2D14F);
    pub const PANEL: Rgb = Rgb::from_hex(0x042326);
    pub const BUTTON_IDLE: Rgb = Rgb::from_hex(0xD8FFDB);
    pub const BUTTON_ACTIVE: Rgb = Rgb::from_hex(0x126B6B);
}

/// Column of the direction pad centre
const PAD_CENTER_X: i32 = 10;
/// Reset strip columns
const RESET_COLS: std::ops::RangeInclusive<i32> = 2..=7;
/// Sound up/down buttons
const SOUND_X: i32 = 13;
/// First column of the sound meter
const METER_X: i32 = 14;

/// A clickable control on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Direction(LaunchDirection),
    Reset,
    SoundUp,
    SoundDown,
}

/// What a click on a screen cell means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Open board cell: spawn here
    Spawn(IVec2),
    Control(Control),
    /// Walls and empty panel space
    Nothing,
}

/// Total screen rows for a board
pub fn screen_rows(board: &Board) -> i32 {
    board.height() + SCREEN_EXTRA_ROWS
}

/// Panel control at a screen cell
pub fn control_at(board: &Board, cell: IVec2) -> Option<Control> {
    let top = board.height();
    let row = cell.y - top;
    if !(0..3).contains(&row) || cell.x >= board.width() - 1 {
        return None;
    }

    if (PAD_CENTER_X - 1..=PAD_CENTER_X + 1).contains(&cell.x) {
        let dx = cell.x - PAD_CENTER_X;
        let dy = row - 1;
        return Some(Control::Direction(LaunchDirection::fixed(dx, dy)));
    }
    if row == 1 && RESET_COLS.contains(&cell.x) {
        return Some(Control::Reset);
    }
    if cell.x == SOUND_X {
        return match row {
            0 => Some(Control::SoundUp),
            2 => Some(Control::SoundDown),
            _ => None,
        };
    }
    None
}

/// Classify a clicked screen cell
pub fn target_at(board: &Board, cell: IVec2) -> Target {
    if board.is_interior(cell) {
        Target::Spawn(cell)
    } else if let Some(control) = control_at(board, cell) {
        Target::Control(control)
    } else {
        Target::Nothing
    }
}

/// Apply a panel control to the simulation
pub fn apply_control(sim: &mut Simulation, control: Control) {
    match control {
        Control::Direction(dir) => {
            sim.launch_direction = dir;
            log::info!("Launch direction -> {:?}", dir);
        }
        Control::Reset => sim.reset(),
        Control::SoundUp => {
            sim.change_sound_set(1);
        }
        Control::SoundDown => {
            sim.change_sound_set(-1);
        }
    }
}

/// Status line text
pub fn status_text(sim: &Simulation) -> String {
    match sim.active_count() {
        0 => "Click & Listen!".to_string(),
        n => format!("Ball Count: {}", n),
    }
}

/// Paint the whole screen into `sink`
pub fn paint_screen(sim: &Simulation, show_marquee: bool, sink: &mut impl CellSink) {
    let board = sim.board();
    let (w, rows) = (board.width(), screen_rows(board));

    for y in 0..rows {
        for x in 0..w {
            let cell = IVec2::new(x, y);
            let color = if board.is_interior(cell) {
                palette::FLOOR
            } else if y < board.height() || y == rows - 1 || x == 0 || x == w - 1 {
                palette::WALL
            } else {
                palette::PANEL
            };
            sink.set_cell_color(cell, color);
        }
    }

    paint_panel(sim, sink);

    for (_, bead) in sim.active_beads() {
        sink.set_cell_color(bead.pos, bead.color);
    }

    if show_marquee {
        for light in sim.marquee.lights() {
            sink.set_cell_color(light.pos, palette::MARQUEE);
        }
    }
}

fn paint_panel(sim: &Simulation, sink: &mut impl CellSink) {
    let board = sim.board();
    let top = board.height();
    let fits = |x: i32| x < board.width() - 1;

    let selected = sim.launch_direction.as_offset();
    for dy in -1..=1 {
        for dx in -1..=1 {
            let x = PAD_CENTER_X + dx;
            if !fits(x) {
                continue;
            }
            let color = if IVec2::new(dx, dy) == selected {
                palette::BUTTON_ACTIVE
            } else {
                palette::BUTTON_IDLE
            };
            sink.set_cell_color(IVec2::new(x, top + 1 + dy), color);
        }
    }

    for x in RESET_COLS.filter(|&x| fits(x)) {
        sink.set_cell_color(IVec2::new(x, top + 1), palette::BUTTON_IDLE);
    }

    if fits(SOUND_X) {
        sink.set_cell_color(IVec2::new(SOUND_X, top), palette::BUTTON_IDLE);
        sink.set_cell_color(IVec2::new(SOUND_X, top + 1), palette::BUTTON_ACTIVE);
        sink.set_cell_color(IVec2::new(SOUND_X, top + 2), palette::BUTTON_IDLE);
    }

    // one lit cell per step above the first sound set
    for i in 0..(SOUND_SETS as i32 - 1) {
        let x = METER_X + i;
        if !fits(x) {
            break;
        }
        let color = if i < sim.sound_set() as i32 {
            palette::MARQUEE
        } else {
            palette::BUTTON_IDLE
        };
        sink.set_cell_color(IVec2::new(x, top + 1), color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::FrameBuffer;
    use crate::sim::Rgb;

    fn sim() -> Simulation {
        Simulation::new(Board::new(21, 21), 1)
    }

    #[test]
    fn test_targets() {
        let board = Board::new(21, 21);
        assert_eq!(target_at(&board, IVec2::new(4, 4)), Target::Spawn(IVec2::new(4, 4)));
        assert_eq!(target_at(&board, IVec2::new(0, 4)), Target::Nothing);
        assert_eq!(target_at(&board, IVec2::new(1, 22)), Target::Nothing);
        assert_eq!(
            target_at(&board, IVec2::new(9, 21)),
            Target::Control(Control::Direction(LaunchDirection::fixed(-1, -1)))
        );
        assert_eq!(
            target_at(&board, IVec2::new(10, 22)),
            Target::Control(Control::Direction(LaunchDirection::Random))
        );
        assert_eq!(
            target_at(&board, IVec2::new(11, 23)),
            Target::Control(Control::Direction(LaunchDirection::fixed(1, 1)))
        );
        assert_eq!(target_at(&board, IVec2::new(5, 22)), Target::Control(Control::Reset));
        assert_eq!(target_at(&board, IVec2::new(5, 21)), Target::Nothing);
        assert_eq!(target_at(&board, IVec2::new(13, 21)), Target::Control(Control::SoundUp));
        assert_eq!(target_at(&board, IVec2::new(13, 22)), Target::Nothing);
        assert_eq!(target_at(&board, IVec2::new(13, 23)), Target::Control(Control::SoundDown));
        assert_eq!(target_at(&board, IVec2::new(10, 24)), Target::Nothing);
    }

    #[test]
    fn test_controls_outside_narrow_board_ignored() {
        let board = Board::new(8, 8);
        assert_eq!(control_at(&board, IVec2::new(10, 9)), None);
        assert_eq!(control_at(&board, IVec2::new(3, 9)), Some(Control::Reset));
    }

    #[test]
    fn test_apply_controls() {
        let mut sim = sim();
        apply_control(&mut sim, Control::Direction(LaunchDirection::fixed(0, 1)));
        assert_eq!(sim.launch_direction, LaunchDirection::Fixed { dx: 0, dy: 1 });
        apply_control(&mut sim, Control::SoundUp);
        assert_eq!(sim.sound_set(), 1);
        apply_control(&mut sim, Control::SoundDown);
        apply_control(&mut sim, Control::SoundDown);
        assert_eq!(sim.sound_set(), 0);

        sim.spawn(IVec2::new(3, 3)).unwrap();
        apply_control(&mut sim, Control::Reset);
        assert_eq!(sim.active_count(), 0);
    }

    #[test]
    fn test_status_text() {
        let mut sim = sim();
        assert_eq!(status_text(&sim), "Click & Listen!");
        sim.spawn(IVec2::new(3, 3)).unwrap();
        sim.spawn(IVec2::new(7, 3)).unwrap();
        assert_eq!(status_text(&sim), "Ball Count: 2");
    }

    #[test]
    fn test_paint_screen() {
        let mut sim = sim();
        let color = Rgb::new(10, 200, 30);
        let id = sim
            .spawn_with(IVec2::new(4, 5), IVec2::new(1, 0), color)
            .unwrap();
        let mut fb = FrameBuffer::new(21, screen_rows(sim.board()));
        paint_screen(&sim, false, &mut fb);

        assert_eq!(fb.get(IVec2::new(4, 5)), Some(color));
        assert_eq!(fb.get(IVec2::new(5, 5)), Some(palette::FLOOR));
        assert_eq!(fb.get(IVec2::new(0, 0)), Some(palette::WALL));
        assert_eq!(fb.get(IVec2::new(7, 24)), Some(palette::WALL));
        assert_eq!(fb.get(IVec2::new(1, 21)), Some(palette::PANEL));
        // random direction selected by default
        assert_eq!(fb.get(IVec2::new(10, 22)), Some(palette::BUTTON_ACTIVE));
        assert_eq!(fb.get(IVec2::new(9, 22)), Some(palette::BUTTON_IDLE));

        // merged-away beads vanish from the screen
        let other = sim
            .spawn_with(IVec2::new(6, 5), IVec2::new(-1, 0), Rgb::WHITE)
            .unwrap();
        sim.step();
        assert!(sim.bead(id).unwrap().active);
        assert!(!sim.bead(other).unwrap().active);
        paint_screen(&sim, false, &mut fb);
        assert_eq!(fb.get(IVec2::new(6, 5)), Some(palette::FLOOR));
        assert_eq!(fb.get(IVec2::new(5, 5)), Some(color.blend(Rgb::WHITE)));
    }

    #[test]
    fn test_marquee_painted_on_corners() {
        let sim = sim();
        let mut fb = FrameBuffer::new(21, screen_rows(sim.board()));
        paint_screen(&sim, true, &mut fb);
        assert_eq!(fb.get(IVec2::new(0, 0)), Some(palette::MARQUEE));
        assert_eq!(fb.get(IVec2::new(20, 20)), Some(palette::MARQUEE));
    }
}
