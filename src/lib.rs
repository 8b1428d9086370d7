//! Bead Bounce - coloured beads bouncing around a walled grid
//!
//! Core modules:
//! - `sim`: Deterministic simulation (beads, wall reflection, merging)
//! - `platform`: Render sink, fixed clock and pointer mapping
//! - `renderer`: WebGPU rendering pipeline
//! - `ui`: Control panel and status line
//! - `settings`: Persisted preferences
//! - `audio`: Tone tables and Web Audio playback

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use settings::{Settings, SettingsError};
pub use sim::{Bead, BeadId, Rgb, Simulation, SpawnError};

/// Game configuration constants
pub mod consts {
    /// Host engine frame rate (frames per second)
    pub const ENGINE_FPS: u32 = 60;
    /// Engine frames between simulation ticks
    pub const TICK_FRAMES: u32 = 3;
    /// Maximum ticks run per rendered frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default board dimensions (including the wall ring)
    pub const BOARD_WIDTH: i32 = 21;
    pub const BOARD_HEIGHT: i32 = 21;
    /// Smallest board that still has an interior cell
    pub const MIN_BOARD_SIZE: i32 = 3;
    /// Largest board the host grid supports
    pub const MAX_BOARD_SIZE: i32 = 32;

    /// Control panel rows below the board, plus the closing wall row
    pub const PANEL_ROWS: i32 = 3;
    pub const SCREEN_EXTRA_ROWS: i32 = PANEL_ROWS + 1;

    /// Number of selectable sound sets
    pub const SOUND_SETS: u8 = 7;

    /// Number of marquee lights running around the wall ring
    pub const MARQUEE_LIGHTS: usize = 4;

    /// Tick period in seconds for a given number of engine frames
    pub fn tick_period(frames: u32) -> f32 {
        frames as f32 / ENGINE_FPS as f32
    }
}
