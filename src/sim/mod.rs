//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per clock tick
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod board;
pub mod collision;
pub mod color;
pub mod marquee;
pub mod state;
pub mod tick;

pub use board::{Board, Occupancy};
pub use collision::{Wall, WallBounce, find_occupant, reflect_off_walls};
pub use color::Rgb;
pub use marquee::{Marquee, MarqueeLight};
pub use state::{
    Bead, BeadId, GameEvent, LaunchDirection, Simulation, SpawnError, random_direction,
};
pub use tick::tick;
