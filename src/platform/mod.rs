//! Platform abstraction layer
//!
//! The pieces the simulation needs from its host:
//! - Render sink (cell colours)
//! - Fixed-rate clock
//! - Pointer to cell mapping

pub mod input;
pub mod sink;
pub mod time;

pub use input::{ScreenGrid, pointer_to_cell};
pub use sink::{CellSink, FrameBuffer};
pub use time::FixedClock;
