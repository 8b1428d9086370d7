//! Fixed-rate simulation clock
//!
//! Frame times arrive at whatever rate the browser paints; the simulation
//! wants a tick every `period` seconds. The clock accumulates real time and
//! hands out whole ticks, capped per frame so a stalled tab does not
//! fast-forward through hundreds of ticks at once.

use crate::consts::MAX_SUBSTEPS;

#[derive(Debug, Clone)]
pub struct FixedClock {
    period: f32,
    accumulator: f32,
}

impl FixedClock {
    /// Frame deltas are clamped to this before accumulating (seconds)
    const MAX_FRAME_DT: f32 = 0.25;

    pub fn new(period: f32) -> Self {
        Self {
            period: period.max(f32::EPSILON),
            accumulator: 0.0,
        }
    }

    /// Add `dt` seconds of frame time and return the number of ticks due
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, Self::MAX_FRAME_DT);

        let mut ticks = 0;
        while self.accumulator >= self.period && ticks < MAX_SUBSTEPS {
            self.accumulator -= self.period;
            ticks += 1;
        }
        // Drop the backlog we refused to run
        if ticks == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(self.period);
        }
        ticks
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_partial_frames() {
        let mut clock = FixedClock::new(0.05);
        assert_eq!(clock.advance(0.02), 0);
        assert_eq!(clock.advance(0.02), 0);
        assert_eq!(clock.advance(0.02), 1);
    }

    #[test]
    fn test_multiple_ticks_per_frame() {
        let mut clock = FixedClock::new(0.05);
        assert_eq!(clock.advance(0.16), 3);
    }

    #[test]
    fn test_substep_cap() {
        // 0.2s is 20 periods due, more than one frame may run
        let mut clock = FixedClock::new(0.01);
        assert_eq!(clock.advance(0.2), MAX_SUBSTEPS);
        // backlog dropped: at most one more period is carried over
        assert!(clock.advance(0.0) <= 1);
    }

    #[test]
    fn test_negative_dt_ignored() {
        let mut clock = FixedClock::new(0.05);
        assert_eq!(clock.advance(-1.0), 0);
        clock.reset();
        assert_eq!(clock.advance(0.05), 1);
    }
}
