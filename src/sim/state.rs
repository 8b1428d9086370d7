//! Simulation state and core bead types
//!
//! Everything the tick needs lives in one owned [`Simulation`]. Beads are
//! stored in an arena keyed by stable [`BeadId`] handles; merged beads are
//! flagged inactive rather than removed, so a pass over the beads can never
//! skip or revisit one.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

use super::board::{Board, Occupancy};
use super::collision::Wall;
use super::color::Rgb;
use super::marquee::Marquee;
use crate::consts::SOUND_SETS;
use crate::settings::Settings;

new_key_type! {
    /// Stable handle to a bead
    pub struct BeadId;
}

/// A single bead on the board
#[derive(Debug, Clone, PartialEq)]
pub struct Bead {
    /// Current cell
    pub pos: IVec2,
    /// Per-tick step, each component in {-1, 0, 1}, never both zero
    pub vel: IVec2,
    pub color: Rgb,
    /// Inactive beads were absorbed by a merge; they never move or draw
    pub active: bool,
}

/// Direction given to newly spawned beads
///
/// Deserialized values go through [`LaunchDirection::fixed`], so stored
/// settings can never produce a stationary or multi-cell step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "StoredDirection")]
pub enum LaunchDirection {
    /// Pick a random non-zero direction per bead
    #[default]
    Random,
    /// Every new bead moves this way
    Fixed { dx: i8, dy: i8 },
}

/// Wire form of [`LaunchDirection`] before normalisation
#[derive(Deserialize)]
enum StoredDirection {
    Random,
    Fixed { dx: i32, dy: i32 },
}

impl From<StoredDirection> for LaunchDirection {
    fn from(stored: StoredDirection) -> Self {
        match stored {
            StoredDirection::Random => LaunchDirection::Random,
            StoredDirection::Fixed { dx, dy } => LaunchDirection::fixed(dx, dy),
        }
    }
}

impl LaunchDirection {
    /// Fixed direction from any integer pair (components reduced to their
    /// sign). `(0, 0)` means random.
    pub fn fixed(dx: i32, dy: i32) -> Self {
        let (dx, dy) = (dx.signum() as i8, dy.signum() as i8);
        if dx == 0 && dy == 0 {
            LaunchDirection::Random
        } else {
            LaunchDirection::Fixed { dx, dy }
        }
    }

    /// Direction for the next spawn
    pub fn pick<R: Rng>(self, rng: &mut R) -> IVec2 {
        match self {
            LaunchDirection::Random => random_direction(rng),
            LaunchDirection::Fixed { dx, dy } => IVec2::new(dx as i32, dy as i32),
        }
    }

    /// Offset on the 3x3 direction pad (centre is random)
    pub fn as_offset(self) -> IVec2 {
        match self {
            LaunchDirection::Random => IVec2::ZERO,
            LaunchDirection::Fixed { dx, dy } => IVec2::new(dx as i32, dy as i32),
        }
    }
}

/// Random step with each axis in {-1, 0, 1}; `(0, 0)` becomes `(1, 0)`
pub fn random_direction<R: Rng>(rng: &mut R) -> IVec2 {
    let dx = rng.random_range(-1..=1);
    let dy = rng.random_range(-1..=1);
    if dx == 0 && dy == 0 {
        IVec2::new(1, 0)
    } else {
        IVec2::new(dx, dy)
    }
}

/// Something the front end may want to react to (sound, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Spawned { bead: BeadId, cell: IVec2, color: Rgb },
    WallHit { bead: BeadId, wall: Wall },
    /// `absorbed` moved onto `survivor`, which now has `color`
    Merged {
        survivor: BeadId,
        absorbed: BeadId,
        cell: IVec2,
        color: Rgb,
    },
    Reset { cleared: usize },
    SoundSetChanged { set: u8 },
}

/// Why a bead could not be spawned
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SpawnError {
    #[error("cell ({x}, {y}) is outside the board")]
    OutOfBounds { x: i32, y: i32 },
    #[error("cell ({x}, {y}) is a wall")]
    Wall { x: i32, y: i32 },
    #[error("cell ({x}, {y}) already holds a bead")]
    Occupied { x: i32, y: i32 },
    #[error("bead velocity must be non-zero")]
    Stationary,
}

/// Complete simulation state (deterministic for a given seed and input)
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Direction for future spawns
    pub launch_direction: LaunchDirection,
    /// Border lights
    pub marquee: Marquee,
    pub(super) board: Board,
    pub(super) beads: SlotMap<BeadId, Bead>,
    /// Spawn order, the stable iteration order for stepping
    pub(super) order: Vec<BeadId>,
    pub(super) occupancy: Occupancy,
    pub(super) active_count: usize,
    pub(super) events: Vec<GameEvent>,
    rng: Pcg32,
    sound_set: u8,
}

impl Simulation {
    /// Create an empty simulation on `board`
    pub fn new(board: Board, seed: u64) -> Self {
        Self {
            seed,
            time_ticks: 0,
            launch_direction: LaunchDirection::Random,
            marquee: Marquee::new(&board),
            board,
            beads: SlotMap::with_key(),
            order: Vec::new(),
            occupancy: Occupancy::new(board),
            active_count: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            sound_set: 0,
        }
    }

    /// Create from persisted settings; `fallback_seed` is used when the
    /// settings do not pin one
    pub fn from_settings(settings: &Settings, fallback_seed: u64) -> Self {
        let board = Board::new(settings.board_width, settings.board_height);
        let mut sim = Self::new(board, settings.seed.unwrap_or(fallback_seed));
        sim.launch_direction = settings.launch_direction;
        sim.sound_set = settings.sound_set.min(SOUND_SETS - 1);
        sim
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of beads still in play
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// Number of beads ever spawned since the last reset (active or not)
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn bead(&self, id: BeadId) -> Option<&Bead> {
        self.beads.get(id)
    }

    /// All beads in spawn order
    pub fn beads(&self) -> impl Iterator<Item = (BeadId, &Bead)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.beads.get(id).map(|b| (id, b)))
    }

    /// Active beads in spawn order
    pub fn active_beads(&self) -> impl Iterator<Item = (BeadId, &Bead)> + '_ {
        self.beads().filter(|(_, b)| b.active)
    }

    /// Active bead on `cell`, if any
    pub fn occupant(&self, cell: IVec2) -> Option<BeadId> {
        self.occupancy.get(cell)
    }

    pub fn sound_set(&self) -> u8 {
        self.sound_set
    }

    /// Spawn a bead with a random colour and the current launch direction
    pub fn spawn(&mut self, cell: IVec2) -> Result<BeadId, SpawnError> {
        self.check_spawn_cell(cell)?;
        let color = Rgb::random(&mut self.rng);
        let vel = self.launch_direction.pick(&mut self.rng);
        Ok(self.insert(cell, vel, color))
    }

    /// Spawn a bead with an explicit velocity and colour (components of
    /// `vel` are reduced to their sign)
    pub fn spawn_with(&mut self, cell: IVec2, vel: IVec2, color: Rgb) -> Result<BeadId, SpawnError> {
        let vel = vel.signum();
        if vel == IVec2::ZERO {
            return Err(SpawnError::Stationary);
        }
        self.check_spawn_cell(cell)?;
        Ok(self.insert(cell, vel, color))
    }

    fn check_spawn_cell(&self, cell: IVec2) -> Result<(), SpawnError> {
        let (x, y) = (cell.x, cell.y);
        if !self.board.contains(cell) {
            return Err(SpawnError::OutOfBounds { x, y });
        }
        if !self.board.is_interior(cell) {
            return Err(SpawnError::Wall { x, y });
        }
        if self.occupancy.get(cell).is_some() {
            return Err(SpawnError::Occupied { x, y });
        }
        Ok(())
    }

    fn insert(&mut self, cell: IVec2, vel: IVec2, color: Rgb) -> BeadId {
        let id = self.beads.insert(Bead {
            pos: cell,
            vel,
            color,
            active: true,
        });
        self.order.push(id);
        self.occupancy.set(cell, id);
        self.active_count += 1;
        self.events.push(GameEvent::Spawned {
            bead: id,
            cell,
            color,
        });
        log::debug!(
            "Spawned bead {:?} at ({}, {}) heading ({}, {}) colour {}",
            id,
            cell.x,
            cell.y,
            vel.x,
            vel.y,
            color
        );
        id
    }

    /// Remove every bead; launch direction and sound set are kept
    pub fn reset(&mut self) {
        let cleared = self.order.len();
        self.beads.clear();
        self.order.clear();
        self.occupancy.clear();
        self.active_count = 0;
        self.events.push(GameEvent::Reset { cleared });
        log::info!("Board reset ({} beads cleared)", cleared);
    }

    /// Step the sound set by `delta`; changes that leave the valid range are
    /// ignored. Returns whether the set changed.
    pub fn change_sound_set(&mut self, delta: i32) -> bool {
        let next = self.sound_set as i32 + delta;
        if delta == 0 || next < 0 || next >= SOUND_SETS as i32 {
            return false;
        }
        self.sound_set = next as u8;
        self.events.push(GameEvent::SoundSetChanged {
            set: self.sound_set,
        });
        log::info!("Sound set -> {}", self.sound_set);
        true
    }

    /// Events since the last call, oldest first
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim() -> Simulation {
        Simulation::new(Board::new(21, 21), 12345)
    }

    #[test]
    fn test_spawn_interior() {
        let mut sim = sim();
        let id = sim.spawn(IVec2::new(5, 6)).expect("interior spawn");
        let bead = sim.bead(id).unwrap();
        assert_eq!(bead.pos, IVec2::new(5, 6));
        assert!(bead.active);
        assert_ne!(bead.vel, IVec2::ZERO);
        assert!(bead.vel.x.abs() <= 1 && bead.vel.y.abs() <= 1);
        assert_eq!(sim.active_count(), 1);
        assert_eq!(sim.occupant(IVec2::new(5, 6)), Some(id));
    }

    #[test]
    fn test_spawn_rejects_wall_and_outside() {
        let mut sim = sim();
        assert_eq!(
            sim.spawn(IVec2::new(0, 5)),
            Err(SpawnError::Wall { x: 0, y: 5 })
        );
        assert_eq!(
            sim.spawn(IVec2::new(20, 20)),
            Err(SpawnError::Wall { x: 20, y: 20 })
        );
        assert_eq!(
            sim.spawn(IVec2::new(21, 3)),
            Err(SpawnError::OutOfBounds { x: 21, y: 3 })
        );
        assert_eq!(sim.active_count(), 0);
        assert!(sim.is_empty());
        assert!(sim.take_events().is_empty());
    }

    #[test]
    fn test_spawn_rejects_occupied_cell() {
        let mut sim = sim();
        sim.spawn(IVec2::new(3, 3)).unwrap();
        assert_eq!(
            sim.spawn(IVec2::new(3, 3)),
            Err(SpawnError::Occupied { x: 3, y: 3 })
        );
        assert_eq!(sim.active_count(), 1);
    }

    #[test]
    fn test_spawn_with_normalizes_velocity() {
        let mut sim = sim();
        let id = sim
            .spawn_with(IVec2::new(4, 4), IVec2::new(5, -3), Rgb::WHITE)
            .unwrap();
        assert_eq!(sim.bead(id).unwrap().vel, IVec2::new(1, -1));
        assert_eq!(
            sim.spawn_with(IVec2::new(6, 6), IVec2::ZERO, Rgb::WHITE),
            Err(SpawnError::Stationary)
        );
    }

    #[test]
    fn test_fixed_launch_direction() {
        let mut sim = sim();
        sim.launch_direction = LaunchDirection::fixed(-1, 1);
        for x in 1..10 {
            let id = sim.spawn(IVec2::new(x, 2)).unwrap();
            assert_eq!(sim.bead(id).unwrap().vel, IVec2::new(-1, 1));
        }
        assert_eq!(LaunchDirection::fixed(0, 0), LaunchDirection::Random);
        assert_eq!(
            LaunchDirection::fixed(7, 0),
            LaunchDirection::Fixed { dx: 1, dy: 0 }
        );
    }

    #[test]
    fn test_random_direction_never_stationary() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2000 {
            let d = random_direction(&mut rng);
            assert_ne!(d, IVec2::ZERO);
            seen.insert((d.x, d.y));
        }
        // all eight headings show up
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = sim();
        let mut b = sim();
        for x in 1..15 {
            let ia = a.spawn(IVec2::new(x, 7)).unwrap();
            let ib = b.spawn(IVec2::new(x, 7)).unwrap();
            assert_eq!(a.bead(ia), b.bead(ib));
        }
    }

    #[test]
    fn test_reset_clears_beads_keeps_preferences() {
        let mut sim = sim();
        sim.launch_direction = LaunchDirection::fixed(1, 1);
        sim.change_sound_set(2);
        sim.spawn(IVec2::new(2, 2)).unwrap();
        sim.spawn(IVec2::new(3, 2)).unwrap();
        sim.take_events();

        sim.reset();
        assert_eq!(sim.active_count(), 0);
        assert!(sim.is_empty());
        assert_eq!(sim.occupant(IVec2::new(2, 2)), None);
        assert_eq!(sim.launch_direction, LaunchDirection::Fixed { dx: 1, dy: 1 });
        assert_eq!(sim.sound_set(), 2);
        assert_eq!(sim.take_events(), vec![GameEvent::Reset { cleared: 2 }]);
    }

    #[test]
    fn test_sound_set_clamped() {
        let mut sim = sim();
        assert!(!sim.change_sound_set(-1));
        assert_eq!(sim.sound_set(), 0);
        for _ in 0..10 {
            sim.change_sound_set(1);
        }
        assert_eq!(sim.sound_set(), SOUND_SETS - 1);
        assert!(!sim.change_sound_set(1));
        assert!(sim.change_sound_set(-1));
        assert_eq!(sim.sound_set(), SOUND_SETS - 2);
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            board_width: 9,
            board_height: 7,
            seed: Some(42),
            sound_set: 3,
            launch_direction: LaunchDirection::fixed(0, -1),
            ..Default::default()
        };
        let sim = Simulation::from_settings(&settings, 999);
        assert_eq!(sim.seed, 42);
        assert_eq!(sim.board().width(), 9);
        assert_eq!(sim.board().height(), 7);
        assert_eq!(sim.sound_set(), 3);
        assert_eq!(sim.launch_direction, LaunchDirection::Fixed { dx: 0, dy: -1 });
    }
}
