//! Fixed timestep simulation tick
//!
//! One tick moves every active bead one cell, reflects it off the wall ring
//! and merges it into any bead already sitting on its destination.

use glam::IVec2;

use super::collision::{find_occupant, reflect_off_walls};
use super::state::{BeadId, GameEvent, Simulation};

impl Simulation {
    /// Advance every active bead by one step
    ///
    /// Beads move in spawn order. The set of movers is snapshotted up front,
    /// so a bead absorbed earlier in the pass is never moved and no bead is
    /// visited twice. A bead landing on an occupied cell is absorbed: it goes
    /// inactive and the stationary occupant takes the average colour.
    pub fn step(&mut self) {
        let movers: Vec<BeadId> = self
            .order
            .iter()
            .copied()
            .filter(|&id| self.beads.get(id).is_some_and(|b| b.active))
            .collect();

        for id in movers {
            let Some(bead) = self.beads.get(id) else {
                continue;
            };
            if !bead.active {
                continue;
            }
            let from = bead.pos;
            let bounce = reflect_off_walls(&self.board, bead.pos, bead.vel);

            for wall in bounce.walls() {
                self.events.push(GameEvent::WallHit { bead: id, wall });
            }

            match find_occupant(&self.occupancy, bounce.pos, id) {
                Some(survivor) => self.merge(id, survivor, from, bounce.vel),
                None => {
                    self.occupancy.release(from, id);
                    self.occupancy.set(bounce.pos, id);
                    let bead = &mut self.beads[id];
                    bead.pos = bounce.pos;
                    bead.vel = bounce.vel;
                }
            }
        }

        self.active_count = self.beads.values().filter(|b| b.active).count();
        debug_assert_eq!(self.occupancy.count(), self.active_count);
    }

    /// `mover` (leaving `from`) runs into `survivor`
    fn merge(&mut self, mover: BeadId, survivor: BeadId, from: IVec2, vel: IVec2) {
        self.occupancy.release(from, mover);

        let absorbed = &mut self.beads[mover];
        absorbed.vel = vel;
        absorbed.active = false;
        let absorbed_color = absorbed.color;

        let kept = &mut self.beads[survivor];
        kept.color = kept.color.blend(absorbed_color);
        let (cell, color) = (kept.pos, kept.color);

        self.events.push(GameEvent::Merged {
            survivor,
            absorbed: mover,
            cell,
            color,
        });
        log::info!("Collision at ({}, {}) -> {}", cell.x, cell.y, color);
    }
}

/// Advance the whole game by one clock tick (beads, then border lights)
pub fn tick(sim: &mut Simulation) {
    sim.step();
    let board = sim.board;
    sim.marquee.advance(&board);
    sim.time_ticks += 1;
}
