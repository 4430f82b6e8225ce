//! Bear movement and predation. Bears ignore trees entirely.

use anyhow::Result;

use crate::engine::{System, SystemContext};
use crate::entity::{EntityId, EntityKind, Species};
use crate::rng::SystemRng;
use crate::world::World;

pub struct BearSystem;

impl BearSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BearSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for BearSystem {
    fn name(&self) -> &'static str {
        "bears"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut World,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let ids = world.bear_ids().to_vec();
        for id in ids {
            take_turn(id, world, rng);
        }
        Ok(())
    }
}

/// Same movement scheme as the lumberjacks, with a larger step budget and
/// bear-vs-bear collision avoidance. Catching a lumberjack ends the turn.
fn take_turn(id: EntityId, world: &mut World, rng: &mut SystemRng<'_>) {
    let moves = world.rules().bear.moves;
    let mut step = 0;
    while step < moves {
        let pos = match world.entity(id) {
            Some(entity) => entity.pos,
            None => return,
        };
        let Some(first) = world.grid().random_adjacent(pos, rng) else {
            return;
        };
        let dest = if world.occupant(first, Species::Bear).is_some() {
            let Some(second) = world.grid().random_adjacent(pos, rng) else {
                return;
            };
            if world.occupant(second, Species::Bear).is_some() {
                return;
            }
            second
        } else {
            first
        };

        world.relocate(id, dest);
        step += 1;

        if let Some(victim) = world.occupant(dest, Species::Lumberjack) {
            world.remove(victim);
            world.record_attack(id);
            if world.lumberjack_count() == 0 {
                world.scatter(EntityKind::lumberjack(), 1, rng);
            }
            return;
        }
    }
}
