//! Lumberjack movement and harvesting.

use anyhow::Result;

use crate::engine::{System, SystemContext};
use crate::entity::{EntityId, EntityKind, GrowthStage, Species};
use crate::rng::SystemRng;
use crate::world::World;

pub struct LumberjackSystem;

impl LumberjackSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LumberjackSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for LumberjackSystem {
    fn name(&self) -> &'static str {
        "lumberjacks"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut World,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let ids = world.lumberjack_ids().to_vec();
        for id in ids {
            take_turn(id, world, rng);
        }
        Ok(())
    }
}

/// Up to `moves` relocation steps. The turn ends early when the mover is
/// blocked by another lumberjack twice in a row, walks into a bear, or
/// harvests a tree.
fn take_turn(id: EntityId, world: &mut World, rng: &mut SystemRng<'_>) {
    let moves = world.rules().lumberjack.moves;
    let mut step = 0;
    while step < moves {
        let pos = match world.entity(id) {
            Some(entity) => entity.pos,
            None => return,
        };
        let Some(first) = world.grid().random_adjacent(pos, rng) else {
            return;
        };
        let dest = if world.occupant(first, Species::Lumberjack).is_some() {
            let Some(second) = world.grid().random_adjacent(pos, rng) else {
                return;
            };
            if world.occupant(second, Species::Lumberjack).is_some() {
                return;
            }
            second
        } else {
            first
        };

        world.relocate(id, dest);
        step += 1;

        if let Some(bear) = world.occupant(dest, Species::Bear) {
            world.remove(id);
            world.record_attack(bear);
            if world.lumberjack_count() == 0 {
                world.scatter(EntityKind::lumberjack(), 1, rng);
            }
            return;
        }

        if let Some(tree) = world.occupant(dest, Species::Tree) {
            if let Some(stage) = world.tree_stage(tree) {
                // Saplings are left to grow and do not interrupt the walk.
                if stage != GrowthStage::Sapling {
                    world.remove(tree);
                    let gained = world.rules().tree.yield_for(stage);
                    world.add_lumber(id, gained);
                    return;
                }
            }
        }
    }
}
