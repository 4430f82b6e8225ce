//! Tree growth and reproduction.

use anyhow::Result;
use rand::Rng;

use crate::engine::{System, SystemContext};
use crate::entity::{EntityKind, GrowthStage};
use crate::rng::SystemRng;
use crate::world::World;

pub struct GrowthSystem;

impl GrowthSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GrowthSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for GrowthSystem {
    fn name(&self) -> &'static str {
        "growth"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut World,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        // Snapshot of the registry: saplings dropped this month are first
        // updated next month, and harvested trees are skipped.
        let ids = world.tree_ids().to_vec();
        for id in ids {
            let (pos, stage) = match world.entity(id) {
                Some(entity) => match entity.kind {
                    EntityKind::Tree { stage, .. } => (entity.pos, stage),
                    _ => continue,
                },
                None => continue,
            };

            // Mature and elder trees may drop a sapling on an open neighbor.
            if stage != GrowthStage::Sapling {
                let chance = world.rules().tree.spawn_chance(stage);
                if rng.gen::<f64>() < chance {
                    if let Some(open) = world.grid().random_open_adjacent(pos, rng) {
                        world.spawn_tree(open, GrowthStage::Sapling);
                    }
                }
            }

            world.age_tree(id);
        }
        Ok(())
    }
}
