//! Wildlife inspection: every `inspection_interval` months the attack count
//! decides whether a bear is introduced or trapped.

use anyhow::Result;
use rand::Rng;

use crate::engine::{System, SystemContext};
use crate::entity::EntityKind;
use crate::rng::SystemRng;
use crate::world::World;

pub struct WildlifePolicySystem;

impl WildlifePolicySystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WildlifePolicySystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for WildlifePolicySystem {
    fn name(&self) -> &'static str {
        "wildlife_policy"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let interval = world.rules().bear.inspection_interval;
        if interval == 0 || ctx.month % interval != 0 {
            return Ok(());
        }

        if world.total_attacks() == 0 {
            world.scatter(EntityKind::bear(), 1, rng);
        } else if world.bear_count() > 0 {
            let index = rng.gen_range(0..world.bear_count());
            let id = world.bear_ids()[index];
            world.remove(id);
        }

        world.reset_attacks();
        Ok(())
    }
}
