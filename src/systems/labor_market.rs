//! Labor-market inspection: every `inspection_interval` months the total
//! lumber yield decides whether lumberjacks are hired or let go.

use anyhow::Result;
use rand::Rng;

use crate::engine::{System, SystemContext};
use crate::entity::EntityKind;
use crate::rng::SystemRng;
use crate::world::World;

pub struct LaborMarketSystem;

impl LaborMarketSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LaborMarketSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for LaborMarketSystem {
    fn name(&self) -> &'static str {
        "labor_market"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let interval = world.rules().lumberjack.inspection_interval;
        if interval == 0 || ctx.month % interval != 0 {
            return Ok(());
        }

        let lumber = world.total_lumber();
        let count = world.lumberjack_count() as u64;

        if lumber >= count {
            let hires = (lumber - count) / 10 + 1;
            world.scatter(EntityKind::lumberjack(), hires as usize, rng);
        } else if count > 1 {
            // Fire one lumberjack per unit of shortfall, plus one, but never
            // drop below a single survivor.
            let firings = (count - lumber + 1).min(count - 1);
            for _ in 0..firings {
                let index = rng.gen_range(0..world.lumberjack_count());
                let id = world.lumberjack_ids()[index];
                world.remove(id);
            }
        }

        world.reset_lumber();
        Ok(())
    }
}
