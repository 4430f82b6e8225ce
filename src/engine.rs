//! The simulation clock: an ordered list of systems run once per month.
//!
//! Ordering is the correctness contract: growth before harvesting before
//! predation before the two inspection policies. The engine runs systems
//! strictly in registration order, each to completion, on a single thread.

use anyhow::Result;

use crate::rng::{RngManager, SystemRng};
use crate::world::World;

pub struct EngineSettings {
    pub scenario_name: String,
    pub seed: u64,
}

pub struct EngineBuilder {
    settings: EngineSettings,
    systems: Vec<Box<dyn System>>,
}

impl EngineBuilder {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            systems: Vec::new(),
        }
    }

    pub fn with_system(mut self, system: impl System + 'static) -> Self {
        self.systems.push(Box::new(system));
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            rng: RngManager::new(self.settings.seed),
            systems: self.systems,
            settings: self.settings,
        }
    }
}

pub struct Engine {
    rng: RngManager,
    systems: Vec<Box<dyn System>>,
    settings: EngineSettings,
}

impl Engine {
    /// Simulate one month: run every system against the current month, then
    /// advance the counter. Returns the counts observed after the systems
    /// ran, for the renderer.
    pub fn tick(&mut self, world: &mut World) -> Result<TickSummary> {
        let month = world.month();
        for system in &mut self.systems {
            let mut rng = self.rng.stream(system.name());
            let ctx = SystemContext {
                month,
                scenario_name: &self.settings.scenario_name,
            };
            system.run(&ctx, world, &mut rng)?;
        }
        let census = world.census();
        let summary = TickSummary {
            month: census.month,
            trees: census.trees,
            lumberjacks: census.lumberjacks,
            bears: census.bears,
        };
        world.advance_month();
        Ok(summary)
    }

    /// Run until the month budget is exhausted or the trees are gone. Tree
    /// extinction is a terminal condition, not an error.
    pub fn run(&mut self, world: &mut World, max_months: u64) -> Result<RunOutcome> {
        while world.month() < max_months && world.tree_count() > 0 {
            self.tick(world)?;
        }
        Ok(RunOutcome {
            months_simulated: world.month().saturating_sub(1),
            extinct: world.tree_count() == 0,
        })
    }

    pub fn scenario_name(&self) -> &str {
        &self.settings.scenario_name
    }
}

/// Per-tick context handed to every system.
pub struct SystemContext<'a> {
    pub month: u64,
    pub scenario_name: &'a str,
}

pub trait System {
    fn name(&self) -> &'static str;
    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        rng: &mut SystemRng<'_>,
    ) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    pub month: u64,
    pub trees: usize,
    pub lumberjacks: usize,
    pub bears: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub months_simulated: u64,
    pub extinct: bool,
}
