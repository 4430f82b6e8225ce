//! Scenario files: the injected configuration surface of the simulation.
//!
//! Everything tunable lives here: grid size, starting densities, growth
//! thresholds, reproduction chances, harvest yields, move budgets and
//! inspection intervals. Defaults match the classic forest parameters, so a
//! scenario only has to name what it changes.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use thiserror::Error;

use crate::entity::{EntityKind, GrowthStage};
use crate::world::World;

fn default_months() -> u64 {
    4800
}

fn default_dimension() -> u32 {
    100
}

fn default_tick_delay_ms() -> u64 {
    100
}

fn default_tree_density() -> f64 {
    0.5
}

fn default_lumberjack_density() -> f64 {
    0.1
}

fn default_bear_density() -> f64 {
    0.02
}

fn default_mature_age() -> u32 {
    12
}

fn default_elder_age() -> u32 {
    120
}

fn default_mature_spawn_chance() -> f64 {
    0.1
}

fn default_elder_spawn_chance() -> f64 {
    0.2
}

fn default_mature_yield() -> u64 {
    1
}

fn default_elder_yield() -> u64 {
    2
}

fn default_lumberjack_moves() -> u32 {
    3
}

fn default_bear_moves() -> u32 {
    5
}

fn default_inspection_interval() -> u64 {
    12
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    pub seed: u64,
    #[serde(default = "default_months")]
    pub months: u64,
    #[serde(default = "default_dimension")]
    pub width: u32,
    #[serde(default = "default_dimension")]
    pub height: u32,
    /// Inter-tick delay for the live renderer; purely cosmetic.
    #[serde(default = "default_tick_delay_ms")]
    pub tick_delay_ms: u64,
    #[serde(default)]
    pub spawn: SpawnDensities,
    #[serde(default)]
    pub rules: Rules,
}

/// Starting populations as fractions of the cell count.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SpawnDensities {
    #[serde(default = "default_tree_density")]
    pub trees: f64,
    #[serde(default = "default_lumberjack_density")]
    pub lumberjacks: f64,
    #[serde(default = "default_bear_density")]
    pub bears: f64,
}

impl Default for SpawnDensities {
    fn default() -> Self {
        Self {
            trees: default_tree_density(),
            lumberjacks: default_lumberjack_density(),
            bears: default_bear_density(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Rules {
    #[serde(default)]
    pub tree: TreeRules,
    #[serde(default)]
    pub lumberjack: LumberjackRules,
    #[serde(default)]
    pub bear: BearRules,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TreeRules {
    #[serde(default = "default_mature_age")]
    pub mature_age: u32,
    #[serde(default = "default_elder_age")]
    pub elder_age: u32,
    #[serde(default = "default_mature_spawn_chance")]
    pub mature_spawn_chance: f64,
    #[serde(default = "default_elder_spawn_chance")]
    pub elder_spawn_chance: f64,
    #[serde(default = "default_mature_yield")]
    pub mature_yield: u64,
    #[serde(default = "default_elder_yield")]
    pub elder_yield: u64,
}

impl TreeRules {
    /// Chance of dropping a sapling on an open neighbor this tick.
    pub fn spawn_chance(&self, stage: GrowthStage) -> f64 {
        match stage {
            GrowthStage::Sapling => 0.0,
            GrowthStage::Mature => self.mature_spawn_chance,
            GrowthStage::Elder => self.elder_spawn_chance,
        }
    }

    /// Lumber gained by harvesting a tree of the given stage. Saplings are
    /// never harvested.
    pub fn yield_for(&self, stage: GrowthStage) -> u64 {
        match stage {
            GrowthStage::Sapling => 0,
            GrowthStage::Mature => self.mature_yield,
            GrowthStage::Elder => self.elder_yield,
        }
    }
}

impl Default for TreeRules {
    fn default() -> Self {
        Self {
            mature_age: default_mature_age(),
            elder_age: default_elder_age(),
            mature_spawn_chance: default_mature_spawn_chance(),
            elder_spawn_chance: default_elder_spawn_chance(),
            mature_yield: default_mature_yield(),
            elder_yield: default_elder_yield(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LumberjackRules {
    #[serde(default = "default_lumberjack_moves")]
    pub moves: u32,
    #[serde(default = "default_inspection_interval")]
    pub inspection_interval: u64,
}

impl Default for LumberjackRules {
    fn default() -> Self {
        Self {
            moves: default_lumberjack_moves(),
            inspection_interval: default_inspection_interval(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BearRules {
    #[serde(default = "default_bear_moves")]
    pub moves: u32,
    #[serde(default = "default_inspection_interval")]
    pub inspection_interval: u64,
}

impl Default for BearRules {
    fn default() -> Self {
        Self {
            moves: default_bear_moves(),
            inspection_interval: default_inspection_interval(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario validation error: {0}")]
    Validation(String),
}

impl Scenario {
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.width == 0 || self.height == 0 {
            return Err(ScenarioError::Validation(
                "grid dimensions must be non-zero".into(),
            ));
        }
        for (label, density) in [
            ("trees", self.spawn.trees),
            ("lumberjacks", self.spawn.lumberjacks),
            ("bears", self.spawn.bears),
        ] {
            if !(0.0..=1.0).contains(&density) {
                return Err(ScenarioError::Validation(format!(
                    "spawn density for {label} must be within [0, 1], got {density}"
                )));
            }
        }
        for (label, chance) in [
            ("mature trees", self.rules.tree.mature_spawn_chance),
            ("elder trees", self.rules.tree.elder_spawn_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(ScenarioError::Validation(format!(
                    "sapling spawn chance for {label} must be within [0, 1], got {chance}"
                )));
            }
        }
        if self.rules.tree.mature_age > self.rules.tree.elder_age {
            return Err(ScenarioError::Validation(format!(
                "mature age {} exceeds elder age {}",
                self.rules.tree.mature_age, self.rules.tree.elder_age
            )));
        }
        Ok(())
    }

    /// Build the starting world: scatter `floor(density * cells)` of each
    /// species from a generator seeded with the scenario seed. Starting
    /// trees are mature at age zero.
    pub fn build_world(&self) -> World {
        let mut world = World::new(self.width, self.height, self.rules);
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let cells = world.grid().cell_count() as f64;
        world.scatter(
            EntityKind::tree(GrowthStage::Mature),
            (self.spawn.trees * cells).floor() as usize,
            &mut rng,
        );
        world.scatter(
            EntityKind::lumberjack(),
            (self.spawn.lumberjacks * cells).floor() as usize,
            &mut rng,
        );
        world.scatter(
            EntityKind::bear(),
            (self.spawn.bears * cells).floor() as usize,
            &mut rng,
        );
        world
    }

    pub fn months(&self, override_months: Option<u64>) -> u64 {
        override_months.unwrap_or(self.months)
    }
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        scenario.validate()?;
        Ok(scenario)
    }
}
