pub mod engine;
pub mod entity;
pub mod grid;
pub mod render;
pub mod rng;
pub mod scenario;
pub mod systems;
pub mod world;

pub use engine::{Engine, EngineBuilder, EngineSettings, RunOutcome, TickSummary};
pub use scenario::{Scenario, ScenarioLoader};
pub use world::World;
