//! Scenario loading, determinism, and termination.

use std::fs;
use std::path::PathBuf;

use timberline::engine::{Engine, EngineBuilder, EngineSettings};
use timberline::entity::GrowthStage;
use timberline::grid::GridPos;
use timberline::scenario::{Rules, ScenarioLoader};
use timberline::systems::{
    BearSystem, GrowthSystem, LaborMarketSystem, LumberjackSystem, WildlifePolicySystem,
};
use timberline::World;

fn scenario_loader() -> ScenarioLoader {
    ScenarioLoader::new(env!("CARGO_MANIFEST_DIR"))
}

fn build_engine(name: &str, seed: u64) -> Engine {
    let settings = EngineSettings {
        scenario_name: name.into(),
        seed,
    };
    EngineBuilder::new(settings)
        .with_system(GrowthSystem::new())
        .with_system(LumberjackSystem::new())
        .with_system(BearSystem::new())
        .with_system(LaborMarketSystem::new())
        .with_system(WildlifePolicySystem::new())
        .build()
}

#[test]
fn scenario_loader_reads_fixture() {
    let scenario = scenario_loader()
        .load(PathBuf::from("scenarios/glade.yaml"))
        .expect("scenario parses");
    assert_eq!(scenario.name, "glade");
    assert_eq!((scenario.width, scenario.height), (12, 8));
    assert_eq!(scenario.months, 240);
    // Unspecified sections fall back to the classic rules.
    assert_eq!(scenario.rules.tree.elder_age, 120);
}

#[test]
fn scenario_loader_reports_missing_and_invalid_files() {
    let loader = scenario_loader();
    assert!(loader.load(PathBuf::from("scenarios/nope.yaml")).is_err());

    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.yaml");
    fs::write(&bad, "name: bad\nseed: 1\nwidth: 0\n").unwrap();
    assert!(ScenarioLoader::new(dir.path()).load("bad.yaml").is_err());
}

#[test]
fn scenario_written_to_disk_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("patch.yaml");
    fs::write(
        &path,
        "name: patch\nseed: 3\nwidth: 6\nheight: 4\nrules:\n  bear:\n    moves: 2\n",
    )
    .unwrap();

    let scenario = ScenarioLoader::new(dir.path()).load("patch.yaml").unwrap();
    assert_eq!(scenario.rules.bear.moves, 2);
    assert_eq!(scenario.rules.lumberjack.moves, 3);
    let world = scenario.build_world();
    assert_eq!(world.grid().cell_count(), 24);
}

#[test]
fn same_seed_same_trajectory() {
    let scenario = scenario_loader()
        .load(PathBuf::from("scenarios/glade.yaml"))
        .unwrap();

    let mut world_a = scenario.build_world();
    let mut engine_a = build_engine(&scenario.name, scenario.seed);
    engine_a.run(&mut world_a, 60).unwrap();

    let mut world_b = scenario.build_world();
    let mut engine_b = build_engine(&scenario.name, scenario.seed);
    engine_b.run(&mut world_b, 60).unwrap();

    assert_eq!(world_a.census(), world_b.census());
    assert_eq!(world_a.total_lumber(), world_b.total_lumber());
    assert_eq!(world_a.total_attacks(), world_b.total_attacks());
}

#[test]
fn tree_extinction_ends_the_run_early() {
    // A corridor where the only tree is harvested in the first month.
    let mut world = World::new(1, 2, Rules::default());
    world.spawn_tree(GridPos::new(0, 1), GrowthStage::Mature);
    world.spawn_lumberjack(GridPos::new(0, 0));

    let mut engine = build_engine("corridor", 11);
    let outcome = engine.run(&mut world, 4800).unwrap();

    assert!(outcome.extinct);
    assert_eq!(outcome.months_simulated, 1);
    assert_eq!(world.tree_count(), 0);
}

#[test]
fn a_world_without_trees_never_ticks() {
    let mut world = World::new(3, 3, Rules::default());
    world.spawn_lumberjack(GridPos::new(0, 0));

    let mut engine = build_engine("barren", 11);
    let outcome = engine.run(&mut world, 4800).unwrap();

    assert!(outcome.extinct);
    assert_eq!(outcome.months_simulated, 0);
    assert_eq!(world.month(), 1);
}

#[test]
fn month_budget_bounds_the_run() {
    // One untouched tree: the run ends on the budget, not on extinction.
    let mut world = World::new(2, 2, Rules::default());
    world.spawn_tree(GridPos::new(0, 0), GrowthStage::Sapling);

    let mut engine = build_engine("patience", 11);
    let outcome = engine.run(&mut world, 5).unwrap();

    assert!(!outcome.extinct);
    assert_eq!(outcome.months_simulated, 4);
    assert!(world.tree_count() >= 1);
}

#[test]
fn entity_updates_run_before_policies_in_a_tick() {
    // At month 12 a lone bear finds no lumberjack, so its attack tally is
    // still zero when the wildlife inspection runs and a second bear is
    // introduced in the same tick.
    let mut world = World::new(4, 4, Rules::default());
    world.spawn_tree(GridPos::new(0, 0), GrowthStage::Sapling);
    world.spawn_bear(GridPos::new(3, 3));

    let mut engine = build_engine("ordering", 11);
    for _ in 0..12 {
        engine.tick(&mut world).unwrap();
    }
    assert_eq!(world.bear_count(), 2);
    assert_eq!(world.month(), 13);
}
