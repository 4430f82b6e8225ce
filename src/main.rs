use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use timberline::{
    engine::{EngineBuilder, EngineSettings},
    render,
    scenario::ScenarioLoader,
    systems::{
        BearSystem, GrowthSystem, LaborMarketSystem, LumberjackSystem, WildlifePolicySystem,
    },
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Forest ecology simulator")]
struct Cli {
    /// Path to the scenario YAML file
    #[arg(long, default_value = "scenarios/forest.yaml")]
    scenario: PathBuf,

    /// Override the month budget (uses the scenario default when omitted)
    #[arg(long)]
    months: Option<u64>,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the inter-tick delay in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Plain symbols, no ANSI colors
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loader = ScenarioLoader::new(".");
    let mut scenario = loader.load(&cli.scenario)?;
    if let Some(seed) = cli.seed {
        scenario.seed = seed;
    }
    let months = scenario.months(cli.months);
    let delay = Duration::from_millis(cli.delay_ms.unwrap_or(scenario.tick_delay_ms));

    let mut world = scenario.build_world();
    let settings = EngineSettings {
        scenario_name: scenario.name.clone(),
        seed: scenario.seed,
    };
    let mut engine = EngineBuilder::new(settings)
        .with_system(GrowthSystem::new())
        .with_system(LumberjackSystem::new())
        .with_system(BearSystem::new())
        .with_system(LaborMarketSystem::new())
        .with_system(WildlifePolicySystem::new())
        .build();

    while world.month() < months && world.tree_count() > 0 {
        let summary = engine.tick(&mut world)?;
        render::clear_screen()?;
        print!(
            "{}",
            render::frame(&world, &summary, &scenario.name, !cli.no_color)
        );
        io::stdout().flush()?;
        thread::sleep(delay);
    }

    let census = world.census();
    println!(
        "Scenario '{}' finished after {} months. Trees: {} | Lumberjacks: {} | Bears: {}",
        scenario.name,
        world.month().saturating_sub(1),
        census.trees,
        census.lumberjacks,
        census.bears
    );
    Ok(())
}
