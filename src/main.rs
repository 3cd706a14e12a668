use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pixel_town::{
    engine::{Engine, EngineSettings},
    scenario::ScenarioLoader,
    snapshot::WorldSnapshot,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Pixel town headless runner")]
struct Cli {
    /// Path to the scenario YAML file
    #[arg(long, default_value = "scenarios/pixel_town.yaml")]
    scenario: PathBuf,

    /// Override frame count (uses scenario default when omitted)
    #[arg(long)]
    frames: Option<u64>,

    /// Override the scenario seed
    #[arg(long)]
    seed: Option<u64>,

    /// In-game minutes per clock advance
    #[arg(long)]
    speed: Option<u32>,

    /// Newcomers to invite before the first frame
    #[arg(long, default_value_t = 0)]
    add_agents: u32,

    /// Print a one-line report every N frames (0 disables)
    #[arg(long, default_value_t = 0)]
    report_every: u64,

    /// Print the final snapshot as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loader = ScenarioLoader::new(".");
    let mut scenario = loader.load(&cli.scenario)?;
    if let Some(seed) = cli.seed {
        scenario.seed = seed;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pixel_town={}", scenario.logging.level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut world = scenario.build_world();
    if let Some(speed) = cli.speed {
        world.set_speed(speed);
    }
    let frames = scenario.frames(cli.frames);

    let mut engine = Engine::town(EngineSettings {
        scenario_name: scenario.name.clone(),
        seed: scenario.seed,
    });
    for _ in 0..cli.add_agents {
        if engine.add_agent(&mut world).is_none() {
            tracing::warn!(max = world.max_agents(), "population cap reached");
            break;
        }
    }

    tracing::info!(scenario = %scenario.name, frames, "running");
    let report_every = cli.report_every;
    engine.run_with_hook(&mut world, frames, |snapshot| {
        if report_every > 0 && snapshot.frame % report_every == 0 {
            println!("{}", report_line(&snapshot));
        }
    })?;

    let snapshot = world.snapshot(engine.scenario_name());
    if cli.json {
        let json = serde_json::to_string_pretty(&snapshot).context("Failed to encode snapshot")?;
        println!("{json}");
    } else {
        println!(
            "Scenario '{}' completed for {} frames.",
            scenario.name, frames
        );
        println!("{}", report_line(&snapshot));
        for agent in &snapshot.agents {
            println!(
                "  {:<10} {:<9} ({:>5.1}, {:>5.1}) hunger {:>5.1} energy {:>5.1}  {}",
                agent.name, agent.job, agent.x, agent.y, agent.hunger, agent.energy, agent.status
            );
        }
    }
    Ok(())
}

fn report_line(snapshot: &WorldSnapshot) -> String {
    format!(
        "frame {:>6}  day {} {}  pop {}/{}  wood {:.0}  food {:.0}  houses {}",
        snapshot.frame,
        snapshot.day,
        snapshot.time,
        snapshot.population,
        snapshot.max_population,
        snapshot.resources.wood,
        snapshot.resources.food,
        snapshot.resources.houses
    )
}
