use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::agent::{Job, Position};
use crate::config::{
    BehaviorConfig, LoggingConfig, MapConfig, PopulationConfig, ResourceConfig, TimingConfig,
};
use crate::resources::ResourcePool;
use crate::rng::RngManager;
use crate::spatial::TileMap;
use crate::world::{World, WorldSettings};

fn default_name() -> String {
    "pixel-town".to_string()
}

fn default_seed() -> u64 {
    7
}

#[derive(Debug, Error, PartialEq)]
pub enum ScenarioError {
    #[error("invalid scenario '{name}': {reason}")]
    Validation { name: String, reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub frames: Option<u64>,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub resources: ResourceConfig,
    #[serde(default)]
    pub population: PopulationConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Scenario {
    /// A scenario with every setting at its default.
    pub fn new(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            description: None,
            seed,
            frames: None,
            map: MapConfig::default(),
            resources: ResourceConfig::default(),
            population: PopulationConfig::default(),
            timing: TimingConfig::default(),
            behavior: BehaviorConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        let fail = |reason: String| -> Result<(), ScenarioError> {
            Err(ScenarioError::Validation {
                name: self.name.clone(),
                reason,
            })
        };
        let map = &self.map;
        if map.width == 0 || map.height == 0 {
            return fail(format!("map must not be empty ({}x{})", map.width, map.height));
        }
        for (label, ratio) in [("water_ratio", map.water_ratio), ("tree_ratio", map.tree_ratio)] {
            if !(0.0..=1.0).contains(&ratio) {
                return fail(format!("{label} {ratio} outside [0, 1]"));
            }
        }
        if map.water_ratio + map.tree_ratio > 1.0 {
            return fail("water_ratio + tree_ratio exceeds 1".to_string());
        }

        let population = &self.population;
        let founders = self.founder_count();
        if founders > population.max {
            return fail(format!(
                "{founders} founders exceed the population cap of {}",
                population.max
            ));
        }
        if population.roster.is_empty() && founders > 0 && population.founder_names.is_empty() {
            return fail("founder_names is empty".to_string());
        }

        let behavior = &self.behavior;
        if behavior.farm_yield_min > behavior.farm_yield_max {
            return fail(format!(
                "farm yield range {}..={} is empty",
                behavior.farm_yield_min, behavior.farm_yield_max
            ));
        }
        if behavior.agents_per_house == 0 {
            return fail("agents_per_house must be at least 1".to_string());
        }
        for (label, chance) in [
            ("wander_chance", behavior.wander_chance),
            ("talk_chance", behavior.talk_chance),
            ("farm_chance", behavior.farm_chance),
            ("self_gather_chance", behavior.self_gather_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return fail(format!("{label} {chance} is not a probability"));
            }
        }

        let timing = &self.timing;
        if timing.agent_interval_frames == 0 || timing.clock_interval_frames == 0 {
            return fail("frame intervals must be at least 1".to_string());
        }
        Ok(())
    }

    /// Generates the terrain and settles the founders. Terrain and roster
    /// draw from separate streams so editing one leaves the other intact.
    pub fn build_world(&self) -> World {
        let mut rng = RngManager::new(self.seed);
        let map = TileMap::generate(
            self.map.width,
            self.map.height,
            self.map.terrain_mix(),
            &mut rng.stream("terrain"),
        );
        let resources = ResourcePool::new(
            self.resources.wood,
            self.resources.food,
            self.resources.houses,
        );
        let settings = WorldSettings {
            timing: self.timing.clone(),
            behavior: self.behavior.clone(),
            max_agents: self.population.max,
            arrival_names: self.population.arrival_names.clone(),
            colors: self.population.colors.clone(),
        };
        let mut world = World::new(map, resources, settings);

        let mut roster_rng = rng.stream("roster");
        if self.population.roster.is_empty() {
            let names = self
                .population
                .founder_names
                .iter()
                .cycle()
                .take(self.population.initial);
            for name in names {
                let job = random_job(&mut roster_rng);
                let position = random_position(&world, &mut roster_rng);
                let color = world.random_color(&mut roster_rng);
                world.spawn(name.clone(), job, position).color = color;
            }
        } else {
            for entry in &self.population.roster {
                let job = match entry.job {
                    Some(job) => job,
                    None => random_job(&mut roster_rng),
                };
                let fallback = random_position(&world, &mut roster_rng);
                let position = Position::new(
                    entry.x.unwrap_or(fallback.x),
                    entry.y.unwrap_or(fallback.y),
                );
                let color = world.random_color(&mut roster_rng);
                world.spawn(entry.name.clone(), job, position).color = color;
            }
        }
        tracing::info!(
            scenario = %self.name,
            width = self.map.width,
            height = self.map.height,
            agents = world.population(),
            "world built"
        );
        world
    }

    pub fn frames(&self, override_frames: Option<u64>) -> u64 {
        override_frames.or(self.frames).unwrap_or(1200)
    }

    fn founder_count(&self) -> usize {
        if self.population.roster.is_empty() {
            self.population.initial
        } else {
            self.population.roster.len()
        }
    }
}

fn random_job<R: Rng + ?Sized>(rng: &mut R) -> Job {
    Job::ASSIGNABLE.choose(rng).copied().unwrap_or(Job::Explorer)
}

fn random_position<R: Rng + ?Sized>(world: &World, rng: &mut R) -> Position {
    let map = world.map();
    Position::new(
        rng.gen_range(0..map.width().max(1)) as f64,
        rng.gen_range(0..map.height().max(1)) as f64,
    )
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
        scenario
            .validate()
            .with_context(|| format!("Rejected scenario {}", path.display()))?;
        Ok(scenario)
    }
}
