//! Per-job behavior. Each handler reads and writes the shared stock and
//! terrain, sets the agent's status, and may hand it a target tile.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::agent::{Agent, Job, Status};
use crate::clock::Clock;
use crate::config::BehaviorConfig;
use crate::memory::{Action, MemoryEntry, MemoryEvent};
use crate::resources::{Resource, ResourcePool};
use crate::spatial::{MapError, TileKind, TileMap};

use super::movement;

/// Shared town state an agent may touch during its update.
pub struct JobContext<'a> {
    pub map: &'a mut TileMap,
    pub resources: &'a mut ResourcePool,
    pub clock: &'a Clock,
    pub population: usize,
    pub behavior: &'a BehaviorConfig,
}

pub fn dispatch<R: Rng + ?Sized>(
    agent: &mut Agent,
    town: &mut JobContext<'_>,
    rng: &mut R,
) -> Result<(), MapError> {
    match agent.job {
        Job::Builder => builder(agent, town, rng),
        Job::Gatherer => gatherer(agent, town, rng),
        Job::Farmer => {
            farmer(agent, town, rng);
            Ok(())
        }
        Job::Explorer => {
            explore(agent, rng);
            Ok(())
        }
    }
}

/// ceil(population / agents_per_house) - houses, never negative.
pub fn houses_needed(population: usize, houses: u32, agents_per_house: u32) -> u32 {
    let wanted = (population as u32).div_ceil(agents_per_house.max(1));
    wanted.saturating_sub(houses)
}

pub fn builder<R: Rng + ?Sized>(
    agent: &mut Agent,
    town: &mut JobContext<'_>,
    rng: &mut R,
) -> Result<(), MapError> {
    let behavior = town.behavior;
    let needed = houses_needed(
        town.population,
        town.resources.houses,
        behavior.agents_per_house,
    );

    if needed > 0 && town.resources.wood >= behavior.build_wood_reserve {
        agent.energy -= behavior.build_energy_cost;
        agent.status = Status::Building {
            houses_needed: needed,
        };
        if town.resources.try_consume(Resource::Wood, 1.0) {
            let progress = agent.building_progress.get_or_insert(0.0);
            *progress += 1.0;
            if *progress >= behavior.build_cost {
                town.resources.add_house();
                agent.building_progress = Some(0.0);
                agent.status = Status::BuiltHouse;
                remember(agent, town.clock, Action::Building, "Completed a house".into());
                tracing::debug!(
                    agent = %agent.name,
                    houses = town.resources.houses,
                    "house completed"
                );
            }
        }
        if agent.energy < behavior.tired_below {
            agent.status = Status::TooTiredToBuild;
            rest(agent, behavior);
        }
    } else if town.resources.wood < behavior.build_wood_reserve {
        agent.status = Status::NeedWood;
        if rng.gen_bool(behavior.self_gather_chance) {
            gather_wood(agent, town)?;
        } else {
            agent.status = Status::CoordinatingWithGatherers;
        }
    } else {
        agent.status = Status::MaintainingBuildings;
        agent.energy -= behavior.maintenance_energy_cost;
    }
    Ok(())
}

pub fn gatherer<R: Rng + ?Sized>(
    agent: &mut Agent,
    town: &mut JobContext<'_>,
    rng: &mut R,
) -> Result<(), MapError> {
    let behavior = town.behavior;
    if town.resources.wood < behavior.gatherer_wood_watermark {
        agent.status = Status::GatheringWood;
        gather_wood(agent, town)?;
    } else if town.resources.food < behavior.gatherer_food_watermark {
        agent.status = Status::LookingForFood;
        seek_food(agent, town.map, rng)?;
    } else {
        agent.status = Status::ExploringForResources;
        if agent.target.is_none() {
            movement::random_step(agent, rng);
        }
    }
    Ok(())
}

pub fn farmer<R: Rng + ?Sized>(agent: &mut Agent, town: &mut JobContext<'_>, rng: &mut R) {
    let behavior = town.behavior;
    agent.status = Status::Farming;
    agent.energy -= behavior.farm_energy_cost;

    if rng.gen_bool(behavior.farm_chance) && agent.energy > behavior.farm_min_energy {
        let food = rng.gen_range(behavior.farm_yield_min..=behavior.farm_yield_max);
        town.resources.add(Resource::Food, food as f64);
        agent.status = Status::Harvested { food };
        remember(agent, town.clock, Action::Farming, format!("Produced {food} food"));
        tracing::debug!(agent = %agent.name, food, "harvest");
    }

    if agent.energy < behavior.tired_below {
        agent.status = Status::TooTiredToFarm;
        rest(agent, behavior);
    }
}

pub fn explore<R: Rng + ?Sized>(agent: &mut Agent, rng: &mut R) {
    agent.status = Status::Exploring;
    if agent.target.is_none() {
        movement::random_step(agent, rng);
    }
}

pub fn rest(agent: &mut Agent, behavior: &BehaviorConfig) {
    agent.energy += behavior.rest_gain;
    if agent.energy >= behavior.rested_at {
        agent.status = Status::Rested;
        agent.target = None;
    }
}

/// Heads for a random grass tile unless already walking to one. Leaves the
/// agent idle when the map has no grass.
pub fn seek_food<R: Rng + ?Sized>(
    agent: &mut Agent,
    map: &TileMap,
    rng: &mut R,
) -> Result<(), MapError> {
    if let Some(target) = agent.target {
        if map.cell_at(target.x, target.y)?.kind == TileKind::Grass {
            return Ok(());
        }
    }
    if let Some(tile) = map.cells_of_kind(TileKind::Grass).choose(rng) {
        agent.target = Some(*tile);
    }
    Ok(())
}

/// Harvests the tile underfoot, or sets off toward the first tree in scan
/// order when there is nothing to cut here.
pub fn gather_wood(agent: &mut Agent, town: &mut JobContext<'_>) -> Result<(), MapError> {
    let here = agent.position.tile();
    let cut = town.map.harvest_wood(here.x, here.y)?;
    if cut > 0 {
        town.resources.add(Resource::Wood, cut as f64);
        tracing::trace!(agent = %agent.name, x = here.x, y = here.y, "wood cut");
        return Ok(());
    }
    if let Some(tree) = town.map.find_first_tree() {
        agent.target = Some(tree);
        agent.status = Status::GoingToTree;
    }
    Ok(())
}

fn remember(agent: &mut Agent, clock: &Clock, action: Action, result: String) {
    agent.memory.record(MemoryEntry {
        day: clock.day(),
        time: clock.time_string(),
        event: MemoryEvent::Action { action },
        result,
    });
}
