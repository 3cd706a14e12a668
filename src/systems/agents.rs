use anyhow::{Context, Result};
use rand::Rng;

use crate::{
    agent::{Agent, Status},
    engine::{System, SystemContext},
    rng::SystemRng,
    spatial::MapError,
    timers::StatusRevert,
    world::World,
};

use super::conversation::{self, Partner};
use super::jobs::{self, JobContext};
use super::movement;

/// Which branch of the update an agent took this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drive {
    Hungry,
    Tired,
    Working,
}

/// Needs decay, then hunger beats fatigue beats the job. Priority is
/// re-derived from the current values on every tick.
pub fn think<R: Rng + ?Sized>(
    agent: &mut Agent,
    town: &mut JobContext<'_>,
    rng: &mut R,
) -> Result<Drive, MapError> {
    let behavior = town.behavior;
    agent.hunger += behavior.hunger_per_tick;
    agent.energy = (agent.energy - behavior.energy_decay_per_tick).max(0.0);

    if agent.hunger > behavior.hungry_above {
        agent.status = Status::Hungry;
        jobs::seek_food(agent, town.map, rng)?;
        Ok(Drive::Hungry)
    } else if agent.energy < behavior.tired_below {
        agent.status = Status::Tired;
        jobs::rest(agent, behavior);
        Ok(Drive::Tired)
    } else {
        jobs::dispatch(agent, town, rng)?;
        Ok(Drive::Working)
    }
}

/// Updates every agent in registry order on each agent tick.
pub struct AgentSystem;

impl AgentSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AgentSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for AgentSystem {
    fn name(&self) -> &str {
        "agents"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        if world.is_paused() || !ctx.is_due(world.timing.agent_interval_frames) {
            return Ok(());
        }

        let World {
            map,
            resources,
            agents,
            clock,
            timers,
            timing,
            behavior,
            ..
        } = world;
        let clock = &*clock;
        let behavior = &*behavior;
        let population = agents.len();
        let (width, height) = (map.width(), map.height());

        for index in 0..agents.len() {
            let drive = {
                let mut town = JobContext {
                    map: &mut *map,
                    resources: &mut *resources,
                    clock,
                    population,
                    behavior,
                };
                let agent = &mut agents[index];
                think(agent, &mut town, rng)
                    .with_context(|| format!("updating agent {}", agent.name))?
            };

            if drive == Drive::Working && rng.gen_bool(behavior.talk_chance) {
                if let Some(other) =
                    conversation::pick_partner(agents, index, behavior.talk_radius, rng)
                {
                    let partner = Partner::from(&agents[other]);
                    let agent = &mut agents[index];
                    let talk =
                        conversation::converse(agent, &partner, resources, clock, behavior, rng);
                    timers.schedule(StatusRevert {
                        fire_at: ctx.frame + timing.status_revert_frames,
                        agent: agent.id,
                        expected: talk.talking,
                        restore: talk.previous,
                    });
                }
            }

            movement::settle(&mut agents[index], width, height, behavior, rng);
        }
        Ok(())
    }
}
