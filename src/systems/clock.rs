use anyhow::Result;

use crate::{
    engine::{System, SystemContext},
    rng::SystemRng,
    world::World,
};

/// Moves the in-game clock and charges the daily food upkeep at midnight.
pub struct ClockSystem;

impl ClockSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ClockSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for ClockSystem {
    fn name(&self) -> &str {
        "clock"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        if world.is_paused() || !ctx.is_due(world.timing.clock_interval_frames) {
            return Ok(());
        }
        let speed = world.speed();
        if world.clock.advance(speed) {
            let population = world.agents.len();
            let eaten = world
                .resources
                .apply_daily_food_consumption(population, world.behavior.daily_food_per_agent);
            tracing::info!(
                day = world.clock.day(),
                population,
                eaten,
                food_left = world.resources.food,
                "new day"
            );
        }
        Ok(())
    }
}
