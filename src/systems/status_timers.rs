use anyhow::Result;

use crate::{
    engine::{System, SystemContext},
    rng::SystemRng,
    world::World,
};

/// Fires queued status reverts. Runs on every frame, paused or not, so a
/// conversation bubble clears on schedule even while the town is frozen.
pub struct StatusTimerSystem;

impl StatusTimerSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StatusTimerSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for StatusTimerSystem {
    fn name(&self) -> &str {
        "status_timers"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        for revert in world.timers.drain_due(ctx.frame) {
            let Some(agent) = world.agents.iter_mut().find(|a| a.id == revert.agent) else {
                continue;
            };
            if agent.status == revert.expected {
                tracing::trace!(agent = %agent.name, restored = %revert.restore, "status reverted");
                agent.status = revert.restore;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{Job, Position, Status};
    use crate::engine::{EngineBuilder, EngineSettings};
    use crate::resources::ResourcePool;
    use crate::spatial::{TileCell, TileMap};
    use crate::timers::StatusRevert;
    use crate::world::WorldSettings;

    fn setup() -> (crate::engine::Engine, World) {
        let engine = EngineBuilder::new(EngineSettings {
            scenario_name: "timers".into(),
            seed: 0,
        })
        .with_system(StatusTimerSystem::new())
        .build();
        let mut world = World::new(
            TileMap::filled(3, 3, TileCell::grass()),
            ResourcePool::default(),
            WorldSettings::default(),
        );
        world.spawn("Alex", Job::Farmer, Position::new(1.0, 1.0));
        (engine, world)
    }

    fn talking() -> Status {
        Status::TalkingTo { name: "Sam".into() }
    }

    #[test]
    fn reverts_unchanged_status() {
        let (mut engine, mut world) = setup();
        let id = world.agents()[0].id;
        world.agent_mut(id).unwrap().status = talking();
        world.timers.schedule(StatusRevert {
            fire_at: 3,
            agent: id,
            expected: talking(),
            restore: Status::Farming,
        });

        engine.run(&mut world, 2).unwrap();
        assert_eq!(world.agent(id).unwrap().status, talking());
        engine.run(&mut world, 1).unwrap();
        assert_eq!(world.agent(id).unwrap().status, Status::Farming);
        assert_eq!(world.pending_reverts(), 0);
    }

    #[test]
    fn stale_revert_is_dropped() {
        let (mut engine, mut world) = setup();
        let id = world.agents()[0].id;
        world.agent_mut(id).unwrap().status = Status::Hungry;
        world.timers.schedule(StatusRevert {
            fire_at: 1,
            agent: id,
            expected: talking(),
            restore: Status::Farming,
        });

        engine.run(&mut world, 1).unwrap();
        assert_eq!(world.agent(id).unwrap().status, Status::Hungry);
        assert_eq!(world.pending_reverts(), 0);
    }

    #[test]
    fn fires_while_paused() {
        let (mut engine, mut world) = setup();
        let id = world.agents()[0].id;
        world.agent_mut(id).unwrap().status = talking();
        world.timers.schedule(StatusRevert {
            fire_at: 2,
            agent: id,
            expected: talking(),
            restore: Status::Exploring,
        });
        world.set_paused(true);

        engine.run(&mut world, 2).unwrap();
        assert_eq!(world.agent(id).unwrap().status, Status::Exploring);
    }
}
