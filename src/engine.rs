use anyhow::{Context, Result};

use crate::{
    agent::AgentId,
    rng::{RngManager, SystemRng},
    snapshot::WorldSnapshot,
    systems::{AgentSystem, ClockSystem, StatusTimerSystem},
    world::World,
};

pub struct EngineSettings {
    pub scenario_name: String,
    pub seed: u64,
}

pub struct EngineBuilder {
    settings: EngineSettings,
    systems: Vec<Box<dyn System>>,
}

impl EngineBuilder {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            systems: Vec::new(),
        }
    }

    /// Status reverts, then the clock, then the agents.
    pub fn with_town_systems(self) -> Self {
        self.with_system(StatusTimerSystem::new())
            .with_system(ClockSystem::new())
            .with_system(AgentSystem::new())
    }

    pub fn with_system(mut self, system: impl System + 'static) -> Self {
        self.systems.push(Box::new(system));
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            rng: RngManager::new(self.settings.seed),
            systems: self.systems,
            settings: self.settings,
        }
    }
}

pub struct Engine {
    rng: RngManager,
    systems: Vec<Box<dyn System>>,
    settings: EngineSettings,
}

impl Engine {
    pub fn town(settings: EngineSettings) -> Self {
        EngineBuilder::new(settings).with_town_systems().build()
    }

    pub fn scenario_name(&self) -> &str {
        &self.settings.scenario_name
    }

    /// Advances one render frame. Systems decide for themselves whether the
    /// frame is one they act on.
    pub fn step(&mut self, world: &mut World) -> Result<u64> {
        let frame = world.advance_frame();
        for system in &mut self.systems {
            let name = system.name().to_string();
            let mut rng_stream = self.rng.stream(&name);
            let ctx = SystemContext {
                frame,
                scenario_name: &self.settings.scenario_name,
            };
            system
                .run(&ctx, world, &mut rng_stream)
                .with_context(|| format!("system '{name}' failed on frame {frame}"))?;
        }
        Ok(frame)
    }

    pub fn run(&mut self, world: &mut World, frames: u64) -> Result<()> {
        for _ in 0..frames {
            self.step(world)?;
        }
        Ok(())
    }

    pub fn run_with_hook<F>(&mut self, world: &mut World, frames: u64, mut hook: F) -> Result<()>
    where
        F: FnMut(WorldSnapshot),
    {
        for _ in 0..frames {
            self.step(world)?;
            hook(world.snapshot(&self.settings.scenario_name));
        }
        Ok(())
    }

    /// The "add agent" command. Draws from its own stream so arrivals do
    /// not shift the agents' random sequence.
    pub fn add_agent(&mut self, world: &mut World) -> Option<AgentId> {
        let mut rng = self.rng.stream("arrivals");
        world.add_agent(&mut rng)
    }
}

pub struct SystemContext<'a> {
    pub frame: u64,
    pub scenario_name: &'a str,
}

impl SystemContext<'_> {
    /// True on every `interval`th frame. A zero interval never fires.
    pub fn is_due(&self, interval: u64) -> bool {
        interval != 0 && self.frame % interval == 0
    }
}

pub trait System {
    fn name(&self) -> &str;
    fn run(&mut self, ctx: &SystemContext, world: &mut World, rng: &mut SystemRng<'_>)
        -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::ResourcePool;
    use crate::spatial::{TileCell, TileMap};
    use crate::world::WorldSettings;

    struct CountingSystem {
        calls: std::rc::Rc<std::cell::Cell<u64>>,
    }

    impl System for CountingSystem {
        fn name(&self) -> &str {
            "counting"
        }

        fn run(
            &mut self,
            ctx: &SystemContext,
            _world: &mut World,
            _rng: &mut SystemRng<'_>,
        ) -> Result<()> {
            self.calls.set(ctx.frame);
            Ok(())
        }
    }

    fn world() -> World {
        World::new(
            TileMap::filled(4, 4, TileCell::grass()),
            ResourcePool::default(),
            WorldSettings::default(),
        )
    }

    #[test]
    fn step_numbers_frames_from_one() {
        let calls = std::rc::Rc::new(std::cell::Cell::new(0));
        let settings = EngineSettings {
            scenario_name: "unit".into(),
            seed: 1,
        };
        let mut engine = EngineBuilder::new(settings)
            .with_system(CountingSystem {
                calls: calls.clone(),
            })
            .build();
        let mut world = world();

        assert_eq!(engine.step(&mut world).unwrap(), 1);
        engine.run(&mut world, 4).unwrap();
        assert_eq!(calls.get(), 5);
        assert_eq!(world.frame(), 5);
    }

    #[test]
    fn hook_sees_every_frame() {
        let mut engine = Engine::town(EngineSettings {
            scenario_name: "unit".into(),
            seed: 3,
        });
        let mut world = world();
        let mut frames = Vec::new();
        engine
            .run_with_hook(&mut world, 6, |snapshot| frames.push(snapshot.frame))
            .unwrap();
        assert_eq!(frames, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn due_frames() {
        let ctx = SystemContext {
            frame: 12,
            scenario_name: "unit",
        };
        assert!(ctx.is_due(4));
        assert!(ctx.is_due(6));
        assert!(!ctx.is_due(5));
        assert!(!ctx.is_due(0));
    }
}
