pub mod agent;
pub mod clock;
pub mod config;
pub mod engine;
pub mod memory;
pub mod resources;
pub mod rng;
pub mod scenario;
pub mod snapshot;
pub mod spatial;
pub mod systems;
pub mod timers;
pub mod world;

pub use engine::{Engine, EngineBuilder, EngineSettings};
pub use scenario::{Scenario, ScenarioLoader};
pub use world::World;
