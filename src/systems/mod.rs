mod agents;
mod clock;
pub mod conversation;
pub mod jobs;
pub mod movement;
mod status_timers;

pub use agents::{think, AgentSystem, Drive};
pub use clock::ClockSystem;
pub use status_timers::StatusTimerSystem;
