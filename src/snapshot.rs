//! Read-only frame view handed to renderers and UI panels

use serde::{Deserialize, Serialize};

use crate::agent::Job;
use crate::memory::MemoryEntry;
use crate::resources::ResourcePool;
use crate::spatial::{TileKind, TilePos};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileSnapshot {
    pub x: u32,
    pub y: u32,
    pub kind: TileKind,
    pub color: String,
    pub wood: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapSnapshot {
    pub width: u32,
    pub height: u32,
    pub tiles: Vec<TileSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub id: u64,
    pub name: String,
    pub job: Job,
    pub x: f64,
    pub y: f64,
    pub color: String,
    pub status: String,
    pub hunger: f64,
    pub energy: f64,
    pub target: Option<TilePos>,
    pub building_progress: Option<f64>,
    pub last_memory: Option<MemoryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub scenario: String,
    pub frame: u64,
    pub day: u32,
    pub time: String,
    pub paused: bool,
    pub speed: u32,
    pub population: usize,
    pub max_population: usize,
    pub resources: ResourcePool,
    pub map: MapSnapshot,
    pub agents: Vec<AgentSnapshot>,
}
