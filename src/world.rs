use rand::seq::SliceRandom;
use rand::Rng;

use crate::agent::{Agent, AgentId, Job, Position, Status};
use crate::clock::Clock;
use crate::config::{BehaviorConfig, TimingConfig};
use crate::resources::ResourcePool;
use crate::snapshot::{AgentSnapshot, MapSnapshot, TileSnapshot, WorldSnapshot};
use crate::spatial::TileMap;
use crate::timers::StatusTimers;

/// Everything a world needs besides its terrain and stock.
#[derive(Debug, Clone)]
pub struct WorldSettings {
    pub timing: TimingConfig,
    pub behavior: BehaviorConfig,
    pub max_agents: usize,
    pub arrival_names: Vec<String>,
    pub colors: Vec<String>,
}

impl Default for WorldSettings {
    fn default() -> Self {
        let population = crate::config::PopulationConfig::default();
        Self {
            timing: TimingConfig::default(),
            behavior: BehaviorConfig::default(),
            max_agents: population.max,
            arrival_names: population.arrival_names,
            colors: population.colors,
        }
    }
}

pub struct World {
    frame: u64,
    paused: bool,
    speed: u32,
    next_agent: u64,
    max_agents: usize,
    arrival_names: Vec<String>,
    colors: Vec<String>,
    pub(crate) map: TileMap,
    pub(crate) resources: ResourcePool,
    pub(crate) agents: Vec<Agent>,
    pub(crate) clock: Clock,
    pub(crate) timers: StatusTimers,
    pub(crate) timing: TimingConfig,
    pub(crate) behavior: BehaviorConfig,
}

impl World {
    pub fn new(map: TileMap, resources: ResourcePool, settings: WorldSettings) -> Self {
        let clock = Clock::new(1, settings.timing.start_minutes);
        Self {
            frame: 0,
            paused: false,
            speed: settings.timing.speed.max(1),
            next_agent: 0,
            max_agents: settings.max_agents,
            arrival_names: settings.arrival_names,
            colors: settings.colors,
            map,
            resources,
            agents: Vec::new(),
            clock,
            timers: StatusTimers::default(),
            timing: settings.timing,
            behavior: settings.behavior,
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub(crate) fn advance_frame(&mut self) -> u64 {
        self.frame += 1;
        self.frame
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: u32) {
        self.speed = speed.max(1);
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut TileMap {
        &mut self.map
    }

    pub fn resources(&self) -> &ResourcePool {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourcePool {
        &mut self.resources
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }

    pub fn behavior(&self) -> &BehaviorConfig {
        &self.behavior
    }

    pub fn behavior_mut(&mut self) -> &mut BehaviorConfig {
        &mut self.behavior
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    pub fn pending_reverts(&self) -> usize {
        self.timers.len()
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|agent| agent.id == id)
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.iter_mut().find(|agent| agent.id == id)
    }

    pub fn population(&self) -> usize {
        self.agents.len()
    }

    pub fn max_agents(&self) -> usize {
        self.max_agents
    }

    /// Places an agent directly, ignoring the population cap. Used for
    /// founders and hand-built setups.
    pub fn spawn(&mut self, name: impl Into<String>, job: Job, position: Position) -> &mut Agent {
        let id = self.allocate();
        let mut position = position;
        position.clamp_to(self.map.width(), self.map.height());
        self.agents.push(Agent::new(id, name, job, position));
        let index = self.agents.len() - 1;
        &mut self.agents[index]
    }

    /// A newcomer moves into town unless it is already full.
    pub fn add_agent<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<AgentId> {
        if self.agents.len() >= self.max_agents {
            tracing::debug!(max = self.max_agents, "town is full, newcomer turned away");
            return None;
        }
        if self.map.width() == 0 || self.map.height() == 0 {
            return None;
        }
        let name = self
            .arrival_names
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| format!("Newcomer {}", self.next_agent));
        let job = Job::ASSIGNABLE
            .choose(rng)
            .copied()
            .unwrap_or(Job::Explorer);
        let position = Position::new(
            rng.gen_range(0..self.map.width()) as f64,
            rng.gen_range(0..self.map.height()) as f64,
        );
        let color = self.random_color(rng);
        let agent = self.spawn(name, job, position);
        agent.status = Status::Arriving;
        agent.color = color;
        let id = agent.id;
        tracing::info!(agent = %agent.name, job = %agent.job, "new agent arrived");
        Some(id)
    }

    pub fn random_color<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        self.colors
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| "#f72585".to_string())
    }

    pub fn snapshot(&self, scenario: &str) -> WorldSnapshot {
        let tiles = self
            .map
            .iter()
            .map(|(pos, cell)| TileSnapshot {
                x: pos.x,
                y: pos.y,
                kind: cell.kind,
                color: cell.kind.color().to_string(),
                wood: cell.wood,
            })
            .collect();
        let agents = self
            .agents
            .iter()
            .map(|agent| AgentSnapshot {
                id: agent.id.raw(),
                name: agent.name.clone(),
                job: agent.job,
                x: agent.position.x,
                y: agent.position.y,
                color: agent.color.clone(),
                status: agent.status.to_string(),
                hunger: agent.hunger,
                energy: agent.energy,
                target: agent.target,
                building_progress: agent.building_progress,
                last_memory: agent.memory.latest().cloned(),
            })
            .collect();
        WorldSnapshot {
            scenario: scenario.to_string(),
            frame: self.frame,
            day: self.clock.day(),
            time: self.clock.time_string(),
            paused: self.paused,
            speed: self.speed,
            population: self.agents.len(),
            max_population: self.max_agents,
            resources: self.resources.clone(),
            map: MapSnapshot {
                width: self.map.width(),
                height: self.map.height(),
                tiles,
            },
            agents,
        }
    }

    fn allocate(&mut self) -> AgentId {
        let id = AgentId::new(self.next_agent);
        self.next_agent += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::{TileCell, TileKind};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn small_world(max_agents: usize) -> World {
        let settings = WorldSettings {
            max_agents,
            ..WorldSettings::default()
        };
        World::new(
            TileMap::filled(8, 4, TileCell::grass()),
            ResourcePool::default(),
            settings,
        )
    }

    #[test]
    fn add_agent_respects_cap() {
        let mut world = small_world(2);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let first = world.add_agent(&mut rng).expect("room for first");
        assert!(world.add_agent(&mut rng).is_some());
        assert!(world.add_agent(&mut rng).is_none());
        assert_eq!(world.population(), 2);

        let agent = world.agent(first).unwrap();
        assert_eq!(agent.status, Status::Arriving);
        assert_ne!(agent.job, Job::Explorer);
        assert!(agent.position.x < 8.0 && agent.position.y < 4.0);
        assert_eq!(agent.position.x.fract(), 0.0);
    }

    #[test]
    fn spawn_clamps_into_map_and_assigns_ids_in_order() {
        let mut world = small_world(10);
        let a = world.spawn("Alex", Job::Builder, Position::new(20.0, -3.0)).id;
        let b = world.spawn("Sam", Job::Farmer, Position::new(1.0, 1.0)).id;

        assert_eq!(a.raw(), 0);
        assert_eq!(b.raw(), 1);
        assert_eq!(world.agent(a).unwrap().position, Position::new(7.0, 0.0));
    }

    #[test]
    fn speed_never_drops_below_one() {
        let mut world = small_world(1);
        world.set_speed(0);
        assert_eq!(world.speed(), 1);
        world.set_speed(3);
        assert_eq!(world.speed(), 3);
        assert!(world.toggle_pause());
        assert!(!world.toggle_pause());
    }

    #[test]
    fn snapshot_exposes_render_state() {
        let mut world = small_world(4);
        world.map_mut().set_cell(2, 1, TileCell::tree(3)).unwrap();
        world.spawn("Alex", Job::Gatherer, Position::new(2.0, 1.0));

        let snapshot = world.snapshot("test");
        assert_eq!(snapshot.scenario, "test");
        assert_eq!(snapshot.day, 1);
        assert_eq!(snapshot.time, "08:00");
        assert_eq!(snapshot.map.tiles.len(), 32);
        let tree = snapshot
            .map
            .tiles
            .iter()
            .find(|tile| tile.kind == TileKind::Tree)
            .unwrap();
        assert_eq!((tree.x, tree.y, tree.wood), (2, 1, 3));
        assert_eq!(tree.color, "#2d6a4f");
        assert_eq!(snapshot.agents[0].status, "Exploring");
        assert!(snapshot.agents[0].last_memory.is_none());
    }
}
