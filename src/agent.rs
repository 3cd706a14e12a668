use std::fmt;

use serde::{Deserialize, Serialize};

use crate::memory::Memory;
use crate::spatial::TilePos;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(u64);

impl AgentId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Job {
    Builder,
    Gatherer,
    Farmer,
    Explorer,
}

impl Job {
    /// Jobs handed out to newly created agents.
    pub const ASSIGNABLE: [Job; 3] = [Job::Builder, Job::Gatherer, Job::Farmer];
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// What an agent is currently doing, shown to players as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Exploring,
    Arriving,
    Hungry,
    Tired,
    Rested,
    Building { houses_needed: u32 },
    BuiltHouse,
    TooTiredToBuild,
    NeedWood,
    CoordinatingWithGatherers,
    MaintainingBuildings,
    GatheringWood,
    GoingToTree,
    LookingForFood,
    ExploringForResources,
    Farming,
    Harvested { food: u32 },
    TooTiredToFarm,
    TalkingTo { name: String },
}

impl Status {
    /// Statuses an agent would grumble about in conversation.
    pub fn is_distressed(&self) -> bool {
        matches!(
            self,
            Status::Hungry | Status::Tired | Status::TooTiredToBuild | Status::TooTiredToFarm
        )
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Exploring => f.write_str("Exploring"),
            Status::Arriving => f.write_str("Arriving"),
            Status::Hungry => f.write_str("Hungry"),
            Status::Tired => f.write_str("Tired"),
            Status::Rested => f.write_str("Rested"),
            Status::Building { houses_needed } => {
                write!(f, "Building house ({houses_needed} needed)")
            }
            Status::BuiltHouse => f.write_str("Built a new house!"),
            Status::TooTiredToBuild => f.write_str("Too tired to build"),
            Status::NeedWood => f.write_str("Need more wood to build"),
            Status::CoordinatingWithGatherers => f.write_str("Coordinating with gatherers"),
            Status::MaintainingBuildings => f.write_str("Maintaining buildings"),
            Status::GatheringWood => f.write_str("Gathering wood"),
            Status::GoingToTree => f.write_str("Going to tree"),
            Status::LookingForFood => f.write_str("Looking for food"),
            Status::ExploringForResources => f.write_str("Exploring for new resources"),
            Status::Farming => f.write_str("Farming"),
            Status::Harvested { food } => write!(f, "Harvested {food} food"),
            Status::TooTiredToFarm => f.write_str("Too tired to farm"),
            Status::TalkingTo { name } => write!(f, "Talking to {name}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn tile(self) -> TilePos {
        TilePos {
            x: self.x.max(0.0).floor() as u32,
            y: self.y.max(0.0).floor() as u32,
        }
    }

    pub fn clamp_to(&mut self, width: u32, height: u32) {
        self.x = self.x.clamp(0.0, width.saturating_sub(1) as f64);
        self.y = self.y.clamp(0.0, height.saturating_sub(1) as f64);
    }
}

#[derive(Debug, Clone)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub job: Job,
    pub position: Position,
    pub color: String,
    pub energy: f64,
    pub hunger: f64,
    pub status: Status,
    pub target: Option<TilePos>,
    pub memory: Memory,
    pub building_progress: Option<f64>,
}

impl Agent {
    pub const START_ENERGY: f64 = 100.0;
    pub const START_HUNGER: f64 = 30.0;

    pub fn new(id: AgentId, name: impl Into<String>, job: Job, position: Position) -> Self {
        Self {
            id,
            name: name.into(),
            job,
            position,
            color: "#f72585".to_string(),
            energy: Self::START_ENERGY,
            hunger: Self::START_HUNGER,
            status: Status::Exploring,
            target: None,
            memory: Memory::new(),
            building_progress: None,
        }
    }

    /// Chebyshev-style closeness used to pick conversation partners.
    pub fn is_near(&self, other: &Agent, radius: f64) -> bool {
        (other.position.x - self.position.x).abs() < radius
            && (other.position.y - self.position.y).abs() < radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text_matches_panel_wording() {
        assert_eq!(
            Status::Building { houses_needed: 2 }.to_string(),
            "Building house (2 needed)"
        );
        assert_eq!(Status::Harvested { food: 4 }.to_string(), "Harvested 4 food");
        assert_eq!(
            Status::TalkingTo { name: "Riley".into() }.to_string(),
            "Talking to Riley"
        );
        assert_eq!(Status::NeedWood.to_string(), "Need more wood to build");
    }

    #[test]
    fn distress_covers_need_and_fatigue_statuses() {
        assert!(Status::Hungry.is_distressed());
        assert!(Status::TooTiredToFarm.is_distressed());
        assert!(!Status::Farming.is_distressed());
        assert!(!Status::TalkingTo { name: "Sam".into() }.is_distressed());
    }

    #[test]
    fn position_clamps_and_floors() {
        let mut pos = Position::new(-1.5, 30.2);
        pos.clamp_to(10, 5);
        assert_eq!(pos, Position::new(0.0, 4.0));
        assert_eq!(Position::new(3.5, 2.99).tile(), TilePos::new(3, 2));
    }

    #[test]
    fn nearness_is_per_axis() {
        let a = Agent::new(AgentId::new(0), "Alex", Job::Builder, Position::new(5.0, 5.0));
        let b = Agent::new(AgentId::new(1), "Sam", Job::Farmer, Position::new(7.5, 3.0));
        let c = Agent::new(AgentId::new(2), "Quinn", Job::Farmer, Position::new(8.0, 5.0));
        assert!(a.is_near(&b, 3.0));
        assert!(!a.is_near(&c, 3.0));
    }
}
