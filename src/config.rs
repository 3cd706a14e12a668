//! Tunable settings shared by the scenario loader and the systems

use serde::{Deserialize, Serialize};

use crate::agent::Job;
use crate::spatial::TerrainMix;

fn default_map_width() -> u32 {
    50
}

fn default_map_height() -> u32 {
    25
}

fn default_water_ratio() -> f64 {
    0.1
}

fn default_tree_ratio() -> f64 {
    0.2
}

fn default_tree_wood() -> u32 {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_map_width")]
    pub width: u32,
    #[serde(default = "default_map_height")]
    pub height: u32,
    #[serde(default = "default_water_ratio")]
    pub water_ratio: f64,
    #[serde(default = "default_tree_ratio")]
    pub tree_ratio: f64,
    #[serde(default = "default_tree_wood")]
    pub tree_wood: u32,
}

impl MapConfig {
    pub fn terrain_mix(&self) -> TerrainMix {
        TerrainMix {
            water_ratio: self.water_ratio,
            tree_ratio: self.tree_ratio,
            tree_wood: self.tree_wood,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: default_map_width(),
            height: default_map_height(),
            water_ratio: default_water_ratio(),
            tree_ratio: default_tree_ratio(),
            tree_wood: default_tree_wood(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    pub wood: f64,
    pub food: f64,
    #[serde(default)]
    pub houses: u32,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            wood: 100.0,
            food: 150.0,
            houses: 0,
        }
    }
}

fn default_initial_agents() -> usize {
    5
}

fn default_max_agents() -> usize {
    10
}

fn default_founder_names() -> Vec<String> {
    [
        "Alex", "Sam", "Taylor", "Jordan", "Casey", "Riley", "Quinn", "Morgan", "Drew", "Blake",
    ]
    .iter()
    .map(|name| name.to_string())
    .collect()
}

fn default_arrival_names() -> Vec<String> {
    [
        "Avery", "Cameron", "Emerson", "Finley", "Harley", "Peyton", "Rowan", "Sawyer", "Skyler",
    ]
    .iter()
    .map(|name| name.to_string())
    .collect()
}

fn default_colors() -> Vec<String> {
    [
        "#f72585", "#7209b7", "#3a0ca3", "#4361ee", "#4cc9f0", "#ff9e00", "#ff5400",
    ]
    .iter()
    .map(|color| color.to_string())
    .collect()
}

/// Explicit founder. Missing fields are drawn at random.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    #[serde(default)]
    pub job: Option<Job>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    #[serde(default = "default_initial_agents")]
    pub initial: usize,
    #[serde(default = "default_max_agents")]
    pub max: usize,
    /// Replaces the random founders when non-empty.
    #[serde(default)]
    pub roster: Vec<RosterEntry>,
    #[serde(default = "default_founder_names")]
    pub founder_names: Vec<String>,
    #[serde(default = "default_arrival_names")]
    pub arrival_names: Vec<String>,
    #[serde(default = "default_colors")]
    pub colors: Vec<String>,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            initial: default_initial_agents(),
            max: default_max_agents(),
            roster: Vec::new(),
            founder_names: default_founder_names(),
            arrival_names: default_arrival_names(),
            colors: default_colors(),
        }
    }
}

fn default_agent_interval() -> u64 {
    4
}

fn default_clock_interval() -> u64 {
    6
}

fn default_speed() -> u32 {
    1
}

fn default_start_minutes() -> u32 {
    480
}

fn default_status_revert_frames() -> u64 {
    // 2 seconds at 20 frames per second
    40
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Agents think on every Nth frame.
    #[serde(default = "default_agent_interval")]
    pub agent_interval_frames: u64,
    /// The clock advances on every Nth frame.
    #[serde(default = "default_clock_interval")]
    pub clock_interval_frames: u64,
    /// In-game minutes added per clock advance.
    #[serde(default = "default_speed")]
    pub speed: u32,
    #[serde(default = "default_start_minutes")]
    pub start_minutes: u32,
    #[serde(default = "default_status_revert_frames")]
    pub status_revert_frames: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            agent_interval_frames: default_agent_interval(),
            clock_interval_frames: default_clock_interval(),
            speed: default_speed(),
            start_minutes: default_start_minutes(),
            status_revert_frames: default_status_revert_frames(),
        }
    }
}

/// Rates and thresholds driving agent decisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    pub hunger_per_tick: f64,
    pub energy_decay_per_tick: f64,
    pub hungry_above: f64,
    pub tired_below: f64,
    pub rested_at: f64,
    pub rest_gain: f64,
    pub wander_chance: f64,
    pub move_step: f64,
    pub arrival_epsilon: f64,

    pub agents_per_house: u32,
    pub build_wood_reserve: f64,
    pub build_cost: f64,
    pub build_energy_cost: f64,
    pub self_gather_chance: f64,
    pub maintenance_energy_cost: f64,

    pub gatherer_wood_watermark: f64,
    pub gatherer_food_watermark: f64,

    pub farm_chance: f64,
    pub farm_energy_cost: f64,
    pub farm_min_energy: f64,
    pub farm_yield_min: u32,
    pub farm_yield_max: u32,

    pub daily_food_per_agent: f64,

    pub talk_chance: f64,
    pub talk_radius: f64,
    pub ask_food_hunger: f64,
    pub ask_food_min_stock: f64,
    pub share_food_min_stock: f64,
    pub share_food_amount: f64,
    pub share_food_relief: f64,
    pub ask_wood_watermark: f64,
    pub spare_wood_min_stock: f64,
    pub complain_energy_gain: f64,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            hunger_per_tick: 0.015,
            energy_decay_per_tick: 0.008,
            hungry_above: 80.0,
            tired_below: 30.0,
            rested_at: 80.0,
            rest_gain: 0.5,
            wander_chance: 0.3,
            move_step: 0.5,
            arrival_epsilon: 0.5,

            agents_per_house: 2,
            build_wood_reserve: 20.0,
            build_cost: 15.0,
            build_energy_cost: 0.03,
            self_gather_chance: 0.7,
            maintenance_energy_cost: 0.01,

            gatherer_wood_watermark: 50.0,
            gatherer_food_watermark: 100.0,

            farm_chance: 0.08,
            farm_energy_cost: 0.02,
            farm_min_energy: 40.0,
            farm_yield_min: 3,
            farm_yield_max: 6,

            daily_food_per_agent: 2.0,

            talk_chance: 0.05,
            talk_radius: 3.0,
            ask_food_hunger: 50.0,
            ask_food_min_stock: 10.0,
            share_food_min_stock: 5.0,
            share_food_amount: 2.0,
            share_food_relief: 15.0,
            ask_wood_watermark: 30.0,
            spare_wood_min_stock: 10.0,
            complain_energy_gain: 5.0,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn behavior_defaults_fill_missing_fields() {
        let behavior: BehaviorConfig = serde_yaml::from_str("build_cost: 5\n").unwrap();
        assert_eq!(behavior.build_cost, 5.0);
        assert_eq!(behavior.hungry_above, 80.0);
        assert_eq!(behavior.farm_yield_max, 6);
    }

    #[test]
    fn timing_defaults_match_frame_cadence() {
        let timing: TimingConfig = serde_yaml::from_str("speed: 2\n").unwrap();
        assert_eq!(timing.speed, 2);
        assert_eq!(timing.agent_interval_frames, 4);
        assert_eq!(timing.clock_interval_frames, 6);
        assert_eq!(timing.status_revert_frames, 40);
    }

    #[test]
    fn roster_entry_job_is_optional() {
        let entry: RosterEntry = serde_yaml::from_str("name: Alex\njob: Farmer\n").unwrap();
        assert_eq!(entry.job, Some(Job::Farmer));
        assert!(entry.x.is_none());
    }
}
