//! Straight-line movement on the tile grid. No pathfinding: agents walk
//! through water and trees alike.

use rand::Rng;

use crate::agent::Agent;
use crate::config::BehaviorConfig;

/// One step of -1, 0 or +1 tiles on each axis. Does not clamp.
pub fn random_step<R: Rng + ?Sized>(agent: &mut Agent, rng: &mut R) {
    let dx = rng.gen_range(-1..=1);
    let dy = rng.gen_range(-1..=1);
    agent.position.x += dx as f64;
    agent.position.y += dy as f64;
}

/// Idle agents occasionally shuffle about.
pub fn wander<R: Rng + ?Sized>(agent: &mut Agent, behavior: &BehaviorConfig, rng: &mut R) {
    if agent.target.is_none() && rng.gen_bool(behavior.wander_chance) {
        random_step(agent, rng);
    }
}

/// Moves a fixed step toward the target on each axis independently, or
/// drops the target once both axes are within the arrival epsilon.
pub fn approach_target(agent: &mut Agent, behavior: &BehaviorConfig) {
    let Some(target) = agent.target else {
        return;
    };
    let dx = target.x as f64 - agent.position.x;
    let dy = target.y as f64 - agent.position.y;
    if dx.abs() < behavior.arrival_epsilon && dy.abs() < behavior.arrival_epsilon {
        agent.target = None;
        return;
    }
    agent.position.x += sign(dx) * behavior.move_step;
    agent.position.y += sign(dy) * behavior.move_step;
}

/// The movement tail of an agent update: wander or approach, then clamp.
pub fn settle<R: Rng + ?Sized>(
    agent: &mut Agent,
    width: u32,
    height: u32,
    behavior: &BehaviorConfig,
    rng: &mut R,
) {
    wander(agent, behavior, rng);
    approach_target(agent, behavior);
    agent.position.clamp_to(width, height);
}

// f64::signum maps 0.0 to 1.0, which would drift an aligned axis.
fn sign(delta: f64) -> f64 {
    if delta > 0.0 {
        1.0
    } else if delta < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentId, Job, Position};
    use crate::spatial::TilePos;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn agent_at(x: f64, y: f64) -> Agent {
        Agent::new(AgentId::new(0), "Alex", Job::Explorer, Position::new(x, y))
    }

    #[test]
    fn high_draw_skips_wandering() {
        let behavior = BehaviorConfig::default();
        let mut agent = agent_at(4.0, 4.0);
        let mut rng = StepRng::new(u64::MAX, 0);

        for _ in 0..10 {
            wander(&mut agent, &behavior, &mut rng);
        }
        assert_eq!(agent.position, Position::new(4.0, 4.0));
    }

    #[test]
    fn agents_with_targets_do_not_wander() {
        let behavior = BehaviorConfig {
            wander_chance: 1.0,
            ..BehaviorConfig::default()
        };
        let mut agent = agent_at(4.0, 4.0);
        agent.target = Some(TilePos::new(4, 4));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        wander(&mut agent, &behavior, &mut rng);
        assert_eq!(agent.position, Position::new(4.0, 4.0));
    }

    #[test]
    fn random_steps_stay_within_one_tile() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..100 {
            let mut agent = agent_at(5.0, 5.0);
            random_step(&mut agent, &mut rng);
            assert!((agent.position.x - 5.0).abs() <= 1.0);
            assert!((agent.position.y - 5.0).abs() <= 1.0);
        }
    }

    #[test]
    fn approach_steps_per_axis_and_arrives() {
        let behavior = BehaviorConfig::default();
        let mut agent = agent_at(0.0, 2.0);
        agent.target = Some(TilePos::new(2, 2));

        approach_target(&mut agent, &behavior);
        assert_eq!(agent.position, Position::new(0.5, 2.0));

        for _ in 0..3 {
            approach_target(&mut agent, &behavior);
        }
        assert_eq!(agent.position, Position::new(2.0, 2.0));
        assert_eq!(agent.target, Some(TilePos::new(2, 2)));

        approach_target(&mut agent, &behavior);
        assert!(agent.target.is_none());
        assert_eq!(agent.position, Position::new(2.0, 2.0));
    }

    #[test]
    fn diagonal_moves_both_axes() {
        let behavior = BehaviorConfig::default();
        let mut agent = agent_at(3.0, 3.0);
        agent.target = Some(TilePos::new(0, 5));
        approach_target(&mut agent, &behavior);
        assert_eq!(agent.position, Position::new(2.5, 3.5));
    }

    #[test]
    fn settle_clamps_to_map() {
        let behavior = BehaviorConfig {
            wander_chance: 0.0,
            ..BehaviorConfig::default()
        };
        let mut agent = agent_at(-1.0, 9.0);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        settle(&mut agent, 5, 5, &behavior, &mut rng);
        assert_eq!(agent.position, Position::new(0.0, 4.0));
    }
}
