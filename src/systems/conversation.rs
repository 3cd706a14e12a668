//! Small talk between neighbours. A conversation may move food out of the
//! shared stock or perk someone up; most topics are just chatter.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::agent::{Agent, Job, Status};
use crate::clock::Clock;
use crate::config::BehaviorConfig;
use crate::memory::{MemoryEntry, MemoryEvent, Topic};
use crate::resources::{Resource, ResourcePool};

/// What the initiator needs to know about the other side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partner {
    pub name: String,
    pub job: Job,
}

impl From<&Agent> for Partner {
    fn from(agent: &Agent) -> Self {
        Self {
            name: agent.name.clone(),
            job: agent.job,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    pub topic: Topic,
    pub result: String,
    /// Status before the conversation took over.
    pub previous: Status,
    /// Status shown while talking.
    pub talking: Status,
}

/// Index of a random neighbour of `agents[index]`, if any.
pub fn pick_partner<R: Rng + ?Sized>(
    agents: &[Agent],
    index: usize,
    radius: f64,
    rng: &mut R,
) -> Option<usize> {
    let me = agents.get(index)?;
    let nearby: Vec<usize> = agents
        .iter()
        .enumerate()
        .filter(|(_, other)| other.id != me.id && me.is_near(other, radius))
        .map(|(i, _)| i)
        .collect();
    nearby.choose(rng).copied()
}

/// Topics that fit the agent's situation. Falls back to small talk.
pub fn candidate_topics(
    agent: &Agent,
    resources: &ResourcePool,
    behavior: &BehaviorConfig,
) -> Vec<Topic> {
    let mut topics = Vec::new();
    if agent.hunger > behavior.ask_food_hunger && resources.food > behavior.ask_food_min_stock {
        topics.push(Topic::AskForFood);
    }
    if agent.job == Job::Builder && resources.wood < behavior.ask_wood_watermark {
        topics.push(Topic::AskForWood);
    }
    if agent.status.is_distressed() {
        topics.push(Topic::ComplainAboutNeeds);
    }
    if resources.houses > 0 {
        topics.push(Topic::DiscussHousing);
    }
    if topics.is_empty() {
        topics.extend(Topic::SMALL_TALK);
    }
    topics
}

/// Applies the topic's effect and describes how it went.
pub fn resolve<R: Rng + ?Sized>(
    topic: Topic,
    agent: &mut Agent,
    partner: &Partner,
    resources: &mut ResourcePool,
    clock: &Clock,
    behavior: &BehaviorConfig,
    rng: &mut R,
) -> String {
    match topic {
        Topic::AskForFood => {
            if resources.food > behavior.share_food_min_stock
                && resources.try_consume(Resource::Food, behavior.share_food_amount)
            {
                agent.hunger = (agent.hunger - behavior.share_food_relief).max(0.0);
                format!(
                    "{} shared food. Hunger -{}",
                    partner.name, behavior.share_food_relief
                )
            } else {
                format!("{} has no food to share", partner.name)
            }
        }
        Topic::AskForWood => {
            if resources.wood > behavior.spare_wood_min_stock {
                format!("{} will gather more wood", partner.name)
            } else {
                "No wood available".to_string()
            }
        }
        Topic::ComplainAboutNeeds => {
            agent.energy += behavior.complain_energy_gain;
            "Felt better after complaining".to_string()
        }
        Topic::DiscussHousing => {
            if partner.job == Job::Builder {
                "Discussed new house designs".to_string()
            } else {
                "Talked about living conditions".to_string()
            }
        }
        Topic::DiscussWeather => "Discussed the weather".to_string(),
        Topic::ShareStory => {
            let day = rng.gen_range(1..=clock.day().max(1));
            format!("Shared a story from day {day}")
        }
        Topic::Greeting => "Said hello".to_string(),
    }
}

/// Runs a whole conversation for the initiating agent: picks a topic,
/// applies it, logs it and switches the status to "Talking to ...". The
/// caller schedules the status revert.
pub fn converse<R: Rng + ?Sized>(
    agent: &mut Agent,
    partner: &Partner,
    resources: &mut ResourcePool,
    clock: &Clock,
    behavior: &BehaviorConfig,
    rng: &mut R,
) -> Conversation {
    let topics = candidate_topics(agent, resources, behavior);
    let topic = topics.choose(rng).copied().unwrap_or(Topic::Greeting);

    let talking = Status::TalkingTo {
        name: partner.name.clone(),
    };
    let previous = std::mem::replace(&mut agent.status, talking.clone());

    let result = resolve(topic, agent, partner, resources, clock, behavior, rng);
    agent.memory.record(MemoryEntry {
        day: clock.day(),
        time: clock.time_string(),
        event: MemoryEvent::Conversation {
            with: partner.name.clone(),
            topic,
        },
        result: result.clone(),
    });
    tracing::debug!(agent = %agent.name, with = %partner.name, %topic, %result, "conversation");

    Conversation {
        topic,
        result,
        previous,
        talking,
    }
}
