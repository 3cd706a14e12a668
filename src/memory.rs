use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const MEMORY_CAPACITY: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    AskForFood,
    AskForWood,
    ComplainAboutNeeds,
    DiscussHousing,
    Greeting,
    DiscussWeather,
    ShareStory,
}

impl Topic {
    pub const SMALL_TALK: [Topic; 3] = [Topic::Greeting, Topic::DiscussWeather, Topic::ShareStory];
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Topic::AskForFood => "askForFood",
            Topic::AskForWood => "askForWood",
            Topic::ComplainAboutNeeds => "complainAboutNeeds",
            Topic::DiscussHousing => "discussHousing",
            Topic::Greeting => "greeting",
            Topic::DiscussWeather => "discussWeather",
            Topic::ShareStory => "shareStory",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Building,
    Farming,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemoryEvent {
    Conversation { with: String, topic: Topic },
    Action { action: Action },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub day: u32,
    pub time: String,
    #[serde(flatten)]
    pub event: MemoryEvent,
    pub result: String,
}

/// Most recent events an agent remembers. Oldest entries fall out first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    entries: VecDeque<MemoryEntry>,
}

impl Memory {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(MEMORY_CAPACITY + 1),
        }
    }

    pub fn record(&mut self, entry: MemoryEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > MEMORY_CAPACITY {
            self.entries.pop_front();
        }
    }

    pub fn latest(&self) -> Option<&MemoryEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MemoryEntry> {
        self.entries.iter()
    }
}
