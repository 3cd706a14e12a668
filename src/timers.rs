use std::collections::VecDeque;

use crate::agent::{AgentId, Status};

/// Puts an agent's status back once a conversation is over, unless the
/// agent has moved on to something else in the meantime.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusRevert {
    pub fire_at: u64,
    pub agent: AgentId,
    pub expected: Status,
    pub restore: Status,
}

/// Pending reverts ordered by fire frame; equal frames keep insertion order.
#[derive(Debug, Default)]
pub struct StatusTimers {
    queue: VecDeque<StatusRevert>,
}

impl StatusTimers {
    pub fn schedule(&mut self, revert: StatusRevert) {
        let at = self
            .queue
            .partition_point(|pending| pending.fire_at <= revert.fire_at);
        self.queue.insert(at, revert);
    }

    pub fn drain_due(&mut self, frame: u64) -> Vec<StatusRevert> {
        let mut due = Vec::new();
        while self
            .queue
            .front()
            .is_some_and(|pending| pending.fire_at <= frame)
        {
            if let Some(revert) = self.queue.pop_front() {
                due.push(revert);
            }
        }
        due
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
