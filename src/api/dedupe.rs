//! Redelivery guard for Slack events.

use std::collections::{HashSet, VecDeque};

pub const DEFAULT_CAPACITY: usize = 256;

/// Remembers the most recent event ids seen by this process.
#[derive(Debug)]
pub struct RecentEvents {
    capacity: usize,
    order: VecDeque<String>,
    seen: HashSet<String>,
}

impl RecentEvents {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            order: VecDeque::with_capacity(capacity),
            seen: HashSet::with_capacity(capacity),
        }
    }

    /// Records `event_id`. Returns `false` when it is already held.
    pub fn check_and_insert(&mut self, event_id: &str) -> bool {
        if self.seen.contains(event_id) {
            return false;
        }

        if self.order.len() == self.capacity
            && let Some(oldest) = self.order.pop_front()
        {
            self.seen.remove(&oldest);
        }

        self.order.push_back(event_id.to_string());
        self.seen.insert(event_id.to_string());
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for RecentEvents {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
