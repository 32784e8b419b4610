use std::collections::VecDeque;

use super::{Key, Replace};

/// Evicts the earliest admitted key still resident. Hits do not reorder.
#[derive(Debug)]
pub struct Fifo<K> {
    arrival: VecDeque<K>,
}

impl<K> Fifo<K> {
    pub fn new() -> Self {
        Fifo {
            arrival: VecDeque::new(),
        }
    }
}

impl<K> Default for Fifo<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key> Replace<K> for Fifo<K> {
    fn record_access(&mut self, key: &K, _now: u64) {
        // Only first admission counts
        if !self.arrival.contains(key) {
            self.arrival.push_back(key.clone());
        }
    }

    fn select_victim(&mut self) -> Option<K> {
        self.arrival.pop_front()
    }
}
