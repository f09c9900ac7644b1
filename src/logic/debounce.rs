//! Debounce timers
//!
//! Deadline bookkeeping for debounced actions. Scheduling a key that is
//! already pending pushes its deadline out (last call wins); nothing ever
//! queues twice. Callers re-check their own preconditions when a deadline
//! fires, so a key scheduled for a menu that has since closed is harmless.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Delay before a selection change shows its preview
pub const SHOW_POPOVER_DELAY: Duration = Duration::from_millis(50);

/// Delay before a folder menu reloads after files are created
pub const REFRESH_FILES_DELAY: Duration = Duration::from_millis(100);

/// Idle time after which the type-ahead buffer is cleared
pub const MATCH_RESET_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone)]
pub struct Debouncer<K> {
    deadlines: HashMap<K, Instant>,
}

impl<K: Copy + Eq + Hash> Default for Debouncer<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash> Debouncer<K> {
    pub fn new() -> Self {
        Self {
            deadlines: HashMap::new(),
        }
    }

    /// Schedule (or reschedule) `key` to fire `delay` after `now`
    pub fn schedule(&mut self, key: K, now: Instant, delay: Duration) {
        self.deadlines.insert(key, now + delay);
    }

    pub fn cancel(&mut self, key: K) {
        self.deadlines.remove(&key);
    }

    pub fn is_pending(&self, key: K) -> bool {
        self.deadlines.contains_key(&key)
    }

    /// Remove and return every key whose deadline has passed, earliest first
    pub fn due(&mut self, now: Instant) -> Vec<K> {
        let mut fired: Vec<(K, Instant)> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(key, deadline)| (*key, *deadline))
            .collect();
        fired.sort_by_key(|(_, deadline)| *deadline);

        for (key, _) in &fired {
            self.deadlines.remove(key);
        }
        fired.into_iter().map(|(key, _)| key).collect()
    }

    /// Earliest pending deadline, for sizing an event-loop poll timeout
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.values().min().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}
