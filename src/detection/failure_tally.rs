//! Failed-attempt counts per (user, ip) pair
//!
//! Keys iterate in the order they were first seen, which is the row order
//! of the user+IP report.

use std::collections::HashMap;

/// (user, ip)
pub type UserIpKey = (String, String);

#[derive(Debug, Clone, Default)]
pub struct FailureTally {
    counts: HashMap<UserIpKey, usize>,
    /// Keys in first-seen order
    order: Vec<UserIpKey>,
}

impl FailureTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one failure for the pair
    pub fn record(&mut self, user: &str, ip: &str) {
        let key = (user.to_string(), ip.to_string());
        match self.counts.get_mut(&key) {
            Some(count) => *count += 1,
            None => {
                self.order.push(key.clone());
                self.counts.insert(key, 1);
            }
        }
    }

    pub fn get(&self, user: &str, ip: &str) -> usize {
        self.counts
            .get(&(user.to_string(), ip.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct (user, ip) pairs
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterate `((user, ip), count)` in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&UserIpKey, usize)> + '_ {
        self.order.iter().map(move |key| (key, self.counts[key]))
    }

    /// Fold another tally into this one
    ///
    /// Counts add, so merging partial tallies in any order gives the same
    /// counts as one sequential pass. Keys new to `self` are appended in
    /// `other`'s order.
    pub fn merge(&mut self, other: FailureTally) {
        let FailureTally { mut counts, order } = other;
        for key in order {
            let added = counts.remove(&key).unwrap_or(0);
            match self.counts.get_mut(&key) {
                Some(count) => *count += added,
                None => {
                    self.order.push(key.clone());
                    self.counts.insert(key, added);
                }
            }
        }
    }
}
