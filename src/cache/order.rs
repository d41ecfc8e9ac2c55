//! Insertion Order Module
//!
//! Tracks keys by insertion sequence for oldest-first eviction.

use std::collections::BTreeMap;

// == Insertion Order ==
/// Orders keys by the sequence number they were inserted with.
///
/// Reads never reorder keys: the first key returned by `pop_oldest` is always
/// the one inserted earliest among those still tracked. Re-inserting a key
/// under a fresh sequence moves it to the back.
#[derive(Debug, Default)]
pub struct InsertionOrder {
    /// Keys keyed by insertion sequence, smallest = oldest
    by_sequence: BTreeMap<u64, String>,
    /// Sequence handed to the next push
    next_sequence: u64,
}

impl InsertionOrder {
    // == Constructor ==
    /// Creates a new empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Push ==
    /// Appends `key` as the newest entry and returns its sequence number.
    ///
    /// The caller is responsible for removing any earlier sequence held by the
    /// same key.
    pub fn push(&mut self, key: &str) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.by_sequence.insert(sequence, key.to_string());
        sequence
    }

    // == Remove ==
    /// Removes the key stored under `sequence`.
    pub fn remove(&mut self, sequence: u64) -> Option<String> {
        self.by_sequence.remove(&sequence)
    }

    // == Pop Oldest ==
    /// Removes and returns the earliest inserted key.
    pub fn pop_oldest(&mut self) -> Option<(u64, String)> {
        self.by_sequence.pop_first()
    }

    /// Iterates keys from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.by_sequence.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_sequence.is_empty()
    }

    /// Forgets every key and restarts numbering.
    pub fn clear(&mut self) {
        self.by_sequence.clear();
        self.next_sequence = 0;
    }
}
