//! The estimation ledger: who answered what, in the order they first answered.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered mapping from participant name to their numeric estimate.
///
/// Insertion order is meaningful: the public "who has answered" view reports
/// names in first-submission order. Resubmitting overwrites the value without
/// moving the entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    entries: Vec<(String, f64)>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the estimate for `name`.
    pub fn insert(&mut self, name: &str, value: f64) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    /// Participant names in first-submission order, each exactly once.
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// The wire format is a plain JSON object, `{"Alice": 5.0, ...}`, keyed in
// insertion order.
impl Serialize for Ledger {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
