use std::collections::HashSet;
use std::hash::Hash;

/// Tracks natural keys so only the first record carrying a key is kept.
#[derive(Debug)]
pub struct FirstSeen<K> {
    seen: HashSet<K>,
}

impl<K: Eq + Hash> FirstSeen<K> {
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }

    /// Returns `true` the first time `key` is offered and `false` afterwards.
    pub fn admit(&mut self, key: K) -> bool {
        self.seen.insert(key)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

impl<K: Eq + Hash> Default for FirstSeen<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_first_occurrence_is_admitted() {
        let mut seen = FirstSeen::new();
        let keys = ["u1", "u2", "u1", "u3", "u2"];
        let kept: Vec<_> = keys.iter().filter(|k| seen.admit(**k)).collect();
        assert_eq!(kept, vec![&"u1", &"u2", &"u3"]);
        assert_eq!(seen.len(), 3);
    }
}
