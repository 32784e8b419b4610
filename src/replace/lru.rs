use std::collections::HashMap;

use super::{Key, Replace};

#[derive(Debug, Clone, Copy)]
struct Recency {
    last_access: u64,
    admitted: u64,
}

/// Evicts the resident key with the oldest last access.
///
/// Ties on `last_access` go to the key admitted first. Admission times are
/// unique among resident keys, so the choice never depends on map order.
#[derive(Debug)]
pub struct Lru<K> {
    recency: HashMap<K, Recency>,
}

impl<K> Lru<K> {
    pub fn new() -> Self {
        Lru {
            recency: HashMap::new(),
        }
    }
}

impl<K> Default for Lru<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key> Replace<K> for Lru<K> {
    fn record_access(&mut self, key: &K, now: u64) {
        self.recency
            .entry(key.clone())
            .and_modify(|r| r.last_access = now)
            .or_insert(Recency {
                last_access: now,
                admitted: now,
            });
    }

    fn select_victim(&mut self) -> Option<K> {
        let victim = self
            .recency
            .iter()
            .min_by_key(|(_key, r)| (r.last_access, r.admitted))
            .map(|(key, _r)| key.clone())?;
        self.recency.remove(&victim);
        Some(victim)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_lru_insertion_order_without_reuse() {
        let mut lru = Lru::new();
        lru.record_access(&1, 1);
        lru.record_access(&2, 2);
        lru.record_access(&3, 3);

        assert_eq!(lru.select_victim(), Some(1));
        assert_eq!(lru.select_victim(), Some(2));
    }

    #[test]
    fn test_lru_access_refreshes_key() {
        let mut lru = Lru::new();
        lru.record_access(&1, 1);
        lru.record_access(&2, 2);
        lru.record_access(&3, 3);
        lru.record_access(&1, 4);

        assert_eq!(lru.select_victim(), Some(2));
        lru.record_access(&2, 5);
        assert_eq!(lru.select_victim(), Some(3));
        assert_eq!(lru.select_victim(), Some(1));
        assert_eq!(lru.select_victim(), Some(2));
        assert_eq!(lru.select_victim(), None);
    }

    #[test]
    fn test_lru_tie_goes_to_earliest_admission() {
        let mut lru = Lru::new();
        for key in [30, 10, 20] {
            lru.record_access(&key, 7);
        }
        lru.recency.get_mut(&10).unwrap().admitted = 1;
        lru.recency.get_mut(&20).unwrap().admitted = 2;
        lru.recency.get_mut(&30).unwrap().admitted = 3;

        assert_eq!(lru.select_victim(), Some(10));
        assert_eq!(lru.select_victim(), Some(20));
        assert_eq!(lru.select_victim(), Some(30));
    }

    #[test]
    fn test_lru_victim_is_forgotten() {
        let mut lru = Lru::new();
        lru.record_access(&"x", 1);
        lru.record_access(&"y", 2);
        assert_eq!(lru.select_victim(), Some("x"));
        assert!(!lru.recency.contains_key(&"x"));
        assert_eq!(lru.recency.len(), 1);
    }
}
