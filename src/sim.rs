//! Runs a whole access sequence through a fresh cache and records what
//! happened at every step.

use serde::Serialize;

use crate::{
    cache::{validate_capacity, Cache, CacheStats},
    clock::Clock,
    error::Result,
    replace::{AccessResult, Key, Policy},
};

/// One resolved access.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord<K> {
    /// 1-based logical time.
    pub time: u64,
    pub key: K,
    pub outcome: AccessResult,
    /// Resident keys after the access, in admission order. Owned, so later
    /// steps never alter it.
    pub cache: Vec<K>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult<K> {
    pub policy: Policy,
    pub capacity: usize,
    pub steps: Vec<StepRecord<K>>,
    #[serde(flatten)]
    pub stats: CacheStats,
}

impl<K> SimulationResult<K> {
    pub fn hits(&self) -> u64 {
        self.stats.hits
    }

    pub fn misses(&self) -> u64 {
        self.stats.misses
    }

    pub fn hit_ratio(&self) -> f64 {
        self.stats.hit_ratio
    }

    /// Height of the tallest snapshot in the trace.
    pub fn max_occupancy(&self) -> usize {
        self.steps.iter().map(|s| s.cache.len()).max().unwrap_or(0)
    }
}

pub fn simulate<K: Key>(
    accesses: &[K],
    capacity: usize,
    policy: Policy,
) -> Result<SimulationResult<K>> {
    let mut cache = Cache::new(capacity, policy)?;
    let mut clock = Clock::new();

    let steps = accesses
        .iter()
        .map(|key| {
            let time = clock.tick();
            let outcome = cache.access(&clock, key);
            StepRecord {
                time,
                key: key.clone(),
                outcome,
                cache: cache.resident().to_vec(),
            }
        })
        .collect::<Vec<_>>();

    let stats = cache.make_stats();
    log::info!(
        "{policy} x{capacity}: {} accesses, {} hits, {} misses ({}%)",
        stats.total,
        stats.hits,
        stats.misses,
        stats.hit_ratio
    );

    Ok(SimulationResult {
        policy,
        capacity: cache.capacity(),
        steps,
        stats,
    })
}

/// Simulates the same accesses under each policy, one thread per policy.
///
/// Every run owns its cache; only the access slice is shared. Results come
/// back in the order of `policies`.
pub fn compare<K: Key + Send + Sync>(
    accesses: &[K],
    capacity: usize,
    policies: &[Policy],
) -> Result<Vec<SimulationResult<K>>> {
    validate_capacity(capacity)?;

    crossbeam::scope(|s| {
        let handles = policies
            .iter()
            .map(|&policy| s.spawn(move |_| simulate(accesses, capacity, policy)))
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .collect::<Result<Vec<_>>>()
    })
    .unwrap_or_else(|e| std::panic::resume_unwind(e))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::SimError;
    use crate::replace::AccessResult::{Hit, Miss};

    fn outcomes<K>(result: &SimulationResult<K>) -> Vec<AccessResult> {
        result.steps.iter().map(|s| s.outcome).collect()
    }

    #[test]
    fn test_fifo_scenario() {
        let result = simulate(&[1, 2, 3, 1], 2, Policy::Fifo).unwrap();
        assert_eq!(outcomes(&result), vec![Miss, Miss, Miss, Miss]);
        assert_eq!(result.steps[2].cache, vec![2, 3]);
        assert_eq!(result.steps[3].cache, vec![3, 1]);
        assert_eq!((result.hits(), result.misses()), (0, 4));
        assert_eq!(result.hit_ratio(), 0.0);
    }

    #[test]
    fn test_lru_scenario() {
        let result = simulate(&[1, 2, 1, 3], 2, Policy::Lru).unwrap();
        assert_eq!(outcomes(&result), vec![Miss, Miss, Hit, Miss]);
        assert_eq!(result.steps[3].cache, vec![1, 3]);
        assert_eq!((result.hits(), result.misses()), (1, 3));
        assert_eq!(result.hit_ratio(), 25.0);
    }

    #[test]
    fn test_fifo_hit_does_not_refresh() {
        let result = simulate(&[1, 2, 1, 3], 2, Policy::Fifo).unwrap();
        assert_eq!(outcomes(&result), vec![Miss, Miss, Hit, Miss]);
        assert_eq!(result.steps[3].cache, vec![2, 3]);
    }

    #[test]
    fn test_zero_capacity_fails_before_running() {
        for policy in Policy::ALL {
            let err = simulate(&[1, 2, 3], 0, policy).unwrap_err();
            assert!(matches!(err, SimError::InvalidConfiguration(_)));
        }
    }

    #[test]
    fn test_empty_accesses() {
        let result = simulate::<i64>(&[], 3, Policy::Lru).unwrap();
        assert!(result.steps.is_empty());
        assert_eq!(result.stats, CacheStats::new(0, 0));
        assert_eq!(result.max_occupancy(), 0);
    }

    #[test]
    fn test_steps_are_numbered_from_one() {
        let result = simulate(&["a", "a", "b"], 1, Policy::Fifo).unwrap();
        let times = result.steps.iter().map(|s| s.time).collect::<Vec<_>>();
        assert_eq!(times, vec![1, 2, 3]);
        assert_eq!(result.steps[1].outcome, Hit);
        assert_eq!(result.steps[2].cache, vec!["b"]);
    }

    #[test]
    fn test_compare_matches_individual_runs() {
        let accesses = [7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2];
        let results = compare(&accesses, 3, &Policy::ALL).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0], simulate(&accesses, 3, Policy::Fifo).unwrap());
        assert_eq!(results[1], simulate(&accesses, 3, Policy::Lru).unwrap());
    }

    #[test]
    fn test_compare_rejects_zero_capacity() {
        let err = compare(&[1], 0, &Policy::ALL).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_result_serializes_flat_stats() {
        let result = simulate(&[1, 1], 1, Policy::Lru).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["policy"], "LRU");
        assert_eq!(json["hits"], 1);
        assert_eq!(json["hit_ratio"], 50.0);
        assert_eq!(json["steps"][1]["outcome"], "HIT");
        assert_eq!(json["steps"][1]["cache"], serde_json::json!([1]));
    }
}
