use serde::Serialize;

use crate::{
    clock::Clock,
    error::{Result, SimError},
    replace::{AccessResult, Key, Policy, Replace},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub total: u64,
    /// Percentage, rounded to two decimals. Zero before any access.
    pub hit_ratio: f64,
}

impl CacheStats {
    pub fn new(hits: u64, misses: u64) -> Self {
        let total = hits + misses;
        let hit_ratio = if total > 0 {
            round_cents(hits as f64 / total as f64 * 100.0)
        } else {
            0.0
        };
        CacheStats {
            hits,
            misses,
            total,
            hit_ratio,
        }
    }
}

/// Rounds a non-negative value to two decimals, half to even, deciding ties
/// on the exact binary value of `x` rather than on `x * 100.0`.
fn round_cents(x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    let bits = x.to_bits();
    let exp = ((bits >> 52) & 0x7ff) as i32;
    let frac = bits & ((1 << 52) - 1);
    // x == mantissa * 2^shift exactly
    let (mantissa, shift) = if exp == 0 {
        (frac, -1074)
    } else {
        (frac | (1 << 52), exp - 1075)
    };
    let scaled = mantissa as u128 * 100;
    let cents = if shift >= 0 {
        scaled << shift
    } else if -shift >= 120 {
        // below 2^-60, far under half a cent
        0
    } else {
        let drop = -shift as u32;
        let whole = scaled >> drop;
        let rem = scaled & ((1u128 << drop) - 1);
        let half = 1u128 << (drop - 1);
        if rem > half || (rem == half && whole % 2 == 1) {
            whole + 1
        } else {
            whole
        }
    };
    cents as f64 / 100.0
}

pub fn validate_capacity(capacity: usize) -> Result<usize> {
    if capacity == 0 {
        return Err(SimError::InvalidConfiguration(
            "capacity must be at least 1".to_string(),
        ));
    }
    Ok(capacity)
}

/// A fully associative cache of `capacity` keys.
///
/// Resident keys are kept in admission order: a victim is removed in place and
/// the new key goes to the back. For FIFO this is exactly eviction order.
#[derive(Debug)]
pub struct Cache<K: Key> {
    resident: Vec<K>,
    capacity: usize,
    repl: Box<dyn Replace<K>>,
    hits: u64,
    misses: u64,
}

impl<K: Key> Cache<K> {
    pub fn new(capacity: usize, policy: Policy) -> Result<Self> {
        let capacity = validate_capacity(capacity)?;
        Ok(Cache {
            resident: Vec::with_capacity(capacity),
            capacity,
            repl: policy.build(),
            hits: 0,
            misses: 0,
        })
    }

    pub fn access(&mut self, clock: &Clock, key: &K) -> AccessResult {
        if self.resident.contains(key) {
            self.repl.record_access(key, clock.now);
            self.hits += 1;
            log::trace!("t={} {key:?} hit", clock.now);
            return AccessResult::Hit;
        }

        if self.resident.len() >= self.capacity {
            // No empty slot, evict
            let victim = self
                .repl
                .select_victim()
                .expect("replacement policy tracks every resident key");
            log::debug!("t={} {key:?} evicts {victim:?}", clock.now);
            self.resident.retain(|k| *k != victim);
        }
        self.resident.push(key.clone());
        self.repl.record_access(key, clock.now);
        self.misses += 1;
        log::trace!("t={} {key:?} miss", clock.now);
        AccessResult::Miss
    }

    pub fn resident(&self) -> &[K] {
        &self.resident
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn make_stats(&self) -> CacheStats {
        CacheStats::new(self.hits, self.misses)
    }
}
