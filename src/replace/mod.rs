pub mod fifo;
pub mod lru;

use std::{fmt, hash::Hash, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::SimError;

use self::{fifo::Fifo, lru::Lru};

/// Anything that can name a cache line.
pub trait Key: Eq + Hash + Clone + fmt::Debug + 'static {}

impl<K: Eq + Hash + Clone + fmt::Debug + 'static> Key for K {}

/// A replacement policy. The cache only ever talks to it through these two
/// calls, so the policy owns whatever bookkeeping it needs.
pub trait Replace<K: Key>: fmt::Debug {
    /// Called for every access once `key` is resident, hit or freshly admitted.
    fn record_access(&mut self, key: &K, now: u64);

    /// Picks the next key to evict and forgets it. `None` only when nothing
    /// has been admitted.
    fn select_victim(&mut self) -> Option<K>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AccessResult {
    #[serde(rename = "HIT")]
    Hit,
    #[serde(rename = "MISS")]
    Miss,
}

impl AccessResult {
    pub fn is_hit(self) -> bool {
        matches!(self, AccessResult::Hit)
    }
}

impl fmt::Display for AccessResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AccessResult::Hit => "HIT",
            AccessResult::Miss => "MISS",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Policy {
    Fifo,
    Lru,
}

impl Policy {
    pub const ALL: [Policy; 2] = [Policy::Fifo, Policy::Lru];

    pub fn build<K: Key>(self) -> Box<dyn Replace<K>> {
        match self {
            Policy::Fifo => Box::new(Fifo::new()),
            Policy::Lru => Box::new(Lru::new()),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Policy::Fifo => "FIFO",
            Policy::Lru => "LRU",
        })
    }
}

impl FromStr for Policy {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "fifo" => Policy::Fifo,
            "lru" => Policy::Lru,
            _ => {
                return Err(SimError::InvalidConfiguration(format!(
                    "unrecognized replacement policy: {s}"
                )))
            }
        })
    }
}

impl TryFrom<String> for Policy {
    type Error = SimError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Policy> for String {
    fn from(policy: Policy) -> Self {
        policy.to_string()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_policy_parse_is_case_insensitive() {
        assert_eq!("FIFO".parse::<Policy>().unwrap(), Policy::Fifo);
        assert_eq!("lru".parse::<Policy>().unwrap(), Policy::Lru);
        assert_eq!(" Lru ".parse::<Policy>().unwrap(), Policy::Lru);
    }

    #[test]
    fn test_unknown_policy_is_invalid_configuration() {
        let err = "lfu".parse::<Policy>().unwrap_err();
        assert!(matches!(err, SimError::InvalidConfiguration(_)));
        assert!(err.to_string().contains("lfu"));
    }

    #[test]
    fn test_policy_serde_uses_display_names() {
        assert_eq!(serde_json::to_string(&Policy::Lru).unwrap(), "\"LRU\"");
        let p: Policy = serde_json::from_str("\"fifo\"").unwrap();
        assert_eq!(p, Policy::Fifo);
        assert!(serde_json::from_str::<Policy>("\"mru\"").is_err());
    }
}
