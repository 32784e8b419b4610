use std::{fs, path::PathBuf};

use serde::Deserialize;

use crate::{
    cache::validate_capacity,
    error::{Result, SimError},
    replace::Policy,
    trace::read_trace,
};

pub const DEFAULT_CAPACITY: i64 = 4;

/// Run configuration, as read from JSON and then overridden from the command
/// line.
///
/// ```json
/// { "capacity": 3, "policy": "LRU", "accesses": [1, 2, 1, 3] }
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_capacity")]
    pub capacity: i64,
    #[serde(default = "default_policy")]
    pub policy: String,
    #[serde(default)]
    pub accesses: Option<Vec<i64>>,
    #[serde(default)]
    pub trace: Option<PathBuf>,
}

fn default_capacity() -> i64 {
    DEFAULT_CAPACITY
}

fn default_policy() -> String {
    Policy::Fifo.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            capacity: default_capacity(),
            policy: default_policy(),
            accesses: None,
            trace: None,
        }
    }
}

/// A checked configuration, ready to simulate.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub capacity: usize,
    pub policy: Policy,
    pub accesses: Vec<i64>,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &str) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Validates capacity and policy, then loads the accesses. Inline
    /// accesses win over a trace file.
    pub fn to_run(self) -> Result<RunConfig> {
        let capacity = usize::try_from(self.capacity)
            .map_err(|_| {
                SimError::InvalidConfiguration(format!(
                    "capacity must be at least 1, got {}",
                    self.capacity
                ))
            })
            .and_then(validate_capacity)?;
        let policy = self.policy.parse()?;
        let accesses = match (self.accesses, self.trace) {
            (Some(accesses), _) => accesses,
            (None, Some(path)) => read_trace(&path)?,
            (None, None) => {
                return Err(SimError::InvalidConfiguration(
                    "no accesses given; pass --accesses or a trace".to_string(),
                ))
            }
        };
        Ok(RunConfig {
            capacity,
            policy,
            accesses,
        })
    }
}
