//! Cache replacement simulator.
//!
//! Feeds a sequence of keys through a fixed-capacity cache under FIFO or LRU
//! replacement and records, for every access, whether it hit and what the
//! cache held afterwards.
//!
//! ```
//! use cachecraft::{simulate, Policy};
//!
//! let result = simulate(&[1, 2, 1, 3], 2, Policy::Lru).unwrap();
//! assert_eq!(result.hits(), 1);
//! assert_eq!(result.steps[3].cache, vec![1, 3]);
//! ```

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod render;
pub mod replace;
pub mod sim;
pub mod trace;

pub use cache::CacheStats;
pub use error::{Result, SimError};
pub use replace::{AccessResult, Key, Policy, Replace};
pub use sim::{compare, simulate, SimulationResult, StepRecord};
