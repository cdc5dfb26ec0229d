//! Erasing systems and finite transducers.
//!
//! An [`ErasingSystem`] accepts an input when its erasing strings can remove
//! the whole input, one occurrence at a time, so that the removed strings
//! read in order form a word of a restricted regular language. A
//! [`Transducer`] rewrites an input into every output its transitions allow.
//!
//! # Example
//!
//! ```rust
//! use erasing::{ErasingSystem, RunConfig, Transducer};
//!
//! let system = ErasingSystem::new(["a", "b", "c", "d"], "(cd)+ab").unwrap();
//! assert!(system.run("cabd").unwrap());
//! assert!(!system.run_with("ab", &RunConfig::default().lazy()).unwrap());
//!
//! let transducer = Transducer::new([("s", "a", "r", "c"), ("r", "b", "s", "")], "s", ["s"])
//!     .unwrap();
//! assert_eq!(transducer.run("abab").collect::<Vec<_>>(), ["cc"]);
//! ```

pub mod erasing;
mod error;
pub mod pattern;
mod runnable;
pub mod transducer;

pub use erasing::{ErasingSystem, MAXIMUM_INPUT_LENGTH, PositionSearch, QuantifierType, RunConfig};
pub use error::{Error, Result};
pub use pattern::{Pattern, PatternError};
pub use runnable::{Outcome, Runnable};
pub use transducer::{DeterministicTransducer, Target, Transducer, TransducerRun, Transition};
