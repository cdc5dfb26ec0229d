//! Finite transducers.
//!
//! [`Transducer`] is nondeterministic and may read whole strings (or nothing)
//! per move; its outputs come from a lazy depth-first search.
//! [`DeterministicTransducer`] restricts moves to one symbol each and at most
//! one move per state and symbol, so it has at most one output.
//!
//! ```rust
//! use erasing::Transducer;
//!
//! let t = Transducer::new([("s", "a", "r", "c"), ("r", "b", "s", "")], "s", ["s"]).unwrap();
//! assert_eq!(t.run("abab").collect::<Vec<_>>(), ["cc"]);
//! ```

mod deterministic;
mod finite;

pub use deterministic::DeterministicTransducer;
pub use finite::{Target, Transducer, TransducerRun, Transition};
