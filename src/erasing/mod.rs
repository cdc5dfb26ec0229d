//! Erasing systems.
//!
//! An erasing system holds a set of erasing strings and a pattern. An input
//! is accepted when the erasing strings can be removed from it, one
//! occurrence at a time, until nothing is left and the concatenation of the
//! removed strings (the trace) is in the pattern's language.
//!
//! The search only removes strings that keep the trace a possible prefix of
//! the pattern's language, ranked by [`QuantifierType`].
//!
//! # Example
//!
//! ```rust
//! use erasing::ErasingSystem;
//!
//! let system = ErasingSystem::new(["ab", "cd"], "(ab)(cd)*").unwrap();
//! assert!(system.run("cdabcd").unwrap());
//! assert!(!system.run("cd").unwrap());
//! ```

mod config;
mod filter;
mod search;

use std::collections::BTreeSet;

use itertools::Itertools;
use phf::{Set, phf_set};
use tracing::debug;

pub use config::{PositionSearch, QuantifierType, RunConfig};
pub use filter::{Candidate, filter_quantifier_levels, select};

use crate::error::{Error, Result};
use crate::pattern::{self, Levels, Pattern};
use crate::runnable::{Outcome, Runnable};
use search::Search;

/// Inputs longer than this (in characters) are refused; the search recurses
/// once per erasing step.
pub const MAXIMUM_INPUT_LENGTH: usize = 1000;

/// Symbols that may not occur in an erasing string.
const RESERVED_SYMBOLS: Set<char> = phf_set! {
    '(', ')', '[', ']', '{', '}', '<', '>', '\\', '.', '^', '$', '?', '#', ':', '!', '=',
};

#[derive(Debug, Clone)]
pub struct ErasingSystem {
    alphabet: BTreeSet<char>,
    erasing_strings: Vec<String>,
    pattern: Pattern,
    config: RunConfig,
}

impl ErasingSystem {
    /// Build an erasing system with the default [`RunConfig`].
    pub fn new<I, S>(erasing_strings: I, pattern: &str) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_config(erasing_strings, pattern, RunConfig::default())
    }

    /// Build an erasing system whose [`run`](Self::run) uses `config`.
    ///
    /// Duplicate erasing strings collapse; the first-seen order is the order
    /// in which equally ranked strings are tried.
    pub fn with_config<I, S>(erasing_strings: I, pattern: &str, config: RunConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let erasing_strings: Vec<String> = erasing_strings
            .into_iter()
            .map(Into::into)
            .unique()
            .collect();
        for erasing_string in &erasing_strings {
            check_erasing_string(erasing_string)?;
        }
        let pattern = pattern::parse(pattern)?;
        let alphabet = erasing_strings.iter().flat_map(|s| s.chars()).collect();
        debug!(
            erasing_strings = %erasing_strings.iter().join(", "),
            %pattern,
            "built erasing system"
        );
        Ok(Self {
            alphabet,
            erasing_strings,
            pattern,
            config,
        })
    }

    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    pub fn erasing_strings(&self) -> &[String] {
        &self.erasing_strings
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Decide whether `input` is accepted, using the construction-time config.
    pub fn run(&self, input: &str) -> Result<bool> {
        self.run_with(input, &self.config)
    }

    /// Decide whether `input` is accepted under `config`.
    pub fn run_with(&self, input: &str, config: &RunConfig) -> Result<bool> {
        let length = input.chars().count();
        if length > MAXIMUM_INPUT_LENGTH {
            return Err(Error::MaximumInputStringLengthExceeded {
                length,
                maximum: MAXIMUM_INPUT_LENGTH,
            });
        }
        Ok(Search::new(self, config).run(input))
    }

    /// Rank `trace` against the pattern under `quantifier`, or `None` when it
    /// cannot grow into a member of the language.
    pub fn levels(&self, trace: &str, quantifier: QuantifierType) -> Option<Levels> {
        let chars: Vec<char> = trace.chars().collect();
        match quantifier {
            QuantifierType::Greedy => pattern::greedy_levels(self.pattern.tokens(), &chars),
            QuantifierType::Lazy => pattern::lazy_levels(self.pattern.tokens(), &chars),
        }
    }
}

fn check_erasing_string(erasing_string: &str) -> Result<()> {
    if erasing_string.is_empty() {
        return Err(Error::EmptyErasingString);
    }
    match erasing_string.chars().find(|c| RESERVED_SYMBOLS.contains(c)) {
        Some(symbol) => Err(Error::IllegalSymbolOccurrence {
            erasing_string: erasing_string.to_string(),
            symbol,
        }),
        None => Ok(()),
    }
}

impl Runnable for ErasingSystem {
    fn run_model(&self, input: &str) -> Result<Outcome<'_>> {
        self.run(input).map(Outcome::Verdict)
    }
}
