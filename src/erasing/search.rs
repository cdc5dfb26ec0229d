//! Backtracking acceptance search.
//!
//! A state is `(tape, trace)`: what is left of the input and the
//! concatenation of everything erased so far. Choices of erasing string and
//! of position are explored depth first, in candidate order and then in
//! ascending position order.

use std::collections::{HashMap, HashSet};

use tracing::{info, trace};

use super::config::{PositionSearch, RunConfig};
use super::filter::{Candidate, select};
use super::ErasingSystem;

/// Emit a step description at `INFO` when verbose, `TRACE` otherwise.
macro_rules! step {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            info!(target: "erasing::verbose", $($arg)+);
        } else {
            trace!(target: "erasing::verbose", $($arg)+);
        }
    };
}

pub(super) struct Search<'a> {
    system: &'a ErasingSystem,
    config: &'a RunConfig,
    /// Traces already known to be rejected, keyed by tape.
    rejected: HashMap<String, HashSet<String>>,
}

impl<'a> Search<'a> {
    pub fn new(system: &'a ErasingSystem, config: &'a RunConfig) -> Self {
        Self {
            system,
            config,
            rejected: HashMap::new(),
        }
    }

    pub fn run(mut self, input: &str) -> bool {
        step!(self.config.verbose, "Start erasing system");
        step!(
            self.config.verbose,
            "Erasing strings: {}",
            self.system.erasing_strings.join(", ")
        );
        step!(self.config.verbose, "Regular language (expression): {}", self.system.pattern);
        step!(self.config.verbose, "Input string: {input}");

        let accepted = self.accepts(input, "");
        if accepted {
            step!(self.config.verbose, "-> Input string accepted by the erasing system");
        } else {
            step!(self.config.verbose, "-> Input string rejected by the erasing system");
        }
        accepted
    }

    /// Depth-first search over an explicit stack of open states.
    fn accepts(&mut self, input: &str, erased: &str) -> bool {
        let mut stack = match self.open(input.to_string(), erased.to_string()) {
            Opened::Verdict(accepted) => return accepted,
            Opened::Frame(frame) => vec![frame],
        };
        while let Some(frame) = stack.last_mut() {
            match self.next_child(frame) {
                Some((tape, erased)) => match self.open(tape, erased) {
                    Opened::Verdict(true) => return true,
                    Opened::Verdict(false) => {}
                    Opened::Frame(child) => stack.push(child),
                },
                None => {
                    if let Some(frame) = stack.pop() {
                        self.rejected.entry(frame.tape).or_default().insert(frame.erased);
                    }
                }
            }
        }
        false
    }

    fn open(&self, tape: String, erased: String) -> Opened<'a> {
        if tape.is_empty() {
            return Opened::Verdict(self.system.pattern.matches(&erased));
        }
        if self
            .rejected
            .get(&tape)
            .is_some_and(|traces| traces.contains(&erased))
        {
            return Opened::Verdict(false);
        }
        let candidates = self.applicable(&tape, &erased);
        Opened::Frame(Frame {
            tape,
            erased,
            candidates,
            current: None,
        })
    }

    /// The next `(tape, trace)` to visit from `frame`, in candidate order and
    /// then in position order.
    fn next_child(&self, frame: &mut Frame<'a>) -> Option<(String, String)> {
        loop {
            let Some(current) = frame.current.as_mut() else {
                let idx = select(&frame.candidates, self.config.quantifier)?;
                let erasing_string = frame.candidates.remove(idx).erasing_string;
                let mut positions = overlapping_positions(&frame.tape, erasing_string);
                if self.config.positions == PositionSearch::First {
                    positions.truncate(1);
                }
                frame.current = Some(Current {
                    erasing_string,
                    next_erased: format!("{}{erasing_string}", frame.erased),
                    positions: positions.into_iter(),
                    previous: None,
                });
                continue;
            };
            let Some(position) = current.positions.next() else {
                frame.current = None;
                continue;
            };
            let tape = &frame.tape;
            let next_tape = format!(
                "{}{}",
                &tape[..position],
                &tape[position + current.erasing_string.len()..]
            );
            // Inside a run such as `aaaa`, neighbouring positions erase to
            // the same tape.
            if current.previous.as_ref() == Some(&next_tape) {
                continue;
            }
            step!(
                self.config.verbose,
                "Chosen erasing string: {}; input tape: {}#{}; \
                 erased strings concatenation: {}",
                current.erasing_string,
                &tape[..position],
                &tape[position..],
                if frame.erased.is_empty() { "\"epsilon\"" } else { frame.erased.as_str() }
            );
            current.previous = Some(next_tape.clone());
            return Some((next_tape, current.next_erased.clone()));
        }
    }

    /// Erasing strings that occur in `tape` and keep `erased` a possible
    /// prefix of the language, in erasing-string order.
    fn applicable(&self, tape: &str, erased: &str) -> Vec<Candidate<'a>> {
        let system = self.system;
        system
            .erasing_strings
            .iter()
            .filter(|erasing_string| tape.contains(erasing_string.as_str()))
            .filter_map(|erasing_string| {
                let trace = format!("{erased}{erasing_string}");
                let levels = system.levels(&trace, self.config.quantifier)?;
                Some(Candidate {
                    erasing_string: erasing_string.as_str(),
                    levels,
                })
            })
            .collect()
    }
}

/// A state whose children are still being visited.
struct Frame<'a> {
    tape: String,
    erased: String,
    /// Candidates not yet chosen.
    candidates: Vec<Candidate<'a>>,
    current: Option<Current<'a>>,
}

/// The erasing string being tried in a frame and its remaining positions.
struct Current<'a> {
    erasing_string: &'a str,
    next_erased: String,
    positions: std::vec::IntoIter<usize>,
    previous: Option<String>,
}

enum Opened<'a> {
    /// Decided without expanding: an empty tape, or a known rejection.
    Verdict(bool),
    Frame(Frame<'a>),
}

/// Byte offsets of every (possibly overlapping) occurrence of `needle`.
fn overlapping_positions(haystack: &str, needle: &str) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut from = 0;
    while let Some(found) = haystack[from..].find(needle) {
        let position = from + found;
        positions.push(position);
        // Resume one character later so overlapping occurrences are found.
        from = position + haystack[position..].chars().next().map_or(1, char::len_utf8);
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn children(system: &ErasingSystem, tape: &str) -> Vec<(String, String)> {
        let config = RunConfig::default();
        let search = Search::new(system, &config);
        let Opened::Frame(mut frame) = search.open(tape.to_string(), String::new()) else {
            panic!("expected {tape:?} to be expanded");
        };
        std::iter::from_fn(|| search.next_child(&mut frame)).collect()
    }

    #[test]
    fn same_tape_from_a_run_is_visited_once() {
        let system = ErasingSystem::new(["a"], "[a]*b").unwrap();
        assert_eq!(
            children(&system, "aaab"),
            vec![("aab".to_string(), "a".to_string())]
        );
    }

    #[test]
    fn distinct_tapes_are_all_visited() {
        let system = ErasingSystem::new(["a"], "[a]*b").unwrap();
        assert_eq!(
            children(&system, "aba"),
            vec![
                ("ba".to_string(), "a".to_string()),
                ("ab".to_string(), "a".to_string()),
            ]
        );
    }

    #[test]
    fn overlapping_occurrences() {
        assert_eq!(overlapping_positions("aaaa", "aa"), vec![0, 1, 2]);
        assert_eq!(overlapping_positions("abcabdab", "ab"), vec![0, 3, 6]);
        assert_eq!(overlapping_positions("abc", "x"), Vec::<usize>::new());
    }

    #[test]
    fn positions_are_char_boundaries() {
        assert_eq!(overlapping_positions("ααα", "αα"), vec![0, 2]);
    }
}
