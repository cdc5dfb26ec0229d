//! Nondeterministic finite transducer.

use std::collections::{BTreeSet, HashMap, HashSet};

use indexmap::IndexMap;
use itertools::Itertools;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::runnable::{Outcome, Runnable};

/// One transducer move: in `from`, read `input` and write `output`, then go
/// to `to`. An empty `input` is an epsilon move.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transition {
    pub from: String,
    pub input: String,
    pub to: String,
    pub output: String,
}

impl Transition {
    pub fn new(
        from: impl Into<String>,
        input: impl Into<String>,
        to: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            input: input.into(),
            to: to.into(),
            output: output.into(),
        }
    }
}

impl From<(&str, &str, &str, &str)> for Transition {
    fn from((from, input, to, output): (&str, &str, &str, &str)) -> Self {
        Self::new(from, input, to, output)
    }
}

/// Where a transition group leads and what it writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub to: String,
    pub output: String,
}

/// Outgoing moves of one state, keyed by the input they read.
type Moves = IndexMap<String, Vec<Target>>;

#[derive(Debug, Clone)]
pub struct Transducer {
    states: BTreeSet<String>,
    input_alphabet: BTreeSet<char>,
    output_alphabet: BTreeSet<char>,
    /// Grouped by source state, then by input, both in first-definition order.
    transitions: IndexMap<String, Moves>,
    initial_state: String,
    final_states: BTreeSet<String>,
    max_output_length: Option<usize>,
}

impl Transducer {
    /// Build a transducer. The states are exactly those named by the
    /// transitions.
    pub fn new<T, F, S>(transitions: T, initial_state: &str, final_states: F) -> Result<Self>
    where
        T: IntoIterator,
        T::Item: Into<Transition>,
        F: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut transducer = Self {
            states: BTreeSet::new(),
            input_alphabet: BTreeSet::new(),
            output_alphabet: BTreeSet::new(),
            transitions: IndexMap::new(),
            initial_state: initial_state.to_string(),
            final_states: BTreeSet::new(),
            max_output_length: None,
        };
        for transition in transitions {
            transducer.add_transition(transition.into());
        }

        if !transducer.states.contains(initial_state) {
            return Err(Error::InitialStateNotInStates(initial_state.to_string()));
        }
        transducer.final_states = final_states.into_iter().map(Into::into).collect();
        let unknown: Vec<String> = transducer
            .final_states
            .difference(&transducer.states)
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(Error::FinalStatesNotStatesSubset(unknown));
        }

        debug!(
            states = %transducer.states.iter().join(", "),
            initial = %transducer.initial_state,
            finals = %transducer.final_states.iter().join(", "),
            "built transducer"
        );
        Ok(transducer)
    }

    /// Replace the output-length cap for epsilon moves. `None` is unbounded.
    pub fn with_max_output_length(self, max_output_length: Option<usize>) -> Self {
        Self {
            max_output_length,
            ..self
        }
    }

    fn add_transition(&mut self, transition: Transition) {
        let Transition {
            from,
            input,
            to,
            output,
        } = transition;
        self.states.insert(from.clone());
        self.states.insert(to.clone());
        self.input_alphabet.extend(input.chars());
        self.output_alphabet.extend(output.chars());
        self.transitions
            .entry(from)
            .or_default()
            .entry(input)
            .or_default()
            .push(Target { to, output });
    }

    pub fn states(&self) -> &BTreeSet<String> {
        &self.states
    }

    pub fn input_alphabet(&self) -> &BTreeSet<char> {
        &self.input_alphabet
    }

    pub fn output_alphabet(&self) -> &BTreeSet<char> {
        &self.output_alphabet
    }

    pub fn initial_state(&self) -> &str {
        &self.initial_state
    }

    pub fn final_states(&self) -> &BTreeSet<String> {
        &self.final_states
    }

    pub fn max_output_length(&self) -> Option<usize> {
        self.max_output_length
    }

    pub fn is_final(&self, state: &str) -> bool {
        self.final_states.contains(state)
    }

    /// Targets of the transitions leaving `state` on `input`, in definition
    /// order.
    pub fn transitions_from(&self, state: &str, input: &str) -> &[Target] {
        self.transitions
            .get(state)
            .and_then(|moves| moves.get(input))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub(crate) fn moves(&self, state: &str) -> Option<&Moves> {
        self.transitions.get(state)
    }

    /// Lazily enumerate every output for `input`.
    pub fn run(&self, input: &str) -> TransducerRun<'_> {
        TransducerRun::new(self, input)
    }
}

impl Runnable for Transducer {
    fn run_model(&self, input: &str) -> Result<Outcome<'_>> {
        Ok(Outcome::Outputs(Box::new(self.run(input))))
    }
}

/// A pending configuration: input consumed so far (in bytes), output written
/// so far, and the current state.
struct Config<'a> {
    offset: usize,
    output: String,
    state: &'a str,
}

/// Iterator over the outputs of one transducer run.
///
/// Configurations are explored depth first; each `(offset, output)` pair is
/// visited at most once per state.
pub struct TransducerRun<'a> {
    transducer: &'a Transducer,
    input: String,
    stack: Vec<Config<'a>>,
    seen: HashMap<&'a str, HashSet<(usize, String)>>,
}

impl<'a> TransducerRun<'a> {
    fn new(transducer: &'a Transducer, input: &str) -> Self {
        Self {
            transducer,
            input: input.to_string(),
            stack: vec![Config {
                offset: 0,
                output: String::new(),
                state: transducer.initial_state.as_str(),
            }],
            seen: HashMap::new(),
        }
    }

    fn may_take_epsilon(&self, output: &str) -> bool {
        self.transducer
            .max_output_length
            .is_none_or(|cap| output.chars().count() < cap)
    }

    fn push_successors(&mut self, config: &Config<'a>) {
        let transducer = self.transducer;
        let Some(moves) = transducer.moves(config.state) else {
            return;
        };
        let remaining = &self.input[config.offset..];
        for (read, targets) in moves {
            if !remaining.starts_with(read.as_str()) {
                continue;
            }
            if read.is_empty() && !self.may_take_epsilon(&config.output) {
                continue;
            }
            for target in targets {
                self.stack.push(Config {
                    offset: config.offset + read.len(),
                    output: format!("{}{}", config.output, target.output),
                    state: target.to.as_str(),
                });
            }
        }
    }
}

impl Iterator for TransducerRun<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while let Some(config) = self.stack.pop() {
            let fresh = self
                .seen
                .entry(config.state)
                .or_default()
                .insert((config.offset, config.output.clone()));
            if !fresh {
                continue;
            }
            self.push_successors(&config);
            if config.offset == self.input.len() && self.transducer.is_final(config.state) {
                trace!(output = %config.output, state = config.state, "transducer output");
                return Some(config.output);
            }
        }
        None
    }
}
