//! Deterministic generalized sequential machine.

use std::collections::HashSet;

use super::finite::{Transducer, Transition};
use crate::error::{Error, Result};
use crate::runnable::{Outcome, Runnable};

/// A transducer that reads exactly one symbol per move and has at most one
/// move per `(state, symbol)`.
#[derive(Debug, Clone)]
pub struct DeterministicTransducer {
    inner: Transducer,
}

impl DeterministicTransducer {
    pub fn new<T, F, S>(transitions: T, initial_state: &str, final_states: F) -> Result<Self>
    where
        T: IntoIterator,
        T::Item: Into<Transition>,
        F: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let transitions: Vec<Transition> = transitions.into_iter().map(Into::into).collect();
        check_determinism(&transitions)?;
        let inner = Transducer::new(transitions, initial_state, final_states)?;
        Ok(Self { inner })
    }

    /// Produce the single output for `input`, if the machine accepts it.
    pub fn run(&self, input: &str) -> std::option::IntoIter<String> {
        self.translate(input).into_iter()
    }

    fn translate(&self, input: &str) -> Option<String> {
        let mut state = self.inner.initial_state();
        let mut output = String::new();
        let mut buf = [0; 4];
        for symbol in input.chars() {
            let target = self
                .inner
                .transitions_from(state, symbol.encode_utf8(&mut buf))
                .first()?;
            output.push_str(&target.output);
            state = &target.to;
        }
        self.inner.is_final(state).then_some(output)
    }

    pub fn as_transducer(&self) -> &Transducer {
        &self.inner
    }
}

fn check_determinism(transitions: &[Transition]) -> Result<()> {
    let invalid = |t: &Transition| Error::InvalidTransition {
        from: t.from.clone(),
        input: t.input.clone(),
    };
    if let Some(t) = transitions.iter().find(|t| t.input.chars().count() != 1) {
        return Err(invalid(t));
    }
    let mut seen = HashSet::new();
    for t in transitions {
        if !seen.insert((t.from.as_str(), t.input.as_str())) {
            return Err(invalid(t));
        }
    }
    Ok(())
}

impl Runnable for DeterministicTransducer {
    fn run_model(&self, input: &str) -> Result<Outcome<'_>> {
        Ok(Outcome::Outputs(Box::new(self.run(input))))
    }
}
