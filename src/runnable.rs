use crate::error::Result;

/// What running a model produced.
pub enum Outcome<'a> {
    /// Accept/reject verdict of an erasing system.
    Verdict(bool),
    /// Lazily generated transducer outputs.
    Outputs(Box<dyn Iterator<Item = String> + 'a>),
}

impl Outcome<'_> {
    /// Collapse to accept/reject: a transducer accepts when it produces at
    /// least one output.
    pub fn is_accepted(self) -> bool {
        match self {
            Outcome::Verdict(accepted) => accepted,
            Outcome::Outputs(mut outputs) => outputs.next().is_some(),
        }
    }
}

impl std::fmt::Debug for Outcome<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Verdict(accepted) => f.debug_tuple("Verdict").field(accepted).finish(),
            Outcome::Outputs(_) => f.write_str("Outputs(..)"),
        }
    }
}

/// A formal model that can be run on an input string.
pub trait Runnable {
    fn run_model(&self, input: &str) -> Result<Outcome<'_>>;
}
