//! Errors raised while building or running a formal model.

use std::fmt;

use crate::pattern::PatternError;

/// Why a model could not be built, or why a run was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The initial state does not occur in any transition.
    InitialStateNotInStates(String),
    /// These final states do not occur in any transition.
    FinalStatesNotStatesSubset(Vec<String>),
    /// A deterministic transducer transition reads other than one symbol, or
    /// repeats a `(state, symbol)` pair.
    InvalidTransition { from: String, input: String },
    /// An erasing string contains a reserved symbol.
    IllegalSymbolOccurrence { erasing_string: String, symbol: char },
    EmptyErasingString,
    InvalidRegularLanguagePattern(PatternError),
    MaximumInputStringLengthExceeded { length: usize, maximum: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitialStateNotInStates(state) => {
                write!(f, "Initial state {state:?} is not one of the transducer states")
            }
            Self::FinalStatesNotStatesSubset(states) => write!(
                f,
                "Final states {states:?} are not among the transducer states"
            ),
            Self::InvalidTransition { from, input } => write!(
                f,
                "Invalid deterministic transition from {from:?} reading {input:?}"
            ),
            Self::IllegalSymbolOccurrence {
                erasing_string,
                symbol,
            } => write!(
                f,
                "Erasing string {erasing_string:?} contains reserved symbol {symbol:?}"
            ),
            Self::EmptyErasingString => write!(f, "Erasing strings must not be empty"),
            Self::InvalidRegularLanguagePattern(err) => {
                write!(f, "Invalid regular language pattern: {err}")
            }
            Self::MaximumInputStringLengthExceeded { length, maximum } => write!(
                f,
                "Input string length {length} exceeds the maximum of {maximum}"
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidRegularLanguagePattern(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PatternError> for Error {
    fn from(err: PatternError) -> Self {
        Self::InvalidRegularLanguagePattern(err)
    }
}
