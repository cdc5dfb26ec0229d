//! Restricted regular-language patterns for erasing systems.
//!
//! # Pattern syntax
//!
//! | Token      | Meaning                                              |
//! |------------|------------------------------------------------------|
//! | `x`        | One literal character                                |
//! | `(ab\|cd)` | Capturing alternation of literal strings             |
//! | `[a-f0]`   | Character class (singles and inclusive ranges)       |
//! | `X*`       | Zero or more of the preceding group or class         |
//! | `X+`       | One or more of the preceding group or class          |
//!
//! Brackets never nest, operators only follow a group or class, and the
//! characters `{ } < > \ . ^ $ ? # : ! =` are not allowed anywhere.

pub mod ast;
pub mod char_class;
pub mod matcher;
pub mod parser;
pub mod partial;

pub use ast::{ClassItem, Operator, Pattern, PatternToken};
pub use matcher::{Capture, Match, full_match, is_full_match};
pub use parser::{PatternError, is_valid, parse, tokenize, validate};
pub use partial::{Levels, greedy_levels, lazy_levels, possible_match};

impl Pattern {
    /// Test whether `subject` is in the pattern's language.
    pub fn matches(&self, subject: &str) -> bool {
        let chars: Vec<char> = subject.chars().collect();
        is_full_match(&self.tokens, &chars)
    }
}

impl std::str::FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
