//! Token types for erasing-system patterns.

use std::fmt;

/// A validated, tokenized pattern.
///
/// Tokens are concatenated left to right. An [`PatternToken::Operator`] always
/// modifies the group or class immediately before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub(crate) tokens: Vec<PatternToken>,
}

impl Pattern {
    pub fn tokens(&self) -> &[PatternToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// One atomic unit of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternToken {
    Literal(char),
    /// `(ab|cd)`: alternation of literal strings. Always capturing.
    Group(Vec<String>),
    /// `[a-f0]`
    CharClass(Vec<ClassItem>),
    Operator(Operator),
}

impl PatternToken {
    pub fn is_operator(&self) -> bool {
        matches!(self, PatternToken::Operator(_))
    }

    /// The extension group of a `Group` token: every proper, non-empty prefix
    /// of every alternative, in order.
    ///
    /// `(a|bcd)` extends to `(b|bc)`. Returns `None` for other tokens and for
    /// groups whose alternatives are all single characters.
    pub fn extension(&self) -> Option<PatternToken> {
        let PatternToken::Group(alternatives) = self else {
            return None;
        };
        let prefixes: Vec<String> = alternatives
            .iter()
            .flat_map(|alt| {
                alt.char_indices()
                    .skip(1)
                    .map(move |(end, _)| alt[..end].to_string())
            })
            .collect();
        if prefixes.is_empty() {
            None
        } else {
            Some(PatternToken::Group(prefixes))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `*`: zero or more
    Star,
    /// `+`: one or more
    Plus,
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Operator::Star => '*',
            Operator::Plus => '+',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassItem {
    Single(char),
    Range(char, char),
}

impl fmt::Display for PatternToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternToken::Literal(c) => write!(f, "{c}"),
            PatternToken::Group(alternatives) => write!(f, "({})", alternatives.join("|")),
            PatternToken::CharClass(items) => {
                write!(f, "[")?;
                for item in items {
                    match item {
                        ClassItem::Single(c) => write!(f, "{c}")?,
                        ClassItem::Range(lo, hi) => write!(f, "{lo}-{hi}")?,
                    }
                }
                write!(f, "]")
            }
            PatternToken::Operator(op) => write!(f, "{}", op.symbol()),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tokens.iter().try_for_each(|token| write!(f, "{token}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(alternatives: &[&str]) -> PatternToken {
        PatternToken::Group(alternatives.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn extension_collects_proper_prefixes() {
        assert_eq!(group(&["a", "bcd"]).extension(), Some(group(&["b", "bc"])));
        assert_eq!(
            group(&["ab", "cde"]).extension(),
            Some(group(&["a", "c", "cd"]))
        );
    }

    #[test]
    fn single_char_group_has_no_extension() {
        assert_eq!(group(&["a", "b"]).extension(), None);
        assert_eq!(PatternToken::Literal('a').extension(), None);
    }

    #[test]
    fn extension_respects_char_boundaries() {
        assert_eq!(group(&["αβγ"]).extension(), Some(group(&["α", "αβ"])));
    }

    #[test]
    fn display_round_trips_source() {
        let pattern = Pattern {
            tokens: vec![
                group(&["ab", "cd"]),
                PatternToken::Operator(Operator::Star),
                PatternToken::CharClass(vec![ClassItem::Range('a', 'f'), ClassItem::Single('0')]),
                PatternToken::Operator(Operator::Plus),
                PatternToken::Literal('x'),
            ],
        };
        assert_eq!(pattern.to_string(), "(ab|cd)*[a-f0]+x");
    }
}
