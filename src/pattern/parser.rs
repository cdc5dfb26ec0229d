//! Validation and tokenization of erasing-system pattern strings.
//!
//! Validation runs in two passes: a textual pass over the raw string
//! (denylist, bracket structure) and a structural pass over the tokens.
//! [`tokenize`] itself never fails; it only classifies chunks.

use std::iter::Peekable;
use std::str::Chars;

use phf::{Set, phf_set};

use super::ast::*;
use super::char_class::parse_class_body;

/// Substrings that may never appear in a pattern.
const FORBIDDEN_SEQUENCES: Set<&'static str> = phf_set! {
    "{", "}", "<", ">", "\\", ".", "^", "$", "?", "#", ":", "!", "=", "*+", "++",
};

/// Errors that can occur while validating a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    Empty,
    LeadingOperator(char),
    ForbiddenSequence(&'static str),
    NestedBracket(char),
    UnbalancedBracket(char),
    EmptyBracket(char),
    EmptyAlternative,
    OperatorInGroup(char),
    DanglingOperator(char),
    TopLevelAlternation,
    InvalidRange(char, char),
}

impl std::fmt::Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty pattern"),
            Self::LeadingOperator(c) => write!(f, "Pattern starts with operator {c:?}"),
            Self::ForbiddenSequence(s) => write!(f, "Forbidden sequence {s:?} in pattern"),
            Self::NestedBracket(c) => write!(f, "Nested bracket {c:?} in pattern"),
            Self::UnbalancedBracket(c) => write!(f, "Unbalanced bracket {c:?} in pattern"),
            Self::EmptyBracket(c) => write!(f, "Empty bracket {c:?} in pattern"),
            Self::EmptyAlternative => write!(f, "Empty alternative in group"),
            Self::OperatorInGroup(c) => write!(f, "Operator {c:?} inside group"),
            Self::DanglingOperator(c) => {
                write!(f, "Operator {c:?} must follow a group or character class")
            }
            Self::TopLevelAlternation => write!(f, "Alternation '|' outside of a group"),
            Self::InvalidRange(lo, hi) => write!(f, "Invalid character range {lo}-{hi}"),
        }
    }
}

impl std::error::Error for PatternError {}

/// Validate and tokenize a pattern string into a [`Pattern`].
pub fn parse(input: &str) -> Result<Pattern, PatternError> {
    validate(input)?;
    Ok(Pattern {
        tokens: tokenize(input),
    })
}

/// Check a pattern string against the restricted grammar.
pub fn validate(input: &str) -> Result<(), PatternError> {
    let first = input.chars().next().ok_or(PatternError::Empty)?;
    if matches!(first, '*' | '+' | '|') {
        return Err(PatternError::LeadingOperator(first));
    }
    if let Some(seq) = FORBIDDEN_SEQUENCES.iter().find(|seq| input.contains(**seq)) {
        return Err(PatternError::ForbiddenSequence(*seq));
    }
    check_brackets(input)?;
    check_tokens(&tokenize(input))
}

/// Boolean form of [`validate`].
pub fn is_valid(input: &str) -> bool {
    validate(input).is_ok()
}

/// Split a pattern into tokens: a whole `(...)`, a whole `[...]`, or a single
/// character.
pub fn tokenize(input: &str) -> Vec<PatternToken> {
    let mut chars = input.chars().peekable();
    let mut tokens = Vec::new();
    while let Some(c) = chars.next() {
        let token = match c {
            '(' => PatternToken::Group(
                take_until(&mut chars, ')')
                    .split('|')
                    .map(str::to_string)
                    .collect(),
            ),
            '[' => PatternToken::CharClass(parse_class_body(&take_until(&mut chars, ']'))),
            '*' => PatternToken::Operator(Operator::Star),
            '+' => PatternToken::Operator(Operator::Plus),
            c => PatternToken::Literal(c),
        };
        tokens.push(token);
    }
    tokens
}

/// Collect characters up to (and consume) `close`, or to end of input.
fn take_until(chars: &mut Peekable<Chars<'_>>, close: char) -> String {
    let mut body = String::new();
    for c in chars.by_ref() {
        if c == close {
            break;
        }
        body.push(c);
    }
    body
}

/// Brackets must form a flat sequence of `()` / `[]` pairs.
fn check_brackets(input: &str) -> Result<(), PatternError> {
    let mut open: Option<char> = None;
    for c in input.chars() {
        match c {
            '(' | '[' => {
                if open.is_some() {
                    return Err(PatternError::NestedBracket(c));
                }
                open = Some(c);
            }
            ')' | ']' => {
                let expected = if c == ')' { '(' } else { '[' };
                if open.take() != Some(expected) {
                    return Err(PatternError::UnbalancedBracket(c));
                }
            }
            _ => {}
        }
    }
    match open {
        Some(c) => Err(PatternError::UnbalancedBracket(c)),
        None => Ok(()),
    }
}

fn check_tokens(tokens: &[PatternToken]) -> Result<(), PatternError> {
    let mut previous: Option<&PatternToken> = None;
    for token in tokens {
        match token {
            PatternToken::Operator(op) => {
                if !matches!(
                    previous,
                    Some(PatternToken::Group(_) | PatternToken::CharClass(_))
                ) {
                    return Err(PatternError::DanglingOperator(op.symbol()));
                }
            }
            PatternToken::Literal('|') => return Err(PatternError::TopLevelAlternation),
            PatternToken::Literal(_) => {}
            PatternToken::Group(alternatives) => {
                if alternatives.len() == 1 && alternatives[0].is_empty() {
                    return Err(PatternError::EmptyBracket('('));
                }
                if alternatives.iter().any(String::is_empty) {
                    return Err(PatternError::EmptyAlternative);
                }
                if let Some(c) = alternatives
                    .iter()
                    .flat_map(|alt| alt.chars())
                    .find(|c| matches!(c, '*' | '+'))
                {
                    return Err(PatternError::OperatorInGroup(c));
                }
            }
            PatternToken::CharClass(items) => {
                if items.is_empty() {
                    return Err(PatternError::EmptyBracket('['));
                }
                for item in items {
                    if let ClassItem::Range(lo, hi) = item
                        && lo > hi
                    {
                        return Err(PatternError::InvalidRange(*lo, *hi));
                    }
                }
            }
        }
        previous = Some(token);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(s: &str) -> Vec<PatternToken> {
        parse(s).expect("parse should succeed").tokens
    }
    fn parse_err(s: &str) -> PatternError {
        parse(s).expect_err("parse should fail")
    }

    fn group(alternatives: &[&str]) -> PatternToken {
        PatternToken::Group(alternatives.iter().map(|s| s.to_string()).collect())
    }

    // --- Tokens ---

    #[test]
    fn test_groups_and_operators() {
        assert_eq!(
            parse_ok("(ab)(cd)*"),
            vec![
                group(&["ab"]),
                group(&["cd"]),
                PatternToken::Operator(Operator::Star)
            ]
        );
    }

    #[test]
    fn test_multi_alternative_group() {
        assert_eq!(
            parse_ok("(ab)*(cd|ef)+"),
            vec![
                group(&["ab"]),
                PatternToken::Operator(Operator::Star),
                group(&["cd", "ef"]),
                PatternToken::Operator(Operator::Plus),
            ]
        );
    }

    #[test]
    fn test_literals_are_single_chars() {
        assert_eq!(
            parse_ok("(cd)+ab"),
            vec![
                group(&["cd"]),
                PatternToken::Operator(Operator::Plus),
                PatternToken::Literal('a'),
                PatternToken::Literal('b'),
            ]
        );
    }

    #[test]
    fn test_char_class_with_ranges() {
        assert_eq!(
            parse_ok("(ab)*[a-z0-9](cd)+")[2],
            PatternToken::CharClass(vec![ClassItem::Range('a', 'z'), ClassItem::Range('0', '9')])
        );
    }

    #[test]
    fn test_unicode_literals() {
        assert_eq!(
            parse_ok("αβ"),
            vec![PatternToken::Literal('α'), PatternToken::Literal('β')]
        );
    }

    #[test]
    fn test_class_may_repeat() {
        assert!(is_valid("(aa|bb)[cd]*"));
        assert!(is_valid("(ab)*[abc](cd)*"));
    }

    // --- Errors ---

    #[test]
    fn test_empty() {
        assert_eq!(parse_err(""), PatternError::Empty);
    }

    #[test]
    fn test_leading_operator() {
        assert_eq!(parse_err("*abc+"), PatternError::LeadingOperator('*'));
        assert_eq!(parse_err("+a"), PatternError::LeadingOperator('+'));
        assert_eq!(parse_err("|a"), PatternError::LeadingOperator('|'));
    }

    #[test]
    fn test_forbidden_sequences() {
        for pattern in [
            "(ab)*cd{1-5}",
            "(?<=abc)def",
            "(?=abc)",
            "(?#abc)",
            "(?!abc)",
            ".*",
            "^abc$",
            r"(a\Db)*",
            "(ab)*(ab:cd)",
        ] {
            assert!(
                matches!(parse_err(pattern), PatternError::ForbiddenSequence(_)),
                "expected forbidden sequence: {pattern}"
            );
        }
    }

    #[test]
    fn test_quantifier_runs() {
        assert_eq!(parse_err("(ab)*+"), PatternError::ForbiddenSequence("*+"));
        assert_eq!(parse_err("(ab)++"), PatternError::ForbiddenSequence("++"));
    }

    #[test]
    fn test_nested_brackets() {
        assert_eq!(parse_err("((ab))"), PatternError::NestedBracket('('));
        assert_eq!(parse_err("(a[b])"), PatternError::NestedBracket('['));
    }

    #[test]
    fn test_unbalanced_brackets() {
        assert_eq!(parse_err("(ab"), PatternError::UnbalancedBracket('('));
        assert_eq!(parse_err("ab)"), PatternError::UnbalancedBracket(')'));
        assert_eq!(parse_err("(ab]"), PatternError::UnbalancedBracket(']'));
    }

    #[test]
    fn test_empty_brackets_and_alternatives() {
        assert_eq!(parse_err("a()"), PatternError::EmptyBracket('('));
        assert_eq!(parse_err("a[]"), PatternError::EmptyBracket('['));
        assert_eq!(parse_err("(ab|)"), PatternError::EmptyAlternative);
    }

    #[test]
    fn test_operator_placement() {
        assert_eq!(parse_err("a*"), PatternError::DanglingOperator('*'));
        assert_eq!(parse_err("(ab)**"), PatternError::DanglingOperator('*'));
        assert_eq!(parse_err("(a*b)"), PatternError::OperatorInGroup('*'));
    }

    #[test]
    fn test_top_level_alternation() {
        assert_eq!(parse_err("ab|cd"), PatternError::TopLevelAlternation);
    }

    #[test]
    fn test_reversed_range() {
        assert_eq!(parse_err("[z-a]"), PatternError::InvalidRange('z', 'a'));
    }
}
