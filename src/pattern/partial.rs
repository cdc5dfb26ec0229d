//! Partial matching: could a candidate still grow into a full match?
//!
//! The candidate is compared against a prefix of the pattern's tokens (the
//! "compared pattern"). A trailing group, or a trailing group with an
//! operator, may additionally be matched only partway through one of its
//! alternatives by appending its extension group (see
//! [`PatternToken::extension`]).

use super::ast::*;
use super::matcher::{Match, full_match};

/// Fingerprint of a successful (possibly partial) match, used to rank
/// erasing-string candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Levels {
    /// Non-operator tokens in the compared pattern.
    pub match_level: usize,
    /// One entry per group of the matched pattern: how many times the
    /// group's last-iteration text repeats from where the group began.
    pub quantifier_levels: Vec<usize>,
}

/// Test whether `candidate` matches `compared`, fully or partially.
pub fn possible_match(compared: &[PatternToken], candidate: &[char]) -> Option<Levels> {
    let matched = full_match(compared, candidate).or_else(|| extended_match(compared, candidate))?;
    Some(levels(compared, candidate, &matched))
}

/// Grow the compared pattern from one token until something matches.
pub fn greedy_levels(tokens: &[PatternToken], candidate: &[char]) -> Option<Levels> {
    (1..=tokens.len()).find_map(|k| possible_match(&tokens[..k], candidate))
}

/// Shrink the compared pattern from the whole until something matches. A
/// trailing operator is dropped together with the token it modifies.
pub fn lazy_levels(tokens: &[PatternToken], candidate: &[char]) -> Option<Levels> {
    let mut k = tokens.len();
    while k > 0 {
        if let Some(levels) = possible_match(&tokens[..k], candidate) {
            return Some(levels);
        }
        k -= if tokens[k - 1].is_operator() { 2 } else { 1 };
    }
    None
}

fn extended_match(compared: &[PatternToken], candidate: &[char]) -> Option<Match> {
    let mut extended = compared.to_vec();
    match compared {
        [.., group @ PatternToken::Group(_), PatternToken::Operator(_)] => {
            let extension = group.extension()?;
            // At least one full repetition may already be behind us.
            if let Some(last) = extended.last_mut() {
                *last = PatternToken::Operator(Operator::Star);
            }
            extended.push(extension);
        }
        [.., group @ PatternToken::Group(_)] => {
            let extension = group.extension()?;
            if let Some(last) = extended.last_mut() {
                *last = extension;
            }
        }
        _ => return None,
    }
    full_match(&extended, candidate)
}

fn levels(compared: &[PatternToken], candidate: &[char], matched: &Match) -> Levels {
    let quantifier_levels = matched
        .captures
        .iter()
        .map(|capture| {
            capture.map_or(0, |c| {
                repeats(candidate, c.run_start, &candidate[c.start..c.end])
            })
        })
        .collect();
    Levels {
        match_level: compared.iter().filter(|t| !t.is_operator()).count(),
        quantifier_levels,
    }
}

/// Count consecutive copies of `unit` in `subject` starting at `from`.
fn repeats(subject: &[char], from: usize, unit: &[char]) -> usize {
    if unit.is_empty() {
        return 0;
    }
    let mut count = 0;
    let mut pos = from;
    while subject[pos..].starts_with(unit) {
        count += 1;
        pos += unit.len();
    }
    count
}
