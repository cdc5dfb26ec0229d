//! Full-match engine with capture tracking.
//!
//! All positions are **character** (not byte) indices into the subject.
//!
//! Matching is leftmost-first: group alternatives are tried in source order
//! and quantifiers are greedy. Every group captures; a capture holds the text
//! of the group's last iteration on the chosen path.
//!
//! Whether the rest of the pattern matches from a continuation point depends
//! only on `(item, position, step)`, so those answers are tabulated bottom-up
//! first and the chosen path is then walked without recursion.

use super::ast::*;
use super::char_class::class_matches;

/// The span of one group on the successful path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    /// Where the group item (including all of its repetitions) began.
    pub run_start: usize,
    /// Start of the last iteration.
    pub start: usize,
    /// End of the last iteration.
    pub end: usize,
}

/// The result of a successful full match: one slot per group, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub captures: Vec<Option<Capture>>,
}

/// Match `tokens` against the whole of `subject`.
pub fn full_match(tokens: &[PatternToken], subject: &[char]) -> Option<Match> {
    let (items, groups) = compile(tokens);
    let table = Table::solve(&items, subject);
    table.walk(groups).map(|captures| Match { captures })
}

/// Convenience form of [`full_match`] that only reports success.
pub fn is_full_match(tokens: &[PatternToken], subject: &[char]) -> bool {
    let (items, _) = compile(tokens);
    Table::solve(&items, subject).enter(0, 0)
}

// ─── Compilation ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quantifier {
    Once,
    ZeroOrMore,
    OneOrMore,
}

#[derive(Debug)]
enum Atom<'p> {
    Literal(char),
    Class(&'p [ClassItem]),
    Group {
        alternatives: Vec<Vec<char>>,
        slot: usize,
    },
}

#[derive(Debug)]
struct Item<'p> {
    atom: Atom<'p>,
    quantifier: Quantifier,
}

/// Fold operators into the atom they modify and number the groups.
fn compile(tokens: &[PatternToken]) -> (Vec<Item<'_>>, usize) {
    let mut items: Vec<Item<'_>> = Vec::with_capacity(tokens.len());
    let mut groups = 0;
    for token in tokens {
        let atom = match token {
            PatternToken::Literal(c) => Atom::Literal(*c),
            PatternToken::CharClass(class) => Atom::Class(class),
            PatternToken::Group(alternatives) => {
                groups += 1;
                Atom::Group {
                    alternatives: alternatives.iter().map(|alt| alt.chars().collect()).collect(),
                    slot: groups - 1,
                }
            }
            PatternToken::Operator(op) => {
                // Validation guarantees an operator never comes first.
                if let Some(last) = items.last_mut() {
                    last.quantifier = match op {
                        Operator::Star => Quantifier::ZeroOrMore,
                        Operator::Plus => Quantifier::OneOrMore,
                    };
                }
                continue;
            }
        };
        items.push(Item {
            atom,
            quantifier: Quantifier::Once,
        });
    }
    (items, groups)
}

// ─── Tabulation ─────────────────────────────────────────────────────────────

/// A continuation point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// About to start item `i`.
    Enter,
    /// Inside a repetition of item `i`: may iterate again or move on.
    Repeat,
}

struct Table<'a, 'p> {
    items: &'a [Item<'p>],
    subject: &'a [char],
    /// `enter[idx * width + pos]`: items `idx..` match `subject[pos..]`.
    enter: Vec<bool>,
    /// `repeat[idx * width + pos]`: inside a repetition of item `idx` at
    /// `pos`, the rest of the pattern matches.
    repeat: Vec<bool>,
}

impl<'a, 'p> Table<'a, 'p> {
    fn solve(items: &'a [Item<'p>], subject: &'a [char]) -> Self {
        let width = subject.len() + 1;
        let mut table = Table {
            items,
            subject,
            enter: vec![false; (items.len() + 1) * width],
            repeat: vec![false; items.len() * width],
        };
        table.enter[items.len() * width + subject.len()] = true;

        // Every occurrence consumes at least one character, so a point only
        // depends on later positions or, at the same position, later items.
        for pos in (0..width).rev() {
            for idx in (0..items.len()).rev() {
                let ends = table.occurrence_ends(idx, pos);
                let repeat = ends.iter().any(|&end| table.repeat(idx, end))
                    || table.enter(idx + 1, pos);
                let enter = match items[idx].quantifier {
                    Quantifier::Once => ends.iter().any(|&end| table.enter(idx + 1, end)),
                    Quantifier::OneOrMore => ends.iter().any(|&end| table.repeat(idx, end)),
                    Quantifier::ZeroOrMore => repeat,
                };
                table.repeat[idx * width + pos] = repeat;
                table.enter[idx * width + pos] = enter;
            }
        }
        table
    }

    fn width(&self) -> usize {
        self.subject.len() + 1
    }

    fn enter(&self, idx: usize, pos: usize) -> bool {
        self.enter[idx * self.width() + pos]
    }

    fn repeat(&self, idx: usize, pos: usize) -> bool {
        self.repeat[idx * self.width() + pos]
    }

    /// Follow the highest-priority successful path, recording captures.
    fn walk(&self, groups: usize) -> Option<Vec<Option<Capture>>> {
        if !self.enter(0, 0) {
            return None;
        }
        let mut captures = vec![None; groups];
        let (mut idx, mut pos, mut run_start) = (0, 0, 0);
        let mut step = Step::Enter;
        while idx < self.items.len() {
            let ends = self.occurrence_ends(idx, pos);
            match (step, self.items[idx].quantifier) {
                (Step::Enter, Quantifier::Once) => {
                    let end = ends.into_iter().find(|&end| self.enter(idx + 1, end))?;
                    self.record(&mut captures, idx, pos, pos, end);
                    idx += 1;
                    pos = end;
                }
                (Step::Enter, Quantifier::OneOrMore) => {
                    let end = ends.into_iter().find(|&end| self.repeat(idx, end))?;
                    self.record(&mut captures, idx, pos, pos, end);
                    run_start = pos;
                    pos = end;
                    step = Step::Repeat;
                }
                (Step::Enter, Quantifier::ZeroOrMore) => {
                    run_start = pos;
                    step = Step::Repeat;
                }
                (Step::Repeat, _) => {
                    // Greedy: one more iteration first, then leave the loop.
                    match ends.into_iter().find(|&end| self.repeat(idx, end)) {
                        Some(end) => {
                            self.record(&mut captures, idx, run_start, pos, end);
                            pos = end;
                        }
                        None => {
                            idx += 1;
                            step = Step::Enter;
                        }
                    }
                }
            }
        }
        Some(captures)
    }

    /// End positions of a single occurrence of item `idx` at `pos`, in
    /// priority order.
    fn occurrence_ends(&self, idx: usize, pos: usize) -> Vec<usize> {
        let rest = &self.subject[pos.min(self.subject.len())..];
        match &self.items[idx].atom {
            Atom::Literal(c) => match rest.first() {
                Some(ch) if ch == c => vec![pos + 1],
                _ => vec![],
            },
            Atom::Class(class) => match rest.first() {
                Some(ch) if class_matches(class, *ch) => vec![pos + 1],
                _ => vec![],
            },
            Atom::Group { alternatives, .. } => alternatives
                .iter()
                .filter(|alt| !alt.is_empty() && rest.starts_with(alt))
                .map(|alt| pos + alt.len())
                .collect(),
        }
    }

    fn record(
        &self,
        captures: &mut [Option<Capture>],
        idx: usize,
        run_start: usize,
        start: usize,
        end: usize,
    ) {
        if let Atom::Group { slot, .. } = self.items[idx].atom {
            captures[slot] = Some(Capture {
                run_start,
                start,
                end,
            });
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::parser::parse;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn matches(pattern: &str, subject: &str) -> bool {
        let p = parse(pattern).unwrap();
        is_full_match(p.tokens(), &chars(subject))
    }

    fn captures(pattern: &str, subject: &str) -> Vec<Option<(usize, usize, usize)>> {
        let p = parse(pattern).unwrap();
        full_match(p.tokens(), &chars(subject))
            .expect("expected a match")
            .captures
            .into_iter()
            .map(|c| c.map(|c| (c.run_start, c.start, c.end)))
            .collect()
    }

    // --- Acceptance ---

    #[test]
    fn literal_sequence() {
        assert!(matches("abc", "abc"));
        assert!(!matches("abc", "ab"));
        assert!(!matches("abc", "abcd"));
    }

    #[test]
    fn group_star() {
        assert!(matches("(ab)(cd)*", "ab"));
        assert!(matches("(ab)(cd)*", "abcdcd"));
        assert!(!matches("(ab)(cd)*", "abc"));
    }

    #[test]
    fn group_plus_requires_one() {
        assert!(!matches("(cd)+ab", "ab"));
        assert!(matches("(cd)+ab", "cdcdab"));
    }

    #[test]
    fn alternation_backtracks() {
        // First alternative consumes too much; the second must be retried.
        assert!(matches("(ab|a)b", "ab"));
        assert!(matches("(a|ab)(c|bcd)", "abcd"));
    }

    #[test]
    fn class_repeats() {
        assert!(matches("(aa|bb)[cd]*", "bbcdcd"));
        assert!(matches("(ab)+[a-f]+", "aba"));
        assert!(!matches("(aa|bb)[cd]*", "bbe"));
    }

    #[test]
    fn star_matches_empty() {
        assert!(matches("(ab)*", ""));
        assert!(matches("[a]*", ""));
        assert!(!matches("(ab)+", ""));
    }

    #[test]
    fn greedy_star_gives_back() {
        assert!(matches("(ab)*(ab)", "ababab"));
    }

    // --- Captures ---

    #[test]
    fn capture_keeps_last_iteration() {
        assert_eq!(
            captures("(ab)(cd)*", "abcdcd"),
            vec![Some((0, 0, 2)), Some((2, 4, 6))]
        );
    }

    #[test]
    fn unmatched_group_has_no_capture() {
        assert_eq!(captures("(ab)(cd)*", "ab"), vec![Some((0, 0, 2)), None]);
    }

    #[test]
    fn capture_after_literal_prefix() {
        assert_eq!(captures("x(ab)+", "xabab"), vec![Some((1, 3, 5))]);
    }

    #[test]
    fn failed_branch_does_not_leak_captures() {
        // `(ab)*` first swallows both pairs, then has to give one back.
        assert_eq!(
            captures("(ab)*(ab)", "abab"),
            vec![Some((0, 0, 2)), Some((2, 2, 4))]
        );
    }

    #[test]
    fn earlier_alternative_wins() {
        assert_eq!(
            captures("(a|ab)(c|bcd)", "abcd"),
            vec![Some((0, 0, 1)), Some((1, 1, 4))]
        );
    }

    // --- Scale ---

    #[test]
    fn long_subject_is_polynomial() {
        // Naive backtracking is exponential in the subject length here.
        let subject = "a".repeat(200) + "b";
        assert!(!matches("(a|aa)*c", &subject));
    }

    #[test]
    fn long_subject_does_not_recurse() {
        let subject = "ab".repeat(5000);
        assert!(matches("[a]*(ab)*", &subject));
        assert_eq!(
            captures("(ab)+", &subject),
            vec![Some((0, 9998, 10000))]
        );
    }
}
