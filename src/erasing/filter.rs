//! Ranking of applicable erasing strings.

use super::config::QuantifierType;
use crate::pattern::Levels;

/// An erasing string that may be applied in the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub erasing_string: &'a str,
    pub levels: Levels,
}

/// Index of the candidate to try next, or `None` when there are none.
///
/// The match level is committed first (smallest for greedy, largest for
/// lazy), then quantifier levels narrow the field. Ties go to the earliest
/// candidate.
pub fn select(candidates: &[Candidate<'_>], quantifier: QuantifierType) -> Option<usize> {
    let match_levels = candidates.iter().map(|c| c.levels.match_level);
    let chosen_level = match quantifier {
        QuantifierType::Greedy => match_levels.min()?,
        QuantifierType::Lazy => match_levels.max()?,
    };
    let kept = filter_quantifier_levels(candidates, chosen_level, quantifier);
    candidates.iter().position(|c| {
        c.levels.match_level == chosen_level
            && kept.contains(&c.levels.quantifier_levels.as_slice())
    })
}

/// Narrow the quantifier-level vectors of the candidates at `chosen_level`.
///
/// Index by index (below `chosen_level`, while more than one vector is
/// left), keep vectors holding the maximum (greedy) or minimum (lazy) value
/// at that index. Vectors too short to have the index are kept.
pub fn filter_quantifier_levels<'c>(
    candidates: &'c [Candidate<'_>],
    chosen_level: usize,
    quantifier: QuantifierType,
) -> Vec<&'c [usize]> {
    let mut kept: Vec<&[usize]> = candidates
        .iter()
        .filter(|c| c.levels.match_level == chosen_level)
        .map(|c| c.levels.quantifier_levels.as_slice())
        .collect();

    let mut i = 0;
    while i < chosen_level && kept.len() > 1 {
        let values = kept.iter().filter_map(|levels| levels.get(i).copied());
        let target = match quantifier {
            QuantifierType::Greedy => values.max(),
            QuantifierType::Lazy => values.min(),
        };
        if let Some(target) = target {
            kept.retain(|levels| levels.get(i).is_none_or(|&v| v == target));
        }
        i += 1;
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate<'a>(
        erasing_string: &'a str,
        match_level: usize,
        quantifier_levels: &[usize],
    ) -> Candidate<'a> {
        Candidate {
            erasing_string,
            levels: Levels {
                match_level,
                quantifier_levels: quantifier_levels.to_vec(),
            },
        }
    }

    #[test]
    fn greedy_prefers_lowest_match_level() {
        let candidates = [
            candidate("cd", 2, &[1, 1]),
            candidate("ab", 1, &[3]),
        ];
        assert_eq!(select(&candidates, QuantifierType::Greedy), Some(1));
    }

    #[test]
    fn lazy_prefers_highest_match_level() {
        let candidates = [
            candidate("cd", 2, &[1, 1]),
            candidate("ab", 1, &[3]),
        ];
        assert_eq!(select(&candidates, QuantifierType::Lazy), Some(0));
    }

    #[test]
    fn greedy_keeps_most_repeats() {
        let candidates = [
            candidate("a", 2, &[1, 1]),
            candidate("b", 2, &[2, 1]),
            candidate("c", 2, &[2, 0]),
        ];
        assert_eq!(
            filter_quantifier_levels(&candidates, 2, QuantifierType::Greedy),
            vec![&[2usize, 1][..]]
        );
        assert_eq!(select(&candidates, QuantifierType::Greedy), Some(1));
    }

    #[test]
    fn lazy_keeps_fewest_repeats() {
        let candidates = [
            candidate("a", 2, &[1, 1]),
            candidate("b", 2, &[2, 1]),
            candidate("c", 2, &[1, 0]),
        ];
        assert_eq!(
            filter_quantifier_levels(&candidates, 2, QuantifierType::Lazy),
            vec![&[1usize, 0][..]]
        );
        assert_eq!(select(&candidates, QuantifierType::Lazy), Some(2));
    }

    #[test]
    fn short_vectors_survive() {
        let candidates = [candidate("a", 2, &[1]), candidate("b", 2, &[1, 4])];
        assert_eq!(
            filter_quantifier_levels(&candidates, 2, QuantifierType::Lazy),
            vec![&[1usize][..], &[1usize, 4][..]]
        );
    }

    #[test]
    fn indices_beyond_match_level_are_ignored() {
        let candidates = [candidate("a", 1, &[1, 1]), candidate("b", 1, &[1, 2])];
        assert_eq!(
            filter_quantifier_levels(&candidates, 1, QuantifierType::Greedy).len(),
            2
        );
        assert_eq!(select(&candidates, QuantifierType::Greedy), Some(0));
    }

    #[test]
    fn no_candidates() {
        assert_eq!(select(&[], QuantifierType::Greedy), None);
    }
}
