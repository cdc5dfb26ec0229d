/// Which end of the pattern candidate erasing strings are ranked from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuantifierType {
    /// Grow the compared pattern from the front; prefer the smallest match
    /// level and the most repeats.
    #[default]
    Greedy,
    /// Shrink the compared pattern from the back; prefer the largest match
    /// level and the fewest repeats.
    Lazy,
}

/// How many overlapping positions of a chosen erasing string are explored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionSearch {
    /// Backtrack through every position.
    #[default]
    All,
    /// Give up on an erasing string after its first position fails. Faster,
    /// but may reject inputs that some other position would accept.
    First,
}

/// Search settings for one erasing-system run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunConfig {
    pub quantifier: QuantifierType,
    pub positions: PositionSearch,
    /// Log every erasing step at `INFO` instead of `TRACE`.
    pub verbose: bool,
}

impl RunConfig {
    pub fn lazy(self) -> Self {
        Self {
            quantifier: QuantifierType::Lazy,
            ..self
        }
    }

    pub fn first_position_only(self) -> Self {
        Self {
            positions: PositionSearch::First,
            ..self
        }
    }

    pub fn verbose(self, verbose: bool) -> Self {
        Self { verbose, ..self }
    }
}
