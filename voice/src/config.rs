//! Parser tunables.

use std::str::FromStr;

/// What to do when a spoken piece name still leaves several legal moves to
/// the same square (e.g. two rooks, or under-promoted pieces).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// First match in the authority's `legal_moves` order. Results depend on
    /// that order.
    #[default]
    FirstListed,
    /// Lexicographically smallest SAN, independent of list order.
    Canonical,
    /// Report the move as ambiguous.
    Reject,
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" | "first-listed" => Ok(Self::FirstListed),
            "canonical" | "lexicographic" => Ok(Self::Canonical),
            "reject" | "ambiguous" => Ok(Self::Reject),
            other => Err(format!("unknown tie-break policy: {}", other)),
        }
    }
}

/// Default confidence above which a move needs no spoken confirmation.
pub const DEFAULT_AUTO_CONFIRM_ABOVE: f32 = 0.85;

/// Default confidence below which the user is asked to repeat.
pub const DEFAULT_REPEAT_BELOW: f32 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct ParserConfig {
    pub tie_break: TieBreak,
    pub auto_confirm_above: f32,
    pub repeat_below: f32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::default(),
            auto_confirm_above: DEFAULT_AUTO_CONFIRM_ABOVE,
            repeat_below: DEFAULT_REPEAT_BELOW,
        }
    }
}
