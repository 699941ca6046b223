//! Move-matching strategies.
//!
//! Each strategy is a zero-sized struct inspecting a [`MatchInput`] and
//! returning an [`Outcome`]. The parser runs them in priority order; see
//! [`default_strategies`].

pub mod castling;
pub mod destination;
pub mod pattern;

pub use castling::CastlingStrategy;
pub use destination::DestinationStrategy;
pub use pattern::PatternStrategy;

use crate::confidence::MatchSource;
use crate::config::ParserConfig;
use crate::context::ParseContext;
use crate::error::ParseError;
use crate::tokens::Token;

/// Read-only view of one utterance, shared by every strategy.
pub struct MatchInput<'a> {
    /// Normalized transcript.
    pub normalized: &'a str,
    /// Normalized transcript split on whitespace.
    pub words: Vec<&'a str>,
    pub tokens: Vec<Token>,
    pub context: Option<&'a ParseContext>,
    pub config: &'a ParserConfig,
}

impl<'a> MatchInput<'a> {
    pub fn new(
        normalized: &'a str,
        context: Option<&'a ParseContext>,
        config: &'a ParserConfig,
    ) -> Self {
        Self {
            normalized,
            words: normalized.split_whitespace().collect(),
            tokens: crate::tokens::tokenize(normalized),
            context,
            config,
        }
    }
}

/// A proposed move and the path that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub san: String,
    pub source: MatchSource,
}

impl Candidate {
    pub fn new(san: impl Into<String>, source: MatchSource) -> Self {
        Self {
            san: san.into(),
            source,
        }
    }

    pub fn confidence(&self) -> f32 {
        self.source.confidence()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A move; the parser stops here.
    Matched(Candidate),
    /// A move the strategy could not confirm against the legal moves. Later
    /// strategies still run; this is surfaced only if none of them matches.
    Provisional(Candidate),
    /// The strategy recognized the utterance but refuses to guess; the parse
    /// fails with this error.
    Rejected(ParseError),
    NoMatch,
}

pub trait MoveStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn attempt(&self, input: &MatchInput) -> Outcome;
}

/// Castling, then the fixed spoken patterns, then destination lookup in the
/// legal moves.
pub fn default_strategies() -> Vec<Box<dyn MoveStrategy>> {
    vec![
        Box::new(CastlingStrategy),
        Box::new(PatternStrategy),
        Box::new(DestinationStrategy),
    ]
}

/// Entry of `legal` equal to `san` once `+`/`#` suffixes are ignored on
/// both sides. Returns the authority's spelling.
pub(crate) fn find_legal<'c>(legal: &'c [String], san: &str) -> Option<&'c str> {
    let wanted = strip_check(san);
    legal
        .iter()
        .map(String::as_str)
        .find(|candidate| strip_check(candidate) == wanted)
}

fn strip_check(san: &str) -> &str {
    san.trim().trim_end_matches(['+', '#'])
}
