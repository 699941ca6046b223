//! Transcript → move.

use crate::config::ParserConfig;
use crate::context::{ChessMoveResult, ParseContext};
use crate::error::ParseError;
use crate::normalize::normalize;
use crate::strategy::{default_strategies, Candidate, MatchInput, MoveStrategy, Outcome};

/// Runs the matching strategies in priority order over a transcript.
///
/// Holds no per-game state: every call is a pure function of the transcript,
/// the optional [`ParseContext`], and the configuration.
pub struct MoveParser {
    config: ParserConfig,
    strategies: Vec<Box<dyn MoveStrategy>>,
}

impl MoveParser {
    pub fn new(config: ParserConfig) -> Self {
        Self::with_strategies(config, default_strategies())
    }

    /// Use a custom strategy list, tried in the given order.
    pub fn with_strategies(config: ParserConfig, strategies: Vec<Box<dyn MoveStrategy>>) -> Self {
        Self { config, strategies }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Normalize a raw transcript and interpret it as a move.
    pub fn parse(&self, transcript: &str, context: Option<&ParseContext>) -> ChessMoveResult {
        let normalized = normalize(transcript);
        let mut result = self.generate(&normalized, context);
        result.original_text = transcript.to_string();
        result
    }

    /// Interpret an already normalized transcript.
    pub fn generate(&self, normalized: &str, context: Option<&ParseContext>) -> ChessMoveResult {
        match self.search(normalized, context) {
            Ok(candidate) => {
                let confidence = candidate.confidence();
                ChessMoveResult::success(candidate.san, confidence, normalized)
            }
            Err(err) => ChessMoveResult::failure(&err, normalized),
        }
    }

    /// Like [`MoveParser::parse`], but keeps the winning candidate and the
    /// typed error, e.g. to read back the moves of an ambiguous utterance.
    pub fn interpret(
        &self,
        transcript: &str,
        context: Option<&ParseContext>,
    ) -> Result<Candidate, ParseError> {
        self.search(&normalize(transcript), context)
    }

    /// The first strategy to match wins. A provisional candidate is held back
    /// until every later strategy has had its turn, and is dropped if a later
    /// strategy rejects the utterance.
    fn search(
        &self,
        normalized: &str,
        context: Option<&ParseContext>,
    ) -> Result<Candidate, ParseError> {
        let input = MatchInput::new(normalized, context, &self.config);
        let mut fallback: Option<Candidate> = None;

        for strategy in &self.strategies {
            match strategy.attempt(&input) {
                Outcome::Matched(candidate) => {
                    tracing::debug!(
                        strategy = strategy.name(),
                        san = %candidate.san,
                        source = ?candidate.source,
                        "matched"
                    );
                    return Ok(candidate);
                }
                Outcome::Provisional(candidate) => {
                    tracing::debug!(strategy = strategy.name(), san = %candidate.san, "provisional");
                    fallback.get_or_insert(candidate);
                }
                Outcome::Rejected(err) => {
                    tracing::debug!(strategy = strategy.name(), error = %err, "rejected");
                    return Err(err);
                }
                Outcome::NoMatch => {}
            }
        }

        fallback.ok_or_else(|| {
            tracing::debug!(normalized, "no strategy matched");
            ParseError::Unparseable
        })
    }
}

impl Default for MoveParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

/// Parse a transcript with the default configuration.
pub fn parse_move(transcript: &str, context: Option<&ParseContext>) -> ChessMoveResult {
    MoveParser::default().parse(transcript, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confidence::MatchSource;
    use chess::PieceColor;

    fn ctx(legal: &[&str]) -> ParseContext {
        ParseContext::new(
            chess::STARTING_FEN,
            legal.iter().map(|m| m.to_string()).collect(),
            PieceColor::White,
        )
    }

    struct AlwaysStrategy(&'static str);

    impl MoveStrategy for AlwaysStrategy {
        fn name(&self) -> &'static str {
            "always"
        }

        fn attempt(&self, _input: &MatchInput) -> Outcome {
            Outcome::Matched(Candidate::new(self.0, MatchSource::PatternUnvalidated))
        }
    }

    #[test]
    fn test_original_text_is_kept() {
        let result = parse_move("Knight to F3!", None);
        assert_eq!(result.original_text, "Knight to F3!");
        assert_eq!(result.san.as_deref(), Some("Nf3"));
    }

    #[test]
    fn test_provisional_yields_to_destination_match() {
        let result = parse_move("queen takes e5", Some(&ctx(&["Qxe5", "Nxe5", "d4"])));
        assert_eq!(result.san.as_deref(), Some("Qxe5"));
        assert_eq!(result.confidence, 0.85);
    }

    #[test]
    fn test_provisional_surfaces_when_nothing_else_matches() {
        let result = parse_move("knight to f3", Some(&ctx(&["e4", "d4"])));
        assert_eq!(result.san.as_deref(), Some("Nf3"));
        assert_eq!(result.confidence, 0.70);
        assert_eq!(result.error, None);
    }

    #[test]
    fn test_ambiguity_is_reported() {
        let result = parse_move("d5", Some(&ctx(&["exd5", "Nxd5"])));
        assert_eq!(result.san, None);
        assert_eq!(result.confidence, 0.0);
        let error = result.error.unwrap();
        assert!(error.contains("Ambiguous"), "{}", error);
        assert!(error.contains("exd5, Nxd5"), "{}", error);
    }

    #[test]
    fn test_interpret_keeps_typed_error() {
        let parser = MoveParser::default();
        match parser.interpret("d5", Some(&ctx(&["exd5", "Nxd5"]))) {
            Err(ParseError::Ambiguous { candidates, .. }) => {
                assert_eq!(candidates, vec!["exd5", "Nxd5"]);
            }
            other => panic!("unexpected {:?}", other),
        }
        let candidate = parser.interpret("castle", None).unwrap();
        assert_eq!(candidate.san, "O-O");
        assert_eq!(candidate.source, MatchSource::CastleDefaultSide);
    }

    #[test]
    fn test_custom_strategy_order() {
        let parser = MoveParser::with_strategies(
            ParserConfig::default(),
            vec![Box::new(AlwaysStrategy("e4")), Box::new(AlwaysStrategy("d4"))],
        );
        assert_eq!(parser.parse("anything", None).san.as_deref(), Some("e4"));
    }

    #[test]
    fn test_empty_strategy_list_fails_cleanly() {
        let parser = MoveParser::with_strategies(ParserConfig::default(), Vec::new());
        let result = parser.parse("knight to f3", None);
        assert_eq!(result.san, None);
        assert_eq!(result.error.as_deref(), Some("Could not parse chess move"));
    }
}
