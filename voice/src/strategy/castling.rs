use chess::{CastleSide, PieceKind};

use super::{find_legal, Candidate, MatchInput, MoveStrategy, Outcome};
use crate::confidence::MatchSource;
use crate::vocabulary::{CASTLE, LONG_SIDE_WORDS, SHORT_SIDE_WORDS, SIDE};

/// Fires on the literal `castle` keyword only; rook synonyms never trigger it.
///
/// A bare "castle" is read as kingside. That default is a UX choice, not a
/// chess convention, and is reported with lower confidence.
pub struct CastlingStrategy;

impl MoveStrategy for CastlingStrategy {
    fn name(&self) -> &'static str {
        "castling"
    }

    fn attempt(&self, input: &MatchInput) -> Outcome {
        if !input.words.contains(&CASTLE) {
            return Outcome::NoMatch;
        }

        let (san, source) = match spoken_side(&input.words) {
            Some(CastleSide::King) => ("O-O", MatchSource::CastleExplicitSide),
            Some(CastleSide::Queen) => ("O-O-O", MatchSource::CastleExplicitSide),
            None => ("O-O", MatchSource::CastleDefaultSide),
        };

        // Prefer the authority's spelling, which may carry a check suffix
        let san = input
            .context
            .and_then(|ctx| find_legal(&ctx.legal_moves, san))
            .unwrap_or(san);

        Outcome::Matched(Candidate::new(san, source))
    }
}

fn spoken_side(words: &[&str]) -> Option<CastleSide> {
    for (i, word) in words.iter().enumerate() {
        if SHORT_SIDE_WORDS.contains(word) {
            return Some(CastleSide::King);
        }
        if LONG_SIDE_WORDS.contains(word) {
            return Some(CastleSide::Queen);
        }
        if words.get(i + 1) == Some(&SIDE) {
            if *word == PieceKind::King.name() {
                return Some(CastleSide::King);
            }
            if *word == PieceKind::Queen.name() {
                return Some(CastleSide::Queen);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use crate::context::ParseContext;
    use crate::normalize::normalize;
    use chess::PieceColor;

    fn attempt(text: &str, context: Option<&ParseContext>) -> Outcome {
        let config = ParserConfig::default();
        let normalized = normalize(text);
        let input = MatchInput::new(&normalized, context, &config);
        CastlingStrategy.attempt(&input)
    }

    fn matched(text: &str) -> (String, f32) {
        match attempt(text, None) {
            Outcome::Matched(c) => (c.san.clone(), c.confidence()),
            other => panic!("expected a match for {:?}, got {:?}", text, other),
        }
    }

    #[test]
    fn explicit_sides() {
        assert_eq!(matched("castle short"), ("O-O".to_string(), 0.95));
        assert_eq!(matched("castles kingside"), ("O-O".to_string(), 0.95));
        assert_eq!(matched("castle king side"), ("O-O".to_string(), 0.95));
        assert_eq!(matched("long castle"), ("O-O-O".to_string(), 0.95));
        assert_eq!(matched("castle queen side"), ("O-O-O".to_string(), 0.95));
        assert_eq!(matched("castling queenside"), ("O-O-O".to_string(), 0.95));
    }

    #[test]
    fn bare_castle_defaults_kingside() {
        assert_eq!(matched("castle"), ("O-O".to_string(), 0.80));
    }

    #[test]
    fn rook_words_do_not_castle() {
        assert_eq!(attempt("tower to e1", None), Outcome::NoMatch);
        assert_eq!(attempt("rook short", None), Outcome::NoMatch);
    }

    #[test]
    fn uses_authority_spelling() {
        let ctx = ParseContext::new(
            "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
            vec!["O-O+".to_string(), "O-O-O".to_string()],
            PieceColor::White,
        );
        match attempt("castle short", Some(&ctx)) {
            Outcome::Matched(c) => assert_eq!(c.san, "O-O+"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
