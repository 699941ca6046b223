use chess::{target_square, Coord, PieceKind, SanMove};

use super::{Candidate, MatchInput, MoveStrategy, Outcome};
use crate::confidence::MatchSource;
use crate::config::TieBreak;
use crate::error::ParseError;
use crate::tokens::Token;

/// Resolves a spoken destination square against the legal moves.
///
/// The destination alone is preferred when it picks out one move, since
/// speakers often leave the piece out. Otherwise only explicitly spoken piece
/// names narrow the choice; nothing positional or probabilistic is consulted.
///
/// A piece name before the square names the mover. One after the square
/// names the promotion piece when the square is reached by promotions, and
/// the mover otherwise ("d5 with the knight").
pub struct DestinationStrategy;

impl MoveStrategy for DestinationStrategy {
    fn name(&self) -> &'static str {
        "destination"
    }

    fn attempt(&self, input: &MatchInput) -> Outcome {
        let Some(ctx) = input.context else {
            return Outcome::NoMatch;
        };
        let Some((at, square)) = spoken_destination(&input.tokens) else {
            return Outcome::NoMatch;
        };

        let candidates: Vec<&str> = ctx
            .legal_moves
            .iter()
            .map(String::as_str)
            .filter(|san| target_square(san) == Some(square))
            .collect();

        tracing::debug!(
            square = %square,
            candidates = candidates.len(),
            "legal moves to spoken square"
        );

        let before = first_piece(&input.tokens[..at]);
        let after = first_piece(&input.tokens[at + 1..]);
        let (mover, promotion) = if candidates.iter().any(|san| promotion_of(san).is_some()) {
            (before, after)
        } else {
            (before.or(after), None)
        };

        let Some(promotion) = promotion else {
            return match candidates.as_slice() {
                [] => Outcome::NoMatch,
                [san] => Outcome::Matched(Candidate::new(*san, MatchSource::UniqueDestination)),
                _ => disambiguate(input, mover, square, &candidates),
            };
        };

        let promoted: Vec<&str> = candidates
            .into_iter()
            .filter(|san| promotion_of(san) == Some(promotion))
            .collect();

        match promoted.as_slice() {
            [] => Outcome::Rejected(ParseError::NoMatchingPiece {
                piece: promotion.name(),
                square,
            }),
            [san] => Outcome::Matched(Candidate::new(*san, MatchSource::PieceDisambiguated)),
            _ => disambiguate(input, mover, square, &promoted),
        }
    }
}

fn disambiguate(
    input: &MatchInput,
    mover: Option<PieceKind>,
    square: Coord,
    candidates: &[&str],
) -> Outcome {
    let Some(piece) = mover else {
        return Outcome::Rejected(ParseError::Ambiguous {
            square,
            candidates: candidates.iter().map(|s| s.to_string()).collect(),
        });
    };

    let matching: Vec<&str> = candidates
        .iter()
        .copied()
        .filter(|san| piece_of(san) == Some(piece))
        .collect();

    let chosen = match (matching.as_slice(), input.config.tie_break) {
        ([], _) => {
            return Outcome::Rejected(ParseError::NoMatchingPiece {
                piece: piece.name(),
                square,
            })
        }
        ([only], _) => *only,
        ([first, ..], TieBreak::FirstListed) => *first,
        (several, TieBreak::Canonical) => several.iter().copied().min().unwrap_or_default(),
        (several, TieBreak::Reject) => {
            return Outcome::Rejected(ParseError::Ambiguous {
                square,
                candidates: several.iter().map(|s| s.to_string()).collect(),
            })
        }
    };

    if matching.len() > 1 {
        tracing::debug!(
            chosen = chosen,
            tie_break = ?input.config.tie_break,
            "piece name matched several legal moves"
        );
    }

    Outcome::Matched(Candidate::new(chosen, MatchSource::PieceDisambiguated))
}

/// Position and value of the last square spoken; in "knight g1 to f3" the
/// destination comes last.
fn spoken_destination(tokens: &[Token]) -> Option<(usize, Coord)> {
    tokens
        .iter()
        .enumerate()
        .rev()
        .find_map(|(at, token)| match token {
            Token::Square(square) => Some((at, *square)),
            _ => None,
        })
}

/// First full piece name among `tokens`.
fn first_piece(tokens: &[Token]) -> Option<PieceKind> {
    tokens.iter().find_map(|token| match token {
        Token::Piece(piece) => Some(*piece),
        _ => None,
    })
}

fn piece_of(san: &str) -> Option<PieceKind> {
    SanMove::parse(san).ok().map(|mv| mv.piece())
}

fn promotion_of(san: &str) -> Option<PieceKind> {
    SanMove::parse(san).ok().and_then(|mv| mv.promotion())
}
