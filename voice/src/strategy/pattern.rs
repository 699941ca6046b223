use chess::{Coord, PieceKind};

use super::{find_legal, Candidate, MatchInput, MoveStrategy, Outcome};
use crate::confidence::MatchSource;
use crate::tokens::Token;

/// Fixed spoken shapes, each spanning the whole utterance:
///
/// - piece name, `2`/`takes`, square: "knight to f3"
/// - pawn move: "e4", or "e takes d5"
/// - piece letter, optional `takes`/`x`, square: "n f3", "q x h7"
///
/// Any shape may end in "check" or "checkmate".
pub struct PatternStrategy;

impl MoveStrategy for PatternStrategy {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn attempt(&self, input: &MatchInput) -> Outcome {
        let Some(san) = assemble(&input.tokens) else {
            return Outcome::NoMatch;
        };

        let Some(ctx) = input.context else {
            return Outcome::Matched(Candidate::new(san, MatchSource::PatternUnvalidated));
        };

        match find_legal(&ctx.legal_moves, &san) {
            Some(legal) => Outcome::Matched(Candidate::new(legal, MatchSource::PatternValidated)),
            None => {
                tracing::debug!(san = %san, "spoken pattern is not among the legal moves");
                Outcome::Provisional(Candidate::new(san, MatchSource::PatternUnvalidated))
            }
        }
    }
}

/// Build a SAN string from a token stream matching one of the shapes.
fn assemble(tokens: &[Token]) -> Option<String> {
    let (body, mark) = split_check(tokens);

    let san = match body {
        [Token::Piece(piece), connector, Token::Square(to)]
            if connector.is_connector() || *connector == Token::Takes =>
        {
            piece_move(*piece, *to)
        }
        [Token::Square(to)] => to.to_string(),
        [Token::File(from), Token::Takes, Token::Square(to)] => format!("{}x{}", from, to),
        [head, Token::Square(to)] | [head, Token::Takes | Token::X, Token::Square(to)] => {
            piece_move(abbreviated_piece(head)?, *to)
        }
        _ => return None,
    };

    Some(format!("{}{}", san, mark))
}

fn piece_move(piece: PieceKind, to: Coord) -> String {
    match piece.san_letter() {
        Some(letter) => format!("{}{}", letter, to),
        None => to.to_string(),
    }
}

/// One-letter abbreviations; a lone `b` lexes as a file but reads as bishop
/// in this position.
fn abbreviated_piece(token: &Token) -> Option<PieceKind> {
    match token {
        Token::Abbreviation(piece) => Some(*piece),
        Token::File('b') => Some(PieceKind::Bishop),
        _ => None,
    }
}

fn split_check(tokens: &[Token]) -> (&[Token], &'static str) {
    match tokens {
        [rest @ .., Token::Check, Token::Checkmate] => (rest, "#"),
        [rest @ .., Token::Checkmate] => (rest, "#"),
        [rest @ .., Token::Check] => (rest, "+"),
        _ => (tokens, ""),
    }
}
