//! Lexing of normalized transcripts into chess tokens.

use chess::san::{is_file, is_rank};
use chess::{Coord, PieceKind};

use crate::vocabulary::{self, CAPTURE_X, CASTLE, CHECK, CHECKMATE, TAKES};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Full piece name, e.g. `knight`.
    Piece(PieceKind),
    /// One-letter piece abbreviation other than `b` (`n`, `r`, `q`, `k`).
    Abbreviation(PieceKind),
    /// Destination-style square, spoken either as `f3` or `f 3`.
    Square(Coord),
    /// A file letter not followed by a rank.
    File(char),
    /// A lone rank digit. `2` doubles as the "to" connector.
    Rank(char),
    Takes,
    X,
    Check,
    Checkmate,
    Castle,
    Word(String),
}

impl Token {
    pub fn is_connector(&self) -> bool {
        matches!(self, Token::Rank('2'))
    }
}

/// Lex a normalized transcript. A file letter immediately followed by a lone
/// rank digit is merged into a single square.
pub fn tokenize(normalized: &str) -> Vec<Token> {
    let words: Vec<&str> = normalized.split_whitespace().collect();
    let mut tokens = Vec::with_capacity(words.len());
    let mut i = 0;

    while i < words.len() {
        let word = words[i];

        if let Some(file) = single_char(word).filter(|c| is_file(*c)) {
            if let Some(rank) = words
                .get(i + 1)
                .and_then(|next| single_char(next))
                .filter(|c| is_rank(*c))
            {
                if let Some(square) = Coord::new(file, rank) {
                    tokens.push(Token::Square(square));
                    i += 2;
                    continue;
                }
            }
        }

        tokens.push(lex_word(word));
        i += 1;
    }

    tokens
}

fn lex_word(word: &str) -> Token {
    if let Some(piece) = vocabulary::piece_named(word) {
        return Token::Piece(piece);
    }
    if let Some(square) = Coord::parse(word) {
        return Token::Square(square);
    }

    match word {
        TAKES => return Token::Takes,
        CAPTURE_X => return Token::X,
        CHECK => return Token::Check,
        CHECKMATE => return Token::Checkmate,
        CASTLE => return Token::Castle,
        _ => {}
    }

    match single_char(word) {
        Some(c) if is_file(c) => Token::File(c),
        Some(c) if is_rank(c) => Token::Rank(c),
        Some(_) => match vocabulary::piece_abbreviation(word) {
            Some(piece) => Token::Abbreviation(piece),
            None => Token::Word(word.to_string()),
        },
        None => Token::Word(word.to_string()),
    }
}

fn single_char(word: &str) -> Option<char> {
    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Token {
        Token::Square(Coord::parse(s).unwrap())
    }

    #[test]
    fn test_split_square_is_merged() {
        assert_eq!(
            tokenize("knight 2 f 3"),
            vec![Token::Piece(PieceKind::Knight), Token::Rank('2'), sq("f3")]
        );
    }

    #[test]
    fn test_compact_square() {
        assert_eq!(
            tokenize("queen takes e5 check"),
            vec![
                Token::Piece(PieceKind::Queen),
                Token::Takes,
                sq("e5"),
                Token::Check
            ]
        );
    }

    #[test]
    fn test_lone_file_and_abbreviation() {
        assert_eq!(
            tokenize("e takes d5"),
            vec![Token::File('e'), Token::Takes, sq("d5")]
        );
        assert_eq!(
            tokenize("n x f3"),
            vec![Token::Abbreviation(PieceKind::Knight), Token::X, sq("f3")]
        );
        // b is always lexed as a file
        assert_eq!(tokenize("b c4"), vec![Token::File('b'), sq("c4")]);
    }

    #[test]
    fn test_connector_detection() {
        assert!(Token::Rank('2').is_connector());
        assert!(!Token::Rank('3').is_connector());
        assert!(!Token::Takes.is_connector());
    }

    #[test]
    fn test_unknown_words() {
        assert_eq!(
            tokenize("gibberish nonsense"),
            vec![
                Token::Word("gibberish".into()),
                Token::Word("nonsense".into())
            ]
        );
        assert!(tokenize("").is_empty());
    }
}
