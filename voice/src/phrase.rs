//! Move and game-state announcements for speech synthesis.
//!
//! Every function here is total: a malformed SAN still produces a partial
//! phrase, since a spoken channel has no way to report a formatting error.

use chess::{CastleSide, CheckMark, Coord, Disambiguation, PieceColor, PieceKind, SanMove};

/// "Knight to f-3 confirmed", "Short castle confirmed", ...
pub fn format_move_confirmation(san: &str) -> String {
    format!("{} confirmed", describe_move(san))
}

pub fn format_check() -> String {
    "Check!".to_string()
}

pub fn format_checkmate(winner: PieceColor) -> String {
    format!("Checkmate! {} wins", winner.title())
}

pub fn format_stalemate() -> String {
    "Stalemate. The game is a draw".to_string()
}

pub fn format_draw() -> String {
    "The game is a draw".to_string()
}

pub fn format_error(message: &str) -> String {
    let message = message.trim();
    if message.is_empty() {
        "Error".to_string()
    } else {
        format!("Error: {}", message)
    }
}

pub fn format_illegal_move() -> String {
    "That move is not legal. Please try again".to_string()
}

/// "Opponent played knight to f-3"
pub fn format_opponent_move(san: &str) -> String {
    format!("Opponent played {}", lowercase_first(&describe_move(san)))
}

/// "Ambiguous move. Did you mean knight on b-file to d-2 or knight on f-file to d-2?"
pub fn format_ambiguous(candidates: &[String]) -> String {
    let described: Vec<String> = candidates
        .iter()
        .map(|san| lowercase_first(&describe_move(san)))
        .collect();

    match described.as_slice() {
        [] => "Ambiguous move. Please say which piece".to_string(),
        [only] => format!("Ambiguous move. Did you mean {}?", only),
        [init @ .., last] => format!("Ambiguous move. Did you mean {} or {}?", init.join(", "), last),
    }
}

/// "Did you say queen takes e-5?"
pub fn format_confirmation_request(san: &str) -> String {
    format!("Did you say {}?", lowercase_first(&describe_move(san)))
}

pub fn format_repeat_request() -> String {
    "Sorry, I didn't catch that. Please repeat your move".to_string()
}

/// The move phrase without the trailing "confirmed".
pub fn describe_move(san: &str) -> String {
    match SanMove::parse(san) {
        Ok(mv) => describe_parsed(&mv),
        Err(_) => describe_partial(san),
    }
}

fn describe_parsed(mv: &SanMove) -> String {
    let mut phrase = match mv {
        SanMove::Castle { side, .. } => match side {
            CastleSide::King => "Short castle".to_string(),
            CastleSide::Queen => "Long castle".to_string(),
        },
        SanMove::Normal {
            piece,
            from,
            capture,
            to,
            promotion,
            ..
        } => {
            let mut phrase = piece.title().to_string();
            match from {
                Some(Disambiguation::File(f)) => phrase.push_str(&format!(" on {}-file", f)),
                Some(Disambiguation::Rank(r)) => phrase.push_str(&format!(" on rank {}", r)),
                Some(Disambiguation::Square(sq)) => {
                    phrase.push_str(&format!(" on {}", spoken_square(*sq)))
                }
                None => {}
            }
            phrase.push_str(if *capture { " takes " } else { " to " });
            phrase.push_str(&spoken_square(*to));
            if let Some(promo) = promotion {
                phrase.push_str(&format!(", promotes to {}", promo.name()));
            }
            phrase
        }
    };

    push_check(&mut phrase, mv.check());
    phrase
}

/// Best effort for text that is not valid SAN: keep whatever piece letter,
/// capture marker, square and suffix can be recognized.
fn describe_partial(san: &str) -> String {
    let text = san.trim();
    let chars: Vec<char> = text.chars().collect();

    let piece = chars.first().copied().and_then(PieceKind::from_san_letter);
    let square = chars
        .windows(2)
        .rev()
        .find_map(|pair| Coord::new(pair[0], pair[1]));

    let mut phrase = match (piece, square) {
        (Some(piece), _) => piece.title().to_string(),
        (None, Some(_)) => PieceKind::Pawn.title().to_string(),
        (None, None) => "Move".to_string(),
    };

    if let Some(square) = square {
        phrase.push_str(if chars.contains(&'x') { " takes " } else { " to " });
        phrase.push_str(&spoken_square(square));
    }

    let check = if text.ends_with('#') {
        Some(CheckMark::Checkmate)
    } else if text.ends_with('+') {
        Some(CheckMark::Check)
    } else {
        None
    };
    push_check(&mut phrase, check);
    phrase
}

fn push_check(phrase: &mut String, check: Option<CheckMark>) {
    match check {
        Some(CheckMark::Check) => phrase.push_str(", check"),
        Some(CheckMark::Checkmate) => phrase.push_str(", checkmate"),
        None => {}
    }
}

fn spoken_square(square: Coord) -> String {
    format!("{}-{}", square.file(), square.rank())
}

fn lowercase_first(phrase: &str) -> String {
    let mut chars = phrase.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_confirmations() {
        assert_eq!(format_move_confirmation("Nf3"), "Knight to f-3 confirmed");
        assert_eq!(format_move_confirmation("O-O"), "Short castle confirmed");
        assert_eq!(format_move_confirmation("O-O-O"), "Long castle confirmed");
        assert_eq!(
            format_move_confirmation("Qh7#"),
            "Queen to h-7, checkmate confirmed"
        );
        assert_eq!(
            format_move_confirmation("e8=Q"),
            "Pawn to e-8, promotes to queen confirmed"
        );
    }

    #[test]
    fn test_captures_and_disambiguation() {
        assert_eq!(
            format_move_confirmation("exd5"),
            "Pawn on e-file takes d-5 confirmed"
        );
        assert_eq!(
            format_move_confirmation("Nbd7"),
            "Knight on b-file to d-7 confirmed"
        );
        assert_eq!(
            format_move_confirmation("R1xa3+"),
            "Rook on rank 1 takes a-3, check confirmed"
        );
        assert_eq!(
            format_move_confirmation("Qh4xe1"),
            "Queen on h-4 takes e-1 confirmed"
        );
        assert_eq!(
            format_move_confirmation("fxg8=N+"),
            "Pawn on f-file takes g-8, promotes to knight, check confirmed"
        );
        assert_eq!(
            format_move_confirmation("O-O+"),
            "Short castle, check confirmed"
        );
    }

    #[test]
    fn test_malformed_san_degrades() {
        assert_eq!(format_move_confirmation(""), "Move confirmed");
        assert_eq!(format_move_confirmation("Qz9"), "Queen confirmed");
        assert_eq!(format_move_confirmation("Kxe9e4+"), "King takes e-4, check confirmed");
        assert_eq!(format_move_confirmation("??"), "Move confirmed");
    }

    #[test]
    fn test_fixed_templates() {
        assert_eq!(format_check(), "Check!");
        assert_eq!(format_checkmate(PieceColor::White), "Checkmate! White wins");
        assert_eq!(format_stalemate(), "Stalemate. The game is a draw");
        assert_eq!(
            format_error("Could not parse chess move"),
            "Error: Could not parse chess move"
        );
        assert_eq!(format_error("  "), "Error");
        assert_eq!(format_illegal_move(), "That move is not legal. Please try again");
    }

    #[test]
    fn test_conversational_phrases() {
        assert_eq!(format_opponent_move("Nf3"), "Opponent played knight to f-3");
        assert_eq!(
            format_confirmation_request("Qxe5"),
            "Did you say queen takes e-5?"
        );
        assert_eq!(
            format_ambiguous(&["Nbd2".to_string(), "Nfd2".to_string()]),
            "Ambiguous move. Did you mean knight on b-file to d-2 or knight on f-file to d-2?"
        );
        assert_eq!(
            format_ambiguous(&["exd5".to_string(), "Nxd5".to_string(), "Qxd5".to_string()]),
            "Ambiguous move. Did you mean pawn on e-file takes d-5, knight takes d-5 or queen takes d-5?"
        );
    }

    proptest! {
        #[test]
        fn confirmation_is_total(san in ".*") {
            let phrase = format_move_confirmation(&san);
            prop_assert!(phrase.ends_with(" confirmed"));
        }
    }
}
