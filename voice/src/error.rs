use chess::Coord;

/// Why a transcript produced no move.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("Could not parse chess move")]
    Unparseable,
    #[error("Ambiguous move to {square}: {}", .candidates.join(", "))]
    Ambiguous {
        square: Coord,
        candidates: Vec<String>,
    },
    #[error("No legal {piece} move to {square}")]
    NoMatchingPiece { piece: &'static str, square: Coord },
}
