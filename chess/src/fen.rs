use cozy_chess::Board;

use crate::types::PieceColor;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parse a FEN string into a Board
pub fn parse_fen(fen: &str) -> Result<Board, FenError> {
    if fen.split_whitespace().next().is_none() {
        return Err(FenError::InvalidFormat);
    }

    fen.trim().parse().map_err(|_| FenError::InvalidFormat)
}

/// Format a Board as a FEN string
pub fn format_fen(board: &Board) -> String {
    board.to_string()
}

/// Side to move according to the FEN's active-color field.
pub fn side_to_move(fen: &str) -> Result<PieceColor, FenError> {
    match fen.split_whitespace().nth(1) {
        Some("w") => Ok(PieceColor::White),
        Some("b") => Ok(PieceColor::Black),
        Some(other) => Err(FenError::InvalidActiveColor(other.to_string())),
        None => Err(FenError::InvalidFormat),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FenError {
    #[error("Invalid FEN format")]
    InvalidFormat,
    #[error("Invalid active color: {0}")]
    InvalidActiveColor(String),
}
