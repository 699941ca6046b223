//! Inputs and outputs of a parse call.

use chess::{Game, PieceColor};
use serde::{Deserialize, Serialize};

use crate::confidence::NO_MATCH;
use crate::error::ParseError;

/// Snapshot of the game supplied by the rules authority before each parse.
///
/// `legal_moves` must be the complete legal move set for the side to move, in
/// the authority's own order. The parser only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseContext {
    #[serde(rename = "currentFEN", alias = "currentFen")]
    pub current_fen: String,
    pub legal_moves: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_move: Option<String>,
    pub player_color: PieceColor,
}

impl ParseContext {
    pub fn new(
        current_fen: impl Into<String>,
        legal_moves: Vec<String>,
        player_color: PieceColor,
    ) -> Self {
        Self {
            current_fen: current_fen.into(),
            legal_moves,
            last_move: None,
            player_color,
        }
    }

    pub fn with_last_move(mut self, san: impl Into<String>) -> Self {
        self.last_move = Some(san.into());
        self
    }
}

impl From<&Game> for ParseContext {
    fn from(game: &Game) -> Self {
        Self {
            current_fen: game.to_fen(),
            legal_moves: game.legal_sans(),
            last_move: game.last_move().map(str::to_string),
            player_color: game.side_to_move(),
        }
    }
}

/// Outcome of interpreting one transcript.
///
/// `san == None` always comes with `confidence == 0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChessMoveResult {
    pub san: Option<String>,
    pub confidence: f32,
    pub original_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChessMoveResult {
    pub fn success(san: impl Into<String>, confidence: f32, original_text: impl Into<String>) -> Self {
        Self {
            san: Some(san.into()),
            confidence: confidence.clamp(0.0, 1.0),
            original_text: original_text.into(),
            error: None,
        }
    }

    pub fn failure(error: &ParseError, original_text: impl Into<String>) -> Self {
        Self {
            san: None,
            confidence: NO_MATCH,
            original_text: original_text.into(),
            error: Some(error.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.san.is_some()
    }
}
