//! Turning a parse result into what the assistant should say next.

use serde::{Deserialize, Serialize};

use crate::config::ParserConfig;
use crate::context::ChessMoveResult;
use crate::phrase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmAction {
    /// Play the move and announce it.
    AutoConfirm,
    /// Read the move back and wait for a yes/no.
    AskConfirm,
    /// Nothing usable was heard.
    AskRepeat,
}

impl ConfirmAction {
    pub fn for_result(result: &ChessMoveResult, config: &ParserConfig) -> Self {
        if result.san.is_none() {
            return Self::AskRepeat;
        }
        Self::for_confidence(result.confidence, config)
    }

    /// Threshold a confidence. Only a confidence strictly above
    /// `auto_confirm_above` is played unasked; one below `repeat_below` is
    /// thrown away.
    pub fn for_confidence(confidence: f32, config: &ParserConfig) -> Self {
        if confidence < config.repeat_below {
            Self::AskRepeat
        } else if confidence > config.auto_confirm_above {
            Self::AutoConfirm
        } else {
            Self::AskConfirm
        }
    }

    /// The phrase to speak for this action.
    pub fn prompt(self, result: &ChessMoveResult) -> String {
        match (self, result.san.as_deref()) {
            (Self::AutoConfirm, Some(san)) => phrase::format_move_confirmation(san),
            (Self::AskConfirm, Some(san)) => phrase::format_confirmation_request(san),
            _ => phrase::format_repeat_request(),
        }
    }
}
