//! Spoken chess move interpretation.
//!
//! A speech-to-text transcript such as "knight to f three" goes through
//! [`normalize`], is matched against the legal moves in a [`ParseContext`] by
//! [`MoveParser`], and comes back as a [`ChessMoveResult`] carrying a SAN move
//! and a confidence. [`phrase`] renders moves and game events back into text
//! suitable for speech synthesis.

pub mod confidence;
pub mod config;
pub mod context;
pub mod decision;
pub mod error;
pub mod normalize;
pub mod parser;
pub mod phrase;
pub mod strategy;
pub mod tokens;
pub mod vocabulary;

pub use confidence::{MatchSource, NO_MATCH};
pub use config::{ParserConfig, TieBreak, DEFAULT_AUTO_CONFIRM_ABOVE, DEFAULT_REPEAT_BELOW};
pub use context::{ChessMoveResult, ParseContext};
pub use decision::ConfirmAction;
pub use error::ParseError;
pub use normalize::normalize;
pub use parser::{parse_move, MoveParser};
pub use phrase::{
    describe_move, format_ambiguous, format_check, format_checkmate, format_confirmation_request,
    format_draw, format_error, format_illegal_move, format_move_confirmation,
    format_opponent_move, format_repeat_request, format_stalemate,
};
pub use strategy::{default_strategies, Candidate, MatchInput, MoveStrategy, Outcome};
