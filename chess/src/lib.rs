//! Chess vocabulary shared across the workspace: piece and color types, the
//! SAN grammar, FEN helpers, and a SAN-speaking rules authority built on
//! cozy-chess.

pub mod fen;
pub mod game;
pub mod san;
pub mod types;

pub use fen::{FenError, STARTING_FEN};
pub use game::{Game, GameError, GameOutcome, HistoryEntry, StartPosition};
pub use san::{target_square, CastleSide, CheckMark, Coord, Disambiguation, SanError, SanMove};
pub use types::{PieceColor, PieceKind};
