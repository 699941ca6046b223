use cozy_chess::{Board, GameStatus, Move, Piece, Square};

use crate::fen::{self, FenError};
use crate::san::{CastleSide, CheckMark, Coord, Disambiguation, SanError, SanMove};
use crate::types::{PieceColor, PieceKind};

/// Rules authority: a game state wrapper around a cozy-chess Board that
/// speaks SAN.
#[derive(Debug, Clone)]
pub struct Game {
    position: Board,
    history: Vec<HistoryEntry>,
    start_position: StartPosition,
}

/// A move that has been played.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub mv: Move,
    pub piece: PieceKind,
    pub san: String,
    /// FEN after this move
    pub fen: String,
}

/// Starting position of the game
#[derive(Debug, Clone)]
pub enum StartPosition {
    Standard,
    Fen(String),
}

/// Game state as far as spoken announcements care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Ongoing,
    Check,
    Checkmate { winner: PieceColor },
    Stalemate,
    Draw,
}

impl Game {
    /// Create a new game from the standard starting position
    pub fn new() -> Self {
        Self {
            position: Board::default(),
            history: Vec::new(),
            start_position: StartPosition::Standard,
        }
    }

    /// Create a game from a FEN string
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let position = fen::parse_fen(fen)?;
        Ok(Self {
            position,
            history: Vec::new(),
            start_position: StartPosition::Fen(fen.to_string()),
        })
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// SAN of the most recently played move.
    pub fn last_move(&self) -> Option<&str> {
        self.history.last().map(|entry| entry.san.as_str())
    }

    pub fn side_to_move(&self) -> PieceColor {
        self.position.side_to_move().into()
    }

    /// Export position to FEN string
    pub fn to_fen(&self) -> String {
        fen::format_fen(&self.position)
    }

    /// All legal moves in generation order.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        self.position.generate_moves(|mvs| {
            moves.extend(mvs);
            false
        });
        moves
    }

    /// All legal moves as SAN, in the same order as [`Game::legal_moves`].
    /// Entries are unique and carry disambiguators and `+`/`#` suffixes.
    pub fn legal_sans(&self) -> Vec<String> {
        let moves = self.legal_moves();
        moves
            .iter()
            .map(|&mv| generate_san(&self.position, mv, &moves))
            .collect()
    }

    pub fn status(&self) -> GameOutcome {
        match self.position.status() {
            GameStatus::Won => GameOutcome::Checkmate {
                winner: self.side_to_move().opponent(),
            },
            GameStatus::Drawn if self.legal_moves().is_empty() => GameOutcome::Stalemate,
            GameStatus::Drawn => GameOutcome::Draw,
            GameStatus::Ongoing if !self.position.checkers().is_empty() => GameOutcome::Check,
            GameStatus::Ongoing => GameOutcome::Ongoing,
        }
    }

    /// Resolve a SAN string against the legal moves without playing it.
    ///
    /// Matching is lenient about the capture marker and check suffix but
    /// honours piece, destination, promotion and any disambiguator given.
    pub fn resolve_san(&self, san: &str) -> Result<Move, GameError> {
        let wanted = SanMove::parse(san)?;
        let moves = self.legal_moves();

        let matches: Vec<Move> = moves
            .iter()
            .copied()
            .filter(|&mv| self.move_matches(mv, &wanted))
            .collect();

        match matches.as_slice() {
            [mv] => Ok(*mv),
            [] => Err(SanError::NoLegalMove(san.to_string()).into()),
            _ => Err(SanError::AmbiguousMove(san.to_string()).into()),
        }
    }

    /// Play a move given in SAN.
    pub fn play_san(&mut self, san: &str) -> Result<HistoryEntry, GameError> {
        let mv = self.resolve_san(san)?;
        self.make_move(mv)
    }

    /// Make a move on the board
    pub fn make_move(&mut self, mv: Move) -> Result<HistoryEntry, GameError> {
        let moves = self.legal_moves();
        if !moves.contains(&mv) {
            return Err(GameError::IllegalMove);
        }

        let piece = self
            .position
            .piece_on(mv.from)
            .ok_or(GameError::IllegalMove)?;

        // SAN is relative to the position before the move
        let san = generate_san(&self.position, mv, &moves);

        self.position.play_unchecked(mv);

        let entry = HistoryEntry {
            mv,
            piece: piece.into(),
            san,
            fen: self.to_fen(),
        };
        tracing::debug!(san = %entry.san, fen = %entry.fen, "move played");

        self.history.push(entry.clone());
        Ok(entry)
    }

    /// Undo the last move
    pub fn undo(&mut self) -> Result<HistoryEntry, GameError> {
        let entry = self.history.pop().ok_or(GameError::NothingToUndo)?;
        self.rebuild_position()?;
        Ok(entry)
    }

    /// Rebuild position from start + history (for undo)
    fn rebuild_position(&mut self) -> Result<(), GameError> {
        let mut board = match &self.start_position {
            StartPosition::Standard => Board::default(),
            StartPosition::Fen(fen) => fen::parse_fen(fen)?,
        };

        for entry in &self.history {
            board
                .try_play(entry.mv)
                .map_err(|_| GameError::IllegalMove)?;
        }

        self.position = board;
        Ok(())
    }

    fn move_matches(&self, mv: Move, wanted: &SanMove) -> bool {
        let board = &self.position;
        let Some(piece) = board.piece_on(mv.from) else {
            return false;
        };

        match wanted {
            SanMove::Castle { side, .. } => castle_side(board, mv) == Some(*side),
            SanMove::Normal {
                piece: wanted_piece,
                from,
                to,
                promotion,
                ..
            } => {
                if castle_side(board, mv).is_some()
                    || PieceKind::from(piece) != *wanted_piece
                    || Coord::from(mv.to) != *to
                    || mv.promotion.map(PieceKind::from) != *promotion
                {
                    return false;
                }
                let origin = Coord::from(mv.from);
                match from {
                    None => true,
                    Some(Disambiguation::File(f)) => origin.file() == *f,
                    Some(Disambiguation::Rank(r)) => origin.rank() == *r,
                    Some(Disambiguation::Square(sq)) => origin == *sq,
                }
            }
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// cozy-chess encodes castling as the king capturing its own rook.
fn castle_side(board: &Board, mv: Move) -> Option<CastleSide> {
    let is_king = board.piece_on(mv.from) == Some(Piece::King);
    let onto_own_rook = board.color_on(mv.to) == Some(board.side_to_move())
        && board.piece_on(mv.to) == Some(Piece::Rook);
    if !(is_king && onto_own_rook) {
        return None;
    }
    if mv.to.file() as u8 > mv.from.file() as u8 {
        Some(CastleSide::King)
    } else {
        Some(CastleSide::Queen)
    }
}

/// Generate SAN for a legal move, disambiguating against `legal`.
fn generate_san(board: &Board, mv: Move, legal: &[Move]) -> String {
    let check = check_mark_after(board, mv);

    if let Some(side) = castle_side(board, mv) {
        return SanMove::Castle { side, check }.to_string();
    }

    let piece = board.piece_on(mv.from).unwrap_or(Piece::Pawn);
    let is_pawn = piece == Piece::Pawn;
    let en_passant = is_pawn && mv.from.file() != mv.to.file() && board.piece_on(mv.to).is_none();
    let capture = board.piece_on(mv.to).is_some() || en_passant;
    let origin = Coord::from(mv.from);

    let from = if is_pawn {
        capture.then(|| Disambiguation::File(origin.file()))
    } else {
        disambiguate(board, mv, piece, legal)
    };

    SanMove::Normal {
        piece: piece.into(),
        from,
        capture,
        to: mv.to.into(),
        promotion: mv.promotion.map(PieceKind::from),
        check,
    }
    .to_string()
}

fn disambiguate(board: &Board, mv: Move, piece: Piece, legal: &[Move]) -> Option<Disambiguation> {
    let rivals: Vec<Square> = legal
        .iter()
        .filter(|other| {
            other.to == mv.to
                && other.from != mv.from
                && board.piece_on(other.from) == Some(piece)
                && castle_side(board, **other).is_none()
        })
        .map(|other| other.from)
        .collect();

    if rivals.is_empty() {
        return None;
    }

    let origin = Coord::from(mv.from);
    if rivals.iter().all(|sq| sq.file() != mv.from.file()) {
        Some(Disambiguation::File(origin.file()))
    } else if rivals.iter().all(|sq| sq.rank() != mv.from.rank()) {
        Some(Disambiguation::Rank(origin.rank()))
    } else {
        Some(Disambiguation::Square(origin))
    }
}

fn check_mark_after(board: &Board, mv: Move) -> Option<CheckMark> {
    let mut after = board.clone();
    after.play_unchecked(mv);
    if after.checkers().is_empty() {
        None
    } else if matches!(after.status(), GameStatus::Won) {
        Some(CheckMark::Checkmate)
    } else {
        Some(CheckMark::Check)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Illegal move")]
    IllegalMove,
    #[error("Nothing to undo")]
    NothingToUndo,
    #[error("FEN parse error: {0}")]
    FenError(#[from] FenError),
    #[error("SAN error: {0}")]
    SanError(#[from] SanError),
}
