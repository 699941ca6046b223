//! Standard Algebraic Notation.
//!
//! [`SanMove`] is the structured form of a SAN string such as `Nbxd7+` or
//! `e8=Q#`. Parsing is purely syntactic: whether the move is legal in some
//! position is the [`crate::Game`]'s business.

use std::fmt;
use std::str::FromStr;

use cozy_chess::{File, Rank, Square};

use crate::types::PieceKind;

/// A board square named by its file letter (`a`..=`h`) and rank digit (`1`..=`8`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    file: char,
    rank: char,
}

impl Coord {
    pub fn new(file: char, rank: char) -> Option<Self> {
        if is_file(file) && is_rank(rank) {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    /// Parse a two-character square name like `f3`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Self::new(file, rank)
    }

    pub fn file(self) -> char {
        self.file
    }

    pub fn rank(self) -> char {
        self.rank
    }
}

impl From<Square> for Coord {
    fn from(sq: Square) -> Self {
        Self {
            file: (b'a' + sq.file() as u8) as char,
            rank: (b'1' + sq.rank() as u8) as char,
        }
    }
}

impl From<Coord> for Square {
    fn from(c: Coord) -> Self {
        Square::new(
            File::index((c.file as u8 - b'a') as usize),
            Rank::index((c.rank as u8 - b'1') as usize),
        )
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file, self.rank)
    }
}

pub fn is_file(c: char) -> bool {
    ('a'..='h').contains(&c)
}

pub fn is_rank(c: char) -> bool {
    ('1'..='8').contains(&c)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    King,
    Queen,
}

/// Trailing `+` or `#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckMark {
    Check,
    Checkmate,
}

impl CheckMark {
    pub fn symbol(self) -> char {
        match self {
            Self::Check => '+',
            Self::Checkmate => '#',
        }
    }
}

/// Origin hint written between the piece letter and the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disambiguation {
    File(char),
    Rank(char),
    Square(Coord),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanMove {
    Castle {
        side: CastleSide,
        check: Option<CheckMark>,
    },
    Normal {
        piece: PieceKind,
        from: Option<Disambiguation>,
        capture: bool,
        to: Coord,
        promotion: Option<PieceKind>,
        check: Option<CheckMark>,
    },
}

impl SanMove {
    /// Parse a SAN string. Accepts `0-0` for castling, promotion with or
    /// without `=`, and ignores trailing `!`/`?` annotations.
    pub fn parse(san: &str) -> Result<Self, SanError> {
        let trimmed = san.trim().trim_end_matches(['!', '?']);
        if trimmed.is_empty() {
            return Err(SanError::InvalidFormat(san.to_string()));
        }

        let (body, check) = split_check(trimmed);

        match body {
            "O-O" | "0-0" => {
                return Ok(Self::Castle {
                    side: CastleSide::King,
                    check,
                })
            }
            "O-O-O" | "0-0-0" => {
                return Ok(Self::Castle {
                    side: CastleSide::Queen,
                    check,
                })
            }
            _ => {}
        }

        let mut chars: Vec<char> = body.chars().collect();

        let piece = match chars.first().copied().and_then(PieceKind::from_san_letter) {
            Some(piece) => {
                chars.remove(0);
                piece
            }
            None => PieceKind::Pawn,
        };

        let promotion = take_promotion(&mut chars, san)?;

        if chars.len() < 2 {
            return Err(SanError::InvalidFormat(san.to_string()));
        }
        let rank = chars.pop().unwrap_or_default();
        let file = chars.pop().unwrap_or_default();
        let to = Coord::new(file, rank)
            .ok_or_else(|| SanError::InvalidSquare(format!("{}{}", file, rank)))?;

        let capture = chars.last() == Some(&'x');
        if capture {
            chars.pop();
        }

        let from = match chars.as_slice() {
            [] => None,
            [f] if is_file(*f) => Some(Disambiguation::File(*f)),
            [r] if is_rank(*r) => Some(Disambiguation::Rank(*r)),
            [f, r] => Some(Disambiguation::Square(
                Coord::new(*f, *r).ok_or_else(|| SanError::InvalidSquare(format!("{}{}", f, r)))?,
            )),
            _ => return Err(SanError::InvalidFormat(san.to_string())),
        };

        if promotion.is_some() && piece != PieceKind::Pawn {
            return Err(SanError::InvalidPromotion(san.to_string()));
        }

        Ok(Self::Normal {
            piece,
            from,
            capture,
            to,
            promotion,
            check,
        })
    }

    /// Destination square; `None` for castling.
    pub fn target(&self) -> Option<Coord> {
        match self {
            Self::Castle { .. } => None,
            Self::Normal { to, .. } => Some(*to),
        }
    }

    /// Moving piece; `King` for castling.
    pub fn piece(&self) -> PieceKind {
        match self {
            Self::Castle { .. } => PieceKind::King,
            Self::Normal { piece, .. } => *piece,
        }
    }

    /// Promotion piece; `None` for castling and ordinary moves.
    pub fn promotion(&self) -> Option<PieceKind> {
        match self {
            Self::Castle { .. } => None,
            Self::Normal { promotion, .. } => *promotion,
        }
    }

    pub fn check(&self) -> Option<CheckMark> {
        match self {
            Self::Castle { check, .. } | Self::Normal { check, .. } => *check,
        }
    }

    pub fn is_castle(&self) -> bool {
        matches!(self, Self::Castle { .. })
    }
}

impl FromStr for SanMove {
    type Err = SanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SanMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Castle { side, check } => {
                match side {
                    CastleSide::King => f.write_str("O-O")?,
                    CastleSide::Queen => f.write_str("O-O-O")?,
                }
                if let Some(mark) = check {
                    write!(f, "{}", mark.symbol())?;
                }
                Ok(())
            }
            Self::Normal {
                piece,
                from,
                capture,
                to,
                promotion,
                check,
            } => {
                if let Some(letter) = piece.san_letter() {
                    write!(f, "{}", letter)?;
                }
                match from {
                    Some(Disambiguation::File(c)) | Some(Disambiguation::Rank(c)) => {
                        write!(f, "{}", c)?
                    }
                    Some(Disambiguation::Square(sq)) => write!(f, "{}", sq)?,
                    None => {}
                }
                if *capture {
                    f.write_str("x")?;
                }
                write!(f, "{}", to)?;
                if let Some(promo) = promotion {
                    write!(f, "={}", promo.to_char_upper())?;
                }
                if let Some(mark) = check {
                    write!(f, "{}", mark.symbol())?;
                }
                Ok(())
            }
        }
    }
}

/// Destination square of a SAN string, or `None` for castling and
/// unparseable input.
pub fn target_square(san: &str) -> Option<Coord> {
    SanMove::parse(san).ok().and_then(|m| m.target())
}

fn split_check(s: &str) -> (&str, Option<CheckMark>) {
    if let Some(body) = s.strip_suffix('#') {
        (body, Some(CheckMark::Checkmate))
    } else if let Some(body) = s.strip_suffix("++") {
        (body, Some(CheckMark::Checkmate))
    } else if let Some(body) = s.strip_suffix('+') {
        (body, Some(CheckMark::Check))
    } else {
        (s, None)
    }
}

fn take_promotion(chars: &mut Vec<char>, san: &str) -> Result<Option<PieceKind>, SanError> {
    let Some(&last) = chars.last() else {
        return Ok(None);
    };
    if !last.is_ascii_uppercase() {
        if chars.last() == Some(&'=') {
            return Err(SanError::InvalidPromotion(san.to_string()));
        }
        return Ok(None);
    }

    let promo = match PieceKind::from_san_letter(last) {
        Some(PieceKind::King) | None => return Err(SanError::InvalidPromotion(san.to_string())),
        Some(p) => p,
    };
    chars.pop();
    if chars.last() == Some(&'=') {
        chars.pop();
    }
    Ok(Some(promo))
}

#[derive(Debug, thiserror::Error)]
pub enum SanError {
    #[error("No legal move found for: {0}")]
    NoLegalMove(String),
    #[error("Ambiguous move: {0}")]
    AmbiguousMove(String),
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Invalid square: {0}")]
    InvalidSquare(String),
    #[error("Invalid promotion: {0}")]
    InvalidPromotion(String),
}
