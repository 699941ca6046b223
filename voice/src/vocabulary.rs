//! Static vocabulary tables.
//!
//! Every table is built once on first use and never mutated afterwards, so
//! lookups are safe from any number of threads without coordination.
//!
//! Invariant: every canonical value is itself absent from [`HOMOPHONES`], which
//! keeps normalization idempotent.

use std::collections::HashMap;

use chess::PieceKind;
use once_cell::sync::Lazy;

/// Token used for both "to" and the digit two.
pub const CONNECTOR: &str = "2";
pub const TAKES: &str = "takes";
pub const CAPTURE_X: &str = "x";
pub const CHECK: &str = "check";
pub const CHECKMATE: &str = "checkmate";
pub const CASTLE: &str = "castle";

/// Words meaning kingside castling on their own.
pub const SHORT_SIDE_WORDS: &[&str] = &["short", "kingside"];
/// Words meaning queenside castling on their own.
pub const LONG_SIDE_WORDS: &[&str] = &["long", "queenside"];
/// Follows "king"/"queen" in "king side" / "queen side".
pub const SIDE: &str = "side";

/// Tokens dropped entirely during normalization.
pub static STOP_WORDS: &[&str] = &[
    "the", "move", "moves", "piece", "please", "my", "i", "um", "uh", "and", "then", "play",
    "go", "goes", "on", "from", "square", "with", "lets", "ok", "okay", "now",
];

/// Recognizer output → canonical chess token. Stop-words map to the empty
/// string.
pub static HOMOPHONES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut table: HashMap<&'static str, &'static str> = HashMap::new();

    let groups: &[(&[&'static str], &'static str)] = &[
        // pieces
        (&["night", "nite", "knights", "knite", "nights"], "knight"),
        (&["bishops", "bishup"], "bishop"),
        (&["rooks", "rock", "rocks", "brook", "ruk", "tower", "towers"], "rook"),
        (&["queens", "quinn", "queenie"], "queen"),
        (&["kings", "kink"], "king"),
        (&["pawns", "porn", "prawn", "pond", "paun", "pon", "pawned"], "pawn"),
        // connectors
        (&["to", "too", "two", "tu"], CONNECTOR),
        (&["take", "took", "taking", "capture", "captures", "captured", "eats", "tikes"], TAKES),
        (&["ex"], CAPTURE_X),
        // ranks
        (&["one", "won"], "1"),
        (&["three", "tree", "free"], "3"),
        (&["four", "for", "fore"], "4"),
        (&["five", "fife"], "5"),
        (&["six", "sicks", "sics"], "6"),
        (&["seven"], "7"),
        (&["eight", "ate"], "8"),
        // files
        (&["ay", "eh"], "a"),
        (&["be", "bee"], "b"),
        (&["see", "sea", "cee"], "c"),
        (&["dee"], "d"),
        (&["ee"], "e"),
        (&["eff", "ef"], "f"),
        (&["gee", "jee", "ji"], "g"),
        (&["aitch", "age"], "h"),
        // check and castling
        (&["checks", "chuck"], CHECK),
        (&["mate", "checkmates", "mates"], CHECKMATE),
        (&["castles", "castling", "castled", "cassel", "castel"], CASTLE),
        (&["kingsside"], "kingside"),
        (&["queensside"], "queenside"),
    ];

    for (aliases, canonical) in groups {
        for alias in *aliases {
            table.insert(*alias, *canonical);
        }
    }

    for word in STOP_WORDS {
        table.insert(*word, "");
    }

    table
});

/// Full piece names as spoken, keyed by canonical token.
pub static PIECE_NAMES: Lazy<HashMap<&'static str, PieceKind>> = Lazy::new(|| {
    PieceKind::ALL
        .into_iter()
        .map(|piece| (piece.name(), piece))
        .collect()
});

/// Canonical replacement for a lowercase token. `None` means the token is
/// already canonical; `Some("")` means it is a stop-word.
pub fn canonical(token: &str) -> Option<&'static str> {
    HOMOPHONES.get(token).copied()
}

/// Piece named by a full-word canonical token such as `knight`.
pub fn piece_named(token: &str) -> Option<PieceKind> {
    PIECE_NAMES.get(token).copied()
}

/// Piece named by a one-letter abbreviation. `b` is read as bishop here;
/// callers decide whether a lone `b` is a file or a piece.
pub fn piece_abbreviation(token: &str) -> Option<PieceKind> {
    match token {
        "n" => Some(PieceKind::Knight),
        "b" => Some(PieceKind::Bishop),
        "r" => Some(PieceKind::Rook),
        "q" => Some(PieceKind::Queen),
        "k" => Some(PieceKind::King),
        _ => None,
    }
}
