//! chessvoice - voice-command chess from the terminal.
//!
//! Typed lines stand in for speech-to-text transcripts:
//!
//! - **`parse`**: interpret one transcript, optionally against a position or
//!   an explicit legal move list, and print the move, its confidence and the
//!   phrase the assistant would speak.
//! - **`say`**: render a SAN move as its spoken confirmation.
//! - **`normalize`**: show the canonical token stream for a transcript.
//! - **`play`**: an interactive game where each stdin line is one utterance.
//!
//! Runtime tunables are read from the environment (see [`config`]).

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use chess::{fen, Game};
use voice::{phrase, ChessMoveResult, ConfirmAction, MoveParser, ParseContext};

mod config;
mod session;

#[derive(Parser)]
#[command(name = "chessvoice", about = "Spoken chess move interpreter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interpret a transcript as a chess move.
    Parse {
        /// The transcript, e.g. `knight to f three`.
        #[arg(required = true)]
        transcript: Vec<String>,

        /// Position to parse against. Legal moves are generated from it
        /// unless `--legal` is given.
        #[arg(long)]
        fen: Option<String>,

        /// Explicit legal moves in SAN, in priority order.
        #[arg(long, num_args = 1..)]
        legal: Vec<String>,

        /// Read the full parse context from a JSON file.
        #[arg(long, conflicts_with_all = ["fen", "legal"])]
        context: Option<PathBuf>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Speak a SAN move as a confirmation.
    Say {
        san: String,

        /// Announce the move as the opponent's.
        #[arg(short, long)]
        opponent: bool,
    },
    /// Print the normalized form of a transcript.
    Normalize {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Play a game, one transcript per line on stdin.
    Play {
        /// Starting position; the standard position when omitted.
        #[arg(long)]
        fen: Option<String>,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read context file {path}: {source}")]
    ContextRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid context file {path}: {source}")]
    ContextJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Fen(#[from] fen::FenError),

    #[error(transparent)]
    Game(#[from] chess::GameError),

    #[error("failed to create log directory {path}: {source}")]
    LogDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Load a [`ParseContext`] from a JSON file.
fn load_context(path: &Path) -> Result<ParseContext, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::ContextRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::ContextJson {
        path: path.to_path_buf(),
        source,
    })
}

/// Build the context for `parse` from its flags. No flags means no context,
/// so only the fixed spoken patterns can match.
fn build_context(
    fen: Option<String>,
    legal: Vec<String>,
    context: Option<PathBuf>,
) -> Result<Option<ParseContext>, CliError> {
    if let Some(path) = context {
        return load_context(&path).map(Some);
    }

    match (fen, legal.is_empty()) {
        (None, true) => Ok(None),
        (Some(fen), true) => Ok(Some(ParseContext::from(&Game::from_fen(&fen)?))),
        (fen, false) => {
            let fen = fen.unwrap_or_else(|| chess::STARTING_FEN.to_string());
            let color = fen::side_to_move(&fen)?;
            Ok(Some(ParseContext::new(fen, legal, color)))
        }
    }
}

fn handle_parse(
    transcript: &str,
    context: Option<ParseContext>,
    json: bool,
) -> Result<()> {
    let parser = MoveParser::new(config::parser_config());
    let result = parser.parse(transcript, context.as_ref());
    let action = ConfirmAction::for_result(&result, parser.config());
    tracing::debug!(?result, ?action, "parsed transcript");

    if json {
        let value = serde_json::json!({
            "result": result,
            "action": action,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", describe_result(&result));
        println!("{}", action.prompt(&result));
    }

    Ok(())
}

fn describe_result(result: &ChessMoveResult) -> String {
    match (&result.san, &result.error) {
        (Some(san), _) => format!("{} (confidence {:.2})", san, result.confidence),
        (None, Some(error)) => format!("no move: {}", error),
        (None, None) => "no move".to_string(),
    }
}

fn handle_play(fen: Option<String>) -> Result<()> {
    let game = match fen {
        Some(fen) => Game::from_fen(&fen).map_err(CliError::from)?,
        None => Game::new(),
    };
    let mut session = session::Session::new(game, MoveParser::new(config::parser_config()));

    tracing::info!("Starting voice game");
    let stdin = std::io::stdin();
    session::run(&mut session, stdin.lock(), std::io::stdout())?;
    tracing::info!(moves = session.game().history().len(), "Voice game finished");

    Ok(())
}

/// Initialize logging. With `CHESSVOICE_LOG_DIR` set, logs go to a daily
/// rolling file so stdout only carries spoken phrases; otherwise to stderr.
fn init_tracing() -> Result<Option<WorkerGuard>, CliError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Some(log_dir) = config::get_log_dir() else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    std::fs::create_dir_all(&log_dir).map_err(|source| CliError::LogDir {
        path: log_dir.clone(),
        source,
    })?;
    let file_appender = tracing_appender::rolling::daily(&log_dir, "chessvoice");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(filter)
        .init();

    Ok(Some(guard))
}

fn main() -> Result<()> {
    let _guard = init_tracing()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            transcript,
            fen,
            legal,
            context,
            json,
        } => {
            let context = build_context(fen, legal, context)?;
            handle_parse(&transcript.join(" "), context, json)?;
        }
        Commands::Say { san, opponent } => {
            if opponent {
                println!("{}", phrase::format_opponent_move(&san));
            } else {
                println!("{}", phrase::format_move_confirmation(&san));
            }
        }
        Commands::Normalize { text } => {
            println!("{}", voice::normalize(&text.join(" ")));
        }
        Commands::Play { fen } => handle_play(fen)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess::PieceColor;

    #[test]
    fn test_load_context_from_file() {
        let tempdir = tempfile::tempdir().expect("failed to create temp dir");
        let path = tempdir.path().join("context.json");
        std::fs::write(
            &path,
            r#"{"currentFEN":"r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1","legalMoves":["O-O","O-O-O","Kd7"],"lastMove":"Kd2","playerColor":"black"}"#,
        )
        .unwrap();

        let context = load_context(&path).unwrap();
        assert_eq!(context.player_color, PieceColor::Black);
        assert_eq!(context.legal_moves, vec!["O-O", "O-O-O", "Kd7"]);
        assert_eq!(context.last_move.as_deref(), Some("Kd2"));
    }

    #[test]
    fn test_load_context_errors() {
        let tempdir = tempfile::tempdir().expect("failed to create temp dir");
        let missing = tempdir.path().join("missing.json");
        assert!(matches!(
            load_context(&missing),
            Err(CliError::ContextRead { .. })
        ));

        let broken = tempdir.path().join("broken.json");
        std::fs::write(&broken, "{not json").unwrap();
        assert!(matches!(
            load_context(&broken),
            Err(CliError::ContextJson { .. })
        ));
    }

    #[test]
    fn test_build_context_variants() {
        assert_eq!(build_context(None, Vec::new(), None).unwrap(), None);

        let from_fen = build_context(Some(chess::STARTING_FEN.to_string()), Vec::new(), None)
            .unwrap()
            .unwrap();
        assert_eq!(from_fen.legal_moves.len(), 20);

        let listed = build_context(None, vec!["Nf3".to_string(), "e4".to_string()], None)
            .unwrap()
            .unwrap();
        assert_eq!(listed.legal_moves, vec!["Nf3", "e4"]);
        assert_eq!(listed.player_color, PieceColor::White);
        assert_eq!(listed.current_fen, chess::STARTING_FEN);

        assert!(build_context(Some("garbage".to_string()), vec!["e4".to_string()], None).is_err());
    }

    #[test]
    fn test_describe_result() {
        let ok = ChessMoveResult::success("Nf3", 0.9, "knight to f3");
        assert_eq!(describe_result(&ok), "Nf3 (confidence 0.90)");
        let failed = ChessMoveResult::failure(&voice::ParseError::Unparseable, "hmm");
        assert_eq!(describe_result(&failed), "no move: Could not parse chess move");
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from([
            "chessvoice", "parse", "knight", "to", "f3", "--legal", "Nf3", "Nc3", "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Parse {
                transcript,
                legal,
                json,
                ..
            } => {
                assert_eq!(transcript.join(" "), "knight to f3");
                assert_eq!(legal, vec!["Nf3", "Nc3"]);
                assert!(json);
            }
            _ => panic!("expected parse"),
        }

        assert!(Cli::try_parse_from([
            "chessvoice", "parse", "e4", "--fen", chess::STARTING_FEN, "--context", "ctx.json",
        ])
        .is_err());
    }
}
