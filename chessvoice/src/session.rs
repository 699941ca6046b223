//! Interactive voice game.
//!
//! Each input line stands in for one speech-to-text transcript. The session
//! owns the [`Game`] (the rules authority) and speaks back through the
//! phrase formatter; the parser itself stays stateless.

use std::io::{BufRead, Write};

use chess::{Game, GameOutcome};
use voice::{phrase, ConfirmAction, MoveParser, ParseContext, ParseError};

const QUIT_WORDS: &[&str] = &["quit", "exit"];
const UNDO_WORD: &str = "undo";
const YES_WORDS: &[&str] = &["yes", "yeah", "yep", "correct", "confirm"];
const NO_WORDS: &[&str] = &["no", "nope", "wrong", "cancel"];

#[derive(Debug, PartialEq, Eq)]
pub enum Turn {
    /// Phrases to speak, in order.
    Speak(Vec<String>),
    Quit,
}

pub struct Session {
    game: Game,
    parser: MoveParser,
    /// Move read back to the user, waiting for a yes or no.
    pending: Option<String>,
}

impl Session {
    pub fn new(game: Game, parser: MoveParser) -> Self {
        Self {
            game,
            parser,
            pending: None,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Handle one transcript.
    pub fn respond(&mut self, line: &str) -> Turn {
        let command = line.trim().to_lowercase();
        if command.is_empty() {
            return Turn::Speak(Vec::new());
        }
        if QUIT_WORDS.contains(&command.as_str()) {
            return Turn::Quit;
        }
        if command == UNDO_WORD {
            self.pending = None;
            return Turn::Speak(vec![self.undo()]);
        }

        if let Some(san) = self.pending.take() {
            if YES_WORDS.contains(&command.as_str()) {
                return Turn::Speak(self.play(&san));
            }
            if NO_WORDS.contains(&command.as_str()) {
                return Turn::Speak(vec![phrase::format_repeat_request()]);
            }
            tracing::debug!(dropped = %san, "new transcript while awaiting confirmation");
        }

        if let Some(announcement) = game_over_phrase(self.game.status()) {
            return Turn::Speak(vec![announcement]);
        }

        Turn::Speak(self.interpret(line))
    }

    fn interpret(&mut self, transcript: &str) -> Vec<String> {
        let context = ParseContext::from(&self.game);

        match self.parser.interpret(transcript, Some(&context)) {
            Ok(candidate) => {
                let confidence = candidate.confidence();
                match ConfirmAction::for_confidence(confidence, self.parser.config()) {
                    ConfirmAction::AutoConfirm => self.play(&candidate.san),
                    ConfirmAction::AskConfirm => {
                        let request = phrase::format_confirmation_request(&candidate.san);
                        self.pending = Some(candidate.san);
                        vec![request]
                    }
                    ConfirmAction::AskRepeat => vec![phrase::format_repeat_request()],
                }
            }
            Err(ParseError::Ambiguous { candidates, .. }) => {
                vec![phrase::format_ambiguous(&candidates)]
            }
            Err(err) => {
                tracing::info!(transcript, error = %err, "transcript not understood");
                vec![phrase::format_error(&err.to_string())]
            }
        }
    }

    fn play(&mut self, san: &str) -> Vec<String> {
        match self.game.play_san(san) {
            Ok(entry) => {
                let mut spoken = vec![phrase::format_move_confirmation(&entry.san)];
                match self.game.status() {
                    GameOutcome::Check => spoken.push(phrase::format_check()),
                    outcome => spoken.extend(game_over_phrase(outcome)),
                }
                spoken
            }
            Err(err) => {
                tracing::warn!(san, error = %err, "authority rejected move");
                vec![phrase::format_illegal_move()]
            }
        }
    }

    fn undo(&mut self) -> String {
        match self.game.undo() {
            Ok(entry) => format!("Move taken back: {}", phrase::describe_move(&entry.san)),
            Err(err) => phrase::format_error(&err.to_string()),
        }
    }
}

fn game_over_phrase(outcome: GameOutcome) -> Option<String> {
    match outcome {
        GameOutcome::Checkmate { winner } => Some(phrase::format_checkmate(winner)),
        GameOutcome::Stalemate => Some(phrase::format_stalemate()),
        GameOutcome::Draw => Some(phrase::format_draw()),
        GameOutcome::Ongoing | GameOutcome::Check => None,
    }
}

/// Read transcripts line by line until end of input or a quit word.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    mut output: W,
) -> std::io::Result<()> {
    writeln!(output, "{} to move", session.game().side_to_move().title())?;
    output.flush()?;

    for line in input.lines() {
        match session.respond(&line?) {
            Turn::Quit => break,
            Turn::Speak(phrases) => {
                for spoken in phrases {
                    writeln!(output, "{}", spoken)?;
                }
                output.flush()?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use voice::ParserConfig;

    fn session() -> Session {
        Session::new(Game::new(), MoveParser::default())
    }

    fn speak(session: &mut Session, line: &str) -> Vec<String> {
        match session.respond(line) {
            Turn::Speak(phrases) => phrases,
            Turn::Quit => panic!("unexpected quit on {:?}", line),
        }
    }

    #[test]
    fn test_confident_move_is_played() {
        let mut s = session();
        assert_eq!(speak(&mut s, "pawn to e4"), vec!["Pawn to e-4 confirmed"]);
        assert_eq!(s.game().last_move(), Some("e4"));
    }

    #[test]
    fn test_fools_mate_is_announced() {
        let mut s = session();
        speak(&mut s, "pawn to f3");
        speak(&mut s, "e5");
        speak(&mut s, "g4");
        assert_eq!(
            speak(&mut s, "queen to h4"),
            vec!["Queen to h-4, checkmate confirmed", "Checkmate! Black wins"]
        );
        assert_eq!(speak(&mut s, "e4"), vec!["Checkmate! Black wins"]);
    }

    #[test]
    fn test_medium_confidence_asks_first() {
        let mut s = session();
        speak(&mut s, "e4");
        speak(&mut s, "e5");
        assert_eq!(speak(&mut s, "queen h5"), vec!["Did you say queen to h-5?"]);
        assert_eq!(s.game().history().len(), 2);
        assert_eq!(speak(&mut s, "yes"), vec!["Queen to h-5 confirmed"]);
        assert_eq!(s.game().last_move(), Some("Qh5"));
    }

    #[test]
    fn test_declined_confirmation() {
        let mut s = session();
        speak(&mut s, "e4");
        speak(&mut s, "e5");
        speak(&mut s, "queen h5");
        assert_eq!(
            speak(&mut s, "no"),
            vec!["Sorry, I didn't catch that. Please repeat your move"]
        );
        assert_eq!(s.game().history().len(), 2);
    }

    #[test]
    fn test_unvalidated_move_is_refused_by_authority() {
        let mut s = session();
        assert_eq!(speak(&mut s, "knight to f6"), vec!["Did you say knight to f-6?"]);
        assert_eq!(
            speak(&mut s, "yes"),
            vec!["That move is not legal. Please try again"]
        );
    }

    #[test]
    fn test_ambiguity_reads_back_candidates() {
        let game = Game::from_fen("4k3/8/8/3p4/4P3/2N5/8/4K3 w - - 0 1").unwrap();
        let mut s = Session::new(game, MoveParser::default());
        let spoken = speak(&mut s, "d5");
        assert_eq!(spoken.len(), 1);
        assert!(spoken[0].starts_with("Ambiguous move. Did you mean"), "{}", spoken[0]);
        assert!(spoken[0].contains("knight takes d-5"), "{}", spoken[0]);
        assert!(spoken[0].contains("pawn on e-file takes d-5"), "{}", spoken[0]);
    }

    #[test]
    fn test_tie_broken_pick_is_read_back() {
        let game = Game::from_fen("4k3/8/8/8/8/8/8/R4RK1 w - - 0 1").unwrap();
        let mut s = Session::new(game, MoveParser::default());
        let spoken = speak(&mut s, "rook to d1");
        assert_eq!(spoken.len(), 1);
        assert!(spoken[0].starts_with("Did you say rook on"), "{}", spoken[0]);
        assert!(spoken[0].ends_with("to d-1?"), "{}", spoken[0]);
        assert!(s.game().history().is_empty());

        speak(&mut s, "yes");
        assert_eq!(s.game().history().len(), 1);
    }

    #[test]
    fn test_gibberish_and_undo() {
        let mut s = session();
        assert_eq!(
            speak(&mut s, "gibberish nonsense"),
            vec!["Error: Could not parse chess move"]
        );
        assert_eq!(speak(&mut s, "undo"), vec!["Error: Nothing to undo"]);
        speak(&mut s, "d4");
        assert_eq!(speak(&mut s, "Undo"), vec!["Move taken back: Pawn to d-4"]);
        assert!(s.game().history().is_empty());
    }

    #[test]
    fn test_strict_thresholds_always_ask() {
        let config = ParserConfig {
            auto_confirm_above: 1.0,
            ..ParserConfig::default()
        };
        let mut s = Session::new(Game::new(), MoveParser::new(config));
        assert_eq!(speak(&mut s, "pawn to e4"), vec!["Did you say pawn to e-4?"]);
        assert_eq!(speak(&mut s, "castle"), vec!["Did you say short castle?"]);
        assert_eq!(
            speak(&mut s, "yes"),
            vec!["That move is not legal. Please try again"]
        );
        assert!(s.game().history().is_empty());
    }

    #[test]
    fn test_run_stops_on_quit() {
        let mut s = session();
        let input = b"e4\nquit\nd4\n";
        let mut output = Vec::new();
        run(&mut s, &input[..], &mut output).unwrap();
        let printed = String::from_utf8(output).unwrap();
        assert_eq!(printed, "White to move\nPawn to e-4 confirmed\n");
        assert_eq!(s.game().history().len(), 1);
    }
}
