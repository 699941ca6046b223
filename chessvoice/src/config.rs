//! Configuration for the chessvoice CLI.
//!
//! Every tunable has a compile-time default and can be overridden at runtime
//! via a dedicated environment variable. Values that fail to parse fall back
//! to the default.

use std::path::PathBuf;

use voice::{ParserConfig, TieBreak, DEFAULT_AUTO_CONFIRM_ABOVE, DEFAULT_REPEAT_BELOW};

const TIE_BREAK_VAR: &str = "CHESSVOICE_TIE_BREAK";
const AUTO_CONFIRM_VAR: &str = "CHESSVOICE_AUTO_CONFIRM";
const REPEAT_BELOW_VAR: &str = "CHESSVOICE_REPEAT_BELOW";
const LOG_DIR_VAR: &str = "CHESSVOICE_LOG_DIR";

/// Get the tie-break policy for piece names matching several legal moves.
///
/// Priority:
/// 1. `CHESSVOICE_TIE_BREAK` env variable (`first`, `canonical` or `reject`)
/// 2. first listed legal move as fallback
pub fn get_tie_break() -> TieBreak {
    std::env::var(TIE_BREAK_VAR)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or_default()
}

/// Get the confidence above which moves are played without asking.
///
/// Priority:
/// 1. `CHESSVOICE_AUTO_CONFIRM` env variable if set to a value in `0..=1`
/// 2. `0.85` as fallback
pub fn get_auto_confirm_above() -> f32 {
    unit_interval_var(AUTO_CONFIRM_VAR).unwrap_or(DEFAULT_AUTO_CONFIRM_ABOVE)
}

/// Get the confidence below which the user is asked to repeat.
///
/// Priority:
/// 1. `CHESSVOICE_REPEAT_BELOW` env variable if set to a value in `0..=1`
/// 2. `0.5` as fallback
pub fn get_repeat_below() -> f32 {
    unit_interval_var(REPEAT_BELOW_VAR).unwrap_or(DEFAULT_REPEAT_BELOW)
}

/// Directory for rolling log files. Unset means log to stderr.
pub fn get_log_dir() -> Option<PathBuf> {
    std::env::var_os(LOG_DIR_VAR).map(PathBuf::from)
}

/// Parser configuration assembled from the environment.
pub fn parser_config() -> ParserConfig {
    ParserConfig {
        tie_break: get_tie_break(),
        auto_confirm_above: get_auto_confirm_above(),
        repeat_below: get_repeat_below(),
    }
}

fn unit_interval_var(name: &str) -> Option<f32> {
    parse_unit_interval(&std::env::var(name).ok()?)
}

fn parse_unit_interval(value: &str) -> Option<f32> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|v| (0.0..=1.0).contains(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_tie_break() {
        let policy = get_tie_break();
        match std::env::var(TIE_BREAK_VAR).ok().and_then(|v| v.parse().ok()) {
            Some(val) => assert_eq!(policy, val),
            None => assert_eq!(policy, TieBreak::FirstListed),
        }
    }

    #[test]
    fn test_get_auto_confirm_above_default() {
        if std::env::var(AUTO_CONFIRM_VAR).is_err() {
            assert_eq!(get_auto_confirm_above(), DEFAULT_AUTO_CONFIRM_ABOVE);
        }
    }

    #[test]
    fn test_get_repeat_below_default() {
        if std::env::var(REPEAT_BELOW_VAR).is_err() {
            assert_eq!(get_repeat_below(), DEFAULT_REPEAT_BELOW);
        }
    }

    #[test]
    fn test_parse_unit_interval() {
        assert_eq!(parse_unit_interval("0.9"), Some(0.9));
        assert_eq!(parse_unit_interval(" 1 "), Some(1.0));
        assert_eq!(parse_unit_interval("1.5"), None);
        assert_eq!(parse_unit_interval("-0.1"), None);
        assert_eq!(parse_unit_interval("high"), None);
    }
}
