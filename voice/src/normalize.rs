//! Transcript normalization.

use crate::vocabulary;

/// Clean a raw transcript into canonical chess vocabulary.
///
/// Lowercases, strips everything but letters, digits and whitespace, maps
/// each token through the homophone table, drops stop-words, and rejoins with
/// single spaces. Total and idempotent.
pub fn normalize(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    let normalized = cleaned
        .split_whitespace()
        .map(|token| vocabulary::canonical(token).unwrap_or(token))
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    tracing::trace!(input = text, normalized = %normalized, "normalized transcript");
    normalized
}
