//! Fixed confidence table.
//!
//! Confidence is assigned where a strategy succeeds; there is no separate
//! scoring pass. Consumers may threshold on it, see [`crate::decision`].

/// Which success path produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSource {
    CastleExplicitSide,
    CastleDefaultSide,
    PatternValidated,
    PatternUnvalidated,
    UniqueDestination,
    PieceDisambiguated,
}

impl MatchSource {
    pub fn confidence(self) -> f32 {
        match self {
            Self::CastleExplicitSide => 0.95,
            Self::CastleDefaultSide => 0.80,
            Self::PatternValidated => 0.90,
            Self::PatternUnvalidated => 0.70,
            Self::UniqueDestination => 0.80,
            Self::PieceDisambiguated => 0.85,
        }
    }
}

/// Confidence reported when no strategy matched.
pub const NO_MATCH: f32 = 0.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_values() {
        assert_eq!(MatchSource::CastleExplicitSide.confidence(), 0.95);
        assert_eq!(MatchSource::CastleDefaultSide.confidence(), 0.80);
        assert_eq!(MatchSource::PatternValidated.confidence(), 0.90);
        assert_eq!(MatchSource::PatternUnvalidated.confidence(), 0.70);
        assert_eq!(MatchSource::UniqueDestination.confidence(), 0.80);
        assert_eq!(MatchSource::PieceDisambiguated.confidence(), 0.85);
    }

    #[test]
    fn test_validation_always_raises_confidence() {
        assert!(
            MatchSource::PatternValidated.confidence()
                > MatchSource::PatternUnvalidated.confidence()
        );
        assert!(
            MatchSource::PieceDisambiguated.confidence()
                > MatchSource::UniqueDestination.confidence()
        );
    }
}
