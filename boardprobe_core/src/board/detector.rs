//! Ordered trial of board candidates.
//!
//! Candidates run strictly in list order and the first positive detection
//! wins. Overlay application is append-only, so the order also decides the
//! kernel state each candidate sees: narrower candidates go first, and a
//! later candidate must tolerate the detection overlays of earlier ones.

use super::candidate::{BoardCandidate, Host};
use crate::config::BoardConfig;
use crate::error::{BoardError, BoardResult};

/// Default detection order
pub const DEFAULT_CANDIDATES: [BoardCandidate; 3] = [
    BoardCandidate::Argonot,
    BoardCandidate::NavigatorPi4,
    BoardCandidate::NavigatorPi5,
];

/// Validated, ordered candidate list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardDetector {
    candidates: Vec<BoardCandidate>,
}

impl BoardDetector {
    /// Build a detector over `candidates`, in the given order.
    ///
    /// Fails when the list is empty, names a candidate twice, or contains a
    /// candidate whose descriptor could never be told apart from absent
    /// hardware.
    pub fn new(candidates: Vec<BoardCandidate>) -> BoardResult<Self> {
        if candidates.is_empty() {
            return Err(BoardError::config("no board candidates configured"));
        }
        for (i, candidate) in candidates.iter().enumerate() {
            if candidates[..i].contains(candidate) {
                return Err(BoardError::config(format!(
                    "board candidate '{}' listed twice",
                    candidate.id()
                )));
            }
            candidate.descriptor().validate(candidate.id())?;
        }
        Ok(Self { candidates })
    }

    /// Detector over [`DEFAULT_CANDIDATES`]
    pub fn with_default_candidates() -> Self {
        Self {
            candidates: DEFAULT_CANDIDATES.to_vec(),
        }
    }

    /// Detector over the configured order, or the default one
    pub fn from_config(config: &BoardConfig) -> BoardResult<Self> {
        match &config.candidates {
            Some(names) => {
                let candidates = names
                    .iter()
                    .map(|name| BoardCandidate::from_name(name))
                    .collect::<BoardResult<Vec<_>>>()?;
                Self::new(candidates)
            }
            None => Ok(Self::with_default_candidates()),
        }
    }

    pub fn candidates(&self) -> &[BoardCandidate] {
        &self.candidates
    }

    /// Try every candidate once, in order, and return the first match.
    ///
    /// A candidate whose overlays fail to apply is treated as not matching.
    /// Running out of candidates is [`BoardError::NoBoardDetected`].
    pub fn detect_boards(&self, host: &Host<'_>) -> BoardResult<BoardCandidate> {
        for candidate in &self.candidates {
            log::info!("Detecting Linux board: {}", candidate.id());
            match candidate.detect(host) {
                Ok(true) => {
                    log::info!("Detected Linux board: {}", candidate.id());
                    return Ok(*candidate);
                }
                Ok(false) => {}
                Err(e) => {
                    log::warn!("{} not detected: {}", candidate.id(), e);
                }
            }
        }
        Err(BoardError::NoBoardDetected)
    }
}

impl Default for BoardDetector {
    fn default() -> Self {
        Self::with_default_candidates()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_candidates_are_valid() {
        let detector = BoardDetector::new(DEFAULT_CANDIDATES.to_vec()).unwrap();
        assert_eq!(detector, BoardDetector::default());
    }

    #[test]
    fn test_placeholder_is_never_offered() {
        let err = BoardDetector::new(vec![
            BoardCandidate::NavigatorPi4,
            BoardCandidate::Unsupported,
        ])
        .unwrap_err();
        assert!(matches!(err, BoardError::Config(_)));
    }

    #[test]
    fn test_duplicates_and_empty_are_rejected() {
        assert!(BoardDetector::new(vec![]).is_err());
        assert!(BoardDetector::new(vec![
            BoardCandidate::NavigatorPi5,
            BoardCandidate::NavigatorPi5,
        ])
        .is_err());
    }

    #[test]
    fn test_from_config() {
        let config = BoardConfig {
            candidates: Some(vec!["NavigatorPi5".into(), "NavigatorPi4".into()]),
            ..Default::default()
        };
        let detector = BoardDetector::from_config(&config).unwrap();
        assert_eq!(
            detector.candidates(),
            &[BoardCandidate::NavigatorPi5, BoardCandidate::NavigatorPi4]
        );

        let unknown = BoardConfig {
            candidates: Some(vec!["Pixhawk".into()]),
            ..Default::default()
        };
        assert!(BoardDetector::from_config(&unknown).is_err());

        let default = BoardDetector::from_config(&BoardConfig::default()).unwrap();
        assert_eq!(default.candidates(), &DEFAULT_CANDIDATES);
    }
}
