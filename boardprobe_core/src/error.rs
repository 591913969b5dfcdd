//! Unified error handling for boardprobe
//!
//! Every fallible operation in the core returns [`BoardResult`]. Transient
//! bus absence is never an error: the prober maps it to `false`.

use thiserror::Error;

/// Main error type for board detection and setup
#[derive(Debug, Error)]
pub enum BoardError {
    /// I/O related errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration parsing or validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The overlay primitive rejected a parameter, overlay or module
    #[error("Overlay '{token}' failed: {message}")]
    Overlay { token: String, message: String },

    /// Every candidate was tried and none matched the attached hardware
    #[error("No supported Linux board detected")]
    NoBoardDetected,

    /// The OS identification file matched no known release
    #[error("Unknown OS release, unable to map serial ports")]
    UnknownOsRelease,

    /// External command execution errors
    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    /// Operation not supported by this board variant
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Parse errors
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Convenience type alias for Results using BoardError
pub type BoardResult<T> = std::result::Result<T, BoardError>;

impl From<serde_yaml::Error> for BoardError {
    fn from(err: serde_yaml::Error) -> Self {
        BoardError::Config(format!("YAML parse error: {}", err))
    }
}

impl From<serde_json::Error> for BoardError {
    fn from(err: serde_json::Error) -> Self {
        BoardError::Parse(format!("JSON error: {}", err))
    }
}

// Helper methods
impl BoardError {
    /// Create a configuration error with a custom message
    pub fn config<S: Into<String>>(msg: S) -> Self {
        BoardError::Config(msg.into())
    }

    /// Create an overlay error for the token that failed to apply
    pub fn overlay<S: Into<String>, T: Into<String>>(token: S, message: T) -> Self {
        BoardError::Overlay {
            token: token.into(),
            message: message.into(),
        }
    }

    /// Create a command failure error
    pub fn command_failed<S: Into<String>>(msg: S) -> Self {
        BoardError::CommandFailed(msg.into())
    }

    /// Create an unsupported-operation error
    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        BoardError::Unsupported(msg.into())
    }

    /// True for the terminal "nothing matched" condition
    pub fn is_no_board(&self) -> bool {
        matches!(self, BoardError::NoBoardDetected)
    }
}
