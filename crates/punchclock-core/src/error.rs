//! Error types for punchclock-core.
//!
//! Reconstruction and aggregation never fail: malformed punch sequences
//! degrade to ignored transitions. Errors only arise at the edges where
//! outside text is turned into values (timezone names, timestamps).

use thiserror::Error;

/// The main error type for punchclock operations.
#[derive(Debug, Error)]
pub enum PunchclockError {
    /// Invalid timezone name provided.
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Error parsing timestamp or date input.
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Result type alias for punchclock operations.
pub type Result<T> = std::result::Result<T, PunchclockError>;
