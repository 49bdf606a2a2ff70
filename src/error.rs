//! Custom error types for the recording engine.
//!
//! This module defines the primary error type, `RecError`, for the whole
//! crate. Using the `thiserror` crate, it provides a centralized way to
//! handle the different failures a recording session can hit, from I/O and
//! configuration problems to sensor-source registration errors.
//!
//! By using `#[from]`, `RecError` can be seamlessly created from underlying
//! error types, so `?` works throughout the engine.

use thiserror::Error;

/// Convenience alias for results using the crate error type.
pub type RecResult<T> = std::result::Result<T, RecError>;

/// Errors surfaced by the session recording engine.
#[derive(Error, Debug)]
pub enum RecError {
    /// Configuration file or environment parsing failed.
    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    /// Configuration parsed but holds semantically invalid values.
    #[error("Configuration validation error: {0}")]
    Configuration(String),

    /// Underlying file or directory operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization to the session log failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The log writer was already closed when an append arrived.
    #[error("Log writer is closed")]
    WriterClosed,

    /// The sensor source could not be started.
    #[error("Sensor source error: {0}")]
    Sensor(String),

    /// The power keep-alive resource could not be acquired.
    #[error("Wake lock error: {0}")]
    WakeLock(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts_with_question_mark() {
        fn open_missing() -> RecResult<std::fs::File> {
            let f = std::fs::File::open("/definitely/not/here")?;
            Ok(f)
        }
        match open_missing() {
            Err(RecError::Io(_)) => {}
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn display_includes_context() {
        let err = RecError::Sensor("gyroscope unavailable".to_string());
        assert!(err.to_string().contains("gyroscope unavailable"));
    }
}
