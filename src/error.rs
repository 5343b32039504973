//! Error types for synthesis and playback

use thiserror::Error;

/// Result type for pluck operations.
pub type PluckResult<T> = Result<T, PluckError>;

/// Errors that can occur while synthesizing or playing audio.
#[derive(Debug, Error)]
pub enum PluckError {
    /// A synthesis or music-model parameter is out of range.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// What was wrong with it.
        message: String,
    },

    /// The audio device could not be opened, written, or closed.
    #[error("audio device error: {0}")]
    Device(String),

    /// A buffer does not match the sample rate of the sink it was sent to.
    #[error("sample rate mismatch: sink expects {expected} Hz, buffer has {found} Hz")]
    SampleRateMismatch {
        /// Sink sample rate.
        expected: u32,
        /// Buffer sample rate.
        found: u32,
    },

    /// WAV encoding error.
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PluckError {
    /// Shorthand for [`PluckError::InvalidParameter`].
    pub fn invalid(name: &str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn device(err: impl std::fmt::Display) -> Self {
        Self::Device(err.to_string())
    }
}
