//! Error types for the pvfreeze crate.

use thiserror::Error;

/// Errors raised when a frame or configuration violates an engine's contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FreezeError {
    /// The frame's bin count differs from the one the engine was activated with.
    #[error("bin count mismatch: engine holds {expected} bins, frame has {provided}")]
    BinCountMismatch { expected: usize, provided: usize },
    /// Frame rate must be positive and finite.
    #[error("invalid frame rate: {0}. Must be positive and finite.")]
    InvalidFrameRate(f32),
    /// FFT size must be even and at least 4.
    #[error("invalid FFT size: {0}. Must be even and at least 4.")]
    InvalidFftSize(usize),
    /// Hop size must be non-zero.
    #[error("invalid hop size: {0}. Must be greater than 0.")]
    InvalidHopSize(usize),
    /// A half spectrum did not have `bin_count + 2` entries.
    #[error("invalid spectrum length: {provided} complex values provided, {expected} required")]
    SpectrumLength { expected: usize, provided: usize },
    /// Malformed configuration data.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for FreezeError {
    fn from(err: std::io::Error) -> Self {
        FreezeError::IoError(err.to_string())
    }
}
