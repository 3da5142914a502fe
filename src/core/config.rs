//! Engine configuration and its JSON persistence.

use crate::error::FreezeError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Static engine configuration, fixed before activation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Analysis frames per second (sample rate / hop size).
    pub frame_rate: f32,
    /// Expected interior bin count. When set, frames of any other size are rejected.
    #[serde(default)]
    pub bin_count: Option<usize>,
}

impl EngineConfig {
    /// Create a config with the given frame rate and no pinned bin count.
    pub fn new(frame_rate: f32) -> Self {
        Self {
            frame_rate,
            bin_count: None,
        }
    }

    /// Derive frame rate and bin count from STFT settings.
    ///
    /// # Errors
    /// Returns [`FreezeError::InvalidFftSize`] for odd sizes or sizes below 4,
    /// [`FreezeError::InvalidHopSize`] for a zero hop, and
    /// [`FreezeError::InvalidFrameRate`] for a zero sample rate.
    pub fn from_stft(
        sample_rate: u32,
        fft_size: usize,
        hop_size: usize,
    ) -> Result<Self, FreezeError> {
        if fft_size < 4 || fft_size % 2 != 0 {
            return Err(FreezeError::InvalidFftSize(fft_size));
        }
        if hop_size == 0 {
            return Err(FreezeError::InvalidHopSize(hop_size));
        }
        let config = Self {
            frame_rate: sample_rate as f32 / hop_size as f32,
            bin_count: Some(fft_size / 2 - 1),
        };
        config.validate()?;
        Ok(config)
    }

    /// Pin the expected bin count.
    pub fn with_bin_count(mut self, bin_count: usize) -> Self {
        self.bin_count = Some(bin_count);
        self
    }

    /// Validate all parameters.
    pub fn validate(&self) -> Result<(), FreezeError> {
        validate_frame_rate(self.frame_rate)
    }
}

pub(crate) fn validate_frame_rate(frame_rate: f32) -> Result<(), FreezeError> {
    if !frame_rate.is_finite() || frame_rate <= 0.0 {
        return Err(FreezeError::InvalidFrameRate(frame_rate));
    }
    Ok(())
}

/// Writes an engine config as JSON.
pub fn write_config_json(path: &Path, config: &EngineConfig) -> Result<(), FreezeError> {
    let json = serde_json::to_string_pretty(config).map_err(|e| {
        FreezeError::InvalidConfig(format!("failed to serialize engine config: {}", e))
    })?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Reads and validates an engine config from JSON.
pub fn read_config_json(path: &Path) -> Result<EngineConfig, FreezeError> {
    let data = std::fs::read_to_string(path)?;
    let config: EngineConfig = serde_json::from_str(&data).map_err(|e| {
        FreezeError::InvalidConfig(format!(
            "failed to parse engine config from {}: {}",
            path.display(),
            e
        ))
    })?;
    config.validate()?;
    Ok(config)
}
