//! Continuous spectral freeze.
//!
//! Blends each incoming frame with the previous output using a single
//! coefficient: 0.0 passes the input through, 1.0 holds the last output, and
//! anything between is an IIR blend of the two. Phase is handled by smoothing
//! the per-frame phase advance rather than the phase itself, so a partially
//! frozen spectrum keeps moving coherently instead of collapsing into a
//! static buzz.

use super::held::BinCoefficient;
use super::stage::{check_pinned, Lifecycle, Stage};
use crate::core::config::EngineConfig;
use crate::core::frame::SpectralFrame;
use crate::error::FreezeError;

/// The freeze amount, applied identically to every bin.
#[derive(Debug, Clone, Copy)]
struct FreezeAmount(f32);

impl BinCoefficient for FreezeAmount {
    #[inline]
    fn coefficient(&self, _input: f32, _held: f32) -> f32 {
        self.0
    }
}

/// Spectral freeze engine driven by a continuous freeze amount.
///
/// # Example
///
/// ```
/// use pvfreeze::{FreezeEngine, PolarBin, SpectralFrame, Stage};
///
/// let mut engine = FreezeEngine::new();
/// let mut frame = SpectralFrame::from_parts(vec![PolarBin::new(1.0, 0.0); 4], 0.0, 0.0);
///
/// for _ in 0..4 {
///     engine.process(&mut frame, 0.9).unwrap();
/// }
/// assert_eq!(engine.stage(), Stage::Steady);
/// ```
#[derive(Debug, Default)]
pub struct FreezeEngine {
    lifecycle: Lifecycle,
    expected_bins: Option<usize>,
}

impl FreezeEngine {
    /// Creates an engine that learns its bin count from the first frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine that only accepts frames of `config.bin_count` bins, if set.
    ///
    /// The frame rate is not used by the freeze engine but is still validated.
    pub fn from_config(config: &EngineConfig) -> Result<Self, FreezeError> {
        config.validate()?;
        Ok(Self {
            lifecycle: Lifecycle::Empty,
            expected_bins: config.bin_count,
        })
    }

    /// Allocates held state for `bin_count` bins ahead of the first frame.
    ///
    /// After activation the next frame is taken as the seed. Calling this
    /// again with the same bin count restarts the lifecycle without
    /// reallocating.
    ///
    /// # Errors
    /// Returns [`FreezeError::BinCountMismatch`] if the config pinned a
    /// different bin count.
    pub fn activate(&mut self, bin_count: usize) -> Result<(), FreezeError> {
        check_pinned(self.expected_bins, bin_count)?;
        self.lifecycle.activate(bin_count);
        Ok(())
    }

    /// Processes one frame in place and advances the lifecycle by one stage.
    ///
    /// `freeze` is not clamped; values outside 0..1 extrapolate.
    ///
    /// # Errors
    /// Returns [`FreezeError::BinCountMismatch`] if the frame does not match
    /// the held state. The frame and engine are left untouched.
    pub fn process(&mut self, frame: &mut SpectralFrame, freeze: f32) -> Result<(), FreezeError> {
        self.lifecycle.check_bin_count(self.expected_bins, frame.bin_count())?;
        self.lifecycle.step(frame, &FreezeAmount(freeze));
        Ok(())
    }

    /// Restarts the startup sequence, keeping the allocation.
    pub fn reset(&mut self) {
        self.lifecycle.reset();
    }

    /// Releases the held state and returns to [`Stage::Empty`].
    pub fn deactivate(&mut self) {
        self.lifecycle.release();
    }

    /// Current lifecycle stage.
    pub fn stage(&self) -> Stage {
        self.lifecycle.stage()
    }

    /// Bin count of the held state, if allocated.
    pub fn bin_count(&self) -> Option<usize> {
        self.lifecycle.held().map(|held| held.bin_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::frame::PolarBin;

    fn flat_frame(bins: usize, mag: f32, phase: f32) -> SpectralFrame {
        SpectralFrame::from_parts(vec![PolarBin::new(mag, phase); bins], mag, mag)
    }

    #[test]
    fn test_first_call_only_allocates() {
        let mut engine = FreezeEngine::new();
        assert_eq!(engine.stage(), Stage::Empty);
        assert_eq!(engine.bin_count(), None);

        let mut frame = flat_frame(16, 0.7, 0.2);
        let before = frame.clone();
        engine.process(&mut frame, 0.5).unwrap();

        assert_eq!(frame, before);
        assert_eq!(engine.stage(), Stage::Seeded);
        assert_eq!(engine.bin_count(), Some(16));
    }

    #[test]
    fn test_activate_skips_allocation_frame() {
        let mut engine = FreezeEngine::new();
        engine.activate(8).unwrap();
        assert_eq!(engine.stage(), Stage::Seeded);

        let mut frame = flat_frame(8, 1.0, 0.0);
        engine.process(&mut frame, 0.5).unwrap();
        assert_eq!(engine.stage(), Stage::DeltaPrimed);
    }

    #[test]
    fn test_bin_count_mismatch_rejected() {
        let mut engine = FreezeEngine::new();
        engine.activate(8).unwrap();
        let mut frame = flat_frame(9, 1.0, 0.0);
        let before = frame.clone();
        assert_eq!(
            engine.process(&mut frame, 0.5),
            Err(FreezeError::BinCountMismatch {
                expected: 8,
                provided: 9
            })
        );
        assert_eq!(frame, before);
        assert_eq!(engine.stage(), Stage::Seeded);
    }

    #[test]
    fn test_config_pins_bin_count() {
        let config = EngineConfig::new(100.0).with_bin_count(31);
        let mut engine = FreezeEngine::from_config(&config).unwrap();
        let mut frame = flat_frame(32, 1.0, 0.0);
        assert!(engine.process(&mut frame, 0.0).is_err());
        assert_eq!(engine.stage(), Stage::Empty);
        assert!(engine.activate(32).is_err());
        assert!(engine.activate(31).is_ok());
    }

    #[test]
    fn test_from_config_rejects_bad_frame_rate() {
        assert_eq!(
            FreezeEngine::from_config(&EngineConfig::new(0.0)).unwrap_err(),
            FreezeError::InvalidFrameRate(0.0)
        );
    }

    #[test]
    fn test_third_frame_restores_seed_scalars() {
        let mut engine = FreezeEngine::new();
        engine.activate(2).unwrap();
        engine.process(&mut flat_frame(2, 1.0, 0.0), 0.5).unwrap();

        let mut frame = flat_frame(2, 3.0, 0.4);
        engine.process(&mut frame, 0.5).unwrap();
        assert_eq!(frame.bins[0].mag, 2.0);
        assert_eq!(frame.bins[0].phase, 0.4);
        assert_eq!(frame.dc, 1.0);
        assert_eq!(frame.nyquist, 1.0);
    }

    #[test]
    fn test_reset_restarts_seeding() {
        let mut engine = FreezeEngine::new();
        let mut frame = flat_frame(4, 1.0, 0.0);
        for _ in 0..5 {
            engine.process(&mut frame, 0.5).unwrap();
        }
        assert_eq!(engine.stage(), Stage::Steady);

        engine.reset();
        assert_eq!(engine.stage(), Stage::Seeded);
        assert_eq!(engine.bin_count(), Some(4));

        engine.deactivate();
        assert_eq!(engine.stage(), Stage::Empty);
        assert_eq!(engine.bin_count(), None);
    }
}
