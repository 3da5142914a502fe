//! Attack/decay spectral lag.
//!
//! Same lifecycle and phase-delta smoothing as [`FreezeEngine`](super::FreezeEngine),
//! but each bin picks its coefficient from the direction of change: the
//! attack coefficient when the incoming magnitude rises above the held one,
//! the decay coefficient otherwise. Coefficients come from attack and decay
//! times in seconds at the analysis frame rate.

use super::held::BinCoefficient;
use super::stage::{check_pinned, Lifecycle, Stage};
use crate::core::config::{validate_frame_rate, EngineConfig};
use crate::core::frame::SpectralFrame;
use crate::core::math::{lag_coefficient, select_coefficient};
use crate::error::FreezeError;

/// Cached attack and decay coefficients.
///
/// Each coefficient is only recomputed when its time parameter changes, so
/// holding a parameter constant costs no `exp` per frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LagCoefficients {
    attack_time: Option<f32>,
    attack: f32,
    decay_time: Option<f32>,
    decay: f32,
}

impl LagCoefficients {
    /// Coefficients with no cached times; both start at 0 (pass-through).
    pub fn new() -> Self {
        Self::default()
    }

    /// Current attack coefficient.
    #[inline]
    pub fn attack(&self) -> f32 {
        self.attack
    }

    /// Current decay coefficient.
    #[inline]
    pub fn decay(&self) -> f32 {
        self.decay
    }

    /// Recomputes the attack coefficient if `time_secs` differs from the
    /// cached time. Returns whether a recompute happened.
    pub fn update_attack(&mut self, time_secs: f32, frame_rate: f32) -> bool {
        if self.attack_time == Some(time_secs) {
            return false;
        }
        self.attack_time = Some(time_secs);
        self.attack = lag_coefficient(time_secs, frame_rate);
        log::trace!("attack {}s -> coefficient {}", time_secs, self.attack);
        true
    }

    /// Recomputes the decay coefficient if `time_secs` differs from the
    /// cached time. Returns whether a recompute happened.
    pub fn update_decay(&mut self, time_secs: f32, frame_rate: f32) -> bool {
        if self.decay_time == Some(time_secs) {
            return false;
        }
        self.decay_time = Some(time_secs);
        self.decay = lag_coefficient(time_secs, frame_rate);
        log::trace!("decay {}s -> coefficient {}", time_secs, self.decay);
        true
    }

    /// Forgets the cached times so both coefficients are recomputed next time.
    pub fn invalidate(&mut self) {
        self.attack_time = None;
        self.decay_time = None;
    }
}

impl BinCoefficient for LagCoefficients {
    #[inline]
    fn coefficient(&self, input: f32, held: f32) -> f32 {
        select_coefficient(input, held, self.attack, self.decay)
    }
}

/// Spectral lag engine with independent attack and decay times.
///
/// # Example
///
/// ```
/// use pvfreeze::{EngineConfig, LagEngine};
///
/// let config = EngineConfig::from_stft(44100, 1024, 256).unwrap();
/// let mut engine = LagEngine::new(config).unwrap();
/// engine.activate(511).unwrap();
///
/// let mut frame = pvfreeze::SpectralFrame::with_bins(511);
/// engine.process(&mut frame, 0.05, 0.8).unwrap();
/// assert!(engine.coefficients().attack() < engine.coefficients().decay());
/// ```
#[derive(Debug)]
pub struct LagEngine {
    config: EngineConfig,
    coefficients: LagCoefficients,
    lifecycle: Lifecycle,
}

impl LagEngine {
    /// Creates an engine for the configured frame rate. Nothing is allocated yet.
    ///
    /// # Errors
    /// Returns [`FreezeError::InvalidFrameRate`] if the frame rate is zero,
    /// negative, or not finite.
    pub fn new(config: EngineConfig) -> Result<Self, FreezeError> {
        config.validate()?;
        Ok(Self {
            config,
            coefficients: LagCoefficients::new(),
            lifecycle: Lifecycle::Empty,
        })
    }

    /// Allocates held state for `bin_count` bins ahead of the first frame.
    ///
    /// # Errors
    /// Returns [`FreezeError::BinCountMismatch`] if the config pinned a
    /// different bin count.
    pub fn activate(&mut self, bin_count: usize) -> Result<(), FreezeError> {
        check_pinned(self.config.bin_count, bin_count)?;
        self.lifecycle.activate(bin_count);
        Ok(())
    }

    /// Processes one frame in place with the given attack and decay times.
    ///
    /// Coefficients are refreshed on every call, including the startup
    /// frames, so they are current by the time blending begins.
    ///
    /// # Errors
    /// Returns [`FreezeError::BinCountMismatch`] if the frame does not match
    /// the held state. The frame and lifecycle are left untouched.
    pub fn process(
        &mut self,
        frame: &mut SpectralFrame,
        attack_secs: f32,
        decay_secs: f32,
    ) -> Result<(), FreezeError> {
        self.lifecycle.check_bin_count(self.config.bin_count, frame.bin_count())?;

        let rate = self.config.frame_rate;
        self.coefficients.update_attack(attack_secs, rate);
        self.coefficients.update_decay(decay_secs, rate);

        self.lifecycle.step(frame, &self.coefficients);
        Ok(())
    }

    /// Changes the analysis frame rate.
    ///
    /// A different rate invalidates the cached coefficients; re-supplying the
    /// current rate keeps them.
    pub fn set_frame_rate(&mut self, frame_rate: f32) -> Result<(), FreezeError> {
        validate_frame_rate(frame_rate)?;
        if frame_rate != self.config.frame_rate {
            log::debug!(
                "frame rate {} -> {}, invalidating lag coefficients",
                self.config.frame_rate,
                frame_rate
            );
            self.config.frame_rate = frame_rate;
            self.coefficients.invalidate();
        }
        Ok(())
    }

    /// Analysis frames per second.
    pub fn frame_rate(&self) -> f32 {
        self.config.frame_rate
    }

    /// The cached attack and decay coefficients.
    pub fn coefficients(&self) -> &LagCoefficients {
        &self.coefficients
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
