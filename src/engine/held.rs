//! Held feedback frame and the per-stage frame operations.

use crate::core::frame::SpectralFrame;
use crate::core::math::{interpolate, phase_minus, wrap_phase};

/// Chooses the blend coefficient for one bin from its incoming and held magnitude.
pub(crate) trait BinCoefficient {
    fn coefficient(&self, input: f32, held: f32) -> f32;
}

/// Feedback state: magnitudes, reference phases and phase deltas per bin,
/// plus the held DC and Nyquist scalars.
#[derive(Debug, Clone)]
pub(crate) struct HeldFrame {
    mags: Vec<f32>,
    phases: Vec<f32>,
    deltas: Vec<f32>,
    dc: f32,
    nyquist: f32,
}

impl HeldFrame {
    pub(crate) fn allocate(bin_count: usize) -> Self {
        Self {
            mags: vec![0.0; bin_count],
            phases: vec![0.0; bin_count],
            deltas: vec![0.0; bin_count],
            dc: 0.0,
            nyquist: 0.0,
        }
    }

    #[inline]
    pub(crate) fn bin_count(&self) -> usize {
        self.mags.len()
    }

    /// Captures the frame verbatim. The frame is left untouched.
    pub(crate) fn seed(&mut self, frame: &SpectralFrame) {
        for (i, bin) in frame.bins.iter().enumerate() {
            self.mags[i] = bin.mag;
            self.phases[i] = bin.phase;
        }
        self.dc = frame.dc;
        self.nyquist = frame.nyquist;
    }

    /// Second frame: blends magnitudes and records the first phase deltas.
    ///
    /// Phases pass through unchanged; DC and Nyquist are replaced by the seed.
    pub(crate) fn prime<C: BinCoefficient>(&mut self, frame: &mut SpectralFrame, coeff: &C) {
        for (i, bin) in frame.bins.iter_mut().enumerate() {
            let c = coeff.coefficient(bin.mag, self.mags[i]);
            let out = interpolate(bin.mag, self.mags[i], c);
            bin.mag = out;
            self.mags[i] = out;

            self.deltas[i] = phase_minus(bin.phase, self.phases[i]);
            self.phases[i] = bin.phase;
        }
        frame.dc = self.dc;
        frame.nyquist = self.nyquist;
    }

    /// Steady state: blends magnitude and phase delta per bin, then DC and Nyquist.
    ///
    /// The bin's coefficient drives both its magnitude and its phase-delta
    /// blend, so output phase advances at a smoothed rate.
    pub(crate) fn blend<C: BinCoefficient>(&mut self, frame: &mut SpectralFrame, coeff: &C) {
        for (i, bin) in frame.bins.iter_mut().enumerate() {
            let c = coeff.coefficient(bin.mag, self.mags[i]);
            let out = interpolate(bin.mag, self.mags[i], c);
            bin.mag = out;
            self.mags[i] = out;

            let delta_in = phase_minus(bin.phase, self.phases[i]);
            self.deltas[i] = interpolate(delta_in, self.deltas[i], c);
            let phase = wrap_phase(self.phases[i] + self.deltas[i]);
            bin.phase = phase;
            self.phases[i] = phase;
        }

        let c = coeff.coefficient(frame.dc, self.dc);
        self.dc = interpolate(frame.dc, self.dc, c);
        frame.dc = self.dc;

        let c = coeff.coefficient(frame.nyquist, self.nyquist);
        self.nyquist = interpolate(frame.nyquist, self.nyquist, c);
        frame.nyquist = self.nyquist;
    }
}
