//! Polar spectral frames exchanged with the analysis/resynthesis host.

use rustfft::num_complex::Complex;

use crate::error::FreezeError;

/// A single frequency bin in polar form.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarBin {
    pub mag: f32,
    /// Phase in radians, normally within (-π, π].
    pub phase: f32,
}

impl PolarBin {
    /// Create a new polar bin.
    pub fn new(mag: f32, phase: f32) -> Self {
        Self { mag, phase }
    }
}

/// One analysis frame: the interior bins of a real FFT in polar form, plus
/// the phaseless DC and Nyquist terms.
///
/// A real FFT of size `N` yields `N / 2 + 1` complex values; the frame holds
/// the `N / 2 - 1` bins between DC and Nyquist.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpectralFrame {
    pub bins: Vec<PolarBin>,
    /// Signed DC component.
    pub dc: f32,
    /// Signed Nyquist component.
    pub nyquist: f32,
}

impl SpectralFrame {
    /// Create a zeroed frame with `bin_count` interior bins.
    pub fn with_bins(bin_count: usize) -> Self {
        Self {
            bins: vec![PolarBin::default(); bin_count],
            dc: 0.0,
            nyquist: 0.0,
        }
    }

    /// Create a frame from explicit parts.
    pub fn from_parts(bins: Vec<PolarBin>, dc: f32, nyquist: f32) -> Self {
        Self { bins, dc, nyquist }
    }

    /// Number of interior bins (DC and Nyquist excluded).
    #[inline]
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    /// Build a frame from a half spectrum `[DC, bin 1, .., bin N/2-1, Nyquist]`.
    ///
    /// # Errors
    /// Returns [`FreezeError::SpectrumLength`] if fewer than two values are given.
    pub fn from_spectrum(spectrum: &[Complex<f32>]) -> Result<Self, FreezeError> {
        if spectrum.len() < 2 {
            return Err(FreezeError::SpectrumLength {
                expected: 2,
                provided: spectrum.len(),
            });
        }
        let mut frame = Self::with_bins(spectrum.len() - 2);
        frame.load_spectrum(spectrum)?;
        Ok(frame)
    }

    /// Refresh this frame in place from a half spectrum. Does not allocate.
    ///
    /// # Errors
    /// Returns [`FreezeError::SpectrumLength`] unless `spectrum.len()` is
    /// `bin_count() + 2`.
    pub fn load_spectrum(&mut self, spectrum: &[Complex<f32>]) -> Result<(), FreezeError> {
        let expected = self.bins.len() + 2;
        if spectrum.len() != expected {
            return Err(FreezeError::SpectrumLength {
                expected,
                provided: spectrum.len(),
            });
        }
        self.dc = spectrum[0].re;
        self.nyquist = spectrum[expected - 1].re;
        for (bin, c) in self.bins.iter_mut().zip(&spectrum[1..expected - 1]) {
            bin.mag = c.norm();
            bin.phase = c.arg();
        }
        Ok(())
    }

    /// Write this frame back into a half spectrum. DC and Nyquist are real.
    ///
    /// # Errors
    /// Returns [`FreezeError::SpectrumLength`] unless `spectrum.len()` is
    /// `bin_count() + 2`.
    pub fn store_spectrum(&self, spectrum: &mut [Complex<f32>]) -> Result<(), FreezeError> {
        let expected = self.bins.len() + 2;
        if spectrum.len() != expected {
            return Err(FreezeError::SpectrumLength {
                expected,
                provided: spectrum.len(),
            });
        }
        spectrum[0] = Complex::new(self.dc, 0.0);
        spectrum[expected - 1] = Complex::new(self.nyquist, 0.0);
        for (c, bin) in spectrum[1..expected - 1].iter_mut().zip(&self.bins) {
            *c = Complex::from_polar(bin.mag, bin.phase);
        }
        Ok(())
    }
}
