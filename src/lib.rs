#![forbid(unsafe_code)]
//! Spectral freeze and attack/decay lag for phase-vocoder frames.
//!
//! `pvfreeze` smooths a stream of STFT analysis frames bin by bin. Each
//! engine keeps a held copy of its previous output and blends every incoming
//! frame toward it, in place:
//!
//! - [`FreezeEngine`] uses one continuous freeze amount (0 = pass-through,
//!   1 = fully held).
//! - [`LagEngine`] uses separate attack and decay times, choosing per bin by
//!   whether the magnitude is rising or falling.
//!
//! Both smooth the *rate* of phase change rather than the phase itself, so a
//! partially frozen spectrum keeps advancing coherently.
//!
//! Analysis, resynthesis and windowing belong to the host. Frames are
//! exchanged as [`SpectralFrame`]s, which can be loaded from and stored back
//! into a half complex spectrum.
//!
//! # Quick Start
//!
//! ```
//! use pvfreeze::{FreezeEngine, SpectralFrame, Stage};
//! use rustfft::num_complex::Complex;
//!
//! // Half spectrum of a 16-point real FFT: DC, 7 bins, Nyquist.
//! let spectrum: Vec<Complex<f32>> = (0..9)
//!     .map(|k| Complex::from_polar(1.0, 0.1 * k as f32))
//!     .collect();
//!
//! let mut engine = FreezeEngine::new();
//! engine.activate(7).unwrap();
//!
//! let mut frame = SpectralFrame::with_bins(7);
//! let mut out = spectrum.clone();
//! for _ in 0..3 {
//!     frame.load_spectrum(&spectrum).unwrap();
//!     engine.process(&mut frame, 0.75).unwrap();
//!     frame.store_spectrum(&mut out).unwrap();
//! }
//! assert_eq!(engine.stage(), Stage::Steady);
//! ```
//!
//! # Lifecycle
//!
//! Engines move through [`Stage::Empty`], [`Stage::Seeded`],
//! [`Stage::DeltaPrimed`] and [`Stage::Steady`], one stage per frame. The
//! first two frames pass through untouched; phase blending starts on the
//! fourth. All allocation happens on activation, never while processing.

pub mod core;
pub mod engine;
pub mod error;

pub use crate::core::config::{read_config_json, write_config_json, EngineConfig};
pub use crate::core::frame::{PolarBin, SpectralFrame};
pub use engine::{FreezeEngine, LagCoefficients, LagEngine, Stage};
pub use error::FreezeError;
