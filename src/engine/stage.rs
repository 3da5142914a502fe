//! Four-stage startup lifecycle shared by both engines.

use super::held::{BinCoefficient, HeldFrame};
use crate::core::frame::SpectralFrame;
use crate::error::FreezeError;

/// How many frames an engine has observed since activation.
///
/// The held phases and phase deltas only mean something once two frames
/// have been seen, so blending is deferred until [`Stage::Steady`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Nothing allocated yet.
    Empty,
    /// Held arrays allocated; the next frame becomes the seed.
    Seeded,
    /// Seed captured; the next frame primes the phase deltas.
    DeltaPrimed,
    /// Full magnitude, phase and DC/Nyquist blending.
    Steady,
}

impl Stage {
    /// The stage reached after processing one more frame.
    pub fn next(self) -> Stage {
        match self {
            Stage::Empty => Stage::Seeded,
            Stage::Seeded => Stage::DeltaPrimed,
            Stage::DeltaPrimed | Stage::Steady => Stage::Steady,
        }
    }
}

/// Lifecycle state carrying the held frame in every stage that has one.
#[derive(Debug, Default)]
pub(crate) enum Lifecycle {
    #[default]
    Empty,
    Seeded(HeldFrame),
    DeltaPrimed(HeldFrame),
    Steady(HeldFrame),
}

impl Lifecycle {
    pub(crate) fn stage(&self) -> Stage {
        match self {
            Lifecycle::Empty => Stage::Empty,
            Lifecycle::Seeded(_) => Stage::Seeded,
            Lifecycle::DeltaPrimed(_) => Stage::DeltaPrimed,
            Lifecycle::Steady(_) => Stage::Steady,
        }
    }

    pub(crate) fn held(&self) -> Option<&HeldFrame> {
        match self {
            Lifecycle::Empty => None,
            Lifecycle::Seeded(held) | Lifecycle::DeltaPrimed(held) | Lifecycle::Steady(held) => {
                Some(held)
            }
        }
    }

    /// Rejects a bin count that disagrees with the held arrays or, before
    /// allocation, with the pinned config.
    pub(crate) fn check_bin_count(
        &self,
        pinned: Option<usize>,
        provided: usize,
    ) -> Result<(), FreezeError> {
        check_pinned(self.held().map(HeldFrame::bin_count).or(pinned), provided)
    }

    /// Allocates (or reuses) held storage for `bin_count` bins and restarts at Seeded.
    pub(crate) fn activate(&mut self, bin_count: usize) {
        *self = match std::mem::take(self) {
            Lifecycle::Seeded(held) | Lifecycle::DeltaPrimed(held) | Lifecycle::Steady(held)
                if held.bin_count() == bin_count =>
            {
                log::debug!("restarting lifecycle with {} held bins", bin_count);
                Lifecycle::Seeded(held)
            }
            Lifecycle::Empty => {
                log::debug!("allocating held state for {} bins", bin_count);
                Lifecycle::Seeded(HeldFrame::allocate(bin_count))
            }
            previous => {
                log::debug!(
                    "reallocating held state: {} -> {} bins",
                    previous.held().map_or(0, HeldFrame::bin_count),
                    bin_count
                );
                Lifecycle::Seeded(HeldFrame::allocate(bin_count))
            }
        };
    }

    /// Returns to Seeded, keeping any allocation.
    pub(crate) fn reset(&mut self) {
        *self = match std::mem::take(self) {
            Lifecycle::Empty => Lifecycle::Empty,
            Lifecycle::Seeded(held) | Lifecycle::DeltaPrimed(held) | Lifecycle::Steady(held) => {
                Lifecycle::Seeded(held)
            }
        };
    }

    /// Releases the held storage.
    pub(crate) fn release(&mut self) {
        if let Some(held) = self.held() {
            log::debug!("releasing held state for {} bins", held.bin_count());
        }
        *self = Lifecycle::Empty;
    }

    /// Processes one frame and advances exactly one stage.
    ///
    /// The caller has already checked that the frame matches the held bin count.
    pub(crate) fn step<C: BinCoefficient>(&mut self, frame: &mut SpectralFrame, coeff: &C) {
        let before = self.stage();
        *self = match std::mem::take(self) {
            Lifecycle::Empty => Lifecycle::Seeded(HeldFrame::allocate(frame.bin_count())),
            Lifecycle::Seeded(mut held) => {
                held.seed(frame);
                Lifecycle::DeltaPrimed(held)
            }
            Lifecycle::DeltaPrimed(mut held) => {
                held.prime(frame, coeff);
                Lifecycle::Steady(held)
            }
            Lifecycle::Steady(mut held) => {
                held.blend(frame, coeff);
                Lifecycle::Steady(held)
            }
        };
        debug_assert_eq!(self.stage(), before.next());
    }
}

pub(crate) fn check_pinned(expected: Option<usize>, provided: usize) -> Result<(), FreezeError> {
    match expected {
        Some(expected) if expected != provided => {
            Err(FreezeError::BinCountMismatch { expected, provided })
        }
        _ => Ok(()),
    }
}
