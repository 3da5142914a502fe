//! Stateless phase and smoothing helpers shared by the engines.

use std::f32::consts::PI;

/// One full turn in radians.
pub const TWO_PI: f32 = 2.0 * PI;

/// `ln(0.001)`: the decay target used for lag coefficients (-60 dB).
pub const LOG_001: f32 = -6.907_755_3;

/// Signed shortest-path difference `phase1 - phase2`, in (-π, π].
///
/// Inputs are expected in [-π, π], so a single ±2π correction is enough.
#[inline]
pub fn phase_minus(phase1: f32, phase2: f32) -> f32 {
    let dif = phase1 - phase2;
    if dif <= -PI {
        dif + TWO_PI
    } else if dif > PI {
        dif - TWO_PI
    } else {
        dif
    }
}

/// Wraps any finite phase into (-π, π].
#[inline]
pub fn wrap_phase(phase: f32) -> f32 {
    let wrapped = phase - ((phase + PI) / TWO_PI).floor() * TWO_PI;
    if wrapped <= -PI {
        wrapped + TWO_PI
    } else {
        wrapped
    }
}

/// One-pole blend from `input` toward `held` by `coeff`.
///
/// `coeff = 0` returns `input`, `coeff = 1` returns `held`. Values outside
/// 0..1 extrapolate.
#[inline]
pub fn interpolate(input: f32, held: f32, coeff: f32) -> f32 {
    (held - input) * coeff + input
}

/// Picks `attack` when `input` rises above `held`, `decay` otherwise.
#[inline]
pub fn select_coefficient(input: f32, held: f32, attack: f32, decay: f32) -> f32 {
    if input > held {
        attack
    } else {
        decay
    }
}

/// Direction-dependent [`interpolate`], as in an envelope follower.
#[inline]
pub fn interpolate_up_down(input: f32, held: f32, attack: f32, decay: f32) -> f32 {
    interpolate(input, held, select_coefficient(input, held, attack, decay))
}

/// Per-frame coefficient that decays to 0.1% after `time_secs` at `frame_rate`.
///
/// `coeff = exp(ln(0.001) / (time_secs * frame_rate))`. A non-positive or NaN
/// product saturates to 0 (instant response); an infinite one yields 1.
pub fn lag_coefficient(time_secs: f32, frame_rate: f32) -> f32 {
    let frames = time_secs * frame_rate;
    if !(frames > 0.0) {
        return 0.0;
    }
    (LOG_001 / frames).exp()
}

/// Inverse of [`lag_coefficient`]: the time in seconds that produces `coeff`.
///
/// Returns 0 for `coeff <= 0` and infinity for `coeff >= 1`.
pub fn lag_time_for_coefficient(coeff: f32, frame_rate: f32) -> f32 {
    if coeff <= 0.0 {
        return 0.0;
    }
    if coeff >= 1.0 {
        return f32::INFINITY;
    }
    LOG_001 / (coeff.ln() * frame_rate)
}
