#![allow(dead_code)]

use std::f32::consts::PI;

use pvfreeze::{PolarBin, SpectralFrame};
use rustfft::{num_complex::Complex, FftPlanner};

pub const SAMPLE_RATE: u32 = 44_100;
pub const FFT_SIZE: usize = 1024;
pub const HOP_SIZE: usize = 256;

pub fn gen_sine(freq_hz: f32, sr: u32, n: usize, amp: f32) -> Vec<f32> {
    (0..n)
        .map(|i| amp * (2.0 * PI * freq_hz * i as f32 / sr as f32).sin())
        .collect()
}

pub fn hann(len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / len as f32).cos()))
        .collect()
}

/// Half spectra (`fft_size / 2 + 1` values) of successive Hann-windowed hops.
pub fn analyze(signal: &[f32], fft_size: usize, hop: usize) -> Vec<Vec<Complex<f32>>> {
    let window = hann(fft_size);
    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(fft_size);
    let mut buffer = vec![Complex::new(0.0, 0.0); fft_size];

    let mut spectra = Vec::new();
    let mut pos = 0;
    while pos + fft_size <= signal.len() {
        for (i, c) in buffer.iter_mut().enumerate() {
            *c = Complex::new(signal[pos + i] * window[i], 0.0);
        }
        fft.process(&mut buffer);
        spectra.push(buffer[..=fft_size / 2].to_vec());
        pos += hop;
    }
    spectra
}

/// Rebuilds a real time-domain frame from a half spectrum.
pub fn synthesize(half: &[Complex<f32>]) -> Vec<f32> {
    let fft_size = (half.len() - 1) * 2;
    let mut buffer = vec![Complex::new(0.0, 0.0); fft_size];
    buffer[..half.len()].copy_from_slice(half);
    for k in 1..fft_size / 2 {
        buffer[fft_size - k] = half[k].conj();
    }
    let mut planner = FftPlanner::<f32>::new();
    planner.plan_fft_inverse(fft_size).process(&mut buffer);
    let norm = 1.0 / fft_size as f32;
    buffer.iter().map(|c| c.re * norm).collect()
}

pub fn sine_frames(freq_hz: f32, count: usize) -> Vec<SpectralFrame> {
    let len = FFT_SIZE + HOP_SIZE * (count - 1);
    let signal = gen_sine(freq_hz, SAMPLE_RATE, len, 0.5);
    analyze(&signal, FFT_SIZE, HOP_SIZE)
        .iter()
        .map(|half| SpectralFrame::from_spectrum(half).expect("valid half spectrum"))
        .collect()
}

pub fn flat_frame(bins: usize, mag: f32, phase: f32) -> SpectralFrame {
    SpectralFrame::from_parts(vec![PolarBin::new(mag, phase); bins], mag, mag)
}

pub fn frame_from(mags: &[f32], phases: &[f32], dc: f32, nyquist: f32) -> SpectralFrame {
    let bins = mags
        .iter()
        .zip(phases)
        .map(|(&m, &p)| PolarBin::new(m, p))
        .collect();
    SpectralFrame::from_parts(bins, dc, nyquist)
}

/// Smallest absolute angle between two phases.
pub fn angular_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).rem_euclid(2.0 * PI);
    d.min(2.0 * PI - d)
}

pub fn peak_bin(frame: &SpectralFrame) -> usize {
    frame
        .bins
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.mag.total_cmp(&b.1.mag))
        .map(|(i, _)| i)
        .unwrap_or(0)
}
