//! Additive harmonic pluck
//!
//! Fundamental plus three harmonics, each at half the weight of the one
//! below, under the same exponential decay as the string model.

use std::f64::consts::PI;

use super::envelope::{Envelope, TimeAxis};
use super::SynthParams;
use crate::error::PluckResult;

/// Relative weights of harmonics 1 through 4
pub const HARMONIC_WEIGHTS: [f64; 4] = [1.0, 0.5, 0.25, 0.125];

/// Un-enveloped harmonic stack at time `t`
pub fn harmonic_stack(frequency: f64, amplitude: f64, t: f64) -> f64 {
    HARMONIC_WEIGHTS
        .iter()
        .enumerate()
        .map(|(k, weight)| {
            let harmonic = (k + 1) as f64;
            amplitude * weight * (2.0 * PI * harmonic * frequency * t).sin()
        })
        .sum()
}

/// Render an additive note as floating-point samples
///
/// Fully deterministic: identical parameters give identical output.
pub fn render(params: &SynthParams) -> PluckResult<Vec<f64>> {
    params.validate()?;

    let n = params.n_samples();
    let mut buffer: Vec<f64> = (0..n)
        .map(|i| {
            let t = TimeAxis::HalfOpen.time_at(i, n, params.duration);
            harmonic_stack(params.frequency, params.amplitude, t)
        })
        .collect();
    Envelope::pluck().apply(&mut buffer, params.duration, TimeAxis::HalfOpen);

    Ok(buffer)
}
