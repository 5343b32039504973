//! Waveform synthesis for plucked-string tones
//!
//! Two algorithms render a note to floating-point samples: the Karplus-Strong
//! string model and an additive harmonic stack. Both share the same decay
//! envelope and 16-bit quantization.

pub mod additive;
mod buffer;
mod envelope;
pub mod karplus;
mod params;

pub use buffer::{quantize, SampleBuffer, FULL_SCALE};
pub use envelope::{Envelope, TimeAxis};
pub use karplus::Boundary;
pub use params::{SynthParams, DEFAULT_AMPLITUDE, DEFAULT_SAMPLE_RATE};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::PluckResult;

/// Which waveform generator renders a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Noise burst through an averaging delay line
    #[default]
    KarplusStrong,
    /// Fundamental plus three halving harmonics
    Additive,
}

/// Renders notes with a fixed algorithm, sample rate, and amplitude
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Synth {
    algorithm: Algorithm,
    boundary: Boundary,
    sample_rate: u32,
    amplitude: f64,
}

impl Synth {
    /// A synth at the default sample rate and amplitude
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            boundary: Boundary::default(),
            sample_rate: DEFAULT_SAMPLE_RATE,
            amplitude: DEFAULT_AMPLITUDE,
        }
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Set how the string model reads before the start of its buffer
    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Parameters for one note at this synth's settings
    pub fn params(&self, frequency: f64, duration: f64) -> SynthParams {
        SynthParams::new(frequency, duration)
            .with_sample_rate(self.sample_rate)
            .with_amplitude(self.amplitude)
    }

    /// Render a note without quantizing
    ///
    /// `rng` feeds the Karplus-Strong noise burst and is untouched by the
    /// additive algorithm.
    pub fn render<R: Rng + ?Sized>(
        &self,
        frequency: f64,
        duration: f64,
        rng: &mut R,
    ) -> PluckResult<Vec<f64>> {
        synthesize_raw(&self.params(frequency, duration), self.algorithm, self.boundary, rng)
    }

    /// Render a note to 16-bit PCM
    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        frequency: f64,
        duration: f64,
        rng: &mut R,
    ) -> PluckResult<SampleBuffer> {
        let samples = self.render(frequency, duration, rng)?;
        tracing::debug!(
            frequency,
            duration,
            algorithm = ?self.algorithm,
            samples = samples.len(),
            "synthesized note"
        );
        Ok(SampleBuffer::from_f64(&samples, self.sample_rate))
    }
}

impl Default for Synth {
    fn default() -> Self {
        Self::new(Algorithm::default())
    }
}

/// Render one tone with the chosen algorithm, without quantizing
pub fn synthesize_raw<R: Rng + ?Sized>(
    params: &SynthParams,
    algorithm: Algorithm,
    boundary: Boundary,
    rng: &mut R,
) -> PluckResult<Vec<f64>> {
    match algorithm {
        Algorithm::KarplusStrong => karplus::render(params, boundary, rng),
        Algorithm::Additive => additive::render(params),
    }
}

/// Render one tone with the chosen algorithm to 16-bit PCM
pub fn synthesize<R: Rng + ?Sized>(
    params: &SynthParams,
    algorithm: Algorithm,
    rng: &mut R,
) -> PluckResult<SampleBuffer> {
    let samples = synthesize_raw(params, algorithm, Boundary::default(), rng)?;
    Ok(SampleBuffer::from_f64(&samples, params.sample_rate))
}
