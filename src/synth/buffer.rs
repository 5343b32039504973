//! 16-bit PCM sample buffers

/// Full-scale value used when converting floating-point audio to 16-bit
pub const FULL_SCALE: f64 = 32767.0;

/// Convert a sample in roughly `[-1, 1]` to 16-bit PCM
///
/// Scales first, then truncates toward zero. Values beyond the type's range
/// saturate instead of wrapping.
pub fn quantize(sample: f64) -> i16 {
    (sample * FULL_SCALE).clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

/// Mono 16-bit PCM audio at a fixed sample rate
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Wrap already-quantized samples
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// A buffer of `len` zero samples
    pub fn silence(len: usize, sample_rate: u32) -> Self {
        Self::new(vec![0; len], sample_rate)
    }

    /// Quantize floating-point samples with [`quantize`]
    pub fn from_f64(samples: &[f64], sample_rate: u32) -> Self {
        Self::new(samples.iter().copied().map(quantize).collect(), sample_rate)
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Playback length in seconds
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Largest absolute sample value
    pub fn peak(&self) -> u16 {
        self.samples
            .iter()
            .map(|s| s.unsigned_abs())
            .max()
            .unwrap_or(0)
    }

    /// Root-mean-square level of the samples in `range`
    pub fn rms(&self, range: std::ops::Range<usize>) -> f64 {
        let window = &self.samples[range];
        if window.is_empty() {
            return 0.0;
        }
        let sum: f64 = window.iter().map(|&s| (s as f64) * (s as f64)).sum();
        (sum / window.len() as f64).sqrt()
    }

    /// Whether every sample is zero
    pub fn is_silent(&self) -> bool {
        self.samples.iter().all(|&s| s == 0)
    }
}
