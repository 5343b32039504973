//! Validated parameters for rendering a single tone

use crate::error::{PluckError, PluckResult};

/// Sample rate used everywhere unless configured otherwise
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Peak amplitude of a single plucked note
pub const DEFAULT_AMPLITUDE: f64 = 0.5;

/// Everything needed to render one tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthParams {
    /// Fundamental frequency in Hz
    pub frequency: f64,
    /// Length in seconds
    pub duration: f64,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Peak amplitude in (0, 1]
    pub amplitude: f64,
}

impl SynthParams {
    /// Parameters at the default sample rate and amplitude
    pub fn new(frequency: f64, duration: f64) -> Self {
        Self {
            frequency,
            duration,
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

    /// Number of output samples, `floor(sample_rate * duration)`
    pub fn n_samples(&self) -> usize {
        (self.sample_rate as f64 * self.duration) as usize
    }

    /// Samples in one cycle of the fundamental, `floor(sample_rate / frequency)`
    pub fn period(&self) -> usize {
        (self.sample_rate as f64 / self.frequency) as usize
    }

    /// Highest frequency that can be rendered at this sample rate
    pub fn nyquist(&self) -> f64 {
        self.sample_rate as f64 / 2.0
    }

    /// Check every field, failing on the first bad one
    pub fn validate(&self) -> PluckResult<()> {
        if self.sample_rate == 0 {
            return Err(PluckError::invalid("sample_rate", "must be positive"));
        }
        if !self.frequency.is_finite() || self.frequency <= 0.0 {
            return Err(PluckError::invalid(
                "frequency",
                format!("must be positive, got {}", self.frequency),
            ));
        }
        if self.frequency > self.nyquist() {
            return Err(PluckError::invalid(
                "frequency",
                format!(
                    "{} Hz is above the Nyquist frequency of {} Hz",
                    self.frequency,
                    self.nyquist()
                ),
            ));
        }
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(PluckError::invalid(
                "duration",
                format!("must be positive, got {}", self.duration),
            ));
        }
        if self.n_samples() == 0 {
            return Err(PluckError::invalid(
                "duration",
                format!(
                    "{} s is shorter than one sample at {} Hz",
                    self.duration, self.sample_rate
                ),
            ));
        }
        if !self.amplitude.is_finite() || self.amplitude <= 0.0 || self.amplitude > 1.0 {
            return Err(PluckError::invalid(
                "amplitude",
                format!("must be in (0, 1], got {}", self.amplitude),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = SynthParams::new(440.0, 1.0);
        assert_eq!(params.sample_rate, 44100);
        assert_eq!(params.amplitude, 0.5);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_sample_counts() {
        let params = SynthParams::new(440.0, 0.5);
        assert_eq!(params.n_samples(), 22050);
        assert_eq!(params.period(), 100);

        let params = SynthParams::new(130.81, 2.0);
        assert_eq!(params.n_samples(), 88200);
        assert_eq!(params.period(), 337);
    }

    #[test]
    fn test_rejects_bad_frequency() {
        assert!(SynthParams::new(0.0, 1.0).validate().is_err());
        assert!(SynthParams::new(-440.0, 1.0).validate().is_err());
        assert!(SynthParams::new(f64::INFINITY, 1.0).validate().is_err());
        assert!(SynthParams::new(30000.0, 1.0).validate().is_err());
        assert!(SynthParams::new(22050.0, 1.0).validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_duration() {
        assert!(SynthParams::new(440.0, 0.0).validate().is_err());
        assert!(SynthParams::new(440.0, -1.0).validate().is_err());
        assert!(SynthParams::new(440.0, f64::NAN).validate().is_err());
        // Less than one sample long
        assert!(SynthParams::new(440.0, 1e-6).validate().is_err());
    }

    #[test]
    fn test_rejects_bad_amplitude() {
        let params = SynthParams::new(440.0, 1.0);
        assert!(params.with_amplitude(0.0).validate().is_err());
        assert!(params.with_amplitude(1.5).validate().is_err());
        assert!(params.with_amplitude(1.0).validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_sample_rate() {
        let err = SynthParams::new(440.0, 1.0)
            .with_sample_rate(0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("sample_rate"));
    }
}
