//! Karplus-Strong plucked string
//!
//! A burst of bipolar noise one period long is recirculated through a
//! two-point averaging delay line. The averaging acts as a low-pass filter,
//! so the tone darkens and decays the way a real string does.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::envelope::{Envelope, TimeAxis};
use super::SynthParams;
use crate::error::PluckResult;

/// What the delay line reads one sample before the start of the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    /// Read silence
    #[default]
    Silent,
    /// Read the last slot of the buffer, as negative array indexing would
    Wrap,
}

/// Run the string model without envelope or quantization
///
/// The first `min(period, n_samples)` samples are `±amplitude` noise drawn
/// from `rng`; every later sample averages the samples `period` and
/// `period + 1` steps back. Each step depends on earlier output, so the loop
/// is strictly sequential.
pub fn pluck_string<R: Rng + ?Sized>(
    period: usize,
    n_samples: usize,
    amplitude: f64,
    boundary: Boundary,
    rng: &mut R,
) -> Vec<f64> {
    let mut buffer = vec![0.0; n_samples];

    let burst = period.min(n_samples);
    for sample in &mut buffer[..burst] {
        *sample = if rng.gen_bool(0.5) { amplitude } else { -amplitude };
    }

    for i in period..n_samples {
        let behind = match (i - period).checked_sub(1) {
            Some(j) => buffer[j],
            None => match boundary {
                Boundary::Silent => 0.0,
                Boundary::Wrap => buffer[n_samples - 1],
            },
        };
        buffer[i] = 0.5 * (buffer[i - period] + behind);
    }

    buffer
}

/// Render a plucked note as floating-point samples with the decay envelope
pub fn render<R: Rng + ?Sized>(
    params: &SynthParams,
    boundary: Boundary,
    rng: &mut R,
) -> PluckResult<Vec<f64>> {
    params.validate()?;

    let mut buffer = pluck_string(
        params.period(),
        params.n_samples(),
        params.amplitude,
        boundary,
        rng,
    );
    Envelope::pluck().apply(&mut buffer, params.duration, TimeAxis::Closed);

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Always draws the positive half of the burst
    fn all_positive() -> StepRng {
        StepRng::new(0, 0)
    }

    #[test]
    fn test_burst_is_bipolar() {
        let mut rng = Pcg32::seed_from_u64(7);
        let buffer = pluck_string(100, 1000, 0.5, Boundary::Silent, &mut rng);

        assert!(buffer[..100].iter().all(|&s| s == 0.5 || s == -0.5));
        assert!(buffer[..100].iter().any(|&s| s > 0.0));
        assert!(buffer[..100].iter().any(|&s| s < 0.0));
    }

    #[test]
    fn test_recurrence_with_constant_burst() {
        let buffer = pluck_string(4, 12, 0.5, Boundary::Silent, &mut all_positive());

        assert_eq!(&buffer[..4], &[0.5; 4]);
        // First step averages against the silent boundary
        assert_eq!(buffer[4], 0.25);
        assert_eq!(buffer[5], 0.5);
        for i in 5..12 {
            assert_eq!(buffer[i], 0.5 * (buffer[i - 4] + buffer[i - 5]));
        }
    }

    #[test]
    fn test_wrap_reads_unwritten_tail() {
        // The tail slot is still zero when the first step reads it
        let silent = pluck_string(4, 12, 0.5, Boundary::Silent, &mut all_positive());
        let wrapped = pluck_string(4, 12, 0.5, Boundary::Wrap, &mut all_positive());
        assert_eq!(silent, wrapped);
    }

    #[test]
    fn test_burst_longer_than_buffer() {
        let buffer = pluck_string(50, 10, 0.5, Boundary::Wrap, &mut all_positive());
        assert_eq!(buffer, vec![0.5; 10]);
    }

    #[test]
    fn test_seeded_render_is_reproducible() {
        let params = SynthParams::new(220.0, 0.5);
        let a = render(&params, Boundary::Silent, &mut Pcg32::seed_from_u64(42)).unwrap();
        let b = render(&params, Boundary::Silent, &mut Pcg32::seed_from_u64(42)).unwrap();
        let c = render(&params, Boundary::Silent, &mut Pcg32::seed_from_u64(43)).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_render_applies_envelope() {
        let params = SynthParams::new(441.0, 1.0);
        let buffer = render(&params, Boundary::Silent, &mut all_positive()).unwrap();

        assert_eq!(buffer.len(), 44100);
        assert_eq!(buffer[0], 0.5);
        // Last sample sits at t = duration on the closed axis
        let last = buffer[buffer.len() - 1];
        let raw = pluck_string(100, 44100, 0.5, Boundary::Silent, &mut all_positive());
        assert!((last - raw[44099] * (-3.0_f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_render_validates() {
        let params = SynthParams::new(-1.0, 1.0);
        assert!(render(&params, Boundary::Silent, &mut all_positive()).is_err());
    }
}
