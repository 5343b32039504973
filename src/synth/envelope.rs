//! Exponential decay envelope
//!
//! Shapes a rendered note so it fades like a plucked string.

/// How sample times are laid out across a buffer of `n` samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeAxis {
    /// `n` points over `[0, duration]`, both ends included
    Closed,
    /// `n` points over `[0, duration)`, one sample period apart
    HalfOpen,
}

impl TimeAxis {
    /// Time in seconds of sample `index` in a buffer of `len` samples
    pub fn time_at(self, index: usize, len: usize, duration: f64) -> f64 {
        match self {
            TimeAxis::Closed if len > 1 => duration * index as f64 / (len - 1) as f64,
            TimeAxis::Closed => 0.0,
            TimeAxis::HalfOpen if len > 0 => duration * index as f64 / len as f64,
            TimeAxis::HalfOpen => 0.0,
        }
    }
}

/// Decay envelope `exp(-rate * t)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    rate: f64,
}

impl Envelope {
    /// Decay rate used for every pluck
    pub const PLUCK_RATE: f64 = 3.0;

    /// Create an envelope with the given decay rate (per second)
    pub fn new(rate: f64) -> Self {
        Self { rate: rate.max(0.0) }
    }

    /// The standard pluck envelope, `exp(-3t)`
    pub fn pluck() -> Self {
        Self::new(Self::PLUCK_RATE)
    }

    /// Decay rate per second
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Envelope level at time `t` seconds
    pub fn level(&self, t: f64) -> f64 {
        (-self.rate * t).exp()
    }

    /// Multiply every sample by the envelope level at its time
    pub fn apply(&self, samples: &mut [f64], duration: f64, axis: TimeAxis) {
        let len = samples.len();
        for (i, sample) in samples.iter_mut().enumerate() {
            *sample *= self.level(axis.time_at(i, len, duration));
        }
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::pluck()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_axis_hits_both_ends() {
        assert_eq!(TimeAxis::Closed.time_at(0, 5, 2.0), 0.0);
        assert_eq!(TimeAxis::Closed.time_at(4, 5, 2.0), 2.0);
        assert_eq!(TimeAxis::Closed.time_at(2, 5, 2.0), 1.0);
    }

    #[test]
    fn test_half_open_axis_stops_short() {
        assert_eq!(TimeAxis::HalfOpen.time_at(0, 4, 1.0), 0.0);
        assert_eq!(TimeAxis::HalfOpen.time_at(3, 4, 1.0), 0.75);
    }

    #[test]
    fn test_single_point_axis() {
        assert_eq!(TimeAxis::Closed.time_at(0, 1, 3.0), 0.0);
        assert_eq!(TimeAxis::HalfOpen.time_at(0, 1, 3.0), 0.0);
    }

    #[test]
    fn test_pluck_level() {
        let env = Envelope::pluck();
        assert_eq!(env.level(0.0), 1.0);
        assert!((env.level(1.0) - (-3.0_f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_apply_closed() {
        let env = Envelope::pluck();
        let mut samples = vec![1.0; 3];
        env.apply(&mut samples, 2.0, TimeAxis::Closed);

        assert_eq!(samples[0], 1.0);
        assert!((samples[1] - (-3.0_f64).exp()).abs() < 1e-12);
        assert!((samples[2] - (-6.0_f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_apply_is_monotonic() {
        let env = Envelope::pluck();
        let mut samples = vec![1.0; 1000];
        env.apply(&mut samples, 1.0, TimeAxis::HalfOpen);

        assert!(samples.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_negative_rate_clamped() {
        let env = Envelope::new(-5.0);
        assert_eq!(env.rate(), 0.0);
        assert_eq!(env.level(10.0), 1.0);
    }
}
