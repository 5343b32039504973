//! Chord mixer
//!
//! Renders every note of a chord with the same synth, sums them in floating
//! point, and normalizes the sum so its loudest sample sits at full scale.

use rand::Rng;

use crate::error::{PluckError, PluckResult};
use crate::music::{Chord, Note};
use crate::synth::{quantize, SampleBuffer, Synth};

/// Mixes notes into a single normalized 16-bit buffer
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Mixer {
    synth: Synth,
}

impl Mixer {
    /// Create a mixer that renders notes with `synth`
    pub fn new(synth: Synth) -> Self {
        Self { synth }
    }

    pub fn synth(&self) -> &Synth {
        &self.synth
    }

    /// Mix a chord's notes
    pub fn mix<R: Rng + ?Sized>(
        &self,
        chord: &Chord,
        duration: f64,
        rng: &mut R,
    ) -> PluckResult<SampleBuffer> {
        self.mix_notes(chord.notes(), duration, rng)
    }

    /// Mix an ordered, non-empty list of notes
    ///
    /// Notes draw from `rng` in order, so a seeded generator reproduces the
    /// same mix.
    pub fn mix_notes<R: Rng + ?Sized>(
        &self,
        notes: &[Note],
        duration: f64,
        rng: &mut R,
    ) -> PluckResult<SampleBuffer> {
        if notes.is_empty() {
            return Err(PluckError::invalid("notes", "cannot mix an empty chord"));
        }

        let mut accumulator: Vec<f64> = Vec::new();
        for note in notes {
            let samples = self.synth.render(note.frequency(), duration, rng)?;
            if accumulator.is_empty() {
                accumulator = samples;
            } else {
                add_into(&mut accumulator, &samples);
            }
        }

        Ok(normalize(&accumulator, self.synth.sample_rate()))
    }
}

/// Sum `samples` into `accumulator`, sample by sample
fn add_into(accumulator: &mut [f64], samples: &[f64]) {
    for (acc, sample) in accumulator.iter_mut().zip(samples) {
        *acc += sample;
    }
}

/// Scale a mix so its peak is at full scale, then quantize
///
/// An all-zero mix has no peak to scale by and comes back as silence.
pub fn normalize(mix: &[f64], sample_rate: u32) -> SampleBuffer {
    let peak = mix.iter().fold(0.0_f64, |peak, s| peak.max(s.abs()));
    if peak == 0.0 {
        tracing::debug!(samples = mix.len(), "mix is silent, skipping normalization");
        return SampleBuffer::silence(mix.len(), sample_rate);
    }

    SampleBuffer::new(mix.iter().map(|s| quantize(s / peak)).collect(), sample_rate)
}

/// Mix notes with a one-off mixer
pub fn mix_chord<R: Rng + ?Sized>(
    synth: &Synth,
    notes: &[Note],
    duration: f64,
    rng: &mut R,
) -> PluckResult<SampleBuffer> {
    Mixer::new(*synth).mix_notes(notes, duration, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::Algorithm;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const ALGORITHMS: [Algorithm; 2] = [Algorithm::KarplusStrong, Algorithm::Additive];

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(99)
    }

    fn note(name: &str, frequency: f64) -> Note {
        Note::new(name, frequency).unwrap()
    }

    #[test]
    fn test_two_note_example() {
        for algorithm in ALGORITHMS {
            let notes = [note("A3", 220.0), note("A4", 440.0)];
            let buffer = mix_chord(&Synth::new(algorithm), &notes, 0.5, &mut rng()).unwrap();

            assert_eq!(buffer.len(), 22050);
            assert_eq!(buffer.peak(), 32767);
            assert!(buffer.samples().iter().all(|&s| s >= -32767));
        }
    }

    #[test]
    fn test_progression_chords_normalize_to_full_scale() {
        let mixer = Mixer::new(Synth::default());
        let mut rng = rng();
        for chord in crate::music::default_progression() {
            let buffer = mixer.mix(&chord, 2.0, &mut rng).unwrap();
            assert_eq!(buffer.len(), 88200);
            assert_eq!(buffer.peak(), 32767, "{} did not reach full scale", chord.name());
        }
    }

    #[test]
    fn test_empty_chord_rejected() {
        let err = Mixer::default().mix_notes(&[], 1.0, &mut rng()).unwrap_err();
        assert!(matches!(err, PluckError::InvalidParameter { .. }));
    }

    #[test]
    fn test_bad_duration_rejected() {
        let notes = [note("A4", 440.0)];
        assert!(Mixer::default().mix_notes(&notes, 0.0, &mut rng()).is_err());
    }

    #[test]
    fn test_silent_mix_yields_zeros() {
        let buffer = normalize(&[0.0; 64], 44100);
        assert_eq!(buffer.len(), 64);
        assert!(buffer.is_silent());
    }

    #[test]
    fn test_normalize_scales_to_peak() {
        let buffer = normalize(&[0.25, -0.5, 0.125], 8000);
        assert_eq!(buffer.samples(), &[16383, -32767, 8191]);
        assert_eq!(buffer.sample_rate(), 8000);
    }

    #[test]
    fn test_single_note_mix_is_proportional() {
        for algorithm in ALGORITHMS {
            let synth = Synth::new(algorithm);
            let alone = synth.synthesize(220.0, 0.5, &mut rng()).unwrap();
            let raw = synth.render(220.0, 0.5, &mut rng()).unwrap();
            let mixed = mix_chord(&synth, &[note("A3", 220.0)], 0.5, &mut rng()).unwrap();

            assert_eq!(mixed.len(), alone.len());
            assert_eq!(mixed.peak(), 32767);

            let peak = raw.iter().fold(0.0_f64, |p, s| p.max(s.abs()));
            let scale = 1.0 / peak;
            for (&m, &a) in mixed.samples().iter().zip(alone.samples()) {
                assert!(m == 0 || a == 0 || m.signum() == a.signum());
                assert!((m as f64 - a as f64 * scale).abs() <= scale + 1.0);
            }
        }
    }

    #[test]
    fn test_mix_is_reproducible_with_seed() {
        let notes = [note("C3", 130.81), note("E4", 329.63), note("G4", 392.0)];
        let a = mix_chord(&Synth::default(), &notes, 0.5, &mut rng()).unwrap();
        let b = mix_chord(&Synth::default(), &notes, 0.5, &mut rng()).unwrap();
        assert_eq!(a, b);
    }
}
