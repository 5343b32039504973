//! Playback engine
//!
//! Turns notes and chords into buffers and hands them to a sink: an audio
//! device, a WAV file, or anything else that accepts 16-bit PCM.

mod mixer;
mod player;
mod recorder;

pub use mixer::{mix_chord, normalize, Mixer};
pub use player::{default_device_name, list_output_devices, DeviceSink};
pub use recorder::WavSink;

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::error::{PluckError, PluckResult};
use crate::music::{Chord, Note};
use crate::synth::{SampleBuffer, Synth};

/// Destination for finished sample buffers
pub trait Sink {
    /// Play one buffer to completion before returning
    fn play(&mut self, buffer: &SampleBuffer) -> PluckResult<()>;
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn play(&mut self, buffer: &SampleBuffer) -> PluckResult<()> {
        (**self).play(buffer)
    }
}

/// Plays notes, chords and progressions through a sink
pub struct Performer<R = Pcg32> {
    mixer: Mixer,
    rng: R,
}

impl Performer<Pcg32> {
    /// A performer whose noise bursts are reproducible from `seed`
    pub fn seeded(synth: Synth, seed: u64) -> Self {
        Self::new(synth, Pcg32::seed_from_u64(seed))
    }

    /// A performer seeded from the operating system
    pub fn from_entropy(synth: Synth) -> Self {
        Self::new(synth, Pcg32::from_entropy())
    }
}

impl<R: Rng> Performer<R> {
    /// Create a performer drawing randomness from `rng`
    pub fn new(synth: Synth, rng: R) -> Self {
        Self {
            mixer: Mixer::new(synth),
            rng,
        }
    }

    pub fn synth(&self) -> &Synth {
        self.mixer.synth()
    }

    /// Synthesize a single note and play it
    pub fn play_note<S: Sink + ?Sized>(
        &mut self,
        sink: &mut S,
        note: &Note,
        duration: f64,
    ) -> PluckResult<()> {
        let buffer = self
            .mixer
            .synth()
            .synthesize(note.frequency(), duration, &mut self.rng)?;
        tracing::info!("Playing note: {}", note);
        sink.play(&buffer)
    }

    /// Mix a chord and play it
    pub fn play_chord<S: Sink + ?Sized>(
        &mut self,
        sink: &mut S,
        chord: &Chord,
        duration: f64,
    ) -> PluckResult<()> {
        let buffer = self.mixer.mix(chord, duration, &mut self.rng)?;
        tracing::info!("Playing chord: {}", chord.name());
        sink.play(&buffer)?;
        tracing::info!("Finished playing chord: {}", chord.name());
        Ok(())
    }

    /// Play each chord once, in order; returns the number of chords played
    pub fn play_progression<S: Sink + ?Sized>(
        &mut self,
        sink: &mut S,
        progression: &[Chord],
        chord_duration: f64,
    ) -> PluckResult<usize> {
        for chord in progression {
            self.play_chord(sink, chord, chord_duration)?;
        }
        Ok(progression.len())
    }

    /// Repeat the whole progression until `run_for` has elapsed
    ///
    /// The clock is only checked between passes, so the last pass always
    /// finishes. Returns the number of chords played.
    pub fn perform<S: Sink + ?Sized>(
        &mut self,
        sink: &mut S,
        progression: &[Chord],
        chord_duration: f64,
        run_for: Duration,
    ) -> PluckResult<usize> {
        if progression.is_empty() {
            return Err(PluckError::invalid("progression", "needs at least one chord"));
        }

        let start = Instant::now();
        let mut played = 0;
        while start.elapsed() < run_for {
            played += self.play_progression(sink, progression, chord_duration)?;
        }

        tracing::info!("Finished playing chord progression");
        Ok(played)
    }
}
