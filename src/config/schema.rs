//! Configuration schema definitions

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::music::Chord;
use crate::synth::{Algorithm, Boundary, Synth, DEFAULT_AMPLITUDE, DEFAULT_SAMPLE_RATE};

/// Main configuration for Pluck
///
/// Every section is optional; an empty file reproduces the built-in demo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluckConfig {
    /// Audio output settings
    #[serde(default)]
    pub audio: AudioConfig,

    /// Synthesis settings
    #[serde(default)]
    pub synth: SynthConfig,

    /// Tempo and loop length
    #[serde(default)]
    pub performance: PerformanceConfig,

    /// Chords played by the demo, in order
    #[serde(default = "default_progression")]
    pub progression: Vec<ChordConfig>,
}

impl PluckConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Validate audio settings
        if self.audio.sample_rate < 8000 || self.audio.sample_rate > 192000 {
            bail!("Sample rate must be between 8000 and 192000");
        }
        let amplitude = self.audio.amplitude;
        if !amplitude.is_finite() || amplitude <= 0.0 || amplitude > 1.0 {
            bail!("Amplitude must be greater than 0.0 and at most 1.0");
        }

        // Validate performance settings
        let beat = self.performance.beat_duration;
        if !beat.is_finite() || beat <= 0.0 {
            bail!("Beat duration must be a positive number of seconds");
        }
        if self.performance.beats_per_chord == 0 {
            bail!("Beats per chord must be at least 1");
        }
        let loop_seconds = self.performance.loop_seconds;
        if !loop_seconds.is_finite() || loop_seconds < 0.0 {
            bail!("Loop seconds must be zero or more");
        }

        // Validate every chord parses
        self.chords()?;

        Ok(())
    }

    /// Build the synth described by this configuration
    pub fn synth(&self) -> Synth {
        Synth::new(self.synth.algorithm)
            .with_boundary(self.synth.boundary)
            .with_sample_rate(self.audio.sample_rate)
            .with_amplitude(self.audio.amplitude)
    }

    /// Parse the progression into chords
    pub fn chords(&self) -> Result<Vec<Chord>> {
        self.progression
            .iter()
            .map(|chord| {
                Chord::parse(&chord.name, &chord.notes)
                    .with_context(|| format!("Chord '{}' is invalid", chord.name))
            })
            .collect()
    }
}

impl Default for PluckConfig {
    fn default() -> Self {
        Self {
            audio: AudioConfig::default(),
            synth: SynthConfig::default(),
            performance: PerformanceConfig::default(),
            progression: default_progression(),
        }
    }
}

/// Audio output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Sample rate in Hz (default: 44100)
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Peak amplitude of a single note, 0.0-1.0 (default: 0.5)
    #[serde(default = "default_amplitude")]
    pub amplitude: f64,

    /// Output device name (None = default device)
    pub device: Option<String>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            amplitude: default_amplitude(),
            device: None,
        }
    }
}

fn default_sample_rate() -> u32 { DEFAULT_SAMPLE_RATE }
fn default_amplitude() -> f64 { DEFAULT_AMPLITUDE }

/// Synthesis settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SynthConfig {
    /// Waveform generator (default: karplus_strong)
    #[serde(default)]
    pub algorithm: Algorithm,

    /// What the string model reads before its first sample (default: silent)
    #[serde(default)]
    pub boundary: Boundary,

    /// Seed for the noise burst (None = different every run)
    pub seed: Option<u64>,
}

/// Tempo and demo loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Length of one beat in seconds (default: 0.5)
    #[serde(default = "default_beat_duration")]
    pub beat_duration: f64,

    /// Beats each chord rings for (default: 4)
    #[serde(default = "default_beats_per_chord")]
    pub beats_per_chord: u32,

    /// How long the demo keeps starting new passes, in seconds (default: 10)
    #[serde(default = "default_loop_seconds")]
    pub loop_seconds: f64,
}

impl PerformanceConfig {
    /// Seconds each chord rings for
    pub fn chord_duration(&self) -> f64 {
        self.beat_duration * self.beats_per_chord as f64
    }

    /// How long the demo loop runs
    pub fn loop_duration(&self) -> Duration {
        Duration::from_secs_f64(self.loop_seconds.max(0.0))
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            beat_duration: default_beat_duration(),
            beats_per_chord: default_beats_per_chord(),
            loop_seconds: default_loop_seconds(),
        }
    }
}

fn default_beat_duration() -> f64 { 0.5 }
fn default_beats_per_chord() -> u32 { 4 }
fn default_loop_seconds() -> f64 { 10.0 }

/// One chord of the progression, by note name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChordConfig {
    /// Display name
    pub name: String,

    /// Note names in scientific pitch notation, e.g. `C3`
    pub notes: Vec<String>,
}

impl ChordConfig {
    fn new(name: &str, notes: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            notes: notes.iter().map(|n| n.to_string()).collect(),
        }
    }
}

fn default_progression() -> Vec<ChordConfig> {
    vec![
        ChordConfig::new("C major", &["C3", "E4", "G4"]),
        ChordConfig::new("G major", &["G3", "B3", "D4"]),
        ChordConfig::new("A minor", &["A3", "C3", "E4"]),
        ChordConfig::new("F major", &["F3", "A3", "C3"]),
    ]
}
