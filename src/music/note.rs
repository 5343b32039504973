//! Notes and scientific pitch notation

use std::fmt;
use std::str::FromStr;

use crate::error::{PluckError, PluckResult};

/// Reference pitch for equal temperament (A4)
pub const A4_HZ: f64 = 440.0;

const A4_MIDI: i32 = 69;

/// A named pitch
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    name: String,
    frequency: f64,
}

impl Note {
    /// Create a note with an explicit frequency in Hz
    pub fn new(name: &str, frequency: f64) -> PluckResult<Self> {
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(PluckError::invalid(
                "frequency",
                format!("note '{}' needs a positive frequency, got {}", name, frequency),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            frequency,
        })
    }

    /// Parse a note name such as `C3`, `F#4` or `Bb2`
    ///
    /// The frequency follows twelve-tone equal temperament with A4 at 440 Hz.
    pub fn parse(name: &str) -> PluckResult<Self> {
        let midi = midi_number(name.trim())?;
        Self::new(name.trim(), midi_to_hz(midi))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Frequency in Hz
    pub fn frequency(&self) -> f64 {
        self.frequency
    }
}

impl FromStr for Note {
    type Err = PluckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2} Hz)", self.name, self.frequency)
    }
}

/// Convert a MIDI note number to Hz
pub fn midi_to_hz(midi: i32) -> f64 {
    A4_HZ * 2.0_f64.powf((midi - A4_MIDI) as f64 / 12.0)
}

fn midi_number(name: &str) -> PluckResult<i32> {
    let unknown = || PluckError::invalid("note", format!("unrecognised note name '{}'", name));

    let mut chars = name.chars();
    let letter = chars.next().ok_or_else(unknown)?;
    let pitch_class = match letter.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return Err(unknown()),
    };

    let rest = chars.as_str();
    let (accidental, octave) = if let Some(octave) = rest.strip_prefix('#') {
        (1, octave)
    } else if let Some(octave) = rest.strip_prefix('b') {
        (-1, octave)
    } else {
        (0, rest)
    };

    let octave: i32 = octave.parse().map_err(|_| unknown())?;
    if !(-1..=9).contains(&octave) {
        return Err(unknown());
    }

    Ok((octave + 1) * 12 + pitch_class + accidental)
}
