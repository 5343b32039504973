//! CLI interface for Pluck

use clap::{Parser, Subcommand};
use pluck::synth::Algorithm;
use std::path::PathBuf;

/// Plucked-string tones and chords
#[derive(Parser)]
#[command(name = "pluck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (defaults apply if it does not exist)
    #[arg(short, long, global = true, default_value = "pluck.yaml")]
    pub config: PathBuf,

    /// Override the synthesis algorithm from the configuration
    #[arg(short, long, global = true, value_enum)]
    pub algorithm: Option<Algorithm>,

    /// Seed the noise burst for reproducible output
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Loop the chord progression on the audio device
    Demo {
        /// Seconds to keep starting new passes (overrides the configuration)
        #[arg(short, long)]
        seconds: Option<f64>,
    },

    /// Play a single note
    Note {
        /// Note name (e.g. A4, C#3) or frequency in Hz
        note: String,

        /// Duration in seconds
        #[arg(short, long, default_value = "2.0")]
        duration: f64,
    },

    /// Play a chord built from note names
    Chord {
        /// Note names or frequencies, e.g. C3 E4 G4
        #[arg(required = true)]
        notes: Vec<String>,

        /// Duration in seconds
        #[arg(short, long, default_value = "2.0")]
        duration: f64,
    },

    /// Record the chord progression to a WAV file
    Record {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Number of passes through the progression
        #[arg(short, long, default_value = "1")]
        passes: u32,
    },

    /// List available audio devices
    Devices,

    /// Validate a configuration file
    Check,

    /// Generate an example configuration file
    Init,
}
