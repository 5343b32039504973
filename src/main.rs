//! Pluck - plucked-string tones and chords

use anyhow::{Context, Result};
use clap::Parser;
use pluck::config::{self, PluckConfig};
use pluck::engine::{self, DeviceSink, Performer, WavSink};
use pluck::music::{Chord, Note};
use pluck::synth::Synth;
use std::time::Duration;

mod cli;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { seconds } => {
            let cfg = load(&cli)?;
            let chords = cfg.chords()?;
            let run_for = match seconds {
                Some(s) if s.is_finite() && s >= 0.0 => Duration::from_secs_f64(s),
                Some(s) => anyhow::bail!("Seconds must be zero or more, got {}", s),
                None => cfg.performance.loop_duration(),
            };

            println!("Starting Pluck...");
            println!("  Sample rate: {} Hz", cfg.audio.sample_rate);
            println!("  Algorithm: {:?}", cfg.synth.algorithm);
            println!("  Chord length: {:.1}s", cfg.performance.chord_duration());

            let mut sink = DeviceSink::open(cfg.audio.device.as_deref())?;
            println!("  Device: {}\n", sink.name());

            let mut performer = performer(&cfg);
            let played = performer.perform(
                &mut sink,
                &chords,
                cfg.performance.chord_duration(),
                run_for,
            )?;
            println!("\nPlayed {} chords", played);
        }

        Commands::Note { ref note, duration } => {
            let cfg = load(&cli)?;
            let note = parse_note(note)?;

            let mut sink = DeviceSink::open(cfg.audio.device.as_deref())?;
            performer(&cfg).play_note(&mut sink, &note, duration)?;
        }

        Commands::Chord {
            ref notes,
            duration,
        } => {
            let cfg = load(&cli)?;
            let notes = notes
                .iter()
                .map(|n| parse_note(n))
                .collect::<Result<Vec<_>>>()?;
            let chord = Chord::new(&notes_label(&notes), notes)?;

            let mut sink = DeviceSink::open(cfg.audio.device.as_deref())?;
            performer(&cfg).play_chord(&mut sink, &chord, duration)?;
        }

        Commands::Record { ref output, passes } => {
            let cfg = load(&cli)?;
            let chords = cfg.chords()?;

            println!("Recording {} pass(es) to {:?}...", passes, output);

            let mut recorder = WavSink::create(output, cfg.audio.sample_rate)
                .with_context(|| format!("failed to create WAV file: {:?}", output))?;
            let mut performer = performer(&cfg);

            for pass in 1..=passes {
                performer.play_progression(
                    &mut recorder,
                    &chords,
                    cfg.performance.chord_duration(),
                )?;
                print!("\r  Progress: {} / {} passes", pass, passes);
                use std::io::Write;
                std::io::stdout().flush()?;
            }

            let seconds = recorder.duration_secs();
            recorder.finalize()?;
            println!("\nRecorded {:.1}s to {:?}", seconds, output);
        }

        Commands::Devices => {
            println!("Available audio devices:\n");

            if let Some(name) = engine::default_device_name() {
                println!("Default output: {}\n", name);
            }

            println!("Output devices:");
            let devices = engine::list_output_devices();
            if devices.is_empty() {
                println!("  (none found)");
            }
            for (name, config) in devices {
                println!(
                    "  - {} ({} Hz, {} ch)",
                    name, config.sample_rate.0, config.channels
                );
            }
        }

        Commands::Check => {
            println!("Checking configuration at {:?}...", cli.config);

            match config::load_config(&cli.config) {
                Ok(cfg) => {
                    println!("Configuration is valid!");
                    println!("  Sample rate: {} Hz", cfg.audio.sample_rate);
                    println!("  Amplitude: {:.0}%", cfg.audio.amplitude * 100.0);
                    println!("  Algorithm: {:?}", cfg.synth.algorithm);
                    println!("  Boundary: {:?}", cfg.synth.boundary);
                    match cfg.synth.seed {
                        Some(seed) => println!("  Seed: {}", seed),
                        None => println!("  Seed: random"),
                    }
                    println!("  Chord length: {:.1}s", cfg.performance.chord_duration());
                    println!("  Loop: {:.1}s", cfg.performance.loop_seconds);
                    println!("  Chords: {}", cfg.progression.len());
                    for chord in &cfg.progression {
                        println!("    - {} [{}]", chord.name, chord.notes.join(" "));
                    }
                }
                Err(e) => {
                    println!("Configuration is invalid: {:#}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Init => {
            let example_config = include_str!("../pluck.example.yaml");

            let path = "pluck.yaml";
            if std::path::Path::new(path).exists() {
                println!("pluck.yaml already exists. Not overwriting.");
            } else {
                std::fs::write(path, example_config)?;
                println!("Created pluck.yaml with example configuration.");
            }
        }
    }

    Ok(())
}

/// Load the configuration and apply command-line overrides
fn load(cli: &Cli) -> Result<PluckConfig> {
    let mut cfg = config::load_or_default(&cli.config)?;
    if let Some(algorithm) = cli.algorithm {
        cfg.synth.algorithm = algorithm;
    }
    if let Some(seed) = cli.seed {
        cfg.synth.seed = Some(seed);
    }
    Ok(cfg)
}

fn performer(cfg: &PluckConfig) -> Performer {
    let synth: Synth = cfg.synth();
    match cfg.synth.seed {
        Some(seed) => Performer::seeded(synth, seed),
        None => Performer::from_entropy(synth),
    }
}

/// Accept either a note name or a bare frequency in Hz
fn parse_note(input: &str) -> Result<Note> {
    match input.parse::<f64>() {
        Ok(hz) => Ok(Note::new(&format!("{:.2} Hz", hz), hz)?),
        Err(_) => Ok(Note::parse(input)?),
    }
}

fn notes_label(notes: &[Note]) -> String {
    notes
        .iter()
        .map(|n| n.name())
        .collect::<Vec<_>>()
        .join(" ")
}
