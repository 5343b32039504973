//! WAV file recorder
//!
//! Writes played buffers to a mono 16-bit WAV file instead of a device.

use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use super::Sink;
use crate::error::{PluckError, PluckResult};
use crate::synth::SampleBuffer;

/// Records every buffer it is given, back to back
pub struct WavSink {
    writer: WavWriter<BufWriter<File>>,
    sample_rate: u32,
    samples_written: u64,
}

impl WavSink {
    /// Create a new recorder
    ///
    /// # Arguments
    /// * `path` - Output file path
    /// * `sample_rate` - Sample rate in Hz
    pub fn create(path: &Path, sample_rate: u32) -> PluckResult<Self> {
        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };

        let writer = WavWriter::create(path, spec)?;
        tracing::debug!(path = %path.display(), sample_rate, "recording to WAV");

        Ok(Self {
            writer,
            sample_rate,
            samples_written: 0,
        })
    }

    /// Get the sample rate
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get the number of samples written
    pub fn samples_written(&self) -> u64 {
        self.samples_written
    }

    /// Get the duration recorded in seconds
    pub fn duration_secs(&self) -> f64 {
        self.samples_written as f64 / self.sample_rate as f64
    }

    /// Append a buffer; its sample rate must match the file's
    pub fn write_buffer(&mut self, buffer: &SampleBuffer) -> PluckResult<()> {
        if buffer.sample_rate() != self.sample_rate {
            return Err(PluckError::SampleRateMismatch {
                expected: self.sample_rate,
                found: buffer.sample_rate(),
            });
        }

        for &sample in buffer.samples() {
            self.writer.write_sample(sample)?;
        }

        self.samples_written += buffer.len() as u64;
        Ok(())
    }

    /// Finalize the WAV file
    ///
    /// This must be called to properly close the file and write the header.
    pub fn finalize(self) -> PluckResult<()> {
        self.writer.finalize()?;
        Ok(())
    }
}

impl Sink for WavSink {
    fn play(&mut self, buffer: &SampleBuffer) -> PluckResult<()> {
        self.write_buffer(buffer)
    }
}
