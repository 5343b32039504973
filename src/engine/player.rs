//! Blocking audio playback using cpal

use std::sync::mpsc::{self, Sender};
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{
    Device, FromSample, OutputCallbackInfo, SampleFormat, SampleRate, SizedSample, Stream,
    StreamConfig, SupportedStreamConfig,
};

use super::Sink;
use crate::error::{PluckError, PluckResult};
use crate::synth::SampleBuffer;

/// What the audio thread reports back to the caller
enum PlaybackEvent {
    /// Every sample has been handed to the device; the last of them is heard
    /// after the given delay
    Finished(Duration),
    /// The stream failed
    Failed(String),
}

/// Plays buffers on an output device, one blocking call per buffer
pub struct DeviceSink {
    device: Device,
    name: String,
}

impl DeviceSink {
    /// Open the default output device
    pub fn open_default() -> PluckResult<Self> {
        Self::open(None)
    }

    /// Open the output device called `name`, or the default one
    pub fn open(name: Option<&str>) -> PluckResult<Self> {
        let host = cpal::default_host();

        let device = match name {
            Some(wanted) => host
                .output_devices()
                .map_err(PluckError::device)?
                .find(|d| d.name().map(|n| n == wanted).unwrap_or(false))
                .ok_or_else(|| PluckError::Device(format!("no output device named '{}'", wanted)))?,
            None => host
                .default_output_device()
                .ok_or_else(|| PluckError::device("no output device available"))?,
        };

        let name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        tracing::debug!(device = %name, "opened output device");

        Ok(Self { device, name })
    }

    /// Name of the underlying device
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pick a device config that carries `sample_rate` with as few channels
    /// as possible, falling back to the device default
    fn stream_config(&self, sample_rate: u32) -> PluckResult<SupportedStreamConfig> {
        let best = self
            .device
            .supported_output_configs()
            .map_err(PluckError::device)?
            .filter(|range| format_rank(range.sample_format()).is_some())
            .filter(|range| {
                range.min_sample_rate().0 <= sample_rate && sample_rate <= range.max_sample_rate().0
            })
            .min_by_key(|range| (range.channels(), format_rank(range.sample_format())))
            .map(|range| range.with_sample_rate(SampleRate(sample_rate)));

        match best {
            Some(config) => Ok(config),
            None => {
                let fallback = self
                    .device
                    .default_output_config()
                    .map_err(PluckError::device)?;
                tracing::warn!(
                    device = %self.name,
                    requested = sample_rate,
                    using = fallback.sample_rate().0,
                    "device does not support the buffer's sample rate, pitch will be off"
                );
                Ok(fallback)
            }
        }
    }
}

impl Sink for DeviceSink {
    fn play(&mut self, buffer: &SampleBuffer) -> PluckResult<()> {
        if buffer.is_empty() {
            return Ok(());
        }

        let config = self.stream_config(buffer.sample_rate())?;
        let sample_format = config.sample_format();
        let stream_config: StreamConfig = config.into();
        tracing::debug!(
            channels = stream_config.channels,
            rate = stream_config.sample_rate.0,
            format = ?sample_format,
            samples = buffer.len(),
            "starting playback"
        );

        let (events, done) = mpsc::channel();
        let samples = buffer.samples().to_vec();

        let stream = match sample_format {
            SampleFormat::I16 => build_stream::<i16>(&self.device, &stream_config, samples, events)?,
            SampleFormat::F32 => build_stream::<f32>(&self.device, &stream_config, samples, events)?,
            SampleFormat::U16 => build_stream::<u16>(&self.device, &stream_config, samples, events)?,
            other => {
                return Err(PluckError::Device(format!(
                    "unsupported sample format {:?}",
                    other
                )))
            }
        };

        stream.play().map_err(PluckError::device)?;

        let outcome = done
            .recv()
            .map_err(|_| PluckError::device("audio stream closed before playback finished"))?;

        let result = match outcome {
            PlaybackEvent::Finished(tail) => {
                std::thread::sleep(tail);
                Ok(())
            }
            PlaybackEvent::Failed(message) => Err(PluckError::Device(message)),
        };

        if let Err(e) = stream.pause() {
            tracing::debug!(error = %e, "failed to pause stream before closing");
        }
        drop(stream);

        result
    }
}

/// Preference order for device sample formats; `None` if unsupported
fn format_rank(format: SampleFormat) -> Option<u8> {
    match format {
        SampleFormat::I16 => Some(0),
        SampleFormat::F32 => Some(1),
        SampleFormat::U16 => Some(2),
        _ => None,
    }
}

fn build_stream<T: SizedSample + FromSample<i16>>(
    device: &Device,
    config: &StreamConfig,
    samples: Vec<i16>,
    events: Sender<PlaybackEvent>,
) -> PluckResult<Stream> {
    let channels = config.channels as usize;
    let rate = config.sample_rate.0 as f64;
    let errors = events.clone();

    let mut position = 0;
    let mut reported = false;

    let stream = device
        .build_output_stream(
            config,
            move |data: &mut [T], info: &OutputCallbackInfo| {
                for frame in data.chunks_mut(channels) {
                    let sample = samples.get(position).copied().unwrap_or(0);
                    position += 1;
                    for channel_sample in frame.iter_mut() {
                        *channel_sample = T::from_sample(sample);
                    }
                }

                if position >= samples.len() && !reported {
                    reported = true;
                    let timestamp = info.timestamp();
                    let latency = timestamp
                        .playback
                        .duration_since(&timestamp.callback)
                        .unwrap_or_default();
                    let frames = (data.len() / channels) as f64;
                    let tail = latency + Duration::from_secs_f64(frames / rate);
                    let _ = events.send(PlaybackEvent::Finished(tail));
                }
            },
            move |err| {
                let _ = errors.send(PlaybackEvent::Failed(err.to_string()));
            },
            None,
        )
        .map_err(PluckError::device)?;

    Ok(stream)
}

/// Get the default output device name
pub fn default_device_name() -> Option<String> {
    let host = cpal::default_host();
    host.default_output_device().and_then(|d| d.name().ok())
}

/// List all available output devices with their default configs
pub fn list_output_devices() -> Vec<(String, StreamConfig)> {
    let host = cpal::default_host();
    let mut devices = Vec::new();

    if let Ok(output_devices) = host.output_devices() {
        for device in output_devices {
            if let (Ok(name), Ok(config)) = (device.name(), device.default_output_config()) {
                devices.push((name, config.into()));
            }
        }
    }

    devices
}
