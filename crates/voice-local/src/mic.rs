//! Microphone capture via cpal, downmixed to mono i16 and resampled to the requested rate.

use crate::{sample_count, AudioCapture, Result, VoiceError};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};
use tracing::debug;

pub struct MicStream {
    _stream: cpal::Stream,
}

pub struct MicConfig {
    pub sample_rate_hz: u32,
    pub channels: u16,
}

pub fn start_default_input_i16() -> Result<(MicStream, MicConfig, Receiver<Vec<i16>>)> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or_else(|| VoiceError::Device("no default input device".into()))?;
    let config = device
        .default_input_config()
        .map_err(|e| VoiceError::Device(format!("input config: {e}")))?;
    let sample_rate = config.sample_rate().0;
    let channels = config.channels();

    let (tx, rx) = mpsc::channel::<Vec<i16>>();
    let err_fn = |err: cpal::StreamError| tracing::warn!("input stream error: {err}");

    let stream = match config.sample_format() {
        cpal::SampleFormat::I16 => {
            build_stream::<i16>(&device, &config.into(), channels, tx, err_fn, |s| s)?
        }
        cpal::SampleFormat::U16 => {
            build_stream::<u16>(&device, &config.into(), channels, tx, err_fn, |s| {
                (s as i32 - 32768) as i16
            })?
        }
        cpal::SampleFormat::F32 => {
            build_stream::<f32>(&device, &config.into(), channels, tx, err_fn, |s| {
                (s.clamp(-1.0, 1.0) * 32767.0) as i16
            })?
        }
        other => {
            return Err(VoiceError::Device(format!(
                "unsupported sample format: {other:?}"
            )))
        }
    };
    stream
        .play()
        .map_err(|e| VoiceError::Device(format!("stream play: {e}")))?;
    Ok((
        MicStream { _stream: stream },
        MicConfig {
            sample_rate_hz: sample_rate,
            channels,
        },
        rx,
    ))
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: u16,
    tx: Sender<Vec<i16>>,
    err_fn: impl Fn(cpal::StreamError) + Send + 'static,
    convert: fn(T) -> i16,
) -> Result<cpal::Stream>
where
    T: cpal::SizedSample + Send + 'static,
{
    let stream = device
        .build_input_stream(
            config,
            move |data: &[T], _| {
                // first channel only
                let mono: Vec<i16> = data
                    .chunks_exact(channels.max(1) as usize)
                    .map(|frame| convert(frame[0]))
                    .collect();
                let _ = tx.send(mono);
            },
            err_fn,
            None,
        )
        .map_err(|e| VoiceError::Device(format!("build input stream: {e}")))?;
    Ok(stream)
}

/// Nearest-sample resampling; adequate for speech at recognizer rates.
fn resample(input: &[i16], from_hz: u32, to_hz: u32) -> Vec<i16> {
    if from_hz == to_hz || input.is_empty() {
        return input.to_vec();
    }
    let out_len = (input.len() as u64 * to_hz as u64 / from_hz as u64) as usize;
    (0..out_len)
        .map(|i| {
            let src = (i as u64 * from_hz as u64 / to_hz as u64) as usize;
            input[src.min(input.len() - 1)]
        })
        .collect()
}

/// Records fixed-length clips from the default input device.
pub struct MicCapture {
    sample_rate_hz: u32,
}

impl MicCapture {
    pub fn new(sample_rate_hz: u32) -> Self {
        Self { sample_rate_hz }
    }
}

impl AudioCapture for MicCapture {
    fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    fn record(&mut self, duration: Duration) -> Result<Vec<i16>> {
        let (_stream, cfg, rx) = start_default_input_i16()?;
        let wanted = sample_count(duration, cfg.sample_rate_hz);
        let deadline = Instant::now() + duration + Duration::from_secs(1);

        let mut buf = Vec::with_capacity(wanted);
        while buf.len() < wanted {
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() {
                break;
            }
            match rx.recv_timeout(left) {
                Ok(chunk) => buf.extend_from_slice(&chunk),
                Err(_) => break,
            }
        }
        buf.truncate(wanted);
        debug!(
            samples = buf.len(),
            device_hz = cfg.sample_rate_hz,
            channels = cfg.channels,
            "captured clip"
        );
        Ok(resample(&buf, cfg.sample_rate_hz, self.sample_rate_hz))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resample_halves_length() {
        let input: Vec<i16> = (0..100).collect();
        let out = resample(&input, 32_000, 16_000);
        assert_eq!(out.len(), 50);
        assert_eq!(out[1], 2);
    }
}
