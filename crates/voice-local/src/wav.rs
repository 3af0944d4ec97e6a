use crate::{Result, VoiceError};
use std::path::Path;

/// Write mono 16-bit PCM as a WAV file.
pub fn write_wav(path: impl AsRef<Path>, pcm: &[i16], sample_rate_hz: u32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: sample_rate_hz,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer =
        hound::WavWriter::create(path, spec).map_err(|e| VoiceError::Io(e.to_string()))?;
    for s in pcm {
        writer
            .write_sample(*s)
            .map_err(|e| VoiceError::Io(e.to_string()))?;
    }
    writer.finalize().map_err(|e| VoiceError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_mono_16k_clip() {
        let path = std::env::temp_dir().join("voice-local-wav-test.wav");
        let pcm: Vec<i16> = (0..1600).map(|i| (i % 128) as i16).collect();
        write_wav(&path, &pcm, 16_000).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 16_000);
        assert_eq!(reader.len(), 1600);
        let _ = std::fs::remove_file(path);
    }
}
