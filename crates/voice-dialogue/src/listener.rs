use crate::Result;
use std::time::Duration;
use tracing::{debug, info};
use voice_local::{AsrStream, AudioCapture};

/// Records one fixed-length utterance and returns what was heard.
pub struct Listener {
    capture: Box<dyn AudioCapture + Send>,
    asr: Box<dyn AsrStream + Send>,
    duration: Duration,
    #[cfg(feature = "audio")]
    dump_path: Option<std::path::PathBuf>,
}

impl Listener {
    pub fn new(
        capture: Box<dyn AudioCapture + Send>,
        asr: Box<dyn AsrStream + Send>,
        duration: Duration,
    ) -> Self {
        Self {
            capture,
            asr,
            duration,
            #[cfg(feature = "audio")]
            dump_path: None,
        }
    }

    /// Keep the most recent capture on disk as a WAV file.
    #[cfg(feature = "audio")]
    pub fn with_audio_dump(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.dump_path = Some(path.into());
        self
    }

    /// Lowercased, trimmed transcript; empty when nothing was recognized.
    pub fn listen(&mut self) -> Result<String> {
        info!("🎤 Recording for {} seconds...", self.duration.as_secs_f32());
        let pcm = self.capture.record(self.duration)?;
        debug!(samples = pcm.len(), rate = self.capture.sample_rate_hz(), "clip");

        #[cfg(feature = "audio")]
        if let Some(path) = &self.dump_path {
            voice_local::wav::write_wav(path, &pcm, self.capture.sample_rate_hz())?;
        }

        self.asr.push_audio(&pcm);
        let text = self
            .asr
            .finish()?
            .map(|seg| seg.text.trim().to_lowercase())
            .unwrap_or_default();
        if text.is_empty() {
            debug!("nothing recognized");
        } else {
            info!("🗣 You said: {text}");
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voice_local::{AsrStreamConfig, ScriptedAsr, SilentCapture, VoiceError};

    fn listener(script: &[&str]) -> Listener {
        Listener::new(
            Box::new(SilentCapture::new(16_000)),
            Box::new(ScriptedAsr::new(AsrStreamConfig::default(), script.to_vec())),
            Duration::from_secs(5),
        )
    }

    #[test]
    fn test_normalizes_transcript() {
        let mut l = listener(&["  Move Forward  "]);
        assert_eq!(l.listen().unwrap(), "move forward");
    }

    #[test]
    fn test_silence_is_empty() {
        let mut l = listener(&[""]);
        assert_eq!(l.listen().unwrap(), "");
    }

    #[test]
    fn test_end_of_script_propagates() {
        let mut l = listener(&[]);
        let err = l.listen().unwrap_err();
        assert!(matches!(
            err,
            crate::DialogueError::Voice(VoiceError::InputClosed)
        ));
    }
}
