use crate::{
    sample_count, AsrSegment, AsrStream, AsrStreamConfig, AudioCapture, Result, TtsEngine,
    VoiceError,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use time::OffsetDateTime;

/// Replays a fixed list of transcripts, one per utterance.
///
/// An empty entry stands for silence. Once the script is exhausted every further
/// utterance reports [`VoiceError::InputClosed`].
pub struct ScriptedAsr {
    cfg: AsrStreamConfig,
    script: VecDeque<String>,
    pending_samples: usize,
    elapsed_ms: u64,
}

impl ScriptedAsr {
    pub fn new<I, S>(cfg: AsrStreamConfig, script: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cfg,
            script: script.into_iter().map(Into::into).collect(),
            pending_samples: 0,
            elapsed_ms: 0,
        }
    }
}

impl AsrStream for ScriptedAsr {
    fn push_audio(&mut self, pcm_s16le: &[i16]) {
        self.pending_samples += pcm_s16le.len();
    }

    fn finish(&mut self) -> Result<Option<AsrSegment>> {
        let rate = self.cfg.sample_rate_hz.max(1) as u64;
        let start_ms = self.elapsed_ms;
        self.elapsed_ms += self.pending_samples as u64 * 1000 / rate;
        self.pending_samples = 0;

        let text = self.script.pop_front().ok_or(VoiceError::InputClosed)?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(AsrSegment {
            start_ms,
            end_ms: self.elapsed_ms,
            text,
            ts: Some(OffsetDateTime::now_utc()),
        }))
    }
}

/// Capture backend that returns a buffer of silence of the requested length.
pub struct SilentCapture {
    sample_rate_hz: u32,
}

impl SilentCapture {
    pub fn new(sample_rate_hz: u32) -> Self {
        Self { sample_rate_hz }
    }
}

impl AudioCapture for SilentCapture {
    fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    fn record(&mut self, duration: Duration) -> Result<Vec<i16>> {
        Ok(vec![0; sample_count(duration, self.sample_rate_hz)])
    }
}

/// Shared view of everything a [`RecordingTts`] has spoken.
#[derive(Clone, Default)]
pub struct SpokenLog(Arc<Mutex<Vec<String>>>);

impl SpokenLog {
    pub fn lines(&self) -> Vec<String> {
        self.0.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|l| l.contains(needle))
    }

    pub fn count(&self, needle: &str) -> usize {
        self.lines().iter().filter(|l| l.contains(needle)).count()
    }
}

/// TTS backend that records text instead of playing it.
#[derive(Default)]
pub struct RecordingTts {
    spoken: SpokenLog,
}

impl RecordingTts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> SpokenLog {
        self.spoken.clone()
    }
}

impl TtsEngine for RecordingTts {
    fn speak(&mut self, text: &str) -> Result<()> {
        let mut lines = self
            .spoken
            .0
            .lock()
            .map_err(|_| VoiceError::Io("spoken log poisoned".into()))?;
        lines.push(text.to_string());
        Ok(())
    }
}
