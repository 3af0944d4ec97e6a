use crate::{AsrSegment, Result};
use std::time::Duration;

/// Speech-to-text over one utterance at a time.
pub trait AsrStream {
    fn push_audio(&mut self, pcm_s16le: &[i16]);

    /// Close the current utterance. `Ok(None)` means nothing was confidently decoded.
    fn finish(&mut self) -> Result<Option<AsrSegment>>;
}

/// Blocking text-to-speech: returns once the text has been spoken.
pub trait TtsEngine {
    fn speak(&mut self, text: &str) -> Result<()>;
}

/// Fixed-duration mono capture.
pub trait AudioCapture {
    fn sample_rate_hz(&self) -> u32;

    fn record(&mut self, duration: Duration) -> Result<Vec<i16>>;
}

/// Number of mono samples covering `duration` at `sample_rate_hz`.
pub fn sample_count(duration: Duration, sample_rate_hz: u32) -> usize {
    (duration.as_millis() as u64 * sample_rate_hz as u64 / 1000) as usize
}
