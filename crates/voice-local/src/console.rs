use crate::{AsrSegment, AsrStream, AsrStreamConfig, Result, TtsConfig, TtsEngine, VoiceError};
use std::io::{self, BufRead, Write};
use time::OffsetDateTime;

/// Keyboard stand-in for a recognizer: every utterance is one typed line.
///
/// Captured audio is ignored; EOF on stdin closes the input.
pub struct ConsoleAsr {
    _cfg: AsrStreamConfig,
    utterances: u64,
}

impl ConsoleAsr {
    pub fn new(cfg: AsrStreamConfig) -> Self {
        Self {
            _cfg: cfg,
            utterances: 0,
        }
    }
}

impl AsrStream for ConsoleAsr {
    fn push_audio(&mut self, _pcm_s16le: &[i16]) {
        // typed input only
    }

    fn finish(&mut self) -> Result<Option<AsrSegment>> {
        let mut stdout = io::stdout();
        write!(stdout, "🎤 > ")?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(VoiceError::InputClosed);
        }
        self.utterances += 1;
        tracing::debug!(utterance = self.utterances, "typed input");

        let text = line.trim();
        if text.is_empty() {
            return Ok(None);
        }
        Ok(Some(AsrSegment {
            start_ms: 0,
            end_ms: 0,
            text: text.to_string(),
            ts: Some(OffsetDateTime::now_utc()),
        }))
    }
}

/// Prints each spoken line to stdout.
pub struct ConsoleTts {
    cfg: TtsConfig,
}

impl ConsoleTts {
    pub fn new(cfg: TtsConfig) -> Self {
        Self { cfg }
    }
}

impl TtsEngine for ConsoleTts {
    fn speak(&mut self, text: &str) -> Result<()> {
        tracing::trace!(rate_wpm = self.cfg.rate_wpm, voice = ?self.cfg.voice, "speak");
        let mut stdout = io::stdout();
        writeln!(stdout, "🔊 {text}")?;
        stdout.flush()?;
        Ok(())
    }
}
