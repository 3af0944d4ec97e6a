use crate::{
    AsrStream, AsrStreamConfig, AudioCapture, ConsoleAsr, ConsoleTts, Result, TtsConfig,
    TtsEngine, VoiceError,
};
#[cfg(feature = "mock")]
use crate::{ScriptedAsr, SilentCapture};
use std::str::FromStr;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AsrBackendKind {
    Script,
    Console,
    WhisperCpp,
    Vosk,
}

impl FromStr for AsrBackendKind {
    type Err = VoiceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "script" | "mock" => Ok(Self::Script),
            "console" | "stdin" => Ok(Self::Console),
            "whisper_cpp" | "whisper" => Ok(Self::WhisperCpp),
            "vosk" => Ok(Self::Vosk),
            other => Err(VoiceError::UnknownBackend(other.to_string())),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CaptureKind {
    Silent,
    Mic,
}

impl FromStr for CaptureKind {
    type Err = VoiceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "silent" | "none" => Ok(Self::Silent),
            "mic" | "microphone" => Ok(Self::Mic),
            other => Err(VoiceError::UnknownBackend(other.to_string())),
        }
    }
}

/// Build an ASR backend. `script` is only consumed by [`AsrBackendKind::Script`].
pub fn new_asr_backend(
    kind: AsrBackendKind,
    cfg: AsrStreamConfig,
    script: Vec<String>,
) -> Result<Box<dyn AsrStream + Send>> {
    match kind {
        AsrBackendKind::Script => {
            #[cfg(feature = "mock")]
            {
                Ok(Box::new(ScriptedAsr::new(cfg, script)))
            }
            #[cfg(not(feature = "mock"))]
            {
                let _ = (cfg, script);
                Err(VoiceError::Unsupported("mock feature not enabled"))
            }
        }
        AsrBackendKind::Console => Ok(Box::new(ConsoleAsr::new(cfg))),
        AsrBackendKind::WhisperCpp => Err(VoiceError::Unsupported(
            "whisper_cpp backend not yet integrated",
        )),
        AsrBackendKind::Vosk => Err(VoiceError::Unsupported("vosk backend not yet integrated")),
    }
}

pub fn new_capture_backend(
    kind: CaptureKind,
    sample_rate_hz: u32,
) -> Result<Box<dyn AudioCapture + Send>> {
    match kind {
        CaptureKind::Silent => {
            #[cfg(feature = "mock")]
            {
                Ok(Box::new(SilentCapture::new(sample_rate_hz)))
            }
            #[cfg(not(feature = "mock"))]
            {
                let _ = sample_rate_hz;
                Err(VoiceError::Unsupported("mock feature not enabled"))
            }
        }
        CaptureKind::Mic => {
            #[cfg(feature = "audio")]
            {
                Ok(Box::new(crate::mic::MicCapture::new(sample_rate_hz)))
            }
            #[cfg(not(feature = "audio"))]
            {
                let _ = sample_rate_hz;
                Err(VoiceError::Unsupported("audio feature not enabled"))
            }
        }
    }
}

pub fn new_tts_backend(cfg: TtsConfig) -> Box<dyn TtsEngine + Send> {
    Box::new(ConsoleTts::new(cfg))
}
