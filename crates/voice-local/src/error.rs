use thiserror::Error;

pub type Result<T, E = VoiceError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum VoiceError {
    /// No further utterances will arrive (script exhausted, stdin closed).
    #[error("input closed")]
    InputClosed,
    #[error("operation not supported on this backend: {0}")]
    Unsupported(&'static str),
    #[error("unknown backend: {0}")]
    UnknownBackend(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("audio device error: {0}")]
    Device(String),
}

impl From<std::io::Error> for VoiceError {
    fn from(err: std::io::Error) -> Self {
        VoiceError::Io(err.to_string())
    }
}
