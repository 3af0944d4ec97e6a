use intent_parser::{GrammarError, NumberError};
use thiserror::Error;
use voice_local::VoiceError;

pub type Result<T, E = DialogueError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DialogueError {
    #[error("voice backend: {0}")]
    Voice(#[from] VoiceError),
    /// Only raised when a maximum attempt count is configured.
    #[error("no acceptable answer to '{prompt}' after {attempts} attempts")]
    RetriesExhausted { prompt: String, attempts: u32 },
    #[error("grammar: {0}")]
    Grammar(#[from] GrammarError),
    #[error("number parser: {0}")]
    Number(#[from] NumberError),
    #[error("config: {0}")]
    Config(String),
    #[error("actuator: {0}")]
    Actuator(String),
    #[error("invalid command: {0}")]
    InvalidCommand(String),
}

impl DialogueError {
    /// The speech input has ended; the session should wind down rather than fail.
    pub fn is_input_closed(&self) -> bool {
        matches!(self, DialogueError::Voice(VoiceError::InputClosed))
    }
}
