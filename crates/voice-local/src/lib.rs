//! voice-local: audio capture, ASR and TTS traits with mock and console backends
//!
//! The dialogue layer only ever talks to the three traits exported here. Backends are
//! feature-gated so the default build compiles on any host without audio drivers.

mod types;
pub use types::{AsrSegment, AsrStreamConfig, TtsConfig};

mod error;
pub use error::{Result, VoiceError};

mod traits;
pub use traits::{sample_count, AsrStream, AudioCapture, TtsEngine};

mod console;
pub use console::{ConsoleAsr, ConsoleTts};

#[cfg(feature = "mock")]
mod mock;
#[cfg(feature = "mock")]
pub use mock::{RecordingTts, ScriptedAsr, SilentCapture, SpokenLog};

#[cfg(feature = "audio")]
pub mod mic;
#[cfg(feature = "audio")]
pub mod wav;

pub mod plugin;
