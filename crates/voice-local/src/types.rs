use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsrStreamConfig {
    pub language: Option<String>,
    pub sample_rate_hz: u32,
}

impl Default for AsrStreamConfig {
    fn default() -> Self {
        Self {
            language: Some("en".to_string()),
            sample_rate_hz: 16_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsrSegment {
    pub start_ms: u64,
    pub end_ms: u64,
    pub text: String,
    pub ts: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsConfig {
    pub voice: Option<String>,
    /// Speaking rate in words per minute.
    #[serde(default = "default_rate_wpm")]
    pub rate_wpm: u32,
}

fn default_rate_wpm() -> u32 {
    150
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            voice: None,
            rate_wpm: default_rate_wpm(),
        }
    }
}
