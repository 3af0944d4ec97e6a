use crate::{DialogueError, Result};
use intent_parser::IntentConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Named defaults for the dialogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogueConfig {
    /// Speed used when a turn's speed slot is defaulted
    pub default_turn_speed: i64,
    /// Speed used when a move's speed slot is defaulted
    pub default_move_speed: i64,
    pub min_speed: i64,
    pub min_timeout_s: i64,
    /// Time limit used when the time slot is defaulted
    pub default_timeout_s: i64,
    pub max_turn_angle: i64,
    /// Length of every recorded utterance
    pub capture_seconds: u64,
    pub sample_rate_hz: u32,
    pub tts_rate_wpm: u32,
    /// Reject values outside one-sided ranges too (speed and time minimums)
    pub strict_bounds: bool,
    /// Bound on re-prompts per question; `None` keeps asking until answered
    pub max_attempts: Option<u32>,
    pub intent: IntentConfig,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            default_turn_speed: 50,
            default_move_speed: 500,
            min_speed: 1,
            min_timeout_s: 1,
            default_timeout_s: 3,
            max_turn_angle: 180,
            capture_seconds: 5,
            sample_rate_hz: 16_000,
            tts_rate_wpm: 150,
            strict_bounds: false,
            max_attempts: None,
            intent: IntentConfig::default(),
        }
    }
}

impl DialogueConfig {
    /// Load from a JSON file, writing the defaults there first if it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let contents =
                fs::read_to_string(path).map_err(|e| DialogueError::Config(e.to_string()))?;
            let config: Self =
                serde_json::from_str(&contents).map_err(|e| DialogueError::Config(e.to_string()))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save(path)?;
            Ok(config)
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).map_err(|e| DialogueError::Config(e.to_string()))?;
        fs::write(path, json).map_err(|e| DialogueError::Config(e.to_string()))
    }

    /// Defaults must satisfy the ranges they stand in for.
    pub fn validate(&self) -> Result<()> {
        if self.capture_seconds == 0 {
            return Err(DialogueError::Config("capture_seconds must be positive".into()));
        }
        if self.max_turn_angle < 0 {
            return Err(DialogueError::Config("max_turn_angle must not be negative".into()));
        }
        for (name, value, min) in [
            ("default_move_speed", self.default_move_speed, self.min_speed),
            ("default_turn_speed", self.default_turn_speed, self.min_speed),
            ("default_timeout_s", self.default_timeout_s, self.min_timeout_s),
        ] {
            if value < min {
                return Err(DialogueError::Config(format!(
                    "{name} ({value}) is below its minimum ({min})"
                )));
            }
        }
        if self.max_attempts == Some(0) {
            return Err(DialogueError::Config("max_attempts must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = DialogueConfig::default();
        assert_eq!(cfg.default_move_speed, 500);
        assert_eq!(cfg.default_turn_speed, 50);
        assert_eq!(cfg.default_timeout_s, 3);
        assert_eq!(cfg.capture_seconds, 5);
        assert!(cfg.max_attempts.is_none());
        assert!(!cfg.strict_bounds);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let cfg: DialogueConfig =
            serde_json::from_str(r#"{"default_move_speed": 300, "max_attempts": 4}"#).unwrap();
        assert_eq!(cfg.default_move_speed, 300);
        assert_eq!(cfg.max_attempts, Some(4));
        assert_eq!(cfg.default_turn_speed, 50);
    }

    #[test]
    fn test_validate_rejects_default_below_minimum() {
        let cfg = DialogueConfig {
            default_timeout_s: 0,
            ..DialogueConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(DialogueError::Config(_))));
    }

    #[test]
    fn test_load_creates_then_reads() {
        let path = std::env::temp_dir().join("voice-dialogue-config-test.json");
        let _ = fs::remove_file(&path);

        let created = DialogueConfig::load(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created.default_move_speed, 500);

        let reread = DialogueConfig::load(&path).unwrap();
        assert_eq!(reread.default_timeout_s, created.default_timeout_s);
        let _ = fs::remove_file(path);
    }
}
