//! Slot schemas for each motion family

use crate::{DialogueConfig, DialogueError, Result};
use intent_parser::{Command, CommandFamily};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotName {
    Distance,
    Angle,
    Speed,
    Seconds,
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SlotName::Distance => "distance",
            SlotName::Angle => "angle",
            SlotName::Speed => "speed",
            SlotName::Seconds => "time",
        };
        f.write_str(s)
    }
}

/// Inclusive bounds; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl Range {
    pub const fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    pub const fn at_least(min: i64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub const fn between(min: i64, max: i64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.min.is_some() && self.max.is_some()
    }

    /// Whether `value` is acceptable. Unless `strict`, only a range with both bounds
    /// constrains anything; a lone minimum or maximum is advisory.
    pub fn admits(&self, value: i64, strict: bool) -> bool {
        if !strict && !self.is_closed() {
            return true;
        }
        self.contains(value)
    }

    pub fn contains(&self, value: i64) -> bool {
        self.min.map_or(true, |m| value >= m) && self.max.map_or(true, |m| value <= m)
    }

    /// Spoken correction for a value outside the range.
    pub fn violation_message(&self) -> String {
        match (self.min, self.max) {
            (Some(lo), Some(hi)) => format!("Please provide a number between {lo} and {hi}."),
            (Some(lo), None) => format!("Please provide a number of at least {lo}."),
            (None, Some(hi)) => format!("Please provide a number of at most {hi}."),
            (None, None) => "Please provide a number.".to_string(),
        }
    }
}

/// One parameter of a command.
///
/// Required slots never carry a default; defaultable slots always do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSpec {
    name: SlotName,
    prompt: String,
    range: Range,
    default: Option<i64>,
}

impl SlotSpec {
    pub fn required(name: SlotName, prompt: impl Into<String>, range: Range) -> Self {
        Self {
            name,
            prompt: prompt.into(),
            range,
            default: None,
        }
    }

    pub fn defaultable(
        name: SlotName,
        prompt: impl Into<String>,
        range: Range,
        default: i64,
    ) -> Result<Self> {
        if !range.contains(default) {
            return Err(DialogueError::Config(format!(
                "default {default} for {name} is outside its range"
            )));
        }
        Ok(Self {
            name,
            prompt: prompt.into(),
            range,
            default: Some(default),
        })
    }

    pub fn name(&self) -> SlotName {
        self.name
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn range(&self) -> Range {
        self.range
    }

    pub fn default_value(&self) -> Option<i64> {
        self.default
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    /// The prompt with the defaulting hint appended, when a default exists.
    pub fn spoken_prompt(&self) -> String {
        match self.default {
            Some(d) => format!(
                "{}, or say 'default' to use {d}.",
                self.prompt.trim_end_matches('.')
            ),
            None => self.prompt.clone(),
        }
    }
}

/// A motion command together with the ordered slots it needs.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub command: Command,
    pub slots: Vec<SlotSpec>,
}

impl CommandSpec {
    /// Slot schema for a motion family; `None` for exit, help and unrecognized input.
    pub fn for_command(command: Command, cfg: &DialogueConfig) -> Result<Option<Self>> {
        let speed_range = Range::at_least(cfg.min_speed);
        let time_slot = SlotSpec::defaultable(
            SlotName::Seconds,
            "Say the maximum time in seconds.",
            Range::at_least(cfg.min_timeout_s),
            cfg.default_timeout_s,
        )?;

        let slots = match command.family {
            CommandFamily::MoveForward | CommandFamily::MoveBack => vec![
                SlotSpec::required(
                    SlotName::Distance,
                    "Say the distance in centimeters.",
                    Range::unbounded(),
                ),
                SlotSpec::defaultable(
                    SlotName::Speed,
                    "Say the speed in rotations per second.",
                    speed_range,
                    cfg.default_move_speed,
                )?,
                time_slot,
            ],
            CommandFamily::TurnLeft | CommandFamily::TurnRight => vec![
                SlotSpec::required(
                    SlotName::Angle,
                    "Say the turning angle in degrees.",
                    Range::between(0, cfg.max_turn_angle),
                ),
                SlotSpec::defaultable(
                    SlotName::Speed,
                    "Say the turning speed in rotations per second.",
                    speed_range,
                    cfg.default_turn_speed,
                )?,
                time_slot,
            ],
            CommandFamily::Exit | CommandFamily::Help | CommandFamily::Unrecognized => {
                return Ok(None)
            }
        };
        Ok(Some(Self { command, slots }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_bounds() {
        assert!(Range::unbounded().contains(-5));
        assert!(!Range::at_least(1).contains(0));
        assert!(Range::at_least(1).contains(1));
        assert!(Range::between(0, 180).contains(180));
        assert!(!Range::between(0, 180).contains(200));
        assert!(Range::at_least(1).admits(0, false));
        assert!(!Range::at_least(1).admits(0, true));
        assert!(!Range::between(0, 180).admits(200, false));
        assert_eq!(
            Range::between(0, 180).violation_message(),
            "Please provide a number between 0 and 180."
        );
    }

    #[test]
    fn test_required_and_default_pairing() {
        let cfg = DialogueConfig::default();
        for family in [
            CommandFamily::MoveForward,
            CommandFamily::MoveBack,
            CommandFamily::TurnLeft,
            CommandFamily::TurnRight,
        ] {
            let spec = CommandSpec::for_command(Command::new(family), &cfg)
                .unwrap()
                .unwrap();
            assert_eq!(spec.slots.len(), 3);
            assert!(spec.slots[0].is_required());
            assert!(spec.slots[1..].iter().all(|s| s.default_value().is_some()));
        }
    }

    #[test]
    fn test_turn_schema() {
        let cfg = DialogueConfig::default();
        let spec = CommandSpec::for_command(Command::new(CommandFamily::TurnRight), &cfg)
            .unwrap()
            .unwrap();
        assert_eq!(spec.slots[0].name(), SlotName::Angle);
        assert_eq!(spec.slots[0].range(), Range::between(0, 180));
        assert_eq!(spec.slots[1].default_value(), Some(50));
        assert_eq!(spec.slots[2].default_value(), Some(3));
    }

    #[test]
    fn test_move_schema_and_hint() {
        let cfg = DialogueConfig::default();
        let spec = CommandSpec::for_command(Command::new(CommandFamily::MoveBack), &cfg)
            .unwrap()
            .unwrap();
        assert_eq!(spec.slots[0].name(), SlotName::Distance);
        assert_eq!(spec.slots[1].default_value(), Some(500));
        assert_eq!(
            spec.slots[1].spoken_prompt(),
            "Say the speed in rotations per second, or say 'default' to use 500."
        );
        assert_eq!(spec.slots[0].spoken_prompt(), "Say the distance in centimeters.");
    }

    #[test]
    fn test_non_motion_has_no_schema() {
        let cfg = DialogueConfig::default();
        assert!(CommandSpec::for_command(Command::new(CommandFamily::Exit), &cfg)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_default_outside_range_rejected() {
        let err = SlotSpec::defaultable(SlotName::Speed, "speed", Range::at_least(1), 0);
        assert!(err.is_err());
    }
}
