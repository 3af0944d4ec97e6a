use crate::slots::{CommandSpec, SlotName};
use crate::{DialogueError, Result};
use intent_parser::CommandFamily;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A motion command with every slot resolved. Values are stored as the user gave them;
/// the direction sign is applied only when the command is issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilledCommand {
    family: CommandFamily,
    /// Distance in centimeters for moves, angle in degrees for turns
    magnitude: i64,
    speed: i64,
    seconds: i64,
}

impl FilledCommand {
    pub fn new(family: CommandFamily, magnitude: i64, speed: i64, seconds: i64) -> Result<Self> {
        if !family.is_motion() {
            return Err(DialogueError::InvalidCommand(format!(
                "{family} has no motion parameters"
            )));
        }
        Ok(Self {
            family,
            magnitude,
            speed,
            seconds,
        })
    }

    /// Assemble from values collected in schema order.
    pub fn from_slots(spec: &CommandSpec, values: &[(SlotName, i64)]) -> Result<Self> {
        let get = |name: SlotName| {
            values
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| *v)
                .ok_or_else(|| DialogueError::InvalidCommand(format!("missing {name} slot")))
        };
        let magnitude = if spec.command.family.is_turn() {
            get(SlotName::Angle)?
        } else {
            get(SlotName::Distance)?
        };
        Self::new(
            spec.command.family,
            magnitude,
            get(SlotName::Speed)?,
            get(SlotName::Seconds)?,
        )
    }

    pub fn duration_ms(&self) -> i64 {
        self.seconds.saturating_mul(1000)
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms().max(0) as u64)
    }

    /// Speed as issued: negated for backward moves.
    pub fn signed_speed(&self) -> i64 {
        match self.family {
            CommandFamily::MoveBack => -self.speed,
            _ => self.speed,
        }
    }

    /// Distance or angle as issued: right turns use a negative angle.
    pub fn signed_magnitude(&self) -> i64 {
        match self.family {
            CommandFamily::TurnRight => -self.magnitude.abs(),
            _ => self.magnitude,
        }
    }

    /// Audit-log form of the actuator call.
    pub fn invocation(&self) -> String {
        let name = if self.family.is_turn() {
            "turn_gyro"
        } else {
            "move_tank"
        };
        format!(
            "{name}({}, {}, {})",
            self.signed_magnitude(),
            self.signed_speed(),
            self.duration_ms()
        )
    }

    fn unit(&self) -> &'static str {
        if self.family.is_turn() {
            "degrees"
        } else {
            "centimeters"
        }
    }

    /// Read back to the user before confirmation.
    pub fn summary(&self) -> String {
        format!(
            "{} {} {} at {} speed for {} seconds.",
            self.family.label(),
            self.magnitude,
            self.unit(),
            self.speed,
            self.seconds
        )
    }

    /// Announced when the motion starts.
    pub fn motion_description(&self) -> String {
        let verb = match self.family {
            CommandFamily::MoveForward => "Moving forward",
            CommandFamily::MoveBack => "Moving back",
            CommandFamily::TurnLeft => "Turning left",
            _ => "Turning right",
        };
        format!(
            "{verb} {} {} at speed {} for {} milliseconds.",
            self.magnitude,
            self.unit(),
            self.speed,
            self.duration_ms()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_negates_speed_once() {
        let cmd = FilledCommand::new(CommandFamily::MoveBack, 50, 500, 3).unwrap();
        assert_eq!(cmd.signed_speed(), -500);
        assert_eq!(cmd.summary(), "Move back 50 centimeters at 500 speed for 3 seconds.");
        assert_eq!(cmd.signed_magnitude(), 50);
        assert_eq!(cmd.invocation(), "move_tank(50, -500, 3000)");
    }

    #[test]
    fn test_right_negates_angle_not_speed() {
        let cmd = FilledCommand::new(CommandFamily::TurnRight, 90, 50, 3).unwrap();
        assert_eq!(cmd.invocation(), "turn_gyro(-90, 50, 3000)");
        assert_eq!(cmd.summary(), "Turn right 90 degrees at 50 speed for 3 seconds.");
    }

    #[test]
    fn test_forward_and_left_unsigned() {
        let fwd = FilledCommand::new(CommandFamily::MoveForward, 120, 300, 2).unwrap();
        assert_eq!(fwd.invocation(), "move_tank(120, 300, 2000)");
        assert_eq!(fwd.duration(), Duration::from_secs(2));
        assert_eq!(
            fwd.motion_description(),
            "Moving forward 120 centimeters at speed 300 for 2000 milliseconds."
        );

        let left = FilledCommand::new(CommandFamily::TurnLeft, 45, 50, 3).unwrap();
        assert_eq!(left.invocation(), "turn_gyro(45, 50, 3000)");
    }

    #[test]
    fn test_non_motion_rejected() {
        assert!(FilledCommand::new(CommandFamily::Exit, 1, 1, 1).is_err());
    }
}
