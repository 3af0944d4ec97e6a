use crate::{DialogueError, FilledCommand, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::info;

/// Outcome of one executed motion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionReport {
    pub invocation: String,
    pub requested: Duration,
    pub elapsed: Duration,
}

/// Executes confirmed motion commands.
#[async_trait]
pub trait MotionActuator: Send {
    async fn execute(&mut self, command: &FilledCommand) -> Result<MotionReport>;
}

/// Stand-in for the drive base: waits out the requested duration and records the call.
#[derive(Default)]
pub struct SimulatedActuator {
    history: Arc<Mutex<Vec<MotionReport>>>,
}

impl SimulatedActuator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to everything executed so far.
    pub fn history(&self) -> Arc<Mutex<Vec<MotionReport>>> {
        Arc::clone(&self.history)
    }
}

#[async_trait]
impl MotionActuator for SimulatedActuator {
    async fn execute(&mut self, command: &FilledCommand) -> Result<MotionReport> {
        let requested = command.duration();
        let start = tokio::time::Instant::now();
        tokio::time::sleep(requested).await;

        let report = MotionReport {
            invocation: command.invocation(),
            requested,
            elapsed: start.elapsed(),
        };
        info!("✅ {}", report.invocation);
        self.history
            .lock()
            .map_err(|_| DialogueError::Actuator("motion history poisoned".into()))?
            .push(report.clone());
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intent_parser::CommandFamily;

    #[tokio::test(start_paused = true)]
    async fn test_simulated_motion_waits_requested_time() {
        let mut actuator = SimulatedActuator::new();
        let history = actuator.history();
        let cmd = FilledCommand::new(CommandFamily::TurnLeft, 30, 50, 2).unwrap();

        let report = actuator.execute(&cmd).await.unwrap();
        assert_eq!(report.requested, Duration::from_millis(2000));
        assert!(report.elapsed >= Duration::from_millis(2000));
        assert_eq!(report.invocation, "turn_gyro(30, 50, 2000)");
        assert_eq!(history.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poisoned_history_is_an_error() {
        let mut actuator = SimulatedActuator::new();
        let history = actuator.history();
        let _ = std::thread::spawn(move || {
            let _guard = history.lock().unwrap();
            panic!("holder died");
        })
        .join();

        let cmd = FilledCommand::new(CommandFamily::MoveForward, 10, 500, 1).unwrap();
        let err = actuator.execute(&cmd).await.unwrap_err();
        assert!(matches!(err, DialogueError::Actuator(_)));
    }
}
