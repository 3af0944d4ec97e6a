//! voice-dialogue: spoken slot-filling dialogue for motion commands
//!
//! A [`Session`] repeatedly asks for a command, classifies it, collects its parameters
//! one question at a time through a [`Prompter`], reads the result back for a yes/no
//! confirmation, and on "yes" appends it to the [`SessionLog`] and hands it to a
//! [`MotionActuator`].

mod config;
pub use config::DialogueConfig;

mod error;
pub use error::{DialogueError, Result};

mod listener;
pub use listener::Listener;

mod prompter;
pub use prompter::{Prompter, RetryPolicy, DEFAULT_TRIGGER};

pub mod slots;
pub use slots::{CommandSpec, Range, SlotName, SlotSpec};

mod command;
pub use command::FilledCommand;

mod motion;
pub use motion::{MotionActuator, MotionReport, SimulatedActuator};

mod session;
pub use session::{AuditEntry, Flow, Session, SessionLog};
