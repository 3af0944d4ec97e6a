//! Session loop, confirmation and the audit log

use crate::slots::CommandSpec;
use crate::{
    DialogueConfig, DialogueError, FilledCommand, MotionActuator, Prompter, Result, RetryPolicy,
    SimulatedActuator,
};
use intent_parser::{create_grammar, Command, CommandFamily, CommandGrammar};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};
use std::time::Instant;
use tracing::{info, warn};

const WELCOME: &str = "Welcome to the Voice-Controlled Movement Program.";
const MENU: &str = "Say Move forward, Move back, Turn left, Turn right, say command with defaults for default values, Help, or Exit.";
const GOODBYE: &str = "Goodbye! Printing all executed commands before exiting.";
const UNRECOGNIZED: &str = "I did not recognize that command. Please try again.";
const START_OVER: &str = "Sorry, I could not get an answer. Please start the command again.";

/// One line of the session's audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditEntry {
    Invocation(String),
    Comment(String),
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditEntry::Invocation(call) => write!(f, "{call}"),
            AuditEntry::Comment(text) => write!(f, "# {text}"),
        }
    }
}

/// Append-only record of confirmed commands, in confirmation order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionLog {
    entries: Vec<AuditEntry>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, entry: AuditEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn write_summary(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "📜 Executed Commands Summary:")?;
        for entry in &self.entries {
            writeln!(out, "{entry}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SessionLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// One conversational session: prompts, dispatches and commits until told to exit.
pub struct Session {
    config: DialogueConfig,
    grammar: CommandGrammar,
    prompter: Prompter,
    actuator: Box<dyn MotionActuator>,
    log: SessionLog,
}

impl Session {
    pub fn new(config: DialogueConfig, prompter: Prompter) -> Result<Self> {
        config.validate()?;
        let grammar = create_grammar(&config.intent)?;
        let prompter = prompter
            .with_retry_policy(RetryPolicy {
                max_attempts: config.max_attempts,
            })
            .with_strict_bounds(config.strict_bounds);
        Ok(Self {
            config,
            grammar,
            prompter,
            actuator: Box::new(SimulatedActuator::new()),
            log: SessionLog::new(),
        })
    }

    pub fn with_actuator(mut self, actuator: Box<dyn MotionActuator>) -> Self {
        self.actuator = actuator;
        self
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    /// Run until "exit" (or the end of speech input) and hand back the audit log.
    pub async fn run(mut self) -> Result<SessionLog> {
        self.prompter.say(WELCOME)?;
        loop {
            let start = Instant::now();
            let flow = match self.step().await {
                Ok(flow) => flow,
                Err(e) if e.is_input_closed() => {
                    info!("speech input closed, ending session");
                    Flow::Exit
                }
                Err(e) => return Err(e),
            };
            info!(elapsed_ms = start.elapsed().as_millis() as u64, "command processed");
            if flow == Flow::Exit {
                break;
            }
        }
        Ok(self.log)
    }

    /// Ask for one top-level command and carry it through.
    pub async fn step(&mut self) -> Result<Flow> {
        self.prompter.say(MENU)?;
        let text = self.prompter.listen()?;
        if text.is_empty() {
            return Ok(Flow::Continue);
        }

        let command = self.grammar.classify(&text);
        match command.family {
            CommandFamily::Exit => {
                self.prompter.say(GOODBYE)?;
                Ok(Flow::Exit)
            }
            CommandFamily::Help => {
                let help = self.help_text();
                self.prompter.say(&help)?;
                Ok(Flow::Continue)
            }
            CommandFamily::Unrecognized => {
                self.prompter.say(UNRECOGNIZED)?;
                Ok(Flow::Continue)
            }
            _ => match self.run_motion(command).await {
                Ok(_) => Ok(Flow::Continue),
                Err(DialogueError::RetriesExhausted { prompt, attempts }) => {
                    warn!(prompt = %prompt, attempts, "command abandoned");
                    self.prompter.say(START_OVER)?;
                    Ok(Flow::Continue)
                }
                Err(e) => Err(e),
            },
        }
    }

    async fn run_motion(&mut self, command: Command) -> Result<bool> {
        let spec = CommandSpec::for_command(command, &self.config)?.ok_or_else(|| {
            DialogueError::InvalidCommand(format!("{} takes no parameters", command.family))
        })?;
        let filled = self.fill_slots(&spec)?;
        self.confirm_and_commit(filled).await
    }

    /// Resolve every slot: required ones are always asked, defaultable ones are asked
    /// unless the command was given "with defaults".
    pub fn fill_slots(&mut self, spec: &CommandSpec) -> Result<FilledCommand> {
        let mut values = Vec::with_capacity(spec.slots.len());
        for slot in &spec.slots {
            let value = match slot.default_value() {
                Some(default) if spec.command.with_defaults => default,
                _ => self.prompter.collect(slot)?,
            };
            values.push((slot.name(), value));
        }
        FilledCommand::from_slots(spec, &values)
    }

    /// Read the command back, and on "yes" log it (plus any comment) and execute it.
    pub async fn confirm_and_commit(&mut self, command: FilledCommand) -> Result<bool> {
        let prompt = format!("Confirm: {} Say yes to continue.", command.summary());
        if !self.prompter.collect_confirmation(&prompt)? {
            info!(command = %command.invocation(), "declined");
            return Ok(false);
        }

        let comment = self.prompter.collect_comment()?;
        self.log.append(AuditEntry::Invocation(command.invocation()));
        if let Some(comment) = comment {
            self.log.append(AuditEntry::Comment(comment));
        }

        self.prompter.say(&command.motion_description())?;
        let report = self.actuator.execute(&command).await?;
        info!(
            invocation = %report.invocation,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "motion complete"
        );
        Ok(true)
    }

    fn help_text(&self) -> String {
        let c = &self.config;
        format!(
            "You can say Move forward or Move back with a distance in centimeters, \
             or Turn left or Turn right with an angle up to {} degrees. \
             You will then be asked for a speed and a time limit. \
             Add 'with defaults' to skip them and use speed {} for moves, \
             speed {} for turns, and {} seconds. Say Exit to finish.",
            c.max_turn_angle, c.default_move_speed, c.default_turn_speed, c.default_timeout_s
        )
    }
}
