//! Top-level command grammar
//!
//! A transcript is classified by the first phrase of an ordered table that it contains.
//! The table order is the precedence: a phrase must come before any shorter phrase that
//! it contains, otherwise the shorter one would always win.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A class of commands sharing one slot schema and commit flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandFamily {
    MoveForward,
    MoveBack,
    TurnLeft,
    TurnRight,
    Exit,
    Help,
    Unrecognized,
}

impl CommandFamily {
    /// Families that end in a motion action.
    pub fn is_motion(&self) -> bool {
        matches!(
            self,
            CommandFamily::MoveForward
                | CommandFamily::MoveBack
                | CommandFamily::TurnLeft
                | CommandFamily::TurnRight
        )
    }

    pub fn is_turn(&self) -> bool {
        matches!(self, CommandFamily::TurnLeft | CommandFamily::TurnRight)
    }

    /// Spoken verb phrase, e.g. "Move forward".
    pub fn label(&self) -> &'static str {
        match self {
            CommandFamily::MoveForward => "Move forward",
            CommandFamily::MoveBack => "Move back",
            CommandFamily::TurnLeft => "Turn left",
            CommandFamily::TurnRight => "Turn right",
            CommandFamily::Exit => "Exit",
            CommandFamily::Help => "Help",
            CommandFamily::Unrecognized => "Unrecognized",
        }
    }
}

impl fmt::Display for CommandFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A classified top-level command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Command {
    pub family: CommandFamily,
    /// Skip the optional slots and use their configured defaults.
    pub with_defaults: bool,
}

impl Command {
    pub const fn new(family: CommandFamily) -> Self {
        Self {
            family,
            with_defaults: false,
        }
    }

    pub const fn with_defaults(family: CommandFamily) -> Self {
        Self {
            family,
            with_defaults: true,
        }
    }

    pub const fn unrecognized() -> Self {
        Self::new(CommandFamily::Unrecognized)
    }
}

/// Recognized phrases in precedence order.
pub const PHRASES: &[(&str, Command)] = &[
    (
        "move forward with defaults",
        Command::with_defaults(CommandFamily::MoveForward),
    ),
    ("move forward", Command::new(CommandFamily::MoveForward)),
    (
        "move back with defaults",
        Command::with_defaults(CommandFamily::MoveBack),
    ),
    ("move back", Command::new(CommandFamily::MoveBack)),
    (
        "turn left with defaults",
        Command::with_defaults(CommandFamily::TurnLeft),
    ),
    ("turn left", Command::new(CommandFamily::TurnLeft)),
    (
        "turn right with defaults",
        Command::with_defaults(CommandFamily::TurnRight),
    ),
    ("turn right", Command::new(CommandFamily::TurnRight)),
    ("exit", Command::new(CommandFamily::Exit)),
    ("help", Command::new(CommandFamily::Help)),
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("phrase '{shadowed}' can never match: '{earlier}' is checked first")]
    Shadowed { earlier: String, shadowed: String },
    #[error("empty phrase")]
    EmptyPhrase,
}

/// Ordered phrase table with a checked precedence invariant.
#[derive(Debug, Clone)]
pub struct CommandGrammar {
    phrases: Vec<(String, Command)>,
}

impl Default for CommandGrammar {
    fn default() -> Self {
        Self {
            phrases: PHRASES
                .iter()
                .map(|(p, c)| (p.to_string(), *c))
                .collect(),
        }
    }
}

impl CommandGrammar {
    /// Build a grammar from an explicit ordered table, rejecting shadowed phrases.
    pub fn from_phrases<I, S>(phrases: I) -> Result<Self, GrammarError>
    where
        I: IntoIterator<Item = (S, Command)>,
        S: Into<String>,
    {
        let phrases: Vec<(String, Command)> = phrases
            .into_iter()
            .map(|(p, c)| (p.into().trim().to_lowercase(), c))
            .collect();
        check_precedence(&phrases)?;
        Ok(Self { phrases })
    }

    /// Add an alias phrase. It is placed ahead of every existing phrase it contains so
    /// that the more specific wording keeps precedence.
    pub fn add_phrase(&mut self, phrase: &str, command: Command) -> Result<(), GrammarError> {
        let phrase = phrase.trim().to_lowercase();
        if phrase.is_empty() {
            return Err(GrammarError::EmptyPhrase);
        }
        let at = self
            .phrases
            .iter()
            .position(|(p, _)| phrase.contains(p.as_str()))
            .unwrap_or(self.phrases.len());
        let mut phrases = self.phrases.clone();
        phrases.insert(at, (phrase, command));
        check_precedence(&phrases)?;
        self.phrases = phrases;
        Ok(())
    }

    pub fn phrases(&self) -> impl Iterator<Item = (&str, Command)> {
        self.phrases.iter().map(|(p, c)| (p.as_str(), *c))
    }

    /// First phrase contained in the lowercased transcript wins.
    pub fn classify(&self, transcript: &str) -> Command {
        let text = transcript.trim().to_lowercase();
        if text.is_empty() {
            return Command::unrecognized();
        }
        let command = self
            .phrases
            .iter()
            .find(|(p, _)| text.contains(p.as_str()))
            .map(|(_, c)| *c)
            .unwrap_or_else(Command::unrecognized);
        tracing::debug!(transcript = %text, ?command, "classified");
        command
    }
}

/// Every phrase must not contain any phrase listed before it.
pub fn check_precedence(phrases: &[(String, Command)]) -> Result<(), GrammarError> {
    for (i, (later, _)) in phrases.iter().enumerate() {
        if later.is_empty() {
            return Err(GrammarError::EmptyPhrase);
        }
        let shadowing = phrases[..i]
            .iter()
            .find(|(p, _)| later.contains(p.as_str()));
        if let Some((earlier, _)) = shadowing {
            return Err(GrammarError::Shadowed {
                earlier: earlier.clone(),
                shadowed: later.clone(),
            });
        }
    }
    Ok(())
}

/// Classify against the built-in phrase table.
pub fn classify(transcript: &str) -> Command {
    CommandGrammar::default().classify(transcript)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_precedence_holds() {
        let grammar = CommandGrammar::default();
        let phrases: Vec<(String, Command)> = grammar
            .phrases()
            .map(|(p, c)| (p.to_string(), c))
            .collect();
        assert!(check_precedence(&phrases).is_ok());
    }

    #[test]
    fn test_with_defaults_beats_generic_prefix() {
        let cmd = classify("move forward with defaults");
        assert_eq!(cmd, Command::with_defaults(CommandFamily::MoveForward));

        assert_eq!(
            classify("please move back with defaults now"),
            Command::with_defaults(CommandFamily::MoveBack)
        );
        assert_eq!(
            classify("turn right with defaults"),
            Command::with_defaults(CommandFamily::TurnRight)
        );
    }

    #[test]
    fn test_basic_commands() {
        let cases = [
            ("move forward", CommandFamily::MoveForward),
            ("Move Back", CommandFamily::MoveBack),
            ("  turn left ", CommandFamily::TurnLeft),
            ("could you turn right", CommandFamily::TurnRight),
            ("exit", CommandFamily::Exit),
            ("help", CommandFamily::Help),
            ("dance", CommandFamily::Unrecognized),
            ("", CommandFamily::Unrecognized),
        ];
        for (text, family) in cases {
            let cmd = classify(text);
            assert_eq!(cmd.family, family, "transcript '{text}'");
            assert!(!cmd.with_defaults);
        }
    }

    #[test]
    fn test_shadowed_table_rejected() {
        let err = CommandGrammar::from_phrases([
            ("move forward", Command::new(CommandFamily::MoveForward)),
            (
                "move forward with defaults",
                Command::with_defaults(CommandFamily::MoveForward),
            ),
        ])
        .unwrap_err();
        assert!(matches!(err, GrammarError::Shadowed { .. }));
    }

    #[test]
    fn test_added_alias_keeps_precedence() {
        let mut grammar = CommandGrammar::default();
        grammar
            .add_phrase("go", Command::new(CommandFamily::MoveForward))
            .unwrap();
        grammar
            .add_phrase("go with defaults", Command::with_defaults(CommandFamily::MoveForward))
            .unwrap();

        assert_eq!(
            grammar.classify("go with defaults"),
            Command::with_defaults(CommandFamily::MoveForward)
        );
        assert_eq!(grammar.classify("go"), Command::new(CommandFamily::MoveForward));
    }

    #[test]
    fn test_command_serializes() {
        let json = serde_json::to_string(&Command::with_defaults(CommandFamily::TurnLeft)).unwrap();
        assert!(json.contains("TurnLeft"));
    }
}
