//! Intent Parser for Voice Commands
//!
//! This crate classifies speech transcriptions against the fixed command grammar and
//! converts spoken number phrases into integers for slot values.

mod grammar;
mod numbers;

pub use grammar::{
    check_precedence, classify, Command, CommandFamily, CommandGrammar, GrammarError, PHRASES,
};
pub use numbers::{words_to_number, NumberError, WordNumberParser};

use serde::{Deserialize, Serialize};

/// Extra phrasing mapped onto an existing command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhraseAlias {
    pub phrase: String,
    pub command: Command,
}

/// Configuration for intent parsing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntentConfig {
    /// Additional phrases, inserted with the same precedence rules as the built-ins
    #[serde(default)]
    pub aliases: Vec<PhraseAlias>,
}

/// Initialize the intent parser system
pub fn init() {
    tracing::info!("Initializing Intent Parser system");
}

/// Build the command grammar: built-in phrases plus configured aliases
pub fn create_grammar(config: &IntentConfig) -> Result<CommandGrammar, GrammarError> {
    let mut grammar = CommandGrammar::default();
    for alias in &config.aliases {
        grammar.add_phrase(&alias.phrase, alias.command)?;
    }
    Ok(grammar)
}
