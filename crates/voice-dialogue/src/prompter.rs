//! Prompted response collection
//!
//! Each question is a small state machine: wait for an utterance, validate it, and either
//! accept (terminal) or speak a correction and wait again. Silence is never an answer.

use crate::slots::{Range, SlotSpec};
use crate::{DialogueError, Listener, Result};
use intent_parser::WordNumberParser;
use tracing::{debug, warn};
use voice_local::TtsEngine;

pub const DEFAULT_TRIGGER: &str = "default";

/// How many utterances a single question may consume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryPolicy {
    /// `None` re-prompts until an acceptable answer arrives.
    pub max_attempts: Option<u32>,
}

impl RetryPolicy {
    pub const fn unbounded() -> Self {
        Self { max_attempts: None }
    }

    pub const fn bounded(max_attempts: u32) -> Self {
        Self {
            max_attempts: Some(max_attempts),
        }
    }

    fn allows(&self, attempts: u32) -> bool {
        self.max_attempts.map_or(true, |max| attempts < max)
    }
}

enum Turn<T> {
    AwaitingInput,
    Validating(String),
    Accepted(T),
}

enum Verdict<T> {
    Accept(T),
    /// Ask again, optionally saying why.
    Retry(Option<String>),
}

/// Speaks prompts and turns utterances into validated answers.
pub struct Prompter {
    tts: Box<dyn TtsEngine + Send>,
    listener: Listener,
    numbers: WordNumberParser,
    retry: RetryPolicy,
    strict_bounds: bool,
}

impl Prompter {
    pub fn new(tts: Box<dyn TtsEngine + Send>, listener: Listener) -> Result<Self> {
        Ok(Self {
            tts,
            listener,
            numbers: WordNumberParser::new()?,
            retry: RetryPolicy::unbounded(),
            strict_bounds: false,
        })
    }

    /// Also enforce one-sided ranges such as "at least 1".
    pub fn with_strict_bounds(mut self, strict: bool) -> Self {
        self.strict_bounds = strict;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn say(&mut self, text: &str) -> Result<()> {
        debug!(text, "speak");
        self.tts.speak(text)?;
        Ok(())
    }

    pub fn listen(&mut self) -> Result<String> {
        self.listener.listen()
    }

    fn run<T>(
        &mut self,
        prompt: &str,
        repeat_prompt: bool,
        mut validate: impl FnMut(&mut Self, &str) -> Result<Verdict<T>>,
    ) -> Result<T> {
        let mut attempts = 0u32;
        let mut turn = Turn::AwaitingInput;
        loop {
            turn = match turn {
                Turn::AwaitingInput => {
                    if !self.retry.allows(attempts) {
                        warn!(prompt, attempts, "giving up on question");
                        return Err(DialogueError::RetriesExhausted {
                            prompt: prompt.to_string(),
                            attempts,
                        });
                    }
                    if repeat_prompt || attempts == 0 {
                        self.say(prompt)?;
                    }
                    attempts += 1;
                    Turn::Validating(self.listener.listen()?)
                }
                Turn::Validating(text) if text.is_empty() => Turn::AwaitingInput,
                Turn::Validating(text) => match validate(self, &text)? {
                    Verdict::Accept(v) => Turn::Accepted(v),
                    Verdict::Retry(reason) => {
                        if let Some(reason) = reason {
                            self.say(&reason)?;
                        }
                        Turn::AwaitingInput
                    }
                },
                Turn::Accepted(v) => return Ok(v),
            };
        }
    }

    fn check_number(&mut self, text: &str, range: Range) -> Result<Verdict<i64>> {
        let number = match self.numbers.parse(text) {
            Ok(n) => n,
            Err(e) => {
                debug!(error = %e, "not a number");
                return Ok(Verdict::Retry(Some(
                    "That doesn't seem like a valid number. Try again.".to_string(),
                )));
            }
        };
        if !range.admits(number, self.strict_bounds) {
            return Ok(Verdict::Retry(Some(range.violation_message())));
        }
        self.say(&format!("You said {number}."))?;
        Ok(Verdict::Accept(number))
    }

    /// Ask for a slot value. Saying "default" picks the slot's default when it has one.
    pub fn collect(&mut self, slot: &SlotSpec) -> Result<i64> {
        let Some(default) = slot.default_value() else {
            return self.collect_required(slot.prompt(), slot.range());
        };
        let range = slot.range();
        self.run(&slot.spoken_prompt(), false, |me, text| {
            if text.contains(DEFAULT_TRIGGER) {
                me.say(&format!("Using default value: {default}."))?;
                return Ok(Verdict::Accept(default));
            }
            me.check_number(text, range)
        })
    }

    /// Ask for a value that has no default.
    pub fn collect_required(&mut self, prompt: &str, range: Range) -> Result<i64> {
        self.run(prompt, false, |me, text| me.check_number(text, range))
    }

    /// Yes or no; anything else repeats the question.
    pub fn collect_confirmation(&mut self, prompt: &str) -> Result<bool> {
        self.run(prompt, true, |_, text| {
            Ok(if text.contains("yes") {
                Verdict::Accept(true)
            } else if text.contains("no") {
                Verdict::Accept(false)
            } else {
                Verdict::Retry(Some("Please say yes or no.".to_string()))
            })
        })
    }

    /// Offer to attach a free-text comment. Asked once; anything but "yes" means no comment.
    pub fn collect_comment(&mut self) -> Result<Option<String>> {
        self.say("Would you like to add a comment? Say yes or no.")?;
        if !self.listener.listen()?.contains("yes") {
            return Ok(None);
        }
        self.say("Please say your comment.")?;
        let comment = self.listener.listen()?;
        Ok((!comment.is_empty()).then_some(comment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::SlotName;
    use std::time::Duration;
    use voice_local::{AsrStreamConfig, RecordingTts, ScriptedAsr, SilentCapture, SpokenLog};

    fn prompter(script: &[&str]) -> (Prompter, SpokenLog) {
        let tts = RecordingTts::new();
        let log = tts.log();
        let listener = Listener::new(
            Box::new(SilentCapture::new(16_000)),
            Box::new(ScriptedAsr::new(AsrStreamConfig::default(), script.to_vec())),
            Duration::from_secs(5),
        );
        (Prompter::new(Box::new(tts), listener).unwrap(), log)
    }

    fn speed_slot() -> SlotSpec {
        SlotSpec::defaultable(
            SlotName::Speed,
            "Say the speed in rotations per second.",
            Range::at_least(1),
            500,
        )
        .unwrap()
    }

    #[test]
    fn test_number_in_range_is_accepted() {
        let (mut p, log) = prompter(&["ninety"]);
        let v = p.collect_required("Say the turning angle in degrees.", Range::between(0, 180));
        assert_eq!(v.unwrap(), 90);
        assert!(log.contains("You said 90."));
    }

    #[test]
    fn test_valid_number_never_uses_default() {
        let (mut p, log) = prompter(&["two hundred"]);
        assert_eq!(p.collect(&speed_slot()).unwrap(), 200);
        assert!(!log.contains("Using default value"));
    }

    #[test]
    fn test_default_wins_over_number() {
        let (mut p, log) = prompter(&["default fifty"]);
        assert_eq!(p.collect(&speed_slot()).unwrap(), 500);
        assert!(log.contains("Using default value: 500."));
        assert!(log.contains("or say 'default' to use 500."));
    }

    #[test]
    fn test_required_ignores_default_trigger() {
        let (mut p, log) = prompter(&["default", "twelve"]);
        let v = p.collect_required("Say the distance in centimeters.", Range::unbounded());
        assert_eq!(v.unwrap(), 12);
        assert!(log.contains("That doesn't seem like a valid number."));
    }

    #[test]
    fn test_out_of_range_reprompts_until_valid() {
        let (mut p, log) = prompter(&["two hundred", "one hundred eighty"]);
        let v = p.collect_required("Say the turning angle in degrees.", Range::between(0, 180));
        assert_eq!(v.unwrap(), 180);
        assert_eq!(log.count("Please provide a number between 0 and 180."), 1);
        // the question itself is asked once
        assert_eq!(log.count("Say the turning angle"), 1);
    }

    #[test]
    fn test_silence_and_garbage_retry() {
        let (mut p, log) = prompter(&["", "", "banana", "seven"]);
        assert_eq!(p.collect(&speed_slot()).unwrap(), 7);
        assert_eq!(log.count("valid number"), 1);
    }

    fn seconds_slot() -> SlotSpec {
        SlotSpec::defaultable(
            SlotName::Seconds,
            "Say the maximum time in seconds.",
            Range::at_least(1),
            3,
        )
        .unwrap()
    }

    #[test]
    fn test_lone_minimum_is_not_enforced() {
        let (mut p, log) = prompter(&["zero", "two"]);
        assert_eq!(p.collect(&seconds_slot()).unwrap(), 0);
        assert!(!log.contains("Please provide a number of at least 1."));

        let (mut p, _) = prompter(&["zero"]);
        assert_eq!(p.collect(&speed_slot()).unwrap(), 0);
    }

    #[test]
    fn test_strict_bounds_reject_below_minimum() {
        let (p, log) = prompter(&["zero", "two"]);
        let mut p = p.with_strict_bounds(true);
        assert_eq!(p.collect(&seconds_slot()).unwrap(), 2);
        assert!(log.contains("Please provide a number of at least 1."));
    }

    #[test]
    fn test_confirmation_repeats_prompt() {
        let (mut p, log) = prompter(&["maybe", "", "yes please"]);
        assert!(p.collect_confirmation("Confirm?").unwrap());
        assert_eq!(log.count("Confirm?"), 3);
        assert_eq!(log.count("Please say yes or no."), 1);

        let (mut p, _) = prompter(&["no"]);
        assert!(!p.collect_confirmation("Confirm?").unwrap());
    }

    #[test]
    fn test_bounded_retries_give_up() {
        let (p, _) = prompter(&["banana", "apple", "ninety"]);
        let mut p = p.with_retry_policy(RetryPolicy::bounded(2));
        let err = p
            .collect_required("Say the turning angle in degrees.", Range::between(0, 180))
            .unwrap_err();
        assert!(matches!(err, DialogueError::RetriesExhausted { attempts: 2, .. }));
    }

    #[test]
    fn test_comment_flow() {
        let (mut p, _) = prompter(&["yes", "watch the table leg"]);
        assert_eq!(
            p.collect_comment().unwrap().as_deref(),
            Some("watch the table leg")
        );

        let (mut p, _) = prompter(&["no"]);
        assert_eq!(p.collect_comment().unwrap(), None);

        let (mut p, _) = prompter(&["yes", ""]);
        assert_eq!(p.collect_comment().unwrap(), None);
    }
}
