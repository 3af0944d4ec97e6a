//! Spoken number phrases to integers ("two hundred and five" -> 205)

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NumberError {
    #[error("no number found in '{0}'")]
    NotANumber(String),
    #[error("'{word}' cannot follow the preceding number words in '{text}'")]
    Ambiguous { word: String, text: String },
    #[error("number too large: '{0}'")]
    Overflow(String),
    #[error("invalid token pattern: {0}")]
    Pattern(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Word {
    /// zero..=nine
    Unit(i64),
    /// ten..=nineteen
    Teen(i64),
    /// twenty, thirty, ..
    Tens(i64),
    Hundred,
    Scale(i64),
    Digits(i64),
}

fn lookup(token: &str) -> Option<Word> {
    let w = match token {
        "zero" => Word::Unit(0),
        "one" => Word::Unit(1),
        "two" => Word::Unit(2),
        "three" => Word::Unit(3),
        "four" => Word::Unit(4),
        "five" => Word::Unit(5),
        "six" => Word::Unit(6),
        "seven" => Word::Unit(7),
        "eight" => Word::Unit(8),
        "nine" => Word::Unit(9),
        "ten" => Word::Teen(10),
        "eleven" => Word::Teen(11),
        "twelve" => Word::Teen(12),
        "thirteen" => Word::Teen(13),
        "fourteen" => Word::Teen(14),
        "fifteen" => Word::Teen(15),
        "sixteen" => Word::Teen(16),
        "seventeen" => Word::Teen(17),
        "eighteen" => Word::Teen(18),
        "nineteen" => Word::Teen(19),
        "twenty" => Word::Tens(20),
        "thirty" => Word::Tens(30),
        "forty" => Word::Tens(40),
        "fifty" => Word::Tens(50),
        "sixty" => Word::Tens(60),
        "seventy" => Word::Tens(70),
        "eighty" => Word::Tens(80),
        "ninety" => Word::Tens(90),
        "hundred" => Word::Hundred,
        "thousand" => Word::Scale(1_000),
        "million" => Word::Scale(1_000_000),
        "billion" => Word::Scale(1_000_000_000),
        _ => return None,
    };
    Some(w)
}

/// Converts a transcript containing a spoken number into an integer.
///
/// Words that are not number words ("and", "centimeters", "please") are skipped, so
/// "fifty centimeters" reads as 50. Digit tokens produced by some recognizers are
/// accepted as well.
pub struct WordNumberParser {
    tokens: Regex,
}

impl WordNumberParser {
    pub fn new() -> Result<Self, NumberError> {
        let tokens = Regex::new(r"[a-z]+|\d+").map_err(|e| NumberError::Pattern(e.to_string()))?;
        Ok(Self { tokens })
    }

    pub fn parse(&self, text: &str) -> Result<i64, NumberError> {
        let lowered = text.to_lowercase();
        let overflow = || NumberError::Overflow(text.to_string());

        let mut total: i64 = 0;
        let mut current: i64 = 0;
        let mut last: Option<Word> = None;
        let mut last_scale = i64::MAX;

        for m in self.tokens.find_iter(&lowered) {
            let token = m.as_str();
            let word = if token.as_bytes()[0].is_ascii_digit() {
                Word::Digits(token.parse().map_err(|_| overflow())?)
            } else {
                match lookup(token) {
                    Some(w) => w,
                    None => continue,
                }
            };

            let fits = match word {
                Word::Unit(_) => matches!(
                    last,
                    None | Some(Word::Tens(_)) | Some(Word::Hundred) | Some(Word::Scale(_))
                ),
                Word::Teen(_) | Word::Tens(_) => {
                    matches!(last, None | Some(Word::Hundred) | Some(Word::Scale(_)))
                }
                Word::Digits(_) => matches!(last, None | Some(Word::Scale(_))),
                Word::Hundred => {
                    !matches!(last, Some(Word::Hundred) | Some(Word::Scale(_))) && current < 100
                }
                Word::Scale(scale) => scale < last_scale && !matches!(last, Some(Word::Scale(_))),
            };
            if !fits {
                return Err(NumberError::Ambiguous {
                    word: token.to_string(),
                    text: text.to_string(),
                });
            }

            match word {
                Word::Unit(v) | Word::Teen(v) | Word::Tens(v) | Word::Digits(v) => {
                    current = current.checked_add(v).ok_or_else(overflow)?;
                }
                Word::Hundred => {
                    // a bare "hundred" means one hundred
                    let base = if last.is_none() { 1 } else { current };
                    current = base.checked_mul(100).ok_or_else(overflow)?;
                }
                Word::Scale(scale) => {
                    let base = if last.is_none() { 1 } else { current };
                    let chunk = base.checked_mul(scale).ok_or_else(overflow)?;
                    total = total.checked_add(chunk).ok_or_else(overflow)?;
                    current = 0;
                    last_scale = scale;
                }
            }
            last = Some(word);
        }

        if last.is_none() {
            return Err(NumberError::NotANumber(text.to_string()));
        }
        total.checked_add(current).ok_or_else(overflow)
    }
}

/// One-shot conversion; prefer holding a [`WordNumberParser`] when parsing repeatedly.
pub fn words_to_number(text: &str) -> Result<i64, NumberError> {
    WordNumberParser::new()?.parse(text)
}
