use crate::clock::{ClockTime, HandPosition};
use crate::digit_input::parse_hh_mm;
use crate::dutch::phrase_for;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which way the exercise goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum Direction {
    /// A clock face is shown, the player states the time
    #[default]
    #[serde(rename = "analogue-to-input")]
    #[value(name = "analogue-to-input", alias = "read")]
    Reading,
    /// A time is shown, the player sets the hands
    #[serde(rename = "input-to-analogue")]
    #[value(name = "input-to-analogue", alias = "set")]
    Setting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    #[default]
    Digital,
    /// Dutch words from the word pad
    Text,
}

/// What the player submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer<'a> {
    Digits(&'a str),
    Words(&'a [String]),
    Hands(HandPosition),
}

/// Decide whether `answer` matches `target`.
///
/// Every combination has an answer; a submission of the wrong shape for the
/// direction and mode is simply wrong.
pub fn evaluate(direction: Direction, mode: InputMode, target: ClockTime, answer: Answer) -> bool {
    match (direction, mode, answer) {
        (Direction::Reading, InputMode::Digital, Answer::Digits(display)) => {
            digits_match(target, display)
        }
        (Direction::Reading, InputMode::Text, Answer::Words(words)) => {
            sentence_matches(target, &words.join(" "))
        }
        (Direction::Setting, _, Answer::Hands(hands)) => hands_match(target, hands),
        _ => false,
    }
}

/// Digital answers ignore AM/PM: "6:15" and "18:15" are the same face
pub fn digits_match(target: ClockTime, display: &str) -> bool {
    match parse_hh_mm(display) {
        Some((hour, minute)) => {
            hour % 12 == target.hour as u32 % 12 && minute == target.minute as u32
        }
        None => false,
    }
}

pub fn sentence_matches(target: ClockTime, sentence: &str) -> bool {
    let expected = phrase_for(target.hour, target.minute);
    sentence.trim().to_lowercase() == expected.trim().to_lowercase()
}

pub fn hands_match(target: ClockTime, hands: HandPosition) -> bool {
    hands.hour == target.hour12() && hands.minute == target.minute
}
