//! Dutch spoken clock phrases, e.g. `kwart voor drie` or `tien voor half vier`.

use crate::clock::to_hour12;
use crate::generator::{DifficultyModes, Mode};

/// Cardinal number words one through twelve
pub const NUMBER_WORDS: [&str; 12] = [
    "een", "twee", "drie", "vier", "vijf", "zes", "zeven", "acht", "negen", "tien", "elf",
    "twaalf",
];

/// Time keywords in the order the word pad shows them
pub const KEYWORDS: [&str; 5] = ["voor", "over", "kwart", "half", "uur"];

/// Offsets 13 and 14 only occur as minute distances ("dertien over ...")
const MINUTE_OFFSET_WORDS: [&str; 2] = ["dertien", "veertien"];

pub fn word_for(n: u8) -> Option<&'static str> {
    match n {
        1..=12 => Some(NUMBER_WORDS[n as usize - 1]),
        _ => None,
    }
}

fn offset_word(n: u8) -> &'static str {
    match n {
        1..=12 => NUMBER_WORDS[n as usize - 1],
        13 | 14 => MINUTE_OFFSET_WORDS[n as usize - 13],
        // bands below never produce anything else
        _ => "",
    }
}

/// The canonical Dutch phrase for `hour:minute`.
///
/// `hour` may be in 24-hour form, it is folded onto the analog face first.
/// Minutes past 59 are folded back into the hour.
pub fn phrase_for(hour: u8, minute: u8) -> String {
    let minute = minute % 60;
    let hour = to_hour12(hour);
    let next = hour % 12 + 1;
    let hour_word = offset_word(hour);
    let next_word = offset_word(next);

    match minute {
        0 => format!("{hour_word} uur"),
        15 => format!("kwart over {hour_word}"),
        30 => format!("half {next_word}"),
        45 => format!("kwart voor {next_word}"),
        1..=14 => format!("{} over {hour_word}", offset_word(minute)),
        16..=29 => format!("{} voor half {next_word}", offset_word(30 - minute)),
        31..=44 => format!("{} over half {next_word}", offset_word(minute - 30)),
        _ => format!("{} voor {next_word}", offset_word(60 - minute)),
    }
}

/// Words offered on the word pad for the enabled difficulty modes.
///
/// Number words are always there; `dertien` and `veertien` only when any
/// minute can come up, keywords only when a mode can need them.
pub fn word_palette(modes: &DifficultyModes) -> Vec<&'static str> {
    let offsets: &[&'static str] = if modes.contains(Mode::Minutes) {
        &MINUTE_OFFSET_WORDS
    } else {
        &[]
    };
    let fine = modes.contains(Mode::Five) || modes.contains(Mode::Minutes);
    let keyword_enabled = |word: &str| match word {
        "half" => modes.contains(Mode::Half) || fine,
        "kwart" => modes.contains(Mode::Quarter),
        "voor" | "over" => modes.contains(Mode::Quarter) || fine,
        _ => true,
    };

    NUMBER_WORDS
        .iter()
        .chain(offsets)
        .copied()
        .chain(KEYWORDS.iter().copied().filter(|w| keyword_enabled(w)))
        .collect()
}
