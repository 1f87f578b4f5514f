use crate::clock::ClockTime;
use clap::ValueEnum;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Minute granularity a round may be drawn from
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    Hours,
    Half,
    Quarter,
    Five,
    Minutes,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::Hours,
        Mode::Half,
        Mode::Quarter,
        Mode::Five,
        Mode::Minutes,
    ];

    /// Draw a minute value this mode allows
    pub fn draw_minute<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        match self {
            Mode::Hours => 0,
            Mode::Half => 30,
            Mode::Quarter => {
                if rng.gen_bool(0.5) {
                    15
                } else {
                    45
                }
            }
            Mode::Five => rng.gen_range(0..12) * 5,
            Mode::Minutes => rng.gen_range(0..60),
        }
    }

    /// Label used in the leaderboard settings summary
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Hours => "Hele uren",
            Mode::Half => "Halve uren",
            Mode::Quarter => "Kwartieren",
            Mode::Five => "Per 5 min",
            Mode::Minutes => "Per minuut",
        }
    }
}

/// The set of enabled difficulty modes. Iterates in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DifficultyModes {
    modes: BTreeSet<Mode>,
}

impl DifficultyModes {
    pub fn from_modes<I: IntoIterator<Item = Mode>>(modes: I) -> Self {
        Self {
            modes: modes.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, mode: Mode) {
        self.modes.insert(mode);
    }

    pub fn contains(&self, mode: Mode) -> bool {
        self.modes.contains(&mode)
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Mode> + '_ {
        self.modes.iter().copied()
    }

    /// Modes to draw from; an empty set falls back to whole hours
    pub fn effective(&self) -> Vec<Mode> {
        if self.modes.is_empty() {
            vec![Mode::Hours]
        } else {
            self.iter().collect()
        }
    }
}

impl FromIterator<Mode> for DifficultyModes {
    fn from_iter<I: IntoIterator<Item = Mode>>(iter: I) -> Self {
        Self::from_modes(iter)
    }
}

/// Draw a random target time.
///
/// One mode is picked uniformly per call, with no memory of earlier calls.
pub fn generate<R: Rng + ?Sized>(
    modes: &DifficultyModes,
    use_24_hour: bool,
    rng: &mut R,
) -> ClockTime {
    let candidates = modes.effective();
    let mode = *candidates.choose(rng).unwrap_or(&Mode::Hours);

    let hour = if use_24_hour {
        rng.gen_range(0..24)
    } else {
        match rng.gen_range(0..12) {
            0 => 12,
            h => h,
        }
    };
    let minute = mode.draw_minute(rng);

    log::trace!("generated {hour}:{minute:02} from mode {mode}");
    ClockTime::new(hour, minute)
}

/// Configured generator for a game session
#[derive(Debug, Clone)]
pub struct TimeGenerator {
    modes: DifficultyModes,
    use_24_hour: bool,
}

impl TimeGenerator {
    pub fn new(modes: DifficultyModes, use_24_hour: bool) -> Self {
        Self { modes, use_24_hour }
    }

    pub fn modes(&self) -> &DifficultyModes {
        &self.modes
    }

    pub fn use_24_hour(&self) -> bool {
        self.use_24_hour
    }

    pub fn next_time<R: Rng + ?Sized>(&self, rng: &mut R) -> ClockTime {
        generate(&self.modes, self.use_24_hour, rng)
    }
}
