use serde::{Deserialize, Serialize};
use std::fmt;

/// A target time for one round.
///
/// `hour` is 0..=23 when generated in 24-hour mode, otherwise 1..=12 where 12
/// stands for both midnight and noon. `minute` is always 0..=59.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    /// Hour as shown on an analog face, 1..=12 (0, 12 and 24 all map to 12)
    pub fn hour12(&self) -> u8 {
        to_hour12(self.hour)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_hh_mm(self.hour, self.minute))
    }
}

pub fn to_hour12(hour: u8) -> u8 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}

/// Zero padded `HH:MM`, used when the target is shown as a digital clock
pub fn format_hh_mm(hour: u8, minute: u8) -> String {
    format!("{hour:02}:{minute:02}")
}

/// Where the player has put the hands of the interactive clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandPosition {
    pub hour: u8,
    pub minute: u8,
}

impl Default for HandPosition {
    fn default() -> Self {
        Self {
            hour: 12,
            minute: 0,
        }
    }
}

impl HandPosition {
    pub fn new(hour: u8, minute: u8) -> Self {
        Self {
            hour: to_hour12(hour),
            minute: minute % 60,
        }
    }

    /// Move the hour hand by `steps` positions, wrapping within 1..=12
    pub fn nudge_hour(&mut self, steps: i32) {
        let zero_based = (self.hour as i32 - 1 + steps).rem_euclid(12);
        self.hour = (zero_based + 1) as u8;
    }

    /// Move the minute hand by `steps` minutes, wrapping within 0..=59.
    /// The hour hand is left alone, it is dragged separately.
    pub fn nudge_minute(&mut self, steps: i32) {
        self.minute = (self.minute as i32 + steps).rem_euclid(60) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hour12() {
        assert_eq!(to_hour12(0), 12);
        assert_eq!(to_hour12(12), 12);
        assert_eq!(to_hour12(24), 12);
        assert_eq!(to_hour12(13), 1);
        assert_eq!(to_hour12(7), 7);
    }

    #[test]
    fn test_format_hh_mm_pads() {
        assert_eq!(format_hh_mm(3, 5), "03:05");
        assert_eq!(ClockTime::new(18, 45).to_string(), "18:45");
    }

    #[test]
    fn test_hand_nudging_wraps() {
        let mut hands = HandPosition::default();
        hands.nudge_hour(1);
        assert_eq!(hands.hour, 1);
        hands.nudge_hour(-2);
        assert_eq!(hands.hour, 11);

        hands.nudge_minute(-1);
        assert_eq!(hands.minute, 59);
        hands.nudge_minute(5);
        assert_eq!(hands.minute, 4);
    }

    #[test]
    fn test_hand_position_new_normalizes() {
        assert_eq!(HandPosition::new(0, 75), HandPosition { hour: 12, minute: 15 });
    }
}
