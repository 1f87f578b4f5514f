//! Keypad entry of a digital time.
//!
//! Digits arrive one at a time and the buffer keeps a best guess `HH:MM`
//! display. Separator placement is derived from the digits, a typed `:` only
//! shows up until the next digit arrives.

pub const SEPARATOR: char = ':';
const MAX_DIGITS: usize = 4;

/// Format a run of up to four digits as a partial `HH:MM`.
///
/// Three digit runs are ambiguous, the first matching rule wins:
/// an hour that is too large, a `X00` run, a minute tens digit above 5,
/// and finally a two digit hour.
pub fn format_digits(raw: &str, max_hour: u8) -> String {
    let digits: Vec<char> = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let value = |chars: &[char]| {
        chars
            .iter()
            .fold(0u32, |acc, c| acc * 10 + c.to_digit(10).unwrap_or(0))
    };
    let split = |at: usize| {
        let (hour, minute) = digits.split_at(at);
        format!(
            "{}{SEPARATOR}{}",
            hour.iter().collect::<String>(),
            minute.iter().collect::<String>()
        )
    };

    match digits.len() {
        0 | 1 => digits.iter().collect(),
        2 => {
            if value(&digits[..]) > max_hour as u32 {
                split(1)
            } else {
                digits.iter().collect()
            }
        }
        3 => {
            let first_two = value(&digits[..2]);
            let third = value(&digits[2..]);
            if first_two > max_hour as u32 || digits[1..] == ['0', '0'] || third > 5 {
                split(1)
            } else {
                split(2)
            }
        }
        _ => split(2),
    }
}

/// In-progress digital answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitBuffer {
    display: String,
    max_hour: u8,
}

impl DigitBuffer {
    pub fn new(use_24_hour: bool) -> Self {
        Self {
            display: String::new(),
            max_hour: if use_24_hour { 23 } else { 12 },
        }
    }

    pub fn as_str(&self) -> &str {
        &self.display
    }

    pub fn is_empty(&self) -> bool {
        self.display.is_empty()
    }

    pub fn has_separator(&self) -> bool {
        self.display.contains(SEPARATOR)
    }

    fn raw_digits(&self) -> String {
        self.display.chars().filter(|c| c.is_ascii_digit()).collect()
    }

    /// Feed one key. Returns false when the key was rejected and nothing changed.
    pub fn push(&mut self, key: char) -> bool {
        if key == SEPARATOR {
            if self.has_separator() {
                return false;
            }
            self.display.push(SEPARATOR);
            return true;
        }
        if !key.is_ascii_digit() {
            return false;
        }

        let mut raw = self.raw_digits();
        raw.push(key);
        if raw.len() > MAX_DIGITS {
            return false;
        }
        self.display = format_digits(&raw, self.max_hour);
        true
    }

    /// Remove the last displayed character and reformat what is left
    pub fn delete(&mut self) {
        self.display.pop();
        let raw = self.raw_digits();
        self.display = format_digits(&raw, self.max_hour);
    }

    pub fn clear(&mut self) {
        self.display.clear();
    }

    /// Hour and minute once a separator splits the display into two numbers
    pub fn parse(&self) -> Option<(u32, u32)> {
        parse_hh_mm(&self.display)
    }
}

pub fn parse_hh_mm(display: &str) -> Option<(u32, u32)> {
    let (hour, minute) = display.split_once(SEPARATOR)?;
    if minute.contains(SEPARATOR) {
        return None;
    }
    Some((hour.parse().ok()?, minute.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(keys: &str, use_24_hour: bool) -> DigitBuffer {
        let mut buffer = DigitBuffer::new(use_24_hour);
        for key in keys.chars() {
            buffer.push(key);
        }
        buffer
    }

    #[test]
    fn test_short_runs_are_shown_raw() {
        assert_eq!(format_digits("", 12), "");
        assert_eq!(format_digits("7", 12), "7");
        assert_eq!(format_digits("12", 12), "12");
        assert_eq!(format_digits("13", 12), "1:3");
        assert_eq!(format_digits("13", 23), "13");
        assert_eq!(format_digits("24", 23), "2:4");
    }

    #[test]
    fn test_three_digit_priorities() {
        assert_eq!(format_digits("100", 12), "1:00");
        assert_eq!(format_digits("135", 12), "1:35");
        assert_eq!(format_digits("101", 12), "10:1");
        assert_eq!(format_digits("106", 12), "1:06");
        assert_eq!(format_digits("230", 12), "2:30");
        assert_eq!(format_digits("230", 23), "23:0");
        assert_eq!(format_digits("115", 12), "11:5");
    }

    #[test]
    fn test_four_digits_always_split_in_the_middle() {
        assert_eq!(format_digits("1234", 12), "12:34");
        assert_eq!(format_digits("9999", 12), "99:99");
        assert_eq!(format_digits("0005", 23), "00:05");
    }

    #[test]
    fn test_fifth_digit_is_rejected() {
        let mut buffer = typed("1030", false);
        assert!(!buffer.push('5'));
        assert_eq!(buffer.as_str(), "10:30");
    }

    #[test]
    fn test_typed_separator_is_display_only() {
        let mut buffer = typed("1:", false);
        assert_eq!(buffer.as_str(), "1:");
        assert!(!buffer.push(':'));
        buffer.push('2');
        assert_eq!(buffer.as_str(), "12");
        buffer.push('1');
        buffer.push('5');
        assert_eq!(buffer.as_str(), "12:15");
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let mut buffer = typed("6", false);
        assert!(!buffer.push('x'));
        assert_eq!(buffer.as_str(), "6");
    }

    #[test]
    fn test_delete_reformats() {
        let mut buffer = typed("135", false);
        assert_eq!(buffer.as_str(), "1:35");
        buffer.delete();
        assert_eq!(buffer.as_str(), "1:3");
        buffer.delete();
        assert_eq!(buffer.as_str(), "1");
        buffer.delete();
        assert!(buffer.is_empty());
        buffer.delete();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_delete_drops_typed_separator() {
        let mut buffer = typed("4:", false);
        buffer.delete();
        assert_eq!(buffer.as_str(), "4");
    }

    #[test]
    fn test_parse() {
        assert_eq!(parse_hh_mm("6:15"), Some((6, 15)));
        assert_eq!(parse_hh_mm("10:1"), Some((10, 1)));
        assert_eq!(parse_hh_mm("615"), None);
        assert_eq!(parse_hh_mm("6:"), None);
        assert_eq!(typed("1845", true).parse(), Some((18, 45)));
    }
}
