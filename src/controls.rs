use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::Rng;

use crate::evaluator::{Direction, InputMode};
use crate::session::{Event, GameSession, Phase};

/// Translates terminal keys into session events.
///
/// Holds the little bit of front-end state the session doesn't care about:
/// which word on the word pad is highlighted.
#[derive(Debug, Clone, Default)]
pub struct Controls {
    palette_cursor: usize,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn palette_cursor(&self) -> usize {
        self.palette_cursor
    }

    fn move_cursor(&mut self, steps: isize, palette_len: usize) {
        if palette_len == 0 {
            return;
        }
        let len = palette_len as isize;
        self.palette_cursor = (self.palette_cursor as isize + steps).rem_euclid(len) as usize;
    }

    /// The event for `key`, if any. Esc and Ctrl+C always exit.
    pub fn map_key<R: Rng>(&mut self, key: KeyEvent, session: &GameSession<R>) -> Option<Event> {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return Some(Event::Exit);
        }

        if let Phase::Interstitial(_) = session.phase() {
            return match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => Some(Event::Dismiss),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Enter => return Some(Event::Submit),
            KeyCode::Backspace | KeyCode::Delete => return Some(Event::Delete),
            _ => {}
        }

        match (session.direction(), session.input_mode()) {
            (Direction::Reading, InputMode::Digital) => match key.code {
                KeyCode::Char(c) if c.is_ascii_digit() || c == ':' => Some(Event::Key(c)),
                // the keypad has no other separator, but '.' is where people reach
                KeyCode::Char('.') => Some(Event::Key(':')),
                _ => None,
            },
            (Direction::Reading, InputMode::Text) => {
                let palette = session.palette();
                match key.code {
                    KeyCode::Left | KeyCode::Up => {
                        self.move_cursor(-1, palette.len());
                        None
                    }
                    KeyCode::Right | KeyCode::Down | KeyCode::Tab => {
                        self.move_cursor(1, palette.len());
                        None
                    }
                    KeyCode::Char(' ') => palette
                        .get(self.palette_cursor)
                        .map(|word| Event::Word(word.to_string())),
                    _ => None,
                }
            }
            (Direction::Setting, _) => {
                let mut hands = session.round().hands;
                match key.code {
                    KeyCode::Left => hands.nudge_hour(-1),
                    KeyCode::Right => hands.nudge_hour(1),
                    KeyCode::Up => hands.nudge_minute(1),
                    KeyCode::Down => hands.nudge_minute(-1),
                    KeyCode::PageUp => hands.nudge_minute(5),
                    KeyCode::PageDown => hands.nudge_minute(-5),
                    _ => return None,
                }
                Some(Event::SetHands(hands))
            }
        }
    }
}
