//! Event plumbing between the terminal and the session.
//!
//! The binary polls crossterm, tests push events down a channel; both look
//! the same to [`Runner`], which turns quiet periods into ticks.

use std::io;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

use crate::session::{Effect, TimerToken};

#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

pub trait AppEventSource {
    /// Wait at most `timeout` for something to happen; `None` if nothing did
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<AppEvent>>;
}

/// Reads the real terminal
#[derive(Debug, Default)]
pub struct CrosstermEventSource;

impl AppEventSource for CrosstermEventSource {
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<AppEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        Ok(match event::read()? {
            // Windows reports releases too
            CtEvent::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
            CtEvent::Resize(_, _) => Some(AppEvent::Resize),
            _ => None,
        })
    }
}

/// Scripted events for headless runs; a closed channel just means quiet
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl AppEventSource for TestEventSource {
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<AppEvent>> {
        match self.rx.recv_timeout(timeout) {
            Ok(ev) => Ok(Some(ev)),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => Ok(None),
        }
    }
}

pub struct Runner<E: AppEventSource> {
    source: E,
    tick_rate: Duration,
}

impl<E: AppEventSource> Runner<E> {
    pub fn new(source: E, tick_rate: Duration) -> Self {
        Self { source, tick_rate }
    }

    /// Next event, or `Tick` once `tick_rate` passes without one
    pub fn step(&mut self) -> io::Result<AppEvent> {
        Ok(self
            .source
            .next_event(self.tick_rate)?
            .unwrap_or(AppEvent::Tick))
    }
}

/// Deadlines for the session's deferred transitions
#[derive(Debug, Default)]
pub struct Scheduler {
    timers: Vec<(TimerToken, Instant)>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Carry out the timer effects of a session event; returns the final
    /// score if the session exited
    pub fn apply(&mut self, effects: &[Effect], now: Instant) -> Option<u32> {
        let mut exited = None;
        for effect in effects {
            match effect {
                Effect::Schedule { token, after } => self.timers.push((*token, now + *after)),
                Effect::Cancel(token) => self.timers.retain(|(t, _)| t != token),
                Effect::Exited { final_score } => {
                    self.timers.clear();
                    exited = Some(*final_score);
                }
            }
        }
        exited
    }

    /// Remove and return the timers that are due at `now`, earliest first
    pub fn due(&mut self, now: Instant) -> Vec<TimerToken> {
        let mut due: Vec<(TimerToken, Instant)> = Vec::new();
        self.timers.retain(|&(token, at)| {
            if at <= now {
                due.push((token, at));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(_, at)| at);
        due.into_iter().map(|(token, _)| token).collect()
    }

    pub fn is_idle(&self) -> bool {
        self.timers.is_empty()
    }
}
