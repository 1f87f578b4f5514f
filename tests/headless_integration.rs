use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use klokkijken::config::Config;
use klokkijken::controls::Controls;
use klokkijken::feedback::FeedbackBook;
use klokkijken::leaderboard::{Leaderboard, LeaderboardReporter};
use klokkijken::runtime::{AppEvent, Runner, Scheduler, TestEventSource};
use klokkijken::session::{Event, GameSession, Phase, NEXT_ROUND_DELAY};
use klokkijken::storage::MemoryStore;
use klokkijken::{Direction, InputMode};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn hours_only(direction: Direction, input_mode: InputMode) -> Config {
    Config {
        direction,
        input_mode,
        half: false,
        quarter: false,
        player_name: "Noor".into(),
        ..Config::default()
    }
}

fn press(tx: &mpsc::Sender<AppEvent>, code: KeyCode) {
    tx.send(AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
        .unwrap();
}

/// Headless stand-in for the binary's event loop. Timers are fast forwarded
/// on every tick so the test does not sleep through the round delay.
struct Harness {
    session: GameSession<StdRng>,
    controls: Controls,
    scheduler: Scheduler,
    reporter: LeaderboardReporter<MemoryStore>,
}

impl Harness {
    fn new(config: &Config) -> Self {
        Self {
            session: GameSession::new(
                config,
                FeedbackBook::embedded().clone(),
                StdRng::seed_from_u64(11),
            ),
            controls: Controls::new(),
            scheduler: Scheduler::new(),
            reporter: LeaderboardReporter::new(
                MemoryStore::new(),
                config.player_name.clone(),
                config.settings_summary(),
            ),
        }
    }

    fn dispatch(&mut self, event: Event) -> Option<u32> {
        let effects = match event {
            Event::Exit => self.session.exit_with(&mut self.reporter),
            event => self.session.handle(event),
        };
        self.scheduler.apply(&effects, Instant::now())
    }

    /// Drive events until the channel runs dry; returns the final score on exit
    fn run(&mut self, runner: &mut Runner<TestEventSource>, steps: u32) -> Option<u32> {
        for _ in 0..steps {
            match runner.step().unwrap() {
                AppEvent::Tick => {
                    let later = Instant::now() + NEXT_ROUND_DELAY;
                    for token in self.scheduler.due(later) {
                        self.dispatch(Event::Elapsed(token));
                    }
                    if self.scheduler.is_idle() {
                        return None;
                    }
                }
                AppEvent::Resize => {}
                AppEvent::Key(key) => {
                    if let Some(event) = self.controls.map_key(key, &self.session) {
                        if let Some(score) = self.dispatch(event) {
                            return Some(score);
                        }
                    }
                }
            }
        }
        None
    }
}

fn runner() -> (mpsc::Sender<AppEvent>, Runner<TestEventSource>) {
    let (tx, rx) = mpsc::channel();
    let es = TestEventSource::new(rx);
    (tx, Runner::new(es, Duration::from_millis(5)))
}

#[test]
fn headless_digital_round_scores_and_moves_on() {
    let mut harness = Harness::new(&hours_only(Direction::Reading, InputMode::Digital));
    let (tx, mut runner) = runner();

    let first = harness.session.round().target;
    for c in format!("{:02}00", first.hour).chars() {
        press(&tx, KeyCode::Char(c));
    }
    press(&tx, KeyCode::Enter);

    assert_eq!(harness.run(&mut runner, 100), None);
    assert_eq!(harness.session.score(), 10);
    assert_eq!(harness.session.phase(), &Phase::AwaitingInput);
    assert!(harness.session.round().digits.is_empty());
    assert_eq!(harness.session.view().feedback, None);
}

#[test]
fn headless_word_pad_round() {
    let mut harness = Harness::new(&hours_only(Direction::Reading, InputMode::Text));
    let (tx, mut runner) = runner();

    // "<hour word> uur": move to the number, pick it, then walk to "uur"
    let hour = harness.session.round().target.hour12() as usize;
    let palette = harness.session.palette();
    let uur = palette.iter().position(|w| *w == "uur").unwrap();
    for _ in 1..hour {
        press(&tx, KeyCode::Right);
    }
    press(&tx, KeyCode::Char(' '));
    for _ in hour - 1..uur {
        press(&tx, KeyCode::Tab);
    }
    press(&tx, KeyCode::Char(' '));
    press(&tx, KeyCode::Enter);

    harness.run(&mut runner, 200);
    assert_eq!(harness.session.score(), 10);
}

#[test]
fn headless_setting_hands_with_arrows() {
    let mut harness = Harness::new(&hours_only(Direction::Setting, InputMode::Digital));
    let (tx, mut runner) = runner();

    // hands start at twelve
    let target = harness.session.round().target.hour12();
    for _ in 0..target % 12 {
        press(&tx, KeyCode::Right);
    }
    press(&tx, KeyCode::Enter);

    harness.run(&mut runner, 100);
    assert_eq!(harness.session.score(), 10);
}

#[test]
fn headless_escape_records_score() {
    let mut harness = Harness::new(&hours_only(Direction::Reading, InputMode::Digital));
    let (tx, mut runner) = runner();

    let target = harness.session.round().target;
    // one wrong try first: five points
    for c in format!("{:02}00", target.hour % 12 + 1).chars() {
        press(&tx, KeyCode::Char(c));
    }
    press(&tx, KeyCode::Enter);
    for c in format!("{:02}00", target.hour).chars() {
        press(&tx, KeyCode::Char(c));
    }
    press(&tx, KeyCode::Enter);
    press(&tx, KeyCode::Esc);

    assert_eq!(harness.run(&mut runner, 100), Some(5));
    assert!(harness.session.is_ended());
    assert!(harness.scheduler.is_idle());

    let board = Leaderboard::load(harness.reporter.store()).unwrap();
    assert_eq!(board.entries().len(), 1);
    assert_eq!(board.entries()[0].name, "Noor");
    assert_eq!(board.entries()[0].score, 5);
}
