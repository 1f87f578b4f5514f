//! One game session: rounds, scoring and interstitials.
//!
//! All state changes go through [`GameSession::handle`], one event at a time.
//! Timed transitions are never applied directly; the session hands out a
//! [`Effect::Schedule`] with a token and only acts on an
//! [`Event::Elapsed`] carrying the token it is still waiting for.

use crate::clock::{format_hh_mm, ClockTime, HandPosition};
use crate::config::Config;
use crate::digit_input::DigitBuffer;
use crate::dutch::{phrase_for, word_palette};
use crate::evaluator::{evaluate, Answer, Direction, InputMode};
use crate::feedback::{FeedbackBook, FeedbackKind, ImageLookup, NoImages};
use crate::generator::TimeGenerator;
use crate::word_input::WordSequence;
use rand::Rng;
use std::path::PathBuf;
use std::time::Duration;

/// Pause between a correct answer and the next round
pub const NEXT_ROUND_DELAY: Duration = Duration::from_millis(2000);
/// Pause between an answer and the interstitial it triggers
pub const INTERSTITIAL_DELAY: Duration = Duration::from_millis(1000);

pub const MILESTONE_EVERY: u32 = 5;
pub const ATTEMPTS_BEFORE_CALM: u32 = 3;

pub const CORRECT_MESSAGE: &str = "Goed gedaan!";
pub const INCORRECT_MESSAGE: &str = "Probeer het nog eens!";
pub const CALM_FALLBACK: &str = "Rustig aan, denk goed na!";

/// Receives the final score when the player leaves
pub trait ScoreReporter {
    fn on_exit(&mut self, final_score: u32);
}

/// Identifies one scheduled transition
pub type TimerToken = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Keypad key: a digit or the separator
    Key(char),
    Word(String),
    Delete,
    SetHands(HandPosition),
    Submit,
    Dismiss,
    Elapsed(TimerToken),
    Exit,
}

/// What the caller has to do after an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Schedule { token: TimerToken, after: Duration },
    Cancel(TimerToken),
    Exited { final_score: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl Outcome {
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Correct => CORRECT_MESSAGE,
            Outcome::Incorrect => INCORRECT_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterstitialKind {
    Success,
    Calm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interstitial {
    pub kind: InterstitialKind,
    pub text: String,
    pub image: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    AwaitingInput,
    /// Answer judged, waiting for the scheduled follow-up
    Answered(Outcome),
    Interstitial(Interstitial),
    Ended,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Deferred {
    NewRound,
    Show(Interstitial),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending {
    token: TimerToken,
    command: Deferred,
}

/// Per round state, replaced wholesale when a new round starts
#[derive(Debug, Clone)]
pub struct RoundState {
    pub target: ClockTime,
    pub attempts: u32,
    pub last_result: Option<Outcome>,
    /// Last submission was wrong; the next keystroke starts over
    pub errored: bool,
    pub digits: DigitBuffer,
    pub words: WordSequence,
    pub hands: HandPosition,
}

impl RoundState {
    fn new(target: ClockTime, use_24_hour: bool) -> Self {
        Self {
            target,
            attempts: 0,
            last_result: None,
            errored: false,
            digits: DigitBuffer::new(use_24_hour),
            words: WordSequence::new(),
            hands: HandPosition::default(),
        }
    }

    fn clear_input(&mut self) {
        self.digits.clear();
        self.words.clear();
    }

    fn acknowledge_error(&mut self) {
        self.errored = false;
        self.last_result = None;
    }
}

/// Everything a front-end needs to draw the current state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView<'a> {
    pub prompt: &'static str,
    /// Time shown on the analog face: the target when reading, the hands when setting
    pub face: (u8, u8),
    /// Target as text, only in the setting direction
    pub target_text: Option<String>,
    pub input_text: Option<String>,
    pub player_name: &'a str,
    pub score: u32,
    pub feedback: Option<&'static str>,
    pub interstitial: Option<&'a Interstitial>,
}

pub struct GameSession<R: Rng> {
    direction: Direction,
    input_mode: InputMode,
    player_name: String,
    generator: TimeGenerator,
    book: FeedbackBook,
    images: Box<dyn ImageLookup>,
    rng: R,
    round: RoundState,
    phase: Phase,
    pending: Option<Pending>,
    next_token: TimerToken,
    score: u32,
    correct_answers: u32,
    correct_streak: u32,
    wrong_streak: u32,
}

impl<R: Rng> GameSession<R> {
    pub fn new(config: &Config, book: FeedbackBook, rng: R) -> Self {
        let generator = TimeGenerator::new(config.modes(), config.use_24_hour);
        let mut session = Self {
            direction: config.direction,
            input_mode: config.input_mode,
            player_name: config.player_name.clone(),
            generator,
            book,
            images: Box::new(NoImages),
            rng,
            round: RoundState::new(ClockTime::new(12, 0), config.use_24_hour),
            phase: Phase::AwaitingInput,
            pending: None,
            next_token: 0,
            score: 0,
            correct_answers: 0,
            correct_streak: 0,
            wrong_streak: 0,
        };
        session.start_round();
        session
    }

    pub fn with_images(mut self, images: Box<dyn ImageLookup>) -> Self {
        self.images = images;
        self
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    pub fn correct_streak(&self) -> u32 {
        self.correct_streak
    }

    pub fn wrong_streak(&self) -> u32 {
        self.wrong_streak
    }

    pub fn pending_token(&self) -> Option<TimerToken> {
        self.pending.as_ref().map(|p| p.token)
    }

    pub fn is_ended(&self) -> bool {
        self.phase == Phase::Ended
    }

    /// Words the word pad offers in this session
    pub fn palette(&self) -> Vec<&'static str> {
        word_palette(self.generator.modes())
    }

    pub fn view(&self) -> SessionView<'_> {
        let prompt = match (self.direction, self.input_mode) {
            (Direction::Reading, InputMode::Digital) => "Hoe laat is het?",
            (Direction::Reading, InputMode::Text) => "Schrijf in woorden:",
            (Direction::Setting, _) => "Zet de wijzers goed:",
        };
        let target = self.round.target;
        let (face, target_text, input_text) = match self.direction {
            Direction::Reading => {
                let input = match self.input_mode {
                    InputMode::Digital => self.round.digits.as_str().to_string(),
                    InputMode::Text => self.round.words.sentence(),
                };
                ((target.hour, target.minute), None, Some(input))
            }
            Direction::Setting => {
                let text = match self.input_mode {
                    InputMode::Digital => format_hh_mm(target.hour, target.minute),
                    InputMode::Text => phrase_for(target.hour, target.minute),
                };
                let hands = self.round.hands;
                ((hands.hour, hands.minute), Some(text), None)
            }
        };
        let interstitial = match &self.phase {
            Phase::Interstitial(i) => Some(i),
            _ => None,
        };

        SessionView {
            prompt,
            face,
            target_text,
            input_text,
            player_name: &self.player_name,
            score: self.score,
            feedback: self.round.last_result.map(|o| o.message()),
            interstitial,
        }
    }

    /// Apply one event and return the effects the caller must carry out
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        if self.phase == Phase::Ended {
            log::trace!("session ended, ignoring {event:?}");
            return Vec::new();
        }
        let awaiting_input = self.phase == Phase::AwaitingInput;

        match event {
            Event::Exit => self.exit(),
            Event::Elapsed(token) => self.elapsed(token),
            Event::Dismiss => self.dismiss(),
            event if !awaiting_input => {
                log::trace!("ignoring {event:?} while {:?}", self.phase);
                Vec::new()
            }
            Event::Key(key) => {
                self.key(key);
                Vec::new()
            }
            Event::Word(word) => {
                self.word(word);
                Vec::new()
            }
            Event::Delete => {
                self.delete();
                Vec::new()
            }
            Event::SetHands(hands) => {
                if self.direction == Direction::Setting {
                    self.round.hands = hands;
                }
                Vec::new()
            }
            Event::Submit => self.submit(),
        }
    }

    fn start_round(&mut self) {
        let target = self.generator.next_time(&mut self.rng);
        log::debug!("new round, target {target}");
        self.round = RoundState::new(target, self.generator.use_24_hour());
        self.phase = Phase::AwaitingInput;
    }

    fn key(&mut self, key: char) {
        if (self.direction, self.input_mode) != (Direction::Reading, InputMode::Digital) {
            return;
        }
        if self.round.errored {
            self.round.digits.clear();
            self.round.acknowledge_error();
        }
        self.round.digits.push(key);
    }

    fn word(&mut self, word: String) {
        if (self.direction, self.input_mode) != (Direction::Reading, InputMode::Text) {
            return;
        }
        if self.round.errored {
            self.round.words.replace_with(word);
            self.round.acknowledge_error();
        } else {
            self.round.words.push(word);
        }
    }

    fn delete(&mut self) {
        self.round.acknowledge_error();
        match self.input_mode {
            InputMode::Digital => self.round.digits.delete(),
            InputMode::Text => self.round.words.delete(),
        }
    }

    fn submit(&mut self) -> Vec<Effect> {
        let round = &self.round;
        let answer = match (self.direction, self.input_mode) {
            (Direction::Setting, _) => Answer::Hands(round.hands),
            (Direction::Reading, InputMode::Digital) => Answer::Digits(round.digits.as_str()),
            (Direction::Reading, InputMode::Text) => Answer::Words(round.words.words()),
        };
        let correct = evaluate(self.direction, self.input_mode, round.target, answer);
        log::debug!(
            "attempt {} at {} judged {}",
            round.attempts + 1,
            round.target,
            if correct { "correct" } else { "incorrect" }
        );

        if correct {
            self.on_correct()
        } else {
            self.on_incorrect()
        }
    }

    fn on_correct(&mut self) -> Vec<Effect> {
        let points = match self.round.attempts {
            0 => 10,
            1 => 5,
            _ => 1,
        };
        self.score += points;
        self.correct_answers += 1;
        self.correct_streak += 1;
        self.wrong_streak = 0;
        self.round.attempts = 0;
        self.round.last_result = Some(Outcome::Correct);
        self.phase = Phase::Answered(Outcome::Correct);

        if self.correct_answers % MILESTONE_EVERY == 0 {
            let interstitial = self.interstitial(InterstitialKind::Success);
            log::info!("milestone at {} correct answers", self.correct_answers);
            self.schedule(Deferred::Show(interstitial), INTERSTITIAL_DELAY)
        } else {
            self.schedule(Deferred::NewRound, NEXT_ROUND_DELAY)
        }
    }

    fn on_incorrect(&mut self) -> Vec<Effect> {
        self.round.attempts += 1;
        self.wrong_streak += 1;
        self.correct_streak = 0;
        self.round.errored = true;
        self.round.last_result = Some(Outcome::Incorrect);

        if self.round.attempts == ATTEMPTS_BEFORE_CALM {
            let interstitial = self.interstitial(InterstitialKind::Calm);
            self.phase = Phase::Answered(Outcome::Incorrect);
            self.schedule(Deferred::Show(interstitial), INTERSTITIAL_DELAY)
        } else {
            Vec::new()
        }
    }

    fn interstitial(&mut self, kind: InterstitialKind) -> Interstitial {
        let feedback_kind = match kind {
            InterstitialKind::Success => FeedbackKind::Compliments,
            InterstitialKind::Calm => FeedbackKind::Encouragements,
        };
        match self.book.pick(feedback_kind, &mut self.rng) {
            Some(record) => Interstitial {
                kind,
                text: record.text.clone(),
                image: self.images.image_for(feedback_kind, &record.image_id),
            },
            None => {
                log::warn!("no {feedback_kind} available, using fallback text");
                let text = match kind {
                    InterstitialKind::Success => format!("Goed bezig, {}!", self.player_name),
                    InterstitialKind::Calm => CALM_FALLBACK.to_string(),
                };
                Interstitial {
                    kind,
                    text,
                    image: None,
                }
            }
        }
    }

    fn schedule(&mut self, command: Deferred, after: Duration) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(stale) = self.pending.take() {
            effects.push(Effect::Cancel(stale.token));
        }
        self.next_token += 1;
        let token = self.next_token;
        self.pending = Some(Pending { token, command });
        effects.push(Effect::Schedule { token, after });
        effects
    }

    fn elapsed(&mut self, token: TimerToken) -> Vec<Effect> {
        match self.pending.take() {
            Some(pending) if pending.token == token => match pending.command {
                Deferred::NewRound => self.start_round(),
                Deferred::Show(interstitial) => {
                    log::debug!("showing {:?} interstitial", interstitial.kind);
                    self.phase = Phase::Interstitial(interstitial);
                }
            },
            other => {
                log::trace!("stale timer {token}");
                self.pending = other;
            }
        }
        Vec::new()
    }

    fn dismiss(&mut self) -> Vec<Effect> {
        let kind = match &self.phase {
            Phase::Interstitial(i) => i.kind,
            _ => return Vec::new(),
        };
        match kind {
            InterstitialKind::Success => self.start_round(),
            InterstitialKind::Calm => {
                // same round again, attempts and target are kept
                self.round.clear_input();
                self.round.acknowledge_error();
                self.phase = Phase::AwaitingInput;
            }
        }
        Vec::new()
    }

    fn exit(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(pending) = self.pending.take() {
            effects.push(Effect::Cancel(pending.token));
        }
        log::info!("session over with score {}", self.score);
        self.phase = Phase::Ended;
        effects.push(Effect::Exited {
            final_score: self.score,
        });
        effects
    }

    /// Exit and hand the final score to `reporter`
    pub fn exit_with<S: ScoreReporter + ?Sized>(&mut self, reporter: &mut S) -> Vec<Effect> {
        let effects = self.handle(Event::Exit);
        for effect in &effects {
            if let Effect::Exited { final_score } = effect {
                reporter.on_exit(*final_score);
            }
        }
        effects
    }
}
