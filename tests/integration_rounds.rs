// Every generated target must be answerable in each direction and input mode
// with the answer a child would give.

use klokkijken::digit_input::DigitBuffer;
use klokkijken::dutch::{phrase_for, word_palette};
use klokkijken::evaluator::{evaluate, Answer};
use klokkijken::generator::TimeGenerator;
use klokkijken::{DifficultyModes, Direction, HandPosition, InputMode, Mode};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn all_modes() -> DifficultyModes {
    Mode::ALL.iter().copied().collect()
}

#[test]
fn thousand_targets_stay_on_the_dial() {
    let generator = TimeGenerator::new(all_modes(), false);
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..1000 {
        let target = generator.next_time(&mut rng);
        assert!((1..=12).contains(&target.hour), "hour out of range: {target}");
        assert!(target.minute <= 59, "minute out of range: {target}");
    }
}

#[test]
fn generated_targets_accept_their_own_answers() {
    let generator = TimeGenerator::new(all_modes(), false);
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..1000 {
        let target = generator.next_time(&mut rng);

        let mut digits = DigitBuffer::new(false);
        for key in format!("{:02}{:02}", target.hour, target.minute).chars() {
            assert!(digits.push(key));
        }
        assert!(
            evaluate(
                Direction::Reading,
                InputMode::Digital,
                target,
                Answer::Digits(digits.as_str())
            ),
            "{target} typed as {}",
            digits.as_str()
        );

        let words: Vec<String> = phrase_for(target.hour, target.minute)
            .split(' ')
            .map(str::to_string)
            .collect();
        assert!(evaluate(
            Direction::Reading,
            InputMode::Text,
            target,
            Answer::Words(&words)
        ));

        let hands = HandPosition::new(target.hour, target.minute);
        assert!(evaluate(
            Direction::Setting,
            InputMode::Digital,
            target,
            Answer::Hands(hands)
        ));
    }
}

#[test]
fn phrases_only_use_palette_words() {
    let mut rng = StdRng::seed_from_u64(99);
    // five and minutes alone leave "kwart" off the pad
    let sets = [
        DifficultyModes::from_modes([Mode::Hours]),
        DifficultyModes::from_modes([Mode::Half]),
        DifficultyModes::from_modes([Mode::Quarter]),
        DifficultyModes::from_modes([Mode::Quarter, Mode::Minutes]),
        all_modes(),
    ];
    for modes in sets {
        let palette = word_palette(&modes);
        let generator = TimeGenerator::new(modes, false);

        for _ in 0..200 {
            let target = generator.next_time(&mut rng);
            let phrase = phrase_for(target.hour, target.minute);
            for word in phrase.split(' ') {
                assert!(palette.contains(&word), "{word:?} from {phrase:?} missing");
            }
        }
    }
}

#[test]
fn midnight_needs_twelve_on_the_dial() {
    let generator = TimeGenerator::new(DifficultyModes::from_modes([Mode::Half]), true);
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        let target = generator.next_time(&mut rng);
        assert_eq!(target.minute, 30);
        assert!(target.hour <= 23);
    }

    let midnight = klokkijken::ClockTime::new(0, 30);
    assert!(evaluate(
        Direction::Setting,
        InputMode::Text,
        midnight,
        Answer::Hands(HandPosition::new(12, 30))
    ));
}
