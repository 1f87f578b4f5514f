// Library surface for headless/integration tests and reuse.
// The terminal front-end lives in main.rs and ui/.
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod controls;
pub mod digit_input;
pub mod dutch;
pub mod evaluator;
pub mod feedback;
pub mod generator;
pub mod leaderboard;
pub mod runtime;
pub mod session;
pub mod storage;
pub mod word_input;

pub use clock::{ClockTime, HandPosition};
pub use evaluator::{Direction, InputMode};
pub use generator::{DifficultyModes, Mode};
pub use session::{Event, GameSession};
