mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use klokkijken::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    controls::Controls,
    feedback::{DirImageLookup, FeedbackBook},
    leaderboard::{Leaderboard, LeaderboardReporter},
    runtime::{AppEvent, CrosstermEventSource, Runner, Scheduler},
    session::{Event, GameSession},
    storage::{KeyValueStore, MemoryStore, SqliteStore},
    Direction, InputMode, Mode,
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
    time::{Duration, Instant},
};

const TICK_RATE_MS: u64 = 100;

/// learn to read the clock, in Dutch
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Klokkijken shows an analog clock and asks what time it is, or asks you to set the hands. Answers are given as digits or as Dutch words, points are kept on a local leaderboard."
)]
pub struct Cli {
    /// player name shown in the game and on the leaderboard
    #[clap(short = 'n', long)]
    name: Option<String>,

    /// answer with digits or with words
    #[clap(short = 'i', long, value_enum)]
    input: Option<InputMode>,

    /// read the clock or set the hands
    #[clap(short = 'd', long, value_enum)]
    direction: Option<Direction>,

    /// digital answers on a 24 hour clock
    #[clap(long = "24h", conflicts_with = "use_12_hour")]
    use_24_hour: bool,

    /// digital answers on a 12 hour clock
    #[clap(long = "12h")]
    use_12_hour: bool,

    /// which times to practise, comma separated
    #[clap(short = 'm', long, value_enum, value_delimiter = ',')]
    modes: Vec<Mode>,

    /// remember these settings for next time
    #[clap(long)]
    save: bool,

    /// print the leaderboard and exit
    #[clap(long)]
    scores: bool,

    /// seed for a reproducible game
    #[clap(long)]
    seed: Option<u64>,
}

impl Cli {
    /// Override stored settings with whatever was given on the command line
    fn apply_to(&self, config: &mut Config) {
        if let Some(name) = &self.name {
            config.player_name = name.clone();
        }
        if let Some(input) = self.input {
            config.input_mode = input;
        }
        if let Some(direction) = self.direction {
            config.direction = direction;
        }
        if self.use_24_hour {
            config.use_24_hour = true;
        }
        if self.use_12_hour {
            config.use_24_hour = false;
        }
        if !self.modes.is_empty() {
            config.set_modes(&self.modes.iter().copied().collect());
        }
    }
}

pub struct App {
    pub session: GameSession<StdRng>,
    pub controls: Controls,
    scheduler: Scheduler,
    reporter: LeaderboardReporter<Box<dyn KeyValueStore>>,
}

impl App {
    pub fn new(config: &Config, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut session = GameSession::new(config, FeedbackBook::embedded().clone(), rng);
        if let Some(assets) = AppDirs::assets_dir() {
            session = session.with_images(Box::new(DirImageLookup::new(assets)));
        }

        Self {
            session,
            controls: Controls::new(),
            scheduler: Scheduler::new(),
            reporter: LeaderboardReporter::new(
                open_store(),
                config.player_name.clone(),
                config.settings_summary(),
            ),
        }
    }

    /// Feed one event to the session; returns the final score once it has ended
    fn dispatch(&mut self, event: Event) -> Option<u32> {
        let effects = match event {
            Event::Exit => self.session.exit_with(&mut self.reporter),
            event => self.session.handle(event),
        };
        self.scheduler.apply(&effects, Instant::now())
    }
}

fn open_store() -> Box<dyn KeyValueStore> {
    match AppDirs::db_path().map(SqliteStore::open) {
        Some(Ok(store)) => Box::new(store),
        Some(Err(e)) => {
            log::warn!("scores will not be kept: {e}");
            Box::new(MemoryStore::new())
        }
        None => {
            log::warn!("no state directory, scores will not be kept");
            Box::new(MemoryStore::new())
        }
    }
}

/// Log to a file next to the scores; the terminal belongs to the TUI
fn init_logging() {
    let Some(path) = AppDirs::log_path() else {
        return;
    };
    if let Some(dir) = path.parent() {
        if fs::create_dir_all(dir).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging();

    let config_store = FileConfigStore::new();
    let mut config = config_store.load();
    cli.apply_to(&mut config);
    if cli.save {
        config_store.save(&config)?;
        log::info!("settings saved to {}", config_store.path().display());
    }

    if cli.scores {
        let board = Leaderboard::load(&open_store())?;
        println!("{}", board.render_table());
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config, cli.seed);
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let final_score = result?;
    println!("{}: {} punten", config.player_name, final_score);

    Ok(())
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<u32, Box<dyn Error>> {
    let mut runner = Runner::new(CrosstermEventSource, Duration::from_millis(TICK_RATE_MS));

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step()? {
            AppEvent::Tick => {
                let due = app.scheduler.due(Instant::now());
                if due.is_empty() {
                    continue;
                }
                for token in due {
                    app.dispatch(Event::Elapsed(token));
                }
            }
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if let Some(event) = app.controls.map_key(key, &app.session) {
                    if let Some(final_score) = app.dispatch(event) {
                        return Ok(final_score);
                    }
                }
            }
        }
    }
}
