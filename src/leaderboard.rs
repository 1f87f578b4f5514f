use crate::session::ScoreReporter;
use crate::storage::{KeyValueStore, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

/// Key the serialized list is stored under
pub const STORAGE_KEY: &str = "klokkijken_scores";
pub const MAX_ENTRIES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    #[serde(default)]
    pub settings_summary: String,
    pub date: String,
}

/// Top scores, best first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self> {
        let mut entries: Vec<LeaderboardEntry> = match store.get(STORAGE_KEY)? {
            Some(json) => serde_json::from_str(&json)?,
            None => Vec::new(),
        };
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_ENTRIES);
        Ok(Self { entries })
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        let json = serde_json::to_string(&self.entries)?;
        store.set(STORAGE_KEY, &json)
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Add a finished game. Zero scores are never kept.
    /// Returns whether the entry made it onto the board.
    pub fn record(&mut self, entry: LeaderboardEntry) -> bool {
        if entry.score == 0 {
            return false;
        }
        // after existing equal scores, so ties keep their arrival order
        let idx = self.entries.partition_point(|e| e.score >= entry.score);
        if idx >= MAX_ENTRIES {
            return false;
        }
        self.entries.insert(idx, entry);
        self.entries.truncate(MAX_ENTRIES);
        true
    }

    /// Plain text table for the `--scores` listing
    pub fn render_table(&self) -> String {
        if self.entries.is_empty() {
            return "Nog geen scores...".to_string();
        }

        let name_width = self
            .entries
            .iter()
            .map(|e| e.name.width())
            .max()
            .unwrap_or(0)
            .max("Speler".len());

        let mut out = format!("{:>2}  {}  {:>5}\n", "#", pad("Speler", name_width), "Score");
        for (idx, entry) in self.entries.iter().enumerate() {
            out.push_str(&format!(
                "{:>2}  {}  {:>5}  {}  {}\n",
                idx + 1,
                pad(&entry.name, name_width),
                entry.score,
                entry.date,
                entry.settings_summary
            ));
        }
        out
    }
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

pub fn today() -> String {
    Local::now().format("%d-%m-%Y").to_string()
}

/// Reports finished games to a persistent leaderboard
pub struct LeaderboardReporter<S: KeyValueStore> {
    store: S,
    player_name: String,
    settings_summary: String,
}

impl<S: KeyValueStore> LeaderboardReporter<S> {
    pub fn new(store: S, player_name: String, settings_summary: String) -> Self {
        Self {
            store,
            player_name,
            settings_summary,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self, final_score: u32) -> Result<()> {
        let mut board = Leaderboard::load(&self.store)?;
        let entry = LeaderboardEntry {
            name: self.player_name.clone(),
            score: final_score,
            settings_summary: self.settings_summary.clone(),
            date: today(),
        };
        if board.record(entry) {
            board.save(&mut self.store)?;
        }
        Ok(())
    }
}

impl<S: KeyValueStore> ScoreReporter for LeaderboardReporter<S> {
    fn on_exit(&mut self, final_score: u32) {
        if final_score == 0 {
            log::debug!("not recording a zero score");
            return;
        }
        match self.persist(final_score) {
            Ok(()) => log::info!("recorded score {final_score} for {}", self.player_name),
            Err(e) => log::error!("failed to save score: {e}"),
        }
    }
}
