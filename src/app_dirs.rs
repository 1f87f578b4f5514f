use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "klokkijken";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// `$HOME/.local/state/klokkijken`, or the platform's local data dir
    pub fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join(APP_NAME),
            )
        } else {
            ProjectDirs::from("", "", APP_NAME).map(|pd| pd.data_local_dir().to_path_buf())
        }
    }

    /// SQLite file holding the leaderboard
    pub fn db_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("scores.db"))
    }

    pub fn log_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("klokkijken.log"))
    }

    /// Where compliment/encouragement images are looked up
    pub fn assets_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|pd| pd.data_dir().join("assets"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_share_the_state_dir() {
        if let (Some(state), Some(db), Some(log)) =
            (AppDirs::state_dir(), AppDirs::db_path(), AppDirs::log_path())
        {
            assert!(db.starts_with(&state));
            assert!(log.starts_with(&state));
            assert!(state.ends_with(APP_NAME));
        }
    }
}
