//! Runtime configuration read from the environment.
//!
//! | Variable            | Default                                         |
//! |---------------------|-------------------------------------------------|
//! | `MADANI_STATE_PATH` | `$HOME/.madani-estimation/session.json`         |
//! | `MADANI_LOG_PATH`   | `madani-estimation.log` next to the state file  |
//! | `MADANI_LOG_LEVEL`  | `info`                                          |
//! | `MADANI_NO_SAVE`    | unset (set to `1`/`true` to disable saving)     |

use std::env;
use std::path::{Path, PathBuf};

use log::LevelFilter;

const STATE_DIR: &str = ".madani-estimation";
const STATE_FILE: &str = "session.json";
const FALLBACK_STATE_FILE: &str = "madani-estimation-session.json";
const LOG_FILE: &str = "madani-estimation.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub state_path: PathBuf,
    pub log_path: PathBuf,
    pub log_level: LevelFilter,
    /// When false the session is neither loaded nor saved.
    pub persist: bool,
}

/// Non-empty, trimmed value of an environment variable.
fn var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .and_then(|s| if s.is_empty() { None } else { Some(s) })
}

fn is_truthy(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_vars(var)
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let state_path = lookup("MADANI_STATE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| default_state_path(lookup("HOME").as_deref()));

        let log_path = lookup("MADANI_LOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| sibling(&state_path, LOG_FILE));

        let log_level = lookup("MADANI_LOG_LEVEL")
            .and_then(|s| s.parse().ok())
            .unwrap_or(LevelFilter::Info);

        let persist = !lookup("MADANI_NO_SAVE").is_some_and(|v| is_truthy(&v));

        Self {
            state_path,
            log_path,
            log_level,
            persist,
        }
    }
}

fn default_state_path(home: Option<&str>) -> PathBuf {
    match home {
        Some(home) => Path::new(home).join(STATE_DIR).join(STATE_FILE),
        None => PathBuf::from(FALLBACK_STATE_FILE),
    }
}

fn sibling(path: &Path, file: &str) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(file),
        _ => PathBuf::from(file),
    }
}
