use std::path::PathBuf;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};

use crate::models::Theme;
use crate::registry::{default_assistants, default_shortcuts, Registry};
use crate::search::SearchEngine;

/// Full persisted dashboard state. Each group lives under its own store
/// key and loads independently, so one malformed value never takes the
/// rest down with it.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub shortcuts: Registry,
    pub assistants: Registry,
    pub theme: Theme,
    pub notes: String,
    pub search_engine: SearchEngine,
}

impl Default for DashboardState {
    fn default() -> Self {
        DashboardState {
            shortcuts: default_shortcuts(),
            assistants: default_assistants(),
            theme: Theme::Dark,
            notes: String::new(),
            search_engine: SearchEngine::Google,
        }
    }
}

const KEY_SHORTCUTS: &str = "shortcuts";
const KEY_ASSISTANTS: &str = "assistants";
const KEY_THEME: &str = "theme";
const KEY_NOTES: &str = "notes";
const KEY_ENGINE: &str = "search_engine";

/// Text key-value store backed by a single-table SQLite database in the
/// user's home directory.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open_default() -> Result<Self> {
        let home_dir = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        Self::open(PathBuf::from(home_dir).join(".homedeck.db"))
    }

    pub fn open(path: PathBuf) -> Result<Self> {
        let conn = Connection::open(&path)
            .with_context(|| format!("failed to open store at {}", path.display()))?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(Store { conn })
    }

    /// Rehydrate the dashboard. Every group falls back to its default
    /// when the key is absent or its value does not parse; bad values
    /// are logged and skipped, never fatal.
    pub fn load(&self) -> DashboardState {
        let defaults = DashboardState::default();
        DashboardState {
            shortcuts: self
                .read_json(KEY_SHORTCUTS)
                .unwrap_or(defaults.shortcuts),
            assistants: self
                .read_json(KEY_ASSISTANTS)
                .unwrap_or(defaults.assistants),
            theme: self
                .read_raw(KEY_THEME)
                .and_then(|v| Theme::parse(&v))
                .unwrap_or(defaults.theme),
            notes: self.read_raw(KEY_NOTES).unwrap_or(defaults.notes),
            search_engine: self
                .read_raw(KEY_ENGINE)
                .and_then(|v| SearchEngine::parse(&v))
                .unwrap_or(defaults.search_engine),
        }
    }

    /// Write every group unconditionally. Called after each state
    /// change; last write wins, no batching, no cross-key transaction.
    pub fn save(&self, state: &DashboardState) -> Result<()> {
        self.write_json(KEY_SHORTCUTS, &state.shortcuts)?;
        self.write_json(KEY_ASSISTANTS, &state.assistants)?;
        self.write_raw(KEY_THEME, state.theme.as_str())?;
        self.write_raw(KEY_NOTES, &state.notes)?;
        self.write_raw(KEY_ENGINE, state.search_engine.id())?;
        Ok(())
    }

    fn read_raw(&self, key: &str) -> Option<String> {
        match self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()
        {
            Ok(value) => value,
            Err(e) => {
                log::warn!("failed to read key '{}': {}", key, e);
                None
            }
        }
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("malformed value under key '{}', using default: {}", key, e);
                None
            }
        }
    }

    fn write_raw(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                [key, value],
            )
            .with_context(|| format!("failed to write key '{}'", key))?;
        Ok(())
    }

    fn write_json<T: serde::Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)
            .with_context(|| format!("failed to serialize key '{}'", key))?;
        self.write_raw(key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::DashboardState;
    use super::Store;
    use crate::models::{EntryField, EntryKind, Theme};
    use crate::search::SearchEngine;

    fn open_temp(dir: &tempfile::TempDir) -> Store {
        Store::open(dir.path().join("deck.db")).expect("open store")
    }

    #[test]
    fn empty_store_loads_the_seed_state() {
        let dir = tempdir().expect("tmpdir");
        let store = open_temp(&dir);
        let state = store.load();

        assert_eq!(state.shortcuts.len(), 4);
        assert_eq!(state.assistants.len(), 4);
        assert_eq!(state.theme, Theme::Dark);
        assert_eq!(state.notes, "");
        assert_eq!(state.search_engine, SearchEngine::Google);
    }

    #[test]
    fn save_then_load_round_trips_every_field() {
        let dir = tempdir().expect("tmpdir");
        let store = open_temp(&dir);

        let mut state = DashboardState::default();
        state.shortcuts = state.shortcuts.add(EntryKind::Shortcut);
        let id = state.shortcuts.get(4).expect("added").id.clone();
        state.shortcuts = state.shortcuts.update_field(
            EntryKind::Shortcut,
            &id,
            EntryField::Url,
            "https://news.ycombinator.com",
        );
        state.theme = Theme::Light;
        state.notes = "pick up milk\ncheck CI".to_string();
        state.search_engine = SearchEngine::DuckDuckGo;

        store.save(&state).expect("save");
        assert_eq!(store.load(), state);
    }

    #[test]
    fn a_malformed_group_falls_back_without_touching_the_others() {
        let dir = tempdir().expect("tmpdir");
        let store = open_temp(&dir);

        let mut state = DashboardState::default();
        state.notes = "survivor".to_string();
        state.theme = Theme::Light;
        store.save(&state).expect("save");

        // Corrupt just the shortcuts key.
        store
            .write_raw(super::KEY_SHORTCUTS, "{not json")
            .expect("corrupt");

        let loaded = store.load();
        assert_eq!(loaded.shortcuts, crate::registry::default_shortcuts());
        assert_eq!(loaded.notes, "survivor");
        assert_eq!(loaded.theme, Theme::Light);
        assert_eq!(loaded.assistants, state.assistants);
    }

    #[test]
    fn an_unknown_theme_string_falls_back_to_dark() {
        let dir = tempdir().expect("tmpdir");
        let store = open_temp(&dir);
        store.write_raw(super::KEY_THEME, "solarized").expect("write");
        assert_eq!(store.load().theme, Theme::Dark);
    }

    #[test]
    fn saves_are_last_write_wins() {
        let dir = tempdir().expect("tmpdir");
        let store = open_temp(&dir);

        let mut state = DashboardState::default();
        state.notes = "first".to_string();
        store.save(&state).expect("save");
        state.notes = "second".to_string();
        store.save(&state).expect("save");

        assert_eq!(store.load().notes, "second");
    }
}
