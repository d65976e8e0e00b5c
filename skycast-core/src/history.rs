use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use std::{fs, path::PathBuf};
use tracing::{debug, warn};

/// Maximum number of remembered city names.
pub const HISTORY_CAP: usize = 5;

/// Deduplicated, recency-ordered list of past successful search terms.
///
/// Persisted as a single JSON array of strings; the file is read once when
/// the history is opened and rewritten synchronously on every mutation.
#[derive(Debug, Clone)]
pub struct SearchHistory {
    path: PathBuf,
    entries: Vec<String>,
}

impl SearchHistory {
    /// Open the history stored in the platform data directory.
    pub fn open() -> Result<Self> {
        Ok(Self::load_from(Self::history_file_path()?))
    }

    /// Load history from an explicit path. An absent or malformed file is
    /// treated as an empty history, never as an error.
    pub fn load_from(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => parse_entries(&contents),
            Err(_) => Vec::new(),
        };
        Self { path, entries }
    }

    /// Record a successful search term: any earlier occurrence of `name` is
    /// removed, `name` goes first, the list is capped and written back.
    pub fn record(&mut self, name: &str) {
        if name.is_empty() {
            return;
        }
        self.entries.retain(|c| c != name);
        self.entries.insert(0, name.to_string());
        self.entries.truncate(HISTORY_CAP);
        self.persist();
    }

    /// Ordered, most-recent-first view of the remembered names.
    pub fn list(&self) -> &[String] {
        &self.entries
    }

    /// Path to the history file.
    pub fn history_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

        Ok(dirs.data_dir().join("recent_cities.json"))
    }

    fn persist(&self) {
        // A failed write loses recency across restarts, nothing more.
        if let Err(err) = self.try_persist() {
            warn!("failed to persist search history: {err:#}");
        }
    }

    fn try_persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create history directory: {}", parent.display())
            })?;
        }

        let json =
            serde_json::to_string(&self.entries).context("Failed to serialize search history")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write history file: {}", self.path.display()))?;

        Ok(())
    }
}

/// Parse the persisted JSON array, falling back to empty on any shape
/// mismatch.
fn parse_entries(contents: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(contents) {
        Ok(mut entries) => {
            entries.truncate(HISTORY_CAP);
            entries
        }
        Err(err) => {
            debug!("ignoring malformed history file: {err}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn history_in(dir: &tempfile::TempDir) -> SearchHistory {
        SearchHistory::load_from(dir.path().join("recent_cities.json"))
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let history = history_in(&dir);
        assert!(history.list().is_empty());
    }

    #[test]
    fn malformed_file_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("recent_cities.json");

        for junk in ["not json at all", "{\"recent\": 1}", "[1, 2, 3]"] {
            fs::write(&path, junk).unwrap();
            let history = SearchHistory::load_from(&path);
            assert!(history.list().is_empty(), "expected empty for {junk:?}");
        }
    }

    #[test]
    fn record_prepends_most_recent() {
        let dir = tempdir().unwrap();
        let mut history = history_in(&dir);

        history.record("Paris");
        history.record("Kyiv");

        assert_eq!(history.list(), ["Kyiv", "Paris"]);
    }

    #[test]
    fn record_same_name_twice_keeps_one() {
        let dir = tempdir().unwrap();
        let mut history = history_in(&dir);

        history.record("Paris");
        history.record("Paris");

        assert_eq!(history.list(), ["Paris"]);
    }

    #[test]
    fn record_moves_existing_entry_to_front() {
        let dir = tempdir().unwrap();
        let mut history = history_in(&dir);

        for name in ["A", "B", "C"] {
            history.record(name);
        }
        history.record("A");

        assert_eq!(history.list(), ["A", "C", "B"]);
    }

    #[test]
    fn record_caps_length_at_five() {
        let dir = tempdir().unwrap();
        let mut history = history_in(&dir);

        for name in ["A", "B", "C", "D", "E", "F"] {
            history.record(name);
        }

        assert_eq!(history.list(), ["F", "E", "D", "C", "B"]);
    }

    #[test]
    fn record_never_duplicates_or_overflows() {
        let dir = tempdir().unwrap();
        let mut history = history_in(&dir);

        for name in ["A", "B", "A", "C", "B", "D", "E", "F", "C", "A"] {
            history.record(name);

            let list = history.list();
            assert!(list.len() <= HISTORY_CAP);
            let mut unique = list.to_vec();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), list.len(), "duplicate in {list:?}");
        }
    }

    #[test]
    fn record_persists_synchronously() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("recent_cities.json");

        let mut history = SearchHistory::load_from(&path);
        history.record("London");
        history.record("Oslo");

        let reloaded = SearchHistory::load_from(&path);
        assert_eq!(reloaded.list(), ["Oslo", "London"]);
    }

    #[test]
    fn oversized_persisted_list_is_capped_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("recent_cities.json");
        fs::write(&path, r#"["a","b","c","d","e","f","g"]"#).unwrap();

        let history = SearchHistory::load_from(&path);
        assert_eq!(history.list().len(), HISTORY_CAP);
    }
}
