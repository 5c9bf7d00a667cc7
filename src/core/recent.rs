/*
 * Recent search history: a per-user ordered list of past query strings.
 * The persistence itself lives behind `RecentSearchStore` so it can be
 * backed by anything the host provides; `JsonRecentSearchStore` is the
 * default file-backed implementation, one JSON file per user under a base
 * directory resolved through the standard per-user data location.
 *
 * `RecentSearchHistory` is the in-memory projection rendered in the recent
 * list view. Deletions are applied optimistically: the projection is
 * cleared and replaced with whatever post-delete list the store returns.
 */
use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::core::models::is_blank;

#[derive(Debug)]
pub enum RecentSearchError {
    Io(io::Error),
    Serde(serde_json::Error),
    NoDataDirectory,
}

impl From<io::Error> for RecentSearchError {
    fn from(err: io::Error) -> Self {
        RecentSearchError::Io(err)
    }
}

impl From<serde_json::Error> for RecentSearchError {
    fn from(err: serde_json::Error) -> Self {
        RecentSearchError::Serde(err)
    }
}

impl std::fmt::Display for RecentSearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecentSearchError::Io(e) => write!(f, "Recent search I/O error: {e}"),
            RecentSearchError::Serde(e) => write!(f, "Recent search serialization error: {e}"),
            RecentSearchError::NoDataDirectory => {
                write!(f, "Could not determine data directory for recent searches")
            }
        }
    }
}

impl std::error::Error for RecentSearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecentSearchError::Io(e) => Some(e),
            RecentSearchError::Serde(e) => Some(e),
            RecentSearchError::NoDataDirectory => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RecentSearchError>;

pub trait RecentSearchStore: Send + Sync {
    /// Returns the stored queries for a user, newest first.
    fn recent_searches(&self, user_id: &str) -> Result<Vec<String>>;
    /// Records a query for a user. Blank queries are ignored.
    fn add_recent_search(&self, user_id: &str, query: &str) -> Result<()>;
    /// Deletes the entry at `index` and returns the updated list.
    fn delete_recent_search(&self, user_id: &str, index: usize) -> Result<Vec<String>>;
}

pub struct JsonRecentSearchStore {
    base_dir: PathBuf,
}

impl JsonRecentSearchStore {
    /// Creates a store rooted at the per-user data directory for `app_name`.
    pub fn new(app_name: &str) -> Result<Self> {
        let dirs =
            ProjectDirs::from("", "", app_name).ok_or(RecentSearchError::NoDataDirectory)?;
        Ok(JsonRecentSearchStore {
            base_dir: dirs.data_local_dir().to_path_buf(),
        })
    }

    /// Creates a store rooted at an explicit directory. Used by tests and by
    /// hosts that manage their own storage layout.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        JsonRecentSearchStore {
            base_dir: base_dir.into(),
        }
    }

    fn file_for(&self, user_id: &str) -> PathBuf {
        // User ids are server-issued numeric strings, safe as file name parts.
        self.base_dir.join(format!("recent_searches_{user_id}.json"))
    }

    fn load(&self, user_id: &str) -> Result<Vec<String>> {
        let path = self.file_for(user_id);
        if !path.exists() {
            log::debug!("JsonRecentSearchStore: No history file at {path:?}.");
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, user_id: &str, queries: &[String]) -> Result<()> {
        fs::create_dir_all(&self.base_dir)?;
        let path = self.file_for(user_id);
        fs::write(&path, serde_json::to_string(queries)?)?;
        log::trace!(
            "JsonRecentSearchStore: Saved {} entries to {path:?}.",
            queries.len()
        );
        Ok(())
    }
}

impl RecentSearchStore for JsonRecentSearchStore {
    fn recent_searches(&self, user_id: &str) -> Result<Vec<String>> {
        self.load(user_id)
    }

    fn add_recent_search(&self, user_id: &str, query: &str) -> Result<()> {
        if is_blank(query) {
            return Ok(());
        }
        let mut queries = self.load(user_id)?;
        // Re-searching an old query moves it to the front instead of
        // duplicating it.
        queries.retain(|q| q != query);
        queries.insert(0, query.to_string());
        self.save(user_id, &queries)
    }

    fn delete_recent_search(&self, user_id: &str, index: usize) -> Result<Vec<String>> {
        let mut queries = self.load(user_id)?;
        if index < queries.len() {
            queries.remove(index);
            self.save(user_id, &queries)?;
        } else {
            log::warn!(
                "JsonRecentSearchStore: Delete index {index} out of range for user '{user_id}'."
            );
        }
        Ok(queries)
    }
}

/// The in-memory list backing the recent-search list view.
#[derive(Debug, Default)]
pub struct RecentSearchHistory {
    entries: Vec<String>,
}

impl RecentSearchHistory {
    pub fn new() -> Self {
        RecentSearchHistory::default()
    }

    /// Replaces the projection with the store's current list for `user_id`.
    pub fn populate(&mut self, store: &dyn RecentSearchStore, user_id: &str) -> Result<()> {
        self.entries = store.recent_searches(user_id)?;
        Ok(())
    }

    /*
     * Deletes the entry at `index` through the store, then replaces the
     * whole projection with the store's returned post-delete list. The
     * replacement is unconditional so the view always reflects what the
     * store actually holds.
     */
    pub fn delete(
        &mut self,
        store: &dyn RecentSearchStore,
        user_id: &str,
        index: usize,
    ) -> Result<()> {
        let updated = store.delete_recent_search(user_id, index)?;
        self.entries.clear();
        self.entries.extend(updated);
        Ok(())
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&String> {
        self.entries.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
