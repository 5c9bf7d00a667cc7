/*
 * This module consolidates the core, platform-agnostic data layer of the
 * library: the item model, the authenticated session and its durable-store
 * abstraction (`AuthStore`), versioned state snapshots, the recent-search
 * history with its persistence trait (`RecentSearchStore`), and the item
 * snapshot cache contract (`ItemCache`).
 */
pub mod cache;
pub mod models;
pub mod recent;
pub mod session;
pub mod snapshot;

// Re-export key structures and enums
pub use models::{is_blank, Item, ROOT_FOLDER_ID};

pub use session::{AuthInfo, AuthListener, AuthStore, BrowseSession, SessionError};

pub use snapshot::{BrowseStateSnapshot, SessionSnapshot, SnapshotError, SNAPSHOT_VERSION};

pub use recent::{
    JsonRecentSearchStore, RecentSearchError, RecentSearchHistory, RecentSearchStore,
};

pub use cache::{ItemCache, MemoryItemCache};
