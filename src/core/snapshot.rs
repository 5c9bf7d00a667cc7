/*
 * Versioned state snapshots for surviving process death and configuration
 * changes. `SessionSnapshot` captures the minimum needed to rebuild a
 * session (user id plus an optional refresh-provider tag); the actual auth
 * material is re-resolved from the durable `AuthStore` on restore, never
 * serialized. `BrowseStateSnapshot` bundles the session snapshot with the
 * current item so a whole screen can be rebuilt.
 *
 * The encoding is JSON with an explicit `version` field; decoding rejects
 * versions this build does not know about instead of guessing.
 */
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::models::Item;
use crate::core::session::{AuthStore, BrowseSession};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug)]
pub enum SnapshotError {
    Serde(serde_json::Error),
    UnsupportedVersion(u32),
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        SnapshotError::Serde(err)
    }
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Serde(e) => write!(f, "Snapshot serialization error: {e}"),
            SnapshotError::UnsupportedVersion(v) => {
                write!(f, "Unsupported snapshot version {v}")
            }
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Serde(e) => Some(e),
            SnapshotError::UnsupportedVersion(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SnapshotError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub version: u32,
    pub user_id: String,
    pub refresh_provider: Option<String>,
}

impl SessionSnapshot {
    pub fn capture(session: &BrowseSession) -> Self {
        SessionSnapshot {
            version: SNAPSHOT_VERSION,
            user_id: session.user_id().to_string(),
            refresh_provider: session.refresh_provider().map(str::to_string),
        }
    }

    /*
     * Rebuilds a session from a snapshot by looking the user up in the
     * durable auth store. Returns `None` for an absent snapshot or when the
     * user can no longer be resolved; callers must treat `None` as "not
     * authenticated" and abort screen initialization.
     */
    pub fn restore(
        auth_store: &dyn AuthStore,
        snapshot: Option<&SessionSnapshot>,
    ) -> Option<BrowseSession> {
        let snapshot = snapshot?;
        if snapshot.version != SNAPSHOT_VERSION {
            log::warn!(
                "SessionSnapshot: Refusing to restore unsupported version {}.",
                snapshot.version
            );
            return None;
        }
        let session = match BrowseSession::open(auth_store, &snapshot.user_id) {
            Ok(session) => session,
            Err(e) => {
                log::warn!(
                    "SessionSnapshot: Could not restore session for user '{}': {e}",
                    snapshot.user_id
                );
                return None;
            }
        };
        Some(match &snapshot.refresh_provider {
            Some(provider) => session.with_refresh_provider(provider.clone()),
            None => session,
        })
    }
}

/// The full restorable state of a browse screen: the session identity plus
/// the item the screen was working on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowseStateSnapshot {
    pub version: u32,
    pub session: SessionSnapshot,
    pub item: Item,
}

impl BrowseStateSnapshot {
    pub fn capture(session: &BrowseSession, item: &Item) -> Self {
        BrowseStateSnapshot {
            version: SNAPSHOT_VERSION,
            session: SessionSnapshot::capture(session),
            item: item.clone(),
        }
    }

    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(encoded: &str) -> Result<Self> {
        let snapshot: BrowseStateSnapshot = serde_json::from_str(encoded)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(snapshot.version));
        }
        Ok(snapshot)
    }
}
