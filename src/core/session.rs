/*
 * The authenticated identity every background call runs under. A session is
 * shared by reference across all screens of a flow and is never owned by a
 * single screen; it is reconstructed from a durable `AuthStore` keyed by
 * user identifier, so it survives process death through the snapshot codec
 * in `core::snapshot`.
 *
 * Auth state changes (refresh, logout, failure) are observed through a
 * single listener slot. At most one listener is attached at a time and
 * setting a new one replaces the previous (last-listener-wins); there is no
 * locking protocol beyond that.
 */
use std::fmt;
use std::sync::Mutex;

use crate::core::models::is_blank;

/// Durable authentication material for one user, as resolved from the host
/// application's auth store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthInfo {
    pub access_token: String,
}

/// Lookup of durable auth info by user identifier. Implemented by the host
/// application; the library never persists tokens itself.
pub trait AuthStore: Send + Sync {
    fn auth_info_for(&self, user_id: &str) -> Option<AuthInfo>;
}

/// Observer for session auth state changes. Only `on_auth_failure` carries
/// flow-ending semantics; the other notifications are informational.
pub trait AuthListener: Send {
    fn on_refreshed(&self, _user_id: &str) {}
    fn on_auth_failure(&self, user_id: &str);
    fn on_logged_out(&self, _user_id: &str) {}
}

#[derive(Debug)]
pub enum SessionError {
    /// The user identifier was blank, so no identity can be established.
    NotAuthenticated,
    /// The auth store has no durable material for this user.
    UnknownUser(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NotAuthenticated => write!(f, "Session is not authenticated"),
            SessionError::UnknownUser(user_id) => {
                write!(f, "No stored authentication info for user '{user_id}'")
            }
        }
    }
}

impl std::error::Error for SessionError {}

pub type Result<T> = std::result::Result<T, SessionError>;

pub struct BrowseSession {
    user_id: String,
    auth: AuthInfo,
    refresh_provider: Option<String>,
    listener: Mutex<Option<Box<dyn AuthListener>>>,
}

impl BrowseSession {
    /*
     * Opens a session for the given user by resolving their durable auth
     * info from the store. A blank user id fails fast with
     * `NotAuthenticated`; a store miss fails with `UnknownUser`.
     */
    pub fn open(auth_store: &dyn AuthStore, user_id: &str) -> Result<Self> {
        if is_blank(user_id) {
            return Err(SessionError::NotAuthenticated);
        }
        let auth = auth_store
            .auth_info_for(user_id)
            .ok_or_else(|| SessionError::UnknownUser(user_id.to_string()))?;
        log::debug!("BrowseSession: Opened session for user '{user_id}'.");
        Ok(BrowseSession {
            user_id: user_id.to_string(),
            auth,
            refresh_provider: None,
            listener: Mutex::new(None),
        })
    }

    /// Tags the session with the name of a token refresh provider so a
    /// restored session can be rebound to the same provider.
    pub fn with_refresh_provider(mut self, provider: impl Into<String>) -> Self {
        self.refresh_provider = Some(provider.into());
        self
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn auth_info(&self) -> &AuthInfo {
        &self.auth
    }

    pub fn refresh_provider(&self) -> Option<&str> {
        self.refresh_provider.as_deref()
    }

    /// Attaches an auth listener, replacing any previous one. Passing `None`
    /// detaches.
    pub fn set_auth_listener(&self, listener: Option<Box<dyn AuthListener>>) {
        *self.listener.lock().unwrap() = listener;
    }

    /// Forwards an auth failure from the transport to the attached listener,
    /// if any. Called by host glue, never by the library's own state.
    pub fn notify_auth_failure(&self) {
        log::warn!(
            "BrowseSession: Auth failure reported for user '{}'.",
            self.user_id
        );
        if let Some(listener) = self.listener.lock().unwrap().as_ref() {
            listener.on_auth_failure(&self.user_id);
        }
    }
}

impl fmt::Debug for BrowseSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowseSession")
            .field("user_id", &self.user_id)
            .field("refresh_provider", &self.refresh_provider)
            .finish_non_exhaustive()
    }
}
