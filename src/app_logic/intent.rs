/*
 * Entry points into the library. A `BrowseIntent` names the flow kind
 * (plain browse, file pick, folder pick), the starting folder, and any
 * extension filter, then `build` validates the arguments and assembles a
 * `BrowseController` wired to the host's collaborators. Validation happens
 * here, before any screen exists, so a bad invocation fails at the call
 * site instead of as a blank screen.
 */
use std::fmt;
use std::sync::Arc;

use crate::api::client::ContentClient;
use crate::app_logic::controller::BrowseController;
use crate::app_logic::pick::{BrowseOnly, FilePick, FolderPick, PickStrategy};
use crate::core::cache::ItemCache;
use crate::core::models::{is_blank, Item, ROOT_FOLDER_ID};
use crate::core::recent::RecentSearchStore;
use crate::core::session::BrowseSession;
use crate::core::snapshot::BrowseStateSnapshot;
use crate::dispatch::TaskSubmitter;

#[derive(Debug)]
pub enum IntentError {
    /// A required argument was missing or malformed.
    InvalidArgument(String),
}

impl fmt::Display for IntentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntentError::InvalidArgument(message) => write!(f, "Invalid argument: {message}"),
        }
    }
}

impl std::error::Error for IntentError {}

pub type Result<T> = std::result::Result<T, IntentError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlowKind {
    Browse,
    PickFile,
    PickFolder,
}

#[derive(Debug, Clone)]
pub struct BrowseIntent {
    kind: FlowKind,
    folder_id: String,
    allowed_extensions: Vec<String>,
    restored_item: Option<Item>,
}

impl BrowseIntent {
    /// A plain browsing flow with no selection semantics.
    pub fn browse() -> Self {
        BrowseIntent::with_kind(FlowKind::Browse)
    }

    /// A flow that ends with a file carrying a shareable link.
    pub fn pick_file() -> Self {
        BrowseIntent::with_kind(FlowKind::PickFile)
    }

    /// A flow that ends with the folder the user confirms.
    pub fn pick_folder() -> Self {
        BrowseIntent::with_kind(FlowKind::PickFolder)
    }

    fn with_kind(kind: FlowKind) -> Self {
        BrowseIntent {
            kind,
            folder_id: ROOT_FOLDER_ID.to_string(),
            allowed_extensions: Vec::new(),
            restored_item: None,
        }
    }

    /// Starts the flow in the given folder instead of the root.
    pub fn starting_folder(mut self, folder_id: impl Into<String>) -> Self {
        self.folder_id = folder_id.into();
        self
    }

    /// Restricts file-pick listings to files with one of these extensions.
    /// Ignored by other flow kinds.
    pub fn allowed_extensions(mut self, extensions: impl IntoIterator<Item = String>) -> Self {
        self.allowed_extensions = extensions.into_iter().collect();
        self
    }

    /*
     * Resumes a flow from a previously captured state snapshot: the flow
     * reopens on the snapshot's item. The session itself is restored
     * separately through `SessionSnapshot::restore`, since auth material
     * never travels inside snapshots.
     */
    pub fn resuming_from(mut self, snapshot: &BrowseStateSnapshot) -> Self {
        self.folder_id = snapshot.item.id().to_string();
        self.restored_item = Some(snapshot.item.clone());
        self
    }

    /*
     * Validates the intent and assembles the controller. A blank starting
     * folder id or a session without a user identity is rejected here; both
     * would otherwise surface much later as an unexplainable empty screen.
     */
    pub fn build(
        self,
        session: Arc<BrowseSession>,
        client: Arc<dyn ContentClient>,
        submitter: Arc<dyn TaskSubmitter>,
        recent_store: Arc<dyn RecentSearchStore>,
        cache: Arc<dyn ItemCache>,
    ) -> Result<BrowseController> {
        if is_blank(&self.folder_id) {
            return Err(IntentError::InvalidArgument(
                "Starting folder id must not be blank".into(),
            ));
        }
        if is_blank(session.user_id()) {
            return Err(IntentError::InvalidArgument(
                "Session has no authenticated user".into(),
            ));
        }
        if let Some(item) = &self.restored_item {
            // The restored item becomes the immediately served snapshot of
            // the reopened folder.
            cache.put(item);
        }
        let strategy: Box<dyn PickStrategy> = match self.kind {
            FlowKind::Browse => Box::new(BrowseOnly),
            FlowKind::PickFile => Box::new(FilePick::new(self.allowed_extensions)),
            FlowKind::PickFolder => Box::new(FolderPick),
        };
        log::debug!(
            "BrowseIntent: Building {:?} flow starting at folder '{}'.",
            self.kind,
            self.folder_id
        );
        Ok(BrowseController::new(
            session,
            client,
            submitter,
            recent_store,
            cache,
            strategy,
            &self.folder_id,
        ))
    }
}
