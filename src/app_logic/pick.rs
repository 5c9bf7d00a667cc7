/*
 * Per-flow selection behavior. A browse screen is the same state machine
 * whether it is plain browsing, picking a file, or picking a folder; the
 * differences are concentrated in a `PickStrategy` the controller consults
 * at three points: when a leaf item is clicked, when the current folder is
 * confirmed, and when a shared-link call comes back.
 *
 * File picks hand back an item that carries a shareable link. A clicked
 * file that already has one finishes immediately with no network call;
 * otherwise the strategy asks for a create-shared-link call and the flow
 * finishes (or complains) when the response arrives.
 */
use crate::api::response::{ApiError, CallOutcome, HTTP_FORBIDDEN, HTTP_NOT_MODIFIED};
use crate::core::models::Item;
use crate::shell::types::Notice;

/// What the controller should do about a click on a non-folder item.
#[derive(Debug, Clone, PartialEq)]
pub enum LeafClickAction {
    /// End the flow with this item as the result.
    Finish(Item),
    /// Submit a create-shared-link call for this item and wait.
    CreateSharedLink(Item),
}

/// How a pick step resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum PickOutcome {
    Finish(Item),
    Notice(Notice),
    /// The response did not concern this flow; ignore it.
    Ignored,
}

pub trait PickStrategy: Send {
    /// Whether `item` should appear in listings shown to the user. Folders
    /// are always navigable; strategies only filter leaves.
    fn shows_item(&self, item: &Item) -> bool;

    /// Reaction to a click on a non-folder item. `None` means the click has
    /// no selection meaning in this flow.
    fn on_leaf_click(&self, item: &Item) -> Option<LeafClickAction>;

    /// Reaction to the user confirming the currently browsed folder.
    fn on_confirm(&self, current_folder: &Item) -> Option<LeafClickAction> {
        let _ = current_folder;
        None
    }

    /// Reaction to a completed create-shared-link call.
    fn on_shared_link_updated(&self, outcome: &CallOutcome<Item>) -> PickOutcome {
        let _ = outcome;
        PickOutcome::Ignored
    }
}

/*
 * A 304 means the link already matched what was asked for; the click that
 * caused the call has already been handled, so nothing to do. A 403 is a
 * permissions problem worth telling the user about; anything else is
 * reported as a generic modification failure. None of these end the flow.
 */
fn map_shared_link_failure(e: &ApiError) -> PickOutcome {
    match e.status_code() {
        Some(HTTP_NOT_MODIFIED) => PickOutcome::Ignored,
        Some(HTTP_FORBIDDEN) => PickOutcome::Notice(Notice::InsufficientPermissions),
        _ => {
            log::warn!("PickStrategy: Shared link call failed: {e}");
            PickOutcome::Notice(Notice::UnableToModify)
        }
    }
}

// --- Plain browsing: no selection semantics at all ---

pub struct BrowseOnly;

impl PickStrategy for BrowseOnly {
    fn shows_item(&self, _item: &Item) -> bool {
        true
    }

    fn on_leaf_click(&self, _item: &Item) -> Option<LeafClickAction> {
        None
    }
}

// --- File pick: finish with a file that carries a shared link ---

pub struct FilePick {
    allowed_extensions: Vec<String>,
}

impl FilePick {
    /// An empty extension list admits every file.
    pub fn new(allowed_extensions: Vec<String>) -> Self {
        FilePick { allowed_extensions }
    }

    fn extension_allowed(&self, name: &str) -> bool {
        if self.allowed_extensions.is_empty() {
            return true;
        }
        match name.rsplit_once('.') {
            Some((_, ext)) => self
                .allowed_extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext)),
            None => false,
        }
    }
}

impl PickStrategy for FilePick {
    fn shows_item(&self, item: &Item) -> bool {
        match item {
            Item::Folder { .. } => true,
            Item::File { name, .. } => self.extension_allowed(name),
            // Bookmarks have no extension to match against.
            Item::Bookmark { .. } => self.allowed_extensions.is_empty(),
        }
    }

    fn on_leaf_click(&self, item: &Item) -> Option<LeafClickAction> {
        // Bookmarks are pickable leaves too; only folders navigate instead.
        if item.is_folder() {
            return None;
        }
        if item.shared_link().is_some() {
            Some(LeafClickAction::Finish(item.clone()))
        } else {
            Some(LeafClickAction::CreateSharedLink(item.clone()))
        }
    }

    fn on_shared_link_updated(&self, outcome: &CallOutcome<Item>) -> PickOutcome {
        match outcome {
            Ok(item) => PickOutcome::Finish(item.clone()),
            Err(e) => map_shared_link_failure(e),
        }
    }
}

// --- Folder pick: confirm the folder currently browsed ---

pub struct FolderPick;

impl PickStrategy for FolderPick {
    fn shows_item(&self, item: &Item) -> bool {
        item.is_folder()
    }

    fn on_leaf_click(&self, _item: &Item) -> Option<LeafClickAction> {
        None
    }

    /*
     * Confirming runs the same shared-link flow as a file click, but
     * against the folder currently browsed. The result is stripped of its
     * child listing so the caller receives the folder, not a stale
     * contents snapshot.
     */
    fn on_confirm(&self, current_folder: &Item) -> Option<LeafClickAction> {
        if current_folder.shared_link().is_some() {
            Some(LeafClickAction::Finish(current_folder.stripped()))
        } else {
            Some(LeafClickAction::CreateSharedLink(current_folder.clone()))
        }
    }

    fn on_shared_link_updated(&self, outcome: &CallOutcome<Item>) -> PickOutcome {
        match outcome {
            Ok(item) => PickOutcome::Finish(item.stripped()),
            Err(e) => map_shared_link_failure(e),
        }
    }
}
