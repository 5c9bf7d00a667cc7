/*
 * This module defines the data types used for communication between the
 * browse logic and the host shell that renders it. The shell translates
 * user interactions into platform-agnostic `BrowseEvent`s and executes the
 * `UiCommand`s the logic emits in response, without the logic ever touching
 * a widget. `Notice` names the fixed user-facing messages; the shell owns
 * the actual strings and their presentation.
 */

use crate::core::models::Item;

// --- Events from the shell to the browse logic ---

/*
 * Platform-agnostic UI events. The shell produces these from clicks, text
 * input, search-affordance transitions, and the dispatcher's task signals.
 */
#[derive(Debug, Clone)]
pub enum BrowseEvent {
    /// The screen is attached and ready; navigation may start.
    ScreenReady,
    /// The user clicked an item in the current listing.
    ItemClicked(Item),
    /// The search input text changed.
    QueryTextChanged(String),
    /// The user submitted the search input (keyboard action).
    QueryTextSubmitted,
    /// The search affordance expanded.
    SearchExpanded,
    /// The search affordance collapsed.
    SearchCollapsed,
    /// The user picked an entry from the recent-search list.
    RecentSearchPicked(usize),
    /// The user deleted an entry from the recent-search list.
    RecentSearchDeleted(usize),
    /// The user pressed back.
    BackPressed,
    /// The user confirmed selection of the currently browsed folder
    /// (folder-pick flows only).
    SelectCurrentFolder,
    /// The user submitted a name in the create-folder dialog.
    CreateFolderSubmitted { name: String },
    /// A completed response was drained from the shared delivery queue
    /// after an `Ending` signal.
    ResponseDelivered(crate::api::ApiResponse),
    /// The session reported an authentication failure.
    AuthFailed,
}

// --- Fixed user-facing messages ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    SessionNotAuthenticated,
    InsufficientPermissions,
    UnableToModify,
    CreateFolderConflict,
    NetworkError,
}

// --- Commands from the browse logic to the shell ---

#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    /// Update the title bar.
    SetTitle(String),
    /// Render a folder listing. Items are already filtered for the flow's
    /// allowed extensions.
    ShowFolderItems { folder_id: String, items: Vec<Item> },
    /// Render search results for the current search screen.
    ShowSearchResults { query: String, items: Vec<Item> },
    /// Show the recent-search list with the given entries.
    ShowRecentSearches(Vec<String>),
    /// Hide the recent-search list.
    HideRecentSearches,
    /// Put the given text into the search input without submitting it.
    SetSearchQuery(String),
    /// Collapse the expanded search input affordance.
    CollapseSearchInput,
    /// Dismiss the on-screen keyboard.
    DismissKeyboard,
    /// Show one of the fixed notices.
    ShowNotice(Notice),
    /// End the flow successfully, handing the item to the invoker.
    FinishWithResult(Item),
    /// End the flow without a selection.
    FinishCancelled,
}

// --- Trait for the browse logic to handle shell events ---

// Implemented by the browse controller. The shell feeds every event through
// here and then executes the returned commands in order.
pub trait ShellEventHandler {
    fn handle_event(&mut self, event: BrowseEvent) -> Vec<UiCommand>;
}
