/*
 * The browse state machine. One controller drives one flow: it owns the
 * navigation stack (folder screens and at most transiently-topped search
 * screens), reacts to shell events, and answers with UI commands. All
 * network work leaves through the `TaskSubmitter` seam as `ApiCall`s and
 * comes back as `ResponseDelivered` events once the shell drains the
 * dispatcher's queue.
 *
 * Responses are matched by kind (and folder/query identity where the
 * variant carries one), never by request handle; the delivery queue is
 * shared process-wide, so a drained response may in principle belong to
 * another screen and must be droppable without harm.
 */
use std::sync::Arc;

use crate::api::client::ContentClient;
use crate::api::response::{ApiResponse, HTTP_CONFLICT};
use crate::app_logic::pick::{LeafClickAction, PickOutcome, PickStrategy};
use crate::app_logic::ui_constants::ALL_FILES_LABEL;
use crate::core::cache::ItemCache;
use crate::core::models::{is_blank, Item, ROOT_FOLDER_ID};
use crate::core::recent::{RecentSearchHistory, RecentSearchStore};
use crate::core::session::BrowseSession;
use crate::core::snapshot::BrowseStateSnapshot;
use crate::dispatch::TaskSubmitter;
use crate::shell::types::{BrowseEvent, Notice, ShellEventHandler, UiCommand};

/// One entry in the navigation stack.
#[derive(Debug, Clone)]
enum Screen {
    Folder(Item),
    Search {
        query: String,
        scope_folder_id: String,
    },
}

pub struct BrowseController {
    session: Arc<BrowseSession>,
    client: Arc<dyn ContentClient>,
    submitter: Arc<dyn TaskSubmitter>,
    recent_store: Arc<dyn RecentSearchStore>,
    cache: Arc<dyn ItemCache>,
    strategy: Box<dyn PickStrategy>,
    stack: Vec<Screen>,
    // Stack depth after the previous transition; a smaller current depth
    // means the user navigated back rather than forward.
    back_depth: usize,
    recent_history: RecentSearchHistory,
    recent_visible: bool,
}

impl BrowseController {
    pub(crate) fn new(
        session: Arc<BrowseSession>,
        client: Arc<dyn ContentClient>,
        submitter: Arc<dyn TaskSubmitter>,
        recent_store: Arc<dyn RecentSearchStore>,
        cache: Arc<dyn ItemCache>,
        strategy: Box<dyn PickStrategy>,
        start_folder_id: &str,
    ) -> Self {
        // Serve a cached snapshot of the starting folder when one exists;
        // fresh contents are fetched on ScreenReady.
        let start = cache
            .get(start_folder_id)
            .unwrap_or_else(|| Item::folder_from_id(start_folder_id));
        BrowseController {
            session,
            client,
            submitter,
            recent_store,
            cache,
            strategy,
            stack: vec![Screen::Folder(start)],
            back_depth: 1,
            recent_history: RecentSearchHistory::new(),
            recent_visible: false,
        }
    }

    pub fn session(&self) -> &BrowseSession {
        &self.session
    }

    /// The folder the user is currently working in: the nearest folder
    /// screen, looking down from the top of the stack.
    fn current_folder(&self) -> Option<Item> {
        self.stack.iter().rev().find_map(|screen| match screen {
            Screen::Folder(folder) => Some(folder.clone()),
            Screen::Search { .. } => None,
        })
    }

    /// A restorable snapshot of this flow: session identity plus the
    /// current folder. Search screens are not captured; a restored flow
    /// reopens on its folder.
    pub fn state_snapshot(&self) -> Option<BrowseStateSnapshot> {
        self.current_folder()
            .map(|folder| BrowseStateSnapshot::capture(&self.session, &folder))
    }

    fn title_for(&self, folder: &Item) -> String {
        if folder.is_root_folder() {
            ALL_FILES_LABEL.to_string()
        } else {
            folder.name().to_string()
        }
    }

    fn filtered(&self, items: &[Item]) -> Vec<Item> {
        items
            .iter()
            .filter(|item| self.strategy.shows_item(item))
            .cloned()
            .collect()
    }

    fn hide_recent(&mut self, cmds: &mut Vec<UiCommand>) {
        if self.recent_visible {
            self.recent_visible = false;
            cmds.push(UiCommand::HideRecentSearches);
        }
    }

    /*
     * Emits the commands that bring the shell in line with the new top of
     * stack. Arriving on a folder screen always re-renders title and (when
     * a listing is known) contents. Arriving back on a search screen is the
     * restore case: the query is put back into the search input without
     * triggering a new search.
     */
    fn after_stack_change(&mut self) -> Vec<UiCommand> {
        let popped = self.stack.len() < self.back_depth;
        self.back_depth = self.stack.len();
        let top = self.stack.last().cloned();
        let mut cmds = Vec::new();
        match top {
            Some(Screen::Folder(folder)) => {
                cmds.push(UiCommand::SetTitle(self.title_for(&folder)));
                cmds.push(UiCommand::DismissKeyboard);
                self.hide_recent(&mut cmds);
                if folder.child_count().is_some() {
                    cmds.push(UiCommand::ShowFolderItems {
                        folder_id: folder.id().to_string(),
                        items: self.filtered(folder.entries()),
                    });
                }
            }
            Some(Screen::Search { query, .. }) => {
                if popped {
                    cmds.push(UiCommand::CollapseSearchInput);
                    cmds.push(UiCommand::SetSearchQuery(query));
                }
            }
            None => {}
        }
        cmds
    }

    fn enter_folder(&mut self, folder: Item) -> Vec<UiCommand> {
        let folder = self.cache.get(folder.id()).unwrap_or(folder);
        log::debug!("BrowseController: Entering folder '{}'.", folder.id());
        self.submitter.submit(self.client.fetch_folder(folder.id()));
        self.stack.push(Screen::Folder(folder));
        self.after_stack_change()
    }

    /*
     * Starts (or retargets) a search for `query`, scoped to the current
     * folder. A search screen already on top is reused in place so typing
     * does not grow the stack one screen per keystroke.
     */
    fn start_search(&mut self, query: String) -> Vec<UiCommand> {
        let scope = self
            .current_folder()
            .map(|folder| folder.id().to_string())
            .unwrap_or_else(|| ROOT_FOLDER_ID.to_string());
        self.submitter.submit(self.client.search(&query, &scope));
        match self.stack.last_mut() {
            Some(Screen::Search {
                query: current,
                scope_folder_id,
            }) => {
                *current = query;
                *scope_folder_id = scope;
            }
            _ => {
                self.stack.push(Screen::Search {
                    query,
                    scope_folder_id: scope,
                });
                self.back_depth = self.stack.len();
            }
        }
        let mut cmds = Vec::new();
        self.hide_recent(&mut cmds);
        cmds
    }

    fn on_item_clicked(&mut self, item: Item) -> Vec<UiCommand> {
        // A click on a search result counts as a successful search; the
        // clicked item's name is what gets remembered, not the query.
        if matches!(self.stack.last(), Some(Screen::Search { .. })) && !is_blank(item.name()) {
            if let Err(e) = self
                .recent_store
                .add_recent_search(self.session.user_id(), item.name())
            {
                log::warn!("BrowseController: Could not record recent search: {e}");
            }
        }
        if is_blank(item.id()) {
            log::warn!("BrowseController: Ignoring click on item with blank id.");
            return Vec::new();
        }
        if item.is_folder() {
            return self.enter_folder(item);
        }
        match self.strategy.on_leaf_click(&item) {
            Some(LeafClickAction::Finish(picked)) => vec![UiCommand::FinishWithResult(picked)],
            Some(LeafClickAction::CreateSharedLink(target)) => {
                self.submitter.submit(self.client.create_shared_link(&target));
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    fn on_query_changed(&mut self, query: String) -> Vec<UiCommand> {
        // A blank query means "nothing to search yet" only before a search
        // has started; clearing the text while in search mode re-issues the
        // search on the existing screen.
        if is_blank(&query) && !matches!(self.stack.last(), Some(Screen::Search { .. })) {
            return Vec::new();
        }
        // The shell echoes SetSearchQuery back as a change event; an
        // unchanged query on a restored search screen must not re-search.
        if let Some(Screen::Search { query: current, .. }) = self.stack.last() {
            if current == &query {
                return Vec::new();
            }
        }
        self.start_search(query)
    }

    fn on_search_expanded(&mut self) -> Vec<UiCommand> {
        if matches!(self.stack.last(), Some(Screen::Search { .. })) {
            // Re-expansion over a restored search keeps its results; the
            // recent list only backs a fresh search.
            return Vec::new();
        }
        if let Err(e) = self
            .recent_history
            .populate(self.recent_store.as_ref(), self.session.user_id())
        {
            log::warn!("BrowseController: Could not load recent searches: {e}");
        }
        self.recent_visible = true;
        vec![UiCommand::ShowRecentSearches(
            self.recent_history.entries().to_vec(),
        )]
    }

    fn on_search_collapsed(&mut self) -> Vec<UiCommand> {
        let mut cmds = Vec::new();
        self.hide_recent(&mut cmds);
        if matches!(self.stack.last(), Some(Screen::Search { .. })) && self.stack.len() > 1 {
            self.stack.pop();
            cmds.extend(self.after_stack_change());
        }
        cmds
    }

    fn on_recent_search_picked(&mut self, index: usize) -> Vec<UiCommand> {
        match self.recent_history.get(index).cloned() {
            Some(query) => {
                let mut cmds = vec![UiCommand::SetSearchQuery(query.clone())];
                cmds.extend(self.start_search(query));
                cmds
            }
            None => {
                log::warn!("BrowseController: Recent search index {index} out of range.");
                Vec::new()
            }
        }
    }

    fn on_recent_search_deleted(&mut self, index: usize) -> Vec<UiCommand> {
        if let Err(e) =
            self.recent_history
                .delete(self.recent_store.as_ref(), self.session.user_id(), index)
        {
            log::warn!("BrowseController: Could not delete recent search: {e}");
        }
        vec![UiCommand::ShowRecentSearches(
            self.recent_history.entries().to_vec(),
        )]
    }

    fn on_select_current_folder(&mut self) -> Vec<UiCommand> {
        let Some(folder) = self.current_folder() else {
            return Vec::new();
        };
        match self.strategy.on_confirm(&folder) {
            Some(LeafClickAction::Finish(picked)) => vec![UiCommand::FinishWithResult(picked)],
            Some(LeafClickAction::CreateSharedLink(target)) => {
                self.submitter.submit(self.client.create_shared_link(&target));
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    fn on_create_folder_submitted(&mut self, name: String) -> Vec<UiCommand> {
        let name = name.trim();
        if name.is_empty() {
            log::debug!("BrowseController: Ignoring blank folder name.");
            return Vec::new();
        }
        if let Some(folder) = self.current_folder() {
            self.submitter
                .submit(self.client.create_folder(folder.id(), name));
        }
        vec![UiCommand::DismissKeyboard]
    }

    fn on_back_pressed(&mut self) -> Vec<UiCommand> {
        if self.stack.len() <= 1 {
            return vec![UiCommand::FinishCancelled];
        }
        self.stack.pop();
        self.after_stack_change()
    }

    fn handle_response(&mut self, response: ApiResponse) -> Vec<UiCommand> {
        match response {
            ApiResponse::FolderContents { folder: Ok(folder) } => {
                self.cache.put(&folder);
                for screen in self.stack.iter_mut() {
                    if let Screen::Folder(item) = screen {
                        if item.id() == folder.id() {
                            *item = folder.clone();
                        }
                    }
                }
                let top_matches = matches!(
                    self.stack.last(),
                    Some(Screen::Folder(top)) if top.id() == folder.id()
                );
                if !top_matches {
                    log::debug!(
                        "BrowseController: Folder '{}' is not on top; contents cached only.",
                        folder.id()
                    );
                    return Vec::new();
                }
                vec![
                    UiCommand::SetTitle(self.title_for(&folder)),
                    UiCommand::ShowFolderItems {
                        folder_id: folder.id().to_string(),
                        items: self.filtered(folder.entries()),
                    },
                ]
            }
            ApiResponse::FolderContents { folder: Err(e) } => {
                log::warn!("BrowseController: Folder fetch failed: {e}");
                vec![UiCommand::ShowNotice(Notice::NetworkError)]
            }
            ApiResponse::SearchResults {
                query,
                results: Ok(items),
                ..
            } => {
                let top_matches = matches!(
                    self.stack.last(),
                    Some(Screen::Search { query: current, .. }) if current == &query
                );
                if !top_matches {
                    log::debug!("BrowseController: Dropping stale results for '{query}'.");
                    return Vec::new();
                }
                let items = self.filtered(&items);
                vec![UiCommand::ShowSearchResults { query, items }]
            }
            ApiResponse::SearchResults { results: Err(e), .. } => {
                log::warn!("BrowseController: Search failed: {e}");
                vec![UiCommand::ShowNotice(Notice::NetworkError)]
            }
            ApiResponse::FolderCreated { folder: Ok(folder) } => {
                self.cache.put(&folder);
                // The new folder appears through a full refresh of the
                // current listing, not by splicing it in locally.
                if let Some(current) = self.current_folder() {
                    self.submitter.submit(self.client.fetch_folder(current.id()));
                }
                Vec::new()
            }
            ApiResponse::FolderCreated { folder: Err(e) } => {
                log::warn!("BrowseController: Folder creation failed: {e}");
                if e.status_code() == Some(HTTP_CONFLICT) {
                    vec![UiCommand::ShowNotice(Notice::CreateFolderConflict)]
                } else {
                    vec![UiCommand::ShowNotice(Notice::NetworkError)]
                }
            }
            ApiResponse::SharedLinkUpdated { item } => {
                match self.strategy.on_shared_link_updated(&item) {
                    PickOutcome::Finish(picked) => {
                        self.cache.put(&picked);
                        vec![UiCommand::FinishWithResult(picked)]
                    }
                    PickOutcome::Notice(notice) => vec![UiCommand::ShowNotice(notice)],
                    PickOutcome::Ignored => Vec::new(),
                }
            }
        }
    }
}

impl ShellEventHandler for BrowseController {
    fn handle_event(&mut self, event: BrowseEvent) -> Vec<UiCommand> {
        log::trace!("BrowseController: Handling {event:?}.");
        match event {
            BrowseEvent::ScreenReady => {
                if let Some(folder) = self.current_folder() {
                    self.submitter.submit(self.client.fetch_folder(folder.id()));
                }
                self.after_stack_change()
            }
            BrowseEvent::ItemClicked(item) => self.on_item_clicked(item),
            BrowseEvent::QueryTextChanged(query) => self.on_query_changed(query),
            BrowseEvent::QueryTextSubmitted => vec![UiCommand::DismissKeyboard],
            BrowseEvent::SearchExpanded => self.on_search_expanded(),
            BrowseEvent::SearchCollapsed => self.on_search_collapsed(),
            BrowseEvent::RecentSearchPicked(index) => self.on_recent_search_picked(index),
            BrowseEvent::RecentSearchDeleted(index) => self.on_recent_search_deleted(index),
            BrowseEvent::BackPressed => self.on_back_pressed(),
            BrowseEvent::SelectCurrentFolder => self.on_select_current_folder(),
            BrowseEvent::CreateFolderSubmitted { name } => self.on_create_folder_submitted(name),
            BrowseEvent::ResponseDelivered(response) => self.handle_response(response),
            BrowseEvent::AuthFailed => vec![
                UiCommand::ShowNotice(Notice::SessionNotAuthenticated),
                UiCommand::FinishCancelled,
            ],
        }
    }
}
