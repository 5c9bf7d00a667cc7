/*
 * A headless browse-and-pick library for a cloud storage content API.
 *
 * The library owns navigation, search, selection, and background call
 * orchestration; it draws nothing. A host shell feeds it `BrowseEvent`s and
 * executes the `UiCommand`s it answers with, supplying the actual network
 * transport behind the `ContentClient` trait. Flows are started through
 * `BrowseIntent` (plain browsing, file pick, folder pick) and run against a
 * `BrowseSession` resolved from the host's durable auth store.
 *
 * Background calls run on the process-wide `TaskDispatcher` pool, which
 * broadcasts name-only start/end signals and delivers completed responses
 * through one shared queue. Every screen in the process shares that queue;
 * consumers match responses by kind and payload identity, never by request
 * handle.
 */
pub mod api;
pub mod app_logic;
pub mod core;
pub mod dispatch;
pub mod shell;

pub use crate::api::{ApiCall, ApiRequest, ApiResponse, ContentClient};
pub use crate::app_logic::{BrowseController, BrowseIntent, IntentError};
pub use crate::core::{AuthInfo, AuthStore, BrowseSession, Item, ROOT_FOLDER_ID};
pub use crate::dispatch::{TaskDispatcher, TaskSignal, TaskSubmitter};
pub use crate::shell::{BrowseEvent, Notice, ShellEventHandler, UiCommand};
