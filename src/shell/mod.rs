/*
 * The seam between the browse logic and whatever host renders it. Only
 * data types and the event-handler trait live here; the host supplies the
 * widgets and the event loop.
 */
pub mod types;

pub use types::{BrowseEvent, Notice, ShellEventHandler, UiCommand};
