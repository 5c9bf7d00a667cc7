/*
 * The flow logic layer: intent builders for starting a flow, the
 * per-flow-kind pick strategies, and the `BrowseController` state machine
 * that turns shell events into UI commands.
 */
pub mod controller;
pub mod intent;
pub mod pick;
pub mod ui_constants;


pub use controller::BrowseController;
pub use intent::{BrowseIntent, IntentError};
pub use pick::{BrowseOnly, FilePick, FolderPick, LeafClickAction, PickOutcome, PickStrategy};
pub use ui_constants::ALL_FILES_LABEL;
