/*
 * The content API client seam. The library never speaks HTTP itself; a
 * `ContentClient` implementation builds `ApiCall` objects, each bundling an
 * operation descriptor with a closure that performs the round-trip and
 * produces the matching `ApiResponse`. Calls are executed on the task
 * dispatcher's worker pool and consumed exactly once.
 */
use std::fmt;
use std::time::Duration;

use crate::api::response::ApiResponse;
use crate::core::models::Item;

/// Advisory per-call timeout. The dispatcher does not enforce it; call
/// implementations are expected to apply it to their transport.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Describes an operation without performing it. Used for logging and for
/// tests that assert which calls a flow issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    ListFolder { folder_id: String },
    Search { query: String, scope_folder_id: String },
    CreateFolder { parent_id: String, name: String },
    CreateSharedLink { item_id: String },
}

/// One unit of background work: an operation descriptor plus the closure
/// that executes it.
pub struct ApiCall {
    request: ApiRequest,
    exec: Box<dyn FnOnce() -> ApiResponse + Send>,
}

impl ApiCall {
    pub fn new(request: ApiRequest, exec: impl FnOnce() -> ApiResponse + Send + 'static) -> Self {
        ApiCall {
            request,
            exec: Box::new(exec),
        }
    }

    pub fn request(&self) -> &ApiRequest {
        &self.request
    }

    /// Performs the call. Consumes the call; a response is produced exactly
    /// once.
    pub fn run(self) -> ApiResponse {
        (self.exec)()
    }
}

impl fmt::Debug for ApiCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCall")
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}

pub trait ContentClient: Send + Sync {
    /// Builds a call that fetches a folder together with its child listing.
    fn fetch_folder(&self, folder_id: &str) -> ApiCall;

    /// Builds a call that searches for `query` within the given scope folder.
    fn search(&self, query: &str, scope_folder_id: &str) -> ApiCall;

    /// Builds a call that creates a folder named `name` under `parent_id`.
    fn create_folder(&self, parent_id: &str, name: &str) -> ApiCall;

    /// Builds a call that creates (or refreshes) a shareable link on `item`.
    fn create_shared_link(&self, item: &Item) -> ApiCall;
}
