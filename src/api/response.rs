/*
 * Responses coming back from the content API. `ApiResponse` is a tagged
 * union over the originating operation kind, so consumers dispatch by
 * exhaustive match rather than by inspecting a request object's dynamic
 * type. Each variant carries the outcome of exactly one call.
 */
use std::fmt;

use crate::core::models::Item;

pub const HTTP_NOT_MODIFIED: u16 = 304;
pub const HTTP_FORBIDDEN: u16 = 403;
pub const HTTP_CONFLICT: u16 = 409;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server answered with a non-success HTTP status.
    Status { code: u16, message: String },
    /// The call never produced an HTTP status (connectivity, timeout).
    Network(String),
}

impl ApiError {
    pub fn status(code: u16, message: impl Into<String>) -> Self {
        ApiError::Status {
            code,
            message: message.into(),
        }
    }

    /// The HTTP status code, when the failure carries one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { code, .. } => Some(*code),
            ApiError::Network(_) => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Status { code, message } => write!(f, "API error {code}: {message}"),
            ApiError::Network(message) => write!(f, "Network error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

pub type CallOutcome<T> = std::result::Result<T, ApiError>;

/*
 * A completed call, tagged by the operation that produced it. The delivery
 * queue is shared process-wide, so the tag is the only thing a consumer has
 * for deciding whether a drained response concerns it.
 */
#[derive(Debug, Clone)]
pub enum ApiResponse {
    /// A folder fetched with its child listing.
    FolderContents { folder: CallOutcome<Item> },
    /// Search results for a query within a scope folder.
    SearchResults {
        query: String,
        scope_folder_id: String,
        results: CallOutcome<Vec<Item>>,
    },
    /// A newly created folder.
    FolderCreated { folder: CallOutcome<Item> },
    /// An item whose shared link was created or updated.
    SharedLinkUpdated { item: CallOutcome<Item> },
}
