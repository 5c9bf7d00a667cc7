/*
 * The content API boundary: operation descriptors, call objects, the
 * client trait implemented by the host's transport, and the tagged
 * response union delivered back through the task dispatcher.
 */
pub mod client;
pub mod response;

pub use client::{ApiCall, ApiRequest, ContentClient, DEFAULT_CALL_TIMEOUT};
pub use response::{
    ApiError, ApiResponse, CallOutcome, HTTP_CONFLICT, HTTP_FORBIDDEN, HTTP_NOT_MODIFIED,
};
