//! Error types for the API client.

use crate::types::ErrorBody;

/// Errors that can occur when talking to the backend.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request never produced a response (connection failure, timeout,
    /// or a client that could not be built).
    #[error("request failed")]
    RequestFailed,

    /// The backend answered with a non-success status. `body` carries the
    /// structured error payload when one could be parsed.
    #[error("request failed with status {status}")]
    Status { status: u16, body: Option<ErrorBody> },

    /// A success response carried a body this client could not make sense
    /// of: malformed JSON or a list envelope violating its contract.
    #[error("unexpected response body")]
    UnexpectedBody,
}
