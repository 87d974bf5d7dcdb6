//! Error types for the console.
//!
//! `ConsoleError` covers every failure a command handler can hit. Handlers
//! log the error into the output panel before returning it, so the binary
//! only uses it to pick an exit status.
//!
//! ## Error Cases
//! - `Http`: the service answered with a non-2xx status.
//! - `Network`: the request never produced a response.
//! - `MissingInput`: a required form field was empty.
//! - `InvalidId`: a user or skill id is not a 24-digit hex ObjectId.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Non-success status. `body` is the response text, or the reason phrase
    /// when the body was empty.
    #[error("{status} {body}")]
    Http { status: u16, body: String },

    /// Transport-level failure (DNS, connect, TLS, timeout, ...).
    #[error("{0}")]
    Network(String),

    #[error("{field} required")]
    MissingInput { field: &'static str },

    #[error("Invalid {what}: {value:?}")]
    InvalidId { what: &'static str, value: String },
}

impl From<reqwest::Error> for ConsoleError {
    fn from(err: reqwest::Error) -> Self {
        let message = err.to_string();
        if message.is_empty() {
            Self::Network("Network Error".to_owned())
        } else {
            Self::Network(message)
        }
    }
}

pub type Result<T, E = ConsoleError> = core::result::Result<T, E>;
