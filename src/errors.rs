// src/errors.rs
use std::fmt;

/// Errors originating from routing, validation, auth, or downstream layers.
#[derive(Debug)]
pub enum ServerError {
    NotFound,
    BadRequest(String),
    /// Not signed in (or session expired). Router turns this into a
    /// redirect to /login.
    Unauthorized(String),
    /// Signed in, but the role may not perform the action.
    Forbidden(String),
    /// User input rejected before any write happened.
    Validation(String),
    DbError(String),
    XlsxError(String),
    MailError(String),
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<astra::Response, ServerError>;

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::NotFound => write!(f, "Not Found"),
            ServerError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            ServerError::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            ServerError::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
            ServerError::Validation(msg) => write!(f, "Validation failed: {msg}"),
            ServerError::DbError(msg) => write!(f, "Database Error: {msg}"),
            ServerError::XlsxError(msg) => write!(f, "Spreadsheet Error: {msg}"),
            ServerError::MailError(msg) => write!(f, "Mail Error: {msg}"),
            ServerError::InternalError => write!(f, "Internal Server Error"),
        }
    }
}

impl std::error::Error for ServerError {}
