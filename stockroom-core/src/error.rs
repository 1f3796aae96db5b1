// Error types for the stockroom HTTP layer

use crate::{HttpResponse, HttpStatus};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Route not found: {0}")]
    RouteNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        self.http_status().code()
    }

    /// Get the HttpStatus enum for this error
    pub fn http_status(&self) -> HttpStatus {
        match self {
            Error::RouteNotFound(_) | Error::NotFound(_) => HttpStatus::NotFound,
            Error::BadRequest(_) | Error::Deserialization(_) => HttpStatus::BadRequest,
            Error::Serialization(_) | Error::Internal(_) | Error::Io(_) => {
                HttpStatus::InternalServerError
            }
        }
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        self.http_status().is_server_error()
    }

    /// The text sent to the client.
    ///
    /// Client errors expose their detail message verbatim. Server errors only
    /// expose the reason phrase; the detail goes to the log.
    pub fn public_message(&self) -> String {
        match self {
            Error::RouteNotFound(msg)
            | Error::BadRequest(msg)
            | Error::NotFound(msg)
            | Error::Deserialization(msg) => msg.clone(),
            Error::Serialization(_) | Error::Internal(_) | Error::Io(_) => {
                self.http_status().reason().to_string()
            }
        }
    }

    /// Convert into a plain-text response
    pub fn into_response(self) -> HttpResponse {
        if self.is_server_error() {
            error!(error = %self, "Request failed");
        }
        HttpResponse::text(self.public_message()).with_status(self.status_code())
    }
}
