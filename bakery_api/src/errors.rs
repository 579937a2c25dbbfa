//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request never produced a response (network error, bad URL, or an
    /// unreadable body).
    #[error("Request failed")]
    RequestFailed,
    /// The API returned a non-success status. `body` is the raw response text.
    #[error("API error {status}: {body}")]
    HttpStatus { status: u16, body: String },
    /// The request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(String),
    /// The body was not valid JSON, or an item did not match the expected type.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl Error {
    /// Returns the HTTP status code for [`Error::HttpStatus`], `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
