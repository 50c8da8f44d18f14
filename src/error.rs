//! Error types for the gallery and its widgets.

use thiserror::Error;

/// Errors raised by the pagination widget and its window calculator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaginationError {
    /// A page count, window size or page number was outside its valid range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// `render` was called on a widget whose root is already attached.
    #[error("pagination root is already rendered")]
    AlreadyRendered,
}

/// Errors raised by the image search client.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The query was blank after trimming.
    #[error("search query is empty")]
    EmptyQuery,

    /// Transport failure talking to the image API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("image API returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The response body was not the expected JSON.
    #[error("could not decode image API response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors raised while assembling the runtime configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No API key was found in the flags or environment.
    #[error("no Pixabay API key configured (set PIXABAY_API_KEY or pass --api-key)")]
    MissingApiKey,

    /// A setting had a value outside its allowed range.
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        /// Setting name.
        key: String,
        /// Offending value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The configuration was published twice.
    #[error("configuration already initialised")]
    AlreadyInitialised,
}

/// Top-level error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Pagination failure.
    #[error(transparent)]
    Pagination(#[from] PaginationError),

    /// Search failure.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Configuration failure.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result alias using the crate error.
pub type Result<T> = std::result::Result<T, Error>;
