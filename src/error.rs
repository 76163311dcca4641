use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("Request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to send request to {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Cloudflare API error ({status}) for {url}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("Cloudflare API rejected request to {url}: {message}")]
    Api { url: String, message: String },

    #[error("Failed to parse response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("No zone found for {0}")]
    ZoneNotFound(String),
}
