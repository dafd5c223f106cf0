use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Couldn't find embedded data")]
    NotFound,

    #[error("Malformed embedded data: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Not a valid Spotify URL: {0}")]
    InvalidSource(String),

    #[error("oEmbed metadata request failed with status {0}")]
    MetadataStatus(StatusCode),

    #[error("Malformed oEmbed metadata: {0}")]
    MetadataFormat(#[source] serde_json::Error),

    #[error("oEmbed metadata has no iframe_url")]
    MissingEmbedUrl,

    #[error("Embed page request failed with status {0}")]
    EmbedPageStatus(StatusCode),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}
