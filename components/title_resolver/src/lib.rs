// components/title_resolver/src/lib.rs
mod client;
mod error;
mod extractor;
mod types;

use session_primitives::{EventLog, TrackTitle};
use std::sync::Arc;
use tracing::debug;

pub use client::{EmbedClient, HttpEmbedClient};
pub use error::{ExtractError, ResolveError};
pub use extractor::{EmbeddedDataExtractor, ScriptPropsExtractor};
pub use types::{
    EmbedPayload, OEmbed, ResolverConfig, SourceKind, SourceReference, TrackDescriptor,
    SOURCE_DOMAIN,
};

/// Turns a Spotify track, album or playlist URL into search-ready titles.
pub struct TitleResolver {
    client: Arc<dyn EmbedClient + Send + Sync>,
    extractor: Arc<dyn EmbeddedDataExtractor + Send + Sync>,
    events: EventLog,
}

impl TitleResolver {
    /// Create a resolver that talks to Spotify over HTTP
    pub fn new(config: ResolverConfig, events: EventLog) -> Result<Self, ResolveError> {
        let client = HttpEmbedClient::new(config)?;
        Ok(Self::with_parts(
            Arc::new(client),
            Arc::new(ScriptPropsExtractor),
            events,
        ))
    }

    /// Create a resolver from specific client and extractor implementations
    pub fn with_parts(
        client: Arc<dyn EmbedClient + Send + Sync>,
        extractor: Arc<dyn EmbeddedDataExtractor + Send + Sync>,
        events: EventLog,
    ) -> Self {
        Self {
            client,
            extractor,
            events,
        }
    }

    /// Resolve `url` into titles in source order.
    ///
    /// Never fails: any problem is reported as a single failure event and an
    /// empty list is returned, which callers treat as "nothing to download".
    pub async fn resolve(&self, url: &str) -> Vec<TrackTitle> {
        match self.try_resolve(url).await {
            Ok(titles) => titles,
            Err(error) => {
                self.events.failure(error.to_string());
                Vec::new()
            }
        }
    }

    /// Like [`resolve`](Self::resolve), but hands the error back instead of reporting it.
    pub async fn try_resolve(&self, url: &str) -> Result<Vec<TrackTitle>, ResolveError> {
        let source = SourceReference::parse(url)?;
        let oembed = self.client.fetch_oembed(&source).await?;

        if source.is_single_track() {
            return Ok(vec![TrackTitle::single(&oembed.title)]);
        }

        if oembed.iframe_url.is_empty() {
            return Err(ResolveError::MissingEmbedUrl);
        }

        let html = self.client.fetch_embed_page(&oembed.iframe_url).await?;
        let payload = self.extractor.extract(&html)?;

        debug!(
            kind = ?source.kind(),
            tracks = payload.track_list().len(),
            "Found embedded track list"
        );

        Ok(payload
            .into_track_list()
            .iter()
            .map(|track| TrackTitle::with_subtitle(&track.title, &track.subtitle))
            .collect())
    }
}
