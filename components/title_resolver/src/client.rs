use crate::error::ResolveError;
use crate::types::{OEmbed, ResolverConfig, SourceReference};
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::{Client, Request};
use tracing::debug;

/// The two HTTP calls title resolution needs.
#[async_trait]
pub trait EmbedClient {
    /// Fetch the oEmbed document describing `source`.
    async fn fetch_oembed(&self, source: &SourceReference) -> Result<OEmbed, ResolveError>;

    /// Fetch the HTML of the embeddable player page.
    async fn fetch_embed_page(&self, iframe_url: &str) -> Result<String, ResolveError>;
}

pub struct HttpEmbedClient {
    client: Client,
    config: ResolverConfig,
}

impl HttpEmbedClient {
    pub fn new(config: ResolverConfig) -> Result<Self, ResolveError> {
        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }

    fn oembed_request(&self, source: &SourceReference) -> reqwest::Result<Request> {
        self.client
            .get(&self.config.oembed_endpoint)
            .query(&[("url", source.as_str())])
            .timeout(self.config.request_timeout)
            .build()
    }

    fn embed_page_request(&self, iframe_url: &str) -> reqwest::Result<Request> {
        self.client
            .get(iframe_url)
            .header(USER_AGENT, &self.config.user_agent)
            .timeout(self.config.request_timeout)
            .build()
    }
}

#[async_trait]
impl EmbedClient for HttpEmbedClient {
    async fn fetch_oembed(&self, source: &SourceReference) -> Result<OEmbed, ResolveError> {
        debug!(url = source.as_str(), "Requesting oEmbed metadata");

        let request = self.oembed_request(source)?;
        let response = self.client.execute(request).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::MetadataStatus(status));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(ResolveError::MetadataFormat)
    }

    async fn fetch_embed_page(&self, iframe_url: &str) -> Result<String, ResolveError> {
        debug!(iframe_url, "Requesting embed page");

        let request = self.embed_page_request(iframe_url)?;
        let response = self.client.execute(request).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::EmbedPageStatus(status));
        }

        Ok(response.text().await?)
    }
}
