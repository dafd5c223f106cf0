use crate::error::ResolveError;
use serde::Deserialize;
use std::time::Duration;
use url::{ParseError, Url};

/// Host every accepted source URL must belong to.
pub const SOURCE_DOMAIN: &str = "spotify.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Track,
    Album,
    Playlist,
    /// On the right domain but not a path we recognise; handled like a list.
    Other,
}

/// A validated Spotify URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReference {
    url: Url,
    kind: SourceKind,
}

impl SourceReference {
    pub fn parse(input: &str) -> Result<Self, ResolveError> {
        let input = input.trim();
        let invalid = || ResolveError::InvalidSource(input.to_string());

        let url = match Url::parse(input) {
            Ok(url) => url,
            // "open.spotify.com/track/..." pasted without a scheme
            Err(ParseError::RelativeUrlWithoutBase) => {
                Url::parse(&format!("https://{input}")).map_err(|_| invalid())?
            }
            Err(_) => return Err(invalid()),
        };

        let on_domain = url.host_str().is_some_and(|host| {
            host == SOURCE_DOMAIN || host.ends_with(&format!(".{SOURCE_DOMAIN}"))
        });
        if !on_domain {
            return Err(invalid());
        }

        // The kind segment may follow prefixes such as "intl-de" or "embed"
        let kind = url
            .path_segments()
            .and_then(|mut segments| {
                segments.find_map(|segment| match segment {
                    "track" => Some(SourceKind::Track),
                    "album" => Some(SourceKind::Album),
                    "playlist" => Some(SourceKind::Playlist),
                    _ => None,
                })
            })
            .unwrap_or(SourceKind::Other);

        Ok(Self { url, kind })
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn is_single_track(&self) -> bool {
        self.kind == SourceKind::Track
    }
}

/// The subset of the oEmbed document we use. Missing fields read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OEmbed {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub iframe_url: String,
}

/// JSON inlined in the embed page, reduced to
/// `props.pageProps.state.data.entity.trackList`.
#[derive(Debug, Deserialize)]
pub struct EmbedPayload {
    props: Props,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Props {
    page_props: PageProps,
}

#[derive(Debug, Deserialize)]
struct PageProps {
    state: EmbedState,
}

#[derive(Debug, Deserialize)]
struct EmbedState {
    data: EmbedData,
}

#[derive(Debug, Deserialize)]
struct EmbedData {
    entity: EmbedEntity,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmbedEntity {
    track_list: Vec<TrackDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrackDescriptor {
    pub title: String,
    /// Artist line as shown in the embed player.
    pub subtitle: String,
}

impl EmbedPayload {
    pub fn track_list(&self) -> &[TrackDescriptor] {
        &self.props.page_props.state.data.entity.track_list
    }

    pub fn into_track_list(self) -> Vec<TrackDescriptor> {
        self.props.page_props.state.data.entity.track_list
    }
}

/// Endpoints and headers used to talk to Spotify.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub oembed_endpoint: String,

    /// Sent with the embed page request; the default agent gets blocked.
    pub user_agent: String,

    /// Applies to each request as a whole, connect through body.
    pub request_timeout: Duration,
}

impl ResolverConfig {
    pub const DEFAULT_OEMBED_ENDPOINT: &'static str = "https://open.spotify.com/oembed";
    pub const DEFAULT_USER_AGENT: &'static str = "Mozilla/5.0 (X11; Linux x86_64) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            oembed_endpoint: Self::DEFAULT_OEMBED_ENDPOINT.to_string(),
            user_agent: Self::DEFAULT_USER_AGENT.to_string(),
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
        }
    }
}
