use serde::{Deserialize, Serialize};
use std::fmt;

/// Appended to every title to bias the video search towards lyric uploads,
/// which are usually clean audio close to the studio duration.
pub const LYRIC_VIDEO_SUFFIX: &str = " lyric video";

/// A search-ready track title, e.g. `"Song Name Artist lyric video"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackTitle(String);

impl TrackTitle {
    /// Wrap an already formatted title.
    pub fn new(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    /// Title of a single track: `"{title} lyric video"`.
    pub fn single(title: &str) -> Self {
        Self(format!("{title}{LYRIC_VIDEO_SUFFIX}"))
    }

    /// Title of a track inside an album or playlist: `"{title} {subtitle} lyric video"`.
    pub fn with_subtitle(title: &str, subtitle: &str) -> Self {
        Self(format!("{title} {subtitle}{LYRIC_VIDEO_SUFFIX}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The title without its trailing `suffix_length` characters.
    ///
    /// Counts characters, not bytes. A title that is not longer than the
    /// suffix is returned whole so the result is never empty.
    pub fn base_name(&self, suffix_length: usize) -> &str {
        let length = self.0.chars().count();
        if length <= suffix_length {
            return &self.0;
        }

        let cut = self
            .0
            .char_indices()
            .nth(length - suffix_length)
            .map_or(self.0.len(), |(index, _)| index);
        &self.0[..cut]
    }
}

impl fmt::Display for TrackTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TrackTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn single_track_gets_suffix() {
        assert_eq!(TrackTitle::single("Song Name").as_str(), "Song Name lyric video");
    }

    #[test]
    fn listed_track_joins_title_and_subtitle() {
        let title = TrackTitle::with_subtitle("Song", "Artist");
        assert_eq!(title.as_str(), "Song Artist lyric video");
    }

    #[test]
    fn suffix_length_matches_constant() {
        assert_eq!(LYRIC_VIDEO_SUFFIX.chars().count(), 12);
    }

    #[rstest]
    #[case("Song Name lyric video", 12, "Song Name")]
    #[case("Song Artist lyric video", 12, "Song Artist")]
    #[case("Björk Jóga lyric video", 12, "Björk Jóga")]
    #[case("Song Name acoustic", 9, "Song Name")]
    #[case("short", 12, "short")]
    #[case(" lyric video", 12, " lyric video")]
    fn base_name_strips_trailing_characters(
        #[case] title: &str,
        #[case] suffix_length: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(TrackTitle::new(title).base_name(suffix_length), expected);
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&TrackTitle::single("Song")).unwrap();
        assert_eq!(json, r#""Song lyric video""#);
    }
}
