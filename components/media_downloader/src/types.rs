use session_primitives::TrackTitle;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Required dependency not found: {0}")]
    DependencyNotFound(&'static str),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Downloader reported success but no file named {0:?} was written")]
    OutputMissing(String),

    #[error("Invalid audio format: {0:?}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Preferred audio container, e.g. `m4a`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFormat(String);

impl AudioFormat {
    pub fn extension(&self) -> &str {
        &self.0
    }

    /// yt-dlp format selector for the best audio-only stream in this container
    pub fn selector(&self) -> String {
        format!("bestaudio[ext={}]", self.0)
    }
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self("m4a".to_string())
    }
}

impl FromStr for AudioFormat {
    type Err = DownloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ext = s.trim().trim_start_matches('.').to_ascii_lowercase();
        if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DownloadError::InvalidFormat(s.to_string()));
        }
        Ok(Self(ext))
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// "Fetch the result at `rank` when searching for `text`."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub rank: u32,
    pub text: String,
}

impl SearchQuery {
    pub fn new(rank: u32, text: impl Into<String>) -> Self {
        Self {
            rank,
            text: text.into(),
        }
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ytsearch{}:{}", self.rank, self.text)
    }
}

/// Everything the downloader needs for one search-and-fetch call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub query: SearchQuery,

    /// Destination path with the extension left as a `%(ext)s` placeholder
    pub output_template: PathBuf,

    pub format: AudioFormat,

    /// Suppress the downloader's own progress and warnings
    pub quiet: bool,
}

/// One rank tried for one title. Only lives long enough to be traced.
#[derive(Debug)]
pub struct DownloadAttempt<'a> {
    pub title: &'a TrackTitle,
    pub rank: u32,
    pub outcome: Result<PathBuf, DownloadError>,
}

impl DownloadAttempt<'_> {
    pub fn trace(&self) {
        match &self.outcome {
            Ok(path) => debug!(title = %self.title, rank = self.rank, path = %path.display(), "Search rank yielded audio"),
            Err(error) => debug!(title = %self.title, rank = self.rank, %error, "Search rank failed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadResult {
    /// Where the file was written, or where it is expected when output
    /// verification is disabled
    Succeeded(PathBuf),
    Skipped(String),
}

impl DownloadResult {
    pub fn is_success(&self) -> bool {
        matches!(self, DownloadResult::Succeeded(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            DownloadResult::Succeeded(path) => Some(path),
            DownloadResult::Skipped(_) => None,
        }
    }
}

/// Outcome of every title in a run, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionReport {
    entries: Vec<(TrackTitle, DownloadResult)>,
}

impl SessionReport {
    pub fn push(&mut self, title: TrackTitle, result: DownloadResult) {
        self.entries.push((title, result));
    }

    pub fn entries(&self) -> &[(TrackTitle, DownloadResult)] {
        &self.entries
    }

    pub fn succeeded(&self) -> usize {
        self.entries.iter().filter(|(_, result)| result.is_success()).count()
    }

    pub fn skipped(&self) -> usize {
        self.entries.len() - self.succeeded()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rstest::rstest;

    #[test]
    fn test_search_query_directive() {
        let query = SearchQuery::new(3, "Song Name lyric video");
        assert_eq!(query.to_string(), "ytsearch3:Song Name lyric video");
    }

    #[rstest]
    #[case("m4a", "m4a")]
    #[case(".opus", "opus")]
    #[case(" MP3 ", "mp3")]
    fn test_audio_format_parsing(#[case] input: &str, #[case] expected: &str) {
        let format: AudioFormat = input.parse().unwrap();
        assert_eq!(format.extension(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("m4a]")]
    #[case("best audio")]
    fn test_audio_format_rejects_selector_syntax(#[case] input: &str) {
        assert_matches!(input.parse::<AudioFormat>(), Err(DownloadError::InvalidFormat(_)));
    }

    #[test]
    fn test_default_format_selector() {
        assert_eq!(AudioFormat::default().selector(), "bestaudio[ext=m4a]");
    }

    #[test]
    fn test_report_counts() {
        let mut report = SessionReport::default();
        report.push(
            TrackTitle::single("A"),
            DownloadResult::Succeeded(PathBuf::from("/music/A.m4a")),
        );
        report.push(TrackTitle::single("B"), DownloadResult::Skipped("no audio".into()));
        report.push(
            TrackTitle::single("C"),
            DownloadResult::Succeeded(PathBuf::from("/music/C.m4a")),
        );

        assert_eq!(report.len(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.entries()[1].1.path(), None);
    }
}
