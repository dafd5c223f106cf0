use crate::types::AudioFormat;
use std::path::{Path, PathBuf};

/// Settings for one download session.
#[derive(Debug, Clone)]
pub struct DownloaderConfig {
    /// Directory the audio files are written to; created on construction
    pub destination: PathBuf,

    /// How many search results to try per title before skipping it
    pub max_search_rank: u32,

    /// Characters stripped from the end of a title to form the file name.
    /// Matches the length of the suffix the resolver appends.
    pub title_suffix_length: usize,

    pub audio_format: AudioFormat,

    /// Silence yt-dlp; otherwise its own output goes to stdout
    pub quiet: bool,

    /// Require the audio file to exist before counting a rank as successful
    pub verify_output: bool,
}

impl DownloaderConfig {
    pub const DEFAULT_MAX_SEARCH_RANK: u32 = 5;

    /// `" lyric video"`
    pub const DEFAULT_TITLE_SUFFIX_LENGTH: usize = 12;

    pub fn new(destination: impl AsRef<Path>) -> Self {
        Self {
            destination: destination.as_ref().to_owned(),
            max_search_rank: Self::DEFAULT_MAX_SEARCH_RANK,
            title_suffix_length: Self::DEFAULT_TITLE_SUFFIX_LENGTH,
            audio_format: AudioFormat::default(),
            quiet: true,
            verify_output: true,
        }
    }

    pub fn with_max_search_rank(mut self, max_search_rank: u32) -> Self {
        self.max_search_rank = max_search_rank;
        self
    }

    pub fn with_title_suffix_length(mut self, title_suffix_length: usize) -> Self {
        self.title_suffix_length = title_suffix_length;
        self
    }

    pub fn with_audio_format(mut self, audio_format: AudioFormat) -> Self {
        self.audio_format = audio_format;
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn with_verify_output(mut self, verify_output: bool) -> Self {
        self.verify_output = verify_output;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use session_primitives::LYRIC_VIDEO_SUFFIX;

    #[test]
    fn test_defaults() {
        let config = DownloaderConfig::new("/music");
        assert_eq!(config.destination, PathBuf::from("/music"));
        assert_eq!(config.max_search_rank, 5);
        assert_eq!(config.audio_format.extension(), "m4a");
        assert!(config.quiet);
        assert!(config.verify_output);
    }

    #[test]
    fn test_default_suffix_length_matches_resolver_suffix() {
        assert_eq!(
            DownloaderConfig::DEFAULT_TITLE_SUFFIX_LENGTH,
            LYRIC_VIDEO_SUFFIX.chars().count()
        );
    }

    #[test]
    fn test_builder_overrides() {
        let config = DownloaderConfig::new("/music")
            .with_max_search_rank(2)
            .with_title_suffix_length(0)
            .with_audio_format("opus".parse().unwrap())
            .with_verify_output(false);

        assert_eq!(config.max_search_rank, 2);
        assert_eq!(config.title_suffix_length, 0);
        assert_eq!(config.audio_format.extension(), "opus");
        assert!(!config.verify_output);
    }
}
