use crate::args::Args;
use chrono::NaiveDateTime;
use media_downloader::{session_directory, DownloadError, DownloaderConfig};
use std::path::PathBuf;
use title_resolver::ResolverConfig;

/// Everything one session needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub url: String,
    pub resolver: ResolverConfig,
    pub downloader: DownloaderConfig,
    pub verbose: bool,
}

impl AppConfig {
    /// `started_at` names the session directory, so it is taken once by the caller.
    pub fn from_args(args: Args, started_at: NaiveDateTime) -> Result<Self, DownloadError> {
        let root = args.output_dir.unwrap_or_else(default_download_root);
        let audio_format = args.audio_format.parse()?;

        let downloader = DownloaderConfig::new(session_directory(&root, started_at))
            .with_max_search_rank(args.max_search_rank)
            .with_audio_format(audio_format)
            .with_verify_output(!args.no_verify)
            .with_quiet(!args.verbose);

        Ok(Self {
            url: args.url,
            resolver: ResolverConfig::default(),
            downloader,
            verbose: args.verbose,
        })
    }
}

fn default_download_root() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("Downloads"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use clap::Parser;
    use std::path::Path;

    fn started_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap()
    }

    #[test]
    fn defaults_from_minimal_arguments() {
        let args = Args::try_parse_from([
            "spotidownload",
            "https://open.spotify.com/track/abc123",
            "--output-dir",
            "/tmp/dl",
        ])
        .unwrap();

        let config = AppConfig::from_args(args, started_at()).unwrap();

        assert_eq!(config.url, "https://open.spotify.com/track/abc123");
        assert_eq!(
            config.downloader.destination,
            Path::new("/tmp/dl/Music/SpotiDownload-2024-01-02_03-04-05")
        );
        assert_eq!(config.downloader.max_search_rank, 5);
        assert_eq!(config.downloader.audio_format.extension(), "m4a");
        assert!(config.downloader.verify_output);
        assert!(config.downloader.quiet);
        assert!(!config.verbose);
        assert_eq!(
            config.resolver.oembed_endpoint,
            ResolverConfig::DEFAULT_OEMBED_ENDPOINT
        );
    }

    #[test]
    fn overrides_from_flags() {
        let args = Args::try_parse_from([
            "spotidownload",
            "https://open.spotify.com/album/x",
            "-o",
            "/tmp/dl",
            "--max-search-rank",
            "3",
            "--audio-format",
            "opus",
            "--no-verify",
            "-v",
        ])
        .unwrap();

        let config = AppConfig::from_args(args, started_at()).unwrap();

        assert_eq!(config.downloader.max_search_rank, 3);
        assert_eq!(config.downloader.audio_format.extension(), "opus");
        assert!(!config.downloader.verify_output);
        assert!(!config.downloader.quiet);
        assert!(config.verbose);
    }

    #[test]
    fn zero_search_rank_is_rejected() {
        let result = Args::try_parse_from([
            "spotidownload",
            "https://open.spotify.com/album/x",
            "--max-search-rank",
            "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn invalid_audio_format_is_rejected() {
        let args = Args::try_parse_from([
            "spotidownload",
            "https://open.spotify.com/album/x",
            "--audio-format",
            "m4a]/best",
        ])
        .unwrap();

        assert!(AppConfig::from_args(args, started_at()).is_err());
    }
}
