// components/media_downloader/src/lib.rs
mod config;
mod types;
mod utils;
mod ytdlp;

use session_primitives::{EventLog, TrackTitle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

pub use config::DownloaderConfig;
pub use types::{
    AudioFormat, DownloadAttempt, DownloadError, DownloadResult, FetchRequest, SearchQuery,
    SessionReport,
};
pub use utils::{find_downloaded_file, output_base_name, output_template, session_directory};
pub use ytdlp::{Downloader, YtDlp};

/// Downloads one audio file per title, falling back through search ranks.
pub struct DownloadOrchestrator {
    config: DownloaderConfig,
    downloader: Arc<dyn Downloader + Send + Sync>,
    events: EventLog,
}

impl DownloadOrchestrator {
    /// Create an orchestrator backed by yt-dlp
    pub async fn new(config: DownloaderConfig, events: EventLog) -> Result<Self, DownloadError> {
        Self::new_with_downloader(config, Arc::new(YtDlp), events).await
    }

    /// Create an orchestrator with a specific downloader implementation
    pub async fn new_with_downloader(
        config: DownloaderConfig,
        downloader: Arc<dyn Downloader + Send + Sync>,
        events: EventLog,
    ) -> Result<Self, DownloadError> {
        downloader.check_available().await?;

        // Destination must exist before the first download starts
        tokio::fs::create_dir_all(&config.destination).await?;

        Ok(Self {
            config,
            downloader,
            events,
        })
    }

    pub fn destination(&self) -> &Path {
        &self.config.destination
    }

    /// Download every title in order, one at a time.
    ///
    /// A title that cannot be fetched is skipped and reported; it never stops
    /// the run.
    pub async fn run(&self, titles: &[TrackTitle]) -> SessionReport {
        let mut report = SessionReport::default();

        for title in titles {
            let result = self.download_title(title).await;
            report.push(title.clone(), result);
        }

        report
    }

    async fn download_title(&self, title: &TrackTitle) -> DownloadResult {
        let base_name = output_base_name(title, self.config.title_suffix_length);

        for rank in 1..=self.config.max_search_rank {
            let attempt = DownloadAttempt {
                title,
                rank,
                outcome: self.fetch_rank(title, rank, &base_name).await,
            };
            attempt.trace();

            if let Ok(path) = attempt.outcome {
                self.events.success(format!("Downloaded: {title}"));
                return DownloadResult::Succeeded(path);
            }
        }

        self.events.failure(format!("Skipped: {title} - no audio found"));
        DownloadResult::Skipped(format!(
            "no audio found in the top {} search results",
            self.config.max_search_rank
        ))
    }

    async fn fetch_rank(
        &self,
        title: &TrackTitle,
        rank: u32,
        base_name: &str,
    ) -> Result<PathBuf, DownloadError> {
        let destination = &self.config.destination;
        let request = FetchRequest {
            query: SearchQuery::new(rank, title.as_str()),
            output_template: output_template(destination, base_name),
            format: self.config.audio_format.clone(),
            quiet: self.config.quiet,
        };

        debug!(query = %request.query, "Searching");
        self.downloader.search_and_fetch(&request).await?;

        match find_downloaded_file(destination, base_name).await? {
            Some(path) => Ok(path),
            None if self.config.verify_output => {
                Err(DownloadError::OutputMissing(base_name.to_string()))
            }
            None => Ok(destination.join(format!(
                "{base_name}.{}",
                self.config.audio_format.extension()
            ))),
        }
    }
}
