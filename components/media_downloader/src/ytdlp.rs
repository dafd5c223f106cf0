use crate::types::{DownloadError, FetchRequest};
use async_trait::async_trait;
use std::ffi::OsString;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Search a video index and fetch the best audio stream of one result.
#[async_trait]
pub trait Downloader {
    /// Check if the downloader is available and has all required dependencies
    async fn check_available(&self) -> Result<(), DownloadError>;

    /// Search for `request.query`, take the result at its rank and write its
    /// audio to `request.output_template`
    async fn search_and_fetch(&self, request: &FetchRequest) -> Result<(), DownloadError>;
}

pub struct YtDlp;

impl YtDlp {
    const BINARY: &'static str = "yt-dlp";

    fn arguments(request: &FetchRequest) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--format".into(),
            request.format.selector().into(),
            "--output".into(),
            request.output_template.clone().into_os_string(),
            // ytsearchN yields N results; only keep the one at this rank
            "--playlist-items".into(),
            request.query.rank.to_string().into(),
            "--no-playlist".into(),
        ];

        if request.quiet {
            args.push("--quiet".into());
            args.push("--no-warnings".into());
            args.push("--no-progress".into());
        }

        args.push(request.query.to_string().into());
        args
    }
}

#[async_trait]
impl Downloader for YtDlp {
    async fn check_available(&self) -> Result<(), DownloadError> {
        which::which(Self::BINARY)
            .map(|_| ())
            .map_err(|_| DownloadError::DependencyNotFound(Self::BINARY))
    }

    async fn search_and_fetch(&self, request: &FetchRequest) -> Result<(), DownloadError> {
        debug!(query = %request.query, template = %request.output_template.display(), "Running yt-dlp");

        // stderr is always captured for the failure reason
        let stdout = if request.quiet {
            Stdio::null()
        } else {
            Stdio::inherit()
        };
        let output = Command::new(Self::BINARY)
            .args(Self::arguments(request))
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match stderr.trim() {
                "" => format!("yt-dlp exited with status: {}", output.status),
                message => message.to_string(),
            };
            return Err(DownloadError::DownloadFailed(reason));
        }

        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AudioFormat, SearchQuery};
    use std::path::PathBuf;

    fn request(quiet: bool) -> FetchRequest {
        FetchRequest {
            query: SearchQuery::new(2, "Song Name lyric video"),
            output_template: PathBuf::from("/music/Song Name.%(ext)s"),
            format: AudioFormat::default(),
            quiet,
        }
    }

    #[test]
    fn test_quiet_arguments() {
        let args = YtDlp::arguments(&request(true));
        let expected: Vec<OsString> = [
            "--format",
            "bestaudio[ext=m4a]",
            "--output",
            "/music/Song Name.%(ext)s",
            "--playlist-items",
            "2",
            "--no-playlist",
            "--quiet",
            "--no-warnings",
            "--no-progress",
            "ytsearch2:Song Name lyric video",
        ]
        .into_iter()
        .map(OsString::from)
        .collect();

        assert_eq!(args, expected);
    }

    #[test]
    fn test_verbose_arguments_keep_output() {
        let args = YtDlp::arguments(&request(false));
        assert!(!args.contains(&OsString::from("--quiet")));
        assert!(!args.contains(&OsString::from("--no-progress")));
        assert!(args.contains(&OsString::from("--no-playlist")));
        assert_eq!(
            args.last(),
            Some(&OsString::from("ytsearch2:Song Name lyric video"))
        );
    }
}
