use clap::Parser;
use std::path::PathBuf;

/// Download the audio of a Spotify track, album or playlist
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Spotify track, album or playlist URL
    pub url: String,

    /// Root directory; files land in <OUTPUT_DIR>/Music/SpotiDownload-<timestamp>
    /// (defaults to your Downloads folder)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Search results to try per track before skipping it
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_search_rank: u32,

    /// Preferred audio container
    #[arg(long, default_value = "m4a")]
    pub audio_format: String,

    /// Trust the downloader's exit status without checking the file exists
    #[arg(long)]
    pub no_verify: bool,

    /// Enable verbose output, including yt-dlp's own progress
    #[arg(short, long)]
    pub verbose: bool,
}
