use chrono::NaiveDateTime;
use session_primitives::TrackTitle;
use std::path::{Path, PathBuf};

/// Used when sanitizing leaves nothing of the title
const FALLBACK_BASE_NAME: &str = "track";

/// File name (without extension) for a title: the title minus its search
/// suffix, made safe for all filesystems.
pub fn output_base_name(title: &TrackTitle, suffix_length: usize) -> String {
    let name = sanitize_filename::sanitize(title.base_name(suffix_length).trim());
    if name.is_empty() {
        FALLBACK_BASE_NAME.to_string()
    } else {
        name
    }
}

/// yt-dlp output template; `%` in the name is escaped so only `%(ext)s` expands.
pub fn output_template(destination: &Path, base_name: &str) -> PathBuf {
    destination.join(format!("{}.%(ext)s", base_name.replace('%', "%%")))
}

/// `<root>/Music/SpotiDownload-<YYYY-MM-DD_HH-MM-SS>`
pub fn session_directory(root: &Path, started_at: NaiveDateTime) -> PathBuf {
    root.join("Music").join(format!(
        "SpotiDownload-{}",
        started_at.format("%Y-%m-%d_%H-%M-%S")
    ))
}

/// Look for a finished file in `directory` whose stem is exactly `base_name`.
pub async fn find_downloaded_file(
    directory: &Path,
    base_name: &str,
) -> Result<Option<PathBuf>, std::io::Error> {
    let mut entries = tokio::fs::read_dir(directory).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let stem_matches = path
            .file_stem()
            .is_some_and(|stem| stem.to_string_lossy() == base_name);

        if stem_matches && path.extension().is_some() && entry.file_type().await?.is_file() {
            return Ok(Some(path));
        }
    }

    Ok(None)
}
