use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::{ChapterlineError, Result};

pub fn get_root_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("chapterline")
}

/// Get the cache directory for a given video id
pub fn get_cache_dir(root: &Path, video_id: &str) -> PathBuf {
    root.join(video_id)
}

/// yt-dlp writes the video here; the timeline references this path even when
/// the download was skipped.
pub fn get_video_path(cache_dir: &Path, video_id: &str) -> PathBuf {
    cache_dir.join(format!("{}.mp4", video_id))
}

pub fn get_description_path(cache_dir: &Path, video_id: &str) -> PathBuf {
    cache_dir.join(format!("{}.description", video_id))
}

pub fn get_info_path(cache_dir: &Path, video_id: &str) -> PathBuf {
    cache_dir.join(format!("{}.info.json", video_id))
}

/// Default `.otio` destination, relative to the working directory
pub fn default_output_path(video_id: &str) -> PathBuf {
    PathBuf::from(format!("{}.otio", video_id))
}

/// Read a description file written alongside the video
pub async fn read_description(path: &Path) -> Result<String> {
    match fs::read_to_string(path).await {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ChapterlineError::MissingDescription {
                path: path.to_path_buf(),
            })
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_keyed_by_video_id() {
        let dir = get_cache_dir(Path::new("/cache"), "abc");
        assert_eq!(dir, PathBuf::from("/cache/abc"));
        assert_eq!(get_video_path(&dir, "abc"), PathBuf::from("/cache/abc/abc.mp4"));
        assert_eq!(
            get_description_path(&dir, "abc"),
            PathBuf::from("/cache/abc/abc.description")
        );
        assert_eq!(get_info_path(&dir, "abc"), PathBuf::from("/cache/abc/abc.info.json"));
        assert_eq!(default_output_path("abc"), PathBuf::from("abc.otio"));
    }

    #[tokio::test]
    async fn missing_description_is_reported_with_path() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nope.description");
        let err = read_description(&path).await.unwrap_err();
        assert!(matches!(err, ChapterlineError::MissingDescription { path: p } if p == path));
    }
}
