use std::path::Path;

use tokio::{fs, process::Command};
use tracing::{debug, info};

use crate::{
    cache::{get_info_path, get_video_path},
    config::PipelineConfig,
    error::{ChapterlineError, Result},
    metadata::VideoMetadata,
};

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// Fetch metadata and description with yt-dlp, downloading the video too
/// unless `config.skip_video_download` is set.
///
/// Files land in `cache_dir` as `<id>.mp4`, `<id>.description` and
/// `<id>.info.json`.
pub async fn fetch_video(
    video_id: &str,
    cache_dir: &Path,
    config: &PipelineConfig,
) -> Result<VideoMetadata> {
    let url = watch_url(video_id);
    let output_template = get_video_path(cache_dir, "%(id)s");

    let mut command = Command::new(&config.ytdlp);
    command
        .arg(&url)
        .arg("--no-playlist")
        .arg("--quiet")
        .arg("--no-warnings")
        .arg("--write-description")
        .arg("--write-info-json")
        .arg("-o")
        .arg(&output_template);
    if config.skip_video_download {
        command.arg("--skip-download");
    }

    debug!(program = %config.ytdlp, %url, "running yt-dlp");
    let output = command.output().await?;

    if !output.status.success() {
        return Err(ChapterlineError::DownloadFailed {
            url,
            reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let metadata = load_metadata(&get_info_path(cache_dir, video_id)).await?;
    info!(title = %metadata.title, duration = metadata.duration, "metadata fetched");
    Ok(metadata)
}

/// Load a yt-dlp `.info.json` file
pub async fn load_metadata(path: &Path) -> Result<VideoMetadata> {
    let json_content = fs::read_to_string(path).await?;
    VideoMetadata::from_info_json(&json_content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_watch_url() {
        assert_eq!(
            watch_url("es6LBWB_I4E"),
            "https://www.youtube.com/watch?v=es6LBWB_I4E"
        );
    }

    #[tokio::test]
    async fn missing_program_is_an_io_error() {
        let temp = tempfile::tempdir().unwrap();
        let config = PipelineConfig {
            ytdlp: "chapterline-no-such-ytdlp".to_string(),
            cache_root: temp.path().to_path_buf(),
            ..PipelineConfig::default()
        };
        let err = fetch_video("abc", temp.path(), &config).await.unwrap_err();
        assert!(matches!(err, ChapterlineError::IoError(_)));
    }

    #[tokio::test]
    async fn loads_info_json_from_disk() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("abc.info.json");
        fs::write(
            &path,
            r#"{"id":"abc","title":"T","duration":60,"fps":25,"webpage_url":"u"}"#,
        )
        .await
        .unwrap();

        let meta = load_metadata(&path).await.unwrap();
        assert_eq!(meta.title, "T");
        assert_eq!(meta.fps, Some(25.0));
    }
}
