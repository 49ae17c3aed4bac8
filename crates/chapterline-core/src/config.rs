use std::path::PathBuf;

use crate::{cache::get_root_cache_dir, markers::MalformedPolicy};

/// Environment variable overriding the yt-dlp executable.
pub const YTDLP_ENV_VAR: &str = "CHAPTERLINE_YTDLP";
const DEFAULT_YTDLP: &str = "yt-dlp";

/// Settings for one end-to-end run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub malformed_policy: MalformedPolicy,
    /// Fetch only metadata and description, not the video itself
    pub skip_video_download: bool,
    pub ytdlp: String,
    pub cache_root: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            malformed_policy: MalformedPolicy::default(),
            skip_video_download: false,
            ytdlp: ytdlp_program(),
            cache_root: get_root_cache_dir(),
        }
    }
}

/// yt-dlp executable, honoring [`YTDLP_ENV_VAR`].
pub fn ytdlp_program() -> String {
    std::env::var(YTDLP_ENV_VAR)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_YTDLP.to_string())
}
