use std::{
    fmt,
    path::{Path, PathBuf},
};

use tokio::fs;
use tracing::info;

use crate::{
    cache::{get_cache_dir, get_description_path, get_video_path, read_description},
    chapters::extract_text,
    config::PipelineConfig,
    error::Result,
    markers::{MalformedPolicy, build_markers},
    metadata::VideoMetadata,
    otio::save_timeline,
    source::{fetch_video, load_metadata},
    timeline::{Timeline, assemble},
};

/// Where a run reads its metadata and description from.
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Fetch with yt-dlp into the per-video cache directory.
    YouTube { video_id: String },
    /// Pre-fetched yt-dlp `.info.json` and description files.
    Local {
        info_json: PathBuf,
        description: PathBuf,
        media_url: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Build,
    Save,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetch => "fetch",
            Stage::Build => "build",
            Stage::Save => "save",
        };
        f.write_str(name)
    }
}

/// What a finished run produced, for the caller to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub marker_count: usize,
    pub destination: PathBuf,
}

#[derive(Debug, Clone)]
pub struct RunOutput {
    pub metadata: VideoMetadata,
    pub timeline: Timeline,
    pub summary: RunSummary,
}

/// Description text and metadata in, timeline out. No I/O.
pub fn build_timeline(
    meta: &VideoMetadata,
    description: &str,
    media_url: &str,
    policy: MalformedPolicy,
) -> Result<Timeline> {
    let rate = meta.frame_rate()?;
    let chapters = extract_text(description);
    let markers = build_markers(&chapters, rate, policy)?;
    info!(
        chapters = chapters.len(),
        markers = markers.len(),
        "markers built"
    );
    assemble(meta, media_url, markers)
}

/// Fetch, build and save in one go, calling `on_stage` as each stage starts.
///
/// Nothing is written to `output` unless every stage before the save succeeds.
pub async fn run<F>(
    source: &InputSource,
    output: &Path,
    config: &PipelineConfig,
    mut on_stage: F,
) -> Result<RunOutput>
where
    F: FnMut(Stage),
{
    on_stage(Stage::Fetch);
    let (metadata, description, media_url) = match source {
        InputSource::YouTube { video_id } => {
            let cache_dir = get_cache_dir(&config.cache_root, video_id);
            fs::create_dir_all(&cache_dir).await?;

            let metadata = fetch_video(video_id, &cache_dir, config).await?;
            let description_path = get_description_path(&cache_dir, video_id);
            let description = read_description(&description_path).await?;
            let media_path = get_video_path(&cache_dir, video_id);
            let media_url = media_path.to_string_lossy().into_owned();
            (metadata, description, media_url)
        }
        InputSource::Local {
            info_json,
            description,
            media_url,
        } => (
            load_metadata(info_json).await?,
            read_description(description).await?,
            media_url.clone(),
        ),
    };

    on_stage(Stage::Build);
    let timeline = build_timeline(
        &metadata,
        &description,
        &media_url,
        config.malformed_policy,
    )?;

    on_stage(Stage::Save);
    save_timeline(&timeline, output).await?;

    let summary = RunSummary {
        marker_count: timeline.marker_count(),
        destination: output.to_path_buf(),
    };
    Ok(RunOutput {
        metadata,
        timeline,
        summary,
    })
}
