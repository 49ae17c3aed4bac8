use std::time::Duration;

use serde::Deserialize;

use crate::{
    error::{ChapterlineError, Result},
    opentime::FrameRate,
};

/// The subset of a yt-dlp info dict the timeline needs.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VideoMetadata {
    #[serde(default)]
    pub id: String,
    pub title: String,
    /// Length in seconds.
    pub duration: f64,
    /// Frames per second; absent for audio-only formats.
    pub fps: Option<f64>,
    pub webpage_url: String,
    /// `YYYYMMDD`
    pub upload_date: Option<String>,
    pub view_count: Option<u64>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl VideoMetadata {
    pub fn from_info_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn frame_rate(&self) -> Result<FrameRate> {
        let fps = self.fps.ok_or_else(|| ChapterlineError::InvalidVideoMetadata {
            reason: format!("no frame rate reported for {:?}", self.title),
        })?;
        FrameRate::from_fps(fps)
    }

    pub fn duration(&self) -> Result<Duration> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(ChapterlineError::InvalidVideoMetadata {
                reason: format!("duration {} is not a non-negative length", self.duration),
            });
        }
        Duration::try_from_secs_f64(self.duration).map_err(|e| {
            ChapterlineError::InvalidVideoMetadata {
                reason: format!("duration {}: {}", self.duration, e),
            }
        })
    }
}
