//! Minimal editorial model: timeline → track → clip → markers.
//!
//! The tree is built in one pass by [`assemble`] and never mutated after.

use serde_json::{Map, Value, json};
use tracing::info;

use crate::{
    error::Result,
    markers::Marker,
    metadata::VideoMetadata,
    opentime::{FrameTime, TimeRange},
};

pub const TIMELINE_NAME: &str = "Youtube Demo";
pub const TRACK_NAME: &str = "Videos";
const METADATA_NAMESPACE: &str = "YouTube";

#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub name: String,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub name: String,
    pub clips: Vec<Clip>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub name: String,
    pub media_reference: ExternalReference,
    pub metadata: Map<String, Value>,
    pub markers: Vec<Marker>,
}

/// Points at media stored outside the timeline file.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalReference {
    pub target_url: String,
    pub available_range: TimeRange,
    pub metadata: Map<String, Value>,
}

impl Timeline {
    /// The single clip of a timeline produced by [`assemble`].
    pub fn clip(&self) -> Option<&Clip> {
        self.tracks.first().and_then(|t| t.clips.first())
    }

    pub fn marker_count(&self) -> usize {
        self.tracks
            .iter()
            .flat_map(|t| &t.clips)
            .map(|c| c.markers.len())
            .sum()
    }
}

fn namespaced(fields: Value) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(METADATA_NAMESPACE.to_string(), fields);
    map
}

/// Build the one-track, one-clip timeline for a video and attach `markers`.
///
/// `media_url` locates the video file; it may point at a file that was never
/// downloaded.
pub fn assemble(meta: &VideoMetadata, media_url: &str, markers: Vec<Marker>) -> Result<Timeline> {
    let rate = meta.frame_rate()?;
    let length = FrameTime::from_duration(meta.duration()?, rate);

    let media_reference = ExternalReference {
        target_url: media_url.to_string(),
        available_range: TimeRange::from_start(length),
        metadata: namespaced(json!({ "original_url": meta.webpage_url })),
    };

    let clip = Clip {
        name: meta.title.clone(),
        media_reference,
        metadata: namespaced(json!({
            "upload_date": meta.upload_date,
            "view_count": meta.view_count,
            "categories": meta.categories,
        })),
        markers,
    };

    info!(
        clip = %clip.name,
        markers = clip.markers.len(),
        frames = length.frames,
        rate = %rate,
        "timeline assembled"
    );

    Ok(Timeline {
        name: TIMELINE_NAME.to_string(),
        tracks: vec![Track {
            name: TRACK_NAME.to_string(),
            clips: vec![clip],
        }],
    })
}
