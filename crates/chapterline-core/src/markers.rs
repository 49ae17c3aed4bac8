use serde::Serialize;
use tracing::warn;

use crate::{
    chapters::ChapterEntry,
    error::Result,
    opentime::{FrameRate, FrameTime, TimeRange},
    timestamp::normalize,
};

/// Marker colors understood by OpenTimelineIO.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarkerColor {
    Pink,
    #[default]
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Purple,
    Magenta,
    Black,
    White,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub name: String,
    pub range: TimeRange,
    pub color: MarkerColor,
}

/// What to do with a chapter whose timestamp cannot be normalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Log a warning and keep the remaining chapters.
    #[default]
    Skip,
    /// Fail the whole batch on the first malformed timestamp.
    Abort,
}

/// Turn chapters into zero-length red markers at `rate`, in input order.
pub fn build_markers(
    entries: &[ChapterEntry],
    rate: FrameRate,
    policy: MalformedPolicy,
) -> Result<Vec<Marker>> {
    let mut markers = Vec::with_capacity(entries.len());

    for entry in entries {
        let offset = match normalize(&entry.timestamp) {
            Ok(offset) => offset,
            Err(e) if policy == MalformedPolicy::Skip => {
                warn!(title = %entry.title, "skipping chapter: {}", e);
                continue;
            }
            Err(e) => return Err(e),
        };

        let start = FrameTime::from_duration(offset, rate);
        markers.push(Marker {
            name: entry.title.clone(),
            range: TimeRange::instant(start),
            color: MarkerColor::Red,
        });
    }

    Ok(markers)
}
