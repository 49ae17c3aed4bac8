//! OpenTimelineIO JSON output.

use std::{io::Write, path::Path};

use serde_json::{Map, Value, json};
use tempfile::NamedTempFile;
use tokio::task;

use crate::{
    error::{ChapterlineError, Result},
    markers::Marker,
    opentime::{FrameTime, TimeRange},
    timeline::{Clip, ExternalReference, Timeline, Track},
};

/// Sink for a finished timeline.
pub trait TimelineWriter {
    fn write(&mut self, timeline: &Timeline) -> Result<()>;
}

/// Writes `.otio` JSON to any byte sink.
pub struct OtioJsonWriter<W: Write> {
    inner: W,
}

impl<W: Write> OtioJsonWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> TimelineWriter for OtioJsonWriter<W> {
    fn write(&mut self, timeline: &Timeline) -> Result<()> {
        let value = timeline_to_otio(timeline);
        serde_json::to_writer_pretty(&mut self.inner, &value).map_err(|e| {
            ChapterlineError::Serialization {
                reason: e.to_string(),
            }
        })?;
        self.inner.write_all(b"\n")?;
        self.inner.flush()?;
        Ok(())
    }
}

/// Save a timeline as an `.otio` file
///
/// The JSON goes to a sibling temp file that is renamed over `path`, so an
/// existing file is either left alone or replaced whole.
pub async fn save_timeline(timeline: &Timeline, path: &Path) -> Result<()> {
    let mut writer = OtioJsonWriter::new(Vec::new());
    writer.write(timeline)?;
    let bytes = writer.into_inner();

    let path = path.to_path_buf();
    task::spawn_blocking(move || replace_file(&bytes, &path))
        .await
        .map_err(std::io::Error::other)?
}

fn replace_file(bytes: &[u8], path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

pub fn timeline_to_otio(timeline: &Timeline) -> Value {
    json!({
        "OTIO_SCHEMA": "Timeline.1",
        "metadata": {},
        "name": timeline.name,
        "global_start_time": null,
        "tracks": {
            "OTIO_SCHEMA": "Stack.1",
            "metadata": {},
            "name": "tracks",
            "source_range": null,
            "effects": [],
            "markers": [],
            "enabled": true,
            "children": timeline.tracks.iter().map(track_to_otio).collect::<Vec<_>>(),
        },
    })
}

fn track_to_otio(track: &Track) -> Value {
    json!({
        "OTIO_SCHEMA": "Track.1",
        "metadata": {},
        "name": track.name,
        "source_range": null,
        "effects": [],
        "markers": [],
        "enabled": true,
        "children": track.clips.iter().map(clip_to_otio).collect::<Vec<_>>(),
        "kind": "Video",
    })
}

fn clip_to_otio(clip: &Clip) -> Value {
    json!({
        "OTIO_SCHEMA": "Clip.1",
        "metadata": Value::Object(clip.metadata.clone()),
        "name": clip.name,
        "source_range": null,
        "effects": [],
        "markers": clip.markers.iter().map(marker_to_otio).collect::<Vec<_>>(),
        "enabled": true,
        "media_reference": reference_to_otio(&clip.media_reference),
    })
}

fn reference_to_otio(reference: &ExternalReference) -> Value {
    json!({
        "OTIO_SCHEMA": "ExternalReference.1",
        "metadata": Value::Object(reference.metadata.clone()),
        "name": "",
        "available_range": range_to_otio(&reference.available_range),
        "target_url": reference.target_url,
    })
}

fn marker_to_otio(marker: &Marker) -> Value {
    json!({
        "OTIO_SCHEMA": "Marker.2",
        "metadata": Map::new(),
        "name": marker.name,
        "color": marker.color,
        "marked_range": range_to_otio(&marker.range),
        "comment": "",
    })
}

fn range_to_otio(range: &TimeRange) -> Value {
    json!({
        "OTIO_SCHEMA": "TimeRange.1",
        "duration": time_to_otio(&range.duration),
        "start_time": time_to_otio(&range.start),
    })
}

fn time_to_otio(time: &FrameTime) -> Value {
    json!({
        "OTIO_SCHEMA": "RationalTime.1",
        "rate": time.rate.as_f64(),
        "value": time.frames as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        markers::MarkerColor,
        opentime::FrameRate,
        timeline::{TIMELINE_NAME, TRACK_NAME},
    };

    fn timeline() -> Timeline {
        let rate = FrameRate::new(24, 1).unwrap();
        Timeline {
            name: TIMELINE_NAME.into(),
            tracks: vec![Track {
                name: TRACK_NAME.into(),
                clips: vec![Clip {
                    name: "Clip".into(),
                    media_reference: ExternalReference {
                        target_url: "tmp/x.mp4".into(),
                        available_range: TimeRange::from_start(FrameTime { frames: 240, rate }),
                        metadata: Map::new(),
                    },
                    metadata: Map::new(),
                    markers: vec![Marker {
                        name: "Intro".into(),
                        range: TimeRange::instant(FrameTime { frames: 120, rate }),
                        color: MarkerColor::Red,
                    }],
                }],
            }],
        }
    }

    #[test]
    fn writes_otio_schema_tree() {
        let mut writer = OtioJsonWriter::new(Vec::new());
        writer.write(&timeline()).unwrap();
        let value: Value = serde_json::from_slice(&writer.into_inner()).unwrap();

        assert_eq!(value["OTIO_SCHEMA"], "Timeline.1");
        let track = &value["tracks"]["children"][0];
        assert_eq!(track["OTIO_SCHEMA"], "Track.1");
        assert_eq!(track["name"], "Videos");

        let clip = &track["children"][0];
        assert_eq!(clip["media_reference"]["target_url"], "tmp/x.mp4");
        assert_eq!(clip["media_reference"]["available_range"]["duration"]["value"], 240.0);

        let marker = &clip["markers"][0];
        assert_eq!(marker["OTIO_SCHEMA"], "Marker.2");
        assert_eq!(marker["color"], "RED");
        assert_eq!(marker["marked_range"]["start_time"]["value"], 120.0);
        assert_eq!(marker["marked_range"]["start_time"]["rate"], 24.0);
        assert_eq!(marker["marked_range"]["duration"]["value"], 0.0);
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn save_replaces_existing_file_whole() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("abc.otio");
        std::fs::write(&path, "stale contents that are longer than nothing").unwrap();

        save_timeline(&timeline(), &path).await.unwrap();

        let value: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(value["name"], TIMELINE_NAME);
        assert_eq!(dir_entries(temp.path()), ["abc.otio"]);
    }

    #[tokio::test]
    async fn failed_save_leaves_no_partial_file() {
        let temp = tempfile::tempdir().unwrap();
        let taken = temp.path().join("abc.otio");
        std::fs::create_dir(&taken).unwrap();
        std::fs::write(taken.join("keep"), "x").unwrap();

        assert!(save_timeline(&timeline(), &taken).await.is_err());
        assert_eq!(dir_entries(temp.path()), ["abc.otio"]);
        assert_eq!(dir_entries(&taken), ["keep"]);

        let missing = temp.path().join("no-such-dir").join("abc.otio");
        assert!(save_timeline(&timeline(), &missing).await.is_err());
        assert!(!missing.exists());
    }

    #[test]
    fn ntsc_rate_is_written_as_float() {
        let rate = FrameRate::new(30000, 1001).unwrap();
        let value = time_to_otio(&FrameTime { frames: 30, rate });
        let written = value["rate"].as_f64().unwrap();
        assert!((written - 29.97).abs() < 0.001);
    }
}
