use crate::{opentime::FrameTime, pipeline::RunSummary, timeline::Timeline};

/// Format a frame time as H:MM:SS, dropping the hour when it is zero
pub fn format_timestamp(time: &FrameTime) -> String {
    // Frames are floored on the way in, so round back up to the authored second.
    let num = time.rate.num() as u128;
    let den = time.rate.den() as u128;
    let total = u64::try_from((time.frames as u128 * den).div_ceil(num)).unwrap_or(u64::MAX);

    let (hours, mins, secs) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}", mins, secs)
    }
}

/// One line per marker: timestamp, start frame, name
pub fn format_markers(timeline: &Timeline) -> String {
    timeline
        .tracks
        .iter()
        .flat_map(|t| &t.clips)
        .flat_map(|c| &c.markers)
        .map(|m| {
            format!(
                "[{}] {:>7}  {}",
                format_timestamp(&m.range.start),
                m.range.start.frames,
                m.name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_summary(summary: &RunSummary) -> String {
    format!(
        "SAVED: {} with {} markers.",
        summary.destination.display(),
        summary.marker_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        chapters::extract_text,
        markers::{MalformedPolicy, build_markers},
        opentime::FrameRate,
    };
    use std::path::PathBuf;

    fn shown(text: &str, fps: f64) -> Vec<String> {
        let rate = FrameRate::from_fps(fps).unwrap();
        build_markers(&extract_text(text), rate, MalformedPolicy::Skip)
            .unwrap()
            .iter()
            .map(|m| format_timestamp(&m.range.start))
            .collect()
    }

    #[test]
    fn timestamps_drop_zero_hours() {
        let rate = FrameRate::new(24, 1).unwrap();
        assert_eq!(format_timestamp(&FrameTime { frames: 2160, rate }), "01:30");
        assert_eq!(
            format_timestamp(&FrameTime {
                frames: 5661 * 24,
                rate,
            }),
            "1:34:21"
        );
    }

    #[test]
    fn ntsc_markers_show_the_authored_second() {
        let text = "0:05 Intro\n1:00 Main\n1:34:21 End\n";
        assert_eq!(shown(text, 29.97), ["00:05", "01:00", "1:34:21"]);
        assert_eq!(shown(text, 23.976), ["00:05", "01:00", "1:34:21"]);
        assert_eq!(shown(text, 59.94), ["00:05", "01:00", "1:34:21"]);
    }

    #[test]
    fn summary_names_destination_and_count() {
        let summary = RunSummary {
            marker_count: 3,
            destination: PathBuf::from("abc.otio"),
        };
        assert_eq!(format_summary(&summary), "SAVED: abc.otio with 3 markers.");
    }
}
