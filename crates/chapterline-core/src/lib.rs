//! Chapterline Core Library
//!
//! Extracts the chapter list from a YouTube description and turns it into a
//! frame-accurate marker timeline, written as OpenTimelineIO JSON.

pub mod cache;
pub mod chapters;
pub mod config;
pub mod error;
pub mod format;
pub mod markers;
pub mod metadata;
pub mod opentime;
pub mod otio;
pub mod pipeline;
pub mod source;
pub mod timeline;
pub mod timestamp;

// Re-export commonly used items at crate root
pub use cache::{
    default_output_path, get_cache_dir, get_description_path, get_info_path, get_root_cache_dir,
    get_video_path, read_description,
};
pub use chapters::{ChapterEntry, extract, extract_text, parse_line};
pub use config::{PipelineConfig, YTDLP_ENV_VAR};
pub use error::{ChapterlineError, Result};
pub use format::{format_markers, format_summary, format_timestamp};
pub use markers::{MalformedPolicy, Marker, MarkerColor, build_markers};
pub use metadata::VideoMetadata;
pub use opentime::{FrameRate, FrameTime, TimeRange};
pub use otio::{OtioJsonWriter, TimelineWriter, save_timeline, timeline_to_otio};
pub use pipeline::{InputSource, RunOutput, RunSummary, Stage, build_timeline, run};
pub use source::{fetch_video, load_metadata, watch_url};
pub use timeline::{Clip, ExternalReference, Timeline, Track, assemble};
pub use timestamp::normalize;
