use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use chapterline_core::{
    InputSource, MalformedPolicy, PipelineConfig, RunOutput, Stage, default_output_path,
    format_markers, format_summary, get_cache_dir, get_video_path, run,
};

mod logging;

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", (secs / 60.0).floor(), secs % 60.0)
    }
}

#[derive(Parser)]
#[command(name = "chapterline")]
#[command(about = "Turn the chapter list of a YouTube description into OpenTimelineIO markers")]
struct Cli {
    /// The ID of the YouTube video, e.g. es6LBWB_I4E for
    /// https://www.youtube.com/watch?v=es6LBWB_I4E
    video_id: String,

    /// Where to write the .otio file. Defaults to <video_id>.otio
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not download the video itself, only its metadata and description
    #[arg(long)]
    skip_video_download: bool,

    /// Fail on the first malformed chapter timestamp instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Use a local description file instead of fetching (requires --info-json)
    #[arg(long, requires = "info_json")]
    description: Option<PathBuf>,

    /// Use a local yt-dlp .info.json file instead of fetching (requires --description)
    #[arg(long, requires = "description")]
    info_json: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn stage_message(stage: Stage, config: &PipelineConfig, local: bool) -> &'static str {
    match stage {
        Stage::Fetch if local => "Loading metadata and description...",
        Stage::Fetch if config.skip_video_download => "Fetching metadata and description...",
        Stage::Fetch => "Downloading video and description...",
        Stage::Build => "Building timeline...",
        Stage::Save => "Writing timeline...",
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let config = PipelineConfig {
        malformed_policy: if cli.strict {
            MalformedPolicy::Abort
        } else {
            MalformedPolicy::Skip
        },
        skip_video_download: cli.skip_video_download,
        ..PipelineConfig::default()
    };

    tracing::debug!(?config, "configuration");

    let video_id = cli.video_id;
    if video_id.trim().is_empty() {
        bail!("video id must not be empty");
    }
    let output = cli.output.unwrap_or_else(|| default_output_path(&video_id));

    let source = match (cli.info_json, cli.description) {
        (Some(info_json), Some(description)) => {
            let cache_dir = get_cache_dir(&config.cache_root, &video_id);
            let media_path = get_video_path(&cache_dir, &video_id);
            InputSource::Local {
                info_json,
                description,
                media_url: media_path.to_string_lossy().into_owned(),
            }
        }
        _ => InputSource::YouTube {
            video_id: video_id.clone(),
        },
    };
    let local = matches!(source, InputSource::Local { .. });

    println!(
        "\n{}  {}\n",
        style("chapterline").cyan().bold(),
        style("Chapter Markers").dim()
    );

    let started = Instant::now();
    let spinner = create_spinner(stage_message(Stage::Fetch, &config, local));
    let mut current = Stage::Fetch;

    let result = run(&source, &output, &config, |stage| {
        current = stage;
        spinner.set_message(stage_message(stage, &config, local));
    })
    .await;
    spinner.finish_and_clear();

    let result = result.with_context(|| match current {
        Stage::Fetch => format!("Fetching video {}", video_id),
        Stage::Build => "Building timeline".to_string(),
        Stage::Save => format!("Writing {}", output.display()),
    })?;

    print_result(&result, started);
    Ok(())
}

fn print_result(result: &RunOutput, started: Instant) {
    let fps = style(result.metadata.fps.unwrap_or_default()).yellow();
    let built = format!("{} markers at {} fps", result.summary.marker_count, fps);
    println!(
        "{} {} {}",
        style("✓").green().bold(),
        built,
        style(format!("[{}]", format_duration(started.elapsed()))).dim()
    );
    println!("{}", style("─".repeat(60)).dim());
    println!("{}\n", style(&result.metadata.title).bold());
    let markers = format_markers(&result.timeline);
    if markers.is_empty() {
        println!("{}", style("No chapters found in the description.").yellow());
    } else {
        println!("{}", markers);
    }
    println!("{}", style("─".repeat(60)).dim());
    println!("{}", style(format_summary(&result.summary)).cyan());
}
