use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::ProgressBar;
use leap_markers::io::object_from_json;
use leap_markers::rate_gate::system_time_ns;
use leap_markers::sink::{JsonLinesSink, MarkerSink, SinkKind};
use leap_markers::source::{FrameSource, ReplaySource, SyntheticSource};
use leap_markers::visualization::RerunSink;
use leap_markers::{LeapListener, MarkerConfig};

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON-lines frame recording
    Replay {
        /// path to recording
        path: PathBuf,
    },
    /// Generate an animated hand
    Synthetic {
        #[arg(long, default_value = "300")]
        frames: usize,

        #[arg(long, default_value = "0")]
        seed: u64,

        /// controller delivery rate
        #[arg(long, default_value = "100.0")]
        rate_hz: f64,

        /// add a left hand, which is never drawn
        #[arg(long)]
        with_left: bool,
    },
}

#[derive(Parser)]
#[command(version, about, author)]
struct LeapMarkersCli {
    #[command(subcommand)]
    command: Commands,

    /// marker config json, defaults are used for missing fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "rerun")]
    sink: SinkKind,

    /// output file for rrd and jsonl sinks [default: leap_markers.rrd or leap_markers.jsonl]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// sleep between frames to follow their timestamps
    #[arg(long)]
    realtime: bool,
}

fn build_sink(kind: SinkKind, output: &Path) -> Result<Box<dyn MarkerSink>> {
    Ok(match kind {
        SinkKind::Rerun => Box::new(RerunSink::new(
            rerun::RecordingStreamBuilder::new("leap_markers").spawn()?,
        )),
        SinkKind::Rrd => Box::new(RerunSink::new(
            rerun::RecordingStreamBuilder::new("leap_markers").save(output)?,
        )),
        SinkKind::Jsonl => Box::new(JsonLinesSink::new(BufWriter::new(File::create(output)?))),
    })
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = LeapMarkersCli::parse();

    let config: MarkerConfig = match &cli.config {
        Some(path) => object_from_json(path)?,
        None => MarkerConfig::default(),
    };
    config.validate()?;
    log::info!(
        "publishing to {} in frame {} at most {} Hz",
        config.topic,
        config.frame_id,
        config.max_rate_hz
    );

    let mut source: Box<dyn FrameSource> = match cli.command {
        Commands::Replay { path } => Box::new(ReplaySource::open(&path)?),
        Commands::Synthetic {
            frames,
            seed,
            rate_hz,
            with_left,
        } => Box::new(
            SyntheticSource::new(seed, rate_hz, frames)?
                .with_start_ns(system_time_ns())
                .with_left_hand(with_left),
        ),
    };

    let Some(first) = source.next_frame() else {
        log::warn!("source delivered no frames");
        return Ok(());
    };
    let first = first?;
    let output = cli.output.unwrap_or_else(|| cli.sink.default_output());
    let sink = build_sink(cli.sink, &output)?;
    // the gate window opens with the first delivered frame
    let mut listener = LeapListener::new(config, sink, first.time_ns);
    let pb = ProgressBar::new(source.remaining().map_or(0, |n| n + 1) as u64);
    let mut pending = Some(first);
    let mut prev_ns: Option<i64> = None;

    loop {
        let timed = match pending.take() {
            Some(timed) => timed,
            None => match source.next_frame() {
                Some(timed) => timed?,
                None => break,
            },
        };
        if cli.realtime {
            if let Some(prev) = prev_ns {
                let dt = (timed.time_ns - prev).max(0) as u64;
                std::thread::sleep(Duration::from_nanos(dt));
            }
            prev_ns = Some(timed.time_ns);
        }
        if let Err(e) = listener.on_frame(&timed.frame, timed.time_ns) {
            log::warn!("{:#}", e);
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    let stats = listener.stats();
    log::info!(
        "frames: {}, throttled: {}, empty: {}, published: {}, failed: {}",
        stats.frames,
        stats.throttled,
        stats.empty,
        stats.published,
        stats.publish_failures
    );
    Ok(())
}
