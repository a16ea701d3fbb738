use anyhow::Result;
use clap::{Parser, Subcommand};
use leap_markers::frame::TimedFrame;
use leap_markers::io::write_json_lines;
use leap_markers::source::{FrameSource, SyntheticSource};
use std::path::Path;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a synthetic frame recording
    Generate {
        /// Output JSON-lines file
        #[arg(short, long)]
        output: String,

        /// Number of frames to generate
        #[arg(short, long, default_value = "500")]
        num_frames: usize,

        /// Controller delivery rate
        #[arg(long, default_value = "100.0")]
        rate_hz: f64,

        /// Random seed for joint jitter
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Joint jitter amplitude in mm
        #[arg(long, default_value = "0.5")]
        jitter_mm: f32,

        /// Also track a left hand
        #[arg(long)]
        with_left: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Commands::Generate {
            output,
            num_frames,
            rate_hz,
            seed,
            jitter_mm,
            with_left,
        } => {
            let source = SyntheticSource::new(seed, rate_hz, num_frames)?
                .with_jitter_mm(jitter_mm)
                .with_left_hand(with_left);
            generate_recording(Path::new(&output), source)?;
        }
    }

    Ok(())
}

fn generate_recording(output: &Path, mut source: SyntheticSource) -> Result<()> {
    let mut frames: Vec<TimedFrame> = Vec::new();
    while let Some(frame) = source.next_frame() {
        frames.push(frame?);
    }
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    write_json_lines(output, &frames)?;
    log::info!("Generated {} frames in {}", frames.len(), output.display());
    Ok(())
}
