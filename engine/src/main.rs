#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

use anyhow::Result;
use structopt::StructOpt;

use engine::{FrameLoop, RecordingSurface};
use feed::{GeometryLayer, TripSchedule};

/// Headless playback: loads a feed and its geometry layers, runs the frame loop at a
/// fixed cadence, and logs what would be rendered.
#[derive(StructOpt)]
struct Args {
    /// The path to a trip feed JSON document
    #[structopt(long)]
    feed: String,
    /// A geometry layer to load, as name=path.geojson. Repeatable.
    #[structopt(long)]
    layer: Vec<String>,
    /// Playback speed multiplier
    #[structopt(long, default_value = "1.0")]
    speed: f64,
    /// How many frames to run before exiting
    #[structopt(long, default_value = "300")]
    frames: usize,
    /// Frames per second
    #[structopt(long, default_value = "10")]
    fps: f64,
}

impl Args {
    fn load(&self) -> Result<(Vec<TripSchedule>, Vec<GeometryLayer>)> {
        let schedules = feed::trips::load(fs_err::File::open(&self.feed)?)?;

        let mut layers = Vec::new();
        for entry in &self.layer {
            let (name, path) = entry
                .split_once('=')
                .ok_or_else(|| anyhow!("--layer must be name=path, got {entry}"))?;
            layers.push(feed::layers::load(name, fs_err::File::open(path)?)?);
        }
        Ok((schedules, layers))
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::from_args();
    if !(args.fps.is_finite() && args.fps > 0.0) {
        bail!("--fps must be positive");
    }

    let (schedules, layers) = args.load()?;
    info!(
        "Loaded {} trips and {} geometry layers",
        schedules.len(),
        layers.len()
    );

    let mut surface = RecordingSurface::default();
    let mut frame_loop = FrameLoop::new(schedules)?;
    frame_loop.set_layers(layers);
    frame_loop.clock_mut().set_speed(args.speed);
    frame_loop.clock_mut().toggle_play();

    let dt = 1.0 / args.fps;
    let frames_per_log = (args.fps as usize).max(1);
    for frame in 0..args.frames {
        let stats = frame_loop.step(dt, &mut surface);
        if frame % frames_per_log == 0 {
            info!(
                "{}: {} active, {} away, {} paths on the surface",
                format_clock(stats.time),
                stats.active,
                stats.away,
                surface.paths.len()
            );
        }
        std::thread::sleep(std::time::Duration::from_secs_f64(dt));
    }
    Ok(())
}

fn format_clock(t: f64) -> String {
    match chrono::DateTime::from_timestamp(t as i64, 0) {
        Some(time) => time.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => format!("{t:.0}"),
    }
}
