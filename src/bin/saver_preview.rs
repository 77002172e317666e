use std::{fs, path::PathBuf, process, time::Duration};

use clap::Parser;
use fb_saver::{DisplayProfile, SceneKind, config::{frame_interval, parse_fps}, convert::to_rgb565};
use frame_output::FrameOutput;
use log::{error, info};
use saver_lib::{Tick, new_rng, seeded_rng};

/// Renders a screensaver scene to PNG files instead of the display.
#[derive(Parser, Debug)]
struct Args {
	#[arg(long, value_enum, default_value_t = SceneKind::Particles)]
	scene: SceneKind,

	#[arg(long, default_value_t = 30)]
	/// Number of frames to render
	frames: u32,

	#[arg(long, default_value = "/tmp/fb-saver-preview")]
	/// Output directory
	out: PathBuf,

	#[arg(long, default_value_t = 480)]
	width: u32,

	#[arg(long, default_value_t = 320)]
	height: u32,

	#[arg(long, value_parser = parse_fps)]
	/// Frames per second of the simulated clock
	fps: Option<f32>,

	#[arg(long)]
	/// Label to draw instead of the scene default
	text: Option<String>,

	#[arg(long)]
	/// Seed for the scene's random numbers
	seed: Option<u64>,

	#[arg(long)]
	/// Also write the RGB565 frame bytes next to each PNG
	raw: bool,
}

fn main() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let args = Args::parse();
	if let Err(err) = fs::create_dir_all(&args.out) {
		error!("unable to create {}: {err}", args.out.display());
		process::exit(1);
	}

	let profile = DisplayProfile::rgb565(args.width, args.height);
	let interval = args
		.fps
		.map(frame_interval)
		.unwrap_or_else(|| args.scene.default_frame_interval());
	let label = args
		.text
		.as_deref()
		.or(args.scene.default_label())
		.unwrap_or("raspberrypi");
	let mut scene = args.scene.build(label, profile);
	let mut canvas = FrameOutput::new(profile.width, profile.height);
	let mut rng = args.seed.map(seeded_rng).unwrap_or_else(new_rng);

	scene.begin(&mut rng);
	for i in 0..args.frames {
		let tick = Tick {
			elapsed: interval * i,
			delta: if i == 0 { Duration::from_millis(1) } else { interval },
		};
		scene.render(tick, &mut canvas, &mut rng);

		let png = args.out.join(format!("frame{i:04}.png"));
		if let Err(err) = canvas.buffer.save(&png) {
			error!("unable to save {}: {err}", png.display());
			process::exit(1);
		}
		if args.raw {
			let raw = args.out.join(format!("frame{i:04}.rgb565"));
			if let Err(err) = fs::write(&raw, to_rgb565(&canvas.buffer).as_bytes()) {
				error!("unable to write {}: {err}", raw.display());
				process::exit(1);
			}
		}
	}
	info!("wrote {} frames of {} to {}", args.frames, scene.id(), args.out.display());
}
