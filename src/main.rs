use std::{process, time::Instant};

use clap::Parser;
use fb_saver::{
	Cli, Config, Engine, FramebufferDevice, InputMonitor, Result, find_touch_device, hostname::resolve_hostname,
};
use log::{error, info};
use saver_lib::new_rng;

fn main() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let config = Cli::parse().into_config();
	if let Err(err) = run(config) {
		error!("{err}");
		process::exit(1);
	}
}

fn run(config: Config) -> Result<()> {
	let input_path = match config.input {
		Some(path) => path,
		None => find_touch_device()?,
	};
	let input = InputMonitor::open(&input_path)?;
	info!("using input {}", input_path.display());

	let label = config
		.text
		.or_else(|| config.scene.default_label().map(str::to_owned))
		.unwrap_or_else(resolve_hostname);
	info!("label: {label}");

	let settings = config.settings;
	let scene = config.scene.build(&label, settings.profile);
	let display = FramebufferDevice::new(config.framebuffer, settings.profile);
	info!(
		"framebuffer {} ({}x{}), idle after {:?}",
		display.path().display(),
		settings.profile.width,
		settings.profile.height,
		settings.idle_threshold
	);

	let mut engine = Engine::new(display, input, scene, settings, new_rng(), Instant::now())?;
	engine.run()
}
