use std::{path::PathBuf, time::Duration};

use clap::{Parser, ValueEnum};
use saver_lib::{Bounce, Particles, Scene, StaticLabel};

/// Geometry and pixel format of the attached display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayProfile {
	pub width: u32,
	pub height: u32,
	pub bytes_per_pixel: usize,
}

impl DisplayProfile {
	/// RGB565 panel of the given size.
	pub const fn rgb565(width: u32, height: u32) -> Self {
		DisplayProfile {
			width,
			height,
			bytes_per_pixel: 2,
		}
	}

	pub const fn frame_bytes(&self) -> usize {
		self.width as usize * self.height as usize * self.bytes_per_pixel
	}
}

impl Default for DisplayProfile {
	fn default() -> Self {
		DisplayProfile::rgb565(480, 320)
	}
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
	/// Extruded label bouncing around the screen
	Bounce,
	/// Rainbow labels floating upwards
	Particles,
	/// Label redrawn at a random spot every few seconds
	Hostname,
}

impl SceneKind {
	pub fn default_idle(self) -> Duration {
		match self {
			SceneKind::Bounce => Duration::from_secs(600),
			SceneKind::Particles | SceneKind::Hostname => Duration::from_secs(10),
		}
	}

	pub fn default_frame_interval(self) -> Duration {
		match self {
			SceneKind::Bounce => Duration::from_millis(50),
			SceneKind::Particles => Duration::from_secs(1) / 15,
			SceneKind::Hostname => Duration::from_secs(5),
		}
	}

	/// Label shown when none is configured; `None` means the hostname.
	pub fn default_label(self) -> Option<&'static str> {
		match self {
			SceneKind::Bounce => Some("Ras5PBX"),
			SceneKind::Particles | SceneKind::Hostname => None,
		}
	}

	pub fn build(self, label: &str, profile: DisplayProfile) -> Box<dyn Scene> {
		match self {
			SceneKind::Bounce => Box::new(Bounce::new(label, profile.width, profile.height)),
			SceneKind::Particles => Box::new(Particles::new(label, profile.width, profile.height)),
			SceneKind::Hostname => Box::new(StaticLabel::new(label, profile.width, profile.height)),
		}
	}
}

#[derive(Parser, Debug)]
#[command(version, about = "Idle screensaver for SPI framebuffer displays")]
pub struct Cli {
	#[arg(long, value_enum, default_value_t = SceneKind::Particles)]
	/// Scene shown while idle
	pub scene: SceneKind,

	#[arg(long, default_value = "/dev/fb0")]
	/// Framebuffer device node
	pub framebuffer: PathBuf,

	#[arg(long)]
	/// Touch input event node; searched for when omitted
	pub input: Option<PathBuf>,

	#[arg(long, default_value_t = 480)]
	/// Display width in pixels
	pub width: u32,

	#[arg(long, default_value_t = 320)]
	/// Display height in pixels
	pub height: u32,

	#[arg(long, value_parser = parse_seconds)]
	/// Seconds without touch before the screensaver starts
	pub idle: Option<Duration>,

	#[arg(long, value_parser = parse_fps)]
	/// Frames per second while the screensaver is active
	pub fps: Option<f32>,

	#[arg(long)]
	/// Label to draw instead of the scene default
	pub text: Option<String>,
}

/// Engine timing, resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
	pub profile: DisplayProfile,
	pub idle_threshold: Duration,
	pub frame_interval: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
	pub scene: SceneKind,
	pub framebuffer: PathBuf,
	pub input: Option<PathBuf>,
	pub text: Option<String>,
	pub settings: Settings,
}

impl Cli {
	pub fn into_config(self) -> Config {
		let idle_threshold = self.idle.unwrap_or_else(|| self.scene.default_idle());
		let frame_interval = self
			.fps
			.map(frame_interval)
			.unwrap_or_else(|| self.scene.default_frame_interval());
		Config {
			scene: self.scene,
			framebuffer: self.framebuffer,
			input: self.input,
			text: self.text,
			settings: Settings {
				profile: DisplayProfile::rgb565(self.width, self.height),
				idle_threshold,
				frame_interval,
			},
		}
	}
}

/// Time between frames at `fps`. Rates below one frame every 100 s are raised to that.
pub fn frame_interval(fps: f32) -> Duration {
	Duration::try_from_secs_f32(1.0 / fps.max(0.01)).unwrap_or(Duration::ZERO)
}

/// Non-negative, finite number of seconds.
pub fn parse_seconds(arg: &str) -> Result<Duration, String> {
	let secs: f32 = arg.parse().map_err(|e| format!("{e}"))?;
	Duration::try_from_secs_f32(secs).map_err(|e| format!("{secs} seconds: {e}"))
}

/// Positive, finite frame rate.
pub fn parse_fps(arg: &str) -> Result<f32, String> {
	let fps: f32 = arg.parse().map_err(|e| format!("{e}"))?;
	if fps.is_finite() && fps > 0.0 {
		Ok(fps)
	} else {
		Err(format!("{fps} is not a positive frame rate"))
	}
}
