use std::{
	thread,
	time::{Duration, Instant},
};

use frame_output::FrameOutput;
use log::{debug, info, warn};
use saver_lib::{Rng, Scene, Tick};

use crate::{
	config::Settings,
	convert,
	error::{Error, Result},
	framebuffer::{Frame, Framebuffer},
	input::ActivitySource,
};

/// Poll interval while the screensaver runs.
pub const ACTIVE_POLL: Duration = Duration::from_millis(1);
/// Poll interval while waiting for the idle threshold.
pub const AWAKE_POLL: Duration = Duration::from_millis(50);
/// Smallest time step handed to a scene.
const MIN_DELTA: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
	Awake,
	SaverActive,
}

/// Idle detection and frame pacing.
///
/// Owns the display and input for its lifetime. While the screensaver runs it
/// also owns the frame captured on entry, which is written back on the next touch.
pub struct Engine<F, I> {
	display: F,
	input: I,
	scene: Box<dyn Scene>,
	canvas: FrameOutput,
	rng: Rng,
	settings: Settings,
	state: EngineState,
	last_activity: Instant,
	saved: Option<Frame>,
	session_start: Instant,
	last_render: Instant,
	next_frame_due: Instant,
}

impl<F: Framebuffer, I: ActivitySource> Engine<F, I> {
	/// Fails with [`Error::InvalidFrameSize`] when the display does not hold frames of
	/// the configured geometry.
	pub fn new(
		display: F,
		input: I,
		scene: Box<dyn Scene>,
		settings: Settings,
		rng: Rng,
		now: Instant,
	) -> Result<Self> {
		let expected = display.frame_bytes();
		let actual = settings.profile.frame_bytes();
		if expected != actual {
			return Err(Error::InvalidFrameSize { expected, actual });
		}
		Ok(Engine {
			display,
			input,
			scene,
			canvas: FrameOutput::new(settings.profile.width, settings.profile.height),
			rng,
			settings,
			state: EngineState::Awake,
			last_activity: now,
			saved: None,
			session_start: now,
			last_render: now,
			next_frame_due: now,
		})
	}

	pub fn state(&self) -> EngineState {
		self.state
	}

	pub fn display(&self) -> &F {
		&self.display
	}

	pub fn input_mut(&mut self) -> &mut I {
		&mut self.input
	}

	/// Whether a captured frame is waiting to be restored.
	pub fn has_saved_frame(&self) -> bool {
		self.saved.is_some()
	}

	/// How long to sleep before the next tick.
	pub fn poll_interval(&self) -> Duration {
		match self.state {
			EngineState::Awake => AWAKE_POLL,
			EngineState::SaverActive => ACTIVE_POLL,
		}
	}

	/// Runs one iteration: input first, then the idle check, then at most one frame.
	pub fn tick(&mut self, now: Instant) -> Result<EngineState> {
		if self.input.poll_activity()? {
			self.last_activity = now;
			if self.state == EngineState::SaverActive {
				self.wake()?;
			}
		}

		let idle = now.saturating_duration_since(self.last_activity);
		if self.state == EngineState::Awake && idle > self.settings.idle_threshold {
			self.start_saver(now)?;
		}

		if self.state == EngineState::SaverActive && now >= self.next_frame_due {
			self.render_frame(now)?;
		}

		Ok(self.state)
	}

	/// Ticks until an error occurs.
	pub fn run(&mut self) -> Result<()> {
		loop {
			self.tick(Instant::now())?;
			thread::sleep(self.poll_interval());
		}
	}

	fn wake(&mut self) -> Result<()> {
		if let Some(saved) = self.saved.take() {
			match self.display.write(&saved) {
				Ok(()) => {},
				Err(err @ Error::InvalidFrameSize { .. }) => return Err(err),
				// the user gets control back even if the old contents are lost
				Err(err) => warn!("unable to restore framebuffer: {err}"),
			}
		}
		self.state = EngineState::Awake;
		info!("touch detected, screensaver stopped");
		Ok(())
	}

	fn start_saver(&mut self, now: Instant) -> Result<()> {
		self.saved = Some(self.display.read()?);
		self.scene.begin(&mut self.rng);
		self.state = EngineState::SaverActive;
		self.session_start = now;
		self.last_render = now;
		self.next_frame_due = now;
		info!("idle for {:?}, starting {} screensaver", self.settings.idle_threshold, self.scene.id());
		Ok(())
	}

	fn render_frame(&mut self, now: Instant) -> Result<()> {
		let tick = Tick {
			elapsed: now.saturating_duration_since(self.session_start),
			delta: now.saturating_duration_since(self.last_render).max(MIN_DELTA),
		};
		self.last_render = now;

		let started = Instant::now();
		self.scene.render(tick, &mut self.canvas, &mut self.rng);
		let frame = convert::to_rgb565(&self.canvas.buffer);
		self.display.write(&frame)?;
		debug!("frame rendered in {:?}", started.elapsed());

		self.next_frame_due = now + self.settings.frame_interval;
		Ok(())
	}
}
