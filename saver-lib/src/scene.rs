use std::time::Duration;

use frame_output::FrameOutput;

use crate::Rng;

/// Timing information handed to a scene for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
	/// Time since the saver session started.
	pub elapsed: Duration,
	/// Time since the previous frame of this session.
	pub delta: Duration,
}

/// Content drawn while the screensaver is active.
///
/// `render` must leave every pixel of `canvas` written; the canvas is reused between
/// frames and handed to the pixel converter as-is.
pub trait Scene {
	fn id(&self) -> &'static str;

	/// Starts a new saver session. Scenes with per-session state reinitialise it here.
	fn begin(&mut self, rng: &mut Rng);

	fn render(&mut self, tick: Tick, canvas: &mut FrameOutput, rng: &mut Rng);
}
