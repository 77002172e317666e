use embedded_graphics::{mono_font::ascii::FONT_10X20, pixelcolor::Rgb888, prelude::DrawTarget};
use frame_output::{FrameOutput, Mask};

use crate::{BLACK, Rng, Scene, Tick, uniform_int};

// bright but not full white
const TEXT: Rgb888 = Rgb888::new(200, 200, 200);
const SCALE: f32 = 1.6;

/// Label redrawn at a random position every frame. Keeps no state between frames.
pub struct StaticLabel {
	mask: Mask,
	width: u32,
	height: u32,
}

impl StaticLabel {
	pub fn new(label: &str, width: u32, height: u32) -> Self {
		StaticLabel {
			mask: Mask::text(label, &FONT_10X20),
			width,
			height,
		}
	}

	fn text_size(&self) -> (u32, u32) {
		(
			(self.mask.width() as f32 * SCALE).ceil() as u32,
			(self.mask.height() as f32 * SCALE).ceil() as u32,
		)
	}

	/// Random top left corner keeping the label on screen where it fits.
	pub fn place(&self, rng: &mut Rng) -> (u32, u32) {
		let (tw, th) = self.text_size();
		(
			uniform_int(rng, 0, self.width.saturating_sub(tw)),
			uniform_int(rng, 0, self.height.saturating_sub(th)),
		)
	}
}

impl Scene for StaticLabel {
	fn id(&self) -> &'static str {
		"hostname"
	}

	fn begin(&mut self, _rng: &mut Rng) {}

	fn render(&mut self, _tick: Tick, canvas: &mut FrameOutput, rng: &mut Rng) {
		let (x, y) = self.place(rng);
		let _ = canvas.clear(BLACK);
		canvas.draw_mask(&self.mask, (x as f32, y as f32), SCALE, TEXT, 255);
	}
}
