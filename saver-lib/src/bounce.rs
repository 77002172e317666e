use embedded_graphics::{mono_font::ascii::FONT_10X20, pixelcolor::Rgb888, prelude::DrawTarget};
use frame_output::{FrameOutput, Mask};

use crate::{BLACK, Rng, Scene, Tick};

/// Depth of the pseudo-3D extrusion, in layers.
pub const EXTRUDE: u32 = 10;
/// Distance kept between the label and the display edges.
pub const MARGIN: f32 = 12.0 + EXTRUDE as f32;
/// Largest offset of the back layer from the front, per axis.
const EXTRUDE_SPAN: (f32, f32) = (6.0, 4.0);
const SCALE: f32 = 4.0;
const START: (f32, f32) = (40.0, 80.0);
const VELOCITY: (f32, f32) = (2.6, 1.9);

const FRONT: Rgb888 = Rgb888::new(235, 235, 235);
const SIDE: Rgb888 = Rgb888::new(90, 90, 90);
const EDGE: Rgb888 = Rgb888::new(160, 160, 160);
const EDGE_ALPHA: u8 = 160;

/// Extruded label bouncing off the display edges at a constant per-frame velocity.
pub struct Bounce {
	mask: Mask,
	width: f32,
	height: f32,
	text_w: f32,
	text_h: f32,
	x: f32,
	y: f32,
	vx: f32,
	vy: f32,
}

impl Bounce {
	pub fn new(label: &str, width: u32, height: u32) -> Self {
		let mask = Mask::text(label, &FONT_10X20);
		let text_w = mask.width() as f32 * SCALE;
		let text_h = mask.height() as f32 * SCALE;
		Bounce {
			mask,
			width: width as f32,
			height: height as f32,
			text_w,
			text_h,
			x: START.0,
			y: START.1,
			vx: VELOCITY.0,
			vy: VELOCITY.1,
		}
	}

	/// Label bounding box as `(left, top, right, bottom)`, without the extrusion.
	pub fn bounds(&self) -> (f32, f32, f32, f32) {
		(self.x, self.y, self.x + self.text_w, self.y + self.text_h)
	}

	pub fn set_motion(&mut self, x: f32, y: f32, vx: f32, vy: f32) {
		self.x = x;
		self.y = y;
		self.vx = vx;
		self.vy = vy;
	}

	/// Advances one frame. Hitting an edge flips the velocity sign and clamps the position.
	pub fn step(&mut self) {
		self.x += self.vx;
		self.y += self.vy;

		let max_x = (self.width - MARGIN - self.text_w).max(MARGIN);
		let max_y = (self.height - MARGIN - self.text_h).max(MARGIN);
		if self.x < MARGIN {
			self.x = MARGIN;
			self.vx = self.vx.abs();
		}
		if self.y < MARGIN {
			self.y = MARGIN;
			self.vy = self.vy.abs();
		}
		if self.x > max_x {
			self.x = max_x;
			self.vx = -self.vx.abs();
		}
		if self.y > max_y {
			self.y = max_y;
			self.vy = -self.vy.abs();
		}
	}

	/// Offset of the rearmost extrusion layer for a session time in seconds.
	fn extrusion(elapsed: f32) -> (f32, f32) {
		let angle = elapsed * 0.8;
		(angle.cos() * EXTRUDE_SPAN.0, angle.sin() * EXTRUDE_SPAN.1)
	}
}

impl Scene for Bounce {
	fn id(&self) -> &'static str {
		"bounce"
	}

	fn begin(&mut self, _rng: &mut Rng) {
		self.set_motion(START.0, START.1, VELOCITY.0, VELOCITY.1);
	}

	fn render(&mut self, tick: Tick, canvas: &mut FrameOutput, _rng: &mut Rng) {
		self.step();

		let _ = canvas.clear(BLACK);
		let (ox, oy) = Self::extrusion(tick.elapsed.as_secs_f32());
		// back to front
		for i in (1..=EXTRUDE).rev() {
			let f = i as f32 / EXTRUDE as f32;
			canvas.draw_mask(&self.mask, (self.x + ox * f, self.y + oy * f), SCALE, SIDE, 255);
		}
		canvas.draw_mask(&self.mask, (self.x, self.y), SCALE, FRONT, 255);
		for (dx, dy) in [(-1.0, 0.0), (1.0, 0.0), (0.0, -1.0), (0.0, 1.0)] {
			canvas.draw_mask(&self.mask, (self.x + dx, self.y + dy), SCALE, EDGE, EDGE_ALPHA);
		}
	}
}
