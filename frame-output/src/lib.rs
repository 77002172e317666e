use embedded_graphics::{
	pixelcolor::Rgb888,
	prelude::{Dimensions, DrawTarget, RgbColor},
	primitives::Rectangle,
};
use image::{Rgb, RgbImage};

mod mask;
pub use mask::Mask;

/// Opaque RGB canvas a scene draws one display frame into.
pub struct FrameOutput {
	pub buffer: RgbImage,
}

impl FrameOutput {
	pub fn new(width: u32, height: u32) -> Self {
		FrameOutput {
			buffer: RgbImage::new(width, height),
		}
	}

	/// Blends `color` with the given opacity over the pixel at `(x, y)`.
	/// Coordinates outside the canvas are ignored.
	pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgb888, alpha: u8) {
		if x < 0 || y < 0 || x as u32 >= self.buffer.width() || y as u32 >= self.buffer.height() {
			return;
		}
		let dst = self.buffer.get_pixel_mut(x as u32, y as u32);
		*dst = blend(*dst, color, alpha);
	}

	/// Draws the set pixels of `mask`, scaled by `scale`, with its top left corner at `top_left`.
	pub fn draw_mask(&mut self, mask: &Mask, top_left: (f32, f32), scale: f32, color: Rgb888, alpha: u8) {
		if mask.is_empty() || scale <= 0.0 {
			return;
		}
		let w = (mask.width() as f32 * scale).ceil() as i32;
		let h = (mask.height() as f32 * scale).ceil() as i32;
		let ox = top_left.0.floor() as i32;
		let oy = top_left.1.floor() as i32;
		let x0 = ox.max(0);
		let y0 = oy.max(0);
		let x1 = (ox + w).min(self.buffer.width() as i32);
		let y1 = (oy + h).min(self.buffer.height() as i32);
		for y in y0..y1 {
			let sy = ((y - oy) as f32 / scale) as u32;
			for x in x0..x1 {
				let sx = ((x - ox) as f32 / scale) as u32;
				if mask.get(sx, sy) {
					self.blend_pixel(x, y, color, alpha);
				}
			}
		}
	}

	/// Draws `mask` scaled by `scale` and rotated counter-clockwise by `angle` degrees
	/// around `center`. Uses nearest-neighbour sampling.
	pub fn draw_mask_rotated(
		&mut self,
		mask: &Mask,
		center: (f32, f32),
		scale: f32,
		angle: f32,
		color: Rgb888,
		alpha: u8,
	) {
		if mask.is_empty() || scale <= 0.0 {
			return;
		}
		let half_w = mask.width() as f32 / 2.0;
		let half_h = mask.height() as f32 / 2.0;
		let radius = (half_w.hypot(half_h) * scale).ceil() as i32 + 1;
		let (sin, cos) = angle.to_radians().sin_cos();

		let cx = center.0.floor() as i32;
		let cy = center.1.floor() as i32;
		let x0 = (cx - radius).max(0);
		let y0 = (cy - radius).max(0);
		let x1 = (cx + radius).min(self.buffer.width() as i32);
		let y1 = (cy + radius).min(self.buffer.height() as i32);
		for y in y0..y1 {
			let dy = y as f32 + 0.5 - center.1;
			for x in x0..x1 {
				let dx = x as f32 + 0.5 - center.0;
				// inverse of the (y down) counter-clockwise rotation
				let u = (dx * cos - dy * sin) / scale + half_w;
				let v = (dx * sin + dy * cos) / scale + half_h;
				if u < 0.0 || v < 0.0 {
					continue;
				}
				if mask.get(u as u32, v as u32) {
					self.blend_pixel(x, y, color, alpha);
				}
			}
		}
	}
}

fn blend(dst: Rgb<u8>, src: Rgb888, alpha: u8) -> Rgb<u8> {
	let a = alpha as u16;
	let mix = |d: u8, s: u8| ((s as u16 * a + d as u16 * (255 - a) + 127) / 255) as u8;
	Rgb([mix(dst.0[0], src.r()), mix(dst.0[1], src.g()), mix(dst.0[2], src.b())])
}

impl DrawTarget for FrameOutput {
	type Color = Rgb888;

	type Error = ();

	fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
	where
		I: IntoIterator<Item = embedded_graphics::Pixel<Self::Color>>,
	{
		for pos in pixels {
			if pos.0.x < 0
				|| pos.0.y < 0
				|| pos.0.x as u32 >= self.buffer.width()
				|| pos.0.y as u32 >= self.buffer.height()
			{
				continue;
			}
			self.buffer
				.put_pixel(pos.0.x as u32, pos.0.y as u32, Rgb([pos.1.r(), pos.1.g(), pos.1.b()]));
		}
		Ok(())
	}

	fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
		let area = area.intersection(&self.bounding_box());
		let Some(bottom_right) = area.bottom_right() else {
			return Ok(());
		};
		let rgb = Rgb([color.r(), color.g(), color.b()]);
		for y in area.top_left.y..=bottom_right.y {
			for x in area.top_left.x..=bottom_right.x {
				self.buffer.put_pixel(x as u32, y as u32, rgb);
			}
		}
		Ok(())
	}
}

impl Dimensions for FrameOutput {
	fn bounding_box(&self) -> Rectangle {
		Rectangle::new((0, 0).into(), (self.buffer.width(), self.buffer.height()).into())
	}
}

#[cfg(test)]
mod tests {
	use embedded_graphics::{
		Drawable,
		prelude::{Point, Primitive, Size},
		primitives::PrimitiveStyle,
	};

	use super::*;

	#[test]
	fn clear_fills_whole_canvas() {
		let mut out = FrameOutput::new(8, 4);
		out.clear(Rgb888::new(1, 2, 3)).unwrap();
		assert!(out.buffer.pixels().all(|p| p.0 == [1, 2, 3]));
	}

	#[test]
	fn primitives_are_clipped() {
		let mut out = FrameOutput::new(4, 4);
		Rectangle::new(Point::new(2, 2), Size::new(10, 10))
			.into_styled(PrimitiveStyle::with_fill(Rgb888::WHITE))
			.draw(&mut out)
			.unwrap();
		assert_eq!(out.buffer.get_pixel(3, 3).0, [255, 255, 255]);
		assert_eq!(out.buffer.get_pixel(1, 1).0, [0, 0, 0]);
	}

	#[test]
	fn blend_respects_alpha() {
		let mut out = FrameOutput::new(1, 1);
		out.blend_pixel(0, 0, Rgb888::WHITE, 255);
		assert_eq!(out.buffer.get_pixel(0, 0).0, [255, 255, 255]);
		out.clear(Rgb888::BLACK).unwrap();
		out.blend_pixel(0, 0, Rgb888::new(200, 100, 0), 0);
		assert_eq!(out.buffer.get_pixel(0, 0).0, [0, 0, 0]);
		out.blend_pixel(0, 0, Rgb888::new(255, 255, 255), 160);
		assert_eq!(out.buffer.get_pixel(0, 0).0, [160, 160, 160]);
		// out of bounds is a no-op
		out.blend_pixel(-1, 5, Rgb888::WHITE, 255);
	}

	#[test]
	fn scaled_mask_covers_scaled_area() {
		let mut mask = Mask::new(2, 1);
		mask.set(0, 0, true);
		let mut out = FrameOutput::new(8, 8);
		out.draw_mask(&mask, (1.0, 1.0), 3.0, Rgb888::WHITE, 255);
		let lit: Vec<_> = out
			.buffer
			.enumerate_pixels()
			.filter(|(_, _, p)| p.0 == [255, 255, 255])
			.map(|(x, y, _)| (x, y))
			.collect();
		assert_eq!(lit.len(), 9);
		assert!(lit.iter().all(|&(x, y)| (1..4).contains(&x) && (1..4).contains(&y)));
	}

	#[test]
	fn quarter_turn_swaps_axes() {
		// a horizontal bar becomes a vertical one
		let mut mask = Mask::new(5, 1);
		for x in 0..5 {
			mask.set(x, 0, true);
		}
		let mut out = FrameOutput::new(11, 11);
		out.draw_mask_rotated(&mask, (5.5, 5.5), 1.0, 90.0, Rgb888::WHITE, 255);
		let lit: Vec<_> = out
			.buffer
			.enumerate_pixels()
			.filter(|(_, _, p)| p.0 == [255, 255, 255])
			.map(|(x, y, _)| (x, y))
			.collect();
		assert_eq!(lit.len(), 5);
		assert!(lit.iter().all(|&(x, _)| x == 5));
	}

	#[test]
	fn rotated_mask_near_edges_does_not_panic() {
		let mask = Mask::text("edge", &embedded_graphics::mono_font::ascii::FONT_10X20);
		let mut out = FrameOutput::new(16, 16);
		out.draw_mask_rotated(&mask, (-5.0, 20.0), 2.5, 33.0, Rgb888::WHITE, 255);
		out.draw_mask(&mask, (-30.0, 10.0), 1.7, Rgb888::WHITE, 255);
	}
}
