use core::convert::Infallible;

use embedded_graphics::{
	Drawable, Pixel,
	mono_font::{MonoFont, MonoTextStyle},
	pixelcolor::BinaryColor,
	prelude::{DrawTarget, OriginDimensions, Point, Size},
	text::{Baseline, Text},
};

/// One-bit coverage map, e.g. a rendered line of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
	width: u32,
	height: u32,
	bits: Vec<bool>,
}

impl Mask {
	pub fn new(width: u32, height: u32) -> Self {
		Mask {
			width,
			height,
			bits: vec![false; width as usize * height as usize],
		}
	}

	/// Renders `text` as a single line in `font`, sized to fit it exactly.
	pub fn text(text: &str, font: &MonoFont<'_>) -> Self {
		let chars = text.chars().count() as u32;
		let width = if chars == 0 {
			0
		} else {
			chars * font.character_size.width + (chars - 1) * font.character_spacing
		};
		let mut mask = Mask::new(width, font.character_size.height);
		let style = MonoTextStyle::new(font, BinaryColor::On);
		let _ = Text::with_baseline(text, Point::zero(), style, Baseline::Top).draw(&mut mask);
		mask
	}

	pub fn width(&self) -> u32 {
		self.width
	}

	pub fn height(&self) -> u32 {
		self.height
	}

	pub fn is_empty(&self) -> bool {
		self.bits.is_empty()
	}

	pub fn get(&self, x: u32, y: u32) -> bool {
		x < self.width && y < self.height && self.bits[(y * self.width + x) as usize]
	}

	pub fn set(&mut self, x: u32, y: u32, on: bool) {
		if x < self.width && y < self.height {
			self.bits[(y * self.width + x) as usize] = on;
		}
	}
}

impl DrawTarget for Mask {
	type Color = BinaryColor;

	type Error = Infallible;

	fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
	where
		I: IntoIterator<Item = Pixel<Self::Color>>,
	{
		for Pixel(pos, color) in pixels {
			if pos.x < 0 || pos.y < 0 {
				continue;
			}
			self.set(pos.x as u32, pos.y as u32, color.is_on());
		}
		Ok(())
	}
}

impl OriginDimensions for Mask {
	fn size(&self) -> Size {
		Size::new(self.width, self.height)
	}
}

#[cfg(test)]
mod tests {
	use embedded_graphics::mono_font::ascii::FONT_10X20;

	use super::*;

	#[test]
	fn text_mask_is_sized_per_character() {
		let mask = Mask::text("pi4", &FONT_10X20);
		assert_eq!(mask.width(), 30);
		assert_eq!(mask.height(), 20);
		assert!(mask.bits.iter().any(|&b| b));
	}

	#[test]
	fn empty_text_gives_empty_mask() {
		assert!(Mask::text("", &FONT_10X20).is_empty());
	}

	#[test]
	fn out_of_range_reads_are_unset() {
		let mut mask = Mask::new(2, 2);
		mask.set(1, 1, true);
		mask.set(7, 7, true);
		assert!(mask.get(1, 1));
		assert!(!mask.get(2, 1));
		assert!(!mask.get(7, 7));
	}
}
