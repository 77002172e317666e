use embedded_graphics::pixelcolor::Rgb888;

/// Converts hue (degrees, any range), saturation and value (0..1) to RGB.
/// Channels are truncated, not rounded.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb888 {
	let h = h.rem_euclid(360.0);
	let c = v * s;
	let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
	let m = v - c;

	let (r, g, b) = match h {
		h if h < 60.0 => (c, x, 0.0),
		h if h < 120.0 => (x, c, 0.0),
		h if h < 180.0 => (0.0, c, x),
		h if h < 240.0 => (0.0, x, c),
		h if h < 300.0 => (x, 0.0, c),
		_ => (c, 0.0, x),
	};
	let channel = |f: f32| ((f + m) * 255.0) as u8;
	Rgb888::new(channel(r), channel(g), channel(b))
}

#[cfg(test)]
mod tests {
	use embedded_graphics::prelude::RgbColor;

	use super::*;

	#[test]
	fn primaries() {
		assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Rgb888::RED);
		assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), Rgb888::GREEN);
		assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), Rgb888::BLUE);
		assert_eq!(hsv_to_rgb(0.0, 0.0, 0.0), Rgb888::BLACK);
	}

	#[test]
	fn hue_wraps() {
		assert_eq!(hsv_to_rgb(360.0 + 60.0, 1.0, 1.0), hsv_to_rgb(60.0, 1.0, 1.0));
		assert_eq!(hsv_to_rgb(-120.0, 1.0, 1.0), hsv_to_rgb(240.0, 1.0, 1.0));
	}
}
