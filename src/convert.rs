use image::RgbImage;

use crate::framebuffer::Frame;

/// Packs one pixel as RGB565, keeping the top 5/6/5 bits of each channel.
#[inline(always)]
pub fn rgb565(r: u8, g: u8, b: u8) -> u16 {
	((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3)
}

/// Converts an opaque RGB image to little-endian RGB565 frame bytes.
pub fn to_rgb565(image: &RgbImage) -> Frame {
	let src = image.as_raw();
	let mut out = vec![0u8; src.len() / 3 * 2];
	for (px, dst) in src.chunks_exact(3).zip(out.chunks_exact_mut(2)) {
		dst.copy_from_slice(&rgb565(px[0], px[1], px[2]).to_le_bytes());
	}
	Frame::from_vec(out)
}
