use std::{
	fs::{File, OpenOptions},
	io::{ErrorKind, Read, Write},
	path::{Path, PathBuf},
};

use log::debug;

use crate::{
	config::DisplayProfile,
	error::{Error, Result},
};

/// One full display image in the device's native pixel encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame(Vec<u8>);

impl Frame {
	pub fn from_vec(bytes: Vec<u8>) -> Self {
		Frame(bytes)
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// Whole-frame access to a display.
pub trait Framebuffer {
	fn frame_bytes(&self) -> usize;

	/// Captures the current display contents.
	fn read(&self) -> Result<Frame>;

	/// Replaces the display contents. `frame` must be exactly [`Framebuffer::frame_bytes`] long.
	fn write(&self, frame: &Frame) -> Result<()>;
}

/// Framebuffer device node, e.g. `/dev/fb0`.
///
/// Every read and write opens the node afresh, so a driver re-initialising the
/// display between calls is tolerated.
#[derive(Debug, Clone)]
pub struct FramebufferDevice {
	path: PathBuf,
	frame_bytes: usize,
}

impl FramebufferDevice {
	pub fn new(path: impl Into<PathBuf>, profile: DisplayProfile) -> Self {
		FramebufferDevice {
			path: path.into(),
			frame_bytes: profile.frame_bytes(),
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl Framebuffer for FramebufferDevice {
	fn frame_bytes(&self) -> usize {
		self.frame_bytes
	}

	/// Short reads are zero-filled up to the frame size.
	fn read(&self) -> Result<Frame> {
		let mut file = File::open(&self.path).map_err(|e| Error::io(&self.path, e))?;
		let mut buf = vec![0u8; self.frame_bytes];
		let mut filled = 0;
		while filled < buf.len() {
			match file.read(&mut buf[filled..]) {
				Ok(0) => break,
				Ok(n) => filled += n,
				Err(e) if e.kind() == ErrorKind::Interrupted => continue,
				Err(e) => return Err(Error::io(&self.path, e)),
			}
		}
		if filled < buf.len() {
			debug!("short read from {}: {filled} of {} bytes", self.path.display(), buf.len());
		}
		Ok(Frame(buf))
	}

	fn write(&self, frame: &Frame) -> Result<()> {
		if frame.len() != self.frame_bytes {
			return Err(Error::InvalidFrameSize {
				expected: self.frame_bytes,
				actual: frame.len(),
			});
		}
		let mut file = OpenOptions::new()
			.write(true)
			.open(&self.path)
			.map_err(|e| Error::io(&self.path, e))?;
		file.write_all(frame.as_bytes()).map_err(|e| Error::io(&self.path, e))
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicUsize, Ordering};

	use super::*;

	static COUNTER: AtomicUsize = AtomicUsize::new(0);

	const PROFILE: DisplayProfile = DisplayProfile {
		width: 8,
		height: 4,
		bytes_per_pixel: 2,
	};

	fn temp_fb(contents: &[u8]) -> PathBuf {
		let id = COUNTER.fetch_add(1, Ordering::Relaxed);
		let path = std::env::temp_dir().join(format!("fb_saver_fb_{}_{}", std::process::id(), id));
		std::fs::write(&path, contents).unwrap();
		path
	}

	fn pattern() -> Vec<u8> {
		(0..PROFILE.frame_bytes()).map(|i| (i * 7 + 3) as u8).collect()
	}

	#[test]
	fn restore_reproduces_capture() {
		let path = temp_fb(&pattern());
		let fb = FramebufferDevice::new(&path, PROFILE);
		let saved = fb.read().unwrap();
		assert_eq!(saved.as_bytes(), &pattern()[..]);

		fb.write(&Frame::from_vec(vec![0xAA; PROFILE.frame_bytes()])).unwrap();
		assert_ne!(fb.read().unwrap(), saved);

		fb.write(&saved).unwrap();
		assert_eq!(std::fs::read(&path).unwrap(), pattern());
		let _ = std::fs::remove_file(path);
	}

	#[test]
	fn short_read_is_zero_filled() {
		let path = temp_fb(&[1, 2, 3]);
		let frame = FramebufferDevice::new(&path, PROFILE).read().unwrap();
		assert_eq!(frame.len(), PROFILE.frame_bytes());
		assert_eq!(&frame.as_bytes()[..3], &[1, 2, 3]);
		assert!(frame.as_bytes()[3..].iter().all(|&b| b == 0));
		let _ = std::fs::remove_file(path);
	}

	#[test]
	fn wrong_size_write_is_rejected_without_io() {
		let path = temp_fb(&pattern());
		let fb = FramebufferDevice::new(&path, PROFILE);
		for len in [0, PROFILE.frame_bytes() - 1, PROFILE.frame_bytes() + 1] {
			match fb.write(&Frame::from_vec(vec![0xFF; len])) {
				Err(Error::InvalidFrameSize { expected, actual }) => {
					assert_eq!(expected, PROFILE.frame_bytes());
					assert_eq!(actual, len);
				},
				other => panic!("unexpected result {other:?}"),
			}
		}
		assert_eq!(std::fs::read(&path).unwrap(), pattern());
		let _ = std::fs::remove_file(path);
	}

	#[test]
	fn wrong_size_write_never_touches_missing_device() {
		let fb = FramebufferDevice::new("/nonexistent/fb0", PROFILE);
		assert!(matches!(
			fb.write(&Frame::from_vec(vec![])),
			Err(Error::InvalidFrameSize { .. })
		));
	}

	#[test]
	fn missing_device_is_io_error() {
		let fb = FramebufferDevice::new("/nonexistent/fb0", PROFILE);
		assert!(matches!(fb.read(), Err(Error::DeviceIo { .. })));
		let frame = Frame::from_vec(vec![0; PROFILE.frame_bytes()]);
		assert!(matches!(fb.write(&frame), Err(Error::DeviceIo { .. })));
	}
}
