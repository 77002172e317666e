use std::{
	fs::{self, File, OpenOptions},
	io::{ErrorKind, Read},
	mem,
	os::unix::fs::OpenOptionsExt,
	path::{Path, PathBuf},
};

use log::{debug, warn};

use crate::error::{Error, Result};

const EV_KEY: u16 = 0x01;
const EV_REL: u16 = 0x02;
const EV_ABS: u16 = 0x03;

/// Size of one `struct input_event` record.
pub const EVENT_SIZE: usize = mem::size_of::<libc::input_event>();
/// Offset of the `type` field, right after the timestamp.
pub const TYPE_OFFSET: usize = mem::size_of::<libc::timeval>();

/// Events drained per read call.
const BATCH: usize = 64;

/// Something that can report user activity without blocking.
pub trait ActivitySource {
	/// Drains all pending input and reports whether any of it was user activity.
	fn poll_activity(&mut self) -> Result<bool>;
}

/// Non-blocking reader of an evdev event node.
pub struct InputMonitor<R = File> {
	source: R,
	path: PathBuf,
	buf: Vec<u8>,
	/// Bytes of an incomplete event carried over from the previous read.
	partial: usize,
}

impl InputMonitor<File> {
	/// Opens an event node such as `/dev/input/event0` for non-blocking reads.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
		let path = path.into();
		let file = OpenOptions::new()
			.read(true)
			.custom_flags(libc::O_NONBLOCK)
			.open(&path)
			.map_err(|e| Error::io(&path, e))?;
		Ok(InputMonitor::from_reader(file, path))
	}
}

impl<R: Read> InputMonitor<R> {
	/// Wraps an already opened event source. It must not block on reads.
	pub fn from_reader(source: R, path: impl Into<PathBuf>) -> Self {
		InputMonitor {
			source,
			path: path.into(),
			buf: vec![0; EVENT_SIZE * BATCH],
			partial: 0,
		}
	}
}

fn is_activity(event: &[u8]) -> bool {
	let ty = u16::from_ne_bytes([event[TYPE_OFFSET], event[TYPE_OFFSET + 1]]);
	matches!(ty, EV_KEY | EV_REL | EV_ABS)
}

impl<R: Read> ActivitySource for InputMonitor<R> {
	fn poll_activity(&mut self) -> Result<bool> {
		let mut activity = false;
		loop {
			let n = match self.source.read(&mut self.buf[self.partial..]) {
				Ok(0) => break,
				Ok(n) => n,
				Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::Interrupted) => break,
				Err(e) => return Err(Error::io(&self.path, e)),
			};
			let available = self.partial + n;
			let complete = available - available % EVENT_SIZE;
			activity |= self.buf[..complete].chunks_exact(EVENT_SIZE).any(is_activity);
			self.buf.copy_within(complete..available, 0);
			self.partial = available - complete;
		}
		if activity {
			debug!("input activity on {}", self.path.display());
		}
		Ok(activity)
	}
}

/// Looks for a touch panel among the input devices listed in `/sys/class/input`.
pub fn find_touch_device() -> Result<PathBuf> {
	find_touch_device_in(Path::new("/sys/class/input"), Path::new("/dev/input"))
}

/// Prefers an ADS7846 controller, then anything calling itself a touch device.
/// `sys_root` holds `eventN/device/name` entries, `dev_root` the event nodes.
pub fn find_touch_device_in(sys_root: &Path, dev_root: &Path) -> Result<PathBuf> {
	let entries = fs::read_dir(sys_root).map_err(|e| {
		warn!("unable to list input devices in {}: {e}", sys_root.display());
		Error::NoInputDeviceFound
	})?;
	let mut devices: Vec<(u32, String)> = entries
		.flatten()
		.filter_map(|entry| {
			let file_name = entry.file_name();
			let index = file_name.to_str()?.strip_prefix("event")?.parse().ok()?;
			let name = fs::read_to_string(entry.path().join("device").join("name")).ok()?;
			Some((index, name.trim().to_lowercase()))
		})
		.collect();
	devices.sort();
	debug!("input devices: {devices:?}");

	devices
		.iter()
		.find(|(_, name)| name.contains("ads7846"))
		.or_else(|| devices.iter().find(|(_, name)| name.contains("touch")))
		.map(|(index, _)| dev_root.join(format!("event{index}")))
		.ok_or(Error::NoInputDeviceFound)
}
