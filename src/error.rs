use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
	#[error("unable to access {}: {source}", .path.display())]
	DeviceIo { path: PathBuf, source: std::io::Error },
	#[error("frame of {actual} bytes does not match the display frame size of {expected} bytes")]
	InvalidFrameSize { expected: usize, actual: usize },
	#[error("no touch input device found")]
	NoInputDeviceFound,
}

impl Error {
	pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		Error::DeviceIo {
			path: path.into(),
			source,
		}
	}
}

pub type Result<T> = std::result::Result<T, Error>;
