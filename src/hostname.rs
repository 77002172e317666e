use std::{
	ffi::CStr,
	io::Read,
	process::{Command, Stdio},
	thread,
	time::{Duration, Instant},
};

use log::debug;

const FALLBACK: &str = "raspberrypi";
const HOSTNAMECTL_TIMEOUT: Duration = Duration::from_secs(1);

/// Static hostname from `hostnamectl`, then the kernel hostname, then a fixed fallback.
pub fn resolve_hostname() -> String {
	from_hostnamectl()
		.or_else(from_kernel)
		.unwrap_or_else(|| FALLBACK.to_owned())
}

fn non_empty(name: &str) -> Option<String> {
	let name = name.trim();
	(!name.is_empty()).then(|| name.to_owned())
}

fn from_hostnamectl() -> Option<String> {
	let mut child = Command::new("hostnamectl")
		.arg("--static")
		.stdin(Stdio::null())
		.stdout(Stdio::piped())
		.stderr(Stdio::null())
		.spawn()
		.ok()?;
	let deadline = Instant::now() + HOSTNAMECTL_TIMEOUT;
	loop {
		match child.try_wait() {
			Ok(Some(status)) if status.success() => break,
			Ok(Some(status)) => {
				debug!("hostnamectl exited with {status}");
				return None;
			},
			Ok(None) if Instant::now() < deadline => thread::sleep(Duration::from_millis(10)),
			_ => {
				let _ = child.kill();
				let _ = child.wait();
				debug!("hostnamectl timed out");
				return None;
			},
		}
	}
	let mut out = String::new();
	child.stdout.take()?.read_to_string(&mut out).ok()?;
	non_empty(&out)
}

fn from_kernel() -> Option<String> {
	let mut buf = [0u8; 256];
	let ret = unsafe { libc::gethostname(buf.as_mut_ptr() as *mut libc::c_char, buf.len()) };
	if ret != 0 {
		return None;
	}
	// not guaranteed to be terminated on truncation
	buf[buf.len() - 1] = 0;
	let name = CStr::from_bytes_until_nul(&buf).ok()?;
	non_empty(&name.to_string_lossy())
}
