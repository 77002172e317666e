use std::time::{SystemTime, UNIX_EPOCH};

pub use rand_xoshiro::Xoroshiro128StarStar as Rng;
use rand_xoshiro::rand_core::{RngCore, SeedableRng};

pub use embedded_graphics::pixelcolor::Rgb888;
pub use embedded_graphics::prelude::{DrawTarget, RgbColor};
pub use frame_output::{FrameOutput, Mask};

pub const BLACK: Rgb888 = Rgb888::new(0, 0, 0);

mod scene;
pub use scene::{Scene, Tick};

mod hsv;
pub use hsv::hsv_to_rgb;

mod bounce;
pub use bounce::Bounce;

mod particles;
pub use particles::{Particle, Particles};

mod static_label;
pub use static_label::StaticLabel;

pub fn new_rng() -> Rng {
	let seed = getrandom::u64().unwrap_or_else(|_| {
		SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map(|d| d.as_nanos() as u64)
			.unwrap_or(17381)
	});
	Rng::seed_from_u64(seed)
}

/// Reproducible generator, e.g. for previews and tests.
pub fn seeded_rng(seed: u64) -> Rng {
	Rng::seed_from_u64(seed)
}

/// Uniformly distributed value in `[lo, hi]`.
pub fn uniform(rng: &mut Rng, lo: f32, hi: f32) -> f32 {
	let t = rng.next_u32() as f64 / u32::MAX as f64;
	lo + (hi - lo) * t as f32
}

/// Uniformly distributed integer in `[lo, hi]`.
pub fn uniform_int(rng: &mut Rng, lo: u32, hi: u32) -> u32 {
	if hi <= lo {
		return lo;
	}
	lo + rng.next_u32() % (hi - lo + 1)
}
