use embedded_graphics::{mono_font::ascii::FONT_10X20, prelude::DrawTarget};
use frame_output::{FrameOutput, Mask};

use crate::{BLACK, Rng, Scene, Tick, hsv_to_rgb, uniform, uniform_int};

pub const NUM_PARTICLES: usize = 10;

/// Upward speed range, px/s.
const SPEED: (f32, f32) = (12.0, 40.0);
/// Spin range, degrees/s.
const SPIN: (f32, f32) = (-90.0, 90.0);
/// Label height range, px.
const SIZE: (u32, u32) = (14, 44);
/// How far below the bottom edge particles may spawn.
const SPAWN_DEPTH: f32 = 200.0;
/// Particles above this line are respawned.
pub const EXIT_Y: f32 = -260.0;

/// Global hue rotation, degrees/s.
const HUE_SPEED: f32 = 80.0;
const SATURATION: f32 = 0.95;
const VALUE: f32 = 0.95;
const OUTLINE: [(f32, f32); 4] = [(-1.0, 0.0), (1.0, 0.0), (0.0, -1.0), (0.0, 1.0)];

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
	pub x: f32,
	pub y: f32,
	/// Upward speed, px/s.
	pub vy: f32,
	/// Rotation, degrees.
	pub angle: f32,
	/// Spin, degrees/s.
	pub omega: f32,
	/// Label height, px.
	pub size: u32,
	pub hue_offset: f32,
}

impl Particle {
	/// A particle somewhere below the bottom edge of a `width` x `height` display.
	pub fn spawn(rng: &mut Rng, width: f32, height: f32) -> Self {
		Particle {
			x: uniform(rng, 0.0, width),
			y: uniform(rng, height, height + SPAWN_DEPTH),
			vy: uniform(rng, SPEED.0, SPEED.1),
			angle: uniform(rng, 0.0, 360.0),
			omega: uniform(rng, SPIN.0, SPIN.1),
			size: uniform_int(rng, SIZE.0, SIZE.1),
			hue_offset: uniform(rng, 0.0, 360.0),
		}
	}
}

/// Rainbow labels rising from below the display, spinning as they go.
pub struct Particles {
	mask: Mask,
	width: f32,
	height: f32,
	particles: Vec<Particle>,
}

impl Particles {
	pub fn new(label: &str, width: u32, height: u32) -> Self {
		Particles {
			mask: Mask::text(label, &FONT_10X20),
			width: width as f32,
			height: height as f32,
			particles: Vec::with_capacity(NUM_PARTICLES),
		}
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Integrates motion over `dt` seconds. Particles that left through the top are
	/// replaced by freshly spawned ones in the same step.
	pub fn update(&mut self, dt: f32, rng: &mut Rng) {
		for p in &mut self.particles {
			p.y -= p.vy * dt;
			p.angle = (p.angle + p.omega * dt).rem_euclid(360.0);
			if p.y < EXIT_Y {
				*p = Particle::spawn(rng, self.width, self.height);
			}
		}
	}
}

impl Scene for Particles {
	fn id(&self) -> &'static str {
		"particles"
	}

	fn begin(&mut self, rng: &mut Rng) {
		self.particles.clear();
		for _ in 0..NUM_PARTICLES {
			self.particles.push(Particle::spawn(rng, self.width, self.height));
		}
	}

	fn render(&mut self, tick: Tick, canvas: &mut FrameOutput, rng: &mut Rng) {
		let dt = tick.delta.as_secs_f32().max(0.001);
		self.update(dt, rng);

		let _ = canvas.clear(BLACK);
		let global_hue = (tick.elapsed.as_secs_f32() * HUE_SPEED) % 360.0;
		let font_height = self.mask.height().max(1) as f32;
		for p in &self.particles {
			let scale = p.size as f32 / font_height;
			let color = hsv_to_rgb(global_hue + p.hue_offset + p.x * 0.35, SATURATION, VALUE);
			for (dx, dy) in OUTLINE {
				canvas.draw_mask_rotated(&self.mask, (p.x + dx, p.y + dy), scale, p.angle, BLACK, 255);
			}
			canvas.draw_mask_rotated(&self.mask, (p.x, p.y), scale, p.angle, color, 255);
		}
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use rand_xoshiro::rand_core::SeedableRng;

	use super::*;

	const W: u32 = 480;
	const H: u32 = 320;

	#[test]
	fn spawn_is_below_bottom_edge() {
		let mut rng = Rng::seed_from_u64(3);
		for _ in 0..200 {
			let p = Particle::spawn(&mut rng, W as f32, H as f32);
			assert!(p.y >= H as f32 && p.y <= H as f32 + SPAWN_DEPTH);
			assert!((0.0..=W as f32).contains(&p.x));
			assert!((SPEED.0..=SPEED.1).contains(&p.vy));
			assert!((SIZE.0..=SIZE.1).contains(&p.size));
		}
	}

	#[test]
	fn begin_spawns_fresh_particles_each_session() {
		let mut rng = Rng::seed_from_u64(9);
		let mut scene = Particles::new("raspberrypi", W, H);
		scene.begin(&mut rng);
		assert_eq!(scene.particles().len(), NUM_PARTICLES);
		let first = scene.particles().to_vec();
		scene.update(1.0, &mut rng);
		scene.begin(&mut rng);
		assert_eq!(scene.particles().len(), NUM_PARTICLES);
		assert_ne!(first, scene.particles());
		assert!(scene.particles().iter().all(|p| p.y >= H as f32));
	}

	#[test]
	fn particle_crossing_exit_respawns_next_update() {
		let mut rng = Rng::seed_from_u64(5);
		let mut scene = Particles::new("raspberrypi", W, H);
		scene.begin(&mut rng);
		let before = scene.particles[0].clone();
		scene.particles[0].y = EXIT_Y + 1.0;
		scene.particles[0].vy = 40.0;
		scene.update(0.1, &mut rng);
		let p = &scene.particles()[0];
		assert!(p.y >= H as f32, "respawned at {}", p.y);
		assert_ne!(p.hue_offset, before.hue_offset);
		// others only moved up
		assert!(scene.particles()[1..].iter().all(|p| p.y >= EXIT_Y));
	}

	#[test]
	fn no_particle_stays_off_screen() {
		let mut rng = Rng::seed_from_u64(11);
		let mut scene = Particles::new("raspberrypi", W, H);
		scene.begin(&mut rng);
		for _ in 0..2000 {
			scene.update(0.25, &mut rng);
			assert!(scene.particles().iter().all(|p| p.y >= EXIT_Y));
		}
	}

	#[test]
	fn render_fills_the_canvas() {
		let mut rng = Rng::seed_from_u64(1);
		let mut scene = Particles::new("raspberrypi", W, H);
		let mut canvas = FrameOutput::new(W, H);
		for p in canvas.buffer.pixels_mut() {
			p.0 = [1, 2, 3];
		}
		scene.begin(&mut rng);
		let tick = Tick {
			elapsed: Duration::from_secs(1),
			delta: Duration::ZERO,
		};
		scene.render(tick, &mut canvas, &mut rng);
		assert!(canvas.buffer.pixels().all(|p| p.0 != [1, 2, 3]));
	}
}
