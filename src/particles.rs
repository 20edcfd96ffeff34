use glam::Vec2;

use crate::render::instance::{frames, pack_rgba, with_alpha, SpriteInstance};

/// Maximum concurrent Zzz glyphs.
const MAX_PARTICLES: usize = 32;
/// Zzz spawns per second while the decoration is showing.
const SPAWN_RATE: f32 = 0.8;
/// Glyph half-size range in pixels.
const SIZE_MIN: f32 = 7.0;
const SIZE_MAX: f32 = 12.0;

/// Amber, matching the cat's coat.
const ZZZ_COLOR: u32 = pack_rgba(217, 119, 6, 220);

/// A single "Z" floating up from the sleeping cat.
#[derive(Debug, Clone, Copy)]
struct Particle {
    pos: Vec2,
    vel: Vec2,
    lifetime: f32,
    max_lifetime: f32,
    size: f32,
}

/// Zzz particles shown above the cat while the sleep decoration is active.
pub struct ZzzParticles {
    particles: Vec<Particle>,
}

impl ZzzParticles {
    pub fn new() -> Self {
        Self {
            particles: Vec::with_capacity(MAX_PARTICLES),
        }
    }

    /// Spawn new glyphs above `anchor` while `active`. Rate-limited by a
    /// per-frame roll so spawning stays frame-rate independent.
    pub fn spawn(&mut self, anchor: Vec2, active: bool, rng: &mut fastrand::Rng, dt: f32) {
        if !active || self.particles.len() >= MAX_PARTICLES {
            return;
        }
        if rng.f32() < SPAWN_RATE * dt {
            let jitter = Vec2::new(rng.f32() * 12.0 - 6.0, -rng.f32() * 6.0);
            self.particles.push(Particle {
                pos: anchor + jitter,
                vel: Vec2::new(rng.f32() * 16.0 - 8.0, -25.0 - rng.f32() * 15.0),
                lifetime: 1.5 + rng.f32(),
                max_lifetime: 2.5,
                size: SIZE_MIN + rng.f32() * (SIZE_MAX - SIZE_MIN),
            });
        }
    }

    /// Update all particles: drift up, age, remove dead.
    pub fn update(&mut self, dt: f32) {
        let mut i = 0;
        while i < self.particles.len() {
            let p = &mut self.particles[i];
            p.pos += p.vel * dt;
            p.vel.y -= 8.0 * dt; // gentle lift
            p.vel *= 1.0 - 1.5 * dt; // drag
            p.lifetime -= dt;

            if p.lifetime <= 0.0 {
                self.particles.swap_remove(i);
            } else {
                i += 1;
            }
        }
    }

    /// Append glyph instances to the render buffer.
    pub fn build_instances(&self, buf: &mut Vec<SpriteInstance>) {
        for p in &self.particles {
            // Ease out: fade faster near death.
            let frac = (p.lifetime / p.max_lifetime).clamp(0.0, 1.0);
            buf.push(SpriteInstance {
                position: p.pos.into(),
                half_size: [p.size, p.size],
                color: with_alpha(ZZZ_COLOR, frac * frac),
                frame: frames::ZZZ,
                rotation: 0.0,
            });
        }
    }

    pub fn count(&self) -> usize {
        self.particles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawns_only_while_active() {
        let mut rng = fastrand::Rng::with_seed(1);
        let mut zzz = ZzzParticles::new();

        for _ in 0..200 {
            zzz.spawn(Vec2::new(100.0, 100.0), false, &mut rng, 0.1);
        }
        assert_eq!(zzz.count(), 0);

        for _ in 0..200 {
            zzz.spawn(Vec2::new(100.0, 100.0), true, &mut rng, 0.1);
        }
        assert!(zzz.count() > 0);
        assert!(zzz.count() <= MAX_PARTICLES);
    }

    #[test]
    fn particles_expire_and_float_upward() {
        let mut rng = fastrand::Rng::with_seed(2);
        let mut zzz = ZzzParticles::new();
        while zzz.count() == 0 {
            zzz.spawn(Vec2::new(50.0, 50.0), true, &mut rng, 0.1);
        }

        let start_y = zzz.particles[0].pos.y;
        zzz.update(0.5);
        assert!(zzz.particles[0].pos.y < start_y);

        // Everything dies within the max lifetime.
        for _ in 0..30 {
            zzz.update(0.1);
        }
        assert_eq!(zzz.count(), 0);
    }

    #[test]
    fn instances_fade_with_age() {
        let mut rng = fastrand::Rng::with_seed(3);
        let mut zzz = ZzzParticles::new();
        while zzz.count() == 0 {
            zzz.spawn(Vec2::ZERO, true, &mut rng, 0.1);
        }

        let mut fresh = Vec::new();
        zzz.build_instances(&mut fresh);
        zzz.update(1.0);
        let mut aged = Vec::new();
        zzz.build_instances(&mut aged);

        if let (Some(f), Some(a)) = (fresh.first(), aged.first()) {
            assert!((a.color & 0xFF) < (f.color & 0xFF));
        }
    }
}
