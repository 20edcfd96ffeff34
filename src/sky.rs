use glam::Vec2;

use crate::daynight::DayNightState;
use crate::render::instance::{frames, pack_rgba, with_alpha, SpriteInstance};

/// One star per this many square pixels of viewport area.
const STAR_AREA_DIVISOR: f32 = 10_000.0;
/// Star radius range in pixels.
const STAR_RADIUS_MIN: f32 = 1.5;
const STAR_RADIUS_MAX: f32 = 4.5;
/// Base star opacity range.
const STAR_OPACITY_MIN: f32 = 0.25;
const STAR_OPACITY_MAX: f32 = 0.75;
/// Twinkle period range in seconds.
const TWINKLE_MIN: f32 = 2.0;
const TWINKLE_MAX: f32 = 5.0;

/// Cloud bob period in seconds and amplitude in pixels.
const CLOUD_BOB_PERIOD: f32 = 6.0;
const CLOUD_BOB_AMPLITUDE: f32 = 8.0;

/// Sun/moon disc radii in pixels.
const SUN_RADIUS: f32 = 40.0;
const MOON_RADIUS: f32 = 32.0;
/// Inset of the sun/moon from the window corner.
const DISC_INSET: f32 = 80.0;

/// A single background star. Position is stored as a viewport fraction so
/// stars keep their relative placement between regenerations.
#[derive(Debug, Clone, Copy)]
struct Star {
    frac: Vec2,
    radius: f32,
    opacity: f32,
    twinkle_period: f32,
    twinkle_phase: f32,
}

/// Fixed cloud placements: fractional position plus half-extents in pixels,
/// and a bob phase offset so they don't float in lockstep.
const CLOUDS: [(f32, f32, f32, f32, f32); 3] = [
    (0.10, 0.15, 48.0, 16.0, 0.5),
    (0.05, 0.18, 32.0, 12.0, 1.2),
    (0.85, 0.25, 40.0, 14.0, 0.7),
];

/// Ambient background: star field, clouds, sun and moon.
///
/// Stars only show at night, clouds only during the day; both fade through
/// dawn and dusk via the day/night factor.
pub struct Sky {
    stars: Vec<Star>,
    rng: fastrand::Rng,
    elapsed: f32,
}

impl Sky {
    pub fn new(viewport: Vec2) -> Self {
        let mut sky = Self {
            stars: Vec::new(),
            rng: fastrand::Rng::new(),
            elapsed: 0.0,
        };
        sky.regenerate(viewport);
        sky
    }

    /// Rebuild the star field for a new viewport size. One star per
    /// 10,000 px² of window area.
    pub fn regenerate(&mut self, viewport: Vec2) {
        let count = ((viewport.x * viewport.y) / STAR_AREA_DIVISOR).floor() as usize;
        self.stars.clear();
        self.stars.reserve(count);
        for _ in 0..count {
            self.stars.push(Star {
                frac: Vec2::new(self.rng.f32(), self.rng.f32()),
                radius: STAR_RADIUS_MIN + self.rng.f32() * (STAR_RADIUS_MAX - STAR_RADIUS_MIN),
                opacity: STAR_OPACITY_MIN + self.rng.f32() * (STAR_OPACITY_MAX - STAR_OPACITY_MIN),
                twinkle_period: TWINKLE_MIN + self.rng.f32() * (TWINKLE_MAX - TWINKLE_MIN),
                twinkle_phase: self.rng.f32() * std::f32::consts::TAU,
            });
        }
    }

    /// Advance the twinkle/bob clock. Call once per frame.
    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn star_count(&self) -> usize {
        self.stars.len()
    }

    /// Append this frame's background sprites. Draw order: stars, clouds,
    /// then the sun/moon disc.
    pub fn build_instances(
        &self,
        day: &DayNightState,
        viewport: Vec2,
        buf: &mut Vec<SpriteInstance>,
    ) {
        let night = day.night;

        if night > 0.01 {
            let white = pack_rgba(255, 255, 255, 255);
            for star in &self.stars {
                let twinkle = 0.6
                    + 0.4
                        * (self.elapsed * std::f32::consts::TAU / star.twinkle_period
                            + star.twinkle_phase)
                            .sin();
                let alpha = star.opacity * twinkle * night;
                buf.push(SpriteInstance {
                    position: (star.frac * viewport).into(),
                    half_size: [star.radius, star.radius],
                    color: with_alpha(white, alpha),
                    frame: frames::STAR,
                    rotation: 0.0,
                });
            }
        }

        if night < 0.99 {
            let cloud_white = pack_rgba(255, 255, 255, 204);
            for &(fx, fy, hw, hh, phase) in &CLOUDS {
                let bob = (self.elapsed * std::f32::consts::TAU / CLOUD_BOB_PERIOD + phase)
                    .sin()
                    * CLOUD_BOB_AMPLITUDE;
                buf.push(SpriteInstance {
                    position: [fx * viewport.x, fy * viewport.y + bob],
                    half_size: [hw, hh],
                    color: with_alpha(cloud_white, 1.0 - night),
                    frame: frames::CLOUD,
                    rotation: 0.0,
                });
            }
        }

        // Sun top-left by day, moon top-right by night.
        if night < 0.99 {
            buf.push(SpriteInstance {
                position: [DISC_INSET, DISC_INSET],
                half_size: [SUN_RADIUS, SUN_RADIUS],
                color: with_alpha(pack_rgba(253, 224, 71, 255), 1.0 - night),
                frame: frames::SUN,
                rotation: 0.0,
            });
        }
        if night > 0.01 {
            buf.push(SpriteInstance {
                position: [viewport.x - DISC_INSET, DISC_INSET],
                half_size: [MOON_RADIUS, MOON_RADIUS],
                color: with_alpha(pack_rgba(229, 231, 235, 255), night),
                frame: frames::MOON,
                rotation: 0.0,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daynight::DayNightState;

    #[test]
    fn star_count_scales_with_viewport_area() {
        let sky = Sky::new(Vec2::new(800.0, 600.0));
        assert_eq!(sky.star_count(), 48);

        let mut sky = sky;
        sky.regenerate(Vec2::new(1920.0, 1080.0));
        assert_eq!(sky.star_count(), 207);
    }

    #[test]
    fn stars_land_inside_the_viewport() {
        let viewport = Vec2::new(1280.0, 800.0);
        let sky = Sky::new(viewport);
        let mut buf = Vec::new();
        sky.build_instances(&DayNightState::from_hour(0.0), viewport, &mut buf);

        let stars: Vec<_> = buf
            .iter()
            .filter(|i| i.frame == frames::STAR)
            .collect();
        assert_eq!(stars.len(), sky.star_count());
        for s in stars {
            assert!(s.position[0] >= 0.0 && s.position[0] <= viewport.x);
            assert!(s.position[1] >= 0.0 && s.position[1] <= viewport.y);
        }
    }

    #[test]
    fn night_shows_stars_and_moon_day_shows_clouds_and_sun() {
        let viewport = Vec2::new(800.0, 600.0);
        let sky = Sky::new(viewport);

        let mut night_buf = Vec::new();
        sky.build_instances(&DayNightState::from_hour(0.0), viewport, &mut night_buf);
        assert!(night_buf.iter().any(|i| i.frame == frames::STAR));
        assert!(night_buf.iter().any(|i| i.frame == frames::MOON));
        assert!(!night_buf.iter().any(|i| i.frame == frames::CLOUD));
        assert!(!night_buf.iter().any(|i| i.frame == frames::SUN));

        let mut day_buf = Vec::new();
        sky.build_instances(&DayNightState::from_hour(12.0), viewport, &mut day_buf);
        assert!(!day_buf.iter().any(|i| i.frame == frames::STAR));
        assert!(!day_buf.iter().any(|i| i.frame == frames::MOON));
        assert_eq!(
            day_buf.iter().filter(|i| i.frame == frames::CLOUD).count(),
            3
        );
        assert!(day_buf.iter().any(|i| i.frame == frames::SUN));
    }
}
