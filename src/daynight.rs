//! Day/night cycle based on the local clock.
//! Provides the sky gradient palette and a night factor for stars and moon.

use chrono::{Local, Timelike};

// Palette endpoints, linear RGB in 0..1. Day is a pale blue-to-lavender
// gradient, night a deep indigo-to-purple one.
const DAY_TOP: [f32; 3] = [0.86, 0.92, 1.00];
const DAY_BOTTOM: [f32; 3] = [0.91, 0.84, 1.00];
const DAY_SURFACE: [f32; 3] = [0.91, 0.84, 1.00];
const NIGHT_TOP: [f32; 3] = [0.19, 0.18, 0.51];
const NIGHT_BOTTOM: [f32; 3] = [0.42, 0.13, 0.66];
const NIGHT_SURFACE: [f32; 3] = [0.42, 0.13, 0.66];

/// Time-of-day state computed from the system clock.
#[derive(Debug, Clone, Copy)]
pub struct DayNightState {
    /// Current hour (0.0-24.0, with fractional minutes).
    pub hour: f32,
    /// 0.0 = full day, 1.0 = full night. Ramps smoothly through dawn/dusk.
    pub night: f32,
    /// Sky gradient top color.
    pub sky_top: [f32; 3],
    /// Sky gradient bottom color.
    pub sky_bottom: [f32; 3],
    /// Ground strip color.
    pub surface: [f32; 3],
}

impl DayNightState {
    pub fn new() -> Self {
        Self::from_hour(local_hour())
    }

    /// Refresh from the system clock. Call once per frame or less.
    pub fn update(&mut self) {
        *self = Self::from_hour(local_hour());
    }

    /// Palette for a given hour of day. Split out so tests can drive it.
    pub fn from_hour(hour: f32) -> Self {
        let night = compute_night(hour);
        Self {
            hour,
            night,
            sky_top: lerp3(DAY_TOP, NIGHT_TOP, night),
            sky_bottom: lerp3(DAY_BOTTOM, NIGHT_BOTTOM, night),
            surface: lerp3(DAY_SURFACE, NIGHT_SURFACE, night),
        }
    }

    pub fn is_night(&self) -> bool {
        self.night > 0.5
    }
}

fn local_hour() -> f32 {
    let now = Local::now();
    now.hour() as f32 + now.minute() as f32 / 60.0
}

/// Smooth hermite interpolation.
fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Lerp between two [f32; 3] arrays.
fn lerp3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

/// Night factor for an hour of day. Night before ~6h and after ~18h, with
/// smooth two-hour dawn (5-7h) and dusk (17-19h) ramps centered on the
/// boundaries instead of a hard snap.
fn compute_night(hour: f32) -> f32 {
    if hour < 5.0 {
        1.0
    } else if hour < 7.0 {
        1.0 - smoothstep(5.0, 7.0, hour)
    } else if hour < 17.0 {
        0.0
    } else if hour < 19.0 {
        smoothstep(17.0, 19.0, hour)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midnight_is_night_noon_is_day() {
        assert_eq!(compute_night(0.0), 1.0);
        assert_eq!(compute_night(12.0), 0.0);
        assert_eq!(compute_night(23.5), 1.0);
    }

    #[test]
    fn dawn_and_dusk_ramp_through_the_boundaries() {
        let dawn = compute_night(6.0);
        assert!(dawn > 0.0 && dawn < 1.0);
        let dusk = compute_night(18.0);
        assert!(dusk > 0.0 && dusk < 1.0);

        // Monotonic within each ramp.
        assert!(compute_night(5.5) > compute_night(6.5));
        assert!(compute_night(17.5) < compute_night(18.5));
    }

    #[test]
    fn palette_matches_the_night_factor() {
        let noon = DayNightState::from_hour(12.0);
        assert_eq!(noon.sky_top, DAY_TOP);
        assert!(!noon.is_night());

        let midnight = DayNightState::from_hour(0.0);
        assert_eq!(midnight.sky_top, NIGHT_TOP);
        assert!(midnight.is_night());

        let dusk = DayNightState::from_hour(18.0);
        for c in 0..3 {
            let lo = DAY_TOP[c].min(NIGHT_TOP[c]);
            let hi = DAY_TOP[c].max(NIGHT_TOP[c]);
            assert!(dusk.sky_top[c] >= lo && dusk.sky_top[c] <= hi);
        }
    }
}
