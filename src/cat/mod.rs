pub mod drag;
pub mod sleep;

use glam::Vec2;
use instant::Instant;

use self::drag::{clamp_origin, DragSession};
use self::sleep::SleepTimer;

/// Cat bounding box in window pixels — used for clamping and hit tests.
pub const CAT_SIZE: Vec2 = Vec2::new(128.0, 96.0);

/// Breathing animation period while asleep (seconds).
const BREATHE_PERIOD: f32 = 3.0;
/// Breathing scale amplitude.
const BREATHE_AMOUNT: f32 = 0.03;

/// The one draggable cat.
///
/// Position is the top-left corner of the bounding box. All input arrives on
/// the winit event loop, so there is exactly one mutator at a time.
pub struct Cat {
    origin: Vec2,
    drag: Option<DragSession>,
    sleep: SleepTimer,
    spawned_at: Instant,
}

impl Cat {
    /// Spawn centered in the viewport, asleep.
    pub fn new(viewport: Vec2) -> Self {
        let centered = (viewport - CAT_SIZE) * 0.5;
        Self {
            origin: clamp_origin(centered, CAT_SIZE, viewport),
            drag: None,
            sleep: SleepTimer::new(),
            spawned_at: Instant::now(),
        }
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Center of the bounding box (sprites are positioned by center).
    pub fn center(&self) -> Vec2 {
        self.origin + CAT_SIZE * 0.5
    }

    pub fn is_sleeping(&self) -> bool {
        self.sleep.is_sleeping()
    }

    pub fn zzz_visible(&self) -> bool {
        self.sleep.zzz_visible()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.origin.x
            && point.x <= self.origin.x + CAT_SIZE.x
            && point.y >= self.origin.y
            && point.y <= self.origin.y + CAT_SIZE.y
    }

    /// Pointer or touch press. A press on the cat starts a drag, wakes it,
    /// and restarts the sleep countdown. Returns true if the press was
    /// claimed; presses elsewhere are ignored.
    pub fn pointer_down(&mut self, pointer: Vec2, now: Instant) -> bool {
        if !self.contains(pointer) {
            return false;
        }
        self.drag = Some(DragSession::begin(pointer, self.origin));
        self.sleep.interact(now);
        true
    }

    /// Pointer or touch motion. A no-op unless a drag session is active.
    pub fn pointer_move(&mut self, pointer: Vec2, viewport: Vec2) {
        if let Some(drag) = self.drag {
            self.origin = drag.origin_for(pointer, CAT_SIZE, viewport);
        }
    }

    /// Release ends the drag session. The sleep timer alone decides when the
    /// cat dozes off again.
    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// Re-clamp after a viewport resize so the cat never sits off-screen.
    pub fn clamp_to(&mut self, viewport: Vec2) {
        self.origin = clamp_origin(self.origin, CAT_SIZE, viewport);
    }

    /// Advance the sleep timer. Call once per frame.
    pub fn update(&mut self, now: Instant) {
        self.sleep.poll(now);
    }

    /// Vertical body scale for the breathing animation (1.0 when awake).
    pub fn breathe_scale(&self, now: Instant) -> f32 {
        if !self.is_sleeping() {
            return 1.0;
        }
        let t = now.duration_since(self.spawned_at).as_secs_f32();
        1.0 + (t * std::f32::consts::TAU / BREATHE_PERIOD).sin() * BREATHE_AMOUNT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn spawns_centered_and_asleep() {
        let cat = Cat::new(VIEWPORT);
        assert_eq!(cat.center(), Vec2::new(400.0, 300.0));
        assert!(cat.is_sleeping());
        assert!(cat.zzz_visible());
        assert!(!cat.is_dragging());
    }

    #[test]
    fn spawn_in_tiny_viewport_pins_to_origin() {
        let cat = Cat::new(Vec2::new(50.0, 40.0));
        assert_eq!(cat.origin(), Vec2::ZERO);
    }

    #[test]
    fn press_on_cat_starts_drag_and_wakes() {
        let now = Instant::now();
        let mut cat = Cat::new(VIEWPORT);

        assert!(cat.pointer_down(cat.center(), now));
        assert!(cat.is_dragging());
        assert!(!cat.is_sleeping());
        assert!(!cat.zzz_visible());
    }

    #[test]
    fn press_outside_cat_is_ignored() {
        let now = Instant::now();
        let mut cat = Cat::new(VIEWPORT);

        assert!(!cat.pointer_down(Vec2::new(5.0, 5.0), now));
        assert!(!cat.is_dragging());
        assert!(cat.is_sleeping());
    }

    #[test]
    fn drag_moves_cat_and_release_ends_session() {
        let now = Instant::now();
        let mut cat = Cat::new(VIEWPORT);
        let grab = cat.origin() + Vec2::new(10.0, 10.0);

        assert!(cat.pointer_down(grab, now));
        cat.pointer_move(grab + Vec2::new(50.0, -20.0), VIEWPORT);
        assert_eq!(cat.origin(), Vec2::new(386.0, 232.0));

        cat.pointer_up();
        assert!(!cat.is_dragging());

        // Motion without a session does nothing.
        cat.pointer_move(Vec2::new(0.0, 0.0), VIEWPORT);
        assert_eq!(cat.origin(), Vec2::new(386.0, 232.0));
    }

    #[test]
    fn drag_clamps_to_viewport_corners() {
        let now = Instant::now();
        let mut cat = Cat::new(VIEWPORT);

        assert!(cat.pointer_down(cat.origin(), now)); // grab the top-left corner
        cat.pointer_move(Vec2::new(-500.0, -500.0), VIEWPORT);
        assert_eq!(cat.origin(), Vec2::ZERO);

        cat.pointer_move(Vec2::new(5000.0, 5000.0), VIEWPORT);
        assert_eq!(cat.origin(), VIEWPORT - CAT_SIZE);
    }

    #[test]
    fn resize_reclamps_position() {
        let now = Instant::now();
        let mut cat = Cat::new(VIEWPORT);
        assert!(cat.pointer_down(cat.origin(), now));
        cat.pointer_move(Vec2::new(5000.0, 5000.0), VIEWPORT);
        cat.pointer_up();

        let smaller = Vec2::new(400.0, 300.0);
        cat.clamp_to(smaller);
        assert_eq!(cat.origin(), smaller - CAT_SIZE);
    }

    #[test]
    fn sleeps_again_after_idle_timeout() {
        let t0 = Instant::now();
        let mut cat = Cat::new(VIEWPORT);

        assert!(cat.pointer_down(cat.center(), t0));
        cat.pointer_up();

        cat.update(t0 + Duration::from_millis(4900));
        assert!(!cat.is_sleeping());

        cat.update(t0 + Duration::from_millis(5000));
        assert!(cat.is_sleeping());
        assert!(!cat.zzz_visible());

        cat.update(t0 + Duration::from_millis(6000));
        assert!(cat.zzz_visible());
    }

    #[test]
    fn breathing_only_while_asleep() {
        let now = Instant::now();
        let mut cat = Cat::new(VIEWPORT);
        // Asleep: scale oscillates around 1.0 within the amplitude.
        let s = cat.breathe_scale(now + Duration::from_millis(700));
        assert!((s - 1.0).abs() <= BREATHE_AMOUNT + 1e-6);

        cat.pointer_down(cat.center(), now);
        assert_eq!(cat.breathe_scale(now), 1.0);
    }
}
