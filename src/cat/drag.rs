use glam::Vec2;

/// Clamp one axis of an entity origin to `[0, viewport_dim - entity_dim]`.
///
/// When the entity is larger than the viewport the valid range is empty;
/// the axis pins to 0 instead of producing an inverted min > max range.
pub fn clamp_axis(value: f32, entity_dim: f32, viewport_dim: f32) -> f32 {
    let max = viewport_dim - entity_dim;
    if max <= 0.0 {
        0.0
    } else {
        value.clamp(0.0, max)
    }
}

/// Clamp a top-left origin so an entity of `size` stays fully inside the viewport.
pub fn clamp_origin(origin: Vec2, size: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(
        clamp_axis(origin.x, size.x, viewport.x),
        clamp_axis(origin.y, size.y, viewport.y),
    )
}

/// An in-progress drag: where inside the entity the pointer grabbed it.
///
/// Created on press, consumed on every move, discarded on release.
#[derive(Debug, Clone, Copy)]
pub struct DragSession {
    grab_offset: Vec2,
}

impl DragSession {
    /// Begin a drag. `pointer` and `origin` are both in window pixels.
    pub fn begin(pointer: Vec2, origin: Vec2) -> Self {
        Self {
            grab_offset: pointer - origin,
        }
    }

    /// New entity origin for a pointer position, clamped to the viewport.
    pub fn origin_for(&self, pointer: Vec2, size: Vec2, viewport: Vec2) -> Vec2 {
        clamp_origin(pointer - self.grab_offset, size, viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_keeps_entity_on_screen() {
        // 800x600 viewport, 100x100 entity => origin range [0, 700] x [0, 500].
        assert_eq!(clamp_axis(350.0, 100.0, 800.0), 350.0);
        assert_eq!(clamp_axis(-25.0, 100.0, 800.0), 0.0);
        assert_eq!(clamp_axis(750.0, 100.0, 800.0), 700.0);
        assert_eq!(clamp_axis(999.0, 100.0, 600.0), 500.0);
    }

    #[test]
    fn oversized_entity_pins_to_zero() {
        // Entity wider than the viewport: the range is empty, not inverted.
        assert_eq!(clamp_axis(50.0, 1000.0, 800.0), 0.0);
        assert_eq!(clamp_axis(-50.0, 1000.0, 800.0), 0.0);
        // Exactly viewport-sized is also a degenerate range.
        assert_eq!(clamp_axis(10.0, 800.0, 800.0), 0.0);
    }

    #[test]
    fn drag_follows_pointer_minus_grab_offset() {
        let size = Vec2::new(100.0, 100.0);
        let viewport = Vec2::new(800.0, 600.0);

        // Grab at (50,50) with the entity at the origin.
        let drag = DragSession::begin(Vec2::new(50.0, 50.0), Vec2::ZERO);

        assert_eq!(
            drag.origin_for(Vec2::new(60.0, 60.0), size, viewport),
            Vec2::new(10.0, 10.0)
        );
        assert_eq!(
            drag.origin_for(Vec2::new(-100.0, -100.0), size, viewport),
            Vec2::ZERO
        );
        assert_eq!(
            drag.origin_for(Vec2::new(900.0, 900.0), size, viewport),
            Vec2::new(700.0, 500.0)
        );
    }

    #[test]
    fn drag_positions_always_within_bounds() {
        let size = Vec2::new(100.0, 100.0);
        let viewport = Vec2::new(800.0, 600.0);
        let drag = DragSession::begin(Vec2::new(30.0, 70.0), Vec2::new(10.0, 20.0));

        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..500 {
            let pointer = Vec2::new(
                rng.f32() * 4000.0 - 2000.0,
                rng.f32() * 4000.0 - 2000.0,
            );
            let origin = drag.origin_for(pointer, size, viewport);
            assert!(origin.x >= 0.0 && origin.x <= viewport.x - size.x);
            assert!(origin.y >= 0.0 && origin.y <= viewport.y - size.y);
        }
    }
}
