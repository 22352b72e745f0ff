use cgmath::Vector2;

/// Rectangular region the particles live in, with the origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether a circle lies fully inside the arena (touching an edge counts).
    pub fn contains_circle(&self, center: Vector2<f32>, radius: f32) -> bool {
        radius <= center.x
            && center.x <= self.width - radius
            && radius <= center.y
            && center.y <= self.height - radius
    }

    /// Moves a circle's center into the arena.
    pub fn clamp_center(&self, center: Vector2<f32>, radius: f32) -> Vector2<f32> {
        cgmath::vec2(
            clamp_axis(center.x, radius, self.width),
            clamp_axis(center.y, radius, self.height),
        )
    }
}

/// Clamps a coordinate into `[radius, extent - radius]`.
///
/// Unlike `f32::clamp` this never panics: when the range is empty the
/// upper bound wins.
pub(crate) fn clamp_axis(value: f32, radius: f32, extent: f32) -> f32 {
    value.max(radius).min(extent - radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pulls_center_inside() {
        let arena = Arena::new(200.0, 100.0);
        let clamped = arena.clamp_center(cgmath::vec2(-5.0, 250.0), 10.0);
        assert_eq!(clamped, cgmath::vec2(10.0, 90.0));
        assert!(arena.contains_circle(clamped, 10.0));
    }

    #[test]
    fn edges_count_as_inside() {
        let arena = Arena::new(200.0, 100.0);
        assert!(arena.contains_circle(cgmath::vec2(190.0, 10.0), 10.0));
        assert!(!arena.contains_circle(cgmath::vec2(190.5, 10.0), 10.0));
    }

    #[test]
    fn degenerate_arena_does_not_panic() {
        assert_eq!(clamp_axis(3.0, 10.0, 0.0), -10.0);
        assert_eq!(clamp_axis(3.0, 10.0, 15.0), 5.0);
    }
}
