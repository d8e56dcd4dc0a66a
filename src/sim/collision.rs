//! Collision detection between simple bodies
//!
//! Entities don't share a base type. Anything with a position and a shape
//! implements [`Body`] and goes through the single [`overlaps`] routine.

use glam::Vec2;

/// Collision proxy of a body, centred on its position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    /// Axis-aligned rectangle given by half extents
    Rect { half_extents: Vec2 },
}

/// Anything that can take part in a collision check
pub trait Body {
    /// Centre of the body in playfield coordinates (y up)
    fn position(&self) -> Vec2;
    fn shape(&self) -> Shape;
}

/// Check whether two bodies overlap. Touching edges do not count.
pub fn overlaps(a: &impl Body, b: &impl Body) -> bool {
    match (a.shape(), b.shape()) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            circle_circle(a.position(), ra, b.position(), rb)
        }
        (Shape::Circle { radius }, Shape::Rect { half_extents }) => {
            circle_rect(a.position(), radius, b.position(), half_extents)
        }
        (Shape::Rect { half_extents }, Shape::Circle { radius }) => {
            circle_rect(b.position(), radius, a.position(), half_extents)
        }
        (Shape::Rect { half_extents: ha }, Shape::Rect { half_extents: hb }) => {
            let delta = (a.position() - b.position()).abs();
            delta.x < ha.x + hb.x && delta.y < ha.y + hb.y
        }
    }
}

#[inline]
fn circle_circle(pa: Vec2, ra: f32, pb: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    pa.distance_squared(pb) < reach * reach
}

/// Closest point on the rectangle to the circle centre decides it
#[inline]
fn circle_rect(center: Vec2, radius: f32, rect_center: Vec2, half_extents: Vec2) -> bool {
    let min = rect_center - half_extents;
    let max = rect_center + half_extents;
    let closest = center.clamp(min, max);
    center.distance_squared(closest) < radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe(Vec2, Shape);

    impl Body for Probe {
        fn position(&self) -> Vec2 {
            self.0
        }
        fn shape(&self) -> Shape {
            self.1
        }
    }

    fn circle(x: f32, y: f32, radius: f32) -> Probe {
        Probe(Vec2::new(x, y), Shape::Circle { radius })
    }

    fn rect(x: f32, y: f32, hw: f32, hh: f32) -> Probe {
        Probe(Vec2::new(x, y), Shape::Rect { half_extents: Vec2::new(hw, hh) })
    }

    #[test]
    fn test_circle_rect_side_hit() {
        // Rect spans x 90..110, circle of radius 10 centred at 85 reaches 95
        assert!(overlaps(&circle(85.0, 0.0, 10.0), &rect(100.0, 0.0, 10.0, 50.0)));
        assert!(!overlaps(&circle(75.0, 0.0, 10.0), &rect(100.0, 0.0, 10.0, 50.0)));
    }

    #[test]
    fn test_circle_rect_corner_is_round() {
        // Diagonal to the corner at (110, 50): distance ~8.5 > 6
        assert!(!overlaps(&circle(116.0, 56.0, 6.0), &rect(100.0, 0.0, 10.0, 50.0)));
        assert!(overlaps(&circle(113.0, 53.0, 6.0), &rect(100.0, 0.0, 10.0, 50.0)));
    }

    #[test]
    fn test_circle_inside_rect() {
        assert!(overlaps(&circle(100.0, 0.0, 1.0), &rect(100.0, 0.0, 10.0, 50.0)));
    }

    #[test]
    fn test_argument_order_does_not_matter() {
        let c = circle(85.0, 0.0, 10.0);
        let r = rect(100.0, 0.0, 10.0, 50.0);
        assert_eq!(overlaps(&c, &r), overlaps(&r, &c));
    }

    #[test]
    fn test_circle_circle() {
        assert!(overlaps(&circle(0.0, 0.0, 5.0), &circle(9.0, 0.0, 5.0)));
        assert!(!overlaps(&circle(0.0, 0.0, 5.0), &circle(10.0, 0.0, 5.0)));
    }

    #[test]
    fn test_rect_rect() {
        assert!(overlaps(&rect(0.0, 0.0, 5.0, 5.0), &rect(9.0, 9.0, 5.0, 5.0)));
        assert!(!overlaps(&rect(0.0, 0.0, 5.0, 5.0), &rect(10.0, 0.0, 5.0, 5.0)));
    }
}
