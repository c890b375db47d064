use keel_linalg::Vec2f;

use crate::Rect;

/// A 2D ray: an origin point and a direction, extending infinitely far in that direction.
///
/// The direction does not have to be normalized; intersection distances are reported in units of
/// its length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Vec2f,
    dir: Vec2f,
}

impl Ray {
    pub fn new(origin: impl Into<Vec2f>, dir: impl Into<Vec2f>) -> Self {
        Self {
            origin: origin.into(),
            dir: dir.into(),
        }
    }

    #[inline]
    pub fn origin(&self) -> Vec2f {
        self.origin
    }

    #[inline]
    pub fn dir(&self) -> Vec2f {
        self.dir
    }

    /// Returns the point at distance `t` along the ray.
    #[inline]
    pub fn at(&self, t: f32) -> Vec2f {
        self.origin + self.dir * t
    }

    /// Computes where this ray enters `rect`, as a distance along the ray.
    ///
    /// Returns [`None`] when the ray misses the rectangle entirely or the rectangle lies behind
    /// the ray's origin. An origin inside the rectangle yields a distance of 0.
    pub fn intersect_rect(&self, rect: &Rect) -> Option<f32> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;

        let slabs = [
            (self.origin.x(), self.dir.x(), rect.min().x(), rect.max().x()),
            (self.origin.y(), self.dir.y(), rect.min().y(), rect.max().y()),
        ];
        for (origin, dir, min, max) in slabs {
            if dir == 0.0 {
                // Parallel to this slab; either always inside it or never.
                if origin < min || origin > max {
                    return None;
                }
            } else {
                let t0 = (min - origin) / dir;
                let t1 = (max - origin) / dir;
                let (t0, t1) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
                t_enter = t_enter.max(t0);
                t_exit = t_exit.min(t1);
            }
        }

        if t_enter > t_exit || t_exit < 0.0 {
            return None;
        }
        Some(t_enter.max(0.0))
    }

    /// Computes where this ray crosses the line segment from `a` to `b`, as a distance along the
    /// ray.
    ///
    /// Returns [`None`] when the ray misses the segment, the segment lies behind the ray's
    /// origin, or ray and segment are parallel.
    pub fn intersect_segment(&self, a: impl Into<Vec2f>, b: impl Into<Vec2f>) -> Option<f32> {
        let a = a.into();
        let edge = b.into() - a;
        let denom = self.dir.perp_dot(edge);
        if denom == 0.0 {
            return None;
        }

        let offset = a - self.origin;
        let t = offset.perp_dot(edge) / denom;
        let u = offset.perp_dot(self.dir) / denom;
        if t >= 0.0 && (0.0..=1.0).contains(&u) {
            Some(t)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use keel_linalg::{assert_approx_eq, vec2};

    use super::*;

    #[test]
    fn rect_entry_distance() {
        let rect = Rect::from_min_max([2.0, -1.0], [4.0, 1.0]);

        let hit = Ray::new([0.0, 0.0], [1.0, 0.0]);
        assert_eq!(hit.intersect_rect(&rect), Some(2.0));
        assert_eq!(hit.at(2.0), vec2(2.0, 0.0));

        // Unnormalized directions report distances in units of the direction's length.
        let fast = Ray::new([0.0, 0.0], [2.0, 0.0]);
        assert_eq!(fast.intersect_rect(&rect), Some(1.0));

        let miss = Ray::new([0.0, 5.0], [1.0, 0.0]);
        assert_eq!(miss.intersect_rect(&rect), None);

        // The rectangle is behind the origin.
        let behind = Ray::new([10.0, 0.0], [1.0, 0.0]);
        assert_eq!(behind.intersect_rect(&rect), None);
    }

    #[test]
    fn rect_origin_inside() {
        let rect = Rect::from_min_max([-1.0, -1.0], [1.0, 1.0]);
        let ray = Ray::new([0.0, 0.0], [0.3, -0.8]);
        assert_eq!(ray.intersect_rect(&rect), Some(0.0));
    }

    #[test]
    fn rect_diagonal() {
        let rect = Rect::from_min_max([1.0, 1.0], [3.0, 3.0]);
        let ray = Ray::new([0.0, 0.0], [1.0, 1.0]);
        assert_approx_eq!(ray.intersect_rect(&rect).unwrap(), 1.0, abs = 1e-6);

        // Same direction, but offset so the ray passes below the rectangle.
        let below = Ray::new([4.0, 0.0], [1.0, 1.0]);
        assert_eq!(below.intersect_rect(&rect), None);
    }

    #[test]
    fn rect_parallel_axis() {
        let rect = Rect::from_min_max([2.0, -1.0], [4.0, 1.0]);
        // Parallel to the X slab and inside it.
        let inside = Ray::new([0.0, 0.5], [1.0, 0.0]);
        assert_eq!(inside.intersect_rect(&rect), Some(2.0));
        // Parallel to the X slab but outside it.
        let outside = Ray::new([0.0, 2.0], [1.0, 0.0]);
        assert_eq!(outside.intersect_rect(&rect), None);
    }

    #[test]
    fn segment() {
        let ray = Ray::new([0.0, 0.0], [1.0, 0.0]);
        assert_eq!(ray.intersect_segment([2.0, -1.0], [2.0, 1.0]), Some(2.0));
        // Endpoints count.
        assert_eq!(ray.intersect_segment([2.0, 0.0], [2.0, 1.0]), Some(2.0));
        // Segment off to the side.
        assert_eq!(ray.intersect_segment([2.0, 1.0], [2.0, 3.0]), None);
        // Segment behind the origin.
        assert_eq!(ray.intersect_segment([-2.0, -1.0], [-2.0, 1.0]), None);
        // Parallel segment.
        assert_eq!(ray.intersect_segment([0.0, 1.0], [5.0, 1.0]), None);
    }
}
