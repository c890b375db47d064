use std::fmt;

use keel_linalg::{approx::ApproxEq, vec3, Vec3f};

/// A 3D axis-aligned bounding box, stored as its minimum and maximum corner.
///
/// Boxes are allowed to have zero extent along any axis. Negative extents are not allowed.
#[derive(Clone, Copy, PartialEq)]
pub struct Aabb {
    min: Vec3f,
    max: Vec3f,
}

impl Aabb {
    /// Creates a bounding box from its minimum and maximum corner.
    ///
    /// # Panics
    ///
    /// Panics if `min` exceeds `max` in any dimension.
    pub fn from_min_max(min: impl Into<Vec3f>, max: impl Into<Vec3f>) -> Self {
        let (min, max) = (min.into(), max.into());
        assert!(
            min.x() <= max.x() && min.y() <= max.y() && min.z() <= max.z(),
            "min={min:?}, max={max:?}",
        );
        Self { min, max }
    }

    /// Creates a bounding box of the given size, centered on `center`.
    pub fn from_center(center: impl Into<Vec3f>, size: impl Into<Vec3f>) -> Self {
        let center = center.into();
        let half = size.into() * 0.5;
        Self::from_min_max(center - half, center + half)
    }

    /// Computes the bounding box that encompasses `points`.
    ///
    /// Returns [`None`] if `points` is an empty iterator.
    pub fn bounding<I: IntoIterator<Item = T>, T: Into<Vec3f>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();

        let first: Vec3f = iter.next()?.into();
        let (mut min, mut max) = (first, first);

        for pt in iter {
            let pt = pt.into();
            min = min.min(pt);
            max = max.max(pt);
        }

        Some(Self { min, max })
    }

    #[inline]
    pub fn min(&self) -> Vec3f {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Vec3f {
        self.max
    }

    #[inline]
    pub fn center(&self) -> Vec3f {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec3f {
        self.max - self.min
    }

    pub fn volume(&self) -> f32 {
        let size = self.size();
        size.x() * size.y() * size.z()
    }

    pub fn surface_area(&self) -> f32 {
        let size = self.size();
        2.0 * (size.x() * size.y() + size.y() * size.z() + size.z() * size.x())
    }

    /// Grows (or, for a negative margin, shrinks) the box by `margin` on every side.
    ///
    /// # Panics
    ///
    /// Panics if shrinking would make any extent negative.
    #[must_use]
    pub fn expanded(&self, margin: f32) -> Self {
        let margin = vec3(margin, margin, margin);
        Self::from_min_max(self.min - margin, self.max + margin)
    }

    /// Computes the smallest box containing both `self` and `other`.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Computes the intersection of `self` and `other`.
    ///
    /// Returns [`None`] when the boxes do not overlap. Boxes that merely touch yield a
    /// zero-volume intersection, not [`None`].
    pub fn intersection(&self, other: &Aabb) -> Option<Aabb> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        if min.x() > max.x() || min.y() > max.y() || min.z() > max.z() {
            return None;
        }

        Some(Self { min, max })
    }

    pub fn contains_point(&self, point: impl Into<Vec3f>) -> bool {
        let pt: Vec3f = point.into();
        self.min.x() <= pt.x()
            && self.min.y() <= pt.y()
            && self.min.z() <= pt.z()
            && self.max.x() >= pt.x()
            && self.max.y() >= pt.y()
            && self.max.z() >= pt.z()
    }
}

impl fmt::Debug for Aabb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Aabb @ {:?}..{:?}", self.min, self.max)
    }
}

impl ApproxEq for Aabb {
    type Tolerance = f32;

    fn abs_diff_eq(&self, other: &Self, abs_tolerance: Self::Tolerance) -> bool {
        self.min.abs_diff_eq(&other.min, abs_tolerance)
            && self.max.abs_diff_eq(&other.max, abs_tolerance)
    }

    fn rel_diff_eq(&self, other: &Self, rel_tolerance: Self::Tolerance) -> bool {
        self.min.rel_diff_eq(&other.min, rel_tolerance)
            && self.max.rel_diff_eq(&other.max, rel_tolerance)
    }
}
