use std::fmt;

use keel_linalg::{approx::ApproxEq, vec2, Vec2f};

/// An axis-aligned rectangle, stored as its minimum and maximum corner.
///
/// Rectangles are allowed to have zero width and/or height. Negative dimensions are not allowed.
#[derive(Clone, Copy, PartialEq)]
pub struct Rect {
    min: Vec2f,
    max: Vec2f,
}

impl Rect {
    /// Creates a rectangle from its minimum (top-left) and maximum (bottom-right) corner.
    ///
    /// # Panics
    ///
    /// Panics if `min` exceeds `max` in any dimension.
    pub fn from_min_max(min: impl Into<Vec2f>, max: impl Into<Vec2f>) -> Self {
        let (min, max) = (min.into(), max.into());
        assert!(
            min.x() <= max.x() && min.y() <= max.y(),
            "min={min:?}, max={max:?}",
        );
        Self { min, max }
    }

    /// Creates a rectangle extending outwards from a center point.
    #[inline]
    pub fn from_center(x_center: f32, y_center: f32, width: f32, height: f32) -> Self {
        let half = vec2(width, height) * 0.5;
        let center = vec2(x_center, y_center);
        Self::from_min_max(center - half, center + half)
    }

    /// Creates a rectangle extending downwards and right from a point.
    #[inline]
    pub fn from_top_left(top_left_x: f32, top_left_y: f32, width: f32, height: f32) -> Self {
        let min = vec2(top_left_x, top_left_y);
        Self::from_min_max(min, min + vec2(width, height))
    }

    /// Computes the (axis-aligned) bounding rectangle that encompasses `points`.
    ///
    /// Returns [`None`] if `points` is an empty iterator.
    pub fn bounding<I: IntoIterator<Item = T>, T: Into<Vec2f>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();

        let first: Vec2f = iter.next()?.into();
        let (mut min, mut max) = (first, first);

        for pt in iter {
            let pt = pt.into();
            min = min.min(pt);
            max = max.max(pt);
        }

        Some(Self { min, max })
    }

    /// Returns the minimum (top-left) corner.
    #[inline]
    pub fn min(&self) -> Vec2f {
        self.min
    }

    /// Returns the maximum (bottom-right) corner.
    #[inline]
    pub fn max(&self) -> Vec2f {
        self.max
    }

    #[inline]
    pub fn center(&self) -> Vec2f {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec2f {
        self.max - self.min
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x() - self.min.x()
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y() - self.min.y()
    }

    /// Returns the area covered by `self`.
    #[inline]
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Returns the corners in clockwise order, starting at the minimum corner.
    pub fn corners(&self) -> [Vec2f; 4] {
        [
            self.min,
            vec2(self.max.x(), self.min.y()),
            self.max,
            vec2(self.min.x(), self.max.y()),
        ]
    }

    /// Returns this rectangle moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: impl Into<Vec2f>) -> Self {
        let offset = offset.into();
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Grows (or, for negative margins, shrinks) each side of this rectangle.
    ///
    /// # Panics
    ///
    /// Panics if shrinking would make the rectangle's width or height negative.
    #[must_use]
    pub fn inflated(&self, x_margin: f32, y_margin: f32) -> Self {
        let margin = vec2(x_margin, y_margin);
        Self::from_min_max(self.min - margin, self.max + margin)
    }

    /// Scales the width and height of this rectangle by the given amount.
    ///
    /// The center position of the rectangle remains the same.
    #[must_use]
    pub fn scaled_about_center(&self, scale: f32) -> Self {
        let center = self.center();
        let half = self.size() * (scale * 0.5);
        Self::from_min_max(center - half, center + half)
    }

    /// Computes the smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Computes the intersection of `self` and `other`.
    ///
    /// Returns [`None`] when the intersection is empty (ie. the rectangles do not overlap).
    /// Rectangles that merely touch yield a zero-area intersection, not [`None`].
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        if min.x() > max.x() || min.y() > max.y() {
            return None;
        }

        Some(Self { min, max })
    }

    /// Returns `true` if `self` and `other` cover any common area or touch.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.intersection(other).is_some()
    }

    pub fn contains_point(&self, point: impl Into<Vec2f>) -> bool {
        let pt: Vec2f = point.into();
        self.min.x() <= pt.x()
            && self.min.y() <= pt.y()
            && self.max.x() >= pt.x()
            && self.max.y() >= pt.y()
    }

    /// Returns `true` if `other` lies fully inside `self`.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rect @ ({},{})..({},{})",
            self.min.x(),
            self.min.y(),
            self.max.x(),
            self.max.y(),
        )
    }
}

impl ApproxEq for Rect {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_agree() {
        assert_eq!(
            Rect::from_center(1.0, 1.0, 2.0, 4.0),
            Rect::from_min_max([0.0, -1.0], [2.0, 3.0]),
        );
        assert_eq!(
            Rect::from_top_left(0.0, -1.0, 2.0, 4.0),
            Rect::from_min_max([0.0, -1.0], [2.0, 3.0]),
        );
    }

    #[test]
    fn accessors() {
        let rect = Rect::from_min_max([-1.0, 0.0], [3.0, 2.0]);
        assert_eq!(rect.center(), vec2(1.0, 1.0));
        assert_eq!(rect.size(), vec2(4.0, 2.0));
        assert_eq!(rect.width(), 4.0);
        assert_eq!(rect.height(), 2.0);
        assert_eq!(rect.area(), 8.0);
    }

    #[test]
    fn contains_point() {
        let rect = Rect::from_top_left(-5.0, 5.0, 10.0, 5.0);
        assert!(rect.contains_point([-5.0, 5.0]));
        assert!(rect.contains_point([-5.0 + 9.0, 5.0 + 4.0]));
        assert!(!rect.contains_point([-5.0 + 11.0, 5.0 + 4.0]));
        assert!(!rect.contains_point([-5.0 + 9.0, 5.0 + 5.0 + 1.0]));

        let empty = Rect::from_center(0.0, 0.0, 0.0, 0.0);
        assert!(!empty.contains_point([0.0025, 0.0]));
        assert!(!empty.contains_point([0.0, 1.0]));
        assert!(!empty.contains_point([0.0, -1.0]));
        assert!(empty.contains_point([0.0, 0.0]));
    }

    #[test]
    fn intersection() {
        let big = Rect::from_min_max([0.0, 0.0], [10.0, 10.0]);
        let point = Rect::from_min_max([5.0, 5.0], [5.0, 5.0]);
        assert_eq!(big.intersection(&point), Some(point));
        assert_eq!(point.intersection(&big), Some(point));

        // Disjoint in X.
        let beside = Rect::from_min_max([11.0, 0.0], [12.0, 10.0]);
        assert_eq!(big.intersection(&beside), None);
        assert!(!big.overlaps(&beside));

        // Sharing an edge counts as touching.
        let touching = Rect::from_min_max([10.0, 0.0], [12.0, 10.0]);
        let shared = big.intersection(&touching).unwrap();
        assert_eq!(shared.area(), 0.0);
        assert!(big.overlaps(&touching));
    }

    #[test]
    fn union() {
        let a = Rect::from_min_max([0.0, 0.0], [1.0, 1.0]);
        let b = Rect::from_min_max([2.0, -1.0], [3.0, 0.5]);
        assert_eq!(a.union(&b), Rect::from_min_max([0.0, -1.0], [3.0, 1.0]));
        assert!(a.union(&b).contains_rect(&a));
        assert!(a.union(&b).contains_rect(&b));
    }

    #[test]
    fn bounding() {
        assert_eq!(Rect::bounding::<_, Vec2f>([]), None);
        assert_eq!(
            Rect::bounding([[0.0, 0.0], [1.0, 1.0], [-1.0, -1.0]]).unwrap(),
            Rect::from_center(0.0, 0.0, 2.0, 2.0),
        );
        assert_eq!(
            Rect::bounding([[1.0, 1.0], [2.0, 2.0]]).unwrap(),
            Rect::from_center(1.5, 1.5, 1.0, 1.0),
        );
        assert_eq!(
            Rect::bounding([[0.0, 0.0], [10.0, 0.0]]).unwrap(),
            Rect::from_center(5.0, 0.0, 10.0, 0.0),
        );
    }

    #[test]
    fn transforms() {
        let rect = Rect::from_min_max([0.0, 0.0], [2.0, 2.0]);
        assert_eq!(
            rect.translated([1.0, -1.0]),
            Rect::from_min_max([1.0, -1.0], [3.0, 1.0]),
        );
        assert_eq!(
            rect.inflated(1.0, 0.5),
            Rect::from_min_max([-1.0, -0.5], [3.0, 2.5]),
        );
        assert_eq!(
            rect.scaled_about_center(2.0),
            Rect::from_min_max([-1.0, -1.0], [3.0, 3.0]),
        );
    }

    #[test]
    fn corners() {
        let rect = Rect::from_center(1.0, 1.0, 4.0, 2.0);
        assert_eq!(
            rect.corners(),
            [
                vec2(-1.0, 0.0),
                vec2(3.0, 0.0),
                vec2(3.0, 2.0),
                vec2(-1.0, 2.0),
            ]
        );
    }
}
