use keel_linalg::Vec2f;

use crate::Rect;

/// Contact information for a pair of overlapping rectangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Collision normal, pointing from the first rectangle towards the second. Always a unit
    /// vector along one of the coordinate axes.
    pub normal: Vec2f,
    /// How deep the rectangles overlap along `normal`. 0 when they merely touch.
    pub penetration: f32,
    /// Center of the overlapping region.
    pub point: Vec2f,
}

/// Computes the contact manifold of two axis-aligned rectangles, or [`None`] when they do not
/// overlap.
///
/// The normal is chosen along the axis of least penetration, which is the direction the second
/// rectangle would have to move to resolve the overlap in the smallest step.
pub fn collide(a: &Rect, b: &Rect) -> Option<Contact> {
    let delta = b.center() - a.center();
    let combined_half = (a.size() + b.size()) * 0.5;
    let overlap_x = combined_half.x() - delta.x().abs();
    let overlap_y = combined_half.y() - delta.y().abs();
    if overlap_x < 0.0 || overlap_y < 0.0 {
        return None;
    }

    let (normal, penetration) = if overlap_x <= overlap_y {
        let normal = if delta.x() < 0.0 { -Vec2f::X } else { Vec2f::X };
        (normal, overlap_x)
    } else {
        let normal = if delta.y() < 0.0 { -Vec2f::Y } else { Vec2f::Y };
        (normal, overlap_y)
    };

    // The overlap region is non-empty whenever we get here.
    let point = a.intersection(b)?.center();

    Some(Contact {
        normal,
        penetration,
        point,
    })
}

#[cfg(test)]
mod tests {
    use keel_linalg::vec2;

    use super::*;

    #[test]
    fn horizontal_overlap() {
        let a = Rect::from_center(0.0, 0.0, 4.0, 4.0);
        let b = Rect::from_center(3.0, 0.0, 4.0, 4.0);
        let contact = collide(&a, &b).unwrap();
        assert_eq!(contact.normal, vec2(1.0, 0.0));
        assert_eq!(contact.penetration, 1.0);
        assert_eq!(contact.point, vec2(1.5, 0.0));

        // Swapping the operands flips the normal.
        let flipped = collide(&b, &a).unwrap();
        assert_eq!(flipped.normal, vec2(-1.0, 0.0));
        assert_eq!(flipped.penetration, 1.0);
    }

    #[test]
    fn vertical_overlap() {
        let a = Rect::from_center(0.0, 0.0, 10.0, 2.0);
        let b = Rect::from_center(0.0, 1.5, 10.0, 2.0);
        let contact = collide(&a, &b).unwrap();
        assert_eq!(contact.normal, vec2(0.0, 1.0));
        assert_eq!(contact.penetration, 0.5);
    }

    #[test]
    fn least_penetration_axis_wins() {
        // Deep X overlap, shallow Y overlap: the normal must be vertical.
        let a = Rect::from_center(0.0, 0.0, 10.0, 4.0);
        let b = Rect::from_center(1.0, -3.5, 10.0, 4.0);
        let contact = collide(&a, &b).unwrap();
        assert_eq!(contact.normal, vec2(0.0, -1.0));
        assert_eq!(contact.penetration, 0.5);
    }

    #[test]
    fn touching_rects() {
        let a = Rect::from_center(0.0, 0.0, 2.0, 2.0);
        let b = Rect::from_center(2.0, 0.0, 2.0, 2.0);
        let contact = collide(&a, &b).unwrap();
        assert_eq!(contact.penetration, 0.0);
        assert_eq!(contact.normal, vec2(1.0, 0.0));
        assert_eq!(contact.point, vec2(1.0, 0.0));
    }

    #[test]
    fn separated_rects() {
        let a = Rect::from_center(0.0, 0.0, 2.0, 2.0);
        let b = Rect::from_center(5.0, 0.0, 2.0, 2.0);
        assert_eq!(collide(&a, &b), None);

        let diagonal = Rect::from_center(3.0, 3.0, 2.0, 2.0);
        assert_eq!(collide(&a, &diagonal), None);
    }

    #[test]
    fn concentric_rects() {
        let a = Rect::from_center(0.0, 0.0, 2.0, 4.0);
        let b = Rect::from_center(0.0, 0.0, 2.0, 2.0);
        let contact = collide(&a, &b).unwrap();
        // With no offset to break the tie, the X axis is reported.
        assert_eq!(contact.normal, vec2(1.0, 0.0));
        assert_eq!(contact.penetration, 2.0);
        assert_eq!(contact.point, vec2(0.0, 0.0));
    }
}
