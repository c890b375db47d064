//! Approximate equality with explicit tolerances.
//!
//! Floating-point comparisons in this library never rely on an implicit default tolerance: every
//! comparison site states the tolerance it accepts, either through the [`ApproxEq`] methods or
//! through the `abs = …` / `rel = …` argument of [`assert_approx_eq!`][crate::assert_approx_eq].
//!
//! For more information on the subtleties of approximate floating-point comparison, see:
//! <https://randomascii.wordpress.com/2012/02/25/comparing-floating-point-numbers-2012-edition/>

mod impls;

/// Types that can be compared for *approximate equality*.
///
/// Compound types implementing this trait are considered *equal* if all of their components are.
pub trait ApproxEq<Rhs: ?Sized = Self> {
    /// Type of the tolerance for absolute and relative comparisons.
    ///
    /// This is almost always either [`f32`] or [`f64`], depending on which one is the underlying
    /// primitive type being compared.
    type Tolerance: Copy;

    /// Performs an *absolute comparison* of `self` and `other`.
    ///
    /// If the absolute difference of the compared values is less than or equal to `abs_tolerance`,
    /// the values are considered to be equal. This is typically the right choice for values close
    /// to zero, where a relative comparison degenerates.
    fn abs_diff_eq(&self, other: &Rhs, abs_tolerance: Self::Tolerance) -> bool;

    /// Performs a *relative comparison* of `self` and `other`.
    ///
    /// If the absolute difference of the compared values is less than or equal to the largest of
    /// the two magnitudes times `rel_tolerance`, the values are considered to be equal.
    fn rel_diff_eq(&self, other: &Rhs, rel_tolerance: Self::Tolerance) -> bool;
}

/// Asserts that two expressions are approximately equal (using [`ApproxEq`]).
///
/// Unlike [`assert_eq!`], the comparison mode and tolerance must be spelled out: `abs = t` for an
/// absolute comparison via [`ApproxEq::abs_diff_eq`], `rel = t` for a relative comparison via
/// [`ApproxEq::rel_diff_eq`].
///
/// # Examples
///
/// ```
/// # use keel_linalg::assert_approx_eq;
/// let one = (0..10).fold(0.0f32, |acc, _| acc + 0.1);
/// assert_approx_eq!(one, 1.0, abs = 1e-6);
/// assert_approx_eq!(100.0f32, 99.0, rel = 0.011);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, abs = $tolerance:expr $(,)?) => {{
        let (left, right) = (&$left, &$right);
        if !$crate::approx::ApproxEq::abs_diff_eq(left, right, $tolerance) {
            panic!(
                "assertion `left ~= right` failed (absolute tolerance {:?})\n  left: {:?}\n right: {:?}",
                $tolerance, left, right,
            );
        }
    }};
    ($left:expr, $right:expr, rel = $tolerance:expr $(,)?) => {{
        let (left, right) = (&$left, &$right);
        if !$crate::approx::ApproxEq::rel_diff_eq(left, right, $tolerance) {
            panic!(
                "assertion `left ~= right` failed (relative tolerance {:?})\n  left: {:?}\n right: {:?}",
                $tolerance, left, right,
            );
        }
    }};
}

/// Asserts that two expressions are *not* approximately equal (using [`ApproxEq`]).
///
/// Takes the same `abs = t` / `rel = t` argument as [`assert_approx_eq!`][crate::assert_approx_eq].
#[macro_export]
macro_rules! assert_approx_ne {
    ($left:expr, $right:expr, abs = $tolerance:expr $(,)?) => {{
        let (left, right) = (&$left, &$right);
        if $crate::approx::ApproxEq::abs_diff_eq(left, right, $tolerance) {
            panic!(
                "assertion `left !~= right` failed (absolute tolerance {:?})\n  left: {:?}\n right: {:?}",
                $tolerance, left, right,
            );
        }
    }};
    ($left:expr, $right:expr, rel = $tolerance:expr $(,)?) => {{
        let (left, right) = (&$left, &$right);
        if $crate::approx::ApproxEq::rel_diff_eq(left, right, $tolerance) {
            panic!(
                "assertion `left !~= right` failed (relative tolerance {:?})\n  left: {:?}\n right: {:?}",
                $tolerance, left, right,
            );
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    #[should_panic(expected = "assertion `left !~= right` failed")]
    fn fail_ne() {
        assert_approx_ne!(1.0f32, 1.0, abs = 0.0);
    }

    #[test]
    #[should_panic(expected = "assertion `left ~= right` failed")]
    fn fail_eq() {
        assert_approx_eq!(1.0f32, 2.0, abs = 0.5);
    }

    #[test]
    fn rel() {
        assert_approx_eq!(1.0f32, 1.001, rel = 0.01);
        assert_approx_eq!(1.0f32, -1.0, rel = 2.0);
        assert_approx_eq!(0.0f32, 0.00001, rel = 1.0);
        assert_approx_ne!(100.0f32, 99.0, rel = 0.005);
    }

    #[test]
    fn abs() {
        assert_approx_eq!(100.0f32, 99.0, abs = 1.0);
        assert_approx_ne!(100.0f32, 99.0, abs = 0.5);
        assert_approx_eq!(1.0f32, -1.0, abs = 2.0);
        assert_approx_ne!(1.0f32, -1.0, abs = 1.0);
        assert_approx_eq!(-1.0f32, -1.0, abs = 0.0);
        assert_approx_eq!(-1.0f32, -1.0, rel = 0.0);
    }

    #[test]
    fn nan() {
        assert_approx_ne!(f32::NAN, f32::NAN, abs = 0.0);
        assert_approx_ne!(f32::NAN, f32::NAN, rel = 1.0);
        assert_approx_ne!(f32::NAN, 0.0, abs = 1.0);
        assert_approx_ne!(f32::NAN, 0.0, rel = 1.0);
    }

    #[test]
    fn inf() {
        assert_approx_eq!(f32::INFINITY, f32::INFINITY, abs = 0.0);
        assert_approx_eq!(f32::INFINITY, f32::INFINITY, rel = 0.0);
        assert_approx_ne!(f32::INFINITY, f32::NEG_INFINITY, abs = 0.0);
        assert_approx_ne!(f32::INFINITY, f32::MAX, abs = 10000.0);
        assert_approx_ne!(f32::INFINITY, f32::MAX, rel = 10000.0);
    }
}
