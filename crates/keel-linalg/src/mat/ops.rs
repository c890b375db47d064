use std::ops::{Index, IndexMut};

use crate::{approx::ApproxEq, Matrix};

use super::MatBuf;

impl Index<(usize, usize)> for MatBuf {
    type Output = f32;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        match self.get(row, col) {
            Some(value) => value,
            None => panic!(
                "index ({row}, {col}) out of bounds for {}x{} matrix",
                self.rows(),
                self.cols(),
            ),
        }
    }
}

impl IndexMut<(usize, usize)> for MatBuf {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        let (rows, cols) = (self.rows(), self.cols());
        match self.get_mut(row, col) {
            Some(value) => value,
            None => panic!("index ({row}, {col}) out of bounds for {rows}x{cols} matrix"),
        }
    }
}

impl PartialEq for MatBuf {
    fn eq(&self, other: &Self) -> bool {
        self.rows() == other.rows()
            && self.cols() == other.cols()
            && self.as_slice() == other.as_slice()
    }
}

/// Equality between dynamically- and fixed-size matrices only depends on dimensions and
/// component values, not on which of the two families a value belongs to.
impl<const R: usize, const C: usize> PartialEq<Matrix<f32, R, C>> for MatBuf {
    fn eq(&self, other: &Matrix<f32, R, C>) -> bool {
        self.rows() == R
            && self.cols() == C
            && (0..R).all(|row| (0..C).all(|col| self[(row, col)] == other[(row, col)]))
    }
}

impl<const R: usize, const C: usize> PartialEq<MatBuf> for Matrix<f32, R, C> {
    fn eq(&self, other: &MatBuf) -> bool {
        other == self
    }
}

impl ApproxEq for MatBuf {
    type Tolerance = f32;

    fn abs_diff_eq(&self, other: &Self, abs_tolerance: Self::Tolerance) -> bool {
        self.rows() == other.rows()
            && self.cols() == other.cols()
            && self.as_slice().abs_diff_eq(other.as_slice(), abs_tolerance)
    }

    fn rel_diff_eq(&self, other: &Self, rel_tolerance: Self::Tolerance) -> bool {
        self.rows() == other.rows()
            && self.cols() == other.cols()
            && self.as_slice().rel_diff_eq(other.as_slice(), rel_tolerance)
    }
}
