//! Dynamically-sized matrices and row reduction.

use std::fmt;

use crate::{Matrix, ShapeError};

mod ops;
mod reduce;

/// A dynamically-sized matrix of [`f32`] components.
///
/// [`MatBuf`] complements the fixed-size [`Matrix`] type for dimensions that are only known at
/// runtime, or that exceed the closed-form territory of the 2x2/3x3 types: it carries the
/// row-reduction engine used for echelon transforms, determinants of larger matrices, and
/// inversion. Components are stored in a single row-major buffer.
///
/// # Construction
///
/// - [`MatBuf::zeros`], [`MatBuf::identity`] and [`MatBuf::from_fn`] create matrices from
///   dimensions alone and panic when a dimension is 0.
/// - [`MatBuf::from_rows`], [`MatBuf::from_columns`], [`MatBuf::from_diagonal`],
///   [`MatBuf::from_vec`] and [`MatBuf::from_flat`] build matrices from caller-supplied data and
///   report degenerate input as a [`ShapeError`]. [`MatBuf::from_vec`] reuses the caller's
///   allocation without copying.
/// - [`From`] converts any fixed-size [`Matrix`] of [`f32`] components.
///
/// # Mutation
///
/// A `&MatBuf` only exposes reads: accessors, shape predicates, and derived operations like
/// [`to_echelon`][Self::to_echelon] or [`invert`][Self::invert], all of which leave the receiver
/// untouched (they work on an internal clone where needed). In-place mutation —
/// [`swap_rows`][Self::swap_rows], [`add`][Self::add], [`echelonize`][Self::echelonize], … —
/// requires `&mut MatBuf`, so shared matrices can be read from multiple threads while exclusive
/// access is enforced for writers by the borrow checker.
#[derive(Clone)]
pub struct MatBuf {
    rows: usize,
    cols: usize,
    elems: Vec<f32>,
}

fn near_zero(value: f32, ep: f32) -> bool {
    value.abs() <= ep
}

impl MatBuf {
    /// Creates a matrix with every component set to 0.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is 0.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        assert!(
            rows > 0 && cols > 0,
            "matrix must have at least 1 row and 1 column (got {rows}x{cols})",
        );
        Self {
            rows,
            cols,
            elems: vec![0.0; rows * cols],
        }
    }

    /// Creates the `n`x`n` identity matrix.
    ///
    /// # Panics
    ///
    /// Panics if `n` is 0.
    pub fn identity(n: usize) -> Self {
        let mut this = Self::zeros(n, n);
        for i in 0..n {
            this.elems[i * n + i] = 1.0;
        }
        this
    }

    /// Creates a matrix by invoking a closure with the position (row and column) of each
    /// component.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is 0.
    pub fn from_fn<F>(rows: usize, cols: usize, mut cb: F) -> Self
    where
        F: FnMut(usize, usize) -> f32,
    {
        assert!(
            rows > 0 && cols > 0,
            "matrix must have at least 1 row and 1 column (got {rows}x{cols})",
        );
        let mut elems = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                elems.push(cb(row, col));
            }
        }
        Self { rows, cols, elems }
    }

    /// Creates a matrix from a slice of equally long row arrays.
    ///
    /// Returns [`ShapeError::Empty`] when `rows` or its first row is empty, and
    /// [`ShapeError::Ragged`] when the rows disagree in length.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keel_linalg::MatBuf;
    /// let mat = MatBuf::from_rows(&[[1.0, 2.0], [3.0, 4.0]])?;
    /// assert_eq!(mat[(1, 0)], 3.0);
    /// # Ok::<(), keel_linalg::ShapeError>(())
    /// ```
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> Result<Self, ShapeError> {
        let Some(first) = rows.first() else {
            return Err(ShapeError::Empty);
        };
        let cols = first.as_ref().len();
        if cols == 0 {
            return Err(ShapeError::Empty);
        }

        let mut elems = Vec::with_capacity(rows.len() * cols);
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(ShapeError::Ragged {
                    index,
                    len: row.len(),
                    expected: cols,
                });
            }
            elems.extend_from_slice(row);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            elems,
        })
    }

    /// Creates a matrix from a slice of equally long column arrays.
    ///
    /// Returns [`ShapeError::Empty`] when `columns` or its first column is empty, and
    /// [`ShapeError::Ragged`] when the columns disagree in length.
    pub fn from_columns<C: AsRef<[f32]>>(columns: &[C]) -> Result<Self, ShapeError> {
        let Some(first) = columns.first() else {
            return Err(ShapeError::Empty);
        };
        let rows = first.as_ref().len();
        if rows == 0 {
            return Err(ShapeError::Empty);
        }

        let cols = columns.len();
        let mut elems = vec![0.0; rows * cols];
        for (index, column) in columns.iter().enumerate() {
            let column = column.as_ref();
            if column.len() != rows {
                return Err(ShapeError::Ragged {
                    index,
                    len: column.len(),
                    expected: rows,
                });
            }
            for (row, &value) in column.iter().enumerate() {
                elems[row * cols + index] = value;
            }
        }

        Ok(Self { rows, cols, elems })
    }

    /// Creates a square matrix with the given diagonal and 0 everywhere else.
    ///
    /// Returns [`ShapeError::Empty`] when `diag` is empty.
    pub fn from_diagonal(diag: &[f32]) -> Result<Self, ShapeError> {
        if diag.is_empty() {
            return Err(ShapeError::Empty);
        }
        let n = diag.len();
        let mut this = Self::zeros(n, n);
        for (i, &value) in diag.iter().enumerate() {
            this.elems[i * n + i] = value;
        }
        Ok(this)
    }

    /// Creates a matrix that takes ownership of `elems` (in row-major order) without copying.
    ///
    /// Returns [`ShapeError::Empty`] when a dimension is 0, and [`ShapeError::Buffer`] when
    /// `elems` does not hold exactly `rows * cols` values.
    pub fn from_vec(rows: usize, cols: usize, elems: Vec<f32>) -> Result<Self, ShapeError> {
        if rows == 0 || cols == 0 {
            return Err(ShapeError::Empty);
        }
        if elems.len() != rows * cols {
            return Err(ShapeError::Buffer {
                rows,
                cols,
                offset: 0,
                len: elems.len(),
            });
        }
        Ok(Self { rows, cols, elems })
    }

    /// Creates a matrix by copying `rows * cols` values out of a flat row-major slice, starting at
    /// `offset`.
    ///
    /// Returns [`ShapeError::Empty`] when a dimension is 0, and [`ShapeError::Buffer`] when the
    /// slice is too short.
    pub fn from_flat(
        rows: usize,
        cols: usize,
        elems: &[f32],
        offset: usize,
    ) -> Result<Self, ShapeError> {
        if rows == 0 || cols == 0 {
            return Err(ShapeError::Empty);
        }
        let needed = rows * cols;
        if elems.len().saturating_sub(offset) < needed {
            return Err(ShapeError::Buffer {
                rows,
                cols,
                offset,
                len: elems.len(),
            });
        }
        Ok(Self {
            rows,
            cols,
            elems: elems[offset..offset + needed].to_vec(),
        })
    }

    /// Returns the number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns a reference to the component at `(row, col)`, or [`None`] if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&f32> {
        if row < self.rows && col < self.cols {
            Some(&self.elems[row * self.cols + col])
        } else {
            None
        }
    }

    /// Returns a mutable reference to the component at `(row, col)`, or [`None`] if out of bounds.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut f32> {
        if row < self.rows && col < self.cols {
            Some(&mut self.elems[row * self.cols + col])
        } else {
            None
        }
    }

    /// Returns the components of row `row` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    pub fn row(&self, row: usize) -> &[f32] {
        assert!(row < self.rows, "row {row} out of bounds (have {})", self.rows);
        &self.elems[row * self.cols..][..self.cols]
    }

    /// Returns the components of row `row` as a mutable slice.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    pub fn row_mut(&mut self, row: usize) -> &mut [f32] {
        assert!(row < self.rows, "row {row} out of bounds (have {})", self.rows);
        &mut self.elems[row * self.cols..][..self.cols]
    }

    /// Returns an iterator over the components of column `col`, from top to bottom.
    ///
    /// # Panics
    ///
    /// Panics if `col` is out of bounds.
    pub fn column(&self, col: usize) -> impl Iterator<Item = f32> + '_ {
        assert!(col < self.cols, "column {col} out of bounds (have {})", self.cols);
        self.elems[col..].iter().step_by(self.cols).copied()
    }

    /// Returns the underlying row-major component buffer as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.elems
    }

    /// Returns the underlying row-major component buffer as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.elems
    }

    /// Consumes the matrix and returns its row-major component buffer.
    #[inline]
    pub fn into_vec(self) -> Vec<f32> {
        self.elems
    }

    /// Copies this matrix into a fixed-size [`Matrix`], truncating or zero-padding as needed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keel_linalg::{MatBuf, Matrix};
    /// let mat = MatBuf::from_rows(&[[1.0, 2.0, 3.0]])?;
    /// assert_eq!(mat.to_matrix::<2, 2>(), Matrix::from_rows([
    ///     [1.0, 2.0],
    ///     [0.0, 0.0],
    /// ]));
    /// # Ok::<(), keel_linalg::ShapeError>(())
    /// ```
    pub fn to_matrix<const R: usize, const C: usize>(&self) -> Matrix<f32, R, C> {
        Matrix::from_fn(|row, col| {
            if row < self.rows && col < self.cols {
                self.elems[row * self.cols + col]
            } else {
                0.0
            }
        })
    }

    fn require_square(&self) -> Result<usize, ShapeError> {
        if self.rows == self.cols {
            Ok(self.rows)
        } else {
            Err(ShapeError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    fn require_same_shape(&self, other: &MatBuf) -> Result<(), ShapeError> {
        if self.rows == other.rows && self.cols == other.cols {
            Ok(())
        } else {
            Err(ShapeError::Mismatch {
                lhs_rows: self.rows,
                lhs_cols: self.cols,
                rhs_rows: other.rows,
                rhs_cols: other.cols,
            })
        }
    }

    /// Returns `true` if the matrix has as many rows as columns.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Returns `true` if all components outside the diagonal are within `ep` of 0.
    ///
    /// Returns [`ShapeError::NotSquare`] for non-square matrices. Pass `ep = 0.0` for an exact
    /// comparison.
    pub fn is_diagonal(&self, ep: f32) -> Result<bool, ShapeError> {
        let n = self.require_square()?;
        Ok((0..n).all(|r| (0..n).all(|c| r == c || near_zero(self.elems[r * n + c], ep))))
    }

    /// Returns `true` if all components strictly below the diagonal are within `ep` of 0.
    ///
    /// Returns [`ShapeError::NotSquare`] for non-square matrices.
    pub fn is_upper_triangular(&self, ep: f32) -> Result<bool, ShapeError> {
        let n = self.require_square()?;
        Ok((1..n).all(|r| (0..r).all(|c| near_zero(self.elems[r * n + c], ep))))
    }

    /// Returns `true` if all components strictly above the diagonal are within `ep` of 0.
    ///
    /// Returns [`ShapeError::NotSquare`] for non-square matrices.
    pub fn is_lower_triangular(&self, ep: f32) -> Result<bool, ShapeError> {
        let n = self.require_square()?;
        Ok((0..n).all(|r| (r + 1..n).all(|c| near_zero(self.elems[r * n + c], ep))))
    }

    /// Returns `true` if the matrix is upper or lower triangular.
    ///
    /// Returns [`ShapeError::NotSquare`] for non-square matrices.
    pub fn is_triangular(&self, ep: f32) -> Result<bool, ShapeError> {
        Ok(self.is_upper_triangular(ep)? || self.is_lower_triangular(ep)?)
    }

    /// Returns `true` if the matrix is in row-echelon form.
    ///
    /// In echelon form, the leading (first non-zero) component of each row is strictly to the
    /// right of the row above's, and rows without any non-zero component are at the bottom.
    /// Components are tested against 0 with tolerance `ep`.
    pub fn is_echelon(&self, ep: f32) -> bool {
        // Tracks how many leading components of the current row must be zero; one past the
        // previous row's leading column, or past the end once an all-zero row was seen.
        let mut zero_prefix = 0;
        for r in 0..self.rows {
            let row = self.row(r);
            if row.iter().take(zero_prefix).any(|&v| !near_zero(v, ep)) {
                return false;
            }
            zero_prefix = match row.iter().position(|&v| !near_zero(v, ep)) {
                Some(lead) => lead + 1,
                None => self.cols + 1,
            };
        }
        true
    }

    /// Returns `true` if the matrix is in *reduced* row-echelon form: it is in echelon form,
    /// every pivot is within `ep` of 1, and every other component in a pivot's column is within
    /// `ep` of 0.
    pub fn is_reduced_echelon(&self, ep: f32) -> bool {
        if !self.is_echelon(ep) {
            return false;
        }

        for r in 0..self.rows {
            let Some(lead) = self.row(r).iter().position(|&v| !near_zero(v, ep)) else {
                continue;
            };
            if (self.elems[r * self.cols + lead] - 1.0).abs() > ep {
                return false;
            }
            let pivot_col_clear = (0..self.rows)
                .all(|other| other == r || near_zero(self.elems[other * self.cols + lead], ep));
            if !pivot_col_clear {
                return false;
            }
        }
        true
    }

    /// Swaps two rows in place.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        assert!(
            a < self.rows && b < self.rows,
            "row swap ({a}, {b}) out of bounds (have {})",
            self.rows,
        );
        if a == b {
            return;
        }
        for col in 0..self.cols {
            self.elems.swap(a * self.cols + col, b * self.cols + col);
        }
    }

    /// Swaps two columns in place.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn swap_columns(&mut self, a: usize, b: usize) {
        assert!(
            a < self.cols && b < self.cols,
            "column swap ({a}, {b}) out of bounds (have {})",
            self.cols,
        );
        if a == b {
            return;
        }
        for row in 0..self.rows {
            self.elems.swap(row * self.cols + a, row * self.cols + b);
        }
    }

    /// Adds `rhs` to this matrix component-wise, in place.
    ///
    /// Returns [`ShapeError::Mismatch`] (leaving `self` untouched) unless both matrices have
    /// identical dimensions.
    pub fn add(&mut self, rhs: &MatBuf) -> Result<(), ShapeError> {
        self.require_same_shape(rhs)?;
        for (lhs, rhs) in self.elems.iter_mut().zip(&rhs.elems) {
            *lhs += rhs;
        }
        Ok(())
    }

    /// Multiplies every component by `factor`, in place.
    pub fn scale(&mut self, factor: f32) {
        for value in &mut self.elems {
            *value *= factor;
        }
    }

    /// Returns the component-wise sum of `self` and `rhs`.
    pub fn added(&self, rhs: &MatBuf) -> Result<MatBuf, ShapeError> {
        let mut out = self.clone();
        out.add(rhs)?;
        Ok(out)
    }

    /// Returns this matrix with every component multiplied by `factor`.
    pub fn scaled(&self, factor: f32) -> MatBuf {
        let mut out = self.clone();
        out.scale(factor);
        out
    }

    /// Returns the component-wise (Hadamard) product of `self` and `rhs`.
    ///
    /// Returns [`ShapeError::Mismatch`] unless both matrices have identical dimensions.
    pub fn component_mul(&self, rhs: &MatBuf) -> Result<MatBuf, ShapeError> {
        self.require_same_shape(rhs)?;
        let elems = self
            .elems
            .iter()
            .zip(&rhs.elems)
            .map(|(a, b)| a * b)
            .collect();
        Ok(MatBuf {
            rows: self.rows,
            cols: self.cols,
            elems,
        })
    }

    /// Returns the matrix product `self * rhs`.
    ///
    /// Returns [`ShapeError::Mismatch`] unless `self.cols() == rhs.rows()`.
    pub fn mul(&self, rhs: &MatBuf) -> Result<MatBuf, ShapeError> {
        if self.cols != rhs.rows {
            return Err(ShapeError::Mismatch {
                lhs_rows: self.rows,
                lhs_cols: self.cols,
                rhs_rows: rhs.rows,
                rhs_cols: rhs.cols,
            });
        }

        let mut out = MatBuf::zeros(self.rows, rhs.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let lhs = self.elems[i * self.cols + k];
                for j in 0..rhs.cols {
                    out.elems[i * rhs.cols + j] += lhs * rhs.elems[k * rhs.cols + j];
                }
            }
        }
        Ok(out)
    }

    /// Returns the transpose of this matrix.
    pub fn transpose(&self) -> MatBuf {
        MatBuf::from_fn(self.cols, self.rows, |row, col| {
            self.elems[col * self.cols + row]
        })
    }

    /// Returns the *trace* of the matrix (the sum of all components on the diagonal).
    ///
    /// Returns [`ShapeError::NotSquare`] for non-square matrices.
    pub fn trace(&self) -> Result<f32, ShapeError> {
        let n = self.require_square()?;
        Ok((0..n).map(|i| self.elems[i * n + i]).sum())
    }

    /// Transforms this matrix into row-echelon form, in place.
    ///
    /// Returns the sign of the row permutation that was applied (`1.0` or `-1.0`; swapping two
    /// rows of a matrix negates its determinant, so the caller can recover the determinant of the
    /// original matrix from the echelon form). Components are tested against 0 with tolerance
    /// `ep`. A matrix that already satisfies [`is_echelon`][Self::is_echelon] is left untouched.
    pub fn echelonize(&mut self, ep: f32) -> f32 {
        if self.is_echelon(ep) {
            return 1.0;
        }
        reduce::forward(self, None, ep)
    }

    /// Transforms this matrix into *reduced* row-echelon form, in place.
    ///
    /// Components are tested against 0 with tolerance `ep`. A matrix that already satisfies
    /// [`is_reduced_echelon`][Self::is_reduced_echelon] is left untouched.
    pub fn reduce(&mut self, ep: f32) {
        if self.is_reduced_echelon(ep) {
            return;
        }
        if !self.is_echelon(ep) {
            reduce::forward(self, None, ep);
        }
        reduce::backward(self, None, ep);
    }

    /// Returns this matrix transformed into row-echelon form.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keel_linalg::MatBuf;
    /// let mat = MatBuf::from_rows(&[[0.0, 1.0], [1.0, 0.0]])?;
    /// assert!(!mat.is_echelon(0.0));
    /// assert!(mat.to_echelon(0.0).is_echelon(0.0));
    /// # Ok::<(), keel_linalg::ShapeError>(())
    /// ```
    pub fn to_echelon(&self, ep: f32) -> MatBuf {
        let mut out = self.clone();
        out.echelonize(ep);
        out
    }

    /// Returns this matrix transformed into reduced row-echelon form.
    pub fn to_reduced_echelon(&self, ep: f32) -> MatBuf {
        let mut out = self.clone();
        out.reduce(ep);
        out
    }

    /// Returns the [determinant] of the matrix.
    ///
    /// Sizes up to 3x3 use the closed-form cofactor formulas. Larger matrices are triangularized
    /// first (on a clone; `self` is not modified), with the diagonal product adjusted by the sign
    /// of the applied row permutation. The internal zero test is exact.
    ///
    /// Returns [`ShapeError::NotSquare`] for non-square matrices.
    ///
    /// [determinant]: https://en.wikipedia.org/wiki/Determinant
    pub fn determinant(&self) -> Result<f32, ShapeError> {
        let n = self.require_square()?;
        let m = |r: usize, c: usize| self.elems[r * n + c];
        Ok(match n {
            1 => m(0, 0),
            2 => m(0, 0) * m(1, 1) - m(0, 1) * m(1, 0),
            3 => {
                m(0, 0) * m(1, 1) * m(2, 2)
                    + m(0, 1) * m(1, 2) * m(2, 0)
                    + m(0, 2) * m(1, 0) * m(2, 1)
                    - m(0, 2) * m(1, 1) * m(2, 0)
                    - m(0, 1) * m(1, 0) * m(2, 2)
                    - m(0, 0) * m(1, 2) * m(2, 1)
            }
            _ => {
                if self.is_triangular(0.0)? {
                    (0..n).map(|i| m(i, i)).product()
                } else {
                    let mut work = self.clone();
                    let sign = reduce::forward(&mut work, None, 0.0);
                    sign * (0..n).map(|i| work.elems[i * n + i]).product::<f32>()
                }
            }
        })
    }

    /// Returns the inverse of this matrix, or [`None`] if the matrix is singular within `ep`.
    ///
    /// A singular matrix is an expected outcome, not an error; [`ShapeError::NotSquare`] is only
    /// returned when the matrix is not square. The computation runs on a clone — `self` is never
    /// modified.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keel_linalg::MatBuf;
    /// let mat = MatBuf::from_rows(&[[1.0, 2.0], [3.0, 4.0]])?;
    /// let inv = mat.invert(0.0)?.unwrap();
    /// assert_eq!(inv.rows(), 2);
    ///
    /// let singular = MatBuf::from_rows(&[[1.0, 2.0], [2.0, 4.0]])?;
    /// assert_eq!(singular.invert(0.0)?, None);
    /// # Ok::<(), keel_linalg::ShapeError>(())
    /// ```
    pub fn invert(&self, ep: f32) -> Result<Option<MatBuf>, ShapeError> {
        let n = self.require_square()?;
        if n == 1 {
            let value = self.elems[0];
            if near_zero(value, ep) {
                return Ok(None);
            }
            return Ok(Some(MatBuf {
                rows: 1,
                cols: 1,
                elems: vec![1.0 / value],
            }));
        }

        let mut work = self.clone();
        let mut companion = MatBuf::identity(n);
        reduce::forward(&mut work, Some(&mut companion), ep);
        reduce::backward(&mut work, Some(&mut companion), ep);

        // A rank-deficient square matrix ends up with an all-zero bottom row, so the bottom-right
        // component tells singular and regular matrices apart after the reduction.
        let corner = work.elems[n * n - 1];
        if near_zero(corner, ep) {
            log::trace!("invert: singular matrix (reduced corner {corner} within {ep})");
            return Ok(None);
        }
        Ok(Some(companion))
    }
}

/// Converts a fixed-size matrix, preserving all component values.
///
/// Panics if `R` or `C` is 0.
impl<const R: usize, const C: usize> From<Matrix<f32, R, C>> for MatBuf {
    fn from(mat: Matrix<f32, R, C>) -> Self {
        MatBuf::from_fn(R, C, |row, col| mat[(row, col)])
    }
}

impl fmt::Debug for MatBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct FormatRow<'a>(&'a [f32]);
        impl fmt::Debug for FormatRow<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "[")?;
                for (col, value) in self.0.iter().enumerate() {
                    if col != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", value)?;
                }
                write!(f, "]")
            }
        }

        let mut list = f.debug_list();
        for row in 0..self.rows {
            list.entry(&FormatRow(self.row(row)));
        }
        list.finish()
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

    use super::MatBuf;

    #[derive(Serialize)]
    #[serde(rename = "MatBuf")]
    struct RawRef<'a> {
        rows: usize,
        cols: usize,
        elems: &'a [f32],
    }

    #[derive(Deserialize)]
    #[serde(rename = "MatBuf")]
    struct Raw {
        rows: usize,
        cols: usize,
        elems: Vec<f32>,
    }

    impl Serialize for MatBuf {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            RawRef {
                rows: self.rows,
                cols: self.cols,
                elems: &self.elems,
            }
            .serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for MatBuf {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            // Route through `from_vec` so the dimension invariant is re-checked.
            let raw = Raw::deserialize(deserializer)?;
            MatBuf::from_vec(raw.rows, raw.cols, raw.elems).map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mat(rows: &[&[f32]]) -> MatBuf {
        MatBuf::from_rows(rows).unwrap()
    }

    #[test]
    fn construction() {
        let zeros = MatBuf::zeros(2, 3);
        assert_eq!((zeros.rows(), zeros.cols()), (2, 3));
        assert!(zeros.as_slice().iter().all(|&v| v == 0.0));

        let id = MatBuf::identity(2);
        assert_eq!(id, mat(&[&[1.0, 0.0], &[0.0, 1.0]]));

        let diag = MatBuf::from_diagonal(&[2.0, 3.0]).unwrap();
        assert_eq!(diag, mat(&[&[2.0, 0.0], &[0.0, 3.0]]));

        let by_fn = MatBuf::from_fn(2, 2, |r, c| (r * 10 + c) as f32);
        assert_eq!(by_fn, mat(&[&[0.0, 1.0], &[10.0, 11.0]]));

        assert_eq!(
            MatBuf::from_columns(&[[1.0, 3.0], [2.0, 4.0]]).unwrap(),
            mat(&[&[1.0, 2.0], &[3.0, 4.0]]),
        );
    }

    #[test]
    fn construction_errors() {
        assert_eq!(MatBuf::from_rows::<[f32; 2]>(&[]), Err(ShapeError::Empty));
        assert_eq!(MatBuf::from_rows(&[[]; 1]), Err(ShapeError::Empty));
        assert_eq!(MatBuf::from_diagonal(&[]), Err(ShapeError::Empty));
        assert_eq!(MatBuf::from_vec(0, 3, Vec::new()), Err(ShapeError::Empty));

        assert_eq!(
            MatBuf::from_rows(&[&[1.0, 2.0][..], &[3.0][..]]),
            Err(ShapeError::Ragged {
                index: 1,
                len: 1,
                expected: 2,
            }),
        );

        assert_eq!(
            MatBuf::from_vec(2, 2, vec![0.0; 3]),
            Err(ShapeError::Buffer {
                rows: 2,
                cols: 2,
                offset: 0,
                len: 3,
            }),
        );
        assert_eq!(
            MatBuf::from_flat(2, 2, &[0.0; 5], 2),
            Err(ShapeError::Buffer {
                rows: 2,
                cols: 2,
                offset: 2,
                len: 5,
            }),
        );
    }

    #[test]
    fn flat_round_trip() {
        let flat = [9.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let m = MatBuf::from_flat(2, 3, &flat, 1).unwrap();
        assert_eq!(m, mat(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]));
        assert_eq!(m.into_vec(), &flat[1..]);
    }

    #[test]
    fn access() {
        let mut m = mat(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        assert_eq!(m.get(1, 2), Some(&6.0));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.get(0, 3), None);
        assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
        assert_eq!(m.column(1).collect::<Vec<_>>(), vec![2.0, 5.0]);

        m[(0, 1)] = 20.0;
        *m.get_mut(1, 0).unwrap() = 40.0;
        assert_eq!(m, mat(&[&[1.0, 20.0, 3.0], &[40.0, 5.0, 6.0]]));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn index_out_of_bounds() {
        let m = MatBuf::zeros(2, 2);
        let _ = m[(0, 2)];
    }

    #[test]
    fn swaps() {
        let mut m = mat(&[&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0]]);
        m.swap_rows(0, 2);
        assert_eq!(m, mat(&[&[5.0, 6.0], &[3.0, 4.0], &[1.0, 2.0]]));
        m.swap_columns(0, 1);
        assert_eq!(m, mat(&[&[6.0, 5.0], &[4.0, 3.0], &[2.0, 1.0]]));
        let before = m.clone();
        m.swap_rows(1, 1);
        assert_eq!(m, before);
    }

    #[test]
    fn arithmetic() {
        let a = mat(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let b = mat(&[&[10.0, 20.0], &[30.0, 40.0]]);

        assert_eq!(a.added(&b).unwrap(), mat(&[&[11.0, 22.0], &[33.0, 44.0]]));
        assert_eq!(a.scaled(2.0), mat(&[&[2.0, 4.0], &[6.0, 8.0]]));
        assert_eq!(
            a.component_mul(&b).unwrap(),
            mat(&[&[10.0, 40.0], &[90.0, 160.0]]),
        );
        assert_eq!(a.transpose(), mat(&[&[1.0, 3.0], &[2.0, 4.0]]));
        assert_eq!(a.trace().unwrap(), 5.0);

        let mut c = a.clone();
        c.add(&b).unwrap();
        c.scale(0.5);
        assert_eq!(c, mat(&[&[5.5, 11.0], &[16.5, 22.0]]));
    }

    #[test]
    fn mismatched_dimensions() {
        let a = mat(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        let b = a.transpose();

        let expected = ShapeError::Mismatch {
            lhs_rows: 2,
            lhs_cols: 3,
            rhs_rows: 3,
            rhs_cols: 2,
        };
        assert_eq!(a.added(&b), Err(expected));
        assert_eq!(a.component_mul(&b), Err(expected));

        // Matrix multiplication instead requires the *inner* dimensions to agree.
        assert!(a.mul(&b).is_ok());
        assert_eq!(
            a.mul(&a),
            Err(ShapeError::Mismatch {
                lhs_rows: 2,
                lhs_cols: 3,
                rhs_rows: 2,
                rhs_cols: 3,
            }),
        );
    }

    #[test]
    fn matrix_product() {
        let a = mat(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let id = MatBuf::identity(2);
        assert_eq!(a.mul(&id).unwrap(), a);
        assert_eq!(id.mul(&a).unwrap(), a);

        let b = mat(&[&[5.0, 6.0], &[7.0, 8.0]]);
        assert_eq!(
            a.mul(&b).unwrap(),
            mat(&[&[19.0, 22.0], &[43.0, 50.0]]),
        );
    }

    #[test]
    fn square_guards() {
        let rect = MatBuf::zeros(2, 3);
        let err = ShapeError::NotSquare { rows: 2, cols: 3 };
        assert_eq!(rect.trace(), Err(err));
        assert_eq!(rect.determinant(), Err(err));
        assert_eq!(rect.invert(0.0), Err(err));
        assert_eq!(rect.is_diagonal(0.0), Err(err));
        assert_eq!(rect.is_triangular(0.0), Err(err));
    }

    #[test]
    fn predicates() {
        let diag = MatBuf::from_diagonal(&[2.0, 3.0, 4.0]).unwrap();
        assert!(diag.is_diagonal(0.0).unwrap());
        assert!(diag.is_upper_triangular(0.0).unwrap());
        assert!(diag.is_lower_triangular(0.0).unwrap());

        let upper = mat(&[&[1.0, 2.0], &[0.0, 3.0]]);
        assert!(!upper.is_diagonal(0.0).unwrap());
        assert!(upper.is_upper_triangular(0.0).unwrap());
        assert!(!upper.is_lower_triangular(0.0).unwrap());
        assert!(upper.is_triangular(0.0).unwrap());

        // Within tolerance, small off-diagonal entries are ignored.
        let noisy = mat(&[&[1.0, 1e-6], &[-1e-6, 3.0]]);
        assert!(!noisy.is_diagonal(0.0).unwrap());
        assert!(noisy.is_diagonal(1e-5).unwrap());
    }

    #[test]
    fn echelon_predicate() {
        assert!(mat(&[&[1.0, 2.0, 3.0], &[0.0, 4.0, 5.0]]).is_echelon(0.0));
        assert!(mat(&[&[1.0, 2.0], &[0.0, 0.0]]).is_echelon(0.0));
        assert!(mat(&[&[0.0, 0.0], &[0.0, 0.0]]).is_echelon(0.0));
        // The leading column must strictly increase from row to row.
        assert!(!mat(&[&[1.0, 2.0], &[1.0, 0.0]]).is_echelon(0.0));
        assert!(!mat(&[&[0.0, 1.0], &[1.0, 0.0]]).is_echelon(0.0));
        // A non-zero row below an all-zero row is not echelon.
        assert!(!mat(&[&[0.0, 0.0], &[0.0, 1.0]]).is_echelon(0.0));
        // Skipping columns is fine.
        assert!(mat(&[&[0.0, 2.0, 3.0], &[0.0, 0.0, 1.0]]).is_echelon(0.0));
    }

    #[test]
    fn reduced_echelon_predicate() {
        assert!(MatBuf::identity(3).is_reduced_echelon(0.0));
        assert!(mat(&[&[1.0, 0.0, 2.0], &[0.0, 1.0, 3.0]]).is_reduced_echelon(0.0));
        // Pivots must be 1.
        assert!(!mat(&[&[2.0, 0.0], &[0.0, 1.0]]).is_reduced_echelon(0.0));
        // Pivot columns must be clear above the pivot as well.
        assert!(!mat(&[&[1.0, 1.0], &[0.0, 1.0]]).is_reduced_echelon(0.0));
        // Not even echelon.
        assert!(!mat(&[&[0.0, 1.0], &[1.0, 0.0]]).is_reduced_echelon(0.0));
    }

    #[test]
    fn fixed_size_round_trip() {
        let fixed = crate::Matrix::from_rows([[1.0f32, 2.0], [3.0, 4.0]]);
        let dynamic = MatBuf::from(fixed);
        assert_eq!(dynamic, fixed);
        assert_eq!(fixed, dynamic);
        assert_eq!(dynamic.to_matrix::<2, 2>(), fixed);

        // Truncation and zero-padding.
        let padded = dynamic.to_matrix::<3, 3>();
        assert_eq!(padded, fixed.resize::<3, 3>());
        let truncated = dynamic.to_matrix::<1, 1>();
        assert_eq!(truncated, crate::Matrix::from_rows([[1.0f32]]));
    }

    #[test]
    fn debug_fmt() {
        let m = mat(&[&[0.0, 1.0], &[2.0, 3.0]]);
        assert_eq!(format!("{:?}", m), "[[0.0, 1.0], [2.0, 3.0]]");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let m = mat(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let json = serde_json::to_string(&m).unwrap();
        let back: MatBuf = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);

        // Dimensions that disagree with the buffer are rejected.
        let bad = r#"{"rows":2,"cols":2,"elems":[1.0,2.0,3.0]}"#;
        assert!(serde_json::from_str::<MatBuf>(bad).is_err());
    }
}
