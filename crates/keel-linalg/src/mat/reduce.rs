//! In-place Gaussian elimination.
//!
//! Both passes optionally mirror every row operation onto a *companion* matrix with the same
//! number of rows. [`MatBuf::invert`][super::MatBuf::invert] threads an identity matrix through
//! them to accumulate the inverse; plain echelon transforms pass `None`.

use super::{near_zero, MatBuf};

/// Transforms `mat` into row-echelon form and returns the sign of the applied row permutation
/// (`1.0` or `-1.0`).
///
/// Works column by column. In each column, rows whose entry is within `ep` of 0 are swapped to
/// the bottom of the active range first, then the row with the largest remaining entry is
/// promoted to the pivot position, and all rows below it get the pivot row (scaled by their
/// elimination factor) subtracted. Eliminated entries are set to 0 outright rather than being
/// left as subtraction residue.
pub(super) fn forward(mat: &mut MatBuf, mut companion: Option<&mut MatBuf>, ep: f32) -> f32 {
    debug_assert!(companion.as_ref().map_or(true, |c| c.rows == mat.rows));

    let (rows, cols) = (mat.rows, mat.cols);
    let mut sign = 1.0;
    let mut start_row = 0;

    for col in 0..cols {
        if start_row == rows {
            break;
        }

        // Relegate rows that contribute nothing to this column.
        let mut end_row = rows;
        let mut r = start_row;
        while r < end_row {
            if near_zero(mat.elems[r * cols + col], ep) {
                end_row -= 1;
                if r != end_row {
                    mat.swap_rows(r, end_row);
                    if let Some(companion) = companion.as_deref_mut() {
                        companion.swap_rows(r, end_row);
                    }
                    sign = -sign;
                }
            } else {
                r += 1;
            }
        }

        if start_row == end_row {
            log::trace!("forward: no pivot in column {col}");
            continue;
        }

        // Partial pivoting: promote the row with the largest entry (by value) in this column.
        let mut pivot_row = start_row;
        for r in start_row + 1..end_row {
            if mat.elems[r * cols + col] > mat.elems[pivot_row * cols + col] {
                pivot_row = r;
            }
        }
        if pivot_row != start_row {
            mat.swap_rows(start_row, pivot_row);
            if let Some(companion) = companion.as_deref_mut() {
                companion.swap_rows(start_row, pivot_row);
            }
            sign = -sign;
        }

        let pivot = mat.elems[start_row * cols + col];
        for r in start_row + 1..end_row {
            let factor = mat.elems[r * cols + col] / pivot;
            mat.elems[r * cols + col] = 0.0;
            let (pivot_row, row) = row_pair(&mut mat.elems, cols, start_row, r);
            for c in col + 1..cols {
                row[c] -= factor * pivot_row[c];
            }
            if let Some(companion) = companion.as_deref_mut() {
                let ccols = companion.cols;
                let (pivot_row, row) = row_pair(&mut companion.elems, ccols, start_row, r);
                for c in 0..ccols {
                    row[c] -= factor * pivot_row[c];
                }
            }
        }

        start_row += 1;
    }

    sign
}

/// Transforms `mat`, which must already be in echelon form, into *reduced* echelon form.
///
/// Walks the pivot rows bottom-up. Entries above a pivot are zeroed outright on `mat`, while the
/// companion receives the full `factor * pivot-row` subtraction that this zeroing stands for.
/// Finally the companion row is divided by the pivot value and the pivot entry itself becomes
/// exactly 1.
pub(super) fn backward(mat: &mut MatBuf, mut companion: Option<&mut MatBuf>, ep: f32) {
    debug_assert!(companion.as_ref().map_or(true, |c| c.rows == mat.rows));

    let (rows, cols) = (mat.rows, mat.cols);
    for r in (0..rows).rev() {
        let row = &mat.elems[r * cols..][..cols];
        let Some(lead) = row.iter().position(|&v| !near_zero(v, ep)) else {
            continue;
        };
        let pivot = mat.elems[r * cols + lead];

        for above in 0..r {
            let factor = mat.elems[above * cols + lead] / pivot;
            mat.elems[above * cols + lead] = 0.0;
            if let Some(companion) = companion.as_deref_mut() {
                let ccols = companion.cols;
                let (pivot_row, row) = row_pair(&mut companion.elems, ccols, r, above);
                for c in 0..ccols {
                    row[c] -= factor * pivot_row[c];
                }
            }
        }

        if let Some(companion) = companion.as_deref_mut() {
            for value in companion.row_mut(r) {
                *value /= pivot;
            }
        }
        mat.elems[r * cols + lead] = 1.0;
    }
}

/// Borrows row `a` immutably and row `b` mutably out of a row-major buffer. `a` and `b` must
/// differ.
fn row_pair(elems: &mut [f32], cols: usize, a: usize, b: usize) -> (&[f32], &mut [f32]) {
    debug_assert_ne!(a, b);
    if a < b {
        let (head, tail) = elems.split_at_mut(b * cols);
        (&head[a * cols..][..cols], &mut tail[..cols])
    } else {
        let (head, tail) = elems.split_at_mut(a * cols);
        (&tail[..cols], &mut head[b * cols..][..cols])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mat(rows: &[&[f32]]) -> MatBuf {
        MatBuf::from_rows(rows).unwrap()
    }

    #[test]
    fn forward_swaps_flip_sign() {
        let mut m = mat(&[&[0.0, 1.0], &[1.0, 0.0]]);
        let sign = forward(&mut m, None, 0.0);
        assert_eq!(sign, -1.0);
        assert_eq!(m, mat(&[&[1.0, 0.0], &[0.0, 1.0]]));
    }

    #[test]
    fn forward_prefers_largest_pivot() {
        let mut m = mat(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let sign = forward(&mut m, None, 0.0);
        // Row 1 has the larger leading entry, so the rows get exchanged.
        assert_eq!(sign, -1.0);
        assert_eq!(m.row(0), &[3.0, 4.0]);
        assert_eq!(m[(1, 0)], 0.0);
        assert!(m.is_echelon(0.0));
    }

    #[test]
    fn forward_mirrors_companion() {
        let mut m = mat(&[&[0.0, 2.0], &[1.0, 0.0]]);
        let mut companion = MatBuf::identity(2);
        forward(&mut m, Some(&mut companion), 0.0);
        // The only row operation is a swap, which the companion must replicate.
        assert_eq!(companion, mat(&[&[0.0, 1.0], &[1.0, 0.0]]));
    }

    #[test]
    fn forward_sinks_zero_rows() {
        let mut m = mat(&[&[0.0, 0.0], &[1.0, 2.0]]);
        forward(&mut m, None, 0.0);
        assert_eq!(m, mat(&[&[1.0, 2.0], &[0.0, 0.0]]));
    }

    #[test]
    fn forward_permutation_parity() {
        // Anti-diagonal permutation of 4 rows: two transpositions, even parity.
        let mut m = mat(&[
            &[0.0, 0.0, 0.0, 1.0],
            &[0.0, 0.0, 1.0, 0.0],
            &[0.0, 1.0, 0.0, 0.0],
            &[1.0, 0.0, 0.0, 0.0],
        ]);
        let sign = forward(&mut m, None, 0.0);
        assert_eq!(sign, 1.0);
        assert_eq!(m, MatBuf::identity(4));
    }

    #[test]
    fn backward_normalizes_pivots() {
        let mut m = mat(&[&[2.0, 4.0], &[0.0, 8.0]]);
        backward(&mut m, None, 0.0);
        assert!(m.is_reduced_echelon(0.0));
        assert_eq!(m, MatBuf::identity(2));
    }

    #[test]
    fn backward_skips_zero_rows() {
        let mut m = mat(&[&[3.0, 6.0], &[0.0, 0.0]]);
        backward(&mut m, None, 0.0);
        assert_eq!(m, mat(&[&[1.0, 6.0], &[0.0, 0.0]]));
        assert!(m.is_reduced_echelon(0.0));
    }

    #[test]
    fn row_pair_split() {
        let mut elems = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let (a, b) = row_pair(&mut elems, 2, 0, 2);
        assert_eq!(a, &[1.0, 2.0]);
        assert_eq!(b, &mut [5.0, 6.0]);
        let (a, b) = row_pair(&mut elems, 2, 2, 1);
        assert_eq!(a, &[5.0, 6.0]);
        assert_eq!(b, &mut [3.0, 4.0]);
    }
}
