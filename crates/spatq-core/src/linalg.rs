//! Small dense linear algebra for the palette solve.

use ndarray::Array2;

use crate::error::{Result, SpatqError};

/// Invert a square matrix by Gauss-Jordan elimination without pivoting.
///
/// The systems this runs on are small (K <= 256) and positive-definite
/// in practice, so pivoting is unnecessary. A zero diagonal entry during
/// elimination reports a singular system.
pub fn invert(matrix: &Array2<f64>) -> Result<Array2<f64>> {
    let n = matrix.nrows();
    debug_assert_eq!(n, matrix.ncols());

    let mut a = matrix.clone();
    let mut inv = Array2::<f64>::eye(n);

    // Reduce to echelon form, mirroring every row operation in `inv`.
    for i in 0..n {
        let pivot = a[[i, i]];
        if pivot == 0.0 {
            return Err(SpatqError::SingularPaletteSystem { row: i });
        }
        let scale = pivot.recip();
        for col in 0..n {
            a[[i, col]] *= scale;
            inv[[i, col]] *= scale;
        }
        let a_pivot_row = a.row(i).to_vec();
        let inv_pivot_row = inv.row(i).to_vec();
        for row in i + 1..n {
            let factor = a[[row, i]];
            if factor == 0.0 {
                continue;
            }
            for col in 0..n {
                a[[row, col]] -= factor * a_pivot_row[col];
                inv[[row, col]] -= factor * inv_pivot_row[col];
            }
        }
    }

    // Back-substitute.
    for i in (0..n).rev() {
        let a_pivot_row = a.row(i).to_vec();
        let inv_pivot_row = inv.row(i).to_vec();
        for row in 0..i {
            let factor = a[[row, i]];
            if factor == 0.0 {
                continue;
            }
            for col in 0..n {
                a[[row, col]] -= factor * a_pivot_row[col];
                inv[[row, col]] -= factor * inv_pivot_row[col];
            }
        }
    }

    Ok(inv)
}
