//! Dense direct solve of the balance system.

use crate::error::{SolverError, SolverResult};
use nalgebra::{DMatrix, DVector};

/// Pivot ratio `min |U_ii| / max |U_ii|` below which the equilibrated system
/// is treated as singular.
pub const PIVOT_RATIO_MIN: f64 = 1e-11;

/// Solve `A·x = b` by LU factorization with partial pivoting.
///
/// Rows, then columns, are scaled to unit max-norm first. A zero or
/// negligible pivot, or a non-finite solution, is reported as
/// [`SolverError::Singular`], never returned.
pub fn solve_dense(mut a: DMatrix<f64>, mut b: DVector<f64>) -> SolverResult<DVector<f64>> {
    if !a.is_square() || a.nrows() != b.len() {
        return Err(SolverError::ProblemSetup {
            what: format!(
                "matrix {}x{} incompatible with right-hand side of length {}",
                a.nrows(),
                a.ncols(),
                b.len()
            ),
        });
    }

    for i in 0..a.nrows() {
        let scale = a.row(i).amax();
        if scale == 0.0 {
            return Err(SolverError::Singular {
                what: format!("row {i} is identically zero"),
            });
        }
        a.row_mut(i).scale_mut(1.0 / scale);
        b[i] /= scale;
    }

    let mut col_scale = DVector::zeros(a.ncols());
    for j in 0..a.ncols() {
        let scale = a.column(j).amax();
        if scale == 0.0 {
            return Err(SolverError::Singular {
                what: format!("column {j} is identically zero"),
            });
        }
        a.column_mut(j).scale_mut(1.0 / scale);
        col_scale[j] = scale;
    }

    let lu = a.lu();
    let pivots = lu.u().diagonal().map(f64::abs);
    let ratio = pivots.min() / pivots.max();
    if !(ratio >= PIVOT_RATIO_MIN) {
        return Err(SolverError::Singular {
            what: format!("rank-deficient matrix (pivot ratio {ratio:.3e})"),
        });
    }

    let mut x = lu.solve(&b).ok_or_else(|| SolverError::Singular {
        what: "zero pivot in LU factorization".to_string(),
    })?;
    x.component_div_assign(&col_scale);

    if let Some(i) = x.iter().position(|v| !v.is_finite()) {
        return Err(SolverError::Singular {
            what: format!("non-finite solution component {i}"),
        });
    }
    Ok(x)
}
