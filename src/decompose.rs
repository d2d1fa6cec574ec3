
// imports
use crate::error::LsaError;

use nalgebra::{DMatrix, SVD};
use ndarray::{Array1, Array2, Axis, s};
use ndarray_stats::DeviationExt;
use tracing::debug;


/// Rank k factors kept after truncation, `x_k = u_k * diag(sigma_k) * v_k`.
#[derive(Clone, Debug)]
pub struct Truncated {
    pub u_k: Array2<f64>,     // (M, k), row i is the embedding of keyword i
    pub sigma_k: Array1<f64>, // (k), descending
    pub v_k: Array2<f64>,     // (k, N), column d is the embedding of document d
}

impl Truncated {

    pub fn dimension(&self) -> usize {
        self.sigma_k.len()
    }

    /// The rank k approximation of the decomposed matrix.
    pub fn reconstruct(&self) -> Array2<f64> {
        // broadcasting over the last axis scales column j of u_k by sigma_j
        (&self.u_k * &self.sigma_k).dot(&self.v_k)
    }

    /// Frobenius norm of `x - x_k`.
    pub fn reconstruction_error(&self, x_mat: &Array2<f64>) -> Result<f64, LsaError> {
        let sq_dist = x_mat
        .sq_l2_dist(&self.reconstruct())
        .map_err(|e| LsaError::Decomposition(e.to_string()))?;
        Ok(sq_dist.sqrt())
    }

}


/// Singular value decomposition `x = u * diag(sigma) * v_t` with singular values in
/// descending order. Only the leading min(M, N) singular vectors are kept, the rest of
/// u and v never contribute to a truncation.
#[derive(Clone, Debug)]
pub struct Decomposition {
    pub u: Array2<f64>,     // (M, r)
    pub sigma: Array1<f64>, // (r)
    pub v_t: Array2<f64>,   // (r, N)
}

impl Decomposition {

    fn to_nalgebra(x_mat: &Array2<f64>) -> DMatrix<f64> {
        let (m, n) = x_mat.dim();
        DMatrix::from_fn(m, n, |i, j| x_mat[[i, j]])
    }

    fn from_nalgebra(mat: &DMatrix<f64>) -> Array2<f64> {
        Array2::from_shape_fn((mat.nrows(), mat.ncols()), |(i, j)| mat[(i, j)])
    }

    /// Checks `1 <= k <= min(M, N)` before any numeric work.
    pub fn check_dimension(shape: (usize, usize), k: usize) -> Result<(), LsaError> {
        let (m, n) = shape;
        if m == 0 {
            return Err(LsaError::EmptyVocabulary);
        }
        let max = m.min(n);
        if k < 1 || k > max {
            return Err(LsaError::Dimension { requested: k, max });
        }
        Ok(())
    }

    pub fn svd(x_mat: &Array2<f64>) -> Result<Decomposition, LsaError> {

        let svd = SVD::try_new(Decomposition::to_nalgebra(x_mat), true, true, f64::EPSILON, 0)
        .ok_or_else(|| LsaError::Decomposition("did not converge".to_string()))?;

        let u = svd.u.as_ref().ok_or_else(|| LsaError::Decomposition("left singular vectors were not computed".to_string()))?;
        let v_t = svd.v_t.as_ref().ok_or_else(|| LsaError::Decomposition("right singular vectors were not computed".to_string()))?;
        let u = Decomposition::from_nalgebra(u);
        let v_t = Decomposition::from_nalgebra(v_t);

        // order by descending singular value, ties keep their position
        let mut order: Vec<usize> = (0..svd.singular_values.len()).collect();
        order.sort_by(|&a, &b| svd.singular_values[b].total_cmp(&svd.singular_values[a]));

        let sigma: Array1<f64> = order.iter().map(|&i| svd.singular_values[i]).collect();
        let u = u.select(Axis(1), &order);
        let v_t = v_t.select(Axis(0), &order);

        debug!(shape = ?x_mat.dim(), rank_bound = sigma.len(), "computed svd");

        Ok(Self {
            u,
            sigma,
            v_t
        })
    }

    /// Keeps the first k columns of u, the first k singular values and the first k rows of v_t.
    pub fn truncate(&self, k: usize) -> Result<Truncated, LsaError> {

        let max = self.sigma.len();
        if k < 1 || k > max {
            return Err(LsaError::Dimension { requested: k, max });
        }

        Ok(Truncated {
            u_k: self.u.slice(s![.., ..k]).to_owned(),
            sigma_k: self.sigma.slice(s![..k]).to_owned(),
            v_k: self.v_t.slice(s![..k, ..]).to_owned(),
        })
    }

    /// Validates k, decomposes and truncates.
    pub fn run(x_mat: &Array2<f64>, k: usize) -> Result<Truncated, LsaError> {
        Decomposition::check_dimension(x_mat.dim(), k)?;
        Decomposition::svd(x_mat)?.truncate(k)
    }

}
