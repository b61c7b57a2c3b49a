//! Particle densities.

use ndarray::{Array, ArrayView, ArrayView2, Axis, Dimension, RemoveAxis};

use crate::numeric::IntegralScalar;
use crate::transformation::ShapeMismatchError;


/// Computes the particle density from a one-body density matrix and sets of ket and bra
/// single-particle functions:
/// ```math
///     \rho(\mathbf{x}) = \sum_{pq} \tilde{\phi}_p(\mathbf{x}) \rho_{qp} \phi_q(\mathbf{x}).
/// ```
///
/// The bra functions $`\tilde{\phi}_p`$ are the duals of the ket functions and enter the sum as
/// they are. For an orthonormal set they are the complex conjugates of the ket functions.
///
/// # Arguments
///
/// * `rho_qp` - The one-body density matrix, of shape $`(l, l)`$.
/// * `ket_spf` - The ket single-particle functions $`\phi_q`$. Axis 0 indexes the functions.
/// * `bra_spf` - The bra single-particle functions $`\tilde{\phi}_p`$, of the same shape as
/// `ket_spf`.
///
/// # Returns
///
/// The density tabulated on the grid spanned by the trailing axes of the functions.
pub fn compute_particle_density<T, D>(
    rho_qp: &ArrayView2<T>,
    ket_spf: &ArrayView<T, D>,
    bra_spf: &ArrayView<T, D>,
) -> Result<Array<T, D::Smaller>, ShapeMismatchError>
where
    T: IntegralScalar,
    D: Dimension + RemoveAxis,
{
    if bra_spf.shape() != ket_spf.shape() {
        return Err(ShapeMismatchError(format!(
            "bra functions with shape {:?} do not match ket functions with shape {:?}.",
            bra_spf.shape(),
            ket_spf.shape()
        )));
    }
    let l = ket_spf.shape().first().copied().ok_or_else(|| {
        ShapeMismatchError(
            "single-particle functions must have at least one axis indexing the functions."
                .to_string(),
        )
    })?;
    if rho_qp.shape() != [l, l] {
        return Err(ShapeMismatchError(format!(
            "density matrix with shape {:?} is incompatible with {l} single-particle functions.",
            rho_qp.shape()
        )));
    }

    let grid_size = ket_spf.shape()[1..].iter().product::<usize>();
    let ket_mat = ket_spf
        .to_shape((l, grid_size))
        .map_err(|err| ShapeMismatchError(err.to_string()))?;
    let bra_mat = bra_spf
        .to_shape((l, grid_size))
        .map_err(|err| ShapeMismatchError(err.to_string()))?;

    // sum_q rho_qp phi_q(x), indexed by p
    let rho_ket = rho_qp.t().dot(&ket_mat);
    (&bra_mat * &rho_ket)
        .sum_axis(Axis(0))
        .into_shape(ket_spf.raw_dim().remove_axis(Axis(0)))
        .map_err(|err| ShapeMismatchError(err.to_string()))
}
