//! Transformations of single-particle functions and integral tensors under a change of
//! single-particle basis.
//!
//! A new basis $`\{\phi'_j\}`$ is described by a coefficient matrix $`\mathbf{C}`$ and its dual
//! $`\tilde{\mathbf{C}}`$ such that
//! ```math
//!     \phi'_j = \sum_i \phi_i C_{ij},
//!     \qquad
//!     \tilde{\phi}'_i = \sum_j \tilde{C}_{ij} \tilde{\phi}_j.
//! ```
//! For orthonormal transformations $`\tilde{\mathbf{C}} = \mathbf{C}^{\dagger}`$, which is the
//! default whenever no dual matrix is supplied.

use std::error::Error;
use std::fmt;

use ndarray::{Array, Array2, Array4, ArrayView, ArrayView2, ArrayView4, Dimension, Ix4};
use ndarray_einsum_beta::einsum;

use crate::numeric::IntegralScalar;


// =================
// Error definitions
// =================

/// Error raised when the shapes of the tensors passed to an operation are incompatible.
#[derive(Debug, Clone)]
pub struct ShapeMismatchError(pub String);

impl fmt::Display for ShapeMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Shape mismatch: {}", self.0)
    }
}

impl Error for ShapeMismatchError {}

// =================
// Trait definitions
// =================

/// Trait for structures whose tensors can be re-expressed in a new single-particle basis.
pub trait BasisTransformable<T>: Clone
where
    T: IntegralScalar,
{
    // ----------------
    // Required methods
    // ----------------
    /// Performs a change of basis in-place.
    ///
    /// # Arguments
    ///
    /// * `c` - The coefficient matrix $`\mathbf{C}`$ of the new basis in terms of the old.
    /// * `c_tilde` - The dual coefficient matrix $`\tilde{\mathbf{C}}`$. If `None`,
    /// $`\mathbf{C}^{\dagger}`$ is used.
    fn change_basis_mut(
        &mut self,
        c: &ArrayView2<T>,
        c_tilde: Option<&ArrayView2<T>>,
    ) -> Result<&mut Self, ShapeMismatchError>;

    // ----------------
    // Provided methods
    // ----------------
    /// Performs a change of basis and returns the transformed result.
    ///
    /// # Arguments
    ///
    /// * `c` - The coefficient matrix $`\mathbf{C}`$ of the new basis in terms of the old.
    /// * `c_tilde` - The dual coefficient matrix $`\tilde{\mathbf{C}}`$. If `None`,
    /// $`\mathbf{C}^{\dagger}`$ is used.
    ///
    /// # Returns
    ///
    /// The transformed result.
    fn change_basis(
        &self,
        c: &ArrayView2<T>,
        c_tilde: Option<&ArrayView2<T>>,
    ) -> Result<Self, ShapeMismatchError> {
        let mut tself = self.clone();
        tself.change_basis_mut(c, c_tilde)?;
        Ok(tself)
    }
}

// =========
// Functions
// =========

/// Returns the dual coefficient matrix, falling back to $`\mathbf{C}^{\dagger}`$.
pub(crate) fn dual_coefficients<T>(c: &ArrayView2<T>, c_tilde: Option<&ArrayView2<T>>) -> Array2<T>
where
    T: IntegralScalar,
{
    match c_tilde {
        Some(c_tilde) => c_tilde.to_owned(),
        None => c.t().mapv(|x| x.conj()),
    }
}

/// Transforms a set of single-particle functions into a new basis.
///
/// Axis 0 of `spf` is contracted with axis 0 of `c`:
/// ```math
///     \phi'_j(\mathbf{x}) = \sum_i C_{ij} \phi_i(\mathbf{x}).
/// ```
///
/// # Arguments
///
/// * `spf` - The single-particle functions. Axis 0 indexes the functions; all remaining axes
/// describe the grid on which each function is tabulated.
/// * `c` - The coefficient matrix $`\mathbf{C}`$.
///
/// # Returns
///
/// The transformed functions, with unchanged trailing axes.
pub fn transform_spf<T, D>(
    spf: &ArrayView<T, D>,
    c: &ArrayView2<T>,
) -> Result<Array<T, D>, ShapeMismatchError>
where
    T: IntegralScalar,
    D: Dimension,
{
    let l = leading_length(spf)?;
    if c.nrows() != l {
        return Err(ShapeMismatchError(format!(
            "coefficient matrix with shape {:?} cannot transform {l} single-particle functions.",
            c.shape()
        )));
    }
    let grid_size = spf.shape()[1..].iter().product::<usize>();
    let spf_mat = spf
        .to_shape((l, grid_size))
        .map_err(|err| ShapeMismatchError(err.to_string()))?;
    let mut dim = spf.raw_dim();
    dim[0] = c.ncols();
    c.t()
        .dot(&spf_mat)
        .into_shape(dim)
        .map_err(|err| ShapeMismatchError(err.to_string()))
}

/// Transforms a set of dual (bra) single-particle functions into a new basis.
///
/// Axis 1 of `c_tilde` is contracted with axis 0 of `bra_spf`:
/// ```math
///     \tilde{\phi}'_i(\mathbf{x}) = \sum_j \tilde{C}_{ij} \tilde{\phi}_j(\mathbf{x}).
/// ```
///
/// # Arguments
///
/// * `bra_spf` - The dual single-particle functions. Axis 0 indexes the functions.
/// * `c_tilde` - The dual coefficient matrix $`\tilde{\mathbf{C}}`$.
///
/// # Returns
///
/// The transformed dual functions, with unchanged trailing axes.
pub fn transform_bra_spf<T, D>(
    bra_spf: &ArrayView<T, D>,
    c_tilde: &ArrayView2<T>,
) -> Result<Array<T, D>, ShapeMismatchError>
where
    T: IntegralScalar,
    D: Dimension,
{
    let l = leading_length(bra_spf)?;
    if c_tilde.ncols() != l {
        return Err(ShapeMismatchError(format!(
            "dual coefficient matrix with shape {:?} cannot transform {l} bra single-particle functions.",
            c_tilde.shape()
        )));
    }
    let grid_size = bra_spf.shape()[1..].iter().product::<usize>();
    let bra_mat = bra_spf
        .to_shape((l, grid_size))
        .map_err(|err| ShapeMismatchError(err.to_string()))?;
    let mut dim = bra_spf.raw_dim();
    dim[0] = c_tilde.nrows();
    c_tilde
        .dot(&bra_mat)
        .into_shape(dim)
        .map_err(|err| ShapeMismatchError(err.to_string()))
}

/// Transforms one-body matrix elements into a new basis:
/// ```math
///     \mathbf{h}' = \tilde{\mathbf{C}} \mathbf{h} \mathbf{C}.
/// ```
///
/// # Arguments
///
/// * `h` - The one-body matrix elements, of shape $`(l, l)`$.
/// * `c` - The coefficient matrix $`\mathbf{C}`$.
/// * `c_tilde` - The dual coefficient matrix $`\tilde{\mathbf{C}}`$. If `None`,
/// $`\mathbf{C}^{\dagger}`$ is used.
pub fn transform_one_body_elements<T>(
    h: &ArrayView2<T>,
    c: &ArrayView2<T>,
    c_tilde: Option<&ArrayView2<T>>,
) -> Result<Array2<T>, ShapeMismatchError>
where
    T: IntegralScalar,
{
    let c_tilde = dual_coefficients(c, c_tilde);
    if h.nrows() != h.ncols() {
        return Err(ShapeMismatchError(format!(
            "one-body elements must be square, but have shape {:?}.",
            h.shape()
        )));
    }
    if c.nrows() != h.ncols() || c_tilde.ncols() != h.nrows() {
        return Err(ShapeMismatchError(format!(
            "coefficient matrices with shapes {:?} and {:?} are incompatible with one-body elements of shape {:?}.",
            c.shape(),
            c_tilde.shape(),
            h.shape()
        )));
    }
    Ok(c_tilde.dot(h).dot(c))
}

/// Transforms two-body matrix elements into a new basis:
/// ```math
///     u'_{pqrs} = \sum_{abcd}
///         \tilde{C}_{pa} \tilde{C}_{qb} u_{abcd} C_{cr} C_{ds}.
/// ```
///
/// The two bra indices (axes 0 and 1) transform with $`\tilde{\mathbf{C}}`$ and the two ket
/// indices (axes 2 and 3) with $`\mathbf{C}`$. The contraction is carried out one index at a
/// time, starting from axis 3, so that no intermediate exceeds $`O(l^4)`$ elements.
///
/// # Arguments
///
/// * `u` - The two-body matrix elements, of shape $`(l, l, l, l)`$.
/// * `c` - The coefficient matrix $`\mathbf{C}`$.
/// * `c_tilde` - The dual coefficient matrix $`\tilde{\mathbf{C}}`$. If `None`,
/// $`\mathbf{C}^{\dagger}`$ is used.
pub fn transform_two_body_elements<T>(
    u: &ArrayView4<T>,
    c: &ArrayView2<T>,
    c_tilde: Option<&ArrayView2<T>>,
) -> Result<Array4<T>, ShapeMismatchError>
where
    T: IntegralScalar,
{
    let c_tilde = dual_coefficients(c, c_tilde);
    let l = u.shape()[0];
    if u.shape().iter().any(|&axis| axis != l) {
        return Err(ShapeMismatchError(format!(
            "two-body elements must have four equal axes, but have shape {:?}.",
            u.shape()
        )));
    }
    if c.nrows() != l || c_tilde.ncols() != l {
        return Err(ShapeMismatchError(format!(
            "coefficient matrices with shapes {:?} and {:?} are incompatible with two-body elements of shape {:?}.",
            c.shape(),
            c_tilde.shape(),
            u.shape()
        )));
    }

    let einsum_err = |err: &'static str| ShapeMismatchError(err.to_string());
    // abcd, ds -> abcs
    let u_abcs = einsum("abcd,ds->abcs", &[u, c]).map_err(einsum_err)?;
    // abcs, cr -> abrs
    let u_abrs = einsum("abcs,cr->abrs", &[&u_abcs, c]).map_err(einsum_err)?;
    // qb, abrs -> aqrs
    let u_aqrs = einsum("qb,abrs->aqrs", &[&c_tilde, &u_abrs]).map_err(einsum_err)?;
    // pa, aqrs -> pqrs
    einsum("pa,aqrs->pqrs", &[&c_tilde, &u_aqrs])
        .map_err(einsum_err)?
        .into_dimensionality::<Ix4>()
        .map_err(|err| ShapeMismatchError(err.to_string()))
}

/// Returns the length of axis 0 of a set of single-particle functions.
fn leading_length<T, D>(spf: &ArrayView<T, D>) -> Result<usize, ShapeMismatchError>
where
    D: Dimension,
{
    spf.shape().first().copied().ok_or_else(|| {
        ShapeMismatchError(
            "single-particle functions must have at least one axis indexing the functions."
                .to_string(),
        )
    })
}
