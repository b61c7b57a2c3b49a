//! Expansion of spatial-orbital quantities into spin-orbitals.
//!
//! Spin-orbitals are ordered such that spin-orbital $`2k`$ is the $`\alpha`$-spin copy of
//! spatial orbital $`k`$ and spin-orbital $`2k + 1`$ is its $`\beta`$-spin copy.

use ndarray::{Array, Array2, Array4, ArrayView, ArrayView2, ArrayView4, Axis, Dimension, Slice};

use crate::numeric::IntegralScalar;
use crate::transformation::ShapeMismatchError;

pub mod slices;

#[cfg(test)]
#[path = "spin_tests.rs"]
mod spin_tests;

/// Kronecker delta $`\delta_{pq}`$.
pub fn delta(p: usize, q: usize) -> bool {
    p == q
}

/// Returns `true` if spin-orbitals `p` and `q` carry the same spin, *i.e.* if their indices have
/// the same parity.
pub fn spin_delta(p: usize, q: usize) -> bool {
    (p & 0x1) == (q & 0x1)
}

/// Expands a set of spatial single-particle functions into spin-orbitals by interleaving an
/// $`\alpha`$ and a $`\beta`$ copy of every function along axis 0.
///
/// # Arguments
///
/// * `spf` - The spatial single-particle functions. Axis 0 indexes the functions.
///
/// # Returns
///
/// The spin-orbital functions, with twice as many entries along axis 0 and unchanged trailing
/// axes.
pub fn add_spin_spf<T, D>(spf: &ArrayView<T, D>) -> Result<Array<T, D>, ShapeMismatchError>
where
    T: IntegralScalar,
    D: Dimension,
{
    let l = spf.shape().first().copied().ok_or_else(|| {
        ShapeMismatchError(
            "single-particle functions must have at least one axis indexing the functions."
                .to_string(),
        )
    })?;
    let mut dim = spf.raw_dim();
    dim[0] = 2 * l;
    let mut new_spf = Array::<T, D>::zeros(dim);
    new_spf
        .slice_axis_mut(Axis(0), Slice::new(0, None, 2))
        .assign(spf);
    new_spf
        .slice_axis_mut(Axis(0), Slice::new(1, None, 2))
        .assign(spf);
    Ok(new_spf)
}

/// Expands a set of spatial dual (bra) single-particle functions into spin-orbitals.
///
/// If no dual functions are given, none are returned, so that the caller can fall back on the
/// ket functions.
pub fn add_spin_bra_spf<T, D>(
    bra_spf: Option<&ArrayView<T, D>>,
) -> Result<Option<Array<T, D>>, ShapeMismatchError>
where
    T: IntegralScalar,
    D: Dimension,
{
    bra_spf.map(add_spin_spf).transpose()
}

/// Expands one-body matrix elements into spin-orbitals, *i.e.* computes
/// $`\mathbf{h} \otimes \mathbf{I}_2`$:
/// ```math
///     h_{pq} \to \delta_{\sigma_p \sigma_q} h_{\lfloor p/2 \rfloor \lfloor q/2 \rfloor}.
/// ```
pub fn add_spin_one_body<T>(h: &ArrayView2<T>) -> Result<Array2<T>, ShapeMismatchError>
where
    T: IntegralScalar,
{
    if h.nrows() != h.ncols() {
        return Err(ShapeMismatchError(format!(
            "one-body elements must be square, but have shape {:?}.",
            h.shape()
        )));
    }
    let l = 2 * h.nrows();
    Ok(Array2::from_shape_fn((l, l), |(p, q)| {
        if spin_delta(p, q) {
            h[(p / 2, q / 2)]
        } else {
            T::zero()
        }
    }))
}

/// Expands two-body matrix elements into spin-orbitals:
/// ```math
///     u_{pqrs} \to \delta_{\sigma_p \sigma_r} \delta_{\sigma_q \sigma_s}
///         u_{\lfloor p/2 \rfloor \lfloor q/2 \rfloor \lfloor r/2 \rfloor \lfloor s/2 \rfloor}.
/// ```
///
/// Spin is conserved separately for the first (axes 0 and 2) and second (axes 1 and 3)
/// particle.
pub fn add_spin_two_body<T>(u: &ArrayView4<T>) -> Result<Array4<T>, ShapeMismatchError>
where
    T: IntegralScalar,
{
    let l_spatial = u.shape()[0];
    if u.shape().iter().any(|&axis| axis != l_spatial) {
        return Err(ShapeMismatchError(format!(
            "two-body elements must have four equal axes, but have shape {:?}.",
            u.shape()
        )));
    }
    let l = 2 * l_spatial;
    Ok(Array4::from_shape_fn((l, l, l, l), |(p, q, r, s)| {
        if spin_delta(p, r) && spin_delta(q, s) {
            u[(p / 2, q / 2, r / 2, s / 2)]
        } else {
            T::zero()
        }
    }))
}
