//! Permutational symmetries of two-body matrix elements.

use ndarray::{Array4, ArrayView4};

use crate::numeric::IntegralScalar;
use crate::transformation::ShapeMismatchError;

#[cfg(test)]
#[path = "symmetrization_tests.rs"]
mod symmetrization_tests;

/// Anti-symmetrises two-body matrix elements in the physicist's convention:
/// ```math
///     \braket{pq||rs} = u_{pqrs} - u_{pqsr}.
/// ```
///
/// # Arguments
///
/// * `u` - The two-body matrix elements. Axes 2 and 3 must have equal lengths.
pub fn anti_symmetrize_u<T>(u: &ArrayView4<T>) -> Result<Array4<T>, ShapeMismatchError>
where
    T: IntegralScalar,
{
    if u.shape()[2] != u.shape()[3] {
        return Err(ShapeMismatchError(format!(
            "two-body elements with shape {:?} cannot be anti-symmetrised over their last two axes.",
            u.shape()
        )));
    }
    Ok(u - &u.view().permuted_axes([0, 1, 3, 2]))
}

/// Symmetrises two-body matrix elements under the simultaneous exchange of both particles:
/// ```math
///     u_{pqrs} \to \tfrac{1}{2} (u_{pqrs} + u_{qpsr}).
/// ```
///
/// The result satisfies $`u_{pqrs} = u_{qpsr}`$ exactly.
///
/// # Arguments
///
/// * `u` - The two-body matrix elements. Axes 0 and 1, and axes 2 and 3, must have equal
/// lengths.
pub fn symmetrize_exchange<T>(u: &ArrayView4<T>) -> Result<Array4<T>, ShapeMismatchError>
where
    T: IntegralScalar,
{
    if u.shape()[0] != u.shape()[1] || u.shape()[2] != u.shape()[3] {
        return Err(ShapeMismatchError(format!(
            "two-body elements with shape {:?} cannot be symmetrised under particle exchange.",
            u.shape()
        )));
    }
    let half = T::one() / (T::one() + T::one());
    Ok((u + &u.view().permuted_axes([1, 0, 3, 2])) * half)
}
