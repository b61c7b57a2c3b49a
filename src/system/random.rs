//! Systems of random matrix elements.

use ndarray::{
    Array, Array2, Array3, Array4, ArrayView2, ArrayView3, ArrayView4, Dimension, ShapeBuilder,
};
use num_complex::Complex;
use rand::Rng;

use crate::symmetrization::symmetrize_exchange;
use crate::system::IntegralProvider;
use crate::transformation::ShapeMismatchError;

#[cfg(test)]
#[path = "random_tests.rs"]
mod random_tests;

type C128 = Complex<f64>;

/// Returns a complex array of a given shape whose real and imaginary parts are drawn uniformly
/// from $`[0, 1)`$.
///
/// # Arguments
///
/// * `shape` - The shape of the array.
/// * `rng` - The random source.
pub fn get_random_elements<Sh, D, R>(shape: Sh, rng: &mut R) -> Array<C128, D>
where
    Sh: ShapeBuilder<Dim = D>,
    D: Dimension,
    R: Rng + ?Sized,
{
    Array::from_shape_simple_fn(shape, || C128::new(rng.gen::<f64>(), rng.gen::<f64>()))
}

/// A system of random matrix elements satisfying the permutational symmetries of second-quantised
/// integrals. This is useful for testing purely mathematical procedures that are agnostic of the
/// physics of any particular system.
///
/// All quantities are spatial; spin-orbitals are obtained by passing this provider to
/// [`QuantumSystem::from_provider`](crate::system::QuantumSystem::from_provider).
#[derive(Clone, Debug)]
pub struct RandomSystem {
    h: Array2<C128>,
    u: Array4<C128>,
    s: Array2<C128>,
    dipole_moment: Array3<C128>,
    nuclear_repulsion_energy: C128,
}

impl RandomSystem {
    /// Generates a new random system.
    ///
    /// The two-body elements are symmetrised under particle exchange, such that
    /// $`u_{pqrs} = u_{qpsr}`$.
    ///
    /// # Arguments
    ///
    /// * `l` - The number of spatial orbitals.
    /// * `dim` - The number of spatial dimensions, *i.e.* the number of dipole-moment
    /// components.
    /// * `rng` - The random source, which must be seeded by the caller for reproducibility.
    pub fn new<R: Rng + ?Sized>(
        l: usize,
        dim: usize,
        rng: &mut R,
    ) -> Result<Self, ShapeMismatchError> {
        let h = get_random_elements((l, l), rng);
        let u_raw = get_random_elements((l, l, l, l), rng);
        let u = symmetrize_exchange(&u_raw.view())?;
        let s = get_random_elements((l, l), rng);
        let dipole_moment = get_random_elements((dim, l, l), rng);
        let nuclear_repulsion_energy = C128::from(rng.gen::<f64>());
        log::debug!("Generated random system with {l} spatial orbitals in {dim} dimensions.");
        Ok(Self {
            h,
            u,
            s,
            dipole_moment,
            nuclear_repulsion_energy,
        })
    }
}

impl IntegralProvider<C128> for RandomSystem {
    fn n_spatial_orbitals(&self) -> usize {
        self.h.nrows()
    }

    fn one_body(&self) -> ArrayView2<'_, C128> {
        self.h.view()
    }

    fn two_body(&self) -> ArrayView4<'_, C128> {
        self.u.view()
    }

    fn overlap(&self) -> Option<ArrayView2<'_, C128>> {
        Some(self.s.view())
    }

    fn dipole_moment(&self) -> Option<ArrayView3<'_, C128>> {
        Some(self.dipole_moment.view())
    }

    fn nuclear_repulsion_energy(&self) -> C128 {
        self.nuclear_repulsion_energy
    }
}
