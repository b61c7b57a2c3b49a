//! Systems built from externally computed integrals.

use derive_builder::Builder;
use ndarray::{Array2, Array3, Array4, ArrayD, ArrayView2, ArrayView3, ArrayView4, ArrayViewD};

use crate::numeric::IntegralScalar;
use crate::system::IntegralProvider;

#[cfg(test)]
#[path = "custom_tests.rs"]
mod custom_tests;

/// Structure managing spatial-orbital integrals supplied by an external electronic-structure
/// package, a model Hamiltonian, or any other source.
#[derive(Builder, Clone, Debug)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct CustomSystem<T>
where
    T: IntegralScalar,
{
    /// The one-body Hamiltonian matrix elements, of shape $`(l, l)`$.
    h: Array2<T>,

    /// The two-body Hamiltonian matrix elements, of shape $`(l, l, l, l)`$.
    u: Array4<T>,

    /// The overlap matrix of the orbitals. If `None`, the orbitals are taken to be orthonormal.
    #[builder(default = "None")]
    s: Option<Array2<T>>,

    /// The dipole-moment matrix elements, of shape $`(d, l, l)`$.
    #[builder(default = "None")]
    dipole_moment: Option<Array3<T>>,

    #[builder(default = "T::zero()")]
    nuclear_repulsion_energy: T,

    /// The single-particle functions tabulated on a grid, with axis 0 indexing the orbitals.
    #[builder(default = "None")]
    spf: Option<ArrayD<T>>,

    /// The dual single-particle functions, of the same shape as [`Self::spf`].
    #[builder(default = "None")]
    bra_spf: Option<ArrayD<T>>,
}

impl<T> CustomSystemBuilder<T>
where
    T: IntegralScalar,
{
    fn validate(&self) -> Result<(), String> {
        let h = self
            .h
            .as_ref()
            .ok_or("No one-body elements found.".to_string())?;
        let u = self
            .u
            .as_ref()
            .ok_or("No two-body elements found.".to_string())?;
        let l = h.nrows();
        if h.shape() != [l, l] {
            return Err(format!(
                "The one-body elements have a non-square shape {:?}.",
                h.shape()
            ));
        }
        if u.shape() != [l, l, l, l] {
            return Err(format!(
                "The two-body elements ({:?}) are incompatible with {l} orbitals.",
                u.shape()
            ));
        }
        if let Some(Some(s)) = self.s.as_ref() {
            if s.shape() != [l, l] {
                return Err(format!(
                    "The overlap matrix ({:?}) is incompatible with {l} orbitals.",
                    s.shape()
                ));
            }
        }
        if let Some(Some(dipole_moment)) = self.dipole_moment.as_ref() {
            if dipole_moment.shape()[1..] != [l, l] {
                return Err(format!(
                    "The dipole-moment elements ({:?}) are incompatible with {l} orbitals.",
                    dipole_moment.shape()
                ));
            }
        }
        let spf = self.spf.as_ref().and_then(|spf| spf.as_ref());
        if let Some(spf) = spf {
            if spf.shape().first() != Some(&l) {
                return Err(format!(
                    "The single-particle functions ({:?}) are incompatible with {l} orbitals.",
                    spf.shape()
                ));
            }
        }
        if let Some(Some(bra_spf)) = self.bra_spf.as_ref() {
            match spf {
                Some(spf) if spf.shape() == bra_spf.shape() => {}
                Some(spf) => {
                    return Err(format!(
                        "The bra functions ({:?}) do not match the ket functions ({:?}).",
                        bra_spf.shape(),
                        spf.shape()
                    ))
                }
                None => return Err("Bra functions given without ket functions.".to_string()),
            }
        }
        Ok(())
    }
}

impl<T> CustomSystem<T>
where
    T: IntegralScalar,
{
    /// Returns a builder to construct a new [`CustomSystem`].
    pub fn builder() -> CustomSystemBuilder<T> {
        CustomSystemBuilder::default()
    }
}

impl<T> IntegralProvider<T> for CustomSystem<T>
where
    T: IntegralScalar,
{
    fn n_spatial_orbitals(&self) -> usize {
        self.h.nrows()
    }

    fn one_body(&self) -> ArrayView2<'_, T> {
        self.h.view()
    }

    fn two_body(&self) -> ArrayView4<'_, T> {
        self.u.view()
    }

    fn overlap(&self) -> Option<ArrayView2<'_, T>> {
        self.s.as_ref().map(|s| s.view())
    }

    fn dipole_moment(&self) -> Option<ArrayView3<'_, T>> {
        self.dipole_moment.as_ref().map(|d| d.view())
    }

    fn nuclear_repulsion_energy(&self) -> T {
        self.nuclear_repulsion_energy
    }

    fn spf(&self) -> Option<ArrayViewD<'_, T>> {
        self.spf.as_ref().map(|spf| spf.view())
    }

    fn bra_spf(&self) -> Option<ArrayViewD<'_, T>> {
        self.bra_spf.as_ref().map(|bra_spf| bra_spf.view())
    }
}
