//! Quantum systems assembled from integral providers.

use std::fmt;
use std::ops::Range;

use anyhow::{self, ensure, format_err};
use derive_builder::Builder;
use itertools::iproduct;
use ndarray::{
    Array2, Array3, Array4, ArrayD, ArrayView2, ArrayView3, ArrayView4, ArrayViewD, Axis,
};
use serde::{Deserialize, Serialize};

use crate::density;
use crate::numeric::IntegralScalar;
use crate::spin::slices::{get_spin_block_slices, SpinBlockSlices};
use crate::spin::{add_spin_bra_spf, add_spin_one_body, add_spin_spf, add_spin_two_body};
use crate::symmetrization::anti_symmetrize_u;
use crate::transformation::{
    dual_coefficients, transform_bra_spf, transform_one_body_elements, transform_spf,
    transform_two_body_elements, BasisTransformable, ShapeMismatchError,
};

pub mod custom;
pub mod random;


// =================
// Trait definitions
// =================

/// Trait for sources of spatial-orbital integrals.
///
/// Every kind of system (*ab initio* molecules, quantum dots, electron gases, random test systems)
/// supplies the same set of quantities, all expressed in spatial orbitals. Spin-orbitals and
/// anti-symmetrisation are handled by [`QuantumSystem::from_provider`].
pub trait IntegralProvider<T>
where
    T: IntegralScalar,
{
    // ----------------
    // Required methods
    // ----------------
    /// The number of spatial orbitals $`l`$.
    fn n_spatial_orbitals(&self) -> usize;

    /// The one-body Hamiltonian matrix elements, of shape $`(l, l)`$.
    fn one_body(&self) -> ArrayView2<'_, T>;

    /// The two-body Hamiltonian matrix elements, of shape $`(l, l, l, l)`$.
    fn two_body(&self) -> ArrayView4<'_, T>;

    // ----------------
    // Provided methods
    // ----------------
    /// The overlap matrix of the orbitals. `None` denotes an orthonormal set.
    fn overlap(&self) -> Option<ArrayView2<'_, T>> {
        None
    }

    /// The dipole-moment matrix elements, of shape $`(d, l, l)`$.
    fn dipole_moment(&self) -> Option<ArrayView3<'_, T>> {
        None
    }

    fn nuclear_repulsion_energy(&self) -> T {
        T::zero()
    }

    /// The single-particle functions, with axis 0 indexing the orbitals.
    fn spf(&self) -> Option<ArrayViewD<'_, T>> {
        None
    }

    /// The dual single-particle functions. `None` denotes the complex conjugates of
    /// [`Self::spf`].
    fn bra_spf(&self) -> Option<ArrayViewD<'_, T>> {
        None
    }
}

// ==================
// Struct definitions
// ==================

// ----------
// Parameters
// ----------

/// A structure containing control parameters for setting up a [`QuantumSystem`].
#[derive(Clone, Builder, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemSetupParams {
    /// Boolean indicating if the spatial integrals are to be expanded into spin-orbitals.
    #[builder(default = "true")]
    pub add_spin: bool,

    /// Boolean indicating if the two-body elements are to be anti-symmetrised. The one-body,
    /// overlap and dipole-moment elements are unaffected.
    #[builder(default = "true")]
    pub anti_symmetrize: bool,

    /// The number of spatial dimensions, *i.e.* the number of dipole-moment components.
    #[builder(default = "3")]
    pub dim: usize,
}

impl SystemSetupParams {
    /// Returns a builder to construct a [`SystemSetupParams`] structure.
    pub fn builder() -> SystemSetupParamsBuilder {
        SystemSetupParamsBuilder::default()
    }
}

impl Default for SystemSetupParams {
    fn default() -> Self {
        Self {
            add_spin: true,
            anti_symmetrize: true,
            dim: 3,
        }
    }
}

impl fmt::Display for SystemSetupParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nice_bool = |b: bool| if b { "yes" } else { "no" };
        writeln!(f, "Expand into spin-orbitals: {}", nice_bool(self.add_spin))?;
        writeln!(
            f,
            "Anti-symmetrise two-body elements: {}",
            nice_bool(self.anti_symmetrize)
        )?;
        writeln!(f, "Spatial dimensions: {}", self.dim)?;
        Ok(())
    }
}

// ------
// System
// ------

/// Structure managing the integrals of a finite quantum many-body system in its current
/// single-particle basis.
#[derive(Clone, Debug)]
pub struct QuantumSystem<T>
where
    T: IntegralScalar,
{
    /// The number of particles, *i.e.* the number of occupied orbitals.
    n: usize,

    /// The number of orbitals (spin-orbitals if [`SystemSetupParams::add_spin`] is set).
    l: usize,

    /// The parameters with which this system has been set up.
    setup: SystemSetupParams,

    h: Array2<T>,

    u: Array4<T>,

    s: Array2<T>,

    dipole_moment: Option<Array3<T>>,

    nuclear_repulsion_energy: T,

    spf: Option<ArrayD<T>>,

    bra_spf: Option<ArrayD<T>>,
}

impl<T> QuantumSystem<T>
where
    T: IntegralScalar,
{
    /// Sets up a system from the spatial integrals of a provider.
    ///
    /// # Arguments
    ///
    /// * `n` - The number of particles.
    /// * `provider` - The source of the spatial integrals.
    /// * `setup` - Parameters controlling the spin expansion and anti-symmetrisation.
    ///
    /// # Returns
    ///
    /// The assembled system, or an error if the supplied integrals are inconsistent.
    pub fn from_provider<P>(
        n: usize,
        provider: &P,
        setup: &SystemSetupParams,
    ) -> Result<Self, anyhow::Error>
    where
        P: IntegralProvider<T> + ?Sized,
    {
        let l_spatial = provider.n_spatial_orbitals();
        let l = if setup.add_spin {
            2 * l_spatial
        } else {
            l_spatial
        };
        // Spatial orbitals hold two particles each.
        let capacity = if setup.add_spin { l } else { 2 * l };
        ensure!(
            n <= capacity,
            "{n} {} cannot be accommodated in {l} orbitals.",
            if n == 1 { "particle" } else { "particles" }
        );
        log::debug!("Setting up quantum system with {n} particles in {l_spatial} spatial orbitals.");
        log::debug!("{setup}");

        let h = provider.one_body();
        ensure!(
            h.shape() == [l_spatial, l_spatial],
            "One-body elements ({:?}) are incompatible with {l_spatial} spatial orbitals.",
            h.shape()
        );
        let h = spin_one_body(&h, setup.add_spin)?;

        let u = provider.two_body();
        ensure!(
            u.shape() == [l_spatial, l_spatial, l_spatial, l_spatial],
            "Two-body elements ({:?}) are incompatible with {l_spatial} spatial orbitals.",
            u.shape()
        );
        let u = if setup.add_spin {
            add_spin_two_body(&u)?
        } else {
            u.to_owned()
        };
        let u = if setup.anti_symmetrize {
            log::debug!("Anti-symmetrising two-body elements.");
            anti_symmetrize_u(&u.view())?
        } else {
            u
        };

        let s = match provider.overlap() {
            Some(s) => {
                ensure!(
                    s.shape() == [l_spatial, l_spatial],
                    "Overlap matrix ({:?}) is incompatible with {l_spatial} spatial orbitals.",
                    s.shape()
                );
                spin_one_body(&s, setup.add_spin)?
            }
            None => Array2::eye(l),
        };

        let dipole_moment = provider
            .dipole_moment()
            .map(|dipole_moment| {
                ensure!(
                    dipole_moment.shape() == [setup.dim, l_spatial, l_spatial],
                    "Dipole-moment elements ({:?}) are incompatible with {} spatial dimensions and {l_spatial} spatial orbitals.",
                    dipole_moment.shape(),
                    setup.dim
                );
                map_components(&dipole_moment, |d| spin_one_body(d, setup.add_spin))
                    .map_err(|err| format_err!(err))
            })
            .transpose()?;

        let (spf, bra_spf) = match provider.spf() {
            Some(spf) => {
                ensure!(
                    spf.shape().first() == Some(&l_spatial),
                    "Single-particle functions ({:?}) are incompatible with {l_spatial} spatial orbitals.",
                    spf.shape()
                );
                let bra_spf = provider.bra_spf();
                if let Some(bra_spf) = bra_spf.as_ref() {
                    ensure!(
                        bra_spf.shape() == spf.shape(),
                        "Bra functions ({:?}) do not match ket functions ({:?}).",
                        bra_spf.shape(),
                        spf.shape()
                    );
                }
                let (spf, bra_spf) = if setup.add_spin {
                    (add_spin_spf(&spf)?, add_spin_bra_spf(bra_spf.as_ref())?)
                } else {
                    (spf.to_owned(), bra_spf.map(|bra_spf| bra_spf.to_owned()))
                };
                let bra_spf = bra_spf.unwrap_or_else(|| spf.mapv(|x| x.conj()));
                (Some(spf), Some(bra_spf))
            }
            None => {
                if provider.bra_spf().is_some() {
                    log::warn!("Bra functions supplied without ket functions will be ignored.");
                }
                (None, None)
            }
        };

        Ok(Self {
            n,
            l,
            setup: setup.clone(),
            h,
            u,
            s,
            dipole_moment,
            nuclear_repulsion_energy: provider.nuclear_repulsion_energy(),
            spf,
            bra_spf,
        })
    }

    /// Returns the number of particles.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Returns the number of orbitals in the current basis.
    pub fn l(&self) -> usize {
        self.l
    }

    /// Returns the parameters with which this system has been set up.
    pub fn setup(&self) -> &SystemSetupParams {
        &self.setup
    }

    /// Returns the one-body Hamiltonian matrix elements.
    pub fn h(&self) -> &Array2<T> {
        &self.h
    }

    /// Returns the two-body Hamiltonian matrix elements, anti-symmetrised if requested at setup.
    pub fn u(&self) -> &Array4<T> {
        &self.u
    }

    /// Returns the overlap matrix.
    pub fn s(&self) -> &Array2<T> {
        &self.s
    }

    pub fn dipole_moment(&self) -> Option<&Array3<T>> {
        self.dipole_moment.as_ref()
    }

    pub fn nuclear_repulsion_energy(&self) -> T {
        self.nuclear_repulsion_energy
    }

    pub fn spf(&self) -> Option<&ArrayD<T>> {
        self.spf.as_ref()
    }

    pub fn bra_spf(&self) -> Option<&ArrayD<T>> {
        self.bra_spf.as_ref()
    }

    /// Returns the indices of the occupied orbitals.
    pub fn occupied_indices(&self) -> Range<usize> {
        0..self.n.min(self.l)
    }

    /// Returns the indices of the virtual orbitals.
    pub fn virtual_indices(&self) -> Range<usize> {
        self.n.min(self.l)..self.l
    }

    /// Returns the spin-block slicing of this system's spin-orbitals.
    ///
    /// # Arguments
    ///
    /// * `n_a` - The number of occupied spin-orbitals with $`\alpha`$ spin.
    pub fn spin_block_slices(&self, n_a: usize) -> Result<SpinBlockSlices, anyhow::Error> {
        ensure!(
            self.setup.add_spin,
            "Spin-block slices are only defined for systems in spin-orbitals."
        );
        Ok(get_spin_block_slices(self.n, n_a, self.l)?)
    }

    /// Constructs the Fock matrix of the reference determinant occupying the first orbitals.
    ///
    /// For spin-orbitals,
    /// ```math
    ///     f_{pq} = h_{pq} + \sum_{i} \braket{pi||qi},
    /// ```
    /// where the sum runs over the $`n`$ occupied spin-orbitals. For spatial orbitals, a
    /// closed-shell reference with $`n/2`$ doubly occupied orbitals is assumed:
    /// ```math
    ///     f_{pq} = h_{pq} + \sum_{i} (2 u_{piqi} - u_{piiq}).
    /// ```
    pub fn construct_fock_matrix(&self) -> Result<Array2<T>, anyhow::Error> {
        let two = T::one() + T::one();
        let u = &self.u;
        let occupied = self.closed_shell_occupied_range()?;
        let mut f = self.h.clone();
        for ((p, q), f_pq) in f.indexed_iter_mut() {
            *f_pq = occupied.clone().fold(*f_pq, |acc, i| {
                match (self.setup.add_spin, self.setup.anti_symmetrize) {
                    (true, true) => acc + u[(p, i, q, i)],
                    (true, false) => acc + u[(p, i, q, i)] - u[(p, i, i, q)],
                    (false, _) => acc + two * u[(p, i, q, i)] - u[(p, i, i, q)],
                }
            });
        }
        Ok(f)
    }

    /// Computes the energy of the reference determinant occupying the first orbitals, including
    /// the nuclear repulsion energy.
    ///
    /// For spin-orbitals,
    /// ```math
    ///     E_0 = \sum_i h_{ii} + \tfrac{1}{2} \sum_{ij} \braket{ij||ij} + E_{\mathrm{nuc}}.
    /// ```
    /// For spatial orbitals, a closed-shell reference is assumed:
    /// ```math
    ///     E_0 = 2 \sum_i h_{ii} + \sum_{ij} (2 u_{ijij} - u_{ijji}) + E_{\mathrm{nuc}}.
    /// ```
    pub fn compute_reference_energy(&self) -> Result<T, anyhow::Error> {
        let two = T::one() + T::one();
        let u = &self.u;
        let occupied = self.closed_shell_occupied_range()?;
        let e_one = occupied
            .clone()
            .fold(T::zero(), |acc, i| acc + self.h[(i, i)]);
        let e_two = iproduct!(occupied.clone(), occupied).fold(T::zero(), |acc, (i, j)| {
            match (self.setup.add_spin, self.setup.anti_symmetrize) {
                (true, true) => acc + u[(i, j, i, j)],
                (true, false) => acc + u[(i, j, i, j)] - u[(i, j, j, i)],
                (false, _) => acc + two * u[(i, j, i, j)] - u[(i, j, j, i)],
            }
        });
        let energy = if self.setup.add_spin {
            e_one + e_two / two
        } else {
            two * e_one + e_two
        };
        Ok(energy + self.nuclear_repulsion_energy)
    }

    /// Computes the particle density of a one-body density matrix on the grid of this system's
    /// single-particle functions.
    ///
    /// # Arguments
    ///
    /// * `rho_qp` - The one-body density matrix in the current basis.
    pub fn compute_particle_density(
        &self,
        rho_qp: &ArrayView2<T>,
    ) -> Result<ArrayD<T>, anyhow::Error> {
        let spf = self
            .spf
            .as_ref()
            .ok_or_else(|| format_err!("No single-particle functions attached to the system."))?;
        let bra_spf = self
            .bra_spf
            .as_ref()
            .ok_or_else(|| format_err!("No bra single-particle functions attached to the system."))?;
        Ok(density::compute_particle_density(
            rho_qp,
            &spf.view(),
            &bra_spf.view(),
        )?)
    }

    /// Returns the orbitals occupied in the reference determinant, which must be closed-shell
    /// when working with spatial orbitals.
    fn closed_shell_occupied_range(&self) -> Result<Range<usize>, anyhow::Error> {
        if self.setup.add_spin {
            Ok(self.occupied_indices())
        } else {
            ensure!(
                !self.setup.anti_symmetrize,
                "Closed-shell expressions require spatial two-body elements that have not been anti-symmetrised."
            );
            ensure!(
                self.n % 2 == 0,
                "A closed-shell reference requires an even number of particles, but {} found.",
                self.n
            );
            Ok(0..self.n / 2)
        }
    }
}

impl<T> BasisTransformable<T> for QuantumSystem<T>
where
    T: IntegralScalar,
{
    fn change_basis_mut(
        &mut self,
        c: &ArrayView2<T>,
        c_tilde: Option<&ArrayView2<T>>,
    ) -> Result<&mut Self, ShapeMismatchError> {
        if c.shape() != [self.l, self.l] {
            return Err(ShapeMismatchError(format!(
                "coefficient matrix with shape {:?} cannot transform a system of {} orbitals.",
                c.shape(),
                self.l
            )));
        }
        let c_tilde = dual_coefficients(c, c_tilde);
        let c_tilde = c_tilde.view();
        if c_tilde.shape() != [self.l, self.l] {
            return Err(ShapeMismatchError(format!(
                "dual coefficient matrix with shape {:?} cannot transform a system of {} orbitals.",
                c_tilde.shape(),
                self.l
            )));
        }
        log::debug!("Changing basis of a system of {} orbitals.", self.l);

        let h = transform_one_body_elements(&self.h.view(), c, Some(&c_tilde))?;
        let u = transform_two_body_elements(&self.u.view(), c, Some(&c_tilde))?;
        let s = transform_one_body_elements(&self.s.view(), c, Some(&c_tilde))?;
        let dipole_moment = self
            .dipole_moment
            .as_ref()
            .map(|dipole_moment| {
                map_components(&dipole_moment.view(), |d| {
                    transform_one_body_elements(d, c, Some(&c_tilde))
                })
            })
            .transpose()?;
        let spf = self
            .spf
            .as_ref()
            .map(|spf| transform_spf(&spf.view(), c))
            .transpose()?;
        let bra_spf = self
            .bra_spf
            .as_ref()
            .map(|bra_spf| transform_bra_spf(&bra_spf.view(), &c_tilde))
            .transpose()?;

        self.h = h;
        self.u = u;
        self.s = s;
        self.dipole_moment = dipole_moment;
        self.spf = spf;
        self.bra_spf = bra_spf;
        Ok(self)
    }
}

impl<T> fmt::Display for QuantumSystem<T>
where
    T: IntegralScalar,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "QuantumSystem[{} {} in {} {}{}]",
            self.n,
            if self.n == 1 { "particle" } else { "particles" },
            self.l,
            if self.setup.add_spin {
                "spin-orbitals"
            } else {
                "spatial orbitals"
            },
            if self.spf.is_some() { ", with SPFs" } else { "" }
        )
    }
}

// =========
// Functions
// =========

/// Expands one-body elements into spin-orbitals if requested.
fn spin_one_body<T>(h: &ArrayView2<T>, add_spin: bool) -> Result<Array2<T>, ShapeMismatchError>
where
    T: IntegralScalar,
{
    if add_spin {
        add_spin_one_body(h)
    } else {
        Ok(h.to_owned())
    }
}

/// Applies a one-body operation to every component of a stack of one-body elements, such as the
/// Cartesian components of the dipole moment.
fn map_components<T, F>(
    components: &ArrayView3<T>,
    f: F,
) -> Result<Array3<T>, ShapeMismatchError>
where
    T: IntegralScalar,
    F: Fn(&ArrayView2<T>) -> Result<Array2<T>, ShapeMismatchError>,
{
    let mapped = components
        .axis_iter(Axis(0))
        .map(|component| f(&component))
        .collect::<Result<Vec<_>, _>>()?;
    let (nrows, ncols) = mapped
        .first()
        .map(|m| m.dim())
        .unwrap_or((0, 0));
    let mut out = Array3::<T>::zeros((mapped.len(), nrows, ncols));
    for (mut slot, m) in out.axis_iter_mut(Axis(0)).zip(mapped.iter()) {
        slot.assign(m);
    }
    Ok(out)
}
