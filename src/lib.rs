//! # quantum-systems: Integral Tensors for Finite Quantum Many-Body Systems
//!
//! `quantum-systems` manages the matrix elements of finite quantum many-body systems, *e.g.*
//! atoms, molecules, quantum dots and model Hamiltonians, in a form suitable for second-quantised
//! many-body solvers. Its capabilities are:
//! - expansion of spatial-orbital quantities into spin-orbitals,
//! - anti-symmetrisation of two-body matrix elements,
//! - changes of single-particle basis for one-body and two-body elements as well as for
//!   single-particle functions tabulated on grids,
//! - partitioning of spin-orbitals into occupied/virtual and $`\alpha`$/$`\beta`$ blocks, and
//! - evaluation of particle densities from one-body density matrices.
//!
//! All tensors are [`ndarray`] arrays whose element type is any [`numeric::IntegralScalar`],
//! so that the same code handles real and complex integrals.
//!
//! ## Examples and usage
//!
//! For most items (structs, enums, functions, and traits), their usages are illustrated in test
//! functions. For more explanation, please consult this documentation.
//!
//! ## License
//!
//! GNU Lesser General Public License v3.0.

pub mod density;
pub mod numeric;
pub mod spin;
pub mod symmetrization;
pub mod system;
pub mod transformation;

#[cfg(test)]
mod testing;
