//! Element types for integral tensors.

use std::fmt;

use ndarray::{LinalgScalar, ScalarOperand};
use num_complex::ComplexFloat;

/// Trait bundling the requirements on the element type of every tensor handled by this crate.
///
/// Both real (`f64`) and complex (`Complex<f64>`) elements satisfy this trait, so that the choice
/// of numeric backend is made once, through the generic parameter of the structures and functions
/// that consume the tensors, and never changes the semantics of the transformations.
pub trait IntegralScalar:
    ComplexFloat + LinalgScalar + ScalarOperand + fmt::Debug + Send + Sync
{
}

impl<T> IntegralScalar for T where
    T: ComplexFloat + LinalgScalar + ScalarOperand + fmt::Debug + Send + Sync
{
}
