//! Helpers shared by the unit tests.

use ndarray::{Array, Array2, Dimension, ShapeBuilder};
use num_complex::Complex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::numeric::IntegralScalar;

pub(crate) type C128 = Complex<f64>;

pub(crate) fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Returns a real array with elements drawn uniformly from $`[-0.5, 0.5)`$.
pub(crate) fn random_real<Sh, D>(shape: Sh, rng: &mut StdRng) -> Array<f64, D>
where
    Sh: ShapeBuilder<Dim = D>,
    D: Dimension,
{
    Array::from_shape_simple_fn(shape, || rng.gen::<f64>() - 0.5)
}

/// Returns a complex array whose real and imaginary parts are drawn uniformly from
/// $`[-0.5, 0.5)`$.
pub(crate) fn random_complex<Sh, D>(shape: Sh, rng: &mut StdRng) -> Array<C128, D>
where
    Sh: ShapeBuilder<Dim = D>,
    D: Dimension,
{
    Array::from_shape_simple_fn(shape, || {
        C128::new(rng.gen::<f64>() - 0.5, rng.gen::<f64>() - 0.5)
    })
}

/// Orthonormalises the columns of `a` by the modified Gram--Schmidt procedure.
pub(crate) fn gram_schmidt<T: IntegralScalar>(a: &Array2<T>) -> Array2<T> {
    let mut q = Array2::<T>::zeros(a.raw_dim());
    for j in 0..a.ncols() {
        let mut v = a.column(j).to_owned();
        for k in 0..j {
            let qk = q.column(k);
            let proj = qk
                .iter()
                .zip(v.iter())
                .fold(T::zero(), |acc, (&x, &y)| acc + x.conj() * y);
            v.zip_mut_with(&qk, |vi, &qi| *vi = *vi - proj * qi);
        }
        let norm = v
            .iter()
            .fold(T::zero(), |acc, &x| acc + x.conj() * x)
            .sqrt();
        q.column_mut(j).assign(&v.mapv(|x| x / norm));
    }
    q
}

pub(crate) fn random_unitary(l: usize, rng: &mut StdRng) -> Array2<C128> {
    gram_schmidt(&random_complex((l, l), rng))
}

pub(crate) fn random_orthogonal(l: usize, rng: &mut StdRng) -> Array2<f64> {
    gram_schmidt(&random_real((l, l), rng))
}
