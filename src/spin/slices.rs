//! Occupied/virtual and $`\alpha`$/$`\beta`$ partitioning of spin-orbitals.

use std::error::Error;
use std::fmt;
use std::iter::StepBy;
use std::ops::Range;

use ndarray::Slice;
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "slices_tests.rs"]
mod slices_tests;

/// Error raised when an occupation partition is inconsistent with the spin-orbital basis.
#[derive(Debug, Clone)]
pub struct OccupationPartitionError(pub String);

impl fmt::Display for OccupationPartitionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Invalid occupation partition: {}", self.0)
    }
}

impl Error for OccupationPartitionError {}

/// A strided range of spin-orbital indices, `start..stop` with stride `step`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinBlockSlice {
    pub start: usize,
    pub stop: usize,
    pub step: usize,
}

impl SpinBlockSlice {
    /// The number of spin-orbital indices in the slice.
    pub fn len(&self) -> usize {
        if self.stop <= self.start {
            0
        } else {
            (self.stop - self.start + self.step - 1) / self.step
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the spin-orbital indices in the slice.
    pub fn iter(&self) -> StepBy<Range<usize>> {
        (self.start..self.stop).step_by(self.step)
    }

    /// Returns the equivalent [`ndarray::Slice`] for slicing tensor axes.
    pub fn as_slice(&self) -> Slice {
        Slice::new(
            self.start.min(self.stop) as isize,
            Some(self.stop as isize),
            self.step as isize,
        )
    }
}

impl fmt::Display for SpinBlockSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.start, self.stop, self.step)
    }
}

/// The four spin blocks of a spin-orbital basis with even-odd spin ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinBlockSlices {
    /// Occupied spin-orbitals with $`\alpha`$ spin.
    pub occupied_alpha: SpinBlockSlice,

    /// Occupied spin-orbitals with $`\beta`$ spin.
    pub occupied_beta: SpinBlockSlice,

    /// Virtual spin-orbitals with $`\alpha`$ spin.
    pub virtual_alpha: SpinBlockSlice,

    /// Virtual spin-orbitals with $`\beta`$ spin.
    pub virtual_beta: SpinBlockSlice,
}

impl SpinBlockSlices {
    /// Returns the slices in the order (occupied alpha, occupied beta, virtual alpha, virtual
    /// beta).
    pub fn to_array(&self) -> [SpinBlockSlice; 4] {
        [
            self.occupied_alpha,
            self.occupied_beta,
            self.virtual_alpha,
            self.virtual_beta,
        ]
    }
}

impl fmt::Display for SpinBlockSlices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "o_a = {}, o_b = {}, v_a = {}, v_b = {}",
            self.occupied_alpha, self.occupied_beta, self.virtual_alpha, self.virtual_beta
        )
    }
}

/// Computes the spin-block slicing of a spin-orbital basis.
///
/// There are as many $`\alpha`$ as $`\beta`$ spin-orbitals, *i.e.* $`l = 2 l_{\alpha} = 2
/// l_{\beta}`$, but the numbers of occupied $`\alpha`$ and $`\beta`$ spin-orbitals may differ.
/// $`\alpha`$ spin-orbitals carry even indices and $`\beta`$ spin-orbitals odd indices.
///
/// # Arguments
///
/// * `n` - The number of occupied spin-orbitals.
/// * `n_a` - The number of occupied spin-orbitals with $`\alpha`$ spin. This must not exceed
/// `n`.
/// * `l` - The total number of spin-orbitals. This must be even.
///
/// # Returns
///
/// The slices in the order (occupied alpha, occupied beta, virtual alpha, virtual beta).
pub fn get_spin_block_slices(
    n: usize,
    n_a: usize,
    l: usize,
) -> Result<SpinBlockSlices, OccupationPartitionError> {
    if n < n_a {
        return Err(OccupationPartitionError(format!(
            "the number of occupied alpha spin-orbitals ({n_a}) exceeds the total number of occupied spin-orbitals ({n})."
        )));
    }
    if l % 2 != 0 {
        return Err(OccupationPartitionError(format!(
            "the total number of spin-orbitals ({l}) must be even."
        )));
    }

    let n_b = n - n_a;
    let l_a = l / 2;
    let l_b = l / 2;
    if n_a > l_a || n_b > l_b {
        return Err(OccupationPartitionError(format!(
            "{n_a} alpha and {n_b} beta occupied spin-orbitals do not fit into {l_a} spatial orbitals."
        )));
    }

    let m_a = l_a - n_a;
    let m_b = l_b - n_b;

    let o_a = SpinBlockSlice {
        start: 0,
        stop: 2 * n_a,
        step: 2,
    };
    let o_b = SpinBlockSlice {
        start: 1,
        stop: 2 * n_b + 1,
        step: 2,
    };
    let v_a = SpinBlockSlice {
        start: 2 * n_a,
        stop: l,
        step: 2,
    };
    let v_b = SpinBlockSlice {
        start: 2 * n_b + 1,
        stop: l,
        step: 2,
    };

    // The virtual-beta block starts on an odd index and runs up to the even `l`, hence the
    // correction of one in its count.
    let half_width =
        |slice: &SpinBlockSlice| (slice.stop as isize - slice.start as isize).div_euclid(2);
    let counts = [
        (half_width(&o_a), n_a),
        (half_width(&o_b), n_b),
        (half_width(&v_a), m_a),
        (half_width(&v_b) + 1, m_b),
    ];
    for ((count, expected), slice) in counts.iter().zip([o_a, o_b, v_a, v_b].iter()) {
        if *count != *expected as isize || slice.len() != *expected {
            return Err(OccupationPartitionError(format!(
                "slice {slice} holds {count} spin-orbitals, but {expected} are expected."
            )));
        }
    }

    Ok(SpinBlockSlices {
        occupied_alpha: o_a,
        occupied_beta: o_b,
        virtual_alpha: v_a,
        virtual_beta: v_b,
    })
}
