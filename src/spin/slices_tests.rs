use std::collections::BTreeSet;

use proptest::prelude::*;

use crate::spin::slices::{get_spin_block_slices, SpinBlockSlice};

#[test]
fn test_spin_block_slices_open_shell() {
    let slices = get_spin_block_slices(3, 2, 10).unwrap();
    let [o_a, o_b, v_a, v_b] = slices.to_array();
    assert_eq!(o_a.iter().collect::<Vec<_>>(), vec![0, 2]);
    assert_eq!(o_b.iter().collect::<Vec<_>>(), vec![1]);
    assert_eq!(v_a.iter().collect::<Vec<_>>(), vec![4, 6, 8]);
    assert_eq!(v_b.iter().collect::<Vec<_>>(), vec![3, 5, 7, 9]);
    assert_eq!(
        slices
            .to_array()
            .iter()
            .map(SpinBlockSlice::len)
            .collect::<Vec<_>>(),
        vec![2, 1, 3, 4]
    );

    let all = slices
        .to_array()
        .iter()
        .flat_map(|slice| slice.iter())
        .collect::<BTreeSet<_>>();
    assert_eq!(all, (0..10).collect::<BTreeSet<_>>());
    assert_eq!(slices.to_string(), "o_a = 0:4:2, o_b = 1:3:2, v_a = 4:10:2, v_b = 3:10:2");
}

#[test]
fn test_spin_block_slices_fully_occupied_beta() {
    let slices = get_spin_block_slices(4, 2, 4).unwrap();
    assert_eq!(slices.virtual_alpha.len(), 0);
    assert!(slices.virtual_beta.is_empty());
    assert_eq!(slices.virtual_beta.iter().count(), 0);
}

#[test]
fn test_spin_block_slices_invalid() {
    assert!(get_spin_block_slices(2, 3, 10).is_err());
    assert!(get_spin_block_slices(2, 1, 9).is_err());
    assert!(get_spin_block_slices(6, 6, 10).is_err());
    assert!(get_spin_block_slices(6, 0, 10).is_err());

    let err = get_spin_block_slices(2, 3, 10).unwrap_err();
    assert!(err.to_string().starts_with("Invalid occupation partition:"));
}

#[test]
fn test_spin_block_slice_as_ndarray_slice() {
    let arr = ndarray::Array1::from_iter(0..10usize);
    let slices = get_spin_block_slices(3, 2, 10).unwrap();
    let v_b = arr.slice_axis(ndarray::Axis(0), slices.virtual_beta.as_slice());
    assert_eq!(v_b.to_vec(), vec![3, 5, 7, 9]);

    let slices = get_spin_block_slices(4, 2, 4).unwrap();
    let arr = ndarray::Array1::from_iter(0..4usize);
    let v_b = arr.slice_axis(ndarray::Axis(0), slices.virtual_beta.as_slice());
    assert!(v_b.is_empty());
}

fn valid_partitions() -> impl Strategy<Value = (usize, usize, usize)> {
    (1usize..8).prop_flat_map(|l_a| (Just(l_a), 0..=l_a, 0..=l_a))
}

proptest! {
    #[test]
    fn test_spin_block_slices_partition((l_a, n_a, n_b) in valid_partitions()) {
        let l = 2 * l_a;
        let n = n_a + n_b;
        let slices = get_spin_block_slices(n, n_a, l).unwrap();
        let lens = slices.to_array().map(|slice| slice.len());
        prop_assert_eq!(lens, [n_a, n_b, l_a - n_a, l_a - n_b]);

        let mut seen = BTreeSet::new();
        for (block, slice) in slices.to_array().iter().enumerate() {
            for p in slice.iter() {
                prop_assert!(p < l);
                prop_assert_eq!(p % 2, block % 2);
                prop_assert!(seen.insert(p));
            }
        }
        prop_assert_eq!(seen.len(), l);
    }
}
