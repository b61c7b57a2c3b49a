use approx::assert_abs_diff_eq;
use itertools::iproduct;
use ndarray::{array, s, Array2, Array4};

use crate::spin::{
    add_spin_bra_spf, add_spin_one_body, add_spin_spf, add_spin_two_body, delta, spin_delta,
};
use crate::symmetrization::anti_symmetrize_u;
use crate::testing::{random_complex, random_real, seeded_rng};

#[test]
fn test_spin_delta() {
    assert!(delta(3, 3));
    assert!(!delta(3, 4));
    assert!(spin_delta(0, 4));
    assert!(spin_delta(1, 7));
    assert!(!spin_delta(2, 5));
}

#[test]
fn test_add_spin_one_body_kronecker() {
    let h = array![[1.0, 2.0], [3.0, 4.0]];
    let h_spin = add_spin_one_body(&h.view()).unwrap();
    #[rustfmt::skip]
    let h_ref = array![
        [1.0, 0.0, 2.0, 0.0],
        [0.0, 1.0, 0.0, 2.0],
        [3.0, 0.0, 4.0, 0.0],
        [0.0, 3.0, 0.0, 4.0],
    ];
    assert_eq!(h_spin, h_ref);

    let h_rect = Array2::<f64>::zeros((2, 3));
    assert!(add_spin_one_body(&h_rect.view()).is_err());
}

#[test]
fn test_add_spin_two_body_brute_force() {
    let mut rng = seeded_rng(11);
    let k = 5;
    let u = random_complex((k, k, k, k), &mut rng);
    let u_spin = add_spin_two_body(&u.view()).unwrap();
    let l = 2 * k;
    assert_eq!(u_spin.shape(), &[l, l, l, l]);

    for (p, q, r, s) in iproduct!(0..l, 0..l, 0..l, 0..l) {
        let same_spins = (p % 2 == r % 2) && (q % 2 == s % 2);
        let expected = if same_spins {
            u[(p / 2, q / 2, r / 2, s / 2)]
        } else {
            num_complex::Complex::new(0.0, 0.0)
        };
        assert_eq!(u_spin[(p, q, r, s)], expected);
    }

    let u_bad = Array4::<f64>::zeros((2, 2, 2, 3));
    assert!(add_spin_two_body(&u_bad.view()).is_err());
}

#[test]
fn test_add_spin_two_body_anti_symmetrized() {
    let mut rng = seeded_rng(12);
    let k = 4;
    let u = random_real((k, k, k, k), &mut rng);
    let u_spin = add_spin_two_body(&u.view()).unwrap();
    let u_as = anti_symmetrize_u(&u_spin.view()).unwrap();
    let l = 2 * k;

    for (p, q, r, s) in iproduct!(0..l, 0..l, 0..l, 0..l) {
        assert_abs_diff_eq!(u_as[(p, q, r, s)], -u_as[(p, q, s, r)], epsilon = 1e-15);
    }
    for (p, q, r) in iproduct!(0..l, 0..l, 0..l) {
        assert_abs_diff_eq!(u_as[(p, q, r, r)], 0.0, epsilon = 1e-15);
    }
    // Opposite spins: <0 1 || 0 1> reduces to the direct term alone.
    assert_abs_diff_eq!(u_as[(0, 1, 0, 1)], u[(0, 0, 0, 0)], epsilon = 1e-15);
    assert_abs_diff_eq!(u_as[(0, 1, 1, 0)], -u[(0, 0, 0, 0)], epsilon = 1e-15);
    // Equal spins: <0 2 || 0 2> = u_0101 - u_0110.
    assert_abs_diff_eq!(
        u_as[(0, 2, 0, 2)],
        u[(0, 1, 0, 1)] - u[(0, 1, 1, 0)],
        epsilon = 1e-15
    );
}

#[test]
fn test_add_spin_spf_interleave() {
    let mut rng = seeded_rng(13);
    let spf = random_complex((3, 4, 2), &mut rng);
    let spf_spin = add_spin_spf(&spf.view()).unwrap();
    assert_eq!(spf_spin.shape(), &[6, 4, 2]);
    assert_eq!(spf_spin.slice(s![0..;2, .., ..]), spf);
    assert_eq!(spf_spin.slice(s![1..;2, .., ..]), spf);

    let bra_spin = add_spin_bra_spf(Some(&spf.view())).unwrap();
    assert_eq!(bra_spin, Some(spf_spin));
    let none_spin = add_spin_bra_spf::<f64, ndarray::Ix1>(None).unwrap();
    assert!(none_spin.is_none());
}
