use itertools::iproduct;
use ndarray::Array4;

use crate::symmetrization::{anti_symmetrize_u, symmetrize_exchange};
use crate::testing::{random_complex, seeded_rng};

#[test]
fn test_anti_symmetrize_u() {
    let mut rng = seeded_rng(21);
    let l = 4;
    let u = random_complex((l, l, l, l), &mut rng);
    let u_as = anti_symmetrize_u(&u.view()).unwrap();
    for (p, q, r, s) in iproduct!(0..l, 0..l, 0..l, 0..l) {
        assert_eq!(u_as[(p, q, r, s)], u[(p, q, r, s)] - u[(p, q, s, r)]);
        assert_eq!(u_as[(p, q, r, s)], -u_as[(p, q, s, r)]);
    }

    let u_bad = Array4::<f64>::zeros((2, 2, 2, 3));
    assert!(anti_symmetrize_u(&u_bad.view()).is_err());
}

#[test]
fn test_symmetrize_exchange() {
    let mut rng = seeded_rng(22);
    let l = 4;
    let u = random_complex((l, l, l, l), &mut rng);
    let u_sym = symmetrize_exchange(&u.view()).unwrap();
    for (p, q, r, s) in iproduct!(0..l, 0..l, 0..l, 0..l) {
        assert_eq!(u_sym[(p, q, r, s)], u_sym[(q, p, s, r)]);
    }

    // Already symmetric elements are left unchanged.
    let u_sym_sym = symmetrize_exchange(&u_sym.view()).unwrap();
    assert_eq!(u_sym_sym, u_sym);

    let u_bad = Array4::<f64>::zeros((2, 3, 2, 2));
    assert!(symmetrize_exchange(&u_bad.view()).is_err());
}
