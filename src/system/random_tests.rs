use itertools::iproduct;

use crate::system::random::{get_random_elements, RandomSystem};
use crate::system::IntegralProvider;
use crate::testing::seeded_rng;

#[test]
fn test_get_random_elements_range() {
    let mut rng = seeded_rng(41);
    let arr = get_random_elements((3, 4, 5), &mut rng);
    assert_eq!(arr.shape(), &[3, 4, 5]);
    assert!(arr
        .iter()
        .all(|x| (0.0..1.0).contains(&x.re) && (0.0..1.0).contains(&x.im)));
}

#[test]
fn test_random_system_shapes_and_symmetry() {
    let mut rng = seeded_rng(42);
    let l = 4;
    let system = RandomSystem::new(l, 2, &mut rng).unwrap();
    assert_eq!(system.n_spatial_orbitals(), l);
    assert_eq!(system.one_body().shape(), &[l, l]);
    assert_eq!(system.two_body().shape(), &[l, l, l, l]);
    assert_eq!(system.overlap().map(|s| s.shape().to_vec()), Some(vec![l, l]));
    assert_eq!(
        system.dipole_moment().map(|d| d.shape().to_vec()),
        Some(vec![2, l, l])
    );
    assert!(system.spf().is_none());
    assert!(system.bra_spf().is_none());

    let enuc = system.nuclear_repulsion_energy();
    assert_eq!(enuc.im, 0.0);
    assert!((0.0..1.0).contains(&enuc.re));

    let u = system.two_body();
    for (p, q, r, s) in iproduct!(0..l, 0..l, 0..l, 0..l) {
        assert_eq!(u[(p, q, r, s)], u[(q, p, s, r)]);
    }
}

#[test]
fn test_random_system_reproducible() {
    let system_a = RandomSystem::new(3, 3, &mut seeded_rng(43)).unwrap();
    let system_b = RandomSystem::new(3, 3, &mut seeded_rng(43)).unwrap();
    let system_c = RandomSystem::new(3, 3, &mut seeded_rng(44)).unwrap();
    assert_eq!(system_a.one_body(), system_b.one_body());
    assert_eq!(system_a.two_body(), system_b.two_body());
    assert_ne!(system_a.one_body(), system_c.one_body());
    assert_eq!(
        system_a.nuclear_repulsion_energy(),
        system_b.nuclear_repulsion_energy()
    );
}
