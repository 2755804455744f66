//! Permutation round-trips: iota identity, zip/unzip, slice/unslice

use proptest::prelude::*;
use trueno_lanes::{Element, LaneError, Mask, Shape, Shuffle, Species, Vector};

fn zip_unzip_for<E: Element>(shape: Shape) {
    let species = Species::<E>::new(shape).unwrap();
    let n = species.length() as i64;
    let a = species.from_fn(|i| E::from_i64(i as i64));
    let b = species.from_fn(|i| E::from_i64(n + i as i64));

    let lo = a
        .rearrange_with(&Shuffle::make_zip(species, 0).unwrap(), &b)
        .unwrap();
    let hi = a
        .rearrange_with(&Shuffle::make_zip(species, 1).unwrap(), &b)
        .unwrap();
    let even = lo
        .rearrange_with(&Shuffle::make_unzip(species, 0).unwrap(), &hi)
        .unwrap();
    let odd = lo
        .rearrange_with(&Shuffle::make_unzip(species, 1).unwrap(), &hi)
        .unwrap();
    assert_eq!(even, a, "unzip(0) after zip on {species}");
    assert_eq!(odd, b, "unzip(1) after zip on {species}");
}

#[test]
fn zip_unzip_round_trip_every_species() {
    for shape in Shape::FIXED {
        zip_unzip_for::<i8>(shape);
        zip_unzip_for::<i16>(shape);
        zip_unzip_for::<i32>(shape);
        zip_unzip_for::<i64>(shape);
        zip_unzip_for::<f32>(shape);
        zip_unzip_for::<f64>(shape);
    }
}

#[test]
fn iota_shuffle_is_identity_on_max_shape() {
    let species = Species::<i16>::preferred().unwrap();
    let v = species.from_fn(|i| (i as i16).wrapping_mul(7));
    let identity = species.shuffle_iota(0, 1, false);
    assert_eq!(v.rearrange(&identity).unwrap(), v);
}

#[test]
fn rearrange_scenario() {
    let species = Species::<i8>::new(Shape::S64).unwrap();
    let a = Vector::from_array(species, &[1, 2, 3, 4, 5, 6, 7, 8], 0).unwrap();
    let reverse = Shuffle::iota(species, 7, -1, false);
    assert_eq!(
        a.rearrange(&reverse).unwrap().as_slice(),
        &[8, 7, 6, 5, 4, 3, 2, 1]
    );
}

#[test]
fn invalid_shuffle_reports_lane() {
    let species = Species::<i32>::new(Shape::S128).unwrap();
    let a = species.iota(0, 1, false).unwrap();
    let s = Shuffle::iota(species, 2, 1, false);
    assert_eq!(
        a.rearrange(&s),
        Err(LaneError::InvalidPermutation { lane: 2, index: 4 })
    );
    let partial = Mask::from_long(species, 0b0011);
    assert_eq!(
        a.rearrange_masked(&s, &partial).unwrap().as_slice(),
        &[2, 3, 0, 0]
    );
}

#[test]
fn origin_out_of_range() {
    let species = Species::<i64>::new(Shape::S256).unwrap();
    let v = species.zero();
    assert_eq!(
        v.slice(4, None),
        Err(LaneError::InvalidOrigin {
            origin: 4,
            length: 4
        })
    );
    assert!(v.unslice(9, &v, 0).is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn unslice_puts_slice_back(a in prop::collection::vec(any::<i32>(), 8), b in prop::collection::vec(any::<i32>(), 8), origin in 0usize..8) {
        let species = Species::<i32>::new(Shape::S256).unwrap();
        let va = species.from_values(&a).unwrap();
        let vb = species.from_values(&b).unwrap();
        let sliced = va.slice(origin, Some(&vb)).unwrap();

        let lo = sliced.unslice(origin, &va, 0).unwrap();
        let hi = sliced.unslice(origin, &vb, 1).unwrap();
        prop_assert_eq!(lo, va);
        prop_assert_eq!(hi, vb);
    }

    #[test]
    fn compose_matches_sequential(perm in Just((0i64..8).collect::<Vec<_>>()).prop_shuffle(), other in prop::collection::vec(-8i64..8, 8)) {
        let species = Species::<i8>::new(Shape::S64).unwrap();
        let v = species.from_fn(|i| i as i8 * 3);
        let first = Shuffle::from_values(species, &perm).unwrap();
        let second = Shuffle::from_values(species, &other).unwrap();
        let composed = first.compose(&second).unwrap();
        prop_assert_eq!(
            v.rearrange(&composed).unwrap(),
            v.rearrange(&first).unwrap().rearrange(&second).unwrap()
        );
    }
}
