use std::cell::Cell;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::api::*;

fn rng() -> StdRng {
  StdRng::seed_from_u64(0x6d6f_7270)
}

/// `X^2 + 1` over `Z`, which no other shape fuses with.
fn square_plus_one() -> Morphism {
  let zx = ModuleType::polynomial(&ModuleType::Z, "X");
  let p = Element::polynomial(&zx, vec![Element::Z(1), Element::Z(0), Element::Z(1)]).unwrap();
  Morphism::polynomial(p).unwrap()
}

fn sample_endomorphisms() -> Vec<Morphism> {
  vec![
    Morphism::z_affine(2, 3),
    Morphism::z_affine(0, 4),
    Morphism::translation(Element::Z(-2)),
    square_plus_one(),
    Morphism::identity(&ModuleType::Z),
  ]
}

#[test]
fn identity_laws() {
  let id = Morphism::identity(&ModuleType::Z);
  for f in sample_endomorphisms() {
    assert_eq!(compose(&id, &f).unwrap(), f);
    assert_eq!(compose(&f, &id).unwrap(), f);
  }

  let r3 = ModuleType::free(&ModuleType::R, 3);
  let r2 = ModuleType::free(&ModuleType::R, 2);
  let drop = Morphism::reorder_raw(&r3, &r2, &[2, 0]).unwrap();
  assert_eq!(compose(&Morphism::identity(&r2), &drop).unwrap(), drop);
  assert_eq!(compose(&drop, &Morphism::identity(&r3)).unwrap(), drop);
}

#[test]
fn affine_fusion() {
  let h1 = Morphism::z_affine(2, 3);
  let h2 = Morphism::z_affine(5, 1);
  let fused = compose(&h1, &h2).unwrap();
  assert_eq!(fused, Morphism::z_affine(10, 5));
  assert_eq!(apply(&fused, &Element::Z(7)).unwrap(), Element::Z(75));
}

#[test]
fn application_equals_composition() {
  let mut rng = rng();
  for _ in 0..64 {
    let f = Morphism::z_affine(rng.random_range(-9..10), rng.random_range(-9..10));
    let g = Morphism::z_affine(rng.random_range(-9..10), rng.random_range(-9..10));
    let p = square_plus_one();
    let x = Element::Z(rng.random_range(-100..100));

    for (outer, inner) in [(&f, &g), (&p, &f), (&f, &p), (&p, &p)] {
      let composite = compose(outer, inner).unwrap();
      let stepwise = apply(outer, &apply(inner, &x).unwrap()).unwrap();
      assert_eq!(apply(&composite, &x).unwrap(), stepwise, "{} ∘ {} at {}", outer, inner, x);
    }
  }
}

#[test]
fn additivity_and_scaling() {
  let mut rng = rng();
  let p = square_plus_one();
  for _ in 0..64 {
    let f = Morphism::z_affine(rng.random_range(-9..10), rng.random_range(-9..10));
    let s = Element::Z(rng.random_range(-5..6));
    let x = Element::Z(rng.random_range(-100..100));

    let fx = apply(&f, &x).unwrap();
    let px = apply(&p, &x).unwrap();

    assert_eq!(apply(&sum(&f, &p).unwrap(), &x).unwrap(), fx.sum(&px));
    assert_eq!(apply(&difference(&p, &f).unwrap(), &x).unwrap(), px.difference(&fx));
    assert_eq!(apply(&scaled(&f, &s).unwrap(), &x).unwrap(), fx.scaled(&s));
    assert_eq!(apply(&scaled(&p, &s).unwrap(), &x).unwrap(), px.scaled(&s));
  }
}

#[test]
fn scaling_free_modules() {
  let r2 = ModuleType::free(&ModuleType::R, 2);
  let real = Element::real;
  let f = Morphism::free_affine(
    Matrix::from_rows(vec![vec![real(1.0), real(2.0)], vec![real(0.0), real(1.0)]]).unwrap(),
    vec![real(1.0), real(0.0)]
  ).unwrap();
  assert_eq!(f.tag(), "RFreeAffine");
  assert_eq!(f.domain(), &r2);

  let x = Element::reals(&[1.0, 1.0]);
  let tripled = scaled(&f, &Element::real(3.0)).unwrap();
  assert_eq!(tripled.tag(), "RFreeAffine");
  assert_eq!(apply(&tripled, &x).unwrap(), Element::reals(&[12.0, 3.0]));
}

#[test]
fn power_rules() {
  let p = square_plus_one();
  assert!(power(&p, 0).unwrap().is_identity());
  assert_eq!(power(&p, 1).unwrap(), p);

  let cube = power(&p, 3).unwrap();
  assert_eq!(apply(&cube, &Element::Z(1)).unwrap(), Element::Z(26));

  let mut x = Element::Z(2);
  for _ in 0..3 {
    x = apply(&p, &x).unwrap();
  }
  assert_eq!(apply(&cube, &Element::Z(2)).unwrap(), x);

  // Powers of a power add their exponents.
  assert_eq!(power(&cube, 2).unwrap(), power(&p, 5).unwrap());

  assert!(matches!(power(&p, -2), Err(CompositionError::NegativeExponent(-2))));
  let not_endo = canonical_morphism(&ModuleType::Z, &ModuleType::Q).unwrap();
  assert!(matches!(power(&not_endo, 2), Err(CompositionError::DomainMismatch { .. })));
}

#[test]
fn caches_construct_once() {
  let private = MorphismCache::new("test");
  let searches = Cell::new(0);
  let search = || {
    searches.set(searches.get() + 1);
    embedding(&ModuleType::Z, &ModuleType::R)
  };

  let first = private.get_or_construct(&ModuleType::Z, &ModuleType::R, search).unwrap();
  let second = private.get_or_construct(&ModuleType::Z, &ModuleType::R, search).unwrap();
  assert_eq!(first, second);
  assert_eq!(searches.get(), 1);
  assert_eq!(private.statistics().hits, 1);

  let before = strategy_cache(Strategy::Canonical).statistics();
  let a = canonical_morphism(&ModuleType::Q, &ModuleType::C).unwrap();
  let b = canonical_morphism(&ModuleType::Q, &ModuleType::C).unwrap();
  assert_eq!(a, b);
  assert!(strategy_cache(Strategy::Canonical).statistics().hits > before.hits);
  assert!(strategy_cache(Strategy::Canonical).contains(&ModuleType::Q, &ModuleType::C));
}

#[test]
fn ring_tower_commutes() {
  let z_to_q = embedding(&ModuleType::Z, &ModuleType::Q).unwrap();
  let q_to_r = embedding(&ModuleType::Q, &ModuleType::R).unwrap();
  let r_to_c = embedding(&ModuleType::R, &ModuleType::C).unwrap();
  let z_to_c = embedding(&ModuleType::Z, &ModuleType::C).unwrap();

  let mut rng = rng();
  for _ in 0..32 {
    let n = Element::Z(rng.random_range(-1000..1000));
    let stepwise = apply(&r_to_c, &apply(&q_to_r, &apply(&z_to_q, &n).unwrap()).unwrap()).unwrap();
    assert_eq!(apply(&z_to_c, &n).unwrap(), stepwise);
  }

  let chained = compose(&r_to_c, &compose(&q_to_r, &z_to_q).unwrap()).unwrap();
  assert_eq!(chained, z_to_c);
}

#[test]
fn modular_reduction_is_not_a_homomorphism() {
  let reduce = canonical_morphism(&ModuleType::Z, &ModuleType::zn(5)).unwrap();
  assert!(!reduce.is_ring_homomorphism());
  assert!(!reduce.is_module_homomorphism());
  assert_eq!(apply(&reduce, &Element::Z(7)).unwrap(), Element::modular(2, 5));
  assert_eq!(apply(&reduce, &Element::Z(-3)).unwrap(), Element::modular(2, 5));

  assert!(canonical_morphism(&ModuleType::Z, &ModuleType::Q).unwrap().is_ring_homomorphism());

  // The explicitly constructed reduction does claim to be a ring homomorphism.
  assert!(Morphism::modulo(1, 5).unwrap().is_ring_homomorphism());
}

#[test]
fn free_module_dimension_rule() {
  let r2 = ModuleType::free(&ModuleType::R, 2);
  let r5 = ModuleType::free(&ModuleType::R, 5);

  let up = embedding(&r2, &r5).unwrap();
  assert_eq!(
    apply(&up, &Element::reals(&[1.0, 2.0])).unwrap(),
    Element::reals(&[1.0, 2.0, 0.0, 0.0, 0.0])
  );
  assert!(embedding(&r5, &r2).is_none());
}

#[test]
fn canonical_results_round_trip_through_records() {
  let pairs = [
    (ModuleType::Z, ModuleType::zn(5)),
    (ModuleType::Q, ModuleType::C),
    (ModuleType::free(&ModuleType::Z, 2), ModuleType::free(&ModuleType::R, 4)),
    (ModuleType::Z, ModuleType::product(&[ModuleType::Q, ModuleType::R]).unwrap()),
    (ModuleType::R, ModuleType::strings(&ModuleType::Z)),
  ];
  for (domain, codomain) in pairs {
    let morphism = canonical_morphism(&domain, &codomain).unwrap();
    let record = morphism.to_record();
    assert_eq!(Morphism::from_record(&record), Some(morphism));
  }
}
