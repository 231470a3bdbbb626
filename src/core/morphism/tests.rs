use num_rational::Rational64;

use crate::core::{
  error::MappingError,
  module::{Element, Matrix, ModuleType},
  morphism::{Morphism, MorphismVariant}
};

fn z_vector(values: &[i64]) -> Element {
  Element::integers(values)
}

#[test]
fn map_checks_the_domain() {
  let f = Morphism::z_affine(2, 1);
  assert_eq!(f.map(&Element::Z(4)).unwrap(), Element::Z(9));
  assert!(matches!(f.map(&Element::real(4.0)), Err(MappingError::NotInDomain { .. })));
  assert_eq!(f.at_zero().unwrap(), Element::Z(1));
}

#[test]
fn coordinate_maps() {
  let z3 = ModuleType::free(&ModuleType::Z, 3);
  let z2 = ModuleType::free(&ModuleType::Z, 2);

  let reorder = Morphism::reorder_raw(&z3, &z3, &[2, -1, 0]).unwrap();
  assert_eq!(reorder.map(&z_vector(&[1, 2, 3])).unwrap(), z_vector(&[3, 0, 1]));

  let shuffle = Morphism::shuffle_raw(&z3, &z2, &[1, 1, 0]).unwrap();
  assert_eq!(shuffle.map(&z_vector(&[1, 2, 3])).unwrap(), z_vector(&[3, 3]));

  assert!(Morphism::reorder_raw(&z3, &z3, &[0, 1, 3]).is_none());
  assert!(Morphism::reorder_raw(&z3, &z3, &[0, -2, 1]).is_none());
  assert!(Morphism::shuffle_raw(&z3, &z2, &[0, 1]).is_none());
}

#[test]
fn split_maps_blocks() {
  let swap = Morphism::reorder_raw(
    &ModuleType::free(&ModuleType::Z, 2),
    &ModuleType::free(&ModuleType::Z, 2),
    &[1, 0]
  ).unwrap();
  let split = Morphism::split(vec![Morphism::z_affine(3, 0), swap]).unwrap();
  assert_eq!(split.domain(), &ModuleType::free(&ModuleType::Z, 3));
  assert_eq!(split.map(&z_vector(&[1, 2, 3])).unwrap(), z_vector(&[3, 3, 2]));
}

#[test]
fn tuples_and_projections() {
  let tuple = Morphism::tuple(vec![Morphism::z_affine(2, 0), Morphism::modulo(1, 3).unwrap()]).unwrap();
  let x = tuple.map(&Element::Z(5)).unwrap();
  assert_eq!(x, Element::product_of(vec![Element::Z(10), Element::modular(2, 3)]).unwrap());

  let second = Morphism::projection(tuple.codomain(), 1).unwrap();
  assert_eq!(second.compose(&tuple).unwrap(), Morphism::modulo(1, 3).unwrap());
}

#[test]
fn conjugation_is_an_involution() {
  let bar = Morphism::conjugation(2).unwrap();
  let x = Element::vector(&ModuleType::C, vec![Element::complex(1.0, 2.0), Element::complex(0.0, -1.0)]).unwrap();
  let y = bar.map(&x).unwrap();
  assert_eq!(y.component(1), Some(Element::complex(0.0, 1.0)));
  assert!(bar.compose(&bar).unwrap().is_identity());
  assert!(bar.is_module_homomorphism());
  assert!(!bar.is_linear());
}

#[test]
fn wrappers_defer_to_their_operands() {
  let samples = vec![Element::Z(1), Element::Z(2), Element::Z(3)];
  let fold = Morphism::folding(samples).unwrap();
  let shift = Morphism::z_affine(1, 1);

  let composition = fold.compose(&shift).unwrap();
  assert!(matches!(composition.variant(), MorphismVariant::Composition(..)));
  assert_eq!(composition.map(&Element::Z(2)).unwrap(), Element::real(3.0));
  assert!(matches!(composition.map(&Element::Z(3)), Err(MappingError::Unsampled { .. })));

  let doubled = fold.sum(&fold).unwrap();
  assert_eq!(doubled.map(&Element::Z(2)).unwrap(), Element::real(4.0));

  let scaled = fold.scaled(&Element::real(0.5)).unwrap();
  assert_eq!(scaled.map(&Element::Z(3)).unwrap(), Element::real(1.5));
  let rescaled = scaled.scaled(&Element::real(4.0)).unwrap();
  assert!(matches!(rescaled.variant(), MorphismVariant::Scaled(_, s) if *s == Element::real(2.0)));
}

#[test]
fn free_affine_collapses_to_scalar_form() {
  let one_by_one = Morphism::q_free_affine(
    Matrix::from_rows(vec![vec![Rational64::new(1, 2)]]).unwrap(),
    vec![Rational64::new(1, 3)]
  ).unwrap();
  assert_eq!(one_by_one.tag(), "QAffine");
  assert_eq!(one_by_one.map(&Element::rational(2, 1)).unwrap(), Element::rational(4, 3));
}

#[test]
fn free_affine_over_non_numeric_ring() {
  let zx = ModuleType::polynomial(&ModuleType::Z, "X");
  let x = Element::polynomial(&zx, vec![Element::Z(0), Element::Z(1)]).unwrap();
  let one = zx.one().unwrap();
  let matrix = Matrix::from_rows(vec![vec![x.clone(), one.clone()], vec![one.clone(), zx.zero()]]).unwrap();
  let f = Morphism::free_affine(matrix, vec![zx.zero(), one.clone()]).unwrap();
  assert_eq!(f.tag(), "GenericAffine");

  let input = Element::vector(&zx, vec![one.clone(), one.clone()]).unwrap();
  let output = f.map(&input).unwrap();
  assert_eq!(output.component(0), Some(x.sum(&one)));
  assert_eq!(output.component(1), Some(one.sum(&one)));
}

#[test]
fn ring_morphisms_of_free_maps() {
  let lift = Morphism::free_lift(Morphism::modulo_reduction(4, true), 2, 3).unwrap();
  assert_eq!(lift.ring_morphism(), Some(Morphism::modulo_reduction(4, true)));

  let r2 = ModuleType::free(&ModuleType::R, 2);
  let reorder = Morphism::reorder_raw(&r2, &r2, &[1, 0]).unwrap();
  assert!(reorder.ring_morphism().unwrap().is_identity());

  let affine = Morphism::z_affine(3, 3);
  assert!(affine.ring_morphism().unwrap().is_identity());
}
