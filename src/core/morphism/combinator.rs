/*!

The algebraic combinators: composition, sum, difference, scaling, and powers.

Every combinator checks its operands first and reports a `CompositionError` if they do not fit. It then tries, in
order, to

 1. eliminate an identity,
 2. absorb a constant by evaluating it,
 3. fuse two operands of the same shape into one morphism of that shape,

and only wraps the operands in a composite variant when none of these apply. Every rule keeps the domain and codomain
of the unsimplified result.

*/

use crate::core::{
  error::CompositionError,
  module::Element,
  morphism::{BxMorphism, Morphism, MorphismVariant, NumberAffine, RingPair}
};

#[derive(Copy, Clone, PartialEq, Eq)]
enum Pointwise {
  Sum,
  Difference,
}

impl Pointwise {
  fn elements(self, a: &Element, b: &Element) -> Element {
    match self {
      Pointwise::Sum        => a.sum(b),
      Pointwise::Difference => a.difference(b),
    }
  }

  fn wrap(self, f: BxMorphism, g: BxMorphism) -> MorphismVariant {
    match self {
      Pointwise::Sum        => MorphismVariant::Sum(f, g),
      Pointwise::Difference => MorphismVariant::Difference(f, g),
    }
  }
}

impl Morphism {
  // region Composition

  /// `self ∘ inner`, the morphism `x ↦ self(inner(x))`.
  pub fn compose(&self, inner: &Morphism) -> Result<Morphism, CompositionError> {
    if self.domain != inner.codomain {
      return Err(CompositionError::DomainMismatch {
        expected: self.domain.clone(),
        found   : inner.codomain.clone()
      });
    }

    if self.is_identity() {
      return Ok(inner.clone());
    }
    if inner.is_identity() {
      return Ok(self.clone());
    }

    if let Some(value) = self.constant_value() {
      return Ok(Morphism::constant(&inner.domain, value.clone()));
    }
    if let Some(value) = inner.constant_value() {
      if let Ok(image) = self.evaluate(value) {
        return Ok(Morphism::constant(&inner.domain, image));
      }
    }

    if let Some(fused) = fuse_composition(self, inner) {
      assert!(
        fused.domain == inner.domain && fused.codomain == self.codomain,
        "fused composition {} ∘ {} changed its type", self, inner
      );
      return Ok(fused);
    }

    Ok(Morphism::new(
      inner.domain.clone(),
      self.codomain.clone(),
      MorphismVariant::Composition(Box::new(self.clone()), Box::new(inner.clone()))
    ))
  }

  // endregion

  // region Sum and difference

  /// `x ↦ self(x) + other(x)`
  pub fn sum(&self, other: &Morphism) -> Result<Morphism, CompositionError> {
    self.pointwise(other, Pointwise::Sum)
  }

  /// `x ↦ self(x) - other(x)`
  pub fn difference(&self, other: &Morphism) -> Result<Morphism, CompositionError> {
    self.pointwise(other, Pointwise::Difference)
  }

  fn check_parallel(&self, other: &Morphism) -> Result<(), CompositionError> {
    if self.domain != other.domain {
      return Err(CompositionError::DomainMismatch {
        expected: self.domain.clone(),
        found   : other.domain.clone()
      });
    }
    if self.codomain != other.codomain {
      return Err(CompositionError::DomainMismatch {
        expected: self.codomain.clone(),
        found   : other.codomain.clone()
      });
    }
    Ok(())
  }

  fn pointwise(&self, other: &Morphism, operation: Pointwise) -> Result<Morphism, CompositionError> {
    self.check_parallel(other)?;

    if operation == Pointwise::Difference && self == other {
      return Ok(Morphism::zero(&self.domain, &self.codomain));
    }
    if other.constant_value().is_some_and(Element::is_zero) {
      return Ok(self.clone());
    }
    if operation == Pointwise::Sum && self.constant_value().is_some_and(Element::is_zero) {
      return Ok(other.clone());
    }

    if let Some(fused) = fuse_pointwise(self, other, operation) {
      assert!(
        fused.domain == self.domain && fused.codomain == self.codomain,
        "fused pointwise combination of {} and {} changed its type", self, other
      );
      return Ok(fused);
    }

    Ok(Morphism::new(
      self.domain.clone(),
      self.codomain.clone(),
      operation.wrap(Box::new(self.clone()), Box::new(other.clone()))
    ))
  }

  // endregion

  // region Scaling and powers

  /// `x ↦ scalar·self(x)`, for a scalar in the codomain's ring.
  pub fn scaled(&self, scalar: &Element) -> Result<Morphism, CompositionError> {
    let ring = self.codomain.ring();
    if !ring.has_element(scalar) {
      return Err(CompositionError::NotScalable {
        scalar: scalar.clone(),
        ring
      });
    }

    if scalar.is_one() {
      return Ok(self.clone());
    }
    if scalar.is_zero() {
      return Ok(Morphism::zero(&self.domain, &self.codomain));
    }

    let fused = match &self.variant {
      MorphismVariant::Constant(value) => Some(Morphism::constant(&self.domain, value.scaled(scalar))),

      MorphismVariant::Affine(form) => form.scaled(scalar).map(Morphism::from_number_affine),

      MorphismVariant::FreeAffine(form) => form.scaled(scalar).map(Morphism::from_number_free_affine),

      MorphismVariant::GenericAffine(form) => Some(Morphism::from_generic_affine(form.scaled(scalar))),

      MorphismVariant::Scaled(f, inner_scalar) => return f.scaled(&scalar.product(inner_scalar)),

      _ => None
    };

    Ok(fused.unwrap_or_else(|| {
      Morphism::new(
        self.domain.clone(),
        self.codomain.clone(),
        MorphismVariant::Scaled(Box::new(self.clone()), scalar.clone())
      )
    }))
  }

  /// `self` applied `exponent` times. Only endomorphisms have powers.
  pub fn power(&self, exponent: i64) -> Result<Morphism, CompositionError> {
    if self.domain != self.codomain {
      return Err(CompositionError::DomainMismatch {
        expected: self.domain.clone(),
        found   : self.codomain.clone()
      });
    }
    if exponent < 0 {
      return Err(CompositionError::NegativeExponent(exponent));
    }

    match exponent {
      0 => return Ok(Morphism::identity(&self.domain)),
      1 => return Ok(self.clone()),
      _ => {}
    }
    if self.is_identity() || self.constant_value().is_some() {
      return Ok(self.clone());
    }

    let exponent = exponent as u64;
    Ok(match &self.variant {
      // Exponents of an existing power add.
      MorphismVariant::Power(base, k) => power_of(base, add_exponents(*k, exponent)),
      _ => power_of(self, exponent)
    })
  }

  // endregion
}

/// Exponents stay representable as the `i64` that `power` accepts, so sums of them saturate at `i64::MAX`.
fn add_exponents(m: u64, n: u64) -> u64 {
  m.saturating_add(n).min(i64::MAX as u64)
}

fn power_of(base: &Morphism, exponent: u64) -> Morphism {
  Morphism::new(
    base.domain.clone(),
    base.codomain.clone(),
    MorphismVariant::Power(Box::new(base.clone()), exponent)
  )
}

/// `f ∘ g` as a single morphism of a simpler shape, when the shapes allow it.
fn fuse_composition(f: &Morphism, g: &Morphism) -> Option<Morphism> {
  use MorphismVariant as V;

  match (&f.variant, &g.variant) {
    (V::Affine(a), V::Affine(b)) => Some(Morphism::from_number_affine(a.compose(b)?)),

    (V::FreeAffine(a), V::FreeAffine(b)) => Some(Morphism::from_number_free_affine(a.compose(b)?)),

    (V::FreeAffine(a), V::Affine(b)) => Some(Morphism::from_number_free_affine(a.compose(&b.to_free())?)),

    (V::Affine(a), V::FreeAffine(b)) => Some(Morphism::from_number_free_affine(a.to_free().compose(b)?)),

    (V::GenericAffine(a), V::GenericAffine(b)) => Some(Morphism::from_generic_affine(a.compose(b))),

    (V::Translation(s), V::Translation(t)) => Some(Morphism::translation(s.sum(t))),

    (V::Translation(t), V::Affine(b)) => Some(Morphism::from_number_affine(b.translated(t)?)),

    (V::Translation(t), V::FreeAffine(b)) => Some(Morphism::from_number_free_affine(b.translated(t)?)),

    (V::Affine(a), V::Translation(t)) => {
      let shift = NumberAffine::from_elements(&t.module().one()?, t)?;
      Some(Morphism::from_number_affine(a.compose(&shift)?))
    }

    (V::Conjugation, V::Conjugation) => Some(Morphism::identity(&g.domain)),

    (V::Projection(i), V::Tuple(factors)) => factors.get(*i).cloned(),

    (V::Reorder(outer), V::Reorder(inner)) => {
      let indices = outer.iter().map(|j| j.and_then(|j| inner[j])).collect();
      Morphism::reorder(&g.domain, &f.codomain, indices)
    }

    (V::Embedding(outer), V::Embedding(inner)) if !outer.from_modular() && !inner.from_modular() => {
      RingPair::embedding(inner.source(), outer.target()).map(Morphism::number_embedding)
    }

    (V::Power(h, m), V::Power(k, n)) if h == k => Some(power_of(h, add_exponents(*m, *n))),

    (V::Power(h, m), _) if h.as_ref() == g => Some(power_of(h, add_exponents(*m, 1))),

    (_, V::Power(h, n)) if h.as_ref() == f => Some(power_of(h, add_exponents(*n, 1))),

    _ if f == g => Some(power_of(f, 2)),

    _ => None
  }
}

/// `f ± g` as a single morphism, when the shapes allow it.
fn fuse_pointwise(f: &Morphism, g: &Morphism, operation: Pointwise) -> Option<Morphism> {
  use MorphismVariant as V;

  let sum = operation == Pointwise::Sum;
  match (&f.variant, &g.variant) {
    (V::Constant(a), V::Constant(b)) => Some(Morphism::constant(&f.domain, operation.elements(a, b))),

    (V::Affine(a), V::Affine(b)) => {
      let form = if sum { a.sum(b)? } else { a.difference(b)? };
      Some(Morphism::from_number_affine(form))
    }

    (V::FreeAffine(a), V::FreeAffine(b)) => {
      let form = if sum { a.sum(b)? } else { a.difference(b)? };
      Some(Morphism::from_number_free_affine(form))
    }

    (V::GenericAffine(a), V::GenericAffine(b)) => {
      let form = if sum { a.sum(b) } else { a.difference(b) };
      Some(Morphism::from_generic_affine(form))
    }

    (V::Affine(a), V::Constant(c)) => {
      let shift = if sum { c.clone() } else { c.negated() };
      Some(Morphism::from_number_affine(a.translated(&shift)?))
    }

    (V::FreeAffine(a), V::Constant(c)) => {
      let shift = if sum { c.clone() } else { c.negated() };
      Some(Morphism::from_number_free_affine(a.translated(&shift)?))
    }

    (V::Constant(c), V::Affine(a)) => {
      let a = if sum { a.clone() } else { a.scaled(&c.module().one()?.negated())? };
      Some(Morphism::from_number_affine(a.translated(c)?))
    }

    _ => None
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::module::ModuleType;

  #[test]
  fn translations_fold_into_affine_forms() {
    let f = Morphism::z_affine(2, 1);
    let t = Morphism::translation(Element::Z(3));
    assert_eq!(t.compose(&f).unwrap(), Morphism::z_affine(2, 4));
    assert_eq!(f.compose(&t).unwrap(), Morphism::z_affine(2, 7));
    assert_eq!(t.compose(&t).unwrap(), Morphism::translation(Element::Z(6)));
  }

  #[test]
  fn constants_absorb() {
    let f = Morphism::z_affine(2, 1);
    let c = Morphism::constant(&ModuleType::Q, Element::Z(5));
    let composed = f.compose(&c).unwrap();
    assert_eq!(composed.constant_value(), Some(&Element::Z(11)));
    assert_eq!(composed.domain(), &ModuleType::Q);

    let zero = Morphism::zero(&ModuleType::Z, &ModuleType::Z);
    assert_eq!(f.sum(&zero).unwrap(), f);
    assert_eq!(zero.sum(&f).unwrap(), f);
  }

  #[test]
  fn affine_minus_constant() {
    let f = Morphism::z_affine(2, 1);
    let c = Morphism::constant(&ModuleType::Z, Element::Z(5));
    assert_eq!(f.difference(&c).unwrap(), Morphism::z_affine(2, -4));
    assert_eq!(c.difference(&f).unwrap(), Morphism::z_affine(-2, 4));
    assert_eq!(f.difference(&f).unwrap(), Morphism::zero(&ModuleType::Z, &ModuleType::Z));
  }

  #[test]
  fn reorders_compose_as_index_maps() {
    let z3 = ModuleType::free(&ModuleType::Z, 3);
    let rotate = Morphism::reorder_raw(&z3, &z3, &[1, 2, 0]).unwrap();
    let twice = rotate.compose(&rotate).unwrap();
    assert_eq!(twice, Morphism::reorder_raw(&z3, &z3, &[2, 0, 1]).unwrap());
    assert!(rotate.compose(&twice).unwrap().is_identity());
  }

  #[test]
  fn self_composition_becomes_a_power() {
    let f = Morphism::modulo(1, 5).unwrap();
    let zx = ModuleType::polynomial(&ModuleType::Z, "X");
    let square = Element::polynomial(&zx, vec![Element::Z(1), Element::Z(0), Element::Z(1)]).unwrap();
    let p = Morphism::polynomial(square).unwrap();

    let pp = p.compose(&p).unwrap();
    assert!(matches!(pp.variant(), MorphismVariant::Power(_, 2)));
    let ppp = p.compose(&pp).unwrap();
    assert!(matches!(ppp.variant(), MorphismVariant::Power(_, 3)));
    assert_eq!(ppp.map(&Element::Z(1)).unwrap(), Element::Z(26));

    // Not an endomorphism, so never a power.
    assert!(f.compose(&f).is_err());
  }

  #[test]
  fn large_exponents_are_kept_exactly() {
    let zx = ModuleType::polynomial(&ModuleType::Z, "X");
    let square = Element::polynomial(&zx, vec![Element::Z(1), Element::Z(0), Element::Z(1)]).unwrap();
    let p = Morphism::polynomial(square).unwrap();

    let big = p.power(1 << 33).unwrap();
    assert!(matches!(big.variant(), MorphismVariant::Power(_, n) if *n == 1 << 33));
    let bigger = big.power(3).unwrap();
    assert!(matches!(bigger.variant(), MorphismVariant::Power(_, n) if *n == (1 << 33) + 3));

    // Sums of exponents stop at the largest exponent `power` accepts.
    let huge = p.power(i64::MAX).unwrap().power(i64::MAX).unwrap();
    assert!(matches!(huge.variant(), MorphismVariant::Power(_, n) if *n == i64::MAX as u64));
  }

  #[test]
  fn mismatched_operands_are_reported() {
    let f = Morphism::z_affine(2, 1);
    let g = Morphism::q_affine(num_rational::Rational64::new(1, 2), num_rational::Rational64::new(0, 1));
    assert!(matches!(f.compose(&g), Err(CompositionError::DomainMismatch { .. })));
    assert!(matches!(f.sum(&g), Err(CompositionError::DomainMismatch { .. })));
    assert!(matches!(f.scaled(&Element::real(2.0)), Err(CompositionError::NotScalable { .. })));
    assert!(matches!(f.power(-1), Err(CompositionError::NegativeExponent(-1))));
  }
}
