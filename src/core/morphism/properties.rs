/*!

Classification of morphisms. The flags are computed from the variant and its payload, never stored, so a morphism
cannot disagree with its own classification.

A composite is only as structured as its operands: the flags of a composition, sum, scaled map, or power are the
intersection of the flags its operands share with what that combinator preserves.

*/

use enumflags2::{bitflags, make_bitflags, BitFlags};

use crate::core::{
  module::Element,
  morphism::{Morphism, MorphismVariant}
};

#[bitflags]
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MorphismProperty {
  /// Additive and compatible with scalar multiplication.
  ModuleHomomorphism,
  /// Additive and multiplicative.
  RingHomomorphism,
  /// Maps zero to zero and is additive.
  Linear,
  Identity,
  Constant,
}

pub type MorphismProperties = BitFlags<MorphismProperty, u8>;

impl MorphismProperty {
  #![allow(non_upper_case_globals)]

  pub const Homomorphism: MorphismProperties
      = make_bitflags!(MorphismProperty::{ModuleHomomorphism | RingHomomorphism | Linear});

  pub const Additive: MorphismProperties = make_bitflags!(MorphismProperty::{ModuleHomomorphism | Linear});
}

fn when(condition: bool, properties: impl Into<MorphismProperties>) -> MorphismProperties {
  if condition { properties.into() } else { MorphismProperties::empty() }
}

/// The flags every operand has.
fn shared<'a>(morphisms: impl IntoIterator<Item = &'a Morphism>) -> MorphismProperties {
  morphisms.into_iter().fold(MorphismProperties::all(), |acc, m| acc & m.properties())
}

impl Morphism {
  pub fn properties(&self) -> MorphismProperties {
    let ring_map = self.domain.is_ring() && self.codomain.is_ring();

    match &self.variant {

      MorphismVariant::Identity => {
        MorphismProperty::Additive
            | MorphismProperty::Identity
            | when(self.domain.is_ring(), MorphismProperty::RingHomomorphism)
            | when(self.domain.is_null(), MorphismProperty::Constant)
      }

      MorphismVariant::Constant(value) => {
        when(value.is_zero(), MorphismProperty::Additive) | MorphismProperty::Constant
      }

      MorphismVariant::Affine(form) => form.properties(),

      MorphismVariant::FreeAffine(form) => form.properties(),

      MorphismVariant::GenericAffine(form) => form.properties(),

      MorphismVariant::Translation(translate) => {
        when(
          translate.is_zero(),
          when(ring_map, MorphismProperty::RingHomomorphism)
              | MorphismProperty::Additive
              | MorphismProperty::Identity
        )
      }

      MorphismVariant::Projection(_) => MorphismProperty::Homomorphism,

      MorphismVariant::Reorder(indices) => {
        let identity = indices.len() == self.domain.dimension()
            && indices.iter().enumerate().all(|(j, i)| *i == Some(j));
        MorphismProperty::Additive
            | when(identity, when(ring_map, MorphismProperty::RingHomomorphism) | MorphismProperty::Identity)
            | when(indices.iter().all(Option::is_none), MorphismProperty::Constant)
      }

      MorphismVariant::Shuffle(indices) => {
        let identity = indices.len() == self.codomain.dimension()
            && indices.iter().enumerate().all(|(i, j)| *j == Some(i));
        MorphismProperty::Additive
            | when(identity, when(ring_map, MorphismProperty::RingHomomorphism) | MorphismProperty::Identity)
            | when(indices.iter().all(Option::is_none), MorphismProperty::Constant)
      }

      MorphismVariant::Split(parts) => {
        shared(parts)
            & (MorphismProperty::Additive | MorphismProperty::Identity | MorphismProperty::Constant)
      }

      MorphismVariant::Conjugation => {
        when(self.domain.is_ring(), MorphismProperty::RingHomomorphism) | MorphismProperty::ModuleHomomorphism
      }

      MorphismVariant::Modulo(reduction) => {
        when(self.domain.dimension() == 1 && !reduction.is_canonical(), MorphismProperty::RingHomomorphism)
      }

      MorphismVariant::Polynomial(polynomial) => polynomial_properties(polynomial),

      MorphismVariant::Folding(_) => MorphismProperties::empty(),

      MorphismVariant::Tuple(factors) => {
        shared(factors) & (MorphismProperty::Homomorphism | MorphismProperty::Constant)
      }

      MorphismVariant::Embedding(pair) => when(!pair.from_modular(), MorphismProperty::Homomorphism),

      MorphismVariant::Cast(_) => MorphismProperties::empty(),

      MorphismVariant::CoefficientEmbedding
      | MorphismVariant::StringEmbedding => MorphismProperty::Homomorphism,

      MorphismVariant::StringCast(coefficients) => coefficients.properties() & MorphismProperty::Homomorphism,

      MorphismVariant::FreeLift(ring_morphism) => {
        let inner = ring_morphism.properties();
        let identity = inner.contains(MorphismProperty::Identity) && self.domain == self.codomain;
        (inner & (MorphismProperty::Additive | MorphismProperty::Constant))
            | when(identity, MorphismProperty::Identity)
      }

      MorphismVariant::Composition(f, g) => {
        let (outer, inner) = (f.properties(), g.properties());
        (outer & inner & MorphismProperty::Homomorphism)
            | when(
                outer.contains(MorphismProperty::Constant) || inner.contains(MorphismProperty::Constant),
                MorphismProperty::Constant
              )
      }

      MorphismVariant::Sum(f, g)
      | MorphismVariant::Difference(f, g) => {
        shared([f.as_ref(), g.as_ref()]) & (MorphismProperty::Additive | MorphismProperty::Constant)
      }

      MorphismVariant::Scaled(f, _) => {
        f.properties() & (MorphismProperty::Additive | MorphismProperty::Constant)
      }

      MorphismVariant::Power(f, _) => f.properties(),

    }
  }

  #[inline(always)]
  pub fn is_module_homomorphism(&self) -> bool {
    self.properties().contains(MorphismProperty::ModuleHomomorphism)
  }

  #[inline(always)]
  pub fn is_ring_homomorphism(&self) -> bool {
    self.properties().contains(MorphismProperty::RingHomomorphism)
  }

  #[inline(always)]
  pub fn is_linear(&self) -> bool {
    self.properties().contains(MorphismProperty::Linear)
  }

  #[inline(always)]
  pub fn is_identity(&self) -> bool {
    self.properties().contains(MorphismProperty::Identity)
  }

  #[inline(always)]
  pub fn is_constant(&self) -> bool {
    self.properties().contains(MorphismProperty::Constant)
  }
}

/// `p(x) = c₀ + c₁x + …`: constant when of degree at most zero, linear when `c₀ = 0` and the degree is at most one.
fn polynomial_properties(polynomial: &Element) -> MorphismProperties {
  let Element::Polynomial { coefficients, .. } = polynomial else {
    return MorphismProperties::empty();
  };
  let degree_at_most_one = coefficients.len() <= 2;
  let no_constant_term   = coefficients.first().map_or(true, |c| c.is_zero());

  let mut properties = when(coefficients.len() <= 1, MorphismProperty::Constant);
  if degree_at_most_one && no_constant_term {
    properties |= MorphismProperty::Additive;
    let slope = coefficients.get(1);
    if slope.map_or(true, |a| a.product(a) == *a) {
      properties |= MorphismProperty::RingHomomorphism;
    }
    if slope.is_some_and(|a| a.is_one()) {
      properties |= MorphismProperty::Identity;
    }
  }
  properties
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::module::ModuleType;

  #[test]
  fn identity_flags() {
    let id = Morphism::identity(&ModuleType::Z);
    assert!(id.is_identity() && id.is_ring_homomorphism() && id.is_linear());

    let id = Morphism::identity(&ModuleType::free(&ModuleType::R, 3));
    assert!(id.is_module_homomorphism());
    assert!(!id.is_ring_homomorphism());
  }

  #[test]
  fn constants_are_linear_only_at_zero() {
    let zero = Morphism::zero(&ModuleType::Z, &ModuleType::Q);
    assert!(zero.is_constant() && zero.is_linear());
    let three = Morphism::constant(&ModuleType::Z, Element::Z(3));
    assert!(three.is_constant());
    assert!(!three.is_module_homomorphism());
  }

  #[test]
  fn polynomial_classification() {
    let zx = ModuleType::polynomial(&ModuleType::Z, "X");
    let x = Element::polynomial(&zx, vec![Element::Z(0), Element::Z(1)]).unwrap();
    assert!(Morphism::polynomial(x).unwrap().is_identity());

    let square = Element::polynomial(&zx, vec![Element::Z(0), Element::Z(0), Element::Z(1)]).unwrap();
    assert!(Morphism::polynomial(square).unwrap().properties().is_empty());

    let five = Element::polynomial(&zx, vec![Element::Z(5)]).unwrap();
    assert!(Morphism::polynomial(five).unwrap().is_constant());
  }
}
