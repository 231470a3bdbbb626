/*!

Structural equality, ordering, and hashing of morphisms.

Morphisms compare by variant first, then domain, then codomain, then payload. Payloads with a cheap structural
comparison use it. The composite wrappers compare their canonical string form (`FormatStyle::Input`), which renders
the whole tree. `Hash` follows exactly the same split so that equal morphisms hash equally.

*/

use std::{
  cmp::Ordering,
  hash::{Hash, Hasher}
};

use crate::core::{
  format::{FormatStyle, Formattable},
  morphism::{Morphism, MorphismVariant}
};

impl Morphism {
  /// Position of the variant in the declaration order of `MorphismVariant`.
  fn rank(&self) -> u8 {
    match &self.variant {
      MorphismVariant::Identity             => 0,
      MorphismVariant::Constant(_)          => 1,
      MorphismVariant::Affine(_)            => 2,
      MorphismVariant::FreeAffine(_)        => 3,
      MorphismVariant::GenericAffine(_)     => 4,
      MorphismVariant::Translation(_)       => 5,
      MorphismVariant::Projection(_)        => 6,
      MorphismVariant::Reorder(_)           => 7,
      MorphismVariant::Shuffle(_)           => 8,
      MorphismVariant::Split(_)             => 9,
      MorphismVariant::Conjugation          => 10,
      MorphismVariant::Modulo(_)            => 11,
      MorphismVariant::Polynomial(_)        => 12,
      MorphismVariant::Folding(_)           => 13,
      MorphismVariant::Tuple(_)             => 14,
      MorphismVariant::Embedding(_)         => 15,
      MorphismVariant::Cast(_)              => 16,
      MorphismVariant::CoefficientEmbedding => 17,
      MorphismVariant::StringEmbedding      => 18,
      MorphismVariant::StringCast(_)        => 19,
      MorphismVariant::FreeLift(_)          => 20,
      MorphismVariant::Composition(..)      => 21,
      MorphismVariant::Sum(..)              => 22,
      MorphismVariant::Difference(..)       => 23,
      MorphismVariant::Scaled(..)           => 24,
      MorphismVariant::Power(..)            => 25,
    }
  }

  /// Whether this variant compares by its canonical string form.
  fn compares_by_repr(&self) -> bool {
    matches!(
      self.variant,
      MorphismVariant::Split(_)
        | MorphismVariant::Tuple(_)
        | MorphismVariant::StringCast(_)
        | MorphismVariant::FreeLift(_)
        | MorphismVariant::Composition(..)
        | MorphismVariant::Sum(..)
        | MorphismVariant::Difference(..)
        | MorphismVariant::Scaled(..)
    )
  }

  fn compare_payload(&self, other: &Morphism) -> Ordering {
    use MorphismVariant as V;

    match (&self.variant, &other.variant) {
      (V::Constant(a), V::Constant(b))           => a.cmp(b),
      (V::Affine(a), V::Affine(b))               => a.cmp(b),
      (V::FreeAffine(a), V::FreeAffine(b))       => a.cmp(b),
      (V::GenericAffine(a), V::GenericAffine(b)) => a.cmp(b),
      (V::Translation(a), V::Translation(b))     => a.cmp(b),
      (V::Projection(a), V::Projection(b))       => a.cmp(b),
      (V::Reorder(a), V::Reorder(b))             => a.cmp(b),
      (V::Shuffle(a), V::Shuffle(b))             => a.cmp(b),
      (V::Modulo(a), V::Modulo(b))               => a.cmp(b),
      (V::Polynomial(a), V::Polynomial(b))       => a.cmp(b),
      (V::Folding(a), V::Folding(b))             => a.cmp(b),
      (V::Embedding(a), V::Embedding(b))         => a.cmp(b),
      (V::Cast(a), V::Cast(b))                   => a.cmp(b),
      (V::Power(f, n), V::Power(g, m))           => n.cmp(m).then_with(|| f.cmp(g)),

      _ if self.compares_by_repr() => {
        self.repr(FormatStyle::Input).cmp(&other.repr(FormatStyle::Input))
      }

      // Payload-free variants of equal rank.
      _ => Ordering::Equal
    }
  }
}

impl PartialEq for Morphism {
  fn eq(&self, other: &Self) -> bool {
    self.cmp(other) == Ordering::Equal
  }
}

impl Eq for Morphism {}

impl PartialOrd for Morphism {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for Morphism {
  fn cmp(&self, other: &Self) -> Ordering {
    self.rank()
        .cmp(&other.rank())
        .then_with(|| self.domain.cmp(&other.domain))
        .then_with(|| self.codomain.cmp(&other.codomain))
        .then_with(|| self.compare_payload(other))
  }
}

impl Hash for Morphism {
  fn hash<H: Hasher>(&self, state: &mut H) {
    use MorphismVariant as V;

    self.rank().hash(state);
    self.domain.hash(state);
    self.codomain.hash(state);

    match &self.variant {
      V::Constant(value)       => value.hash(state),
      V::Affine(form)          => form.hash(state),
      V::FreeAffine(form)      => form.hash(state),
      V::GenericAffine(form)   => form.hash(state),
      V::Translation(value)    => value.hash(state),
      V::Projection(index)     => index.hash(state),
      V::Reorder(indices)
      | V::Shuffle(indices)    => indices.hash(state),
      V::Modulo(reduction)     => reduction.hash(state),
      V::Polynomial(value)     => value.hash(state),
      V::Folding(table)        => table.hash(state),
      V::Embedding(pair)
      | V::Cast(pair)          => pair.hash(state),
      V::Power(f, n)           => {
        n.hash(state);
        f.hash(state);
      }

      _ if self.compares_by_repr() => self.repr(FormatStyle::Input).hash(state),

      _ => {}
    }
  }
}


#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::*;
  use crate::core::module::{Element, ModuleType};

  #[test]
  fn structural_equality() {
    assert_eq!(Morphism::z_affine(2, 3), Morphism::z_affine(2, 3));
    assert_ne!(Morphism::z_affine(2, 3), Morphism::z_affine(2, 4));
    assert_ne!(Morphism::identity(&ModuleType::Z), Morphism::identity(&ModuleType::Q));

    let f = Morphism::z_affine(2, 3);
    let g = Morphism::z_affine(5, 1);
    let sum_one = f.sum(&Morphism::constant(&ModuleType::Z, Element::Z(1))).unwrap();
    assert_eq!(sum_one, Morphism::z_affine(2, 4));

    let mut set = HashSet::new();
    set.insert(f.clone());
    set.insert(Morphism::z_affine(2, 3));
    set.insert(g);
    assert_eq!(set.len(), 2);
  }

  #[test]
  fn ordering_starts_with_the_variant() {
    let id = Morphism::identity(&ModuleType::R);
    let constant = Morphism::constant(&ModuleType::Z, Element::Z(0));
    assert!(id < constant);
    assert!(Morphism::z_affine(1, 2) < Morphism::z_affine(1, 3));
  }
}
