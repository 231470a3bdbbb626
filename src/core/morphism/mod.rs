/*!

A `Morphism` is a map between two module types, its domain and codomain, together with a `MorphismVariant` that
says how the map computes. The set of variants is closed: every match over `MorphismVariant` is exhaustive, so adding a
variant forces every combinator, classification, rendering, and record conversion to say what it does with it.

## Lifecycle and Ownership

Morphisms are immutable values. They are created only by the factory functions in this module and its submodules,
never by assembling fields, so the domain and codomain always agree with the variant's payload. Sub-morphisms are
owned by their parent (`BxMorphism`). Sharing a morphism means cloning it. The canonicalization caches keep their
entries for the life of the process.

## Variants

| group         | variants                                                                             |
|:--------------|:-------------------------------------------------------------------------------------|
| elementary    | `Identity`, `Constant`                                                               |
| affine        | `Affine` (per numeric ring), `FreeAffine` (per numeric ring), `GenericAffine`        |
| structural    | `Translation`, `Projection`, `Reorder`, `Shuffle`, `Split`, `Conjugation`, `Modulo`, `Polynomial`, `Folding`, `Tuple` |
| ring changes  | `Embedding`, `Cast`, `CoefficientEmbedding`, `StringEmbedding`, `StringCast`, `FreeLift` |
| wrappers      | `Composition`, `Sum`, `Difference`, `Scaled`, `Power`                                |

The wrappers are what the combinators in [`combinator`] fall back to when no simplification applies. They defer to
their operands at call time.

## Application

`Morphism::map` checks that its argument is an element of the domain and reports `MappingError::NotInDomain`
otherwise. Past that check the variant computes without further membership tests.

*/

mod affine;
mod combinator;
mod conversion;
mod display;
mod ordering;
mod properties;
mod record;
mod structural;
#[cfg(test)]
mod tests;

use crate::core::{
  canonical,
  error::MappingError,
  module::{Element, ModuleType}
};

pub use affine::{Affine, FreeAffine, NumberAffine, NumberFreeAffine};
pub use conversion::{NumberKind, RingPair};
pub use properties::{MorphismProperties, MorphismProperty};
pub use record::{MorphismRecord, RecordField};
pub use structural::{FoldingTable, ModuloReduction};

/// A boxed morphism, owned by the morphism that holds it.
pub type BxMorphism = Box<Morphism>;

#[derive(Clone, Debug)]
pub struct Morphism {
  domain  : ModuleType,
  codomain: ModuleType,
  variant : MorphismVariant,
}

#[derive(Clone, Debug)]
pub enum MorphismVariant {
  /// `x ↦ x`
  Identity,
  /// `x ↦ c`
  Constant(Element),
  /// `x ↦ a·x + b` over a numeric ring.
  Affine(NumberAffine),
  /// `x ↦ A·x + b` over a numeric ring, `A` not `1×1`.
  FreeAffine(NumberFreeAffine),
  /// `x ↦ A·x + b` over any ring.
  GenericAffine(FreeAffine<Element>),
  /// `x ↦ x + t`
  Translation(Element),
  /// The `i`th factor of a product ring.
  Projection(usize),
  /// Codomain coordinate `j` is domain coordinate `indices[j]`, or zero.
  Reorder(Vec<Option<usize>>),
  /// Domain coordinate `i` is added to codomain coordinate `indices[i]`, or dropped.
  Shuffle(Vec<Option<usize>>),
  /// Consecutive blocks of coordinates, each mapped by its own morphism.
  Split(Vec<Morphism>),
  /// Complex conjugation of every coordinate.
  Conjugation,
  /// Reduction of integer coordinates modulo `n`.
  Modulo(ModuloReduction),
  /// Evaluation of a fixed polynomial.
  Polynomial(Element),
  /// A lookup table from sample elements to reals.
  Folding(FoldingTable),
  /// `x ↦ (f₁(x), …, fₖ(x))` into a product ring.
  Tuple(Vec<Morphism>),
  /// A structure preserving map between numeric rings.
  Embedding(RingPair),
  /// A lossy conversion between numeric rings.
  Cast(RingPair),
  /// `R → R[X]`, the constant polynomials.
  CoefficientEmbedding,
  /// `R → R<String>`, multiples of the empty word.
  StringEmbedding,
  /// `R<String> → S<String>`, coefficients mapped by a ring morphism.
  StringCast(BxMorphism),
  /// `R^m → S^n`, coordinates mapped by a ring morphism, zero filled or truncated.
  FreeLift(BxMorphism),
  /// `x ↦ f(g(x))`
  Composition(BxMorphism, BxMorphism),
  /// `x ↦ f(x) + g(x)`
  Sum(BxMorphism, BxMorphism),
  /// `x ↦ f(x) - g(x)`
  Difference(BxMorphism, BxMorphism),
  /// `x ↦ s·f(x)`
  Scaled(BxMorphism, Element),
  /// `f` applied `n` times.
  Power(BxMorphism, u64),
}

impl Morphism {
  /// Assembles a morphism. Callers guarantee that the payload fits the domain and codomain.
  pub(crate) fn new(domain: ModuleType, codomain: ModuleType, variant: MorphismVariant) -> Morphism {
    Morphism { domain, codomain, variant }
  }

  #[inline(always)]
  pub fn domain(&self) -> &ModuleType {
    &self.domain
  }

  #[inline(always)]
  pub fn codomain(&self) -> &ModuleType {
    &self.codomain
  }

  #[inline(always)]
  pub fn variant(&self) -> &MorphismVariant {
    &self.variant
  }

  // region Elementary constructors

  pub fn identity(module: &ModuleType) -> Morphism {
    Morphism::new(module.clone(), module.clone(), MorphismVariant::Identity)
  }

  /// The constant map on `domain` with the given value. The codomain is the value's module.
  pub fn constant(domain: &ModuleType, value: Element) -> Morphism {
    Morphism::new(domain.clone(), value.module(), MorphismVariant::Constant(value))
  }

  /// The constant map to the zero of `codomain`.
  pub fn zero(domain: &ModuleType, codomain: &ModuleType) -> Morphism {
    Morphism::constant(domain, codomain.zero())
  }

  /// The value of a constant morphism.
  pub fn constant_value(&self) -> Option<&Element> {
    match &self.variant {
      MorphismVariant::Constant(value) => Some(value),
      _ => None
    }
  }

  // endregion

  // region Application

  /// Applies the morphism to `x`, which must be an element of the domain.
  pub fn map(&self, x: &Element) -> Result<Element, MappingError> {
    if !self.domain.has_element(x) {
      return Err(self.not_in_domain(x));
    }
    self.evaluate(x)
  }

  /// The value at the domain's zero.
  pub fn at_zero(&self) -> Result<Element, MappingError> {
    self.evaluate(&self.domain.zero())
  }

  pub(crate) fn not_in_domain(&self, x: &Element) -> MappingError {
    MappingError::NotInDomain {
      element: x.clone(),
      domain : self.domain.clone()
    }
  }

  /// Applies the morphism to an `x` already known to lie in the domain.
  pub(crate) fn evaluate(&self, x: &Element) -> Result<Element, MappingError> {
    let value = match &self.variant {

      MorphismVariant::Identity => Some(x.clone()),

      MorphismVariant::Constant(value) => Some(value.clone()),

      MorphismVariant::Affine(form) => form.apply(x),

      MorphismVariant::FreeAffine(form) => form.apply(x, &self.codomain),

      MorphismVariant::GenericAffine(form) => form.apply_to_element(x, &self.codomain),

      MorphismVariant::Translation(translate) => Some(x.sum(translate)),

      MorphismVariant::Projection(index) => x.factor(*index).cloned(),

      MorphismVariant::Reorder(indices) => structural::reorder(x, indices, &self.codomain),

      MorphismVariant::Shuffle(indices) => structural::shuffle(x, indices, &self.codomain),

      MorphismVariant::Split(parts) => structural::split(x, parts, &self.codomain)?,

      MorphismVariant::Conjugation => x.conjugated(),

      MorphismVariant::Modulo(reduction) => reduction.apply(x, &self.codomain),

      MorphismVariant::Polynomial(polynomial) => polynomial.evaluate(x),

      MorphismVariant::Folding(table) => Some(table.fold(x)?),

      MorphismVariant::Tuple(factors) => {
        let values = factors.iter().map(|f| f.evaluate(x)).collect::<Result<Vec<_>, _>>()?;
        Some(Element::Product(values))
      }

      MorphismVariant::Embedding(pair) => pair.embed(x),

      MorphismVariant::Cast(pair) => pair.cast(x),

      MorphismVariant::CoefficientEmbedding => Element::polynomial(&self.codomain, vec![x.clone()]),

      MorphismVariant::StringEmbedding => Element::strings(&self.codomain, vec![("", x.clone())]),

      MorphismVariant::StringCast(coefficients) => structural::string_cast(x, coefficients, &self.codomain)?,

      MorphismVariant::FreeLift(ring_morphism) => structural::free_lift(x, ring_morphism, &self.codomain)?,

      MorphismVariant::Composition(f, g) => Some(f.evaluate(&g.evaluate(x)?)?),

      MorphismVariant::Sum(f, g) => Some(f.evaluate(x)?.sum(&g.evaluate(x)?)),

      MorphismVariant::Difference(f, g) => Some(f.evaluate(x)?.difference(&g.evaluate(x)?)),

      MorphismVariant::Scaled(f, scalar) => Some(f.evaluate(x)?.scaled(scalar)),

      MorphismVariant::Power(f, exponent) => {
        let mut y = x.clone();
        for _ in 0..*exponent {
          y = f.evaluate(&y)?;
        }
        Some(y)
      }

    };

    value.ok_or_else(|| self.not_in_domain(x))
  }

  // endregion

  /// The morphism induced between the rings of the domain and codomain. When both are already rings, this is the
  /// identity on the domain.
  pub fn ring_morphism(&self) -> Option<Morphism> {
    if self.domain.is_ring() && self.codomain.is_ring() {
      return Some(Morphism::identity(&self.domain));
    }

    let (domain_ring, codomain_ring) = (self.domain.ring(), self.codomain.ring());
    match &self.variant {
      MorphismVariant::FreeLift(ring_morphism) => Some(ring_morphism.as_ref().clone()),

      MorphismVariant::Modulo(reduction) => Some(Morphism::modulo_reduction(reduction.modulus(), reduction.is_canonical())),

      MorphismVariant::Composition(f, g) => f.ring_morphism()?.compose(&g.ring_morphism()?).ok(),

      _ if domain_ring == codomain_ring => Some(Morphism::identity(&domain_ring)),

      _ => canonical::ring_canonical_morphism(&domain_ring, &codomain_ring)
    }
  }
}
