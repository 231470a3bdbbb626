/*!

The public API of the library.

Everything a caller needs is re-exported here: the module types and their elements, the `Morphism` type with its
factory functions and combinators, the canonicalization entry points, and the error types. The free functions below
are thin wrappers that read naturally at call sites that pass morphisms around as values.

| function                   | result                                   |
|:---------------------------|:-----------------------------------------|
| `apply(f, x)`              | `Result<Element, MappingError>`          |
| `compose(f, g)`            | `Result<Morphism, CompositionError>`     |
| `sum(f, g)`                | `Result<Morphism, CompositionError>`     |
| `difference(f, g)`         | `Result<Morphism, CompositionError>`     |
| `scaled(f, s)`             | `Result<Morphism, CompositionError>`     |
| `power(f, n)`              | `Result<Morphism, CompositionError>`     |
| `canonical_morphism(A, B)` | `Option<Morphism>`                       |
| `embedding(A, B)`          | `Option<Morphism>`                       |
| `casting(A, B)`            | `Option<Morphism>`                       |

*/

#[cfg(test)]
mod tests;

pub use crate::core::{
  canonical::{
    canonical_morphism,
    casting,
    embedding,
    ring_canonical_morphism,
    strategy_cache,
    CacheStatistics,
    MorphismCache,
    Strategy
  },
  error::{CompositionError, MappingError},
  format::{FormatStyle, Formattable},
  module::{ComplexNumber, Element, Matrix, Modular, ModuleType, NumberRing, Scalar},
  morphism::{
    Affine,
    BxMorphism,
    FoldingTable,
    FreeAffine,
    ModuloReduction,
    Morphism,
    MorphismProperties,
    MorphismProperty,
    MorphismRecord,
    MorphismVariant,
    NumberAffine,
    NumberFreeAffine,
    NumberKind,
    RecordField,
    RingPair
  }
};

/// `f(x)`
pub fn apply(f: &Morphism, x: &Element) -> Result<Element, MappingError> {
  f.map(x)
}

/// `f ∘ g`
pub fn compose(f: &Morphism, g: &Morphism) -> Result<Morphism, CompositionError> {
  f.compose(g)
}

pub fn sum(f: &Morphism, g: &Morphism) -> Result<Morphism, CompositionError> {
  f.sum(g)
}

pub fn difference(f: &Morphism, g: &Morphism) -> Result<Morphism, CompositionError> {
  f.difference(g)
}

pub fn scaled(f: &Morphism, scalar: &Element) -> Result<Morphism, CompositionError> {
  f.scaled(scalar)
}

pub fn power(f: &Morphism, exponent: i64) -> Result<Morphism, CompositionError> {
  f.power(exponent)
}

/// Hit, miss, and insertion counts of the process-wide cache of each strategy.
pub fn cache_statistics() -> [(Strategy, CacheStatistics); 3] {
  [Strategy::Canonical, Strategy::Embedding, Strategy::Casting]
      .map(|strategy| (strategy, strategy_cache(strategy).statistics()))
}
