/*!

Structural morphisms: the ones that move, select, reduce, or look up coordinates rather than doing linear algebra on
them.

Coordinate maps are written in two directions.

| variant   | indexed by            | entry `None` means        | repeated entries mean            |
|:----------|:----------------------|:--------------------------|:---------------------------------|
| `Reorder` | codomain coordinate   | that coordinate is zero   | a domain coordinate is copied    |
| `Shuffle` | domain coordinate     | that coordinate is dropped| the domain coordinates are added |

The `*_raw` constructors accept signed indices the way they arrive from text: `-1` is the "zero" or "dropped"
sentinel and any other negative index is invalid.

*/

use std::collections::{BTreeMap, BTreeSet};

use bit_set::BitSet;
use total_float_wrap::TotalF64;

use crate::{
  core::{
    error::MappingError,
    module::{Element, ModuleType},
    morphism::{Morphism, MorphismVariant, RingPair}
  },
  debug
};

// region Payloads

/// Reduction modulo `n`. The canonical reduction `Z → Z_n` is kept apart from the one built with
/// `Morphism::modulo` because it does not claim to be a ring homomorphism.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct ModuloReduction {
  modulus  : i64,
  canonical: bool,
}

impl ModuloReduction {
  #[inline(always)]
  pub fn modulus(&self) -> i64 {
    self.modulus
  }

  #[inline(always)]
  pub fn is_canonical(&self) -> bool {
    self.canonical
  }

  pub(crate) fn apply(&self, x: &Element, codomain: &ModuleType) -> Option<Element> {
    let reduced = x.components()
                   .iter()
                   .map(|c| match c {
                     Element::Z(n) => Some(Element::modular(*n, self.modulus)),
                     _ => None
                   })
                   .collect::<Option<Vec<_>>>()?;
    codomain.create_element(reduced)
  }
}

/// The lookup table of a folding morphism. Elements of the numeric rings other than `C` fold to their real value.
/// Everything else folds to its rank among the samples in the element order.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct FoldingTable {
  folds: BTreeMap<Element, TotalF64>,
}

impl FoldingTable {
  fn new(samples: Vec<Element>) -> FoldingTable {
    let samples: Vec<Element> = samples.into_iter()
                                       .collect::<BTreeSet<_>>()
                                       .into_iter()
                                       .collect();
    let by_value = samples.iter().all(|s| !matches!(s, Element::C(_)) && s.to_f64().is_some());

    let folds = samples.into_iter()
                       .enumerate()
                       .map(|(rank, sample)| {
                         let fold = match by_value {
                           true  => sample.to_f64().unwrap_or(rank as f64),
                           false => rank as f64,
                         };
                         (sample, TotalF64::from(fold))
                       })
                       .collect();
    FoldingTable { folds }
  }

  pub fn samples(&self) -> impl Iterator<Item = &Element> {
    self.folds.keys()
  }

  pub fn len(&self) -> usize {
    self.folds.len()
  }

  pub(crate) fn fold(&self, x: &Element) -> Result<Element, MappingError> {
    match self.folds.get(x) {
      Some(fold) => Ok(Element::R(fold.clone())),
      None => Err(MappingError::Unsampled { element: x.clone() })
    }
  }
}

// endregion

// region Constructors

/// Converts signed indices to optional ones. `-1` is the sentinel for "no coordinate".
fn from_raw_indices(raw: &[i64]) -> Option<Vec<Option<usize>>> {
  raw.iter()
     .map(|&i| match i {
       -1 => Some(None),
       i if i >= 0 => Some(Some(i as usize)),
       _ => None
     })
     .collect()
}

/// Both modules must be free over the same ring for a coordinate map between them.
fn same_ring(domain: &ModuleType, codomain: &ModuleType) -> bool {
  domain.ring() == codomain.ring()
}

impl Morphism {
  /// `x ↦ x + t` on the module of `t`.
  pub fn translation(translate: Element) -> Morphism {
    let module = translate.module();
    Morphism::new(module.clone(), module, MorphismVariant::Translation(translate))
  }

  /// The `index`th projection of a product ring.
  pub fn projection(product: &ModuleType, index: usize) -> Option<Morphism> {
    let factor = product.factors()?.get(index)?.clone();
    Some(Morphism::new(product.clone(), factor, MorphismVariant::Projection(index)))
  }

  /// Codomain coordinate `j` is domain coordinate `indices[j]`, or zero for `None`.
  pub fn reorder(domain: &ModuleType, codomain: &ModuleType, indices: Vec<Option<usize>>) -> Option<Morphism> {
    if !same_ring(domain, codomain) || indices.len() != codomain.dimension() {
      return None;
    }
    let dimension = domain.dimension();
    if indices.iter().flatten().any(|&i| i >= dimension) {
      return None;
    }
    note_duplicates("reorder", &indices);
    Some(Morphism::new(domain.clone(), codomain.clone(), MorphismVariant::Reorder(indices)))
  }

  /// `Morphism::reorder` with `-1` for a zero coordinate.
  pub fn reorder_raw(domain: &ModuleType, codomain: &ModuleType, indices: &[i64]) -> Option<Morphism> {
    Morphism::reorder(domain, codomain, from_raw_indices(indices)?)
  }

  /// Domain coordinate `i` is added to codomain coordinate `indices[i]`, or dropped for `None`.
  pub fn shuffle(domain: &ModuleType, codomain: &ModuleType, indices: Vec<Option<usize>>) -> Option<Morphism> {
    if !same_ring(domain, codomain) || indices.len() != domain.dimension() {
      return None;
    }
    let dimension = codomain.dimension();
    if indices.iter().flatten().any(|&j| j >= dimension) {
      return None;
    }
    note_duplicates("shuffle", &indices);
    Some(Morphism::new(domain.clone(), codomain.clone(), MorphismVariant::Shuffle(indices)))
  }

  /// `Morphism::shuffle` with `-1` for a dropped coordinate.
  pub fn shuffle_raw(domain: &ModuleType, codomain: &ModuleType, indices: &[i64]) -> Option<Morphism> {
    Morphism::shuffle(domain, codomain, from_raw_indices(indices)?)
  }

  /// Maps consecutive blocks of coordinates by the given morphisms. All parts must be between free modules over one
  /// ring. The domain and codomain dimensions are the sums of the parts' dimensions.
  pub fn split(parts: Vec<Morphism>) -> Option<Morphism> {
    let first = parts.first()?;
    let (domain_ring, codomain_ring) = (first.domain.ring(), first.codomain.ring());
    if !parts.iter().all(|p| p.domain.ring() == domain_ring && p.codomain.ring() == codomain_ring) {
      return None;
    }
    let domain   = ModuleType::free(&domain_ring, parts.iter().map(|p| p.domain.dimension()).sum());
    let codomain = ModuleType::free(&codomain_ring, parts.iter().map(|p| p.codomain.dimension()).sum());
    Some(Morphism::new(domain, codomain, MorphismVariant::Split(parts)))
  }

  /// Complex conjugation on `C^dimension`.
  pub fn conjugation(dimension: usize) -> Option<Morphism> {
    if dimension == 0 {
      return None;
    }
    let module = ModuleType::free(&ModuleType::C, dimension);
    Some(Morphism::new(module.clone(), module, MorphismVariant::Conjugation))
  }

  /// Reduction `Z^dimension → Z_modulus^dimension`.
  pub fn modulo(dimension: usize, modulus: i64) -> Option<Morphism> {
    if dimension == 0 || modulus < 2 {
      return None;
    }
    Some(Morphism::new(
      ModuleType::free(&ModuleType::Z, dimension),
      ModuleType::free(&ModuleType::zn(modulus), dimension),
      MorphismVariant::Modulo(ModuloReduction { modulus, canonical: false })
    ))
  }

  /// Reduction `Z → Z_modulus`. The canonical flavor claims no homomorphism flags.
  pub(crate) fn modulo_reduction(modulus: i64, canonical: bool) -> Morphism {
    Morphism::new(
      ModuleType::Z,
      ModuleType::zn(modulus),
      MorphismVariant::Modulo(ModuloReduction { modulus, canonical })
    )
  }

  /// Evaluation of `polynomial` on its coefficient ring.
  pub fn polynomial(polynomial: Element) -> Option<Morphism> {
    let ModuleType::Polynomial { coefficients, .. } = polynomial.module() else {
      return None;
    };
    Some(Morphism::new(*coefficients.clone(), *coefficients, MorphismVariant::Polynomial(polynomial)))
  }

  /// A lookup table into `R` over the given samples, which must all come from one module.
  pub fn folding(samples: Vec<Element>) -> Option<Morphism> {
    let domain = samples.first()?.module();
    if !samples.iter().all(|s| domain.has_element(s)) {
      return None;
    }
    Some(Morphism::new(domain, ModuleType::R, MorphismVariant::Folding(FoldingTable::new(samples))))
  }

  /// `x ↦ (f₁(x), …, fₖ(x))`. The factors must share a domain and map into rings, and there must be at least two.
  pub fn tuple(factors: Vec<Morphism>) -> Option<Morphism> {
    let domain = factors.first()?.domain.clone();
    if !factors.iter().all(|f| f.domain == domain) {
      return None;
    }
    let codomains: Vec<ModuleType> = factors.iter().map(|f| f.codomain.clone()).collect();
    let codomain = ModuleType::product(&codomains)?;
    Some(Morphism::new(domain, codomain, MorphismVariant::Tuple(factors)))
  }

  pub(crate) fn number_embedding(pair: RingPair) -> Morphism {
    Morphism::new(pair.source().module(), pair.target().module(), MorphismVariant::Embedding(pair))
  }

  pub(crate) fn number_cast(pair: RingPair) -> Morphism {
    Morphism::new(pair.source().module(), pair.target().module(), MorphismVariant::Cast(pair))
  }

  /// `R → R[X]`, the constant polynomials.
  pub fn coefficient_embedding(polynomial_ring: &ModuleType) -> Option<Morphism> {
    let ModuleType::Polynomial { coefficients, .. } = polynomial_ring else {
      return None;
    };
    Some(Morphism::new(*coefficients.clone(), polynomial_ring.clone(), MorphismVariant::CoefficientEmbedding))
  }

  /// `R → R<String>`, multiples of the empty word.
  pub fn string_embedding(string_ring: &ModuleType) -> Option<Morphism> {
    let ModuleType::Strings(factor) = string_ring else {
      return None;
    };
    Some(Morphism::new(*factor.clone(), string_ring.clone(), MorphismVariant::StringEmbedding))
  }

  /// `R<String> → S<String>` for a morphism `R → S` between rings, applied to every coefficient.
  pub fn string_cast(coefficients: Morphism) -> Option<Morphism> {
    if !coefficients.domain.is_ring() || !coefficients.codomain.is_ring() {
      return None;
    }
    Some(Morphism::new(
      ModuleType::strings(&coefficients.domain),
      ModuleType::strings(&coefficients.codomain),
      MorphismVariant::StringCast(Box::new(coefficients))
    ))
  }

  /// `R^m → S^n` for a morphism `R → S` between rings, applied coordinatewise. Extra codomain coordinates are zero
  /// and extra domain coordinates are dropped.
  pub fn free_lift(ring_morphism: Morphism, domain_dimension: usize, codomain_dimension: usize) -> Option<Morphism> {
    if !ring_morphism.domain.is_ring() || !ring_morphism.codomain.is_ring() {
      return None;
    }
    if domain_dimension == 1 && codomain_dimension == 1 {
      return Some(ring_morphism);
    }
    Some(Morphism::new(
      ModuleType::free(&ring_morphism.domain, domain_dimension),
      ModuleType::free(&ring_morphism.codomain, codomain_dimension),
      MorphismVariant::FreeLift(Box::new(ring_morphism))
    ))
  }
}

// endregion

// region Application

pub(crate) fn reorder(x: &Element, indices: &[Option<usize>], codomain: &ModuleType) -> Option<Element> {
  let components = x.components();
  let zero = codomain.ring().zero();
  let values = indices.iter()
                      .map(|i| match i {
                        Some(i) => components[*i].clone(),
                        None => zero.clone()
                      })
                      .collect();
  codomain.create_element(values)
}

pub(crate) fn shuffle(x: &Element, indices: &[Option<usize>], codomain: &ModuleType) -> Option<Element> {
  let mut values = vec![codomain.ring().zero(); codomain.dimension()];
  for (component, target) in x.components().iter().zip(indices.iter()) {
    if let Some(j) = target {
      values[*j] = values[*j].sum(component);
    }
  }
  codomain.create_element(values)
}

pub(crate) fn split(x: &Element, parts: &[Morphism], codomain: &ModuleType) -> Result<Option<Element>, MappingError> {
  let components = x.components();
  let mut values = Vec::with_capacity(codomain.dimension());
  let mut offset = 0;
  for part in parts {
    let width = part.domain.dimension();
    let block = part.domain.create_element(components[offset..offset + width].to_vec());
    let Some(block) = block else {
      return Ok(None);
    };
    values.extend(part.evaluate(&block)?.components());
    offset += width;
  }
  Ok(codomain.create_element(values))
}

pub(crate) fn string_cast(x: &Element, coefficients: &Morphism, codomain: &ModuleType) -> Result<Option<Element>, MappingError> {
  let Element::Strings { terms, .. } = x else {
    return Ok(None);
  };
  let mut mapped = Vec::with_capacity(terms.len());
  for (word, coefficient) in terms {
    mapped.push((word.as_str(), coefficients.evaluate(coefficient)?));
  }
  Ok(Element::strings(codomain, mapped))
}

pub(crate) fn free_lift(x: &Element, ring_morphism: &Morphism, codomain: &ModuleType) -> Result<Option<Element>, MappingError> {
  let dimension = codomain.dimension();
  let mut values = Vec::with_capacity(dimension);
  for component in x.components().iter().take(dimension) {
    values.push(ring_morphism.evaluate(component)?);
  }
  values.resize(dimension, codomain.ring().zero());
  Ok(codomain.create_element(values))
}

// endregion

/// Whether some coordinate is mentioned twice.
pub(crate) fn duplicated_indices(indices: &[Option<usize>]) -> bool {
  let mut seen = BitSet::new();
  indices.iter().flatten().any(|&i| !seen.insert(i))
}

fn note_duplicates(tag: &str, indices: &[Option<usize>]) {
  if duplicated_indices(indices) {
    debug!(4, "{} with repeated indices {:?}", tag, indices);
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn raw_indices_use_minus_one_as_sentinel() {
    assert_eq!(from_raw_indices(&[1, -1, 0]), Some(vec![Some(1), None, Some(0)]));
    assert_eq!(from_raw_indices(&[0, -2]), None);
  }

  #[test]
  fn reorder_copies_and_zero_fills() {
    let r3 = ModuleType::free(&ModuleType::R, 3);
    let m = Morphism::reorder_raw(&r3, &r3, &[2, -1, 2]).unwrap();
    let y = m.map(&Element::reals(&[1.0, 2.0, 3.0])).unwrap();
    assert_eq!(y, Element::reals(&[3.0, 0.0, 3.0]));
    assert!(Morphism::reorder_raw(&r3, &r3, &[0, 1, 3]).is_none());
    assert!(Morphism::reorder_raw(&r3, &r3, &[0, 1]).is_none());
  }

  #[test]
  fn shuffle_sums_collisions() {
    let r3 = ModuleType::free(&ModuleType::R, 3);
    let r2 = ModuleType::free(&ModuleType::R, 2);
    let m = Morphism::shuffle_raw(&r3, &r2, &[1, 1, -1]).unwrap();
    let y = m.map(&Element::reals(&[1.0, 2.0, 3.0])).unwrap();
    assert_eq!(y, Element::reals(&[0.0, 3.0]));
  }

  #[test]
  fn split_maps_blocks() {
    let double = Morphism::z_affine(2, 0);
    let swap = Morphism::reorder_raw(
      &ModuleType::free(&ModuleType::Z, 2),
      &ModuleType::free(&ModuleType::Z, 2),
      &[1, 0]
    ).unwrap();
    let m = Morphism::split(vec![double, swap]).unwrap();
    assert_eq!(m.domain(), &ModuleType::free(&ModuleType::Z, 3));
    assert_eq!(m.map(&Element::integers(&[1, 2, 3])).unwrap(), Element::integers(&[2, 3, 2]));
  }

  #[test]
  fn folding_reports_unsampled_elements() {
    let m = Morphism::folding(vec![Element::Z(3), Element::Z(1), Element::Z(3)]).unwrap();
    assert_eq!(m.map(&Element::Z(3)).unwrap(), Element::real(3.0));
    let MorphismVariant::Folding(table) = m.variant() else { unreachable!() };
    assert_eq!(table.len(), 2);
    assert!(matches!(m.map(&Element::Z(2)), Err(MappingError::Unsampled { .. })));
  }

  #[test]
  fn free_lift_pads_and_truncates() {
    let embed = Morphism::number_embedding(RingPair::embedding(
      crate::core::module::NumberRing::Z,
      crate::core::module::NumberRing::R
    ).unwrap());
    let up = Morphism::free_lift(embed.clone(), 2, 3).unwrap();
    assert_eq!(up.map(&Element::integers(&[1, 2])).unwrap(), Element::reals(&[1.0, 2.0, 0.0]));
    let down = Morphism::free_lift(embed, 3, 2).unwrap();
    assert_eq!(down.map(&Element::integers(&[1, 2, 3])).unwrap(), Element::reals(&[1.0, 2.0]));
  }

  #[test]
  fn modulo_reduces_each_coordinate() {
    let m = Morphism::modulo(2, 5).unwrap();
    let y = m.map(&Element::integers(&[7, -1])).unwrap();
    let z5 = ModuleType::free(&ModuleType::zn(5), 2);
    assert_eq!(y, z5.create_element(vec![Element::modular(2, 5), Element::modular(4, 5)]).unwrap());
    assert!(!m.is_linear());
  }

  #[test]
  fn duplicate_detection() {
    assert!(duplicated_indices(&[Some(1), None, Some(1)]));
    assert!(!duplicated_indices(&[Some(0), None, None, Some(1)]));
  }
}
