//! Lossy conversions between rings, the fallback when no embedding exists.

use crate::core::{
  canonical::{ring_canonical_morphism, strategy_cache, Strategy},
  module::ModuleType,
  morphism::{Morphism, RingPair}
};

/// The cast from `domain` to `codomain`, if there is one. Both must be rings.
pub fn casting(domain: &ModuleType, codomain: &ModuleType) -> Option<Morphism> {
  if !domain.is_ring() || !codomain.is_ring() {
    return None;
  }
  strategy_cache(Strategy::Casting).get_or_construct(domain, codomain, || construct_cast(domain, codomain))
}

fn construct_cast(domain: &ModuleType, codomain: &ModuleType) -> Option<Morphism> {
  match (domain, codomain) {
    (ModuleType::Strings(source), ModuleType::Strings(target)) => {
      Morphism::string_cast(ring_canonical_morphism(source, target)?)
    }

    (_, ModuleType::Strings(factor)) => {
      let into_factor = ring_canonical_morphism(domain, factor)?;
      Morphism::string_embedding(codomain)?.compose(&into_factor).ok()
    }

    _ => {
      let pair = RingPair::casting(domain.number_ring()?, codomain.number_ring()?)?;
      Some(Morphism::number_cast(pair))
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::module::Element;

  #[test]
  fn numeric_casts() {
    let round = casting(&ModuleType::R, &ModuleType::Z).unwrap();
    assert_eq!(round.map(&Element::real(-2.5)).unwrap(), Element::Z(-3));
    assert!(!round.is_module_homomorphism());

    assert!(casting(&ModuleType::Z, &ModuleType::Z).is_none());
    // Structure preserving pairs are embeddings, never casts.
    assert!(casting(&ModuleType::Z, &ModuleType::R).is_none());
    assert!(casting(&ModuleType::zn(5), &ModuleType::Q).is_none());
    assert!(casting(&ModuleType::free(&ModuleType::R, 2), &ModuleType::Z).is_none());
  }

  #[test]
  fn string_casts_map_coefficients() {
    let real_words = ModuleType::strings(&ModuleType::R);
    let integer_words = ModuleType::strings(&ModuleType::Z);
    let cast = casting(&real_words, &integer_words).unwrap();

    let x = Element::strings(&real_words, vec![("ab", Element::real(1.6)), ("c", Element::real(-0.2))]).unwrap();
    let expected = Element::strings(&integer_words, vec![("ab", Element::Z(2))]).unwrap();
    assert_eq!(cast.map(&x).unwrap(), expected);

    let word = casting(&ModuleType::C, &integer_words).unwrap();
    assert_eq!(
      word.map(&Element::complex(0.0, 3.0)).unwrap(),
      Element::strings(&integer_words, vec![("", Element::Z(3))]).unwrap()
    );
  }
}
