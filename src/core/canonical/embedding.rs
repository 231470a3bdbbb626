/*!

Structure preserving maps between module types.

Rings embed by the fixed numeric table, or structurally into products, polynomial rings, and string rings. Free
modules embed when the domain's dimension does not exceed the codomain's, by lifting the embedding of their rings;
the extra codomain coordinates are zero.

Embeddings out of `Z_n` exist for every numeric target but only choose representatives, so they carry no
homomorphism flags.

*/

use crate::{
  core::{
    canonical::{strategy_cache, Strategy},
    module::ModuleType,
    morphism::{Morphism, RingPair}
  },
  warning
};

/// The embedding of `domain` into `codomain`, if there is one.
pub fn embedding(domain: &ModuleType, codomain: &ModuleType) -> Option<Morphism> {
  strategy_cache(Strategy::Embedding).get_or_construct(domain, codomain, || construct_embedding(domain, codomain))
}

fn construct_embedding(domain: &ModuleType, codomain: &ModuleType) -> Option<Morphism> {
  if domain == codomain {
    return Some(Morphism::identity(domain));
  }
  if domain.is_null() {
    return Some(Morphism::zero(domain, codomain));
  }

  if domain.is_ring() && codomain.is_ring() {
    return ring_embedding(domain, codomain);
  }

  if domain.dimension() > codomain.dimension() {
    return None;
  }
  let ring_morphism = embedding(&domain.ring(), &codomain.ring())?;
  Morphism::free_lift(ring_morphism, domain.dimension(), codomain.dimension())
}

fn ring_embedding(domain: &ModuleType, codomain: &ModuleType) -> Option<Morphism> {
  match codomain {
    ModuleType::Product(targets) => {
      let factors = match domain {
        ModuleType::Product(sources) if sources.len() == targets.len() => {
          sources.iter()
                 .zip(targets)
                 .enumerate()
                 .map(|(i, (source, target))| {
                   let projection = Morphism::projection(domain, i)?;
                   embedding(source, target)?.compose(&projection).ok()
                 })
                 .collect::<Option<Vec<_>>>()?
        }

        _ => targets.iter().map(|target| embedding(domain, target)).collect::<Option<Vec<_>>>()?
      };
      Morphism::tuple(factors)
    }

    ModuleType::Polynomial { coefficients, .. } => {
      if let ModuleType::Polynomial { .. } = domain {
        warning!(1, "embedding between polynomial rings {} and {} is not supported", domain, codomain);
        return None;
      }
      let into_coefficients = embedding(domain, coefficients)?;
      Morphism::coefficient_embedding(codomain)?.compose(&into_coefficients).ok()
    }

    ModuleType::Strings(factor) => {
      if let ModuleType::Strings(source) = domain {
        return Morphism::string_cast(embedding(source, factor)?);
      }
      let into_factor = embedding(domain, factor)?;
      Morphism::string_embedding(codomain)?.compose(&into_factor).ok()
    }

    _ => {
      let pair = RingPair::embedding(domain.number_ring()?, codomain.number_ring()?)?;
      Some(Morphism::number_embedding(pair))
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::module::Element;

  #[test]
  fn free_modules_embed_upward_only() {
    let r2 = ModuleType::free(&ModuleType::R, 2);
    let r5 = ModuleType::free(&ModuleType::R, 5);

    let up = embedding(&r2, &r5).unwrap();
    let x = r2.create_element(vec![Element::real(1.0), Element::real(2.0)]).unwrap();
    let expected = r5.create_element(
      [1.0, 2.0, 0.0, 0.0, 0.0].into_iter().map(Element::real).collect()
    ).unwrap();
    assert_eq!(up.map(&x).unwrap(), expected);

    assert!(embedding(&r5, &r2).is_none());
  }

  #[test]
  fn modular_embeddings_are_not_homomorphisms() {
    let from_z6 = embedding(&ModuleType::zn(6), &ModuleType::Z).unwrap();
    assert!(!from_z6.is_module_homomorphism());
    assert_eq!(from_z6.map(&Element::modular(-1, 6)).unwrap(), Element::Z(5));

    let into_r = embedding(&ModuleType::Q, &ModuleType::R).unwrap();
    assert!(into_r.is_ring_homomorphism());
  }

  #[test]
  fn structural_rings() {
    let product = ModuleType::product(&[ModuleType::Q, ModuleType::C]).unwrap();
    let pair = embedding(&ModuleType::Z, &product).unwrap();
    assert_eq!(
      pair.map(&Element::Z(2)).unwrap(),
      Element::product_of(vec![Element::rational(2, 1), Element::complex(2.0, 0.0)]).unwrap()
    );

    let polynomials = ModuleType::polynomial(&ModuleType::R, "X");
    let constant = embedding(&ModuleType::Z, &polynomials).unwrap();
    assert_eq!(
      constant.map(&Element::Z(3)).unwrap(),
      Element::polynomial(&polynomials, vec![Element::real(3.0)]).unwrap()
    );

    let other_polynomials = ModuleType::polynomial(&ModuleType::C, "Y");
    assert!(embedding(&polynomials, &other_polynomials).is_none());

    let words = ModuleType::strings(&ModuleType::Q);
    let word = embedding(&ModuleType::Z, &words).unwrap();
    assert_eq!(
      word.map(&Element::Z(4)).unwrap(),
      Element::strings(&words, vec![("", Element::rational(4, 1))]).unwrap()
    );
  }

  #[test]
  fn numeric_table_only() {
    assert!(embedding(&ModuleType::R, &ModuleType::Q).is_none());
    assert!(embedding(&ModuleType::C, &ModuleType::R).is_none());
    assert!(embedding(&ModuleType::Z, &ModuleType::zn(3)).is_none());
  }
}
