/*!

The module type model. A `ModuleType` is the immutable identity of an algebraic structure: one of the numeric rings,
a ring built over other rings, a free module over a ring, or a null module. The morphism engine only ever asks a
module type the questions listed below; it never looks inside an element except through `Element`'s methods.

| question            | method                  |
|:--------------------|:------------------------|
| underlying ring     | `ModuleType::ring`      |
| dimension           | `ModuleType::dimension` |
| is it a ring        | `ModuleType::is_ring`   |
| membership          | `ModuleType::has_element` |
| zero / one          | `ModuleType::zero`, `ModuleType::one` |
| element from coordinates | `ModuleType::create_element` |

## Normal Forms

Module types are values. Two module types are equal exactly when their kinds and parameters are equal, so the
constructors normalize: a free module of dimension 1 over `R` *is* `R`, and a free module of dimension 0 over `R` is
the null module over `R`. The numeric rings are unit variants, so they are singletons for free.

*/

mod element;
mod matrix;
mod number;

use std::fmt::{Display, Formatter};

use crate::abstractions::{join_string, IString};

pub use element::Element;
pub use matrix::Matrix;
pub use number::{ComplexNumber, Modular, Scalar};
pub(crate) use number::{rational_from_f64, rational_to_f64, scalar_ring};

#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum ModuleType {
  /// The integers.
  Z,
  /// The rationals.
  Q,
  /// The reals.
  R,
  /// The complex numbers.
  C,
  /// The integers modulo `n`, `n >= 2`.
  Zn(i64),
  /// A product of at least two rings.
  Product(Vec<ModuleType>),
  /// The polynomial ring in one indeterminate over a coefficient ring.
  Polynomial {
    coefficients : Box<ModuleType>,
    indeterminate: IString,
  },
  /// Formal linear combinations of words with coefficients in the factor ring. Multiplication concatenates words.
  Strings(Box<ModuleType>),
  /// A free module of dimension at least 2 over a ring.
  Free {
    ring     : Box<ModuleType>,
    dimension: usize,
  },
  /// The null module over a ring.
  Null(Box<ModuleType>),
}

/// The numeric rings as a copyable tag. The embedding and casting tables are keyed by pairs of these.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum NumberRing {
  Z,
  Q,
  R,
  C,
  Zn(i64),
}

impl NumberRing {
  pub fn module(&self) -> ModuleType {
    match self {
      NumberRing::Z      => ModuleType::Z,
      NumberRing::Q      => ModuleType::Q,
      NumberRing::R      => ModuleType::R,
      NumberRing::C      => ModuleType::C,
      NumberRing::Zn(n)  => ModuleType::Zn(*n),
    }
  }
}

impl Display for NumberRing {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.module())
  }
}

impl ModuleType {
  // region Constructors

  /// The ring of integers modulo `modulus`.
  pub fn zn(modulus: i64) -> ModuleType {
    assert!(modulus >= 2, "Z_n needs a modulus of at least 2, got {}", modulus);
    ModuleType::Zn(modulus)
  }

  /// The free module of the given dimension over `ring`, in normal form.
  pub fn free(ring: &ModuleType, dimension: usize) -> ModuleType {
    assert!(ring.is_ring(), "tried to build a free module over {}, which is not a ring", ring);
    match dimension {
      0 => ModuleType::Null(Box::new(ring.clone())),
      1 => ring.clone(),
      _ => ModuleType::Free {
        ring: Box::new(ring.clone()),
        dimension
      }
    }
  }

  /// The product of the given rings, or `None` unless there are at least two factors and all of them are rings.
  pub fn product(factors: &[ModuleType]) -> Option<ModuleType> {
    if factors.len() < 2 || !factors.iter().all(|f| f.is_ring()) {
      return None;
    }
    Some(ModuleType::Product(factors.to_vec()))
  }

  /// The polynomial ring over `coefficients` in the given indeterminate.
  pub fn polynomial(coefficients: &ModuleType, indeterminate: &str) -> ModuleType {
    assert!(coefficients.is_ring(), "polynomial coefficients must come from a ring, not {}", coefficients);
    ModuleType::Polynomial {
      coefficients : Box::new(coefficients.clone()),
      indeterminate: IString::from(indeterminate),
    }
  }

  /// The string ring over `factor`.
  pub fn strings(factor: &ModuleType) -> ModuleType {
    assert!(factor.is_ring(), "string coefficients must come from a ring, not {}", factor);
    ModuleType::Strings(Box::new(factor.clone()))
  }

  // endregion

  // region Queries

  pub fn is_ring(&self) -> bool {
    !matches!(self, ModuleType::Free { .. } | ModuleType::Null(_))
  }

  /// Rings, free modules, and null modules are all free; this is every module type there is.
  pub fn is_free(&self) -> bool {
    true
  }

  pub fn is_null(&self) -> bool {
    matches!(self, ModuleType::Null(_))
  }

  /// The ring this module is a module over. A ring is a module over itself.
  pub fn ring(&self) -> ModuleType {
    match self {
      ModuleType::Free { ring, .. } | ModuleType::Null(ring) => ring.as_ref().clone(),
      ring => ring.clone()
    }
  }

  pub fn dimension(&self) -> usize {
    match self {
      ModuleType::Free { dimension, .. } => *dimension,
      ModuleType::Null(_) => 0,
      _ => 1
    }
  }

  /// The numeric ring tag, if this is one of the numeric rings.
  pub fn number_ring(&self) -> Option<NumberRing> {
    match self {
      ModuleType::Z     => Some(NumberRing::Z),
      ModuleType::Q     => Some(NumberRing::Q),
      ModuleType::R     => Some(NumberRing::R),
      ModuleType::C     => Some(NumberRing::C),
      ModuleType::Zn(n) => Some(NumberRing::Zn(*n)),
      _ => None
    }
  }

  /// The factor rings of a product ring.
  pub fn factors(&self) -> Option<&[ModuleType]> {
    match self {
      ModuleType::Product(factors) => Some(factors.as_slice()),
      _ => None
    }
  }

  pub fn has_element(&self, element: &Element) -> bool {
    element.module() == *self
  }

  // endregion

  // region Elements

  pub fn zero(&self) -> Element {
    match self {
      ModuleType::Z     => Element::Z(0),
      ModuleType::Q     => Element::rational(0, 1),
      ModuleType::R     => Element::real(0.0),
      ModuleType::C     => Element::complex(0.0, 0.0),
      ModuleType::Zn(n) => Element::Zn(Modular::new(0, *n)),

      ModuleType::Product(factors) => Element::Product(factors.iter().map(|f| f.zero()).collect()),

      ModuleType::Polynomial { .. } => Element::Polynomial {
        ring        : self.clone(),
        coefficients: vec![],
      },

      ModuleType::Strings(_) => Element::Strings {
        ring : self.clone(),
        terms: Default::default(),
      },

      ModuleType::Free { ring, dimension } => Element::Vector {
        module    : self.clone(),
        components: vec![ring.zero(); *dimension],
      },

      ModuleType::Null(_) => Element::Vector {
        module    : self.clone(),
        components: vec![],
      },
    }
  }

  /// The multiplicative unit, for rings.
  pub fn one(&self) -> Option<Element> {
    let one = match self {
      ModuleType::Z     => Element::Z(1),
      ModuleType::Q     => Element::rational(1, 1),
      ModuleType::R     => Element::real(1.0),
      ModuleType::C     => Element::complex(1.0, 0.0),
      ModuleType::Zn(n) => Element::Zn(Modular::new(1, *n)),

      ModuleType::Product(factors) => {
        Element::Product(factors.iter().map(|f| f.one()).collect::<Option<Vec<_>>>()?)
      }

      ModuleType::Polynomial { coefficients, .. } => Element::Polynomial {
        ring        : self.clone(),
        coefficients: vec![coefficients.one()?],
      },

      ModuleType::Strings(factor) => Element::Strings {
        ring : self.clone(),
        terms: [(String::new(), factor.one()?)].into_iter().collect(),
      },

      ModuleType::Free { .. } | ModuleType::Null(_) => return None,
    };
    Some(one)
  }

  /// Builds the element with the given coordinates. Rings take a single coordinate, which is returned as is.
  pub fn create_element(&self, components: Vec<Element>) -> Option<Element> {
    if components.len() != self.dimension() {
      return None;
    }
    if self.is_ring() {
      let element = components.into_iter().next()?;
      return self.has_element(&element).then_some(element);
    }

    let ring = self.ring();
    if !components.iter().all(|c| ring.has_element(c)) {
      return None;
    }
    Some(Element::Vector { module: self.clone(), components })
  }

  // endregion
}

impl Display for ModuleType {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      ModuleType::Z     => write!(f, "Z"),
      ModuleType::Q     => write!(f, "Q"),
      ModuleType::R     => write!(f, "R"),
      ModuleType::C     => write!(f, "C"),
      ModuleType::Zn(n) => write!(f, "Z_{}", n),

      ModuleType::Product(factors) => write!(f, "({})", join_string(factors.iter(), "×")),

      ModuleType::Polynomial { coefficients, indeterminate } => {
        write!(f, "{}[{}]", coefficients, indeterminate)
      }

      ModuleType::Strings(factor) => write!(f, "{}<String>", factor),

      ModuleType::Free { ring, dimension } => write!(f, "{}^{}", ring, dimension),

      ModuleType::Null(ring) => write!(f, "{}^0", ring),
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn free_modules_are_normalized() {
    assert_eq!(ModuleType::free(&ModuleType::R, 1), ModuleType::R);
    assert!(ModuleType::free(&ModuleType::R, 0).is_null());
    assert_eq!(ModuleType::free(&ModuleType::R, 0).ring(), ModuleType::R);
    assert_eq!(ModuleType::free(&ModuleType::Z, 3).dimension(), 3);
    assert_eq!(ModuleType::free(&ModuleType::Z, 3).ring(), ModuleType::Z);
    assert!(!ModuleType::free(&ModuleType::Z, 3).is_ring());
  }

  #[test]
  fn products_need_two_ring_factors() {
    assert!(ModuleType::product(&[ModuleType::Z]).is_none());
    assert!(ModuleType::product(&[ModuleType::Z, ModuleType::free(&ModuleType::Z, 2)]).is_none());
    let zq = ModuleType::product(&[ModuleType::Z, ModuleType::Q]).unwrap();
    assert!(zq.is_ring());
    assert_eq!(format!("{}", zq), "(Z×Q)");
  }

  #[test]
  fn create_element_checks_coordinates() {
    let r3 = ModuleType::free(&ModuleType::R, 3);
    let coordinates = vec![Element::real(1.0), Element::real(2.0), Element::real(3.0)];
    let v = r3.create_element(coordinates.clone()).unwrap();
    assert!(r3.has_element(&v));
    assert_eq!(v.components(), coordinates);

    assert!(r3.create_element(vec![Element::real(1.0)]).is_none());
    assert!(r3.create_element(vec![Element::Z(1), Element::real(2.0), Element::real(3.0)]).is_none());
    assert_eq!(ModuleType::Z.create_element(vec![Element::Z(4)]), Some(Element::Z(4)));
  }

  #[test]
  fn units_of_composite_rings() {
    let zx = ModuleType::polynomial(&ModuleType::Z, "X");
    assert!(zx.one().unwrap().is_one());
    assert!(zx.zero().is_zero());
    assert!(ModuleType::strings(&ModuleType::Q).one().unwrap().is_one());
    assert!(ModuleType::free(&ModuleType::Q, 2).one().is_none());
    assert_eq!(format!("{}", zx), "Z[X]");
  }
}
