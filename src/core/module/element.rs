/*!

Elements of module types. An `Element` knows its module (`Element::module`), which is how membership is decided.

Arithmetic between elements of different modules is not an error the engine recovers from: every morphism checks
membership before it computes, so a mismatch here is a broken invariant and panics with a description of both
operands.

*/

use std::{
  collections::BTreeMap,
  fmt::{Display, Formatter}
};

use num_rational::Rational64;
use total_float_wrap::TotalF64;

use crate::{
  abstractions::{bracketed, join_string},
  core::module::{
    number::{rational_difference, rational_product, rational_sum, ComplexNumber, Modular, Scalar},
    ModuleType
  }
};

#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum Element {
  Z(i64),
  Q(Rational64),
  R(TotalF64),
  C(ComplexNumber),
  Zn(Modular),
  /// An element of a product ring, one entry per factor.
  Product(Vec<Element>),
  /// Coefficients in increasing degree, with no trailing zeros.
  Polynomial {
    ring        : ModuleType,
    coefficients: Vec<Element>,
  },
  /// Coefficients keyed by word, with no zero coefficients.
  Strings {
    ring : ModuleType,
    terms: BTreeMap<String, Element>,
  },
  /// An element of a free module of dimension other than one.
  Vector {
    module    : ModuleType,
    components: Vec<Element>,
  },
}

#[derive(Copy, Clone)]
enum Operation {
  Sum,
  Difference,
}

impl Element {
  // region Constructors

  pub fn integer(n: i64) -> Element {
    Element::Z(n)
  }

  pub fn rational(numerator: i64, denominator: i64) -> Element {
    Element::Q(Rational64::new(numerator, denominator))
  }

  pub fn real(x: f64) -> Element {
    Element::R(TotalF64::from(x))
  }

  pub fn complex(re: f64, im: f64) -> Element {
    Element::C(ComplexNumber::new(re, im))
  }

  pub fn modular(value: i64, modulus: i64) -> Element {
    Element::Zn(Modular::new(value, modulus))
  }

  /// A vector in the free module of the given dimension over `ring`.
  pub fn vector(ring: &ModuleType, components: Vec<Element>) -> Option<Element> {
    ModuleType::free(ring, components.len()).create_element(components)
  }

  /// A vector of reals. Convenient in tests and examples.
  pub fn reals(values: &[f64]) -> Element {
    let components = values.iter().map(|x| Element::real(*x)).collect();
    Element::Vector {
      module: ModuleType::free(&ModuleType::R, values.len()),
      components
    }.normalized()
  }

  /// A vector of integers.
  pub fn integers(values: &[i64]) -> Element {
    let components = values.iter().map(|x| Element::Z(*x)).collect();
    Element::Vector {
      module: ModuleType::free(&ModuleType::Z, values.len()),
      components
    }.normalized()
  }

  /// An element of the product ring of the factors' rings.
  pub fn product_of(factors: Vec<Element>) -> Option<Element> {
    let modules: Vec<ModuleType> = factors.iter().map(|f| f.module()).collect();
    ModuleType::product(&modules)?;
    Some(Element::Product(factors))
  }

  /// A polynomial in `ring` with coefficients in increasing degree.
  pub fn polynomial(ring: &ModuleType, coefficients: Vec<Element>) -> Option<Element> {
    let ModuleType::Polynomial { coefficients: coefficient_ring, .. } = ring else {
      return None;
    };
    if !coefficients.iter().all(|c| coefficient_ring.has_element(c)) {
      return None;
    }
    Some(Element::Polynomial { ring: ring.clone(), coefficients }.normalized())
  }

  /// A linear combination of words in the string ring `ring`.
  pub fn strings(ring: &ModuleType, terms: Vec<(&str, Element)>) -> Option<Element> {
    let ModuleType::Strings(factor) = ring else {
      return None;
    };
    let mut element = ring.zero();
    for (word, coefficient) in terms {
      if !factor.has_element(&coefficient) {
        return None;
      }
      let term = Element::Strings {
        ring : ring.clone(),
        terms: [(word.to_string(), coefficient)].into_iter().collect()
      };
      element = element.sum(&term);
    }
    Some(element.normalized())
  }

  /// Restores the normal form: a vector of dimension one becomes its component, trailing zero coefficients and zero
  /// terms are dropped.
  fn normalized(self) -> Element {
    match self {
      Element::Vector { module, mut components } if module.is_ring() => {
        assert_eq!(components.len(), 1, "vector in {} with {} components", module, components.len());
        components.remove(0)
      }

      Element::Polynomial { ring, mut coefficients } => {
        while coefficients.last().is_some_and(|c| c.is_zero()) {
          coefficients.pop();
        }
        Element::Polynomial { ring, coefficients }
      }

      Element::Strings { ring, mut terms } => {
        terms.retain(|_, c| !c.is_zero());
        Element::Strings { ring, terms }
      }

      element => element
    }
  }

  // endregion

  // region Structure

  /// The module this element belongs to.
  pub fn module(&self) -> ModuleType {
    match self {
      Element::Z(_)  => ModuleType::Z,
      Element::Q(_)  => ModuleType::Q,
      Element::R(_)  => ModuleType::R,
      Element::C(_)  => ModuleType::C,
      Element::Zn(m) => ModuleType::Zn(m.modulus()),

      Element::Product(factors) => ModuleType::Product(factors.iter().map(|f| f.module()).collect()),

      Element::Polynomial { ring, .. }
      | Element::Strings { ring, .. } => ring.clone(),

      Element::Vector { module, .. } => module.clone(),
    }
  }

  /// The coordinates of this element. A ring element is its own single coordinate.
  pub fn components(&self) -> Vec<Element> {
    match self {
      Element::Vector { components, .. } => components.clone(),
      element => vec![element.clone()]
    }
  }

  pub fn component(&self, index: usize) -> Option<Element> {
    match self {
      Element::Vector { components, .. } => components.get(index).cloned(),
      element if index == 0 => Some(element.clone()),
      _ => None
    }
  }

  /// The `index`th factor of a product ring element.
  pub fn factor(&self, index: usize) -> Option<&Element> {
    match self {
      Element::Product(factors) => factors.get(index),
      _ => None
    }
  }

  pub fn is_zero(&self) -> bool {
    match self {
      Element::Z(n)  => *n == 0,
      Element::Q(q)  => *q.numer() == 0,
      Element::R(r)  => r.0 == 0.0,
      Element::C(c)  => c.re() == 0.0 && c.im() == 0.0,
      Element::Zn(m) => m.value() == 0,

      Element::Product(factors) => factors.iter().all(|f| f.is_zero()),

      Element::Polynomial { coefficients, .. } => coefficients.iter().all(|c| c.is_zero()),

      Element::Strings { terms, .. } => terms.values().all(|c| c.is_zero()),

      Element::Vector { components, .. } => components.iter().all(|c| c.is_zero()),
    }
  }

  pub fn is_one(&self) -> bool {
    match self {
      Element::Z(n)  => *n == 1,
      Element::Q(q)  => *q.numer() == 1 && *q.denom() == 1,
      Element::R(r)  => r.0 == 1.0,
      Element::C(c)  => c.re() == 1.0 && c.im() == 0.0,
      Element::Zn(m) => m.value() == 1,

      Element::Product(factors) => factors.iter().all(|f| f.is_one()),

      Element::Polynomial { coefficients, .. } => {
        coefficients.len() == 1 && coefficients[0].is_one()
      }

      Element::Strings { terms, .. } => {
        terms.len() == 1 && terms.get("").is_some_and(|c| c.is_one())
      }

      Element::Vector { .. } => false,
    }
  }

  /// The value of this element as a real number, for elements of the numeric rings. Complex numbers yield their
  /// magnitude.
  pub fn to_f64(&self) -> Option<f64> {
    match self {
      Element::Z(n)  => Some(*n as f64),
      Element::Q(q)  => Some(*q.numer() as f64 / *q.denom() as f64),
      Element::R(r)  => Some(r.0),
      Element::C(c)  => Some(c.norm()),
      Element::Zn(m) => Some(m.value() as f64),
      _ => None
    }
  }

  // endregion

  // region Arithmetic

  pub fn sum(&self, other: &Element) -> Element {
    self.combine(other, Operation::Sum)
  }

  pub fn difference(&self, other: &Element) -> Element {
    self.combine(other, Operation::Difference)
  }

  pub fn negated(&self) -> Element {
    self.module().zero().difference(self)
  }

  fn combine(&self, other: &Element, operation: Operation) -> Element {
    let numeric = |a: &dyn Fn() -> Element, b: &dyn Fn() -> Element| match operation {
      Operation::Sum        => a(),
      Operation::Difference => b(),
    };

    match (self, other) {
      (Element::Z(a), Element::Z(b)) => {
        numeric(&|| Element::Z(a.wrapping_add(*b)), &|| Element::Z(a.wrapping_sub(*b)))
      }
      (Element::Q(a), Element::Q(b)) => {
        numeric(&|| Element::Q(rational_sum(a, b)), &|| Element::Q(rational_difference(a, b)))
      }
      (Element::R(a), Element::R(b)) => numeric(&|| Element::real(a.0 + b.0), &|| Element::real(a.0 - b.0)),
      (Element::C(a), Element::C(b)) => numeric(&|| Element::C(*a + *b), &|| Element::C(*a - *b)),
      (Element::Zn(a), Element::Zn(b)) => {
        numeric(&|| Element::Zn(Scalar::add(a, b)), &|| Element::Zn(Scalar::sub(a, b)))
      }

      (Element::Product(a), Element::Product(b)) if a.len() == b.len() => {
        Element::Product(a.iter().zip(b.iter()).map(|(x, y)| x.combine(y, operation)).collect())
      }

      (
        Element::Polynomial { ring, coefficients: a },
        Element::Polynomial { ring: other_ring, coefficients: b }
      ) if ring == other_ring => {
        let zero = self.coefficient_ring().zero();
        let length = a.len().max(b.len());
        let coefficients = (0..length).map(|i| {
          let x = a.get(i).unwrap_or(&zero);
          let y = b.get(i).unwrap_or(&zero);
          x.combine(y, operation)
        }).collect();
        Element::Polynomial { ring: ring.clone(), coefficients }.normalized()
      }

      (
        Element::Strings { ring, terms: a },
        Element::Strings { ring: other_ring, terms: b }
      ) if ring == other_ring => {
        let zero = self.coefficient_ring().zero();
        let mut terms = a.clone();
        for (word, y) in b.iter() {
          let x = terms.get(word).unwrap_or(&zero).combine(y, operation);
          terms.insert(word.clone(), x);
        }
        Element::Strings { ring: ring.clone(), terms }.normalized()
      }

      (
        Element::Vector { module, components: a },
        Element::Vector { module: other_module, components: b }
      ) if module == other_module => {
        let components = a.iter().zip(b.iter()).map(|(x, y)| x.combine(y, operation)).collect();
        Element::Vector { module: module.clone(), components }
      }

      _ => panic!("tried to add or subtract {} in {} and {} in {}", self, self.module(), other, other.module())
    }
  }

  /// Ring multiplication, `self·other`.
  pub fn product(&self, other: &Element) -> Element {
    match (self, other) {
      (Element::Z(a), Element::Z(b))   => Element::Z(a.wrapping_mul(*b)),
      (Element::Q(a), Element::Q(b))   => Element::Q(rational_product(a, b)),
      (Element::R(a), Element::R(b))   => Element::real(a.0 * b.0),
      (Element::C(a), Element::C(b))   => Element::C(*a * *b),
      (Element::Zn(a), Element::Zn(b)) => Element::Zn(Scalar::mul(a, b)),

      (Element::Product(a), Element::Product(b)) if a.len() == b.len() => {
        Element::Product(a.iter().zip(b.iter()).map(|(x, y)| x.product(y)).collect())
      }

      (
        Element::Polynomial { ring, coefficients: a },
        Element::Polynomial { ring: other_ring, coefficients: b }
      ) if ring == other_ring => {
        if a.is_empty() || b.is_empty() {
          return ring.zero();
        }
        let zero = self.coefficient_ring().zero();
        let mut coefficients = vec![zero; a.len() + b.len() - 1];
        for (i, x) in a.iter().enumerate() {
          for (j, y) in b.iter().enumerate() {
            coefficients[i + j] = coefficients[i + j].sum(&x.product(y));
          }
        }
        Element::Polynomial { ring: ring.clone(), coefficients }.normalized()
      }

      (
        Element::Strings { ring, terms: a },
        Element::Strings { ring: other_ring, terms: b }
      ) if ring == other_ring => {
        let zero = self.coefficient_ring().zero();
        let mut terms: BTreeMap<String, Element> = BTreeMap::new();
        for (u, x) in a.iter() {
          for (v, y) in b.iter() {
            let word = format!("{}{}", u, v);
            let coefficient = terms.get(&word).unwrap_or(&zero).sum(&x.product(y));
            terms.insert(word, coefficient);
          }
        }
        Element::Strings { ring: ring.clone(), terms }.normalized()
      }

      _ => panic!("tried to multiply {} in {} and {} in {}", self, self.module(), other, other.module())
    }
  }

  /// Scalar multiplication by an element of this element's ring, `scalar·self`.
  pub fn scaled(&self, scalar: &Element) -> Element {
    match self {
      Element::Vector { module, components } => {
        assert_eq!(scalar.module(), module.ring(), "tried to scale {} in {} by {}", self, module, scalar);
        Element::Vector {
          module    : module.clone(),
          components: components.iter().map(|c| scalar.product(c)).collect()
        }
      }
      element => scalar.product(element)
    }
  }

  /// Evaluates a polynomial at an element of its coefficient ring.
  pub fn evaluate(&self, x: &Element) -> Option<Element> {
    let Element::Polynomial { coefficients, .. } = self else {
      return None;
    };
    let coefficient_ring = self.coefficient_ring();
    if !coefficient_ring.has_element(x) {
      return None;
    }
    let value = coefficients
        .iter()
        .rev()
        .fold(coefficient_ring.zero(), |acc, c| acc.product(x).sum(c));
    Some(value)
  }

  /// The complex conjugate, componentwise for vectors over C.
  pub fn conjugated(&self) -> Option<Element> {
    match self {
      Element::C(c) => Some(Element::C(c.conj())),
      Element::Vector { module, components } if module.ring() == ModuleType::C => {
        Some(Element::Vector {
          module    : module.clone(),
          components: components.iter().map(|c| c.conjugated()).collect::<Option<Vec<_>>>()?
        })
      }
      _ => None
    }
  }

  /// The coefficient ring of a polynomial or string ring element, otherwise the element's own ring.
  pub(crate) fn coefficient_ring(&self) -> ModuleType {
    match self.module() {
      ModuleType::Polynomial { coefficients, .. } => *coefficients,
      ModuleType::Strings(factor) => *factor,
      module => module.ring()
    }
  }

  // endregion
}

impl Display for Element {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Element::Z(n)  => write!(f, "{}", n),
      Element::Q(q)  => write!(f, "{}", q),
      Element::R(r)  => write!(f, "{}", r.0),
      Element::C(c)  => write!(f, "{}", c),
      Element::Zn(m) => write!(f, "{}", m),

      Element::Product(factors) => write!(f, "({})", join_string(factors.iter(), ", ")),

      Element::Polynomial { ring, coefficients } => {
        if coefficients.is_empty() {
          return write!(f, "0");
        }
        let indeterminate = match ring {
          ModuleType::Polynomial { indeterminate, .. } => indeterminate.to_string(),
          _ => "X".to_string()
        };
        let terms = coefficients.iter().enumerate().filter(|(_, c)| !c.is_zero()).map(|(i, c)| {
          match i {
            0 => format!("{}", c),
            1 => format!("{}·{}", c, indeterminate),
            _ => format!("{}·{}^{}", c, indeterminate, i),
          }
        });
        write!(f, "{}", join_string(terms, " + "))
      }

      Element::Strings { terms, .. } => {
        if terms.is_empty() {
          return write!(f, "0");
        }
        let terms = terms.iter().map(|(word, c)| format!("{}·\"{}\"", c, word));
        write!(f, "{}", join_string(terms, " + "))
      }

      Element::Vector { components, .. } => write!(f, "{}", bracketed(components.iter())),
    }
  }
}
