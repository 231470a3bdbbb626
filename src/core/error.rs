/*!

Errors reported by morphism application and by the combinators. Both are recoverable: the caller gets the error back
and decides what to do. "There is no canonical morphism between these modules" is not an error and is reported as
`None` by the canonicalization functions.

*/

use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

use crate::core::module::{Element, ModuleType};

pub enum MappingError {
  /// `map(x)` was called with an `x` that is not an element of the morphism's domain.
  NotInDomain {
    element: Element,
    domain : ModuleType
  },
  /// A folding morphism was asked for an element outside its sample set.
  Unsampled {
    element: Element
  }
}

impl Display for MappingError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      MappingError::NotInDomain { element, domain } => {
        write!(f, "the element {} of {} is not in the domain {}", element, element.module(), domain)
      }

      MappingError::Unsampled { element } => {
        write!(f, "the element {} is not among the folded elements", element)
      }

    }
  }
}

impl Debug for MappingError {
  fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
    Display::fmt(self, f)
  }
}

impl Error for MappingError {}


pub enum CompositionError {
  /// The operands' domains or codomains do not line up.
  DomainMismatch {
    expected: ModuleType,
    found   : ModuleType
  },
  /// `power` was called with a negative exponent.
  NegativeExponent(i64),
  /// The scalar is not an element of the codomain's ring.
  NotScalable {
    scalar: Element,
    ring  : ModuleType
  }
}

impl Display for CompositionError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      CompositionError::DomainMismatch { expected, found } => {
        write!(f, "expected a morphism on {} but found one on {}", expected, found)
      }

      CompositionError::NegativeExponent(exponent) => {
        write!(f, "cannot raise a morphism to the negative power {}", exponent)
      }

      CompositionError::NotScalable { scalar, ring } => {
        write!(f, "cannot scale by {}, which is not an element of the ring {}", scalar, ring)
      }

    }
  }
}

impl Debug for CompositionError {
  fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
    Display::fmt(self, f)
  }
}

impl Error for CompositionError {}
