/*!

Conversions between the numeric rings.

An *embedding* preserves the ring structure (except out of `Z_n`, where it only picks the representative in
`0..n`). A *cast* is any reasonable conversion, possibly lossy. Which pairs have which is fixed by the two tables
below, keyed by `NumberKind` so that every `Z_n` shares one row.

| from \ to | Z          | Q               | R          | C            | Z_m          |
|:----------|:-----------|:----------------|:-----------|:-------------|:-------------|
| Z         |            | embed           | embed      | embed        | cast         |
| Q         | truncate   |                 | embed      | embed        | truncate     |
| R         | round      | approximate     |            | embed        | round        |
| C         | round abs  | approximate abs | abs        |              | round abs    |
| Z_n       | embed      | embed           | embed      | embed        | embed        |

*/

use crate::core::module::{rational_from_f64, rational_to_f64, Element, NumberRing};

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum NumberKind {
  Z,
  Q,
  R,
  C,
  Zn,
}

impl NumberRing {
  pub fn kind(&self) -> NumberKind {
    match self {
      NumberRing::Z     => NumberKind::Z,
      NumberRing::Q     => NumberKind::Q,
      NumberRing::R     => NumberKind::R,
      NumberRing::C     => NumberKind::C,
      NumberRing::Zn(_) => NumberKind::Zn,
    }
  }
}

const EMBEDDINGS: &[(NumberKind, NumberKind)] = &[
  (NumberKind::Z, NumberKind::Q),
  (NumberKind::Z, NumberKind::R),
  (NumberKind::Z, NumberKind::C),
  (NumberKind::Q, NumberKind::R),
  (NumberKind::Q, NumberKind::C),
  (NumberKind::R, NumberKind::C),
  (NumberKind::Zn, NumberKind::Z),
  (NumberKind::Zn, NumberKind::Q),
  (NumberKind::Zn, NumberKind::R),
  (NumberKind::Zn, NumberKind::C),
  (NumberKind::Zn, NumberKind::Zn),
];

const CASTS: &[(NumberKind, NumberKind)] = &[
  (NumberKind::Z, NumberKind::Zn),
  (NumberKind::Q, NumberKind::Z),
  (NumberKind::Q, NumberKind::Zn),
  (NumberKind::R, NumberKind::Z),
  (NumberKind::R, NumberKind::Q),
  (NumberKind::R, NumberKind::Zn),
  (NumberKind::C, NumberKind::Z),
  (NumberKind::C, NumberKind::Q),
  (NumberKind::C, NumberKind::R),
  (NumberKind::C, NumberKind::Zn),
];

/// A source and target numeric ring. Only the constructors below make one, so a `RingPair` inside an `Embedding` or
/// `Cast` variant is always listed in the matching table.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct RingPair {
  from: NumberRing,
  to  : NumberRing,
}

impl RingPair {
  /// The pair, if `from` embeds into `to`.
  pub fn embedding(from: NumberRing, to: NumberRing) -> Option<RingPair> {
    (from != to && EMBEDDINGS.contains(&(from.kind(), to.kind()))).then_some(RingPair { from, to })
  }

  /// The pair, if `from` only casts to `to`. Pairs that embed are never casts.
  pub fn casting(from: NumberRing, to: NumberRing) -> Option<RingPair> {
    CASTS.contains(&(from.kind(), to.kind())).then_some(RingPair { from, to })
  }

  #[inline(always)]
  pub fn source(&self) -> NumberRing {
    self.from
  }

  #[inline(always)]
  pub fn target(&self) -> NumberRing {
    self.to
  }

  /// Embeddings out of `Z_n` pick representatives, which is not a homomorphism.
  pub fn from_modular(&self) -> bool {
    self.from.kind() == NumberKind::Zn
  }

  pub(crate) fn embed(&self, x: &Element) -> Option<Element> {
    embed_number(x, self.to)
  }

  pub(crate) fn cast(&self, x: &Element) -> Option<Element> {
    cast_number(x, self.to)
  }
}

/// Magnitudes beyond `i64` saturate rather than collapse to zero.
fn approximate(x: f64) -> Element {
  Element::Q(rational_from_f64(x))
}

fn embed_number(x: &Element, to: NumberRing) -> Option<Element> {
  let value = match (x, to) {
    (Element::Z(n), NumberRing::Q) => Element::rational(*n, 1),
    (Element::Z(n), NumberRing::R) => Element::real(*n as f64),
    (Element::Z(n), NumberRing::C) => Element::complex(*n as f64, 0.0),

    (Element::Q(q), NumberRing::R) => Element::real(rational_to_f64(q)),
    (Element::Q(q), NumberRing::C) => Element::complex(rational_to_f64(q), 0.0),

    (Element::R(r), NumberRing::C) => Element::complex(r.0, 0.0),

    (Element::Zn(m), NumberRing::Z)     => Element::Z(m.value()),
    (Element::Zn(m), NumberRing::Q)     => Element::rational(m.value(), 1),
    (Element::Zn(m), NumberRing::R)     => Element::real(m.value() as f64),
    (Element::Zn(m), NumberRing::C)     => Element::complex(m.value() as f64, 0.0),
    (Element::Zn(m), NumberRing::Zn(k)) => Element::modular(m.value(), k),

    _ => return None
  };
  Some(value)
}

fn cast_number(x: &Element, to: NumberRing) -> Option<Element> {
  if let Some(value) = embed_number(x, to) {
    return Some(value);
  }

  let value = match (x, to) {
    (Element::Z(n), NumberRing::Zn(k)) => Element::modular(*n, k),

    (Element::Q(q), NumberRing::Z)     => Element::Z(q.to_integer()),
    (Element::Q(q), NumberRing::Zn(k)) => Element::modular(q.to_integer(), k),

    (Element::R(r), NumberRing::Z)     => Element::Z(r.0.round() as i64),
    (Element::R(r), NumberRing::Q)     => approximate(r.0),
    (Element::R(r), NumberRing::Zn(k)) => Element::modular(r.0.round() as i64, k),

    (Element::C(c), NumberRing::Z)     => Element::Z(c.norm().round() as i64),
    (Element::C(c), NumberRing::Q)     => approximate(c.norm()),
    (Element::C(c), NumberRing::R)     => Element::real(c.norm()),
    (Element::C(c), NumberRing::Zn(k)) => Element::modular(c.norm().round() as i64, k),

    _ => return None
  };
  Some(value)
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tables_are_disjoint_and_exclude_identity() {
    for pair in CASTS {
      assert!(!EMBEDDINGS.contains(pair));
    }
    assert!(RingPair::embedding(NumberRing::Z, NumberRing::Z).is_none());
    assert!(RingPair::embedding(NumberRing::Zn(5), NumberRing::Zn(5)).is_none());
    assert!(RingPair::embedding(NumberRing::Zn(5), NumberRing::Zn(3)).is_some());
    assert!(RingPair::embedding(NumberRing::R, NumberRing::Z).is_none());
    assert!(RingPair::casting(NumberRing::R, NumberRing::Z).is_some());
    assert!(RingPair::casting(NumberRing::Z, NumberRing::R).is_none());
    assert!(RingPair::casting(NumberRing::Zn(5), NumberRing::Zn(3)).is_none());
  }

  #[test]
  fn casts_round_and_truncate() {
    let to_z = RingPair::casting(NumberRing::Q, NumberRing::Z).unwrap();
    assert_eq!(to_z.cast(&Element::rational(-7, 2)), Some(Element::Z(-3)));

    let to_z = RingPair::casting(NumberRing::R, NumberRing::Z).unwrap();
    assert_eq!(to_z.cast(&Element::real(2.6)), Some(Element::Z(3)));

    let to_r = RingPair::casting(NumberRing::C, NumberRing::R).unwrap();
    assert_eq!(to_r.cast(&Element::complex(3.0, 4.0)), Some(Element::real(5.0)));

    let to_q = RingPair::casting(NumberRing::R, NumberRing::Q).unwrap();
    assert_eq!(to_q.cast(&Element::real(0.5)), Some(Element::rational(1, 2)));

    let to_z7 = RingPair::casting(NumberRing::R, NumberRing::Zn(7)).unwrap();
    assert_eq!(to_z7.cast(&Element::real(-1.2)), Some(Element::modular(6, 7)));
  }

  #[test]
  fn large_magnitudes_saturate_when_approximated() {
    let to_q = RingPair::casting(NumberRing::R, NumberRing::Q).unwrap();
    assert_eq!(to_q.cast(&Element::real(1e20)), Some(Element::rational(i64::MAX, 1)));
    assert_eq!(to_q.cast(&Element::real(-1e20)), Some(Element::rational(i64::MIN, 1)));

    let to_q = RingPair::casting(NumberRing::C, NumberRing::Q).unwrap();
    assert_eq!(to_q.cast(&Element::complex(0.0, 1e19)), Some(Element::rational(i64::MAX, 1)));
  }

  #[test]
  fn embeddings_preserve_values() {
    let pair = RingPair::embedding(NumberRing::Z, NumberRing::C).unwrap();
    assert_eq!(pair.embed(&Element::Z(4)), Some(Element::complex(4.0, 0.0)));
    assert!(!pair.from_modular());

    let pair = RingPair::embedding(NumberRing::Zn(6), NumberRing::Z).unwrap();
    assert_eq!(pair.embed(&Element::modular(-1, 6)), Some(Element::Z(5)));
    assert!(pair.from_modular());
  }
}
