/*!

Scalars of the numeric rings and the `Scalar` trait that lets the affine forms be written once for every ring.

| ring | scalar type       | notes                                           |
|:-----|:------------------|:------------------------------------------------|
| Z    | `i64`             | wrapping arithmetic                             |
| Q    | `Rational64`      | from `num-rational`, see below                  |
| R    | `TotalF64`        | totally ordered and hashable `f64`              |
| C    | `ComplexNumber`   | `Complex64` with a total order on `(re, im)`    |
| Zn   | `Modular`         | value kept in `0..modulus`                      |

`Element` is a `Scalar` as well, which is what the generic affine variant is built on.

No arithmetic here panics on overflow. Integers wrap, as machine integers do. `Z_n` computes in `i128` before
reducing. A rational sum, difference, or product that does not fit in `Rational64` is replaced by the closest
rational `approximate_float` finds for the `f64` result, saturating at `i64::MAX` and `i64::MIN`.

*/

use std::{
  cmp::Ordering,
  fmt::{Debug, Display, Formatter},
  hash::{Hash, Hasher},
  ops::{Add, Mul, Neg, Sub}
};

use num_complex::Complex64;
use num_rational::Rational64;
use num_traits::{CheckedAdd, CheckedMul, CheckedSub, One, Zero};
use total_float_wrap::TotalF64;

use crate::core::module::{Element, ModuleType};

/// Ring arithmetic shared by the scalar types of the affine forms.
///
/// Zero and one are produced from an existing scalar so that `Modular` knows its modulus.
pub trait Scalar: Clone + Eq + Ord + Hash + Debug + Send + Sync + 'static {
  fn add(&self, other: &Self) -> Self;
  fn sub(&self, other: &Self) -> Self;
  fn mul(&self, other: &Self) -> Self;
  fn zero_like(&self) -> Self;
  fn one_like(&self) -> Self;
  fn is_zero(&self) -> bool;
  fn is_one(&self) -> bool;
  fn to_element(&self) -> Element;
  fn from_element(element: &Element) -> Option<Self>;
}

// region Modular

/// An element of Z/nZ.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Modular {
  value  : i64,
  modulus: i64,
}

impl Modular {
  pub fn new(value: i64, modulus: i64) -> Modular {
    assert!(modulus >= 2, "modulus must be at least 2, got {}", modulus);
    Modular {
      value: value.rem_euclid(modulus),
      modulus
    }
  }

  #[inline(always)]
  pub fn value(&self) -> i64 {
    self.value
  }

  #[inline(always)]
  pub fn modulus(&self) -> i64 {
    self.modulus
  }

  fn check_modulus(&self, other: &Modular) {
    assert_eq!(self.modulus, other.modulus, "arithmetic between Z_{} and Z_{}", self.modulus, other.modulus);
  }
}

impl Display for Modular {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.value)
  }
}

impl Scalar for Modular {
  fn add(&self, other: &Self) -> Self {
    self.check_modulus(other);
    let sum = (self.value as i128 + other.value as i128).rem_euclid(self.modulus as i128);
    Modular::new(sum as i64, self.modulus)
  }

  fn sub(&self, other: &Self) -> Self {
    self.check_modulus(other);
    Modular::new(self.value - other.value, self.modulus)
  }

  fn mul(&self, other: &Self) -> Self {
    self.check_modulus(other);
    let product = (self.value as i128 * other.value as i128).rem_euclid(self.modulus as i128);
    Modular::new(product as i64, self.modulus)
  }

  fn zero_like(&self) -> Self {
    Modular::new(0, self.modulus)
  }

  fn one_like(&self) -> Self {
    Modular::new(1, self.modulus)
  }

  fn is_zero(&self) -> bool {
    self.value == 0
  }

  fn is_one(&self) -> bool {
    self.value == 1
  }

  fn to_element(&self) -> Element {
    Element::Zn(*self)
  }

  fn from_element(element: &Element) -> Option<Self> {
    match element {
      Element::Zn(m) => Some(*m),
      _ => None
    }
  }
}

// endregion

// region ComplexNumber

/// A complex number that can be ordered and hashed. Ordering is lexicographic on the real and imaginary parts, each
/// under the total order of `TotalF64`. It carries no algebraic meaning and only exists so that morphisms and
/// elements can live in ordered maps.
#[derive(Copy, Clone, Debug, Default)]
pub struct ComplexNumber(pub Complex64);

impl ComplexNumber {
  pub fn new(re: f64, im: f64) -> ComplexNumber {
    ComplexNumber(Complex64::new(re, im))
  }

  #[inline(always)]
  pub fn re(&self) -> f64 {
    self.0.re
  }

  #[inline(always)]
  pub fn im(&self) -> f64 {
    self.0.im
  }

  pub fn conj(&self) -> ComplexNumber {
    ComplexNumber(self.0.conj())
  }

  pub fn norm(&self) -> f64 {
    self.0.norm()
  }

  fn key(&self) -> (TotalF64, TotalF64) {
    (TotalF64::from(self.0.re), TotalF64::from(self.0.im))
  }
}

impl PartialEq for ComplexNumber {
  fn eq(&self, other: &Self) -> bool {
    self.key() == other.key()
  }
}

impl Eq for ComplexNumber {}

impl PartialOrd for ComplexNumber {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for ComplexNumber {
  fn cmp(&self, other: &Self) -> Ordering {
    self.key().cmp(&other.key())
  }
}

impl Hash for ComplexNumber {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.key().hash(state)
  }
}

impl Display for ComplexNumber {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    if self.0.im < 0.0 {
      write!(f, "{}-{}i", self.0.re, -self.0.im)
    } else {
      write!(f, "{}+{}i", self.0.re, self.0.im)
    }
  }
}

impl Add for ComplexNumber {
  type Output = ComplexNumber;
  fn add(self, rhs: Self) -> ComplexNumber {
    ComplexNumber(self.0 + rhs.0)
  }
}

impl Sub for ComplexNumber {
  type Output = ComplexNumber;
  fn sub(self, rhs: Self) -> ComplexNumber {
    ComplexNumber(self.0 - rhs.0)
  }
}

impl Mul for ComplexNumber {
  type Output = ComplexNumber;
  fn mul(self, rhs: Self) -> ComplexNumber {
    ComplexNumber(self.0 * rhs.0)
  }
}

impl Neg for ComplexNumber {
  type Output = ComplexNumber;
  fn neg(self) -> ComplexNumber {
    ComplexNumber(-self.0)
  }
}

impl Scalar for ComplexNumber {
  fn add(&self, other: &Self) -> Self { *self + *other }
  fn sub(&self, other: &Self) -> Self { *self - *other }
  fn mul(&self, other: &Self) -> Self { *self * *other }
  fn zero_like(&self) -> Self { ComplexNumber::new(0.0, 0.0) }
  fn one_like(&self) -> Self { ComplexNumber::new(1.0, 0.0) }
  fn is_zero(&self) -> bool { self.0.re == 0.0 && self.0.im == 0.0 }
  fn is_one(&self) -> bool { self.0.re == 1.0 && self.0.im == 0.0 }

  fn to_element(&self) -> Element {
    Element::C(*self)
  }

  fn from_element(element: &Element) -> Option<Self> {
    match element {
      Element::C(c) => Some(*c),
      _ => None
    }
  }
}

// endregion

// region Builtin scalars

impl Scalar for i64 {
  fn add(&self, other: &Self) -> Self { self.wrapping_add(*other) }
  fn sub(&self, other: &Self) -> Self { self.wrapping_sub(*other) }
  fn mul(&self, other: &Self) -> Self { self.wrapping_mul(*other) }
  fn zero_like(&self) -> Self { 0 }
  fn one_like(&self) -> Self { 1 }
  fn is_zero(&self) -> bool { *self == 0 }
  fn is_one(&self) -> bool { *self == 1 }

  fn to_element(&self) -> Element {
    Element::Z(*self)
  }

  fn from_element(element: &Element) -> Option<Self> {
    match element {
      Element::Z(n) => Some(*n),
      _ => None
    }
  }
}

impl Scalar for Rational64 {
  fn add(&self, other: &Self) -> Self { rational_sum(self, other) }
  fn sub(&self, other: &Self) -> Self { rational_difference(self, other) }
  fn mul(&self, other: &Self) -> Self { rational_product(self, other) }
  fn zero_like(&self) -> Self { Rational64::zero() }
  fn one_like(&self) -> Self { Rational64::one() }
  fn is_zero(&self) -> bool { Zero::is_zero(self) }
  fn is_one(&self) -> bool { One::is_one(self) }

  fn to_element(&self) -> Element {
    Element::Q(*self)
  }

  fn from_element(element: &Element) -> Option<Self> {
    match element {
      Element::Q(q) => Some(*q),
      _ => None
    }
  }
}

impl Scalar for TotalF64 {
  fn add(&self, other: &Self) -> Self { TotalF64::from(self.0 + other.0) }
  fn sub(&self, other: &Self) -> Self { TotalF64::from(self.0 - other.0) }
  fn mul(&self, other: &Self) -> Self { TotalF64::from(self.0 * other.0) }
  fn zero_like(&self) -> Self { TotalF64::from(0.0) }
  fn one_like(&self) -> Self { TotalF64::from(1.0) }
  fn is_zero(&self) -> bool { self.0 == 0.0 }
  fn is_one(&self) -> bool { self.0 == 1.0 }

  fn to_element(&self) -> Element {
    Element::R(self.clone())
  }

  fn from_element(element: &Element) -> Option<Self> {
    match element {
      Element::R(r) => Some(r.clone()),
      _ => None
    }
  }
}

// endregion

/// Ring elements are scalars of the generic affine forms. Arithmetic is the ring arithmetic of `Element`.
impl Scalar for Element {
  fn add(&self, other: &Self) -> Self { self.sum(other) }
  fn sub(&self, other: &Self) -> Self { self.difference(other) }
  fn mul(&self, other: &Self) -> Self { self.product(other) }

  fn zero_like(&self) -> Self {
    self.module().zero()
  }

  fn one_like(&self) -> Self {
    match self.module().one() {
      Some(one) => one,
      None => unreachable!("scalar {} is not a ring element", self)
    }
  }

  fn is_zero(&self) -> bool { Element::is_zero(self) }
  fn is_one(&self) -> bool { Element::is_one(self) }

  fn to_element(&self) -> Element {
    self.clone()
  }

  fn from_element(element: &Element) -> Option<Self> {
    Some(element.clone())
  }
}

// region Rational overflow

pub(crate) fn rational_sum(a: &Rational64, b: &Rational64) -> Rational64 {
  a.checked_add(b).unwrap_or_else(|| rational_from_f64(rational_to_f64(a) + rational_to_f64(b)))
}

pub(crate) fn rational_difference(a: &Rational64, b: &Rational64) -> Rational64 {
  a.checked_sub(b).unwrap_or_else(|| rational_from_f64(rational_to_f64(a) - rational_to_f64(b)))
}

pub(crate) fn rational_product(a: &Rational64, b: &Rational64) -> Rational64 {
  a.checked_mul(b).unwrap_or_else(|| rational_from_f64(rational_to_f64(a) * rational_to_f64(b)))
}

pub(crate) fn rational_to_f64(q: &Rational64) -> f64 {
  *q.numer() as f64 / *q.denom() as f64
}

/// The rational `approximate_float` finds for `x`. Magnitudes it cannot represent saturate by sign, and NaN is zero.
pub(crate) fn rational_from_f64(x: f64) -> Rational64 {
  if x.is_nan() {
    return Rational64::zero();
  }
  Rational64::approximate_float(x).unwrap_or_else(|| {
    match x {
      x if x >= 1.0  => Rational64::from_integer(i64::MAX),
      x if x <= -1.0 => Rational64::from_integer(i64::MIN),
      _ => Rational64::zero()
    }
  })
}

// endregion

/// The ring a scalar lives in, for scalars of the numeric rings.
pub(crate) fn scalar_ring<S: Scalar>(scalar: &S) -> ModuleType {
  scalar.to_element().module()
}
