/*!

Affine forms. `Affine<S>` is `x ↦ a·x + b` and `FreeAffine<S>` is `x ↦ A·x + b` with `A` a matrix, both written once
over the `Scalar` trait. The morphism variants hold them through two enums with one variant per numeric ring,
`NumberAffine` and `NumberFreeAffine`, plus `FreeAffine<Element>` for any other ring.

A free affine form whose matrix is `1×1` is always stored as the scalar form. The constructors collapse it, and so do
the combinators when a product of matrices comes out `1×1`.

Fusion between two forms only happens when both are over the same numeric ring. The macros below spell out the
per-ring dispatch once so the methods on the enums stay one line each.

*/

use num_rational::Rational64;
use paste::paste;
use total_float_wrap::TotalF64;

use crate::core::{
  module::{scalar_ring, ComplexNumber, Element, Matrix, Modular, ModuleType, Scalar},
  morphism::{Morphism, MorphismProperties, MorphismProperty, MorphismVariant}
};

// region Dispatch macros

/// Evaluates `$body` with `$form` bound to the form inside whichever numeric variant `$value` is.
macro_rules! on_number_form {
  ($enum:ident, $value:expr, |$form:ident| $body:expr) => {
    match $value {
      $enum::Z($form)  => $body,
      $enum::Q($form)  => $body,
      $enum::R($form)  => $body,
      $enum::C($form)  => $body,
      $enum::Zn($form) => $body,
    }
  };
}

/// Evaluates `$body`, which produces an `Option` of a form, and wraps the form back into the variant of `$target`
/// for the same ring.
macro_rules! rewrap_number_form {
  ($enum:ident => $target:ident, $value:expr, |$form:ident| $body:expr) => {
    match $value {
      $enum::Z($form)  => ($body).map($target::Z),
      $enum::Q($form)  => ($body).map($target::Q),
      $enum::R($form)  => ($body).map($target::R),
      $enum::C($form)  => ($body).map($target::C),
      $enum::Zn($form) => ($body).map($target::Zn),
    }
  };
}

/// Combines two forms over the same numeric ring. `None` when the rings differ.
macro_rules! fuse_number_forms {
  ($enum:ident, $lhs:expr, $rhs:expr, |$f:ident, $g:ident| $body:expr) => {
    match ($lhs, $rhs) {
      ($enum::Z($f), $enum::Z($g))   => Some($enum::Z($body)),
      ($enum::Q($f), $enum::Q($g))   => Some($enum::Q($body)),
      ($enum::R($f), $enum::R($g))   => Some($enum::R($body)),
      ($enum::C($f), $enum::C($g))   => Some($enum::C($body)),
      ($enum::Zn($f), $enum::Zn($g)) if $f.same_ring($g) => Some($enum::Zn($body)),
      _ => None
    }
  };
}

// endregion

// region Affine

#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Affine<S: Scalar> {
  a: S,
  b: S,
}

impl<S: Scalar> Affine<S> {
  pub fn new(a: S, b: S) -> Affine<S> {
    assert!(a.zero_like() == b.zero_like(), "affine coefficients {:?} and {:?} come from different rings", a, b);
    Affine { a, b }
  }

  #[inline(always)]
  pub fn a(&self) -> &S {
    &self.a
  }

  #[inline(always)]
  pub fn b(&self) -> &S {
    &self.b
  }

  pub fn apply(&self, x: &S) -> S {
    self.a.mul(x).add(&self.b)
  }

  pub fn apply_to_element(&self, x: &Element) -> Option<Element> {
    Some(self.apply(&S::from_element(x)?).to_element())
  }

  /// `self ∘ inner`, that is `a₁(a₂x + b₂) + b₁`.
  pub fn compose(&self, inner: &Affine<S>) -> Affine<S> {
    Affine {
      a: self.a.mul(&inner.a),
      b: self.a.mul(&inner.b).add(&self.b)
    }
  }

  pub fn sum(&self, other: &Affine<S>) -> Affine<S> {
    Affine {
      a: self.a.add(&other.a),
      b: self.b.add(&other.b)
    }
  }

  pub fn difference(&self, other: &Affine<S>) -> Affine<S> {
    Affine {
      a: self.a.sub(&other.a),
      b: self.b.sub(&other.b)
    }
  }

  /// `s·self`
  pub fn scaled(&self, s: &S) -> Affine<S> {
    Affine {
      a: s.mul(&self.a),
      b: s.mul(&self.b)
    }
  }

  pub fn scaled_by_element(&self, s: &Element) -> Option<Affine<S>> {
    let s = S::from_element(s)?;
    self.same_ring_as(&s).then(|| self.scaled(&s))
  }

  /// `self + t`
  pub fn translated_by_element(&self, t: &Element) -> Option<Affine<S>> {
    let t = S::from_element(t)?;
    self.same_ring_as(&t).then(|| Affine { a: self.a.clone(), b: self.b.add(&t) })
  }

  pub fn to_free(&self) -> FreeAffine<S> {
    FreeAffine {
      matrix: Matrix::scalar(self.a.clone()),
      shift : vec![self.b.clone()]
    }
  }

  pub fn properties(&self) -> MorphismProperties {
    let mut properties = MorphismProperties::empty();
    if self.b.is_zero() {
      properties |= MorphismProperty::ModuleHomomorphism | MorphismProperty::Linear;
      if self.a.mul(&self.a) == self.a {
        properties |= MorphismProperty::RingHomomorphism;
      }
      if self.a.is_one() {
        properties |= MorphismProperty::Identity;
      }
    }
    if self.a.is_zero() {
      properties |= MorphismProperty::Constant;
    }
    properties
  }

  fn same_ring(&self, other: &Affine<S>) -> bool {
    self.same_ring_as(&other.a)
  }

  fn same_ring_as(&self, s: &S) -> bool {
    self.a.zero_like() == s.zero_like()
  }
}

// endregion

// region FreeAffine

#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct FreeAffine<S: Scalar> {
  matrix: Matrix<S>,
  shift : Vec<S>,
}

impl<S: Scalar> FreeAffine<S> {
  /// `x ↦ A·x + b`, or `None` if `b` does not have one entry per row of `A` or the entries come from different rings.
  pub fn new(matrix: Matrix<S>, shift: Vec<S>) -> Option<FreeAffine<S>> {
    if shift.len() != matrix.rows() {
      return None;
    }
    let zero = matrix.entries()[0].zero_like();
    if !matrix.entries().iter().chain(shift.iter()).all(|s| s.zero_like() == zero) {
      return None;
    }
    Some(FreeAffine { matrix, shift })
  }

  #[inline(always)]
  pub fn matrix(&self) -> &Matrix<S> {
    &self.matrix
  }

  #[inline(always)]
  pub fn shift(&self) -> &[S] {
    &self.shift
  }

  #[inline(always)]
  pub fn rows(&self) -> usize {
    self.matrix.rows()
  }

  #[inline(always)]
  pub fn columns(&self) -> usize {
    self.matrix.columns()
  }

  pub fn apply(&self, x: &[S]) -> Vec<S> {
    self.matrix
        .apply(x)
        .iter()
        .zip(self.shift.iter())
        .map(|(y, b)| y.add(b))
        .collect()
  }

  /// Applies the form to the coordinates of `x` and builds the result in `codomain`.
  pub fn apply_to_element(&self, x: &Element, codomain: &ModuleType) -> Option<Element> {
    let coordinates = x.components().iter().map(S::from_element).collect::<Option<Vec<S>>>()?;
    if coordinates.len() != self.columns() {
      return None;
    }
    codomain.create_element(self.apply(&coordinates).iter().map(Scalar::to_element).collect())
  }

  /// `self ∘ inner`, that is `A₁(A₂x + b₂) + b₁`.
  pub fn compose(&self, inner: &FreeAffine<S>) -> FreeAffine<S> {
    let shift = self.matrix
                    .apply(&inner.shift)
                    .iter()
                    .zip(self.shift.iter())
                    .map(|(y, b)| y.add(b))
                    .collect();
    FreeAffine {
      matrix: self.matrix.product(&inner.matrix),
      shift
    }
  }

  pub fn sum(&self, other: &FreeAffine<S>) -> FreeAffine<S> {
    FreeAffine {
      matrix: self.matrix.sum(&other.matrix),
      shift : self.shift.iter().zip(other.shift.iter()).map(|(a, b)| a.add(b)).collect()
    }
  }

  pub fn difference(&self, other: &FreeAffine<S>) -> FreeAffine<S> {
    FreeAffine {
      matrix: self.matrix.difference(&other.matrix),
      shift : self.shift.iter().zip(other.shift.iter()).map(|(a, b)| a.sub(b)).collect()
    }
  }

  /// `s·self`
  pub fn scaled(&self, s: &S) -> FreeAffine<S> {
    FreeAffine {
      matrix: self.matrix.scaled(s),
      shift : self.shift.iter().map(|b| s.mul(b)).collect()
    }
  }

  pub fn scaled_by_element(&self, s: &Element) -> Option<FreeAffine<S>> {
    let s = S::from_element(s)?;
    self.same_ring_as(&s).then(|| self.scaled(&s))
  }

  /// `self + t`, with `t` given by its coordinates.
  pub fn translated_by_element(&self, t: &Element) -> Option<FreeAffine<S>> {
    let t = t.components().iter().map(S::from_element).collect::<Option<Vec<S>>>()?;
    if t.len() != self.rows() || !t.iter().all(|s| self.same_ring_as(s)) {
      return None;
    }
    Some(FreeAffine {
      matrix: self.matrix.clone(),
      shift : self.shift.iter().zip(t.iter()).map(|(b, t)| b.add(t)).collect()
    })
  }

  /// The scalar form, if the matrix is `1×1`.
  pub fn as_scalar(&self) -> Option<Affine<S>> {
    (self.rows() == 1 && self.columns() == 1).then(|| Affine::new(self.matrix.get(0, 0).clone(), self.shift[0].clone()))
  }

  pub fn properties(&self) -> MorphismProperties {
    if let Some(scalar) = self.as_scalar() {
      return scalar.properties();
    }

    let mut properties = MorphismProperties::empty();
    if self.shift.iter().all(|b| b.is_zero()) {
      properties |= MorphismProperty::ModuleHomomorphism | MorphismProperty::Linear;
      if self.matrix.is_identity() {
        properties |= MorphismProperty::Identity;
      }
    }
    if self.matrix.is_zero() {
      properties |= MorphismProperty::Constant;
    }
    properties
  }

  fn same_ring(&self, other: &FreeAffine<S>) -> bool {
    self.same_ring_as(&other.matrix.entries()[0])
  }

  fn same_ring_as(&self, s: &S) -> bool {
    self.matrix.entries()[0].zero_like() == s.zero_like()
  }

  /// The matrix entries in row-major order and the shift, as elements.
  pub fn elements(&self) -> (Vec<Element>, Vec<Element>) {
    (
      self.matrix.entries().iter().map(Scalar::to_element).collect(),
      self.shift.iter().map(Scalar::to_element).collect()
    )
  }
}

/// Reads a free affine form of scalar type `S` from element entries.
fn free_affine_from_elements<S: Scalar>(matrix: &Matrix<Element>, shift: &[Element]) -> Option<FreeAffine<S>> {
  let entries = matrix.entries().iter().map(S::from_element).collect::<Option<Vec<S>>>()?;
  let shift   = shift.iter().map(S::from_element).collect::<Option<Vec<S>>>()?;
  FreeAffine::new(Matrix::new(matrix.rows(), matrix.columns(), entries)?, shift)
}

// endregion

// region Per-ring enums

#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum NumberAffine {
  Z(Affine<i64>),
  Q(Affine<Rational64>),
  R(Affine<TotalF64>),
  C(Affine<ComplexNumber>),
  Zn(Affine<Modular>),
}

impl NumberAffine {
  /// The form `x ↦ a·x + b`, if `a` and `b` are elements of the same numeric ring.
  pub fn from_elements(a: &Element, b: &Element) -> Option<NumberAffine> {
    match (a, b) {
      (Element::Z(a), Element::Z(b))   => Some(NumberAffine::Z(Affine::new(*a, *b))),
      (Element::Q(a), Element::Q(b))   => Some(NumberAffine::Q(Affine::new(*a, *b))),
      (Element::R(a), Element::R(b))   => Some(NumberAffine::R(Affine::new(a.clone(), b.clone()))),
      (Element::C(a), Element::C(b))   => Some(NumberAffine::C(Affine::new(*a, *b))),
      (Element::Zn(a), Element::Zn(b)) if a.modulus() == b.modulus() => Some(NumberAffine::Zn(Affine::new(*a, *b))),
      _ => None
    }
  }

  pub fn ring(&self) -> ModuleType {
    on_number_form!(NumberAffine, self, |form| scalar_ring(form.a()))
  }

  /// `(a, b)` as elements.
  pub fn coefficients(&self) -> (Element, Element) {
    on_number_form!(NumberAffine, self, |form| (form.a().to_element(), form.b().to_element()))
  }

  pub fn apply(&self, x: &Element) -> Option<Element> {
    on_number_form!(NumberAffine, self, |form| form.apply_to_element(x))
  }

  pub fn properties(&self) -> MorphismProperties {
    on_number_form!(NumberAffine, self, |form| form.properties())
  }

  pub fn compose(&self, inner: &NumberAffine) -> Option<NumberAffine> {
    fuse_number_forms!(NumberAffine, self, inner, |f, g| f.compose(g))
  }

  pub fn sum(&self, other: &NumberAffine) -> Option<NumberAffine> {
    fuse_number_forms!(NumberAffine, self, other, |f, g| f.sum(g))
  }

  pub fn difference(&self, other: &NumberAffine) -> Option<NumberAffine> {
    fuse_number_forms!(NumberAffine, self, other, |f, g| f.difference(g))
  }

  pub fn scaled(&self, s: &Element) -> Option<NumberAffine> {
    rewrap_number_form!(NumberAffine => NumberAffine, self, |form| form.scaled_by_element(s))
  }

  pub fn translated(&self, t: &Element) -> Option<NumberAffine> {
    rewrap_number_form!(NumberAffine => NumberAffine, self, |form| form.translated_by_element(t))
  }

  pub fn to_free(&self) -> NumberFreeAffine {
    match self {
      NumberAffine::Z(form)  => NumberFreeAffine::Z(form.to_free()),
      NumberAffine::Q(form)  => NumberFreeAffine::Q(form.to_free()),
      NumberAffine::R(form)  => NumberFreeAffine::R(form.to_free()),
      NumberAffine::C(form)  => NumberFreeAffine::C(form.to_free()),
      NumberAffine::Zn(form) => NumberFreeAffine::Zn(form.to_free()),
    }
  }

  pub fn tag(&self) -> &'static str {
    match self {
      NumberAffine::Z(_)  => "ZAffine",
      NumberAffine::Q(_)  => "QAffine",
      NumberAffine::R(_)  => "RAffine",
      NumberAffine::C(_)  => "CAffine",
      NumberAffine::Zn(_) => "ZnAffine",
    }
  }
}

#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum NumberFreeAffine {
  Z(FreeAffine<i64>),
  Q(FreeAffine<Rational64>),
  R(FreeAffine<TotalF64>),
  C(FreeAffine<ComplexNumber>),
  Zn(FreeAffine<Modular>),
}

impl NumberFreeAffine {
  /// The form `x ↦ A·x + b`, if every entry is an element of the same numeric ring.
  pub fn from_elements(matrix: &Matrix<Element>, shift: &[Element]) -> Option<NumberFreeAffine> {
    match &matrix.entries()[0] {
      Element::Z(_)  => free_affine_from_elements(matrix, shift).map(NumberFreeAffine::Z),
      Element::Q(_)  => free_affine_from_elements(matrix, shift).map(NumberFreeAffine::Q),
      Element::R(_)  => free_affine_from_elements(matrix, shift).map(NumberFreeAffine::R),
      Element::C(_)  => free_affine_from_elements(matrix, shift).map(NumberFreeAffine::C),
      Element::Zn(_) => free_affine_from_elements(matrix, shift).map(NumberFreeAffine::Zn),
      _ => None
    }
  }

  pub fn ring(&self) -> ModuleType {
    on_number_form!(NumberFreeAffine, self, |form| scalar_ring(&form.matrix().entries()[0]))
  }

  pub fn rows(&self) -> usize {
    on_number_form!(NumberFreeAffine, self, |form| form.rows())
  }

  pub fn columns(&self) -> usize {
    on_number_form!(NumberFreeAffine, self, |form| form.columns())
  }

  /// Matrix entries in row-major order and the shift, as elements.
  pub fn elements(&self) -> (Vec<Element>, Vec<Element>) {
    on_number_form!(NumberFreeAffine, self, |form| form.elements())
  }

  pub fn apply(&self, x: &Element, codomain: &ModuleType) -> Option<Element> {
    on_number_form!(NumberFreeAffine, self, |form| form.apply_to_element(x, codomain))
  }

  pub fn properties(&self) -> MorphismProperties {
    on_number_form!(NumberFreeAffine, self, |form| form.properties())
  }

  pub fn compose(&self, inner: &NumberFreeAffine) -> Option<NumberFreeAffine> {
    fuse_number_forms!(NumberFreeAffine, self, inner, |f, g| f.compose(g))
  }

  pub fn sum(&self, other: &NumberFreeAffine) -> Option<NumberFreeAffine> {
    fuse_number_forms!(NumberFreeAffine, self, other, |f, g| f.sum(g))
  }

  pub fn difference(&self, other: &NumberFreeAffine) -> Option<NumberFreeAffine> {
    fuse_number_forms!(NumberFreeAffine, self, other, |f, g| f.difference(g))
  }

  pub fn scaled(&self, s: &Element) -> Option<NumberFreeAffine> {
    rewrap_number_form!(NumberFreeAffine => NumberFreeAffine, self, |form| form.scaled_by_element(s))
  }

  pub fn translated(&self, t: &Element) -> Option<NumberFreeAffine> {
    rewrap_number_form!(NumberFreeAffine => NumberFreeAffine, self, |form| form.translated_by_element(t))
  }

  /// The scalar form, if the matrix is `1×1`.
  pub fn as_scalar(&self) -> Option<NumberAffine> {
    rewrap_number_form!(NumberFreeAffine => NumberAffine, self, |form| form.as_scalar())
  }

  pub fn tag(&self) -> &'static str {
    match self {
      NumberFreeAffine::Z(_)  => "ZFreeAffine",
      NumberFreeAffine::Q(_)  => "QFreeAffine",
      NumberFreeAffine::R(_)  => "RFreeAffine",
      NumberFreeAffine::C(_)  => "CFreeAffine",
      NumberFreeAffine::Zn(_) => "ZnFreeAffine",
    }
  }
}

// endregion

// region Morphism constructors

impl Morphism {
  pub(crate) fn from_number_affine(form: NumberAffine) -> Morphism {
    let ring = form.ring();
    Morphism::new(ring.clone(), ring, MorphismVariant::Affine(form))
  }

  /// Wraps a numeric free affine form, collapsing a `1×1` form to the scalar variant.
  pub(crate) fn from_number_free_affine(form: NumberFreeAffine) -> Morphism {
    if let Some(scalar) = form.as_scalar() {
      return Morphism::from_number_affine(scalar);
    }
    let ring = form.ring();
    Morphism::new(
      ModuleType::free(&ring, form.columns()),
      ModuleType::free(&ring, form.rows()),
      MorphismVariant::FreeAffine(form)
    )
  }

  pub(crate) fn from_generic_affine(form: FreeAffine<Element>) -> Morphism {
    let ring = form.matrix().entries()[0].module();
    Morphism::new(
      ModuleType::free(&ring, form.columns()),
      ModuleType::free(&ring, form.rows()),
      MorphismVariant::GenericAffine(form)
    )
  }

  /// `x ↦ a·x + b` on the ring of `a` and `b`, or `None` if they are not elements of the same ring.
  pub fn affine(a: &Element, b: &Element) -> Option<Morphism> {
    if let Some(form) = NumberAffine::from_elements(a, b) {
      return Some(Morphism::from_number_affine(form));
    }
    Morphism::free_affine(Matrix::scalar(a.clone()), vec![b.clone()])
  }

  /// `x ↦ a·x`
  pub fn linear(a: &Element) -> Option<Morphism> {
    Morphism::affine(a, &a.module().zero())
  }

  /// `x ↦ A·x + b` from `R^columns` to `R^rows`, where `R` is the ring of the entries. `None` if the entries are not
  /// all elements of one ring or `b` does not have one entry per row.
  pub fn free_affine(matrix: Matrix<Element>, shift: Vec<Element>) -> Option<Morphism> {
    let ring = matrix.entries()[0].module();
    if !ring.is_ring() || !matrix.entries().iter().chain(shift.iter()).all(|e| ring.has_element(e)) {
      return None;
    }
    if let Some(form) = NumberFreeAffine::from_elements(&matrix, &shift) {
      return Some(Morphism::from_number_free_affine(form));
    }
    Some(Morphism::from_generic_affine(FreeAffine::new(matrix, shift)?))
  }

  /// `x ↦ A·x`
  pub fn free_linear(matrix: Matrix<Element>) -> Option<Morphism> {
    let zero  = matrix.entries()[0].module().zero();
    let shift = vec![zero; matrix.rows()];
    Morphism::free_affine(matrix, shift)
  }
}

macro_rules! number_affine_constructors {
  (
    affine: $($ring:ident : $scalar:ty),+;
    free: $($free_ring:ident : $free_scalar:ty),+ $(;)?
  ) => {
    paste! {
      impl Morphism {
        $(
          #[doc = "`x ↦ a·x + b` on " $ring "."]
          pub fn [<$ring:lower _affine>](a: $scalar, b: $scalar) -> Morphism {
            Morphism::from_number_affine(NumberAffine::$ring(Affine::new(a, b)))
          }
        )+

        $(
          #[doc = "`x ↦ A·x + b` on free modules over " $free_ring "."]
          #[doc = "`None` if the shift does not fit the matrix or the entries come from different rings."]
          pub fn [<$free_ring:lower _free_affine>](
            matrix: Matrix<$free_scalar>,
            shift : Vec<$free_scalar>
          ) -> Option<Morphism> {
            let form = FreeAffine::new(matrix, shift)?;
            Some(Morphism::from_number_free_affine(NumberFreeAffine::$free_ring(form)))
          }
        )+
      }
    }
  };
}

number_affine_constructors!(
  affine: Z: i64, Q: Rational64, R: TotalF64, C: ComplexNumber;
  free  : Z: i64, Q: Rational64, R: TotalF64, C: ComplexNumber, Zn: Modular;
);

impl Morphism {
  /// `x ↦ a·x + b` on `Z_n`, or `None` if `a` and `b` have different moduli.
  pub fn zn_affine(a: Modular, b: Modular) -> Option<Morphism> {
    (a.modulus() == b.modulus()).then(|| Morphism::from_number_affine(NumberAffine::Zn(Affine::new(a, b))))
  }
}

// endregion
