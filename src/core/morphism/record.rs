/*!

The flat tagged record a morphism converts to and from. A record is a stable tag name, the domain and codomain, and
an ordered list of named fields holding elements, sub-morphisms, integers, index lists, or flags. It is the shape an
external structured-text adapter reads and writes; no syntax is produced here.

Reading a record never trusts it: `Morphism::from_record` rebuilds the morphism through the same factory functions
every other caller uses, then checks that the result carries the recorded tag, domain, and codomain.

| tag                      | fields                                          |
|:-------------------------|:------------------------------------------------|
| `Identity`               |                                                 |
| `Constant`               | `value`                                         |
| `ZAffine`, …, `ZnAffine` | `a`, `b`                                        |
| `ZFreeAffine`, …, `GenericAffine` | `rows`, `columns`, `matrix`, `shift`   |
| `Translation`            | `translate`                                     |
| `Projection`             | `index`                                         |
| `Reorder`, `Shuffle`     | `indices`                                       |
| `Split`                  | `parts`                                         |
| `Modulo`                 | `modulus`, `canonical`                          |
| `Polynomial`             | `polynomial`                                    |
| `Folding`                | `samples`                                       |
| `Tuple`                  | `factors`                                       |
| `StringCast`             | `coefficients`                                  |
| `FreeLift`               | `ring`                                          |
| `Composition`            | `outer`, `inner`                                |
| `Sum`, `Difference`      | `left`, `right`                                 |
| `Scaled`                 | `morphism`, `scalar`                            |
| `Power`                  | `base`, `exponent`                              |

The remaining tags (`Conjugation`, `Embedding`, `Cast`, `CoefficientEmbedding`, `StringEmbedding`) are determined by
their domain and codomain alone.

*/

use std::fmt::{Display, Formatter};

use crate::{
  abstractions::{bracketed, join_string, IString},
  core::{
    format::{FormatStyle, Formattable},
    module::{Element, Matrix, ModuleType},
    morphism::{Morphism, MorphismVariant, RingPair}
  },
  warning
};

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RecordField {
  Element(Element),
  Elements(Vec<Element>),
  Morphism(Morphism),
  Morphisms(Vec<Morphism>),
  Integer(i64),
  Indices(Vec<Option<usize>>),
  Flag(bool),
}

impl Display for RecordField {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      RecordField::Element(element)     => write!(f, "{}", element),
      RecordField::Elements(elements)   => write!(f, "{}", bracketed(elements.iter())),
      RecordField::Morphism(morphism)   => write!(f, "{}", morphism.repr(FormatStyle::Input)),
      RecordField::Morphisms(morphisms) => {
        write!(f, "{}", bracketed(morphisms.iter().map(|m| m.repr(FormatStyle::Input))))
      }
      RecordField::Integer(n)           => write!(f, "{}", n),
      RecordField::Indices(indices)     => {
        write!(f, "{}", bracketed(indices.iter().map(|i| i.map_or(-1, |i| i as i64))))
      }
      RecordField::Flag(flag)           => write!(f, "{}", flag),
    }
  }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MorphismRecord {
  pub tag     : IString,
  pub domain  : ModuleType,
  pub codomain: ModuleType,
  pub fields  : Vec<(IString, RecordField)>,
}

impl MorphismRecord {
  pub fn new(tag: &str, domain: &ModuleType, codomain: &ModuleType) -> MorphismRecord {
    MorphismRecord {
      tag     : IString::from(tag),
      domain  : domain.clone(),
      codomain: codomain.clone(),
      fields  : vec![],
    }
  }

  /// Appends a field.
  pub fn with(mut self, name: &str, field: RecordField) -> MorphismRecord {
    self.fields.push((IString::from(name), field));
    self
  }

  pub fn field(&self, name: &str) -> Option<&RecordField> {
    self.fields.iter().find(|(n, _)| &**n == name).map(|(_, field)| field)
  }

  fn element(&self, name: &str) -> Option<&Element> {
    match self.field(name)? {
      RecordField::Element(element) => Some(element),
      _ => None
    }
  }

  fn elements(&self, name: &str) -> Option<&[Element]> {
    match self.field(name)? {
      RecordField::Elements(elements) => Some(elements),
      _ => None
    }
  }

  fn morphism(&self, name: &str) -> Option<&Morphism> {
    match self.field(name)? {
      RecordField::Morphism(morphism) => Some(morphism),
      _ => None
    }
  }

  fn morphisms(&self, name: &str) -> Option<&[Morphism]> {
    match self.field(name)? {
      RecordField::Morphisms(morphisms) => Some(morphisms),
      _ => None
    }
  }

  fn integer(&self, name: &str) -> Option<i64> {
    match self.field(name)? {
      RecordField::Integer(n) => Some(*n),
      _ => None
    }
  }

  fn index(&self, name: &str) -> Option<usize> {
    usize::try_from(self.integer(name)?).ok()
  }

  fn indices(&self, name: &str) -> Option<&[Option<usize>]> {
    match self.field(name)? {
      RecordField::Indices(indices) => Some(indices),
      _ => None
    }
  }

  fn flag(&self, name: &str) -> Option<bool> {
    match self.field(name)? {
      RecordField::Flag(flag) => Some(*flag),
      _ => None
    }
  }
}

impl Display for MorphismRecord {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let fields = self.fields.iter().map(|(name, field)| format!("{}={}", name, field));
    if self.fields.is_empty() {
      write!(f, "{}({} → {})", self.tag, self.domain, self.codomain)
    } else {
      write!(f, "{}({} → {}; {})", self.tag, self.domain, self.codomain, join_string(fields, ", "))
    }
  }
}

impl Morphism {
  /// The stable tag name of the variant.
  pub fn tag(&self) -> &'static str {
    match &self.variant {
      MorphismVariant::Identity             => "Identity",
      MorphismVariant::Constant(_)          => "Constant",
      MorphismVariant::Affine(form)         => form.tag(),
      MorphismVariant::FreeAffine(form)     => form.tag(),
      MorphismVariant::GenericAffine(_)     => "GenericAffine",
      MorphismVariant::Translation(_)       => "Translation",
      MorphismVariant::Projection(_)        => "Projection",
      MorphismVariant::Reorder(_)           => "Reorder",
      MorphismVariant::Shuffle(_)           => "Shuffle",
      MorphismVariant::Split(_)             => "Split",
      MorphismVariant::Conjugation          => "Conjugation",
      MorphismVariant::Modulo(_)            => "Modulo",
      MorphismVariant::Polynomial(_)        => "Polynomial",
      MorphismVariant::Folding(_)           => "Folding",
      MorphismVariant::Tuple(_)             => "Tuple",
      MorphismVariant::Embedding(_)         => "Embedding",
      MorphismVariant::Cast(_)              => "Cast",
      MorphismVariant::CoefficientEmbedding => "CoefficientEmbedding",
      MorphismVariant::StringEmbedding      => "StringEmbedding",
      MorphismVariant::StringCast(_)        => "StringCast",
      MorphismVariant::FreeLift(_)          => "FreeLift",
      MorphismVariant::Composition(..)      => "Composition",
      MorphismVariant::Sum(..)              => "Sum",
      MorphismVariant::Difference(..)       => "Difference",
      MorphismVariant::Scaled(..)           => "Scaled",
      MorphismVariant::Power(..)            => "Power",
    }
  }

  pub fn to_record(&self) -> MorphismRecord {
    let record = MorphismRecord::new(self.tag(), &self.domain, &self.codomain);

    match &self.variant {
      MorphismVariant::Identity
      | MorphismVariant::Conjugation
      | MorphismVariant::Embedding(_)
      | MorphismVariant::Cast(_)
      | MorphismVariant::CoefficientEmbedding
      | MorphismVariant::StringEmbedding => record,

      MorphismVariant::Constant(value) => record.with("value", RecordField::Element(value.clone())),

      MorphismVariant::Affine(form) => {
        let (a, b) = form.coefficients();
        record.with("a", RecordField::Element(a))
              .with("b", RecordField::Element(b))
      }

      MorphismVariant::FreeAffine(form) => {
        let (matrix, shift) = form.elements();
        matrix_fields(record, form.rows(), form.columns(), matrix, shift)
      }

      MorphismVariant::GenericAffine(form) => {
        let (matrix, shift) = form.elements();
        matrix_fields(record, form.rows(), form.columns(), matrix, shift)
      }

      MorphismVariant::Translation(translate) => record.with("translate", RecordField::Element(translate.clone())),

      MorphismVariant::Projection(index) => record.with("index", RecordField::Integer(*index as i64)),

      MorphismVariant::Reorder(indices)
      | MorphismVariant::Shuffle(indices) => record.with("indices", RecordField::Indices(indices.clone())),

      MorphismVariant::Split(parts) => record.with("parts", RecordField::Morphisms(parts.clone())),

      MorphismVariant::Modulo(reduction) => {
        record.with("modulus", RecordField::Integer(reduction.modulus()))
              .with("canonical", RecordField::Flag(reduction.is_canonical()))
      }

      MorphismVariant::Polynomial(polynomial) => record.with("polynomial", RecordField::Element(polynomial.clone())),

      MorphismVariant::Folding(table) => {
        record.with("samples", RecordField::Elements(table.samples().cloned().collect()))
      }

      MorphismVariant::Tuple(factors) => record.with("factors", RecordField::Morphisms(factors.clone())),

      MorphismVariant::StringCast(coefficients) => {
        record.with("coefficients", RecordField::Morphism(coefficients.as_ref().clone()))
      }

      MorphismVariant::FreeLift(ring_morphism) => {
        record.with("ring", RecordField::Morphism(ring_morphism.as_ref().clone()))
      }

      MorphismVariant::Composition(outer, inner) => {
        record.with("outer", RecordField::Morphism(outer.as_ref().clone()))
              .with("inner", RecordField::Morphism(inner.as_ref().clone()))
      }

      MorphismVariant::Sum(left, right)
      | MorphismVariant::Difference(left, right) => {
        record.with("left", RecordField::Morphism(left.as_ref().clone()))
              .with("right", RecordField::Morphism(right.as_ref().clone()))
      }

      MorphismVariant::Scaled(morphism, scalar) => {
        record.with("morphism", RecordField::Morphism(morphism.as_ref().clone()))
              .with("scalar", RecordField::Element(scalar.clone()))
      }

      MorphismVariant::Power(base, exponent) => {
        record.with("base", RecordField::Morphism(base.as_ref().clone()))
              .with("exponent", RecordField::Integer(*exponent as i64))
      }
    }
  }

  /// Rebuilds a morphism from its record, or `None` if the record does not describe a valid morphism.
  pub fn from_record(record: &MorphismRecord) -> Option<Morphism> {
    match Morphism::build_from_record(record) {
      Some(morphism)
        if morphism.tag() == &*record.tag
            && morphism.domain == record.domain
            && morphism.codomain == record.codomain => Some(morphism),

      _ => {
        warning!(1, "rejected {} record from {} to {}", record.tag, record.domain, record.codomain);
        None
      }
    }
  }

  fn build_from_record(record: &MorphismRecord) -> Option<Morphism> {
    let (domain, codomain) = (&record.domain, &record.codomain);

    match &*record.tag {
      "Identity" => Some(Morphism::identity(domain)),

      "Constant" => Some(Morphism::constant(domain, record.element("value")?.clone())),

      "ZAffine" | "QAffine" | "RAffine" | "CAffine" | "ZnAffine" => {
        Morphism::affine(record.element("a")?, record.element("b")?)
      }

      "ZFreeAffine" | "QFreeAffine" | "RFreeAffine" | "CFreeAffine" | "ZnFreeAffine" | "GenericAffine" => {
        // Entries are read in row-major order starting at index 0.
        let matrix = Matrix::new(record.index("rows")?, record.index("columns")?, record.elements("matrix")?.to_vec())?;
        Morphism::free_affine(matrix, record.elements("shift")?.to_vec())
      }

      "Translation" => Some(Morphism::translation(record.element("translate")?.clone())),

      "Projection" => Morphism::projection(domain, record.index("index")?),

      "Reorder" => Morphism::reorder(domain, codomain, record.indices("indices")?.to_vec()),

      "Shuffle" => Morphism::shuffle(domain, codomain, record.indices("indices")?.to_vec()),

      "Split" => Morphism::split(record.morphisms("parts")?.to_vec()),

      "Conjugation" => Morphism::conjugation(domain.dimension()),

      "Modulo" => {
        let modulus = record.integer("modulus")?;
        match record.flag("canonical")? {
          true  => (modulus >= 2).then(|| Morphism::modulo_reduction(modulus, true)),
          false => Morphism::modulo(domain.dimension(), modulus),
        }
      }

      "Polynomial" => Morphism::polynomial(record.element("polynomial")?.clone()),

      "Folding" => Morphism::folding(record.elements("samples")?.to_vec()),

      "Tuple" => Morphism::tuple(record.morphisms("factors")?.to_vec()),

      "Embedding" => {
        RingPair::embedding(domain.number_ring()?, codomain.number_ring()?).map(Morphism::number_embedding)
      }

      "Cast" => RingPair::casting(domain.number_ring()?, codomain.number_ring()?).map(Morphism::number_cast),

      "CoefficientEmbedding" => Morphism::coefficient_embedding(codomain),

      "StringEmbedding" => Morphism::string_embedding(codomain),

      "StringCast" => Morphism::string_cast(record.morphism("coefficients")?.clone()),

      "FreeLift" => {
        Morphism::free_lift(record.morphism("ring")?.clone(), domain.dimension(), codomain.dimension())
      }

      "Composition" => {
        let (outer, inner) = (record.morphism("outer")?, record.morphism("inner")?);
        (outer.domain == inner.codomain).then(|| {
          Morphism::new(
            inner.domain.clone(),
            outer.codomain.clone(),
            MorphismVariant::Composition(Box::new(outer.clone()), Box::new(inner.clone()))
          )
        })
      }

      "Sum" | "Difference" => {
        let (left, right) = (record.morphism("left")?, record.morphism("right")?);
        if left.domain != right.domain || left.codomain != right.codomain {
          return None;
        }
        let (left, right) = (Box::new(left.clone()), Box::new(right.clone()));
        let variant = match &*record.tag {
          "Sum" => MorphismVariant::Sum(left, right),
          _     => MorphismVariant::Difference(left, right),
        };
        Some(Morphism::new(domain.clone(), codomain.clone(), variant))
      }

      "Scaled" => {
        let (morphism, scalar) = (record.morphism("morphism")?, record.element("scalar")?);
        morphism.codomain.ring().has_element(scalar).then(|| {
          Morphism::new(
            morphism.domain.clone(),
            morphism.codomain.clone(),
            MorphismVariant::Scaled(Box::new(morphism.clone()), scalar.clone())
          )
        })
      }

      "Power" => {
        let base = record.morphism("base")?;
        let exponent = u64::try_from(record.integer("exponent")?).ok()?;
        (base.domain == base.codomain).then(|| {
          Morphism::new(
            base.domain.clone(),
            base.codomain.clone(),
            MorphismVariant::Power(Box::new(base.clone()), exponent)
          )
        })
      }

      _ => None
    }
  }
}

fn matrix_fields(
  record : MorphismRecord,
  rows   : usize,
  columns: usize,
  matrix : Vec<Element>,
  shift  : Vec<Element>
) -> MorphismRecord
{
  record.with("rows", RecordField::Integer(rows as i64))
        .with("columns", RecordField::Integer(columns as i64))
        .with("matrix", RecordField::Elements(matrix))
        .with("shift", RecordField::Elements(shift))
}


#[cfg(test)]
mod tests {
  use super::*;

  fn round_trip(morphism: &Morphism) {
    let record = morphism.to_record();
    assert_eq!(Morphism::from_record(&record).as_ref(), Some(morphism), "record {}", record);
  }

  #[test]
  fn records_round_trip() {
    let z3 = ModuleType::free(&ModuleType::Z, 3);
    let free = Morphism::z_free_affine(
      Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap(),
      vec![7, 8]
    ).unwrap();

    round_trip(&Morphism::identity(&z3));
    round_trip(&Morphism::z_affine(2, 3));
    round_trip(&free);
    round_trip(&Morphism::reorder_raw(&z3, &z3, &[2, -1, 0]).unwrap());
    round_trip(&Morphism::modulo(3, 4).unwrap());
    round_trip(&Morphism::modulo_reduction(5, true));
    round_trip(&Morphism::folding(vec![Element::Z(1), Element::Z(4)]).unwrap());
    round_trip(&Morphism::conjugation(2).unwrap());

    let cube = Morphism::reorder_raw(&z3, &z3, &[2, -1, 0]).unwrap().power(3).unwrap();
    assert_eq!(cube.tag(), "Power");
    round_trip(&cube);
    let folded = Morphism::folding(vec![Element::Z(1)]).unwrap();
    let composition = folded.compose(&Morphism::z_affine(1, 1)).unwrap();
    assert_eq!(composition.tag(), "Composition");
    round_trip(&composition);
  }

  #[test]
  fn free_affine_fields_are_row_major() {
    let record = Morphism::z_free_affine(
      Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap(),
      vec![5, 6]
    ).unwrap().to_record();
    assert_eq!(record.tag, IString::from("ZFreeAffine"));
    assert_eq!(
      record.field("matrix"),
      Some(&RecordField::Elements(vec![Element::Z(1), Element::Z(2), Element::Z(3), Element::Z(4)]))
    );
    assert_eq!(format!("{}", record), "ZFreeAffine(Z^2 → Z^2; rows=2, columns=2, matrix=[1, 2, 3, 4], shift=[5, 6])");
  }

  #[test]
  fn inconsistent_records_are_rejected() {
    let record = MorphismRecord::new("ZAffine", &ModuleType::Z, &ModuleType::Z)
        .with("a", RecordField::Element(Element::real(1.0)))
        .with("b", RecordField::Element(Element::real(1.0)));
    assert!(Morphism::from_record(&record).is_none());

    let record = MorphismRecord::new("Projection", &ModuleType::Z, &ModuleType::Z)
        .with("index", RecordField::Integer(0));
    assert!(Morphism::from_record(&record).is_none());

    assert!(Morphism::from_record(&MorphismRecord::new("Nonsense", &ModuleType::Z, &ModuleType::Z)).is_none());
  }
}
