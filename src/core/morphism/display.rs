use std::fmt::{Display, Formatter};

use crate::core::{
  format::{FormatStyle, Formattable},
  morphism::{Morphism, MorphismVariant}
};

impl Morphism {
  /// A short rendering of the payload for the `Default` style, if the variant has one worth showing.
  fn summary(&self) -> Option<String> {
    match &self.variant {
      MorphismVariant::Constant(value) => Some(format!("x ↦ {}", value)),
      MorphismVariant::Affine(form) => {
        let (a, b) = form.coefficients();
        Some(format!("x ↦ {}·x + {}", a, b))
      }
      MorphismVariant::Translation(translate) => Some(format!("x ↦ x + {}", translate)),
      MorphismVariant::Projection(index)      => Some(format!("index {}", index)),
      MorphismVariant::Modulo(reduction)      => Some(format!("mod {}", reduction.modulus())),
      MorphismVariant::Polynomial(polynomial) => Some(format!("x ↦ {}", polynomial)),
      MorphismVariant::Power(base, exponent)  => Some(format!("({})^{}", base.tag(), exponent)),
      MorphismVariant::Scaled(morphism, scalar) => Some(format!("{}·{}", scalar, morphism.tag())),
      _ => None
    }
  }
}

impl Formattable for Morphism {
  fn repr(&self, style: FormatStyle) -> String {
    match style {
      FormatStyle::Simple => self.tag().to_string(),

      FormatStyle::Input => self.to_record().to_string(),

      FormatStyle::Debug => format!("{} {:?}", self.to_record(), self.properties()),

      FormatStyle::Default => {
        match self.summary() {
          Some(summary) => format!("{}: {} → {} ({})", self.tag(), self.domain, self.codomain, summary),
          None => format!("{}: {} → {}", self.tag(), self.domain, self.codomain),
        }
      }
    }
  }
}

impl Display for Morphism {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.repr(FormatStyle::Default))
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::module::ModuleType;

  #[test]
  fn styles() {
    let f = Morphism::z_affine(2, 3);
    assert_eq!(f.repr(FormatStyle::Simple), "ZAffine");
    assert_eq!(f.to_string(), "ZAffine: Z → Z (x ↦ 2·x + 3)");
    assert_eq!(f.repr(FormatStyle::Input), "ZAffine(Z → Z; a=2, b=3)");

    let id = Morphism::identity(&ModuleType::Q);
    assert_eq!(id.to_string(), "Identity: Q → Q");
    assert!(id.repr(FormatStyle::Debug).starts_with("Identity(Q → Q)"));
  }
}
