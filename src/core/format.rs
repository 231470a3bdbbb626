/*!

There are different text representations possible for morphisms depending on the context. This module provides a
unified API for formatting them.

The `Input` style is special: it renders the complete structure of a morphism, every sub-morphism and payload, and is
therefore the canonical string form used when two morphisms have no cheaper structural comparison.

*/


use std::fmt::Display;

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum FormatStyle {
  #[default]
  Default, // Tag, domain and codomain, and a short payload summary
  Simple,  // The tag alone
  Input,   // The full structure, in the shape of the tagged record
  Debug,   // Like `Input`, followed by the classification flags
}

pub trait Formattable {
  /// Writes a text representation of `self` according to the given `FormatStyle`.
  /// Use `format!` and friends to create a string.
  fn repr(&self, style: FormatStyle) -> String;
}

impl Display for dyn Formattable {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", Formattable::repr(self, FormatStyle::Default))
  }
}
