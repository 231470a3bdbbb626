use std::fmt::Display;

/// Join a list of things that can be displayed as string with a given separator.
///
/// Usage:
///
///     # use morphlib::abstractions::join_string;
///     let joined = join_string([1, 3, 5].iter(), ", ");
///     // "1, 3, 5"
pub fn join_string<T: Display>(iter: impl Iterator<Item = T>, sep: &str) -> String {
  let mut joined = String::new();
  for (i, item) in iter.enumerate() {
    if i > 0 {
      joined.push_str(sep);
    }
    joined.push_str(&item.to_string());
  }
  joined
}

/// Renders a list as `[a, b, c]`. Vectors, matrix rows, and index maps all print this way.
pub fn bracketed<T: Display>(iter: impl Iterator<Item = T>) -> String {
  format!("[{}]", join_string(iter, ", "))
}

#[cfg(test)]
mod tests {
  use super::{bracketed, join_string};

  #[test]
  fn join_string_test() {
    let list = [1, 3, 5, 7, 9];
    let joined = join_string(list.iter(), ", ");
    assert_eq!(joined, "1, 3, 5, 7, 9");

    let empty: [u8; 0] = [];
    assert_eq!(join_string(empty.iter(), ", "), "");
  }

  #[test]
  fn bracketed_test() {
    assert_eq!(bracketed(["x", "y"].iter()), "[x, y]");
    assert_eq!(bracketed(Vec::<i32>::new().iter()), "[]");
  }
}
