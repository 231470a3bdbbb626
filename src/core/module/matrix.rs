/*!

Dense row-major matrices over a `Scalar`. Only what the free affine forms need: products with vectors and matrices,
pointwise sums and differences, and scaling. A matrix always has at least one row and one column, which is what lets
`Scalar::zero_like` find a template scalar.

*/

use std::fmt::{Display, Formatter};

use crate::{
  abstractions::bracketed,
  core::module::number::Scalar
};

#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Matrix<S: Scalar> {
  rows   : usize,
  columns: usize,
  entries: Vec<S>,
}

impl<S: Scalar> Matrix<S> {
  /// A matrix from its entries in row-major order, or `None` if the dimensions are empty or do not fit the entries.
  pub fn new(rows: usize, columns: usize, entries: Vec<S>) -> Option<Matrix<S>> {
    if rows == 0 || columns == 0 || entries.len() != rows * columns {
      return None;
    }
    Some(Matrix { rows, columns, entries })
  }

  /// A matrix from its rows, or `None` if the rows are ragged or empty.
  pub fn from_rows(rows: Vec<Vec<S>>) -> Option<Matrix<S>> {
    let columns = rows.first()?.len();
    if !rows.iter().all(|row| row.len() == columns) {
      return None;
    }
    let row_count = rows.len();
    Matrix::new(row_count, columns, rows.into_iter().flatten().collect())
  }

  /// The `n×n` identity, with unit and zero taken from `template`.
  pub fn identity(n: usize, template: &S) -> Matrix<S> {
    assert!(n > 0, "tried to build an empty identity matrix");
    let (zero, one) = (template.zero_like(), template.one_like());
    let entries = (0..n * n).map(|k| if k / n == k % n { one.clone() } else { zero.clone() }).collect();
    Matrix { rows: n, columns: n, entries }
  }

  /// The `1×1` matrix `[a]`.
  pub fn scalar(a: S) -> Matrix<S> {
    Matrix { rows: 1, columns: 1, entries: vec![a] }
  }

  #[inline(always)]
  pub fn rows(&self) -> usize {
    self.rows
  }

  #[inline(always)]
  pub fn columns(&self) -> usize {
    self.columns
  }

  #[inline(always)]
  pub fn entries(&self) -> &[S] {
    &self.entries
  }

  pub fn get(&self, row: usize, column: usize) -> &S {
    &self.entries[row * self.columns + column]
  }

  pub fn is_zero(&self) -> bool {
    self.entries.iter().all(|e| e.is_zero())
  }

  pub fn is_identity(&self) -> bool {
    self.rows == self.columns
        && self.entries.iter().enumerate().all(|(k, e)| {
          if k / self.columns == k % self.columns { e.is_one() } else { e.is_zero() }
        })
  }

  /// `self·x`.
  pub fn apply(&self, x: &[S]) -> Vec<S> {
    assert_eq!(x.len(), self.columns, "{}x{} matrix applied to a vector of length {}", self.rows, self.columns, x.len());
    (0..self.rows)
        .map(|i| {
          let row = &self.entries[i * self.columns..(i + 1) * self.columns];
          row.iter().zip(x.iter()).fold(self.entries[0].zero_like(), |acc, (a, b)| acc.add(&a.mul(b)))
        })
        .collect()
  }

  /// The matrix product `self·other`.
  pub fn product(&self, other: &Matrix<S>) -> Matrix<S> {
    assert_eq!(self.columns, other.rows, "incompatible matrix product {}x{} · {}x{}",
      self.rows, self.columns, other.rows, other.columns);
    let zero = self.entries[0].zero_like();
    let mut entries = Vec::with_capacity(self.rows * other.columns);
    for i in 0..self.rows {
      for j in 0..other.columns {
        let entry = (0..self.columns).fold(zero.clone(), |acc, k| acc.add(&self.get(i, k).mul(other.get(k, j))));
        entries.push(entry);
      }
    }
    Matrix { rows: self.rows, columns: other.columns, entries }
  }

  pub fn sum(&self, other: &Matrix<S>) -> Matrix<S> {
    self.pointwise(other, |a, b| a.add(b))
  }

  pub fn difference(&self, other: &Matrix<S>) -> Matrix<S> {
    self.pointwise(other, |a, b| a.sub(b))
  }

  /// `s·self`.
  pub fn scaled(&self, s: &S) -> Matrix<S> {
    Matrix {
      rows   : self.rows,
      columns: self.columns,
      entries: self.entries.iter().map(|e| s.mul(e)).collect()
    }
  }

  /// Converts every entry. The map must be a ring conversion for the result to mean anything.
  pub fn map<T: Scalar>(&self, f: impl Fn(&S) -> T) -> Matrix<T> {
    Matrix {
      rows   : self.rows,
      columns: self.columns,
      entries: self.entries.iter().map(f).collect()
    }
  }

  fn pointwise(&self, other: &Matrix<S>, f: impl Fn(&S, &S) -> S) -> Matrix<S> {
    assert!(self.rows == other.rows && self.columns == other.columns,
      "pointwise operation on {}x{} and {}x{} matrices", self.rows, self.columns, other.rows, other.columns);
    Matrix {
      rows   : self.rows,
      columns: self.columns,
      entries: self.entries.iter().zip(other.entries.iter()).map(|(a, b)| f(a, b)).collect()
    }
  }
}

impl<S: Scalar> Display for Matrix<S> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let rows = (0..self.rows).map(|i| {
      bracketed(self.entries[i * self.columns..(i + 1) * self.columns].iter().map(|e| e.to_element()))
    });
    write!(f, "{}", bracketed(rows))
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn products() {
    let a = Matrix::from_rows(vec![vec![1i64, 2], vec![3, 4]]).unwrap();
    let b = Matrix::from_rows(vec![vec![0i64, 1], vec![1, 0]]).unwrap();
    assert_eq!(a.product(&b), Matrix::from_rows(vec![vec![2i64, 1], vec![4, 3]]).unwrap());
    assert_eq!(a.apply(&[1, 1]), vec![3, 7]);
    assert_eq!(a.sum(&b).difference(&b), a);
    assert_eq!(a.scaled(&2), Matrix::from_rows(vec![vec![2i64, 4], vec![6, 8]]).unwrap());
    assert_eq!(format!("{}", a), "[[1, 2], [3, 4]]");
  }

  #[test]
  fn identity_and_shape_checks() {
    let id = Matrix::identity(3, &5i64);
    assert!(id.is_identity());
    assert!(!Matrix::scalar(2i64).is_identity());
    assert!(Matrix::new(2, 2, vec![1i64, 2, 3]).is_none());
    assert!(Matrix::<i64>::from_rows(vec![vec![1, 2], vec![3]]).is_none());
    assert!(Matrix::<i64>::new(0, 0, vec![]).is_none());
  }
}
