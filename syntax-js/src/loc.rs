use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::token::TT;
use serde::Serialize;
use std::cmp::max;
use std::cmp::min;
use std::ops::Add;
use std::ops::AddAssign;

/// A location within the current source file expressed as UTF-8 byte offsets.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  /// An empty range at `offset`. Used for nodes inserted into the tree that replace nothing.
  pub fn at(offset: usize) -> Loc {
    Loc(offset, offset)
  }

  pub fn error(self, typ: SyntaxErrorType, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError::new(typ, self, actual_token)
  }

  pub fn is_empty(&self) -> bool {
    self.0 >= self.1
  }

  pub fn len(&self) -> usize {
    self.1 - self.0
  }

  pub fn extend(&mut self, other: Loc) {
    self.0 = min(self.0, other.0);
    self.1 = max(self.1, other.1);
  }

  pub fn contains(&self, other: Loc) -> bool {
    self.0 <= other.0 && other.1 <= self.1
  }
}

impl Add for Loc {
  type Output = Loc;

  fn add(self, rhs: Self) -> Self::Output {
    let mut new = self;
    new.extend(rhs);
    new
  }
}

impl AddAssign for Loc {
  fn add_assign(&mut self, rhs: Self) {
    self.extend(rhs);
  }
}

/// 1-based line and 0-based column of a byte offset.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct Position {
  pub line: usize,
  pub column: usize,
}

/// Offsets of every line start in a source file, for turning byte offsets into positions.
pub struct LineIndex {
  line_starts: Vec<usize>,
}

impl LineIndex {
  pub fn new(source: &str) -> LineIndex {
    let mut line_starts = vec![0];
    line_starts.extend(memchr::memchr_iter(b'\n', source.as_bytes()).map(|i| i + 1));
    LineIndex { line_starts }
  }

  /// Columns count characters, not bytes.
  pub fn position(&self, source: &str, offset: usize) -> Position {
    let line = match self.line_starts.binary_search(&offset) {
      Ok(i) => i,
      Err(i) => i - 1,
    };
    let start = self.line_starts[line];
    let end = min(offset, source.len());
    let column = source
      .get(start..end)
      .map(|s| s.chars().count())
      .unwrap_or(end - start);
    Position {
      line: line + 1,
      column,
    }
  }

  pub fn line_count(&self) -> usize {
    self.line_starts.len()
  }
}

#[cfg(test)]
mod tests {
  use super::LineIndex;
  use super::Loc;
  use super::Position;

  #[test]
  fn test_positions_are_one_based_lines_zero_based_columns() {
    let src = "ab\ncde\n\nf";
    let idx = LineIndex::new(src);
    assert_eq!(idx.line_count(), 4);
    assert_eq!(idx.position(src, 0), Position { line: 1, column: 0 });
    assert_eq!(idx.position(src, 4), Position { line: 2, column: 1 });
    assert_eq!(idx.position(src, 7), Position { line: 3, column: 0 });
    assert_eq!(idx.position(src, 8), Position { line: 4, column: 0 });
  }

  #[test]
  fn test_columns_count_chars() {
    let src = "é = 1;";
    let idx = LineIndex::new(src);
    assert_eq!(idx.position(src, 3), Position { line: 1, column: 2 });
  }

  #[test]
  fn test_loc_add() {
    assert_eq!(Loc(4, 6) + Loc(1, 3), Loc(1, 6));
  }
}
