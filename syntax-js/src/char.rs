//! Character classes for the lexer. Non-ASCII characters other than whitespace are taken to be
//! identifier characters, so identifiers need no Unicode tables.

pub fn is_line_terminator(c: char) -> bool {
  matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

pub fn is_whitespace(c: char) -> bool {
  match c {
    '\t' | '\x0b' | '\x0c' | ' ' | '\u{a0}' | '\u{feff}' => true,
    c if c.is_ascii() => false,
    c => c.is_whitespace() && !is_line_terminator(c),
  }
}

pub fn is_id_start(c: char) -> bool {
  match c {
    'a'..='z' | 'A'..='Z' | '$' | '_' => true,
    c if c.is_ascii() => false,
    c => !c.is_whitespace(),
  }
}

pub fn is_id_continue(c: char) -> bool {
  c.is_ascii_digit() || is_id_start(c)
}

/// JSX tag and attribute names may contain hyphens, e.g. `data-id`.
pub fn is_jsx_name_continue(c: char) -> bool {
  c == '-' || is_id_continue(c)
}

/// A digit of the given radix, or a `_` numeric separator.
pub fn is_digit_in(c: char, radix: u32) -> bool {
  c == '_' || c.is_digit(radix)
}
