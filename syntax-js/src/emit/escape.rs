use super::QuoteStyle;

/// Writes `value` as a string literal delimited by `quote`, escaping characters that would end the literal or
/// change its meaning. Non-ASCII characters are kept as UTF-8 apart from U+2028/U+2029.
pub fn emit_string_literal(out: &mut String, value: &str, quote: QuoteStyle) {
  let delim = quote.char();
  out.push(delim);
  let mut chars = value.chars().peekable();
  while let Some(ch) = chars.next() {
    match ch {
      '\\' => out.push_str("\\\\"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      '\0' => {
        let next_is_digit = chars.peek().is_some_and(|c| c.is_ascii_digit());
        out.push_str(if next_is_digit { "\\x00" } else { "\\0" });
      }
      '\u{2028}' => out.push_str("\\u2028"),
      '\u{2029}' => out.push_str("\\u2029"),
      c if c == delim => {
        out.push('\\');
        out.push(c);
      }
      c if c < '\u{20}' => out.push_str(&format!("\\x{:02X}", c as u32)),
      c => out.push(c),
    }
  }
  out.push(delim);
}

#[cfg(test)]
mod tests {
  use super::emit_string_literal;
  use crate::emit::QuoteStyle;

  fn lit(value: &str, quote: QuoteStyle) -> String {
    let mut out = String::new();
    emit_string_literal(&mut out, value, quote);
    out
  }

  #[test]
  fn only_the_delimiter_is_escaped() {
    assert_eq!(lit("it's \"x\"", QuoteStyle::Single), r#"'it\'s "x"'"#);
    assert_eq!(lit("it's \"x\"", QuoteStyle::Double), r#""it's \"x\"""#);
  }

  #[test]
  fn control_characters() {
    assert_eq!(lit("a\nb\\\u{1}", QuoteStyle::Single), r"'a\nb\\\x01'");
    assert_eq!(lit("\u{0}1", QuoteStyle::Single), r"'\x001'");
    assert_eq!(lit("é", QuoteStyle::Double), "\"é\"");
  }
}
