use crate::ast::stx::ArrElem;
use crate::ast::stx::LitTemplatePart;
use crate::ast::stx::Syntax;
use crate::ast::NodeId;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::loc::Loc;
use crate::parse::Parser;
use crate::token::TT;

/// Decodes one escape sequence, given the text after the backslash. Returns the number of bytes consumed
/// and the produced character, which is None for line continuations.
fn decode_escape_sequence(raw: &str) -> Option<(usize, Option<char>)> {
  let first = raw.chars().next()?;
  match first {
    '\r' => {
      let mut consumed = first.len_utf8();
      if raw[consumed..].starts_with('\n') {
        consumed += 1;
      }
      Some((consumed, None))
    }
    '\n' | '\u{2028}' | '\u{2029}' => Some((first.len_utf8(), None)),
    'b' => Some((1, Some('\x08'))),
    'f' => Some((1, Some('\x0c'))),
    'n' => Some((1, Some('\n'))),
    'r' => Some((1, Some('\r'))),
    't' => Some((1, Some('\t'))),
    'v' => Some((1, Some('\x0b'))),
    '0'..='7' => {
      let mut consumed = 1;
      let mut value = first.to_digit(8)?;
      for ch in raw[consumed..].chars().take(2) {
        match ch.to_digit(8) {
          Some(d) => {
            consumed += 1;
            value = (value << 3) + d;
          }
          None => break,
        }
      }
      Some((consumed, Some(char::from_u32(value)?)))
    }
    'x' => {
      let hex = raw.get(1..3)?;
      let value = u32::from_str_radix(hex, 16).ok()?;
      Some((3, Some(char::from_u32(value)?)))
    }
    'u' => {
      let after_u = &raw[1..];
      if let Some(braced) = after_u.strip_prefix('{') {
        let end = braced.find('}')?;
        let value = u32::from_str_radix(&braced[..end], 16).ok()?;
        if value > 0x10FFFF {
          return None;
        }
        // Lone surrogates cannot be represented in a Rust string.
        Some((end + 3, Some(char::from_u32(value).unwrap_or('\u{FFFD}'))))
      } else {
        let value = u32::from_str_radix(after_u.get(..4)?, 16).ok()?;
        if (0xD800..=0xDBFF).contains(&value) {
          // Combine a surrogate pair like `\uD83D\uDE00`.
          if let Some(low) = after_u
            .get(4..10)
            .and_then(|s| s.strip_prefix("\\u"))
            .and_then(|s| u32::from_str_radix(s, 16).ok())
            .filter(|low| (0xDC00..=0xDFFF).contains(low))
          {
            let combined = 0x10000 + ((value - 0xD800) << 10) + (low - 0xDC00);
            if let Some(c) = char::from_u32(combined) {
              return Some((11, Some(c)));
            }
          }
        }
        Some((5, Some(char::from_u32(value).unwrap_or('\u{FFFD}'))))
      }
    }
    c => Some((c.len_utf8(), Some(c))),
  }
}

fn decode_literal(raw: &str) -> Option<String> {
  let mut norm = String::with_capacity(raw.len());
  let mut rest = raw;
  while let Some(pos) = rest.find('\\') {
    norm.push_str(&rest[..pos]);
    let (consumed, addition) = decode_escape_sequence(&rest[pos + 1..])?;
    norm.extend(addition);
    rest = &rest[pos + 1 + consumed..];
  }
  norm.push_str(rest);
  Some(norm)
}

/// The value of a quoted string literal, with quotes removed and escapes decoded.
pub fn normalise_literal_string(raw: &str) -> Option<String> {
  if raw.len() < 2 {
    return None;
  }
  decode_literal(&raw[1..raw.len() - 1])
}

/// The text of a template part without its trailing `${` or backtick. Only the first part starts with a
/// backtick; later parts start after the `}` closing a substitution.
fn template_content(raw: &str, is_first: bool, is_end: bool) -> Option<&str> {
  let raw = if is_first { raw.strip_prefix('`')? } else { raw };
  if is_end {
    raw.strip_suffix('`')
  } else {
    raw.strip_suffix("${")
  }
}

impl<'a> Parser<'a> {
  pub fn lit_arr(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::BracketOpen)?;
      let mut elements = Vec::<ArrElem>::new();
      loop {
        if p.consume_if(TT::Comma).is_match() {
          elements.push(ArrElem::Empty);
          continue;
        };
        if p.peek().typ == TT::BracketClose {
          break;
        };
        let rest = p.consume_if(TT::DotDotDot).is_match();
        let value = p.expr([TT::Comma, TT::BracketClose])?;
        elements.push(if rest {
          ArrElem::Rest(value)
        } else {
          ArrElem::Single(value)
        });
        if p.peek().typ == TT::BracketClose {
          break;
        };
        p.require(TT::Comma)?;
      }
      p.require(TT::BracketClose)?;
      Ok(Syntax::LitArrExpr { elements })
    })
  }

  pub fn lit_bigint(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      let t = p.require(TT::LiteralBigInt)?;
      Ok(Syntax::LitBigIntExpr {
        value: p.string(t.loc),
      })
    })
  }

  pub fn lit_bool(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      let t = p.consume();
      match t.typ {
        TT::LiteralTrue => Ok(Syntax::LitBoolExpr { value: true }),
        TT::LiteralFalse => Ok(Syntax::LitBoolExpr { value: false }),
        _ => Err(t.error(SyntaxErrorType::ExpectedSyntax("boolean literal"))),
      }
    })
  }

  pub fn lit_num(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      let t = p.require(TT::LiteralNumber)?;
      Ok(Syntax::LitNumExpr {
        value: p.string(t.loc),
      })
    })
  }

  pub fn lit_regex(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      let t = p.consume_with_mode(LexMode::SlashIsRegex);
      match t.typ {
        TT::LiteralRegex => Ok(Syntax::LitRegexExpr {
          value: p.string(t.loc),
        }),
        TT::Invalid => Err(t.error(SyntaxErrorType::LineTerminatorInRegex)),
        _ => Err(t.error(SyntaxErrorType::RequiredTokenNotFound(TT::LiteralRegex))),
      }
    })
  }

  /// Consumes a string literal token and returns its location and decoded value.
  pub fn lit_str_val(&mut self) -> SyntaxResult<(Loc, String)> {
    let t = self.consume();
    match t.typ {
      TT::LiteralString => {}
      TT::Invalid if self.str(t.loc).starts_with(|c: char| c == '"' || c == '\'') => {
        return Err(t.error(SyntaxErrorType::LineTerminatorInString))
      }
      TT::EOF => return Err(t.error(SyntaxErrorType::UnexpectedEnd)),
      _ => return Err(t.error(SyntaxErrorType::RequiredTokenNotFound(TT::LiteralString))),
    };
    let value = normalise_literal_string(self.str(t.loc))
      .ok_or_else(|| t.error(SyntaxErrorType::InvalidCharacterEscape))?;
    Ok((t.loc, value))
  }

  pub fn lit_str(&mut self) -> SyntaxResult<NodeId> {
    let (loc, value) = self.lit_str_val()?;
    Ok(self.node(loc, Syntax::LitStrExpr { value }))
  }

  pub fn lit_template(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      let parts = p.lit_template_parts()?;
      Ok(Syntax::LitTemplateExpr { parts })
    })
  }

  // NOTE: The next token must definitely be LiteralTemplatePartString{,End}.
  // String parts keep their raw text.
  pub fn lit_template_parts(&mut self) -> SyntaxResult<Vec<LitTemplatePart>> {
    let t = self.consume();
    let mut is_end = match t.typ {
      TT::LiteralTemplatePartString => false,
      TT::LiteralTemplatePartStringEnd => true,
      TT::Invalid | TT::EOF => return Err(t.error(SyntaxErrorType::UnexpectedEnd)),
      _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("template string part"))),
    };
    let mut parts = Vec::new();
    let first = template_content(self.str(t.loc), true, is_end)
      .ok_or_else(|| t.error(SyntaxErrorType::UnexpectedEnd))?;
    parts.push(LitTemplatePart::String(first.to_string()));
    while !is_end {
      let substitution = self.expr([TT::BraceClose])?;
      parts.push(LitTemplatePart::Substitution(substitution));
      self.require(TT::BraceClose)?;
      let string = self.consume_with_mode(LexMode::TemplateStrContinue);
      is_end = match string.typ {
        TT::LiteralTemplatePartString => false,
        TT::LiteralTemplatePartStringEnd => true,
        _ => return Err(string.error(SyntaxErrorType::UnexpectedEnd)),
      };
      let content = template_content(self.str(string.loc), false, is_end)
        .ok_or_else(|| string.error(SyntaxErrorType::UnexpectedEnd))?;
      parts.push(LitTemplatePart::String(content.to_string()));
    }
    Ok(parts)
  }
}

#[cfg(test)]
mod tests {
  use super::normalise_literal_string;

  #[test]
  fn test_normalise_literal_string() {
    assert_eq!(normalise_literal_string("'react'").as_deref(), Some("react"));
    assert_eq!(
      normalise_literal_string(r#""a\"b\n\x41B\u{43}""#).as_deref(),
      Some("a\"b\nABC")
    );
    assert_eq!(normalise_literal_string("'a\\\nb'").as_deref(), Some("ab"));
    assert_eq!(
      normalise_literal_string(r"'\uD83D\uDE00'").as_deref(),
      Some("\u{1F600}")
    );
    assert_eq!(normalise_literal_string(r"'\x4'"), None);
  }
}
