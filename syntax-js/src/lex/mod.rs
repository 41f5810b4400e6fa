use crate::char::is_digit_in;
use crate::char::is_id_continue;
use crate::char::is_id_start;
use crate::char::is_jsx_name_continue;
use crate::char::is_line_terminator;
use crate::char::is_whitespace;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;
use aho_corasick::AhoCorasick;
use aho_corasick::AhoCorasickBuilder;
use aho_corasick::AhoCorasickKind;
use aho_corasick::Anchored;
use aho_corasick::Input;
use aho_corasick::MatchKind;
use aho_corasick::StartKind;
use core::ops::Index;
use memchr::memchr2;
use memchr::memchr3;
use memchr::memmem;
use once_cell::sync::Lazy;


/// How to read input that is ambiguous without knowing what the parser expects.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum LexMode {
  /// Inside `<...>`, where names may contain `-`.
  JsxTag,
  /// Between tags. Everything up to `{` or `<` is text.
  JsxTextContent,
  /// An expression may start here, so `/` opens a regex.
  SlashIsRegex,
  Standard,
  /// Right after the `}` closing a template substitution.
  TemplateStrContinue,
}

struct Punctuators {
  automaton: AhoCorasick,
  types: Vec<TT>,
}

// Leftmost-longest, so `>>>=` wins over `>`.
static PUNCTUATORS: Lazy<Punctuators> = Lazy::new(|| {
  let automaton = AhoCorasickBuilder::new()
    .start_kind(StartKind::Anchored)
    .kind(Some(AhoCorasickKind::DFA))
    .match_kind(MatchKind::LeftmostLongest)
    .build(TT::PUNCTUATORS.iter().map(|&(_, text)| text))
    .expect("punctuator table is a valid pattern set");
  Punctuators {
    automaton,
    types: TT::PUNCTUATORS.iter().map(|&(typ, _)| typ).collect(),
  }
});

/// The current token cannot be lexed and becomes [`TT::Invalid`].
struct Unlexable;

type Lexed = Result<TT, Unlexable>;

pub struct Lexer<'a> {
  source: &'a str,
  next: usize,
}

impl<'a> Lexer<'a> {
  pub fn new(source: &'a str) -> Lexer<'a> {
    Lexer { source, next: 0 }
  }

  pub fn source_range(&self) -> Loc {
    Loc(0, self.source.len())
  }

  /// Moves the cursor, e.g. when the parser drops buffered tokens and relexes them in another mode.
  pub fn set_next(&mut self, next: usize) {
    self.next = next;
  }

  fn rest(&self) -> &'a str {
    &self.source[self.next..]
  }

  fn peek_char(&self) -> Option<char> {
    self.rest().chars().next()
  }

  fn bump(&mut self) -> Result<char, Unlexable> {
    let c = self.peek_char().ok_or(Unlexable)?;
    self.next += c.len_utf8();
    Ok(c)
  }

  fn eat(&mut self, c: char) -> bool {
    let matched = self.peek_char() == Some(c);
    if matched {
      self.next += c.len_utf8();
    };
    matched
  }

  fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
    let rest = self.rest();
    self.next += rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
  }

  /// Moves to an offset found in `rest()`, or to the end when there is none.
  fn advance_to(&mut self, found: Option<usize>) {
    self.next = found.map_or(self.source.len(), |pos| self.next + pos);
  }

  pub fn next_token(&mut self, mode: LexMode) -> Token {
    let at_end = self.next >= self.source.len();
    match mode {
      LexMode::JsxTextContent if !at_end => {
        return self.token(false, |lexer| {
          lexer.advance_to(memchr2(b'{', b'<', lexer.rest().as_bytes()));
          Ok(TT::JsxTextContent)
        });
      }
      // The parser has already consumed the `}`.
      LexMode::TemplateStrContinue if !at_end => return self.token(false, Self::template_part),
      _ => {}
    };
    let preceded_by_line_terminator = self.skip_trivia();
    match self.peek_char() {
      None => Token {
        loc: Loc::at(self.next),
        preceded_by_line_terminator,
        typ: TT::EOF,
      },
      Some(c) => self.token(preceded_by_line_terminator, |lexer| {
        lexer.significant(c, mode)
      }),
    }
  }

  fn token(&mut self, preceded_by_line_terminator: bool, f: impl FnOnce(&mut Self) -> Lexed) -> Token {
    let start = self.next;
    let typ = f(self).unwrap_or(TT::Invalid);
    Token {
      loc: Loc(start, self.next),
      preceded_by_line_terminator,
      typ,
    }
  }

  /// Skips whitespace and comments, returning whether a line terminator was among them.
  fn skip_trivia(&mut self) -> bool {
    let mut newline = false;
    loop {
      let rest = self.rest();
      if rest.starts_with("//") {
        // The terminator itself is picked up by the next iteration.
        self.advance_to(memchr2(b'\n', b'\r', rest.as_bytes()));
      } else if let Some(body) = rest.strip_prefix("/*") {
        let end = memmem::find(body.as_bytes(), b"*/");
        let len = end.unwrap_or(body.len());
        newline |= body[..len].contains(is_line_terminator);
        self.next += 2 + len + end.map_or(0, |_| 2);
      } else {
        match rest.chars().next() {
          Some(c) if is_line_terminator(c) => {
            newline = true;
            self.next += c.len_utf8();
          }
          Some(c) if is_whitespace(c) => self.next += c.len_utf8(),
          _ => return newline,
        };
      };
    }
  }

  fn significant(&mut self, c: char, mode: LexMode) -> Lexed {
    match c {
      '"' | '\'' => self.string(c),
      '`' => {
        self.next += 1;
        self.template_part()
      }
      '#' => self.private_member(),
      '0'..='9' => self.number(),
      '.' if self.rest()[1..].starts_with(|d: char| d.is_ascii_digit()) => self.number(),
      '/' if mode == LexMode::SlashIsRegex => self.regex(),
      '\\' => self.word(mode),
      c if is_id_start(c) => self.word(mode),
      _ => self.punctuator(),
    }
  }

  fn punctuator(&mut self) -> Lexed {
    let input = Input::new(self.rest()).anchored(Anchored::Yes);
    let Some(m) = PUNCTUATORS.automaton.find(input) else {
      self.bump()?;
      return Err(Unlexable);
    };
    let typ = PUNCTUATORS.types[m.pattern().as_usize()];
    // `a?.5:b` is a conditional with a decimal, not optional chaining.
    if typ == TT::QuestionDot && self.rest()[2..].starts_with(|d: char| d.is_ascii_digit()) {
      self.next += 1;
      return Ok(TT::Question);
    };
    self.next += m.end();
    Ok(typ)
  }

  /// Identifiers, keywords, and literal words like `null`.
  fn word(&mut self, mode: LexMode) -> Lexed {
    let start = self.next;
    let continues: fn(char) -> bool = if mode == LexMode::JsxTag {
      is_jsx_name_continue
    } else {
      is_id_continue
    };
    loop {
      match self.peek_char() {
        Some('\\') => self.unicode_escape()?,
        Some(c) if continues(c) => self.next += c.len_utf8(),
        _ => break,
      };
    }
    Ok(TT::for_word(&self.source[start..self.next]))
  }

  /// `\uXXXX` or `\u{X...}` within an identifier.
  fn unicode_escape(&mut self) -> Result<(), Unlexable> {
    let (hex, len) = match self.rest().strip_prefix("\\u") {
      Some(braced) if braced.starts_with('{') => {
        let close = braced.find('}').ok_or(Unlexable)?;
        (&braced[1..close], close + 3)
      }
      Some(fixed) => (fixed.get(..4).ok_or(Unlexable)?, 6),
      None => return Err(Unlexable),
    };
    if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
      return Err(Unlexable);
    };
    self.next += len;
    Ok(())
  }

  fn number(&mut self) -> Lexed {
    let radix = match self.rest().as_bytes() {
      [b'0', b'b' | b'B', ..] => 2,
      [b'0', b'o' | b'O', ..] => 8,
      [b'0', b'x' | b'X', ..] => 16,
      _ => 10,
    };
    if radix != 10 {
      self.next += 2;
    };
    self.eat_while(|c| is_digit_in(c, radix));
    if self.eat('n') {
      return Ok(TT::LiteralBigInt);
    };
    if radix == 10 {
      if self.eat('.') {
        self.eat_while(|c| is_digit_in(c, 10));
      };
      if self.eat('e') || self.eat('E') {
        let _ = self.eat('+') || self.eat('-');
        self.eat_while(|c| is_digit_in(c, 10));
      };
    };
    Ok(TT::LiteralNumber)
  }

  fn private_member(&mut self) -> Lexed {
    // Include the `#`.
    self.next += 1;
    match self.peek_char() {
      Some(c) if is_id_start(c) => {
        self.eat_while(is_id_continue);
        Ok(TT::PrivateMember)
      }
      _ => Err(Unlexable),
    }
  }

  fn regex(&mut self) -> Lexed {
    self.next += 1;
    let mut in_class = false;
    loop {
      match self.bump()? {
        '\\' => {
          if is_line_terminator(self.bump()?) {
            return Err(Unlexable);
          };
        }
        c if is_line_terminator(c) => return Err(Unlexable),
        '[' => in_class = true,
        ']' => in_class = false,
        '/' if !in_class => break,
        _ => {}
      };
    }
    // Flags.
    self.eat_while(is_id_continue);
    Ok(TT::LiteralRegex)
  }

  /// A bare line terminator makes the string invalid, but lexing continues to the closing quote so
  /// the rest of the line is not misread as code.
  fn string(&mut self, quote: char) -> Lexed {
    self.next += 1;
    let mut valid = true;
    loop {
      self.advance_to(memchr3(quote as u8, b'\\', b'\n', self.rest().as_bytes()));
      match self.bump()? {
        '\\' => {
          // Line continuations included.
          if self.bump()? == '\r' {
            self.eat('\n');
          };
        }
        '\n' => valid = false,
        _ if valid => return Ok(TT::LiteralString),
        _ => return Err(Unlexable),
      };
    }
  }

  /// Template text up to and including the next `${` or the closing backtick.
  fn template_part(&mut self) -> Lexed {
    loop {
      self.advance_to(memchr3(b'`', b'\\', b'$', self.rest().as_bytes()));
      match self.bump()? {
        '\\' => {
          self.bump()?;
        }
        '`' => return Ok(TT::LiteralTemplatePartStringEnd),
        // A `$` not followed by `{` is text.
        _ => {
          if self.eat('{') {
            return Ok(TT::LiteralTemplatePartString);
          };
        }
      };
    }
  }
}

impl<'a> Index<Loc> for Lexer<'a> {
  type Output = str;

  fn index(&self, index: Loc) -> &Self::Output {
    &self.source[index.0..index.1]
  }
}
