use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::loc::Loc;
use ahash::HashMap;
use once_cell::sync::Lazy;
use serde::Serialize;

macro_rules! keywords {
  ($($kw:ident $text:literal $contextual:literal,)*) => {
    /// Reserved and contextual words. Contextual ones can still name bindings.
    #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
    pub enum Kw {
      $($kw,)*
    }

    impl Kw {
      pub const ALL: &'static [Kw] = &[$(Kw::$kw,)*];

      pub fn text(self) -> &'static str {
        match self {
          $(Kw::$kw => $text,)*
        }
      }

      pub fn is_contextual(self) -> bool {
        match self {
          $(Kw::$kw => $contextual,)*
        }
      }
    }
  };
}

keywords! {
  As "as" true,
  Async "async" true,
  Await "await" false,
  Break "break" false,
  Case "case" false,
  Catch "catch" false,
  Class "class" false,
  Const "const" false,
  Continue "continue" false,
  Debugger "debugger" false,
  Default "default" false,
  Delete "delete" false,
  Do "do" false,
  Else "else" false,
  Enum "enum" false,
  Export "export" false,
  Extends "extends" false,
  Finally "finally" false,
  For "for" false,
  From "from" true,
  Function "function" false,
  Get "get" true,
  If "if" false,
  Import "import" false,
  In "in" false,
  Instanceof "instanceof" false,
  Let "let" true,
  New "new" false,
  Of "of" true,
  Return "return" false,
  Set "set" true,
  Static "static" true,
  Super "super" false,
  Switch "switch" false,
  This "this" false,
  Throw "throw" false,
  Try "try" false,
  Typeof "typeof" false,
  Var "var" false,
  Void "void" false,
  While "while" false,
  With "with" false,
  Yield "yield" false,
}

macro_rules! token_types {
  (
    punctuators { $($punct:ident $punct_text:literal,)* }
    other { $($other:ident,)* }
  ) => {
    #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
    pub enum TT {
      $($punct,)*
      $($other,)*
      Kw(Kw),
    }

    impl TT {
      /// Every fixed-text punctuator, for building the lexer's matcher.
      pub const PUNCTUATORS: &'static [(TT, &'static str)] = &[$((TT::$punct, $punct_text),)*];
    }
  };
}

token_types! {
  punctuators {
    Ampersand "&",
    AmpersandAmpersand "&&",
    AmpersandAmpersandEquals "&&=",
    AmpersandEquals "&=",
    Asterisk "*",
    AsteriskAsterisk "**",
    AsteriskAsteriskEquals "**=",
    AsteriskEquals "*=",
    Bar "|",
    BarBar "||",
    BarBarEquals "||=",
    BarEquals "|=",
    BraceClose "}",
    BraceOpen "{",
    BracketClose "]",
    BracketOpen "[",
    Caret "^",
    CaretEquals "^=",
    ChevronLeft "<",
    ChevronLeftChevronLeft "<<",
    ChevronLeftChevronLeftEquals "<<=",
    ChevronLeftEquals "<=",
    ChevronLeftSlash "</",
    ChevronRight ">",
    ChevronRightChevronRight ">>",
    ChevronRightChevronRightChevronRight ">>>",
    ChevronRightChevronRightChevronRightEquals ">>>=",
    ChevronRightChevronRightEquals ">>=",
    ChevronRightEquals ">=",
    Colon ":",
    Comma ",",
    Dot ".",
    DotDotDot "...",
    Equals "=",
    EqualsChevronRight "=>",
    EqualsEquals "==",
    EqualsEqualsEquals "===",
    Exclamation "!",
    ExclamationEquals "!=",
    ExclamationEqualsEquals "!==",
    Hyphen "-",
    HyphenEquals "-=",
    HyphenHyphen "--",
    ParenthesisClose ")",
    ParenthesisOpen "(",
    Percent "%",
    PercentEquals "%=",
    Plus "+",
    PlusEquals "+=",
    PlusPlus "++",
    Question "?",
    QuestionDot "?.",
    QuestionDotBracketOpen "?.[",
    QuestionDotParenthesisOpen "?.(",
    QuestionQuestion "??",
    QuestionQuestionEquals "??=",
    Semicolon ";",
    Slash "/",
    SlashEquals "/=",
    Tilde "~",
  }
  other {
    Identifier,
    PrivateMember,
    JsxTextContent,
    LiteralBigInt,
    LiteralFalse,
    LiteralNull,
    LiteralNumber,
    LiteralRegex,
    LiteralString,
    LiteralTemplatePartString,
    LiteralTemplatePartStringEnd,
    LiteralTrue,
    // End of input, so the parser never handles an Option.
    EOF,
    // Unlexable input. Peeking stays infallible and the parser rejects it on use.
    Invalid,
  }
}

static WORDS: Lazy<HashMap<&'static str, TT>> = Lazy::new(|| {
  Kw::ALL
    .iter()
    .map(|&kw| (kw.text(), TT::Kw(kw)))
    .chain([
      ("true", TT::LiteralTrue),
      ("false", TT::LiteralFalse),
      ("null", TT::LiteralNull),
    ])
    .collect()
});

impl TT {
  /// Classifies a complete word: a keyword, a literal word, or a plain identifier.
  pub fn for_word(word: &str) -> TT {
    WORDS.get(word).copied().unwrap_or(TT::Identifier)
  }

  /// Can name a binding.
  pub fn is_identifier_like(self) -> bool {
    match self {
      TT::Identifier => true,
      TT::Kw(kw) => kw.is_contextual(),
      _ => false,
    }
  }

  /// Any word, reserved or not. Property names and JSX names accept all of these.
  pub fn is_identifier_name(self) -> bool {
    matches!(
      self,
      TT::Identifier | TT::Kw(_) | TT::LiteralTrue | TT::LiteralFalse | TT::LiteralNull
    )
  }
}

#[derive(Clone, Debug)]
pub struct Token {
  pub loc: Loc,
  /// A line terminator, possibly inside a comment, sits between this token and the previous one.
  pub preceded_by_line_terminator: bool,
  pub typ: TT,
}

impl Token {
  pub fn error(&self, typ: SyntaxErrorType) -> SyntaxError {
    self.loc.error(typ, Some(self.typ))
  }
}
