use crate::loc::Loc;
use crate::token::TT;
use thiserror::Error;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Error)]
pub enum SyntaxErrorType {
  #[error("expected token not found")]
  ExpectedNotFound,
  #[error("expected {0}")]
  ExpectedSyntax(&'static str),
  #[error("invalid character escape")]
  InvalidCharacterEscape,
  #[error("invalid assignment target")]
  InvalidAssigmentTarget,
  #[error("JSX closing tag does not match opening tag")]
  JsxClosingTagMismatch,
  #[error("line terminator not allowed after arrow function parameters")]
  LineTerminatorAfterArrowFunctionParameters,
  #[error("line terminator not allowed after `throw`")]
  LineTerminatorAfterThrow,
  #[error("line terminator not allowed in regular expression")]
  LineTerminatorInRegex,
  #[error("line terminator not allowed in string literal")]
  LineTerminatorInString,
  #[error("expected token {0:?}")]
  RequiredTokenNotFound(TT),
  #[error("try statement requires a catch or finally block")]
  TryStatementHasNoCatchOrFinally,
  #[error("unexpected end of input")]
  UnexpectedEnd,
}

/// A syntax error at a byte range, along with the token found there, if any.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
#[error("{}", self.message())]
pub struct SyntaxError {
  pub typ: SyntaxErrorType,
  pub loc: Loc,
  pub actual_token: Option<TT>,
}

impl SyntaxError {
  pub fn new(typ: SyntaxErrorType, loc: Loc, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError {
      typ,
      loc,
      actual_token,
    }
  }

  /// The message without a position, e.g. `expected token Semicolon (found Identifier)`.
  pub fn message(&self) -> String {
    match (self.typ, self.actual_token) {
      (SyntaxErrorType::UnexpectedEnd, _) | (_, None) => self.typ.to_string(),
      (typ, Some(found)) => format!("{typ} (found {found:?})"),
    }
  }
}

pub type SyntaxResult<T> = Result<T, SyntaxError>;
