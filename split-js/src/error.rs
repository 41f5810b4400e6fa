use crate::config::ConfigError;
use std::fmt;
use std::fmt::Display;
use syntax_js::ast::Ast;
use syntax_js::emit::EmitError;
use syntax_js::error::SyntaxError;
use syntax_js::loc::LineIndex;
use syntax_js::loc::Loc;
use syntax_js::loc::Position;
use thiserror::Error;

fn while_destructuring(destructuring: &bool) -> &'static str {
  if *destructuring {
    " while destructuring"
  } else {
    ""
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewriteErrorKind {
  #[error("Multiple declarations of {module}")]
  MultipleDeclarations { module: String },
  #[error("Unexpected destructuring in require of {module}")]
  UnsupportedDestructuring { module: String },
  #[error("Unexpected initialization of {module}")]
  UnexpectedInitialization { module: String },
  #[error("Unexpected number of bindings for {name}: {count}")]
  UnexpectedBindingCount { name: String, count: usize },
  #[error("Unknown property {alias}.{member}{}", while_destructuring(.destructuring))]
  UnknownMember {
    alias: String,
    member: String,
    destructuring: bool,
  },
  #[error("{name} is already defined in a different scope than {core}")]
  ScopeConflict { name: String, core: String },
  #[error("unimplemented {construct}")]
  UnsupportedConstruct { construct: &'static str },
  #[error("Unexpected assignment to {module}")]
  UnexpectedAssignment { module: String },
}

/// A rewrite failure at a node of the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteError {
  pub kind: RewriteErrorKind,
  pub loc: Loc,
  pub position: Position,
}

impl RewriteError {
  pub fn new(kind: RewriteErrorKind, ast: &Ast, loc: Loc) -> RewriteError {
    let source = ast.source();
    let position = LineIndex::new(source).position(source, loc.0);
    RewriteError {
      kind,
      loc,
      position,
    }
  }
}

impl Display for RewriteError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "At {}:{}: {}",
      self.position.line, self.position.column, self.kind
    )
  }
}

impl std::error::Error for RewriteError {}

pub type RewriteResult<T> = Result<T, RewriteError>;

/// Why a whole file could not be rewritten.
#[derive(Debug, Error)]
pub enum SplitError {
  #[error("{0}")]
  Syntax(#[from] SyntaxError),
  #[error("{0}")]
  Rewrite(#[from] RewriteError),
  #[error("{0}")]
  Emit(#[from] EmitError),
  #[error("{0}")]
  Config(#[from] ConfigError),
}

impl SplitError {
  /// `At <line>:<column>: <message>` for located errors, the plain message otherwise.
  pub fn describe(&self, source: &str) -> String {
    let at = |loc: Loc, message: String| {
      let pos = LineIndex::new(source).position(source, loc.0);
      format!("At {}:{}: {}", pos.line, pos.column, message)
    };
    match self {
      SplitError::Syntax(err) => at(err.loc, err.message()),
      SplitError::Rewrite(err) => err.to_string(),
      SplitError::Emit(EmitError {
        loc: Some(loc), ..
      }) => at(*loc, self.to_string()),
      SplitError::Emit(_) | SplitError::Config(_) => self.to_string(),
    }
  }
}
