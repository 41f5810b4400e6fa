//! Source-preserving printer.
//!
//! Parsed nodes are reproduced by copying their original text and splicing in the printed form of their
//! children, so untouched code comes out byte for byte. Identifiers always print their current name. Nodes
//! created by a rewrite are printed canonically. Statement lists, declarator lists and object patterns that had
//! items inserted or removed reuse the original text between surviving items, and inserted statements take the
//! layout of their neighbours.
use crate::ast::stx::ClassOrObjKey;
use crate::ast::stx::ImportNames;
use crate::ast::stx::Syntax;
use crate::ast::Ast;
use crate::ast::NodeId;
use crate::loc::Loc;
use crate::operator::OperatorName;
use serde::Deserialize;
use serde::Serialize;
use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::str::FromStr;

mod escape;
#[cfg(test)]
mod tests;

pub use escape::emit_string_literal;

/// Delimiter for string literals in printed nodes. Copied source keeps its own quotes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
  #[default]
  Single,
  Double,
}

impl QuoteStyle {
  pub fn char(self) -> char {
    match self {
      QuoteStyle::Single => '\'',
      QuoteStyle::Double => '"',
    }
  }
}

impl FromStr for QuoteStyle {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "single" => Ok(QuoteStyle::Single),
      "double" => Ok(QuoteStyle::Double),
      _ => Err(format!("unknown quote style `{}`", s)),
    }
  }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitOptions {
  pub quote: QuoteStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitErrorKind {
  /// A synthesized node of a kind the canonical printer does not handle.
  Unsupported(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitError {
  pub kind: EmitErrorKind,
  pub loc: Option<Loc>,
}

impl EmitError {
  fn unsupported(message: &'static str, loc: Loc) -> EmitError {
    EmitError {
      kind: EmitErrorKind::Unsupported(message),
      loc: Some(loc),
    }
  }
}

impl Display for EmitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.kind {
      EmitErrorKind::Unsupported(what) => write!(f, "cannot print synthesized {}", what)?,
    };
    if let Some(loc) = self.loc {
      write!(f, " [{}:{}]", loc.0, loc.1)?;
    };
    Ok(())
  }
}

impl Error for EmitError {}

pub type EmitResult<T = ()> = Result<T, EmitError>;

/// Prints the whole tree.
pub fn emit(ast: &Ast, options: EmitOptions) -> EmitResult<String> {
  let mut em = Emitter {
    ast,
    opts: options,
    out: String::with_capacity(ast.source().len() + 64),
  };
  em.node(ast.root())?;
  Ok(em.out)
}

struct Emitter<'a> {
  ast: &'a Ast,
  opts: EmitOptions,
  out: String,
}

/// Whether a run of source between two statements contains an empty line.
fn has_blank_line(gap: &str) -> bool {
  let lines: Vec<&str> = gap.split('\n').collect();
  lines.len() > 2
    && lines[1..lines.len() - 1]
      .iter()
      .any(|l| l.trim().is_empty())
}

/// Joins two surviving items whose original neighbours in between were removed. `after` followed the first
/// item and `before` preceded the second; the first keeps whatever trails it on its own line.
fn rejoin(after: &str, before: &str) -> String {
  let Some(nl) = before.find('\n') else {
    return after.to_string();
  };
  let same_line = after.find('\n').map_or(after, |i| &after[..i]);
  // Cutting inside a block comment would leave it open.
  if same_line.rfind("/*") > same_line.rfind("*/") {
    return after.to_string();
  };
  format!("{}{}", same_line.trim_end(), &before[nl..])
}

/// Whitespace to put before an inserted statement, modelled on the gap between two original statements.
fn layout_like(gap: &str) -> String {
  let Some(last_nl) = gap.rfind('\n') else {
    return if gap.trim().is_empty() {
      gap.to_string()
    } else {
      " ".to_string()
    };
  };
  let indent = &gap[last_nl + 1..];
  let indent = if indent.trim().is_empty() { indent } else { "" };
  let newlines = if has_blank_line(gap) { "\n\n" } else { "\n" };
  format!("{}{}", newlines, indent)
}

impl<'a> Emitter<'a> {
  fn copy(&mut self, start: usize, end: usize) {
    if start < end {
      self.out.push_str(&self.ast.source()[start..end]);
    }
  }

  fn node(&mut self, id: NodeId) -> EmitResult {
    let ast = self.ast;
    let node = ast.node(id);
    if let Some(name) = node.stx.ident_name() {
      self.out.push_str(name);
      return Ok(());
    };
    if node.synthetic {
      return self.canonical(id);
    };
    if node.dirty {
      return self.dirty_list(id);
    };
    let children = node.stx.children();
    self.splice(&children, node.loc.0, node.loc.1)
  }

  /// Copies `start..end` from the source, replacing each child's range with its printed form.
  fn splice(&mut self, children: &[NodeId], start: usize, end: usize) -> EmitResult {
    let mut cursor = start;
    for &c in children {
      let loc = self.ast.loc(c);
      self.copy(cursor, loc.0);
      self.node(c)?;
      cursor = cursor.max(loc.1);
    }
    self.copy(cursor, end);
    Ok(())
  }

  fn gap_after(&self, original: &[NodeId], i: usize) -> &'a str {
    let ast = self.ast;
    let start = ast.loc(original[i]).1;
    let end = ast.loc(original[i + 1]).0;
    ast.source().get(start..end).unwrap_or("")
  }

  fn separator(&self, original: &[NodeId], current: &[NodeId], k: usize) -> String {
    let position = |n: NodeId| original.iter().position(|&o| o == n);
    if let Some(j) = position(current[k]).filter(|&j| j > 0) {
      return match position(current[k - 1]) {
        Some(i) if i + 1 < j => rejoin(self.gap_after(original, i), self.gap_after(original, j - 1)),
        _ => self.gap_after(original, j - 1).to_string(),
      };
    };
    let anchor = current[..k]
      .iter()
      .rev()
      .find_map(|n| original.iter().position(|o| o == n));
    match anchor {
      Some(j) if j + 1 < original.len() => layout_like(self.gap_after(original, j)),
      Some(j) if j > 0 => layout_like(self.gap_after(original, j - 1)),
      _ => "\n".to_string(),
    }
  }

  /// Prints a node whose item list changed: text around the list is copied, and surviving items are
  /// joined by the text that separated them originally.
  fn dirty_list(&mut self, id: NodeId) -> EmitResult {
    let ast = self.ast;
    let loc = ast.loc(id);
    let Some(current) = ast.stx(id).item_list() else {
      return self.canonical(id);
    };
    let original = match ast.original_list(id) {
      Some(original) if !original.is_empty() => original,
      _ => return self.canonical(id),
    };
    let first = ast.loc(original[0]).0;
    let last = ast.loc(original[original.len() - 1]).1;
    // Children outside the list, like a `case` test or an object pattern's rest element.
    let (head, tail): (Vec<NodeId>, Vec<NodeId>) = ast
      .children(id)
      .into_iter()
      .filter(|c| !current.contains(c))
      .partition(|&c| ast.loc(c).1 <= first);
    self.splice(&head, loc.0, first)?;
    for (k, &item) in current.iter().enumerate() {
      if k > 0 {
        let sep = self.separator(original, current, k);
        self.out.push_str(&sep);
      };
      self.node(item)?;
    }
    self.splice(&tail, last, loc.1)
  }

  fn list(&mut self, items: &[NodeId], sep: &str) -> EmitResult {
    for (i, &item) in items.iter().enumerate() {
      if i > 0 {
        self.out.push_str(sep);
      };
      self.node(item)?;
    }
    Ok(())
  }

  fn key(&mut self, key: &ClassOrObjKey) -> EmitResult {
    match key {
      ClassOrObjKey::Direct(name) => self.out.push_str(name),
      ClassOrObjKey::Computed(expr) => {
        self.out.push('[');
        self.node(*expr)?;
        self.out.push(']');
      }
    };
    Ok(())
  }

  fn str_lit(&mut self, value: &str) {
    emit_string_literal(&mut self.out, value, self.opts.quote);
  }

  // Reparsed declarations only get a semicolon back if they had one.
  fn ends_with_semicolon(&self, id: NodeId) -> bool {
    let node = self.ast.node(id);
    node.synthetic || self.ast.text(node.loc).ends_with(';')
  }

  #[rustfmt::skip]
  fn canonical(&mut self, id: NodeId) -> EmitResult {
    let ast = self.ast;
    match ast.stx(id) {
      Syntax::IdExpr { name } | Syntax::IdPat { name } | Syntax::ClassOrFuncName { name } => {
        self.out.push_str(name);
      }
      Syntax::LitStrExpr { value } => self.str_lit(value),
      Syntax::LitNullExpr => self.out.push_str("null"),
      Syntax::ThisExpr => self.out.push_str("this"),
      Syntax::TopLevel { body } => self.list(body, "\n")?,
      Syntax::BlockStmt { body } => {
        self.out.push_str("{\n");
        self.list(body, "\n")?;
        self.out.push_str("\n}");
      }
      Syntax::ExprStmt { expr } => {
        self.node(*expr)?;
        self.out.push(';');
      }
      Syntax::VarDecl { export, mode, declarators } => {
        if *export {
          self.out.push_str("export ");
        };
        self.out.push_str(mode.keyword());
        self.out.push(' ');
        self.list(declarators, ", ")?;
        if self.ends_with_semicolon(id) {
          self.out.push(';');
        };
      }
      Syntax::VarDeclarator { pattern, initializer } => {
        self.node(*pattern)?;
        if let Some(init) = initializer {
          self.out.push_str(" = ");
          self.node(*init)?;
        };
      }
      Syntax::ObjPat { properties, rest } => {
        self.out.push('{');
        self.list(properties, ", ")?;
        if let Some(rest) = rest {
          if !properties.is_empty() {
            self.out.push_str(", ");
          };
          self.out.push_str("...");
          self.node(*rest)?;
        };
        self.out.push('}');
      }
      Syntax::ObjPatProp { key, target, shorthand, default_value } => {
        if !*shorthand {
          self.key(key)?;
          self.out.push_str(": ");
        };
        self.node(*target)?;
        if let Some(default_value) = default_value {
          self.out.push_str(" = ");
          self.node(*default_value)?;
        };
      }
      Syntax::BinaryExpr { operator: OperatorName::Assignment, left, right } => {
        self.node(*left)?;
        self.out.push_str(" = ");
        self.node(*right)?;
      }
      Syntax::CallExpr { optional_chaining, callee, arguments } => {
        self.node(*callee)?;
        if *optional_chaining {
          self.out.push_str("?.");
        };
        self.out.push('(');
        self.list(arguments, ", ")?;
        self.out.push(')');
      }
      Syntax::CallArg { spread, value } => {
        if *spread {
          self.out.push_str("...");
        };
        self.node(*value)?;
      }
      Syntax::MemberExpr { optional_chaining, left, right } => {
        self.node(*left)?;
        self.out.push_str(if *optional_chaining { "?." } else { "." });
        self.out.push_str(right);
      }
      Syntax::ImportStmt { default, names, module } => {
        self.out.push_str("import ");
        if let Some(default) = default {
          self.node(*default)?;
          if names.is_some() {
            self.out.push_str(", ");
          };
        };
        match names {
          Some(ImportNames::All(alias)) => {
            self.out.push_str("* as ");
            self.node(*alias)?;
          }
          Some(ImportNames::Specific(names)) => {
            self.out.push('{');
            self.list(names, ", ")?;
            self.out.push('}');
          }
          None => {}
        };
        if default.is_some() || names.is_some() {
          self.out.push_str(" from ");
        };
        self.str_lit(module);
        self.out.push(';');
      }
      Syntax::ImportName { importable, alias } => {
        if ast.stx(*alias).ident_name() != Some(importable.as_str()) {
          self.out.push_str(importable);
          self.out.push_str(" as ");
        };
        self.node(*alias)?;
      }
      _ => return Err(EmitError::unsupported("node", ast.loc(id))),
    };
    Ok(())
  }
}
