use super::Parser;
use crate::ast::stx::ImportNames;
use crate::ast::stx::Syntax;
use crate::ast::NodeId;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::parse::expr::Asi;
use crate::parse::stmt::decl::VarDeclParseMode;
use crate::token::Token;
use crate::token::Kw;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// An exported or imported name: any identifier name, keywords included, or a string literal.
  fn module_export_import_name(&mut self) -> SyntaxResult<(String, Token)> {
    let t = self.peek();
    match t.typ {
      TT::LiteralString => Ok((self.lit_str_val()?.1, t)),
      TT::Identifier => {
        self.consume();
        Ok((self.string(t.loc), t))
      }
      typ if typ.is_identifier_name() => {
        self.consume();
        Ok((self.string(t.loc), t))
      }
      TT::EOF => Err(t.error(SyntaxErrorType::UnexpectedEnd)),
      _ => Err(t.error(SyntaxErrorType::ExpectedNotFound)),
    }
  }

  /// Parses `from "module"` and any import attributes after it, returning the module specifier.
  fn module_source(&mut self) -> SyntaxResult<String> {
    self.require(TT::Kw(Kw::From))?;
    let (_, module) = self.lit_str_val()?;
    self.import_attributes()?;
    Ok(module)
  }

  // Import attributes like `with { type: "json" }` are accepted and discarded.
  fn import_attributes(&mut self) -> SyntaxResult<()> {
    let t = self.peek();
    let is_attributes = !t.preceded_by_line_terminator
      && (t.typ == TT::Kw(Kw::With) || (t.typ == TT::Identifier && self.str(t.loc) == "assert"));
    if is_attributes {
      self.consume();
      self.lit_obj()?;
    };
    Ok(())
  }

  /// Parses an import statement like:
  /// - `import "module"`
  /// - `import * as b from "module"`
  /// - `import {"b" as c, d, e as f, default as g} from "module"`
  /// - `import a from "module"`
  /// - `import a, * as b from "module"`
  /// - `import a, {b} from "module"`
  pub fn import_stmt(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::Kw(Kw::Import))?;
      if p.peek().typ == TT::LiteralString {
        // Side-effect only.
        let (_, module) = p.lit_str_val()?;
        p.import_attributes()?;
        p.semicolon_or_asi(false)?;
        return Ok(Syntax::ImportStmt {
          default: None,
          names: None,
          module,
        });
      };
      let (default, can_have_names) = if p.peek().typ.is_identifier_like() {
        let alias = p.id_pat()?;
        (Some(alias), p.consume_if(TT::Comma).is_match())
      } else {
        (None, true)
      };
      let names = if !can_have_names {
        None
      } else if p.consume_if(TT::Asterisk).is_match() {
        p.require(TT::Kw(Kw::As))?;
        Some(ImportNames::All(p.id_pat()?))
      } else {
        p.require(TT::BraceOpen)?;
        let names = p.list_with_loc(TT::Comma, TT::BraceClose, |p| {
          let (importable, t) = p.module_export_import_name()?;
          let alias = if p.consume_if(TT::Kw(Kw::As)).is_match() {
            p.id_pat()?
          } else {
            if !t.typ.is_identifier_like() {
              return Err(t.error(SyntaxErrorType::RequiredTokenNotFound(TT::Kw(Kw::As))));
            };
            // Same as `a as a`.
            p.node(t.loc, Syntax::IdPat {
              name: importable.clone(),
            })
          };
          Ok(Syntax::ImportName { importable, alias })
        })?;
        Some(ImportNames::Specific(names))
      };
      let module = p.module_source()?;
      p.semicolon_or_asi(false)?;
      Ok(Syntax::ImportStmt {
        default,
        names,
        module,
      })
    })
  }

  pub fn export_stmt(&mut self) -> SyntaxResult<NodeId> {
    let [_, t1, t2, t3] = self.peek_n::<4>();
    #[rustfmt::skip]
    let stmt = match t1.typ {
      TT::Kw(Kw::Var) | TT::Kw(Kw::Let) | TT::Kw(Kw::Const) => self.var_decl(VarDeclParseMode::Asi)?,
      TT::Kw(Kw::Function) => self.func_decl()?,
      TT::Kw(Kw::Async) if t2.typ == TT::Kw(Kw::Function) => self.func_decl()?,
      TT::Kw(Kw::Class) => self.class_decl()?,
      TT::Kw(Kw::Default) => match t2.typ {
        TT::Kw(Kw::Function) => self.func_decl()?,
        TT::Kw(Kw::Async) if t3.typ == TT::Kw(Kw::Function) && !t3.preceded_by_line_terminator => self.func_decl()?,
        TT::Kw(Kw::Class) => self.class_decl()?,
        _ => self.export_default_expr_stmt()?,
      },
      _ => self.export_list_stmt()?,
    };
    Ok(stmt)
  }

  fn export_default_expr_stmt(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::Kw(Kw::Export))?;
      p.require(TT::Kw(Kw::Default))?;
      let mut asi = Asi::can();
      let expression = p.expr_with_asi([TT::Semicolon], &mut asi)?;
      p.semicolon_or_asi(asi.did_end_with_asi)?;
      Ok(Syntax::ExportDefaultExprStmt { expression })
    })
  }

  /// Parses `export * [as x] from "module"` or `export {a, b as c} [from "module"]`.
  fn export_list_stmt(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::Kw(Kw::Export))?;
      if p.consume_if(TT::Asterisk).is_match() {
        let alias = if p.consume_if(TT::Kw(Kw::As)).is_match() {
          Some(p.module_export_import_name()?.0)
        } else {
          None
        };
        let from = p.module_source()?;
        p.semicolon_or_asi(false)?;
        return Ok(Syntax::ExportAllStmt { alias, from });
      };
      p.require(TT::BraceOpen)?;
      let names = p.list_with_loc(TT::Comma, TT::BraceClose, |p| {
        let (exportable, t) = p.module_export_import_name()?;
        let target = if t.typ.is_identifier_like() {
          Some(p.node(t.loc, Syntax::IdExpr {
            name: exportable.clone(),
          }))
        } else {
          None
        };
        let alias = if p.consume_if(TT::Kw(Kw::As)).is_match() {
          p.module_export_import_name()?.0
        } else {
          exportable.clone()
        };
        Ok(Syntax::ExportName {
          target,
          exportable,
          alias,
        })
      })?;
      let from = if p.peek().typ == TT::Kw(Kw::From) {
        Some(p.module_source()?)
      } else {
        None
      };
      if from.is_some() {
        // Re-exported names are not local references.
        for &name in names.iter() {
          if let Syntax::ExportName { target, .. } = p.ast.stx_mut(name) {
            *target = None;
          };
        }
      };
      p.semicolon_or_asi(false)?;
      Ok(Syntax::ExportListStmt { names, from })
    })
  }
}
