use crate::ast::stx::FuncBody;
use crate::ast::stx::Syntax;
use crate::ast::stx::VarDeclMode;
use crate::ast::NodeId;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::parse::expr::Asi;
use crate::parse::Parser;
use crate::token::Kw;
use crate::token::TT;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum VarDeclParseMode {
  /// A statement, ended by `;` or automatic semicolon insertion.
  Asi,
  /// The head of a `for` loop. Stops before the first token after a declarator that is not `,`,
  /// and initializers stop at `in` and `of`.
  Leftmost,
}

impl<'a> Parser<'a> {
  pub fn var_decl_mode(&mut self) -> SyntaxResult<VarDeclMode> {
    let t = self.consume();
    match t.typ {
      TT::Kw(Kw::Let) => Ok(VarDeclMode::Let),
      TT::Kw(Kw::Const) => Ok(VarDeclMode::Const),
      TT::Kw(Kw::Var) => Ok(VarDeclMode::Var),
      _ => Err(t.error(SyntaxErrorType::ExpectedSyntax("variable declaration"))),
    }
  }

  fn var_declarator(&mut self, parse_mode: VarDeclParseMode, asi: &mut Asi) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      let pattern = p.pat()?;
      let initializer = if p.consume_if(TT::Equals).is_match() {
        Some(match parse_mode {
          VarDeclParseMode::Asi => p.expr_with_asi([TT::Semicolon, TT::Comma], asi)?,
          VarDeclParseMode::Leftmost => p.expr_with_asi(
            [TT::Semicolon, TT::Comma, TT::Kw(Kw::In), TT::Kw(Kw::Of)],
            asi,
          )?,
        })
      } else {
        None
      };
      Ok(Syntax::VarDeclarator {
        pattern,
        initializer,
      })
    })
  }

  /// Whether another declarator follows, consuming the `,` if so. In `Asi` mode this also consumes the
  /// statement's `;`.
  fn more_var_declarators(&mut self, parse_mode: VarDeclParseMode, asi: &Asi) -> SyntaxResult<bool> {
    if parse_mode == VarDeclParseMode::Leftmost {
      return Ok(self.consume_if(TT::Comma).is_match());
    };
    if self.consume_if(TT::Semicolon).is_match() || asi.did_end_with_asi {
      return Ok(false);
    };
    let t = self.peek();
    let ended = matches!(t.typ, TT::EOF | TT::BraceClose)
      || (t.preceded_by_line_terminator && t.typ != TT::Comma);
    if !ended {
      self.require(TT::Comma)?;
    };
    Ok(!ended)
  }

  /// Parses `[export] (var|let|const) declarator, ...`, including the trailing semicolon in `Asi` mode.
  pub fn var_decl(&mut self, parse_mode: VarDeclParseMode) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      let export = p.consume_if(TT::Kw(Kw::Export)).is_match();
      let mode = p.var_decl_mode()?;
      let mut declarators = Vec::new();
      loop {
        let mut asi = match parse_mode {
          VarDeclParseMode::Asi => Asi::can(),
          VarDeclParseMode::Leftmost => Asi::no(),
        };
        declarators.push(p.var_declarator(parse_mode, &mut asi)?);
        if !p.more_var_declarators(parse_mode, &asi)? {
          break;
        };
      }
      Ok(Syntax::VarDecl {
        export,
        mode,
        declarators,
      })
    })
  }

  /// Parses `[export [default]] [async] function [*] name(...) {...}`.
  pub fn func_decl(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      let export = p.consume_if(TT::Kw(Kw::Export)).is_match();
      let export_default = export && p.consume_if(TT::Kw(Kw::Default)).is_match();
      let is_async = p.consume_if(TT::Kw(Kw::Async)).is_match();
      p.require(TT::Kw(Kw::Function))?;
      let generator = p.consume_if(TT::Asterisk).is_match();
      let name = p.maybe_class_or_func_name();
      if name.is_none() && !export_default {
        return Err(p.peek().error(SyntaxErrorType::ExpectedSyntax("function name")));
      };
      let function = p.with_loc(|p| {
        let parameters = p.func_params()?;
        let body = FuncBody::Block(p.func_block_body()?);
        Ok(Syntax::Func {
          arrow: false,
          async_: is_async,
          generator,
          parameters,
          body,
        })
      })?;
      Ok(Syntax::FuncDecl {
        export,
        export_default,
        name,
        function,
      })
    })
  }

  /// Parses `[export [default]] class name [extends expr] {...}`.
  pub fn class_decl(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      let export = p.consume_if(TT::Kw(Kw::Export)).is_match();
      let export_default = export && p.consume_if(TT::Kw(Kw::Default)).is_match();
      p.require(TT::Kw(Kw::Class))?;
      let name = p.maybe_class_or_func_name();
      if name.is_none() && !export_default {
        return Err(p.peek().error(SyntaxErrorType::ExpectedSyntax("class name")));
      };
      let extends = p
        .consume_if(TT::Kw(Kw::Extends))
        .and_then(|| p.expr([TT::BraceOpen]))?;
      let members = p.class_body()?;
      Ok(Syntax::ClassDecl {
        export,
        export_default,
        name,
        extends,
        members,
      })
    })
  }
}
