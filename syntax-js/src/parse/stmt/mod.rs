pub mod decl;

use decl::VarDeclParseMode;

use super::expr::Asi;
use super::Parser;
use crate::ast::stx::Syntax;
use crate::ast::NodeId;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::operator::OperatorName;
use crate::token::Token;
use crate::token::Kw;
use crate::token::TT;

// `let` is a contextual keyword, and only starts a declaration when followed by a pattern.
fn starts_let_decl(t0: &Token, t1: &Token) -> bool {
  t0.typ == TT::Kw(Kw::Let)
    && (t1.typ == TT::BraceOpen || t1.typ == TT::BracketOpen || t1.typ.is_identifier_like())
}

impl<'a> Parser<'a> {
  pub fn stmts(&mut self, end: TT) -> SyntaxResult<Vec<NodeId>> {
    self.repeat_until_tt(end, |p| p.stmt())
  }

  pub fn stmt(&mut self) -> SyntaxResult<NodeId> {
    let [t0, t1] = self.peek_n::<2>();
    #[rustfmt::skip]
    let stmt = match t0.typ {
      TT::BraceOpen => self.block_stmt()?,
      TT::Kw(Kw::Break) => self.break_stmt()?,
      TT::Kw(Kw::Class) => self.class_decl()?,
      TT::Kw(Kw::Const) | TT::Kw(Kw::Var) => self.var_decl(VarDeclParseMode::Asi)?,
      TT::Kw(Kw::Let) if starts_let_decl(&t0, &t1) => self.var_decl(VarDeclParseMode::Asi)?,
      TT::Kw(Kw::Continue) => self.continue_stmt()?,
      TT::Kw(Kw::Debugger) => self.debugger_stmt()?,
      TT::Kw(Kw::Do) => self.do_while_stmt()?,
      TT::Kw(Kw::Export) => self.export_stmt()?,
      TT::Kw(Kw::For) => self.for_stmt()?,
      TT::Kw(Kw::Async) if t1.typ == TT::Kw(Kw::Function) && !t1.preceded_by_line_terminator => self.func_decl()?,
      TT::Kw(Kw::Function) => self.func_decl()?,
      TT::Kw(Kw::If) => self.if_stmt()?,
      TT::Kw(Kw::Import) if t1.typ != TT::ParenthesisOpen && t1.typ != TT::Dot => self.import_stmt()?,
      TT::Kw(Kw::Return) => self.return_stmt()?,
      TT::Kw(Kw::Switch) => self.switch_stmt()?,
      TT::Kw(Kw::Throw) => self.throw_stmt()?,
      TT::Kw(Kw::Try) => self.try_stmt()?,
      TT::Kw(Kw::While) => self.while_stmt()?,
      TT::Kw(Kw::With) => self.with_stmt()?,
      TT::Semicolon => self.empty_stmt()?,
      TT::EOF => return Err(t0.error(SyntaxErrorType::UnexpectedEnd)),
      t if t.is_identifier_like() && t1.typ == TT::Colon => self.label_stmt()?,
      _ => self.expr_stmt()?,
    };
    Ok(stmt)
  }

  pub fn label_stmt(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      let name = p.id_name()?;
      p.require(TT::Colon)?;
      let statement = p.stmt()?;
      Ok(Syntax::LabelStmt { name, statement })
    })
  }

  pub fn empty_stmt(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| p.require(TT::Semicolon).map(|_| Syntax::EmptyStmt))
  }

  pub fn block_stmt(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let body = p.stmts(TT::BraceClose)?;
      p.require(TT::BraceClose)?;
      Ok(Syntax::BlockStmt { body })
    })
  }

  /// The optional label after `break` or `continue`, which must be on the same line, and the end of
  /// the statement.
  fn break_or_continue_label(&mut self) -> SyntaxResult<Option<String>> {
    let t = self.peek();
    let label = if t.typ.is_identifier_like() && !t.preceded_by_line_terminator {
      self.consume();
      Some(self.string(t.loc))
    } else {
      None
    };
    let ends_here = t.preceded_by_line_terminator
      || matches!(t.typ, TT::Semicolon | TT::BraceClose | TT::EOF);
    if label.is_none() && !ends_here {
      return Err(t.error(SyntaxErrorType::ExpectedSyntax("label")));
    };
    self.semicolon_or_asi(false)?;
    Ok(label)
  }

  /// An expression unless `end` comes first, then `end` itself.
  fn expr_unless_at(&mut self, end: TT) -> SyntaxResult<Option<NodeId>> {
    let expr = if self.peek().typ == end {
      None
    } else {
      Some(self.expr([end])?)
    };
    self.require(end)?;
    Ok(expr)
  }

  /// The `(test)` after `if`, `while`, `with` and `switch`.
  fn paren_test(&mut self) -> SyntaxResult<NodeId> {
    self.grouping(&mut Asi::no())
  }

  pub fn break_stmt(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::Kw(Kw::Break))?;
      let label = p.break_or_continue_label()?;
      Ok(Syntax::BreakStmt { label })
    })
  }

  pub fn continue_stmt(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::Kw(Kw::Continue))?;
      let label = p.break_or_continue_label()?;
      Ok(Syntax::ContinueStmt { label })
    })
  }

  pub fn debugger_stmt(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::Kw(Kw::Debugger))?;
      p.semicolon_or_asi(false)?;
      Ok(Syntax::DebuggerStmt)
    })
  }

  pub fn expr_stmt(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      let mut asi = Asi::can();
      let expr = p.expr_with_asi([TT::Semicolon], &mut asi)?;
      if !asi.did_end_with_asi {
        p.require(TT::Semicolon)?;
      };
      Ok(Syntax::ExprStmt { expr })
    })
  }

  /// One of:
  /// - for ( [<expr> | <var decls> ]? ; <expr>? ; <expr>? )
  /// - for ( [<pat> | <var decl>] in <expr> )
  /// - for await? ( [<pat> | <var decl>] of <expr> )
  pub fn for_stmt(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::Kw(Kw::For))?;
      let await_ = p.consume_if(TT::Kw(Kw::Await)).is_match();
      p.require(TT::ParenthesisOpen)?;
      let [t0, t1] = p.peek_n::<2>();
      let init = match t0.typ {
        TT::Semicolon => None,
        TT::Kw(Kw::Var) | TT::Kw(Kw::Const) => Some(p.var_decl(VarDeclParseMode::Leftmost)?),
        TT::Kw(Kw::Let) if starts_let_decl(&t0, &t1) => {
          Some(p.var_decl(VarDeclParseMode::Leftmost)?)
        }
        _ => Some(p.expr([TT::Semicolon, TT::Kw(Kw::In), TT::Kw(Kw::Of)])?),
      };
      let t = p.peek();
      if let (Some(lhs), TT::Kw(Kw::In) | TT::Kw(Kw::Of)) = (init, t.typ) {
        p.consume();
        if !matches!(p.stx(lhs), Syntax::VarDecl { .. }) {
          p.lhs_expr_to_assign_target(lhs, OperatorName::Assignment)?;
        };
        let rhs = p.expr([TT::ParenthesisClose])?;
        p.require(TT::ParenthesisClose)?;
        let body = p.stmt()?;
        return Ok(Syntax::ForInOfStmt {
          of: t.typ == TT::Kw(Kw::Of),
          await_,
          lhs,
          rhs,
          body,
        });
      };
      if await_ {
        return Err(t.error(SyntaxErrorType::RequiredTokenNotFound(TT::Kw(Kw::Of))));
      };
      p.require(TT::Semicolon)?;
      let cond = p.expr_unless_at(TT::Semicolon)?;
      let post = p.expr_unless_at(TT::ParenthesisClose)?;
      let body = p.stmt()?;
      Ok(Syntax::ForTripleStmt {
        init,
        cond,
        post,
        body,
      })
    })
  }

  pub fn if_stmt(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::Kw(Kw::If))?;
      let test = p.paren_test()?;
      let consequent = p.stmt()?;
      let alternate = p.consume_if(TT::Kw(Kw::Else)).and_then(|| p.stmt())?;
      Ok(Syntax::IfStmt {
        test,
        consequent,
        alternate,
      })
    })
  }

  pub fn return_stmt(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::Kw(Kw::Return))?;
      let t = p.peek();
      let mut asi = Asi::can();
      let bare = t.preceded_by_line_terminator
        || matches!(t.typ, TT::Semicolon | TT::BraceClose | TT::EOF);
      let value = match bare {
        true => None,
        false => Some(p.expr_with_asi([TT::Semicolon], &mut asi)?),
      };
      p.semicolon_or_asi(asi.did_end_with_asi)?;
      Ok(Syntax::ReturnStmt { value })
    })
  }

  pub fn throw_stmt(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::Kw(Kw::Throw))?;
      let t = p.peek();
      if t.preceded_by_line_terminator {
        // Illegal under Automatic Semicolon Insertion rules.
        return Err(t.error(SyntaxErrorType::LineTerminatorAfterThrow));
      }
      let mut asi = Asi::can();
      let value = p.expr_with_asi([TT::Semicolon], &mut asi)?;
      p.semicolon_or_asi(asi.did_end_with_asi)?;
      Ok(Syntax::ThrowStmt { value })
    })
  }

  pub fn try_stmt(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      let start = p.require(TT::Kw(Kw::Try))?;
      let wrapped = p.block_stmt()?;
      let catch = if p.peek().typ == TT::Kw(Kw::Catch) {
        Some(p.with_loc(|p| {
          p.require(TT::Kw(Kw::Catch))?;
          // `catch {}` may omit the binding.
          let parameter = p.consume_if(TT::ParenthesisOpen).and_then(|| {
            let param = p.pat()?;
            p.require(TT::ParenthesisClose)?;
            Ok(param)
          })?;
          let body = p.block_stmt()?;
          Ok(Syntax::CatchBlock { parameter, body })
        })?)
      } else {
        None
      };
      let finally = p
        .consume_if(TT::Kw(Kw::Finally))
        .and_then(|| p.block_stmt())?;
      if catch.is_none() && finally.is_none() {
        return Err(start.error(SyntaxErrorType::TryStatementHasNoCatchOrFinally));
      }
      Ok(Syntax::TryStmt {
        wrapped,
        catch,
        finally,
      })
    })
  }

  pub fn while_stmt(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::Kw(Kw::While))?;
      let condition = p.paren_test()?;
      let body = p.stmt()?;
      Ok(Syntax::WhileStmt { condition, body })
    })
  }

  pub fn do_while_stmt(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::Kw(Kw::Do))?;
      let body = p.stmt()?;
      p.require(TT::Kw(Kw::While))?;
      let condition = p.paren_test()?;
      // The semicolon after `do ... while (x)` is always optional.
      let _ = p.consume_if(TT::Semicolon);
      Ok(Syntax::DoWhileStmt { body, condition })
    })
  }

  pub fn with_stmt(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::Kw(Kw::With))?;
      let object = p.paren_test()?;
      let body = p.stmt()?;
      Ok(Syntax::WithStmt { object, body })
    })
  }

  pub fn switch_stmt(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::Kw(Kw::Switch))?;
      let test = p.paren_test()?;
      p.require(TT::BraceOpen)?;
      let branches = p.repeat_until_tt(TT::BraceClose, |p| {
        p.with_loc(|p| {
          let t = p.consume();
          let case = match t.typ {
            TT::Kw(Kw::Case) => Some(p.expr([TT::Colon])?),
            TT::Kw(Kw::Default) => None,
            TT::EOF => return Err(t.error(SyntaxErrorType::UnexpectedEnd)),
            _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("switch branch"))),
          };
          p.require(TT::Colon)?;
          let mut body = Vec::new();
          while !matches!(
            p.peek().typ,
            TT::Kw(Kw::Case) | TT::Kw(Kw::Default) | TT::BraceClose
          ) {
            body.push(p.stmt()?);
          }
          Ok(Syntax::SwitchBranch { case, body })
        })
      })?;
      p.require(TT::BraceClose)?;
      Ok(Syntax::SwitchStmt { test, branches })
    })
  }
}
