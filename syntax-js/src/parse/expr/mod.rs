pub mod jsx;
pub mod lit;
pub mod pat;

use super::operator::infix_operator;
use super::operator::prefix_operator;
use super::Parser;
use crate::ast::stx::FuncBody;
use crate::ast::stx::Syntax;
use crate::ast::NodeId;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::loc::Loc;
use crate::operator::OperatorName;
use crate::token::Kw;
use crate::token::TT;

pub struct Asi {
  pub can_end_with_asi: bool,
  pub did_end_with_asi: bool,
}

impl Asi {
  pub fn can() -> Asi {
    Asi {
      can_end_with_asi: true,
      did_end_with_asi: false,
    }
  }

  pub fn no() -> Asi {
    Asi {
      can_end_with_asi: false,
      did_end_with_asi: false,
    }
  }
}

impl<'a> Parser<'a> {
  pub fn call_args(&mut self) -> SyntaxResult<Vec<NodeId>> {
    let mut args = Vec::new();
    while self.peek().typ != TT::ParenthesisClose {
      let arg = self.with_loc(|p| {
        let spread = p.consume_if(TT::DotDotDot).is_match();
        let value = p.expr([TT::Comma, TT::ParenthesisClose])?;
        Ok(Syntax::CallArg { spread, value })
      })?;
      args.push(arg);
      if !self.consume_if(TT::Comma).is_match() {
        break;
      };
    }
    Ok(args)
  }

  pub fn expr<const N: usize>(&mut self, terminators: [TT; N]) -> SyntaxResult<NodeId> {
    self.expr_with_min_prec(1, terminators, &mut Asi::no())
  }

  pub fn expr_with_asi<const N: usize>(
    &mut self,
    terminators: [TT; N],
    asi: &mut Asi,
  ) -> SyntaxResult<NodeId> {
    self.expr_with_min_prec(1, terminators, asi)
  }

  /// Parses a parenthesised expression like `(a + b)`. The parentheses are not part of the node.
  pub fn grouping(&mut self, asi: &mut Asi) -> SyntaxResult<NodeId> {
    self.require(TT::ParenthesisOpen)?;
    let expr = self.expr_with_min_prec(1, [TT::ParenthesisClose], asi)?;
    self.require(TT::ParenthesisClose)?;
    Ok(expr)
  }

  pub fn arrow_func_expr<const N: usize>(&mut self, terminators: [TT; N]) -> SyntaxResult<NodeId> {
    let func = self.with_loc(|p| {
      // `async => x` uses `async` as the parameter name.
      let is_async_param_name =
        p.peek().typ == TT::Kw(Kw::Async) && p.peek_n::<2>()[1].typ == TT::EqualsChevronRight;
      let is_async = !is_async_param_name && p.consume_if(TT::Kw(Kw::Async)).is_match();

      let (parameters, arrow) = if p.peek().typ.is_identifier_like() {
        // Parse the arrow first to fail fast before creating nodes.
        let param_name = p.consume().loc;
        let arrow = p.require(TT::EqualsChevronRight)?;
        let pattern = p.node(param_name, Syntax::IdPat {
          name: p.string(param_name),
        });
        let param = p.node(param_name, Syntax::ParamDecl {
          rest: false,
          pattern,
          default_value: None,
        });
        (vec![param], arrow)
      } else {
        let params = p.func_params()?;
        let arrow = p.require(TT::EqualsChevronRight)?;
        (params, arrow)
      };

      if arrow.preceded_by_line_terminator {
        // Illegal under Automatic Semicolon Insertion rules.
        return Err(arrow.error(SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters));
      }
      let body = match p.peek().typ {
        TT::BraceOpen => FuncBody::Block(p.func_block_body()?),
        _ => FuncBody::Expression(p.expr_with_min_prec(
          OperatorName::Assignment.precedence(),
          terminators,
          &mut Asi::can(),
        )?),
      };
      Ok(Syntax::Func {
        arrow: true,
        async_: is_async,
        generator: false,
        parameters,
        body,
      })
    })?;
    let loc = self.loc_of(func);
    Ok(self.node(loc, Syntax::ArrowFuncExpr { function: func }))
  }

  pub fn arrow_function_or_grouping_expr<const N: usize>(
    &mut self,
    terminators: [TT; N],
    asi: &mut Asi,
  ) -> SyntaxResult<NodeId> {
    match self.try_arrow_func_expr(terminators)? {
      Some(expr) => Ok(expr),
      None => self.grouping(asi),
    }
  }

  /// Parses an arrow function if one starts here, and otherwise rewinds and returns None. A newline
  /// before `=>` is still an error, since nothing else could follow the parameters.
  fn try_arrow_func_expr<const N: usize>(
    &mut self,
    terminators: [TT; N],
  ) -> SyntaxResult<Option<NodeId>> {
    self.rewindable(|p| match p.arrow_func_expr(terminators) {
      Ok(expr) => Ok(Some(expr)),
      Err(err) if err.typ == SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters => Err(err),
      Err(_) => Ok(None),
    })
  }

  pub fn func_expr(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      let is_async = p.consume_if(TT::Kw(Kw::Async)).is_match();
      p.require(TT::Kw(Kw::Function))?;
      let generator = p.consume_if(TT::Asterisk).is_match();
      let name = p.maybe_class_or_func_name();
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
      Ok(Syntax::FuncExpr { name, function })
    })
  }

  pub fn class_expr(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::Kw(Kw::Class))?;
      let name = p.maybe_class_or_func_name();
      let extends = if p.consume_if(TT::Kw(Kw::Extends)).is_match() {
        Some(p.expr([TT::BraceOpen])?)
      } else {
        None
      };
      let members = p.class_body()?;
      Ok(Syntax::ClassExpr {
        name,
        extends,
        members,
      })
    })
  }

  pub fn id_expr(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      let name = p.id_name()?;
      Ok(Syntax::IdExpr { name })
    })
  }

  /// Parses a raw valid identifier name as a string. To parse an IdExpr, use `id_expr`.
  pub fn id_name(&mut self) -> SyntaxResult<String> {
    let t = self.require_identifier()?;
    Ok(self.string(t.loc))
  }

  pub fn import_meta_or_call(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::Kw(Kw::Import))?;
      if p.consume_if(TT::Dot).is_match() {
        let prop = p.require(TT::Identifier)?;
        if p.str(prop.loc) != "meta" {
          return Err(prop.error(SyntaxErrorType::ExpectedSyntax("`meta` property")));
        };
        return Ok(Syntax::ImportMeta);
      };
      p.require(TT::ParenthesisOpen)?;
      let module = p.expr([TT::ParenthesisClose, TT::Comma])?;
      // Import attributes are accepted and ignored.
      if p.consume_if(TT::Comma).is_match() && p.peek().typ != TT::ParenthesisClose {
        p.expr([TT::ParenthesisClose, TT::Comma])?;
        let _ = p.consume_if(TT::Comma);
      };
      p.require(TT::ParenthesisClose)?;
      Ok(Syntax::ImportExpr { module })
    })
  }

  fn keyword_expr(&mut self, typ: TT, stx: Syntax) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(typ)?;
      Ok(stx)
    })
  }

  pub fn new_target(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::Kw(Kw::New))?;
      p.require(TT::Dot)?;
      let prop = p.require(TT::Identifier)?;
      if p.str(prop.loc) != "target" {
        return Err(prop.error(SyntaxErrorType::ExpectedSyntax("`target` property")));
      };
      Ok(Syntax::NewTarget)
    })
  }

  /// `yield` with nothing after it on the line.
  fn is_bare_yield<const N: usize>(&mut self, terminators: [TT; N]) -> bool {
    let next = self.peek();
    next.preceded_by_line_terminator
      || terminators.contains(&next.typ)
      || matches!(
        next.typ,
        TT::EOF
          | TT::Semicolon
          | TT::Comma
          | TT::ParenthesisClose
          | TT::BracketClose
          | TT::BraceClose
          | TT::Colon
      )
  }

  fn prefix_expr<const N: usize>(
    &mut self,
    operator: OperatorName,
    terminators: [TT; N],
    asi: &mut Asi,
  ) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.consume_with_mode(LexMode::SlashIsRegex);
      let operator = match operator {
        OperatorName::Yield if p.consume_if(TT::Asterisk).is_match() => OperatorName::YieldDelegated,
        // Kept as an identifier so it prints as written.
        OperatorName::Yield if p.is_bare_yield(terminators) => {
          return Ok(Syntax::IdExpr {
            name: "yield".to_string(),
          });
        }
        operator => operator,
      };
      let argument = p.expr_with_min_prec(operator.right_operand_precedence(), terminators, asi)?;
      Ok(Syntax::UnaryExpr { operator, argument })
    })
  }

  /// `async` starts an async function or arrow, or is just a name.
  fn async_operand<const N: usize>(&mut self, terminators: [TT; N]) -> SyntaxResult<NodeId> {
    let [_, t1, t2] = self.peek_n::<3>();
    let same_line = !t1.preceded_by_line_terminator;
    match t1.typ {
      // Could also be a call to a function named `async`.
      TT::ParenthesisOpen if same_line => match self.try_arrow_func_expr(terminators)? {
        Some(expr) => Ok(expr),
        None => self.id_expr(),
      },
      TT::Kw(Kw::Function) if same_line => self.func_expr(),
      typ if same_line && typ.is_identifier_like() && t2.typ == TT::EqualsChevronRight => {
        self.arrow_func_expr(terminators)
      }
      _ => self.id_expr(),
    }
  }

  fn expr_operand<const N: usize>(
    &mut self,
    terminators: [TT; N],
    asi: &mut Asi,
  ) -> SyntaxResult<NodeId> {
    let [t0, t1] = self.peek_n_with_mode([LexMode::SlashIsRegex, LexMode::Standard]);
    // `new.target` is not the `new` operator.
    let prefix =
      prefix_operator(t0.typ).filter(|&op| !(op == OperatorName::New && t1.typ == TT::Dot));
    if let Some(operator) = prefix {
      return self.prefix_expr(operator, terminators, asi);
    };
    // `async => ...` uses `async` as a parameter name.
    if t0.typ == TT::Kw(Kw::Async) && t1.typ != TT::EqualsChevronRight {
      return self.async_operand(terminators);
    };
    if t0.typ.is_identifier_like() {
      return match t1.typ {
        TT::EqualsChevronRight => self.arrow_func_expr(terminators),
        _ => self.id_expr(),
      };
    };

    #[rustfmt::skip]
    let expr = match t0.typ {
      TT::BracketOpen => self.lit_arr()?,
      TT::BraceOpen => self.lit_obj()?,
      TT::ChevronLeft => self.jsx_elem()?,
      TT::Kw(Kw::Class) => self.class_expr()?,
      TT::Kw(Kw::Function) => self.func_expr()?,
      TT::Kw(Kw::Import) => match t1.typ {
        TT::Dot | TT::ParenthesisOpen => self.import_meta_or_call()?,
        _ => return Err(t0.error(SyntaxErrorType::ExpectedSyntax("import expression"))),
      },
      TT::Kw(Kw::New) => self.new_target()?,
      TT::Kw(Kw::Super) => self.keyword_expr(TT::Kw(Kw::Super), Syntax::SuperExpr)?,
      TT::Kw(Kw::This) => self.keyword_expr(TT::Kw(Kw::This), Syntax::ThisExpr)?,
      TT::LiteralBigInt => self.lit_bigint()?,
      TT::LiteralTrue | TT::LiteralFalse => self.lit_bool()?,
      TT::LiteralNull => self.keyword_expr(TT::LiteralNull, Syntax::LitNullExpr)?,
      TT::LiteralNumber => self.lit_num()?,
      TT::LiteralRegex => self.lit_regex()?,
      TT::LiteralString => self.lit_str()?,
      TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => self.lit_template()?,
      TT::ParenthesisOpen => self.arrow_function_or_grouping_expr(terminators, asi)?,
      TT::EOF => return Err(t0.error(SyntaxErrorType::UnexpectedEnd)),
      _ => return Err(t0.error(SyntaxErrorType::ExpectedSyntax("expression operand"))),
    };
    Ok(expr)
  }

  /// The right side of `.` or `?.`: any identifier name, keywords included, or a `#private` name.
  fn member_property(&mut self) -> SyntaxResult<(Loc, String)> {
    let t = self.consume();
    if t.typ == TT::PrivateMember || t.typ.is_identifier_name() {
      Ok((t.loc, self.string(t.loc)))
    } else {
      Err(t.error(SyntaxErrorType::ExpectedSyntax("member access property")))
    }
  }

  /// Applies an infix operator whose token has been consumed, building the node with `left`.
  fn infix_expr<const N: usize>(
    &mut self,
    left: NodeId,
    operator: OperatorName,
    terminators: [TT; N],
    asi: &mut Asi,
  ) -> SyntaxResult<NodeId> {
    let left_loc = self.loc_of(left);
    let (end, stx) = match operator {
      OperatorName::Call | OperatorName::OptionalChainingCall => {
        let arguments = self.call_args()?;
        let end = self.require(TT::ParenthesisClose)?.loc;
        (end, Syntax::CallExpr {
          optional_chaining: operator == OperatorName::OptionalChainingCall,
          callee: left,
          arguments,
        })
      }
      OperatorName::ComputedMemberAccess | OperatorName::OptionalChainingComputedMemberAccess => {
        let member = self.expr([TT::BracketClose])?;
        let end = self.require(TT::BracketClose)?.loc;
        (end, Syntax::ComputedMemberExpr {
          optional_chaining: operator == OperatorName::OptionalChainingComputedMemberAccess,
          object: left,
          member,
        })
      }
      OperatorName::MemberAccess | OperatorName::OptionalChainingMemberAccess => {
        let (end, right) = self.member_property()?;
        (end, Syntax::MemberExpr {
          optional_chaining: operator == OperatorName::OptionalChainingMemberAccess,
          left,
          right,
        })
      }
      OperatorName::Conditional => {
        let consequent = self.expr([TT::Colon])?;
        self.require(TT::Colon)?;
        let alternate = self.expr_with_min_prec(
          OperatorName::ConditionalAlternate.precedence(),
          terminators,
          asi,
        )?;
        (self.loc_of(alternate), Syntax::CondExpr {
          test: left,
          consequent,
          alternate,
        })
      }
      _ => {
        if operator.is_assignment() {
          self.lhs_expr_to_assign_target(left, operator)?;
        };
        let right =
          self.expr_with_min_prec(operator.right_operand_precedence(), terminators, asi)?;
        (self.loc_of(right), Syntax::BinaryExpr {
          operator,
          left,
          right,
        })
      }
    };
    Ok(self.node(left_loc + end, stx))
  }

  pub fn expr_with_min_prec<const N: usize>(
    &mut self,
    min_prec: u8,
    terminators: [TT; N],
    asi: &mut Asi,
  ) -> SyntaxResult<NodeId> {
    let mut left = self.expr_operand(terminators, asi)?;

    loop {
      let cp = self.checkpoint();
      let t = self.consume();
      if terminators.contains(&t.typ) {
        self.restore_checkpoint(cp);
        break;
      };

      // Postfix operators and tagged templates must start on the operand's line.
      let postfix = match t.typ {
        TT::PlusPlus => Some(OperatorName::PostfixIncrement),
        TT::HyphenHyphen => Some(OperatorName::PostfixDecrement),
        _ => None,
      };
      if let Some(operator) = postfix.filter(|_| !t.preceded_by_line_terminator) {
        if operator.precedence() < min_prec {
          self.restore_checkpoint(cp);
          break;
        };
        let loc = self.loc_of(left) + t.loc;
        left = self.node(loc, Syntax::UnaryPostfixExpr {
          operator,
          argument: left,
        });
        continue;
      };
      if matches!(
        t.typ,
        TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd
      ) && !t.preceded_by_line_terminator
      {
        self.restore_checkpoint(cp);
        let start = self.checkpoint();
        let parts = self.lit_template_parts()?;
        let loc = self.loc_of(left) + self.since_checkpoint(&start);
        left = self.node(loc, Syntax::TaggedTemplateExpr {
          function: left,
          parts,
        });
        continue;
      };

      let Some(operator) = infix_operator(t.typ) else {
        self.restore_checkpoint(cp);
        let ends_with_asi = asi.can_end_with_asi
          && (t.preceded_by_line_terminator || matches!(t.typ, TT::BraceClose | TT::EOF));
        if ends_with_asi {
          asi.did_end_with_asi = true;
          break;
        };
        return match t.typ {
          TT::Semicolon => Ok(left),
          TT::EOF => Err(t.error(SyntaxErrorType::UnexpectedEnd)),
          _ => Err(t.error(SyntaxErrorType::ExpectedSyntax("expression operator"))),
        };
      };
      if operator.precedence() < min_prec {
        self.restore_checkpoint(cp);
        break;
      };
      left = self.infix_expr(left, operator, terminators, asi)?;
    }

    Ok(left)
  }
}
