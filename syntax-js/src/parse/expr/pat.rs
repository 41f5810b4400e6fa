use crate::ast::stx::ArrElem;
use crate::ast::stx::ArrPatElem;
use crate::ast::stx::ClassOrObjKey;
use crate::ast::stx::ClassOrObjVal;
use crate::ast::stx::ObjMemberType;
use crate::ast::stx::Syntax;
use crate::ast::NodeId;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::operator::OperatorName;
use crate::parse::Parser;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// Parses a binding pattern: an identifier, or an array or object destructuring pattern.
  pub fn pat(&mut self) -> SyntaxResult<NodeId> {
    let t = self.peek();
    match t.typ {
      TT::BracketOpen => self.arr_pat(),
      TT::BraceOpen => self.obj_pat(),
      typ if typ.is_identifier_like() => self.id_pat(),
      TT::EOF => Err(t.error(SyntaxErrorType::UnexpectedEnd)),
      _ => Err(t.error(SyntaxErrorType::ExpectedSyntax("pattern"))),
    }
  }

  pub fn id_pat(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      let name = p.id_name()?;
      Ok(Syntax::IdPat { name })
    })
  }

  fn arr_pat(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::BracketOpen)?;
      let mut elements = Vec::<Option<ArrPatElem>>::new();
      let mut rest = None;
      loop {
        if p.consume_if(TT::BracketClose).is_match() {
          break;
        };
        if p.consume_if(TT::Comma).is_match() {
          elements.push(None);
          continue;
        };
        if p.consume_if(TT::DotDotDot).is_match() {
          rest = Some(p.pat()?);
          p.require(TT::BracketClose)?;
          break;
        };
        let target = p.pat()?;
        let default_value = if p.consume_if(TT::Equals).is_match() {
          Some(p.expr([TT::Comma, TT::BracketClose])?)
        } else {
          None
        };
        elements.push(Some(ArrPatElem {
          target,
          default_value,
        }));
        if !p.consume_if(TT::Comma).is_match() {
          p.require(TT::BracketClose)?;
          break;
        };
      }
      Ok(Syntax::ArrPat { elements, rest })
    })
  }

  fn obj_pat(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let mut properties = Vec::new();
      let mut rest = None;
      loop {
        if p.consume_if(TT::BraceClose).is_match() {
          break;
        };
        if p.consume_if(TT::DotDotDot).is_match() {
          rest = Some(p.id_pat()?);
          p.require(TT::BraceClose)?;
          break;
        };
        let prop = p.with_loc(|p| {
          let (key, key_tok) = p.class_or_obj_key()?;
          let (target, shorthand) = if p.consume_if(TT::Colon).is_match() {
            (p.pat()?, false)
          } else {
            let ClassOrObjKey::Direct(name) = &key else {
              return Err(key_tok.error(SyntaxErrorType::ExpectedSyntax("property target")));
            };
            if !key_tok.typ.is_identifier_like() {
              return Err(key_tok.error(SyntaxErrorType::ExpectedSyntax("identifier")));
            };
            let name = name.clone();
            (p.node(key_tok.loc, Syntax::IdPat { name }), true)
          };
          let default_value = if p.consume_if(TT::Equals).is_match() {
            Some(p.expr([TT::Comma, TT::BraceClose])?)
          } else {
            None
          };
          Ok(Syntax::ObjPatProp {
            key,
            target,
            shorthand,
            default_value,
          })
        })?;
        properties.push(prop);
        if !p.consume_if(TT::Comma).is_match() {
          p.require(TT::BraceClose)?;
          break;
        };
      }
      Ok(Syntax::ObjPat { properties, rest })
    })
  }

  /// Reinterprets the left operand of an assignment operator as an assignment target, in place.
  pub fn lhs_expr_to_assign_target(
    &mut self,
    id: NodeId,
    operator: OperatorName,
  ) -> SyntaxResult<()> {
    match self.stx(id) {
      Syntax::IdExpr { .. } | Syntax::MemberExpr { .. } | Syntax::ComputedMemberExpr { .. } => {
        self.lit_to_pat(id)
      }
      // Destructuring is only possible with simple assignment.
      Syntax::LitArrExpr { .. } | Syntax::LitObjExpr { .. }
        if operator == OperatorName::Assignment =>
      {
        self.lit_to_pat(id)
      }
      _ => Err(
        self
          .loc_of(id)
          .error(SyntaxErrorType::InvalidAssigmentTarget, None),
      ),
    }
  }

  /// Splits `target = default` elements of a literal that turned out to be a pattern.
  fn pat_with_default(&mut self, id: NodeId) -> SyntaxResult<(NodeId, Option<NodeId>)> {
    if let Syntax::BinaryExpr {
      operator: OperatorName::Assignment,
      left,
      right,
    } = *self.stx(id)
    {
      // The left side was already converted when the assignment was parsed.
      return Ok((left, Some(right)));
    };
    self.lit_to_pat(id)?;
    Ok((id, None))
  }

  /// Converts a literal expression subtree into a pattern, in place.
  /// `{ a: [b] }` could be an object literal or object pattern; this avoids rewinding and reparsing.
  fn lit_to_pat(&mut self, id: NodeId) -> SyntaxResult<()> {
    let loc = self.loc_of(id);
    let invalid = || loc.error(SyntaxErrorType::InvalidAssigmentTarget, None);
    let stx = match self.stx(id).clone() {
      Syntax::IdExpr { name } => Syntax::IdPat { name },
      Syntax::IdPat { .. }
      | Syntax::ArrPat { .. }
      | Syntax::ObjPat { .. }
      | Syntax::MemberExpr { .. }
      | Syntax::ComputedMemberExpr { .. } => return Ok(()),
      Syntax::LitArrExpr { elements } => {
        let mut pat_elements = Vec::<Option<ArrPatElem>>::new();
        let mut rest = None;
        for element in elements {
          if rest.is_some() {
            return Err(invalid());
          };
          match element {
            ArrElem::Single(elem) => {
              let (target, default_value) = self.pat_with_default(elem)?;
              pat_elements.push(Some(ArrPatElem {
                target,
                default_value,
              }));
            }
            ArrElem::Rest(elem) => {
              self.lit_to_pat(elem)?;
              rest = Some(elem);
            }
            ArrElem::Empty => pat_elements.push(None),
          };
        }
        Syntax::ArrPat {
          elements: pat_elements,
          rest,
        }
      }
      Syntax::LitObjExpr { members } => {
        let mut properties = Vec::new();
        let mut rest = None;
        for member in members {
          if rest.is_some() {
            return Err(invalid());
          };
          let Syntax::ObjMember { typ } = self.stx(member).clone() else {
            return Err(invalid());
          };
          match typ {
            ObjMemberType::Valued {
              key,
              val: ClassOrObjVal::Prop(Some(initializer)),
            } => {
              let (target, default_value) = self.pat_with_default(initializer)?;
              *self.ast.stx_mut(member) = Syntax::ObjPatProp {
                key,
                target,
                shorthand: false,
                default_value,
              };
              properties.push(member);
            }
            ObjMemberType::Shorthand { id, default_value } => {
              let name = self.stx(id).ident_name().ok_or_else(invalid)?.to_string();
              self.lit_to_pat(id)?;
              *self.ast.stx_mut(member) = Syntax::ObjPatProp {
                key: ClassOrObjKey::Direct(name),
                target: id,
                shorthand: true,
                default_value,
              };
              properties.push(member);
            }
            ObjMemberType::Rest { val } => {
              if !matches!(self.stx(val), Syntax::IdExpr { .. }) {
                return Err(invalid());
              };
              self.lit_to_pat(val)?;
              rest = Some(val);
            }
            // Methods, getters and setters.
            _ => return Err(invalid()),
          };
        }
        Syntax::ObjPat { properties, rest }
      }
      _ => return Err(invalid()),
    };
    *self.ast.stx_mut(id) = stx;
    Ok(())
  }
}
