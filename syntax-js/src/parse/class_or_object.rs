use super::expr::Asi;
use super::Parser;
use crate::ast::stx::ClassOrObjKey;
use crate::ast::stx::ClassOrObjVal;
use crate::ast::stx::FuncBody;
use crate::ast::stx::ObjMemberType;
use crate::ast::stx::Syntax;
use crate::ast::NodeId;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::Token;
use crate::token::Kw;
use crate::token::TT;

// Tokens that can follow a member name, meaning the preceding `async`, `get`, `set` or `static` is the name
// itself rather than a modifier.
fn ends_member_name(t: &Token) -> bool {
  matches!(
    t.typ,
    TT::ParenthesisOpen | TT::Equals | TT::Colon | TT::Comma | TT::Semicolon | TT::BraceClose
  )
}

impl<'a> Parser<'a> {
  pub fn class_body(&mut self) -> SyntaxResult<Vec<NodeId>> {
    self.require(TT::BraceOpen)?;
    let mut members = Vec::new();
    loop {
      if self.consume_if(TT::Semicolon).is_match() {
        continue;
      };
      if self.peek().typ == TT::BraceClose {
        break;
      };
      let member = self.with_loc(|p| {
        let [a, b] = p.peek_n::<2>();
        let static_ = a.typ == TT::Kw(Kw::Static) && !ends_member_name(&b);
        if static_ {
          p.consume();
          if p.peek().typ == TT::BraceOpen {
            let block = p.func_block_body()?;
            return Ok(Syntax::ClassMember {
              static_,
              key: ClassOrObjKey::Direct("static".to_string()),
              val: ClassOrObjVal::StaticBlock(block),
            });
          };
        };
        let (key, _, method) = p.class_or_obj_member()?;
        let val = match method {
          Some(val) => val,
          None => {
            let initializer = if p.consume_if(TT::Equals).is_match() {
              let mut asi = Asi::can();
              Some(p.expr_with_asi([TT::Semicolon, TT::BraceClose], &mut asi)?)
            } else {
              None
            };
            p.semicolon_or_asi(false)?;
            ClassOrObjVal::Prop(initializer)
          }
        };
        Ok(Syntax::ClassMember { static_, key, val })
      })?;
      members.push(member);
    }
    self.require(TT::BraceClose)?;
    Ok(members)
  }

  /// Parses a class or object key like `a`, `'a'`, `#a`, `"a"`, `1`, `[1]`. Also returns the key's first token.
  pub fn class_or_obj_key(&mut self) -> SyntaxResult<(ClassOrObjKey, Token)> {
    let t = self.peek();
    let key = match t.typ {
      TT::BracketOpen => {
        self.consume();
        let key = self.expr([TT::BracketClose])?;
        self.require(TT::BracketClose)?;
        ClassOrObjKey::Computed(key)
      }
      TT::LiteralString => ClassOrObjKey::Direct(self.lit_str_val()?.1),
      TT::LiteralNumber | TT::LiteralBigInt | TT::PrivateMember | TT::Identifier => {
        self.consume();
        ClassOrObjKey::Direct(self.string(t.loc))
      }
      // Any keyword is allowed as a key.
      typ if typ.is_identifier_name() => {
        self.consume();
        ClassOrObjKey::Direct(self.string(t.loc))
      }
      TT::EOF => return Err(t.error(SyntaxErrorType::UnexpectedEnd)),
      _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("keyword or identifier"))),
    };
    Ok((key, t))
  }

  fn class_or_obj_func(&mut self, async_: bool, generator: bool) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      let parameters = p.func_params()?;
      let body = FuncBody::Block(p.func_block_body()?);
      Ok(Syntax::Func {
        arrow: false,
        async_,
        generator,
        parameters,
        body,
      })
    })
  }

  // It's one of these:
  // - async? '*'? <key> '(' ...
  // - [ get | set ] <key> '(' ...
  // - <key>, returning no value so the caller can parse a property.
  // where <key> = <ident> | <keyword> | <str> | <num> | '[' <expr> ']'
  pub fn class_or_obj_member(&mut self) -> SyntaxResult<(ClassOrObjKey, Token, Option<ClassOrObjVal>)> {
    let [a, b] = self.peek_n::<2>();
    let is_async =
      a.typ == TT::Kw(Kw::Async) && !ends_member_name(&b) && !b.preceded_by_line_terminator;
    if is_async {
      self.consume();
    };
    let generator = self.consume_if(TT::Asterisk).is_match();
    let accessor = match a.typ {
      TT::Kw(Kw::Get) | TT::Kw(Kw::Set) if !is_async && !generator && !ends_member_name(&b) => {
        self.consume();
        Some(a.typ)
      }
      _ => None,
    };
    let (key, key_tok) = self.class_or_obj_key()?;
    let t = self.peek();
    if t.typ != TT::ParenthesisOpen {
      if is_async || generator || accessor.is_some() {
        return Err(t.error(SyntaxErrorType::RequiredTokenNotFound(TT::ParenthesisOpen)));
      };
      return Ok((key, key_tok, None));
    };
    let func = self.class_or_obj_func(is_async, generator)?;
    let val = match accessor {
      Some(TT::Kw(Kw::Get)) => ClassOrObjVal::Getter(func),
      Some(_) => ClassOrObjVal::Setter(func),
      None => ClassOrObjVal::Method(func),
    };
    Ok((key, key_tok, Some(val)))
  }

  pub fn lit_obj(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let mut members = Vec::new();
      loop {
        if p.consume_if(TT::BraceClose).is_match() {
          break;
        };
        let member = p.with_loc(|p| {
          if p.consume_if(TT::DotDotDot).is_match() {
            let val = p.expr([TT::Comma, TT::BraceClose])?;
            return Ok(Syntax::ObjMember {
              typ: ObjMemberType::Rest { val },
            });
          };
          let (key, key_tok, method) = p.class_or_obj_member()?;
          if let Some(val) = method {
            return Ok(Syntax::ObjMember {
              typ: ObjMemberType::Valued { key, val },
            });
          };
          if p.consume_if(TT::Colon).is_match() {
            let val = p.expr([TT::Comma, TT::BraceClose])?;
            return Ok(Syntax::ObjMember {
              typ: ObjMemberType::Valued {
                key,
                val: ClassOrObjVal::Prop(Some(val)),
              },
            });
          };
          // Shorthand, like `{a}` or `{a = 1}` in a pattern.
          let ClassOrObjKey::Direct(name) = key else {
            return Err(key_tok.error(SyntaxErrorType::RequiredTokenNotFound(TT::Colon)));
          };
          if !key_tok.typ.is_identifier_like() {
            return Err(key_tok.error(SyntaxErrorType::RequiredTokenNotFound(TT::Colon)));
          };
          let id = p.node(key_tok.loc, Syntax::IdExpr { name });
          let default_value = if p.consume_if(TT::Equals).is_match() {
            Some(p.expr([TT::Comma, TT::BraceClose])?)
          } else {
            None
          };
          Ok(Syntax::ObjMember {
            typ: ObjMemberType::Shorthand { id, default_value },
          })
        })?;
        members.push(member);
        if !p.consume_if(TT::Comma).is_match() {
          p.require(TT::BraceClose)?;
          break;
        };
      }
      Ok(Syntax::LitObjExpr { members })
    })
  }
}
