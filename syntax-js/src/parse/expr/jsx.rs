use crate::ast::stx::Syntax;
use crate::ast::NodeId;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::loc::Loc;
use crate::parse::Parser;
use crate::token::Token;
use crate::token::TT;

fn same_tag_name(a: &Syntax, b: &Syntax) -> bool {
  match (a, b) {
    (
      Syntax::JsxName {
        namespace: a_ns,
        name: a_name,
      },
      Syntax::JsxName {
        namespace: b_ns,
        name: b_name,
      },
    ) => a_ns == b_ns && a_name == b_name,
    (
      Syntax::JsxMemberExpr {
        base: a_base,
        path: a_path,
      },
      Syntax::JsxMemberExpr {
        base: b_base,
        path: b_path,
      },
    ) => a_base == b_base && a_path == b_path,
    _ => false,
  }
}

impl<'a> Parser<'a> {
  /// JSX names can be any identifier or keyword, and may contain hyphens.
  fn jsx_name_token(&mut self) -> SyntaxResult<Token> {
    let t = self.consume_with_mode(LexMode::JsxTag);
    if t.typ.is_identifier_name() {
      Ok(t)
    } else if t.typ == TT::EOF {
      Err(t.error(SyntaxErrorType::UnexpectedEnd))
    } else {
      Err(t.error(SyntaxErrorType::ExpectedSyntax("JSX name")))
    }
  }

  /// Parses a tag name like `div`, `ab-cd`, `Foo.Bar` or `svg:rect` without allocating a node.
  fn jsx_tag_name(&mut self) -> SyntaxResult<(Loc, Syntax)> {
    let start = self.jsx_name_token()?;
    let mut loc = start.loc;
    let base = self.string(start.loc);
    if self
      .maybe_consume_with_mode(TT::Colon, LexMode::JsxTag)
      .is_match()
    {
      let name = self.jsx_name_token()?;
      loc += name.loc;
      return Ok((loc, Syntax::JsxName {
        namespace: Some(base),
        name: self.string(name.loc),
      }));
    };
    let mut path = Vec::new();
    while self
      .maybe_consume_with_mode(TT::Dot, LexMode::JsxTag)
      .is_match()
    {
      let part = self.jsx_name_token()?;
      loc += part.loc;
      path.push(self.string(part.loc));
    }
    let stx = if path.is_empty() {
      Syntax::JsxName {
        namespace: None,
        name: base,
      }
    } else {
      Syntax::JsxMemberExpr { base, path }
    };
    Ok((loc, stx))
  }

  /// Parses `{expr}` or the empty `{}` used for comments.
  fn jsx_expr_container(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let value = if p.peek().typ == TT::BraceClose {
        None
      } else {
        Some(p.expr([TT::BraceClose])?)
      };
      p.require(TT::BraceClose)?;
      Ok(Syntax::JsxExprContainer { value })
    })
  }

  /// Parses an attribute value: a string, an expression container, or an element.
  fn jsx_attr_val(&mut self) -> SyntaxResult<NodeId> {
    let t = self.peek_with_mode(LexMode::JsxTag);
    match t.typ {
      TT::LiteralString => {
        self.consume_with_mode(LexMode::JsxTag);
        // JSX attribute strings have no escape sequences.
        let raw = self.str(t.loc);
        let value = raw[1..raw.len() - 1].to_string();
        Ok(self.node(t.loc, Syntax::LitStrExpr { value }))
      }
      TT::BraceOpen => self.jsx_expr_container(),
      TT::ChevronLeft => self.jsx_elem(),
      TT::EOF => Err(t.error(SyntaxErrorType::UnexpectedEnd)),
      _ => Err(t.error(SyntaxErrorType::ExpectedSyntax("JSX attribute value"))),
    }
  }

  /// Parses `name`, `name="value"`, `ns:name={expr}` or `{...spread}`.
  fn jsx_attr(&mut self) -> SyntaxResult<NodeId> {
    if self.peek_with_mode(LexMode::JsxTag).typ == TT::BraceOpen {
      return self.with_loc(|p| {
        p.require(TT::BraceOpen)?;
        p.require(TT::DotDotDot)?;
        let value = p.expr([TT::BraceClose])?;
        p.require(TT::BraceClose)?;
        Ok(Syntax::JsxSpreadAttr { value })
      });
    };
    self.with_loc(|p| {
      let start = p.jsx_name_token()?;
      let mut name = p.string(start.loc);
      if p
        .maybe_consume_with_mode(TT::Colon, LexMode::JsxTag)
        .is_match()
      {
        let local = p.jsx_name_token()?;
        name = format!("{}:{}", name, p.str(local.loc));
      };
      let value = if p
        .maybe_consume_with_mode(TT::Equals, LexMode::JsxTag)
        .is_match()
      {
        Some(p.jsx_attr_val()?)
      } else {
        None
      };
      Ok(Syntax::JsxAttr { name, value })
    })
  }

  /// Parses children up to, but not including, the closing tag.
  fn jsx_children(&mut self) -> SyntaxResult<Vec<NodeId>> {
    let mut children = Vec::new();
    loop {
      let text = self.peek_with_mode(LexMode::JsxTextContent);
      if text.typ == TT::JsxTextContent && !text.loc.is_empty() {
        self.consume_with_mode(LexMode::JsxTextContent);
        let value = self.string(text.loc);
        children.push(self.node(text.loc, Syntax::JsxText { value }));
        continue;
      };
      let t = self.peek();
      match t.typ {
        TT::ChevronLeftSlash => break,
        TT::BraceOpen => children.push(self.jsx_expr_container()?),
        TT::ChevronLeft => children.push(self.jsx_elem()?),
        TT::EOF => return Err(t.error(SyntaxErrorType::UnexpectedEnd)),
        _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("JSX child"))),
      };
    }
    Ok(children)
  }

  /// Parses an element like `<a href="x">b</a>`, `<Foo.Bar {...props} />`, or a fragment `<>a</>`.
  pub fn jsx_elem(&mut self) -> SyntaxResult<NodeId> {
    self.with_loc(|p| {
      p.require(TT::ChevronLeft)?;
      if p
        .maybe_consume_with_mode(TT::ChevronRight, LexMode::JsxTag)
        .is_match()
      {
        let children = p.jsx_children()?;
        p.require(TT::ChevronLeftSlash)?;
        p.require_with_mode(TT::ChevronRight, LexMode::JsxTag)?;
        return Ok(Syntax::JsxElem {
          name: None,
          attributes: Vec::new(),
          children,
        });
      };
      let (name_loc, name_stx) = p.jsx_tag_name()?;
      let mut attributes = Vec::new();
      loop {
        let t = p.peek_with_mode(LexMode::JsxTag);
        match t.typ {
          TT::Slash => {
            p.consume_with_mode(LexMode::JsxTag);
            p.require_with_mode(TT::ChevronRight, LexMode::JsxTag)?;
            let name = p.node(name_loc, name_stx);
            return Ok(Syntax::JsxElem {
              name: Some(name),
              attributes,
              children: Vec::new(),
            });
          }
          TT::ChevronRight => {
            p.consume_with_mode(LexMode::JsxTag);
            break;
          }
          TT::EOF => return Err(t.error(SyntaxErrorType::UnexpectedEnd)),
          _ => attributes.push(p.jsx_attr()?),
        };
      }
      let name = p.node(name_loc, name_stx);
      let children = p.jsx_children()?;
      p.require(TT::ChevronLeftSlash)?;
      let (close_loc, close_stx) = p.jsx_tag_name()?;
      if !same_tag_name(p.stx(name), &close_stx) {
        return Err(close_loc.error(SyntaxErrorType::JsxClosingTagMismatch, None));
      };
      p.require_with_mode(TT::ChevronRight, LexMode::JsxTag)?;
      Ok(Syntax::JsxElem {
        name: Some(name),
        attributes,
        children,
      })
    })
  }
}
