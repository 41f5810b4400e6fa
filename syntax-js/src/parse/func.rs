use super::Parser;
use crate::ast::stx::Syntax;
use crate::ast::NodeId;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// Parses `(a, b = 1, ...c)`.
  pub fn func_params(&mut self) -> SyntaxResult<Vec<NodeId>> {
    self.require(TT::ParenthesisOpen)?;
    self.list_with_loc(TT::Comma, TT::ParenthesisClose, |p| {
      let rest = p.consume_if(TT::DotDotDot).is_match();
      let pattern = p.pat()?;
      let default_value = if rest {
        None
      } else {
        p.consume_if(TT::Equals)
          .and_then(|| p.expr([TT::Comma, TT::ParenthesisClose]))?
      };
      Ok(Syntax::ParamDecl {
        rest,
        pattern,
        default_value,
      })
    })
  }

  /// Function bodies are ordinary blocks, so their statement lists can be edited like any other.
  pub fn func_block_body(&mut self) -> SyntaxResult<NodeId> {
    self.block_stmt()
  }

  pub fn maybe_class_or_func_name(&mut self) -> Option<NodeId> {
    let t = self.peek();
    if !t.typ.is_identifier_like() {
      return None;
    };
    self.consume();
    let name = self.string(t.loc);
    Some(self.node(t.loc, Syntax::ClassOrFuncName { name }))
  }
}
