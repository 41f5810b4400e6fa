use super::Parser;
use crate::ast::stx::Syntax;
use crate::ast::NodeId;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// Runs `f` and allocates its syntax as a node covering every token `f` consumed.
  pub fn with_loc<F>(&mut self, f: F) -> SyntaxResult<NodeId>
  where
    F: FnOnce(&mut Self) -> SyntaxResult<Syntax>,
  {
    let start = self.checkpoint();
    let stx = f(self)?;
    let loc = self.since_checkpoint(&start);
    Ok(self.node(loc, stx))
  }

  /// Calls `f` until the next token is `end`, which is left unconsumed.
  pub fn repeat_until_tt<S, F>(&mut self, end: TT, f: F) -> SyntaxResult<Vec<S>>
  where
    F: Fn(&mut Self) -> SyntaxResult<S>,
  {
    let mut items = Vec::new();
    while self.peek().typ != end {
      items.push(f(self)?);
    }
    Ok(items)
  }

  /// Parses `delim`-separated nodes up to and including `close`. A trailing `delim` is allowed.
  pub fn list_with_loc<F>(&mut self, delim: TT, close: TT, f: F) -> SyntaxResult<Vec<NodeId>>
  where
    F: Fn(&mut Self) -> SyntaxResult<Syntax>,
  {
    let mut items = Vec::new();
    loop {
      if self.consume_if(close).is_match() {
        return Ok(items);
      };
      items.push(self.with_loc(&f)?);
      if !self.consume_if(delim).is_match() {
        self.require(close)?;
        return Ok(items);
      };
    }
  }

  /// Runs `f`, and if it gives up by returning None, rewinds to where it started.
  pub fn rewindable<S, F>(&mut self, f: F) -> SyntaxResult<Option<S>>
  where
    F: FnOnce(&mut Self) -> SyntaxResult<Option<S>>,
  {
    let start = self.checkpoint();
    let result = f(self)?;
    if result.is_none() {
      self.restore_checkpoint(start);
    };
    Ok(result)
  }

  /// Ends a statement with `;`, or without one where automatic semicolon insertion allows it: before
  /// `}`, at the end of input, or on a new line.
  pub fn semicolon_or_asi(&mut self, did_end_with_asi: bool) -> SyntaxResult<()> {
    if did_end_with_asi || self.consume_if(TT::Semicolon).is_match() {
      return Ok(());
    };
    let t = self.peek();
    if t.preceded_by_line_terminator || matches!(t.typ, TT::BraceClose | TT::EOF) {
      Ok(())
    } else {
      Err(t.error(SyntaxErrorType::RequiredTokenNotFound(TT::Semicolon)))
    }
  }
}
