use crate::ast::stx::Syntax;
use crate::ast::Ast;
use crate::ast::NodeId;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::lex::Lexer;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;

pub mod class_or_object;
pub mod drive;
pub mod expr;
pub mod func;
pub mod import_export;
pub mod operator;
pub mod stmt;
#[cfg(test)]
mod tests;

/// Outcome of consuming a token only if it has the expected type.
#[must_use]
pub struct MaybeToken {
  matched: bool,
}

impl MaybeToken {
  pub fn is_match(&self) -> bool {
    self.matched
  }

  pub fn and_then<R, F: FnOnce() -> SyntaxResult<R>>(self, f: F) -> SyntaxResult<Option<R>> {
    if self.matched {
      f().map(Some)
    } else {
      Ok(None)
    }
  }
}

pub struct ParserCheckpoint {
  cursor: usize,
  nodes: usize,
}

struct Lexed {
  token: Token,
  mode: LexMode,
}

pub struct Parser<'a> {
  lexer: Lexer<'a>,
  /// Every token lexed so far. Those from `cursor` on are lookahead, and are relexed when asked for
  /// in a different mode.
  tokens: Vec<Lexed>,
  cursor: usize,
  ast: Ast,
}

// The grammar lives in the submodules, as further `impl Parser` blocks.
impl<'a> Parser<'a> {
  pub fn new(source: &'a str) -> Parser<'a> {
    Parser {
      lexer: Lexer::new(source),
      tokens: Vec::new(),
      cursor: 0,
      ast: Ast::new(source.to_string()),
    }
  }

  pub fn str(&self, loc: Loc) -> &str {
    &self.lexer[loc]
  }

  pub fn string(&self, loc: Loc) -> String {
    self.str(loc).to_string()
  }

  pub fn node(&mut self, loc: Loc, stx: Syntax) -> NodeId {
    self.ast.alloc(loc, stx)
  }

  pub fn loc_of(&self, id: NodeId) -> Loc {
    self.ast.loc(id)
  }

  pub fn stx(&self, id: NodeId) -> &Syntax {
    self.ast.stx(id)
  }

  pub fn checkpoint(&self) -> ParserCheckpoint {
    ParserCheckpoint {
      cursor: self.cursor,
      nodes: self.ast.len(),
    }
  }

  /// Range of the tokens consumed since the checkpoint, or an empty range where it was taken.
  pub fn since_checkpoint(&self, checkpoint: &ParserCheckpoint) -> Loc {
    if self.cursor <= checkpoint.cursor {
      let end = match checkpoint.cursor {
        0 => 0,
        i => self.tokens[i - 1].token.loc.1,
      };
      return Loc::at(end);
    };
    self.tokens[checkpoint.cursor].token.loc + self.tokens[self.cursor - 1].token.loc
  }

  /// Rewinds the token stream and drops the nodes allocated since the checkpoint.
  pub fn restore_checkpoint(&mut self, checkpoint: ParserCheckpoint) {
    self.cursor = checkpoint.cursor;
    self.ast.truncate(checkpoint.nodes);
  }

  /// The token at the cursor as lexed in `mode`.
  fn lookahead(&mut self, mode: LexMode) -> Token {
    match self.tokens.get(self.cursor).map(|t| t.mode) {
      Some(lexed_in) if lexed_in == mode => return self.tokens[self.cursor].token.clone(),
      Some(_) => {
        self.tokens.truncate(self.cursor);
        let resume = self.tokens.last().map_or(0, |t| t.token.loc.1);
        self.lexer.set_next(resume);
      }
      None => {}
    };
    let token = self.lexer.next_token(mode);
    self.tokens.push(Lexed {
      token: token.clone(),
      mode,
    });
    token
  }

  pub fn peek_with_mode(&mut self, mode: LexMode) -> Token {
    self.lookahead(mode)
  }

  pub fn peek(&mut self) -> Token {
    self.lookahead(LexMode::Standard)
  }

  pub fn peek_n_with_mode<const N: usize>(&mut self, modes: [LexMode; N]) -> [Token; N] {
    let start = self.cursor;
    let tokens = modes.map(|mode| self.consume_with_mode(mode));
    self.cursor = start;
    tokens
  }

  pub fn peek_n<const N: usize>(&mut self) -> [Token; N] {
    self.peek_n_with_mode([LexMode::Standard; N])
  }

  pub fn consume_with_mode(&mut self, mode: LexMode) -> Token {
    let token = self.lookahead(mode);
    self.cursor += 1;
    token
  }

  pub fn consume(&mut self) -> Token {
    self.consume_with_mode(LexMode::Standard)
  }

  pub fn maybe_consume_with_mode(&mut self, typ: TT, mode: LexMode) -> MaybeToken {
    let token = self.lookahead(mode);
    let matched = token.typ == typ;
    if matched {
      self.cursor += 1;
    };
    MaybeToken { matched }
  }

  pub fn consume_if(&mut self, typ: TT) -> MaybeToken {
    self.maybe_consume_with_mode(typ, LexMode::Standard)
  }

  pub fn require_with_mode(&mut self, typ: TT, mode: LexMode) -> SyntaxResult<Token> {
    let token = self.consume_with_mode(mode);
    match token.typ {
      found if found == typ => Ok(token),
      TT::EOF => Err(token.error(SyntaxErrorType::UnexpectedEnd)),
      _ => Err(token.error(SyntaxErrorType::RequiredTokenNotFound(typ))),
    }
  }

  pub fn require(&mut self, typ: TT) -> SyntaxResult<Token> {
    self.require_with_mode(typ, LexMode::Standard)
  }

  /// A word that can name a binding, which includes contextual keywords like `from` or `of`.
  pub fn require_identifier(&mut self) -> SyntaxResult<Token> {
    let token = self.consume();
    if token.typ.is_identifier_like() {
      Ok(token)
    } else {
      Err(token.error(SyntaxErrorType::ExpectedSyntax("identifier")))
    }
  }

  pub fn parse_top_level(mut self) -> SyntaxResult<Ast> {
    let body = self.stmts(TT::EOF)?;
    self.require(TT::EOF)?;
    let root = self.node(self.lexer.source_range(), Syntax::TopLevel { body });
    let mut ast = self.ast;
    ast.set_root(root);
    ast.link_parents();
    Ok(ast)
  }
}
