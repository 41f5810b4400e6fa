mod expr;
mod stmt;

use super::Parser;
use crate::ast::Ast;
use crate::ast::NodeId;
use crate::lex::LexMode;
use crate::token::Kw;
use crate::token::TT;

/// Statements of the top level.
fn top(ast: &Ast) -> Vec<NodeId> {
  ast.children(ast.root())
}

#[test]
fn test_parser() {
  let mut p = Parser::new("let x = /a/ / 1;");
  // Initial state.
  let cp = p.checkpoint();
  assert_eq!(p.cursor, 0);

  // Peek the first token.
  let t = p.peek();
  assert_eq!(p.cursor, 0);
  assert_eq!(p.tokens.len(), 1);
  assert_eq!(t.typ, TT::Kw(Kw::Let));

  // Consume the first token.
  let t = p.consume();
  assert_eq!(p.cursor, 1);
  assert_eq!(p.tokens.len(), 1);
  assert_eq!(t.typ, TT::Kw(Kw::Let));

  // Consume the second token.
  let t = p.consume();
  assert_eq!(p.cursor, 2);
  assert_eq!(p.tokens.len(), 2);
  assert_eq!(t.typ, TT::Identifier);

  // Reset to a past point.
  p.restore_checkpoint(cp);
  assert_eq!(p.cursor, 0);
  assert_eq!(p.tokens.len(), 2);

  // Peek using a different mode, which should truncate the buffer.
  let t = p.peek_with_mode(LexMode::SlashIsRegex);
  assert_eq!(p.cursor, 0);
  assert_eq!(p.tokens.len(), 1);
  assert_eq!(t.typ, TT::Kw(Kw::Let));
}

#[test]
fn test_restore_checkpoint_discards_nodes() {
  let mut p = Parser::new("a b");
  let cp = p.checkpoint();
  p.id_expr().unwrap();
  p.id_expr().unwrap();
  assert_eq!(p.ast.len(), 2);
  p.restore_checkpoint(cp);
  assert_eq!(p.ast.len(), 0);
  assert_eq!(p.peek().typ, TT::Identifier);
}

#[test]
fn test_top_level_covers_whole_source() {
  let src = "  // leading\nfoo();\n\n";
  let ast = crate::parse(src).unwrap();
  assert_eq!(ast.loc(ast.root()).0, 0);
  assert_eq!(ast.loc(ast.root()).1, src.len());
  assert_eq!(top(&ast).len(), 1);
  assert_eq!(ast.text(ast.loc(top(&ast)[0])), "foo();");
}
