use ast::Ast;
use error::SyntaxResult;
use parse::Parser;

pub mod ast;
pub mod char;
pub mod emit;
pub mod error;
pub mod lex;
pub mod loc;
pub mod operator;
pub mod parse;
pub mod scope;
pub mod token;

/// Parses a JavaScript module or script, with JSX, into an editable arena tree.
pub fn parse(source: &str) -> SyntaxResult<Ast> {
  Parser::new(source).parse_top_level()
}
