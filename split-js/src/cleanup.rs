//! Drops the core declaration once nothing uses it.
use crate::classify::Usage;
use crate::error::RewriteError;
use crate::error::RewriteErrorKind;
use crate::error::RewriteResult;
use crate::resolve::Binding;
use syntax_js::ast::stx::Syntax;
use syntax_js::ast::Ast;
use syntax_js::ast::NodeId;
use tracing::debug;

fn remove_statement(ast: &mut Ast, stmt: NodeId) -> RewriteResult<()> {
  let removed = ast
    .parent(stmt)
    .is_some_and(|list| ast.remove_from_list(list, stmt));
  if !removed {
    return Err(RewriteError::new(
      RewriteErrorKind::UnsupportedConstruct {
        construct: "statement outside a statement list",
      },
      ast,
      ast.loc(stmt),
    ));
  };
  Ok(())
}

/// Removes the original declaration and every reassignment site when all uses moved to a namespace. Returns
/// whether anything was removed.
pub fn cleanup(ast: &mut Ast, binding: &Binding, usage: &Usage) -> RewriteResult<bool> {
  if !usage.tally.any_namespace() || usage.tally.core > 0 {
    return Ok(false);
  };
  let sole_declarator = match ast.stx(binding.statement) {
    Syntax::VarDecl { declarators, .. } => declarators.len() == 1,
    _ => true,
  };
  if binding.declaration == binding.statement || sole_declarator {
    remove_statement(ast, binding.statement)?;
  } else {
    ast.remove_from_list(binding.statement, binding.declaration);
  };
  debug!(alias = %binding.alias, "removed core declaration");
  for &site in &usage.reassignments {
    remove_statement(ast, site)?;
  }
  Ok(true)
}
