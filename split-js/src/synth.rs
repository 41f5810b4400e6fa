//! Declares the namespaces that received uses.
use crate::classify::Usage;
use crate::config::ModuleSpec;
use crate::config::NamespaceSpec;
use crate::error::RewriteError;
use crate::error::RewriteErrorKind;
use crate::error::RewriteResult;
use crate::resolve::Binding;
use crate::resolve::BindingForm;
use crate::resolve::ScopeState;
use syntax_js::ast::stx::ImportNames;
use syntax_js::ast::stx::Syntax;
use syntax_js::ast::Ast;
use syntax_js::ast::NodeId;
use syntax_js::operator::OperatorName;
use tracing::debug;

/// What the synthesizer added to the tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Synthesized {
  /// Identifiers of the namespaces that got a new declaration.
  pub inserted: Vec<String>,
  /// Statements inserted after reassignment sites.
  pub replicated_reassignments: usize,
}

/// Fails if a namespace identifier appears anywhere in the file while the alias's scope does not declare it.
pub fn check_scope_conflicts(
  ast: &Ast,
  state: &ScopeState,
  spec: &ModuleSpec,
) -> RewriteResult<()> {
  for (declared, ns) in [
    (state.namespace_a_declared, &spec.namespace_a),
    (state.namespace_b_declared, &spec.namespace_b),
  ] {
    if declared {
      continue;
    };
    let clash = ast
      .descendants(ast.root())
      .into_iter()
      .find(|&n| ast.stx(n).ident_name() == Some(ns.ident.as_str()));
    if let Some(clash) = clash {
      return Err(RewriteError::new(
        RewriteErrorKind::ScopeConflict {
          name: ns.ident.clone(),
          core: spec.core.clone(),
        },
        ast,
        ast.loc(clash),
      ));
    };
  }
  Ok(())
}

/// `require('<module>')`
fn require_call(ast: &mut Ast, module: &str) -> NodeId {
  let callee = ast.alloc_synthetic(Syntax::IdExpr {
    name: "require".to_string(),
  });
  let value = ast.alloc_synthetic(Syntax::LitStrExpr {
    value: module.to_string(),
  });
  let arg = ast.alloc_synthetic(Syntax::CallArg {
    spread: false,
    value,
  });
  ast.alloc_synthetic(Syntax::CallExpr {
    optional_chaining: false,
    callee,
    arguments: vec![arg],
  })
}

/// A declaration of `ns` shaped like the original binding.
fn namespace_decl(ast: &mut Ast, binding: &Binding, ns: &NamespaceSpec) -> NodeId {
  let alias = ast.alloc_synthetic(Syntax::IdPat {
    name: ns.ident.clone(),
  });
  match binding.form {
    BindingForm::Declaration { kind } => {
      let initializer = binding
        .has_initializer
        .then(|| require_call(ast, &ns.module));
      let declarator = ast.alloc_synthetic(Syntax::VarDeclarator {
        pattern: alias,
        initializer,
      });
      ast.alloc_synthetic(Syntax::VarDecl {
        export: false,
        mode: kind,
        declarators: vec![declarator],
      })
    }
    BindingForm::Import { namespace } => ast.alloc_synthetic(Syntax::ImportStmt {
      default: (!namespace).then_some(alias),
      names: namespace.then_some(ImportNames::All(alias)),
      module: ns.module.clone(),
    }),
  }
}

/// `<ident> = require('<module>');`
fn reassignment_stmt(ast: &mut Ast, ns: &NamespaceSpec) -> NodeId {
  let left = ast.alloc_synthetic(Syntax::IdPat {
    name: ns.ident.clone(),
  });
  let right = require_call(ast, &ns.module);
  let expr = ast.alloc_synthetic(Syntax::BinaryExpr {
    operator: OperatorName::Assignment,
    left,
    right,
  });
  ast.alloc_synthetic(Syntax::ExprStmt { expr })
}

/// Inserts a declaration for each namespace that has uses and no existing declaration, directly after the
/// original declaration and after every reassignment site. Namespace A goes first.
pub fn synthesize(
  ast: &mut Ast,
  binding: &Binding,
  state: &ScopeState,
  usage: &Usage,
  spec: &ModuleSpec,
) -> RewriteResult<Synthesized> {
  let mut out = Synthesized::default();
  let needed: Vec<&NamespaceSpec> = [
    (usage.tally.namespace_a, state.namespace_a_declared, &spec.namespace_a),
    (usage.tally.namespace_b, state.namespace_b_declared, &spec.namespace_b),
  ]
  .into_iter()
  .filter(|(uses, declared, _)| *uses > 0 && !declared)
  .map(|(_, _, ns)| ns)
  .collect();

  let mut anchor = binding.statement;
  for &ns in &needed {
    let decl = namespace_decl(ast, binding, ns);
    if !ast.insert_after(anchor, decl) {
      return Err(RewriteError::new(
        RewriteErrorKind::UnsupportedConstruct {
          construct: "declaration outside a statement list",
        },
        ast,
        ast.loc(binding.statement),
      ));
    };
    debug!(ident = %ns.ident, module = %ns.module, "inserted declaration");
    out.inserted.push(ns.ident.clone());
    anchor = decl;
  }

  for &site in &usage.reassignments {
    let mut anchor = site;
    for &ns in &needed {
      let stmt = reassignment_stmt(ast, ns);
      if ast.insert_after(anchor, stmt) {
        out.replicated_reassignments += 1;
        anchor = stmt;
      };
    }
  }
  if out.replicated_reassignments > 0 {
    debug!(count = out.replicated_reassignments, "replicated reassignments");
  };
  Ok(out)
}
