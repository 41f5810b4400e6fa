//! Finds the declaration that binds the core module in a file.
use crate::config::ModuleSpec;
use crate::error::RewriteError;
use crate::error::RewriteErrorKind;
use crate::error::RewriteResult;
use crate::table::ClassificationTable;
use syntax_js::ast::stx::ClassOrObjKey;
use syntax_js::ast::stx::ImportNames;
use syntax_js::ast::stx::Syntax;
use syntax_js::ast::stx::VarDeclMode;
use syntax_js::ast::Ast;
use syntax_js::ast::NodeId;
use syntax_js::char::is_id_continue;
use syntax_js::char::is_id_start;
use syntax_js::operator::OperatorName;
use syntax_js::scope::ScopeId;
use syntax_js::scope::Scopes;
use tracing::debug;
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingForm {
  Declaration { kind: VarDeclMode },
  Import { namespace: bool },
}

/// The single declaration site that introduces the core alias.
#[derive(Clone, Debug)]
pub struct Binding {
  pub alias: String,
  pub form: BindingForm,
  /// The `VarDeclarator`, or the `ImportStmt` for the import form.
  pub declaration: NodeId,
  /// The statement holding `declaration`.
  pub statement: NodeId,
  pub has_initializer: bool,
  pub scope: ScopeId,
  /// Binding site of the alias. References that resolve elsewhere are not uses of this binding.
  pub symbol: NodeId,
  /// Named core imports sharing the import statement.
  pub pinned_core_uses: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScopeState {
  pub namespace_a_declared: bool,
  pub namespace_b_declared: bool,
}

/// Whether `node` is `require('<module>')`.
pub(crate) fn is_module_load(ast: &Ast, node: NodeId, module: &str) -> bool {
  let Syntax::CallExpr {
    optional_chaining: false,
    callee,
    arguments,
  } = ast.stx(node)
  else {
    return false;
  };
  if ast.stx(*callee).ident_name() != Some("require") || arguments.len() != 1 {
    return false;
  };
  let Syntax::CallArg {
    spread: false,
    value,
  } = ast.stx(arguments[0])
  else {
    return false;
  };
  matches!(ast.stx(*value), Syntax::LitStrExpr { value } if value == module)
}

/// The member an object pattern key names: an identifier or a string literal. Computed, numeric and other keys
/// return None.
pub(crate) fn static_key_name(key: &ClassOrObjKey) -> Option<&str> {
  let ClassOrObjKey::Direct(raw) = key else {
    return None;
  };
  let first = raw.chars().next()?;
  if (first == '\'' || first == '"') && raw.len() >= 2 && raw.ends_with(first) {
    return Some(&raw[1..raw.len() - 1]);
  };
  if is_identifier_key(raw) {
    return Some(raw);
  };
  None
}

fn is_identifier_key(raw: &str) -> bool {
  let mut chars = raw.chars();
  chars.next().is_some_and(is_id_start) && chars.all(is_id_continue)
}

/// Object pattern keys that are all plain identifiers naming core members.
fn is_all_core_pattern(ast: &Ast, pattern: NodeId, table: &ClassificationTable) -> bool {
  let Syntax::ObjPat {
    properties,
    rest: None,
  } = ast.stx(pattern)
  else {
    return false;
  };
  properties.iter().all(|&prop| {
    matches!(ast.stx(prop), Syntax::ObjPatProp {
      key: ClassOrObjKey::Direct(raw),
      ..
    } if is_identifier_key(raw) && table.is_core(raw))
  })
}

struct Candidate {
  binding: Binding,
  site: NodeId,
}

struct Resolver<'a> {
  ast: &'a Ast,
  scopes: &'a Scopes,
  spec: &'a ModuleSpec,
  table: &'a ClassificationTable,
}

impl<'a> Resolver<'a> {
  fn error(&self, kind: RewriteErrorKind, node: NodeId) -> RewriteError {
    RewriteError::new(kind, self.ast, self.ast.loc(node))
  }

  fn unsupported_destructuring(&self, node: NodeId) -> RewriteError {
    self.error(
      RewriteErrorKind::UnsupportedDestructuring {
        module: self.spec.core.clone(),
      },
      node,
    )
  }

  fn declarator_binding(&self, declarator: NodeId, site: NodeId) -> RewriteResult<Binding> {
    let ast = self.ast;
    let outside = || {
      self.error(
        RewriteErrorKind::UnsupportedConstruct {
          construct: "declarator outside a declaration",
        },
        declarator,
      )
    };
    let statement = ast.parent(declarator).ok_or_else(outside)?;
    let (Syntax::VarDecl { mode, .. }, Syntax::VarDeclarator { initializer, .. }) =
      (ast.stx(statement), ast.stx(declarator))
    else {
      return Err(outside());
    };
    Ok(Binding {
      alias: ast.stx(site).ident_name().unwrap_or_default().to_string(),
      form: BindingForm::Declaration { kind: *mode },
      declaration: declarator,
      statement,
      has_initializer: initializer.is_some(),
      scope: self
        .scopes
        .binding_scope(site)
        .unwrap_or_else(|| self.scopes.scope_of(site)),
      symbol: site,
      pinned_core_uses: 0,
    })
  }

  fn require_site(&self, call: NodeId) -> RewriteResult<Option<Binding>> {
    let ast = self.ast;
    let Some(parent) = ast.parent(call) else {
      return Ok(None);
    };
    match ast.stx(parent) {
      Syntax::VarDeclarator {
        pattern,
        initializer: Some(init),
      } if *init == call => match ast.stx(*pattern) {
        Syntax::IdPat { .. } => self.declarator_binding(parent, *pattern).map(Some),
        // `var {PropTypes} = require('React')` has nothing to migrate.
        Syntax::ObjPat { .. } if is_all_core_pattern(ast, *pattern, self.table) => Ok(None),
        _ => Err(self.unsupported_destructuring(call)),
      },
      Syntax::BinaryExpr {
        operator: OperatorName::Assignment,
        left,
        right,
      } if *right == call => {
        let Syntax::IdPat { name } = ast.stx(*left) else {
          return Err(self.unsupported_destructuring(call));
        };
        let scope = self.scopes.scope_of(*left);
        let sites = self
          .scopes
          .lookup(scope, name)
          .map(|declaring| self.scopes.bindings(declaring, name))
          .unwrap_or(&[]);
        if sites.len() != 1 {
          return Err(self.error(
            RewriteErrorKind::UnexpectedBindingCount {
              name: name.clone(),
              count: sites.len(),
            },
            call,
          ));
        };
        let site = sites[0];
        let declarator = ast
          .parent(site)
          .filter(|&d| matches!(ast.stx(d), Syntax::VarDeclarator { pattern, .. } if *pattern == site))
          .ok_or_else(|| {
            self.error(
              RewriteErrorKind::UnsupportedConstruct {
                construct: "reassignment of a binding that is not a variable",
              },
              call,
            )
          })?;
        if let Syntax::VarDeclarator {
          initializer: Some(init),
          ..
        } = ast.stx(declarator)
        {
          if !is_module_load(ast, *init, &self.spec.core) {
            return Err(self.error(
              RewriteErrorKind::UnexpectedInitialization {
                module: self.spec.core.clone(),
              },
              declarator,
            ));
          };
        };
        self.declarator_binding(declarator, site).map(Some)
      }
      _ => Ok(None),
    }
  }

  fn import_site(&self, stmt: NodeId) -> RewriteResult<Option<Binding>> {
    let ast = self.ast;
    let Syntax::ImportStmt { default, names, .. } = ast.stx(stmt) else {
      return Ok(None);
    };
    let (alias, namespace, named) = match (default, names) {
      (Some(default), None) => (*default, false, &[][..]),
      (Some(default), Some(ImportNames::Specific(named))) => (*default, false, &named[..]),
      (None, Some(ImportNames::All(alias))) => (*alias, true, &[][..]),
      (None, Some(ImportNames::Specific(named))) => {
        let all_core = named.iter().all(|&n| {
          matches!(ast.stx(n), Syntax::ImportName { importable, .. } if self.table.is_core(importable))
        });
        return if all_core {
          Ok(None)
        } else {
          Err(self.unsupported_destructuring(stmt))
        };
      }
      (Some(_), Some(ImportNames::All(_))) => return Err(self.unsupported_destructuring(stmt)),
      (None, None) => return Ok(None),
    };
    for &n in named {
      if !matches!(ast.stx(n), Syntax::ImportName { importable, .. } if self.table.is_core(importable)) {
        return Err(self.unsupported_destructuring(n));
      };
    }
    Ok(Some(Binding {
      alias: ast.stx(alias).ident_name().unwrap_or_default().to_string(),
      form: BindingForm::Import { namespace },
      declaration: stmt,
      statement: stmt,
      has_initializer: true,
      scope: self
        .scopes
        .binding_scope(alias)
        .unwrap_or_else(|| self.scopes.top_scope()),
      symbol: alias,
      pinned_core_uses: named.len(),
    }))
  }
}

/// Finds the unique binding of `spec.core`, if the module is loaded at all, and which namespace identifiers its
/// scope already declares.
pub fn resolve(
  ast: &Ast,
  scopes: &Scopes,
  spec: &ModuleSpec,
  table: &ClassificationTable,
) -> RewriteResult<Option<(Binding, ScopeState)>> {
  let resolver = Resolver {
    ast,
    scopes,
    spec,
    table,
  };
  let mut found: Option<Candidate> = None;
  for node in ast.descendants(ast.root()) {
    let binding = match ast.stx(node) {
      Syntax::CallExpr { .. } if is_module_load(ast, node, &spec.core) => {
        resolver.require_site(node)?
      }
      Syntax::ImportStmt { module, .. } if *module == spec.core => resolver.import_site(node)?,
      _ => None,
    };
    let Some(binding) = binding else {
      continue;
    };
    match &found {
      Some(prev) if prev.binding.declaration != binding.declaration => {
        return Err(resolver.error(
          RewriteErrorKind::MultipleDeclarations {
            module: spec.core.clone(),
          },
          node,
        ));
      }
      Some(_) => {}
      None => {
        debug!(alias = %binding.alias, site = ?node, "found core binding");
        found = Some(Candidate {
          binding,
          site: node,
        });
      }
    };
  }
  let Some(Candidate { binding, site }) = found else {
    return Ok(None);
  };
  let state = ScopeState {
    namespace_a_declared: scopes.declares(binding.scope, &spec.namespace_a.ident),
    namespace_b_declared: scopes.declares(binding.scope, &spec.namespace_b.ident),
  };
  for (declared, ident) in [
    (state.namespace_a_declared, &spec.namespace_a.ident),
    (state.namespace_b_declared, &spec.namespace_b.ident),
  ] {
    if declared {
      info!(site = ?site, "Using existing {} declaration", ident);
    };
  }
  Ok(Some((binding, state)))
}

#[cfg(test)]
mod tests {
  use super::static_key_name;
  use syntax_js::ast::stx::ClassOrObjKey;

  fn key_name(raw: &str) -> Option<String> {
    static_key_name(&ClassOrObjKey::Direct(raw.to_string())).map(str::to_string)
  }

  #[test]
  fn identifier_and_string_keys_name_members() {
    assert_eq!(key_name("render").as_deref(), Some("render"));
    assert_eq!(key_name("$el_2").as_deref(), Some("$el_2"));
    assert_eq!(key_name("'render'").as_deref(), Some("render"));
    assert_eq!(key_name("\"find-node\"").as_deref(), Some("find-node"));
  }

  #[test]
  fn other_keys_name_nothing() {
    assert_eq!(key_name("1"), None);
    assert_eq!(key_name("0x1f"), None);
    assert_eq!(key_name("a.b"), None);
    assert_eq!(key_name("a b"), None);
    assert_eq!(key_name(""), None);
  }
}
