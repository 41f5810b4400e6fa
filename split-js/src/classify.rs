//! Classifies every use of the core alias and redirects the ones that moved.
use crate::config::ModuleSpec;
use crate::error::RewriteError;
use crate::error::RewriteErrorKind;
use crate::error::RewriteResult;
use crate::resolve::is_module_load;
use crate::resolve::static_key_name;
use crate::resolve::Binding;
use crate::table::ClassificationTable;
use crate::table::Destination;
use crate::table::Namespace;
use ahash::HashSet;
use ahash::HashSetExt;
use serde::Serialize;
use syntax_js::ast::stx::Syntax;
use syntax_js::ast::stx::VarDeclMode;
use syntax_js::ast::Ast;
use syntax_js::ast::NodeId;
use syntax_js::operator::OperatorName;
use syntax_js::scope::Scopes;
use tracing::trace;

/// Number of uses per destination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
  pub core: usize,
  pub namespace_a: usize,
  pub namespace_b: usize,
}

impl Tally {
  pub fn add(&mut self, dest: Destination) {
    match dest {
      Destination::Core => self.core += 1,
      Destination::NamespaceA => self.namespace_a += 1,
      Destination::NamespaceB => self.namespace_b += 1,
    }
  }

  pub fn get(&self, dest: Destination) -> usize {
    match dest {
      Destination::Core => self.core,
      Destination::NamespaceA => self.namespace_a,
      Destination::NamespaceB => self.namespace_b,
    }
  }

  pub fn total(&self) -> usize {
    self.core + self.namespace_a + self.namespace_b
  }

  pub fn any_namespace(&self) -> bool {
    self.namespace_a > 0 || self.namespace_b > 0
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UsageKind {
  CoreAccess,
  NamespaceAccess(Destination),
  /// A destructuring declaration initialized from the alias, counted once per destination it binds from.
  Destructuring,
  Declaration,
  Reassignment,
  Unrelated,
}

#[derive(Clone, Debug, Default)]
pub struct Usage {
  pub tally: Tally,
  /// Expression statements of the form `<alias> = require('<core>');`.
  pub reassignments: Vec<NodeId>,
  /// Markup elements and fragments, which count as core uses.
  pub markup: usize,
}

struct Classifier<'a> {
  ast: &'a mut Ast,
  scopes: &'a Scopes,
  binding: &'a Binding,
  spec: &'a ModuleSpec,
  table: &'a ClassificationTable,
  usage: Usage,
}

/// Builds `<kind> {<properties>} = <ident>;` from existing pattern properties.
fn destructuring_decl(ast: &mut Ast, like: NodeId, properties: Vec<NodeId>, ident: &str) -> NodeId {
  let mode = match ast.stx(like) {
    Syntax::VarDecl { mode, .. } => *mode,
    _ => VarDeclMode::Var,
  };
  let pattern = ast.alloc_synthetic(Syntax::ObjPat {
    properties,
    rest: None,
  });
  let init = ast.alloc_synthetic(Syntax::IdExpr {
    name: ident.to_string(),
  });
  let declarator = ast.alloc_synthetic(Syntax::VarDeclarator {
    pattern,
    initializer: Some(init),
  });
  ast.alloc_synthetic(Syntax::VarDecl {
    export: false,
    mode,
    declarators: vec![declarator],
  })
}

impl<'a> Classifier<'a> {
  fn error(&self, kind: RewriteErrorKind, node: NodeId) -> RewriteError {
    RewriteError::new(kind, self.ast, self.ast.loc(node))
  }

  fn unsupported(&self, construct: &'static str, node: NodeId) -> RewriteError {
    self.error(RewriteErrorKind::UnsupportedConstruct { construct }, node)
  }

  fn unknown_member(&self, member: &str, destructuring: bool, node: NodeId) -> RewriteError {
    self.error(
      RewriteErrorKind::UnknownMember {
        alias: self.binding.alias.clone(),
        member: member.to_string(),
        destructuring,
      },
      node,
    )
  }

  /// Counts one use of `ns` and points the alias occurrence `id` at its identifier.
  fn redirect(&mut self, id: NodeId, ns: Namespace) {
    self.usage.tally.add(ns.into());
    let ident = &self.spec.namespace(ns).ident;
    self.ast.rename_ident(id, ident);
  }

  /// `alias.member` or `alias['member']`.
  fn member_access(&mut self, id: NodeId, member: &str, access: NodeId) -> RewriteResult<UsageKind> {
    let dest = self
      .table
      .destination(member)
      .ok_or_else(|| self.unknown_member(member, false, access))?;
    let Some(ns) = dest.namespace() else {
      self.usage.tally.core += 1;
      return Ok(UsageKind::CoreAccess);
    };
    self.redirect(id, ns);
    Ok(UsageKind::NamespaceAccess(dest))
  }

  /// `const {a, b} = alias;`
  fn destructuring(&mut self, id: NodeId, declarator: NodeId, pattern: NodeId) -> RewriteResult<UsageKind> {
    let ast = &*self.ast;
    let Syntax::ObjPat { properties, rest } = ast.stx(pattern) else {
      return Err(self.unsupported("destructuring with a non-object pattern", declarator));
    };
    if let Some(rest) = rest {
      return Err(self.unsupported("rest element while destructuring", *rest));
    };
    let mut core = Vec::new();
    let mut ns_a = Vec::new();
    let mut ns_b = Vec::new();
    for &prop in properties {
      let Syntax::ObjPatProp { key, .. } = ast.stx(prop) else {
        return Err(self.unsupported("destructuring property", prop));
      };
      let name = static_key_name(key).ok_or_else(|| self.unsupported("computed key while destructuring", prop))?;
      match self.table.destination(name) {
        Some(Destination::Core) => core.push(prop),
        Some(Destination::NamespaceA) => ns_a.push(prop),
        Some(Destination::NamespaceB) => ns_b.push(prop),
        None => return Err(self.unknown_member(name, true, prop)),
      };
    }
    if ns_a.is_empty() && ns_b.is_empty() {
      self.usage.tally.core += 1;
      return Ok(UsageKind::Destructuring);
    };
    if core.is_empty() && (ns_a.is_empty() || ns_b.is_empty()) {
      let ns = if ns_a.is_empty() { Namespace::B } else { Namespace::A };
      self.redirect(id, ns);
      return Ok(UsageKind::Destructuring);
    };

    // Mixed: the split-off groups become sibling statements, so the declaration must sit in a list.
    let statement = ast
      .parent(declarator)
      .filter(|&s| matches!(ast.stx(s), Syntax::VarDecl { .. }))
      .filter(|&s| ast.enclosing_list_item(s) == Some(s))
      .ok_or_else(|| self.unsupported("mixed destructuring outside a statement list", declarator))?;
    let mut moved = Vec::new();
    if core.is_empty() {
      // The first namespace group keeps the original declarator.
      self.redirect(id, Namespace::A);
    } else {
      self.usage.tally.core += 1;
      if !ns_a.is_empty() {
        moved.push((Namespace::A, ns_a));
      };
    };
    if !ns_b.is_empty() {
      moved.push((Namespace::B, ns_b));
    };
    let mut anchor = statement;
    for (ns, props) in moved {
      self.usage.tally.add(ns.into());
      for &prop in &props {
        self.ast.remove_from_list(pattern, prop);
      }
      let ident = &self.spec.namespace(ns).ident;
      let decl = destructuring_decl(self.ast, statement, props, ident);
      if !self.ast.insert_after(anchor, decl) {
        return Err(self.unsupported("mixed destructuring outside a statement list", declarator));
      };
      anchor = decl;
    }
    Ok(UsageKind::Destructuring)
  }

  fn reassignment(&mut self, assignment: NodeId, right: NodeId) -> RewriteResult<UsageKind> {
    let ast = &*self.ast;
    if !is_module_load(ast, right, &self.spec.core) {
      return Err(self.error(
        RewriteErrorKind::UnexpectedAssignment {
          module: self.spec.core.clone(),
        },
        assignment,
      ));
    };
    let statement = ast
      .parent(assignment)
      .filter(|&s| matches!(ast.stx(s), Syntax::ExprStmt { .. }))
      .filter(|&s| ast.enclosing_list_item(s) == Some(s))
      .ok_or_else(|| self.unsupported("reassignment inside an expression", assignment))?;
    self.usage.reassignments.push(statement);
    Ok(UsageKind::Reassignment)
  }

  fn occurrence(&mut self, id: NodeId) -> RewriteResult<UsageKind> {
    if self.scopes.resolve(id) != Some(self.binding.symbol) {
      return Ok(UsageKind::Unrelated);
    };
    if id == self.binding.symbol {
      return Ok(UsageKind::Declaration);
    };
    if self.scopes.is_binding_site(id) {
      return Err(self.unsupported("redeclaration", id));
    };
    let ast = &*self.ast;
    let Some(parent) = ast.parent(id) else {
      return Err(self.unsupported("detached identifier", id));
    };
    match ast.stx(parent) {
      Syntax::MemberExpr { left, right, .. } if *left == id => {
        let right = right.clone();
        self.member_access(id, &right, parent)
      }
      Syntax::ComputedMemberExpr { object, member, .. } if *object == id => {
        match ast.stx(*member) {
          Syntax::LitStrExpr { value } => {
            let value = value.clone();
            self.member_access(id, &value, parent)
          }
          _ => Err(self.unsupported("computed member access", parent)),
        }
      }
      Syntax::VarDeclarator {
        pattern,
        initializer: Some(init),
      } if *init == id => {
        let pattern = *pattern;
        self.destructuring(id, parent, pattern)
      }
      Syntax::BinaryExpr {
        operator: OperatorName::Assignment,
        left,
        right,
      } if *left == id => {
        let right = *right;
        self.reassignment(parent, right)
      }
      Syntax::CallExpr { .. } => Err(self.unsupported("call", parent)),
      Syntax::CallArg { .. } => Err(self.unsupported("call argument", parent)),
      Syntax::ExportName { .. } => Err(self.unsupported("export", parent)),
      Syntax::ObjMember { .. } => Err(self.unsupported("object property", parent)),
      Syntax::ReturnStmt { .. } => Err(self.unsupported("return", parent)),
      _ => Err(self.unsupported("use", parent)),
    }
  }
}

/// Walks every identifier named like the alias once, tallies its uses and rewrites member accesses and
/// destructuring declarations that moved to a namespace.
pub fn classify(
  ast: &mut Ast,
  scopes: &Scopes,
  binding: &Binding,
  spec: &ModuleSpec,
  table: &ClassificationTable,
) -> RewriteResult<Usage> {
  let candidates: Vec<NodeId> = ast
    .descendants(ast.root())
    .into_iter()
    .filter(|&n| ast.stx(n).ident_name() == Some(binding.alias.as_str()))
    .collect();
  let markup = ast
    .descendants(ast.root())
    .into_iter()
    .filter(|&n| matches!(ast.stx(n), Syntax::JsxElem { .. }))
    .count();
  let mut classifier = Classifier {
    ast,
    scopes,
    binding,
    spec,
    table,
    usage: Usage::default(),
  };
  classifier.usage.tally.core = binding.pinned_core_uses;
  let mut processed = HashSet::new();
  for id in candidates {
    if !processed.insert(id) {
      continue;
    };
    let kind = classifier.occurrence(id)?;
    trace!(node = ?id, ?kind, "classified use");
  }
  let mut usage = classifier.usage;
  usage.markup = markup;
  usage.tally.core += markup;
  Ok(usage)
}
