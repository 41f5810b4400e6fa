//! Lexical scope tree and identifier resolution over an `Ast`.
//!
//! [`bind`] walks the tree once to allocate scopes and record binding sites, then resolves every identifier
//! reference to the binding site that declares it.
//!
//! ## Scope kinds
//!
//! - [`ScopeKind::Module`]: the top level; scripts are treated the same way.
//! - [`ScopeKind::NonArrowFunction`] / [`ScopeKind::ArrowFunction`]: function parameters and bodies; `var`
//!   hoists to the nearest of these or the module scope.
//! - [`ScopeKind::Block`]: block statements, `for` heads and `switch` bodies.
//! - [`ScopeKind::Catch`]: the parameter of a `catch` clause.
//! - [`ScopeKind::Class`]: class bodies, which also hold a class expression's own name.
//! - [`ScopeKind::StaticBlock`]: class static initialization blocks, which have their own `var` scope.
//! - [`ScopeKind::FunctionExpressionName`]: the scope holding a named function expression's own name.
//!
//! ## Simplifications
//!
//! - Function declarations bind in the scope they appear in, as in strict mode.
//! - There is no temporal dead zone: a reference resolves to a `let` declared later in the same scope.
//! - `with` statements and direct `eval` are not modelled.
use crate::ast::NodeId;
use ahash::HashMap;
use std::collections::BTreeMap;

mod declare;
#[cfg(test)]
mod tests;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u32);

impl ScopeId {
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScopeKind {
  Module,
  NonArrowFunction,
  ArrowFunction,
  Block,
  Catch,
  Class,
  StaticBlock,
  FunctionExpressionName,
}

impl ScopeKind {
  pub fn is_var_scope(&self) -> bool {
    matches!(
      self,
      ScopeKind::Module
        | ScopeKind::NonArrowFunction
        | ScopeKind::ArrowFunction
        | ScopeKind::StaticBlock
    )
  }
}

#[derive(Debug, Clone)]
pub struct ScopeData {
  pub parent: Option<ScopeId>,
  pub kind: ScopeKind,
  pub children: Vec<ScopeId>,
  /// Binding sites per name in source order: `IdPat` and `ClassOrFuncName` nodes.
  pub symbols: BTreeMap<String, Vec<NodeId>>,
}

#[derive(Debug, Default)]
pub struct Scopes {
  scopes: Vec<ScopeData>,
  // Innermost scope enclosing each node.
  node_scopes: HashMap<NodeId, ScopeId>,
  // Declaring scope of each binding site.
  binding_sites: HashMap<NodeId, ScopeId>,
  // Identifier node to the first binding site of the binding it refers to.
  resolved: HashMap<NodeId, NodeId>,
}

pub use declare::bind;

impl Scopes {
  pub fn top_scope(&self) -> ScopeId {
    ScopeId(0)
  }

  pub fn scope(&self, id: ScopeId) -> &ScopeData {
    &self.scopes[id.index()]
  }

  pub fn len(&self) -> usize {
    self.scopes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.scopes.is_empty()
  }

  /// The innermost scope enclosing `node`. Nodes created after binding fall back to the top scope.
  pub fn scope_of(&self, node: NodeId) -> ScopeId {
    self
      .node_scopes
      .get(&node)
      .copied()
      .unwrap_or_else(|| self.top_scope())
  }

  /// Whether `scope` itself, not an ancestor, has a binding named `name`.
  pub fn declares(&self, scope: ScopeId, name: &str) -> bool {
    self.scope(scope).symbols.contains_key(name)
  }

  /// The nearest scope from `scope` outwards that declares `name`.
  pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<ScopeId> {
    let mut current = Some(scope);
    while let Some(id) = current {
      let data = self.scope(id);
      if data.symbols.contains_key(name) {
        return Some(id);
      };
      current = data.parent;
    }
    None
  }

  /// Binding sites of `name` declared directly in `scope`, in source order.
  pub fn bindings(&self, scope: ScopeId, name: &str) -> &[NodeId] {
    self
      .scope(scope)
      .symbols
      .get(name)
      .map(Vec::as_slice)
      .unwrap_or(&[])
  }

  pub fn is_binding_site(&self, node: NodeId) -> bool {
    self.binding_sites.contains_key(&node)
  }

  /// The scope that a binding site declares its name in.
  pub fn binding_scope(&self, node: NodeId) -> Option<ScopeId> {
    self.binding_sites.get(&node).copied()
  }

  /// The first binding site of the binding an identifier refers to. Redeclarations like `var a; var a;`
  /// resolve to the same site. Unresolved globals return None.
  pub fn resolve(&self, node: NodeId) -> Option<NodeId> {
    self.resolved.get(&node).copied()
  }
}
