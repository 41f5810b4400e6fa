use super::ScopeData;
use super::ScopeId;
use super::ScopeKind;
use super::Scopes;
use crate::ast::stx::ArrPatElem;
use crate::ast::stx::ClassOrObjKey;
use crate::ast::stx::ClassOrObjVal;
use crate::ast::stx::FuncBody;
use crate::ast::stx::ImportNames;
use crate::ast::stx::Syntax;
use crate::ast::stx::VarDeclMode;
use crate::ast::Ast;
use crate::ast::NodeId;
use std::collections::BTreeMap;

struct Binder<'a> {
  ast: &'a Ast,
  out: Scopes,
}

/// Builds the scope tree for `ast` and resolves every identifier reference in it.
pub fn bind(ast: &Ast) -> Scopes {
  let mut binder = Binder {
    ast,
    out: Scopes::default(),
  };
  let top = binder.new_scope(None, ScopeKind::Module);
  binder.visit(ast.root(), top);
  binder.resolve_all();
  binder.out
}

impl<'a> Binder<'a> {
  fn new_scope(&mut self, parent: Option<ScopeId>, kind: ScopeKind) -> ScopeId {
    let id = ScopeId(self.out.scopes.len() as u32);
    self.out.scopes.push(ScopeData {
      parent,
      kind,
      children: Vec::new(),
      symbols: BTreeMap::new(),
    });
    if let Some(parent) = parent {
      self.out.scopes[parent.index()].children.push(id);
    }
    id
  }

  fn closure_scope(&self, mut scope: ScopeId) -> ScopeId {
    loop {
      let data = &self.out.scopes[scope.index()];
      if data.kind.is_var_scope() {
        return scope;
      }
      match data.parent {
        Some(parent) => scope = parent,
        None => return scope,
      }
    }
  }

  fn add_binding(&mut self, scope: ScopeId, site: NodeId) {
    let Some(name) = self.ast.stx(site).ident_name() else {
      return;
    };
    self.out.scopes[scope.index()]
      .symbols
      .entry(name.to_string())
      .or_default()
      .push(site);
    self.out.binding_sites.insert(site, scope);
  }

  /// Records every identifier a declaring pattern binds. Defaults and computed keys are left to `visit`.
  fn declare_pattern(&mut self, pat: NodeId, scope: ScopeId) {
    match self.ast.stx(pat) {
      Syntax::IdPat { .. } => self.add_binding(scope, pat),
      Syntax::ArrPat { elements, rest } => {
        for ArrPatElem { target, .. } in elements.iter().flatten() {
          self.declare_pattern(*target, scope);
        }
        if let Some(rest) = rest {
          self.declare_pattern(*rest, scope);
        }
      }
      Syntax::ObjPat { properties, rest } => {
        for &prop in properties {
          if let Syntax::ObjPatProp { target, .. } = self.ast.stx(prop) {
            self.declare_pattern(*target, scope);
          }
        }
        if let Some(rest) = rest {
          self.declare_pattern(*rest, scope);
        }
      }
      _ => {}
    }
  }

  fn visit_all(&mut self, nodes: &[NodeId], scope: ScopeId) {
    for &n in nodes {
      self.visit(n, scope);
    }
  }

  fn visit_children(&mut self, node: NodeId, scope: ScopeId) {
    let children = self.ast.children(node);
    self.visit_all(&children, scope);
  }

  fn visit_func(&mut self, func: NodeId, scope: ScopeId) {
    self.out.node_scopes.insert(func, scope);
    let Syntax::Func {
      arrow,
      parameters,
      body,
      ..
    } = self.ast.stx(func)
    else {
      return self.visit(func, scope);
    };
    let kind = if *arrow {
      ScopeKind::ArrowFunction
    } else {
      ScopeKind::NonArrowFunction
    };
    let inner = self.new_scope(Some(scope), kind);
    for &param in parameters {
      if let Syntax::ParamDecl { pattern, .. } = self.ast.stx(param) {
        self.declare_pattern(*pattern, inner);
      }
    }
    self.visit_all(parameters, inner);
    match body {
      // The body block shares the parameters' scope.
      FuncBody::Block(block) => {
        self.out.node_scopes.insert(*block, inner);
        let stmts = self.ast.children(*block);
        self.visit_all(&stmts, inner);
      }
      FuncBody::Expression(expr) => self.visit(*expr, inner),
    }
  }

  fn visit_class_members(&mut self, members: &[NodeId], class_scope: ScopeId) {
    for &member in members {
      self.out.node_scopes.insert(member, class_scope);
      let Syntax::ClassMember { key, val, .. } = self.ast.stx(member) else {
        self.visit(member, class_scope);
        continue;
      };
      if let ClassOrObjKey::Computed(key) = key {
        self.visit(*key, class_scope);
      }
      match val {
        ClassOrObjVal::Getter(f) | ClassOrObjVal::Setter(f) | ClassOrObjVal::Method(f) => {
          self.visit_func(*f, class_scope)
        }
        ClassOrObjVal::Prop(Some(init)) => self.visit(*init, class_scope),
        ClassOrObjVal::Prop(None) => {}
        ClassOrObjVal::StaticBlock(block) => {
          let inner = self.new_scope(Some(class_scope), ScopeKind::StaticBlock);
          self.out.node_scopes.insert(*block, inner);
          let stmts = self.ast.children(*block);
          self.visit_all(&stmts, inner);
        }
      }
    }
  }

  fn visit(&mut self, node: NodeId, scope: ScopeId) {
    self.out.node_scopes.insert(node, scope);
    match self.ast.stx(node) {
      Syntax::BlockStmt { body } => {
        let inner = self.new_scope(Some(scope), ScopeKind::Block);
        self.visit_all(body, inner);
      }
      Syntax::ForTripleStmt { .. } | Syntax::ForInOfStmt { .. } => {
        let inner = self.new_scope(Some(scope), ScopeKind::Block);
        self.visit_children(node, inner);
      }
      Syntax::SwitchStmt { test, branches } => {
        self.visit(*test, scope);
        let inner = self.new_scope(Some(scope), ScopeKind::Block);
        self.visit_all(branches, inner);
      }
      Syntax::CatchBlock { parameter, body } => {
        let inner = self.new_scope(Some(scope), ScopeKind::Catch);
        if let Some(param) = parameter {
          self.declare_pattern(*param, inner);
          self.visit(*param, inner);
        }
        self.visit(*body, inner);
      }
      Syntax::VarDecl {
        mode, declarators, ..
      } => {
        let target = match mode {
          VarDeclMode::Var => self.closure_scope(scope),
          VarDeclMode::Let | VarDeclMode::Const => scope,
        };
        for &decl in declarators {
          if let Syntax::VarDeclarator { pattern, .. } = self.ast.stx(decl) {
            self.declare_pattern(*pattern, target);
          }
        }
        self.visit_all(declarators, scope);
      }
      Syntax::FuncDecl { name, function, .. } => {
        if let Some(name) = name {
          self.add_binding(scope, *name);
          self.out.node_scopes.insert(*name, scope);
        }
        self.visit_func(*function, scope);
      }
      Syntax::FuncExpr { name, function } => match name {
        Some(name) => {
          let inner = self.new_scope(Some(scope), ScopeKind::FunctionExpressionName);
          self.add_binding(inner, *name);
          self.out.node_scopes.insert(*name, inner);
          self.visit_func(*function, inner);
        }
        None => self.visit_func(*function, scope),
      },
      Syntax::ArrowFuncExpr { function } => self.visit_func(*function, scope),
      Syntax::Func { .. } => self.visit_func(node, scope),
      Syntax::ClassDecl {
        name,
        extends,
        members,
        ..
      } => {
        if let Some(name) = name {
          self.add_binding(scope, *name);
          self.out.node_scopes.insert(*name, scope);
        }
        if let Some(extends) = extends {
          self.visit(*extends, scope);
        }
        let inner = self.new_scope(Some(scope), ScopeKind::Class);
        self.visit_class_members(members, inner);
      }
      Syntax::ClassExpr {
        name,
        extends,
        members,
      } => {
        let inner = self.new_scope(Some(scope), ScopeKind::Class);
        if let Some(name) = name {
          self.add_binding(inner, *name);
          self.out.node_scopes.insert(*name, inner);
        }
        if let Some(extends) = extends {
          self.visit(*extends, scope);
        }
        self.visit_class_members(members, inner);
      }
      Syntax::ImportStmt { default, names, .. } => {
        if let Some(default) = default {
          self.add_binding(scope, *default);
        }
        match names {
          Some(ImportNames::All(alias)) => self.add_binding(scope, *alias),
          Some(ImportNames::Specific(names)) => {
            for &name in names {
              if let Syntax::ImportName { alias, .. } = self.ast.stx(name) {
                self.add_binding(scope, *alias);
              }
            }
          }
          None => {}
        }
        self.visit_children(node, scope);
      }
      _ => self.visit_children(node, scope),
    }
  }

  fn resolve_all(&mut self) {
    let mut resolved = Vec::new();
    for (&node, &scope) in self.out.node_scopes.iter() {
      let stx = self.ast.stx(node);
      let Some(name) = stx.ident_name() else {
        continue;
      };
      let declaring = match self.out.binding_sites.get(&node) {
        Some(&declaring) => Some(declaring),
        None if matches!(stx, Syntax::IdExpr { .. } | Syntax::IdPat { .. }) => {
          self.out.lookup(scope, name)
        }
        None => None,
      };
      if let Some(&first) = declaring.and_then(|d| self.out.bindings(d, name).first()) {
        resolved.push((node, first));
      };
    }
    self.out.resolved.extend(resolved);
  }
}
