use super::bind;
use super::ScopeKind;
use crate::ast::stx::Syntax;
use crate::ast::Ast;
use crate::ast::NodeId;
use crate::parse;

/// Identifier nodes named `name`, in source order.
fn idents(ast: &Ast, name: &str) -> Vec<NodeId> {
  ast
    .descendants(ast.root())
    .into_iter()
    .filter(|&n| ast.stx(n).ident_name() == Some(name))
    .collect()
}

#[test]
fn module_bindings_and_references() {
  let ast = parse("import React from 'react';\nReact.render(x);").unwrap();
  let scopes = bind(&ast);
  let top = scopes.top_scope();
  assert!(scopes.declares(top, "React"));
  assert!(!scopes.declares(top, "x"));
  let ids = idents(&ast, "React");
  assert_eq!(scopes.bindings(top, "React"), &[ids[0]]);
  assert_eq!(scopes.resolve(ids[1]), Some(ids[0]));
  let x = idents(&ast, "x")[0];
  assert_eq!(scopes.resolve(x), None);
}

#[test]
fn var_hoists_out_of_blocks() {
  let ast = parse("function f() { if (a) { var v = 1; let l = 2; } return v; }").unwrap();
  let scopes = bind(&ast);
  let v = idents(&ast, "v");
  let func_scope = scopes.binding_scope(v[0]).unwrap();
  assert_eq!(scopes.scope(func_scope).kind, ScopeKind::NonArrowFunction);
  assert_eq!(scopes.resolve(v[1]), Some(v[0]));
  let l = idents(&ast, "l")[0];
  assert_eq!(
    scopes.scope(scopes.binding_scope(l).unwrap()).kind,
    ScopeKind::Block
  );
  assert!(scopes.declares(scopes.top_scope(), "f"));
  assert!(!scopes.declares(scopes.top_scope(), "v"));
}

#[test]
fn shadowing_prefers_inner_bindings() {
  let ast = parse("var React = 1;\nfunction g(React) { return React; }\nReact;").unwrap();
  let scopes = bind(&ast);
  let ids = idents(&ast, "React");
  assert_eq!(ids.len(), 4);
  assert_eq!(scopes.resolve(ids[2]), Some(ids[1]));
  assert_eq!(scopes.resolve(ids[3]), Some(ids[0]));
  let inner = scopes.scope_of(ids[2]);
  assert_eq!(scopes.lookup(inner, "React"), scopes.binding_scope(ids[1]));
  assert_ne!(scopes.lookup(inner, "React"), Some(scopes.top_scope()));
}

#[test]
fn redeclarations_share_the_first_site() {
  let ast = parse("var a = 1;\nvar a = 2;\na;").unwrap();
  let scopes = bind(&ast);
  let ids = idents(&ast, "a");
  assert_eq!(scopes.bindings(scopes.top_scope(), "a"), &[ids[0], ids[1]]);
  assert_eq!(scopes.resolve(ids[1]), Some(ids[0]));
  assert_eq!(scopes.resolve(ids[2]), Some(ids[0]));
}

#[test]
fn function_expression_name_is_local() {
  let ast = parse("const f = function g() { return g; };\ng;").unwrap();
  let scopes = bind(&ast);
  assert!(!scopes.declares(scopes.top_scope(), "g"));
  let ids = idents(&ast, "g");
  let name_scope = scopes.binding_scope(ids[0]).unwrap();
  assert_eq!(
    scopes.scope(name_scope).kind,
    ScopeKind::FunctionExpressionName
  );
  assert_eq!(scopes.resolve(ids[1]), Some(ids[0]));
  assert_eq!(scopes.resolve(ids[2]), None);
}

#[test]
fn destructuring_assignment_resolves_existing_symbol() {
  let ast = parse("let a, b;\n({a, c: [b]} = o);").unwrap();
  let scopes = bind(&ast);
  for name in ["a", "b"] {
    let ids = idents(&ast, name);
    assert!(matches!(ast.stx(ids[1]), Syntax::IdPat { .. }));
    assert!(!scopes.is_binding_site(ids[1]));
    assert_eq!(scopes.resolve(ids[1]), Some(ids[0]));
  }
}

#[test]
fn catch_and_class_scopes() {
  let ast =
    parse("try {} catch (e) { e; }\nclass A { m() { return A; } static { var s; } }\ns;").unwrap();
  let scopes = bind(&ast);
  let e = idents(&ast, "e");
  assert_eq!(
    scopes.scope(scopes.binding_scope(e[0]).unwrap()).kind,
    ScopeKind::Catch
  );
  assert_eq!(scopes.resolve(e[1]), Some(e[0]));
  let a = idents(&ast, "A");
  assert_eq!(scopes.resolve(a[1]), Some(a[0]));
  let s = idents(&ast, "s");
  assert_eq!(
    scopes.scope(scopes.binding_scope(s[0]).unwrap()).kind,
    ScopeKind::StaticBlock
  );
  assert_eq!(scopes.resolve(s[1]), None);
}

#[test]
fn for_heads_get_their_own_scope() {
  let ast = parse("for (let i = 0; i < 1; i++) {}\ni;").unwrap();
  let scopes = bind(&ast);
  let ids = idents(&ast, "i");
  assert_eq!(scopes.resolve(ids[1]), Some(ids[0]));
  assert_eq!(scopes.resolve(ids[3]), None);
  assert!(!scopes.declares(scopes.top_scope(), "i"));
}
