use super::top;
use crate::ast::stx::ClassOrObjVal;
use crate::ast::stx::ImportNames;
use crate::ast::stx::Syntax;
use crate::ast::stx::VarDeclMode;
use crate::error::SyntaxErrorType;
use crate::parse;

#[test]
fn test_var_decl_declarators() {
  let ast = parse("const a = 1, {b, c: [d]} = e;").unwrap();
  let stmts = top(&ast);
  let Syntax::VarDecl {
    export,
    mode,
    declarators,
  } = ast.stx(stmts[0])
  else {
    panic!("expected declaration");
  };
  assert!(!export);
  assert_eq!(*mode, VarDeclMode::Const);
  assert_eq!(declarators.len(), 2);
  let Syntax::VarDeclarator {
    pattern,
    initializer: Some(_),
  } = ast.stx(declarators[1])
  else {
    panic!("expected declarator");
  };
  let Syntax::ObjPat { properties, rest } = ast.stx(*pattern) else {
    panic!("expected object pattern");
  };
  assert_eq!(properties.len(), 2);
  assert!(rest.is_none());
  assert_eq!(ast.text(ast.loc(stmts[0])), "const a = 1, {b, c: [d]} = e;");
}

#[test]
fn test_automatic_semicolon_insertion() {
  let src = "let a = 1\nlet b = require('x')\nfoo()\nreturn_ = a\n++b\n";
  let ast = parse(src).unwrap();
  let stmts = top(&ast);
  assert_eq!(stmts.len(), 5);
  assert_eq!(ast.text(ast.loc(stmts[1])), "let b = require('x')");
  assert!(matches!(ast.stx(stmts[4]), Syntax::ExprStmt { .. }));
}

#[test]
fn test_missing_semicolon_is_an_error() {
  let err = parse("a b").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::ExpectedSyntax("expression operator"));
}

#[test]
fn test_functions_and_classes() {
  let src = r#"
    async function* f(a, b = 1, ...c) { yield; yield* a; }
    class A extends B.C {
      static x = 1;
      #y
      get z() { return this.#y; }
      static { init(); }
      async *[Symbol.iterator]() {}
    }
  "#;
  let ast = parse(src).unwrap();
  let stmts = top(&ast);
  assert_eq!(stmts.len(), 2);
  let Syntax::FuncDecl {
    name: Some(name),
    function,
    ..
  } = ast.stx(stmts[0])
  else {
    panic!("expected function declaration");
  };
  assert_eq!(ast.stx(*name).ident_name(), Some("f"));
  assert!(matches!(ast.stx(*function), Syntax::Func {
    async_: true,
    generator: true,
    parameters,
    ..
  } if parameters.len() == 3));
  let Syntax::ClassDecl {
    extends: Some(_),
    members,
    ..
  } = ast.stx(stmts[1])
  else {
    panic!("expected class declaration");
  };
  assert_eq!(members.len(), 5);
  assert!(matches!(ast.stx(members[2]), Syntax::ClassMember {
    val: ClassOrObjVal::Getter(_),
    ..
  }));
  assert!(matches!(ast.stx(members[3]), Syntax::ClassMember {
    static_: true,
    val: ClassOrObjVal::StaticBlock(_),
    ..
  }));
}

#[test]
fn test_control_flow() {
  let src = r#"
    for (const k in o) {}
    for (let i = 0, n = 2; i < n; i++) continue;
    for (x.y of z);
    for (;;) break;
    outer: while (a) { if (b) break outer; else continue outer; }
    do x(); while (y)
    switch (v) { case 1: a(); b(); default: c(); }
    try { t(); } catch { } finally { f(); }
    try {} catch ({message}) {}
    with (o) p;
    throw new Error('x');
  "#;
  let ast = parse(src).unwrap();
  let kinds: Vec<_> = top(&ast)
    .into_iter()
    .map(|n| match ast.stx(n) {
      Syntax::ForInOfStmt { of, .. } => if *of { "for-of" } else { "for-in" },
      Syntax::ForTripleStmt { .. } => "for",
      Syntax::LabelStmt { .. } => "label",
      Syntax::DoWhileStmt { .. } => "do",
      Syntax::SwitchStmt { .. } => "switch",
      Syntax::TryStmt { .. } => "try",
      Syntax::WithStmt { .. } => "with",
      Syntax::ThrowStmt { .. } => "throw",
      _ => "other",
    })
    .collect();
  assert_eq!(kinds, vec![
    "for-in", "for", "for-of", "for", "label", "do", "switch", "try", "try", "with", "throw"
  ]);
  let switch = top(&ast)[6];
  let Syntax::SwitchStmt { branches, .. } = ast.stx(switch) else {
    panic!("expected switch");
  };
  assert_eq!(branches.len(), 2);
  assert_eq!(ast.stx(branches[0]).stmt_list().map(Vec::len), Some(2));
}

#[test]
fn test_try_requires_catch_or_finally() {
  let err = parse("try {}").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::TryStatementHasNoCatchOrFinally);
}

#[test]
fn test_throw_line_terminator() {
  let err = parse("throw\nx;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::LineTerminatorAfterThrow);
}

#[test]
fn test_imports() {
  let src = r#"
    import React, {Component as C, useState} from 'react';
    import * as ReactDOM from "react-dom";
    import 'side-effect';
    const lazy = import('./lazy');
  "#;
  let ast = parse(src).unwrap();
  let stmts = top(&ast);
  assert_eq!(stmts.len(), 4);
  let Syntax::ImportStmt {
    default: Some(default),
    names: Some(ImportNames::Specific(names)),
    module,
  } = ast.stx(stmts[0])
  else {
    panic!("expected import");
  };
  assert_eq!(module, "react");
  assert_eq!(ast.stx(*default).ident_name(), Some("React"));
  assert_eq!(names.len(), 2);
  let Syntax::ImportName { importable, alias } = ast.stx(names[0]) else {
    panic!("expected import name");
  };
  assert_eq!(importable, "Component");
  assert_eq!(ast.stx(*alias).ident_name(), Some("C"));
  assert!(matches!(ast.stx(stmts[1]), Syntax::ImportStmt {
    default: None,
    names: Some(ImportNames::All(_)),
    ..
  }));
  assert!(matches!(ast.stx(stmts[2]), Syntax::ImportStmt { names: None, module, .. } if module == "side-effect"));
  assert!(matches!(ast.stx(stmts[3]), Syntax::VarDecl { .. }));
}

#[test]
fn test_exports() {
  let src = r#"
    export const a = 1;
    export default function () {}
    export async function b() {}
    export class C {}
    export { a as d, b };
    export { e } from './e';
    export * as ns from './ns';
    export default a + 1;
  "#;
  let ast = parse(src).unwrap();
  let stmts = top(&ast);
  assert_eq!(stmts.len(), 8);
  assert!(matches!(ast.stx(stmts[0]), Syntax::VarDecl { export: true, .. }));
  assert!(matches!(ast.stx(stmts[1]), Syntax::FuncDecl {
    export: true,
    export_default: true,
    name: None,
    ..
  }));
  assert!(matches!(ast.stx(stmts[2]), Syntax::FuncDecl {
    export: true,
    export_default: false,
    ..
  }));
  assert!(matches!(ast.stx(stmts[3]), Syntax::ClassDecl { export: true, .. }));
  let Syntax::ExportListStmt { names, from: None } = ast.stx(stmts[4]) else {
    panic!("expected export list");
  };
  assert!(matches!(ast.stx(names[0]), Syntax::ExportName { target: Some(_), exportable, alias } if exportable == "a" && alias == "d"));
  let Syntax::ExportListStmt {
    names,
    from: Some(_),
  } = ast.stx(stmts[5])
  else {
    panic!("expected re-export");
  };
  assert!(matches!(ast.stx(names[0]), Syntax::ExportName { target: None, .. }));
  assert!(matches!(ast.stx(stmts[6]), Syntax::ExportAllStmt { alias: Some(_), .. }));
  assert!(matches!(ast.stx(stmts[7]), Syntax::ExportDefaultExprStmt { .. }));
  assert_eq!(ast.text(ast.loc(stmts[0])), "export const a = 1;");
}
