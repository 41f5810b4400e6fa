use super::emit;
use super::EmitErrorKind;
use super::EmitOptions;
use super::QuoteStyle;
use crate::ast::stx::Syntax;
use crate::ast::stx::VarDeclMode;
use crate::ast::Ast;
use crate::ast::NodeId;
use crate::parse;
use similar::TextDiff;

fn print(ast: &Ast) -> String {
  emit(ast, EmitOptions::default()).unwrap()
}

fn first_named(ast: &Ast, name: &str) -> NodeId {
  ast
    .descendants(ast.root())
    .into_iter()
    .find(|&n| ast.stx(n).ident_name() == Some(name))
    .unwrap()
}

/// `<mode> <ident> = require('<path>');`
fn require_decl(ast: &mut Ast, mode: VarDeclMode, ident: &str, path: &str) -> NodeId {
  let callee = ast.alloc_synthetic(Syntax::IdExpr {
    name: "require".into(),
  });
  let value = ast.alloc_synthetic(Syntax::LitStrExpr { value: path.into() });
  let arg = ast.alloc_synthetic(Syntax::CallArg {
    spread: false,
    value,
  });
  let call = ast.alloc_synthetic(Syntax::CallExpr {
    optional_chaining: false,
    callee,
    arguments: vec![arg],
  });
  let pattern = ast.alloc_synthetic(Syntax::IdPat { name: ident.into() });
  let declarator = ast.alloc_synthetic(Syntax::VarDeclarator {
    pattern,
    initializer: Some(call),
  });
  ast.alloc_synthetic(Syntax::VarDecl {
    export: false,
    mode,
    declarators: vec![declarator],
  })
}

#[test]
fn untouched_source_round_trips() {
  let sources = [
    "",
    "\n\n  // only a comment\n",
    "var React = require(\"react\") // trailing\n\n/* block */ React.render( <App a={1} {...b}>text {c}</App>, el )\n",
    "import React, {Component} from 'react';\nexport default class A extends Component {\n  static x = `a${b}c`;\n  #p = /re/g;\n  get y() { return this.#p ?? (1 + 2) * 3; }\n}\n",
    "label: for (const [a, , ...b] of c) { if (a) continue label; else break }\r\nswitch (x) {\n  case 1:\n  default: ;\n}",
    "async function* f({a = 1, b: {c}}, ...d) { yield* await d; }",
  ];
  for src in sources {
    let ast = parse(src).unwrap();
    let out = print(&ast);
    if out != src {
      let diff = TextDiff::from_lines(src, out.as_str());
      panic!("round trip changed source:\n{}", diff.unified_diff());
    };
  }
}

#[test]
fn renamed_identifiers_print_their_new_name() {
  let mut ast = parse("React.render(x);\nfoo.React;\n").unwrap();
  let id = first_named(&ast, "React");
  ast.rename_ident(id, "ReactDOM");
  assert_eq!(print(&ast), "ReactDOM.render(x);\nfoo.React;\n");
}

#[test]
fn inserted_statement_follows_blank_line_layout() {
  let mut ast = parse("const React = require('react');\n\nclass Foo {}\n").unwrap();
  let anchor = ast.children(ast.root())[0];
  let decl = require_decl(&mut ast, VarDeclMode::Const, "ReactDOM", "react-dom");
  assert!(ast.insert_after(anchor, decl));
  assert_eq!(
    print(&ast),
    "const React = require('react');\n\nconst ReactDOM = require('react-dom');\n\nclass Foo {}\n"
  );
}

#[test]
fn inserted_statement_keeps_block_indentation() {
  let mut ast = parse("function f() {\n    var a = 1;\n    a();\n}\n").unwrap();
  let a = first_named(&ast, "a");
  let anchor = ast.enclosing_list_item(a).unwrap();
  let decl = require_decl(&mut ast, VarDeclMode::Var, "b", "b");
  assert!(ast.insert_after(anchor, decl));
  assert_eq!(
    print(&ast),
    "function f() {\n    var a = 1;\n    var b = require('b');\n    a();\n}\n"
  );
}

#[test]
fn inserted_after_last_statement() {
  let mut ast = parse("a();\nb();").unwrap();
  let anchor = ast.children(ast.root())[1];
  let decl = require_decl(&mut ast, VarDeclMode::Let, "c", "c");
  assert!(ast.insert_after(anchor, decl));
  assert_eq!(print(&ast), "a();\nb();\nlet c = require('c');");
}

#[test]
fn removed_first_statement_keeps_leading_text() {
  let mut ast = parse("// header\nvar React = require('react');\n\nReact.x();\n").unwrap();
  let root = ast.root();
  let first = ast.children(root)[0];
  let decl = require_decl(&mut ast, VarDeclMode::Var, "ReactDOM", "react-dom");
  assert!(ast.insert_after(first, decl));
  assert!(ast.remove_from_list(root, first));
  assert_eq!(
    print(&ast),
    "// header\nvar ReactDOM = require('react-dom');\n\nReact.x();\n"
  );
}

#[test]
fn removed_declarator_keeps_surrounding_text() {
  let mut ast = parse("var React = require('react'), x = 1;\nvar y = 2, z = 3\n").unwrap();
  let stmts = ast.children(ast.root());
  for (stmt, index) in [(stmts[0], 0), (stmts[1], 1)] {
    let declarator = ast.children(stmt)[index];
    assert!(ast.remove_from_list(stmt, declarator));
  }
  assert_eq!(print(&ast), "var x = 1;\nvar y = 2\n");
}

#[test]
fn dirty_object_pattern() {
  let mut ast = parse("const {Children, render: r = f, ...rest} = React;").unwrap();
  let pat = object_pattern(&ast);
  let first = ast.children(pat)[0];
  assert!(ast.remove_from_list(pat, first));
  assert_eq!(print(&ast), "const {render: r = f, ...rest} = React;");
}

fn object_pattern(ast: &Ast) -> NodeId {
  ast
    .descendants(ast.root())
    .into_iter()
    .find(|&n| matches!(ast.stx(n), Syntax::ObjPat { .. }))
    .unwrap()
}

#[test]
fn removed_property_keeps_comments_of_neighbours() {
  let mut ast = parse("var {\n  Component, // base\n  render,\n  /* types */ PropTypes\n} = React;\n").unwrap();
  let pat = object_pattern(&ast);
  let render = ast.children(pat)[1];
  assert!(ast.remove_from_list(pat, render));
  assert_eq!(
    print(&ast),
    "var {\n  Component, // base\n  /* types */ PropTypes\n} = React;\n"
  );
}

#[test]
fn removed_properties_on_one_line() {
  let mut ast = parse("const {a, b, c, d} = x;").unwrap();
  let pat = object_pattern(&ast);
  let props = ast.children(pat);
  assert!(ast.remove_from_list(pat, props[1]));
  assert!(ast.remove_from_list(pat, props[3]));
  assert_eq!(print(&ast), "const {a, c} = x;");
}

#[test]
fn removed_statement_keeps_trailing_comment_of_previous() {
  let mut ast = parse("a(); // keep
b();
c();
").unwrap();
  let root = ast.root();
  let b = ast.children(root)[1];
  assert!(ast.remove_from_list(root, b));
  assert_eq!(print(&ast), "a(); // keep
c();
");
}

#[test]
fn double_quotes() {
  let mut ast = parse("import React from 'react';\n").unwrap();
  let anchor = ast.children(ast.root())[0];
  let alias = ast.alloc_synthetic(Syntax::IdPat {
    name: "ReactDOM".into(),
  });
  let import = ast.alloc_synthetic(Syntax::ImportStmt {
    default: Some(alias),
    names: None,
    module: "react-dom".into(),
  });
  assert!(ast.insert_after(anchor, import));
  let out = emit(&ast, EmitOptions {
    quote: QuoteStyle::Double,
  })
  .unwrap();
  assert_eq!(
    out,
    "import React from 'react';\nimport ReactDOM from \"react-dom\";\n"
  );
}

#[test]
fn unsupported_synthetic_node() {
  let mut ast = parse("a;").unwrap();
  let anchor = ast.children(ast.root())[0];
  let stmt = ast.alloc_synthetic(Syntax::DebuggerStmt);
  assert!(ast.insert_after(anchor, stmt));
  let err = emit(&ast, EmitOptions::default()).unwrap_err();
  assert_eq!(err.kind, EmitErrorKind::Unsupported("node"));
}

#[test]
fn quote_style_parses_from_config_strings() {
  assert_eq!("double".parse::<QuoteStyle>(), Ok(QuoteStyle::Double));
  assert!("backtick".parse::<QuoteStyle>().is_err());
}
