use super::top;
use crate::ast::stx::ArrElem;
use crate::ast::stx::FuncBody;
use crate::ast::stx::LitTemplatePart;
use crate::ast::stx::ObjMemberType;
use crate::ast::stx::Syntax;
use crate::ast::Ast;
use crate::ast::NodeId;
use crate::error::SyntaxErrorType;
use crate::operator::OperatorName;
use crate::parse;

/// The expression of the only statement, which must be an expression statement.
fn expr_of(ast: &Ast) -> NodeId {
  let stmts = top(ast);
  assert_eq!(stmts.len(), 1);
  match ast.stx(stmts[0]) {
    Syntax::ExprStmt { expr } => *expr,
    other => panic!("expected expression statement, got {:?}", other),
  }
}

#[test]
fn test_precedence() {
  let ast = parse("a + b * c - d;").unwrap();
  let Syntax::BinaryExpr {
    operator: OperatorName::Subtraction,
    left,
    ..
  } = ast.stx(expr_of(&ast))
  else {
    panic!("expected subtraction");
  };
  let Syntax::BinaryExpr {
    operator: OperatorName::Addition,
    right,
    ..
  } = ast.stx(*left)
  else {
    panic!("expected addition");
  };
  assert!(matches!(ast.stx(*right), Syntax::BinaryExpr {
    operator: OperatorName::Multiplication,
    ..
  }));
}

#[test]
fn test_grouping_is_transparent() {
  let ast = parse("(a + b) * c;").unwrap();
  let Syntax::BinaryExpr { left, .. } = ast.stx(expr_of(&ast)) else {
    panic!("expected binary expression");
  };
  assert!(matches!(ast.stx(*left), Syntax::BinaryExpr {
    operator: OperatorName::Addition,
    ..
  }));
  assert_eq!(ast.text(ast.loc(*left)), "a + b");
}

#[test]
fn test_arrow_functions() {
  for src in ["(a, {b}) => a;", "x => x * 2;", "async (a) => { await a; };", "async x => x;"] {
    let ast = parse(src).unwrap();
    let Syntax::ArrowFuncExpr { function } = ast.stx(expr_of(&ast)) else {
      panic!("expected arrow function for {}", src);
    };
    assert!(matches!(ast.stx(*function), Syntax::Func { arrow: true, .. }));
  }
  let ast = parse("async(a);").unwrap();
  assert!(matches!(ast.stx(expr_of(&ast)), Syntax::CallExpr { .. }));
}

#[test]
fn test_arrow_line_terminator_is_an_error() {
  let err = parse("(a)\n=> a;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters);
}

#[test]
fn test_arrow_expression_body() {
  let ast = parse("f(() => a, b);").unwrap();
  let Syntax::CallExpr { arguments, .. } = ast.stx(expr_of(&ast)) else {
    panic!("expected call");
  };
  assert_eq!(arguments.len(), 2);
  let Syntax::CallArg { value, .. } = ast.stx(arguments[0]) else {
    panic!("expected argument");
  };
  let Syntax::ArrowFuncExpr { function } = ast.stx(*value) else {
    panic!("expected arrow function");
  };
  let Syntax::Func {
    body: FuncBody::Expression(body),
    ..
  } = ast.stx(*function)
  else {
    panic!("expected expression body");
  };
  assert_eq!(ast.stx(*body).ident_name(), Some("a"));
}

#[test]
fn test_member_chains() {
  let ast = parse("React.DOM['div']?.x?.(1).default;").unwrap();
  let Syntax::MemberExpr { left, right, .. } = ast.stx(expr_of(&ast)) else {
    panic!("expected member access");
  };
  assert_eq!(right, "default");
  assert!(matches!(ast.stx(*left), Syntax::CallExpr {
    optional_chaining: true,
    ..
  }));
  let ids: Vec<_> = ast
    .descendants(ast.root())
    .into_iter()
    .filter_map(|n| ast.stx(n).ident_name().map(str::to_string))
    .collect();
  assert_eq!(ids, vec!["React".to_string()]);
}

#[test]
fn test_destructuring_assignment_becomes_pattern() {
  let ast = parse("[a, {b = 1, c: d}, ...e] = f;").unwrap();
  let Syntax::BinaryExpr { left, .. } = ast.stx(expr_of(&ast)) else {
    panic!("expected assignment");
  };
  let Syntax::ArrPat { elements, rest } = ast.stx(*left) else {
    panic!("expected array pattern");
  };
  assert_eq!(elements.len(), 2);
  assert!(rest.is_some());
  let obj = elements[1].as_ref().unwrap().target;
  let Syntax::ObjPat { properties, .. } = ast.stx(obj) else {
    panic!("expected object pattern");
  };
  assert!(matches!(ast.stx(properties[0]), Syntax::ObjPatProp {
    shorthand: true,
    default_value: Some(_),
    ..
  }));
  assert!(matches!(ast.stx(properties[1]), Syntax::ObjPatProp {
    shorthand: false,
    ..
  }));
}

#[test]
fn test_invalid_assignment_target() {
  let err = parse("a + b = c;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::InvalidAssigmentTarget);
  let err = parse("[a] += b;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::InvalidAssigmentTarget);
}

#[test]
fn test_object_literal_members() {
  let ast = parse("x = {a, b: 1, [c]: 2, 'd': 3, get e() { return 1; }, f() {}, ...g};").unwrap();
  let Syntax::BinaryExpr { right, .. } = ast.stx(expr_of(&ast)) else {
    panic!("expected assignment");
  };
  let Syntax::LitObjExpr { members } = ast.stx(*right) else {
    panic!("expected object literal");
  };
  assert_eq!(members.len(), 7);
  assert!(matches!(ast.stx(members[0]), Syntax::ObjMember {
    typ: ObjMemberType::Shorthand { .. }
  }));
  assert!(matches!(ast.stx(members[6]), Syntax::ObjMember {
    typ: ObjMemberType::Rest { .. }
  }));
}

#[test]
fn test_regex_and_division() {
  let ast = parse("x = /a/g / 1;").unwrap();
  let Syntax::BinaryExpr { right, .. } = ast.stx(expr_of(&ast)) else {
    panic!("expected assignment");
  };
  let Syntax::BinaryExpr {
    operator: OperatorName::Division,
    left,
    ..
  } = ast.stx(*right)
  else {
    panic!("expected division");
  };
  assert!(matches!(ast.stx(*left), Syntax::LitRegexExpr { value } if value == "/a/g"));
}

#[test]
fn test_template_literals() {
  let ast = parse("tag`a${b}c${`d`}`;").unwrap();
  let Syntax::TaggedTemplateExpr { parts, .. } = ast.stx(expr_of(&ast)) else {
    panic!("expected tagged template");
  };
  assert_eq!(parts.len(), 5);
  assert!(matches!(&parts[0], LitTemplatePart::String(s) if s == "a"));
  assert!(matches!(&parts[2], LitTemplatePart::String(s) if s == "c"));
  assert!(matches!(&parts[4], LitTemplatePart::String(s) if s.is_empty()));
}

#[test]
fn test_array_holes_and_spread() {
  let ast = parse("[, a, ...b];").unwrap();
  let Syntax::LitArrExpr { elements } = ast.stx(expr_of(&ast)) else {
    panic!("expected array literal");
  };
  assert!(matches!(elements[..], [
    ArrElem::Empty,
    ArrElem::Single(_),
    ArrElem::Rest(_)
  ]));
}

#[test]
fn test_string_values_are_decoded() {
  let ast = parse(r#"require("re\x61ct");"#).unwrap();
  let lit = ast
    .descendants(ast.root())
    .into_iter()
    .find(|&n| matches!(ast.stx(n), Syntax::LitStrExpr { .. }))
    .unwrap();
  assert!(matches!(ast.stx(lit), Syntax::LitStrExpr { value } if value == "react"));
}

#[test]
fn test_jsx() {
  let ast = parse("x = <div className=\"a\" {...p} hidden>hi {name}<br/><Foo.Bar /></div>;").unwrap();
  let Syntax::BinaryExpr { right, .. } = ast.stx(expr_of(&ast)) else {
    panic!("expected assignment");
  };
  let Syntax::JsxElem {
    name: Some(name),
    attributes,
    children,
  } = ast.stx(*right)
  else {
    panic!("expected element");
  };
  assert!(matches!(ast.stx(*name), Syntax::JsxName { name, .. } if name == "div"));
  assert_eq!(attributes.len(), 3);
  assert!(matches!(ast.stx(attributes[1]), Syntax::JsxSpreadAttr { .. }));
  assert_eq!(children.len(), 4);
  assert!(matches!(ast.stx(children[0]), Syntax::JsxText { value } if value == "hi "));
  assert!(matches!(ast.stx(children[1]), Syntax::JsxExprContainer { value: Some(_) }));
  let Syntax::JsxElem {
    name: Some(member), ..
  } = ast.stx(children[3])
  else {
    panic!("expected element");
  };
  assert!(matches!(ast.stx(*member), Syntax::JsxMemberExpr { base, path } if base == "Foo" && path == &vec!["Bar".to_string()]));
}

#[test]
fn test_jsx_fragment() {
  let ast = parse("f(<>\n  <a-b c-d='e' />\n  {/* comment */}\n</>);").unwrap();
  let elems: Vec<_> = ast
    .descendants(ast.root())
    .into_iter()
    .filter(|&n| matches!(ast.stx(n), Syntax::JsxElem { .. }))
    .collect();
  assert_eq!(elems.len(), 2);
  assert!(matches!(ast.stx(elems[0]), Syntax::JsxElem { name: None, .. }));
}

#[test]
fn test_jsx_closing_tag_mismatch() {
  let err = parse("<a></b>;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::JsxClosingTagMismatch);
}
