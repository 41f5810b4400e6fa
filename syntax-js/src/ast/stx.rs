use super::NodeId;
use crate::operator::OperatorName;
use serde::Serialize;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize)]
pub enum VarDeclMode {
  Const,
  Let,
  Var,
}

impl VarDeclMode {
  pub fn keyword(self) -> &'static str {
    match self {
      VarDeclMode::Const => "const",
      VarDeclMode::Let => "let",
      VarDeclMode::Var => "var",
    }
  }
}

#[derive(Clone, Debug)]
pub enum ClassOrObjKey {
  // Identifier, keyword, string or number; the source spelling is kept.
  Direct(String),
  Computed(NodeId),
}

#[derive(Clone, Debug)]
pub enum ClassOrObjVal {
  Getter(NodeId),
  Setter(NodeId),
  Method(NodeId),
  Prop(Option<NodeId>),
  StaticBlock(NodeId),
}

#[derive(Clone, Debug)]
pub enum ObjMemberType {
  Valued {
    key: ClassOrObjKey,
    val: ClassOrObjVal,
  },
  // `{a}`, or `{a = 1}` which is only valid once reinterpreted as a pattern.
  Shorthand {
    id: NodeId,
    default_value: Option<NodeId>,
  },
  Rest {
    val: NodeId,
  },
}

#[derive(Clone, Debug)]
pub enum ArrElem {
  Single(NodeId),
  Rest(NodeId),
  Empty,
}

#[derive(Clone, Debug)]
pub struct ArrPatElem {
  pub target: NodeId,
  pub default_value: Option<NodeId>,
}

#[derive(Clone, Debug)]
pub enum LitTemplatePart {
  Substitution(NodeId),
  String(String),
}

#[derive(Clone, Debug)]
pub enum FuncBody {
  Block(NodeId),
  Expression(NodeId),
}

#[derive(Clone, Debug)]
pub enum ImportNames {
  // `import * as name`
  All(NodeId),
  // `import {a as b, c}`
  Specific(Vec<NodeId>),
}

#[derive(Clone, Debug)]
pub enum Syntax {
  TopLevel {
    body: Vec<NodeId>,
  },

  // Statements.
  BlockStmt {
    body: Vec<NodeId>,
  },
  BreakStmt {
    label: Option<String>,
  },
  CatchBlock {
    parameter: Option<NodeId>,
    body: NodeId,
  },
  ClassDecl {
    export: bool,
    export_default: bool,
    name: Option<NodeId>,
    extends: Option<NodeId>,
    members: Vec<NodeId>,
  },
  ContinueStmt {
    label: Option<String>,
  },
  DebuggerStmt,
  DoWhileStmt {
    body: NodeId,
    condition: NodeId,
  },
  EmptyStmt,
  ExportAllStmt {
    alias: Option<String>,
    from: String,
  },
  ExportDefaultExprStmt {
    expression: NodeId,
  },
  ExportListStmt {
    names: Vec<NodeId>,
    from: Option<String>,
  },
  ExportName {
    // The local binding being exported; absent for re-exports.
    target: Option<NodeId>,
    exportable: String,
    alias: String,
  },
  ExprStmt {
    expr: NodeId,
  },
  ForInOfStmt {
    of: bool,
    await_: bool,
    // A VarDecl without initializers, or an assignment target.
    lhs: NodeId,
    rhs: NodeId,
    body: NodeId,
  },
  ForTripleStmt {
    init: Option<NodeId>,
    cond: Option<NodeId>,
    post: Option<NodeId>,
    body: NodeId,
  },
  FuncDecl {
    export: bool,
    export_default: bool,
    name: Option<NodeId>,
    function: NodeId,
  },
  IfStmt {
    test: NodeId,
    consequent: NodeId,
    alternate: Option<NodeId>,
  },
  ImportName {
    importable: String,
    alias: NodeId,
  },
  ImportStmt {
    default: Option<NodeId>,
    names: Option<ImportNames>,
    module: String,
  },
  LabelStmt {
    name: String,
    statement: NodeId,
  },
  ReturnStmt {
    value: Option<NodeId>,
  },
  SwitchBranch {
    // None for `default:`.
    case: Option<NodeId>,
    body: Vec<NodeId>,
  },
  SwitchStmt {
    test: NodeId,
    branches: Vec<NodeId>,
  },
  ThrowStmt {
    value: NodeId,
  },
  TryStmt {
    wrapped: NodeId,
    catch: Option<NodeId>,
    finally: Option<NodeId>,
  },
  VarDecl {
    export: bool,
    mode: VarDeclMode,
    declarators: Vec<NodeId>,
  },
  VarDeclarator {
    pattern: NodeId,
    initializer: Option<NodeId>,
  },
  WhileStmt {
    condition: NodeId,
    body: NodeId,
  },
  WithStmt {
    object: NodeId,
    body: NodeId,
  },

  // Functions and classes.
  ClassMember {
    static_: bool,
    key: ClassOrObjKey,
    val: ClassOrObjVal,
  },
  ClassOrFuncName {
    name: String,
  },
  Func {
    arrow: bool,
    async_: bool,
    generator: bool,
    parameters: Vec<NodeId>,
    body: FuncBody,
  },
  ParamDecl {
    rest: bool,
    pattern: NodeId,
    default_value: Option<NodeId>,
  },

  // Expressions.
  ArrowFuncExpr {
    function: NodeId,
  },
  BinaryExpr {
    operator: OperatorName,
    left: NodeId,
    right: NodeId,
  },
  CallArg {
    spread: bool,
    value: NodeId,
  },
  CallExpr {
    optional_chaining: bool,
    callee: NodeId,
    arguments: Vec<NodeId>,
  },
  ClassExpr {
    name: Option<NodeId>,
    extends: Option<NodeId>,
    members: Vec<NodeId>,
  },
  ComputedMemberExpr {
    optional_chaining: bool,
    object: NodeId,
    member: NodeId,
  },
  CondExpr {
    test: NodeId,
    consequent: NodeId,
    alternate: NodeId,
  },
  FuncExpr {
    name: Option<NodeId>,
    function: NodeId,
  },
  IdExpr {
    name: String,
  },
  ImportExpr {
    module: NodeId,
  },
  ImportMeta,
  MemberExpr {
    optional_chaining: bool,
    left: NodeId,
    // Property names are not references, so they are plain strings.
    right: String,
  },
  NewTarget,
  SuperExpr,
  TaggedTemplateExpr {
    function: NodeId,
    parts: Vec<LitTemplatePart>,
  },
  ThisExpr,
  UnaryExpr {
    operator: OperatorName,
    argument: NodeId,
  },
  UnaryPostfixExpr {
    operator: OperatorName,
    argument: NodeId,
  },

  // Literals.
  LitArrExpr {
    elements: Vec<ArrElem>,
  },
  LitBigIntExpr {
    value: String,
  },
  LitBoolExpr {
    value: bool,
  },
  LitNullExpr,
  LitNumExpr {
    value: String,
  },
  LitObjExpr {
    members: Vec<NodeId>,
  },
  LitRegexExpr {
    value: String,
  },
  LitStrExpr {
    value: String,
  },
  LitTemplateExpr {
    parts: Vec<LitTemplatePart>,
  },
  ObjMember {
    typ: ObjMemberType,
  },

  // Patterns.
  ArrPat {
    elements: Vec<Option<ArrPatElem>>,
    rest: Option<NodeId>,
  },
  IdPat {
    name: String,
  },
  ObjPat {
    properties: Vec<NodeId>,
    rest: Option<NodeId>,
  },
  ObjPatProp {
    key: ClassOrObjKey,
    target: NodeId,
    shorthand: bool,
    default_value: Option<NodeId>,
  },

  // JSX.
  JsxAttr {
    name: String,
    value: Option<NodeId>,
  },
  JsxElem {
    // None for fragments.
    name: Option<NodeId>,
    attributes: Vec<NodeId>,
    children: Vec<NodeId>,
  },
  JsxExprContainer {
    value: Option<NodeId>,
  },
  JsxMemberExpr {
    base: String,
    path: Vec<String>,
  },
  JsxName {
    namespace: Option<String>,
    name: String,
  },
  JsxSpreadAttr {
    value: NodeId,
  },
  JsxText {
    value: String,
  },
}

fn key_child(key: &ClassOrObjKey, out: &mut Vec<NodeId>) {
  if let ClassOrObjKey::Computed(id) = key {
    out.push(*id);
  }
}

fn key_child_mut<'a>(key: &'a mut ClassOrObjKey, out: &mut Vec<&'a mut NodeId>) {
  if let ClassOrObjKey::Computed(id) = key {
    out.push(id);
  }
}

fn val_child(val: &ClassOrObjVal, out: &mut Vec<NodeId>) {
  match val {
    ClassOrObjVal::Getter(id)
    | ClassOrObjVal::Setter(id)
    | ClassOrObjVal::Method(id)
    | ClassOrObjVal::StaticBlock(id)
    | ClassOrObjVal::Prop(Some(id)) => out.push(*id),
    ClassOrObjVal::Prop(None) => {}
  }
}

fn val_child_mut<'a>(val: &'a mut ClassOrObjVal, out: &mut Vec<&'a mut NodeId>) {
  match val {
    ClassOrObjVal::Getter(id)
    | ClassOrObjVal::Setter(id)
    | ClassOrObjVal::Method(id)
    | ClassOrObjVal::StaticBlock(id)
    | ClassOrObjVal::Prop(Some(id)) => out.push(id),
    ClassOrObjVal::Prop(None) => {}
  }
}

impl Syntax {
  /// Child nodes in source order.
  pub fn children(&self) -> Vec<NodeId> {
    let mut out = Vec::new();
    let o = &mut out;
    match self {
      Syntax::TopLevel { body } | Syntax::BlockStmt { body } => o.extend(body),
      Syntax::CatchBlock { parameter, body } => {
        o.extend(parameter);
        o.push(*body);
      }
      Syntax::ClassDecl {
        name,
        extends,
        members,
        ..
      }
      | Syntax::ClassExpr {
        name,
        extends,
        members,
      } => {
        o.extend(name);
        o.extend(extends);
        o.extend(members);
      }
      Syntax::DoWhileStmt { body, condition } => {
        o.push(*body);
        o.push(*condition);
      }
      Syntax::ExportDefaultExprStmt { expression } => o.push(*expression),
      Syntax::ExportListStmt { names, .. } => o.extend(names),
      Syntax::ExportName { target, .. } => o.extend(target),
      Syntax::ExprStmt { expr } => o.push(*expr),
      Syntax::ForInOfStmt { lhs, rhs, body, .. } => {
        o.push(*lhs);
        o.push(*rhs);
        o.push(*body);
      }
      Syntax::ForTripleStmt {
        init,
        cond,
        post,
        body,
      } => {
        o.extend(init);
        o.extend(cond);
        o.extend(post);
        o.push(*body);
      }
      Syntax::FuncDecl { name, function, .. } | Syntax::FuncExpr { name, function } => {
        o.extend(name);
        o.push(*function);
      }
      Syntax::IfStmt {
        test,
        consequent,
        alternate,
      } => {
        o.push(*test);
        o.push(*consequent);
        o.extend(alternate);
      }
      Syntax::ImportName { alias, .. } => o.push(*alias),
      Syntax::ImportStmt { default, names, .. } => {
        o.extend(default);
        match names {
          Some(ImportNames::All(id)) => o.push(*id),
          Some(ImportNames::Specific(ids)) => o.extend(ids),
          None => {}
        }
      }
      Syntax::LabelStmt { statement, .. } => o.push(*statement),
      Syntax::ReturnStmt { value } => o.extend(value),
      Syntax::SwitchBranch { case, body } => {
        o.extend(case);
        o.extend(body);
      }
      Syntax::SwitchStmt { test, branches } => {
        o.push(*test);
        o.extend(branches);
      }
      Syntax::ThrowStmt { value } => o.push(*value),
      Syntax::TryStmt {
        wrapped,
        catch,
        finally,
      } => {
        o.push(*wrapped);
        o.extend(catch);
        o.extend(finally);
      }
      Syntax::VarDecl { declarators, .. } => o.extend(declarators),
      Syntax::VarDeclarator {
        pattern,
        initializer,
      } => {
        o.push(*pattern);
        o.extend(initializer);
      }
      Syntax::WhileStmt { condition, body } => {
        o.push(*condition);
        o.push(*body);
      }
      Syntax::WithStmt { object, body } => {
        o.push(*object);
        o.push(*body);
      }
      Syntax::ClassMember { key, val, .. } => {
        key_child(key, o);
        val_child(val, o);
      }
      Syntax::Func {
        parameters, body, ..
      } => {
        o.extend(parameters);
        match body {
          FuncBody::Block(id) | FuncBody::Expression(id) => o.push(*id),
        }
      }
      Syntax::ParamDecl {
        pattern,
        default_value,
        ..
      } => {
        o.push(*pattern);
        o.extend(default_value);
      }
      Syntax::ArrowFuncExpr { function } => o.push(*function),
      Syntax::BinaryExpr { left, right, .. } => {
        o.push(*left);
        o.push(*right);
      }
      Syntax::CallArg { value, .. } => o.push(*value),
      Syntax::CallExpr {
        callee, arguments, ..
      } => {
        o.push(*callee);
        o.extend(arguments);
      }
      Syntax::ComputedMemberExpr { object, member, .. } => {
        o.push(*object);
        o.push(*member);
      }
      Syntax::CondExpr {
        test,
        consequent,
        alternate,
      } => {
        o.push(*test);
        o.push(*consequent);
        o.push(*alternate);
      }
      Syntax::ImportExpr { module } => o.push(*module),
      Syntax::MemberExpr { left, .. } => o.push(*left),
      Syntax::TaggedTemplateExpr { function, parts } => {
        o.push(*function);
        for part in parts {
          if let LitTemplatePart::Substitution(id) = part {
            o.push(*id);
          }
        }
      }
      Syntax::LitTemplateExpr { parts } => {
        for part in parts {
          if let LitTemplatePart::Substitution(id) = part {
            o.push(*id);
          }
        }
      }
      Syntax::UnaryExpr { argument, .. } | Syntax::UnaryPostfixExpr { argument, .. } => {
        o.push(*argument)
      }
      Syntax::LitArrExpr { elements } => {
        for elem in elements {
          match elem {
            ArrElem::Single(id) | ArrElem::Rest(id) => o.push(*id),
            ArrElem::Empty => {}
          }
        }
      }
      Syntax::LitObjExpr { members } => o.extend(members),
      Syntax::ObjMember { typ } => match typ {
        ObjMemberType::Valued { key, val } => {
          key_child(key, o);
          val_child(val, o);
        }
        ObjMemberType::Shorthand { id, default_value } => {
          o.push(*id);
          o.extend(default_value);
        }
        ObjMemberType::Rest { val } => o.push(*val),
      },
      Syntax::ArrPat { elements, rest } => {
        for elem in elements.iter().flatten() {
          o.push(elem.target);
          o.extend(elem.default_value);
        }
        o.extend(rest);
      }
      Syntax::ObjPat { properties, rest } => {
        o.extend(properties);
        o.extend(rest);
      }
      Syntax::ObjPatProp {
        key,
        target,
        shorthand,
        default_value,
      } => {
        // A shorthand key is the target itself.
        if !shorthand {
          key_child(key, o);
        }
        o.push(*target);
        o.extend(default_value);
      }
      Syntax::JsxAttr { value, .. } => o.extend(value),
      Syntax::JsxElem {
        name,
        attributes,
        children,
      } => {
        o.extend(name);
        o.extend(attributes);
        o.extend(children);
      }
      Syntax::JsxExprContainer { value } => o.extend(value),
      Syntax::JsxSpreadAttr { value } => o.push(*value),
      Syntax::BreakStmt { .. }
      | Syntax::ClassOrFuncName { .. }
      | Syntax::ContinueStmt { .. }
      | Syntax::DebuggerStmt
      | Syntax::EmptyStmt
      | Syntax::ExportAllStmt { .. }
      | Syntax::IdExpr { .. }
      | Syntax::IdPat { .. }
      | Syntax::ImportMeta
      | Syntax::JsxMemberExpr { .. }
      | Syntax::JsxName { .. }
      | Syntax::JsxText { .. }
      | Syntax::LitBigIntExpr { .. }
      | Syntax::LitBoolExpr { .. }
      | Syntax::LitNullExpr
      | Syntax::LitNumExpr { .. }
      | Syntax::LitRegexExpr { .. }
      | Syntax::LitStrExpr { .. }
      | Syntax::NewTarget
      | Syntax::SuperExpr
      | Syntax::ThisExpr => {}
    };
    out
  }

  /// Mutable references to every child slot, in the same order as `children`.
  pub fn child_slots_mut(&mut self) -> Vec<&mut NodeId> {
    let mut out = Vec::new();
    let o = &mut out;
    match self {
      Syntax::TopLevel { body } | Syntax::BlockStmt { body } => o.extend(body.iter_mut()),
      Syntax::CatchBlock { parameter, body } => {
        o.extend(parameter.as_mut());
        o.push(body);
      }
      Syntax::ClassDecl {
        name,
        extends,
        members,
        ..
      }
      | Syntax::ClassExpr {
        name,
        extends,
        members,
      } => {
        o.extend(name.as_mut());
        o.extend(extends.as_mut());
        o.extend(members.iter_mut());
      }
      Syntax::DoWhileStmt { body, condition } => {
        o.push(body);
        o.push(condition);
      }
      Syntax::ExportDefaultExprStmt { expression } => o.push(expression),
      Syntax::ExportListStmt { names, .. } => o.extend(names.iter_mut()),
      Syntax::ExportName { target, .. } => o.extend(target.as_mut()),
      Syntax::ExprStmt { expr } => o.push(expr),
      Syntax::ForInOfStmt { lhs, rhs, body, .. } => {
        o.push(lhs);
        o.push(rhs);
        o.push(body);
      }
      Syntax::ForTripleStmt {
        init,
        cond,
        post,
        body,
      } => {
        o.extend(init.as_mut());
        o.extend(cond.as_mut());
        o.extend(post.as_mut());
        o.push(body);
      }
      Syntax::FuncDecl { name, function, .. } | Syntax::FuncExpr { name, function } => {
        o.extend(name.as_mut());
        o.push(function);
      }
      Syntax::IfStmt {
        test,
        consequent,
        alternate,
      } => {
        o.push(test);
        o.push(consequent);
        o.extend(alternate.as_mut());
      }
      Syntax::ImportName { alias, .. } => o.push(alias),
      Syntax::ImportStmt { default, names, .. } => {
        o.extend(default.as_mut());
        match names {
          Some(ImportNames::All(id)) => o.push(id),
          Some(ImportNames::Specific(ids)) => o.extend(ids.iter_mut()),
          None => {}
        }
      }
      Syntax::LabelStmt { statement, .. } => o.push(statement),
      Syntax::ReturnStmt { value } => o.extend(value.as_mut()),
      Syntax::SwitchBranch { case, body } => {
        o.extend(case.as_mut());
        o.extend(body.iter_mut());
      }
      Syntax::SwitchStmt { test, branches } => {
        o.push(test);
        o.extend(branches.iter_mut());
      }
      Syntax::ThrowStmt { value } => o.push(value),
      Syntax::TryStmt {
        wrapped,
        catch,
        finally,
      } => {
        o.push(wrapped);
        o.extend(catch.as_mut());
        o.extend(finally.as_mut());
      }
      Syntax::VarDecl { declarators, .. } => o.extend(declarators.iter_mut()),
      Syntax::VarDeclarator {
        pattern,
        initializer,
      } => {
        o.push(pattern);
        o.extend(initializer.as_mut());
      }
      Syntax::WhileStmt { condition, body } => {
        o.push(condition);
        o.push(body);
      }
      Syntax::WithStmt { object, body } => {
        o.push(object);
        o.push(body);
      }
      Syntax::ClassMember { key, val, .. } => {
        key_child_mut(key, o);
        val_child_mut(val, o);
      }
      Syntax::Func {
        parameters, body, ..
      } => {
        o.extend(parameters.iter_mut());
        match body {
          FuncBody::Block(id) | FuncBody::Expression(id) => o.push(id),
        }
      }
      Syntax::ParamDecl {
        pattern,
        default_value,
        ..
      } => {
        o.push(pattern);
        o.extend(default_value.as_mut());
      }
      Syntax::ArrowFuncExpr { function } => o.push(function),
      Syntax::BinaryExpr { left, right, .. } => {
        o.push(left);
        o.push(right);
      }
      Syntax::CallArg { value, .. } => o.push(value),
      Syntax::CallExpr {
        callee, arguments, ..
      } => {
        o.push(callee);
        o.extend(arguments.iter_mut());
      }
      Syntax::ComputedMemberExpr { object, member, .. } => {
        o.push(object);
        o.push(member);
      }
      Syntax::CondExpr {
        test,
        consequent,
        alternate,
      } => {
        o.push(test);
        o.push(consequent);
        o.push(alternate);
      }
      Syntax::ImportExpr { module } => o.push(module),
      Syntax::MemberExpr { left, .. } => o.push(left),
      Syntax::TaggedTemplateExpr { function, parts } => {
        o.push(function);
        for part in parts.iter_mut() {
          if let LitTemplatePart::Substitution(id) = part {
            o.push(id);
          }
        }
      }
      Syntax::LitTemplateExpr { parts } => {
        for part in parts.iter_mut() {
          if let LitTemplatePart::Substitution(id) = part {
            o.push(id);
          }
        }
      }
      Syntax::UnaryExpr { argument, .. } | Syntax::UnaryPostfixExpr { argument, .. } => {
        o.push(argument)
      }
      Syntax::LitArrExpr { elements } => {
        for elem in elements.iter_mut() {
          match elem {
            ArrElem::Single(id) | ArrElem::Rest(id) => o.push(id),
            ArrElem::Empty => {}
          }
        }
      }
      Syntax::LitObjExpr { members } => o.extend(members.iter_mut()),
      Syntax::ObjMember { typ } => match typ {
        ObjMemberType::Valued { key, val } => {
          key_child_mut(key, o);
          val_child_mut(val, o);
        }
        ObjMemberType::Shorthand { id, default_value } => {
          o.push(id);
          o.extend(default_value.as_mut());
        }
        ObjMemberType::Rest { val } => o.push(val),
      },
      Syntax::ArrPat { elements, rest } => {
        for ArrPatElem {
          target,
          default_value,
        } in elements.iter_mut().flatten()
        {
          o.push(target);
          o.extend(default_value.as_mut());
        }
        o.extend(rest.as_mut());
      }
      Syntax::ObjPat { properties, rest } => {
        o.extend(properties.iter_mut());
        o.extend(rest.as_mut());
      }
      Syntax::ObjPatProp {
        key,
        target,
        shorthand,
        default_value,
      } => {
        if !*shorthand {
          key_child_mut(key, o);
        }
        o.push(target);
        o.extend(default_value.as_mut());
      }
      Syntax::JsxAttr { value, .. } => o.extend(value.as_mut()),
      Syntax::JsxElem {
        name,
        attributes,
        children,
      } => {
        o.extend(name.as_mut());
        o.extend(attributes.iter_mut());
        o.extend(children.iter_mut());
      }
      Syntax::JsxExprContainer { value } => o.extend(value.as_mut()),
      Syntax::JsxSpreadAttr { value } => o.push(value),
      Syntax::BreakStmt { .. }
      | Syntax::ClassOrFuncName { .. }
      | Syntax::ContinueStmt { .. }
      | Syntax::DebuggerStmt
      | Syntax::EmptyStmt
      | Syntax::ExportAllStmt { .. }
      | Syntax::IdExpr { .. }
      | Syntax::IdPat { .. }
      | Syntax::ImportMeta
      | Syntax::JsxMemberExpr { .. }
      | Syntax::JsxName { .. }
      | Syntax::JsxText { .. }
      | Syntax::LitBigIntExpr { .. }
      | Syntax::LitBoolExpr { .. }
      | Syntax::LitNullExpr
      | Syntax::LitNumExpr { .. }
      | Syntax::LitRegexExpr { .. }
      | Syntax::LitStrExpr { .. }
      | Syntax::NewTarget
      | Syntax::SuperExpr
      | Syntax::ThisExpr => {}
    };
    out
  }

  /// Statement lists whose items can be inserted or removed by a rewrite.
  pub fn stmt_list(&self) -> Option<&Vec<NodeId>> {
    match self {
      Syntax::TopLevel { body } | Syntax::BlockStmt { body } | Syntax::SwitchBranch { body, .. } => {
        Some(body)
      }
      _ => None,
    }
  }

  pub fn stmt_list_mut(&mut self) -> Option<&mut Vec<NodeId>> {
    match self {
      Syntax::TopLevel { body } | Syntax::BlockStmt { body } | Syntax::SwitchBranch { body, .. } => {
        Some(body)
      }
      _ => None,
    }
  }

  /// A statement list, or one of the comma-separated lists the rewriter edits: the declarators of a
  /// `VarDecl` and the properties of an `ObjPat`.
  pub fn item_list(&self) -> Option<&Vec<NodeId>> {
    match self {
      Syntax::VarDecl { declarators, .. } => Some(declarators),
      Syntax::ObjPat { properties, .. } => Some(properties),
      _ => self.stmt_list(),
    }
  }

  pub fn item_list_mut(&mut self) -> Option<&mut Vec<NodeId>> {
    match self {
      Syntax::VarDecl { declarators, .. } => Some(declarators),
      Syntax::ObjPat { properties, .. } => Some(properties),
      _ => self.stmt_list_mut(),
    }
  }

  pub fn is_statement(&self) -> bool {
    matches!(
      self,
      Syntax::BlockStmt { .. }
        | Syntax::BreakStmt { .. }
        | Syntax::ClassDecl { .. }
        | Syntax::ContinueStmt { .. }
        | Syntax::DebuggerStmt
        | Syntax::DoWhileStmt { .. }
        | Syntax::EmptyStmt
        | Syntax::ExportAllStmt { .. }
        | Syntax::ExportDefaultExprStmt { .. }
        | Syntax::ExportListStmt { .. }
        | Syntax::ExprStmt { .. }
        | Syntax::ForInOfStmt { .. }
        | Syntax::ForTripleStmt { .. }
        | Syntax::FuncDecl { .. }
        | Syntax::IfStmt { .. }
        | Syntax::ImportStmt { .. }
        | Syntax::LabelStmt { .. }
        | Syntax::ReturnStmt { .. }
        | Syntax::SwitchStmt { .. }
        | Syntax::ThrowStmt { .. }
        | Syntax::TryStmt { .. }
        | Syntax::VarDecl { .. }
        | Syntax::WhileStmt { .. }
        | Syntax::WithStmt { .. }
    )
  }

  /// The identifier text of `IdExpr`, `IdPat` and `ClassOrFuncName` nodes.
  pub fn ident_name(&self) -> Option<&str> {
    match self {
      Syntax::IdExpr { name } | Syntax::IdPat { name } | Syntax::ClassOrFuncName { name } => {
        Some(name)
      }
      _ => None,
    }
  }
}
