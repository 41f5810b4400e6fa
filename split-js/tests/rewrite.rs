use split_js::config::ModuleSpec;
use split_js::config::SplitConfig;
use split_js::config::TableConfig;
use split_js::rewrite;
use split_js::RewriteError;
use split_js::RewriteErrorKind;
use split_js::SplitError;
use syntax_js::emit::QuoteStyle;

fn owned(names: &[&str]) -> Vec<String> {
  names.iter().map(|n| n.to_string()).collect()
}

fn config() -> SplitConfig {
  SplitConfig {
    quote: QuoteStyle::Single,
    table: TableConfig {
      core: owned(&["CoreThing", "coreFn"]),
      namespace_a: owned(&["splitA", "SplitAThing"]),
      namespace_b: owned(&["splitB", "SplitBThing"]),
    },
    modules: vec![ModuleSpec::new(
      "core",
      ("SplitA", "namespace-a"),
      ("SplitB", "namespace-b"),
    )],
  }
}

fn rewritten(source: &str) -> String {
  let outcome = rewrite(source, &config()).unwrap();
  // Every successful rewrite is a fixed point.
  let again = rewrite(&outcome.output, &config()).unwrap();
  assert_eq!(again.output, outcome.output, "not idempotent");
  outcome.output
}

fn rewrite_error(source: &str) -> RewriteError {
  match rewrite(source, &config()) {
    Err(SplitError::Rewrite(err)) => err,
    other => panic!("expected a rewrite error, got {:?}", other.map(|o| o.output)),
  }
}

#[test]
fn test_all_uses_move_to_one_namespace() {
  assert_eq!(
    rewritten("const Foo = require('core');\nFoo.splitA(x);\n"),
    "const SplitA = require('namespace-a');\nSplitA.splitA(x);\n",
  );
}

#[test]
fn test_namespace_import_form() {
  assert_eq!(
    rewritten("import * as Foo from 'core';\nFoo.splitB();\n"),
    "import * as SplitB from 'namespace-b';\nSplitB.splitB();\n",
  );
}

#[test]
fn test_mixed_destructuring_keeps_core_subset() {
  assert_eq!(
    rewritten("import Foo from 'core';\nconst {CoreThing, SplitAThing} = Foo;\n"),
    "import Foo from 'core';\nimport SplitA from 'namespace-a';\nconst {CoreThing} = Foo;\nconst {SplitAThing} = SplitA;\n",
  );
}

#[test]
fn test_mixed_destructuring_keeps_comments() {
  assert_eq!(
    rewritten("var Foo = require('core');\nvar {\n  CoreThing, // base\n  splitA,\n  coreFn\n} = Foo;\n"),
    "var Foo = require('core');\nvar SplitA = require('namespace-a');\nvar {\n  CoreThing, // base\n  coreFn\n} = Foo;\nvar {splitA} = SplitA;\n",
  );
}

#[test]
fn test_destructuring_into_both_namespaces() {
  let outcome = rewrite(
    "const Foo = require('core');\nconst {splitA, splitB} = Foo;\n",
    &config(),
  )
  .unwrap();
  assert_eq!(
    outcome.output,
    "const SplitA = require('namespace-a');\nconst SplitB = require('namespace-b');\nconst {splitA} = SplitA;\nconst {splitB} = SplitB;\n",
  );
  let report = &outcome.reports[0];
  assert_eq!(report.tally.core, 0);
  assert_eq!(report.tally.namespace_a, 1);
  assert_eq!(report.tally.namespace_b, 1);
  assert!(report.removed_declaration);
}

#[test]
fn test_single_namespace_destructuring_renames_initializer() {
  assert_eq!(
    rewritten("const Foo = require('core');\nconst {splitB, SplitBThing} = Foo;\n"),
    "const SplitB = require('namespace-b');\nconst {splitB, SplitBThing} = SplitB;\n",
  );
}

#[test]
fn test_core_destructuring_in_for_head() {
  let source = "const Foo = require('core');\nfor (const {CoreThing} = Foo;;) {}\n";
  let outcome = rewrite(source, &config()).unwrap();
  assert_eq!(outcome.output, source);
  assert_eq!(outcome.reports[0].tally.core, 1);
  assert_eq!(outcome.reports[0].tally.namespace_a, 0);
}

#[test]
fn test_namespace_destructuring_in_for_head() {
  assert_eq!(
    rewritten("const Foo = require('core');\nfor (const {splitA} = Foo;;) {}\n"),
    "const SplitA = require('namespace-a');\nfor (const {splitA} = SplitA;;) {}\n",
  );
}

#[test]
fn test_mixed_destructuring_in_for_head_is_unsupported() {
  let err = rewrite_error("const Foo = require('core');\nfor (const {CoreThing, splitA} = Foo;;) {}\n");
  assert!(matches!(err.kind, RewriteErrorKind::UnsupportedConstruct { .. }), "{}", err);
  assert_eq!(err.position.line, 2);
}

#[test]
fn test_markup_keeps_core_declaration() {
  let outcome = rewrite(
    "const Foo = require('core');\nFoo.splitA(x);\nconst el = <div />;\n",
    &config(),
  )
  .unwrap();
  assert_eq!(
    outcome.output,
    "const Foo = require('core');\nconst SplitA = require('namespace-a');\nSplitA.splitA(x);\nconst el = <div />;\n",
  );
  let report = &outcome.reports[0];
  assert_eq!(report.tally.core, 1);
  assert!(!report.removed_declaration);
}

#[test]
fn test_existing_namespace_declaration_is_reused() {
  let outcome = rewrite(
    "const Foo = require('core');\nconst SplitA = require('namespace-a');\nFoo.splitA();\n",
    &config(),
  )
  .unwrap();
  assert_eq!(
    outcome.output,
    "const SplitA = require('namespace-a');\nSplitA.splitA();\n",
  );
  let report = &outcome.reports[0];
  assert_eq!(report.reused, vec!["SplitA".to_string()]);
  assert!(report.inserted.is_empty());
}

#[test]
fn test_string_computed_member() {
  assert_eq!(
    rewritten("const Foo = require('core');\nFoo['splitA']();\nFoo.coreFn();\n"),
    "const Foo = require('core');\nconst SplitA = require('namespace-a');\nSplitA['splitA']();\nFoo.coreFn();\n",
  );
}

#[test]
fn test_removes_only_the_core_declarator() {
  assert_eq!(
    rewritten("var Foo = require('core'), x = 1;\nFoo.splitA();\n"),
    "var x = 1;\nvar SplitA = require('namespace-a');\nSplitA.splitA();\n",
  );
}

#[test]
fn test_shadowed_alias_is_left_alone() {
  assert_eq!(
    rewritten(
      "const Foo = require('core');\nfunction f(Foo) { return Foo.whatever; }\nFoo.splitA();\n"
    ),
    "const SplitA = require('namespace-a');\nfunction f(Foo) { return Foo.whatever; }\nSplitA.splitA();\n",
  );
}

#[test]
fn test_reassignment_without_initializer() {
  let outcome = rewrite(
    "var Foo;\nFoo = require('core');\nFoo.splitB();\n",
    &config(),
  )
  .unwrap();
  assert_eq!(
    outcome.output,
    "var SplitB;\nSplitB = require('namespace-b');\nSplitB.splitB();\n",
  );
  assert_eq!(outcome.reports[0].replicated_reassignments, 1);
}

#[test]
fn test_reassignment_in_nested_block() {
  assert_eq!(
    rewritten(
      "var Foo = require('core');\nif (x) {\n  Foo = require('core');\n}\nFoo.splitA();\n"
    ),
    "var SplitA = require('namespace-a');\nif (x) {\n  SplitA = require('namespace-a');\n}\nSplitA.splitA();\n",
  );
}

#[test]
fn test_double_quotes() {
  let mut config = config();
  config.quote = QuoteStyle::Double;
  let outcome = rewrite(
    "const Foo = require('core');\nFoo.splitA();\nFoo.coreFn();\n",
    &config,
  )
  .unwrap();
  assert_eq!(
    outcome.output,
    "const Foo = require('core');\nconst SplitA = require(\"namespace-a\");\nSplitA.splitA();\nFoo.coreFn();\n",
  );
}

#[test]
fn test_untouched_files() {
  for source in [
    "const x = require('other');\nx.splitA();\n",
    "const {CoreThing} = require('core');\nCoreThing();\n",
    "import {CoreThing} from 'core';\n",
    "const Foo = require('core');\nFoo.coreFn();\n",
    "const Foo = require('core');\n",
  ] {
    let outcome = rewrite(source, &config()).unwrap();
    assert!(!outcome.changed, "{}", source);
    assert_eq!(outcome.output, source);
  }
}

#[test]
fn test_pinned_named_imports_count_as_core() {
  let outcome = rewrite(
    "import Foo, {CoreThing} from 'core';\nFoo.splitA();\n",
    &config(),
  )
  .unwrap();
  assert_eq!(
    outcome.output,
    "import Foo, {CoreThing} from 'core';\nimport SplitA from 'namespace-a';\nSplitA.splitA();\n",
  );
  assert_eq!(outcome.reports[0].tally.core, 1);
}

#[test]
fn test_react_defaults() {
  let source = "var React = require('React');\nReact.render(<App />, el);\nReact.renderToString(x);\n";
  let outcome = rewrite(source, &SplitConfig::default()).unwrap();
  assert_eq!(
    outcome.output,
    "var React = require('React');\nvar ReactDOM = require('ReactDOM');\nvar ReactDOMServer = require('ReactDOMServer');\nReactDOM.render(<App />, el);\nReactDOMServer.renderToString(x);\n",
  );
  assert!(!rewrite(&outcome.output, &SplitConfig::default()).unwrap().changed);
}

#[test]
fn test_unknown_member() {
  let err = rewrite_error("const Foo = require('core');\nFoo.nope();\n");
  assert_eq!(err.to_string(), "At 2:0: Unknown property Foo.nope");
}

#[test]
fn test_unknown_member_while_destructuring() {
  let err = rewrite_error("const Foo = require('core');\nconst {nope} = Foo;\n");
  assert_eq!(
    err.to_string(),
    "At 2:7: Unknown property Foo.nope while destructuring"
  );
}

#[test]
fn test_multiple_declarations() {
  let err = rewrite_error("const A = require('core');\nconst B = require('core');\n");
  assert_eq!(err.to_string(), "At 2:10: Multiple declarations of core");
}

#[test]
fn test_destructuring_require() {
  let err = rewrite_error("const {splitA} = require('core');\n");
  assert_eq!(err.kind, RewriteErrorKind::UnsupportedDestructuring {
    module: "core".to_string(),
  });
  let err = rewrite_error("import {splitA} from 'core';\n");
  assert!(matches!(
    err.kind,
    RewriteErrorKind::UnsupportedDestructuring { .. }
  ));
}

#[test]
fn test_reassignment_errors() {
  let err = rewrite_error("Foo = require('core');\n");
  assert_eq!(err.to_string(), "At 1:6: Unexpected number of bindings for Foo: 0");

  let err = rewrite_error("var Foo = 1;\nFoo = require('core');\n");
  assert_eq!(err.to_string(), "At 1:4: Unexpected initialization of core");

  let err = rewrite_error("let Foo = require('core');\nFoo = other;\n");
  assert_eq!(err.to_string(), "At 2:0: Unexpected assignment to core");
}

#[test]
fn test_scope_conflict() {
  let err = rewrite_error(
    "const Foo = require('core');\nfunction f() { var SplitA; }\nFoo.splitA();\n",
  );
  assert_eq!(err.kind, RewriteErrorKind::ScopeConflict {
    name: "SplitA".to_string(),
    core: "core".to_string(),
  });
  assert_eq!(
    err.to_string(),
    "At 2:19: SplitA is already defined in a different scope than core"
  );
}

#[test]
fn test_unsupported_uses() {
  for source in [
    "const Foo = require('core');\nuse(Foo);\n",
    "const Foo = require('core');\nFoo[key]();\n",
    "const Foo = require('core');\nexport default Foo;\n",
  ] {
    let err = rewrite_error(source);
    assert!(
      matches!(err.kind, RewriteErrorKind::UnsupportedConstruct { .. }),
      "{}: {}",
      source,
      err
    );
    assert_eq!(err.position.line, 2, "{}", source);
  }
}

#[test]
fn test_syntax_errors_are_located() {
  let source = "const Foo = require('core');\nFoo.(;\n";
  let err = rewrite(source, &config()).unwrap_err();
  assert!(matches!(err, SplitError::Syntax(_)));
  assert!(err.describe(source).starts_with("At 2:"));
}

#[test]
fn test_type_annotations_are_syntax_errors() {
  let source = "var React = require('react');\nfunction f(el: React.Element) {}\n";
  let err = rewrite(source, &SplitConfig::default()).unwrap_err();
  assert!(matches!(err, SplitError::Syntax(_)));
  assert!(err.describe(source).starts_with("At 2:"), "{}", err.describe(source));
}
