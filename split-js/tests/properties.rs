use proptest::prelude::*;
use split_js::config::SplitConfig;
use split_js::rewrite;
use split_js::table::REACT_CORE;
use split_js::table::REACT_DOM;
use split_js::table::REACT_DOM_SERVER;

fn arb_member() -> impl Strategy<Value = &'static str> {
  let members: Vec<&'static str> = REACT_CORE
    .iter()
    .chain(REACT_DOM)
    .chain(REACT_DOM_SERVER)
    .copied()
    .collect();
  prop::sample::select(members)
}

fn program(members: &[&str], markup: bool) -> String {
  let mut src = "var React = require('react');\n".to_string();
  for m in members {
    src.push_str(&format!("React.{}(x);\n", m));
  }
  if markup {
    src.push_str("var el = <div />;\n");
  };
  src
}

proptest! {
  #[test]
  fn rewrite_is_idempotent(members in prop::collection::vec(arb_member(), 0..8), markup in any::<bool>()) {
    let config = SplitConfig::default();
    let once = rewrite(&program(&members, markup), &config).unwrap();
    let twice = rewrite(&once.output, &config).unwrap();
    prop_assert!(!twice.changed);
    prop_assert_eq!(once.output, twice.output);
  }

  #[test]
  fn every_use_is_counted_once(members in prop::collection::vec(arb_member(), 0..8), markup in any::<bool>()) {
    let outcome = rewrite(&program(&members, markup), &SplitConfig::default()).unwrap();
    let report = &outcome.reports[1];
    prop_assert_eq!(report.tally.total(), members.len() + usize::from(markup));
    let moved = members.iter().filter(|m| !REACT_CORE.contains(*m)).count();
    prop_assert_eq!(report.tally.namespace_a + report.tally.namespace_b, moved);
    prop_assert_eq!(
      report.removed_declaration,
      report.tally.core == 0 && report.tally.any_namespace()
    );
    prop_assert_eq!(outcome.output.contains("React."), report.tally.core > usize::from(markup));
  }
}
