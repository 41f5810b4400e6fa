use similar::ChangeTag;
use similar::TextDiff;
use split_js::config::SplitConfig;
use split_js::rewrite;
use std::fs::read_dir;
use std::fs::read_to_string;
use std::path::Path;

fn diff(expected: &str, actual: &str) -> String {
  let mut msg = String::new();
  for change in TextDiff::from_lines(expected, actual).iter_all_changes() {
    let sign = match change.tag() {
      ChangeTag::Delete => "-",
      ChangeTag::Insert => "+",
      ChangeTag::Equal => " ",
    };
    msg.push_str(sign);
    msg.push_str(change.as_str().unwrap());
  }
  msg
}

#[test]
fn test_fixtures() {
  let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
  let config = SplitConfig::default();
  let mut count = 0;
  for entry in read_dir(&dir).unwrap() {
    let path = entry.unwrap().path();
    let name = path.file_name().unwrap().to_str().unwrap().to_string();
    let Some(stem) = name.strip_suffix(".input.js") else {
      continue;
    };
    println!("Testing {}...", stem);
    let input = read_to_string(&path).unwrap();
    let expected = read_to_string(dir.join(format!("{}.output.js", stem))).unwrap();
    let outcome = rewrite(&input, &config).unwrap();
    if outcome.output != expected {
      panic!("Failed {}, got:\n{}", stem, diff(&expected, &outcome.output));
    };
    assert!(outcome.changed);

    // Output is a fixed point.
    let again = rewrite(&outcome.output, &config).unwrap();
    assert!(!again.changed, "{} is not idempotent", stem);
    count += 1;
  }
  assert_eq!(count, 2);
}

#[test]
fn test_fixture_reports() {
  let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
  let input = read_to_string(dir.join("react-to-react-dom.input.js")).unwrap();
  let outcome = rewrite(&input, &SplitConfig::default()).unwrap();
  let [upper, lower] = &outcome.reports[..] else {
    panic!("expected one report per module");
  };
  assert_eq!(upper.module, "React");
  assert_eq!(upper.alias, None);
  assert_eq!(lower.module, "react");
  assert_eq!(lower.alias.as_deref(), Some("React"));
  // `React.Component` and the markup element stay, `findDOMNode` moves.
  assert_eq!(lower.tally.core, 2);
  assert_eq!(lower.tally.namespace_a, 1);
  assert_eq!(lower.tally.namespace_b, 0);
  assert_eq!(lower.inserted, vec!["ReactDOM".to_string()]);
  assert!(!lower.removed_declaration);
}
