use crate::config::ConfigError;
use ahash::HashMap;
use ahash::HashMapExt;
use once_cell::sync::Lazy;
use serde::Serialize;

/// Where a member of the core module lives after the split.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Destination {
  Core,
  NamespaceA,
  NamespaceB,
}

/// One of the two modules that members move to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Namespace {
  A,
  B,
}

impl Destination {
  /// `None` for members that stay in the core module.
  pub fn namespace(self) -> Option<Namespace> {
    match self {
      Destination::Core => None,
      Destination::NamespaceA => Some(Namespace::A),
      Destination::NamespaceB => Some(Namespace::B),
    }
  }
}

impl From<Namespace> for Destination {
  fn from(ns: Namespace) -> Destination {
    match ns {
      Namespace::A => Destination::NamespaceA,
      Namespace::B => Destination::NamespaceB,
    }
  }
}

#[rustfmt::skip]
pub const REACT_CORE: &[&str] = &[
  "Children",
  "Component",
  "createElement",
  "cloneElement",
  "isValidElement",
  "PropTypes",
  "createClass",
  "createFactory",
  "createMixin",
  "DOM",
  "__spread",
];

#[rustfmt::skip]
pub const REACT_DOM: &[&str] = &[
  "findDOMNode",
  "render",
  "unmountComponentAtNode",
  "unstable_batchedUpdates",
  "unstable_renderSubtreeIntoContainer",
];

#[rustfmt::skip]
pub const REACT_DOM_SERVER: &[&str] = &[
  "renderToString",
  "renderToStaticMarkup",
];

pub static REACT_TABLE: Lazy<ClassificationTable> = Lazy::new(|| {
  let mut members = HashMap::new();
  for (names, dest) in [
    (REACT_CORE, Destination::Core),
    (REACT_DOM, Destination::NamespaceA),
    (REACT_DOM_SERVER, Destination::NamespaceB),
  ] {
    for &name in names {
      members.insert(name.to_string(), dest);
    }
  }
  ClassificationTable { members }
});

/// Member name to destination. Names absent from the table are unknown members.
#[derive(Clone, Debug, Default)]
pub struct ClassificationTable {
  members: HashMap<String, Destination>,
}

impl ClassificationTable {
  /// Builds a table from three disjoint member lists.
  pub fn new<S: AsRef<str>>(
    core: &[S],
    namespace_a: &[S],
    namespace_b: &[S],
  ) -> Result<ClassificationTable, ConfigError> {
    let mut members = HashMap::new();
    for (names, dest) in [
      (core, Destination::Core),
      (namespace_a, Destination::NamespaceA),
      (namespace_b, Destination::NamespaceB),
    ] {
      for name in names {
        let name = name.as_ref();
        if let Some(prev) = members.insert(name.to_string(), dest) {
          if prev != dest {
            return Err(ConfigError::OverlappingMember {
              member: name.to_string(),
            });
          };
        };
      }
    }
    Ok(ClassificationTable { members })
  }

  pub fn destination(&self, member: &str) -> Option<Destination> {
    self.members.get(member).copied()
  }

  pub fn is_core(&self, member: &str) -> bool {
    self.destination(member) == Some(Destination::Core)
  }

  pub fn len(&self) -> usize {
    self.members.len()
  }

  pub fn is_empty(&self) -> bool {
    self.members.is_empty()
  }
}
