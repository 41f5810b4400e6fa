use crate::table::ClassificationTable;
use crate::table::Namespace;
use crate::table::REACT_CORE;
use crate::table::REACT_DOM;
use crate::table::REACT_DOM_SERVER;
use serde::Deserialize;
use serde::Serialize;
use syntax_js::emit::QuoteStyle;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("invalid config: {0}")]
  Json(#[from] serde_json::Error),
  #[error("member `{member}` is listed under more than one destination")]
  OverlappingMember { member: String },
  #[error("config lists no modules")]
  NoModules,
}

/// Member lists of the classification table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
  #[serde(default)]
  pub core: Vec<String>,
  #[serde(default)]
  pub namespace_a: Vec<String>,
  #[serde(default)]
  pub namespace_b: Vec<String>,
}

impl Default for TableConfig {
  fn default() -> Self {
    let owned = |names: &[&str]| names.iter().map(|n| n.to_string()).collect();
    TableConfig {
      core: owned(REACT_CORE),
      namespace_a: owned(REACT_DOM),
      namespace_b: owned(REACT_DOM_SERVER),
    }
  }
}

/// A destination module and the identifier its declarations bind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceSpec {
  pub ident: String,
  pub module: String,
}

/// One pass: the core module name and its two successors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSpec {
  pub core: String,
  pub namespace_a: NamespaceSpec,
  pub namespace_b: NamespaceSpec,
}

impl ModuleSpec {
  pub fn namespace(&self, ns: Namespace) -> &NamespaceSpec {
    match ns {
      Namespace::A => &self.namespace_a,
      Namespace::B => &self.namespace_b,
    }
  }

  pub fn new(core: &str, a: (&str, &str), b: (&str, &str)) -> ModuleSpec {
    ModuleSpec {
      core: core.to_string(),
      namespace_a: NamespaceSpec {
        ident: a.0.to_string(),
        module: a.1.to_string(),
      },
      namespace_b: NamespaceSpec {
        ident: b.0.to_string(),
        module: b.1.to_string(),
      },
    }
  }
}

fn default_modules() -> Vec<ModuleSpec> {
  vec![
    ModuleSpec::new(
      "React",
      ("ReactDOM", "ReactDOM"),
      ("ReactDOMServer", "ReactDOMServer"),
    ),
    ModuleSpec::new(
      "react",
      ("ReactDOM", "react-dom"),
      ("ReactDOMServer", "react-dom/server"),
    ),
  ]
}

/// Everything a rewrite needs. The default is the React split.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitConfig {
  #[serde(default)]
  pub quote: QuoteStyle,
  #[serde(default)]
  pub table: TableConfig,
  #[serde(default = "default_modules")]
  pub modules: Vec<ModuleSpec>,
}

impl Default for SplitConfig {
  fn default() -> Self {
    SplitConfig {
      quote: QuoteStyle::default(),
      table: TableConfig::default(),
      modules: default_modules(),
    }
  }
}

impl SplitConfig {
  /// Parses and validates a JSON config. Omitted fields take their default.
  pub fn from_json(json: &str) -> Result<SplitConfig, ConfigError> {
    let config: SplitConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.modules.is_empty() {
      return Err(ConfigError::NoModules);
    };
    self.table().map(|_| ())
  }

  pub fn table(&self) -> Result<ClassificationTable, ConfigError> {
    ClassificationTable::new(
      &self.table.core,
      &self.table.namespace_a,
      &self.table.namespace_b,
    )
  }
}
