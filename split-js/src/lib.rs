//! Splits a monolithic module into two successor modules across a codebase, one file at a time.
//!
//! For every configured `(core, namespace A, namespace B)` tuple, a pass over the file:
//!
//! 1. finds the single declaration that loads the core module ([`resolve`]);
//! 2. classifies each use of its alias and redirects members that moved ([`classify`]);
//! 3. declares the namespaces that received uses ([`synth`]);
//! 4. removes the core declaration once nothing uses it ([`cleanup`]).
//!
//! Passes run in order over the same tree, so later passes see earlier edits.
use classify::Tally;
use config::ModuleSpec;
use config::SplitConfig;
use error::RewriteResult;
use serde::Serialize;
use syntax_js::ast::Ast;
use syntax_js::emit::emit;
use syntax_js::emit::EmitOptions;
use table::ClassificationTable;
use tracing::debug;
use tracing::debug_span;

pub mod classify;
pub mod cleanup;
pub mod config;
pub mod error;
pub mod resolve;
pub mod synth;
pub mod table;

pub use error::RewriteError;
pub use error::RewriteErrorKind;
pub use error::SplitError;

/// What one pass did to a file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PassReport {
  pub module: String,
  /// The core alias, if the module is loaded by the file.
  pub alias: Option<String>,
  pub tally: Tally,
  /// Namespace identifiers that got a new declaration.
  pub inserted: Vec<String>,
  /// Namespace identifiers whose existing declaration was reused.
  pub reused: Vec<String>,
  pub replicated_reassignments: usize,
  pub removed_declaration: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RewriteOutcome {
  pub output: String,
  pub reports: Vec<PassReport>,
  pub changed: bool,
}

/// Runs one tuple over `ast`.
pub fn run_pass(
  ast: &mut Ast,
  spec: &ModuleSpec,
  table: &ClassificationTable,
) -> RewriteResult<PassReport> {
  let span = debug_span!("pass", module = %spec.core);
  let _enter = span.enter();
  let mut report = PassReport {
    module: spec.core.clone(),
    ..PassReport::default()
  };
  let scopes = syntax_js::scope::bind(ast);
  let Some((binding, state)) = resolve::resolve(ast, &scopes, spec, table)? else {
    debug!("module not loaded");
    return Ok(report);
  };
  report.alias = Some(binding.alias.clone());
  for (declared, ns) in [
    (state.namespace_a_declared, &spec.namespace_a),
    (state.namespace_b_declared, &spec.namespace_b),
  ] {
    if declared {
      report.reused.push(ns.ident.clone());
    };
  }
  synth::check_scope_conflicts(ast, &state, spec)?;
  let usage = classify::classify(ast, &scopes, &binding, spec, table)?;
  debug!(
    core = usage.tally.core,
    namespace_a = usage.tally.namespace_a,
    namespace_b = usage.tally.namespace_b,
    "tallied uses"
  );
  let synthesized = synth::synthesize(ast, &binding, &state, &usage, spec)?;
  report.removed_declaration = cleanup::cleanup(ast, &binding, &usage)?;
  report.tally = usage.tally;
  report.inserted = synthesized.inserted;
  report.replicated_reassignments = synthesized.replicated_reassignments;
  Ok(report)
}

/// Parses `source`, runs every configured pass and prints the result.
pub fn rewrite(source: &str, config: &SplitConfig) -> Result<RewriteOutcome, SplitError> {
  let table = config.table()?;
  let mut ast = syntax_js::parse(source)?;
  let mut reports = Vec::with_capacity(config.modules.len());
  for spec in &config.modules {
    reports.push(run_pass(&mut ast, spec, &table)?);
  }
  let output = emit(&ast, EmitOptions {
    quote: config.quote,
  })?;
  let changed = output != source;
  Ok(RewriteOutcome {
    output,
    reports,
    changed,
  })
}
