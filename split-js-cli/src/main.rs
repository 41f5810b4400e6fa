use clap::Parser;
use rayon::prelude::*;
use split_js::config::SplitConfig;
use split_js::rewrite;
use std::fs;
use std::io::stdout;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use syntax_js::emit::QuoteStyle;
use tracing::debug_span;
use tracing::Level;

#[derive(Parser)]
#[command(
  name = "split-js",
  about = "Moves uses of React members into ReactDOM and ReactDOMServer"
)]
struct Cli {
  /// Files to rewrite in place.
  #[arg(required = true)]
  paths: Vec<PathBuf>,

  /// JSON config with the member tables and module names; defaults to the React split.
  #[arg(long)]
  config: Option<PathBuf>,

  /// Quote style of inserted string literals. Overrides the config.
  #[arg(long, value_name = "single|double")]
  quote: Option<QuoteStyle>,

  /// Print rewritten files to stdout instead of writing them.
  #[arg(long)]
  dry: bool,

  /// Log each pass to stderr.
  #[arg(long)]
  verbose: bool,
}

enum FileResult {
  Modified(String),
  Unmodified,
  Failed(String),
}

fn init_tracing(enabled: bool) {
  if !enabled {
    return;
  }
  let _ = tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_writer(std::io::stderr)
    .with_ansi(false)
    .try_init();
}

fn load_config(cli: &Cli) -> Result<SplitConfig, String> {
  let mut config = match &cli.config {
    Some(path) => {
      let raw = fs::read_to_string(path)
        .map_err(|err| format!("failed to read config {}: {err}", path.display()))?;
      SplitConfig::from_json(&raw).map_err(|err| format!("{}: {err}", path.display()))?
    }
    None => SplitConfig::default(),
  };
  if let Some(quote) = cli.quote {
    config.quote = quote;
  };
  Ok(config)
}

fn process(path: &Path, config: &SplitConfig, dry: bool) -> FileResult {
  let span = debug_span!("file", path = %path.display());
  let _enter = span.enter();
  let source = match fs::read_to_string(path) {
    Ok(source) => source,
    Err(err) => return FileResult::Failed(err.to_string()),
  };
  let outcome = match rewrite(&source, config) {
    Ok(outcome) => outcome,
    Err(err) => return FileResult::Failed(err.describe(&source)),
  };
  if !outcome.changed {
    return FileResult::Unmodified;
  };
  if !dry {
    if let Err(err) = fs::write(path, &outcome.output) {
      return FileResult::Failed(err.to_string());
    };
  };
  FileResult::Modified(outcome.output)
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let config = match load_config(&cli) {
    Ok(config) => config,
    Err(err) => {
      eprintln!("{err}");
      return ExitCode::FAILURE;
    }
  };

  let results: Vec<FileResult> = cli
    .paths
    .par_iter()
    .map(|path| process(path, &config, cli.dry))
    .collect();

  let mut failed = false;
  let mut out = stdout().lock();
  for (path, result) in cli.paths.iter().zip(results) {
    match result {
      FileResult::Modified(output) => {
        if cli.dry {
          let _ = out.write_all(output.as_bytes());
        };
        eprintln!("ok {}", path.display());
      }
      FileResult::Unmodified => eprintln!("unmodified {}", path.display()),
      FileResult::Failed(message) => {
        failed = true;
        eprintln!("error {}: {}", path.display(), message);
      }
    }
  }
  if failed {
    ExitCode::FAILURE
  } else {
    ExitCode::SUCCESS
  }
}
