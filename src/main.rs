use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;

use kira_chrf::chrf::{ChrFConfig, ChrFError, ChrFEvaluator};
use kira_chrf::corpus::{CorpusError, read_corpus};
use kira_chrf::logging;
use kira_chrf::report::ScoreReport;
use kira_chrf::report::json::render_report_json;
use kira_chrf::report::text::render_report_text;

#[derive(Debug, Parser)]
#[command(
    name = "kira-chrf",
    version,
    about = "Character n-gram F-score between hypothesis and reference corpora"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a hypothesis file against a reference file, one sentence per line
    Score(ScoreArgs),
}

#[derive(Debug, Clone, Args)]
struct ScoreArgs {
    /// Hypothesis corpus (plain text or .gz)
    #[arg(long = "hyp", value_name = "PATH")]
    hypotheses: PathBuf,

    /// Reference corpus (plain text or .gz)
    #[arg(long = "ref", value_name = "PATH")]
    references: PathBuf,

    /// JSON scorer configuration; individual flags override its fields
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Start from a named preset instead of the defaults
    #[arg(long, value_enum, conflicts_with = "config")]
    preset: Option<Preset>,

    /// n-gram order
    #[arg(long)]
    order: Option<usize>,

    /// Recall weight
    #[arg(long)]
    beta: Option<f64>,

    /// Characters removed before n-gram extraction; "" keeps everything
    #[arg(long, value_name = "CHARS")]
    ignore: Option<String>,

    /// Metric label used in reports
    #[arg(long)]
    name: Option<String>,

    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Also score every aligned pair on its own
    #[arg(long)]
    sentences: bool,

    /// Write the report here instead of stdout
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Preset {
    Chrf3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Corpus(#[from] CorpusError),
    #[error("invalid scorer configuration: {0}")]
    Config(#[from] ChrFError),
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to render report: {0}")]
    Render(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Score(args) => {
            let rendered = score(&args)?;
            match &args.out {
                Some(path) => write_report(path, &rendered),
                None => {
                    print!("{rendered}");
                    Ok(())
                }
            }
        }
    }
}

fn score(args: &ScoreArgs) -> Result<String, CliError> {
    let evaluator = ChrFEvaluator::new(resolve_config(args)?)?;
    tracing::info!(
        metric = evaluator.name(),
        order = evaluator.order(),
        beta = evaluator.beta(),
        "scorer configured"
    );

    let hypotheses = read_corpus(&args.hypotheses)?;
    let references = read_corpus(&args.references)?;
    if hypotheses.len() != references.len() {
        tracing::warn!(
            hypotheses = hypotheses.len(),
            references = references.len(),
            "corpus lengths differ; only the first {} pairs are scored",
            hypotheses.len().min(references.len())
        );
    }

    let stats = evaluator.statistics(&hypotheses, &references);
    let mut report = ScoreReport::new(&evaluator, &stats, hypotheses.len(), references.len());
    if args.sentences {
        report = report.with_sentence_scores(evaluator.sentence_scores(&hypotheses, &references));
    }
    tracing::info!(
        score = report.score,
        pairs = report.n_pairs,
        degenerate = report.degenerate,
        "scored corpus"
    );

    match args.format {
        ReportFormat::Text => Ok(render_report_text(&report)),
        ReportFormat::Json => Ok(render_report_json(&report)?),
    }
}

/// Defaults, then preset or config file, then individual flags.
fn resolve_config(args: &ScoreArgs) -> Result<ChrFConfig, CliError> {
    let mut config = match (&args.config, args.preset) {
        (Some(path), _) => load_config(path)?,
        (None, Some(Preset::Chrf3)) => ChrFConfig {
            beta: 3.0,
            ..ChrFConfig::default()
        },
        (None, None) => ChrFConfig::default(),
    };
    if let Some(order) = args.order {
        config.order = order;
    }
    if let Some(beta) = args.beta {
        config.beta = beta;
    }
    if let Some(ignore) = &args.ignore {
        config.ignored = ignore.chars().collect();
    }
    if let Some(name) = &args.name {
        config.display_name = Some(name.clone());
    }
    Ok(config)
}

fn load_config(path: &Path) -> Result<ChrFConfig, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CliError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_report(path: &Path, rendered: &str) -> Result<(), CliError> {
    let to_err = |source| CliError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_err)?;
    }
    fs::write(path, rendered).map_err(to_err)?;
    tracing::info!(path = %path.display(), "report written");
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
