//! Smarteval command line: produce SMART-weighted runs, score them against
//! relevance judgments and correlate them with a reference run.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use Smarteval::analysis::analyzer::AnalyzerRegistry;
use Smarteval::core::config::EvalConfig;
use Smarteval::core::error::Result;
use Smarteval::eval::comparator::RunComparator;
use Smarteval::eval::ndcg::mean_ndcg;
use Smarteval::eval::precision::{mean_average_precision, mean_r_precision};
use Smarteval::index::memory::MemoryIndex;
use Smarteval::run::corpus::read_corpus;
use Smarteval::run::outline::read_outlines;
use Smarteval::run::qrels::read_qrels;
use Smarteval::run::runfile::read_ranked_lists;
use Smarteval::search::runner::SearchSession;

#[derive(Parser)]
#[command(name = "smarteval")]
#[command(about = "SMART query weighting runs and ranking evaluation", version)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter (e.g. "debug"); RUST_LOG is used when absent
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index a corpus and write one run file per level and method
    Search {
        /// Paragraph corpus, one JSON object per line
        corpus: PathBuf,

        /// Outline pages providing the queries
        outlines: PathBuf,
    },

    /// Score a run file against relevance judgments
    Evaluate {
        qrels: PathBuf,
        run: PathBuf,
    },

    /// Correlate every run in a directory with its group's reference run
    Compare {
        results_dir: PathBuf,
    },
}

fn init_logging(level: Option<&str>) {
    let env_filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn load_config(path: Option<&Path>) -> Result<EvalConfig> {
    match path {
        Some(path) => EvalConfig::from_file(path),
        None => Ok(EvalConfig::default()),
    }
}

fn search(config: &EvalConfig, corpus: &Path, outlines: &Path) -> Result<()> {
    let analyzer = AnalyzerRegistry::default().get(&config.analyzer)?;
    let paragraphs = read_corpus(corpus)?;
    info!(paragraphs = paragraphs.len(), analyzer = %config.analyzer, "indexing corpus");

    let index = MemoryIndex::from_documents(
        analyzer,
        paragraphs.into_iter().map(|p| (p.id, p.text)),
    )?;
    let pages = read_outlines(outlines)?;

    let written = SearchSession::new(&index, config).run_all(&pages)?;
    info!(runs = written.len(), dir = %config.results_dir.display(), "search finished");
    Ok(())
}

fn evaluate(config: &EvalConfig, qrels: &Path, run: &Path) -> Result<()> {
    let table = read_qrels(qrels)?;
    let lists = read_ranked_lists(run)?;
    info!(judged_queries = table.len(), run_queries = lists.len(), "evaluating");

    println!("Precision @ R: {}", mean_r_precision(&table, &lists));
    println!("MAP: {}", mean_average_precision(&table, &lists));
    println!("NDCG @ {}: {}", config.ndcg_cutoff, mean_ndcg(&table, &lists, config.ndcg_cutoff));
    Ok(())
}

fn compare(config: &EvalConfig, results_dir: &Path) -> Result<()> {
    for comparison in RunComparator::new(config).compare_dir(results_dir)? {
        println!("{}", comparison);
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Search { corpus, outlines } => search(&config, &corpus, &outlines),
        Commands::Evaluate { qrels, run } => evaluate(&config, &qrels, &run),
        Commands::Compare { results_dir } => compare(&config, &results_dir),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
