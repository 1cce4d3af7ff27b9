mod debug_report;

use anyhow::{Context, Result};
use clap::Parser;
use ircdefs::driver::{DEFAULT_BRANCH, DEFAULT_REPO};
use ircdefs::emit::{MarkdownReport, ReportRenderer, RustEmitter};
use ircdefs::source::DataDir;
use ircdefs::{Generator, Options, SchemaRegistry};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Generate Rust constants from IRC protocol definition files.
#[derive(Debug, Parser)]
#[command(name = "ircdefs", version, about)]
struct Cli {
    /// Local checkout of the definitions repository (the directory containing `_data/`).
    #[arg(long, value_name = "DIR")]
    data_dir: PathBuf,

    /// Directory to write generated modules into.
    #[arg(long, value_name = "DIR")]
    output: PathBuf,

    /// Repository URL recorded in generated headers and report links.
    #[arg(long, default_value = DEFAULT_REPO)]
    repo: String,

    /// Branch recorded in generated headers and report links.
    #[arg(long = "git-branch", default_value = DEFAULT_BRANCH)]
    branch: String,

    /// Do not write `README.md` into the output directory.
    #[arg(long)]
    no_readme: bool,

    /// Print a per-kind summary after generating.
    #[arg(long)]
    summary: bool,

    /// Force ANSI color in the summary.
    #[arg(long, conflicts_with = "no_color")]
    color: bool,

    /// Disable ANSI color in the summary.
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();

    let cli = Cli::parse();

    let data = DataDir::new(&cli.data_dir)
        .load()
        .with_context(|| format!("failed to read definitions from {}", cli.data_dir.display()))?;

    let generator = Generator::new(SchemaRegistry::builtin(), Options { repo: cli.repo, branch: cli.branch });
    let mut emitter = RustEmitter::new(&cli.output);
    let mut report = MarkdownReport::new(cli.output.join("README.md"));
    let renderer: Option<&mut dyn ReportRenderer> = if cli.no_readme { None } else { Some(&mut report) };

    let generation = generator.run(&data, &mut emitter, renderer).context("generation failed")?;

    if cli.summary {
        let color = if cli.no_color { false } else { cli.color || io::stdout().is_terminal() };
        debug_report::print_run(&generation, color);
    }

    Ok(())
}
