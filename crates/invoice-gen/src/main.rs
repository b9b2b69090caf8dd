//! `invoice-gen`: writes one themed HTML invoice template per catalog theme.
//!
//! ```text
//! invoice-gen generate --out-dir invoice_templates
//! invoice-gen generate --themes my-themes.yaml --only acme --dry-run
//! invoice-gen styles
//! invoice-gen --output json themes
//! ```

mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use console::Style;
use invoice_render::output::DEFAULT_OUT_DIR;
use invoice_render::{
    generate, FailurePolicy, GenerateOptions, Materializer, StyleRegistry, ThemeCatalog,
};

/// Generate themed HTML invoice templates
#[derive(Debug, Parser)]
#[command(name = "invoice-gen", version, about)]
struct Cli {
    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    output: OutputFormat,

    /// More log output (-v info, -vv debug, -vvv trace). RUST_LOG wins if set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Yaml,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render the catalog and write <slug>.html files
    Generate(GenerateArgs),
    /// List registered style names
    Styles,
    /// List catalog themes
    Themes(CatalogArgs),
}

#[derive(Debug, Args)]
struct CatalogArgs {
    /// Theme catalog YAML file (defaults to the built-in twelve)
    #[arg(long, value_name = "FILE")]
    themes: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Directory the templates are written to
    #[arg(long, value_name = "DIR", default_value = DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    #[command(flatten)]
    catalog: CatalogArgs,

    /// Only generate these slugs (repeatable)
    #[arg(long, value_name = "SLUG")]
    only: Vec<String>,

    /// Stop at the first failing theme
    #[arg(long)]
    fail_fast: bool,

    /// Validate and render without writing
    #[arg(long)]
    dry_run: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{} {err:#}", Style::new().red().bold().apply_to("error:"));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Runs the selected command. `Ok(false)` means some theme failed.
fn run(cli: &Cli) -> anyhow::Result<bool> {
    match &cli.command {
        Command::Styles => {
            let registry = StyleRegistry::builtin();
            let names: Vec<&str> = registry.names().collect();
            print!("{}", report::styles(&names, cli.output)?);
            Ok(true)
        }
        Command::Themes(args) => {
            let catalog = load_catalog(args.themes.as_deref())?;
            print!("{}", report::themes(&catalog, cli.output)?);
            Ok(true)
        }
        Command::Generate(args) => run_generate(args, cli.output),
    }
}

fn run_generate(args: &GenerateArgs, format: OutputFormat) -> anyhow::Result<bool> {
    let mut catalog = load_catalog(args.catalog.themes.as_deref())?;
    if !args.only.is_empty() {
        catalog = catalog.filter(&args.only)?;
    }

    let materializer =
        Materializer::new(StyleRegistry::builtin()).context("failed to load the invoice skeleton")?;
    let policy = if args.fail_fast {
        FailurePolicy::FailFast
    } else {
        FailurePolicy::Isolate
    };
    let options = GenerateOptions::new(&args.out_dir)
        .with_policy(policy)
        .with_dry_run(args.dry_run);

    tracing::info!(
        themes = catalog.len(),
        out_dir = %args.out_dir.display(),
        dry_run = args.dry_run,
        "generating"
    );
    let report = generate(&materializer, catalog.themes(), &options)
        .with_context(|| format!("generation into {} aborted", args.out_dir.display()))?;

    print!("{}", report::generation(&report, format)?);
    Ok(report.is_success())
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<ThemeCatalog> {
    match path {
        Some(path) => ThemeCatalog::from_file(path)
            .with_context(|| format!("could not load theme catalog {}", path.display())),
        None => ThemeCatalog::builtin().context("built-in theme catalog is invalid"),
    }
}
