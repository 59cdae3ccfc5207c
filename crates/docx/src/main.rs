//! DocX CLI - Versioned documentation content engine.
//!
//! Provides commands for:
//! - `versions`, `nav`, `doc`, `paginate`, `docs`: content queries
//! - `corpus`, `search`: search corpus export and querying
//! - `check`: slug collision validation
//!
//! Results are printed to stdout as JSON; diagnostics go to stderr.

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    CheckArgs, CorpusArgs, DocArgs, DocsArgs, GlobalArgs, NavArgs, PaginateArgs, SearchArgs,
};
use output::Output;

/// DocX - Versioned documentation content engine.
#[derive(Parser)]
#[command(name = "docx", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List versions in natural order.
    Versions,
    /// Print the navigation tree of a version.
    Nav(NavArgs),
    /// Resolve a document by slug.
    Doc(DocArgs),
    /// Print previous and next pages for an href.
    Paginate(PaginateArgs),
    /// List every content file of a version.
    Docs(DocsArgs),
    /// Build the search corpus over all versions.
    Corpus(CorpusArgs),
    /// Search the corpus.
    Search(SearchArgs),
    /// Check every version for slug collisions.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.global.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let global = cli.global;
    let result = match cli.command {
        Commands::Versions => commands::versions(&global),
        Commands::Nav(args) => args.execute(&global),
        Commands::Doc(args) => args.execute(&global),
        Commands::Paginate(args) => args.execute(&global),
        Commands::Docs(args) => args.execute(&global),
        Commands::Corpus(args) => args.execute(&global),
        Commands::Search(args) => args.execute(&global),
        Commands::Check(args) => args.execute(&global),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output.error(&format!("Error: {err}"));
            ExitCode::FAILURE
        }
    }
}
