//! Search commands: `corpus` and `search`.

use std::path::PathBuf;

use clap::Args;
use docx_search::{BackendRegistry, SearchOptions};

use super::{GlobalArgs, open_site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the corpus command.
#[derive(Args)]
pub(crate) struct CorpusArgs {
    /// Write the corpus to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl CorpusArgs {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let site = global.open_site()?;
        let corpus = site.search_corpus();

        match self.output {
            Some(path) => {
                let json = serde_json::to_string_pretty(&corpus)?;
                std::fs::write(&path, json)?;
                output.success(&format!(
                    "Wrote {} documents to {}",
                    corpus.len(),
                    path.display()
                ));
                Ok(())
            }
            None => output.json(&corpus),
        }
    }
}

/// Arguments for the search command.
#[derive(Args)]
pub(crate) struct SearchArgs {
    /// Search query.
    query: String,

    /// Restrict results to one version (`all` for every version).
    #[arg(long)]
    version: Option<String>,

    /// Maximum number of results (default: `search.limit` from config).
    #[arg(short, long)]
    limit: Option<usize>,

    /// Search backend (overrides config).
    #[arg(short, long)]
    provider: Option<String>,
}

impl SearchArgs {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let config = global.load_config(self.provider)?;
        let mut backend = BackendRegistry::with_defaults().create(&config.search.provider)?;

        let site = open_site(&config);
        backend.initialize(site.search_corpus());

        let options = SearchOptions {
            limit: Some(self.limit.unwrap_or(config.search.limit)),
            version: self.version,
        };
        let results = backend.search(&self.query, &options);
        tracing::info!(
            backend = backend.name(),
            query = %self.query,
            results = results.len(),
            "Search complete"
        );

        Output::new().json(&results)
    }
}
