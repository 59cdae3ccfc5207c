//! CLI command implementations.

mod check;
mod content;
mod search;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use docx_cache::{Cache, MemoryCache, NullCache};
use docx_config::{CliSettings, Config, ContentConfig};
use docx_content::{ContentLayout, Site};
use docx_storage::FsStorage;

pub(crate) use check::CheckArgs;
pub(crate) use content::{DocArgs, DocsArgs, NavArgs, PaginateArgs};
pub(crate) use search::{CorpusArgs, SearchArgs};

use crate::error::CliError;
use crate::output::Output;

/// Flags shared by every command.
#[derive(Args)]
pub(crate) struct GlobalArgs {
    /// Path to configuration file (default: auto-discover docx.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Content root directory (overrides config).
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    /// Disable caching.
    #[arg(long, global = true)]
    no_cache: bool,

    /// Enable verbose output (info-level logs on stderr).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// Load configuration with these flags and an optional search provider override.
    pub(crate) fn load_config(&self, search_provider: Option<String>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            root: self.root.clone(),
            cache_enabled: self.no_cache.then_some(false),
            search_provider,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }

    /// Load configuration and open the site it describes.
    pub(crate) fn open_site(&self) -> Result<Site, CliError> {
        let config = self.load_config(None)?;
        Ok(open_site(&config))
    }
}

/// Build a [`Site`] over the configured content root.
pub(crate) fn open_site(config: &Config) -> Site {
    let content = &config.content_resolved;
    tracing::info!(
        root = %content.root.display(),
        cache = config.cache.enabled,
        "Opening content root"
    );

    let cache: Arc<dyn Cache> = if config.cache.enabled {
        Arc::new(MemoryCache::new())
    } else {
        Arc::new(NullCache)
    };

    Site::new(
        Arc::new(FsStorage::new(content.root.clone())),
        cache,
        layout_from_config(content),
    )
}

fn layout_from_config(content: &ContentConfig) -> ContentLayout {
    ContentLayout {
        href_prefix: content.href_prefix.clone(),
        entry_file: content.entry_file.clone(),
        extensions: content.extensions.clone(),
        hidden_marker: content.hidden_marker.clone(),
    }
}

/// `docx versions`: print versions in natural order.
pub(crate) fn versions(global: &GlobalArgs) -> Result<(), CliError> {
    let site = global.open_site()?;
    Output::new().json(&site.versions())
}
