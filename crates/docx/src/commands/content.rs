//! Content query commands: `nav`, `doc`, `paginate`, `docs`.

use clap::Args;

use super::GlobalArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    /// Version directory name.
    version: String,
}

impl NavArgs {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let site = global.open_site()?;
        let tree = site.navigation(&self.version)?;
        Output::new().json(&tree)
    }
}

/// Arguments for the doc command.
#[derive(Args)]
pub(crate) struct DocArgs {
    /// Version directory name.
    version: String,

    /// Slug segments (`guides setup`) or one path (`guides/setup`).
    #[arg(required = true)]
    slug: Vec<String>,
}

impl DocArgs {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let site = global.open_site()?;
        let doc = site.resolve(&self.version, &split_slug(&self.slug))?;
        Output::new().json(&doc)
    }
}

/// Split every argument on `/`, dropping empty segments.
fn split_slug(args: &[String]) -> Vec<&str> {
    args.iter()
        .flat_map(|arg| arg.split('/'))
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Arguments for the paginate command.
#[derive(Args)]
pub(crate) struct PaginateArgs {
    /// Version directory name.
    version: String,

    /// Href of the current page (e.g. `/docs/v1/guides/setup`).
    href: String,
}

impl PaginateArgs {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let site = global.open_site()?;
        let pagination = site.pagination(&self.version, &self.href)?;
        Output::new().json(&pagination)
    }
}

/// Arguments for the docs command.
#[derive(Args)]
pub(crate) struct DocsArgs {
    /// Version directory name.
    version: String,
}

impl DocsArgs {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let site = global.open_site()?;
        Output::new().json(&site.documents(&self.version))
    }
}
