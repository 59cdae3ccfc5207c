//! `docx check` command implementation.

use std::collections::BTreeMap;

use clap::Args;
use docx_content::SlugCollision;

use super::GlobalArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Only check this version.
    #[arg(long)]
    version: Option<String>,
}

impl CheckArgs {
    /// Validate every version and print collisions grouped by version.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Collisions`] if any version has colliding slugs.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let site = global.open_site()?;

        let versions = match self.version {
            Some(version) => vec![version],
            None => site.versions(),
        };

        let report: BTreeMap<String, Vec<SlugCollision>> = versions
            .iter()
            .map(|version| (version.clone(), site.validate(version)))
            .filter(|(_, collisions)| !collisions.is_empty())
            .collect();

        let total: usize = report.values().map(Vec::len).sum();
        if total == 0 {
            output.success(&format!("No slug collisions in {} version(s)", versions.len()));
            return Ok(());
        }

        for (version, collisions) in &report {
            for collision in collisions {
                output.warning(&format!("{version}: {collision}"));
            }
        }
        output.json(&report)?;

        Err(CliError::Collisions(total))
    }
}
