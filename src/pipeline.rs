//! The two runs the binary offers: collect + dump, and load + render.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

use crate::collect::collect;
use crate::config::Config;
use crate::github::{GithubClient, ProfileSource};
use crate::{jsonl, report};

/// Collect stats from GitHub for `logins` and write them to `output`.
pub async fn run_dump(config: Config, logins: &[String], output: &Path) -> Result<()> {
    warn_if_unauthenticated(&config);
    let client = GithubClient::new(config)?;
    dump_from(&client, logins, output).await
}

/// Same as [`run_dump`] against any profile source.
pub async fn dump_from<S>(source: &S, logins: &[String], output: &Path) -> Result<()>
where
    S: ProfileSource + ?Sized,
{
    let users = collect(source, logins).await?;

    info!("Writing stats to '{}'", output.display());
    jsonl::dump(&users, output)
}

/// Load the records in `stats` and render them into `output`.
pub fn run_html(stats: &Path, template: &Path, output: &Path) -> Result<()> {
    info!("Loading stats from '{}'", stats.display());
    let users = jsonl::load(stats)?;

    info!("Generating HTML with {} users", users.len());
    let html = report::render(&users, template)?;

    info!("Writing HTML to '{}'", output.display());
    std::fs::write(output, html)
        .with_context(|| format!("Failed to write '{}'", output.display()))?;
    Ok(())
}

fn warn_if_unauthenticated(config: &Config) {
    if !config.is_authenticated() {
        warn!("No GitHub token set. You are unauthenticated and may be rate-limited.");
    }
}
