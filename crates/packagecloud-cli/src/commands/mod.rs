//! Command implementations and dispatch logic.
//!
//! Each command is an async function taking its parsed arguments and a
//! `CommandContext`.

use std::path::PathBuf;

use packagecloud_api::{ClientConfig, PackagecloudClient, SearchQuery};
use packagecloud_config::Config;
use packagecloud_core::error::{PackagecloudError, PackagecloudResult};
use packagecloud_core::types::{PackageDetail, PackageTarget};
use tracing::info;

pub mod distro;
pub mod list;
pub mod promote;
pub mod pull;
pub mod push;
pub mod rm;
pub mod stats;


use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    /// Directory `pull` downloads into
    pub cwd: PathBuf,
    pub client: PackagecloudClient,
    pub output: OutputHandler,
}

impl CommandContext {
    /// Create a new command context from resolved configuration
    pub fn new(config: &Config) -> PackagecloudResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| PackagecloudError::io("failed to get current directory".to_string(), e))?;

        let client = PackagecloudClient::new(
            ClientConfig::new(config.token.clone()).with_base_url(config.url.clone()),
        )?;

        Ok(Self {
            cwd,
            client,
            output: OutputHandler::new(),
        })
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> PackagecloudResult<()> {
    match command {
        Commands::Push { target, source } => {
            info!("Pushing {} to {}", source, target);
            push::execute(&target, &source, ctx).await
        }
        Commands::Rm { target, filename } => {
            info!("Deleting {} from {}", filename, target);
            rm::execute(&target, &filename, ctx).await
        }
        Commands::Promote { target, filename, destination } => {
            info!("Promoting {} from {} to {}", filename, target, destination);
            promote::execute(&target, &filename, &destination, ctx).await
        }
        Commands::List { target, query, version } => {
            info!("Listing {} in {}", query, target);
            list::execute(&target, &query, version.as_deref(), ctx).await
        }
        Commands::Pull { target, query, version } => {
            info!("Pulling {} from {}", query, target);
            pull::execute(&target, &query, version.as_deref(), ctx).await
        }
        Commands::Distro { ecosystem, name } => {
            info!("Showing distributions (ecosystem: {:?}, name: {:?})", ecosystem, name);
            distro::execute(ecosystem, name.as_deref(), ctx).await
        }
        Commands::Stats { target, query, version, start_date, end_date, detail } => {
            info!("Collecting download stats for {} in {}", query, target);
            let range = stats::DateRange {
                start: start_date,
                end: end_date,
            };
            stats::execute(&target, &query, version.as_deref(), &range, detail, ctx).await
        }
    }
}

/// `dist` search parameter for a target: `distro` or `distro/version`
pub fn search_dist(target: &PackageTarget) -> Option<String> {
    match (&target.distro, &target.version) {
        (Some(distro), Some(version)) => Some(format!("{}/{}", distro, version)),
        (Some(distro), None) => Some(distro.clone()),
        _ => None,
    }
}

/// Search a target's repository and keep packages of the given version
pub async fn find_packages(
    target: &str,
    query: &str,
    version: Option<&str>,
    ctx: &CommandContext,
) -> PackagecloudResult<Vec<PackageDetail>> {
    let target = PackageTarget::parse(target)?;
    let search = SearchQuery::new(query).with_dist(search_dist(&target));

    let mut details = ctx.client.search_packages(&target.repo, &search).await?;
    details.retain(|detail| detail.matches_version(version));
    Ok(details)
}
