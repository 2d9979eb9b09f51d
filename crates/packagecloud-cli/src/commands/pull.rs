//! `packagecloud pull` command implementation.
//!
//! Downloads every package matching a query into the working directory,
//! named after the package's filename.

use packagecloud_core::error::PackagecloudResult;
use packagecloud_core::utils::file_name;

use super::{find_packages, CommandContext};

/// Execute the `packagecloud pull` command
pub async fn execute(
    target: &str,
    query: &str,
    version: Option<&str>,
    ctx: &CommandContext,
) -> PackagecloudResult<()> {
    let details = find_packages(target, query, version, ctx).await?;
    if details.is_empty() {
        ctx.output.warn(&format!("No packages matching '{}' in {}", query, target));
        return Ok(());
    }

    for detail in &details {
        // Server-provided names must not escape the working directory
        let destination = ctx.cwd.join(file_name(&detail.filename));
        let written = ctx.client.download_package(detail, &destination).await?;

        ctx.output.data(&format!(
            "{} {} {} {}",
            detail.filename, detail.name, detail.version, detail.distro_version
        ));
        ctx.output.info(&format!("  {} bytes", written));
    }

    ctx.output.success(&format!("Pulled {} package(s)", details.len()));
    Ok(())
}
