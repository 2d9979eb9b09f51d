//! `packagecloud push` command implementation.

use packagecloud_core::error::PackagecloudResult;
use packagecloud_core::types::PackageTarget;
use packagecloud_core::utils::file_name;

use super::CommandContext;

/// Execute the `packagecloud push` command
pub async fn execute(target: &str, source: &str, ctx: &CommandContext) -> PackagecloudResult<()> {
    let (repo, distro, version) = PackageTarget::parse_full(target)?;

    ctx.client.push_package(&repo, &distro, &version, source).await?;

    ctx.output.success(&format!("Pushed {} to {}", file_name(source), target));
    Ok(())
}
