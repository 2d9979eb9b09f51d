//! `packagecloud rm` command implementation.

use packagecloud_core::error::PackagecloudResult;
use packagecloud_core::types::PackageTarget;

use super::CommandContext;

/// Execute the `packagecloud rm` command
pub async fn execute(target: &str, filename: &str, ctx: &CommandContext) -> PackagecloudResult<()> {
    let (repo, distro, version) = PackageTarget::parse_full(target)?;

    ctx.client.delete_package(&repo, &distro, &version, filename).await?;

    ctx.output.success(&format!("Deleted {} from {}", filename, target));
    Ok(())
}
