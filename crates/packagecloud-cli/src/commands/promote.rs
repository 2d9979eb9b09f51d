//! `packagecloud promote` command implementation.

use packagecloud_core::error::{PackagecloudError, PackagecloudResult};
use packagecloud_core::types::PackageTarget;

use super::CommandContext;

/// Execute the `packagecloud promote` command
pub async fn execute(
    target: &str,
    filename: &str,
    destination: &str,
    ctx: &CommandContext,
) -> PackagecloudResult<()> {
    let (src_repo, distro, version) = PackageTarget::parse_full(target)?;

    let dst = PackageTarget::parse(destination)?;
    if dst.segments() != 2 {
        return Err(PackagecloudError::InvalidTarget {
            target: destination.to_string(),
            reason: "expected user/repo".to_string(),
        });
    }

    ctx.client
        .promote_package(&dst.repo, &src_repo, &distro, &version, filename)
        .await?;

    ctx.output.success(&format!("Promoted {} from {} to {}", filename, src_repo, dst.repo));
    Ok(())
}
